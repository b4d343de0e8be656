use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::portfolio::domain::owned::{normalize_optional, OwnedEntity, OwnedImageEntity};
use crate::portfolio::domain::validate::{self, ValidateInput, ValidationErrors};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, column_type = "Uuid")]
    pub id: Uuid,

    #[sea_orm(column_name = "user_id", column_type = "Uuid")]
    pub user_id: Uuid,

    pub title: String,
    pub description: String,
    pub image_path: Option<String>,
    pub project_url: Option<String>,
    pub github_url: Option<String>,
    pub technologies: Option<String>,
    pub is_featured: bool,
    pub display_order: i32,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,

    #[sea_orm(column_type = "TimestampWithTimeZone")]
    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(column_type = "TimestampWithTimeZone", nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::modules::auth::adapter::outgoing::sea_orm_entity::users::Entity",
        from = "Column::UserId",
        to = "crate::modules::auth::adapter::outgoing::sea_orm_entity::users::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Users,
}

impl Related<crate::modules::auth::adapter::outgoing::sea_orm_entity::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectInput {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub project_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub technologies: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default)]
    pub start_date: Option<Date>,
    #[serde(default)]
    pub end_date: Option<Date>,
}

impl ValidateInput for ProjectInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        validate::require(&mut errors, "title", &self.title);
        validate::max_len(&mut errors, "title", &self.title, 200);
        validate::require(&mut errors, "description", &self.description);
        validate::max_len(&mut errors, "description", &self.description, 2000);
        validate::optional_max_len(&mut errors, "project_url", self.project_url.as_deref(), 255);
        validate::valid_url(&mut errors, "project_url", self.project_url.as_deref());
        validate::optional_max_len(&mut errors, "github_url", self.github_url.as_deref(), 255);
        validate::valid_url(&mut errors, "github_url", self.github_url.as_deref());
        validate::optional_max_len(&mut errors, "technologies", self.technologies.as_deref(), 500);

        errors.into_result()
    }
}

impl OwnedEntity for Entity {
    type ActiveModel = ActiveModel;
    type Input = ProjectInput;

    const RESOURCE: &'static str = "Project";

    fn id_column() -> Column {
        Column::Id
    }

    fn owner_column() -> Column {
        Column::UserId
    }

    fn order_column() -> Column {
        Column::DisplayOrder
    }

    fn image_path(model: &Model) -> Option<&str> {
        model.image_path.as_deref()
    }

    fn insert_model(
        owner: Uuid,
        now: chrono::DateTime<chrono::Utc>,
        input: ProjectInput,
    ) -> ActiveModel {
        ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(owner),
            title: Set(input.title.trim().to_string()),
            description: Set(input.description.trim().to_string()),
            image_path: Set(None),
            project_url: Set(normalize_optional(input.project_url)),
            github_url: Set(normalize_optional(input.github_url)),
            technologies: Set(normalize_optional(input.technologies)),
            is_featured: Set(input.is_featured),
            display_order: Set(input.display_order),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            created_at: Set(now.fixed_offset()),
            updated_at: Set(None),
        }
    }

    fn update_model(input: ProjectInput) -> ActiveModel {
        ActiveModel {
            title: Set(input.title.trim().to_string()),
            description: Set(input.description.trim().to_string()),
            project_url: Set(normalize_optional(input.project_url)),
            github_url: Set(normalize_optional(input.github_url)),
            technologies: Set(normalize_optional(input.technologies)),
            is_featured: Set(input.is_featured),
            display_order: Set(input.display_order),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            updated_at: Set(Some(chrono::Utc::now().fixed_offset())),
            ..Default::default()
        }
    }
}

impl OwnedImageEntity for Entity {
    const IMAGE_FOLDER: &'static str = "projects";

    fn image_model(path: Option<String>) -> ActiveModel {
        ActiveModel {
            image_path: Set(path),
            updated_at: Set(Some(chrono::Utc::now().fixed_offset())),
            ..Default::default()
        }
    }
}

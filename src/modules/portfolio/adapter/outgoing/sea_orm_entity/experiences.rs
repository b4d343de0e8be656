use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::portfolio::domain::owned::{normalize_optional, OwnedEntity};
use crate::portfolio::domain::validate::{self, ValidateInput, ValidationErrors};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "experiences")]
pub struct Model {
    #[sea_orm(primary_key, column_type = "Uuid")]
    pub id: Uuid,

    #[sea_orm(column_name = "user_id", column_type = "Uuid")]
    pub user_id: Uuid,

    pub job_title: String,
    pub company: String,
    pub location: Option<String>,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub is_current: bool,
    pub description: Option<String>,
    pub display_order: i32,

    #[sea_orm(column_type = "TimestampWithTimeZone")]
    pub created_at: DateTimeWithTimeZone,
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
pub struct ExperienceInput {
    pub job_title: String,
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    pub start_date: Date,
    // An ongoing position may still carry an end_date; the client
    // decides how to render the combination.
    #[serde(default)]
    pub end_date: Option<Date>,
    #[serde(default)]
    pub is_current: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub display_order: i32,
}

impl ValidateInput for ExperienceInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        validate::require(&mut errors, "job_title", &self.job_title);
        validate::max_len(&mut errors, "job_title", &self.job_title, 200);
        validate::require(&mut errors, "company", &self.company);
        validate::max_len(&mut errors, "company", &self.company, 200);
        validate::optional_max_len(&mut errors, "location", self.location.as_deref(), 100);
        validate::optional_max_len(&mut errors, "description", self.description.as_deref(), 2000);

        errors.into_result()
    }
}

impl OwnedEntity for Entity {
    type ActiveModel = ActiveModel;
    type Input = ExperienceInput;

    const RESOURCE: &'static str = "Experience";

    fn id_column() -> Column {
        Column::Id
    }

    fn owner_column() -> Column {
        Column::UserId
    }

    fn order_column() -> Column {
        Column::DisplayOrder
    }

    fn insert_model(
        owner: Uuid,
        now: chrono::DateTime<chrono::Utc>,
        input: ExperienceInput,
    ) -> ActiveModel {
        ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(owner),
            job_title: Set(input.job_title.trim().to_string()),
            company: Set(input.company.trim().to_string()),
            location: Set(normalize_optional(input.location)),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            is_current: Set(input.is_current),
            description: Set(normalize_optional(input.description)),
            display_order: Set(input.display_order),
            created_at: Set(now.fixed_offset()),
        }
    }

    fn update_model(input: ExperienceInput) -> ActiveModel {
        ActiveModel {
            job_title: Set(input.job_title.trim().to_string()),
            company: Set(input.company.trim().to_string()),
            location: Set(normalize_optional(input.location)),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            is_current: Set(input.is_current),
            description: Set(normalize_optional(input.description)),
            display_order: Set(input.display_order),
            ..Default::default()
        }
    }
}

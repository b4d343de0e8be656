use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::portfolio::domain::owned::{normalize_optional, OwnedEntity};
use crate::portfolio::domain::validate::{self, ValidateInput, ValidationErrors};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "educations")]
pub struct Model {
    #[sea_orm(primary_key, column_type = "Uuid")]
    pub id: Uuid,

    #[sea_orm(column_name = "user_id", column_type = "Uuid")]
    pub user_id: Uuid,

    pub school: String,
    pub degree: String,
    pub field_of_study: Option<String>,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub description: Option<String>,
    pub grade: Option<String>,
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
pub struct EducationInput {
    pub school: String,
    pub degree: String,
    #[serde(default)]
    pub field_of_study: Option<String>,
    pub start_date: Date,
    #[serde(default)]
    pub end_date: Option<Date>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub display_order: i32,
}

impl ValidateInput for EducationInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        validate::require(&mut errors, "school", &self.school);
        validate::max_len(&mut errors, "school", &self.school, 200);
        validate::require(&mut errors, "degree", &self.degree);
        validate::max_len(&mut errors, "degree", &self.degree, 200);
        validate::optional_max_len(
            &mut errors,
            "field_of_study",
            self.field_of_study.as_deref(),
            100,
        );
        validate::optional_max_len(&mut errors, "description", self.description.as_deref(), 1000);
        validate::optional_max_len(&mut errors, "grade", self.grade.as_deref(), 50);

        errors.into_result()
    }
}

impl OwnedEntity for Entity {
    type ActiveModel = ActiveModel;
    type Input = EducationInput;

    const RESOURCE: &'static str = "Education";

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
        input: EducationInput,
    ) -> ActiveModel {
        ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(owner),
            school: Set(input.school.trim().to_string()),
            degree: Set(input.degree.trim().to_string()),
            field_of_study: Set(normalize_optional(input.field_of_study)),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            description: Set(normalize_optional(input.description)),
            grade: Set(normalize_optional(input.grade)),
            display_order: Set(input.display_order),
            created_at: Set(now.fixed_offset()),
        }
    }

    fn update_model(input: EducationInput) -> ActiveModel {
        ActiveModel {
            school: Set(input.school.trim().to_string()),
            degree: Set(input.degree.trim().to_string()),
            field_of_study: Set(normalize_optional(input.field_of_study)),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            description: Set(normalize_optional(input.description)),
            grade: Set(normalize_optional(input.grade)),
            display_order: Set(input.display_order),
            ..Default::default()
        }
    }
}

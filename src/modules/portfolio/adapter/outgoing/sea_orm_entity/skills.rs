use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::portfolio::domain::owned::{normalize_optional, OwnedEntity};
use crate::portfolio::domain::validate::{self, ValidateInput, ValidationErrors};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "skills")]
pub struct Model {
    #[sea_orm(primary_key, column_type = "Uuid")]
    pub id: Uuid,

    #[sea_orm(column_name = "user_id", column_type = "Uuid")]
    pub user_id: Uuid,

    pub name: String,
    pub proficiency: i32,
    pub category: Option<String>,
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
pub struct SkillInput {
    pub name: String,
    pub proficiency: i32,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub display_order: i32,
}

impl ValidateInput for SkillInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        validate::require(&mut errors, "name", &self.name);
        validate::max_len(&mut errors, "name", &self.name, 100);
        validate::optional_max_len(&mut errors, "category", self.category.as_deref(), 50);

        errors.into_result()
    }
}

impl OwnedEntity for Entity {
    type ActiveModel = ActiveModel;
    type Input = SkillInput;

    const RESOURCE: &'static str = "Skill";

    fn id_column() -> Column {
        Column::Id
    }

    fn owner_column() -> Column {
        Column::UserId
    }

    fn order_column() -> Column {
        Column::DisplayOrder
    }

    fn insert_model(owner: Uuid, now: chrono::DateTime<chrono::Utc>, input: SkillInput) -> ActiveModel {
        ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(owner),
            name: Set(input.name.trim().to_string()),
            // out-of-range values are clamped, not rejected
            proficiency: Set(input.proficiency.clamp(0, 100)),
            category: Set(normalize_optional(input.category)),
            display_order: Set(input.display_order),
            created_at: Set(now.fixed_offset()),
        }
    }

    fn update_model(input: SkillInput) -> ActiveModel {
        ActiveModel {
            name: Set(input.name.trim().to_string()),
            proficiency: Set(input.proficiency.clamp(0, 100)),
            category: Set(normalize_optional(input.category)),
            display_order: Set(input.display_order),
            ..Default::default()
        }
    }
}

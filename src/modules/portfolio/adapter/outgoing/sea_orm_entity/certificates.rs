use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::portfolio::domain::owned::{normalize_optional, OwnedEntity, OwnedImageEntity};
use crate::portfolio::domain::validate::{self, ValidateInput, ValidationErrors};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "certificates")]
pub struct Model {
    #[sea_orm(primary_key, column_type = "Uuid")]
    pub id: Uuid,

    #[sea_orm(column_name = "user_id", column_type = "Uuid")]
    pub user_id: Uuid,

    pub name: String,
    pub issuing_organization: String,
    pub credential_id: Option<String>,
    pub credential_url: Option<String>,
    pub issue_date: Option<Date>,
    // does_not_expire is presentational; an expiration_date already on
    // the row is kept as-is when it is set.
    pub expiration_date: Option<Date>,
    pub does_not_expire: bool,
    pub description: Option<String>,
    pub image_path: Option<String>,
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
pub struct CertificateInput {
    pub name: String,
    pub issuing_organization: String,
    #[serde(default)]
    pub credential_id: Option<String>,
    #[serde(default)]
    pub credential_url: Option<String>,
    #[serde(default)]
    pub issue_date: Option<Date>,
    #[serde(default)]
    pub expiration_date: Option<Date>,
    #[serde(default)]
    pub does_not_expire: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub display_order: i32,
}

impl ValidateInput for CertificateInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        validate::require(&mut errors, "name", &self.name);
        validate::max_len(&mut errors, "name", &self.name, 200);
        validate::require(
            &mut errors,
            "issuing_organization",
            &self.issuing_organization,
        );
        validate::max_len(
            &mut errors,
            "issuing_organization",
            &self.issuing_organization,
            200,
        );
        validate::optional_max_len(
            &mut errors,
            "credential_id",
            self.credential_id.as_deref(),
            100,
        );
        validate::optional_max_len(
            &mut errors,
            "credential_url",
            self.credential_url.as_deref(),
            255,
        );
        validate::valid_url(&mut errors, "credential_url", self.credential_url.as_deref());
        validate::optional_max_len(&mut errors, "description", self.description.as_deref(), 1000);

        errors.into_result()
    }
}

impl OwnedEntity for Entity {
    type ActiveModel = ActiveModel;
    type Input = CertificateInput;

    const RESOURCE: &'static str = "Certificate";

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
        input: CertificateInput,
    ) -> ActiveModel {
        ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(owner),
            name: Set(input.name.trim().to_string()),
            issuing_organization: Set(input.issuing_organization.trim().to_string()),
            credential_id: Set(normalize_optional(input.credential_id)),
            credential_url: Set(normalize_optional(input.credential_url)),
            issue_date: Set(input.issue_date),
            expiration_date: Set(input.expiration_date),
            does_not_expire: Set(input.does_not_expire),
            description: Set(normalize_optional(input.description)),
            image_path: Set(None),
            display_order: Set(input.display_order),
            created_at: Set(now.fixed_offset()),
        }
    }

    fn update_model(input: CertificateInput) -> ActiveModel {
        ActiveModel {
            name: Set(input.name.trim().to_string()),
            issuing_organization: Set(input.issuing_organization.trim().to_string()),
            credential_id: Set(normalize_optional(input.credential_id)),
            credential_url: Set(normalize_optional(input.credential_url)),
            issue_date: Set(input.issue_date),
            expiration_date: Set(input.expiration_date),
            does_not_expire: Set(input.does_not_expire),
            description: Set(normalize_optional(input.description)),
            display_order: Set(input.display_order),
            ..Default::default()
        }
    }
}

impl OwnedImageEntity for Entity {
    const IMAGE_FOLDER: &'static str = "certificates";

    fn image_model(path: Option<String>) -> ActiveModel {
        ActiveModel {
            image_path: Set(path),
            ..Default::default()
        }
    }
}

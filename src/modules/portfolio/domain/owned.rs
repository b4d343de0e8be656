use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelBehavior, ActiveModelTrait, EntityTrait, IntoActiveModel};
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use crate::portfolio::domain::validate::ValidateInput;

/// Contract for portfolio entries that belong to exactly one user.
///
/// Every entry shares the same shape: a uuid primary key, an owning
/// `user_id`, a `display_order` used for public listings, and a JSON
/// input payload that maps onto insert and update active models. The
/// generic repository and service are written against this trait, so
/// adding a new entry kind means implementing it on the entity and
/// wiring routes.
pub trait OwnedEntity: EntityTrait
where
    Self::Model: Serialize + IntoActiveModel<<Self as OwnedEntity>::ActiveModel> + Send + Sync,
{
    type ActiveModel: ActiveModelTrait<Entity = Self> + ActiveModelBehavior + Default + Send + 'static;
    type Input: ValidateInput + DeserializeOwned + Send + 'static;

    /// Human readable name used in error messages, e.g. "Skill".
    const RESOURCE: &'static str;

    fn id_column() -> Self::Column;
    fn owner_column() -> Self::Column;
    fn order_column() -> Self::Column;

    /// Public path of the image attached to this entry, when it has one.
    fn image_path(_model: &Self::Model) -> Option<&str> {
        None
    }

    /// Active model for a brand new row owned by `owner`.
    fn insert_model(
        owner: Uuid,
        now: DateTime<Utc>,
        input: Self::Input,
    ) -> <Self as OwnedEntity>::ActiveModel;

    /// Partial active model carrying only the client-editable fields.
    /// Must never touch id, owner, created_at or the image path.
    fn update_model(input: Self::Input) -> <Self as OwnedEntity>::ActiveModel;
}

/// Trim an optional text field, mapping blank input to NULL.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Owned entries that carry an uploaded image.
pub trait OwnedImageEntity: OwnedEntity
where
    Self::Model: Serialize + IntoActiveModel<<Self as OwnedEntity>::ActiveModel> + Send + Sync,
{
    /// Folder under the upload root, e.g. "projects".
    const IMAGE_FOLDER: &'static str;

    /// Active model that sets only the image path column.
    fn image_model(path: Option<String>) -> <Self as OwnedEntity>::ActiveModel;
}

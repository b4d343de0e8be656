use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::auth::adapter::outgoing::sea_orm_entity::users;
use crate::media::application::image_store::{ImageStore, ImageUpload};
use crate::media::domain::upload_policy::{UploadError, UploadPolicy};
use crate::portfolio::domain::owned::normalize_optional;
use crate::portfolio::domain::validate::{self, ValidateInput, ValidationErrors};

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Profile not found")]
    NotFound,

    #[error("{0}")]
    Validation(ValidationErrors),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("Database error: {0}")]
    Database(String),
}

/// Everything on the profile is optional. Username and email are fixed
/// at registration and not editable here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileInput {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub twitter_url: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
}

impl ValidateInput for ProfileInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        validate::optional_max_len(&mut errors, "first_name", self.first_name.as_deref(), 100);
        validate::optional_max_len(&mut errors, "last_name", self.last_name.as_deref(), 100);
        validate::optional_max_len(&mut errors, "bio", self.bio.as_deref(), 500);
        validate::optional_max_len(&mut errors, "job_title", self.job_title.as_deref(), 100);
        validate::optional_max_len(&mut errors, "location", self.location.as_deref(), 100);

        for (field, value) in [
            ("linkedin_url", self.linkedin_url.as_deref()),
            ("github_url", self.github_url.as_deref()),
            ("twitter_url", self.twitter_url.as_deref()),
            ("website_url", self.website_url.as_deref()),
        ] {
            validate::valid_url(&mut errors, field, value);
            validate::optional_max_len(&mut errors, field, value, 255);
        }

        errors.into_result()
    }
}

/// The authenticated user's own profile, email included.
#[derive(Clone)]
pub struct ProfileService {
    db: Arc<DatabaseConnection>,
    images: ImageStore,
}

impl ProfileService {
    pub fn new(db: Arc<DatabaseConnection>, images: ImageStore) -> Self {
        Self { db, images }
    }

    pub async fn get(&self, user_id: Uuid) -> Result<users::Model, ProfileError> {
        users::Entity::find_by_id(user_id)
            .one(self.db.as_ref())
            .await
            .map_err(|err| ProfileError::Database(err.to_string()))?
            .ok_or(ProfileError::NotFound)
    }

    pub async fn update(
        &self,
        user_id: Uuid,
        input: ProfileInput,
    ) -> Result<users::Model, ProfileError> {
        input.validate().map_err(ProfileError::Validation)?;

        let changes = users::ActiveModel {
            first_name: Set(normalize_optional(input.first_name)),
            last_name: Set(normalize_optional(input.last_name)),
            bio: Set(normalize_optional(input.bio)),
            job_title: Set(normalize_optional(input.job_title)),
            location: Set(normalize_optional(input.location)),
            linkedin_url: Set(normalize_optional(input.linkedin_url)),
            github_url: Set(normalize_optional(input.github_url)),
            twitter_url: Set(normalize_optional(input.twitter_url)),
            website_url: Set(normalize_optional(input.website_url)),
            updated_at: Set(Some(Utc::now().fixed_offset())),
            ..Default::default()
        };

        let updated: Vec<users::Model> = users::Entity::update_many()
            .set(changes)
            .filter(users::Column::Id.eq(user_id))
            .exec_with_returning(self.db.as_ref())
            .await
            .map_err(|err| ProfileError::Database(err.to_string()))?;

        updated.into_iter().next().ok_or(ProfileError::NotFound)
    }

    /// Replace the profile picture. Same rollback discipline as entity
    /// images: the file is written first and discarded if the row
    /// update fails; the previous picture is removed only on success.
    pub async fn upload_image(
        &self,
        user_id: Uuid,
        upload: ImageUpload,
    ) -> Result<users::Model, ProfileError> {
        let existing = self.get(user_id).await?;
        let previous = existing.profile_image_path;

        let policy = UploadPolicy::profile_image();
        let stored = self.images.store(&policy, &upload).await?;

        let changes = users::ActiveModel {
            profile_image_path: Set(Some(stored.public_path.clone())),
            updated_at: Set(Some(Utc::now().fixed_offset())),
            ..Default::default()
        };

        let result: Result<Vec<users::Model>, _> = users::Entity::update_many()
            .set(changes)
            .filter(users::Column::Id.eq(user_id))
            .exec_with_returning(self.db.as_ref())
            .await;

        match result {
            Ok(updated) => match updated.into_iter().next() {
                Some(model) => {
                    if let Some(old) = previous {
                        self.images.remove(&old).await;
                    }
                    Ok(model)
                }
                None => {
                    self.images.discard(&stored).await;
                    Err(ProfileError::NotFound)
                }
            },
            Err(err) => {
                self.images.discard(&stored).await;
                Err(ProfileError::Database(err.to_string()))
            }
        }
    }
}

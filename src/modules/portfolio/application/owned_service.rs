use chrono::Utc;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::media::application::image_store::{ImageStore, ImageUpload};
use crate::media::domain::upload_policy::{UploadError, UploadPolicy};
use crate::portfolio::adapter::outgoing::owned_repository_postgres::{
    OwnedRepository, OwnedRepositoryError,
};
use crate::portfolio::domain::owned::{OwnedEntity, OwnedImageEntity};
use crate::portfolio::domain::validate::{ValidateInput, ValidationErrors};

#[derive(Debug, thiserror::Error)]
pub enum OwnedResourceError {
    #[error("Resource not found")]
    NotFound,

    #[error("{0}")]
    Validation(ValidationErrors),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<OwnedRepositoryError> for OwnedResourceError {
    fn from(err: OwnedRepositoryError) -> Self {
        match err {
            OwnedRepositoryError::DatabaseError(msg) => Self::Database(msg),
        }
    }
}

/// Owner-scoped CRUD over a single kind of portfolio entry.
pub struct OwnedResourceService<E: OwnedEntity>
where
    E::Model:
        serde::Serialize + sea_orm::IntoActiveModel<<E as OwnedEntity>::ActiveModel> + Send + Sync,
{
    repo: OwnedRepository<E>,
    images: ImageStore,
}

impl<E: OwnedEntity> Clone for OwnedResourceService<E>
where
    E::Model:
        serde::Serialize + sea_orm::IntoActiveModel<<E as OwnedEntity>::ActiveModel> + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            images: self.images.clone(),
        }
    }
}

impl<E: OwnedEntity> OwnedResourceService<E>
where
    E::Model:
        serde::Serialize + sea_orm::IntoActiveModel<<E as OwnedEntity>::ActiveModel> + Send + Sync,
{
    pub fn new(repo: OwnedRepository<E>, images: ImageStore) -> Self {
        Self { repo, images }
    }

    pub async fn list(&self, owner: UserId) -> Result<Vec<E::Model>, OwnedResourceError> {
        Ok(self.repo.list(owner).await?)
    }

    pub async fn create(
        &self,
        owner: UserId,
        input: E::Input,
    ) -> Result<E::Model, OwnedResourceError> {
        input.validate().map_err(OwnedResourceError::Validation)?;

        let model = E::insert_model(owner.value(), Utc::now(), input);
        Ok(self.repo.insert(model).await?)
    }

    pub async fn edit(
        &self,
        owner: UserId,
        id: Uuid,
        input: E::Input,
    ) -> Result<E::Model, OwnedResourceError> {
        // Ownership first: a foreign row must 404 before any validation
        // feedback leaks.
        self.repo
            .find_owned(owner, id)
            .await?
            .ok_or(OwnedResourceError::NotFound)?;

        input.validate().map_err(OwnedResourceError::Validation)?;

        self.repo
            .update_owned(owner, id, E::update_model(input))
            .await?
            .ok_or(OwnedResourceError::NotFound)
    }

    /// Deleting a row that does not exist (or is not yours) is a no-op.
    pub async fn delete(&self, owner: UserId, id: Uuid) -> Result<(), OwnedResourceError> {
        let Some(existing) = self.repo.find_owned(owner, id).await? else {
            return Ok(());
        };

        if let Some(path) = E::image_path(&existing) {
            self.images.remove(path).await;
        }

        self.repo.delete_owned(owner, id).await?;
        Ok(())
    }

    pub async fn count(&self, owner: UserId) -> Result<u64, OwnedResourceError> {
        Ok(self.repo.count(owner).await?)
    }
}

impl<E: OwnedImageEntity> OwnedResourceService<E>
where
    E::Model:
        serde::Serialize + sea_orm::IntoActiveModel<<E as OwnedEntity>::ActiveModel> + Send + Sync,
{
    /// Replace the image attached to `(id, owner)`.
    ///
    /// The new file is written before the database row is touched; if
    /// the update fails the file is discarded, and only after a
    /// successful update is the previous image removed.
    pub async fn upload_image(
        &self,
        owner: UserId,
        id: Uuid,
        upload: ImageUpload,
    ) -> Result<E::Model, OwnedResourceError> {
        let existing = self
            .repo
            .find_owned(owner, id)
            .await?
            .ok_or(OwnedResourceError::NotFound)?;
        let previous = E::image_path(&existing).map(str::to_string);

        let policy = UploadPolicy::entity_image(E::IMAGE_FOLDER);
        let stored = self.images.store(&policy, &upload).await?;

        match self
            .repo
            .update_owned(owner, id, E::image_model(Some(stored.public_path.clone())))
            .await
        {
            Ok(Some(model)) => {
                if let Some(old) = previous {
                    self.images.remove(&old).await;
                }
                Ok(model)
            }
            Ok(None) => {
                self.images.discard(&stored).await;
                Err(OwnedResourceError::NotFound)
            }
            Err(OwnedRepositoryError::DatabaseError(msg)) => {
                self.images.discard(&stored).await;
                Err(OwnedResourceError::Database(msg))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};
    use std::sync::Arc;
    use tempfile::tempdir;
    use tokio::fs;

    use crate::portfolio::adapter::outgoing::sea_orm_entity::certificates::{
        self, CertificateInput,
    };
    use crate::portfolio::adapter::outgoing::sea_orm_entity::skills::{self, SkillInput};

    fn skill_service(db: sea_orm::DatabaseConnection, root: &std::path::Path) -> OwnedResourceService<skills::Entity> {
        OwnedResourceService::new(
            OwnedRepository::new(Arc::new(db)),
            ImageStore::new(root),
        )
    }

    fn certificate_service(
        db: sea_orm::DatabaseConnection,
        root: &std::path::Path,
    ) -> OwnedResourceService<certificates::Entity> {
        OwnedResourceService::new(
            OwnedRepository::new(Arc::new(db)),
            ImageStore::new(root),
        )
    }

    fn skill_model(id: Uuid, user_id: Uuid, name: &str) -> skills::Model {
        skills::Model {
            id,
            user_id,
            name: name.to_string(),
            proficiency: 3,
            category: None,
            display_order: 0,
            created_at: Utc::now().fixed_offset(),
        }
    }

    fn certificate_model(
        id: Uuid,
        user_id: Uuid,
        image_path: Option<&str>,
    ) -> certificates::Model {
        certificates::Model {
            id,
            user_id,
            name: "Cert".to_string(),
            issuing_organization: "Org".to_string(),
            credential_id: None,
            credential_url: None,
            issue_date: None,
            expiration_date: None,
            does_not_expire: false,
            description: None,
            image_path: image_path.map(str::to_string),
            display_order: 0,
            created_at: Utc::now().fixed_offset(),
        }
    }

    fn valid_skill_input() -> SkillInput {
        SkillInput {
            name: "Rust".to_string(),
            proficiency: 4,
            category: None,
            display_order: 0,
        }
    }

    fn invalid_skill_input() -> SkillInput {
        SkillInput {
            name: String::new(),
            proficiency: 50,
            category: Some("x".repeat(51)),
            display_order: 0,
        }
    }

    fn upload(name: &str, size: usize) -> ImageUpload {
        ImageUpload {
            file_name: name.to_string(),
            bytes: vec![1; size],
        }
    }

    #[tokio::test]
    async fn create_rejects_invalid_input_before_touching_the_db() {
        let dir = tempdir().unwrap();
        // No mock results appended: any query would fail the test
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = skill_service(db, dir.path());

        let result = service
            .create(UserId::from(Uuid::new_v4()), invalid_skill_input())
            .await;

        match result {
            Err(OwnedResourceError::Validation(errors)) => {
                assert!(errors.get("name").is_some());
                assert!(errors.get("category").is_some());
            }
            _ => panic!("Expected Validation error"),
        }
    }

    #[tokio::test]
    async fn create_persists_valid_input() {
        let dir = tempdir().unwrap();
        let owner = Uuid::new_v4();
        let created = skill_model(Uuid::new_v4(), owner, "Rust");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![created.clone()]])
            .into_connection();
        let service = skill_service(db, dir.path());

        let result = service
            .create(UserId::from(owner), valid_skill_input())
            .await
            .unwrap();

        assert_eq!(result.name, "Rust");
    }

    #[tokio::test]
    async fn edit_returns_not_found_for_foreign_row() {
        let dir = tempdir().unwrap();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<skills::Model>::new()])
            .into_connection();
        let service = skill_service(db, dir.path());

        let result = service
            .edit(
                UserId::from(Uuid::new_v4()),
                Uuid::new_v4(),
                valid_skill_input(),
            )
            .await;

        assert!(matches!(result, Err(OwnedResourceError::NotFound)));
    }

    #[tokio::test]
    async fn edit_checks_ownership_before_validation() {
        let dir = tempdir().unwrap();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<skills::Model>::new()])
            .into_connection();
        let service = skill_service(db, dir.path());

        // Invalid payload against a foreign row must still 404
        let result = service
            .edit(
                UserId::from(Uuid::new_v4()),
                Uuid::new_v4(),
                invalid_skill_input(),
            )
            .await;

        assert!(matches!(result, Err(OwnedResourceError::NotFound)));
    }

    #[tokio::test]
    async fn edit_applies_update_to_owned_row() {
        let dir = tempdir().unwrap();
        let owner = Uuid::new_v4();
        let skill_id = Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![skill_model(skill_id, owner, "Rust")]])
            .append_query_results(vec![vec![skill_model(skill_id, owner, "Rust 2024")]])
            .into_connection();
        let service = skill_service(db, dir.path());

        let mut input = valid_skill_input();
        input.name = "Rust 2024".to_string();

        let result = service
            .edit(UserId::from(owner), skill_id, input)
            .await
            .unwrap();

        assert_eq!(result.name, "Rust 2024");
    }

    #[tokio::test]
    async fn edit_rejects_invalid_input_on_owned_row() {
        let dir = tempdir().unwrap();
        let owner = Uuid::new_v4();
        let skill_id = Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![skill_model(skill_id, owner, "Rust")]])
            .into_connection();
        let service = skill_service(db, dir.path());

        let result = service
            .edit(UserId::from(owner), skill_id, invalid_skill_input())
            .await;

        assert!(matches!(result, Err(OwnedResourceError::Validation(_))));
    }

    #[tokio::test]
    async fn delete_is_a_no_op_for_missing_rows() {
        let dir = tempdir().unwrap();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<skills::Model>::new()])
            .into_connection();
        let service = skill_service(db, dir.path());

        let result = service
            .delete(UserId::from(Uuid::new_v4()), Uuid::new_v4())
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn delete_removes_row_and_attached_image() {
        let dir = tempdir().unwrap();
        let owner = Uuid::new_v4();
        let cert_id = Uuid::new_v4();

        // Stage an image file the way the store lays it out
        let store = ImageStore::new(dir.path());
        let stored = store
            .store(
                &UploadPolicy::entity_image("certificates"),
                &upload("cert.png", 16),
            )
            .await
            .unwrap();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![certificate_model(
                cert_id,
                owner,
                Some(&stored.public_path),
            )]])
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let service = certificate_service(db, dir.path());

        service
            .delete(UserId::from(owner), cert_id)
            .await
            .unwrap();

        assert!(!stored.absolute_path.exists());
    }

    #[tokio::test]
    async fn upload_image_rejects_bad_files_without_writing() {
        let dir = tempdir().unwrap();
        let owner = Uuid::new_v4();
        let cert_id = Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![certificate_model(cert_id, owner, None)]])
            .into_connection();
        let service = certificate_service(db, dir.path());

        let result = service
            .upload_image(UserId::from(owner), cert_id, upload("notes.txt", 16))
            .await;

        assert!(matches!(
            result,
            Err(OwnedResourceError::Upload(UploadError::UnsupportedFormat { .. }))
        ));
        assert!(!dir.path().join("uploads").join("certificates").exists());
    }

    #[tokio::test]
    async fn upload_image_returns_not_found_for_foreign_row() {
        let dir = tempdir().unwrap();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<certificates::Model>::new()])
            .into_connection();
        let service = certificate_service(db, dir.path());

        let result = service
            .upload_image(
                UserId::from(Uuid::new_v4()),
                Uuid::new_v4(),
                upload("cert.png", 16),
            )
            .await;

        assert!(matches!(result, Err(OwnedResourceError::NotFound)));
    }

    #[tokio::test]
    async fn upload_image_replaces_row_and_removes_old_file() {
        let dir = tempdir().unwrap();
        let owner = Uuid::new_v4();
        let cert_id = Uuid::new_v4();

        let store = ImageStore::new(dir.path());
        let old = store
            .store(
                &UploadPolicy::entity_image("certificates"),
                &upload("old.png", 8),
            )
            .await
            .unwrap();

        let updated = certificate_model(cert_id, owner, Some("/uploads/certificates/new.png"));

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![certificate_model(
                cert_id,
                owner,
                Some(&old.public_path),
            )]])
            .append_query_results(vec![vec![updated]])
            .into_connection();
        let service = certificate_service(db, dir.path());

        let result = service
            .upload_image(UserId::from(owner), cert_id, upload("new.png", 8))
            .await
            .unwrap();

        assert_eq!(
            result.image_path.as_deref(),
            Some("/uploads/certificates/new.png")
        );
        assert!(!old.absolute_path.exists(), "old image should be removed");
    }

    #[tokio::test]
    async fn upload_image_rolls_back_file_on_db_failure() {
        let dir = tempdir().unwrap();
        let owner = Uuid::new_v4();
        let cert_id = Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![certificate_model(cert_id, owner, None)]])
            .append_query_errors(vec![DbErr::Custom("write failed".to_string())])
            .into_connection();
        let service = certificate_service(db, dir.path());

        let result = service
            .upload_image(UserId::from(owner), cert_id, upload("cert.png", 8))
            .await;

        assert!(matches!(result, Err(OwnedResourceError::Database(_))));

        // Nothing may be left behind under the upload root
        let folder = dir.path().join("uploads").join("certificates");
        if folder.exists() {
            let mut entries = fs::read_dir(&folder).await.unwrap();
            assert!(entries.next_entry().await.unwrap().is_none());
        }
    }
}

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use thiserror::Error;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::contact::adapter::outgoing::sea_orm_entity::contacts;
use crate::portfolio::domain::owned::normalize_optional;
use crate::portfolio::domain::validate::{ValidateInput, ValidationErrors};

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("contact message not found")]
    NotFound,

    #[error("{0}")]
    Validation(ValidationErrors),

    #[error("database error: {0}")]
    Database(String),
}

/// Inbox of visitor messages. Submission is anonymous, everything else is
/// scoped to the owning user.
#[derive(Clone)]
pub struct ContactService {
    db: Arc<DatabaseConnection>,
}

impl ContactService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn submit(
        &self,
        recipient: UserId,
        input: contacts::ContactInput,
    ) -> Result<contacts::Model, ContactError> {
        input.validate().map_err(ContactError::Validation)?;

        let message = contacts::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(recipient.value()),
            name: Set(input.name.trim().to_string()),
            email: Set(input.email.trim().to_string()),
            subject: Set(normalize_optional(input.subject)),
            message: Set(input.message.trim().to_string()),
            is_read: Set(false),
            created_at: Set(Utc::now().fixed_offset()),
            read_at: Set(None),
        };

        message
            .insert(self.db.as_ref())
            .await
            .map_err(|err| ContactError::Database(err.to_string()))
    }

    /// Newest first, unread and read alike.
    pub async fn list(&self, owner: UserId) -> Result<Vec<contacts::Model>, ContactError> {
        contacts::Entity::find()
            .filter(contacts::Column::UserId.eq(owner.value()))
            .order_by_desc(contacts::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|err| ContactError::Database(err.to_string()))
    }

    /// Marking an already-read message leaves its `read_at` untouched.
    pub async fn mark_read(
        &self,
        owner: UserId,
        id: Uuid,
    ) -> Result<contacts::Model, ContactError> {
        let existing = contacts::Entity::find()
            .filter(contacts::Column::Id.eq(id))
            .filter(contacts::Column::UserId.eq(owner.value()))
            .one(self.db.as_ref())
            .await
            .map_err(|err| ContactError::Database(err.to_string()))?
            .ok_or(ContactError::NotFound)?;

        if existing.is_read {
            return Ok(existing);
        }

        let changes = contacts::ActiveModel {
            is_read: Set(true),
            read_at: Set(Some(Utc::now().fixed_offset())),
            ..Default::default()
        };

        let updated: Vec<contacts::Model> = contacts::Entity::update_many()
            .set(changes)
            .filter(contacts::Column::Id.eq(id))
            .filter(contacts::Column::UserId.eq(owner.value()))
            .exec_with_returning(self.db.as_ref())
            .await
            .map_err(|err| ContactError::Database(err.to_string()))?;

        updated.into_iter().next().ok_or(ContactError::NotFound)
    }

    /// Deleting a message that does not exist (or belongs to someone else)
    /// succeeds silently.
    pub async fn delete(&self, owner: UserId, id: Uuid) -> Result<(), ContactError> {
        contacts::Entity::delete_many()
            .filter(contacts::Column::Id.eq(id))
            .filter(contacts::Column::UserId.eq(owner.value()))
            .exec(self.db.as_ref())
            .await
            .map_err(|err| ContactError::Database(err.to_string()))?;

        Ok(())
    }

    pub async fn unread_count(&self, owner: UserId) -> Result<u64, ContactError> {
        contacts::Entity::find()
            .filter(contacts::Column::UserId.eq(owner.value()))
            .filter(contacts::Column::IsRead.eq(false))
            .count(self.db.as_ref())
            .await
            .map_err(|err| ContactError::Database(err.to_string()))
    }
}

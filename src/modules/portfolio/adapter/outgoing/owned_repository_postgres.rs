use std::marker::PhantomData;
use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::portfolio::domain::owned::OwnedEntity;

#[derive(Debug, Clone, thiserror::Error)]
pub enum OwnedRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Owner-scoped persistence for any [`OwnedEntity`].
///
/// Every query is filtered by the owner column, so a row belonging to
/// another user is indistinguishable from a row that does not exist.
pub struct OwnedRepository<E: OwnedEntity>
where
    E::Model:
        serde::Serialize + sea_orm::IntoActiveModel<<E as OwnedEntity>::ActiveModel> + Send + Sync,
{
    db: Arc<DatabaseConnection>,
    entity: PhantomData<E>,
}

impl<E: OwnedEntity> Clone for OwnedRepository<E>
where
    E::Model:
        serde::Serialize + sea_orm::IntoActiveModel<<E as OwnedEntity>::ActiveModel> + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
            entity: PhantomData,
        }
    }
}

impl<E: OwnedEntity> OwnedRepository<E>
where
    E::Model: serde::Serialize + sea_orm::IntoActiveModel<<E as OwnedEntity>::ActiveModel> + Send + Sync,
{
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            db,
            entity: PhantomData,
        }
    }

    pub async fn list(&self, owner: UserId) -> Result<Vec<E::Model>, OwnedRepositoryError> {
        E::find()
            .filter(E::owner_column().eq(owner.value()))
            .order_by_asc(E::order_column())
            .all(&*self.db)
            .await
            .map_err(map_db_err)
    }

    pub async fn find_owned(
        &self,
        owner: UserId,
        id: Uuid,
    ) -> Result<Option<E::Model>, OwnedRepositoryError> {
        E::find()
            .filter(E::id_column().eq(id))
            .filter(E::owner_column().eq(owner.value()))
            .one(&*self.db)
            .await
            .map_err(map_db_err)
    }

    pub async fn insert(
        &self,
        model: <E as OwnedEntity>::ActiveModel,
    ) -> Result<E::Model, OwnedRepositoryError> {
        model.insert(&*self.db).await.map_err(map_db_err)
    }

    /// Apply a partial active model to the row `(id, owner)`.
    /// Returns `None` when no such row exists for this owner.
    pub async fn update_owned(
        &self,
        owner: UserId,
        id: Uuid,
        model: <E as OwnedEntity>::ActiveModel,
    ) -> Result<Option<E::Model>, OwnedRepositoryError> {
        let updated = E::update_many()
            .set(model)
            .filter(E::id_column().eq(id))
            .filter(E::owner_column().eq(owner.value()))
            .exec_with_returning(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(updated.into_iter().next())
    }

    /// Returns whether a row was actually deleted.
    pub async fn delete_owned(
        &self,
        owner: UserId,
        id: Uuid,
    ) -> Result<bool, OwnedRepositoryError> {
        let result = E::delete_many()
            .filter(E::id_column().eq(id))
            .filter(E::owner_column().eq(owner.value()))
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self, owner: UserId) -> Result<u64, OwnedRepositoryError> {
        E::find()
            .filter(E::owner_column().eq(owner.value()))
            .count(&*self.db)
            .await
            .map_err(map_db_err)
    }
}

fn map_db_err(e: DbErr) -> OwnedRepositoryError {
    OwnedRepositoryError::DatabaseError(e.to_string())
}

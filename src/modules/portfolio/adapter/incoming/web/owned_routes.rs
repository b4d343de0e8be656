use std::collections::BTreeMap;

use actix_web::HttpResponse;
use serde::Deserialize;
use tracing::error;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::media::application::image_store::ImageUpload;
use crate::media::domain::upload_policy::UploadError;
use crate::portfolio::application::owned_service::{OwnedResourceError, OwnedResourceService};
use crate::portfolio::domain::owned::{OwnedEntity, OwnedImageEntity};
use crate::shared::api::ApiResponse;

/// `?filename=` companion of the raw-body image upload endpoints.
#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    pub filename: String,
}

pub async fn list_owned<E: OwnedEntity>(
    service: &OwnedResourceService<E>,
    owner: Uuid,
) -> HttpResponse
where
    E::Model:
        serde::Serialize + sea_orm::IntoActiveModel<<E as OwnedEntity>::ActiveModel> + Send + Sync,
{
    match service.list(UserId::from(owner)).await {
        Ok(items) => ApiResponse::success(items),
        Err(err) => failure::<E>(err),
    }
}

pub async fn create_owned<E: OwnedEntity>(
    service: &OwnedResourceService<E>,
    owner: Uuid,
    input: E::Input,
) -> HttpResponse
where
    E::Model:
        serde::Serialize + sea_orm::IntoActiveModel<<E as OwnedEntity>::ActiveModel> + Send + Sync,
{
    match service.create(UserId::from(owner), input).await {
        Ok(created) => ApiResponse::created(created),
        Err(err) => failure::<E>(err),
    }
}

pub async fn edit_owned<E: OwnedEntity>(
    service: &OwnedResourceService<E>,
    owner: Uuid,
    id: Uuid,
    input: E::Input,
) -> HttpResponse
where
    E::Model:
        serde::Serialize + sea_orm::IntoActiveModel<<E as OwnedEntity>::ActiveModel> + Send + Sync,
{
    match service.edit(UserId::from(owner), id, input).await {
        Ok(updated) => ApiResponse::success(updated),
        Err(err) => failure::<E>(err),
    }
}

pub async fn delete_owned<E: OwnedEntity>(
    service: &OwnedResourceService<E>,
    owner: Uuid,
    id: Uuid,
) -> HttpResponse
where
    E::Model:
        serde::Serialize + sea_orm::IntoActiveModel<<E as OwnedEntity>::ActiveModel> + Send + Sync,
{
    match service.delete(UserId::from(owner), id).await {
        Ok(()) => ApiResponse::no_content(),
        Err(err) => failure::<E>(err),
    }
}

pub async fn upload_owned_image<E: OwnedImageEntity>(
    service: &OwnedResourceService<E>,
    owner: Uuid,
    id: Uuid,
    upload: ImageUpload,
) -> HttpResponse
where
    E::Model:
        serde::Serialize + sea_orm::IntoActiveModel<<E as OwnedEntity>::ActiveModel> + Send + Sync,
{
    match service.upload_image(UserId::from(owner), id, upload).await {
        Ok(updated) => ApiResponse::success(updated),
        Err(err) => failure::<E>(err),
    }
}

pub fn failure<E: OwnedEntity>(err: OwnedResourceError) -> HttpResponse
where
    E::Model:
        serde::Serialize + sea_orm::IntoActiveModel<<E as OwnedEntity>::ActiveModel> + Send + Sync,
{
    match err {
        OwnedResourceError::NotFound => ApiResponse::not_found(
            "NOT_FOUND",
            &format!("{} not found", E::RESOURCE),
        ),
        OwnedResourceError::Validation(errors) => {
            ApiResponse::validation_error(errors.into_fields())
        }
        OwnedResourceError::Upload(UploadError::Storage(msg)) => {
            error!("Storage error on {} image upload: {}", E::RESOURCE, msg);
            ApiResponse::internal_error()
        }
        OwnedResourceError::Upload(err) => {
            let mut fields = BTreeMap::new();
            fields.insert("image".to_string(), err.to_string());
            ApiResponse::validation_error(fields)
        }
        OwnedResourceError::Database(msg) => {
            error!("Repository error on {}: {}", E::RESOURCE, msg);
            ApiResponse::internal_error()
        }
    }
}

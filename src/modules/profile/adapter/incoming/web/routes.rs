use actix_web::{get, put, web, HttpResponse, Responder};
use std::collections::BTreeMap;
use tracing::error;

use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::media::application::image_store::ImageUpload;
use crate::media::domain::upload_policy::UploadError;
use crate::portfolio::adapter::incoming::web::owned_routes::UploadQuery;
use crate::profile::application::profile_service::{ProfileError, ProfileInput};
use crate::shared::api::ApiResponse;
use crate::AppState;

fn profile_failure(err: ProfileError) -> HttpResponse {
    match err {
        ProfileError::NotFound => ApiResponse::not_found("NOT_FOUND", "Profile not found"),
        ProfileError::Validation(errors) => ApiResponse::validation_error(errors.into_fields()),
        ProfileError::Upload(UploadError::Storage(msg)) => {
            error!("Storage error on profile image upload: {}", msg);
            ApiResponse::internal_error()
        }
        ProfileError::Upload(err) => {
            let mut fields = BTreeMap::new();
            fields.insert("image".to_string(), err.to_string());
            ApiResponse::validation_error(fields)
        }
        ProfileError::Database(msg) => {
            error!("Repository error on profile: {}", msg);
            ApiResponse::internal_error()
        }
    }
}

#[get("/api/profile")]
pub async fn get_profile_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.profile.get(user.user_id).await {
        Ok(profile) => ApiResponse::success(profile),
        Err(err) => profile_failure(err),
    }
}

#[put("/api/profile")]
pub async fn update_profile_handler(
    user: AuthenticatedUser,
    req: web::Json<ProfileInput>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.profile.update(user.user_id, req.into_inner()).await {
        Ok(profile) => ApiResponse::success(profile),
        Err(err) => profile_failure(err),
    }
}

#[put("/api/profile/image")]
pub async fn upload_profile_image_handler(
    user: AuthenticatedUser,
    query: web::Query<UploadQuery>,
    body: web::Bytes,
    data: web::Data<AppState>,
) -> impl Responder {
    let upload = ImageUpload {
        file_name: query.into_inner().filename,
        bytes: body.to_vec(),
    };
    match data.profile.upload_image(user.user_id, upload).await {
        Ok(profile) => ApiResponse::success(profile),
        Err(err) => profile_failure(err),
    }
}

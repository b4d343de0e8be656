use actix_web::{delete, get, post, web, HttpResponse, Responder};
use std::collections::BTreeMap;
use tracing::error;
use uuid::Uuid;

use crate::auth::adapter::incoming::web::extractors::auth::{
    resolve_owner_id_or_response, AuthenticatedUser,
};
use crate::auth::application::domain::entities::UserId;
use crate::contact::adapter::outgoing::sea_orm_entity::contacts::ContactInput;
use crate::contact::application::contact_service::ContactError;
use crate::shared::api::ApiResponse;
use crate::AppState;

fn contact_failure(err: ContactError) -> HttpResponse {
    match err {
        ContactError::NotFound => {
            ApiResponse::not_found("NOT_FOUND", "Contact message not found")
        }
        ContactError::Validation(errors) => ApiResponse::validation_error(errors.into_fields()),
        ContactError::Database(msg) => {
            error!("Repository error on contact message: {}", msg);
            ApiResponse::internal_error()
        }
    }
}

#[post("/api/public/contact/{username}")]
pub async fn submit_contact_handler(
    path: web::Path<String>,
    req: web::Json<ContactInput>,
    data: web::Data<AppState>,
) -> impl Responder {
    let owner_id = match resolve_owner_id_or_response(&data, &path.into_inner()).await {
        Ok(id) => id,
        Err(response) => return response,
    };

    match data.contacts.submit(UserId::from(owner_id), req.into_inner()).await {
        Ok(message) => ApiResponse::created(message),
        Err(err) => contact_failure(err),
    }
}

#[get("/api/contact")]
pub async fn get_contact_messages_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.contacts.list(UserId::from(user.user_id)).await {
        Ok(messages) => ApiResponse::success(messages),
        Err(err) => contact_failure(err),
    }
}

#[post("/api/contact/{id}/read")]
pub async fn mark_contact_read_handler(
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .contacts
        .mark_read(UserId::from(user.user_id), path.into_inner())
        .await
    {
        Ok(message) => ApiResponse::success(message),
        Err(err) => contact_failure(err),
    }
}

#[delete("/api/contact/{id}")]
pub async fn delete_contact_handler(
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .contacts
        .delete(UserId::from(user.user_id), path.into_inner())
        .await
    {
        Ok(()) => ApiResponse::no_content(),
        Err(err) => contact_failure(err),
    }
}

#[get("/api/contact/unread-count")]
pub async fn get_unread_count_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.contacts.unread_count(UserId::from(user.user_id)).await {
        Ok(count) => ApiResponse::success(BTreeMap::from([("unread", count)])),
        Err(err) => contact_failure(err),
    }
}

use actix_web::{delete, get, post, put, web, Responder};
use uuid::Uuid;

use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::portfolio::adapter::incoming::web::owned_routes;
use crate::portfolio::adapter::outgoing::sea_orm_entity::experiences::ExperienceInput;
use crate::AppState;

#[get("/api/experiences")]
pub async fn get_experiences_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    owned_routes::list_owned(&data.experiences, user.user_id).await
}

#[post("/api/experiences")]
pub async fn create_experience_handler(
    user: AuthenticatedUser,
    req: web::Json<ExperienceInput>,
    data: web::Data<AppState>,
) -> impl Responder {
    owned_routes::create_owned(&data.experiences, user.user_id, req.into_inner()).await
}

#[put("/api/experiences/{id}")]
pub async fn update_experience_handler(
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    req: web::Json<ExperienceInput>,
    data: web::Data<AppState>,
) -> impl Responder {
    owned_routes::edit_owned(&data.experiences, user.user_id, path.into_inner(), req.into_inner())
        .await
}

#[delete("/api/experiences/{id}")]
pub async fn delete_experience_handler(
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    owned_routes::delete_owned(&data.experiences, user.user_id, path.into_inner()).await
}

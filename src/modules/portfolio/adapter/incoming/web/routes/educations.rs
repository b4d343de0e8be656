use actix_web::{delete, get, post, put, web, Responder};
use uuid::Uuid;

use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::portfolio::adapter::incoming::web::owned_routes;
use crate::portfolio::adapter::outgoing::sea_orm_entity::educations::EducationInput;
use crate::AppState;

#[get("/api/educations")]
pub async fn get_educations_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    owned_routes::list_owned(&data.educations, user.user_id).await
}

#[post("/api/educations")]
pub async fn create_education_handler(
    user: AuthenticatedUser,
    req: web::Json<EducationInput>,
    data: web::Data<AppState>,
) -> impl Responder {
    owned_routes::create_owned(&data.educations, user.user_id, req.into_inner()).await
}

#[put("/api/educations/{id}")]
pub async fn update_education_handler(
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    req: web::Json<EducationInput>,
    data: web::Data<AppState>,
) -> impl Responder {
    owned_routes::edit_owned(&data.educations, user.user_id, path.into_inner(), req.into_inner())
        .await
}

#[delete("/api/educations/{id}")]
pub async fn delete_education_handler(
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    owned_routes::delete_owned(&data.educations, user.user_id, path.into_inner()).await
}

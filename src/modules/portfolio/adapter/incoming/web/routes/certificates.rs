use actix_web::{delete, get, post, put, web, Responder};
use uuid::Uuid;

use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::media::application::image_store::ImageUpload;
use crate::portfolio::adapter::incoming::web::owned_routes::{self, UploadQuery};
use crate::portfolio::adapter::outgoing::sea_orm_entity::certificates::CertificateInput;
use crate::AppState;

#[get("/api/certificates")]
pub async fn get_certificates_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    owned_routes::list_owned(&data.certificates, user.user_id).await
}

#[post("/api/certificates")]
pub async fn create_certificate_handler(
    user: AuthenticatedUser,
    req: web::Json<CertificateInput>,
    data: web::Data<AppState>,
) -> impl Responder {
    owned_routes::create_owned(&data.certificates, user.user_id, req.into_inner()).await
}

#[put("/api/certificates/{id}")]
pub async fn update_certificate_handler(
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    req: web::Json<CertificateInput>,
    data: web::Data<AppState>,
) -> impl Responder {
    owned_routes::edit_owned(
        &data.certificates,
        user.user_id,
        path.into_inner(),
        req.into_inner(),
    )
    .await
}

#[delete("/api/certificates/{id}")]
pub async fn delete_certificate_handler(
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    owned_routes::delete_owned(&data.certificates, user.user_id, path.into_inner()).await
}

#[put("/api/certificates/{id}/image")]
pub async fn upload_certificate_image_handler(
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    query: web::Query<UploadQuery>,
    body: web::Bytes,
    data: web::Data<AppState>,
) -> impl Responder {
    let upload = ImageUpload {
        file_name: query.into_inner().filename,
        bytes: body.to_vec(),
    };
    owned_routes::upload_owned_image(&data.certificates, user.user_id, path.into_inner(), upload)
        .await
}

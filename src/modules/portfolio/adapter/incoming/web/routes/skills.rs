use actix_web::{delete, get, post, put, web, Responder};
use uuid::Uuid;

use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::portfolio::adapter::incoming::web::owned_routes;
use crate::portfolio::adapter::outgoing::sea_orm_entity::skills::SkillInput;
use crate::AppState;

#[get("/api/skills")]
pub async fn get_skills_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    owned_routes::list_owned(&data.skills, user.user_id).await
}

#[post("/api/skills")]
pub async fn create_skill_handler(
    user: AuthenticatedUser,
    req: web::Json<SkillInput>,
    data: web::Data<AppState>,
) -> impl Responder {
    owned_routes::create_owned(&data.skills, user.user_id, req.into_inner()).await
}

#[put("/api/skills/{id}")]
pub async fn update_skill_handler(
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    req: web::Json<SkillInput>,
    data: web::Data<AppState>,
) -> impl Responder {
    owned_routes::edit_owned(&data.skills, user.user_id, path.into_inner(), req.into_inner()).await
}

#[delete("/api/skills/{id}")]
pub async fn delete_skill_handler(
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    owned_routes::delete_owned(&data.skills, user.user_id, path.into_inner()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use serde_json::{json, Value};
    use uuid::Uuid;

    use crate::portfolio::adapter::outgoing::sea_orm_entity::skills;
    use crate::tests::support::{bearer, test_token_provider, TestAppStateBuilder};

    fn skill_model(id: Uuid, user_id: Uuid, name: &str, order: i32) -> skills::Model {
        skills::Model {
            id,
            user_id,
            name: name.to_string(),
            proficiency: 4,
            category: Some("Backend".to_string()),
            display_order: order,
            created_at: Utc::now().fixed_offset(),
        }
    }

    #[actix_web::test]
    async fn test_get_skills_returns_owned_rows() {
        let user_id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![
                skill_model(Uuid::new_v4(), user_id, "Rust", 0),
                skill_model(Uuid::new_v4(), user_id, "SQL", 1),
            ]])
            .into_connection();

        let state = TestAppStateBuilder::new().with_db(db).build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(web::Data::new(test_token_provider()))
                .service(get_skills_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/skills")
            .insert_header(("Authorization", bearer(user_id)))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
        assert_eq!(body["data"][0]["name"], "Rust");
    }

    #[actix_web::test]
    async fn test_get_skills_requires_auth() {
        let state = TestAppStateBuilder::new().build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(web::Data::new(test_token_provider()))
                .service(get_skills_handler),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/skills").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_create_skill_success() {
        let user_id = Uuid::new_v4();
        let created = skill_model(Uuid::new_v4(), user_id, "Rust", 0);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![created]])
            .into_connection();

        let state = TestAppStateBuilder::new().with_db(db).build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(web::Data::new(test_token_provider()))
                .service(create_skill_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/skills")
            .insert_header(("Authorization", bearer(user_id)))
            .set_json(json!({ "name": "Rust", "proficiency": 4 }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["name"], "Rust");
    }

    #[actix_web::test]
    async fn test_create_skill_validation_error_lists_fields() {
        let user_id = Uuid::new_v4();
        let state = TestAppStateBuilder::new().build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(web::Data::new(test_token_provider()))
                .service(create_skill_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/skills")
            .insert_header(("Authorization", bearer(user_id)))
            .set_json(json!({ "name": "", "proficiency": 50 }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["fields"]["name"].is_string());
    }

    #[actix_web::test]
    async fn test_update_skill_not_found_for_foreign_row() {
        let user_id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<skills::Model>::new()])
            .into_connection();

        let state = TestAppStateBuilder::new().with_db(db).build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(web::Data::new(test_token_provider()))
                .service(update_skill_handler),
        )
        .await;

        let req = test::TestRequest::put()
            .uri(&format!("/api/skills/{}", Uuid::new_v4()))
            .insert_header(("Authorization", bearer(user_id)))
            .set_json(json!({ "name": "Rust", "proficiency": 4 }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(body["error"]["message"], "Skill not found");
    }

    #[actix_web::test]
    async fn test_update_skill_success() {
        let user_id = Uuid::new_v4();
        let skill_id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![skill_model(skill_id, user_id, "Rust", 0)]])
            .append_query_results(vec![vec![skill_model(skill_id, user_id, "Rust 2024", 3)]])
            .into_connection();

        let state = TestAppStateBuilder::new().with_db(db).build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(web::Data::new(test_token_provider()))
                .service(update_skill_handler),
        )
        .await;

        let req = test::TestRequest::put()
            .uri(&format!("/api/skills/{}", skill_id))
            .insert_header(("Authorization", bearer(user_id)))
            .set_json(json!({ "name": "Rust 2024", "proficiency": 5, "display_order": 3 }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["name"], "Rust 2024");
        assert_eq!(body["data"]["display_order"], 3);
    }

    #[actix_web::test]
    async fn test_delete_skill_returns_no_content() {
        let user_id = Uuid::new_v4();
        let skill_id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![skill_model(skill_id, user_id, "Rust", 0)]])
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let state = TestAppStateBuilder::new().with_db(db).build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(web::Data::new(test_token_provider()))
                .service(delete_skill_handler),
        )
        .await;

        let req = test::TestRequest::delete()
            .uri(&format!("/api/skills/{}", skill_id))
            .insert_header(("Authorization", bearer(user_id)))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn test_delete_missing_skill_is_silent() {
        let user_id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<skills::Model>::new()])
            .into_connection();

        let state = TestAppStateBuilder::new().with_db(db).build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(web::Data::new(test_token_provider()))
                .service(delete_skill_handler),
        )
        .await;

        let req = test::TestRequest::delete()
            .uri(&format!("/api/skills/{}", Uuid::new_v4()))
            .insert_header(("Authorization", bearer(user_id)))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }
}

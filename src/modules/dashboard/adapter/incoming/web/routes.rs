use actix_web::{get, web, Responder};
use serde::Serialize;
use tracing::error;

use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::auth::application::domain::entities::UserId;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub skills: u64,
    pub projects: u64,
    pub educations: u64,
    pub experiences: u64,
    pub certificates: u64,
    pub unread_messages: u64,
}

#[get("/api/dashboard")]
pub async fn get_dashboard_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    let owner = UserId::from(user.user_id);

    let counts = async {
        Ok::<DashboardSummary, String>(DashboardSummary {
            skills: data.skills.count(owner).await.map_err(|e| e.to_string())?,
            projects: data
                .projects
                .count(owner)
                .await
                .map_err(|e| e.to_string())?,
            educations: data
                .educations
                .count(owner)
                .await
                .map_err(|e| e.to_string())?,
            experiences: data
                .experiences
                .count(owner)
                .await
                .map_err(|e| e.to_string())?,
            certificates: data
                .certificates
                .count(owner)
                .await
                .map_err(|e| e.to_string())?,
            unread_messages: data
                .contacts
                .unread_count(owner)
                .await
                .map_err(|e| e.to_string())?,
        })
    }
    .await;

    match counts {
        Ok(summary) => ApiResponse::success(summary),
        Err(msg) => {
            error!("Failed to assemble dashboard summary: {}", msg);
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::Value;
    use std::collections::BTreeMap;
    use uuid::Uuid;

    use crate::tests::support::{bearer, test_token_provider, TestAppStateBuilder};

    fn count_row(n: i64) -> Vec<BTreeMap<&'static str, sea_orm::Value>> {
        vec![BTreeMap::from([(
            "num_items",
            sea_orm::Value::BigInt(Some(n)),
        )])]
    }

    #[actix_web::test]
    async fn test_dashboard_aggregates_counts() {
        let user_id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![count_row(4)])
            .append_query_results(vec![count_row(2)])
            .append_query_results(vec![count_row(1)])
            .append_query_results(vec![count_row(3)])
            .append_query_results(vec![count_row(0)])
            .append_query_results(vec![count_row(7)])
            .into_connection();

        let state = TestAppStateBuilder::new().with_db(db).build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(web::Data::new(test_token_provider()))
                .service(get_dashboard_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/dashboard")
            .insert_header(("Authorization", bearer(user_id)))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["skills"], 4);
        assert_eq!(body["data"]["projects"], 2);
        assert_eq!(body["data"]["educations"], 1);
        assert_eq!(body["data"]["experiences"], 3);
        assert_eq!(body["data"]["certificates"], 0);
        assert_eq!(body["data"]["unread_messages"], 7);
    }

    #[actix_web::test]
    async fn test_dashboard_requires_auth() {
        let state = TestAppStateBuilder::new().build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(web::Data::new(test_token_provider()))
                .service(get_dashboard_handler),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/dashboard").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}

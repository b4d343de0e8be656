use actix_web::{get, web, Responder};
use tracing::error;

use crate::portfolio::application::portfolio_query::PortfolioQueryError;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Public portfolio page payload, no authentication required.
#[get("/api/public/portfolio/{username}")]
pub async fn get_public_portfolio_handler(
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> impl Responder {
    let username = path.into_inner();
    match data.portfolio.get_portfolio(&username).await {
        Ok(view) => ApiResponse::success(view),
        Err(PortfolioQueryError::NotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(PortfolioQueryError::DatabaseError(msg)) => {
            error!("Failed to assemble portfolio for '{}': {}", username, msg);
            ApiResponse::internal_error()
        }
    }
}

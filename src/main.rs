pub mod modules;
pub use modules::auth;
pub use modules::contact;
pub use modules::dashboard;
pub use modules::media;
pub use modules::portfolio;
pub use modules::profile;
pub mod health;
pub mod shared;

use crate::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::auth::adapter::outgoing::user_query_postgres::UserQueryPostgres;
use crate::auth::application::helpers::UserIdentityResolver;
use crate::auth::application::ports::outgoing::token_provider::TokenProvider;
use crate::contact::application::contact_service::ContactService;
use crate::media::application::image_store::ImageStore;
use crate::portfolio::adapter::outgoing::owned_repository_postgres::OwnedRepository;
use crate::portfolio::adapter::outgoing::sea_orm_entity::{
    certificates, educations, experiences, projects, skills,
};
use crate::portfolio::application::owned_service::OwnedResourceService;
use crate::portfolio::application::portfolio_query::PortfolioQuery;
use crate::profile::application::profile_service::ProfileService;
use crate::shared::api::custom_json_config;

use actix_web::{web, App, HttpServer};
use sea_orm::{ConnectOptions, Database};
use std::env;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(test)]
mod tests;

// Uploads are capped per policy (10MB entity, 5MB profile); the payload
// limit only has to clear the larger of the two.
const MAX_UPLOAD_PAYLOAD_BYTES: usize = 12 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub skills: OwnedResourceService<skills::Entity>,
    pub projects: OwnedResourceService<projects::Entity>,
    pub educations: OwnedResourceService<educations::Entity>,
    pub experiences: OwnedResourceService<experiences::Entity>,
    pub certificates: OwnedResourceService<certificates::Entity>,
    pub contacts: ContactService,
    pub profile: ProfileService,
    pub portfolio: PortfolioQuery,
    pub user_identity_resolver: UserIdentityResolver,
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting application...");

    // Environtment variable loading
    let env = std::env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());

    // Try .env.{environment} first, then fall back to .env
    let env_file = format!(".env.{}", env);
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }

    // Load Env. variables
    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL is not set in .env file");
    let host = env::var("HOST").expect("HOST is not set in .env file");
    let port = env::var("PORT").expect("PORT is not set in .env file");
    let upload_root = env::var("UPLOAD_ROOT").unwrap_or_else(|_| "public".to_string());

    let server_url = format!("{host}:{port}");
    println!("Server run on: {}", server_url);

    // Database connection
    let mut opt = ConnectOptions::new(db_url);
    opt.max_connections(50)
        .min_connections(10)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let conn = Database::connect(opt)
        .await
        .expect("Failed to connect to database");

    let db_arc = Arc::new(conn);

    let images = ImageStore::new(upload_root);

    let jwt_service = JwtTokenService::new(JwtConfig::from_env());
    let user_query = UserQueryPostgres::new(Arc::clone(&db_arc));

    let state = AppState {
        skills: OwnedResourceService::new(
            OwnedRepository::new(Arc::clone(&db_arc)),
            images.clone(),
        ),
        projects: OwnedResourceService::new(
            OwnedRepository::new(Arc::clone(&db_arc)),
            images.clone(),
        ),
        educations: OwnedResourceService::new(
            OwnedRepository::new(Arc::clone(&db_arc)),
            images.clone(),
        ),
        experiences: OwnedResourceService::new(
            OwnedRepository::new(Arc::clone(&db_arc)),
            images.clone(),
        ),
        certificates: OwnedResourceService::new(
            OwnedRepository::new(Arc::clone(&db_arc)),
            images.clone(),
        ),
        contacts: ContactService::new(Arc::clone(&db_arc)),
        profile: ProfileService::new(Arc::clone(&db_arc), images),
        portfolio: PortfolioQuery::new(Arc::clone(&db_arc)),
        user_identity_resolver: UserIdentityResolver::new(Arc::new(user_query)),
    };

    let token_provider_arc: Arc<dyn TokenProvider + Send + Sync> = Arc::new(jwt_service);
    // Clone db_arc for use in HttpServer closure
    let db_for_server = Arc::clone(&db_arc);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&token_provider_arc)))
            .app_data(web::Data::new(Arc::clone(&db_for_server)))
            .app_data(custom_json_config())
            .app_data(web::PayloadConfig::new(MAX_UPLOAD_PAYLOAD_BYTES))
            .configure(init_routes)
    })
    .bind(server_url)?
    .run()
    .await
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Public portfolio
    cfg.service(crate::portfolio::adapter::incoming::web::routes::portfolio::get_public_portfolio_handler);
    // Skills
    cfg.service(crate::portfolio::adapter::incoming::web::routes::skills::get_skills_handler);
    cfg.service(crate::portfolio::adapter::incoming::web::routes::skills::create_skill_handler);
    cfg.service(crate::portfolio::adapter::incoming::web::routes::skills::update_skill_handler);
    cfg.service(crate::portfolio::adapter::incoming::web::routes::skills::delete_skill_handler);
    // Projects
    cfg.service(crate::portfolio::adapter::incoming::web::routes::projects::get_projects_handler);
    cfg.service(crate::portfolio::adapter::incoming::web::routes::projects::create_project_handler);
    cfg.service(crate::portfolio::adapter::incoming::web::routes::projects::update_project_handler);
    cfg.service(crate::portfolio::adapter::incoming::web::routes::projects::delete_project_handler);
    cfg.service(
        crate::portfolio::adapter::incoming::web::routes::projects::upload_project_image_handler,
    );
    // Educations
    cfg.service(
        crate::portfolio::adapter::incoming::web::routes::educations::get_educations_handler,
    );
    cfg.service(
        crate::portfolio::adapter::incoming::web::routes::educations::create_education_handler,
    );
    cfg.service(
        crate::portfolio::adapter::incoming::web::routes::educations::update_education_handler,
    );
    cfg.service(
        crate::portfolio::adapter::incoming::web::routes::educations::delete_education_handler,
    );
    // Experiences
    cfg.service(
        crate::portfolio::adapter::incoming::web::routes::experiences::get_experiences_handler,
    );
    cfg.service(
        crate::portfolio::adapter::incoming::web::routes::experiences::create_experience_handler,
    );
    cfg.service(
        crate::portfolio::adapter::incoming::web::routes::experiences::update_experience_handler,
    );
    cfg.service(
        crate::portfolio::adapter::incoming::web::routes::experiences::delete_experience_handler,
    );
    // Certificates
    cfg.service(
        crate::portfolio::adapter::incoming::web::routes::certificates::get_certificates_handler,
    );
    cfg.service(
        crate::portfolio::adapter::incoming::web::routes::certificates::create_certificate_handler,
    );
    cfg.service(
        crate::portfolio::adapter::incoming::web::routes::certificates::update_certificate_handler,
    );
    cfg.service(
        crate::portfolio::adapter::incoming::web::routes::certificates::delete_certificate_handler,
    );
    cfg.service(
        crate::portfolio::adapter::incoming::web::routes::certificates::upload_certificate_image_handler,
    );
    // Contact
    cfg.service(crate::contact::adapter::incoming::web::routes::submit_contact_handler);
    cfg.service(crate::contact::adapter::incoming::web::routes::get_contact_messages_handler);
    cfg.service(crate::contact::adapter::incoming::web::routes::get_unread_count_handler);
    cfg.service(crate::contact::adapter::incoming::web::routes::mark_contact_read_handler);
    cfg.service(crate::contact::adapter::incoming::web::routes::delete_contact_handler);
    // Profile
    cfg.service(crate::profile::adapter::incoming::web::routes::get_profile_handler);
    cfg.service(crate::profile::adapter::incoming::web::routes::update_profile_handler);
    cfg.service(crate::profile::adapter::incoming::web::routes::upload_profile_image_handler);
    // Dashboard
    cfg.service(crate::dashboard::adapter::incoming::web::routes::get_dashboard_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e}");
    }
}

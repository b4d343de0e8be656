use std::path::{Path, PathBuf};
use std::sync::Arc;

use actix_web::web;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
use uuid::Uuid;

use crate::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::auth::application::helpers::UserIdentityResolver;
use crate::auth::application::ports::outgoing::token_provider::{TokenClaims, TokenProvider};
use crate::auth::application::ports::outgoing::user_query::{
    UserQuery, UserQueryError, UserQueryResult,
};
use crate::contact::application::contact_service::ContactService;
use crate::media::application::image_store::ImageStore;
use crate::portfolio::adapter::outgoing::owned_repository_postgres::OwnedRepository;
use crate::portfolio::application::owned_service::OwnedResourceService;
use crate::portfolio::application::portfolio_query::PortfolioQuery;
use crate::profile::application::profile_service::ProfileService;
use crate::AppState;

pub const TEST_JWT_SECRET: &str = "test_secret_key_for_testing_purposes_only";

pub fn test_token_provider() -> Arc<dyn TokenProvider + Send + Sync> {
    Arc::new(JwtTokenService::new(JwtConfig {
        secret_key: TEST_JWT_SECRET.to_string(),
        issuer: "test_issuer".to_string(),
    }))
}

/// `Authorization` header value carrying a fresh access token for `user_id`.
pub fn bearer(user_id: Uuid) -> String {
    let now = Utc::now();
    let claims = TokenClaims {
        sub: user_id,
        exp: (now + Duration::seconds(3600)).timestamp(),
        iat: now.timestamp(),
        nbf: now.timestamp(),
        token_type: "access".to_string(),
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("token should encode");

    format!("Bearer {token}")
}

/// Canned `UserQuery` for username resolution in handler tests.
#[derive(Clone)]
pub struct StubUserQuery {
    result: Result<Option<UserQueryResult>, UserQueryError>,
}

impl StubUserQuery {
    pub fn found(id: Uuid, username: &str) -> Self {
        Self {
            result: Ok(Some(UserQueryResult {
                id,
                username: username.to_string(),
                email: format!("{username}@example.com"),
            })),
        }
    }

    pub fn not_found() -> Self {
        Self { result: Ok(None) }
    }

    pub fn error() -> Self {
        Self {
            result: Err(UserQueryError::DatabaseError(
                "stubbed failure".to_string(),
            )),
        }
    }
}

#[async_trait]
impl UserQuery for StubUserQuery {
    async fn find_by_id(&self, _user_id: Uuid) -> Result<Option<UserQueryResult>, UserQueryError> {
        self.result.clone()
    }

    async fn find_by_username(
        &self,
        _username: &str,
    ) -> Result<Option<UserQueryResult>, UserQueryError> {
        self.result.clone()
    }
}

pub struct TestAppStateBuilder {
    db: Option<DatabaseConnection>,
    user_query: StubUserQuery,
    upload_root: PathBuf,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            db: None,
            user_query: StubUserQuery::not_found(),
            upload_root: std::env::temp_dir(),
        }
    }
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_db(mut self, db: DatabaseConnection) -> Self {
        self.db = Some(db);
        self
    }

    pub fn with_user_query(mut self, user_query: StubUserQuery) -> Self {
        self.user_query = user_query;
        self
    }

    pub fn with_upload_root(mut self, root: &Path) -> Self {
        self.upload_root = root.to_path_buf();
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        let db = Arc::new(
            self.db
                .unwrap_or_else(|| MockDatabase::new(DatabaseBackend::Postgres).into_connection()),
        );
        let images = ImageStore::new(self.upload_root);

        web::Data::new(AppState {
            skills: OwnedResourceService::new(
                OwnedRepository::new(Arc::clone(&db)),
                images.clone(),
            ),
            projects: OwnedResourceService::new(
                OwnedRepository::new(Arc::clone(&db)),
                images.clone(),
            ),
            educations: OwnedResourceService::new(
                OwnedRepository::new(Arc::clone(&db)),
                images.clone(),
            ),
            experiences: OwnedResourceService::new(
                OwnedRepository::new(Arc::clone(&db)),
                images.clone(),
            ),
            certificates: OwnedResourceService::new(
                OwnedRepository::new(Arc::clone(&db)),
                images.clone(),
            ),
            contacts: ContactService::new(Arc::clone(&db)),
            profile: ProfileService::new(Arc::clone(&db), images),
            portfolio: PortfolioQuery::new(Arc::clone(&db)),
            user_identity_resolver: UserIdentityResolver::new(Arc::new(self.user_query)),
        })
    }
}

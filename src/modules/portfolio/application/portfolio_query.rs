use std::sync::Arc;

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::Serialize;

use crate::auth::adapter::outgoing::sea_orm_entity::users;
use crate::auth::application::domain::entities::UserId;
use crate::portfolio::adapter::outgoing::owned_repository_postgres::{
    OwnedRepository, OwnedRepositoryError,
};
use crate::portfolio::adapter::outgoing::sea_orm_entity::{
    certificates, educations, experiences, projects, skills,
};

#[derive(Debug, Clone, thiserror::Error)]
pub enum PortfolioQueryError {
    #[error("User not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<OwnedRepositoryError> for PortfolioQueryError {
    fn from(err: OwnedRepositoryError) -> Self {
        match err {
            OwnedRepositoryError::DatabaseError(msg) => Self::DatabaseError(msg),
        }
    }
}

/// Profile fields safe to expose to anonymous visitors. No email.
#[derive(Debug, Clone, Serialize)]
pub struct PublicProfile {
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub job_title: Option<String>,
    pub profile_image_path: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub twitter_url: Option<String>,
    pub website_url: Option<String>,
    pub location: Option<String>,
}

impl From<users::Model> for PublicProfile {
    fn from(user: users::Model) -> Self {
        Self {
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            bio: user.bio,
            job_title: user.job_title,
            profile_image_path: user.profile_image_path,
            linkedin_url: user.linkedin_url,
            github_url: user.github_url,
            twitter_url: user.twitter_url,
            website_url: user.website_url,
            location: user.location,
        }
    }
}

/// The full public portfolio of one user, every section ordered by
/// its display_order.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioView {
    pub profile: PublicProfile,
    pub skills: Vec<skills::Model>,
    pub projects: Vec<projects::Model>,
    pub educations: Vec<educations::Model>,
    pub experiences: Vec<experiences::Model>,
    pub certificates: Vec<certificates::Model>,
}

#[derive(Clone)]
pub struct PortfolioQuery {
    db: Arc<DatabaseConnection>,
}

impl PortfolioQuery {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn get_portfolio(&self, username: &str) -> Result<PortfolioView, PortfolioQueryError> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&*self.db)
            .await
            .map_err(|e| PortfolioQueryError::DatabaseError(e.to_string()))?
            .ok_or(PortfolioQueryError::NotFound)?;

        let owner = UserId::from(user.id);

        let skills = OwnedRepository::<skills::Entity>::new(Arc::clone(&self.db))
            .list(owner)
            .await?;
        let projects = OwnedRepository::<projects::Entity>::new(Arc::clone(&self.db))
            .list(owner)
            .await?;
        let educations = OwnedRepository::<educations::Entity>::new(Arc::clone(&self.db))
            .list(owner)
            .await?;
        let experiences = OwnedRepository::<experiences::Entity>::new(Arc::clone(&self.db))
            .list(owner)
            .await?;
        let certificates = OwnedRepository::<certificates::Entity>::new(Arc::clone(&self.db))
            .list(owner)
            .await?;

        Ok(PortfolioView {
            profile: PublicProfile::from(user),
            skills,
            projects,
            educations,
            experiences,
            certificates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use uuid::Uuid;

    fn user_model(id: Uuid, username: &str) -> users::Model {
        users::Model {
            id,
            username: username.to_string(),
            email: "owner@example.com".to_string(),
            first_name: Some("Jo".to_string()),
            last_name: None,
            bio: None,
            job_title: Some("Engineer".to_string()),
            profile_image_path: None,
            linkedin_url: None,
            github_url: None,
            twitter_url: None,
            website_url: None,
            location: None,
            created_at: Utc::now().fixed_offset(),
            updated_at: None,
        }
    }

    fn skill_model(user_id: Uuid, name: &str, order: i32) -> skills::Model {
        skills::Model {
            id: Uuid::new_v4(),
            user_id,
            name: name.to_string(),
            proficiency: 3,
            category: None,
            display_order: order,
            created_at: Utc::now().fixed_offset(),
        }
    }

    #[tokio::test]
    async fn returns_not_found_for_unknown_username() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<users::Model>::new()])
            .into_connection();

        let query = PortfolioQuery::new(Arc::new(db));
        let result = query.get_portfolio("ghost").await;

        assert!(matches!(result, Err(PortfolioQueryError::NotFound)));
    }

    #[tokio::test]
    async fn assembles_all_sections_for_known_user() {
        let owner = Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user_model(owner, "jo")]])
            .append_query_results(vec![vec![
                skill_model(owner, "Rust", 0),
                skill_model(owner, "SQL", 1),
            ]])
            .append_query_results(vec![Vec::<projects::Model>::new()])
            .append_query_results(vec![Vec::<educations::Model>::new()])
            .append_query_results(vec![Vec::<experiences::Model>::new()])
            .append_query_results(vec![Vec::<certificates::Model>::new()])
            .into_connection();

        let query = PortfolioQuery::new(Arc::new(db));
        let view = query.get_portfolio("jo").await.unwrap();

        assert_eq!(view.profile.username, "jo");
        assert_eq!(view.skills.len(), 2);
        assert!(view.projects.is_empty());
        assert!(view.certificates.is_empty());
    }

    #[test]
    fn public_profile_omits_email() {
        let user = user_model(Uuid::new_v4(), "jo");
        let profile = PublicProfile::from(user);

        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("email").is_none());
        assert_eq!(json["username"], "jo");
    }
}

pub mod auth;
pub mod contact;
pub mod dashboard;
pub mod media;
pub mod portfolio;
pub mod profile;

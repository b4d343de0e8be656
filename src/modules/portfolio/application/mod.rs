pub mod owned_service;
pub mod portfolio_query;

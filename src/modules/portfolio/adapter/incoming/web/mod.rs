pub mod owned_routes;
pub mod routes;

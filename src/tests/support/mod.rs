pub mod app_state_builder;

pub use app_state_builder::{
    bearer, test_token_provider, StubUserQuery, TestAppStateBuilder, TEST_JWT_SECRET,
};

pub mod auth_context;
pub mod session_teardown;

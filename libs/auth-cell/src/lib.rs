pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod views;

pub use models::LoginForm;
pub use router::{auth_routes, LOGOUT_PATH};
pub use services::{login_error_message, LoginService};

pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod views;

pub use models::*;
pub use router::admin_routes;
pub use services::*;

pub mod auth;
pub mod error;
pub mod obra_social;
pub mod routes;

pub use auth::Session;
pub use error::AppError;
pub use obra_social::ObraSocial;
pub use routes::Route;

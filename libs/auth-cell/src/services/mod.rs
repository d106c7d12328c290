pub mod login;

pub use login::{login_error_message, LoginService, LOGIN_FALLBACK};

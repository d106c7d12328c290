use serde::{Deserialize, Serialize};

use shared_models::auth::LoginRequest;
use shared_models::error::AppError;

/// Staff login form. The password is never echoed back into the page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub usuario: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    pub fn to_request(&self) -> Result<LoginRequest, AppError> {
        let usuario = self.usuario.trim();
        if usuario.is_empty() || self.password.is_empty() {
            return Err(AppError::Validation(
                "Ingrese usuario y contraseña".to_string(),
            ));
        }

        Ok(LoginRequest {
            usuario: usuario.to_string(),
            password: self.password.clone(),
        })
    }
}

/// What the login page shows.
#[derive(Debug, Serialize)]
pub struct LoginPage<'a> {
    pub title: &'static str,
    pub usuario: &'a str,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn blank_fields_are_rejected() {
        let form = LoginForm {
            usuario: "   ".to_string(),
            password: "secreto".to_string(),
        };
        assert_matches!(form.to_request(), Err(AppError::Validation(_)));

        let form = LoginForm {
            usuario: "ana".to_string(),
            password: String::new(),
        };
        assert_matches!(form.to_request(), Err(AppError::Validation(_)));
    }

    #[test]
    fn usuario_is_trimmed_but_password_is_not() {
        let form = LoginForm {
            usuario: " ana ".to_string(),
            password: " clave ".to_string(),
        };

        let request = form.to_request().unwrap();
        assert_eq!(request.usuario, "ana");
        assert_eq!(request.password, " clave ");
    }
}

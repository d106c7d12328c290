use std::sync::LazyLock;

use axum::response::Html;
use handlebars::Handlebars;

use shared_models::error::AppError;
use shared_utils::html;

use crate::models::LoginPage;

const LOGIN_TEMPLATE: &str = "inicio_sesion";

const LOGIN: &str = r#"{{#> layout}}
<main>
  <a href="/">Volver al inicio</a>
  <h1>Área Médica</h1>
  <p>Ingrese sus credenciales para acceder al panel administrativo</p>
  <form method="post" action="/inicio-sesion-area-medica">
    <label>Usuario <input type="text" name="usuario" value="{{usuario}}" autocomplete="username" required></label>
    <label>Contraseña <input type="password" name="password" autocomplete="current-password" required></label>
    {{#if error}}<p class="error" role="alert">{{error}}</p>{{/if}}
    <button type="submit">Iniciar Sesión</button>
  </form>
</main>
{{/layout}}"#;

static TEMPLATES: LazyLock<Handlebars<'static>> = LazyLock::new(|| {
    let mut registry = html::registry();
    registry
        .register_template_string(LOGIN_TEMPLATE, LOGIN)
        .expect("Failed to register login template");
    registry
});

pub fn render_login(usuario: &str, error: Option<String>) -> Result<Html<String>, AppError> {
    let page = LoginPage {
        title: "Inicio de Sesión",
        usuario,
        error,
    };
    html::render(&TEMPLATES, LOGIN_TEMPLATE, &page)
}

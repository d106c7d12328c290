//! Page rendering shared by the cells. Each cell registers its own
//! templates; this module only owns the common layout and the plumbing
//! from a Handlebars registry to an axum response.

use axum::response::Html;
use handlebars::Handlebars;
use serde::Serialize;
use tracing::error;

use shared_models::error::AppError;

pub const LAYOUT_TEMPLATE: &str = "layout";

const LAYOUT: &str = r#"<!doctype html>
<html lang="es">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{title}} · Dra. Ana Martínez</title>
</head>
<body>
{{> @partial-block }}
</body>
</html>
"#;

/// Registry in strict mode with the shared layout partial registered.
pub fn registry<'a>() -> Handlebars<'a> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    registry
        .register_partial(LAYOUT_TEMPLATE, LAYOUT)
        .expect("Failed to register layout");
    registry
}

pub fn render<T>(registry: &Handlebars<'_>, template: &str, data: &T) -> Result<Html<String>, AppError>
where
    T: Serialize,
{
    registry
        .render(template, data)
        .map(Html)
        .map_err(|e| {
            error!("Could not render {}: {}", template, e);
            AppError::Internal(format!("template {} failed to render", template))
        })
}

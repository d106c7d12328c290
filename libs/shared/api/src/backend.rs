use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    Client, Method, Response,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, warn};

use shared_config::AppConfig;
use shared_models::auth::Session;
use shared_models::error::AppError;

/// HTTP client for the practice's REST backend.
///
/// Every request carries the configured timeout, so an absent backend turns
/// into `AppError::Timeout`/`AppError::Network` instead of a hung page.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &AppConfig) -> Self {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("Could not build HTTP client with timeout ({}), using defaults", e);
                Client::new()
            });

        Self {
            client,
            base_url: config.backend_url.clone(),
        }
    }

    fn get_headers(&self, session: Option<&Session>) -> HeaderMap {
        let mut headers = HeaderMap::new();

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(session) = session {
            match HeaderValue::from_str(&session.bearer()) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => warn!("Session token is not a valid header value, sending unauthenticated"),
            }
        }

        headers
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        session: Option<&Session>,
        body: Option<Value>,
    ) -> Result<Response, AppError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making {} request to {}", method, url);

        let mut req = self
            .client
            .request(method, &url)
            .headers(self.get_headers(session));

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await.map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("API error ({}): {}", status, error_text);

            return Err(AppError::Rejected {
                status: status.as_u16(),
                message: backend_message(&error_text),
            });
        }

        Ok(response)
    }

    /// Sends a request and decodes the JSON body of a successful response.
    pub async fn request<T>(
        &self,
        method: Method,
        path: &str,
        session: Option<&Session>,
        body: Option<Value>,
    ) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        let response = self.send(method, path, session, body).await?;
        let text = response.text().await.map_err(transport_error)?;

        serde_json::from_str::<T>(&text).map_err(|e| {
            error!("Could not decode response from {}: {}", path, e);
            AppError::Decode(e.to_string())
        })
    }

    /// Sends a request whose successful response body is irrelevant
    /// (deletes, state changes answered with 204).
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        session: Option<&Session>,
        body: Option<Value>,
    ) -> Result<(), AppError> {
        self.send(method, path, session, body).await?;
        Ok(())
    }
}

fn transport_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Timeout(err.to_string())
    } else {
        AppError::Network(err.to_string())
    }
}

/// Pulls the human-readable message out of an error body shaped like
/// `{"message": "..."}` (or `{"error": "..."}`).
fn backend_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .or_else(|| value.get("error"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use yansi::Paint;

use crate::config::Settings;
use crate::utils::{build_query_string, QueryParams};
use super::error::ApiError;

static SILENT: AtomicBool = AtomicBool::new(false);

pub fn set_silent(silent: bool) {
    SILENT.store(silent, Ordering::Relaxed);
}

fn log_output(msg: String) {
    if !SILENT.load(Ordering::Relaxed) {
        println!("{}", msg);
    }
}

/// Envelope every backend endpoint wraps its payload in.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub body: T,
    #[serde(default)]
    pub message: Option<String>,
}

/// Thin wrapper over `reqwest::Client` bound to one backend.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    pub fn new(settings: &Settings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(format!("wsctl/{}", env!("CARGO_PKG_VERSION")))
            .timeout(settings.request_timeout)
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;
        Ok(Self {
            client,
            base_url: settings.api_base_url.clone(),
            token: settings.api_token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: QueryParams,
    ) -> Result<ApiResponse<T>, ApiError> {
        self.send(Method::GET, endpoint, params, None).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<ApiResponse<T>, ApiError> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.send(Method::POST, endpoint, Vec::new(), Some(body)).await
    }

    /// Core request path: builds, logs and sends the request, then maps
    /// non-success statuses to the backend's own error message.
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        params: QueryParams,
        body: Option<Value>,
    ) -> Result<ApiResponse<T>, ApiError> {
        let url = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));
        self.log_request(&method, &url, &params, body.as_ref());

        let mut req = self.client.request(method.clone(), &url);
        if !self.token.is_empty() {
            req = req.bearer_auth(&self.token);
        }
        let params: Vec<(&str, String)> = params
            .into_iter()
            .filter(|(_, v)| !v.trim().is_empty())
            .collect();
        if !params.is_empty() {
            req = req.query(&params);
        }
        if let Some(ref b) = body {
            req = req.json(b);
        }

        let resp = req.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        let status = resp.status();
        let text = resp.text().await.map_err(|e| ApiError::Network(e.to_string()))?;

        // Grayed out so request lines stand out
        log_output(format!("Response:\n{}", Paint::new(&text).rgb(100, 100, 100)));
        tracing::debug!(%method, %url, status = status.as_u16(), "backend responded");

        if !status.is_success() {
            let message = extract_error_message(&text).unwrap_or_else(|| format!("HTTP {}", status));
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }
        serde_json::from_str::<ApiResponse<T>>(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn log_request(&self, method: &Method, url: &str, params: &QueryParams, body: Option<&Value>) {
        let query = build_query_string(params);
        let url_for_log = if query.is_empty() {
            url.to_string()
        } else {
            format!("{}?{}", url, query)
        };

        let mut parts = Vec::new();
        parts.push(Paint::new("curl").fg(yansi::Color::Green).bold().to_string());
        parts.push(format!("-X {}", Paint::new(method.as_str()).fg(yansi::Color::Yellow).bold()));
        parts.push(format!("'{}'", Paint::new(&url_for_log).fg(yansi::Color::Cyan)));
        if !self.token.is_empty() {
            parts.push(format!(
                "{} {}",
                Paint::new("-H").fg(yansi::Color::Magenta),
                Paint::new("'Authorization: Bearer ***'").fg(yansi::Color::Magenta)
            ));
        }
        if let Some(d) = body {
            let json_str = serde_json::to_string_pretty(d).unwrap_or_default();
            let escaped_json = json_str.replace('\'', "'\\''");
            parts.push(format!(
                "{} {}",
                Paint::new("-H").fg(yansi::Color::Magenta),
                Paint::new("'Content-Type: application/json'").fg(yansi::Color::Magenta)
            ));
            parts.push(format!(
                "{} {}",
                Paint::new("-d").fg(yansi::Color::Blue),
                Paint::new(format!("'{}'", escaped_json)).fg(yansi::Color::White)
            ));
        }
        log_output(format!("Request:\n{}", parts.join(" ")));
    }
}

/// Pull a human readable message out of an error body. The backend uses
/// `error` (string or `{message}`) and sometimes a bare `message`.
pub fn extract_error_message(text: &str) -> Option<String> {
    let value: Value = serde_json::from_str(text).ok()?;
    let from_error = match value.get("error") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Object(obj)) => obj.get("message").and_then(|m| m.as_str()).map(str::to_string),
        _ => None,
    };
    from_error
        .or_else(|| value.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .filter(|s| !s.trim().is_empty())
}

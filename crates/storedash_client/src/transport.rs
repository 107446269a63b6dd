use std::time::Duration;

use reqwest::Method;
use serde_json::Value;
use thiserror::Error;

/// Connection settings for the provisioning service.
///
/// The base URL is resolved once by the host (a CLI flag, a config file)
/// and injected here; nothing in the client inspects ambient environment
/// state.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl TransportConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
    /// The request never reached the service or never came back; timeouts
    /// land here as `request timed out`.
    #[error("{0}")]
    Network(String),
    /// The service rejected the request. `detail` is the service-reported
    /// reason when one exists, else `HTTP <status>`, so the display is
    /// always fit for a status line.
    #[error("{detail}")]
    Http { status: u16, detail: String },
}

/// HTTP access to the provisioning service: one client, JSON in, JSON out.
#[derive(Debug, Clone)]
pub struct Transport {
    client: reqwest::Client,
    base_url: String,
}

impl Transport {
    /// Validates the base URL and builds the underlying client once.
    pub fn new(config: TransportConfig) -> Result<Self, TransportError> {
        let parsed = reqwest::Url::parse(&config.base_url)
            .map_err(|err| TransportError::InvalidBaseUrl(err.to_string()))?;
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| TransportError::Network(err.to_string()))?;
        Ok(Self {
            client,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// Issues one request and hands back the parsed body.
    ///
    /// The body is read as text first and only then parsed: intermediaries
    /// (gateways, ingress controllers) answer with plain-text pages, and
    /// those must surface as readable detail rather than a parse error. A
    /// non-JSON success body therefore comes back as `Value::String`, an
    /// empty body as `Value::Null`.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, TransportError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let text = response.text().await.map_err(map_reqwest_error)?;

        let data = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        if !status.is_success() {
            return Err(TransportError::Http {
                status: status.as_u16(),
                detail: error_detail(status.as_u16(), &data),
            });
        }
        Ok(data)
    }
}

/// The service reports failures as `{"detail": "..."}`; anything else falls
/// back to the bare status code.
fn error_detail(status: u16, data: &Value) -> String {
    match data.get("detail").and_then(Value::as_str) {
        Some(detail) => detail.to_string(),
        None => format!("HTTP {status}"),
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::Network("request timed out".to_string());
    }
    TransportError::Network(err.to_string())
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::error_detail;

    #[test]
    fn detail_field_wins() {
        assert_eq!(error_detail(404, &json!({"detail": "not found"})), "not found");
    }

    #[test]
    fn bodies_without_a_detail_string_fall_back_to_status() {
        assert_eq!(error_detail(500, &json!("Internal Server Error")), "HTTP 500");
        assert_eq!(error_detail(502, &Value::Null), "HTTP 502");
        assert_eq!(error_detail(400, &json!({"detail": 7})), "HTTP 400");
        assert_eq!(error_detail(403, &json!({"message": "no"})), "HTTP 403");
    }
}

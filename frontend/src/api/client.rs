use reqwest::{Client, Request, StatusCode};
use serde_json::Value;
use uuid::Uuid;

use crate::{api::types::*, config};

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(base_url.into()),
        }
    }

    pub(crate) async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.client
    }

    /// Invokes a named remote method and returns its `result` payload
    /// (`Value::Null` when the method returns nothing).
    pub async fn call_method(&self, method: &str, params: Vec<Value>) -> Result<Value, ApiError> {
        let base_url = self.resolved_base_url().await;
        let call = MethodCall {
            id: Uuid::new_v4().to_string(),
            method: method.to_string(),
            params,
        };
        log::debug!("calling remote method {} ({})", call.method, call.id);

        let request = self
            .http_client()
            .post(format!("{}/methods/{}", base_url, method))
            .json(&call)
            .build()
            .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))?;

        self.execute(request).await?.into_method_result()
    }

    async fn execute(&self, request: Request) -> Result<RawResponse, ApiError> {
        #[cfg(all(test, not(target_arch = "wasm32")))]
        {
            if let Some(responder) = find_mock(request.url().as_str()) {
                let mock = responder.respond(&request)?;
                if let Some(delay) = mock.delay {
                    crate::utils::timer::sleep(delay).await;
                }
                return Ok(RawResponse {
                    status: StatusCode::from_u16(mock.status)
                        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                    body: mock.body,
                });
            }
        }

        let response = self
            .http_client()
            .execute(request)
            .await
            .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::request_failed(format!("Failed to read response: {}", e)))?;
        let body = if text.trim().is_empty() {
            None
        } else {
            Some(
                serde_json::from_str(&text)
                    .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)))?,
            )
        };
        Ok(RawResponse { status, body })
    }
}

#[derive(Debug)]
struct RawResponse {
    status: StatusCode,
    body: Option<Value>,
}

impl RawResponse {
    fn into_method_result(self) -> Result<Value, ApiError> {
        if self.status.is_success() {
            let parsed: MethodResult = match self.body {
                Some(body) => serde_json::from_value(body)
                    .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)))?,
                None => MethodResult::default(),
            };
            return Ok(parsed.result.unwrap_or(Value::Null));
        }

        let error = self
            .body
            .and_then(|body| serde_json::from_value::<ApiError>(body).ok())
            .unwrap_or_else(|| {
                ApiError::unknown(format!("Unexpected response status {}", self.status))
            });
        Err(error)
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
pub use mock_transport::{register_mock, MockResponse, TestResponder};
#[cfg(all(test, not(target_arch = "wasm32")))]
use mock_transport::find_mock;

#[cfg(all(test, not(target_arch = "wasm32")))]
mod mock_transport {
    use super::*;
    use std::sync::{Arc, Mutex, OnceLock};
    use std::time::Duration;

    pub trait TestResponder: Send + Sync {
        fn respond(&self, request: &Request) -> Result<MockResponse, ApiError>;
    }

    #[derive(Debug, Clone)]
    pub struct MockResponse {
        pub status: u16,
        pub body: Option<Value>,
        /// Held back this long before the caller sees it.
        pub delay: Option<Duration>,
    }

    impl MockResponse {
        pub fn json(status: u16, body: Value) -> Self {
            Self {
                status,
                body: Some(body),
                delay: None,
            }
        }

        pub fn empty(status: u16) -> Self {
            Self {
                status,
                body: None,
                delay: None,
            }
        }
    }

    type Registry = Mutex<Vec<(String, Arc<dyn TestResponder>)>>;

    fn registry() -> &'static Registry {
        static REGISTRY: OnceLock<Registry> = OnceLock::new();
        REGISTRY.get_or_init(|| Mutex::new(Vec::new()))
    }

    pub fn register_mock(base_url: String, responder: Arc<dyn TestResponder>) {
        let mut entries = registry().lock().expect("mock registry lock");
        entries.retain(|(existing, _)| existing != &base_url);
        entries.push((base_url, responder));
    }

    pub(super) fn find_mock(url: &str) -> Option<Arc<dyn TestResponder>> {
        let entries = registry().lock().ok()?;
        entries
            .iter()
            .filter(|(base, _)| {
                url.strip_prefix(base.as_str())
                    .map(|rest| rest.is_empty() || rest.starts_with('/'))
                    .unwrap_or(false)
            })
            .max_by_key(|(base, _)| base.len())
            .map(|(_, responder)| responder.clone())
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_without_body_yields_null_result() {
        let raw = RawResponse {
            status: StatusCode::OK,
            body: None,
        };
        assert_eq!(raw.into_method_result().unwrap(), Value::Null);
    }

    #[test]
    fn success_returns_result_field() {
        let raw = RawResponse {
            status: StatusCode::OK,
            body: Some(json!({ "id": "c1", "result": { "ok": true } })),
        };
        assert_eq!(raw.into_method_result().unwrap(), json!({ "ok": true }));
    }

    #[test]
    fn failure_with_error_body_is_returned_verbatim() {
        let raw = RawResponse {
            status: StatusCode::FORBIDDEN,
            body: Some(json!({ "error": "Token expired", "code": "TOKEN_EXPIRED" })),
        };
        let err = raw.into_method_result().unwrap_err();
        assert_eq!(err.error, "Token expired");
        assert_eq!(err.code, "TOKEN_EXPIRED");
    }

    #[test]
    fn failure_with_unexpected_body_is_unknown() {
        let raw = RawResponse {
            status: StatusCode::BAD_GATEWAY,
            body: Some(json!("<html>bad gateway</html>")),
        };
        let err = raw.into_method_result().unwrap_err();
        assert_eq!(err.code, "UNKNOWN");
        assert!(err.is_transport());
    }
}

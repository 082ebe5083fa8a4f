//! HTTP capability for the payment backend.
//!
//! The shell owns the actual client; the core describes requests and gets
//! status + body back. Non-2xx responses are still `Ok` so the caller can
//! inspect the status; only transport failures are errors.

use crux_core::capability::{CapabilityContext, Operation};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpOperation(pub HttpRequest);

impl Operation for HttpOperation {
    type Output = HttpResult;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, HttpError> {
        serde_json::from_slice(&self.body).map_err(|e| HttpError::Deserialization {
            message: e.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum HttpError {
    #[error("invalid url `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("network failure: {message}")]
    Network { message: String },
    #[error("request timed out")]
    Timeout,
    #[error("could not decode response: {message}")]
    Deserialization { message: String },
}

pub type HttpResult = Result<HttpResponse, HttpError>;

/// Accepts absolute http(s) URLs or backend-relative paths. The shell
/// prepends the configured base URL to relative paths.
fn validate_url(raw: &str) -> Result<String, HttpError> {
    if raw.starts_with('/') {
        return Ok(raw.to_string());
    }
    let parsed = Url::parse(raw).map_err(|e| HttpError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(raw.to_string()),
        other => Err(HttpError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme `{other}`"),
        }),
    }
}

pub struct Http<Ev> {
    context: CapabilityContext<HttpOperation, Ev>,
}

impl<Ev> Http<Ev>
where
    Ev: 'static,
{
    pub fn new(context: CapabilityContext<HttpOperation, Ev>) -> Self {
        Self { context }
    }

    #[must_use]
    pub fn get(&self, url: impl Into<String>) -> RequestBuilder<'_, Ev> {
        self.builder(HttpMethod::Get, url.into())
    }

    #[must_use]
    pub fn post(&self, url: impl Into<String>) -> RequestBuilder<'_, Ev> {
        self.builder(HttpMethod::Post, url.into())
    }

    fn builder(&self, method: HttpMethod, url: String) -> RequestBuilder<'_, Ev> {
        let request = validate_url(&url).map(|url| HttpRequest {
            method,
            url,
            headers: Vec::new(),
            body: None,
            timeout_ms: 30_000,
        });
        RequestBuilder {
            http: self,
            request,
        }
    }
}

impl<Ev> crux_core::capability::Capability<Ev> for Http<Ev> {
    type Operation = HttpOperation;
    type MappedSelf<MappedEv> = Http<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static,
    {
        Http::new(self.context.map_event(f))
    }
}

pub struct RequestBuilder<'a, Ev> {
    http: &'a Http<Ev>,
    request: Result<HttpRequest, HttpError>,
}

impl<Ev> RequestBuilder<'_, Ev>
where
    Ev: Send + 'static,
{
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let Ok(req) = &mut self.request {
            req.headers.push((name.into(), value.into()));
        }
        self
    }

    #[must_use]
    pub fn bearer(self, token: &str) -> Self {
        self.header("authorization", format!("Bearer {token}"))
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        if let Ok(req) = &mut self.request {
            req.timeout_ms = timeout.as_millis() as u64;
        }
        self
    }

    /// Serializes the value as the JSON body and sets the content type.
    #[must_use]
    pub fn json<T: Serialize>(mut self, value: &T) -> Self {
        self.request = self.request.and_then(|mut req| {
            let body = serde_json::to_vec(value).map_err(|e| HttpError::Deserialization {
                message: e.to_string(),
            })?;
            req.body = Some(body);
            req.headers
                .push(("content-type".into(), "application/json".into()));
            Ok(req)
        });
        self
    }

    pub fn send<F>(self, make_event: F)
    where
        F: FnOnce(HttpResult) -> Ev + Send + 'static,
    {
        let ctx = self.http.context.clone();
        match self.request {
            Ok(request) => ctx.spawn({
                let ctx = ctx.clone();
                async move {
                    let result = ctx.request_from_shell(HttpOperation(request)).await;
                    ctx.update_app(make_event(result));
                }
            }),
            // Builder-side failure: report without a shell round trip.
            Err(error) => ctx.spawn({
                let ctx = ctx.clone();
                async move {
                    ctx.update_app(make_event(Err(error)));
                }
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_pass_validation() {
        assert_eq!(validate_url("/v1/payments/confirm").unwrap(), "/v1/payments/confirm");
    }

    #[test]
    fn absolute_https_urls_pass_validation() {
        assert!(validate_url("https://api.example.com/v1/x").is_ok());
        assert!(validate_url("http://localhost:8080/health").is_ok());
    }

    #[test]
    fn bad_urls_are_rejected() {
        assert!(matches!(
            validate_url("ftp://example.com/file"),
            Err(HttpError::InvalidUrl { .. })
        ));
        assert!(matches!(
            validate_url("not a url"),
            Err(HttpError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn success_status_range() {
        let ok = HttpResponse {
            status: 204,
            body: Vec::new(),
        };
        assert!(ok.is_success());
        let err = HttpResponse {
            status: 404,
            body: Vec::new(),
        };
        assert!(!err.is_success());
    }

    #[test]
    fn json_decoding_reports_errors() {
        let resp = HttpResponse {
            status: 200,
            body: b"not json".to_vec(),
        };
        let result: Result<serde_json::Value, _> = resp.json();
        assert!(matches!(result, Err(HttpError::Deserialization { .. })));
    }
}

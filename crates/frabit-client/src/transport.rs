//! Request construction and response interpretation shared by every API.

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use url::Url;

use crate::error::{Error, Result};

/// Every resource path lives under this prefix of the base URL.
const API_PREFIX: &str = "api/v2/";

/// Shared transport state, written once by the builder.
pub(crate) struct Transport {
    /// HTTP client.
    pub(crate) http: reqwest::Client,
    /// Base URL, always ending in `/`.
    pub(crate) base_url: Url,
    /// Static headers applied to every request.
    pub(crate) headers: HeaderMap,
    /// Final user agent string.
    pub(crate) user_agent: HeaderValue,
    /// Bearer token. Stored only.
    pub(crate) token: Option<String>,
    /// Swallow 4xx/5xx responses instead of failing.
    pub(crate) legacy_error_status: bool,
}

/// A fully read response.
#[derive(Debug)]
pub(crate) struct RawResponse {
    pub(crate) status: StatusCode,
    pub(crate) body: Vec<u8>,
}

impl Transport {
    /// Resolve an API path against the base URL.
    pub(crate) fn url(&self, path: &str) -> Result<Url> {
        let path = path.trim_start_matches('/');
        self.base_url
            .join(&format!("{}{}", API_PREFIX, path))
            .map_err(Error::from)
    }

    /// Build a request for `path`.
    ///
    /// GET and HEAD never carry a body. For other methods a present `body`
    /// is encoded as JSON. Static headers are applied after the content
    /// type, and the user agent last.
    pub(crate) fn build_request<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Request>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path)?;
        let is_read = method == Method::GET || method == Method::HEAD;

        let mut builder = self.http.request(method, url);
        if !is_read {
            if let Some(body) = body {
                builder = builder
                    .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                    .body(serde_json::to_vec(body)?);
            }
        }

        let mut request = builder.build()?;
        let headers = request.headers_mut();
        for (name, value) in &self.headers {
            headers.insert(name.clone(), value.clone());
        }
        headers.insert(USER_AGENT, self.user_agent.clone());

        Ok(request)
    }

    /// Execute a request and decode the body into `T`.
    ///
    /// Returns `None` when there is nothing to decode (204, or a swallowed
    /// error status in legacy mode).
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::Request,
    ) -> Result<Option<T>> {
        let response = self.round_trip(request).await?;
        decode(&response, self.legacy_error_status)
    }

    /// Execute a request whose response body is not needed.
    pub(crate) async fn execute_discard(&self, request: reqwest::Request) -> Result<()> {
        let response = self.round_trip(request).await?;
        check_status(&response, self.legacy_error_status)?;
        Ok(())
    }

    async fn round_trip(&self, request: reqwest::Request) -> Result<RawResponse> {
        tracing::debug!(method = %request.method(), url = %request.url(), "sending request");

        let response = self.http.execute(request).await?;
        let status = response.status();
        // Consumes the response; the connection is released on every path.
        let body = response.bytes().await?.to_vec();

        tracing::debug!(status = %status, bytes = body.len(), "received response");
        Ok(RawResponse { status, body })
    }
}

/// Interpret the status line. `Ok(false)` means a swallowed error status.
fn check_status(response: &RawResponse, legacy_error_status: bool) -> Result<bool> {
    let status = response.status;
    if !(status.is_client_error() || status.is_server_error()) {
        return Ok(true);
    }

    if legacy_error_status {
        tracing::warn!(status = %status, "ignoring error status (legacy status handling)");
        return Ok(false);
    }

    Err(Error::Status {
        status: status.as_u16(),
        body: String::from_utf8_lossy(&response.body).into_owned(),
    })
}

/// Decode a response body. A JSON `null` decodes to `None`.
pub(crate) fn decode<T: DeserializeOwned>(
    response: &RawResponse,
    legacy_error_status: bool,
) -> Result<Option<T>> {
    if !check_status(response, legacy_error_status)? {
        return Ok(None);
    }
    if response.status == StatusCode::NO_CONTENT {
        return Ok(None);
    }

    match serde_json::from_slice::<Option<T>>(&response.body) {
        Ok(value) => Ok(value),
        Err(e) if matches!(e.classify(), Category::Syntax | Category::Eof) => {
            Err(Error::MalformedResponse {
                status: response.status.to_string(),
                body: String::from_utf8_lossy(&response.body).into_owned(),
                source: e,
            })
        }
        Err(e) => Err(Error::Json(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, serde::Deserialize, PartialEq)]
    #[serde(default)]
    struct Sample {
        name: String,
        count: u32,
    }

    fn transport() -> Transport {
        let mut headers = HeaderMap::new();
        headers.insert("x-team", HeaderValue::from_static("dba"));
        Transport {
            http: reqwest::Client::new(),
            base_url: Url::parse("http://localhost:9180/").unwrap(),
            headers,
            user_agent: HeaderValue::from_static("frabit-test"),
            token: None,
            legacy_error_status: false,
        }
    }

    fn raw(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_url_building() {
        let t = transport();
        assert_eq!(
            t.url("databases").unwrap().as_str(),
            "http://localhost:9180/api/v2/databases"
        );
        assert_eq!(
            t.url("/agents/heartbeat").unwrap().as_str(),
            "http://localhost:9180/api/v2/agents/heartbeat"
        );
    }

    #[test]
    fn test_read_request_has_no_body() {
        let body = serde_json::json!({"ignored": true});
        let req = transport()
            .build_request(Method::GET, "teams", Some(&body))
            .unwrap();

        assert_eq!(req.method(), Method::GET);
        assert!(req.body().is_none());
        assert!(req.headers().get(CONTENT_TYPE).is_none());
        assert_eq!(req.headers()[USER_AGENT], "frabit-test");
        assert_eq!(req.headers()["x-team"], "dba");
    }

    #[test]
    fn test_write_request_encodes_json() {
        let body = serde_json::json!({"name": "orders"});
        let req = transport()
            .build_request(Method::POST, "databases", Some(&body))
            .unwrap();

        assert_eq!(req.method(), Method::POST);
        assert_eq!(req.headers()[CONTENT_TYPE], "application/json");
        let sent: serde_json::Value =
            serde_json::from_slice(req.body().and_then(|b| b.as_bytes()).unwrap()).unwrap();
        assert_eq!(sent["name"], "orders");
    }

    #[test]
    fn test_write_request_without_body() {
        let req = transport()
            .build_request::<()>(Method::POST, "databases", None)
            .unwrap();
        assert!(req.body().is_none());
        assert!(req.headers().get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_user_agent_applied_after_static_headers() {
        let mut t = transport();
        t.headers
            .insert(USER_AGENT, HeaderValue::from_static("overridden"));
        let req = t.build_request::<()>(Method::GET, "users", None).unwrap();

        let agents: Vec<_> = req.headers().get_all(USER_AGENT).iter().collect();
        assert_eq!(agents, vec!["frabit-test"]);
    }

    #[test]
    fn test_decode_ok() {
        let out: Option<Sample> = decode(&raw(200, r#"{"name":"a","count":2}"#), false).unwrap();
        assert_eq!(
            out,
            Some(Sample {
                name: "a".to_string(),
                count: 2
            })
        );
    }

    #[test]
    fn test_decode_null_body_is_empty() {
        let out: Option<Sample> = decode(&raw(200, "null"), false).unwrap();
        assert!(out.is_none());
        let out: Option<Sample> = decode(&raw(201, " null\n"), false).unwrap();
        assert!(out.is_none());
    }

    #[test]
    fn test_decode_no_content_skips_body() {
        let out: Option<Sample> = decode(&raw(204, "not json"), false).unwrap();
        assert!(out.is_none());
    }

    #[test]
    fn test_decode_syntax_error_is_malformed() {
        let err = decode::<Sample>(&raw(200, "<html>oops</html>"), false).unwrap_err();
        assert!(err.is_malformed());
        let meta = err.metadata();
        assert_eq!(meta["body"], "<html>oops</html>");
        assert_eq!(meta["status"], "200 OK");
    }

    #[test]
    fn test_decode_truncated_body_is_malformed() {
        let err = decode::<Sample>(&raw(200, r#"{"name":"#), false).unwrap_err();
        assert!(err.is_malformed());

        let err = decode::<Sample>(&raw(200, ""), false).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_decode_type_mismatch_propagates() {
        let err = decode::<Sample>(&raw(200, r#"{"count":"many"}"#), false).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_decode_error_status() {
        let err = decode::<Sample>(&raw(500, "boom"), false).unwrap_err();
        assert!(matches!(err, Error::Status { status: 500, ref body } if body == "boom"));
    }

    // Legacy mode reproduces the old SDK, which treated 4xx/5xx as an
    // empty success. Suspect behavior, kept only behind the flag.
    #[test]
    fn test_decode_error_status_legacy_swallows() {
        let out: Option<Sample> = decode(&raw(404, r#"{"name":"x"}"#), true).unwrap();
        assert!(out.is_none());
        let out: Option<Sample> = decode(&raw(500, "not json"), true).unwrap();
        assert!(out.is_none());
    }
}

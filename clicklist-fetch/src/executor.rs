//! HTTP request executor.
//!
//! Builds one request against a fixed base origin, attaches the jar's
//! cookies, sends it through a [`Transport`], merges `Set-Cookie` headers
//! back into the jar and parses the JSON body.
//!
//! Redirects are handled here, not by the transport, so cookies set on
//! intermediate hops are never lost:
//!
//! - [`RedirectPolicy::Manual`]: any 3xx is an error
//!   ([`FetchError::UnexpectedRedirect`]).
//! - [`RedirectPolicy::Follow`]: 3xx responses are followed up to
//!   `max_redirects` hops.

use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE,
};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument, trace};
use url::Url;

use crate::cookies::CookieJar;
use crate::error::FetchError;
use crate::transport::{Transport, TransportRequest};

/// Default bound on redirect hops.
pub const DEFAULT_MAX_REDIRECTS: usize = 20;

// ============================================================================
// Redirect Policy
// ============================================================================

/// How the executor treats 3xx responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RedirectPolicy {
    /// Surface any redirect as an error.
    #[default]
    Manual,
    /// Follow redirects, collecting cookies on every hop.
    Follow,
}

// ============================================================================
// Api Request
// ============================================================================

/// A request relative to the executor's base origin.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the base origin.
    pub path: String,
    /// Query parameters, in order.
    pub query: Vec<(String, String)>,
    /// JSON payload.
    pub json: Option<Value>,
    /// Extra headers.
    pub headers: Vec<(String, String)>,
    /// Redirect handling.
    pub redirect: RedirectPolicy,
}

impl ApiRequest {
    /// Creates a request with no query, body or extra headers.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            json: None,
            headers: Vec::new(),
            redirect: RedirectPolicy::Manual,
        }
    }

    /// `GET path`.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// `POST path`.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Sets the JSON payload.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, FetchError> {
        self.json = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Adds a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the redirect policy.
    #[must_use]
    pub fn redirect(mut self, policy: RedirectPolicy) -> Self {
        self.redirect = policy;
        self
    }
}

// ============================================================================
// Raw Response
// ============================================================================

/// Final response of a request, after redirects.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// Final status (always 2xx).
    pub status: StatusCode,
    /// Final URL.
    pub url: Url,
    /// Body text.
    pub body: String,
}

impl RawResponse {
    /// Parses the body as JSON. An empty body is `null`.
    pub fn json(&self) -> Result<Value, FetchError> {
        if self.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&self.body).map_err(|e| FetchError::InvalidJson {
            message: e.to_string(),
            body: self.body.clone(),
        })
    }
}

// ============================================================================
// Executor
// ============================================================================

/// Sends [`ApiRequest`]s against a base origin with a caller-supplied jar.
#[derive(Clone)]
pub struct RequestExecutor {
    transport: Arc<dyn Transport>,
    base_url: Url,
    max_redirects: usize,
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("base_url", &self.base_url.as_str())
            .field("max_redirects", &self.max_redirects)
            .finish_non_exhaustive()
    }
}

impl RequestExecutor {
    /// Creates an executor.
    pub fn new(transport: Arc<dyn Transport>, base_url: Url) -> Self {
        Self {
            transport,
            base_url,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }

    /// Sets the redirect bound used by [`RedirectPolicy::Follow`].
    #[must_use]
    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// The base origin.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Host of the base origin; cookies the client synthesizes live here.
    pub fn base_host(&self) -> &str {
        self.base_url.host_str().unwrap_or_default()
    }

    /// Resolves `path` and `query` against the base origin.
    pub fn url_for(&self, path: &str, query: &[(String, String)]) -> Result<Url, FetchError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| FetchError::InvalidUrl(format!("{path}: {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Executes a request and parses the JSON body.
    pub async fn execute(
        &self,
        jar: &mut CookieJar,
        request: &ApiRequest,
    ) -> Result<Value, FetchError> {
        self.execute_raw(jar, request).await?.json()
    }

    /// Executes a request and deserializes the JSON body into `T`.
    pub async fn execute_as<T: DeserializeOwned>(
        &self,
        jar: &mut CookieJar,
        request: &ApiRequest,
    ) -> Result<T, FetchError> {
        let response = self.execute_raw(jar, request).await?;
        let value = response.json()?;
        serde_json::from_value(value).map_err(|e| FetchError::InvalidJson {
            message: e.to_string(),
            body: response.body,
        })
    }

    /// Executes a request and returns the final response without parsing it.
    #[instrument(skip(self, jar, request), fields(method = %request.method, path = %request.path))]
    pub async fn execute_raw(
        &self,
        jar: &mut CookieJar,
        request: &ApiRequest,
    ) -> Result<RawResponse, FetchError> {
        let mut url = self.url_for(&request.path, &request.query)?;
        let mut method = request.method.clone();
        let mut body = request.json.as_ref().map(serde_json::to_vec).transpose()?;
        let extra_headers = encode_headers(&request.headers)?;
        let mut hops = 0;

        loop {
            let host = url
                .host_str()
                .ok_or_else(|| FetchError::InvalidUrl(format!("{url}: no host")))?
                .to_string();

            let mut headers = HeaderMap::new();
            headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
            if body.is_some() {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            }
            for (name, value) in &extra_headers {
                headers.insert(name.clone(), value.clone());
            }
            if let Some(cookie) = jar.header_for(&host) {
                let value = HeaderValue::from_str(&cookie)
                    .map_err(|e| FetchError::InvalidHeader(format!("cookie: {e}")))?;
                headers.insert(COOKIE, value);
            }

            debug!(url = %url, hop = hops, "Sending request");
            let response = self
                .transport
                .send(TransportRequest {
                    method: method.clone(),
                    url: url.clone(),
                    headers,
                    body: body.clone(),
                })
                .await?;

            for set_cookie in response.headers.get_all(SET_COOKIE) {
                if let Ok(value) = set_cookie.to_str() {
                    jar.store_response_cookie(&host, value);
                }
            }

            let status = response.status;
            trace!(status = %status, "Response status");

            if status.is_redirection() {
                let location = response
                    .headers
                    .get(LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .map(String::from);

                match (request.redirect, location) {
                    (RedirectPolicy::Follow, Some(location)) => {
                        hops += 1;
                        if hops > self.max_redirects {
                            return Err(FetchError::TooManyRedirects(self.max_redirects));
                        }
                        url = url
                            .join(&location)
                            .map_err(|e| FetchError::InvalidUrl(format!("{location}: {e}")))?;
                        if matches!(
                            status,
                            StatusCode::MOVED_PERMANENTLY | StatusCode::FOUND | StatusCode::SEE_OTHER
                        ) {
                            method = Method::GET;
                            body = None;
                        }
                        debug!(status = %status, location = %url, "Following redirect");
                        continue;
                    }
                    (_, location) => {
                        return Err(FetchError::UnexpectedRedirect { status, location });
                    }
                }
            }

            if !status.is_success() {
                debug!(status = %status, "Request failed");
                return Err(FetchError::HttpStatus {
                    status,
                    body: response.body,
                });
            }

            return Ok(RawResponse {
                status,
                url,
                body: response.body,
            });
        }
    }
}

fn encode_headers(headers: &[(String, String)]) -> Result<Vec<(HeaderName, HeaderValue)>, FetchError> {
    headers
        .iter()
        .map(|(name, value)| {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| FetchError::InvalidHeader(format!("{name}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| FetchError::InvalidHeader(format!("{name}: {e}")))?;
            Ok((name, value))
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TransportResponse;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays canned responses and records what was sent.
    #[derive(Default)]
    struct ScriptedTransport {
        responses: Mutex<VecDeque<TransportResponse>>,
        sent: Mutex<Vec<TransportRequest>>,
    }

    impl ScriptedTransport {
        fn push(&self, status: u16, headers: &[(&str, &str)], body: &str) {
            let mut map = HeaderMap::new();
            for (name, value) in headers {
                map.append(
                    HeaderName::from_bytes(name.as_bytes()).unwrap(),
                    HeaderValue::from_str(value).unwrap(),
                );
            }
            self.responses.lock().unwrap().push_back(TransportResponse {
                status: StatusCode::from_u16(status).unwrap(),
                headers: map,
                body: body.to_string(),
            });
        }

        fn sent(&self) -> Vec<TransportRequest> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn send(&self, request: TransportRequest) -> Result<TransportResponse, FetchError> {
            self.sent.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| FetchError::TransportFailed("no scripted response".to_string()))
        }
    }

    fn executor(transport: &Arc<ScriptedTransport>) -> RequestExecutor {
        RequestExecutor::new(
            transport.clone(),
            Url::parse("https://www.kroger.com").unwrap(),
        )
    }

    #[tokio::test]
    async fn test_get_parses_json_and_sends_cookies() {
        let transport = Arc::new(ScriptedTransport::default());
        transport.push(200, &[("set-cookie", "fresh=1")], r#"{"ok":true}"#);

        let mut jar = CookieJar::new();
        jar.set("www.kroger.com", "sid", "abc");

        let request = ApiRequest::get("/api/cart").header("X-XSRF-TOKEN", "tok");
        let body = executor(&transport).execute(&mut jar, &request).await.unwrap();

        assert_eq!(body, json!({"ok": true}));
        assert_eq!(jar.get("www.kroger.com", "fresh"), Some("1"));

        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].url.as_str(), "https://www.kroger.com/api/cart");
        assert_eq!(sent[0].headers[COOKIE], "sid=abc");
        assert_eq!(sent[0].headers["x-xsrf-token"], "tok");
        assert!(sent[0].headers.get(CONTENT_TYPE).is_none());
    }

    #[tokio::test]
    async fn test_post_json_body_and_query() {
        let transport = Arc::new(ScriptedTransport::default());
        transport.push(200, &[], "");

        let mut jar = CookieJar::new();
        let request = ApiRequest::post("/api/cart/item")
            .query("strategy", "deleteItem")
            .json(&json!({"upc": "1"}))
            .unwrap();
        let body = executor(&transport).execute(&mut jar, &request).await.unwrap();
        assert_eq!(body, Value::Null);

        let sent = transport.sent();
        assert_eq!(sent[0].method, Method::POST);
        assert_eq!(
            sent[0].url.as_str(),
            "https://www.kroger.com/api/cart/item?strategy=deleteItem"
        );
        assert_eq!(sent[0].headers[CONTENT_TYPE], "application/json");
        assert_eq!(sent[0].body.as_deref(), Some(br#"{"upc":"1"}"#.as_slice()));
        assert!(sent[0].headers.get(COOKIE).is_none());
    }

    #[tokio::test]
    async fn test_manual_policy_rejects_redirect() {
        let transport = Arc::new(ScriptedTransport::default());
        transport.push(302, &[("location", "/signin"), ("set-cookie", "a=1")], "");

        let mut jar = CookieJar::new();
        let err = executor(&transport)
            .execute(&mut jar, &ApiRequest::get("/api/cart"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            FetchError::UnexpectedRedirect { status, ref location }
                if status == StatusCode::FOUND && location.as_deref() == Some("/signin")
        ));
        // Cookies from the redirect response are still recorded.
        assert_eq!(jar.get("www.kroger.com", "a"), Some("1"));
        assert_eq!(transport.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_follow_collects_cookies_on_every_hop() {
        let transport = Arc::new(ScriptedTransport::default());
        transport.push(302, &[("location", "/step2"), ("set-cookie", "one=1")], "");
        transport.push(
            303,
            &[
                ("location", "https://www.kroger.com/final"),
                ("set-cookie", "two=2; Domain=.kroger.com"),
            ],
            "",
        );
        transport.push(200, &[("set-cookie", "XSRF-TOKEN=tok")], "<html></html>");

        let mut jar = CookieJar::new();
        let request = ApiRequest::post("/start")
            .json(&json!({"x": 1}))
            .unwrap()
            .redirect(RedirectPolicy::Follow);
        let response = executor(&transport)
            .execute_raw(&mut jar, &request)
            .await
            .unwrap();

        assert_eq!(response.url.path(), "/final");
        assert_eq!(jar.find("one"), Some("1"));
        assert_eq!(jar.find("two"), Some("2"));
        assert_eq!(jar.find("XSRF-TOKEN"), Some("tok"));

        let sent = transport.sent();
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[1].method, Method::GET);
        assert!(sent[1].body.is_none());
        assert_eq!(sent[1].headers[COOKIE], "one=1");
        assert_eq!(sent[2].headers[COOKIE], "one=1; two=2");
    }

    #[tokio::test]
    async fn test_follow_is_bounded() {
        let transport = Arc::new(ScriptedTransport::default());
        for _ in 0..3 {
            transport.push(302, &[("location", "/loop")], "");
        }

        let mut jar = CookieJar::new();
        let request = ApiRequest::get("/loop").redirect(RedirectPolicy::Follow);
        let err = executor(&transport)
            .with_max_redirects(2)
            .execute_raw(&mut jar, &request)
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::TooManyRedirects(2)));
        assert_eq!(transport.sent().len(), 3);
    }

    #[tokio::test]
    async fn test_error_status_carries_body() {
        let transport = Arc::new(ScriptedTransport::default());
        transport.push(403, &[], "forbidden");

        let mut jar = CookieJar::new();
        let err = executor(&transport)
            .execute(&mut jar, &ApiRequest::get("/api/cart"))
            .await
            .unwrap_err();

        match err {
            FetchError::HttpStatus { status, body } => {
                assert_eq!(status, StatusCode::FORBIDDEN);
                assert_eq!(body, "forbidden");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_body_is_an_error() {
        let transport = Arc::new(ScriptedTransport::default());
        transport.push(200, &[], "<html>");

        let mut jar = CookieJar::new();
        let err = executor(&transport)
            .execute(&mut jar, &ApiRequest::get("/api/cart"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::InvalidJson { ref body, .. } if body == "<html>"));
    }

    #[tokio::test]
    async fn test_execute_as_typed() {
        #[derive(serde::Deserialize)]
        struct Payload {
            n: u32,
        }

        let transport = Arc::new(ScriptedTransport::default());
        transport.push(200, &[], r#"{"n": 7}"#);

        let mut jar = CookieJar::new();
        let payload: Payload = executor(&transport)
            .execute_as(&mut jar, &ApiRequest::get("/n"))
            .await
            .unwrap();
        assert_eq!(payload.n, 7);
    }

    #[test]
    fn test_url_for_encodes_query() {
        let transport = Arc::new(ScriptedTransport::default());
        let url = executor(&transport)
            .url_for(
                "/onlineshopping/redirect",
                &[("redirectUrl".to_string(), "/storecatalog/#/storesetup".to_string())],
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.kroger.com/onlineshopping/redirect?redirectUrl=%2Fstorecatalog%2F%23%2Fstoresetup"
        );
    }

    #[test]
    fn test_invalid_header_rejected() {
        let result = encode_headers(&[("bad header".to_string(), "v".to_string())]);
        assert!(matches!(result, Err(FetchError::InvalidHeader(_))));
    }
}

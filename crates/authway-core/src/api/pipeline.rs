//! Authenticated request pipeline.
//!
//! Every endpoint call goes through [`Pipeline::send`], which is the only
//! place token plumbing happens:
//!
//! - before send: attach the cached bearer token (lazily loaded from the
//!   credential store on the first request of the process)
//! - after a 2xx: capture a rotated token from the response body and
//!   mirror it to the store before returning
//! - after a 401: drop the persisted token, the cache, and the session
//!   holder value, so every observer learns the sign-out at once
//!
//! The pipeline does not retry, does not classify beyond the error code
//! table, and enforces no timeout of its own beyond the transport default.

use std::sync::{Arc, Mutex};

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::auth::{SessionHolder, TokenStore, ACCESS_TOKEN_KEY};
use crate::config::ClientConfig;
use crate::error::{AuthError, AuthResult};

/// HTTP request timeout in seconds.
/// Transport-level default; the pipeline itself manages no deadlines.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// An outbound call: method, path relative to the auth base path, and
/// optional JSON body / query parameters.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub query: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            body: None,
            query: Vec::new(),
        }
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            body: None,
            query: Vec::new(),
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// A successful (2xx) response: status plus the decoded JSON body.
/// Empty bodies decode to `Value::Null`.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    /// Deserialize the body into a typed value
    pub fn decode<T: DeserializeOwned>(&self) -> AuthResult<T> {
        serde_json::from_value(self.body.clone())
            .map_err(|e| AuthError::invalid_response(format!("failed to decode response: {}", e)))
    }
}

/// In-memory token cache.
/// `loaded` distinguishes "store never consulted" from "consulted, absent"
/// so the store is read at most once per process lifetime on the happy
/// path.
#[derive(Default)]
struct TokenCache {
    value: Option<String>,
    loaded: bool,
}

/// The request/response interception layer.
/// One instance is shared by every endpoint group of a client, so a token
/// rotation or a 401 observed through any call is visible to all of them.
pub struct Pipeline {
    client: Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
    holder: Arc<SessionHolder>,
    token: Mutex<TokenCache>,
}

impl Pipeline {
    pub fn new(
        config: &ClientConfig,
        store: Arc<dyn TokenStore>,
        holder: Arc<SessionHolder>,
    ) -> AuthResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AuthError::from_transport(&e))?;

        Ok(Self {
            client,
            base_url: config.api_base(),
            store,
            holder,
            token: Mutex::new(TokenCache::default()),
        })
    }

    /// Send a request, transparently handling bearer attachment, token
    /// rotation, and 401 invalidation.
    ///
    /// Absence of a token is not an error here; the request proceeds
    /// unauthenticated and the server decides whether that is acceptable.
    /// Credential store failures surface as `storage_error`, never as a
    /// 401 and never as "no token".
    pub async fn send(&self, request: ApiRequest) -> AuthResult<ApiResponse> {
        let token = self.current_token()?;

        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self.client.request(request.method.clone(), &url);
        if let Some(ref t) = token {
            builder = builder.bearer_auth(t);
        }
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| AuthError::from_transport(&e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AuthError::from_transport(&e))?;

        if status == StatusCode::UNAUTHORIZED {
            debug!(path = %request.path, "401 received, invalidating local auth state");
            self.clear_auth();
            return Err(AuthError::from_status(status, &text));
        }

        if !status.is_success() {
            return Err(AuthError::from_status(status, &text));
        }

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).map_err(|e| {
                AuthError::invalid_response(format!("response was not valid JSON: {}", e))
            })?
        };

        self.capture_token(&body)?;

        Ok(ApiResponse { status, body })
    }

    /// Cached token, reading the store once on first use
    fn current_token(&self) -> AuthResult<Option<String>> {
        let mut cache = self.token.lock().unwrap();
        if !cache.loaded {
            cache.value = self.store.read(ACCESS_TOKEN_KEY)?;
            cache.loaded = true;
            debug!(present = cache.value.is_some(), "token loaded from store");
        }
        Ok(cache.value.clone())
    }

    /// Persist a rotated token carried in a response body.
    ///
    /// The cache is updated only after the store write succeeds, keeping
    /// the two views convergent.
    fn capture_token(&self, body: &Value) -> AuthResult<()> {
        let Some(new_token) = extract_token(body) else {
            return Ok(());
        };
        let mut cache = self.token.lock().unwrap();
        if cache.value.as_deref() == Some(new_token) {
            return Ok(());
        }
        self.store.write(ACCESS_TOKEN_KEY, new_token)?;
        cache.value = Some(new_token.to_string());
        cache.loaded = true;
        debug!("rotated token captured and persisted");
        Ok(())
    }

    /// Drop the persisted token, the in-memory cache, and the session
    /// holder value. Used by the 401 handler, sign-out, and account
    /// deletion; idempotent and safe to run when nothing was cached.
    ///
    /// A store delete failure here is logged rather than returned: on the
    /// 401 path the authentication failure is the caller's error, and
    /// masking it with a storage error would conflate the two.
    pub(crate) fn clear_auth(&self) {
        if let Err(e) = self.store.delete(ACCESS_TOKEN_KEY) {
            warn!(error = %e, "failed to delete persisted token");
        }
        {
            let mut cache = self.token.lock().unwrap();
            cache.value = None;
            cache.loaded = true;
        }
        self.holder.clear();
    }

    pub(crate) fn holder(&self) -> &SessionHolder {
        &self.holder
    }
}

/// Two-step token lookup: the token may appear at the top level or nested
/// under a `session` field, for historical API-shape reasons. Top level
/// wins.
fn extract_token(body: &Value) -> Option<&str> {
    body.get("token")
        .and_then(Value::as_str)
        .or_else(|| {
            body.get("session")
                .and_then(|s| s.get("token"))
                .and_then(Value::as_str)
        })
}

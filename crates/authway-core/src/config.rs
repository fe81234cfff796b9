//! Client configuration and per-call lifecycle hooks.

use crate::error::AuthError;

/// Path prefix for every auth endpoint, appended to the configured origin
const AUTH_BASE_PATH: &str = "/api/auth";

/// Configuration for an [`AuthClient`](crate::client::AuthClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server origin, e.g. `https://example.com`. The `/api/auth` base
    /// path is appended when building endpoint URLs.
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Full base for endpoint URLs, trailing slash normalized away
    pub fn api_base(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), AUTH_BASE_PATH)
    }
}

/// Optional lifecycle callbacks for a single sign-in or sign-up call.
///
/// Invoked synchronously: `on_request` before the request is sent,
/// then exactly one of `on_success` or `on_error` once the call settles.
/// Local validation failures count as errors and fire `on_error` without
/// touching the wire.
#[derive(Default)]
pub struct CallHooks<'a> {
    pub on_request: Option<Box<dyn Fn() + 'a>>,
    pub on_success: Option<Box<dyn Fn() + 'a>>,
    pub on_error: Option<Box<dyn Fn(&AuthError) + 'a>>,
}

impl<'a> CallHooks<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_request(mut self, f: impl Fn() + 'a) -> Self {
        self.on_request = Some(Box::new(f));
        self
    }

    pub fn on_success(mut self, f: impl Fn() + 'a) -> Self {
        self.on_success = Some(Box::new(f));
        self
    }

    pub fn on_error(mut self, f: impl Fn(&AuthError) + 'a) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }
}

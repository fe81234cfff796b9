//! One-call-per-endpoint modules.
//!
//! Each group borrows the client's shared pipeline, builds a request,
//! decodes the typed result, and performs its documented session-holder
//! side effect. All token handling lives in the pipeline.

use std::future::Future;

use serde_json::Value;

use crate::config::CallHooks;
use crate::error::{AuthError, AuthResult};
use crate::models::{Session, User};

pub mod account;
pub mod oauth;
pub mod session;
pub mod sign_in;
pub mod sign_up;

pub use account::Account;
pub use oauth::OAuth;
pub use session::Sessions;
pub use sign_in::SignIn;
pub use sign_up::SignUp;

/// Run a call inside its lifecycle hooks: `on_request` before, then
/// exactly one of `on_success` / `on_error` after.
pub(crate) async fn with_hooks<T, F>(hooks: &CallHooks<'_>, call: F) -> AuthResult<T>
where
    F: Future<Output = AuthResult<T>>,
{
    if let Some(f) = &hooks.on_request {
        f();
    }
    let result = call.await;
    match &result {
        Ok(_) => {
            if let Some(f) = &hooks.on_success {
                f();
            }
        }
        Err(e) => {
            if let Some(f) = &hooks.on_error {
                f(e);
            }
        }
    }
    result
}

/// Decode a session from a response body that may wrap it as
/// `{"session": {...}}` or return it bare
pub(crate) fn decode_session(body: &Value) -> AuthResult<Session> {
    let value = body.get("session").unwrap_or(body);
    serde_json::from_value(value.clone())
        .map_err(|e| AuthError::invalid_response(format!("failed to decode session: {}", e)))
}

/// Decode a user from a response body that may wrap it as
/// `{"user": {...}}` or return it bare
pub(crate) fn decode_user(body: &Value) -> AuthResult<User> {
    let value = body.get("user").unwrap_or(body);
    serde_json::from_value(value.clone())
        .map_err(|e| AuthError::invalid_response(format!("failed to decode user: {}", e)))
}

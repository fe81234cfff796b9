//! OAuth operations.
//!
//! The browser redirect and callback capture belong to an external
//! collaborator (system browser, deep link handler); this module only
//! asks the server for the provider URL and exchanges the short-lived
//! callback token for a session.

use serde_json::{json, Value};

use super::decode_session;
use crate::api::{ApiRequest, Pipeline};
use crate::error::{AuthError, AuthResult};
use crate::models::Session;

/// OAuth endpoint group.
pub struct OAuth<'a> {
    pub(crate) pipeline: &'a Pipeline,
}

impl OAuth<'_> {
    /// Start an OAuth sign-in for `provider`, returning the URL to open
    /// in the system browser. `callback_url` is where the provider sends
    /// the user afterwards.
    pub async fn sign_in(&self, provider: &str, callback_url: &str) -> AuthResult<String> {
        let response = self
            .pipeline
            .send(
                ApiRequest::get(format!("/oauth2/sign-in/{}", provider))
                    .with_query("callbackUrl", callback_url),
            )
            .await?;

        response
            .body
            .get("url")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| AuthError::invalid_response("oauth response missing url field"))
    }

    /// Exchange the short-lived token from the OAuth callback URL for a
    /// session, publishing it to the session holder
    pub async fn callback(&self, token: &str) -> AuthResult<Session> {
        let response = self
            .pipeline
            .send(ApiRequest::post("/oauth2/callback").with_body(json!({ "token": token })))
            .await?;
        let session = decode_session(&response.body)?;
        self.pipeline.holder().set(Some(session.clone()));
        Ok(session)
    }
}

//! Sign-in operations: email/password, one-time password, anonymous.

use std::collections::HashMap;

use serde_json::json;

use super::{decode_session, with_hooks};
use crate::api::{ApiRequest, Pipeline};
use crate::config::CallHooks;
use crate::error::{AuthError, AuthResult};
use crate::models::Session;
use crate::validate::validate_email;

/// Sign-in endpoint group. Every successful call populates the session
/// holder; the pipeline persists the token carried in the response.
pub struct SignIn<'a> {
    pub(crate) pipeline: &'a Pipeline,
}

impl SignIn<'_> {
    /// Sign in with email and password
    pub async fn email(&self, email: &str, password: &str) -> AuthResult<Session> {
        self.email_with_hooks(email, password, &CallHooks::new())
            .await
    }

    /// Sign in with email and password, with per-call lifecycle hooks
    pub async fn email_with_hooks(
        &self,
        email: &str,
        password: &str,
        hooks: &CallHooks<'_>,
    ) -> AuthResult<Session> {
        with_hooks(hooks, async {
            let mut details = HashMap::new();
            if let Some(msg) = validate_email(email) {
                details.insert("email".to_string(), msg);
            }
            if password.is_empty() {
                details.insert("password".to_string(), "Password is required".to_string());
            }
            if !details.is_empty() {
                return Err(AuthError::validation(details));
            }

            self.complete(
                ApiRequest::post("/sign-in/email")
                    .with_body(json!({ "email": email, "password": password })),
            )
            .await
        })
        .await
    }

    /// Sign in with a one-time password previously sent to the email
    pub async fn otp(&self, email: &str, otp: &str) -> AuthResult<Session> {
        self.otp_with_hooks(email, otp, &CallHooks::new()).await
    }

    pub async fn otp_with_hooks(
        &self,
        email: &str,
        otp: &str,
        hooks: &CallHooks<'_>,
    ) -> AuthResult<Session> {
        with_hooks(hooks, async {
            self.complete(
                ApiRequest::post("/sign-in/otp").with_body(json!({ "email": email, "otp": otp })),
            )
            .await
        })
        .await
    }

    /// Create an anonymous session with no credentials
    pub async fn anonymous(&self) -> AuthResult<Session> {
        self.complete(ApiRequest::post("/sign-in/anonymous")).await
    }

    async fn complete(&self, request: ApiRequest) -> AuthResult<Session> {
        let response = self.pipeline.send(request).await?;
        let session = decode_session(&response.body)?;
        self.pipeline.holder().set(Some(session.clone()));
        Ok(session)
    }
}

//! Sign-up operations.

use std::collections::HashMap;

use serde_json::json;

use super::{decode_user, with_hooks};
use crate::api::{ApiRequest, Pipeline};
use crate::config::CallHooks;
use crate::error::{AuthError, AuthResult};
use crate::models::User;
use crate::validate::{validate_email, validate_password};

/// Sign-up endpoint group.
///
/// Registration returns the created [`User`] but does not authenticate;
/// callers follow up with a sign-in to populate the session holder.
pub struct SignUp<'a> {
    pub(crate) pipeline: &'a Pipeline,
}

impl SignUp<'_> {
    /// Register a new account with email and password
    pub async fn email(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> AuthResult<User> {
        self.email_with_hooks(email, password, name, &CallHooks::new())
            .await
    }

    /// Register a new account, with per-call lifecycle hooks
    pub async fn email_with_hooks(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
        hooks: &CallHooks<'_>,
    ) -> AuthResult<User> {
        with_hooks(hooks, async {
            let mut details = HashMap::new();
            if let Some(msg) = validate_email(email) {
                details.insert("email".to_string(), msg);
            }
            if let Some(msg) = validate_password(password) {
                details.insert("password".to_string(), msg);
            }
            if !details.is_empty() {
                return Err(AuthError::validation(details));
            }

            let mut body = json!({ "email": email, "password": password });
            if let Some(name) = name {
                body["name"] = json!(name);
            }

            let response = self
                .pipeline
                .send(ApiRequest::post("/sign-up/email").with_body(body))
                .await?;
            decode_user(&response.body)
        })
        .await
    }
}

//! Account management operations.

use serde_json::json;

use super::decode_user;
use crate::api::{ApiRequest, Pipeline};
use crate::error::AuthResult;
use crate::models::User;

/// Account endpoint group.
pub struct Account<'a> {
    pub(crate) pipeline: &'a Pipeline,
}

impl Account<'_> {
    /// Update profile fields; omitted fields are left untouched.
    ///
    /// When a session is held, its embedded user is refreshed with the
    /// returned value so observers see the change.
    pub async fn update(&self, name: Option<&str>, image: Option<&str>) -> AuthResult<User> {
        let mut body = json!({});
        if let Some(name) = name {
            body["name"] = json!(name);
        }
        if let Some(image) = image {
            body["image"] = json!(image);
        }

        let response = self
            .pipeline
            .send(ApiRequest::post("/account/update").with_body(body))
            .await?;
        let user = decode_user(&response.body)?;

        let holder = self.pipeline.holder();
        if let Some(mut session) = holder.get() {
            session.user = user.clone();
            holder.set(Some(session));
        }

        Ok(user)
    }

    /// Change the account password. `old_password` is optional for
    /// accounts that never had one (e.g. OAuth-created).
    pub async fn change_password(
        &self,
        new_password: &str,
        old_password: Option<&str>,
    ) -> AuthResult<()> {
        let mut body = json!({ "newPassword": new_password });
        if let Some(old) = old_password {
            body["oldPassword"] = json!(old);
        }
        self.pipeline
            .send(ApiRequest::post("/account/change-password").with_body(body))
            .await?;
        Ok(())
    }

    /// Delete the account and clear all local auth state
    pub async fn delete(&self) -> AuthResult<()> {
        self.pipeline
            .send(ApiRequest::post("/account/delete"))
            .await?;
        self.pipeline.clear_auth();
        Ok(())
    }
}

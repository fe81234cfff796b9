//! Session management operations.

use serde_json::{json, Value};

use super::decode_session;
use crate::api::{ApiRequest, Pipeline};
use crate::error::{AuthError, AuthResult};
use crate::models::Session;

/// Session endpoint group.
pub struct Sessions<'a> {
    pub(crate) pipeline: &'a Pipeline,
}

impl Sessions<'_> {
    /// Fetch the session backing the current token and publish it to the
    /// session holder
    pub async fn get(&self) -> AuthResult<Session> {
        let response = self.pipeline.send(ApiRequest::get("/session")).await?;
        let session = decode_session(&response.body)?;
        self.pipeline.holder().set(Some(session.clone()));
        Ok(session)
    }

    /// List every active session for the account.
    /// The server may wrap the list as `{"sessions": [...]}` or return it
    /// bare.
    pub async fn list(&self) -> AuthResult<Vec<Session>> {
        let response = self.pipeline.send(ApiRequest::get("/sessions")).await?;
        match response.body.get("sessions") {
            Some(value) => serde_json::from_value(value.clone()).map_err(|e| {
                AuthError::invalid_response(format!("failed to decode sessions: {}", e))
            }),
            None => response.decode(),
        }
    }

    /// Revoke one session by id
    pub async fn revoke(&self, session_id: &str) -> AuthResult<()> {
        self.pipeline
            .send(
                ApiRequest::post("/revoke-session").with_body(json!({ "sessionId": session_id })),
            )
            .await?;
        Ok(())
    }

    /// Revoke every session except the current one
    pub async fn revoke_others(&self) -> AuthResult<()> {
        self.pipeline
            .send(ApiRequest::post("/revoke-other-sessions"))
            .await?;
        Ok(())
    }

    /// Sign out on the server and clear all local auth state.
    ///
    /// Local state is cleared even when the server call fails: the user
    /// asked to be signed out, and a dead network must not keep them
    /// signed in on this device.
    pub async fn sign_out(&self) -> AuthResult<()> {
        self.sign_out_with_body(None).await
    }

    /// Sign out with an opaque body forwarded to the server
    pub async fn sign_out_with_body(&self, body: Option<Value>) -> AuthResult<()> {
        let mut request = ApiRequest::post("/sign-out");
        if let Some(body) = body {
            request = request.with_body(body);
        }
        let result = self.pipeline.send(request).await;
        self.pipeline.clear_auth();
        result.map(|_| ())
    }
}

//! Typed facade over the auth API.

use std::sync::Arc;

use tracing::debug;

use crate::api::Pipeline;
use crate::auth::{SessionHolder, Subscription, TokenStore};
use crate::config::ClientConfig;
use crate::endpoints::{Account, OAuth, Sessions, SignIn, SignUp};
use crate::error::AuthResult;
use crate::models::Session;

/// Entry point for the SDK.
///
/// Clone is cheap; clones share the single pipeline and session holder,
/// so a token rotation or 401 observed through any endpoint group is
/// immediately visible to all of them.
#[derive(Clone)]
pub struct AuthClient {
    pipeline: Arc<Pipeline>,
    holder: Arc<SessionHolder>,
}

impl AuthClient {
    pub fn new(config: ClientConfig, store: Arc<dyn TokenStore>) -> AuthResult<Self> {
        let holder = Arc::new(SessionHolder::new());
        let pipeline = Arc::new(Pipeline::new(&config, store, holder.clone())?);
        Ok(Self { pipeline, holder })
    }

    pub fn sign_in(&self) -> SignIn<'_> {
        SignIn {
            pipeline: &self.pipeline,
        }
    }

    pub fn sign_up(&self) -> SignUp<'_> {
        SignUp {
            pipeline: &self.pipeline,
        }
    }

    pub fn session(&self) -> Sessions<'_> {
        Sessions {
            pipeline: &self.pipeline,
        }
    }

    pub fn oauth(&self) -> OAuth<'_> {
        OAuth {
            pipeline: &self.pipeline,
        }
    }

    pub fn account(&self) -> Account<'_> {
        Account {
            pipeline: &self.pipeline,
        }
    }

    /// The observable session slot shared by all endpoint groups
    pub fn session_holder(&self) -> &SessionHolder {
        &self.holder
    }

    /// Copy of the current session, `None` when signed out
    pub fn current_session(&self) -> Option<Session> {
        self.holder.get()
    }

    /// Observe session changes; the handle unsubscribes on drop
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(Option<&Session>) + Send + Sync + 'static,
    {
        self.holder.subscribe(observer)
    }

    /// Best-effort session restore for process start.
    ///
    /// Fetches the current session and discards every failure - network
    /// down, expired token, locked keystore alike. This catch-and-discard
    /// policy is intentional and applies to this call site only; all
    /// other operations surface their errors.
    pub async fn restore_session(&self) -> Option<Session> {
        match self.session().get().await {
            Ok(session) => Some(session),
            Err(e) => {
                debug!(code = %e.code, "session restore skipped");
                None
            }
        }
    }
}

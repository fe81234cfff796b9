//! Client SDK for a bearer-token authentication server.
//!
//! Wraps the server's `/api/auth` REST surface behind a typed facade:
//!
//! - [`AuthClient`]: entry point; one method group per endpoint family
//! - [`api::Pipeline`]: transparent bearer attachment, token-rotation
//!   capture, and 401 invalidation on every request
//! - [`auth::SessionHolder`]: observable slot holding the current session
//! - [`auth::TokenStore`]: credential persistence capability, backed by
//!   the OS keychain ([`auth::KeyringStore`]) or memory
//!
//! Every public operation returns [`AuthResult`]; callers never see raw
//! transport errors.
//!
//! ```no_run
//! use std::sync::Arc;
//! use authway_core::{AuthClient, ClientConfig, KeyringStore};
//!
//! # async fn run() -> authway_core::AuthResult<()> {
//! let client = AuthClient::new(
//!     ClientConfig::new("https://example.com"),
//!     Arc::new(KeyringStore::new("my-app")),
//! )?;
//!
//! let session = client.sign_in().email("user@example.com", "hunter22!").await?;
//! println!("signed in as {}", session.user.email);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod validate;

pub use auth::{KeyringStore, MemoryStore, SessionHolder, StoreError, Subscription, TokenStore};
pub use client::AuthClient;
pub use config::{CallHooks, ClientConfig};
pub use error::{AuthError, AuthResult};
pub use models::{Session, User};

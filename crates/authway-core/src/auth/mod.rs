//! Local authentication state: token persistence and the session slot.
//!
//! This module provides:
//! - `TokenStore`: capability interface over credential persistence,
//!   with `KeyringStore` (OS keychain) and `MemoryStore` implementations
//! - `SessionHolder`: the observable slot holding the current session
//!
//! The bearer token itself is managed by the request pipeline; nothing
//! here talks to the network.

pub mod holder;
pub mod keyring;
pub mod store;

pub use holder::{SessionHolder, Subscription};
pub use keyring::KeyringStore;
pub use store::{MemoryStore, StoreError, TokenStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};

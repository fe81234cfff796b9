//! Data models for the auth API.
//!
//! - `Session`: an authenticated device/login with token and expiry
//! - `User`: the account a session belongs to
//!
//! Wire format is camelCase JSON throughout.

pub mod session;
pub mod user;

pub use session::Session;
pub use user::User;

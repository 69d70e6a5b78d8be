//! Request middleware and extractors

pub mod admin_auth;
pub mod auth;

pub use admin_auth::RequireAdmin;
pub use auth::RequireApiKey;

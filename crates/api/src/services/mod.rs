//! Application services.

pub mod auth;
pub mod uploads;

pub use auth::{AuthError, AuthService};
pub use uploads::{UploadError, UploadKind, UploadStore};

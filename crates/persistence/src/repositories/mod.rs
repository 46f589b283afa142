//! Repository implementations.

pub mod comment;
pub mod invite;
pub mod notification;
pub mod post;
pub mod stats;
pub mod user;

pub use comment::CommentRepository;
pub use invite::{default_expiration, InviteRepository};
pub use notification::NotificationRepository;
pub use post::PostRepository;
pub use stats::{SiteStats, StatsRepository};
pub use user::{ProfileUpdate, UserRepository};

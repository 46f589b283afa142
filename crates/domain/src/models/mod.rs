//! Domain models for FriendCircle.

pub mod invite;
pub mod notification;
pub mod post;

pub use notification::NotificationKind;
pub use post::Post;

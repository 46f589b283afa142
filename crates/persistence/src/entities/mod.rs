//! Database entity definitions (row mappings).

pub mod comment;
pub mod invite;
pub mod notification;
pub mod post;
pub mod user;

pub use comment::{CommentEntity, CommentFeedEntity};
pub use invite::{InviteEntity, InviteWithInviterEntity};
pub use notification::NotificationEntity;
pub use post::{PostEntity, PostFeedEntity};
pub use user::{UserEntity, UserWithStatsEntity};

//! Notification domain model.
//!
//! Notifications exist only as side effects of domain events (invite
//! accepted, post liked, post commented). Clients can list them and mark
//! them read, never create or delete them.

use std::fmt;
use std::str::FromStr;

/// How many notifications a listing returns.
pub const NOTIFICATION_PAGE_SIZE: i64 = 50;

/// The domain event a notification reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    InviteAccepted,
    Like,
    Comment,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::InviteAccepted => "invite_accepted",
            NotificationKind::Like => "like",
            NotificationKind::Comment => "comment",
        }
    }

    /// Human-readable message for this event, naming the acting user.
    pub fn message(&self, actor_name: &str) -> String {
        match self {
            NotificationKind::InviteAccepted => format!("{} accepted your invite!", actor_name),
            NotificationKind::Like => format!("{} liked your post", actor_name),
            NotificationKind::Comment => format!("{} commented on your post", actor_name),
        }
    }
}

impl FromStr for NotificationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "invite_accepted" => Ok(NotificationKind::InviteAccepted),
            "like" => Ok(NotificationKind::Like),
            "comment" => Ok(NotificationKind::Comment),
            _ => Err(format!("Invalid notification kind: {}", s)),
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_roundtrip() {
        for kind in [
            NotificationKind::InviteAccepted,
            NotificationKind::Like,
            NotificationKind::Comment,
        ] {
            assert_eq!(kind.as_str().parse::<NotificationKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_kind_from_str_invalid() {
        assert!("poke".parse::<NotificationKind>().is_err());
    }

    #[test]
    fn test_messages_name_the_actor() {
        assert_eq!(
            NotificationKind::InviteAccepted.message("Bob"),
            "Bob accepted your invite!"
        );
        assert_eq!(NotificationKind::Like.message("Bob"), "Bob liked your post");
        assert_eq!(
            NotificationKind::Comment.message("Bob"),
            "Bob commented on your post"
        );
    }
}

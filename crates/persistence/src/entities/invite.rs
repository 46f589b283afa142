//! Invite entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the invites table.
#[derive(Debug, Clone, FromRow)]
pub struct InviteEntity {
    pub id: Uuid,
    pub email: String,
    pub token: String,
    pub invited_by: Uuid,
    pub used: bool,
    pub used_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl InviteEntity {
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }

    /// Whether the invite was addressed to the given email.
    pub fn matches_email(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email)
    }
}

/// An invites row joined with the inviter's display name, for the public
/// token lookup.
#[derive(Debug, Clone, FromRow)]
pub struct InviteWithInviterEntity {
    pub id: Uuid,
    pub email: String,
    pub used: bool,
    pub expires_at: DateTime<Utc>,
    pub inviter_name: String,
}

impl InviteWithInviterEntity {
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample() -> InviteEntity {
        InviteEntity {
            id: Uuid::new_v4(),
            email: "b@x.com".to_string(),
            token: "t".repeat(32),
            invited_by: Uuid::new_v4(),
            used: false,
            used_by: None,
            created_at: Utc::now(),
            expires_at: Utc::now() + Duration::days(7),
        }
    }

    #[test]
    fn test_is_expired() {
        assert!(!sample().is_expired());

        let mut expired = sample();
        expired.expires_at = Utc::now() - Duration::hours(1);
        assert!(expired.is_expired());
    }

    #[test]
    fn test_matches_email_case_insensitive() {
        let invite = sample();
        assert!(invite.matches_email("b@x.com"));
        assert!(invite.matches_email("B@X.COM"));
        assert!(!invite.matches_email("c@x.com"));
    }
}

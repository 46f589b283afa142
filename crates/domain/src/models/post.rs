//! Post domain model.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A post in the shared feed. Must carry text, an image, or both.
#[derive(Debug, Clone)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub body: String,
    /// Stored image filename, empty for text-only posts.
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// A post with neither text nor an image carries nothing worth storing.
    pub fn has_content(body: &str, image: &str) -> bool {
        !body.trim().is_empty() || !image.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_content() {
        assert!(Post::has_content("hello", ""));
        assert!(Post::has_content("", "photo.png"));
        assert!(Post::has_content("hello", "photo.png"));
        assert!(!Post::has_content("", ""));
        assert!(!Post::has_content("   ", ""));
    }
}

//! Common validation utilities.

use validator::ValidationError;

/// File extensions accepted for uploaded images.
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// Maximum profile bio length in characters.
pub const MAX_BIO_LENGTH: usize = 500;

/// Maximum profile emoji length in characters.
pub const MAX_EMOJI_LENGTH: usize = 10;

/// Returns the lowercased extension of an uploaded filename if it is on the
/// image allow-list.
pub fn allowed_image_extension(filename: &str) -> Option<String> {
    let ext = filename.rsplit_once('.')?.1.to_ascii_lowercase();
    if ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Some(ext)
    } else {
        None
    }
}

/// Validates a `#rrggbb` hex color string.
pub fn validate_hex_color(color: &str) -> Result<(), ValidationError> {
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());

    if valid {
        Ok(())
    } else {
        let mut err = ValidationError::new("hex_color");
        err.message = Some("Color must be in #rrggbb format".into());
        Err(err)
    }
}

/// Normalizes an email for storage and comparison: trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_image_extension_accepts_listed() {
        assert_eq!(allowed_image_extension("photo.PNG"), Some("png".into()));
        assert_eq!(allowed_image_extension("a.b.jpeg"), Some("jpeg".into()));
        assert_eq!(allowed_image_extension("anim.webp"), Some("webp".into()));
    }

    #[test]
    fn test_allowed_image_extension_rejects_others() {
        assert_eq!(allowed_image_extension("script.exe"), None);
        assert_eq!(allowed_image_extension("archive.tar.gz"), None);
        assert_eq!(allowed_image_extension("noextension"), None);
        assert_eq!(allowed_image_extension(""), None);
    }

    #[test]
    fn test_validate_hex_color() {
        assert!(validate_hex_color("#7c3aed").is_ok());
        assert!(validate_hex_color("#FFFFFF").is_ok());
        assert!(validate_hex_color("7c3aed").is_err());
        assert!(validate_hex_color("#7c3ae").is_err());
        assert!(validate_hex_color("#7c3aeg").is_err());
        assert!(validate_hex_color("").is_err());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Alice@Example.COM "), "alice@example.com");
        assert_eq!(normalize_email("b@x.com"), "b@x.com");
    }
}

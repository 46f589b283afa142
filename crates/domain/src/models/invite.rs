//! Invite token rules.
//!
//! Membership is invite-only: every account after the first needs an
//! invite token addressed to its email.

/// Length of generated invite tokens.
pub const INVITE_TOKEN_LENGTH: usize = 32;

/// Days until a fresh invite expires.
pub const INVITE_EXPIRY_DAYS: i64 = 7;

/// Generates an unguessable invite token.
///
/// The charset omits easily confused characters (0/O, 1/l/I) since tokens
/// end up in invite links people copy by hand.
pub fn generate_invite_token() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghjkmnpqrstuvwxyz23456789";
    let mut rng = rand::thread_rng();

    (0..INVITE_TOKEN_LENGTH)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_invite_token_length() {
        assert_eq!(generate_invite_token().len(), INVITE_TOKEN_LENGTH);
    }

    #[test]
    fn test_generate_invite_token_unique() {
        assert_ne!(generate_invite_token(), generate_invite_token());
    }

    #[test]
    fn test_generate_invite_token_charset() {
        let token = generate_invite_token();
        for confusing in ['0', 'O', '1', 'l', 'I'] {
            assert!(!token.contains(confusing));
        }
    }
}

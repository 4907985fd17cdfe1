//! Store key generation.
//!
//! All keys carry a fixed prefix to avoid collisions with other users of
//! the same Redis instance.

const KEY_PREFIX: &str = "membergate";

/// Key for a member's refresh-token record.
///
/// The member id is the single lookup key end-to-end; no secondary
/// indirection is kept in the store.
pub fn refresh_token(member_id: i64) -> String {
    format!("{}:refresh:{}", KEY_PREFIX, member_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_token_key_shape() {
        assert_eq!(refresh_token(42), "membergate:refresh:42");
    }
}

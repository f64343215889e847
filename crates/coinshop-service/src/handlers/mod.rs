//! API handlers.

pub mod auth;
pub mod buy;
pub mod health;
pub mod info;
pub mod send_coin;

/// Usernames are 1-64 characters of `[A-Za-z0-9_-]`.
pub(crate) fn valid_username(username: &str) -> bool {
    !username.is_empty()
        && username.len() <= 64
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::valid_username;

    #[test]
    fn username_validation() {
        assert!(valid_username("alice"));
        assert!(valid_username("user_42-x"));
        assert!(!valid_username(""));
        assert!(!valid_username("with space"));
        assert!(!valid_username("émile"));
        assert!(!valid_username(&"a".repeat(65)));
    }
}

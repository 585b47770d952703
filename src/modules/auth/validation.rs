use lazy_static::lazy_static;
use regex::Regex;

use crate::MIN_PASSWORD_LEN;

lazy_static! {
    // local@domain.tld, no whitespace anywhere
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
        .expect("email pattern is valid");
}

/// Helper function to validate email format
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Check the registration password rule (minimum length only; passwords are
/// stored as entered).
pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        // Valid emails
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("user.name@example.co.uk"));
        assert!(is_valid_email("user+tag@example.com"));
        assert!(is_valid_email("a@b.c"));

        // Invalid emails
        assert!(!is_valid_email("a@b")); // Missing TLD
        assert!(!is_valid_email("a b@c.com")); // Contains space
        assert!(!is_valid_email("user")); // No @ symbol
        assert!(!is_valid_email("")); // Empty string
        assert!(!is_valid_email("user@@example.com")); // Multiple @ symbols
        assert!(!is_valid_email("user@example com")); // Space in domain
    }

    #[test]
    fn test_password_validation() {
        assert!(is_valid_password("secret1"));
        assert!(is_valid_password("123456"));
        assert!(!is_valid_password("12345"));
        assert!(!is_valid_password(""));
        // Length is counted in characters, not bytes
        assert!(is_valid_password("paßwör"));
    }
}

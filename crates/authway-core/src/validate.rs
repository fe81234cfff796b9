//! Client-side input validation.
//!
//! These checks run before a request is built; a failure short-circuits
//! the call with a `validation_failed` error and never touches the wire.

/// Validate an email address, returning a message when invalid.
///
/// Deliberately loose: one `@`, non-empty local and domain parts, a dot in
/// the domain with something on both sides, no whitespace. The server is
/// the final authority.
pub fn validate_email(email: &str) -> Option<String> {
    let email = email.trim();
    if email.is_empty() {
        return Some("Email is required".to_string());
    }
    if email.chars().any(|c| c.is_whitespace()) {
        return Some("Email must not contain whitespace".to_string());
    }
    let mut parts = email.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return Some("Not a valid email address".to_string()),
    };
    if local.is_empty() || domain.is_empty() {
        return Some("Not a valid email address".to_string());
    }
    match domain.rsplit_once('.') {
        Some((name, tld)) if !name.is_empty() && !tld.is_empty() => None,
        _ => Some("Not a valid email address".to_string()),
    }
}

/// Minimum password length accepted at sign-up
const MIN_PASSWORD_LENGTH: usize = 8;

/// Validate a password for sign-up, returning a message when invalid
pub fn validate_password(password: &str) -> Option<String> {
    if password.is_empty() {
        return Some("Password is required".to_string());
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Some(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        ));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email_accepts_valid() {
        assert_eq!(validate_email("a@b.co"), None);
        assert_eq!(validate_email("user@example.com"), None);
        assert_eq!(validate_email("first.last@sub.example.org"), None);
    }

    #[test]
    fn test_validate_email_rejects_invalid() {
        assert!(validate_email("not-an-email").is_some());
        assert!(validate_email("").is_some());
        assert!(validate_email("@example.com").is_some());
        assert!(validate_email("user@").is_some());
        assert!(validate_email("user@nodot").is_some());
        assert!(validate_email("user@.com").is_some());
        assert!(validate_email("user@domain.").is_some());
        assert!(validate_email("two@@example.com").is_some());
        assert!(validate_email("has space@example.com").is_some());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("").is_some());
        assert!(validate_password("short").is_some());
        assert_eq!(validate_password("password123"), None);
    }
}

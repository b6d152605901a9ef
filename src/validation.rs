//! Input checks shared by the API handlers and the client forms.
//!
//! The password rule is the frontend's complexity rule: at least 8 characters
//! with one digit, one lowercase and one uppercase letter. The `regex` crate has
//! no look-around, so each lookahead of `(?=.*\d)(?=.*[a-z])(?=.*[A-Z]).{8,}`
//! is its own pattern.
//!
//! That pattern is unanchored and its `.` stops at line terminators, so it is
//! satisfied when any single line of the password meets every condition. The
//! check below splits on the same terminators to keep that behavior.

use lazy_static::lazy_static;
use regex::Regex;

pub const PASSWORD_REQUIREMENTS: &str = "Password must be at least 8 characters long, include at least one uppercase letter, one lowercase letter, and one number.";

const PASSWORD_MIN_CHARS: usize = 8;

const LINE_TERMINATORS: [char; 4] = ['\n', '\r', '\u{2028}', '\u{2029}'];

lazy_static! {
    static ref HAS_DIGIT: Regex = Regex::new(r"[0-9]").expect("valid digit regex");
    static ref HAS_LOWER: Regex = Regex::new(r"[a-z]").expect("valid lowercase regex");
    static ref HAS_UPPER: Regex = Regex::new(r"[A-Z]").expect("valid uppercase regex");
    static ref EMAIL: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex");
}

pub fn is_strong_password(password: &str) -> bool {
    password.split(LINE_TERMINATORS).any(|line| {
        line.chars().count() >= PASSWORD_MIN_CHARS
            && HAS_DIGIT.is_match(line)
            && HAS_LOWER.is_match(line)
            && HAS_UPPER.is_match(line)
    })
}

pub fn validate_password(password: &str) -> Result<(), String> {
    if is_strong_password(password) {
        Ok(())
    } else {
        Err(PASSWORD_REQUIREMENTS.to_string())
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email.trim())
}

/// Rejects an absent or whitespace-only field, naming it in the message.
pub fn require<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(format!("{} is required", field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_complexity() {
        assert!(!is_strong_password("abcdefg"));
        assert!(is_strong_password("Abcdef12"));
    }

    #[test]
    fn test_password_needs_each_class() {
        assert!(!is_strong_password("abcdefg1")); // no uppercase
        assert!(!is_strong_password("ABCDEFG1")); // no lowercase
        assert!(!is_strong_password("Abcdefgh")); // no digit
        assert!(!is_strong_password("Abcde1")); // too short
    }

    #[test]
    fn test_password_line_breaks_split_the_match() {
        // No single line holds all three classes and 8 characters
        assert!(!is_strong_password("Abc\nd1efgh"));
        assert!(!is_strong_password("Abcd\r\nef12"));
        assert!(!is_strong_password("Abcdef\u{2028}12"));
        // One qualifying line is enough
        assert!(is_strong_password("x\nAbcdef12"));
        assert!(is_strong_password("Abcdef12\r\n"));
    }

    #[test]
    fn test_validate_password_message() {
        assert_eq!(validate_password("short").unwrap_err(), PASSWORD_REQUIREMENTS);
        assert!(validate_password("Sup3rSecret").is_ok());
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email(" ada@example.com "));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("ada example.com"));
    }

    #[test]
    fn test_require() {
        assert_eq!(require(Some("Ada"), "Name").unwrap(), "Ada");
        assert_eq!(require(Some("   "), "Name").unwrap_err(), "Name is required");
        assert_eq!(require(None, "Email").unwrap_err(), "Email is required");
    }
}

//! Field validation helpers.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Password length bounds, inclusive.
pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 100;

/// Minimum number of digits for a phone number.
pub const PHONE_MIN_DIGITS: usize = 10;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

/// Syntactic email check: something@something.tld, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Strips everything but ASCII digits.
pub fn normalize_phone_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Live password-requirement checklist.
///
/// A pure function of the current password string, recomputed on every read
/// rather than cached; the view renders one checkbox per flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordRequirements {
    /// 8-100 characters.
    pub length: bool,
    /// Upper and lower case letters.
    pub case: bool,
    /// At least one number or special character.
    pub special: bool,
}

impl PasswordRequirements {
    pub fn all_met(&self) -> bool {
        self.length && self.case && self.special
    }
}

pub fn password_requirements(password: &str) -> PasswordRequirements {
    let len = password.chars().count();
    PasswordRequirements {
        length: (PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&len),
        case: password.chars().any(|c| c.is_ascii_lowercase())
            && password.chars().any(|c| c.is_ascii_uppercase()),
        special: password.chars().any(|c| c.is_ascii_digit())
            || password.chars().any(|c| !c.is_ascii_alphanumeric()),
    }
}

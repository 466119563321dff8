use super::{FieldKind, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_PHONE_DIGITS: usize = 7;
pub const MAX_PHONE_DIGITS: usize = 15;

/// Separators people type inside phone numbers; dropped during normalization.
const PHONE_PUNCTUATION: &[char] = &['-', '(', ')', '.', '/'];

/// A normalized phone number: an optional leading `+` followed by digits.
///
/// Deserializing runs [`validate_phone`], so a stored value cannot bypass it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Phone(String);

impl Phone {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The number without its `+` prefix.
    pub fn digits(&self) -> &str {
        self.0.trim_start_matches('+')
    }
}

impl TryFrom<String> for Phone {
    type Error = ValidationError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        validate_phone(&raw)
    }
}

impl From<Phone> for String {
    fn from(phone: Phone) -> Self {
        phone.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validates and normalizes a phone number.
///
/// Whitespace and common separators are stripped, a single leading `+` is
/// kept, and the remaining digit count must lie within
/// [`MIN_PHONE_DIGITS`]..=[`MAX_PHONE_DIGITS`].
///
/// ```
/// use bot_helper::fields::validate_phone;
///
/// assert_eq!(validate_phone("+38 (050) 123-45-67").unwrap().as_str(), "+380501234567");
/// assert!(validate_phone("12345").is_err());
/// assert!(validate_phone("call me").is_err());
/// ```
pub fn validate_phone(raw: &str) -> Result<Phone, ValidationError> {
    let reject = |reason: String| ValidationError::new(FieldKind::Phone, reason);

    let mut normalized = String::with_capacity(raw.len());
    let mut digits = 0usize;

    for ch in raw.trim().chars() {
        match ch {
            '0'..='9' => {
                normalized.push(ch);
                digits += 1;
            }
            '+' if normalized.is_empty() => normalized.push('+'),
            '+' => {
                return Err(reject(
                    "'+' is only allowed at the start of the number".to_string(),
                ))
            }
            c if c.is_whitespace() || PHONE_PUNCTUATION.contains(&c) => {}
            c => return Err(reject(format!("unexpected character '{}'", c))),
        }
    }

    if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits) {
        return Err(reject(format!(
            "'{}' has {} digits, expected between {} and {}",
            raw.trim(),
            digits,
            MIN_PHONE_DIGITS,
            MAX_PHONE_DIGITS
        )));
    }

    Ok(Phone(normalized))
}

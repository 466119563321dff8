use super::{FieldKind, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated email address. The domain part is stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Email {
    type Error = ValidationError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        validate_email(&raw)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validates the basic `local@domain.tld` shape.
///
/// This is deliberately not RFC 5322: it requires exactly one `@`, a
/// non-empty local part and a dotted domain without empty labels.
pub fn validate_email(raw: &str) -> Result<Email, ValidationError> {
    let reject = |reason: &str| ValidationError::new(FieldKind::Email, reason);
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(reject("email cannot be empty"));
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(reject("email cannot contain whitespace"));
    }
    if trimmed.matches('@').count() != 1 {
        return Err(reject("email must contain exactly one '@'"));
    }

    let Some((local, domain)) = trimmed.split_once('@') else {
        return Err(reject("email must contain exactly one '@'"));
    };

    if local.is_empty() {
        return Err(reject("the part before '@' cannot be empty"));
    }
    if !domain.contains('.') {
        return Err(reject("the domain must contain a '.'"));
    }
    if domain.split('.').any(str::is_empty) {
        return Err(reject("the domain cannot start, end or repeat a '.'"));
    }

    Ok(Email(format!("{}@{}", local, domain.to_lowercase())))
}

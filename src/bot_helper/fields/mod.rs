//! Field validators.
//!
//! Every user-supplied value passes through one of these functions before it
//! reaches a [`Contact`](crate::model::Contact) or [`Note`](crate::model::Note).
//! Validators are pure: they either return the normalized value or a
//! [`ValidationError`] naming the field and the reason it was rejected.
//!
//! | Field    | Accepts                                          | Normalized to            |
//! |----------|--------------------------------------------------|--------------------------|
//! | name     | non-blank text that is not a number or UUID      | trimmed text             |
//! | phone    | 7–15 digits, punctuation, optional leading `+`   | `+` and digits only      |
//! | email    | `local@domain.tld`                               | domain lowercased        |
//! | birthday | `DD-MM-YYYY`, `DD/MM/YYYY`, `DD.MM.YYYY`, ISO    | calendar date            |
//! | address  | any non-blank text                               | trimmed text             |
//! | tag      | one word, optional leading `#`                   | lowercase, no `#`        |

mod birthday;
mod email;
mod phone;
mod tag;
mod text;

use std::fmt;
use thiserror::Error;

pub use birthday::{validate_birthday, validate_birthday_today, Birthday, BIRTHDAY_FORMATS};
pub use email::{validate_email, Email};
pub use phone::{validate_phone, Phone, MAX_PHONE_DIGITS, MIN_PHONE_DIGITS};
pub use tag::{validate_tag, validate_tags, Tag};
pub use text::{validate_address, validate_name};

/// The field a rejected value was meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Name,
    Phone,
    Email,
    Birthday,
    Address,
    Tag,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Name => "name",
            FieldKind::Phone => "phone",
            FieldKind::Email => "email",
            FieldKind::Birthday => "birthday",
            FieldKind::Address => "address",
            FieldKind::Tag => "tag",
        };
        f.write_str(name)
    }
}

/// A rejected field value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: FieldKind,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: FieldKind, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

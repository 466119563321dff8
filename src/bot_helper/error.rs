use crate::fields::ValidationError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which collection a missing record was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Contact,
    Note,
    Phone,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Contact => write!(f, "Contact"),
            RecordKind::Note => write!(f, "Note"),
            RecordKind::Phone => write!(f, "Phone"),
        }
    }
}

#[derive(Error, Debug)]
pub enum BotError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("A contact named '{0}' already exists")]
    DuplicateName(String),

    #[error("{kind} not found: {key}")]
    NotFound { kind: RecordKind, key: String },

    #[error("Could not access {}: {reason}", path.display())]
    Persistence { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Api Error: {0}")]
    Api(String),
}

impl BotError {
    pub fn not_found(kind: RecordKind, key: impl fmt::Display) -> Self {
        BotError::NotFound {
            kind,
            key: key.to_string(),
        }
    }

    pub fn persistence(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        BotError::Persistence {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BotError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldKind;

    #[test]
    fn not_found_names_the_record_kind() {
        let err = BotError::not_found(RecordKind::Contact, "Anna");
        assert_eq!(err.to_string(), "Contact not found: Anna");
    }

    #[test]
    fn validation_errors_render_their_reason() {
        let err: BotError = ValidationError::new(FieldKind::Email, "missing '@'").into();
        assert_eq!(err.to_string(), "Invalid email: missing '@'");
    }

    #[test]
    fn persistence_errors_show_the_path() {
        let err = BotError::persistence("/tmp/contacts.json", "permission denied");
        assert_eq!(
            err.to_string(),
            "Could not access /tmp/contacts.json: permission denied"
        );
    }
}

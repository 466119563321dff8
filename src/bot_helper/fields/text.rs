use super::{FieldKind, ValidationError};
use uuid::Uuid;

/// A contact name: any text that is not blank once trimmed.
///
/// Names that read as a list number or an id are rejected, since a selector
/// would never reach them by name.
pub fn validate_name(raw: &str) -> Result<String, ValidationError> {
    let name = non_blank(raw, FieldKind::Name)?;
    if name.parse::<usize>().is_ok() {
        return Err(ValidationError::new(
            FieldKind::Name,
            format!("'{}' looks like a list number", name),
        ));
    }
    if Uuid::parse_str(&name).is_ok() {
        return Err(ValidationError::new(
            FieldKind::Name,
            format!("'{}' looks like an id", name),
        ));
    }
    Ok(name)
}

/// A free-text postal address. Clearing an address is a separate operation,
/// so a blank value is rejected rather than stored.
pub fn validate_address(raw: &str) -> Result<String, ValidationError> {
    non_blank(raw, FieldKind::Address)
}

fn non_blank(raw: &str, field: FieldKind) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(
            field,
            format!("{} cannot be empty", field),
        ));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_names() {
        assert_eq!(validate_name("  Anna Kovalenko ").unwrap(), "Anna Kovalenko");
    }

    #[test]
    fn rejects_names_that_select_by_number_or_id() {
        assert!(validate_name("2024").is_err());
        assert!(validate_name(" +5 ").is_err());
        assert!(validate_name(&Uuid::new_v4().to_string()).is_err());
        assert_eq!(validate_name("Agent 007").unwrap(), "Agent 007");
    }

    #[test]
    fn rejects_blank_values() {
        let err = validate_name(" \t").unwrap_err();
        assert_eq!(err.to_string(), "Invalid name: name cannot be empty");
        assert!(validate_address("").is_err());
    }
}

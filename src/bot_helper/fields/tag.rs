use super::{FieldKind, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A normalized note tag: lowercase, no leading `#`, a single word.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tag(String);

impl Tag {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Tag {
    type Error = ValidationError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        validate_tag(&raw)
    }
}

impl From<Tag> for String {
    fn from(tag: Tag) -> Self {
        tag.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalizes a tag.
///
/// ```
/// use bot_helper::fields::validate_tag;
///
/// assert_eq!(validate_tag("#Work").unwrap().as_str(), "work");
/// assert_eq!(validate_tag("tag_1+").unwrap().as_str(), "tag_1+");
/// assert!(validate_tag("two words").is_err());
/// assert!(validate_tag("#").is_err());
/// ```
pub fn validate_tag(raw: &str) -> Result<Tag, ValidationError> {
    let trimmed = raw.trim();
    let bare = trimmed.strip_prefix('#').unwrap_or(trimmed);

    if bare.is_empty() {
        return Err(ValidationError::new(FieldKind::Tag, "tag cannot be empty"));
    }
    if let Some(ch) = bare.chars().find(|c| c.is_whitespace() || *c == ',') {
        return Err(ValidationError::new(
            FieldKind::Tag,
            format!("'{}' contains '{}', tags must be a single word", bare, ch.escape_default()),
        ));
    }

    Ok(Tag(bare.to_lowercase()))
}

/// Normalizes every tag, collapsing duplicates. Fails on the first bad tag.
pub fn validate_tags<I, S>(raws: I) -> Result<BTreeSet<Tag>, ValidationError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raws.into_iter().map(|raw| validate_tag(raw.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_hash() {
        assert_eq!(validate_tag("URGENT").unwrap().as_str(), "urgent");
        assert_eq!(validate_tag("  #Home ").unwrap().as_str(), "home");
    }

    #[test]
    fn rejects_empty_and_multi_word() {
        assert!(validate_tag("").is_err());
        assert!(validate_tag("   ").is_err());
        assert!(validate_tag("a b").is_err());
        assert!(validate_tag("a,b").is_err());
    }

    #[test]
    fn collapses_duplicates_after_normalization() {
        let tags = validate_tags(["Work", "#work", "urgent"]).unwrap();
        let names: Vec<_> = tags.iter().map(Tag::as_str).collect();
        assert_eq!(names, vec!["urgent", "work"]);
    }

    #[test]
    fn stored_tags_are_renormalized() {
        let tag: Tag = serde_json::from_str("\"#Work\"").unwrap();
        assert_eq!(tag.as_str(), "work");
        assert!(serde_json::from_str::<Tag>("\"two words\"").is_err());
    }

    #[test]
    fn one_bad_tag_rejects_the_set() {
        let err = validate_tags(["ok", ""]).unwrap_err();
        assert_eq!(err.field, FieldKind::Tag);
    }
}

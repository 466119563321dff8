//! Record types.
//!
//! A [`Contact`] and a [`Note`] are plain values: fields are private and can
//! only be set through the validators in [`crate::fields`], either while the
//! record is being built or later through [`crate::book`], which is the only
//! place records are mutated after they have been stored.

use crate::fields::{
    validate_address, validate_birthday, validate_email, validate_name, validate_phone,
    validate_tags, Birthday, Email, Phone, Tag, ValidationError,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// An address book entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    id: Uuid,
    name: String,
    phones: Vec<Phone>,
    birthday: Option<Birthday>,
    email: Option<Email>,
    address: Option<String>,
}

impl Contact {
    /// Creates a contact with only a name. Everything else starts empty.
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            id: Uuid::new_v4(),
            name: validate_name(name)?,
            phones: Vec::new(),
            birthday: None,
            email: None,
            address: None,
        })
    }

    pub fn with_phone(mut self, raw: &str) -> Result<Self, ValidationError> {
        let phone = validate_phone(raw)?;
        self.insert_phone(phone);
        Ok(self)
    }

    pub fn with_birthday(mut self, raw: &str, today: NaiveDate) -> Result<Self, ValidationError> {
        self.birthday = Some(validate_birthday(raw, today)?);
        Ok(self)
    }

    pub fn with_email(mut self, raw: &str) -> Result<Self, ValidationError> {
        self.email = Some(validate_email(raw)?);
        Ok(self)
    }

    pub fn with_address(mut self, raw: &str) -> Result<Self, ValidationError> {
        self.address = Some(validate_address(raw)?);
        Ok(self)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phones(&self) -> &[Phone] {
        &self.phones
    }

    pub fn birthday(&self) -> Option<&Birthday> {
        self.birthday.as_ref()
    }

    pub fn email(&self) -> Option<&Email> {
        self.email.as_ref()
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn has_phone(&self, phone: &Phone) -> bool {
        self.phones.contains(phone)
    }

    /// Days until the next birthday, or `None` when no birthday is known.
    pub fn days_to_birthday(&self, today: NaiveDate) -> Option<i64> {
        self.birthday.map(|b| b.days_until(today))
    }

    pub(crate) fn name_matches(&self, other: &str) -> bool {
        self.name.to_lowercase() == other.trim().to_lowercase()
    }

    pub(crate) fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    /// Adds a phone unless it is already present. Returns whether it was added.
    pub(crate) fn insert_phone(&mut self, phone: Phone) -> bool {
        if self.has_phone(&phone) {
            return false;
        }
        self.phones.push(phone);
        true
    }

    pub(crate) fn remove_phone(&mut self, phone: &Phone) -> bool {
        let before = self.phones.len();
        self.phones.retain(|p| p != phone);
        self.phones.len() != before
    }

    /// Swaps `old` for `new` in place, keeping the phone's position.
    /// If `new` is already present elsewhere, `old` is simply dropped.
    pub(crate) fn replace_phone(&mut self, old: &Phone, new: Phone) -> bool {
        let Some(pos) = self.phones.iter().position(|p| p == old) else {
            return false;
        };
        if *old != new && self.has_phone(&new) {
            self.phones.remove(pos);
        } else {
            self.phones[pos] = new;
        }
        true
    }

    pub(crate) fn set_birthday(&mut self, birthday: Option<Birthday>) {
        self.birthday = birthday;
    }

    pub(crate) fn set_email(&mut self, email: Option<Email>) {
        self.email = email;
    }

    pub(crate) fn set_address(&mut self, address: Option<String>) {
        self.address = address;
    }
}

/// A note book entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    id: Uuid,
    text: String,
    tags: BTreeSet<Tag>,
    created_at: DateTime<Utc>,
    // Position in creation order, assigned by the note book.
    #[serde(default)]
    seq: u64,
}

impl Note {
    /// Creates a note. The text may be empty; every tag must normalize.
    pub fn new<I, S>(text: impl Into<String>, tags: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            id: Uuid::new_v4(),
            text: text.into(),
            tags: validate_tags(tags)?,
            created_at: Utc::now(),
            seq: 0,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }

    /// The lexicographically smallest tag, used as the tag sort key.
    pub fn first_tag(&self) -> Option<&Tag> {
        self.tags.iter().next()
    }

    pub(crate) fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    pub(crate) fn set_seq(&mut self, seq: u64) {
        self.seq = seq;
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.text = text;
    }

    pub(crate) fn set_tags(&mut self, tags: BTreeSet<Tag>) {
        self.tags = tags;
    }
}

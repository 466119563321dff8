//! # Collection Store
//!
//! [`Book`] holds the two record collections, [`AddressBook`] and
//! [`NoteBook`], and is the only place stored records change.
//!
//! Both collections keep records in insertion order (`list_all` is the stable
//! baseline every listing, search and sort starts from). They are small and
//! scanned linearly; there is no secondary index to keep in sync.
//!
//! Every mutation validates its input first and touches the record only once
//! validation has passed, so a rejected update leaves the store exactly as it
//! was.

use crate::error::{BotError, RecordKind, Result};
use crate::fields::{
    validate_address, validate_birthday, validate_email, validate_name, validate_phone,
    validate_tags,
};
use crate::model::{Contact, Note};
use crate::selector::Selector;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Both collections, as loaded from and saved to a [`DataStore`](crate::store::DataStore).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Book {
    pub contacts: AddressBook,
    pub notes: NoteBook,
}

impl Book {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A single field change on a contact. Raw values are validated by
/// [`AddressBook::update`] before anything is modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactChange {
    Rename(String),
    AddPhone(String),
    RemovePhone(String),
    ReplacePhone { old: String, new: String },
    SetBirthday(String),
    ClearBirthday,
    SetEmail(String),
    ClearEmail,
    SetAddress(String),
    ClearAddress,
}

/// Contacts, unique by case-insensitive name.
///
/// Stored as a plain list. Loading re-checks names and ids, so a hand-edited
/// file cannot smuggle in a duplicate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Contact>", into = "Vec<Contact>")]
pub struct AddressBook {
    contacts: Vec<Contact>,
}

impl TryFrom<Vec<Contact>> for AddressBook {
    type Error = String;

    fn try_from(contacts: Vec<Contact>) -> std::result::Result<Self, Self::Error> {
        let mut book = AddressBook::new();
        for contact in contacts {
            validate_name(contact.name()).map_err(|e| e.to_string())?;
            if book.find_by_name(contact.name()).is_some() {
                return Err(format!("duplicate contact name '{}'", contact.name()));
            }
            if book.contacts.iter().any(|c| c.id() == contact.id()) {
                return Err(format!("duplicate contact id {}", contact.id()));
            }
            book.contacts.push(contact);
        }
        Ok(book)
    }
}

impl From<AddressBook> for Vec<Contact> {
    fn from(book: AddressBook) -> Self {
        book.contacts
    }
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Stores a contact under a fresh id and returns that id.
    pub fn add(&mut self, mut contact: Contact) -> Result<Uuid> {
        if self.find_by_name(contact.name()).is_some() {
            return Err(BotError::DuplicateName(contact.name().to_string()));
        }
        let id = Uuid::new_v4();
        contact.set_id(id);
        self.contacts.push(contact);
        Ok(id)
    }

    pub fn get(&self, id: Uuid) -> Result<&Contact> {
        self.contacts
            .iter()
            .find(|c| c.id() == id)
            .ok_or_else(|| BotError::not_found(RecordKind::Contact, id))
    }

    /// Case-insensitive exact name lookup.
    pub fn find_by_name(&self, name: &str) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.name_matches(name))
    }

    pub fn resolve(&self, selector: &Selector) -> Result<Uuid> {
        let found = match selector {
            Selector::Id(id) => self.contacts.iter().find(|c| c.id() == *id),
            Selector::Index(n) => n.checked_sub(1).and_then(|i| self.contacts.get(i)),
            Selector::Name(name) => self.find_by_name(name),
        };
        found
            .map(Contact::id)
            .ok_or_else(|| BotError::not_found(RecordKind::Contact, selector))
    }

    /// Applies `change` using the local date to validate birthdays.
    pub fn update(&mut self, id: Uuid, change: ContactChange) -> Result<&Contact> {
        self.update_on(id, change, Local::now().date_naive())
    }

    /// Applies `change`, validating birthdays against `today`.
    pub fn update_on(
        &mut self,
        id: Uuid,
        change: ContactChange,
        today: NaiveDate,
    ) -> Result<&Contact> {
        let index = self.position(id)?;

        match change {
            ContactChange::Rename(raw) => {
                let name = validate_name(&raw)?;
                if self
                    .contacts
                    .iter()
                    .any(|c| c.id() != id && c.name_matches(&name))
                {
                    return Err(BotError::DuplicateName(name));
                }
                self.contacts[index].set_name(name);
            }
            ContactChange::AddPhone(raw) => {
                let phone = validate_phone(&raw)?;
                self.contacts[index].insert_phone(phone);
            }
            ContactChange::RemovePhone(raw) => {
                let phone = validate_phone(&raw)?;
                if !self.contacts[index].remove_phone(&phone) {
                    return Err(BotError::not_found(RecordKind::Phone, phone));
                }
            }
            ContactChange::ReplacePhone { old, new } => {
                let old = validate_phone(&old)?;
                let new = validate_phone(&new)?;
                if !self.contacts[index].replace_phone(&old, new) {
                    return Err(BotError::not_found(RecordKind::Phone, old));
                }
            }
            ContactChange::SetBirthday(raw) => {
                let birthday = validate_birthday(&raw, today)?;
                self.contacts[index].set_birthday(Some(birthday));
            }
            ContactChange::ClearBirthday => self.contacts[index].set_birthday(None),
            ContactChange::SetEmail(raw) => {
                let email = validate_email(&raw)?;
                self.contacts[index].set_email(Some(email));
            }
            ContactChange::ClearEmail => self.contacts[index].set_email(None),
            ContactChange::SetAddress(raw) => {
                let address = validate_address(&raw)?;
                self.contacts[index].set_address(Some(address));
            }
            ContactChange::ClearAddress => self.contacts[index].set_address(None),
        }

        Ok(&self.contacts[index])
    }

    /// Removes a contact permanently and returns it.
    pub fn delete(&mut self, id: Uuid) -> Result<Contact> {
        let index = self.position(id)?;
        Ok(self.contacts.remove(index))
    }

    /// All contacts in insertion order.
    pub fn list_all(&self) -> &[Contact] {
        &self.contacts
    }

    fn position(&self, id: Uuid) -> Result<usize> {
        self.contacts
            .iter()
            .position(|c| c.id() == id)
            .ok_or_else(|| BotError::not_found(RecordKind::Contact, id))
    }
}

/// A single change on a note. Tags are normalized before anything is modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteChange {
    SetText(String),
    AddTags(Vec<String>),
    RemoveTags(Vec<String>),
    ReplaceTags(Vec<String>),
}

/// Notes in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteBook {
    notes: Vec<Note>,
    #[serde(default)]
    next_seq: u64,
}

impl NoteBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Stores a note under a fresh id and the next creation sequence number.
    pub fn add(&mut self, mut note: Note) -> Uuid {
        let id = Uuid::new_v4();
        note.set_id(id);
        note.set_seq(self.next_seq);
        self.next_seq += 1;
        self.notes.push(note);
        id
    }

    pub fn get(&self, id: Uuid) -> Result<&Note> {
        self.notes
            .iter()
            .find(|n| n.id() == id)
            .ok_or_else(|| BotError::not_found(RecordKind::Note, id))
    }

    pub fn resolve(&self, selector: &Selector) -> Result<Uuid> {
        let found = match selector {
            Selector::Id(id) => self.notes.iter().find(|n| n.id() == *id),
            Selector::Index(n) => n.checked_sub(1).and_then(|i| self.notes.get(i)),
            Selector::Name(name) => {
                return Err(BotError::Api(format!(
                    "Notes are selected by id or list number, not by text ({})",
                    name
                )))
            }
        };
        found
            .map(Note::id)
            .ok_or_else(|| BotError::not_found(RecordKind::Note, selector))
    }

    pub fn update(&mut self, id: Uuid, change: NoteChange) -> Result<&Note> {
        let index = self.position(id)?;
        let note = &mut self.notes[index];

        match change {
            NoteChange::SetText(text) => note.set_text(text),
            NoteChange::AddTags(raw) => {
                let mut tags = note.tags().clone();
                tags.extend(validate_tags(raw)?);
                note.set_tags(tags);
            }
            NoteChange::RemoveTags(raw) => {
                let drop = validate_tags(raw)?;
                let tags = note.tags().difference(&drop).cloned().collect();
                note.set_tags(tags);
            }
            NoteChange::ReplaceTags(raw) => note.set_tags(validate_tags(raw)?),
        }

        Ok(&self.notes[index])
    }

    /// Removes a note permanently and returns it.
    pub fn delete(&mut self, id: Uuid) -> Result<Note> {
        let index = self.position(id)?;
        Ok(self.notes.remove(index))
    }

    /// All notes in insertion order.
    pub fn list_all(&self) -> &[Note] {
        &self.notes
    }

    /// Moves the sequence counter past every stored note. Files written
    /// before the counter was persisted load with it at zero.
    pub(crate) fn restore_seq(&mut self) {
        let past_last = self.notes.iter().map(|n| n.seq() + 1).max().unwrap_or(0);
        self.next_seq = self.next_seq.max(past_last);
    }

    fn position(&self, id: Uuid) -> Result<usize> {
        self.notes
            .iter()
            .position(|n| n.id() == id)
            .ok_or_else(|| BotError::not_found(RecordKind::Note, id))
    }
}

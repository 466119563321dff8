use crate::book::{AddressBook, NoteBook};
use crate::commands::{DisplayContact, DisplayNote};
use crate::error::Result;
use crate::model::{Contact, Note};
use crate::selector::Selector;
use std::collections::HashSet;
use uuid::Uuid;

/// 1-based position of a contact in `list_all`.
pub fn contact_index(book: &AddressBook, id: Uuid) -> usize {
    book.list_all()
        .iter()
        .position(|c| c.id() == id)
        .map_or(0, |i| i + 1)
}

pub fn note_index(book: &NoteBook, id: Uuid) -> usize {
    book.list_all()
        .iter()
        .position(|n| n.id() == id)
        .map_or(0, |i| i + 1)
}

pub fn display_contact(book: &AddressBook, contact: &Contact) -> DisplayContact {
    DisplayContact {
        index: contact_index(book, contact.id()),
        contact: contact.clone(),
        matched: Vec::new(),
    }
}

pub fn display_note(book: &NoteBook, note: &Note) -> DisplayNote {
    DisplayNote {
        index: note_index(book, note.id()),
        note: note.clone(),
        matched_tags: Vec::new(),
    }
}

/// Resolves every selector before anything is touched. Selectors naming the
/// same record (`1 anna`, an id plus its index) yield it once.
pub fn contacts_by_selectors(
    book: &AddressBook,
    selectors: &[Selector],
) -> Result<Vec<DisplayContact>> {
    let mut seen = HashSet::new();
    let mut targets = Vec::new();
    for selector in selectors {
        let id = book.resolve(selector)?;
        if seen.insert(id) {
            targets.push(display_contact(book, book.get(id)?));
        }
    }
    Ok(targets)
}

pub fn notes_by_selectors(book: &NoteBook, selectors: &[Selector]) -> Result<Vec<DisplayNote>> {
    let mut seen = HashSet::new();
    let mut targets = Vec::new();
    for selector in selectors {
        let id = book.resolve(selector)?;
        if seen.insert(id) {
            targets.push(display_note(book, book.get(id)?));
        }
    }
    Ok(targets)
}

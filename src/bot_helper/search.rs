//! # Search Engine
//!
//! Case-insensitive substring search over the current contents of a
//! collection. There is no index: each call scans `list_all()`, so results
//! always reflect the latest mutation.
//!
//! Contacts are ranked by how many fields matched, then by name. Notes are
//! filtered by text and/or tags (both must hold when both are given) and
//! ranked by how many of the requested tags they carry.

use crate::book::{AddressBook, NoteBook};
use crate::fields::{validate_tags, Tag, ValidationError};
use crate::model::{Contact, Note};
use std::collections::BTreeSet;

/// A contact field that can match a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Name,
    Phone,
    Email,
    Address,
}

#[derive(Debug, Clone)]
pub struct ContactHit<'a> {
    pub contact: &'a Contact,
    pub matched: Vec<ContactField>,
}

impl ContactHit<'_> {
    pub fn score(&self) -> usize {
        self.matched.len()
    }
}

/// Searches contacts by name, phone, email and address.
///
/// An empty query returns every contact. When the query looks like a phone
/// number (digits plus phone punctuation), phones are compared digit by digit
/// so `050-123` finds `0501234567`.
pub fn search_contacts<'a>(book: &'a AddressBook, query: &str) -> Vec<ContactHit<'a>> {
    let needle = query.trim().to_lowercase();
    let phone_digits = phone_query_digits(&needle);

    let mut hits: Vec<ContactHit<'a>> = book
        .list_all()
        .iter()
        .filter_map(|contact| {
            if needle.is_empty() {
                return Some(ContactHit {
                    contact,
                    matched: Vec::new(),
                });
            }
            let matched = matched_fields(contact, &needle, phone_digits.as_deref());
            if matched.is_empty() {
                None
            } else {
                Some(ContactHit { contact, matched })
            }
        })
        .collect();

    hits.sort_by(|a, b| {
        b.score().cmp(&a.score()).then_with(|| {
            a.contact
                .name()
                .to_lowercase()
                .cmp(&b.contact.name().to_lowercase())
        })
    });
    hits
}

fn matched_fields(contact: &Contact, needle: &str, phone_digits: Option<&str>) -> Vec<ContactField> {
    let mut matched = Vec::new();

    if contact.name().to_lowercase().contains(needle) {
        matched.push(ContactField::Name);
    }

    let phone_hit = contact.phones().iter().any(|phone| match phone_digits {
        Some(digits) => phone.digits().contains(digits),
        None => phone.as_str().contains(needle),
    });
    if phone_hit {
        matched.push(ContactField::Phone);
    }

    if contact
        .email()
        .is_some_and(|email| email.as_str().to_lowercase().contains(needle))
    {
        matched.push(ContactField::Email);
    }

    if contact
        .address()
        .is_some_and(|address| address.to_lowercase().contains(needle))
    {
        matched.push(ContactField::Address);
    }

    matched
}

/// The digits of a phone-shaped query, or `None` if the query has other
/// characters in it.
fn phone_query_digits(needle: &str) -> Option<String> {
    let phone_shaped = needle
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_whitespace() || "+-()./".contains(c));
    let digits: String = needle.chars().filter(char::is_ascii_digit).collect();
    if phone_shaped && !digits.is_empty() {
        Some(digits)
    } else {
        None
    }
}

/// What to look for in the note book.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteQuery {
    pub text: Option<String>,
    pub tags: BTreeSet<Tag>,
}

impl NoteQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.text = if text.trim().is_empty() {
            None
        } else {
            Some(text)
        };
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags.extend(validate_tags(tags)?);
        Ok(self)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.tags.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct NoteHit<'a> {
    pub note: &'a Note,
    /// Requested tags the note carries.
    pub matched_tags: Vec<&'a Tag>,
}

impl NoteHit<'_> {
    pub fn score(&self) -> usize {
        self.matched_tags.len()
    }
}

/// Searches notes by text and tags.
///
/// - text only: substring of the note body;
/// - tags only: the note carries at least one requested tag;
/// - both: both conditions must hold;
/// - neither: every note.
///
/// Results are ordered by the number of requested tags matched, then by
/// creation order.
pub fn search_notes<'a>(book: &'a NoteBook, query: &NoteQuery) -> Vec<NoteHit<'a>> {
    let needle = query.text.as_deref().map(|t| t.trim().to_lowercase());

    let mut hits: Vec<NoteHit<'a>> = book
        .list_all()
        .iter()
        .filter(|note| {
            needle
                .as_deref()
                .map_or(true, |needle| note.text().to_lowercase().contains(needle))
        })
        .filter_map(|note| {
            let matched_tags: Vec<&Tag> = note
                .tags()
                .iter()
                .filter(|tag| query.tags.contains(*tag))
                .collect();
            if !query.tags.is_empty() && matched_tags.is_empty() {
                return None;
            }
            Some(NoteHit { note, matched_tags })
        })
        .collect();

    hits.sort_by(|a, b| b.score().cmp(&a.score()));
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Contact, Note};

    fn address_book() -> AddressBook {
        let mut book = AddressBook::new();
        book.add(
            Contact::new("Anna Kovalenko")
                .unwrap()
                .with_phone("050 123 45 67")
                .unwrap()
                .with_email("anna@kyiv.example")
                .unwrap(),
        )
        .unwrap();
        book.add(
            Contact::new("Bohdan")
                .unwrap()
                .with_address("Kyiv, Podil")
                .unwrap(),
        )
        .unwrap();
        book.add(Contact::new("alex").unwrap().with_phone("+44 20 7946 0958").unwrap())
            .unwrap();
        book
    }

    fn names<'a>(hits: &[ContactHit<'a>]) -> Vec<&'a str> {
        hits.iter().map(|h| h.contact.name()).collect()
    }

    #[test]
    fn empty_query_returns_everyone_by_name() {
        let book = address_book();
        let hits = search_contacts(&book, "  ");
        assert_eq!(names(&hits), vec!["alex", "Anna Kovalenko", "Bohdan"]);
    }

    #[test]
    fn ranks_by_number_of_matched_fields() {
        let book = address_book();
        // Anna matches on email, Bohdan on address.
        let hits = search_contacts(&book, "KYIV");
        assert_eq!(names(&hits), vec!["Anna Kovalenko", "Bohdan"]);
        assert_eq!(hits[0].matched, vec![ContactField::Email]);

        // "an" hits Anna's name and email, Bohdan's name.
        let hits = search_contacts(&book, "an");
        assert_eq!(names(&hits), vec!["Anna Kovalenko", "Bohdan"]);
        assert_eq!(hits[0].score(), 2);
    }

    #[test]
    fn phone_queries_compare_digits() {
        let book = address_book();
        let hits = search_contacts(&book, "123-45");
        assert_eq!(names(&hits), vec!["Anna Kovalenko"]);
        assert_eq!(hits[0].matched, vec![ContactField::Phone]);

        let hits = search_contacts(&book, "+44");
        assert_eq!(names(&hits), vec!["alex"]);
    }

    #[test]
    fn no_match_is_empty_not_an_error() {
        let book = address_book();
        assert!(search_contacts(&book, "zzz").is_empty());
    }

    fn note_book() -> NoteBook {
        let mut book = NoteBook::new();
        book.add(Note::new("Quarterly report", ["work", "urgent"]).unwrap());
        book.add(Note::new("Buy milk", ["home"]).unwrap());
        book.add(Note::new("Report bug in kettle", ["home", "urgent"]).unwrap());
        book
    }

    fn texts<'a>(hits: &[NoteHit<'a>]) -> Vec<&'a str> {
        hits.iter().map(|h| h.note.text()).collect()
    }

    #[test]
    fn tag_search_is_exact() {
        let book = note_book();
        let work = NoteQuery::new().with_tags(["work"]).unwrap();
        assert_eq!(texts(&search_notes(&book, &work)), vec!["Quarterly report"]);

        let wor = NoteQuery::new().with_tags(["wor"]).unwrap();
        assert!(search_notes(&book, &wor).is_empty());
    }

    #[test]
    fn tag_and_text_are_conjunctive() {
        let book = note_book();
        let query = NoteQuery::new()
            .with_text("report")
            .with_tags(["home"])
            .unwrap();
        assert_eq!(
            texts(&search_notes(&book, &query)),
            vec!["Report bug in kettle"]
        );
    }

    #[test]
    fn more_matching_tags_rank_higher() {
        let book = note_book();
        let query = NoteQuery::new().with_tags(["home", "urgent"]).unwrap();
        assert_eq!(
            texts(&search_notes(&book, &query)),
            vec!["Report bug in kettle", "Quarterly report", "Buy milk"]
        );
    }

    #[test]
    fn empty_note_query_lists_everything_in_order() {
        let book = note_book();
        let query = NoteQuery::new().with_text("   ");
        assert!(query.is_empty());
        assert_eq!(search_notes(&book, &query).len(), 3);
    }
}

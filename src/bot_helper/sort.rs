//! # Sort Engine
//!
//! Stable orderings over contacts and notes. Records with equal keys keep
//! their relative input order, and records missing the key (no birthday, no
//! email, no tags) always go last, whichever direction is requested.

use crate::book::AddressBook;
use crate::model::{Contact, Note};
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactSortKey {
    Name,
    /// Days until the next birthday.
    Birthday,
    Email,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteSortKey {
    /// The note's smallest tag.
    Tag,
    /// Creation order.
    CreatedAt,
    Text,
    TagCount,
}

impl FromStr for ContactSortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(ContactSortKey::Name),
            "birthday" => Ok(ContactSortKey::Birthday),
            "email" => Ok(ContactSortKey::Email),
            other => Err(format!(
                "unknown contact sort key '{}' (expected name, birthday or email)",
                other
            )),
        }
    }
}

impl fmt::Display for ContactSortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ContactSortKey::Name => "name",
            ContactSortKey::Birthday => "birthday",
            ContactSortKey::Email => "email",
        })
    }
}

impl FromStr for NoteSortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tag" => Ok(NoteSortKey::Tag),
            "created" | "created-at" | "created_at" => Ok(NoteSortKey::CreatedAt),
            "text" => Ok(NoteSortKey::Text),
            "tag-count" | "tag_count" => Ok(NoteSortKey::TagCount),
            other => Err(format!(
                "unknown note sort key '{}' (expected tag, created-at, text or tag-count)",
                other
            )),
        }
    }
}

impl fmt::Display for NoteSortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NoteSortKey::Tag => "tag",
            NoteSortKey::CreatedAt => "created-at",
            NoteSortKey::Text => "text",
            NoteSortKey::TagCount => "tag-count",
        })
    }
}

/// Orders contacts by `key`. Birthday distances are measured from `today`.
pub fn sort_contacts<'a, I>(
    contacts: I,
    key: ContactSortKey,
    order: SortOrder,
    today: NaiveDate,
) -> Vec<&'a Contact>
where
    I: IntoIterator<Item = &'a Contact>,
{
    let mut sorted: Vec<&Contact> = contacts.into_iter().collect();
    sorted.sort_by(|a, b| match key {
        ContactSortKey::Name => order.apply(a.name().to_lowercase().cmp(&b.name().to_lowercase())),
        ContactSortKey::Birthday => missing_last(
            a.days_to_birthday(today),
            b.days_to_birthday(today),
            order,
        ),
        ContactSortKey::Email => missing_last(
            a.email().map(|e| e.as_str().to_lowercase()),
            b.email().map(|e| e.as_str().to_lowercase()),
            order,
        ),
    });
    sorted
}

/// Orders notes by `key`.
pub fn sort_notes<'a, I>(notes: I, key: NoteSortKey, order: SortOrder) -> Vec<&'a Note>
where
    I: IntoIterator<Item = &'a Note>,
{
    let mut sorted: Vec<&Note> = notes.into_iter().collect();
    sorted.sort_by(|a, b| match key {
        NoteSortKey::Tag => missing_last(a.first_tag(), b.first_tag(), order),
        NoteSortKey::CreatedAt => order.apply(a.seq().cmp(&b.seq())),
        NoteSortKey::Text => order.apply(a.text().to_lowercase().cmp(&b.text().to_lowercase())),
        NoteSortKey::TagCount => order.apply(a.tags().len().cmp(&b.tags().len())),
    });
    sorted
}

fn missing_last<T: Ord>(a: Option<T>, b: Option<T>, order: SortOrder) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => order.apply(a.cmp(&b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// A contact whose birthday is coming up.
#[derive(Debug, Clone)]
pub struct UpcomingBirthday<'a> {
    pub contact: &'a Contact,
    pub days_until: i64,
    pub date: NaiveDate,
}

/// Contacts whose next birthday falls within `within_days` of `today`
/// (inclusive), soonest first.
pub fn upcoming_birthdays(
    book: &AddressBook,
    within_days: u32,
    today: NaiveDate,
) -> Vec<UpcomingBirthday<'_>> {
    let within = i64::from(within_days);
    sort_contacts(
        book.list_all(),
        ContactSortKey::Birthday,
        SortOrder::Asc,
        today,
    )
    .into_iter()
    .filter_map(|contact| {
        let birthday = contact.birthday()?;
        let days_until = birthday.days_until(today);
        (days_until <= within).then(|| UpcomingBirthday {
            contact,
            days_until,
            date: birthday.next_occurrence(today),
        })
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::NoteBook;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn with_birthday(name: &str, birthday: &str) -> Contact {
        Contact::new(name)
            .unwrap()
            .with_birthday(birthday, today())
            .unwrap()
    }

    fn birthday_book() -> AddressBook {
        let mut book = AddressBook::new();
        book.add(with_birthday("March", "15-03-1990")).unwrap();
        book.add(Contact::new("Nobody").unwrap()).unwrap();
        book.add(with_birthday("January", "01-01-1985")).unwrap();
        book.add(with_birthday("December", "25-12-2001")).unwrap();
        book
    }

    fn names(contacts: &[&Contact]) -> Vec<String> {
        contacts.iter().map(|c| c.name().to_string()).collect()
    }

    #[test]
    fn birthday_sort_wraps_around_the_year() {
        let book = birthday_book();
        let sorted = sort_contacts(
            book.list_all(),
            ContactSortKey::Birthday,
            SortOrder::Asc,
            today(),
        );
        assert_eq!(names(&sorted), vec!["December", "January", "March", "Nobody"]);
    }

    #[test]
    fn descending_keeps_missing_values_last() {
        let book = birthday_book();
        let sorted = sort_contacts(
            book.list_all(),
            ContactSortKey::Birthday,
            SortOrder::Desc,
            today(),
        );
        assert_eq!(names(&sorted), vec!["March", "January", "December", "Nobody"]);
    }

    #[test]
    fn name_sort_ignores_case() {
        let mut book = AddressBook::new();
        for name in ["bob", "Alice", "carol", "Bea"] {
            book.add(Contact::new(name).unwrap()).unwrap();
        }
        let sorted = sort_contacts(book.list_all(), ContactSortKey::Name, SortOrder::Asc, today());
        assert_eq!(names(&sorted), vec!["Alice", "Bea", "bob", "carol"]);
    }

    #[test]
    fn email_sort_puts_missing_last() {
        let mut book = AddressBook::new();
        book.add(Contact::new("NoMail").unwrap()).unwrap();
        book.add(Contact::new("Zed").unwrap().with_email("a@x.io").unwrap())
            .unwrap();
        book.add(Contact::new("Amy").unwrap().with_email("b@x.io").unwrap())
            .unwrap();
        let sorted = sort_contacts(book.list_all(), ContactSortKey::Email, SortOrder::Asc, today());
        assert_eq!(names(&sorted), vec!["Zed", "Amy", "NoMail"]);
    }

    fn note_book() -> NoteBook {
        let mut notes = NoteBook::new();
        notes.add(Note::new("first", ["work", "zeta"]).unwrap());
        notes.add(Note::new("untagged", Vec::<String>::new()).unwrap());
        notes.add(Note::new("second", ["work"]).unwrap());
        notes.add(Note::new("alpha", ["alpha"]).unwrap());
        notes
    }

    fn texts(notes: &[&Note]) -> Vec<String> {
        notes.iter().map(|n| n.text().to_string()).collect()
    }

    #[test]
    fn tag_sort_is_stable_and_puts_untagged_last() {
        let notes = note_book();
        let sorted = sort_notes(notes.list_all(), NoteSortKey::Tag, SortOrder::Asc);
        assert_eq!(texts(&sorted), vec!["alpha", "first", "second", "untagged"]);
    }

    #[test]
    fn created_at_follows_insertion_sequence() {
        let notes = note_book();
        let sorted = sort_notes(notes.list_all(), NoteSortKey::CreatedAt, SortOrder::Desc);
        assert_eq!(texts(&sorted), vec!["alpha", "second", "untagged", "first"]);
    }

    #[test]
    fn text_and_tag_count_keys() {
        let notes = note_book();
        let by_text = sort_notes(notes.list_all(), NoteSortKey::Text, SortOrder::Asc);
        assert_eq!(texts(&by_text), vec!["alpha", "first", "second", "untagged"]);

        let by_count = sort_notes(notes.list_all(), NoteSortKey::TagCount, SortOrder::Desc);
        assert_eq!(texts(&by_count), vec!["first", "second", "alpha", "untagged"]);
    }

    #[test]
    fn parses_sort_keys() {
        assert_eq!("Birthday".parse::<ContactSortKey>(), Ok(ContactSortKey::Birthday));
        assert_eq!("created-at".parse::<NoteSortKey>(), Ok(NoteSortKey::CreatedAt));
        assert!("age".parse::<ContactSortKey>().is_err());
    }

    #[test]
    fn upcoming_birthdays_within_window() {
        let book = birthday_book();
        let soon = upcoming_birthdays(&book, 210, today());
        let names: Vec<_> = soon.iter().map(|u| u.contact.name()).collect();
        assert_eq!(names, vec!["December"]);
        assert_eq!(soon[0].days_until, 207);
        assert_eq!(
            soon[0].date,
            NaiveDate::from_ymd_opt(2024, 12, 25).unwrap()
        );
        assert!(upcoming_birthdays(&book, 7, today()).is_empty());
    }
}

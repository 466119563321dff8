use super::DataStore;
use crate::book::Book;
use crate::error::{BotError, Result};

/// A store that never touches the disk.
///
/// It can be told to fail, which lets tests exercise the API's handling of
/// unreadable or unwritable storage.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    book: Book,
    saves: usize,
    fail_load: bool,
    fail_save: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_book(book: Book) -> Self {
        Self {
            book,
            ..Self::default()
        }
    }

    pub fn failing_load(mut self) -> Self {
        self.fail_load = true;
        self
    }

    pub fn failing_save(mut self) -> Self {
        self.fail_save = true;
        self
    }

    /// The book as of the last successful save.
    pub fn saved(&self) -> &Book {
        &self.book
    }

    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl DataStore for InMemoryStore {
    fn load(&self) -> Result<Book> {
        if self.fail_load {
            return Err(BotError::persistence("memory", "load disabled"));
        }
        Ok(self.book.clone())
    }

    fn save(&mut self, book: &Book) -> Result<()> {
        if self.fail_save {
            return Err(BotError::persistence("memory", "save disabled"));
        }
        self.book = book.clone();
        self.saves += 1;
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Contact, Note};
    use chrono::NaiveDate;

    pub struct StoreFixture {
        pub book: Book,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self { book: Book::new() }
        }

        pub fn with_contact(mut self, name: &str) -> Self {
            self.book
                .contacts
                .add(Contact::new(name).unwrap())
                .unwrap();
            self
        }

        /// Adds a contact with a phone and a birthday. `birthday` is
        /// validated against 2024-06-01.
        pub fn with_full_contact(mut self, name: &str, phone: &str, birthday: &str) -> Self {
            let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
            let contact = Contact::new(name)
                .unwrap()
                .with_phone(phone)
                .unwrap()
                .with_birthday(birthday, today)
                .unwrap();
            self.book.contacts.add(contact).unwrap();
            self
        }

        pub fn with_note(mut self, text: &str, tags: &[&str]) -> Self {
            self.book
                .notes
                .add(Note::new(text, tags.iter().copied()).unwrap());
            self
        }

        pub fn store(self) -> InMemoryStore {
            InMemoryStore::with_book(self.book)
        }
    }
}

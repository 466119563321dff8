//! # API Facade
//!
//! [`BotApi`] is the single entry point for every operation, whatever the UI.
//! It owns the [`Book`] for the lifetime of the process:
//!
//! 1. [`BotApi::open`] loads the book through the [`DataStore`]. If that
//!    fails, the API starts from an empty book and the next result carries a
//!    warning explaining why.
//! 2. Each method parses selectors, calls the matching function in
//!    [`crate::commands`] and returns its [`CmdResult`].
//! 3. Methods that change the book save it before returning. A failed save
//!    is returned as an error.
//!
//! The API does no formatting and no printing. It is generic over the store,
//! so tests run against [`InMemoryStore`](crate::store::memory::InMemoryStore).

use crate::book::{Book, ContactChange, NoteChange};
use crate::classify::ClassifyOptions;
use crate::commands::{self, CmdMessage, CmdResult};
use crate::config::BotConfig;
use crate::error::Result;
use crate::search::NoteQuery;
use crate::selector::Selector;
use crate::sort::{ContactSortKey, NoteSortKey, SortOrder};
use crate::store::DataStore;
use chrono::{Local, NaiveDate};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

pub use crate::commands::config::ConfigAction;
pub use crate::commands::contacts::NewContact;

pub struct BotApi<S: DataStore> {
    store: S,
    book: Book,
    data_dir: PathBuf,
    today: Option<NaiveDate>,
    notices: Vec<CmdMessage>,
}

impl<S: DataStore> BotApi<S> {
    /// Loads the book from `store`. `data_dir` holds the config file.
    pub fn open(store: S, data_dir: impl Into<PathBuf>) -> Self {
        let mut notices = Vec::new();
        let book = match store.load() {
            Ok(book) => book,
            Err(e) => {
                warn!("event=api_open status=error fallback=empty_book");
                notices.push(CmdMessage::warning(format!(
                    "{}. Starting with an empty book; it will replace the stored data on the next change.",
                    e
                )));
                Book::new()
            }
        };
        debug!(
            "event=api_open status=ok contacts={} notes={}",
            book.contacts.len(),
            book.notes.len()
        );
        Self {
            store,
            book,
            data_dir: data_dir.into(),
            today: None,
            notices,
        }
    }

    /// Pins "today" instead of reading the local clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    // --- Contacts ---

    pub fn add_contact(&mut self, input: &NewContact) -> Result<CmdResult> {
        let today = self.today();
        let result = commands::contacts::add(&mut self.book.contacts, input, today)?;
        self.commit("contact_add", result)
    }

    pub fn show_contacts<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<CmdResult> {
        let selectors = Selector::list_from_words(selectors);
        let result = commands::contacts::show(&self.book.contacts, &selectors)?;
        Ok(self.finish(result))
    }

    /// `selector` words name exactly one contact.
    pub fn update_contact<I: AsRef<str>>(
        &mut self,
        selector: &[I],
        changes: Vec<ContactChange>,
    ) -> Result<CmdResult> {
        let today = self.today();
        let selector = Selector::from_words(selector);
        let result =
            commands::contacts::update(&mut self.book.contacts, &selector, changes, today)?;
        self.commit("contact_update", result)
    }

    pub fn delete_contacts<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<CmdResult> {
        let selectors = Selector::list_from_words(selectors);
        let result = commands::contacts::delete(&mut self.book.contacts, &selectors)?;
        self.commit("contact_delete", result)
    }

    pub fn list_contacts(
        &mut self,
        sort: Option<ContactSortKey>,
        order: SortOrder,
    ) -> Result<CmdResult> {
        let today = self.today();
        let result = commands::contacts::list(&self.book.contacts, sort, order, today)?;
        Ok(self.finish(result))
    }

    pub fn search_contacts(&mut self, query: &str) -> Result<CmdResult> {
        let result = commands::contacts::search(&self.book.contacts, query)?;
        Ok(self.finish(result))
    }

    /// Birthdays in the next `days` days, or the configured window.
    pub fn upcoming_birthdays(&mut self, days: Option<u32>) -> Result<CmdResult> {
        let days = match days {
            Some(days) => days,
            None => BotConfig::load(&self.data_dir)?.upcoming_days,
        };
        let today = self.today();
        let result = commands::birthdays::run(&self.book.contacts, days, today)?;
        Ok(self.finish(result))
    }

    // --- Notes ---

    pub fn add_note<T: AsRef<str>>(&mut self, text: &str, tags: &[T]) -> Result<CmdResult> {
        let result = commands::notes::add(&mut self.book.notes, text, tags)?;
        self.commit("note_add", result)
    }

    pub fn show_notes<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<CmdResult> {
        let selectors = Selector::list_from_words(selectors);
        let result = commands::notes::show(&self.book.notes, &selectors)?;
        Ok(self.finish(result))
    }

    pub fn update_note<I: AsRef<str>>(
        &mut self,
        selector: &[I],
        changes: Vec<NoteChange>,
    ) -> Result<CmdResult> {
        let selector = Selector::from_words(selector);
        let result = commands::notes::update(&mut self.book.notes, &selector, changes)?;
        self.commit("note_update", result)
    }

    pub fn delete_notes<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<CmdResult> {
        let selectors = Selector::list_from_words(selectors);
        let result = commands::notes::delete(&mut self.book.notes, &selectors)?;
        self.commit("note_delete", result)
    }

    pub fn list_notes(&mut self, sort: Option<NoteSortKey>, order: SortOrder) -> Result<CmdResult> {
        let result = commands::notes::list(&self.book.notes, sort, order)?;
        Ok(self.finish(result))
    }

    pub fn search_notes<T: AsRef<str>>(
        &mut self,
        text: Option<&str>,
        tags: &[T],
        sort: Option<NoteSortKey>,
        order: SortOrder,
    ) -> Result<CmdResult> {
        let mut query = NoteQuery::new().with_tags(tags)?;
        if let Some(text) = text {
            query = query.with_text(text);
        }
        let result = commands::notes::search(&self.book.notes, &query, sort, order)?;
        Ok(self.finish(result))
    }

    // --- Misc ---

    pub fn sort_files(&mut self, root: &Path, options: &ClassifyOptions) -> Result<CmdResult> {
        let result = commands::files::run(root, options)?;
        Ok(self.finish(result))
    }

    pub fn config(&mut self, action: ConfigAction) -> Result<CmdResult> {
        let result = commands::config::run(&self.data_dir, action)?;
        Ok(self.finish(result))
    }

    /// Saves the book after a successful mutation.
    fn commit(&mut self, event: &str, result: CmdResult) -> Result<CmdResult> {
        if let Err(e) = self.store.save(&self.book) {
            warn!("event={} status=error stage=save", event);
            return Err(e);
        }
        info!("event={} status=ok", event);
        Ok(self.finish(result))
    }

    /// Puts pending notices ahead of the command's own messages.
    fn finish(&mut self, mut result: CmdResult) -> CmdResult {
        if !self.notices.is_empty() {
            let mut messages = std::mem::take(&mut self.notices);
            messages.append(&mut result.messages);
            result.messages = messages;
        }
        result
    }
}

//! # Commands
//!
//! Business operations over a [`Book`](crate::book::Book). Each command is a
//! plain function: it takes the book (mutably only when it changes it), does
//! its work and returns a [`CmdResult`] describing what happened. Commands do
//! not load, save, log or print; [`crate::api`] and the CLI do that.

use crate::classify::ClassifyReport;
use crate::config::BotConfig;
use crate::fields::Tag;
use crate::model::{Contact, Note};
use crate::search::ContactField;
use chrono::NaiveDate;

pub mod birthdays;
pub mod config;
pub mod contacts;
pub mod files;
pub mod helpers;
pub mod notes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A contact together with its 1-based position in the address book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayContact {
    pub index: usize,
    pub contact: Contact,
    /// Fields a search matched on; empty outside of searches.
    pub matched: Vec<ContactField>,
}

/// A note together with its 1-based position in the note book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayNote {
    pub index: usize,
    pub note: Note,
    pub matched_tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayBirthday {
    pub index: usize,
    pub contact: Contact,
    pub days_until: i64,
    pub date: NaiveDate,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_contacts: Vec<DisplayContact>,
    pub affected_notes: Vec<DisplayNote>,
    pub listed_contacts: Vec<DisplayContact>,
    pub listed_notes: Vec<DisplayNote>,
    pub birthdays: Vec<DisplayBirthday>,
    pub classify: Option<ClassifyReport>,
    pub config: Option<BotConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_affected_contacts(mut self, contacts: Vec<DisplayContact>) -> Self {
        self.affected_contacts = contacts;
        self
    }

    pub fn with_affected_notes(mut self, notes: Vec<DisplayNote>) -> Self {
        self.affected_notes = notes;
        self
    }

    pub fn with_listed_contacts(mut self, contacts: Vec<DisplayContact>) -> Self {
        self.listed_contacts = contacts;
        self
    }

    pub fn with_listed_notes(mut self, notes: Vec<DisplayNote>) -> Self {
        self.listed_notes = notes;
        self
    }

    pub fn with_birthdays(mut self, birthdays: Vec<DisplayBirthday>) -> Self {
        self.birthdays = birthdays;
        self
    }

    pub fn with_classify(mut self, report: ClassifyReport) -> Self {
        self.classify = Some(report);
        self
    }

    pub fn with_config(mut self, config: BotConfig) -> Self {
        self.config = Some(config);
        self
    }
}

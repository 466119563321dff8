use crate::book::{AddressBook, ContactChange};
use crate::commands::helpers::{contacts_by_selectors, display_contact};
use crate::commands::{CmdMessage, CmdResult, DisplayContact};
use crate::error::{BotError, Result};
use crate::model::Contact;
use crate::search::search_contacts;
use crate::selector::Selector;
use crate::sort::{sort_contacts, ContactSortKey, SortOrder};
use chrono::NaiveDate;

/// Raw field values for a new contact, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewContact {
    pub name: String,
    pub phones: Vec<String>,
    pub birthday: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl NewContact {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    fn build(&self, today: NaiveDate) -> Result<Contact> {
        let mut contact = Contact::new(&self.name)?;
        for phone in &self.phones {
            contact = contact.with_phone(phone)?;
        }
        if let Some(birthday) = &self.birthday {
            contact = contact.with_birthday(birthday, today)?;
        }
        if let Some(email) = &self.email {
            contact = contact.with_email(email)?;
        }
        if let Some(address) = &self.address {
            contact = contact.with_address(address)?;
        }
        Ok(contact)
    }
}

pub fn add(book: &mut AddressBook, input: &NewContact, today: NaiveDate) -> Result<CmdResult> {
    let contact = input.build(today)?;
    let id = book.add(contact)?;
    let added = display_contact(book, book.get(id)?);
    let message = CmdMessage::success(format!(
        "Contact added ({}): {}",
        added.index,
        added.contact.name()
    ));
    Ok(CmdResult::default()
        .with_affected_contacts(vec![added])
        .with_message(message))
}

pub fn show(book: &AddressBook, selectors: &[Selector]) -> Result<CmdResult> {
    let contacts = contacts_by_selectors(book, selectors)?;
    Ok(CmdResult::default().with_listed_contacts(contacts))
}

/// Applies every change or none of them.
pub fn update(
    book: &mut AddressBook,
    selector: &Selector,
    changes: Vec<ContactChange>,
    today: NaiveDate,
) -> Result<CmdResult> {
    if changes.is_empty() {
        return Err(BotError::Api("Nothing to update".to_string()));
    }
    let id = book.resolve(selector)?;

    let mut staged = book.clone();
    for change in changes {
        staged.update_on(id, change, today)?;
    }
    *book = staged;

    let updated = display_contact(book, book.get(id)?);
    let message = CmdMessage::success(format!(
        "Contact updated ({}): {}",
        updated.index,
        updated.contact.name()
    ));
    Ok(CmdResult::default()
        .with_affected_contacts(vec![updated])
        .with_message(message))
}

pub fn delete(book: &mut AddressBook, selectors: &[Selector]) -> Result<CmdResult> {
    // Resolve everything up front; positions shift as contacts are removed.
    let targets = contacts_by_selectors(book, selectors)?;
    let mut result = CmdResult::default();

    for target in targets {
        let removed = book.delete(target.contact.id())?;
        result.add_message(CmdMessage::success(format!(
            "Contact deleted: {}",
            removed.name()
        )));
        result.affected_contacts.push(target);
    }
    Ok(result)
}

/// Lists contacts in insertion order, or sorted by `sort` when given.
pub fn list(
    book: &AddressBook,
    sort: Option<ContactSortKey>,
    order: SortOrder,
    today: NaiveDate,
) -> Result<CmdResult> {
    let contacts: Vec<DisplayContact> = match sort {
        Some(key) => sort_contacts(book.list_all(), key, order, today)
            .into_iter()
            .map(|c| display_contact(book, c))
            .collect(),
        None => book
            .list_all()
            .iter()
            .map(|c| display_contact(book, c))
            .collect(),
    };

    let mut result = CmdResult::default().with_listed_contacts(contacts);
    if book.is_empty() {
        result.add_message(CmdMessage::info("The address book is empty"));
    }
    Ok(result)
}

pub fn search(book: &AddressBook, query: &str) -> Result<CmdResult> {
    let listed: Vec<DisplayContact> = search_contacts(book, query)
        .into_iter()
        .map(|hit| DisplayContact {
            matched: hit.matched,
            ..display_contact(book, hit.contact)
        })
        .collect();

    let mut result = CmdResult::default();
    if listed.is_empty() {
        result.add_message(CmdMessage::info(format!("No contacts match '{}'", query)));
    }
    Ok(result.with_listed_contacts(listed))
}

use crate::book::AddressBook;
use crate::commands::helpers::contact_index;
use crate::commands::{CmdMessage, CmdResult, DisplayBirthday};
use crate::error::Result;
use crate::sort::upcoming_birthdays;
use chrono::NaiveDate;

/// Contacts with a birthday in the next `days` days, soonest first.
pub fn run(book: &AddressBook, days: u32, today: NaiveDate) -> Result<CmdResult> {
    let birthdays: Vec<DisplayBirthday> = upcoming_birthdays(book, days, today)
        .into_iter()
        .map(|upcoming| DisplayBirthday {
            index: contact_index(book, upcoming.contact.id()),
            contact: upcoming.contact.clone(),
            days_until: upcoming.days_until,
            date: upcoming.date,
        })
        .collect();

    let mut result = CmdResult::default();
    if birthdays.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No birthdays in the next {} days",
            days
        )));
    }
    Ok(result.with_birthdays(birthdays))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn lists_birthdays_inside_the_window() {
        let book = StoreFixture::new()
            .with_full_contact("Late", "0500000001", "20-06-1990")
            .with_contact("Nobody")
            .with_full_contact("Today", "0500000002", "01-06-1980")
            .with_full_contact("Soon", "0500000003", "05-06-2000")
            .book;

        let result = run(&book.contacts, 7, today()).unwrap();
        let listed: Vec<_> = result
            .birthdays
            .iter()
            .map(|b| (b.contact.name().to_string(), b.days_until, b.index))
            .collect();
        assert_eq!(
            listed,
            vec![("Today".to_string(), 0, 3), ("Soon".to_string(), 4, 4)]
        );
        assert!(result.messages.is_empty());
    }

    #[test]
    fn empty_window_says_so() {
        let book = StoreFixture::new().with_contact("Nobody").book;
        let result = run(&book.contacts, 30, today()).unwrap();
        assert!(result.birthdays.is_empty());
        assert_eq!(result.messages[0].content, "No birthdays in the next 30 days");
    }
}

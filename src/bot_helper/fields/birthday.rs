use super::{FieldKind, ValidationError};
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Input formats tried in order when parsing a birthday.
pub const BIRTHDAY_FORMATS: &[&str] = &["%d-%m-%Y", "%d/%m/%Y", "%d.%m.%Y", "%Y-%m-%d"];

const DISPLAY_FORMAT: &str = "%d-%m-%Y";

/// A birth date that is not in the future.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "NaiveDate", into = "NaiveDate")]
pub struct Birthday(NaiveDate);

impl Birthday {
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// The birthday's month and day projected onto `year`.
    ///
    /// 29 February falls back to 28 February in non-leap years.
    pub fn in_year(&self, year: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, self.0.month(), self.0.day())
            .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
            .unwrap_or(self.0)
    }

    /// The first anniversary on or after `today`.
    pub fn next_occurrence(&self, today: NaiveDate) -> NaiveDate {
        let this_year = self.in_year(today.year());
        if this_year >= today {
            this_year
        } else {
            self.in_year(today.year() + 1)
        }
    }

    /// Days from `today` until the next anniversary; 0 when it is today.
    pub fn days_until(&self, today: NaiveDate) -> i64 {
        (self.next_occurrence(today) - today).num_days()
    }
}

impl TryFrom<NaiveDate> for Birthday {
    type Error = ValidationError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        if date > Local::now().date_naive() {
            return Err(ValidationError::new(
                FieldKind::Birthday,
                format!("{} is in the future", date.format(DISPLAY_FORMAT)),
            ));
        }
        Ok(Birthday(date))
    }
}

impl From<Birthday> for NaiveDate {
    fn from(birthday: Birthday) -> Self {
        birthday.0
    }
}

impl fmt::Display for Birthday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DISPLAY_FORMAT))
    }
}

/// Parses a birthday in one of [`BIRTHDAY_FORMATS`], rejecting dates after `today`.
pub fn validate_birthday(raw: &str, today: NaiveDate) -> Result<Birthday, ValidationError> {
    let trimmed = raw.trim();
    let date = BIRTHDAY_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| {
            ValidationError::new(
                FieldKind::Birthday,
                format!(
                    "'{}' is not a date, expected DD-MM-YYYY, DD/MM/YYYY, DD.MM.YYYY or YYYY-MM-DD",
                    trimmed
                ),
            )
        })?;

    if date > today {
        return Err(ValidationError::new(
            FieldKind::Birthday,
            format!("{} is in the future", date.format(DISPLAY_FORMAT)),
        ));
    }

    Ok(Birthday(date))
}

/// [`validate_birthday`] against the local calendar date.
pub fn validate_birthday_today(raw: &str) -> Result<Birthday, ValidationError> {
    validate_birthday(raw, Local::now().date_naive())
}

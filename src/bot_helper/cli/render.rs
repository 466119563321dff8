//! # Rendering
//!
//! Turns command results into terminal text. Every `render_*` function
//! returns a `String` so output can be tested without a terminal; colors come
//! from `colored` and switch off automatically when stdout is not a TTY.
//!
//! Column layout is done here with `unicode-width`, so names in any script
//! line up.

use bot_helper::classify::{Category, ClassifyReport};
use bot_helper::commands::{CmdMessage, DisplayBirthday, DisplayContact, DisplayNote, MessageLevel};
use bot_helper::config::BotConfig;
use chrono::{DateTime, Utc};
use colored::*;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
pub const TIME_WIDTH: usize = 14;
const NAME_WIDTH: usize = 24;
const PHONES_WIDTH: usize = 28;
const BIRTHDAY_WIDTH: usize = 10;
const EMAIL_WIDTH: usize = 26;
const TAGS_WIDTH: usize = 24;

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        println!("{}", render_message(message));
    }
}

pub fn render_message(message: &CmdMessage) -> String {
    match message.level {
        MessageLevel::Info => message.content.dimmed().to_string(),
        MessageLevel::Success => message.content.green().to_string(),
        MessageLevel::Warning => message.content.yellow().to_string(),
        MessageLevel::Error => message.content.red().to_string(),
    }
}

/// One line per contact: index, name, phones, birthday, email.
pub fn render_contact_list(contacts: &[DisplayContact]) -> String {
    let mut out = String::new();
    for dc in contacts {
        let c = &dc.contact;
        let phones = c
            .phones()
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let birthday = c.birthday().map(|b| b.to_string()).unwrap_or_default();
        let email = c.email().map(|e| e.as_str()).unwrap_or("");

        out.push_str(&format!(
            "{} {} {} {} {}\n",
            format!("{:>3}.", dc.index).yellow(),
            fit(c.name(), NAME_WIDTH).bold(),
            fit(&phones, PHONES_WIDTH),
            fit(&birthday, BIRTHDAY_WIDTH).cyan(),
            truncate_to_width(email, EMAIL_WIDTH),
        ));
    }
    out
}

/// Every field of each contact, one per line.
pub fn render_full_contacts(contacts: &[DisplayContact]) -> String {
    let blocks: Vec<String> = contacts
        .iter()
        .map(|dc| {
            let c = &dc.contact;
            let mut block = format!("{} {}\n", format!("{}.", dc.index).yellow(), c.name().bold());
            block.push_str(&field_line("id", &c.id().to_string()));
            let phones: Vec<&str> = c.phones().iter().map(|p| p.as_str()).collect();
            block.push_str(&field_line("phones", &phones.join(", ")));
            block.push_str(&field_line(
                "birthday",
                &c.birthday().map(|b| b.to_string()).unwrap_or_default(),
            ));
            block.push_str(&field_line(
                "email",
                c.email().map(|e| e.as_str()).unwrap_or(""),
            ));
            block.push_str(&field_line("address", c.address().unwrap_or("")));
            if !dc.matched.is_empty() {
                let matched: Vec<String> =
                    dc.matched.iter().map(|f| format!("{:?}", f).to_lowercase()).collect();
                block.push_str(&field_line("matched", &matched.join(", ")));
            }
            block
        })
        .collect();
    blocks.join("\n")
}

fn field_line(label: &str, value: &str) -> String {
    let value = if value.is_empty() {
        "-".dimmed().to_string()
    } else {
        value.to_string()
    };
    format!("    {:<9} {}\n", format!("{}:", label).dimmed(), value)
}

/// One line per note: index, tags, first line of text, age.
pub fn render_note_list(notes: &[DisplayNote]) -> String {
    let mut out = String::new();
    for dn in notes {
        let idx = format!("{:>3}. ", dn.index);
        let tags = dn
            .note
            .tags()
            .iter()
            .map(|t| format!("#{}", t))
            .collect::<Vec<_>>()
            .join(" ");
        let tags = fit(&tags, TAGS_WIDTH);
        let preview: String = dn
            .note
            .text()
            .chars()
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();

        let fixed = idx.width() + TAGS_WIDTH + 1 + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let preview = fit(&preview, available);

        out.push_str(&format!(
            "{}{} {}{}\n",
            idx.yellow(),
            tags.cyan(),
            preview,
            format_time_ago(dn.note.created_at()).dimmed()
        ));
    }
    out
}

pub fn render_full_notes(notes: &[DisplayNote]) -> String {
    let blocks: Vec<String> = notes
        .iter()
        .map(|dn| {
            let tags: Vec<String> = dn.note.tags().iter().map(|t| format!("#{}", t)).collect();
            format!(
                "{} {}  {}\n{}\n{}\n",
                format!("{}.", dn.index).yellow(),
                tags.join(" ").cyan(),
                dn.note
                    .created_at()
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
                    .dimmed(),
                "--------------------------------".dimmed(),
                dn.note.text()
            )
        })
        .collect();
    blocks.join("\n")
}

pub fn render_birthdays(birthdays: &[DisplayBirthday]) -> String {
    let mut out = String::new();
    for b in birthdays {
        let when = match b.days_until {
            0 => "today".to_string(),
            1 => "tomorrow".to_string(),
            n => format!("in {} days", n),
        };
        out.push_str(&format!(
            "{} {} {} {}\n",
            format!("{:>3}.", b.index).yellow(),
            fit(b.contact.name(), NAME_WIDTH).bold(),
            b.date.format("%d-%m").to_string().cyan(),
            when.dimmed()
        ));
    }
    out
}

pub fn render_classify_report(report: &ClassifyReport) -> String {
    let mut out = String::new();
    for category in Category::ALL {
        let count = report.count(category);
        if count > 0 {
            out.push_str(&format!("  {:<10} {}\n", category.to_string(), count));
        }
    }
    if report.extracted > 0 {
        out.push_str(&format!("  {:<10} {}\n", "unpacked", report.extracted));
    }
    if report.pruned > 0 {
        out.push_str(&format!("  {:<10} {}\n", "pruned", report.pruned));
    }
    out
}

pub fn render_config(config: &BotConfig) -> String {
    config
        .entries()
        .into_iter()
        .map(|(key, value)| format!("{} = {}\n", key, value))
        .collect()
}

/// Truncates to `width` columns and pads with spaces to exactly `width`.
fn fit(s: &str, width: usize) -> String {
    let truncated = truncate_to_width(s, width);
    let padding = width.saturating_sub(truncated.width());
    format!("{}{}", truncated, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bot_helper::model::{Contact, Note};
    use chrono::NaiveDate;

    fn plain() {
        colored::control::set_override(false);
    }

    fn contact() -> DisplayContact {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        DisplayContact {
            index: 2,
            contact: Contact::new("Олена Петренко")
                .unwrap()
                .with_phone("0501234567")
                .unwrap()
                .with_birthday("15-03-1990", today)
                .unwrap(),
            matched: Vec::new(),
        }
    }

    #[test]
    fn truncates_by_display_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
        // Wide characters take two columns each.
        assert_eq!(truncate_to_width("日本語テキスト", 7), "日本語…");
        assert_eq!(fit("ab", 4), "ab  ");
    }

    #[test]
    fn contact_list_lines_up() {
        plain();
        let out = render_contact_list(&[contact()]);
        assert!(out.starts_with("  2. Олена Петренко"));
        assert!(out.contains("0501234567"));
        assert!(out.contains("15-03-1990"));
    }

    #[test]
    fn full_contact_marks_missing_fields() {
        plain();
        let out = render_full_contacts(&[contact()]);
        assert!(out.contains("email:"));
        assert!(out.contains("address:  -"));
    }

    #[test]
    fn note_list_shows_tags_and_first_words() {
        plain();
        let note = DisplayNote {
            index: 1,
            note: Note::new("Buy milk\nand bread", ["home"]).unwrap(),
            matched_tags: Vec::new(),
        };
        let out = render_note_list(&[note]);
        assert!(out.contains("#home"));
        assert!(out.contains("Buy milk and bread"));
        assert!(out.lines().next().unwrap().width() <= LINE_WIDTH);
    }

    #[test]
    fn config_lists_every_key() {
        let out = render_config(&BotConfig::default());
        assert_eq!(out, "upcoming-days = 7\nlog-level = warn\n");
    }
}

//! # CLI Layer
//!
//! The only place that knows about the terminal. It parses arguments, builds
//! the [`BotApi`] through [`initialize`], calls one API method and prints the
//! result. Errors bubble up to `main`, which prints them and exits with 1.

use super::render::{
    print_messages, render_birthdays, render_classify_report, render_config,
    render_contact_list, render_full_contacts, render_full_notes, render_note_list,
};
use super::setup::{Cli, Commands, ContactChangeArgs, ContactCommands, NoteCommands};
use bot_helper::api::{BotApi, ConfigAction, NewContact};
use bot_helper::book::{ContactChange, NoteChange};
use bot_helper::classify::ClassifyOptions;
use bot_helper::commands::CmdResult;
use bot_helper::error::{BotError, Result};
use bot_helper::init::initialize;
use bot_helper::sort::SortOrder;
use bot_helper::store::fs::FileStore;
use clap::Parser;
use std::path::Path;

struct AppContext {
    api: BotApi<FileStore>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let ctx = initialize(cli.verbose)?;
    if let Some(warning) = &ctx.log_warning {
        eprintln!("Warning: logging disabled: {}", warning);
    }
    let mut ctx = AppContext { api: ctx.api };

    match cli.command {
        Some(Commands::Contact(cmd)) => handle_contact(&mut ctx, cmd),
        Some(Commands::Note(cmd)) => handle_note(&mut ctx, cmd),
        Some(Commands::Birthdays { days }) => handle_birthdays(&mut ctx, days),
        Some(Commands::SortFiles {
            path,
            no_extract,
            keep_empty,
        }) => handle_sort_files(&mut ctx, &path, no_extract, keep_empty),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => {
            let result = ctx.api.list_contacts(None, SortOrder::Asc)?;
            print_contact_list(&result);
            Ok(())
        }
    }
}

fn order(desc: bool) -> SortOrder {
    if desc {
        SortOrder::Desc
    } else {
        SortOrder::Asc
    }
}

fn handle_contact(ctx: &mut AppContext, cmd: ContactCommands) -> Result<()> {
    match cmd {
        ContactCommands::Add {
            name,
            phone,
            birthday,
            email,
            address,
        } => {
            let input = NewContact {
                name: name.join(" "),
                phones: phone,
                birthday,
                email,
                address,
            };
            let result = ctx.api.add_contact(&input)?;
            print_messages(&result.messages);
        }
        ContactCommands::Show { selectors } => {
            let result = ctx.api.show_contacts(&selectors)?;
            print_messages(&result.messages);
            print!("{}", render_full_contacts(&result.listed_contacts));
        }
        ContactCommands::Update { selector, changes } => {
            let changes = contact_changes(changes)?;
            let result = ctx.api.update_contact(&selector, changes)?;
            print_messages(&result.messages);
        }
        ContactCommands::Delete { selectors } => {
            let result = ctx.api.delete_contacts(&selectors)?;
            print_messages(&result.messages);
        }
        ContactCommands::List { sort, desc } => {
            let result = ctx.api.list_contacts(sort, order(desc))?;
            print_contact_list(&result);
        }
        ContactCommands::Search { query } => {
            let result = ctx.api.search_contacts(&query.join(" "))?;
            print_contact_list(&result);
        }
    }
    Ok(())
}

/// Flags to changes, in a fixed order: rename, phones, then the rest.
fn contact_changes(args: ContactChangeArgs) -> Result<Vec<ContactChange>> {
    let mut changes = Vec::new();
    if let Some(name) = args.name {
        changes.push(ContactChange::Rename(name));
    }
    if let Some(pair) = args.replace_phone {
        match <[String; 2]>::try_from(pair) {
            Ok([old, new]) => changes.push(ContactChange::ReplacePhone { old, new }),
            Err(_) => {
                return Err(BotError::Api(
                    "--replace-phone takes the old and the new number".to_string(),
                ))
            }
        }
    }
    changes.extend(args.add_phone.into_iter().map(ContactChange::AddPhone));
    changes.extend(args.remove_phone.into_iter().map(ContactChange::RemovePhone));
    if let Some(birthday) = args.birthday {
        changes.push(ContactChange::SetBirthday(birthday));
    }
    if args.clear_birthday {
        changes.push(ContactChange::ClearBirthday);
    }
    if let Some(email) = args.email {
        changes.push(ContactChange::SetEmail(email));
    }
    if args.clear_email {
        changes.push(ContactChange::ClearEmail);
    }
    if let Some(address) = args.address {
        changes.push(ContactChange::SetAddress(address));
    }
    if args.clear_address {
        changes.push(ContactChange::ClearAddress);
    }
    Ok(changes)
}

fn handle_note(ctx: &mut AppContext, cmd: NoteCommands) -> Result<()> {
    match cmd {
        NoteCommands::Add { text, tag } => {
            let result = ctx.api.add_note(&text.join(" "), &tag)?;
            print_messages(&result.messages);
        }
        NoteCommands::Show { selectors } => {
            let result = ctx.api.show_notes(&selectors)?;
            print_messages(&result.messages);
            print!("{}", render_full_notes(&result.listed_notes));
        }
        NoteCommands::Update {
            selector,
            text,
            add_tag,
            remove_tag,
            set_tags,
            clear_tags,
        } => {
            let mut changes = Vec::new();
            if let Some(text) = text {
                changes.push(NoteChange::SetText(text));
            }
            if let Some(tags) = set_tags {
                changes.push(NoteChange::ReplaceTags(tags));
            }
            if clear_tags {
                changes.push(NoteChange::ReplaceTags(Vec::new()));
            }
            if !add_tag.is_empty() {
                changes.push(NoteChange::AddTags(add_tag));
            }
            if !remove_tag.is_empty() {
                changes.push(NoteChange::RemoveTags(remove_tag));
            }
            let result = ctx.api.update_note(&selector, changes)?;
            print_messages(&result.messages);
        }
        NoteCommands::Delete { selectors } => {
            let result = ctx.api.delete_notes(&selectors)?;
            print_messages(&result.messages);
        }
        NoteCommands::List { sort, desc } => {
            let result = ctx.api.list_notes(sort, order(desc))?;
            print_note_list(&result);
        }
        NoteCommands::Search {
            text,
            tag,
            sort,
            desc,
        } => {
            let text = text.join(" ");
            let text = if text.trim().is_empty() {
                None
            } else {
                Some(text.as_str())
            };
            let result = ctx.api.search_notes(text, &tag, sort, order(desc))?;
            print_note_list(&result);
        }
    }
    Ok(())
}

fn handle_birthdays(ctx: &mut AppContext, days: Option<u32>) -> Result<()> {
    let result = ctx.api.upcoming_birthdays(days)?;
    print_messages(&result.messages);
    print!("{}", render_birthdays(&result.birthdays));
    Ok(())
}

fn handle_sort_files(
    ctx: &mut AppContext,
    path: &Path,
    no_extract: bool,
    keep_empty: bool,
) -> Result<()> {
    let options = ClassifyOptions {
        extract_archives: !no_extract,
        prune_empty: !keep_empty,
    };
    let result = ctx.api.sort_files(path, &options)?;
    print_messages(&result.messages);
    if let Some(report) = &result.classify {
        print!("{}", render_classify_report(report));
    }
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let is_show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(action)?;
    print_messages(&result.messages);
    if is_show_all {
        if let Some(config) = &result.config {
            print!("{}", render_config(config));
        }
    }
    Ok(())
}

fn print_contact_list(result: &CmdResult) {
    print_messages(&result.messages);
    print!("{}", render_contact_list(&result.listed_contacts));
}

fn print_note_list(result: &CmdResult) {
    print_messages(&result.messages);
    print!("{}", render_note_list(&result.listed_notes));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_flags_to_changes_in_order() {
        let args = ContactChangeArgs {
            name: Some("Anna K".into()),
            add_phone: vec!["0501112233".into()],
            replace_phone: Some(vec!["1".into(), "2".into()]),
            clear_email: true,
            ..ContactChangeArgs::default()
        };
        let changes = contact_changes(args).unwrap();
        assert_eq!(
            changes,
            vec![
                ContactChange::Rename("Anna K".into()),
                ContactChange::ReplacePhone {
                    old: "1".into(),
                    new: "2".into()
                },
                ContactChange::AddPhone("0501112233".into()),
                ContactChange::ClearEmail,
            ]
        );
    }

    #[test]
    fn no_flags_means_no_changes() {
        assert!(contact_changes(ContactChangeArgs::default())
            .unwrap()
            .is_empty());
    }
}

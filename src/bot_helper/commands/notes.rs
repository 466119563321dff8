use crate::book::{NoteBook, NoteChange};
use crate::commands::helpers::{display_note, notes_by_selectors};
use crate::commands::{CmdMessage, CmdResult, DisplayNote};
use crate::error::{BotError, Result};
use crate::model::Note;
use crate::search::{search_notes, NoteQuery};
use crate::selector::Selector;
use crate::sort::{sort_notes, NoteSortKey, SortOrder};

/// First line of a note, for one-line messages.
fn headline(note: &Note) -> &str {
    let line = note.text().lines().next().unwrap_or("");
    if line.is_empty() {
        "(empty)"
    } else {
        line
    }
}

pub fn add<S: AsRef<str>>(book: &mut NoteBook, text: &str, tags: &[S]) -> Result<CmdResult> {
    let note = Note::new(text, tags)?;
    let id = book.add(note);
    let added = display_note(book, book.get(id)?);
    let message = CmdMessage::success(format!(
        "Note added ({}): {}",
        added.index,
        headline(&added.note)
    ));
    Ok(CmdResult::default()
        .with_affected_notes(vec![added])
        .with_message(message))
}

pub fn show(book: &NoteBook, selectors: &[Selector]) -> Result<CmdResult> {
    let notes = notes_by_selectors(book, selectors)?;
    Ok(CmdResult::default().with_listed_notes(notes))
}

/// Applies every change or none of them.
pub fn update(book: &mut NoteBook, selector: &Selector, changes: Vec<NoteChange>) -> Result<CmdResult> {
    if changes.is_empty() {
        return Err(BotError::Api("Nothing to update".to_string()));
    }
    let id = book.resolve(selector)?;

    let mut staged = book.clone();
    for change in changes {
        staged.update(id, change)?;
    }
    *book = staged;

    let updated = display_note(book, book.get(id)?);
    let message = CmdMessage::success(format!(
        "Note updated ({}): {}",
        updated.index,
        headline(&updated.note)
    ));
    Ok(CmdResult::default()
        .with_affected_notes(vec![updated])
        .with_message(message))
}

pub fn delete(book: &mut NoteBook, selectors: &[Selector]) -> Result<CmdResult> {
    let targets = notes_by_selectors(book, selectors)?;
    let mut result = CmdResult::default();

    for target in targets {
        let removed = book.delete(target.note.id())?;
        result.add_message(CmdMessage::success(format!(
            "Note deleted: {}",
            headline(&removed)
        )));
        result.affected_notes.push(target);
    }
    Ok(result)
}

/// Lists notes in creation order, or sorted by `sort` when given.
pub fn list(book: &NoteBook, sort: Option<NoteSortKey>, order: SortOrder) -> Result<CmdResult> {
    let notes: Vec<DisplayNote> = match sort {
        Some(key) => sort_notes(book.list_all(), key, order)
            .into_iter()
            .map(|n| display_note(book, n))
            .collect(),
        None => book
            .list_all()
            .iter()
            .map(|n| display_note(book, n))
            .collect(),
    };

    let mut result = CmdResult::default().with_listed_notes(notes);
    if book.is_empty() {
        result.add_message(CmdMessage::info("The note book is empty"));
    }
    Ok(result)
}

/// Searches notes; with `sort`, the hits are re-ordered by that key instead
/// of by relevance.
pub fn search(
    book: &NoteBook,
    query: &NoteQuery,
    sort: Option<NoteSortKey>,
    order: SortOrder,
) -> Result<CmdResult> {
    let hits = search_notes(book, query);
    let mut listed: Vec<DisplayNote> = hits
        .iter()
        .map(|hit| DisplayNote {
            matched_tags: hit.matched_tags.iter().map(|t| (*t).clone()).collect(),
            ..display_note(book, hit.note)
        })
        .collect();

    if let Some(key) = sort {
        let order_ids: Vec<_> = sort_notes(hits.iter().map(|h| h.note), key, order)
            .into_iter()
            .map(Note::id)
            .collect();
        listed.sort_by_key(|d| order_ids.iter().position(|id| *id == d.note.id()));
    }

    let mut result = CmdResult::default();
    if listed.is_empty() {
        result.add_message(CmdMessage::info("No notes match"));
    }
    Ok(result.with_listed_notes(listed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecordKind;

    const NO_TAGS: &[&str] = &[];

    fn sample() -> NoteBook {
        let mut book = NoteBook::new();
        add(&mut book, "Quarterly report\nfigures due friday", &["work", "urgent"]).unwrap();
        add(&mut book, "Buy milk", &["home"]).unwrap();
        add(&mut book, "", NO_TAGS).unwrap();
        book
    }

    #[test]
    fn add_reports_position_and_headline() {
        let mut book = sample();
        let result = add(&mut book, "Call mum", &["#Family"]).unwrap();
        assert_eq!(result.affected_notes[0].index, 4);
        assert_eq!(result.messages[0].content, "Note added (4): Call mum");

        assert!(matches!(
            add(&mut book, "x", &["bad tag"]),
            Err(BotError::Validation(_))
        ));
        assert_eq!(book.len(), 4);
    }

    #[test]
    fn update_is_all_or_nothing() {
        let mut book = sample();
        let before = book.clone();
        let changes = vec![
            NoteChange::SetText("changed".into()),
            NoteChange::AddTags(vec!["a,b".into()]),
        ];
        assert!(update(&mut book, &Selector::Index(2), changes).is_err());
        assert_eq!(book, before);

        let changes = vec![
            NoteChange::SetText("Buy oat milk".into()),
            NoteChange::ReplaceTags(vec!["shopping".into()]),
        ];
        let result = update(&mut book, &Selector::Index(2), changes).unwrap();
        let note = &result.affected_notes[0].note;
        assert_eq!(note.text(), "Buy oat milk");
        assert_eq!(note.first_tag().unwrap().as_str(), "shopping");
    }

    #[test]
    fn delete_with_repeated_target_removes_it_once() {
        let mut book = sample();
        let first = book.list_all()[0].id();
        let result = delete(
            &mut book,
            &[Selector::Index(1), Selector::Index(1), Selector::Id(first)],
        )
        .unwrap();
        assert_eq!(result.affected_notes.len(), 1);
        assert_eq!(book.len(), 2);
        assert!(book.get(first).is_err());
    }

    #[test]
    fn delete_by_index() {
        let mut book = sample();
        let result = delete(&mut book, &[Selector::Index(3)]).unwrap();
        assert_eq!(result.messages[0].content, "Note deleted: (empty)");
        assert_eq!(book.len(), 2);

        let err = delete(&mut book, &[Selector::Index(3)]).unwrap_err();
        assert!(matches!(
            err,
            BotError::NotFound {
                kind: RecordKind::Note,
                ..
            }
        ));
    }

    #[test]
    fn list_sorted_by_tag() {
        let book = sample();
        let result = list(&book, Some(NoteSortKey::Tag), SortOrder::Asc).unwrap();
        let indexes: Vec<_> = result.listed_notes.iter().map(|d| d.index).collect();
        // home < urgent, untagged last
        assert_eq!(indexes, vec![2, 1, 3]);
    }

    #[test]
    fn search_by_tag_and_text() {
        let book = sample();
        let query = NoteQuery::new().with_tags(["work"]).unwrap();
        let result = search(&book, &query, None, SortOrder::Asc).unwrap();
        assert_eq!(result.listed_notes.len(), 1);
        assert_eq!(result.listed_notes[0].matched_tags[0].as_str(), "work");

        let query = NoteQuery::new().with_tags(["home"]).unwrap().with_text("report");
        let result = search(&book, &query, None, SortOrder::Asc).unwrap();
        assert!(result.listed_notes.is_empty());
        assert_eq!(result.messages[0].content, "No notes match");
    }

    #[test]
    fn search_can_be_resorted() {
        let book = sample();
        let query = NoteQuery::new().with_tags(["home", "urgent"]).unwrap();
        let result = search(&book, &query, Some(NoteSortKey::CreatedAt), SortOrder::Desc).unwrap();
        let indexes: Vec<_> = result.listed_notes.iter().map(|d| d.index).collect();
        assert_eq!(indexes, vec![2, 1]);
    }
}

use super::DataStore;
use crate::book::{AddressBook, Book, NoteBook};
use crate::error::{BotError, Result};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONTACTS_FILE: &str = "contacts.json";
pub const NOTES_FILE: &str = "notes.json";

/// JSON files under a single data directory.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn contacts_path(&self) -> PathBuf {
        self.root.join(CONTACTS_FILE)
    }

    pub fn notes_path(&self) -> PathBuf {
        self.root.join(NOTES_FILE)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)
                .map_err(|e| BotError::persistence(&self.root, e))?;
        }
        Ok(())
    }
}

fn read_json<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if !path.exists() {
        debug!("event=store_read status=missing path={}", path.display());
        return Ok(T::default());
    }
    let content = fs::read_to_string(path).map_err(|e| BotError::persistence(path, e))?;
    if content.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(&content).map_err(|e| BotError::persistence(path, e))
}

/// Writes next to the target first and renames over it, so a crash mid-write
/// leaves the previous file intact.
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, content).map_err(|e| BotError::persistence(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        BotError::persistence(path, e)
    })
}

impl DataStore for FileStore {
    fn load(&self) -> Result<Book> {
        let contacts: AddressBook = read_json(&self.contacts_path()).map_err(|e| {
            warn!("event=store_load status=error file={}", CONTACTS_FILE);
            e
        })?;
        let mut notes: NoteBook = read_json(&self.notes_path()).map_err(|e| {
            warn!("event=store_load status=error file={}", NOTES_FILE);
            e
        })?;
        notes.restore_seq();

        debug!(
            "event=store_load status=ok contacts={} notes={}",
            contacts.len(),
            notes.len()
        );
        Ok(Book { contacts, notes })
    }

    fn save(&mut self, book: &Book) -> Result<()> {
        self.ensure_dir()?;
        write_json(&self.contacts_path(), &book.contacts)?;
        write_json(&self.notes_path(), &book.notes)?;
        debug!(
            "event=store_save status=ok contacts={} notes={}",
            book.contacts.len(),
            book.notes.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::{ContactChange, NoteChange};
    use crate::model::{Contact, Note};
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn missing_directory_loads_as_empty() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nowhere"));
        let book = store.load().unwrap();
        assert!(book.contacts.is_empty());
        assert!(book.notes.is_empty());
    }

    #[test]
    fn round_trips_every_field() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("data"));

        let mut book = Book::new();
        let full = Contact::new("Anna Kovalenko")
            .unwrap()
            .with_phone("050 123 45 67")
            .unwrap()
            .with_phone("+44 20 7946 0958")
            .unwrap()
            .with_birthday("29.02.1992", today())
            .unwrap()
            .with_email("anna@Example.COM")
            .unwrap()
            .with_address("Kyiv, Khreshchatyk 1")
            .unwrap();
        book.contacts.add(full).unwrap();
        book.contacts.add(Contact::new("Bare").unwrap()).unwrap();
        book.notes.add(Note::new("", Vec::<String>::new()).unwrap());
        book.notes
            .add(Note::new("Buy milk\nand bread", ["home", "urgent"]).unwrap());

        store.save(&book).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, book);

        let bare = &loaded.contacts.list_all()[1];
        assert!(bare.email().is_none());
        assert!(bare.address().is_none());
        assert_eq!(loaded.notes.list_all()[0].text(), "");
    }

    #[test]
    fn absent_fields_are_written_as_null() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        let mut book = Book::new();
        book.contacts.add(Contact::new("Bare").unwrap()).unwrap();
        store.save(&book).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.contacts_path()).unwrap()).unwrap();
        assert!(raw[0]["email"].is_null());
        assert!(raw[0]["address"].is_null());
        assert_eq!(raw[0]["phones"], serde_json::json!([]));
    }

    #[test]
    fn reload_continues_the_note_sequence() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        let mut book = Book::new();
        book.notes.add(Note::new("one", Vec::<String>::new()).unwrap());
        book.notes.add(Note::new("two", Vec::<String>::new()).unwrap());
        store.save(&book).unwrap();

        let mut loaded = store.load().unwrap();
        let id = loaded
            .notes
            .add(Note::new("three", Vec::<String>::new()).unwrap());
        assert_eq!(loaded.notes.get(id).unwrap().seq(), 2);
    }

    #[test]
    fn legacy_notes_without_counter_get_one() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let mut book = Book::new();
        book.notes.add(Note::new("one", Vec::<String>::new()).unwrap());
        let mut raw = serde_json::to_value(&book.notes).unwrap();
        raw.as_object_mut().unwrap().remove("next_seq");
        fs::write(store.notes_path(), raw.to_string()).unwrap();

        let mut loaded = store.load().unwrap();
        let id = loaded
            .notes
            .add(Note::new("two", Vec::<String>::new()).unwrap());
        assert_eq!(loaded.notes.get(id).unwrap().seq(), 1);
    }

    #[test]
    fn corrupt_file_is_a_persistence_error() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        fs::write(store.contacts_path(), "{ not json").unwrap();
        let err = store.load().unwrap_err();
        assert!(matches!(err, BotError::Persistence { ref path, .. } if path.ends_with(CONTACTS_FILE)));
    }

    #[test]
    fn hand_edited_invalid_values_are_rejected_on_load() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let mut book = Book::new();
        book.contacts.add(Contact::new("Anna").unwrap()).unwrap();
        let mut raw = serde_json::to_value(&book.contacts).unwrap();
        raw[0]["phones"] = serde_json::json!(["abc"]);
        fs::write(store.contacts_path(), raw.to_string()).unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, BotError::Persistence { ref path, .. } if path.ends_with(CONTACTS_FILE)));
    }

    #[test]
    fn duplicate_names_in_file_are_rejected_on_load() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let mut book = Book::new();
        book.contacts.add(Contact::new("Anna").unwrap()).unwrap();
        let mut raw = serde_json::to_value(&book.contacts).unwrap();
        let mut twin = raw[0].clone();
        twin["id"] = serde_json::json!(uuid::Uuid::new_v4());
        twin["name"] = serde_json::json!("ANNA");
        raw.as_array_mut().unwrap().push(twin);
        fs::write(store.contacts_path(), raw.to_string()).unwrap();

        let err = store.load().unwrap_err();
        assert!(err.to_string().contains("duplicate contact name 'ANNA'"));
    }

    #[test]
    fn save_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        let mut book = Book::new();
        let id = book.contacts.add(Contact::new("Anna").unwrap()).unwrap();
        store.save(&book).unwrap();
        book.contacts
            .update_on(id, ContactChange::SetAddress("Lviv".into()), today())
            .unwrap();
        let note = book.notes.add(Note::new("x", ["a"]).unwrap());
        book.notes
            .update(note, NoteChange::SetText("y".into()))
            .unwrap();
        store.save(&book).unwrap();

        let mut names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec![CONTACTS_FILE, NOTES_FILE]);
        assert_eq!(store.load().unwrap(), book);
    }
}

//! # File Classifier
//!
//! Tidies a directory tree in place: every file is moved into
//! `root/<category>/` according to its extension, with its stem normalized to
//! `[a-z0-9_]`. Files that already sit in a top-level category folder are left
//! alone, so running the sweep twice is harmless.
//!
//! After the move, supported archives (`.zip`, `.tar`, `.tar.gz`, `.tgz`) are
//! unpacked into `archives/<stem>/` and removed, and directories left empty
//! are pruned. Both steps can be switched off with [`ClassifyOptions`].
//!
//! A file that cannot be moved or unpacked is recorded in the report and the
//! sweep carries on.

use crate::error::{BotError, Result};
use flate2::read::GzDecoder;
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::ZipArchive;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Images,
    Documents,
    Audio,
    Video,
    Archives,
    Unknown,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Images,
        Category::Documents,
        Category::Audio,
        Category::Video,
        Category::Archives,
        Category::Unknown,
    ];

    /// Name of the folder this category's files are moved into.
    pub fn dir_name(self) -> &'static str {
        match self {
            Category::Images => "images",
            Category::Documents => "documents",
            Category::Audio => "audio",
            Category::Video => "video",
            Category::Archives => "archives",
            Category::Unknown => "unknown",
        }
    }

    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" | "png" | "svg" => Category::Images,
            "doc" | "docx" | "txt" | "pdf" | "xlsx" | "pptx" => Category::Documents,
            "mp3" | "wav" | "ogg" | "amr" => Category::Audio,
            "avi" | "mp4" | "mov" | "mkv" => Category::Video,
            "zip" | "gz" | "tar" | "tgz" | "rar" => Category::Archives,
            _ => Category::Unknown,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map(Category::from_extension)
            .unwrap_or(Category::Unknown)
    }

    fn is_category_dir(name: &str) -> bool {
        Category::ALL.iter().any(|c| c.dir_name() == name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifyOptions {
    pub extract_archives: bool,
    pub prune_empty: bool,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            extract_archives: true,
            prune_empty: true,
        }
    }
}

/// A file the sweep could not handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifyFailure {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassifyReport {
    /// Files moved, per category.
    pub moved: BTreeMap<Category, usize>,
    /// Archives unpacked (and removed).
    pub extracted: usize,
    /// Empty directories removed.
    pub pruned: usize,
    pub failures: Vec<ClassifyFailure>,
}

impl ClassifyReport {
    pub fn total_moved(&self) -> usize {
        self.moved.values().sum()
    }

    pub fn count(&self, category: Category) -> usize {
        self.moved.get(&category).copied().unwrap_or(0)
    }

    fn fail(&mut self, path: impl Into<PathBuf>, reason: impl fmt::Display) {
        let path = path.into();
        warn!("event=classify_file status=error reason={}", reason);
        self.failures.push(ClassifyFailure {
            path,
            reason: reason.to_string(),
        });
    }
}

/// Sorts every file under `root` into category folders.
///
/// Only a missing or unreadable `root` is an error; everything else ends up
/// in [`ClassifyReport::failures`].
pub fn classify_and_move(root: &Path, options: &ClassifyOptions) -> Result<ClassifyReport> {
    if !fs::metadata(root)?.is_dir() {
        return Err(BotError::persistence(root, "not a directory"));
    }

    let mut report = ClassifyReport::default();
    let files = collect_files(root, &mut report);
    debug!("event=classify_scan status=ok files={}", files.len());

    let mut archives = Vec::new();
    let mut vacated = BTreeSet::new();
    for file in files {
        let category = Category::from_path(&file);
        match move_into_category(root, &file, category) {
            Ok(target) => {
                *report.moved.entry(category).or_insert(0) += 1;
                if let Some(parent) = file.parent() {
                    vacated.insert(parent.to_path_buf());
                }
                if category == Category::Archives {
                    archives.push(target);
                }
            }
            Err(reason) => report.fail(&file, reason),
        }
    }

    if options.extract_archives {
        let archive_dir = root.join(Category::Archives.dir_name());
        for archive in archives {
            let Some(kind) = ArchiveKind::detect(&archive) else {
                continue;
            };
            match unpack(&archive, kind, &archive_dir) {
                Ok(()) => {
                    report.extracted += 1;
                    if let Err(e) = fs::remove_file(&archive) {
                        report.fail(&archive, format!("unpacked but could not remove: {}", e));
                    }
                }
                Err(reason) => report.fail(&archive, reason),
            }
        }
    }

    if options.prune_empty {
        report.pruned = prune_vacated_dirs(root, &vacated);
    }

    info!(
        "event=classify status=ok moved={} extracted={} pruned={} failures={}",
        report.total_moved(),
        report.extracted,
        report.pruned,
        report.failures.len()
    );
    Ok(report)
}

/// Every regular file below `root`, skipping the top-level category folders.
fn collect_files(root: &Path, report: &mut ClassifyReport) -> Vec<PathBuf> {
    let walker = WalkDir::new(root).min_depth(1).into_iter().filter_entry(|entry| {
        !(entry.depth() == 1
            && entry.file_type().is_dir()
            && entry.file_name().to_str().is_some_and(Category::is_category_dir))
    });

    let mut files = Vec::new();
    for entry in walker {
        match entry {
            Ok(entry) if entry.file_type().is_file() => files.push(entry.into_path()),
            Ok(_) => {}
            Err(e) => {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
                report.fail(path, e);
            }
        }
    }
    files.sort();
    files
}

fn move_into_category(root: &Path, file: &Path, category: Category) -> std::result::Result<PathBuf, String> {
    let file_name = file
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| "file name is not valid UTF-8".to_string())?;
    let (stem, suffix) = split_name(file_name);
    let target_dir = root.join(category.dir_name());
    let target = target_dir.join(format!("{}{}", normalize_stem(stem), suffix));

    if target.exists() {
        return Err(format!(
            "name collision: {} already exists",
            target.strip_prefix(root).unwrap_or(&target).display()
        ));
    }
    fs::create_dir_all(&target_dir).map_err(|e| e.to_string())?;
    fs::rename(file, &target).map_err(|e| e.to_string())?;
    Ok(target)
}

/// Splits a file name into stem and suffix (with the dot), keeping
/// `.tar.gz` together.
pub fn split_name(file_name: &str) -> (&str, &str) {
    let lower = file_name.to_ascii_lowercase();
    if lower.ends_with(".tar.gz") && file_name.len() > ".tar.gz".len() {
        return file_name.split_at(file_name.len() - ".tar.gz".len());
    }
    match file_name.rfind('.') {
        Some(0) | None => (file_name, ""),
        Some(dot) => file_name.split_at(dot),
    }
}

/// Replaces every character outside `[A-Za-z0-9]` with `_` and lowercases.
pub fn normalize_stem(stem: &str) -> String {
    stem.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArchiveKind {
    Zip,
    Tar,
    TarGz,
}

impl ArchiveKind {
    fn detect(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_ascii_lowercase();
        if name.ends_with(".zip") {
            Some(ArchiveKind::Zip)
        } else if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Some(ArchiveKind::TarGz)
        } else if name.ends_with(".tar") {
            Some(ArchiveKind::Tar)
        } else {
            None
        }
    }
}

fn unpack(archive: &Path, kind: ArchiveKind, archive_dir: &Path) -> std::result::Result<(), String> {
    let file_name = archive
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| "file name is not valid UTF-8".to_string())?;
    let (stem, _) = split_name(file_name);
    let dest = archive_dir.join(stem);
    if dest.exists() {
        return Err(format!("cannot unpack: {} already exists", dest.display()));
    }

    fs::create_dir_all(&dest).map_err(|e| e.to_string())?;
    let file = File::open(archive).map_err(|e| e.to_string())?;
    let outcome = match kind {
        ArchiveKind::Zip => ZipArchive::new(BufReader::new(file))
            .and_then(|mut zip| zip.extract(&dest))
            .map_err(|e| format!("cannot unpack zip: {}", e)),
        ArchiveKind::Tar => unpack_tar(BufReader::new(file), &dest),
        ArchiveKind::TarGz => unpack_tar(GzDecoder::new(BufReader::new(file)), &dest),
    };

    if outcome.is_err() {
        let _ = fs::remove_dir_all(&dest);
    }
    outcome
}

fn unpack_tar<R: Read>(reader: R, dest: &Path) -> std::result::Result<(), String> {
    tar::Archive::new(reader)
        .unpack(dest)
        .map_err(|e| format!("cannot unpack tar: {}", e))
}

/// Removes the directories files were moved out of, and their parents below
/// `root`, once they are empty. Directories that were empty before the sweep
/// are left alone. Returns how many were removed.
fn prune_vacated_dirs(root: &Path, vacated: &BTreeSet<PathBuf>) -> usize {
    let mut candidates = BTreeSet::new();
    for dir in vacated {
        for ancestor in dir.ancestors() {
            if ancestor == root || !ancestor.starts_with(root) {
                break;
            }
            candidates.insert(ancestor.to_path_buf());
        }
    }

    // Deepest first, so a parent is checked after its children are gone.
    let mut dirs: Vec<PathBuf> = candidates.into_iter().collect();
    dirs.sort_by_key(|dir| std::cmp::Reverse(dir.components().count()));

    dirs.into_iter()
        .filter(|dir| is_empty_dir(dir) && fs::remove_dir(dir).is_ok())
        .count()
}

fn is_empty_dir(dir: &Path) -> bool {
    fs::read_dir(dir)
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(false)
}

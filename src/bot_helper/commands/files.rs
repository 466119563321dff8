use crate::classify::{classify_and_move, ClassifyOptions};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use std::path::Path;

/// Sorts the files under `root` and turns the report into messages.
pub fn run(root: &Path, options: &ClassifyOptions) -> Result<CmdResult> {
    let report = classify_and_move(root, options)?;
    let mut result = CmdResult::default();

    for failure in &report.failures {
        result.add_message(CmdMessage::warning(format!(
            "Skipped {}: {}",
            failure.path.display(),
            failure.reason
        )));
    }
    result.add_message(CmdMessage::success(format!(
        "Sorted {} file(s) in {}",
        report.total_moved(),
        root.display()
    )));

    Ok(result.with_classify(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Category;
    use crate::commands::MessageLevel;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn reports_moves_and_skips() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("x")).unwrap();
        fs::write(dir.path().join("a.txt"), "1").unwrap();
        fs::write(dir.path().join("x/A.txt"), "2").unwrap();
        fs::write(dir.path().join("clip.mov"), "3").unwrap();

        let result = run(dir.path(), &ClassifyOptions::default()).unwrap();
        let report = result.classify.as_ref().unwrap();
        assert_eq!(report.count(Category::Documents), 1);
        assert_eq!(report.count(Category::Video), 1);

        let levels: Vec<_> = result.messages.iter().map(|m| m.level).collect();
        assert_eq!(levels, vec![MessageLevel::Warning, MessageLevel::Success]);
        assert!(result.messages[1].content.starts_with("Sorted 2 file(s)"));
    }
}

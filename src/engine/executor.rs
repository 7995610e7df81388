#![forbid(unsafe_code)]

//! Parallel normalization checks across files
//!
//! The CheckEngine reads each discovered file, normalizes its content and
//! reports the files whose content would change. Files are processed in
//! parallel with rayon; results come back ordered by path.

use crate::engine::file_walker::FileEntry;
use crate::normalize::Normalizer;
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

/// A file whose content is not normalized
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// File path
    pub file: PathBuf,
    /// First line (1-indexed) that differs after normalization
    pub line: usize,
    /// That line as found in the file
    pub found: String,
    /// That line after normalization (empty if normalization removed it)
    pub expected: String,
}

/// Result of checking all files
#[derive(Debug, Default)]
pub struct CheckResult {
    /// Files that are not normalized, ordered by path
    pub findings: Vec<Finding>,
    /// Number of files read and checked
    pub files_checked: usize,
    /// Number of files skipped (unreadable or not UTF-8)
    pub files_skipped: usize,
}

impl CheckResult {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

enum FileOutcome {
    Clean,
    Dirty(Finding),
    Skipped,
}

/// Checks files against one normalizer
pub struct CheckEngine {
    normalizer: Arc<Normalizer>,
}

impl CheckEngine {
    pub fn new(normalizer: Normalizer) -> Self {
        Self {
            normalizer: Arc::new(normalizer),
        }
    }

    /// Check every file in parallel
    pub fn execute(&self, files: Vec<FileEntry>) -> CheckResult {
        let outcomes: Vec<FileOutcome> = files.par_iter().map(|file| self.check_file(file)).collect();

        let mut result = CheckResult::default();
        for outcome in outcomes {
            match outcome {
                FileOutcome::Clean => result.files_checked += 1,
                FileOutcome::Dirty(finding) => {
                    result.files_checked += 1;
                    result.findings.push(finding);
                }
                FileOutcome::Skipped => result.files_skipped += 1,
            }
        }
        result.findings.sort_by(|a, b| a.file.cmp(&b.file));
        result
    }

    fn check_file(&self, file: &FileEntry) -> FileOutcome {
        // Unreadable or non-UTF-8 files are skipped, not fatal
        let content = match fs::read_to_string(&file.path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(file = %file.path.display(), error = %e, "skipping file");
                return FileOutcome::Skipped;
            }
        };

        match check_text(&self.normalizer, &content) {
            None => {
                tracing::debug!(file = %file.path.display(), "normalized");
                FileOutcome::Clean
            }
            Some((line, found, expected)) => FileOutcome::Dirty(Finding {
                file: file.path.clone(),
                line,
                found,
                expected,
            }),
        }
    }
}

/// Checks one text, ignoring a single final line feed
///
/// Returns the first differing line number and its found/expected content,
/// or `None` if the text is normalized.
pub fn check_text(normalizer: &Normalizer, content: &str) -> Option<(usize, String, String)> {
    let body = content.strip_suffix('\n').unwrap_or(content);
    if normalizer.is_normalized(body) {
        return None;
    }

    let normalized = normalizer.normalize(body);
    let mut found_lines = body.split('\n');
    let mut expected_lines = normalized.split('\n');
    let mut line = 1;
    loop {
        match (found_lines.next(), expected_lines.next()) {
            (Some(found), Some(expected)) if found == expected => line += 1,
            (found, expected) => {
                return Some((
                    line,
                    found.unwrap_or_default().to_string(),
                    expected.unwrap_or_default().to_string(),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalizer;
    use crate::types::NormalizerKind;

    fn cjk() -> Normalizer {
        normalizer(NormalizerKind::Cjk).clone()
    }

    #[test]
    fn test_check_text_clean() {
        assert_eq!(check_text(&cjk(), ""), None);
        assert_eq!(check_text(&cjk(), "コンニチハ 世界\n"), None);
        assert_eq!(check_text(&cjk(), "一\n二\n三"), None);
    }

    #[test]
    fn test_check_text_reports_first_differing_line() {
        let result = check_text(&cjk(), "一\nｺﾝﾆﾁﾊ\n三\n");
        assert_eq!(
            result,
            Some((2, "ｺﾝﾆﾁﾊ".to_string(), "コンニチハ".to_string()))
        );
    }

    #[test]
    fn test_check_text_removed_lines() {
        // The blank line collapses, so line 2 becomes "b"
        let result = check_text(&cjk(), "a\n\nb");
        assert_eq!(result, Some((2, String::new(), "b".to_string())));
    }

    #[test]
    fn test_execute_orders_and_counts() {
        let temp = tempfile::TempDir::new().unwrap();
        let dirty_b = temp.path().join("b.txt");
        let dirty_a = temp.path().join("a.txt");
        let clean = temp.path().join("c.txt");
        let binary = temp.path().join("d.bin");
        fs::write(&dirty_b, "ﾊﾞｰ\n").unwrap();
        fs::write(&dirty_a, "Ｈｅｌｌｏ\n").unwrap();
        fs::write(&clean, "バー\n").unwrap();
        fs::write(&binary, [0xFF, 0xFE, 0x00]).unwrap();

        let engine = CheckEngine::new(cjk());
        let files = vec![dirty_b.clone(), clean, binary, dirty_a.clone()]
            .into_iter()
            .map(FileEntry::new)
            .collect();
        let result = engine.execute(files);

        assert_eq!(result.files_checked, 3);
        assert_eq!(result.files_skipped, 1);
        assert!(!result.is_clean());
        let paths: Vec<&PathBuf> = result.findings.iter().map(|f| &f.file).collect();
        assert_eq!(paths, vec![&dirty_a, &dirty_b]);
        assert_eq!(result.findings[0].expected, "Hello");
    }
}

//! File discovery and traversal with gitignore support
//!
//! Walks a directory tree with the ignore crate (respecting `.gitignore`) and
//! filters files with globset include/exclude patterns. Patterns are matched
//! against the path relative to the walk root.

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during file walking
#[derive(Debug, Error)]
pub enum FileWalkerError {
    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        source: globset::Error,
    },

    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reason why a file was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// File did not match include patterns, or matched an exclude pattern
    ExcludedByPattern,
    /// Entry is not a regular file (e.g., directory)
    NotAFile,
}

/// Result of file walking - either a file to check or a skipped entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkResult {
    /// File to be checked
    File(FileEntry),
    /// Entry that was skipped with reason
    Skipped { path: PathBuf, reason: SkipReason },
}

/// A discovered file
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FileEntry {
    /// Path as produced by the walk (root joined with the relative path)
    pub path: PathBuf,
}

impl FileEntry {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

/// Iterator over discovered files
pub struct FileWalker {
    root: PathBuf,
    walker: ignore::Walk,
    include_set: Option<GlobSet>,
    exclude_set: GlobSet,
    verbose: bool,
}

impl FileWalker {
    /// Creates a new FileWalker
    ///
    /// # Arguments
    /// * `root` - Root directory (or single file) to walk
    /// * `include` - Include patterns (empty means include all)
    /// * `exclude` - Exclude patterns (applied after include)
    pub fn new(root: &Path, include: &[String], exclude: &[String]) -> Result<Self, FileWalkerError> {
        Self::with_verbose(root, include, exclude, false)
    }

    /// Creates a new FileWalker that also reports skipped entries
    pub fn with_verbose(
        root: &Path,
        include: &[String],
        exclude: &[String],
        verbose: bool,
    ) -> Result<Self, FileWalkerError> {
        let walker = WalkBuilder::new(root)
            .hidden(false) // Don't skip hidden files by default
            .git_ignore(true) // Respect .gitignore
            .build();

        let include_set = if include.is_empty() {
            None
        } else {
            Some(Self::build_globset(include)?)
        };

        // Always exclude .git directory, merging with user-provided excludes
        let mut exclude_patterns = Vec::from(exclude);
        exclude_patterns.push("**/.git/**".to_string());
        let exclude_set = Self::build_globset(&exclude_patterns)?;

        Ok(Self {
            root: root.to_path_buf(),
            walker,
            include_set,
            exclude_set,
            verbose,
        })
    }

    /// Builds a GlobSet from patterns
    fn build_globset(patterns: &[String]) -> Result<GlobSet, FileWalkerError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| FileWalkerError::InvalidGlob {
                pattern: pattern.clone(),
                source: e,
            })?;
            builder.add(glob);
        }
        builder.build().map_err(|e| FileWalkerError::InvalidGlob {
            pattern: "<globset>".to_string(),
            source: e,
        })
    }

    /// Walks the directory tree and returns an iterator over matching files
    pub fn walk(self) -> impl Iterator<Item = Result<FileEntry, FileWalkerError>> {
        self.walk_with_skip_info()
            .filter_map(|result| match result {
                Ok(WalkResult::File(file)) => Some(Ok(file)),
                Ok(WalkResult::Skipped { .. }) => None,
                Err(e) => Some(Err(e)),
            })
    }

    /// Walks the directory tree and returns an iterator with skip information
    pub fn walk_with_skip_info(self) -> impl Iterator<Item = Result<WalkResult, FileWalkerError>> {
        let root = self.root;
        let include_set = self.include_set;
        let exclude_set = self.exclude_set;
        let verbose = self.verbose;

        self.walker.filter_map(move |result| {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => return Some(Err(FileWalkerError::Walk(e))),
            };
            let path = entry.path();

            let skipped = |reason: SkipReason| -> Option<Result<WalkResult, FileWalkerError>> {
                verbose.then(|| {
                    Ok(WalkResult::Skipped {
                        path: path.to_path_buf(),
                        reason,
                    })
                })
            };

            // Only process files (not directories)
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                return skipped(SkipReason::NotAFile);
            }

            // A single-file root has no meaningful relative path; match its name
            let relative = match path.strip_prefix(&root) {
                Ok(rel) if !rel.as_os_str().is_empty() => rel,
                _ => Path::new(path.file_name().unwrap_or(path.as_os_str())),
            };

            // If include patterns are specified, path must match at least one
            if let Some(ref include_set) = include_set
                && !include_set.is_match(relative)
            {
                return skipped(SkipReason::ExcludedByPattern);
            }

            if exclude_set.is_match(relative) || exclude_set.is_match(path) {
                return skipped(SkipReason::ExcludedByPattern);
            }

            Some(Ok(WalkResult::File(FileEntry::new(path.to_path_buf()))))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn names(root: &Path, include: &[&str], exclude: &[&str]) -> Vec<String> {
        let include: Vec<String> = include.iter().map(|s| s.to_string()).collect();
        let exclude: Vec<String> = exclude.iter().map(|s| s.to_string()).collect();
        let mut names: Vec<String> = FileWalker::new(root, &include, &exclude)
            .unwrap()
            .walk()
            .map(|entry| {
                let entry = entry.unwrap();
                entry
                    .path
                    .strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_walk_all_files() {
        let temp = tempfile::TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "あ").unwrap();
        fs::create_dir(temp.path().join("docs")).unwrap();
        fs::write(temp.path().join("docs/b.md"), "い").unwrap();

        assert_eq!(names(temp.path(), &[], &[]), vec!["a.txt", "docs/b.md"]);
    }

    #[test]
    fn test_include_patterns() {
        let temp = tempfile::TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "").unwrap();
        fs::write(temp.path().join("b.md"), "").unwrap();

        assert_eq!(names(temp.path(), &["**/*.txt"], &[]), vec!["a.txt"]);
    }

    #[test]
    fn test_exclude_patterns() {
        let temp = tempfile::TempDir::new().unwrap();
        fs::create_dir(temp.path().join("vendor")).unwrap();
        fs::write(temp.path().join("vendor/x.txt"), "").unwrap();
        fs::write(temp.path().join("y.txt"), "").unwrap();

        assert_eq!(names(temp.path(), &[], &["vendor/**"]), vec!["y.txt"]);
    }

    #[test]
    fn test_git_directory_always_excluded() {
        let temp = tempfile::TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".git")).unwrap();
        fs::write(temp.path().join(".git/HEAD"), "ref").unwrap();
        fs::write(temp.path().join("z.txt"), "").unwrap();

        assert_eq!(names(temp.path(), &[], &[]), vec!["z.txt"]);
    }

    #[test]
    fn test_invalid_glob() {
        let temp = tempfile::TempDir::new().unwrap();
        let result = FileWalker::new(temp.path(), &["[bad".to_string()], &[]);
        assert!(matches!(result, Err(FileWalkerError::InvalidGlob { .. })));
    }

    #[test]
    fn test_skip_info_in_verbose_mode() {
        let temp = tempfile::TempDir::new().unwrap();
        fs::write(temp.path().join("keep.txt"), "").unwrap();
        fs::write(temp.path().join("drop.bin"), "").unwrap();

        let walker = FileWalker::with_verbose(temp.path(), &["*.txt".to_string()], &[], true).unwrap();
        let skipped: Vec<SkipReason> = walker
            .walk_with_skip_info()
            .filter_map(|r| match r.unwrap() {
                WalkResult::Skipped { reason, .. } => Some(reason),
                WalkResult::File(_) => None,
            })
            .collect();

        assert!(skipped.contains(&SkipReason::ExcludedByPattern));
        assert!(skipped.contains(&SkipReason::NotAFile));
    }

    #[test]
    fn test_single_file_root() {
        let temp = tempfile::TempDir::new().unwrap();
        let file = temp.path().join("only.txt");
        fs::write(&file, "").unwrap();

        let entries: Vec<FileEntry> = FileWalker::new(&file, &["*.txt".to_string()], &[])
            .unwrap()
            .walk()
            .map(|e| e.unwrap())
            .collect();
        assert_eq!(entries, vec![FileEntry::new(file)]);
    }
}

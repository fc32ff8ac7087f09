//! Source selection
//!
//! A [`SourcePattern`] is a glob anchored at the invocation directory. It
//! enumerates the ordered [`SourceFileSet`] for a build and decides which
//! watch events concern a source file.

use std::path::{Component, Path, PathBuf};

use glob::{MatchOptions, Pattern};

use crate::error::{SpartanError, SpartanResult};

const GLOB_META: &[char] = &['*', '?', '['];

fn match_options() -> MatchOptions {
    MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    }
}

/// Glob pattern plus the directory it is relative to
#[derive(Debug, Clone)]
pub struct SourcePattern {
    root: PathBuf,
    raw: String,
    pattern: Pattern,
}

impl SourcePattern {
    /// Parse `pattern`, relative to `root` unless it is absolute
    pub fn new(root: impl Into<PathBuf>, pattern: &str) -> SpartanResult<Self> {
        // Event paths never carry `./`, so neither may the pattern
        let mut pattern = pattern;
        while let Some(rest) = pattern.strip_prefix("./") {
            pattern = rest.trim_start_matches('/');
        }

        let compiled = Pattern::new(pattern).map_err(|e| SpartanError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            root: root.into(),
            raw: pattern.to_string(),
            pattern: compiled,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Enumerate matching files in glob order.
    ///
    /// A fresh set is produced on every call; directories are skipped.
    pub fn expand(&self) -> SpartanResult<SourceFileSet> {
        let full = if Path::new(&self.raw).is_absolute() {
            self.raw.clone()
        } else {
            let root = Pattern::escape(&self.root.to_string_lossy());
            format!("{}/{}", root.trim_end_matches('/'), self.raw)
        };

        let entries =
            glob::glob_with(&full, match_options()).map_err(|e| SpartanError::InvalidPattern {
                pattern: self.raw.clone(),
                message: e.to_string(),
            })?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| SpartanError::Enumerate {
                path: e.path().to_path_buf(),
                message: e.error().to_string(),
            })?;
            if path.is_file() {
                paths.push(path);
            }
        }

        tracing::debug!(pattern = %self.raw, count = paths.len(), "expanded sources");
        Ok(SourceFileSet { paths })
    }

    /// Whether `path` (absolute, as reported by the watcher) is selected.
    ///
    /// Deleted files are matched too, so this never touches the disk.
    pub fn matches(&self, path: &Path) -> bool {
        if Path::new(&self.raw).is_absolute() {
            return self.pattern.matches_path_with(path, match_options());
        }

        if let Ok(rel) = path.strip_prefix(&self.root) {
            return self.pattern.matches_path_with(rel, match_options());
        }

        // notify reports resolved paths (e.g. /private/var on macOS)
        self.root
            .canonicalize()
            .ok()
            .and_then(|canonical| path.strip_prefix(canonical).ok().map(Path::to_path_buf))
            .is_some_and(|rel| self.pattern.matches_path_with(&rel, match_options()))
    }

    /// Directory to register with the watcher: the pattern's literal prefix.
    pub fn watch_dir(&self) -> PathBuf {
        let mut literal = PathBuf::new();
        let mut has_glob = false;
        for component in Path::new(&self.raw).components() {
            if let Component::Normal(part) = component {
                if part.to_string_lossy().contains(GLOB_META) {
                    has_glob = true;
                    break;
                }
            }
            literal.push(component);
        }

        // A pattern without wildcards names a single file
        if !has_glob {
            literal.pop();
        }

        self.root.join(literal)
    }

    /// `**` needs a recursive watch
    pub fn is_recursive(&self) -> bool {
        self.raw.contains("**")
    }
}

/// Ordered source paths for one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceFileSet {
    paths: Vec<PathBuf>,
}

impl SourceFileSet {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.paths.iter()
    }

    /// Drop `path` from the set (keeps the bundle out of its own inputs)
    pub fn without(mut self, path: &Path) -> Self {
        self.paths.retain(|p| p != path);
        self
    }

    /// Keep only the paths `keep` accepts
    pub fn retain(mut self, keep: impl FnMut(&PathBuf) -> bool) -> Self {
        self.paths.retain(keep);
        self
    }
}

impl<'a> IntoIterator for &'a SourceFileSet {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, rel).unwrap();
    }

    #[test]
    fn expand_returns_lexicographic_order() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "src/c.scss");
        touch(dir.path(), "src/a.scss");
        touch(dir.path(), "src/b.scss");
        touch(dir.path(), "src/notes.txt");

        let pattern = SourcePattern::new(dir.path(), "src/*.scss").unwrap();
        let set = pattern.expand().unwrap();

        let names: Vec<_> = set
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.scss", "b.scss", "c.scss"]);
    }

    #[test]
    fn expand_skips_directories() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "src/a.scss");
        fs::create_dir_all(dir.path().join("src/dir.scss")).unwrap();

        let set = SourcePattern::new(dir.path(), "src/*.scss")
            .unwrap()
            .expand()
            .unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn expand_with_no_matches_is_empty() {
        let dir = tempdir().unwrap();
        let set = SourcePattern::new(dir.path(), "src/*.scss")
            .unwrap()
            .expand()
            .unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn star_does_not_cross_directories() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "src/a.scss");
        touch(dir.path(), "src/nested/b.scss");

        let pattern = SourcePattern::new(dir.path(), "src/*.scss").unwrap();
        assert_eq!(pattern.expand().unwrap().len(), 1);
        assert!(!pattern.matches(&dir.path().join("src/nested/b.scss")));

        let deep = SourcePattern::new(dir.path(), "src/**/*.scss").unwrap();
        assert_eq!(deep.expand().unwrap().len(), 2);
    }

    #[test]
    fn without_removes_only_that_path() {
        let set = SourceFileSet::new(vec![
            PathBuf::from("/p/src/a.scss"),
            PathBuf::from("/p/dist/spartan.scss"),
        ]);

        let set = set.without(Path::new("/p/dist/spartan.scss"));

        assert_eq!(set.paths(), &[PathBuf::from("/p/src/a.scss")]);
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let err = SourcePattern::new("/tmp", "src/[.scss").unwrap_err();
        assert!(matches!(err, SpartanError::InvalidPattern { .. }));
    }

    #[test]
    fn matches_absolute_event_paths() {
        let pattern = SourcePattern::new("/project", "src/*.scss").unwrap();

        assert!(pattern.matches(Path::new("/project/src/base.scss")));
        assert!(!pattern.matches(Path::new("/project/src/base.css")));
        assert!(!pattern.matches(Path::new("/project/dist/spartan.scss")));
        assert!(!pattern.matches(Path::new("/elsewhere/src/base.scss")));
    }

    #[test]
    fn leading_dot_slash_is_normalised() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "src/a.scss");
        touch(dir.path(), "src/b.scss");

        let pattern = SourcePattern::new(dir.path(), "./src/*.scss").unwrap();

        assert_eq!(pattern.as_str(), "src/*.scss");
        assert_eq!(pattern.expand().unwrap().len(), 2);
        assert!(pattern.matches(&dir.path().join("src/a.scss")));
        assert_eq!(pattern.watch_dir(), dir.path().join("src"));
    }

    #[test]
    fn watch_dir_is_literal_prefix() {
        let pattern = SourcePattern::new("/project", "src/*.scss").unwrap();
        assert_eq!(pattern.watch_dir(), PathBuf::from("/project/src"));
        assert!(!pattern.is_recursive());

        let deep = SourcePattern::new("/project", "styles/**/*.scss").unwrap();
        assert_eq!(deep.watch_dir(), PathBuf::from("/project/styles"));
        assert!(deep.is_recursive());

        let single = SourcePattern::new("/project", "src/main.scss").unwrap();
        assert_eq!(single.watch_dir(), PathBuf::from("/project/src"));
    }
}

//! Filtering by glob patterns on the last path segment.

use std::cell::RefCell;
use std::fmt;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::config::FileNamePathFilterConfig;
use crate::error::FilterError;
use crate::filter::{FilterState, PathFilter};
use crate::Path;

struct Patterns {
    sources: Vec<String>,
    set: GlobSet,
}

impl Patterns {
    fn compile(sources: Vec<String>, case_insensitive: bool) -> Result<Self, FilterError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &sources {
            let glob = GlobBuilder::new(pattern)
                .case_insensitive(case_insensitive)
                .build()
                .map_err(|source| FilterError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })?;
            builder.add(glob);
        }
        let set = builder
            .build()
            .map_err(|source| FilterError::InvalidPattern {
                pattern: sources.join(" "),
                source,
            })?;
        Ok(Patterns { sources, set })
    }
}

/// Accepts paths whose name matches any of a set of glob patterns.
///
/// The root path has no name and always passes.
///
/// # Example
///
/// ```rust
/// use pathkit_path::{FileNamePathFilter, Path, PathFilter};
///
/// let filter = FileNamePathFilter::new(["*.gfr"]).unwrap();
/// assert!(filter.matches(&Path::parse("/scripts/comp.gfr").unwrap()));
/// assert!(!filter.matches(&Path::parse("/scripts/notes.txt").unwrap()));
/// ```
pub struct FileNamePathFilter {
    state: FilterState,
    case_insensitive: bool,
    patterns: RefCell<Patterns>,
}

impl FileNamePathFilter {
    pub fn new<I, S>(patterns: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_config(&FileNamePathFilterConfig::new(patterns))
    }

    pub fn from_config(config: &FileNamePathFilterConfig) -> Result<Self, FilterError> {
        let patterns = Patterns::compile(config.patterns.clone(), config.case_insensitive)?;
        Ok(FileNamePathFilter {
            state: FilterState::with_enabled(config.enabled),
            case_insensitive: config.case_insensitive,
            patterns: RefCell::new(patterns),
        })
    }

    /// Describe this filter's current settings.
    pub fn config(&self) -> FileNamePathFilterConfig {
        FileNamePathFilterConfig {
            patterns: self.patterns(),
            case_insensitive: self.case_insensitive,
            enabled: self.enabled(),
        }
    }

    pub fn patterns(&self) -> Vec<String> {
        self.patterns.borrow().sources.clone()
    }

    pub fn case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    /// Replace the patterns, notifying subscribers if they differ.
    ///
    /// On error the previous patterns stay in place.
    pub fn set_patterns<I, S>(&self, patterns: I) -> Result<(), FilterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sources: Vec<String> = patterns.into_iter().map(Into::into).collect();
        if self.patterns.borrow().sources == sources {
            return Ok(());
        }

        let compiled = Patterns::compile(sources, self.case_insensitive)?;
        tracing::debug!(patterns = ?compiled.sources, "file name filter patterns changed");
        self.patterns.replace(compiled);
        self.state.notify_changed();
        Ok(())
    }
}

impl PathFilter for FileNamePathFilter {
    fn state(&self) -> &FilterState {
        &self.state
    }

    fn matches(&self, path: &Path) -> bool {
        match path.name() {
            Some(name) => self.patterns.borrow().set.is_match(name.as_str()),
            None => true,
        }
    }
}

impl fmt::Debug for FileNamePathFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileNamePathFilter")
            .field("patterns", &self.patterns.borrow().sources)
            .field("case_insensitive", &self.case_insensitive)
            .field("enabled", &self.enabled())
            .finish()
    }
}

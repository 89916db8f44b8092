//! Serializable filter descriptions.
//!
//! Applications store filters in their preferences or UI state as plain
//! data and build the live filter with [`FileNamePathFilter::from_config`].
//!
//! [`FileNamePathFilter::from_config`]: crate::FileNamePathFilter::from_config

use serde::{Deserialize, Serialize};

/// Describes a [`crate::FileNamePathFilter`].
///
/// ```rust
/// use pathkit_path::FileNamePathFilterConfig;
///
/// let config: FileNamePathFilterConfig =
///     serde_json::from_str(r#"{ "patterns": ["*.gfr"] }"#).unwrap();
/// assert!(config.enabled);
/// assert!(!config.case_insensitive);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileNamePathFilterConfig {
    /// Glob patterns matched against the last segment of a path.
    pub patterns: Vec<String>,
    pub case_insensitive: bool,
    pub enabled: bool,
}

impl Default for FileNamePathFilterConfig {
    fn default() -> Self {
        FileNamePathFilterConfig {
            patterns: Vec::new(),
            case_insensitive: false,
            enabled: true,
        }
    }
}

impl FileNamePathFilterConfig {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FileNamePathFilterConfig {
            patterns: patterns.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }
}

//! Absolute hierarchical paths with change notification.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use pathkit_signal::{ScopedConnection, Signal};

use crate::error::PathError;
use crate::filter::{same_filter, PathFilter};

/// Separates segments in the string form of a path.
pub const SEPARATOR: char = '/';

struct PathInner {
    segments: RefCell<Vec<String>>,
    filter: RefCell<Option<Rc<dyn PathFilter>>>,
    // Relays the attached filter's change signal into `changed`.
    filter_connection: RefCell<Option<ScopedConnection>>,
    changed: Signal<Path>,
}

/// An absolute path into a hierarchy, such as `/scripts/comp.gfr`.
///
/// A path is an ordered list of non-empty segments, root first, plus an
/// optional [`PathFilter`] deciding which paths below it are visible. Every
/// mutation fires [`Path::changed_signal`] before returning, as does any
/// change to the attached filter.
///
/// Equality, ordering and hashing consider the segments only. Cloning copies
/// the segments and attaches the same filter, but never copies subscribers.
///
/// # Example
///
/// ```rust
/// use pathkit_path::Path;
///
/// let mut path = Path::parse("/a//b/").unwrap();
/// assert_eq!(path.len(), 2);
/// assert_eq!(path.to_string(), "/a/b");
///
/// path.append("c").unwrap();
/// assert_eq!(path.to_string(), "/a/b/c");
/// ```
pub struct Path {
    inner: Rc<PathInner>,
}

impl Path {
    fn from_validated(segments: Vec<String>) -> Self {
        Path {
            inner: Rc::new(PathInner {
                segments: RefCell::new(segments),
                filter: RefCell::new(None),
                filter_connection: RefCell::new(None),
                changed: Signal::new(),
            }),
        }
    }

    /// The path with no segments, printed as `/`.
    pub fn root() -> Self {
        Self::from_validated(Vec::new())
    }

    /// Parse an absolute path string.
    ///
    /// # Path Syntax
    ///
    /// - The string must start with `/`
    /// - Segments are separated by `/`
    /// - Empty segments are ignored (normalizes `//` and trailing `/`)
    pub fn parse(text: &str) -> Result<Self, PathError> {
        Ok(Self::from_validated(Self::split(text)?))
    }

    /// Create a path from segments, taken verbatim without splitting.
    ///
    /// Fails if any segment is empty or contains `/`.
    pub fn from_segments<I, S>(segments: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self::from_validated(Self::validate_segments(segments)?))
    }

    /// Attach `filter` without firing the change signal.
    #[must_use]
    pub fn with_filter(self, filter: Rc<dyn PathFilter>) -> Self {
        self.attach_filter(Some(filter));
        self
    }

    fn split(text: &str) -> Result<Vec<String>, PathError> {
        if !text.starts_with(SEPARATOR) {
            return Err(PathError::InvalidPathSyntax {
                path: text.to_string(),
            });
        }

        Ok(text
            .split(SEPARATOR)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn validate_segment(segment: &str) -> Result<(), PathError> {
        if segment.is_empty() {
            return Err(PathError::InvalidSegment {
                segment: segment.to_string(),
                reason: "empty segment".to_string(),
            });
        }
        if segment.contains(SEPARATOR) {
            return Err(PathError::InvalidSegment {
                segment: segment.to_string(),
                reason: format!("contains '{}'", SEPARATOR),
            });
        }
        Ok(())
    }

    fn validate_segments<I, S>(segments: I) -> Result<Vec<String>, PathError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        for segment in &segments {
            Self::validate_segment(segment)?;
        }
        Ok(segments)
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.inner.segments.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether this is the root path `/`.
    pub fn is_root(&self) -> bool {
        self.is_empty()
    }

    /// The segment at `index`, counting from the root.
    pub fn segment(&self, index: usize) -> Result<String, PathError> {
        let segments = self.inner.segments.borrow();
        segments
            .get(index)
            .cloned()
            .ok_or(PathError::IndexOutOfRange {
                index,
                len: segments.len(),
            })
    }

    pub fn segments(&self) -> Vec<String> {
        self.inner.segments.borrow().clone()
    }

    /// The last segment, or `None` for the root.
    pub fn name(&self) -> Option<String> {
        self.inner.segments.borrow().last().cloned()
    }

    /// A copy of this path without its last segment, sharing its filter.
    ///
    /// Returns `None` for the root.
    pub fn parent(&self) -> Option<Path> {
        let segments = self.inner.segments.borrow();
        let (_, parent) = segments.split_last()?;
        let parent = Path::from_validated(parent.to_vec());
        parent.attach_filter(self.filter());
        Some(parent)
    }

    /// Tests if path has the given prefix.
    pub fn has_prefix(&self, prefix: &Path) -> bool {
        let segments = self.inner.segments.borrow();
        let prefix = prefix.inner.segments.borrow();
        prefix.len() <= segments.len() && *prefix == segments[..prefix.len()]
    }

    /// Replace the segment at `index`.
    ///
    /// Assigning the value the segment already holds is not a change and
    /// fires nothing.
    pub fn set_segment(&mut self, index: usize, value: impl Into<String>) -> Result<(), PathError> {
        let value = value.into();
        {
            let mut segments = self.inner.segments.borrow_mut();
            let len = segments.len();
            let segment = segments
                .get_mut(index)
                .ok_or(PathError::IndexOutOfRange { index, len })?;
            Self::validate_segment(&value)?;
            if *segment == value {
                return Ok(());
            }
            *segment = value;
        }
        self.emit_changed();
        Ok(())
    }

    /// Add a segment at the end.
    pub fn append(&mut self, value: impl Into<String>) -> Result<(), PathError> {
        let value = value.into();
        Self::validate_segment(&value)?;
        self.inner.segments.borrow_mut().push(value);
        self.emit_changed();
        Ok(())
    }

    /// Remove and return the last segment. The root is left untouched.
    pub fn pop(&mut self) -> Option<String> {
        let popped = self.inner.segments.borrow_mut().pop();
        if popped.is_some() {
            self.emit_changed();
        }
        popped
    }

    /// Keep only the first `len` segments.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len() {
            return;
        }
        self.inner.segments.borrow_mut().truncate(len);
        self.emit_changed();
    }

    /// Replace every segment.
    pub fn set_segments<I, S>(&mut self, segments: I) -> Result<(), PathError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments = Self::validate_segments(segments)?;
        self.replace_segments(segments);
        Ok(())
    }

    /// Replace every segment with those parsed from `text`.
    pub fn set_from_string(&mut self, text: &str) -> Result<(), PathError> {
        let segments = Self::split(text)?;
        self.replace_segments(segments);
        Ok(())
    }

    fn replace_segments(&mut self, segments: Vec<String>) {
        if *self.inner.segments.borrow() == segments {
            return;
        }
        self.inner.segments.replace(segments);
        self.emit_changed();
    }

    /// The attached filter, if any.
    pub fn filter(&self) -> Option<Rc<dyn PathFilter>> {
        self.inner.filter.borrow().clone()
    }

    /// Attach `filter`, or detach the current one with `None`.
    ///
    /// Attaching the instance that is already attached is a no-op, even
    /// if another filter with the same criteria exists.
    pub fn set_filter(&mut self, filter: Option<Rc<dyn PathFilter>>) {
        if self.attach_filter(filter) {
            self.emit_changed();
        }
    }

    /// Swap the filter and its relay connection. Returns whether the
    /// attached instance changed.
    fn attach_filter(&self, filter: Option<Rc<dyn PathFilter>>) -> bool {
        let unchanged = match (self.inner.filter.borrow().as_ref(), filter.as_ref()) {
            (Some(current), Some(new)) => same_filter(current, new),
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return false;
        }

        // The previous relay must go before the new one is made.
        drop(self.inner.filter_connection.take());

        let connection = filter.as_ref().map(|f| {
            let weak = Rc::downgrade(&self.inner);
            f.changed_signal()
                .connect(move |_| {
                    if let Some(inner) = weak.upgrade() {
                        Path { inner }.emit_changed();
                    }
                })
                .scoped()
        });

        tracing::debug!(path = %self, attached = filter.is_some(), "path filter changed");
        *self.inner.filter_connection.borrow_mut() = connection;
        *self.inner.filter.borrow_mut() = filter;
        true
    }

    /// Keep the `candidates` accepted by the attached filter.
    ///
    /// With no filter, or a disabled one, every candidate is kept.
    pub fn filter_paths(&self, candidates: Vec<Path>) -> Vec<Path> {
        match self.filter() {
            Some(filter) => filter.filter(candidates),
            None => candidates,
        }
    }

    /// Fired with this path after every change to its segments or filter.
    pub fn changed_signal(&self) -> &Signal<Path> {
        &self.inner.changed
    }

    fn emit_changed(&self) {
        tracing::trace!(path = %self, "path changed");
        self.inner.changed.emit(self);
    }
}

impl Default for Path {
    fn default() -> Self {
        Self::root()
    }
}

impl Clone for Path {
    fn clone(&self) -> Self {
        let path = Path::from_validated(self.segments());
        path.attach_filter(self.filter());
        path
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let segments = self.inner.segments.borrow();
        if segments.is_empty() {
            return write!(f, "{}", SEPARATOR);
        }
        for segment in segments.iter() {
            write!(f, "{}{}", SEPARATOR, segment)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Path")
            .field("segments", &*self.inner.segments.borrow())
            .field("filtered", &self.inner.filter.borrow().is_some())
            .finish()
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Path::parse(s)
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        *self.inner.segments.borrow() == *other.inner.segments.borrow()
    }
}

impl Eq for Path {}

impl Hash for Path {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.segments.borrow().hash(state);
    }
}

impl PartialOrd for Path {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Path {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner
            .segments
            .borrow()
            .cmp(&*other.inner.segments.borrow())
    }
}

impl Serialize for Path {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D>(deserializer: D) -> Result<Path, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = Deserialize::deserialize(deserializer)?;

        Path::parse(&s).map_err(D::Error::custom)
    }
}

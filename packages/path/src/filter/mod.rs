//! Filters deciding which paths of a hierarchy are visible.
//!
//! A filter is shared by reference (`Rc<dyn PathFilter>`) and can be attached
//! to any number of [`Path`]s. Each filter carries a [`FilterState`]: an
//! enabled flag plus a signal fired whenever the flag or the filter's
//! criteria change. Paths relay that signal as their own change
//! notification.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use pathkit_signal::Signal;

use crate::Path;

mod compound;
mod file_name;

pub use compound::CompoundPathFilter;
pub use file_name::FileNamePathFilter;

/// Enabled flag and change signal shared by every filter implementation.
pub struct FilterState {
    enabled: Cell<bool>,
    changed: Signal<()>,
}

impl FilterState {
    /// A new, enabled state.
    pub fn new() -> Self {
        Self::with_enabled(true)
    }

    pub fn with_enabled(enabled: bool) -> Self {
        FilterState {
            enabled: Cell::new(enabled),
            changed: Signal::new(),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled.get()
    }

    /// Set the enabled flag, firing the change signal if the value differs.
    ///
    /// Returns whether anything changed.
    pub fn set_enabled(&self, enabled: bool) -> bool {
        if self.enabled.replace(enabled) == enabled {
            return false;
        }
        tracing::debug!(enabled, "filter enabled state changed");
        self.notify_changed();
        true
    }

    /// Fire the change signal. Implementations call this when their
    /// criteria change.
    pub fn notify_changed(&self) {
        self.changed.emit(&());
    }

    pub fn changed_signal(&self) -> &Signal<()> {
        &self.changed
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FilterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterState")
            .field("enabled", &self.enabled())
            .field("subscribers", &self.changed.num_slots())
            .finish()
    }
}

/// A predicate over paths that can be switched on and off.
///
/// Implementors provide the criteria through [`PathFilter::matches`] and
/// expose their [`FilterState`]; everything else has default behaviour.
pub trait PathFilter {
    fn state(&self) -> &FilterState;

    /// Whether `path` passes this filter's criteria, ignoring the enabled
    /// flag.
    fn matches(&self, path: &Path) -> bool;

    fn enabled(&self) -> bool {
        self.state().enabled()
    }

    fn set_enabled(&self, enabled: bool) {
        self.state().set_enabled(enabled);
    }

    /// Fired when the enabled flag or the criteria change.
    fn changed_signal(&self) -> &Signal<()> {
        self.state().changed_signal()
    }

    /// Keep the paths passing this filter, or all of them when disabled.
    fn filter(&self, paths: Vec<Path>) -> Vec<Path> {
        if !self.enabled() {
            return paths;
        }
        paths.into_iter().filter(|p| self.matches(p)).collect()
    }
}

/// Whether `a` and `b` are the same filter instance.
///
/// Two filters with identical criteria are still distinct attachments.
pub fn same_filter(a: &Rc<dyn PathFilter>, b: &Rc<dyn PathFilter>) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

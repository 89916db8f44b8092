//! A filter combining several others.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use pathkit_signal::ScopedConnection;

use crate::filter::{same_filter, FilterState, PathFilter};
use crate::Path;

struct Child {
    filter: Rc<dyn PathFilter>,
    // Relays the child's change signal into the compound's.
    _connection: ScopedConnection,
}

/// Accepts a path only when every enabled child filter accepts it.
///
/// A change to any child, or to the list of children, fires this filter's
/// own change signal.
pub struct CompoundPathFilter {
    state: FilterState,
    children: RefCell<Vec<Child>>,
}

impl CompoundPathFilter {
    pub fn new() -> Self {
        CompoundPathFilter {
            state: FilterState::new(),
            children: RefCell::new(Vec::new()),
        }
    }

    pub fn with_filters<I>(filters: I) -> Self
    where
        I: IntoIterator<Item = Rc<dyn PathFilter>>,
    {
        let compound = Self::new();
        let children: Vec<Child> = filters.into_iter().map(|f| compound.child(f)).collect();
        *compound.children.borrow_mut() = children;
        compound
    }

    fn child(&self, filter: Rc<dyn PathFilter>) -> Child {
        let relay = self.state.changed_signal().downgrade();
        let connection = filter
            .changed_signal()
            .connect(move |_| {
                relay.emit(&());
            })
            .scoped();
        Child {
            filter,
            _connection: connection,
        }
    }

    pub fn filters(&self) -> Vec<Rc<dyn PathFilter>> {
        self.children
            .borrow()
            .iter()
            .map(|c| Rc::clone(&c.filter))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.children.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a child filter. Adding a filter already present is a no-op.
    pub fn add_filter(&self, filter: Rc<dyn PathFilter>) {
        if self.contains(&filter) {
            return;
        }
        let child = self.child(filter);
        self.children.borrow_mut().push(child);
        tracing::debug!(children = self.len(), "compound filter child added");
        self.state.notify_changed();
    }

    /// Remove a child filter by identity. Returns whether it was present.
    pub fn remove_filter(&self, filter: &Rc<dyn PathFilter>) -> bool {
        let removed = {
            let mut children = self.children.borrow_mut();
            let before = children.len();
            children.retain(|c| !same_filter(&c.filter, filter));
            children.len() != before
        };
        if removed {
            tracing::debug!(children = self.len(), "compound filter child removed");
            self.state.notify_changed();
        }
        removed
    }

    /// Replace every child, notifying if the list differs by identity.
    pub fn set_filters<I>(&self, filters: I)
    where
        I: IntoIterator<Item = Rc<dyn PathFilter>>,
    {
        let filters: Vec<Rc<dyn PathFilter>> = filters.into_iter().collect();
        let current = self.filters();
        let unchanged = current.len() == filters.len()
            && current.iter().zip(&filters).all(|(a, b)| same_filter(a, b));
        if unchanged {
            return;
        }

        let children: Vec<Child> = filters.into_iter().map(|f| self.child(f)).collect();
        // Dropping the old children disconnects their relays.
        drop(self.children.replace(children));
        self.state.notify_changed();
    }

    fn contains(&self, filter: &Rc<dyn PathFilter>) -> bool {
        self.children
            .borrow()
            .iter()
            .any(|c| same_filter(&c.filter, filter))
    }
}

impl Default for CompoundPathFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl PathFilter for CompoundPathFilter {
    fn state(&self) -> &FilterState {
        &self.state
    }

    fn matches(&self, path: &Path) -> bool {
        self.children
            .borrow()
            .iter()
            .filter(|c| c.filter.enabled())
            .all(|c| c.filter.matches(path))
    }
}

impl fmt::Debug for CompoundPathFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompoundPathFilter")
            .field("children", &self.len())
            .field("enabled", &self.enabled())
            .finish()
    }
}

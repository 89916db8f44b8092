//! Handles to connected slots.

use std::cell::Cell;
use std::fmt;
use std::ops::Deref;
use std::rc::{Rc, Weak};

/// Per-slot flags shared between a signal's registry and its connections.
#[derive(Debug)]
pub(crate) struct SlotState {
    connected: Cell<bool>,
    blocked: Cell<bool>,
}

impl SlotState {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(SlotState {
            connected: Cell::new(true),
            blocked: Cell::new(false),
        })
    }

    pub(crate) fn is_connected(&self) -> bool {
        self.connected.get()
    }

    pub(crate) fn is_blocked(&self) -> bool {
        self.blocked.get()
    }

    pub(crate) fn mark_disconnected(&self) {
        self.connected.set(false);
    }

    /// Whether emission should call this slot.
    pub(crate) fn is_live(&self) -> bool {
        self.is_connected() && !self.is_blocked()
    }
}

/// Type-erased access to a signal's slot list, so that connections don't
/// carry the signal's argument type.
pub(crate) trait SlotRegistry {
    fn remove(&self, state: &Rc<SlotState>);
}

/// A handle to a slot connected to a [`crate::Signal`].
///
/// Dropping a `Connection` leaves the slot connected; call
/// [`Connection::disconnect`] or convert it into a [`ScopedConnection`] to
/// release it.
#[derive(Clone)]
pub struct Connection {
    registry: Weak<dyn SlotRegistry>,
    state: Rc<SlotState>,
}

impl Connection {
    pub(crate) fn new(registry: Weak<dyn SlotRegistry>, state: Rc<SlotState>) -> Self {
        Connection { registry, state }
    }

    /// Remove the slot from its signal.
    ///
    /// Safe to call repeatedly, from within the slot itself, or after the
    /// signal has been dropped.
    pub fn disconnect(&self) {
        if !self.state.is_connected() {
            return;
        }
        self.state.mark_disconnected();
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(&self.state);
        }
        tracing::trace!("slot disconnected");
    }

    /// Whether the slot is still registered with a live signal.
    pub fn connected(&self) -> bool {
        self.state.is_connected()
    }

    /// Keep the slot registered but skip it during emission.
    pub fn block(&self) {
        self.state.blocked.set(true);
    }

    /// Undo [`Connection::block`].
    pub fn unblock(&self) {
        self.state.blocked.set(false);
    }

    pub fn blocked(&self) -> bool {
        self.state.is_blocked()
    }

    /// Convert into a handle that disconnects when dropped.
    #[must_use]
    pub fn scoped(self) -> ScopedConnection {
        ScopedConnection { connection: self }
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("connected", &self.connected())
            .field("blocked", &self.blocked())
            .finish()
    }
}

/// A [`Connection`] that disconnects its slot when dropped.
#[derive(Debug)]
pub struct ScopedConnection {
    connection: Connection,
}

impl From<Connection> for ScopedConnection {
    fn from(connection: Connection) -> Self {
        connection.scoped()
    }
}

impl Deref for ScopedConnection {
    type Target = Connection;

    fn deref(&self) -> &Self::Target {
        &self.connection
    }
}

impl Drop for ScopedConnection {
    fn drop(&mut self) {
        self.connection.disconnect();
    }
}

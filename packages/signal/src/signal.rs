//! The signal type and its slot registry.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::connection::{Connection, SlotRegistry, SlotState};

type Callback<T> = Rc<dyn Fn(&T)>;

struct Slot<T: ?Sized> {
    state: Rc<SlotState>,
    callback: Callback<T>,
}

struct Registry<T: ?Sized> {
    slots: Vec<Slot<T>>,
}

impl<T: ?Sized> SlotRegistry for RefCell<Registry<T>> {
    fn remove(&self, state: &Rc<SlotState>) {
        self.borrow_mut()
            .slots
            .retain(|slot| !Rc::ptr_eq(&slot.state, state));
    }
}

/// Call every live slot of `registry` with `value`.
///
/// The slot list is snapshotted first so slots may connect or disconnect
/// while the emission is running. Slots connected during the emission are
/// not called; slots disconnected before their turn are skipped.
fn emit_to<T: ?Sized>(registry: &RefCell<Registry<T>>, value: &T) {
    let snapshot: Vec<(Rc<SlotState>, Callback<T>)> = registry
        .borrow()
        .slots
        .iter()
        .map(|slot| (Rc::clone(&slot.state), Rc::clone(&slot.callback)))
        .collect();

    tracing::trace!(slots = snapshot.len(), "emitting signal");

    for (state, callback) in snapshot {
        if state.is_live() {
            callback(value);
        }
    }
}

/// An ordered list of callbacks invoked synchronously on [`Signal::emit`].
///
/// `T` is the argument type handed to every slot by reference, and may be
/// unsized (`Signal<str>`, `Signal<dyn Trait>`).
pub struct Signal<T: ?Sized> {
    registry: Rc<RefCell<Registry<T>>>,
}

impl<T: ?Sized + 'static> Signal<T> {
    pub fn new() -> Self {
        Signal {
            registry: Rc::new(RefCell::new(Registry { slots: Vec::new() })),
        }
    }

    /// Register `slot`, to be called after every slot connected before it.
    pub fn connect<F>(&self, slot: F) -> Connection
    where
        F: Fn(&T) + 'static,
    {
        let state = SlotState::new();
        self.registry.borrow_mut().slots.push(Slot {
            state: Rc::clone(&state),
            callback: Rc::new(slot),
        });

        let registry: Weak<dyn SlotRegistry> = Rc::downgrade(&self.registry) as _;
        Connection::new(registry, state)
    }

    /// Call every connected, unblocked slot with `value`.
    pub fn emit(&self, value: &T) {
        emit_to(&self.registry, value);
    }

    /// Number of connected slots, blocked ones included.
    pub fn num_slots(&self) -> usize {
        self.registry.borrow().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.num_slots() == 0
    }

    /// A handle that can emit this signal without keeping it alive.
    pub fn downgrade(&self) -> WeakSignal<T> {
        WeakSignal {
            registry: Rc::downgrade(&self.registry),
        }
    }
}

impl<T: ?Sized + 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Drop for Signal<T> {
    fn drop(&mut self) {
        for slot in self.registry.borrow().slots.iter() {
            slot.state.mark_disconnected();
        }
    }
}

impl<T: ?Sized> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("slots", &self.registry.borrow().slots.len())
            .finish()
    }
}

/// A non-owning handle to a [`Signal`], used to relay one signal into
/// another without creating a reference cycle.
pub struct WeakSignal<T: ?Sized> {
    registry: Weak<RefCell<Registry<T>>>,
}

impl<T: ?Sized> WeakSignal<T> {
    /// Emit the signal if it is still alive. Returns whether it was.
    pub fn emit(&self, value: &T) -> bool {
        match self.registry.upgrade() {
            Some(registry) => {
                emit_to(&registry, value);
                true
            }
            None => false,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.registry.strong_count() > 0
    }
}

impl<T: ?Sized> Clone for WeakSignal<T> {
    fn clone(&self) -> Self {
        WeakSignal {
            registry: Weak::clone(&self.registry),
        }
    }
}

impl<T: ?Sized> fmt::Debug for WeakSignal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakSignal")
            .field("alive", &self.is_alive())
            .finish()
    }
}

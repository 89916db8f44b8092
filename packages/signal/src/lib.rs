//! Synchronous signals for single-threaded change notification.
//!
//! A [`Signal`] owns an ordered list of slots. Emitting a signal calls every
//! connected slot in connection order, on the calling thread, before `emit`
//! returns. Connecting returns a [`Connection`] handle which can disconnect or
//! temporarily block the slot; wrap it in a [`ScopedConnection`] to tie the
//! slot's lifetime to a scope.
//!
//! # Example
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use pathkit_signal::Signal;
//!
//! let signal: Signal<i32> = Signal::new();
//! let total = Rc::new(Cell::new(0));
//!
//! let t = Rc::clone(&total);
//! let connection = signal.connect(move |v| t.set(t.get() + *v));
//!
//! signal.emit(&2);
//! connection.disconnect();
//! signal.emit(&40);
//!
//! assert_eq!(total.get(), 2);
//! ```

mod connection;
mod signal;

pub use connection::{Connection, ScopedConnection};
pub use signal::{Signal, WeakSignal};

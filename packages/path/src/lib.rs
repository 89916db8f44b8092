//! Hierarchical paths with pluggable filters and change notification.
//!
//! - `Path`: an absolute path such as `/scripts/comp.gfr`, mutable in place,
//!   firing a signal on every change
//! - `PathFilter`: a switchable predicate attached to paths, whose changes the
//!   path relays as its own
//! - `FileNamePathFilter`, `CompoundPathFilter`: the stock filters
//!
//! # Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use pathkit_path::{FileNamePathFilter, Path, PathFilter};
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let mut path = Path::parse("/").unwrap();
//!
//! let s = Rc::clone(&seen);
//! let _connection = path
//!     .changed_signal()
//!     .connect(move |p: &Path| s.borrow_mut().push(p.to_string()));
//!
//! path.append("scripts").unwrap();
//!
//! let filter: Rc<dyn PathFilter> = Rc::new(FileNamePathFilter::new(["*.gfr"]).unwrap());
//! path.set_filter(Some(Rc::clone(&filter)));
//! filter.set_enabled(false);
//!
//! assert_eq!(*seen.borrow(), vec!["/scripts", "/scripts", "/scripts"]);
//! ```

mod config;
mod error;
pub mod filter;
mod path;

pub use config::FileNamePathFilterConfig;
pub use error::{Error, FilterError, PathError, Result};
pub use filter::{
    same_filter, CompoundPathFilter, FileNamePathFilter, FilterState, PathFilter,
};
pub use path::{Path, SEPARATOR};

// Re-export the signal types that appear in this crate's API
pub use pathkit_signal::{Connection, ScopedConnection, Signal, WeakSignal};

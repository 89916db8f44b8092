//! pathkit: hierarchical paths used to navigate nodes, files or any other
//! namespace uniformly.
//!
//! A [`Path`] is an absolute list of segments that notifies subscribers
//! whenever it changes, including when its attached [`PathFilter`] is
//! switched on or off. This crate re-exports both layers:
//!
//! - [`signal`]: the synchronous signal/connection primitive
//! - the path layer, re-exported at the top level
//!
//! ```rust
//! use std::rc::Rc;
//! use pathkit::{FileNamePathFilter, Path, PathFilter};
//!
//! let filter: Rc<dyn PathFilter> = Rc::new(FileNamePathFilter::new(["*.gfr"]).unwrap());
//! let dir = Path::parse("/scripts").unwrap().with_filter(filter);
//!
//! let visible = dir.filter_paths(vec![
//!     "/scripts/comp.gfr".parse().unwrap(),
//!     "/scripts/notes.txt".parse().unwrap(),
//! ]);
//! assert_eq!(visible.len(), 1);
//! ```

pub use pathkit_path::*;

pub mod signal {
    pub use pathkit_signal::*;
}

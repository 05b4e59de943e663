//! District and commune reference catalog for sangkat.
//!
//! The catalog is loaded once at startup and is read-only afterwards. It maps
//! districts to their communes and communes to coordinates, which is all the
//! estimation pipeline needs for geocoding.
//!
//! # Example
//!
//! ```
//! use sangkat_catalog::ReferenceCatalog;
//!
//! let catalog = ReferenceCatalog::embedded().unwrap();
//!
//! for commune in catalog.communes_in("daun-penh") {
//!     println!("{}: {}", commune.name(), commune.coordinates());
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/sangkat-estimate/sangkat/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod catalog;
mod error;

pub use catalog::{COMMUNE_FILE, DISTRICT_FILE, ReferenceCatalog};
pub use error::{DataLoadError, Result};

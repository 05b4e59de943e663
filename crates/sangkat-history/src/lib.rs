//! Search history storage for sangkat.
//!
//! - [`SearchHistory`] - Append/read interface used by the estimation pipeline
//! - [`SqliteHistory`] - `SQLite`-backed implementation
//! - [`UnavailableHistory`] - Stand-in that fails every operation
//! - [`SearchHistoryRecord`] - A stored estimate with its id

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/sangkat-estimate/sangkat/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod record;
mod store;
mod unavailable;

pub use record::{DEFAULT_RECENT_LIMIT, RecordId, SearchHistory, SearchHistoryRecord};
pub use store::{DATABASE_FILE, Result, SqliteHistory, StoreError};
pub use unavailable::UnavailableHistory;

//! TripStore - persistent record storage for trip planning data
//!
//! Stores typed records in JSONL collections, one file per collection.
//! Records implement [`Record`] to declare their collection name and the
//! fields they can be filtered by; the store keeps collections in memory
//! and writes through to disk on every mutation.
//!
//! # Architecture
//!
//! ```text
//! {store-dir}/
//! ├── trips.jsonl         # one JSON record per line, last write wins
//! ├── stops.jsonl
//! └── log_sheets.jsonl
//! ```
//!
//! # Example
//!
//! ```ignore
//! use tripstore::{Store, Filter, FilterOp, IndexValue};
//!
//! let mut store = Store::open(".tripstore")?;
//! store.create(trip)?;
//! let trips: Vec<Trip> = store.list(&[Filter {
//!     field: "status".to_string(),
//!     op: FilterOp::Eq,
//!     value: IndexValue::String("planned".to_string()),
//! }])?;
//! ```

pub mod cli;
mod record;
mod store;

pub use record::{Filter, FilterOp, IndexValue, Record};
pub use store::Store;

/// Current Unix timestamp in milliseconds
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

//! Census Query Core
//!
//! Pure, read-only operations over the record store:
//!
//! - **args**: loosely typed argument literals handed in by the engine
//! - **criteria**: tri-state criteria decoded from those arguments
//! - **filter**: stable multi-criteria filter
//! - **aggregate**: per-city age ranges in key order
//! - **sanitize**: removal of null-valued argument clauses from query text
//!
//! # Example
//!
//! ```rust
//! use census::query::{age_range_by_city, filter_records, Criteria};
//! use census::store::RecordStore;
//!
//! let store = RecordStore::seed();
//!
//! let adults = filter_records(store.records(), &Criteria::new().min_age(25).max_age(30));
//! assert_eq!(adults.len(), 4);
//!
//! let ranges = age_range_by_city(store.records());
//! assert_eq!(ranges[0].city, "Ciudad A");
//! ```

mod aggregate;
mod args;
mod criteria;
mod filter;
mod sanitize;

pub use aggregate::age_range_by_city;
pub use args::{ArgValue, Arguments};
pub use criteria::{
    Criteria, Criterion, FromArg, ARG_CITY, ARG_GENDER, ARG_MAX_AGE, ARG_MIN_AGE,
};
pub use filter::filter_records;
pub use sanitize::{remove_argument, sanitize_query};

//! Census Record Store
//!
//! - **types**: `Person` and the aggregation output types
//! - **records**: the immutable, validated `RecordStore`
//! - **error**: load-time error types
//!
//! # Example
//!
//! ```rust
//! use census::store::RecordStore;
//!
//! let store = RecordStore::seed();
//! assert!(store.find_by_id("2").is_some());
//! assert!(store.find_by_id("99").is_none());
//! ```

pub mod error;
pub mod records;
pub mod types;

pub use error::{StoreError, StoreResult};
pub use records::RecordStore;
pub use types::{AgeRange, CityAgeRange, Person};

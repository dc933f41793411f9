//! # Census
//!
//! A small query service over an immutable roster of people: multi-criteria
//! filtering with tri-state arguments, per-city age ranges, and removal of
//! null-valued argument clauses from incoming query text.
//!
//! ## Modules
//!
//! - [`store`]: person records and the validated, immutable record store
//! - [`query`]: criteria decoding, filtering, aggregation and query sanitizing
//! - [`resolver`]: binds the root query fields to the query core
//! - [`engine`]: parses and executes query documents against a resolver
//! - [`api`]: HTTP server with Axum
//! - [`config`]: TOML and environment configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use census::{QueryEngine, PersonResolvers, RecordStore};
//! use std::sync::Arc;
//!
//! let store = Arc::new(RecordStore::seed());
//! let engine = QueryEngine::new(Arc::new(PersonResolvers::new(store)));
//!
//! let result = engine.execute("{ infoFiltrada(ciudad: \"Ciudad B\") { id nombre } }");
//! assert!(!result.has_errors());
//! assert_eq!(result.data["infoFiltrada"].as_array().map(Vec::len), Some(3));
//! ```

pub mod api;
pub mod config;
pub mod engine;
pub mod query;
pub mod resolver;
pub mod store;

// Re-export top-level types for convenience
pub use store::{AgeRange, CityAgeRange, Person, RecordStore, StoreError, StoreResult};

pub use query::{
    age_range_by_city, filter_records, remove_argument, sanitize_query, ArgValue, Arguments,
    Criteria, Criterion,
};

pub use resolver::{FieldResolver, PersonResolvers, Resolved};

pub use engine::{parse_document, EngineError, ExecutionResult, FieldError, QueryEngine};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{ApiConfig as ConfigApiConfig, Config, ConfigError, LoggingConfig, StoreConfig};

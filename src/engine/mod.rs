//! Census Query Execution Engine
//!
//! A small executor for query documents over the resolver adapter:
//!
//! - **AST**: document and field types
//! - **Parser**: parse query strings into the AST (nom)
//! - **Executor**: resolve root fields and project them onto selections
//!
//! # Example
//!
//! ```rust
//! use census::engine::QueryEngine;
//! use census::resolver::PersonResolvers;
//! use census::store::RecordStore;
//! use std::sync::Arc;
//!
//! let resolvers = PersonResolvers::new(Arc::new(RecordStore::seed()));
//! let engine = QueryEngine::new(Arc::new(resolvers));
//!
//! let result = engine.execute(r#"{ persona(id: "1") { nombre } }"#);
//! assert_eq!(result.data["persona"]["nombre"], "Juan");
//! ```

mod ast;
mod error;
mod executor;
mod parser;

pub use ast::{Document, Field};
pub use error::{EngineError, EngineResult};
pub use executor::{ExecutionResult, FieldError, PathSegment, QueryEngine};
pub use parser::parse_document;

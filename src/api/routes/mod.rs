//! API Routes
//!
//! Route handlers organized by functionality.

pub mod graphql;
pub mod health;

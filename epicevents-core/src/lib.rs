//! # Epic Events Core
//!
//! Shared library for the Epic Events CRM: database models, authentication
//! and authorization, the permission-gated CRUD services, and the telemetry
//! client used by the command-line interface.
//!
//! ## Module Organization
//!
//! - `models`: database models and their CRUD operations
//! - `auth`: password hashing, session authentication, authorization gate
//! - `services`: permission-gated operations consumed by the CLI
//! - `db`: connection pool and migrations
//! - `telemetry`: external error collector client
//! - `error`: the unified service error type

pub mod auth;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod telemetry;

/// Current version of the Epic Events core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}

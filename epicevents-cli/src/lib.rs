//! # Epic Events CLI
//!
//! The `epicevents` binary: configuration loading, the login flow, and the
//! role-keyed interactive menus that drive the permission-gated services in
//! `epicevents-core`.

pub mod app;
pub mod config;
pub mod controllers;
pub mod seed;
pub mod views;

/// Current version of the Epic Events CLI
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! `dbquick` - bounded-timeout connection helpers for PostgreSQL
//!
//! Opens database connections with a clamped, configurable upper bound on
//! wait time, and provides thin pass-through helpers for parameterized
//! statements, scalar queries, and procedure calls.

#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    missing_docs,
    rust_2018_idioms
)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

/// Configuration management for dbquick
pub mod config;
pub mod connect;
/// Connection handle and statement helpers
pub mod database;
/// Error types for dbquick operations
pub mod error;
pub mod timeout;

pub use config::Config;
pub use database::Database;
pub use error::{DbQuickError, Result};
pub use timeout::{ConnectTimeout, TimeoutSetting};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

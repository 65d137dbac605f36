//! Error types for the Culture bot.
//!
//! This crate provides the foundation error types used throughout the Culture workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! Failures of the image API while paging a carousel are *not* represented here:
//! the carousel turns them into data (`FetchOutcome::TransientError`). These types
//! cover bootstrap, persistence and transport.
//!
//! # Examples
//!
//! ```
//! use culture_error::{CultureResult, HttpError};
//!
//! fn fetch_data() -> CultureResult<String> {
//!     Err(HttpError::new("Connection refused"))?
//! }
//!
//! assert!(fetch_data().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod database;
mod error;
mod http;
mod json;

pub use config::ConfigError;
pub use database::{DatabaseError, DatabaseErrorKind};
pub use error::{CultureError, CultureErrorKind, CultureResult};
pub use http::HttpError;
pub use json::JsonError;

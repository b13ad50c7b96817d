//! Error types for the crate.
//!
//! This module defines low-level backend errors returned by the pairing
//! primitive layer as well as the engine-facing `Error` type used across the
//! crate.
//!
//! The errors are implemented with `thiserror` so they are easy to convert
//! and debug in higher-level code.
//!
//! # Examples
//!
//! ```rust
//! use edgematch::errors::Error;
//!
//! let err = Error::UnknownGroup("17000000001234".into());
//! assert_eq!(err.to_string(), "unknown group: 17000000001234");
//! ```

use thiserror::Error;

/// Errors bubbled up from the pairing primitive layer.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("unsupported curve: {0}")]
    UnsupportedCurve(&'static str),
    #[error("unsupported backend feature: {0}")]
    UnsupportedFeature(&'static str),
    #[error("serialization failure: {0}")]
    Serialization(&'static str),
    #[error("{0}")]
    Other(String),
}

/// High-level errors returned by the search engine API.
#[derive(Debug, Error)]
pub enum Error {
    #[error("engine is not initialized; run setup first")]
    Uninitialized,
    #[error("unknown identity: {0}")]
    UnknownIdentity(String),
    #[error("unknown group: {0}")]
    UnknownGroup(String),
    #[error("malformed input: {0}")]
    MalformedInput(String),
    #[error("no cached entry for {0}")]
    CacheMiss(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
    #[error("engine state lock poisoned")]
    LockPoisoned,
}

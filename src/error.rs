//! # Error Handling
//!
//! Building a fixture never fails. The surrounding plumbing (configuration,
//! name lookup, transform inversion, buffer conversion and file output) does,
//! and reports through a single `anyhow`-based error type so callers can
//! attach context with `?` and `.context(..)`.

pub type FixtureError = anyhow::Error;

pub type Result<T, E = FixtureError> = std::result::Result<T, E>;

//! Common utilities module
//!
//! Shared error type used by readers, the debayer engine and writers.

pub mod error;

pub use error::{ConversionError, Result};

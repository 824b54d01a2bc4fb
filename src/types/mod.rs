//! Shared types for flagstand

pub mod error;

pub use error::{FlagstandError, Result};

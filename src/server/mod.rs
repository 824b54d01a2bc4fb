//! HTTP server for flagstand

pub mod http;

pub use http::{run, AppState};

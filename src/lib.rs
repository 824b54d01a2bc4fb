//! flagstand - CTF scoring service
//!
//! A small capture-the-flag web service: user registration/login, a
//! flag-submission endpoint that awards points, and a public scoreboard.
//! Persistent state is two JSON documents (`users.json`, `flags.json`)
//! behind an opaque key-to-bytes document store; every request does a full
//! read-modify-write cycle, serialized per document to make claims safe
//! under concurrent submission.
//!
//! ## Components
//!
//! - **Store**: document store seam with filesystem and in-memory backends
//! - **Registry**: registered accounts, username uniqueness, score tracking
//! - **Catalog**: valid flag secrets with point values
//! - **Claim**: the first-claim-wins scoring transaction
//! - **Scoreboard**: read-only projection, score descending

pub mod auth;
pub mod catalog;
pub mod claim;
pub mod config;
pub mod registry;
pub mod routes;
pub mod scoreboard;
pub mod server;
pub mod store;
pub mod types;

pub use config::Args;
pub use server::{run, AppState};
pub use types::{FlagstandError, Result};

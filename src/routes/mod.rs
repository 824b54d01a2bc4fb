//! HTTP routes for flagstand

pub mod auth_routes;
pub mod flags;
pub mod health;
pub mod respond;
pub mod scoreboard_routes;

pub use auth_routes::{handle_login, handle_register};
pub use flags::handle_submit_flag;
pub use health::health_check;
pub use scoreboard_routes::handle_scoreboard;

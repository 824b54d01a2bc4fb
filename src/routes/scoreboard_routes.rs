//! HTTP route for the public scoreboard
//!
//! GET /scoreboard - usernames and scores, highest first

use hyper::{Response, StatusCode};
use std::sync::Arc;

use crate::routes::respond::{error_response, json_response, BoxBody};
use crate::scoreboard;
use crate::server::AppState;

/// GET /scoreboard
pub async fn handle_scoreboard(state: Arc<AppState>) -> Response<BoxBody> {
    match scoreboard::list(state.store.as_ref()).await {
        Ok(entries) => json_response(StatusCode::OK, &entries),
        Err(e) => error_response(&e),
    }
}

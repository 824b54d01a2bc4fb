//! HTTP route for flag submission
//!
//! POST /submitFlag - authenticated claim of a flag secret

use hyper::{Request, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::auth::extract_bearer_token;
use crate::claim;
use crate::routes::respond::{
    error_response, get_auth_header, json_response, parse_json_body, BoxBody,
};
use crate::server::AppState;
use crate::types::FlagstandError;

#[derive(Debug, Deserialize)]
pub struct SubmitFlagRequest {
    #[serde(default)]
    pub flag: String,
}

#[derive(Debug, Serialize)]
pub struct SubmitFlagResponse {
    pub message: &'static str,
    pub points: u64,
    #[serde(rename = "newScore")]
    pub new_score: u64,
}

/// POST /submitFlag
///
/// The bearer token is verified before the body is touched; the claim
/// transaction itself runs in `claim::submit_flag`.
pub async fn handle_submit_flag(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Response<BoxBody> {
    let token = match extract_bearer_token(get_auth_header(&req)) {
        Some(t) => t.to_string(),
        None => return error_response(&FlagstandError::MissingToken),
    };

    let claims = match state.jwt.verify_token(&token) {
        Ok(c) => c,
        Err(e) => return error_response(&e),
    };

    let body: SubmitFlagRequest = match parse_json_body(req).await {
        Ok(b) => b,
        Err(_) => return error_response(&FlagstandError::MissingFlag),
    };

    if body.flag.is_empty() {
        return error_response(&FlagstandError::MissingFlag);
    }

    match claim::submit_flag(state.store.as_ref(), &state.locks, &claims.sub, &body.flag).await {
        Ok(outcome) => json_response(
            StatusCode::OK,
            &SubmitFlagResponse {
                message: "flag_accepted",
                points: outcome.points_awarded,
                new_score: outcome.new_score,
            },
        ),
        Err(e) => error_response(&e),
    }
}

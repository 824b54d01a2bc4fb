//! HTTP routes for registration and login
//!
//! - POST /register - Create an account
//! - POST /login    - Authenticate and get JWT token

use hyper::{Request, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::auth::{hash_password, verify_password};
use crate::registry::{self, UserRegistry};
use crate::routes::respond::{
    error_response, json_response, parse_json_body, BoxBody, MessageResponse,
};
use crate::server::AppState;
use crate::store::{self, USERS_DOC};
use crate::types::FlagstandError;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub token: String,
}

/// POST /register
///
/// Flow:
/// 1. Validate required fields and password policy
/// 2. Hash password with argon2
/// 3. Append the account under the registry document lock
pub async fn handle_register(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Response<BoxBody> {
    let body: RegisterRequest = match parse_json_body(req).await {
        Ok(b) => b,
        Err(e) => return error_response(&e),
    };

    if body.username.is_empty() || body.password.is_empty() {
        return error_response(&FlagstandError::MissingFields);
    }

    if let Err(e) = state.policy.validate(&body.password) {
        return error_response(&e);
    }

    let hash = match hash_password(&body.password) {
        Ok(h) => h,
        Err(e) => return error_response(&e),
    };

    match registry::register_account(state.store.as_ref(), &state.locks, &body.username, hash).await
    {
        Ok(()) => json_response(StatusCode::CREATED, &MessageResponse { message: "ok" }),
        Err(e) => error_response(&e),
    }
}

/// POST /login
///
/// Verifies credentials against the stored hash and issues a bearer token
/// carrying the username. Unknown user and wrong password produce the same
/// response so the endpoint does not leak which usernames exist.
pub async fn handle_login(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Response<BoxBody> {
    let body: LoginRequest = match parse_json_body(req).await {
        Ok(b) => b,
        Err(e) => return error_response(&e),
    };

    if body.username.is_empty() || body.password.is_empty() {
        return error_response(&FlagstandError::MissingFields);
    }

    let registry: UserRegistry =
        match store::load_or_init(state.store.as_ref(), USERS_DOC).await {
            Ok(r) => r,
            Err(e) => return error_response(&e),
        };

    let user = match registry.find_by_username(&body.username) {
        Some(u) => u,
        None => return error_response(&FlagstandError::InvalidCredentials),
    };

    match verify_password(&body.password, &user.hash) {
        Ok(true) => {}
        Ok(false) => return error_response(&FlagstandError::InvalidCredentials),
        Err(e) => return error_response(&e),
    }

    let token = match state.jwt.generate_token(&user.username) {
        Ok(t) => t,
        Err(e) => return error_response(&e),
    };

    info!(username = %user.username, "Login succeeded");

    json_response(
        StatusCode::OK,
        &LoginResponse {
            message: "ok",
            token,
        },
    )
}

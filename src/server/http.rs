//! HTTP server implementation
//!
//! Uses hyper http1 with TokioIo for async handling. Routing is a plain
//! method/path match; every handler maps its own domain errors, so a
//! response always goes out even when a document read fails.

use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response};
use hyper_util::rt::TokioIo;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::auth::{JwtValidator, PasswordPolicy};
use crate::config::Args;
use crate::routes;
use crate::routes::respond::{self, BoxBody};
use crate::store::{DocumentLocks, DocumentStore};
use crate::types::{FlagstandError, Result};

/// Shared application state
///
/// Handlers hold no per-request memory of the documents; every request
/// re-reads current state through `store`.
pub struct AppState {
    pub args: Args,
    pub store: Arc<dyn DocumentStore>,
    pub locks: Arc<DocumentLocks>,
    pub jwt: JwtValidator,
    pub policy: PasswordPolicy,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(args: Args, store: Arc<dyn DocumentStore>) -> Result<Self> {
        let jwt = if let Some(ref secret) = args.jwt_secret {
            JwtValidator::new(secret.clone(), args.jwt_expiry_seconds)?
        } else if args.dev_mode {
            JwtValidator::new_dev()
        } else {
            return Err(FlagstandError::Config(
                "JWT_SECRET is required in production mode".into(),
            ));
        };

        let policy = PasswordPolicy::with_min_length(args.password_min_length);

        Ok(Self {
            args,
            store,
            locks: Arc::new(DocumentLocks::new()),
            jwt,
            policy,
            started_at: Instant::now(),
        })
    }
}

/// Start the HTTP server
pub async fn run(state: Arc<AppState>) -> Result<()> {
    let listener = TcpListener::bind(state.args.listen).await?;

    info!(
        "flagstand listening on {} as node {}",
        state.args.listen, state.args.node_id
    );

    if state.args.dev_mode {
        warn!("Development mode enabled - insecure default JWT secret in use");
    }

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);

                    let service = service_fn(move |req| {
                        let state = Arc::clone(&state);
                        async move { handle_request(state, req).await }
                    });

                    if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                        error!("Error serving connection from {}: {:?}", addr, err);
                    }
                });
            }
            Err(e) => {
                error!("Error accepting connection: {:?}", e);
            }
        }
    }
}

/// Route incoming HTTP requests
async fn handle_request(
    state: Arc<AppState>,
    req: Request<Incoming>,
) -> std::result::Result<Response<BoxBody>, hyper::Error> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    info!("{} {}", method, path);

    let response = match (method, path.as_str()) {
        (Method::GET, "/health") | (Method::GET, "/healthz") => routes::health_check(&state),

        // CORS preflight
        (Method::OPTIONS, _) => respond::cors_preflight(),

        (Method::POST, "/register") => routes::handle_register(req, state).await,
        (Method::POST, "/login") => routes::handle_login(req, state).await,
        (Method::GET, "/scoreboard") => routes::handle_scoreboard(state).await,
        (Method::POST, "/submitFlag") => routes::handle_submit_flag(req, state).await,

        (_, "/register") | (_, "/login") | (_, "/scoreboard") | (_, "/submitFlag") => {
            respond::method_not_allowed()
        }

        _ => respond::not_found(),
    };

    Ok(response)
}

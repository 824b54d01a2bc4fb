//! Configuration for flagstand
//!
//! CLI arguments and environment variable handling using clap.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use uuid::Uuid;

/// flagstand - CTF scoring service
#[derive(Parser, Debug, Clone)]
#[command(name = "flagstand")]
#[command(about = "CTF scoring service: registration, flag claims and a public scoreboard")]
pub struct Args {
    /// Unique node identifier for this instance
    #[arg(long, env = "NODE_ID", default_value_t = Uuid::new_v4())]
    pub node_id: Uuid,

    /// Address to listen on
    #[arg(long, env = "LISTEN", default_value = "0.0.0.0:8080")]
    pub listen: SocketAddr,

    /// Directory holding the persisted JSON documents (users.json, flags.json)
    #[arg(long, env = "DATA_DIR", default_value = "./data")]
    pub data_dir: PathBuf,

    /// JWT secret for token signing (required in production)
    #[arg(long, env = "JWT_SECRET")]
    pub jwt_secret: Option<String>,

    /// JWT token expiry in seconds
    #[arg(long, env = "JWT_EXPIRY_SECONDS", default_value = "7200")]
    pub jwt_expiry_seconds: u64,

    /// Optional flag seed file, loaded when the catalog is empty at startup
    #[arg(long, env = "FLAGS_SEED")]
    pub flags_seed: Option<PathBuf>,

    /// Minimum password length enforced at registration
    #[arg(long, env = "PASSWORD_MIN_LENGTH", default_value = "8")]
    pub password_min_length: usize,

    /// Enable development mode (insecure default JWT secret)
    #[arg(long, env = "DEV_MODE", default_value = "false", action = clap::ArgAction::Set)]
    pub dev_mode: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.dev_mode && self.jwt_secret.is_none() {
            return Err("JWT_SECRET is required in production mode".to_string());
        }

        if self.password_min_length == 0 {
            return Err("PASSWORD_MIN_LENGTH must be at least 1".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from([
            "flagstand",
            "--jwt-secret",
            "0123456789abcdef0123456789abcdef",
        ]);
        assert_eq!(args.jwt_expiry_seconds, 7200);
        assert_eq!(args.password_min_length, 8);
        assert!(!args.dev_mode);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_jwt_secret_required_outside_dev_mode() {
        let args = Args::parse_from(["flagstand"]);
        assert!(args.validate().is_err());

        let args = Args::parse_from(["flagstand", "--dev-mode", "true"]);
        assert!(args.validate().is_ok());
    }
}

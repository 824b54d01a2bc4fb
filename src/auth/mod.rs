//! Authentication for flagstand
//!
//! Provides:
//! - JWT token generation and validation
//! - Password hashing with Argon2
//! - Server-side password validation policy

pub mod jwt;
pub mod password;
pub mod policy;

pub use jwt::{extract_bearer_token, Claims, JwtValidator};
pub use password::{hash_password, verify_password};
pub use policy::{PasswordPolicy, PasswordRule};

//! Authentication module
//!
//! Provides JWT-based authentication with bcrypt password hashing.

mod jwt;
mod middleware;
mod password;

pub use jwt::{Claims, JwtService, TokenError};
pub use middleware::{auth_middleware, bearer_token, AuthenticatedAccount};
pub use password::{PasswordService, COST_RANGE, DEFAULT_COST, MAX_PASSWORD_BYTES};

//! Authentication
//!
//! JWT issuing/validation and the router-level auth middleware.

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;

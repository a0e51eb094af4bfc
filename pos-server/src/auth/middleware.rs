//! Authentication Middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::utils::AppError;

/// Paths under `/api/` that are reachable without a token.
/// Catalog browsing, transaction reads and image downloads are public;
/// mutations and the report routes require authentication.
fn is_public_api_route(method: &http::Method, path: &str) -> bool {
    match *method {
        http::Method::POST => path == "/api/auth/login",
        http::Method::GET => {
            path == "/api/health"
                || path == "/api/items"
                || path.starts_with("/api/items/")
                || path == "/api/transactions"
                || path.starts_with("/api/transactions/")
                || path.starts_with("/api/images/")
        }
        _ => false,
    }
}

/// Require a valid `Authorization: Bearer <token>` header.
///
/// On success the parsed [`CurrentUser`] is injected into request extensions.
/// OPTIONS requests (CORS preflight), non-API paths and public API routes
/// pass through untouched.
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // Non-API routes fall through to their own 404 handling
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    if is_public_api_route(req.method(), path) {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => {
            JwtService::extract_from_header(header).ok_or(AppError::InvalidToken)?
        }
        None => {
            tracing::warn!(uri = %req.uri(), "Missing authorization header");
            return Err(AppError::Unauthorized);
        }
    };

    match state.jwt_service.validate_token(token) {
        Ok(claims) => {
            req.extensions_mut().insert(CurrentUser::from(claims));
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(uri = %req.uri(), error = %e, "Token validation failed");
            match e {
                JwtError::ExpiredToken => Err(AppError::TokenExpired),
                _ => Err(AppError::InvalidToken),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_routes() {
        let get = http::Method::GET;
        let post = http::Method::POST;

        assert!(is_public_api_route(&post, "/api/auth/login"));
        assert!(is_public_api_route(&get, "/api/items"));
        assert!(is_public_api_route(&get, "/api/items/items:abc"));
        assert!(is_public_api_route(&get, "/api/transactions"));
        assert!(is_public_api_route(&get, "/api/images/images:abc/base64"));
        assert!(is_public_api_route(&get, "/api/health"));

        assert!(!is_public_api_route(&post, "/api/items"));
        assert!(!is_public_api_route(&post, "/api/transactions"));
        assert!(!is_public_api_route(&get, "/api/report/today"));
        assert!(!is_public_api_route(&get, "/api/users"));
    }
}

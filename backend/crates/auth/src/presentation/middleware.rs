//! Auth Middleware
//!
//! Bearer-token gate for protected routes. A verified token becomes a
//! [`Principal`] in the request extensions, which handlers take with
//! `Extension<Principal>`.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::token_issuer::{Principal, TokenIssuer};
use crate::error::{AuthError, AuthResult};

const BEARER_PREFIX: &str = "Bearer ";

/// Middleware that requires a valid access token
pub async fn require_access_token(
    State(issuer): State<Arc<TokenIssuer>>,
    mut req: Request,
    next: Next,
) -> AuthResult<Response> {
    let token = bearer_token(req.headers()).ok_or(AuthError::InvalidToken)?;

    issuer.validate(token)?;
    let principal = issuer.parse_and_authenticate(token)?;

    req.extensions_mut().insert::<Principal>(principal);

    Ok(next.run(req).await)
}

/// Token from `Authorization: Bearer <token>`
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

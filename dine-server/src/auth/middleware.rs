//! Auth middleware
//!
//! The staff listener authenticates every request through the `token`
//! query parameter. On success the decoded [`CurrentUser`] is inserted
//! into request extensions for handlers to read.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::AppError;

/// Pull the `token` value out of a raw query string.
fn token_from_query(query: &str) -> Option<&str> {
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == "token").then_some(value)
    })
}

/// Staff authentication middleware.
///
/// Skips CORS preflight and the health probe; everything else must
/// carry a valid token.
pub async fn require_staff_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }
    if req.uri().path() == "/v1/health" {
        return Ok(next.run(req).await);
    }

    let token = req
        .uri()
        .query()
        .and_then(token_from_query)
        .filter(|t| !t.is_empty());

    let Some(token) = token else {
        tracing::warn!(uri = %req.uri(), "request without token");
        return Err(AppError::Unauthorized);
    };

    match state.jwt.verify(token) {
        Ok(claims) => {
            req.extensions_mut().insert(CurrentUser::from(claims));
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(uri = %req.uri(), error = %e, "token rejected");
            Err(AppError::InvalidToken)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_token_among_other_params() {
        assert_eq!(token_from_query("a=1&token=abc&b=2"), Some("abc"));
        assert_eq!(token_from_query("token=xyz"), Some("xyz"));
    }

    #[test]
    fn missing_token_is_none() {
        assert_eq!(token_from_query("a=1&b=2"), None);
        assert_eq!(token_from_query(""), None);
    }
}

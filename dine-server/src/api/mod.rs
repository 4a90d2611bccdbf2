//! API route modules
//!
//! # Structure
//!
//! - [`health`] - health probe
//! - [`menu`] - staff menu management
//! - [`orders`] - staff order ledger reads and transitions
//! - [`restaurants`] - registration, binding and profile management
//! - [`provider`] - unauthenticated order upload/view for table-side
//!   clients
//!
//! Two listeners share one [`ServerState`]: the staff app carries the
//! token middleware, the provider app does not.

use axum::Router;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;
use crate::utils::AppError;

pub mod health;
pub mod menu;
pub mod orders;
pub mod provider;
pub mod restaurants;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// Request-body extractor. A malformed or untypable body surfaces
/// through the standard error envelope as a validation failure (400),
/// not axum's default 422.
#[derive(Debug)]
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::validation(rejection.body_text())),
        }
    }
}

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        Some(RequestId::new(HeaderValue::from_str(&id).unwrap()))
    }
}

/// All staff routes, no middleware or state applied.
pub fn staff_router() -> Router<ServerState> {
    Router::new()
        .merge(menu::router())
        .merge(orders::router())
        .merge(restaurants::router())
        .merge(health::router())
}

/// Provider routes: order upload/view only.
pub fn provider_router() -> Router<ServerState> {
    Router::new().merge(provider::router()).merge(health::router())
}

fn common_layers(router: Router<ServerState>) -> Router<ServerState> {
    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
}

/// Fully configured staff application, token auth included.
pub fn build_staff_app(state: &ServerState) -> Router {
    common_layers(staff_router())
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            crate::auth::require_staff_auth,
        ))
        .with_state(state.clone())
}

/// Fully configured provider application. No authentication; providers
/// hold an opaque ledger id instead.
pub fn build_provider_app(state: &ServerState) -> Router {
    common_layers(provider_router()).with_state(state.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use shared::models::{TransitionOrderRequest, ViewOrderRequest};

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn truncated_body_maps_to_validation() {
        let req = json_request(r#"{"orderId": "order_ledger:x", "orderTable""#);
        let err = AppJson::<ViewOrderRequest>::from_request(req, &())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn unknown_outcome_label_maps_to_validation() {
        let req = json_request(
            r#"{"orderTable": 3, "orderCompletedTime": "2024-05-01T12:00:00Z", "type": "Lost"}"#,
        );
        let err = AppJson::<TransitionOrderRequest>::from_request(req, &())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn well_formed_body_passes_through() {
        let req = json_request(r#"{"orderId": "order_ledger:x", "orderTable": 3}"#);
        let AppJson(payload) = AppJson::<ViewOrderRequest>::from_request(req, &())
            .await
            .unwrap();
        assert_eq!(payload.order_table, 3);
    }
}

// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::future::Future;

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use schicksms_config::model::GatewayConfig;
use schicksms_core::SmsError;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::{auth_middleware, AuthConfig};
use crate::handlers::{contacts, history, sms, status};
use crate::state::AppState;

/// Build the full router.
///
/// `/health` is public; everything under `/v1` requires the bearer token.
pub fn build_router(state: AppState, auth: AuthConfig) -> Router {
    let public_routes = Router::new()
        .route("/health", get(status::get_health))
        .with_state(state.clone());

    let api_routes = Router::new()
        .route("/v1/sms", post(sms::post_sms))
        .route("/v1/sms/status/{filename}", get(sms::get_delivery_status))
        .route("/v1/sms/recent", get(sms::get_recent))
        .route("/v1/sms/segments", get(sms::get_segments))
        .route("/v1/history", get(history::get_history))
        .route("/v1/history/export", get(history::export))
        .route("/v1/history/{id}", axum::routing::delete(history::delete_entry))
        .route("/v1/history/{id}/archive", post(history::archive))
        .route("/v1/history/{id}/unarchive", post(history::unarchive))
        .route(
            "/v1/contacts",
            get(contacts::get_contacts).post(contacts::post_contact),
        )
        .route(
            "/v1/contacts/{id}",
            put(contacts::put_contact).delete(contacts::remove_contact),
        )
        .route("/v1/status", get(status::get_system_status))
        .route_layer(axum_middleware::from_fn_with_state(auth, auth_middleware))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

/// Bind to the configured address and serve until `shutdown` resolves.
pub async fn start_server(
    config: &GatewayConfig,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), SmsError> {
    let auth = AuthConfig::new(config.bearer_token.clone());
    if auth.bearer_token.is_none() {
        tracing::warn!("no gateway.bearer_token configured; all /v1 requests will be rejected");
    }
    let app = build_router(state, auth);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| SmsError::io(format!("failed to bind gateway to {addr}"), e))?;

    tracing::info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| SmsError::io("gateway server error", e))?;

    tracing::info!("Gateway server stopped");
    Ok(())
}

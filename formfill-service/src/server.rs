//! HTTP surface: one trigger route plus the CORS layer for the dev frontend

use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderValue;
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};

use crate::context::AppContext;
use crate::workflow::{self, FillingResponse};

const DEV_FRONTEND_ORIGIN: &str = "http://localhost:3000";

pub fn router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/fillingForm", get(filling_form))
        .layer(cors_layer())
        .with_state(ctx)
}

/// Outcome is always carried in the body; the route itself answers 200.
async fn filling_form(State(ctx): State<Arc<AppContext>>) -> Json<FillingResponse> {
    Json(workflow::process_next_uploaded(&ctx).await)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(HeaderValue::from_static(DEV_FRONTEND_ORIGIN))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

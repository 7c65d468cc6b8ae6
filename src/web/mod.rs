use axum::{
    routing::{get, get_service, post},
    Json, Router,
};
use http::header::{HeaderValue, CACHE_CONTROL};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

pub mod api_error;
pub mod routes;

use routes::{activities, pages};

pub fn router(pool: SqlitePool) -> Router {
    Router::new()
        // HTML
        .route("/", get(pages::activities_page_handler))
        .route("/signup", post(pages::signup_form_handler))
        // JSON API
        .route("/activities", get(activities::list_activities_handler))
        .route(
            "/activities/:activity_name/signup",
            post(activities::signup_handler),
        )
        .route("/health", get(health_handler))
        // Static files
        .nest_service(
            "/assets",
            get_service(ServeDir::new("assets")).layer(SetResponseHeaderLayer::if_not_present(
                CACHE_CONTROL,
                HeaderValue::from_static("no-store"),
            )),
        )
        // Layers
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
        // State
        .with_state(pool)
}

async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "build": env!("MERGINGTON_BUILD_ID"),
    }))
}

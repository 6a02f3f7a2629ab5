use crate::server::routes;
use crate::state::DashboardState;
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the dashboard application
pub fn build_app(state: DashboardState) -> Router {
    // CORS defaults to local origins; override only for explicit local use.
    let allow_any_origin = std::env::var("ADORESCORE_DASHBOARD_ALLOW_ANY_ORIGIN")
        .ok()
        .is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));
    let cors = if allow_any_origin {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list([
                HeaderValue::from_static("http://localhost:8501"),
                HeaderValue::from_static("http://127.0.0.1:8501"),
            ]))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let api_routes = Router::new()
        .route("/health", get(routes::health))
        // Dataset views
        .route("/summary", get(routes::get_summary))
        .route("/themes/:theme/snippets", get(routes::get_theme_snippets))
        // Ad-hoc analysis through the analysis API
        .route("/analyze", post(routes::analyze_text));

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the server
pub async fn run_server(state: DashboardState, addr: SocketAddr) -> anyhow::Result<()> {
    let records = state.dataset.len();
    let app = build_app(state);

    tracing::info!("Starting Adorescore dashboard on {} ({} reviews)", addr, records);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

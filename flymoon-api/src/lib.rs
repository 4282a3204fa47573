use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::IntoResponse,
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod pricing;
pub mod search;
pub mod site_search;
pub mod state;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // CORS Middleware
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    Router::new()
        .merge(search::routes())
        .merge(pricing::routes())
        .merge(site_search::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            canonical_host_middleware,
        ))
        .with_state(state)
}

/// 301s `www.<canonical>` traffic to the bare canonical host, keeping path
/// and query but never a port. Runs outermost so even unknown paths get
/// redirected.
async fn canonical_host_middleware(
    State(state): State<AppState>,
    req: axum::extract::Request,
    next: axum::middleware::Next,
) -> axum::response::Response {
    let host = req
        .headers()
        .get(axum::http::header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    // Hosts may arrive as `name:port`; compare on the name alone.
    let host = host.split_once(':').map_or(host, |(name, _)| name);

    if let Some(bare) = host.strip_prefix("www.") {
        if bare.eq_ignore_ascii_case(&state.site.canonical_host) {
            let path = req
                .uri()
                .path_and_query()
                .map(|pq| pq.as_str())
                .unwrap_or("/");
            let location = format!("https://{}{}", state.site.canonical_host, path);
            tracing::debug!(host, %location, "redirecting to canonical host");
            return (
                StatusCode::MOVED_PERMANENTLY,
                [(axum::http::header::LOCATION, location)],
            )
                .into_response();
        }
    }

    next.run(req).await
}

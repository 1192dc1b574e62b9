use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{app_state::SharedState, settings::Settings, web_api::routes::map_routes};

/// The whole HTTP surface: `/api` routes, optional static client, CORS, request tracing.
pub fn build_app(state: SharedState, settings: &Settings) -> Router {
    let mut app = map_routes(state);

    if let Some(static_dir) = &settings.static_dir {
        app = app.fallback_service(ServeDir::new(static_dir).append_index_html_on_directories(true));
    }

    if settings.cors_permissive {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    app.layer(TraceLayer::new_for_http())
}

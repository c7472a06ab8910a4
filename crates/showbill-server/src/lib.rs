//! HTTP surface of the booking directory.

pub mod api;
pub mod config;
pub mod error;
pub mod forms;

use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use showbill_db::AppState;

pub use config::ServerConfig;

pub fn app(state: Arc<AppState>, config: &ServerConfig) -> Router {
    Router::new()
        .route("/", get(api::status))
        .route("/healthz", get(api::status))
        .route(
            "/venues",
            get(api::venues::list_venues).post(api::venues::create_venue),
        )
        .route("/venues/search", post(api::venues::search_venues))
        .route("/venues/create", get(api::venues::create_venue_form))
        .route(
            "/venues/{id}",
            get(api::venues::get_venue).post(api::venues::update_venue),
        )
        .route("/venues/{id}/edit", get(api::venues::edit_venue_form))
        .route("/venues/{id}/delete", post(api::venues::delete_venue))
        .route(
            "/artists",
            get(api::artists::list_artists).post(api::artists::create_artist),
        )
        .route("/artists/search", post(api::artists::search_artists))
        .route("/artists/create", get(api::artists::create_artist_form))
        .route(
            "/artists/{id}",
            get(api::artists::get_artist).post(api::artists::update_artist),
        )
        .route("/artists/{id}/edit", get(api::artists::edit_artist_form))
        .route("/artists/{id}/delete", post(api::artists::delete_artist))
        .route("/shows", get(api::shows::list_shows))
        .route(
            "/shows/create",
            get(api::shows::create_show_form).post(api::shows::create_show),
        )
        .fallback(api::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(config.cors_layer())
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(state)
}

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use sea_orm_migration::MigratorTrait;
use serde::Serialize;
use showbill_db::AppState;
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

mod api;
mod config;
mod logging;

use config::ServerConfig;

#[derive(Serialize)]
struct ApiStatus {
    status: &'static str,
    version: &'static str,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env().expect("invalid server configuration");
    logging::init(config.log_file.as_deref()).expect("failed to open log file");

    // Database connection
    let db_config = showbill_db::DatabaseConfig::from_env();
    tracing::info!("connecting to database...");
    let db = showbill_db::connect(&db_config)
        .await
        .expect("failed to connect to database");

    // Run migrations
    tracing::info!("running database migrations...");
    showbill_migration::Migrator::up(&db, None)
        .await
        .expect("failed to run migrations");
    tracing::info!("migrations complete");

    let state = Arc::new(AppState { db });

    let allow_origin = if config.cors_origins.is_empty() {
        tracing::info!("CORS_ORIGINS not set, allowing any origin");
        AllowOrigin::from(Any)
    } else {
        tracing::info!("CORS allowed origins: {:?}", config.cors_origins);
        AllowOrigin::list(config.cors_origins.clone())
    };
    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any);

    let app = router(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .expect("failed to bind listen address");
    tracing::info!(addr = %config.bind, "server started");

    axum::serve(listener, app).await.expect("server error");
}

/// Every route, with tracing and security headers applied.
pub fn router(state: Arc<AppState>) -> Router {
    let venues = Router::new()
        .route("/", get(api::venues::list_venues))
        .route("/search", post(api::venues::search_venues))
        .route("/create", post(api::venues::create_venue))
        .route(
            "/{id}",
            get(api::venues::get_venue).delete(api::venues::delete_venue),
        )
        .route(
            "/{id}/edit",
            get(api::venues::edit_venue_form).post(api::venues::update_venue),
        )
        .route("/{id}/delete", get(api::venues::delete_venue));

    let artists = Router::new()
        .route("/", get(api::artists::list_artists))
        .route("/search", post(api::artists::search_artists))
        .route("/create", post(api::artists::create_artist))
        .route(
            "/{id}",
            get(api::artists::get_artist).delete(api::artists::delete_artist),
        )
        .route(
            "/{id}/edit",
            get(api::artists::edit_artist_form).post(api::artists::update_artist),
        );

    let shows = Router::new()
        .route("/", get(api::shows::list_shows))
        .route("/create", post(api::shows::create_show));

    Router::new()
        .route("/healthz", get(healthz))
        .nest("/venues", venues)
        .nest("/artists", artists)
        .nest("/shows", shows)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .with_state(state)
}

async fn healthz() -> Json<ApiStatus> {
    Json(ApiStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

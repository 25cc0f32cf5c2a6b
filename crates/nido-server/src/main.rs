use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use nido_api::auth::{self, AppState, AppStateInner};
use nido_api::middleware::require_auth;
use nido_api::{conversations, favorites, messages, properties, users};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nido=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let jwt_secret =
        std::env::var("NIDO_JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".into());
    let db_path = std::env::var("NIDO_DB_PATH").unwrap_or_else(|_| "nido.db".into());
    let host = std::env::var("NIDO_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("NIDO_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;

    // Init database
    let db = nido_db::Database::open(&PathBuf::from(&db_path))?;

    // Shared state
    let app_state: AppState = Arc::new(AppStateInner { db, jwt_secret });

    // Routes
    let public_routes = Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/users/{id}", get(users::get_user))
        .route("/api/properties", get(properties::list_properties))
        .route("/api/properties/{id}", get(properties::get_property))
        .with_state(app_state.clone());

    let protected_routes = Router::new()
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/profile", put(auth::update_profile))
        .route("/api/properties", post(properties::create_property))
        .route("/api/properties/{id}", put(properties::update_property))
        .route("/api/properties/{id}", delete(properties::delete_property))
        .route("/api/messages", get(messages::get_messages))
        .route("/api/messages", post(messages::send_message))
        .route("/api/conversations", get(conversations::list_conversations))
        .route(
            "/api/conversations/{other_user_id}/read",
            put(conversations::mark_conversation_read),
        )
        .route("/api/favorites", get(favorites::list_favorites))
        .route("/api/favorites", post(favorites::add_favorite))
        .route("/api/favorites/{property_id}", delete(favorites::remove_favorite))
        .layer(middleware::from_fn(require_auth))
        .with_state(app_state);

    let app = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Nido server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

//! AURA API /v1: REST endpoints
pub mod client;
pub mod config;
pub mod handlers;

use aura_core::SchemaMode;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::{
    routing::{get, post},
    Router,
};
use client::CompletionClient;
use config::{ConfigError, ServerConfig};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared per-request state: the completion client and the schema mode the
/// deployment committed to.
#[derive(Clone)]
pub struct AppState {
    pub client: CompletionClient,
    pub mode: SchemaMode,
}

pub fn create_app(config: &ServerConfig) -> Result<Router, ConfigError> {
    let state = AppState {
        client: CompletionClient::new(
            config.provider_url.clone(),
            config.provider_key.clone(),
            config.model.clone(),
        ),
        mode: config.mode,
    };

    Ok(Router::new()
        .route("/v1/ask", post(handlers::ask))
        .route("/v1/health", get(handlers::health))
        .layer(cors(&config.allowed_origins)?)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

fn cors(origins: &[String]) -> Result<CorsLayer, ConfigError> {
    let origins = origins
        .iter()
        .map(|origin| {
            origin.parse::<HeaderValue>().map_err(|_| {
                ConfigError::Invalid(format!("'{}' is not a valid CORS origin", origin))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true))
}

pub async fn run(config: ServerConfig) {
    let addr = config.addr.clone();
    let app = create_app(&config).expect("Invalid server configuration");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind");

    tracing::info!("AURA API listening on {} in {} mode", addr, config.mode);
    axum::serve(listener, app).await.expect("Server error");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_config() -> ServerConfig {
        ServerConfig {
            addr: "127.0.0.1:0".to_string(),
            provider_url: "http://localhost:9/v1/chat/completions".to_string(),
            provider_key: "test-key".to_string(),
            model: "asi1-mini".to_string(),
            allowed_origins: vec!["http://localhost:3000".to_string()],
            mode: SchemaMode::Restricted,
        }
    }

    #[tokio::test]
    async fn health_route_answers() {
        let app = create_app(&test_config()).unwrap();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v1/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn invalid_cors_origin_is_a_config_error() {
        let mut config = test_config();
        config.allowed_origins = vec!["bad\norigin".to_string()];
        assert!(create_app(&config).is_err());
    }
}

//! Web server setup and routing

use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::info;

use crate::api;
use crate::auth;
use crate::config::TlsConfig;
use crate::state::AppState;

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    let public = Router::new()
        // API routes
        .route("/api/health", get(api::health))
        .route("/api/sections", get(api::list_sections))
        .route(
            "/api/contact",
            post(api::submit_contact)
                .layer(DefaultBodyLimit::max(state.config.contact.max_body_bytes)),
        )
        // Static files (WASM frontend) - must be fallback for root
        .fallback_service(ServeDir::new(&state.config.web.static_dir))
        // CORS
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // Admin routes: token required, same-origin only
    let admin = Router::new()
        .route("/api/messages", get(api::list_messages))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_admin,
        ));

    public.merge(admin).with_state(state)
}

/// Run the web server (HTTP or HTTPS depending on config)
pub async fn run(state: Arc<AppState>, bind: &str, tls: Option<&TlsConfig>) -> Result<()> {
    let app = router(state);

    if let Some(tls_config) = tls {
        run_https(app, bind, tls_config).await
    } else {
        run_http(app, bind).await
    }
}

/// Run plain HTTP server
async fn run_http(app: Router, bind: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!(address = %bind, protocol = "HTTP", "Starting web server");
    axum::serve(listener, app).await?;
    Ok(())
}

/// Run HTTPS server with TLS
async fn run_https(app: Router, bind: &str, tls: &TlsConfig) -> Result<()> {
    use axum_server::tls_rustls::RustlsConfig;
    use std::path::PathBuf;

    let cert_path = PathBuf::from(&tls.cert);
    let key_path = PathBuf::from(&tls.key);

    if !cert_path.exists() {
        anyhow::bail!("TLS certificate file not found: {}", tls.cert);
    }
    if !key_path.exists() {
        anyhow::bail!("TLS key file not found: {}", tls.key);
    }

    let rustls_config = RustlsConfig::from_pem_file(&cert_path, &key_path).await?;

    let addr: std::net::SocketAddr = bind.parse()?;
    info!(address = %bind, protocol = "HTTPS", cert = %tls.cert, "Starting web server with TLS");

    axum_server::bind_rustls(addr, rustls_config)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::store::MessageStore;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tempfile::TempDir;
    use tower::ServiceExt;

    const ADMIN_TOKEN: &str = "zion-mainframe";

    fn test_config() -> Config {
        let mut config = Config::default();
        config.contact.max_message_len = 64;
        config.contact.max_name_len = 16;
        config.admin.token = Some(ADMIN_TOKEN.to_string());
        config
    }

    fn test_state() -> Arc<AppState> {
        AppState::with_store(test_config(), MessageStore::in_memory(10))
    }

    fn get_messages(authorization: Option<&str>) -> Request<Body> {
        let mut request = Request::get("/api/messages").header("origin", "https://evil.example");
        if let Some(value) = authorization {
            request = request.header("authorization", value);
        }
        request.body(Body::empty()).unwrap()
    }

    async fn submit_one(state: &Arc<AppState>) {
        let response = router(state.clone())
            .oneshot(post_contact(
                r#"{"name":"Alice","email":"alice@private.org","message":"secret"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    fn post_contact(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/contact")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_contact_accepted() {
        let state = test_state();
        let app = router(state.clone());

        let response = app
            .oneshot(post_contact(
                r#"{"name":"Neo","email":"neo@zion.net","message":"Knock knock"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["name"], "Neo");
        assert!(body["id"].is_string());
        assert!(body["created_at"].is_string());
        assert_eq!(state.store.len().await, 1);
    }

    #[tokio::test]
    async fn test_contact_rejected_with_field_errors() {
        let state = test_state();
        let app = router(state.clone());

        let response = app
            .oneshot(post_contact(r#"{"name":"","email":"not-an-email"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "Invalid contact message");
        assert_eq!(body["fields"]["name"], "Name is required");
        assert_eq!(body["fields"]["email"], "Invalid email address");
        assert_eq!(body["fields"]["message"], "Message is required");
        assert_eq!(state.store.len().await, 0);
    }

    #[tokio::test]
    async fn test_malformed_json_is_an_api_error() {
        let app = router(test_state());

        let response = app.oneshot(post_contact("{not json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_messages_listed_with_admin_token() {
        let state = test_state();
        submit_one(&state).await;

        let response = router(state)
            .oneshot(get_messages(Some("Bearer zion-mainframe")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .get("access-control-allow-origin")
            .is_none());
        let body = json_body(response).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["email"], "alice@private.org");
    }

    #[tokio::test]
    async fn test_messages_require_token() {
        let state = test_state();
        submit_one(&state).await;

        let response = router(state).oneshot(get_messages(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response
            .headers()
            .get("access-control-allow-origin")
            .is_none());
        let body = json_body(response).await;
        assert_eq!(body["code"], "AUTH_REQUIRED");
        assert!(body.get("email").is_none());
    }

    #[tokio::test]
    async fn test_messages_reject_wrong_token() {
        let state = test_state();

        let response = router(state.clone())
            .oneshot(get_messages(Some("Bearer red-pill")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await["code"], "INVALID_TOKEN");

        let response = router(state)
            .oneshot(get_messages(Some("zion-mainframe")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await["code"], "INVALID_AUTH_FORMAT");
    }

    #[tokio::test]
    async fn test_messages_closed_without_configured_token() {
        let mut config = test_config();
        config.admin.token = None;
        let state = AppState::with_store(config, MessageStore::in_memory(10));
        submit_one(&state).await;

        let response = router(state)
            .oneshot(get_messages(Some("Bearer zion-mainframe")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await["code"], "ADMIN_DISABLED");
    }

    #[tokio::test]
    async fn test_oversized_name_rejected() {
        let state = test_state();
        let body = serde_json::json!({
            "name": "N".repeat(1_000),
            "email": "neo@zion.net",
            "message": "Knock knock",
        });

        let response = router(state.clone())
            .oneshot(post_contact(&body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["fields"]["name"], "Name is too long (max 16 characters)");
        assert_eq!(state.store.len().await, 0);
    }

    #[tokio::test]
    async fn test_oversized_body_rejected() {
        let mut config = test_config();
        config.contact.max_body_bytes = 256;
        let state = AppState::with_store(config, MessageStore::in_memory(10));
        let body = serde_json::json!({
            "name": "Neo",
            "email": "neo@zion.net",
            "message": "x".repeat(1_000),
        });

        let response = router(state.clone())
            .oneshot(post_contact(&body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(json_body(response).await["error"].is_string());
        assert_eq!(state.store.len().await, 0);
    }

    #[tokio::test]
    async fn test_public_routes_allow_cross_origin() {
        let response = router(test_state())
            .oneshot(
                Request::get("/api/health")
                    .header("origin", "https://evil.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_sections_in_menu_order() {
        let response = router(test_state())
            .oneshot(Request::get("/api/sections").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let ids: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, ["profile", "experience", "skills", "achievements", "contact"]);
        assert_eq!(body[2]["label"], "03_SKILLS");
    }

    #[tokio::test]
    async fn test_health() {
        let response = router(test_state())
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["messages"], 0);
    }

    #[tokio::test]
    async fn test_static_fallback_serves_frontend() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("index.html"), "<canvas id=\"uplink-canvas\">").unwrap();

        let mut config = Config::default();
        config.web.static_dir = temp_dir.path().display().to_string();
        let state = AppState::with_store(config, MessageStore::in_memory(10));

        let response = router(state)
            .oneshot(Request::get("/index.html").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

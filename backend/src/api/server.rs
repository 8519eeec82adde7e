//! HTTP server for the upload sink.
//!
//! Accepts the multipart submissions produced by the upload widget and
//! answers with a receipt. Nothing is written to disk.
//!
//! # API Endpoints
//!
//! | Method | Path              | Description                          |
//! |--------|-------------------|--------------------------------------|
//! | GET    | `/health`         | Health check                         |
//! | POST   | `/api/upload`     | Multipart upload, returns a receipt  |

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::Method,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

use super::types::UploadReceipt;
use crate::config::SinkConfig;
use crate::error::{SinkError, SinkResult};

/// Routes with CORS and the body limit applied.
pub fn router(config: SinkConfig) -> Router {
    // mirrors the caller's origin so `withCredentials` requests pass
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    let body_limit = config.body_limit();

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/api/upload", post(upload))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .with_state(Arc::new(config))
}

/// Serve on an already bound listener.
pub async fn serve(listener: TcpListener, config: SinkConfig) -> SinkResult<()> {
    axum::serve(listener, router(config)).await?;
    Ok(())
}

/// Bind `0.0.0.0:port` and serve until the process stops.
pub async fn start_server(port: u16, config: SinkConfig) -> SinkResult<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("🚀 Upload sink running on http://localhost:{}", port);
    println!("   POST /api/upload - Multipart upload (field '{}')", config.field);
    println!("   GET  /health     - Health check");
    println!("   Max file size: {} bytes", config.max_bytes);
    println!();

    let listener = TcpListener::bind(addr).await?;
    serve(listener, config).await
}

/// Health check endpoint
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "upload-sink",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "upload": "POST /api/upload"
        }
    }))
}

/// Upload endpoint
async fn upload(
    State(config): State<Arc<SinkConfig>>,
    mut multipart: Multipart,
) -> SinkResult<Json<UploadReceipt>> {
    let mut file: Option<(String, u64)> = None;
    let mut fields = BTreeMap::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();

        if name == config.field && file.is_none() {
            let file_name = field.file_name().unwrap_or("unnamed").to_string();
            let size = field.bytes().await?.len() as u64;
            if size > config.max_bytes {
                return Err(SinkError::TooLarge {
                    size,
                    limit: config.max_bytes,
                });
            }
            file = Some((file_name, size));
        } else {
            fields.insert(name, field.text().await?);
        }
    }

    let (file_name, size) = file.ok_or_else(|| SinkError::MissingFile(config.field.clone()))?;

    println!("📄 NEW UPLOAD: {} ({} bytes)", file_name, size);
    for (key, value) in &fields {
        println!("   {} = {}", key, value);
    }

    Ok(Json(UploadReceipt::new(
        file_name,
        size,
        config.field.clone(),
        fields,
    )))
}

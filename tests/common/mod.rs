//! In-process fake QR backend shared by the HTTP tests
//!
//! Routes mirror the real service under `/api`:
//! - `POST /api/qrcode`: `{url}` → QrCode; `"bad"` → 400, `"slow"` sleeps 2s
//! - `POST /api/qrcode/batch`: multipart `file` → one item per line of the upload
//!   (ids of URLs containing `slow` start with `slow_`)
//! - `GET /api/qrcode/{id}/download`: `png:{id}`; id `gone` → 404, `slow_*`
//!   answers after 500ms
//! - `GET /api/qrcode/batch/{id}/download`: `zip:{id}`

#![allow(dead_code)]

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One multipart part as the backend received it
#[derive(Debug, Clone)]
pub struct ReceivedUpload {
    pub field: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Default)]
pub struct BackendState {
    pub generate_calls: AtomicUsize,
    pub batch_calls: AtomicUsize,
    pub download_calls: AtomicUsize,
    pub archive_calls: AtomicUsize,
    pub generated_urls: Mutex<Vec<String>>,
    pub uploads: Mutex<Vec<ReceivedUpload>>,
    pub downloaded_ids: Mutex<Vec<String>>,
}

impl BackendState {
    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

pub struct FakeBackend {
    /// API base, e.g. `http://127.0.0.1:53211/api`
    pub base_url: String,
    pub state: Arc<BackendState>,
}

/// Start the fake backend on an ephemeral port
pub async fn spawn_backend() -> FakeBackend {
    let state = Arc::new(BackendState::default());

    let router = Router::new()
        .route("/api/qrcode", post(generate))
        .route("/api/qrcode/batch", post(generate_batch))
        .route("/api/qrcode/batch/{id}/download", get(download_batch))
        .route("/api/qrcode/{id}/download", get(download))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake backend");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve fake backend");
    });

    FakeBackend {
        base_url: format!("http://{}/api", addr),
        state,
    }
}

fn qr_json(id: &str, url: &str) -> Value {
    json!({
        "id": id,
        "url": url,
        "qr_image_url": format!("/media/qrcodes/{}.png", id),
        "download_url": format!("/api/qrcode/{}/download", id),
        "created_at": "2024-05-01T12:00:00Z"
    })
}

async fn generate(State(state): State<Arc<BackendState>>, Json(body): Json<Value>) -> Response {
    state.generate_calls.fetch_add(1, Ordering::SeqCst);
    let url = body["url"].as_str().unwrap_or_default().to_string();
    state.generated_urls.lock().unwrap().push(url.clone());

    match url.as_str() {
        "bad" => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Invalid URL"})),
        )
            .into_response(),
        "slow" => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(qr_json("qrcode_slow", &url)).into_response()
        }
        "https://gone.example" => Json(qr_json("gone", &url)).into_response(),
        _ => {
            let n = BackendState::count(&state.generate_calls);
            Json(qr_json(&format!("qrcode_{}", n), &url)).into_response()
        }
    }
}

async fn generate_batch(
    State(state): State<Arc<BackendState>>,
    mut multipart: Multipart,
) -> Response {
    state.batch_calls.fetch_add(1, Ordering::SeqCst);

    let mut urls = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();

        if name == "file" {
            // Fixture "spreadsheets" are plain text, one URL per line
            urls = String::from_utf8_lossy(&bytes)
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect();
        }

        state.uploads.lock().unwrap().push(ReceivedUpload {
            field: name,
            file_name,
            content_type,
            bytes,
        });
    }

    if urls.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "No valid URLs found in Excel file"})),
        )
            .into_response();
    }

    let items: Vec<Value> = urls
        .iter()
        .enumerate()
        .map(|(i, url)| {
            let prefix = if url.contains("slow") { "slow" } else { "qrcode" };
            qr_json(&format!("{}_b{}", prefix, i), url)
        })
        .collect();

    Json(json!({
        "id": "batch_1a2b3c4d",
        "items": items,
        "zip_url": "/api/qrcode/batch/batch_1a2b3c4d/download",
        "created_at": "2024-05-01T12:00:00Z"
    }))
    .into_response()
}

async fn download(State(state): State<Arc<BackendState>>, Path(id): Path<String>) -> Response {
    state.download_calls.fetch_add(1, Ordering::SeqCst);
    state.downloaded_ids.lock().unwrap().push(id.clone());

    if id.starts_with("slow_") {
        tokio::time::sleep(Duration::from_millis(500)).await;
    }
    if id == "gone" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "QR code not found"})),
        )
            .into_response();
    }
    format!("png:{}", id).into_response()
}

async fn download_batch(
    State(state): State<Arc<BackendState>>,
    Path(id): Path<String>,
) -> Response {
    state.archive_calls.fetch_add(1, Ordering::SeqCst);
    format!("zip:{}", id).into_response()
}

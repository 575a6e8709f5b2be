//! Shared doubles and stub servers for the UI tests.

// Not every test binary uses every helper.
#![allow(dead_code)]

use async_trait::async_trait;
use pokegen_services::{FileUpload, FrameGrabber, MediaStream, MediaTrack, VideoSource};
use pokegen_types::FacingMode;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub async fn wait_until(mut pred: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !pred() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}

pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}

// ── Camera doubles ────────────────────────────────────────────────

pub struct FakeTrack {
    stopped: AtomicBool,
}

impl FakeTrack {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            stopped: AtomicBool::new(false),
        })
    }

    pub fn stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

impl MediaTrack for FakeTrack {
    fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    fn is_live(&self) -> bool {
        !self.stopped()
    }
}

struct FakeGrabber;

#[async_trait]
impl FrameGrabber for FakeGrabber {
    async fn grab_frame(&self) -> anyhow::Result<FileUpload> {
        Ok(FileUpload::new("frame.png", "image/png", vec![9, 9, 9]))
    }
}

pub struct FakeVideoSource {
    pub opens: AtomicUsize,
    pub tracks: Mutex<Vec<Arc<FakeTrack>>>,
}

impl FakeVideoSource {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            opens: AtomicUsize::new(0),
            tracks: Mutex::new(Vec::new()),
        })
    }

    pub fn open_count(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VideoSource for FakeVideoSource {
    async fn open(&self, _facing: FacingMode) -> anyhow::Result<MediaStream> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        let track = FakeTrack::new();
        self.tracks.lock().unwrap().push(Arc::clone(&track));
        Ok(MediaStream::with_grabber(vec![track], Arc::new(FakeGrabber)))
    }
}

// ── Stub servers ──────────────────────────────────────────────────

/// Serves canned description JSON on `/describe`.
pub async fn spawn_describe_stub(name: &str) -> String {
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::routing::get;

    let name = name.to_string();
    let handler = move |Query(params): Query<std::collections::HashMap<String, String>>| {
        let name = name.clone();
        async move {
            let Some(prompt) = params.get("prompt").filter(|p| !p.is_empty()) else {
                return (StatusCode::BAD_REQUEST, "Missing prompt").into_response();
            };
            axum::Json(serde_json::json!({
                "ability": "static",
                "category": "test",
                "flavor_text": format!("Described from: {prompt}"),
                "habitat": "plains",
                "height": 1.0,
                "name": name,
                "types": ["electric"],
                "weight": 10.0
            }))
            .into_response()
        }
    };

    let app = axum::Router::new().route("/describe", get(handler));
    spawn(app).await
}

/// Serves a caption inference endpoint: `/healthcheck` plus `/caption`.
pub async fn spawn_caption_stub(caption: &str) -> String {
    use axum::routing::{get, post};

    let caption = caption.to_string();
    let app = axum::Router::new()
        .route("/healthcheck", get(|| async { "OK" }))
        .route(
            "/caption",
            post(move || {
                let caption = caption.clone();
                async move { axum::Json(serde_json::json!({ "caption": caption })) }
            }),
        );
    spawn(app).await
}

async fn spawn(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://127.0.0.1:{port}")
}

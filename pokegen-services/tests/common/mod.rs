//! Shared test doubles and helpers for the service tests.

// Not every test binary uses every helper.
#![allow(dead_code)]

use async_trait::async_trait;
use pokegen_services::{CaptionModel, MediaStream, MediaTrack, ModelProvider, VideoSource};
use pokegen_types::{FacingMode, Theme};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Polls until `pred` holds or five seconds pass.
pub async fn wait_until(mut pred: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !pred() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}

/// Lets pending pumps run without asserting anything.
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

/// A capture device double recording every acquisition.
pub struct FakeVideoSource {
    pub opens: AtomicUsize,
    pub facings: Mutex<Vec<FacingMode>>,
    pub tracks: Mutex<Vec<Arc<FakeTrack>>>,
    pub fail: AtomicBool,
}

impl FakeVideoSource {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            opens: AtomicUsize::new(0),
            facings: Mutex::new(Vec::new()),
            tracks: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
        })
    }

    pub fn open_count(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VideoSource for FakeVideoSource {
    async fn open(&self, facing: FacingMode) -> anyhow::Result<MediaStream> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        self.facings.lock().unwrap().push(facing);
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("permission denied");
        }
        let track = FakeTrack::new();
        self.tracks.lock().unwrap().push(Arc::clone(&track));
        Ok(MediaStream::new(vec![track]))
    }
}

// ── Caption doubles ───────────────────────────────────────────────

/// A captioning model double that echoes a fixed caption.
pub struct FakeCaptionModel {
    pub caption: String,
    pub calls: AtomicUsize,
    pub fail: AtomicBool,
}

#[async_trait]
impl CaptionModel for FakeCaptionModel {
    async fn caption(&self, _image_url: &str) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("inference failed");
        }
        Ok(self.caption.clone())
    }
}

/// A provider double handing out one [`FakeCaptionModel`].
pub struct FakeModelProvider {
    pub loads: AtomicUsize,
    pub model: Arc<FakeCaptionModel>,
    pub fail: AtomicBool,
}

impl FakeModelProvider {
    pub fn new(caption: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            loads: AtomicUsize::new(0),
            model: Arc::new(FakeCaptionModel {
                caption: caption.into(),
                calls: AtomicUsize::new(0),
                fail: AtomicBool::new(false),
            }),
            fail: AtomicBool::new(false),
        })
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelProvider for FakeModelProvider {
    async fn load(&self, _model_name: &str) -> anyhow::Result<Arc<dyn CaptionModel>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("model unavailable");
        }
        Ok(Arc::clone(&self.model) as Arc<dyn CaptionModel>)
    }
}

// ── Theme double ──────────────────────────────────────────────────

/// Records what the document-level theme attribute was last set to.
/// `Some(None)` means explicitly cleared.
pub struct FakeThemeTarget {
    pub attribute: Mutex<Option<Option<Theme>>>,
}

impl FakeThemeTarget {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            attribute: Mutex::new(None),
        })
    }

    pub fn current(&self) -> Option<Option<Theme>> {
        *self.attribute.lock().unwrap()
    }
}

impl pokegen_services::ThemeTarget for FakeThemeTarget {
    fn set_theme_attribute(&self, theme: Theme) {
        *self.attribute.lock().unwrap() = Some(Some(theme));
    }

    fn clear_theme_attribute(&self) {
        *self.attribute.lock().unwrap() = Some(None);
    }
}

// ── Description stub server ───────────────────────────────────────

/// Serves canned description JSON on `/describe`, echoing the prompt into
/// `flavor_text` so tests can assert the wiring end to end.
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
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://127.0.0.1:{port}")
}

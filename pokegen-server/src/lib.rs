//! The description backend.
//!
//! Three surfaces, mirroring the SPA's external interface:
//! - `GET /describe?prompt=…` — synthesize a structured Pokemon description
//!   from an image caption. Responses are validated against the description
//!   schema; an invalid generation gets exactly one repair round-trip.
//!   Results are memoized per prompt.
//! - `GET /healthcheck` — liveness probe.
//! - everything else — static SPA assets from a configured directory.

pub mod generator;

use axum::Router;
use axum::extract::{Query, State};
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use pokegen_model::PokemonDescription;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

pub use generator::{ChatGenerator, DESCRIPTION_PROMPT, REPAIR_PROMPT, TextGenerator};

/// Shared state for the HTTP handlers.
pub struct AppState {
    generator: Arc<dyn TextGenerator>,
    static_dir: PathBuf,
    cache: Mutex<HashMap<String, PokemonDescription>>,
}

impl AppState {
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>, static_dir: PathBuf) -> Arc<Self> {
        Arc::new(Self {
            generator,
            static_dir,
            cache: Mutex::new(HashMap::new()),
        })
    }
}

/// Builds the HTTP router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/describe", get(describe))
        .route("/healthcheck", get(healthcheck))
        .fallback(get(static_assets))
        .with_state(state)
}

async fn healthcheck() -> &'static str {
    "OK"
}

async fn describe(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let Some(prompt) = params.get("prompt").filter(|p| !p.is_empty()) else {
        return (StatusCode::BAD_REQUEST, "Missing prompt").into_response();
    };

    if let Some(cached) = state
        .cache
        .lock()
        .expect("description cache lock poisoned")
        .get(prompt)
    {
        debug!("serving cached description for prompt: {prompt}");
        return axum::Json(cached.clone()).into_response();
    }

    match generate_description(state.generator.as_ref(), prompt).await {
        Ok(description) => {
            state
                .cache
                .lock()
                .expect("description cache lock poisoned")
                .insert(prompt.clone(), description.clone());
            axum::Json(description).into_response()
        }
        Err(err) => {
            warn!("failed to generate description: {err:#}");
            (StatusCode::BAD_GATEWAY, "Failed to generate description").into_response()
        }
    }
}

/// Generates a description for the prompt, with one repair round-trip when
/// the first generation fails schema validation.
async fn generate_description(
    generator: &dyn TextGenerator,
    prompt: &str,
) -> anyhow::Result<PokemonDescription> {
    debug!("generating a description for prompt: {prompt}");
    let content = generator.generate(&DESCRIPTION_PROMPT, prompt).await?;

    match PokemonDescription::from_json(&content) {
        Ok(description) => Ok(description),
        Err(validation_error) => {
            debug!("repairing description after validation error: {validation_error}");
            let repaired = generator
                .generate(
                    &REPAIR_PROMPT,
                    &format!("Description: {content}\n\nError: {validation_error}"),
                )
                .await?;
            Ok(PokemonDescription::from_json(&repaired)?)
        }
    }
}

async fn static_assets(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    let Some(path) = sanitize(&state.static_dir, uri.path()) else {
        return (StatusCode::NOT_FOUND, "Not found").into_response();
    };

    match tokio::fs::read(&path).await {
        Ok(bytes) => {
            let mime = mime_for(&path);
            ([(header::CONTENT_TYPE, mime)], bytes).into_response()
        }
        Err(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

/// Resolves a request path inside the static root, rejecting anything that
/// would escape it.
fn sanitize(static_dir: &Path, request_path: &str) -> Option<PathBuf> {
    let trimmed = request_path.trim_start_matches('/');
    let relative = Path::new(trimmed);
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return None;
    }

    let mut path = static_dir.join(relative);
    if trimmed.is_empty() || path.is_dir() {
        path = path.join("index.html");
    }
    Some(path)
}

fn mime_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        Some("wasm") => "application/wasm",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_rejects_traversal() {
        let root = Path::new("/srv/app");
        assert!(sanitize(root, "/../etc/passwd").is_none());
        assert!(sanitize(root, "/a/../../etc/passwd").is_none());
    }

    #[test]
    fn sanitize_maps_root_to_index() {
        let root = Path::new("/srv/app");
        assert_eq!(sanitize(root, "/"), Some(root.join("index.html")));
    }

    #[test]
    fn sanitize_keeps_normal_paths() {
        let root = Path::new("/srv/app");
        assert_eq!(sanitize(root, "/app.css"), Some(root.join("app.css")));
    }
}

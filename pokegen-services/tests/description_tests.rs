mod common;

use common::{FakeModelProvider, settle, spawn_describe_stub, wait_until};
use pokegen_services::{Caption, Description, DescriptionClient, FileUpload, Reader, ServiceError};

// ── Client ────────────────────────────────────────────────────────

#[tokio::test]
async fn client_parses_a_valid_response() {
    let base = spawn_describe_stub("Voltmouse").await;
    let client = DescriptionClient::new(&base);

    let description = client.describe("a yellow mouse").await.unwrap();
    assert_eq!(description.name, "Voltmouse");
    assert_eq!(description.flavor_text, "Described from: a yellow mouse");
}

#[tokio::test]
async fn client_surfaces_bad_request_as_an_error() {
    let base = spawn_describe_stub("Unused").await;
    let client = DescriptionClient::new(&base);

    let err = client.describe("").await.unwrap_err();
    assert!(matches!(err, ServiceError::Http(_)));
}

#[tokio::test]
async fn client_rejects_schema_violations() {
    use axum::routing::get;

    // A response with three types violates the schema.
    let app = axum::Router::new().route(
        "/describe",
        get(|| async {
            axum::Json(serde_json::json!({
                "ability": "a", "category": "b", "flavor_text": "c",
                "habitat": "d", "height": 1.0, "name": "Bad",
                "types": ["fire", "water", "grass"], "weight": 1.0
            }))
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://127.0.0.1:{}", listener.local_addr().unwrap().port());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = DescriptionClient::new(&base);
    let err = client.describe("anything").await.unwrap_err();
    assert!(matches!(err, ServiceError::Model(_)));
}

// ── Service ───────────────────────────────────────────────────────

#[tokio::test]
async fn captions_flow_into_validated_descriptions() {
    let base = spawn_describe_stub("Streamline").await;
    let reader = Reader::new();
    let caption = Caption::new(&reader, FakeModelProvider::new("a sleek fish"));
    let description = Description::new(&caption, DescriptionClient::new(&base));
    let mut descriptions = description.descriptions.subscribe();

    reader.read(FileUpload::new("fish.png", "image/png", vec![3]));

    let generated = descriptions.next().await.unwrap();
    assert_eq!(generated.name, "Streamline");
    assert_eq!(generated.flavor_text, "Described from: a sleek fish");
    wait_until(|| description.is_generating_description.current() == Some(false)).await;
}

#[tokio::test]
async fn request_failure_emits_nothing_and_resets_the_flag() {
    // Nothing is listening on this port.
    let reader = Reader::new();
    let caption = Caption::new(&reader, FakeModelProvider::new("a caption"));
    let description = Description::new(
        &caption,
        DescriptionClient::new("http://127.0.0.1:9"),
    );
    let mut descriptions = description.descriptions.subscribe();
    let mut busy = description.is_generating_description.subscribe();

    reader.read(FileUpload::new("a.png", "image/png", vec![1]));

    // The flag is observed raised and lowered around the failed request.
    assert_eq!(busy.next().await, Some(false));
    assert_eq!(busy.next().await, Some(true));
    assert_eq!(busy.next().await, Some(false));
    settle().await;
    assert!(descriptions.try_next().is_none());
}

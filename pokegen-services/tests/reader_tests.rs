mod common;

use common::{settle, wait_until};
use pokegen_services::{FileUpload, Reader};

#[tokio::test]
async fn read_emits_a_data_url() {
    let reader = Reader::new();
    let mut urls = reader.object_urls.subscribe();

    reader.read(FileUpload::new("pixel.png", "image/png", vec![1, 2, 3]));

    let url = urls.next().await.unwrap();
    assert_eq!(url, "data:image/png;base64,AQID");
}

#[tokio::test]
async fn is_reading_resets_after_success() {
    let reader = Reader::new();
    let mut urls = reader.object_urls.subscribe();

    reader.read(FileUpload::new("a.png", "image/png", vec![0; 32]));
    urls.next().await.unwrap();

    wait_until(|| reader.is_reading.current() == Some(false)).await;
}

#[tokio::test]
async fn double_upload_emits_only_the_last_url() {
    let reader = Reader::new();
    let mut urls = reader.object_urls.subscribe();

    // Issue the second read before the first conversion can resolve.
    reader.read(FileUpload::new("first.png", "image/png", vec![1]));
    reader.read(FileUpload::new("second.png", "image/png", vec![2]));

    let url = urls.next().await.unwrap();
    assert_eq!(url, FileUpload::new("second.png", "image/png", vec![2]).to_data_url());

    settle().await;
    assert!(urls.try_next().is_none());
    assert_eq!(reader.is_reading.current(), Some(false));
}

#[tokio::test]
async fn failed_file_read_emits_nothing_and_resets_the_flag() {
    let reader = Reader::new();
    let mut urls = reader.object_urls.subscribe();

    reader.read_path("/nonexistent/elephant.jpg");

    wait_until(|| reader.is_reading.current() == Some(false)).await;
    settle().await;
    assert!(urls.try_next().is_none());
}

#[tokio::test]
async fn read_path_emits_the_file_contents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("photo.jpg");
    tokio::fs::write(&path, b"jpegdata").await.unwrap();

    let reader = Reader::new();
    let mut urls = reader.object_urls.subscribe();
    reader.read_path(&path);

    let url = urls.next().await.unwrap();
    assert!(url.starts_with("data:image/jpeg;base64,"));
}

#[tokio::test]
async fn object_urls_replay_to_late_subscribers() {
    let reader = Reader::new();
    let mut first = reader.object_urls.subscribe();

    reader.read(FileUpload::new("a.png", "image/png", vec![1]));
    let url = first.next().await.unwrap();

    let mut late = reader.object_urls.subscribe();
    assert_eq!(late.next().await.unwrap(), url);
}

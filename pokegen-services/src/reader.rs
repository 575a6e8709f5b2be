//! Service for reading files and producing data URLs.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use pokegen_channel::{Channel, Teardown, operators};
use std::path::{Path, PathBuf};

use crate::service::Service;

/// An uploaded file: a name, a MIME type, and the raw bytes.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    #[must_use]
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// Encodes the bytes as a base64 data URL.
    #[must_use]
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }
}

/// MIME type guessed from a path's extension.
fn mime_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[derive(Debug, Clone)]
enum ReadRequest {
    Upload(FileUpload),
    Path(PathBuf),
}

/// Service for reading files and generating object URLs.
///
/// `read` requests flow through a switch-to-latest pipeline: if a second
/// request arrives while one is still converting, the first conversion's
/// result is discarded when it lands — only the URL of the last-issued file
/// is ever emitted on `object_urls`.
pub struct Reader {
    /// True while a conversion is in flight.
    pub is_reading: Channel<bool>,
    /// Replay channel of produced data URLs.
    pub object_urls: Channel<String>,
    requests: Channel<ReadRequest>,
    destroyed: Teardown,
}

impl Reader {
    #[must_use]
    pub fn new() -> Self {
        let destroyed = Teardown::new();
        let is_reading = Channel::latest(false);
        let object_urls = Channel::replay();
        let requests = Channel::event();

        let urls = operators::map_to_latest_async(
            "reader: convert file",
            &requests,
            Some(&is_reading),
            &destroyed,
            |request: ReadRequest| async move {
                let upload = match request {
                    ReadRequest::Upload(upload) => upload,
                    ReadRequest::Path(path) => {
                        let bytes = tokio::fs::read(&path).await?;
                        let name = path
                            .file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_default();
                        FileUpload::new(name, mime_for(&path), bytes)
                    }
                };
                // Encoding a large image is CPU work; keep it off the
                // async workers.
                let url = tokio::task::spawn_blocking(move || upload.to_data_url()).await?;
                Ok(url)
            },
        );
        operators::forward_into(&urls, &object_urls, &destroyed);

        Self {
            is_reading,
            object_urls,
            requests,
            destroyed,
        }
    }

    /// Uploads a file and triggers further processing.
    pub fn read(&self, file: FileUpload) {
        self.requests.emit(ReadRequest::Upload(file));
    }

    /// Reads a file from disk and triggers further processing.
    pub fn read_path(&self, path: impl AsRef<Path>) {
        self.requests.emit(ReadRequest::Path(path.as_ref().to_path_buf()));
    }
}

impl Default for Reader {
    fn default() -> Self {
        Self::new()
    }
}

impl Service for Reader {
    fn destroyed(&self) -> &Teardown {
        &self.destroyed
    }
}

//! Service for accessing the capture device.

use async_trait::async_trait;
use pokegen_channel::{Channel, Teardown, operators};
use pokegen_storage::PreferenceStore;
use pokegen_types::FacingMode;
use std::sync::Arc;
use tracing::warn;

use crate::service::Service;

/// One track of an acquired media stream. Stopping is idempotent.
pub trait MediaTrack: Send + Sync {
    fn stop(&self);
    fn is_live(&self) -> bool;
}

/// Captures still frames from a live stream.
#[async_trait]
pub trait FrameGrabber: Send + Sync {
    async fn grab_frame(&self) -> anyhow::Result<crate::FileUpload>;
}

/// A granted media stream: a bundle of stoppable tracks, optionally able to
/// produce still frames.
pub struct MediaStream {
    tracks: Vec<Arc<dyn MediaTrack>>,
    grabber: Option<Arc<dyn FrameGrabber>>,
}

impl MediaStream {
    #[must_use]
    pub fn new(tracks: Vec<Arc<dyn MediaTrack>>) -> Self {
        Self {
            tracks,
            grabber: None,
        }
    }

    #[must_use]
    pub fn with_grabber(tracks: Vec<Arc<dyn MediaTrack>>, grabber: Arc<dyn FrameGrabber>) -> Self {
        Self {
            tracks,
            grabber: Some(grabber),
        }
    }

    #[must_use]
    pub fn tracks(&self) -> &[Arc<dyn MediaTrack>] {
        &self.tracks
    }

    /// Captures a still frame, when the backend supports it.
    pub async fn grab_frame(&self) -> anyhow::Result<crate::FileUpload> {
        match &self.grabber {
            Some(grabber) => grabber.grab_frame().await,
            None => anyhow::bail!("stream cannot capture frames"),
        }
    }

    /// Stops every track.
    pub fn stop_all(&self) {
        for track in &self.tracks {
            track.stop();
        }
    }
}

/// Abstract interface for the capture device. Enables pluggable backends
/// and test doubles.
#[async_trait]
pub trait VideoSource: Send + Sync {
    /// Requests a video stream facing the given way. Fails when the device
    /// is missing or permission is denied.
    async fn open(&self, facing: FacingMode) -> anyhow::Result<MediaStream>;
}

/// A service for acquiring and releasing the capture device.
///
/// Acquisition errors are caught and logged; the stream value returns to
/// `None` and no error surfaces to the caller.
pub struct Camera {
    /// The current stream, `None` while no device is held.
    pub media_stream: Channel<Option<Arc<MediaStream>>>,
    /// True while an acquisition is in flight.
    pub is_acquiring: Channel<bool>,
    acquire: Channel<()>,
    preferences: Arc<PreferenceStore>,
    destroyed: Teardown,
}

impl Camera {
    #[must_use]
    pub fn new(source: Arc<dyn VideoSource>, preferences: Arc<PreferenceStore>) -> Self {
        let destroyed = Teardown::new();
        let media_stream = Channel::latest(None);
        let is_acquiring = Channel::latest(false);
        let acquire = Channel::event();

        let prefs = Arc::clone(&preferences);
        let acquired = operators::map_to_latest_async(
            "camera: acquire media stream",
            &acquire,
            Some(&is_acquiring),
            &destroyed,
            move |()| {
                let source = Arc::clone(&source);
                let prefs = Arc::clone(&prefs);
                async move {
                    let facing = preferred_facing_mode(&prefs);
                    let stream =
                        operators::catch_and_recover("camera: acquire media stream", source.open(facing))
                            .await;
                    Ok(stream.map(Arc::new))
                }
            },
        );
        operators::forward_into(&acquired, &media_stream, &destroyed);

        Self {
            media_stream,
            is_acquiring,
            acquire,
            preferences,
            destroyed,
        }
    }

    /// Triggers acquisition. No-op if a stream is already active.
    pub fn acquire_media_stream(&self) {
        if self.media_stream.current().flatten().is_some() {
            return;
        }
        self.acquire.emit(());
    }

    /// Stops all tracks of the current stream and notifies subscribers.
    /// No-op if none is active.
    pub fn dispose_media_stream(&self) {
        let Some(stream) = self.media_stream.current().flatten() else {
            return;
        };
        stream.stop_all();
        self.media_stream.emit(None);
    }

    /// Switches the persisted facing mode, then reacquires.
    pub fn toggle_facing_mode(&self) {
        let toggled = preferred_facing_mode(&self.preferences).toggled();
        if let Err(err) = self.preferences.set_facing_mode(toggled) {
            warn!("camera: failed to persist facing mode: {err}");
        }
        self.dispose_media_stream();
        self.acquire_media_stream();
    }

    /// The persisted facing-mode preference.
    #[must_use]
    pub fn facing_mode(&self) -> FacingMode {
        preferred_facing_mode(&self.preferences)
    }
}

fn preferred_facing_mode(preferences: &PreferenceStore) -> FacingMode {
    preferences.facing_mode().unwrap_or_else(|err| {
        warn!("camera: failed to read facing mode: {err}");
        FacingMode::default()
    })
}

impl Service for Camera {
    fn destroyed(&self) -> &Teardown {
        &self.destroyed
    }

    fn on_destroy(&self) {
        self.dispose_media_stream();
    }
}

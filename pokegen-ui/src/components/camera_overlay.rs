//! The camera capture overlay.

use crate::component::{Component, Mount};
use crate::dom::Element;
use pokegen_channel::operators;
use pokegen_services::{Camera, Service, Services};
use std::sync::{Arc, Mutex};
use tracing::warn;

/// Shared slot the overlay lives in while open. The overlay destroys
/// itself through it on capture and on close.
pub type OverlaySlot = Arc<Mutex<Option<CameraOverlay>>>;

/// Modal overlay showing the live camera feed, with capture, facing-mode
/// switch, and close controls.
///
/// Each overlay owns its own [`Camera`] service so the device is released
/// the moment the overlay goes away. Controls stay disabled until a stream
/// is granted.
pub struct CameraOverlay {
    mount: Mount,
    services: Arc<Services>,
    camera: Arc<Camera>,
    slot: OverlaySlot,
}

impl CameraOverlay {
    #[must_use]
    pub fn new(root: Element, services: Arc<Services>, slot: OverlaySlot) -> Self {
        let camera = Arc::new(Camera::new(
            Arc::clone(&services.video_source),
            Arc::clone(&services.preferences),
        ));
        Self {
            mount: Mount::new(root),
            services,
            camera,
            slot,
        }
    }

    /// The overlay's camera service, mainly for tests.
    #[must_use]
    pub fn camera(&self) -> &Arc<Camera> {
        &self.camera
    }

    fn close_via(slot: &OverlaySlot) {
        if let Some(mut overlay) = slot.lock().expect("overlay slot lock poisoned").take() {
            overlay.destroy();
        }
    }
}

impl Component for CameraOverlay {
    fn mount(&self) -> &Mount {
        &self.mount
    }

    fn mount_mut(&mut self) -> &mut Mount {
        &mut self.mount
    }

    fn build(&self) -> Element {
        Element::new("div")
            .with_id("camera-modal")
            .with_class("modal")
            .with_child(
                Element::new("figure")
                    .with_id("camera-container")
                    .with_class("image")
                    .with_child(Element::new("video").with_id("camera-stream")),
            )
            .with_child(
                Element::new("button")
                    .with_id("camera-capture")
                    .with_class("button")
                    .with_attribute("disabled", "")
                    .with_text("Capture"),
            )
            .with_child(
                Element::new("button")
                    .with_id("camera-switch")
                    .with_class("button")
                    .with_attribute("disabled", ""),
            )
            .with_child(
                Element::new("button")
                    .with_id("camera-close")
                    .with_class("modal-close"),
            )
    }

    fn on_render(&mut self) {
        let Some(element) = self.mount.element.clone() else {
            return;
        };
        let container = element.get_element_by_id("camera-container");
        let video = element.get_element_by_id("camera-stream");
        let capture = element.get_element_by_id("camera-capture");
        let switch = element.get_element_by_id("camera-switch");
        let close = element.get_element_by_id("camera-close");
        let (Some(container), Some(video), Some(capture), Some(switch), Some(close)) =
            (container, video, capture, switch, close)
        else {
            return;
        };

        // Spinner on the capture button while acquiring.
        {
            let capture = capture.clone();
            operators::for_each(
                &self.camera.is_acquiring,
                &self.mount.destroyed,
                move |acquiring| {
                    if acquiring {
                        capture.add_class("is-loading");
                    } else {
                        capture.remove_class("is-loading");
                    }
                },
            );
        }

        // Enable the controls only while a stream is live.
        {
            let container = container.clone();
            let video = video.clone();
            let capture = capture.clone();
            let switch = switch.clone();
            operators::for_each(
                &self.camera.media_stream,
                &self.mount.destroyed,
                move |stream| {
                    if stream.is_some() {
                        video.set_attribute("data-live", "true");
                        capture.remove_attribute("disabled");
                        switch.remove_attribute("disabled");
                        container.remove_class("is-skeleton");
                    } else {
                        video.remove_attribute("data-live");
                        capture.set_attribute("disabled", "");
                        switch.set_attribute("disabled", "");
                        container.add_class("is-skeleton");
                    }
                },
            );
        }

        {
            let slot = Arc::clone(&self.slot);
            close.add_event_listener("click", move || Self::close_via(&slot));
        }

        {
            let camera = Arc::clone(&self.camera);
            let switch_el = switch.clone();
            switch.add_event_listener("click", move || {
                if switch_el.has_attribute("disabled") {
                    return;
                }
                camera.toggle_facing_mode();
            });
        }

        {
            let camera = Arc::clone(&self.camera);
            let reader = Arc::clone(&self.services.reader);
            let slot = Arc::clone(&self.slot);
            let capture_el = capture.clone();
            capture.add_event_listener("click", move || {
                if capture_el.has_attribute("disabled") {
                    return;
                }
                let Some(stream) = camera.media_stream.current().flatten() else {
                    return;
                };
                let reader = Arc::clone(&reader);
                let slot = Arc::clone(&slot);
                tokio::spawn(async move {
                    match stream.grab_frame().await {
                        Ok(upload) => {
                            reader.read(upload);
                            Self::close_via(&slot);
                        }
                        Err(err) => warn!("camera overlay: frame capture failed: {err:#}"),
                    }
                });
            });
        }

        self.camera.acquire_media_stream();
    }

    fn on_destroy(&mut self) {
        self.camera.destroy();
    }
}

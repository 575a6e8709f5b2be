//! Footer with the capture and upload actions.

use crate::component::{Component, Mount};
use crate::components::camera_overlay::{CameraOverlay, OverlaySlot};
use crate::dom::Element;
use pokegen_services::Services;
use std::sync::{Arc, Mutex};

/// The upload/capture tab bar.
///
/// The file input carries the chosen path in its `value` attribute; a
/// `change` event feeds it to the reader. The camera button opens a
/// [`CameraOverlay`] under the footer's root.
pub struct Footer {
    mount: Mount,
    services: Arc<Services>,
    overlay: OverlaySlot,
}

impl Footer {
    #[must_use]
    pub fn new(root: Element, services: Arc<Services>) -> Self {
        Self {
            mount: Mount::new(root),
            services,
            overlay: Arc::new(Mutex::new(None)),
        }
    }

    /// The overlay slot, mainly for tests.
    #[must_use]
    pub fn overlay(&self) -> &OverlaySlot {
        &self.overlay
    }
}

impl Component for Footer {
    fn mount(&self) -> &Mount {
        &self.mount
    }

    fn mount_mut(&mut self) -> &mut Mount {
        &mut self.mount
    }

    fn build(&self) -> Element {
        Element::new("nav")
            .with_id("app-tabs")
            .with_class("tabs")
            .with_child(
                Element::new("a")
                    .with_id("camera-button")
                    .with_text("Camera"),
            )
            .with_child(
                Element::new("input")
                    .with_id("file-input")
                    .with_attribute("type", "file")
                    .with_attribute("accept", "image/png, image/jpeg"),
            )
            .with_child(
                Element::new("a")
                    .with_id("upload-button")
                    .with_text("Upload"),
            )
    }

    fn on_render(&mut self) {
        let Some(element) = &self.mount.element else {
            return;
        };
        let camera_button = element.get_element_by_id("camera-button");
        let file_input = element.get_element_by_id("file-input");
        let upload_button = element.get_element_by_id("upload-button");
        let (Some(camera_button), Some(file_input), Some(upload_button)) =
            (camera_button, file_input, upload_button)
        else {
            return;
        };

        {
            let root = self.mount.root.clone();
            let services = Arc::clone(&self.services);
            let slot = Arc::clone(&self.overlay);
            camera_button.add_event_listener("click", move || {
                let mut overlay = slot.lock().expect("overlay slot lock poisoned");
                if overlay.is_some() {
                    return;
                }
                let mut opened =
                    CameraOverlay::new(root.clone(), Arc::clone(&services), Arc::clone(&slot));
                opened.render();
                *overlay = Some(opened);
            });
        }

        {
            let reader = Arc::clone(&self.services.reader);
            let input = file_input.clone();
            file_input.add_event_listener("change", move || {
                if let Some(path) = input.attribute("value").filter(|v| !v.is_empty()) {
                    reader.read_path(path);
                }
            });
        }

        {
            // Forwards to the hidden input, as a real file picker would.
            let input = file_input.clone();
            upload_button.add_event_listener("click", move || input.dispatch("click"));
        }
    }

    fn pre_destroy(&mut self) {
        if let Some(mut overlay) = self
            .overlay
            .lock()
            .expect("overlay slot lock poisoned")
            .take()
        {
            overlay.destroy();
        }
    }
}

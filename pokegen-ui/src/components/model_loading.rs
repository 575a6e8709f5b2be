//! Notification shown while the caption model loads.

use crate::component::{Component, Mount};
use crate::dom::Element;
use pokegen_channel::operators;
use pokegen_services::Caption;
use std::sync::{Arc, Mutex};

/// A notification that mounts itself while the caption model is loading
/// and removes itself once it is done. The fragment comes and goes; the
/// component instance lives until destroyed.
pub struct ModelLoadingNotice {
    mount: Mount,
}

impl ModelLoadingNotice {
    /// Creates the notice and wires it to the model-loading flag.
    #[must_use]
    pub fn attach(root: Element, caption: &Caption) -> Arc<Mutex<Self>> {
        let notice = Arc::new(Mutex::new(Self {
            mount: Mount::new(root),
        }));

        let scope = notice
            .lock()
            .expect("notice lock poisoned")
            .mount
            .destroyed
            .clone();
        let loading =
            operators::distinct_until_changed(&caption.is_loading_model, &scope, None);
        let slot = Arc::clone(&notice);
        operators::for_each(&loading, &scope, move |is_loading| {
            let mut notice = slot.lock().expect("notice lock poisoned");
            if is_loading {
                if !notice.is_mounted() {
                    notice.render();
                }
            } else {
                notice.remove();
            }
        });

        notice
    }
}

impl Component for ModelLoadingNotice {
    fn mount(&self) -> &Mount {
        &self.mount
    }

    fn mount_mut(&mut self) -> &mut Mount {
        &mut self.mount
    }

    fn build(&self) -> Element {
        Element::new("div")
            .with_id("model-loading-notice")
            .with_class("notification")
            .with_child(Element::new("p").with_text("Loading the model for generating captions"))
            .with_child(
                Element::new("progress")
                    .with_class("progress")
                    .with_attribute("max", "100"),
            )
    }
}

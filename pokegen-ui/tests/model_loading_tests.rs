mod common;

use async_trait::async_trait;
use common::wait_until;
use pokegen_services::{Caption, CaptionModel, ModelProvider, Reader};
use pokegen_ui::Element;
use pokegen_ui::components::ModelLoadingNotice;
use pokegen_ui::Component;
use std::sync::Arc;
use tokio::sync::Notify;

struct EchoModel;

#[async_trait]
impl CaptionModel for EchoModel {
    async fn caption(&self, _image_url: &str) -> anyhow::Result<String> {
        Ok("echo".into())
    }
}

/// A provider that finishes loading only when released.
struct GatedProvider {
    gate: Arc<Notify>,
}

#[async_trait]
impl ModelProvider for GatedProvider {
    async fn load(&self, _model_name: &str) -> anyhow::Result<Arc<dyn CaptionModel>> {
        self.gate.notified().await;
        Ok(Arc::new(EchoModel))
    }
}

#[tokio::test]
async fn the_notice_shows_while_the_model_loads_and_then_goes_away() {
    let gate = Arc::new(Notify::new());
    let reader = Reader::new();
    let caption = Caption::new(
        &reader,
        Arc::new(GatedProvider {
            gate: Arc::clone(&gate),
        }),
    );

    let root = Element::new("div");
    let notice = ModelLoadingNotice::attach(root.clone(), &caption);

    // Visible while loading.
    wait_until(|| root.child_count() == 1).await;

    gate.notify_one();
    wait_until(|| root.child_count() == 0).await;

    notice.lock().unwrap().destroy();
}

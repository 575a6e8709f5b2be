//! Service to generate captions for images.

use async_trait::async_trait;
use pokegen_channel::{Channel, Teardown, operators};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::service::Service;

/// The fixed captioning model, loaded exactly once per application run.
pub const CAPTION_MODEL_NAME: &str = "vit-gpt2-image-captioning";

/// A loaded captioning model.
#[async_trait]
pub trait CaptionModel: Send + Sync {
    /// Generates a caption for the image at the given data URL.
    async fn caption(&self, image_url: &str) -> anyhow::Result<String>;
}

/// Loads captioning models by name.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    async fn load(&self, model_name: &str) -> anyhow::Result<Arc<dyn CaptionModel>>;
}

/// Service to generate captions for images.
///
/// Loading starts at construction and resolves once into the replay `model`
/// channel. Every `(image, model)` pair runs inference switch-to-latest:
/// a newer image discards the wait on an older inference's result.
pub struct Caption {
    /// Replay channel of generated captions.
    pub captions: Channel<String>,
    /// Replay channel holding the loaded model handle; resolves once.
    pub model: Channel<Arc<dyn CaptionModel>>,
    /// True while the model is loading.
    pub is_loading_model: Channel<bool>,
    /// True while an inference is in flight.
    pub is_generating_caption: Channel<bool>,
    destroyed: Teardown,
}

impl Caption {
    #[must_use]
    pub fn new(reader: &crate::Reader, provider: Arc<dyn ModelProvider>) -> Self {
        let destroyed = Teardown::new();
        let captions = Channel::replay();
        let model: Channel<Arc<dyn CaptionModel>> = Channel::replay();
        let is_loading_model = Channel::latest(false);
        let is_generating_caption = Channel::latest(false);

        // Load the model and notify subscribers when it's ready.
        let load_seed: Channel<&'static str> = Channel::event();
        let loaded = operators::map_to_latest_async(
            "caption: load model",
            &load_seed,
            Some(&is_loading_model),
            &destroyed,
            move |model_name| {
                let provider = Arc::clone(&provider);
                async move {
                    info!("loading caption model '{model_name}'");
                    provider.load(model_name).await
                }
            },
        );
        operators::forward_into(&loaded, &model, &destroyed);

        // Generate captions when an image is available and the model is
        // loaded.
        let pairs = operators::combine_latest(&reader.object_urls, &model, &destroyed);
        let generated = operators::map_to_latest_async(
            "caption: generate",
            &pairs,
            Some(&is_generating_caption),
            &destroyed,
            |(image_url, model): (String, Arc<dyn CaptionModel>)| async move {
                let caption = model.caption(&image_url).await?;
                debug!("generated caption: {caption}");
                Ok(caption)
            },
        );
        operators::forward_into(&generated, &captions, &destroyed);

        // The wiring above subscribed synchronously, so the single seed
        // emission cannot be missed.
        load_seed.emit(CAPTION_MODEL_NAME);

        Self {
            captions,
            model,
            is_loading_model,
            is_generating_caption,
            destroyed,
        }
    }
}

impl Service for Caption {
    fn destroyed(&self) -> &Teardown {
        &self.destroyed
    }
}

/// Captioning model served by a local inference endpoint.
///
/// `POST {endpoint}` with `{"model": …, "image": <data URL>}`, answered by
/// `{"caption": …}`.
pub struct HttpCaptionModel {
    client: reqwest::Client,
    endpoint: String,
    model_name: String,
}

#[async_trait]
impl CaptionModel for HttpCaptionModel {
    async fn caption(&self, image_url: &str) -> anyhow::Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({
                "model": self.model_name,
                "image": image_url,
            }))
            .timeout(Duration::from_secs(120))
            .send()
            .await?
            .error_for_status()?;

        let body: serde_json::Value = response.json().await?;
        body.get("caption")
            .and_then(|c| c.as_str())
            .map(str::to_owned)
            .ok_or_else(|| anyhow::anyhow!("caption endpoint returned no caption"))
    }
}

/// Loads [`HttpCaptionModel`]s after probing the inference server.
pub struct HttpModelProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpModelProvider {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ModelProvider for HttpModelProvider {
    async fn load(&self, model_name: &str) -> anyhow::Result<Arc<dyn CaptionModel>> {
        // The server pulls model weights on first use; probing up front
        // turns "server missing" into a load failure instead of a caption
        // failure per image.
        self.client
            .get(format!("{}/healthcheck", self.base_url))
            .timeout(Duration::from_secs(10))
            .send()
            .await?
            .error_for_status()?;

        Ok(Arc::new(HttpCaptionModel {
            client: self.client.clone(),
            endpoint: format!("{}/caption", self.base_url),
            model_name: model_name.to_string(),
        }))
    }
}

//! Service to generate descriptions from captions.

use pokegen_channel::{Channel, Teardown, operators};
use pokegen_model::PokemonDescription;
use std::time::Duration;
use tracing::debug;

use crate::error::ServiceResult;
use crate::service::Service;

/// Client for the remote description endpoint.
pub struct DescriptionClient {
    client: reqwest::Client,
    base_url: String,
}

impl DescriptionClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// `GET {base}/describe?prompt=…`, validated against the description
    /// schema on the way in. Non-2xx statuses and schema violations both
    /// surface as errors — no partial record ever escapes.
    pub async fn describe(&self, prompt: &str) -> ServiceResult<PokemonDescription> {
        let response = self
            .client
            .get(format!("{}/describe", self.base_url))
            .query(&[("prompt", prompt)])
            .timeout(Duration::from_secs(300))
            .send()
            .await?
            .error_for_status()?;

        let body: serde_json::Value = response.json().await?;
        Ok(PokemonDescription::from_value(body)?)
    }
}

/// Service to generate descriptions from captions.
pub struct Description {
    /// True while a request is in flight.
    pub is_generating_description: Channel<bool>,
    /// Replay channel of validated descriptions.
    pub descriptions: Channel<PokemonDescription>,
    destroyed: Teardown,
}

impl Description {
    #[must_use]
    pub fn new(caption: &crate::Caption, client: DescriptionClient) -> Self {
        let destroyed = Teardown::new();
        let is_generating_description = Channel::latest(false);
        let descriptions = Channel::replay();

        let client = std::sync::Arc::new(client);
        let generated = operators::map_to_latest_async(
            "description: generate",
            &caption.captions,
            Some(&is_generating_description),
            &destroyed,
            move |caption: String| {
                let client = std::sync::Arc::clone(&client);
                async move {
                    debug!("generating description for caption: {caption}");
                    let description = client.describe(&caption).await?;
                    debug!("generated description for '{}'", description.name);
                    Ok(description)
                }
            },
        );
        operators::forward_into(&generated, &descriptions, &destroyed);

        Self {
            is_generating_description,
            descriptions,
            destroyed,
        }
    }
}

impl Service for Description {
    fn destroyed(&self) -> &Teardown {
        &self.destroyed
    }
}

//! The reactive service layer.
//!
//! Each service owns its broadcast channels exclusively and wires its
//! pipelines once, in its constructor, scoped to a per-instance teardown.
//! UI components are read-only consumers: they subscribe to channels and
//! invoke service operations, never mutate service state directly.
//!
//! Services are constructed once at application start (see [`Services`])
//! and shared as `Arc`s — no module-level singletons. The one exception is
//! [`Camera`], which the camera overlay constructs per use so the device is
//! only held while the overlay is open.
//!
//! External collaborators sit behind traits: [`VideoSource`] for the
//! capture device, [`CaptionModel`]/[`ModelProvider`] for on-device-style
//! captioning, [`ThemeTarget`] for the document attribute mirror. The
//! production implementations talk to local inference endpoints over HTTP.

mod camera;
mod caption;
mod database;
mod description;
mod error;
mod pokemon;
mod reader;
mod service;
mod theme;

use std::path::PathBuf;
use std::sync::Arc;

pub use camera::{Camera, FrameGrabber, MediaStream, MediaTrack, VideoSource};
pub use caption::{
    CAPTION_MODEL_NAME, Caption, CaptionModel, HttpCaptionModel, HttpModelProvider, ModelProvider,
};
pub use database::Database;
pub use description::{Description, DescriptionClient};
pub use error::{ServiceError, ServiceResult};
pub use pokemon::Pokemon;
pub use reader::{FileUpload, Reader};
pub use service::Service;
pub use theme::{ThemeService, ThemeTarget};

use pokegen_storage::PreferenceStore;

/// Configuration for the service layer.
#[derive(Debug, Clone)]
pub struct ServicesConfig {
    /// Path of the SQLite database holding records and preferences.
    pub db_path: PathBuf,
    /// Base URL of the description backend (`GET /describe`).
    pub describe_base_url: String,
    /// Base URL of the caption inference endpoint.
    pub caption_base_url: String,
}

/// The application's service graph, constructed once at startup.
pub struct Services {
    pub reader: Arc<Reader>,
    pub caption: Arc<Caption>,
    pub description: Arc<Description>,
    pub database: Arc<Database>,
    pub pokemon: Arc<Pokemon>,
    pub theme: Arc<ThemeService>,
    pub preferences: Arc<PreferenceStore>,
    /// The capture device; camera overlays build their own [`Camera`]
    /// service around it.
    pub video_source: Arc<dyn VideoSource>,
}

impl Services {
    /// Wires the full service graph: Reader → Caption → Description →
    /// Pokemon, plus theme and preferences.
    pub fn new(
        config: &ServicesConfig,
        video_source: Arc<dyn VideoSource>,
        theme_target: Arc<dyn ThemeTarget>,
    ) -> ServiceResult<Arc<Self>> {
        let preferences = Arc::new(PreferenceStore::open(&config.db_path)?);

        let reader = Arc::new(Reader::new());
        let provider = Arc::new(HttpModelProvider::new(&config.caption_base_url));
        let caption = Arc::new(Caption::new(&reader, provider));
        let client = DescriptionClient::new(&config.describe_base_url);
        let description = Arc::new(Description::new(&caption, client));
        let database = Database::new(config.db_path.clone());
        let pokemon = Arc::new(Pokemon::new(
            &reader,
            &caption,
            &description,
            Arc::clone(&database),
        ));
        let theme = Arc::new(ThemeService::new(Arc::clone(&preferences), theme_target));

        Ok(Arc::new(Self {
            reader,
            caption,
            description,
            database,
            pokemon,
            theme,
            preferences,
            video_source,
        }))
    }

    /// Tears down every service.
    pub fn destroy(&self) {
        self.pokemon.destroy();
        self.description.destroy();
        self.caption.destroy();
        self.reader.destroy();
        self.theme.destroy();
        self.database.destroy();
    }
}

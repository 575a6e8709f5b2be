//! Service to manage the theme of the application.

use pokegen_channel::{Channel, Teardown, operators};
use pokegen_storage::PreferenceStore;
use pokegen_types::Theme;
use std::sync::Arc;
use tracing::warn;

use crate::service::Service;

/// The document-level surface the theme is mirrored onto.
pub trait ThemeTarget: Send + Sync {
    fn set_theme_attribute(&self, theme: Theme);
    fn clear_theme_attribute(&self);
}

/// Service to manage the theme of the application.
///
/// The current theme is seeded from the preference store; every change is
/// mirrored onto the document attribute and persisted. `None` means auto:
/// attribute removed, preference cleared.
pub struct ThemeService {
    /// The current theme; `None` for auto.
    pub current: Channel<Option<Theme>>,
    destroyed: Teardown,
}

impl ThemeService {
    #[must_use]
    pub fn new(preferences: Arc<PreferenceStore>, target: Arc<dyn ThemeTarget>) -> Self {
        let destroyed = Teardown::new();
        let initial = preferences.theme().unwrap_or_else(|err| {
            warn!("theme: failed to read preference: {err}");
            None
        });
        let current = Channel::latest(initial);

        // Mirror onto the document whenever the current theme changes. The
        // seeded value is delivered too, restoring the attribute at startup.
        operators::for_each(&current, &destroyed, move |theme| match theme {
            Some(theme) => target.set_theme_attribute(theme),
            None => target.clear_theme_attribute(),
        });

        // Persist whenever the current theme changes.
        let prefs = Arc::clone(&preferences);
        operators::for_each(&current, &destroyed, move |theme| {
            if let Err(err) = prefs.set_theme(theme) {
                warn!("theme: failed to persist preference: {err}");
            }
        });

        Self { current, destroyed }
    }

    /// Switches the theme. `None` selects auto.
    pub fn set(&self, theme: Option<Theme>) {
        self.current.emit(theme);
    }
}

impl Service for ThemeService {
    fn destroyed(&self) -> &Teardown {
        &self.destroyed
    }
}

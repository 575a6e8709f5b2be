//! SQLite storage layer for pokegen.
//!
//! Two small stores share one database file:
//!
//! - [`RecordStore`] — the Pokemon record collection, keyed by `name`, one
//!   JSON column per row. Rows are validated on read because the column is
//!   schemaless; a corrupt row is skipped with a warning rather than
//!   failing the whole listing.
//! - [`PreferenceStore`] — a string key/value table for the theme and the
//!   camera facing-mode preference.
//!
//! Both stores serialize access through the connection mutex; callers in
//! async contexts wrap calls in `spawn_blocking`.

mod error;
mod preference_store;
mod record_store;

pub use error::{StorageError, StorageResult};
pub use preference_store::{FACING_MODE_KEY, PreferenceStore, THEME_KEY};
pub use record_store::RecordStore;

//! Shared leaf types for the pokegen workspace.
//!
//! Everything here is plain data: the elemental type enum, the persisted
//! user preferences (theme, camera facing mode), and the record timestamp.
//! Higher layers build the record model and the reactive services on top.

mod elemental;
mod preferences;
mod timestamp;

pub use elemental::{ElementalType, ParseElementalTypeError};
pub use preferences::{FacingMode, Theme};
pub use timestamp::Timestamp;

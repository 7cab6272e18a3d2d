//! Domain layer: pure types with no I/O.
//!
//! Nothing in here spawns processes, reads files or awaits anything, so the
//! whole layer is unit-testable on any platform.

pub mod notice;
pub mod proxy;
pub mod settings;

pub use notice::{Notice, ToggleReport};
pub use settings::{Settings, SettingsOverrides};

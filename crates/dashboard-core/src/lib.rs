//! Core library for the analytics dashboard front-end.
//!
//! Holds everything that does not depend on a particular host view layer:
//! - `theme` - token resolution (mode, accent, font scale, density, palettes)
//! - `stylesheet` - the structured stylesheet model and its text formatter
//! - `preferences` - per-session preference store and role state
//! - `settings` - the settings controller that diffs widget input and re-renders
//! - `navigation` - role-gated page groups and the page registry
//! - `config` - TOML configuration with embedded defaults

pub mod config;
pub mod error;
pub mod logging;
pub mod navigation;
pub mod preferences;
pub mod selectors;
pub mod settings;
pub mod stylesheet;
pub mod theme;

pub use config::Config;
pub use error::{Error, Result};
pub use navigation::{Navigation, PageGroup, PageRegistry};
pub use preferences::{Preference, Role, Session, ThemePrefs};
pub use settings::{RenderOutcome, SettingsController, SettingsInput};
pub use stylesheet::{PaletteOverride, Stylesheet, generate_css};
pub use theme::{Accent, Density, FontScale, Palette, ResolvedTokens, ThemeMode, parse_hex_color};

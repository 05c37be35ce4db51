//! Configuration types and parsing.
//!
//! The configuration covers application-level settings: the theme a fresh
//! session starts with, the accent presets offered by the settings page and
//! how the stylesheet artifact is emitted. It never stores a viewer's
//! preferences; those live only in their session.

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use toml::Table;

use crate::error::{Error, Result};
use crate::preferences::Role;
use crate::theme::{Accent, Density, FontScale, ThemeMode, parse_hex_color};

/// Embedded default configuration TOML, compiled into the binary.
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../../config.toml");

/// Accepted range for `stylesheet.base_font_px`.
const BASE_FONT_PX_RANGE: std::ops::RangeInclusive<u32> = 8..=48;

/// Result of loading a configuration file.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Path where config was found, if any.
    pub source: Option<PathBuf>,
    /// Whether defaults were used (no config file found).
    pub used_defaults: bool,
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Theme and role a new session starts with.
    pub session: SessionConfig,

    /// Accent presets offered by the settings page.
    pub accent: AccentConfig,

    /// Stylesheet output options.
    pub stylesheet: StylesheetConfig,
}

impl Config {
    /// Load configuration from the embedded default TOML string.
    pub fn from_default_toml() -> Result<Self> {
        let config: Config = toml::from_str(DEFAULT_CONFIG_TOML)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, merging with embedded defaults.
    ///
    /// Returns an error if the file doesn't exist or can't be parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        Self::load_with_defaults(&content)
    }

    /// Parse user TOML over the embedded defaults (user values win).
    pub fn load_with_defaults(user_toml: &str) -> Result<Self> {
        let mut base: Table = toml::from_str(DEFAULT_CONFIG_TOML)?;
        let user: Table = toml::from_str(user_toml)?;

        deep_merge_toml(&mut base, user);

        let config: Config = base.try_into()?;
        Ok(config)
    }

    /// Find and load configuration using the XDG lookup chain.
    ///
    /// If `explicit_path` is `Some`, that path is used directly and an error
    /// is returned if it doesn't exist or can't be parsed (no fallback).
    ///
    /// If `explicit_path` is `None`, searches in order:
    /// 1. `$XDG_CONFIG_HOME/dashboard/config.toml`
    /// 2. `~/.config/dashboard/config.toml`
    /// 3. `./config.toml` (current working directory)
    ///
    /// A file that exists but fails to load is an error; defaults are only
    /// used when no file exists at all.
    pub fn find_and_load(explicit_path: Option<&Path>) -> Result<ConfigLoadResult> {
        if let Some(path) = explicit_path {
            let config = Self::load(path)?;
            return Ok(ConfigLoadResult {
                config,
                source: Some(path.to_path_buf()),
                used_defaults: false,
            });
        }

        let search_paths = Self::config_search_paths();
        let mut first_error: Option<(PathBuf, Error)> = None;

        for path in &search_paths {
            if path.exists() {
                match Self::load(path) {
                    Ok(config) => {
                        return Ok(ConfigLoadResult {
                            config,
                            source: Some(path.clone()),
                            used_defaults: false,
                        });
                    }
                    Err(e) => {
                        if first_error.is_none() {
                            first_error = Some((path.clone(), e));
                        }
                    }
                }
            }
        }

        if let Some((path, error)) = first_error {
            tracing::error!(
                "Config file {:?} exists but failed to load: {}",
                path,
                error
            );
            return Err(error);
        }

        tracing::info!("No config file found, using built-in default config");
        tracing::debug!(
            "Searched: {}",
            search_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(ConfigLoadResult {
            config: Self::from_default_toml()?,
            source: None,
            used_defaults: true,
        })
    }

    /// Get the list of paths to search for config files.
    pub fn config_search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg_config).join("dashboard/config.toml"));
        }

        if let Ok(home) = env::var("HOME") {
            paths.push(PathBuf::from(home).join(".config/dashboard/config.toml"));
        }

        paths.push(PathBuf::from("config.toml"));

        paths
    }

    /// Validate the configuration, collecting every problem found.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.accent.presets.is_empty() {
            errors.push("accent.presets: at least one preset is required".to_string());
        }

        for (i, preset) in self.accent.presets.iter().enumerate() {
            if preset.name.trim().is_empty() {
                errors.push(format!("accent.presets[{}]: name must not be empty", i));
            }
            if Accent::parse(&preset.color).is_none() {
                errors.push(format!(
                    "accent.presets[{}]: invalid color '{}', expected a hex color like '#3b82f6'",
                    i, preset.color
                ));
            }
            if self.accent.presets[..i].iter().any(|p| p.name == preset.name) {
                errors.push(format!(
                    "accent.presets[{}]: duplicate preset name '{}'",
                    i, preset.name
                ));
            }
        }

        if !BASE_FONT_PX_RANGE.contains(&self.stylesheet.base_font_px) {
            errors.push(format!(
                "stylesheet.base_font_px: invalid value '{}', must be between {} and {}",
                self.stylesheet.base_font_px,
                BASE_FONT_PX_RANGE.start(),
                BASE_FONT_PX_RANGE.end()
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::ConfigValidation(errors))
        }
    }

    /// Non-fatal issues worth telling the operator about.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if !self.accent.presets.is_empty()
            && self.accent.index_of(&self.session.accent).is_none()
        {
            warnings.push(format!(
                "session.accent: '{}' is not one of the accent presets; \
                 the preset selector will start on '{}'",
                self.session.accent, self.accent.presets[0].name
            ));
        }

        if self.session.role != Role::None {
            warnings.push(format!(
                "session.role: new sessions start signed in as '{}'",
                self.session.role
            ));
        }

        warnings
    }

    /// Print a human-readable summary of the configuration.
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();

        lines.push("Session defaults:".to_string());
        lines.push(format!("  theme_mode: {}", self.session.theme_mode));
        lines.push(format!("  accent: {}", self.session.accent));
        lines.push(format!("  font_scale: {}", self.session.font_scale));
        lines.push(format!("  density: {}", self.session.density));
        lines.push(format!("  role: {}", self.session.role));

        lines.push("\nAccent presets:".to_string());
        for preset in &self.accent.presets {
            lines.push(format!("  - {} ({})", preset.name, preset.color));
        }

        lines.push("\nStylesheet:".to_string());
        lines.push(format!("  style_tag: {}", self.stylesheet.style_tag));
        lines.push(format!("  transitions: {}", self.stylesheet.transitions));
        lines.push(format!("  base_font_px: {}px", self.stylesheet.base_font_px));

        lines.join("\n")
    }
}

/// Deep merge two TOML tables, with `overlay` values taking precedence.
///
/// For nested tables, recursively merges. For arrays and other values,
/// the overlay value completely replaces the base value.
fn deep_merge_toml(base: &mut Table, overlay: Table) {
    for (key, overlay_value) in overlay {
        match (base.get_mut(&key), overlay_value) {
            (Some(toml::Value::Table(base_table)), toml::Value::Table(overlay_table)) => {
                deep_merge_toml(base_table, overlay_table);
            }
            (_, overlay_value) => {
                base.insert(key, overlay_value);
            }
        }
    }
}

/// Startup theme and role for new sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub theme_mode: ThemeMode,
    pub accent: Accent,
    pub font_scale: FontScale,
    pub density: Density,
    /// Role before anyone signs in. Normally `none`.
    pub role: Role,
}

/// A named accent color offered by the settings page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccentPreset {
    pub name: String,
    /// Hex color. Checked by `Config::validate`.
    pub color: String,
}

impl AccentPreset {
    fn new(name: &str, color: &str) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
        }
    }
}

/// Ordered accent presets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccentConfig {
    pub presets: Vec<AccentPreset>,
}

impl Default for AccentConfig {
    fn default() -> Self {
        Self {
            presets: vec![
                AccentPreset::new("Blue", "#3b82f6"),
                AccentPreset::new("Indigo", "#6366f1"),
                AccentPreset::new("Violet", "#8b5cf6"),
                AccentPreset::new("Teal", "#14b8a6"),
                AccentPreset::new("Emerald", "#10b981"),
                AccentPreset::new("Amber", "#f59e0b"),
                AccentPreset::new("Rose", "#f43f5e"),
            ],
        }
    }
}

impl AccentConfig {
    /// Accent for a preset name. None for unknown names or invalid colors.
    pub fn lookup(&self, name: &str) -> Option<Accent> {
        self.presets
            .iter()
            .find(|preset| preset.name == name)
            .and_then(|preset| Accent::parse(&preset.color))
    }

    /// Position of the preset whose color equals `accent`, if any.
    pub fn index_of(&self, accent: &Accent) -> Option<usize> {
        self.presets
            .iter()
            .position(|preset| preset.color == accent.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.iter().map(|preset| preset.name.as_str())
    }

    /// RGB of every preset that parses, for swatch rendering.
    pub fn swatches(&self) -> Vec<(&str, (u8, u8, u8))> {
        self.presets
            .iter()
            .filter_map(|preset| {
                parse_hex_color(&preset.color).map(|rgb| (preset.name.as_str(), rgb))
            })
            .collect()
    }
}

/// How the stylesheet artifact is emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StylesheetConfig {
    /// Wrap the CSS in a `<style>` element.
    pub style_tag: bool,

    /// Emit the reduced-motion aware color transition rule.
    pub transitions: bool,

    /// Root font size in pixels before `--font-scale` is applied.
    pub base_font_px: u32,
}

impl Default for StylesheetConfig {
    fn default() -> Self {
        Self {
            style_tag: true,
            transitions: true,
            base_font_px: 16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.session.theme_mode, ThemeMode::Auto);
        assert_eq!(config.session.accent.as_str(), "#3b82f6");
        assert_eq!(config.session.font_scale, FontScale::Base);
        assert_eq!(config.session.density, Density::Normal);
        assert_eq!(config.session.role, Role::None);
        assert_eq!(config.accent.presets.len(), 7);
        assert_eq!(config.stylesheet.base_font_px, 16);
    }

    #[test]
    fn test_embedded_default_config_parses_and_validates() {
        let config = Config::from_default_toml().expect("embedded default config should parse");
        assert!(config.validate().is_ok());
        assert!(config.warnings().is_empty());
    }

    #[test]
    fn test_embedded_default_matches_struct_defaults() {
        let from_toml = Config::from_default_toml().unwrap();
        let from_struct = Config::default();

        assert_eq!(from_toml.session, from_struct.session);
        assert_eq!(from_toml.accent, from_struct.accent);
        assert_eq!(from_toml.stylesheet, from_struct.stylesheet);
    }

    #[test]
    fn test_parse_minimal_toml() {
        let toml = r#"
            [session]
            theme_mode = "dark"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.session.theme_mode, ThemeMode::Dark);
        assert_eq!(config.session.density, Density::Normal);
        assert_eq!(config.accent.presets.len(), 7);
    }

    #[test]
    fn test_load_with_defaults_nested_override() {
        let user_toml = r#"
            [session]
            font_scale = "lg"
            role = "guest"
        "#;

        let config = Config::load_with_defaults(user_toml).unwrap();
        assert_eq!(config.session.font_scale, FontScale::Lg);
        assert_eq!(config.session.role, Role::Guest);
        // untouched values come from the embedded file
        assert_eq!(config.session.theme_mode, ThemeMode::Auto);
        assert!(config.stylesheet.style_tag);
    }

    #[test]
    fn test_load_with_defaults_presets_replace() {
        let user_toml = r##"
            [accent]
            presets = [{ name = "Brand", color = "#123456" }]
        "##;

        let config = Config::load_with_defaults(user_toml).unwrap();
        assert_eq!(config.accent.presets.len(), 1);
        assert_eq!(config.accent.lookup("Brand").unwrap().as_str(), "#123456");
        assert!(config.accent.lookup("Blue").is_none());
    }

    #[test]
    fn test_load_with_defaults_rejects_unknown_fields() {
        let user_toml = r#"
            [session]
            densty = "compact"
        "#;

        let err = Config::load_with_defaults(user_toml).unwrap_err().to_string();
        assert!(err.contains("densty"), "error should mention the unknown field");
    }

    #[test]
    fn test_load_with_defaults_rejects_out_of_domain_values() {
        let user_toml = r#"
            [session]
            density = "cozy"
        "#;
        assert!(Config::load_with_defaults(user_toml).is_err());

        let user_toml = r#"
            [session]
            accent = "blue"
        "#;
        assert!(Config::load_with_defaults(user_toml).is_err());
    }

    #[test]
    fn test_deep_merge_toml_tables() {
        let mut base: Table = toml::from_str(
            r#"
            [section]
            a = 1
            b = 2
        "#,
        )
        .unwrap();

        let overlay: Table = toml::from_str(
            r#"
            [section]
            b = 99
            c = 3
        "#,
        )
        .unwrap();

        deep_merge_toml(&mut base, overlay);

        let section = base.get("section").unwrap().as_table().unwrap();
        assert_eq!(section.get("a").unwrap().as_integer(), Some(1));
        assert_eq!(section.get("b").unwrap().as_integer(), Some(99));
        assert_eq!(section.get("c").unwrap().as_integer(), Some(3));
    }

    #[test]
    fn test_validate_invalid_preset_color() {
        let mut config = Config::default();
        config.accent.presets.push(AccentPreset::new("Bad", "#12345"));

        let msg = config.validate().unwrap_err().to_string();
        assert!(msg.contains("accent.presets[7]"));
        assert!(msg.contains("#12345"));
    }

    #[test]
    fn test_validate_multiple_errors() {
        let mut config = Config::default();
        config.accent.presets.push(AccentPreset::new("Blue", "#000000"));
        config.stylesheet.base_font_px = 2;

        let msg = config.validate().unwrap_err().to_string();
        assert!(msg.contains("duplicate preset name 'Blue'"));
        assert!(msg.contains("stylesheet.base_font_px"));
    }

    #[test]
    fn test_validate_requires_presets() {
        let mut config = Config::default();
        config.accent.presets.clear();
        let msg = config.validate().unwrap_err().to_string();
        assert!(msg.contains("at least one preset"));
    }

    #[test]
    fn test_warning_for_accent_outside_presets() {
        let mut config = Config::default();
        config.session.accent = Accent::parse("#abcdef").unwrap();

        let warnings = config.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("'Blue'"));
    }

    #[test]
    fn test_accent_preset_lookup_and_index() {
        let accent = AccentConfig::default();
        assert_eq!(accent.lookup("Emerald").unwrap().as_str(), "#10b981");
        assert!(accent.lookup("Chartreuse").is_none());
        assert_eq!(accent.index_of(&Accent::parse("#f43f5e").unwrap()), Some(6));
        assert_eq!(accent.names().next(), Some("Blue"));
        assert_eq!(accent.swatches()[0], ("Blue", (59, 130, 246)));
    }

    #[test]
    fn test_config_search_paths() {
        let paths = Config::config_search_paths();
        assert!(!paths.is_empty());
        assert!(paths.iter().any(|p| p.ends_with("config.toml")));
    }

    #[test]
    fn test_summary_mentions_sections() {
        let summary = Config::default().summary();
        assert!(summary.contains("Session defaults:"));
        assert!(summary.contains("- Rose (#f43f5e)"));
        assert!(summary.contains("base_font_px: 16px"));
    }
}

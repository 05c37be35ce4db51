//! Settings controller.
//!
//! Runs once per render of the settings page: reads the raw widget values,
//! builds the prospective preference, and when anything differs from the
//! session it overwrites every field and regenerates the stylesheet so the
//! same render already shows the change. There is no separate save step.

use std::str::FromStr;

use tracing::debug;

use crate::config::Config;
use crate::preferences::{Preference, Role, Session, ThemePrefs};
use crate::stylesheet::Stylesheet;
use crate::theme::{Accent, Density, FontScale, ThemeMode};

/// Raw values read from the settings widgets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsInput {
    pub theme_mode: String,
    /// Name of the selected accent preset.
    pub accent_preset: String,
    /// Free-text hex color; wins over the preset when valid.
    pub custom_accent: String,
    pub density: String,
    pub font_scale: String,
    pub role: String,
}

/// Result of one settings render pass.
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    /// Whether the session preference was overwritten.
    pub changed: bool,
    /// Stylesheet for the preference as it stands after this pass.
    pub stylesheet: Stylesheet,
}

impl RenderOutcome {
    pub fn artifact(&self) -> String {
        self.stylesheet.to_artifact()
    }
}

pub struct SettingsController<'a> {
    config: &'a Config,
}

impl<'a> SettingsController<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Pick the accent from the preset selection and the custom text.
    ///
    /// Non-empty custom text that is a valid hex color wins; otherwise the
    /// preset's color, or the default accent for an unknown preset.
    pub fn resolve_accent(&self, preset: &str, custom: &str) -> Accent {
        if let Some(custom) = Accent::parse(custom) {
            return custom;
        }
        self.config.accent.lookup(preset).unwrap_or_default()
    }

    /// Widget state to pre-fill the form with.
    ///
    /// The preset selector starts on the preset matching the current accent,
    /// or the first preset; the custom field shows the current accent.
    pub fn initial_input(&self, session: &mut Session) -> SettingsInput {
        let pref = session.preference();
        let presets = &self.config.accent.presets;
        let preset_index = self.config.accent.index_of(&pref.theme.accent).unwrap_or(0);

        SettingsInput {
            theme_mode: pref.theme.theme_mode.to_string(),
            accent_preset: presets
                .get(preset_index)
                .map(|preset| preset.name.clone())
                .unwrap_or_default(),
            custom_accent: pref.theme.accent.to_string(),
            density: pref.theme.density.to_string(),
            font_scale: pref.theme.font_scale.to_string(),
            role: pref.role.to_string(),
        }
    }

    /// Stylesheet for the session's current preference.
    pub fn stylesheet(&self, session: &mut Session) -> Stylesheet {
        Stylesheet::for_prefs(&session.preference().theme, &self.config.stylesheet)
    }

    /// Apply one render's widget values to the session.
    pub fn render(&self, session: &mut Session, input: &SettingsInput) -> RenderOutcome {
        let current = session.preference().clone();
        let prospective = self.prospective(&current, input);

        let changed = prospective != current;
        if changed {
            debug!(
                "Settings changed: mode={} accent={} font_scale={} density={} role={}",
                prospective.theme.theme_mode,
                prospective.theme.accent,
                prospective.theme.font_scale,
                prospective.theme.density,
                prospective.role
            );
            *session.preference_mut() = prospective;
        }

        RenderOutcome {
            changed,
            stylesheet: self.stylesheet(session),
        }
    }

    /// Restore the fixed defaults and guest role, unconditionally.
    pub fn reset(&self, session: &mut Session) -> RenderOutcome {
        debug!("Settings reset to defaults");
        *session.preference_mut() = Preference::reset_defaults();

        RenderOutcome {
            changed: true,
            stylesheet: self.stylesheet(session),
        }
    }

    fn prospective(&self, current: &Preference, input: &SettingsInput) -> Preference {
        Preference {
            role: parse_or_keep::<Role>("role", &input.role, current.role),
            theme: ThemePrefs {
                theme_mode: parse_or_keep::<ThemeMode>(
                    "theme mode",
                    &input.theme_mode,
                    current.theme.theme_mode,
                ),
                accent: self.resolve_accent(&input.accent_preset, &input.custom_accent),
                font_scale: parse_or_keep::<FontScale>(
                    "font scale",
                    &input.font_scale,
                    current.theme.font_scale,
                ),
                density: parse_or_keep::<Density>("density", &input.density, current.theme.density),
            },
        }
    }
}

/// Strictly parse a widget value, keeping the stored one when it is outside
/// the declared domain.
fn parse_or_keep<T: FromStr + Copy>(field: &str, raw: &str, current: T) -> T {
    match raw.parse() {
        Ok(value) => value,
        Err(_) => {
            debug!("Ignoring {} value '{}'", field, raw);
            current
        }
    }
}

//! Per-session preference store.
//!
//! Each viewer session owns exactly one [`Session`]. Its [`Preference`] is
//! created lazily on first access from the configured startup defaults and
//! is only ever mutated through the methods here or the settings
//! controller. Nothing is persisted when the session ends.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SessionConfig;
use crate::error::Error;
use crate::theme::{Accent, Density, FontScale, ThemeMode};

/// The viewer's role. Selecting one is a preference, not a credential.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Not signed in.
    #[default]
    #[serde(rename = "none")]
    None,
    /// Placeholder role used by the settings preview.
    #[serde(rename = "guest")]
    Guest,
    #[serde(rename = "PC")]
    Pc,
    Professor,
    Team,
}

impl Role {
    /// Roles offered on the login view.
    pub const SIGN_IN: [Role; 3] = [Role::Pc, Role::Professor, Role::Team];

    /// Roles offered by the settings role switcher.
    pub const PREVIEW: [Role; 4] = [Role::Guest, Role::Pc, Role::Professor, Role::Team];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::None => "none",
            Role::Guest => "guest",
            Role::Pc => "PC",
            Role::Professor => "Professor",
            Role::Team => "Team",
        }
    }

    /// One-line access summary shown on the login cards.
    pub fn description(self) -> &'static str {
        match self {
            Role::None => "Not logged in.",
            Role::Guest => "Preview only; no sections.",
            Role::Pc => "Access to Visualization (Dashboards and Maps).",
            Role::Professor => "Full access: EDA, ML, and Visualization.",
            Role::Team => "Access to EDA, ML, and Visualization.",
        }
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "none" => Ok(Role::None),
            "guest" => Ok(Role::Guest),
            "PC" => Ok(Role::Pc),
            "Professor" => Ok(Role::Professor),
            "Team" => Ok(Role::Team),
            other => Err(Error::InvalidValue {
                field: "role",
                value: other.to_string(),
                expected: "none, guest, PC, Professor, Team",
            }),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four theme fields. The stylesheet is a pure function of these.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemePrefs {
    pub theme_mode: ThemeMode,
    pub accent: Accent,
    pub font_scale: FontScale,
    pub density: Density,
}

/// Everything a session remembers about its viewer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    pub role: Role,
    pub theme: ThemePrefs,
}

impl Preference {
    /// Startup preference for a fresh session.
    pub fn from_config(session: &SessionConfig) -> Self {
        Self {
            role: session.role,
            theme: ThemePrefs {
                theme_mode: session.theme_mode,
                accent: session.accent.clone(),
                font_scale: session.font_scale,
                density: session.density,
            },
        }
    }

    /// The fixed tuple restored by the settings reset action.
    ///
    /// Independent of configuration: `(auto, #3b82f6, base, normal)` and the
    /// guest role.
    pub fn reset_defaults() -> Self {
        Self {
            role: Role::Guest,
            theme: ThemePrefs::default(),
        }
    }
}

/// One viewer session.
#[derive(Debug, Clone)]
pub struct Session {
    defaults: SessionConfig,
    preference: Option<Preference>,
}

impl Session {
    pub fn new(defaults: SessionConfig) -> Self {
        Self {
            defaults,
            preference: None,
        }
    }

    /// Read the preference, creating it from defaults on first access.
    ///
    /// Takes `&mut self` because the preference is created here if absent.
    pub fn preference(&mut self) -> &Preference {
        self.preference_mut()
    }

    pub fn preference_mut(&mut self) -> &mut Preference {
        let defaults = &self.defaults;
        self.preference.get_or_insert_with(|| {
            debug!("Initializing session preferences from defaults");
            Preference::from_config(defaults)
        })
    }

    /// Whether the preference has been touched yet this session.
    pub fn is_initialized(&self) -> bool {
        self.preference.is_some()
    }

    pub fn role(&mut self) -> Role {
        self.preference().role
    }

    /// Sign in with one of the login roles.
    pub fn login(&mut self, role: Role) {
        debug!("Logged in as {}", role);
        self.preference_mut().role = role;
    }

    /// Clear the role. Theme preferences survive a logout.
    pub fn logout(&mut self) {
        debug!("Session role cleared");
        self.preference_mut().role = Role::None;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

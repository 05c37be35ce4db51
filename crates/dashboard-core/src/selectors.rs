//! Shared CSS class names and host selectors.
//!
//! Centralizes every selector the generated stylesheet targets so markup
//! producers (the preview page, host views) and the rule builders agree.
//!
//! # Usage
//!
//! ```
//! use dashboard_core::selectors::class;
//!
//! let badge = format!("<span class='{}'>theme: dark</span>", class::BADGE);
//! assert!(badge.contains("badge"));
//! ```

/// Reusable component classes.
pub mod class {
    /// Pill-shaped accent label (`.badge`).
    pub const BADGE: &str = "badge";

    /// Bordered content panel (`.card`).
    pub const CARD: &str = "card";

    /// Emphasized metric text (`.kpi`).
    pub const KPI: &str = "kpi";

    /// Thin divider block (`.hr`).
    pub const HR: &str = "hr";
}

/// Selectors owned by the host view layer.
///
/// These match the element test ids the dashboard host renders.
pub mod host {
    /// Main application view container.
    pub const APP_VIEW: &str = r#"[data-testid="stAppViewContainer"]"#;

    /// Navigation sidebar.
    pub const SIDEBAR: &str = r#"[data-testid="stSidebar"]"#;

    /// Centered page content block.
    pub const BLOCK_CONTAINER: &str = ".block-container";

    /// Markdown link container.
    pub const MARKDOWN_LINK: &str = ".stMarkdown a";

    /// Regular and download buttons.
    pub const BUTTONS: [&str; 2] = [".stButton>button", ".stDownloadButton>button"];

    /// Text-like inputs and select comboboxes.
    pub const INPUTS: [&str; 7] = [
        r#"div[data-baseweb="input"] input"#,
        "textarea",
        ".stTextInput input",
        ".stNumberInput input",
        ".stTextArea textarea",
        r#".stSelectbox div[role="combobox"]"#,
        r#".stMultiSelect div[role="combobox"]"#,
    ];
}

/// Media queries used by the generator.
pub mod media {
    /// Matches viewers whose OS prefers a dark color scheme.
    pub const PREFERS_DARK: &str = "(prefers-color-scheme: dark)";

    /// Matches viewers that have not asked for reduced motion.
    pub const MOTION_OK: &str = "(prefers-reduced-motion: no-preference)";
}

//! Static HTML preview of the settings page.
//!
//! Produces one self-contained document: the injected stylesheet, the live
//! badges, a row of preview cards and the sidebar the current role sees.

use std::fs;
use std::path::Path;

use anyhow::Context;
use html_escape::encode_text;
use tracing::info;

use dashboard_core::selectors::class;
use dashboard_core::{Config, Navigation, Preference, RenderOutcome, Role};

/// Build the preview document.
pub fn render(
    config: &Config,
    pref: &Preference,
    outcome: &RenderOutcome,
    navigation: &Navigation,
) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n<title>Settings preview</title>\n");
    // Always a style element here, whatever the configured artifact form
    html.push_str("<style>\n");
    html.push_str(&outcome.stylesheet.render());
    html.push_str("</style>\n</head>\n<body>\n");

    html.push_str("<nav data-testid=\"stSidebar\">\n");
    html.push_str(&sidebar(navigation));
    html.push_str("</nav>\n");

    html.push_str("<main data-testid=\"stAppViewContainer\">\n");
    html.push_str("<h1>Settings</h1>\n");
    html.push_str(&badges(pref));
    html.push_str(&format!("<div class='{}'></div>\n", class::HR));
    html.push_str(&swatches(config));
    html.push_str(&role_switcher(pref.role));
    html.push_str(&cards(pref.role));
    html.push_str("</main>\n</body>\n</html>\n");
    html
}

/// Write the preview to `path`.
pub fn write(path: &Path, html: &str) -> anyhow::Result<()> {
    fs::write(path, html).with_context(|| format!("writing preview to {}", path.display()))?;
    info!("Wrote preview to {}", path.display());
    Ok(())
}

fn badges(pref: &Preference) -> String {
    let theme = &pref.theme;
    [
        format!("theme: {}", theme.theme_mode.label()),
        format!("accent: {}", theme.accent),
        format!("density: {}", theme.density),
        format!("font: {}", theme.font_scale),
        format!("role: {}", pref.role),
    ]
    .iter()
    .map(|text| format!("<span class='{}'>{}</span>\n", class::BADGE, encode_text(text)))
    .collect()
}

fn swatches(config: &Config) -> String {
    let mut out = String::from("<div>\n");
    for (name, (r, g, b)) in config.accent.swatches() {
        // Rec. 601 luma; dark text on light swatches
        let luma = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
        let text = if luma > 150.0 { "#111111" } else { "#ffffff" };
        out.push_str(&format!(
            "<span class='{}' style='background: rgb({r}, {g}, {b}); color: {text}'>{}</span>\n",
            class::BADGE,
            encode_text(name)
        ));
    }
    out.push_str("</div>\n");
    out
}

fn role_switcher(current: Role) -> String {
    let mut out = String::from("<label>Role <select>\n");
    for role in Role::PREVIEW {
        let selected = if role == current { " selected" } else { "" };
        out.push_str(&format!(
            "<option{selected}>{}</option>\n",
            encode_text(role.as_str())
        ));
    }
    out.push_str("</select></label>\n");
    out
}

fn cards(role: Role) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "<div class='{}'><div class='{}'>Signed in as {}</div><p>{}</p></div>\n",
        class::CARD,
        class::KPI,
        encode_text(role.as_str()),
        encode_text(role.description())
    ));
    out.push_str(&format!(
        "<div class='{}'><div class='{}'>1,234</div><p>Sample metric</p></div>\n",
        class::CARD,
        class::KPI
    ));
    out.push_str(&format!(
        "<div class='{}'><p>Body text with an <a href='#'>accent link</a>.</p>\
         <button>Primary action</button> <input placeholder='Input field'></div>\n",
        class::CARD
    ));
    out
}

fn sidebar(navigation: &Navigation) -> String {
    let mut out = String::new();
    match navigation {
        Navigation::Login { page } => {
            out.push_str("<ul>\n");
            out.push_str(&format!("<li>{}</li>\n", encode_text(page.title)));
            out.push_str("</ul>\n");
            for role in Role::SIGN_IN {
                out.push_str(&format!(
                    "<div class='{}'><strong>{}</strong><p>{}</p></div>\n",
                    class::CARD,
                    encode_text(role.as_str()),
                    encode_text(role.description())
                ));
            }
        }
        Navigation::Sections { sections } => {
            for section in sections {
                out.push_str(&format!("<h3>{}</h3>\n<ul>\n", encode_text(section.label)));
                for page in &section.pages {
                    out.push_str(&format!("<li>{}</li>\n", encode_text(page.title)));
                }
                out.push_str("</ul>\n");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::{PageRegistry, Session, SettingsController};

    fn preview_for(role: Role) -> String {
        let config = Config::default();
        let mut session = Session::new(config.session.clone());
        session.login(role);
        let controller = SettingsController::new(&config);
        let outcome = RenderOutcome {
            changed: false,
            stylesheet: controller.stylesheet(&mut session),
        };
        let navigation = Navigation::for_role(role, &PageRegistry::standard());
        render(&config, session.preference(), &outcome, &navigation)
    }

    #[test]
    fn test_preview_contains_stylesheet_and_badges() {
        let html = preview_for(Role::Pc);
        assert!(html.contains("<style>\n:root"));
        assert!(html.contains("<span class='badge'>theme: Auto (OS)</span>"));
        assert!(html.contains("<span class='badge'>accent: #3b82f6</span>"));
        assert!(html.contains("<h3>Visualization</h3>"));
        assert!(!html.contains("<h3>EDA</h3>"));
        assert!(html.contains("<option selected>PC</option>"));
    }

    #[test]
    fn test_preview_logged_out_shows_login_cards() {
        let html = preview_for(Role::None);
        assert!(html.contains("<li>Log in</li>"));
        assert!(html.contains("<strong>Professor</strong>"));
    }

    #[test]
    fn test_preset_names_are_escaped() {
        let mut config = Config::default();
        config.accent.presets[0].name = "Blue <b>&</b>".to_string();
        let mut session = Session::new(config.session.clone());
        let outcome = RenderOutcome {
            changed: false,
            stylesheet: SettingsController::new(&config).stylesheet(&mut session),
        };
        let navigation = Navigation::for_role(Role::None, &PageRegistry::standard());
        let html = render(&config, session.preference(), &outcome, &navigation);
        assert!(html.contains(">Blue &lt;b&gt;&amp;&lt;/b&gt;</span>"));
        assert!(!html.contains("<b>"));
    }
}

//! Stylesheet generation.
//!
//! A stylesheet is built as a small structured model (a list of [`Rule`]s)
//! and rendered to text by a single formatter. The only real branching is
//! [`PaletteOverride::for_mode`]: "auto" embeds an OS-preference media query
//! so the light/dark decision happens at view time, while "light"/"dark"
//! embed an unconditional palette resolved now.
//!
//! Rules are organized into submodules by component:
//! - `base` - document typography, links, dividers, transitions
//! - `controls` - buttons and text inputs
//! - `sidebar` - navigation sidebar
//! - `components` - `badge`, `card`, `kpi` and `hr` helpers

mod rules;

use std::fmt;

use crate::config::StylesheetConfig;
use crate::preferences::ThemePrefs;
use crate::selectors::media;
use crate::theme::{Accent, Density, FontScale, Palette, ResolvedTokens, ThemeMode};

/// Shadow used by raised components.
const SHADOW_SOFT: &str = "0 6px 20px rgba(0,0,0,.06)";

/// A single `property: value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
    pub important: bool,
}

/// Plain declaration.
pub fn decl(property: impl Into<String>, value: impl Into<String>) -> Declaration {
    Declaration {
        property: property.into(),
        value: value.into(),
        important: false,
    }
}

/// Declaration marked `!important` (host widget styles need to be beaten).
pub fn important(property: impl Into<String>, value: impl Into<String>) -> Declaration {
    Declaration {
        important: true,
        ..decl(property, value)
    }
}

/// One node of the stylesheet model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Comment(String),
    Style {
        selectors: Vec<String>,
        declarations: Vec<Declaration>,
    },
    Media {
        query: String,
        rules: Vec<Rule>,
    },
}

impl Rule {
    pub fn comment(text: impl Into<String>) -> Self {
        Rule::Comment(text.into())
    }

    pub fn style<S: Into<String>>(
        selectors: impl IntoIterator<Item = S>,
        declarations: Vec<Declaration>,
    ) -> Self {
        Rule::Style {
            selectors: selectors.into_iter().map(Into::into).collect(),
            declarations,
        }
    }

    pub fn media(query: impl Into<String>, rules: Vec<Rule>) -> Self {
        Rule::Media {
            query: query.into(),
            rules,
        }
    }

    /// `:root { ... }` block assigning the given palette.
    fn palette_root(palette: &Palette) -> Self {
        Rule::style(
            [":root"],
            palette
                .variables()
                .into_iter()
                .map(|(name, value)| decl(name, value))
                .collect(),
        )
    }

    fn is_root(&self) -> bool {
        matches!(self, Rule::Style { selectors, .. } if selectors.len() == 1 && selectors[0] == ":root")
    }

    fn write_to(&self, out: &mut impl fmt::Write, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match self {
            Rule::Comment(text) => writeln!(out, "{indent}/* {text} */"),
            Rule::Style {
                selectors,
                declarations,
            } => {
                let joined = selectors
                    .iter()
                    .map(|s| format!("{indent}{s}"))
                    .collect::<Vec<_>>()
                    .join(",\n");
                writeln!(out, "{joined} {{")?;
                for d in declarations {
                    let suffix = if d.important { " !important" } else { "" };
                    writeln!(out, "{indent}  {}: {}{suffix};", d.property, d.value)?;
                }
                writeln!(out, "{indent}}}")
            }
            Rule::Media { query, rules } => {
                writeln!(out, "{indent}@media {query} {{")?;
                for rule in rules {
                    rule.write_to(out, depth + 1)?;
                }
                writeln!(out, "{indent}}}")
            }
        }
    }
}

/// How the generated sheet decides between the light and dark palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteOverride {
    /// Unknown mode: keep the light base palette, emit nothing.
    None,
    /// Defer to the viewer's OS preference at render time.
    FollowSystem,
    /// Unconditionally force the light palette.
    ForceLight,
    /// Unconditionally force the dark palette.
    ForceDark,
}

impl PaletteOverride {
    /// Pick the override policy for a mode.
    ///
    /// `Auto` must never resolve to a concrete palette here, or the sheet
    /// would stop following OS changes.
    pub fn for_mode(mode: Option<ThemeMode>) -> Self {
        match mode {
            Some(ThemeMode::Auto) => PaletteOverride::FollowSystem,
            Some(ThemeMode::Light) => PaletteOverride::ForceLight,
            Some(ThemeMode::Dark) => PaletteOverride::ForceDark,
            None => PaletteOverride::None,
        }
    }

    fn rules(self) -> Vec<Rule> {
        match self {
            PaletteOverride::None => Vec::new(),
            PaletteOverride::FollowSystem => vec![
                Rule::comment("Auto mode follows the OS dark theme"),
                Rule::media(media::PREFERS_DARK, vec![Rule::palette_root(&Palette::DARK)]),
            ],
            PaletteOverride::ForceLight => vec![
                Rule::comment("Force light"),
                Rule::palette_root(&Palette::LIGHT),
            ],
            PaletteOverride::ForceDark => vec![
                Rule::comment("Force dark"),
                Rule::palette_root(&Palette::DARK),
            ],
        }
    }
}

/// A generated stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stylesheet {
    rules: Vec<Rule>,
    palette_override: PaletteOverride,
    style_tag: bool,
}

impl Stylesheet {
    /// Build the full sheet from resolved tokens.
    ///
    /// `mode` is `None` when the caller had a mode key outside the known
    /// domain; that yields the light palette with no override.
    pub fn generate(
        mode: Option<ThemeMode>,
        tokens: &ResolvedTokens,
        options: &StylesheetConfig,
    ) -> Self {
        let palette_override = PaletteOverride::for_mode(mode);

        let mut root = Palette::LIGHT
            .variables()
            .into_iter()
            .map(|(name, value)| decl(name, value))
            .collect::<Vec<_>>();
        root.push(decl("--accent", tokens.accent.as_str()));
        root.push(decl("--font-scale", tokens.font_multiplier));
        root.push(decl("--pad-y", tokens.pad_y()));
        root.push(decl("--shadow", SHADOW_SOFT));

        let mut sheet = vec![Rule::style([":root"], root)];
        if options.transitions {
            sheet.push(rules::base::transitions());
        }
        sheet.extend(palette_override.rules());
        sheet.push(Rule::comment("Apply tokens"));
        sheet.extend(rules::base::css(options.base_font_px));
        sheet.extend(rules::controls::css());
        sheet.extend(rules::sidebar::css());
        sheet.extend(rules::components::css());

        Self {
            rules: sheet,
            palette_override,
            style_tag: options.style_tag,
        }
    }

    /// Generate from a session's theme preferences.
    pub fn for_prefs(prefs: &ThemePrefs, options: &StylesheetConfig) -> Self {
        let tokens = ResolvedTokens::resolve(&prefs.accent, prefs.font_scale, prefs.density);
        Self::generate(Some(prefs.theme_mode), &tokens, options)
    }

    pub fn palette_override(&self) -> PaletteOverride {
        self.palette_override
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Render the rules as CSS text.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// The artifact handed to the host: CSS text, wrapped in a `<style>`
    /// element when configured.
    pub fn to_artifact(&self) -> String {
        let css = self.render();
        if self.style_tag {
            format!("<style>\n{css}</style>\n")
        } else {
            css
        }
    }

    /// Number of top-level `:root` rules (base block plus any forced palette).
    pub fn top_level_root_rules(&self) -> usize {
        self.rules.iter().filter(|rule| rule.is_root()).count()
    }
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 && !matches!(self.rules[i - 1], Rule::Comment(_)) {
                writeln!(f)?;
            }
            rule.write_to(f, 0)?;
        }
        Ok(())
    }
}

/// String-keyed entry point.
///
/// Unknown scale and density keys degrade to `base` / `normal`, an unknown
/// mode gets no palette override, and an accent that fails validation is
/// replaced by the default accent.
pub fn generate_css(mode: &str, accent: &str, font_scale: &str, density: &str) -> String {
    let accent = Accent::parse(accent).unwrap_or_default();
    let tokens =
        ResolvedTokens::resolve(&accent, FontScale::from_key(font_scale), Density::from_key(density));
    Stylesheet::generate(ThemeMode::from_key(mode), &tokens, &StylesheetConfig::default())
        .to_artifact()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DARK_QUERY: &str = "@media (prefers-color-scheme: dark)";

    fn sheet(mode: Option<ThemeMode>) -> Stylesheet {
        let tokens = ResolvedTokens::resolve(&Accent::default(), FontScale::Base, Density::Normal);
        Stylesheet::generate(mode, &tokens, &StylesheetConfig::default())
    }

    #[test]
    fn test_auto_embeds_media_query_and_no_forced_palette() {
        let sheet = sheet(Some(ThemeMode::Auto));
        let css = sheet.render();

        assert_eq!(sheet.palette_override(), PaletteOverride::FollowSystem);
        assert!(css.contains(DARK_QUERY));
        assert!(css.contains("    --bg: #0E1117;"), "dark palette nested in query");
        assert_eq!(sheet.top_level_root_rules(), 1);
        assert!(!css.contains("Force"));
    }

    #[test]
    fn test_forced_modes_embed_palette_without_media_query() {
        for (mode, palette) in [
            (ThemeMode::Light, Palette::LIGHT),
            (ThemeMode::Dark, Palette::DARK),
        ] {
            let sheet = sheet(Some(mode));
            let css = sheet.render();

            assert!(!css.contains(DARK_QUERY), "{mode} must not follow the OS");
            assert_eq!(sheet.top_level_root_rules(), 2);

            let forced = sheet
                .rules()
                .iter()
                .filter(|rule| rule.is_root())
                .nth(1)
                .expect("forced palette block");
            assert_eq!(forced, &Rule::palette_root(&palette));
        }
    }

    #[test]
    fn test_unknown_mode_is_light_without_override() {
        let sheet = sheet(None);
        let css = sheet.render();

        assert_eq!(sheet.palette_override(), PaletteOverride::None);
        assert!(!css.contains(DARK_QUERY));
        assert_eq!(sheet.top_level_root_rules(), 1);
        assert!(css.contains("  --bg: #ffffff;"));
        assert!(!css.contains("#0E1117"));
    }

    #[test]
    fn test_generation_is_byte_identical() {
        let a = generate_css("dark", "#10b981", "lg", "compact");
        let b = generate_css("dark", "#10b981", "lg", "compact");
        assert_eq!(a, b);
    }

    #[test]
    fn test_root_block_carries_tokens() {
        let css = generate_css("light", "#f43f5e", "xl", "spacious");
        assert!(css.contains("--accent: #f43f5e;"));
        assert!(css.contains("--font-scale: 1.12;"));
        assert!(css.contains("--pad-y: 14px;"));
    }

    #[test]
    fn test_malformed_keys_degrade_to_defaults() {
        let css = generate_css("sepia", "not-a-color", "huge", "airy");
        assert!(css.contains("--accent: #3b82f6;"));
        assert!(css.contains("--font-scale: 1.00;"));
        assert!(css.contains("--pad-y: 10px;"));
        assert!(!css.contains(DARK_QUERY));
    }

    #[test]
    fn test_structural_rules_use_only_variables_for_colors() {
        let sheet = sheet(Some(ThemeMode::Auto));
        let structural = sheet
            .rules()
            .iter()
            .skip_while(|rule| !matches!(rule, Rule::Comment(text) if text == "Apply tokens"));

        let mut count = 0;
        for rule in structural {
            if let Rule::Style { declarations, .. } = rule {
                for d in declarations {
                    count += 1;
                    assert!(
                        !d.value.contains('#') && !d.value.contains("rgb("),
                        "{}: {} hard-codes a color",
                        d.property,
                        d.value
                    );
                }
            }
        }
        assert!(count > 20, "structural rules should be present");
    }

    #[test]
    fn test_style_tag_wrapping() {
        let tokens = ResolvedTokens::resolve(&Accent::default(), FontScale::Base, Density::Normal);

        let wrapped = Stylesheet::generate(None, &tokens, &StylesheetConfig::default());
        let artifact = wrapped.to_artifact();
        assert!(artifact.starts_with("<style>\n:root {"));
        assert!(artifact.ends_with("</style>\n"));

        let options = StylesheetConfig {
            style_tag: false,
            ..Default::default()
        };
        let bare = Stylesheet::generate(None, &tokens, &options);
        assert!(bare.to_artifact().starts_with(":root {"));
    }

    #[test]
    fn test_transitions_can_be_disabled() {
        let tokens = ResolvedTokens::resolve(&Accent::default(), FontScale::Base, Density::Normal);
        let options = StylesheetConfig {
            transitions: false,
            ..Default::default()
        };
        let css = Stylesheet::generate(Some(ThemeMode::Auto), &tokens, &options).render();
        assert!(!css.contains("prefers-reduced-motion"));
        assert!(css.contains(DARK_QUERY));
    }

    #[test]
    fn test_render_formats_nested_rules() {
        let rule = Rule::media(
            "(min-width: 10px)",
            vec![Rule::style(["a", "b"], vec![important("color", "var(--fg)")])],
        );
        let mut out = String::new();
        rule.write_to(&mut out, 0).unwrap();
        assert_eq!(
            out,
            "@media (min-width: 10px) {\n  a,\n  b {\n    color: var(--fg) !important;\n  }\n}\n"
        );
    }

    #[test]
    fn test_display_matches_render() {
        let sheet = sheet(Some(ThemeMode::Dark));
        let css = format!("{sheet}");
        assert_eq!(css, sheet.render());
        assert!(css.starts_with(":root {\n"));
        assert!(css.contains("/* Force dark */\n:root {"));
    }
}

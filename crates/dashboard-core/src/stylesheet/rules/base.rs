//! Document-level typography, links and dividers.

use crate::selectors::{host, media};
use crate::stylesheet::{Rule, decl};

/// Smooth palette changes for viewers that allow motion.
pub fn transitions() -> Rule {
    Rule::media(
        media::MOTION_OK,
        vec![Rule::style(
            [host::APP_VIEW, host::SIDEBAR],
            vec![decl(
                "transition",
                "background-color .2s ease, color .2s ease, border-color .2s ease",
            )],
        )],
    )
}

/// Base typography scaled by `--font-scale`.
pub fn css(base_font_px: u32) -> Vec<Rule> {
    vec![
        Rule::style(
            ["html", "body", host::APP_VIEW, host::BLOCK_CONTAINER],
            vec![
                decl("background", "var(--bg)"),
                decl("color", "var(--fg)"),
                decl(
                    "font-size",
                    format!("calc({base_font_px}px * var(--font-scale))"),
                ),
            ],
        ),
        Rule::style(["a", host::MARKDOWN_LINK], vec![decl("color", "var(--accent)")]),
        Rule::style(["hr"], vec![decl("border-color", "var(--border)")]),
    ]
}

//! Reusable visual components: badge pill, card panel, KPI text, divider.

use crate::selectors::class;
use crate::stylesheet::{Rule, decl};

pub fn css() -> Vec<Rule> {
    vec![
        Rule::style(
            [format!(".{}", class::BADGE)],
            vec![
                decl("display", "inline-block"),
                decl("padding", "4px 10px"),
                decl("border-radius", "999px"),
                decl(
                    "background",
                    "color-mix(in srgb, var(--accent) 15%, transparent)",
                ),
                decl("color", "var(--accent)"),
                decl("font-weight", "600"),
                decl("font-size", "12px"),
                decl(
                    "border",
                    "1px solid color-mix(in srgb, var(--accent) 40%, transparent)",
                ),
            ],
        ),
        Rule::style(
            [format!(".{}", class::CARD)],
            vec![
                decl("border-radius", "16px"),
                decl("padding", "16px"),
                decl("background", "var(--bg)"),
                decl("border", "1px solid var(--border)"),
                decl("box-shadow", "var(--shadow)"),
            ],
        ),
        Rule::style(
            [format!(".{}", class::KPI)],
            vec![decl("font-weight", "700"), decl("font-size", "1.15em")],
        ),
        Rule::style(
            [format!(".{}", class::HR)],
            vec![
                decl("height", "1px"),
                decl("background", "var(--border)"),
                decl("margin", "8px 0 14px 0"),
            ],
        ),
    ]
}

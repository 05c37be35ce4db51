//! Buttons and text inputs, padded by the density token.

use crate::selectors::host;
use crate::stylesheet::{Declaration, Rule, important};

fn control_chrome(padding: &str) -> Vec<Declaration> {
    vec![
        important("background", "var(--bg-alt)"),
        important("color", "var(--fg)"),
        important("border", "1px solid var(--border)"),
        important("border-radius", "10px"),
        important("padding", padding),
    ]
}

pub fn css() -> Vec<Rule> {
    vec![
        Rule::style(
            host::BUTTONS,
            control_chrome("calc(var(--pad-y) * 0.9) 16px"),
        ),
        Rule::style(host::INPUTS, control_chrome("var(--pad-y) 12px")),
    ]
}

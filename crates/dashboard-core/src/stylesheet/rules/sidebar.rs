//! Navigation sidebar.

use crate::selectors::host;
use crate::stylesheet::{Rule, decl, important};

pub fn css() -> Vec<Rule> {
    let sidebar = host::SIDEBAR;
    vec![
        Rule::style(
            [sidebar],
            vec![
                decl("background", "var(--bg-alt)"),
                decl("border-right", "1px solid var(--border)"),
                decl("color", "var(--fg)"),
            ],
        ),
        Rule::style(
            [format!("{sidebar} *")],
            vec![important("color", "var(--fg)")],
        ),
        Rule::style(
            [format!("{sidebar} a")],
            vec![important("color", "var(--accent)")],
        ),
        // Buttons sit on the alt background here, so flip them to the base one
        Rule::style(
            host::BUTTONS.map(|button| format!("{sidebar} {button}")),
            vec![important("background", "var(--bg)")],
        ),
    ]
}

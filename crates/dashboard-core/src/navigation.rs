//! Role-gated navigation.
//!
//! The shell reads the session role, looks up the visible page groups in a
//! fixed table and renders either the sectioned menu or the login view. It
//! also injects the theme stylesheet on every render, exactly like the
//! settings page does, so navigation never shows a stale theme.

use serde::Serialize;

use crate::config::Config;
use crate::preferences::{Role, Session};
use crate::stylesheet::Stylesheet;

/// A page the host can open. `source` is an opaque handle owned by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub title: &'static str,
    pub icon: &'static str,
    pub source: &'static str,
}

impl Page {
    const fn new(title: &'static str, icon: &'static str, source: &'static str) -> Self {
        Self {
            title,
            icon,
            source,
        }
    }
}

/// Sidebar sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PageGroup {
    Account,
    Eda,
    Visualization,
    MachineLearning,
}

impl PageGroup {
    pub fn label(self) -> &'static str {
        match self {
            PageGroup::Account => "Account",
            PageGroup::Eda => "EDA",
            PageGroup::Visualization => "Visualization",
            PageGroup::MachineLearning => "Machine Learning",
        }
    }

    /// Content groups a role may open, in sidebar order.
    ///
    /// `Account` is not listed here; it is added whenever this is non-empty.
    pub fn visible_for(role: Role) -> &'static [PageGroup] {
        match role {
            Role::Professor | Role::Team => &[
                PageGroup::Eda,
                PageGroup::Visualization,
                PageGroup::MachineLearning,
            ],
            Role::Pc => &[PageGroup::Visualization],
            Role::None | Role::Guest => &[],
        }
    }
}

/// Ordered mapping from page group to its pages.
#[derive(Debug, Clone, Serialize)]
pub struct PageRegistry {
    groups: Vec<(PageGroup, Vec<Page>)>,
    login: Page,
}

impl PageRegistry {
    /// The dashboard's page set.
    pub fn standard() -> Self {
        Self {
            groups: vec![
                (
                    PageGroup::Account,
                    vec![
                        Page::new("Log out", ":material/logout:", "logout"),
                        Page::new("Settings", ":material/settings:", "settings"),
                    ],
                ),
                (
                    PageGroup::Eda,
                    vec![Page::new(
                        "Exploratory Data Analysis",
                        ":material/analytics:",
                        "EDA/eda.py",
                    )],
                ),
                (
                    PageGroup::Visualization,
                    vec![
                        Page::new(
                            "Dashboard",
                            ":material/space_dashboard:",
                            "Visualization/visualization.py",
                        ),
                        Page::new("Maps", ":material/map:", "Visualization/maps.py"),
                        Page::new("Other maps", ":material/layers:", "Visualization/maps2.py"),
                    ],
                ),
                (
                    PageGroup::MachineLearning,
                    vec![Page::new(
                        "Machine Learning",
                        ":material/neurology:",
                        "ml/ml_analysis.py",
                    )],
                ),
            ],
            login: Page::new("Log in", ":material/login:", "login"),
        }
    }

    pub fn pages(&self, group: PageGroup) -> &[Page] {
        self.groups
            .iter()
            .find(|(g, _)| *g == group)
            .map(|(_, pages)| pages.as_slice())
            .unwrap_or(&[])
    }

    pub fn login(&self) -> &Page {
        &self.login
    }
}

impl Default for PageRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// One sidebar section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub group: PageGroup,
    pub label: &'static str,
    pub pages: Vec<Page>,
}

/// What the navigation shell exposes for a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum Navigation {
    /// Not signed in to a content role: only the login page is reachable.
    Login { page: Page },
    /// Account section followed by the role's content sections.
    Sections { sections: Vec<Section> },
}

impl Navigation {
    pub fn for_role(role: Role, registry: &PageRegistry) -> Self {
        let content = PageGroup::visible_for(role);
        if content.is_empty() {
            return Navigation::Login {
                page: registry.login().clone(),
            };
        }

        let sections = std::iter::once(PageGroup::Account)
            .chain(content.iter().copied())
            .map(|group| Section {
                group,
                label: group.label(),
                pages: registry.pages(group).to_vec(),
            })
            .collect();

        Navigation::Sections { sections }
    }

    /// Groups in display order (empty for the login view).
    pub fn groups(&self) -> Vec<PageGroup> {
        match self {
            Navigation::Login { .. } => Vec::new(),
            Navigation::Sections { sections } => sections.iter().map(|s| s.group).collect(),
        }
    }

    /// Every page reachable from this view.
    pub fn reachable_pages(&self) -> Vec<&Page> {
        match self {
            Navigation::Login { page } => vec![page],
            Navigation::Sections { sections } => {
                sections.iter().flat_map(|s| s.pages.iter()).collect()
            }
        }
    }

    /// The page opened when none is selected: the first reachable one.
    pub fn landing_page(&self) -> Option<&Page> {
        self.reachable_pages().into_iter().next()
    }
}

/// One render of the navigation shell.
#[derive(Debug, Clone)]
pub struct ShellView {
    pub role: Role,
    pub stylesheet: Stylesheet,
    pub navigation: Navigation,
}

/// Render the shell for a session: inject the current theme and resolve the
/// pages its role can reach. Creates the session preference on first use.
pub fn render_shell(session: &mut Session, config: &Config, registry: &PageRegistry) -> ShellView {
    let pref = session.preference();
    ShellView {
        role: pref.role,
        stylesheet: Stylesheet::for_prefs(&pref.theme, &config.stylesheet),
        navigation: Navigation::for_role(pref.role, registry),
    }
}

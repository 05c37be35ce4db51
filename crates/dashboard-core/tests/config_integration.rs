//! Integration tests for config parsing against the real config.toml.

use std::io::Write;
use std::path::PathBuf;

use dashboard_core::navigation::render_shell;
use dashboard_core::{
    Config, Error, Navigation, PageGroup, PageRegistry, PaletteOverride, Role, Session,
    SettingsController, ThemeMode,
};

fn project_root() -> PathBuf {
    // Navigate from crates/dashboard-core/ up to project root
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent() // crates/
        .unwrap()
        .parent() // workspace root
        .unwrap()
        .to_path_buf()
}

#[test]
fn test_load_real_config() {
    let config_path = project_root().join("config.toml");

    let config = Config::load(&config_path).expect("Failed to load config.toml");

    assert!(!config.accent.presets.is_empty(), "Expected accent presets");
    assert!(config.stylesheet.base_font_px > 0);
    assert_eq!(config.session.role, Role::None);
}

#[test]
fn test_real_config_validates() {
    let config_path = project_root().join("config.toml");
    let config = Config::load(&config_path).unwrap();

    config.validate().expect("Real config.toml should be valid");
    assert!(config.warnings().is_empty());
}

#[test]
fn test_config_summary() {
    let config_path = project_root().join("config.toml");
    let config = Config::load(&config_path).unwrap();

    let summary = config.summary();
    assert!(summary.contains("Session defaults:"));
    assert!(summary.contains("Accent presets:"));
    assert!(summary.contains("Stylesheet:"));
    assert!(summary.contains("Emerald (#10b981)"));
}

#[test]
fn test_find_and_load_with_explicit_path() {
    let config_path = project_root().join("config.toml");

    let result = Config::find_and_load(Some(&config_path)).unwrap();
    assert_eq!(result.source.as_deref(), Some(config_path.as_path()));
    assert!(!result.used_defaults);
}

#[test]
fn test_find_and_load_explicit_missing_fails() {
    let missing = project_root().join("does-not-exist.toml");

    let err = Config::find_and_load(Some(&missing)).unwrap_err();
    assert!(matches!(err, Error::ConfigNotFound(_)));
}

#[test]
fn test_broken_config_returns_error_not_defaults() {
    let temp_dir = std::env::temp_dir().join("dashboard_test_broken_config");
    let _ = std::fs::remove_dir_all(&temp_dir);
    std::fs::create_dir_all(&temp_dir).unwrap();

    let broken_config_path = temp_dir.join("config.toml");
    let mut file = std::fs::File::create(&broken_config_path).unwrap();
    writeln!(file, "this is not valid toml {{{{").unwrap();

    let result = Config::find_and_load(Some(&broken_config_path));
    assert!(matches!(result, Err(Error::TomlParse(_))));

    std::fs::remove_dir_all(&temp_dir).unwrap();
}

#[test]
fn test_user_file_merges_over_defaults() {
    let temp_dir = std::env::temp_dir().join("dashboard_test_partial_config");
    let _ = std::fs::remove_dir_all(&temp_dir);
    std::fs::create_dir_all(&temp_dir).unwrap();

    let path = temp_dir.join("config.toml");
    std::fs::write(&path, "[session]\ntheme_mode = \"dark\"\n").unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.session.theme_mode, ThemeMode::Dark);
    assert_eq!(config.accent.presets.len(), 7);
    assert!(config.stylesheet.style_tag);

    std::fs::remove_dir_all(&temp_dir).unwrap();
}

#[test]
fn test_default_config_toml_parses_without_error() {
    let config = Config::from_default_toml().unwrap();
    config.validate().unwrap();
    assert_eq!(config.session.accent.as_str(), "#3b82f6");
}

#[test]
fn test_out_of_domain_session_values_rejected() {
    for toml in [
        "[session]\ntheme_mode = \"sepia\"\n",
        "[session]\nfont_scale = \"huge\"\n",
        "[session]\naccent = \"blue\"\n",
        "[session]\nrole = \"Admin\"\n",
        "[stylesheet]\nunknown_key = 1\n",
    ] {
        assert!(Config::load_with_defaults(toml).is_err(), "accepted {toml:?}");
    }
}

#[test]
fn test_validation_collects_multiple_errors() {
    let config = Config::load_with_defaults(
        r##"
[accent]
presets = [
  { name = "", color = "#3b82f6" },
  { name = "Bad", color = "3b82f6" },
]

[stylesheet]
base_font_px = 4
"##,
    )
    .unwrap();

    let Err(Error::ConfigValidation(errors)) = config.validate() else {
        panic!("expected validation errors");
    };
    assert_eq!(errors.len(), 3, "{errors:?}");
}

#[test]
fn test_session_drives_settings_and_navigation() {
    let config = Config::load(&project_root().join("config.toml")).unwrap();
    let registry = PageRegistry::standard();
    let controller = SettingsController::new(&config);
    let mut session = Session::new(config.session.clone());

    let view = render_shell(&mut session, &config, &registry);
    assert!(matches!(view.navigation, Navigation::Login { .. }));

    session.login(Role::Pc);
    let mut form = controller.initial_input(&mut session);
    form.theme_mode = "dark".to_string();
    form.accent_preset = "Emerald".to_string();
    form.custom_accent.clear();
    let outcome = controller.render(&mut session, &form);
    assert!(outcome.changed);

    let view = render_shell(&mut session, &config, &registry);
    assert_eq!(view.role, Role::Pc);
    assert_eq!(
        view.navigation.groups(),
        vec![PageGroup::Account, PageGroup::Visualization]
    );
    assert_eq!(view.stylesheet, outcome.stylesheet);
    assert_eq!(view.stylesheet.palette_override(), PaletteOverride::ForceDark);

    session.logout();
    let view = render_shell(&mut session, &config, &registry);
    assert!(matches!(view.navigation, Navigation::Login { .. }));
    assert_eq!(view.stylesheet.palette_override(), PaletteOverride::ForceDark);
}

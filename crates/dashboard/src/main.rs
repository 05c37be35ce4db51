//! dashboard - theming and navigation tool for the analytics dashboard
//!
//! Drives the core library from the command line: emits the theme
//! stylesheet for a set of settings, lists the pages a role can reach and
//! renders a static preview of the settings page.

mod preview;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};

use dashboard_core::config::ConfigLoadResult;
use dashboard_core::navigation::render_shell;
use dashboard_core::{
    Accent, Config, Density, FontScale, Navigation, PageRegistry, RenderOutcome, Role, Session,
    SettingsController, ThemeMode, logging,
};

/// dashboard - theme stylesheets and role navigation
#[derive(Parser, Debug)]
#[command(name = "dashboard", version, about, long_about = None)]
struct Args {
    /// Path to the configuration file (uses XDG lookup if not specified)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print example configuration and exit
    #[arg(long)]
    print_example_config: bool,

    /// Validate configuration and exit (returns non-zero on errors)
    #[arg(long)]
    check_config: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

/// Values a settings page would submit. Anything left out keeps the
/// session's current value.
#[derive(clap::Args, Debug, Default)]
struct SettingsArgs {
    /// Theme mode (auto, light, dark)
    #[arg(long)]
    mode: Option<String>,

    /// Accent preset name (see `--check-config -v` for the list)
    #[arg(long)]
    preset: Option<String>,

    /// Custom accent color (#rgb or #rrggbb); wins over --preset when valid
    #[arg(long)]
    custom_accent: Option<String>,

    /// Font scale (xs, sm, base, lg, xl)
    #[arg(long)]
    font_scale: Option<String>,

    /// Density (compact, normal, spacious)
    #[arg(long)]
    density: Option<String>,

    /// Restore the default theme and guest role instead of applying values
    #[arg(long)]
    reset: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the stylesheet for the given settings
    Css {
        #[command(flatten)]
        settings: SettingsArgs,

        /// Print bare CSS even when style tag wrapping is configured
        #[arg(long)]
        raw: bool,
    },
    /// List the page groups and pages a role can reach
    Pages {
        /// Role (none, guest, PC, Professor, Team)
        #[arg(short, long, default_value = "none")]
        role: String,

        /// Emit JSON instead of a text listing
        #[arg(long)]
        json: bool,
    },
    /// Write a standalone HTML preview of the settings page
    Preview {
        #[command(flatten)]
        settings: SettingsArgs,

        /// Role to sign in as before rendering
        #[arg(short, long)]
        role: Option<String>,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    logging::init(args.verbose);

    // --print-example-config does not need a config file
    if args.print_example_config {
        print!("{}", dashboard_core::config::DEFAULT_CONFIG_TOML);
        return ExitCode::SUCCESS;
    }

    // If --config is specified, it must exist and be valid (no fallback)
    let load_result = match Config::find_and_load(args.config.as_deref()) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(ref source) = load_result.source {
        info!("Loaded configuration from {:?}", source);
    } else if load_result.used_defaults {
        info!("Using default configuration (no config file found)");
    }

    if let Err(e) = load_result.config.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }
    for warning in load_result.config.warnings() {
        warn!("{}", warning);
    }

    debug!("Configuration validated successfully");

    if args.check_config {
        report_valid(&load_result);
        return ExitCode::SUCCESS;
    }

    let Some(command) = args.command else {
        eprintln!("Error: no command given (try --help)");
        return ExitCode::FAILURE;
    };

    match run(command, &load_result.config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn report_valid(load_result: &ConfigLoadResult) {
    if let Some(ref source) = load_result.source {
        println!("Configuration valid: {}", source.display());
    } else {
        println!("Configuration valid (using defaults)");
    }
    debug!("\n{}", load_result.config.summary());
}

fn run(command: Command, config: &Config) -> anyhow::Result<()> {
    match command {
        Command::Css { settings, raw } => {
            let mut session = Session::new(config.session.clone());
            let outcome = apply_settings(&mut session, config, &settings);
            if raw {
                print!("{}", outcome.stylesheet.render());
            } else {
                print!("{}", outcome.artifact());
            }
            Ok(())
        }
        Command::Pages { role, json } => {
            let role = parse_role(&role)?;
            let navigation = Navigation::for_role(role, &PageRegistry::standard());
            if json {
                println!("{}", serde_json::to_string_pretty(&navigation)?);
            } else {
                print_pages(role, &navigation);
            }
            Ok(())
        }
        Command::Preview {
            settings,
            role,
            output,
        } => {
            let mut session = Session::new(config.session.clone());
            if let Some(role) = role {
                session.login(parse_role(&role)?);
            }
            let outcome = apply_settings(&mut session, config, &settings);
            let shell = render_shell(&mut session, config, &PageRegistry::standard());
            let page = preview::render(config, session.preference(), &outcome, &shell.navigation);

            match output {
                Some(path) => preview::write(&path, &page)?,
                None => print!("{}", page),
            }
            Ok(())
        }
    }
}

/// Run one settings render for the session, the way the settings page would
/// on submit.
fn apply_settings(session: &mut Session, config: &Config, args: &SettingsArgs) -> RenderOutcome {
    let controller = SettingsController::new(config);
    if args.reset {
        return controller.reset(session);
    }

    warn_if_invalid::<ThemeMode>("mode", args.mode.as_deref());
    warn_if_invalid::<FontScale>("font scale", args.font_scale.as_deref());
    warn_if_invalid::<Density>("density", args.density.as_deref());
    if let Some(preset) = args.preset.as_deref()
        && config.accent.lookup(preset).is_none()
    {
        warn!(
            "Unknown accent preset '{}' (available: {})",
            preset,
            config.accent.names().collect::<Vec<_>>().join(", ")
        );
    }
    if let Some(custom) = args.custom_accent.as_deref()
        && Accent::parse(custom).is_none()
    {
        warn!("Ignoring invalid custom accent '{}'", custom);
    }

    let mut input = controller.initial_input(session);
    if let Some(ref mode) = args.mode {
        input.theme_mode = mode.clone();
    }
    if let Some(ref preset) = args.preset {
        input.accent_preset = preset.clone();
        // A preset choice only wins when no custom color is typed
        input.custom_accent.clear();
    }
    if let Some(ref custom) = args.custom_accent {
        input.custom_accent = custom.clone();
    }
    if let Some(ref font_scale) = args.font_scale {
        input.font_scale = font_scale.clone();
    }
    if let Some(ref density) = args.density {
        input.density = density.clone();
    }

    let outcome = controller.render(session, &input);
    debug!("Settings render changed={}", outcome.changed);
    outcome
}

fn warn_if_invalid<T: std::str::FromStr<Err = dashboard_core::Error>>(
    field: &str,
    value: Option<&str>,
) {
    if let Some(value) = value
        && let Err(e) = value.parse::<T>()
    {
        warn!("Ignoring {}: {}", field, e);
    }
}

fn parse_role(value: &str) -> anyhow::Result<Role> {
    Ok(value.parse::<Role>()?)
}

fn print_pages(role: Role, navigation: &Navigation) {
    println!("Role: {}", role);
    match navigation {
        Navigation::Login { page } => {
            println!("Not signed in; only the login page is available:");
            println!("  {} {} ({})", page.icon, page.title, page.source);
        }
        Navigation::Sections { sections } => {
            for section in sections {
                println!("{}:", section.label);
                for page in &section.pages {
                    println!("  {} {} ({})", page.icon, page.title, page.source);
                }
            }
        }
    }
    if let Some(landing) = navigation.landing_page() {
        println!("Landing page: {}", landing.title);
    }
}

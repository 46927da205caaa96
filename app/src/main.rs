use clap::{Parser, Subcommand};
use engine::color::{self, Color};
use engine::{Theme, ThemeSession};
use std::path::PathBuf;
use std::process::ExitCode;
use stylekit::config::{self, AppConfig};
use stylekit::error::AppResult;
use stylekit::logger;
use stylekit::theme::{self, validation::RangeValidator, validation::ThemeIdValidator};
use stylekit::validation::Validator;

#[derive(Debug, Parser)]
#[command(name = "stylekit", version, about = "Resolve, list and switch StyleKit themes")]
struct Cli {
    /// Configuration file (defaults to ./stylekit.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the theme that is active at startup
    Current,
    /// Sync the catalog and list every known theme
    List,
    /// Activate a theme by identifier
    Activate {
        id: String,
        /// Keep the choice for this run only
        #[arg(long)]
        no_persist: bool,
        /// Download the theme again even if its rules are present
        #[arg(long, conflicts_with = "no_persist")]
        reload: bool,
    },
    /// Color helpers
    #[command(subcommand)]
    Color(ColorCommand),
}

#[derive(Debug, Subcommand)]
enum ColorCommand {
    /// Blend a color toward a target, or toward black/white by sign
    #[command(allow_negative_numbers = true)]
    Blend {
        fraction: f64,
        base: String,
        target: Option<String>,
    },
    /// Blend toward black
    Darken {
        color: String,
        #[arg(long, default_value_t = color::DEFAULT_DARKEN_AMOUNT)]
        amount: f64,
    },
    /// Blend toward white
    Lighten {
        color: String,
        #[arg(long, default_value_t = color::DEFAULT_LIGHTEN_AMOUNT)]
        amount: f64,
    },
    /// Convert a 3- or 6-digit hex color to rgba(...)
    Rgba { hex: String, alpha: f64 },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logger::setup_logger(config.logging()) {
        eprintln!("Warning: Failed to initialize logger: {e}");
    }

    let result = match cli.command {
        Command::Current => run_current(&config).await,
        Command::List => run_list(&config).await,
        Command::Activate {
            id,
            no_persist,
            reload,
        } => run_activate(&config, &id, !no_persist, reload).await,
        Command::Color(command) => run_color(command),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_theme_unavailable() => {
            eprintln!("{e}. The current theme was kept.");
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("{e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> AppResult<AppConfig> {
    match path {
        Some(path) => config::load_config_from(path),
        None => config::get_config().cloned(),
    }
}

async fn run_current(config: &AppConfig) -> AppResult<()> {
    let mut session = theme::open_session(config);
    let active = session.resolve_initial_theme().await?;
    println!("{}", describe(active));
    Ok(())
}

async fn run_list(config: &AppConfig) -> AppResult<()> {
    let mut session = theme::open_session(config);
    session.resolve_initial_theme().await?;
    sync_catalog(&mut session).await;

    for theme in session.themes() {
        let marker = if session.is_theme_active(theme) { "*" } else { " " };
        println!("{marker} {}", describe(theme));
    }
    if let Some(active) = session.active_theme().filter(|theme| theme.is_swap_in()) {
        println!("* {}", describe(active));
    }
    Ok(())
}

async fn run_activate(config: &AppConfig, id: &str, persist: bool, reload: bool) -> AppResult<()> {
    ThemeIdValidator.validate(id)?;

    let mut session = theme::open_session(config);
    session.resolve_initial_theme().await?;
    sync_catalog(&mut session).await;

    let active = if reload {
        session.download_theme_and_reload(id).await?
    } else {
        session.activate_theme(id, persist).await?
    };
    println!("Activated {}", describe(active));
    Ok(())
}

fn run_color(command: ColorCommand) -> AppResult<()> {
    let result = match command {
        ColorCommand::Blend {
            fraction,
            base,
            target,
        } => {
            RangeValidator::FRACTION.validate(&fraction)?;
            let target = target.map(|t| t.parse::<Color>()).transpose()?;
            color::blend(fraction, base.parse()?, target)
        }
        ColorCommand::Darken {
            color: input,
            amount,
        } => {
            RangeValidator::AMOUNT.validate(&amount)?;
            color::darken_by(input.parse()?, amount)
        }
        ColorCommand::Lighten {
            color: input,
            amount,
        } => {
            RangeValidator::AMOUNT.validate(&amount)?;
            color::lighten_by(input.parse()?, amount)
        }
        ColorCommand::Rgba { hex, alpha } => {
            RangeValidator::ALPHA.validate(&alpha)?;
            color::hex_to_rgba(&hex, alpha)?
        }
    };
    println!("{result}");
    Ok(())
}

/// Sync failures leave the registry as it was; listing and activation go on.
async fn sync_catalog(session: &mut ThemeSession) {
    if let Err(e) = session.sync().await {
        log::warn!("Theme sync failed: {e}");
    }
}

fn describe(theme: &Theme) -> String {
    let kind = if theme.is_system_theme { "system" } else { "custom" };
    let mut line = format!("{} ({}) [{kind}]", theme.name, theme.uuid);
    if theme.is_swap_in() {
        line.push_str(" [restored]");
    }
    if theme.is_not_available_on_client() {
        line.push_str(" [not available]");
    }
    line
}

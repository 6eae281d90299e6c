use clap::{Args, Parser, Subcommand};
use nomad::cli::{Context, StatusRequest, list_apps, show_status, validate_catalog};
use nomad::storage::HttpSource;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = nomad::APP_NAME)]
#[command(version = nomad::VERSION)]
#[command(about = "Portable application version manager", long_about = None)]
struct Cli {
    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Extra catalog file (.toml or .json), may be repeated
    #[arg(long = "catalog", global = true)]
    catalogs: Vec<PathBuf>,

    /// Directory holding the installed apps
    #[arg(long, global = true)]
    apps_dir: Option<PathBuf>,

    /// More diagnostics (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show what would be installed, upgraded, downgraded or kept
    Status(StatusArgs),
    /// List installed apps and their active version
    List,
    /// Check every catalog definition
    Validate,
}

#[derive(Args, Default)]
struct StatusArgs {
    /// Apps to check ("all" or nothing for every installed app)
    apps: Vec<String>,

    /// Install this exact version, whatever is installed or available
    #[arg(long)]
    force_version: Option<String>,

    /// Look up the latest version of apps having a version check
    #[arg(long)]
    latest: bool,

    /// API key for rate-limited version sources (GitHub)
    #[arg(long, env = nomad::API_KEY_ENV, hide_env_values = true)]
    api_key: Option<String>,

    /// Use the app list from the settings when no app is named
    #[arg(long)]
    mine: bool,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", nomad::APP_NAME, level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = Context::load(
        cli.config.as_deref(),
        &cli.catalogs,
        cli.apps_dir.as_deref(),
    )?;

    for rejected in &ctx.rejected {
        warn!("Skipping definition: {}", rejected);
    }

    match cli.command.unwrap_or(Commands::Status(StatusArgs::default())) {
        Commands::Status(args) => {
            let request = StatusRequest {
                apps: args.apps,
                force_version: args.force_version,
                use_latest: args.latest,
                api_key: args.api_key,
                mine: args.mine,
            };
            show_status(&ctx, &request, &HttpSource)?;
        }
        Commands::List => list_apps(&ctx)?,
        Commands::Validate => validate_catalog(&ctx)?,
    }

    Ok(())
}

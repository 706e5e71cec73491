//! Focus Telemetry Agent CLI
//!
//! Reports time spent per focused application to a remote endpoint.

use clap::{Parser, Subcommand};
use focus_telemetry_agent::{
    collector::{check_support, FocusSource, NativeFocusSource},
    config::{Config, API_URL_VAR, AUTH_TOKEN_VAR},
    core::{normalize_title, DEFAULT_DELIMITER},
    transparency::create_shared_log,
    BlockingReportClient, LoopState, ReportTransport, SamplingLoop, ShutdownSignal,
    PRIVACY_DECLARATION, VERSION,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "focus-telemetry")]
#[command(version = VERSION)]
#[command(about = "Reports time spent per focused application", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start sampling and reporting (default)
    Start,

    /// Sample the focused window once and print the result
    Probe,

    /// Display what the agent collects
    Privacy,

    /// Show the resolved configuration
    Config,
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    match cli.command.unwrap_or(Commands::Start) {
        Commands::Start => {
            cmd_start();
        }
        Commands::Probe => {
            cmd_probe();
        }
        Commands::Privacy => {
            cmd_privacy();
        }
        Commands::Config => {
            cmd_config();
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn cmd_start() {
    println!("Focus Telemetry Agent v{VERSION}");
    println!();

    if !check_support() {
        eprintln!(
            "Error: focused window tracking is not supported on {}",
            std::env::consts::OS
        );
        std::process::exit(1);
    }

    let config = load_config();

    let source = match NativeFocusSource::new() {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let client = match BlockingReportClient::new(config.request_timeout) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let shutdown = ShutdownSignal::new();
    if let Err(e) = shutdown.install_handler() {
        eprintln!("Error setting signal handler: {e}");
        std::process::exit(1);
    }

    println!("Setting up monitoring for {}", std::env::consts::OS);
    println!("  Endpoint: {}", config.api_url);
    println!("  Sample interval: {:?}", config.tick_interval);
    println!("  Report every: {} samples", config.batch_ticks);
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());
    let session = uuid::Uuid::new_v4();
    let span = tracing::info_span!("agent", %session, %host);
    let _guard = span.enter();

    let transparency_log = create_shared_log();
    let mut sampler = SamplingLoop::new(config, source, ReportTransport::new(client), shutdown)
        .with_transparency_log(transparency_log.clone());

    let state = sampler.run();
    debug_assert_eq!(state, LoopState::Stopped);

    println!();
    println!("{}", transparency_log.summary());
}

fn cmd_probe() {
    let mut source = match NativeFocusSource::new() {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    match source.focused_title() {
        Ok(raw) => {
            let title = normalize_title(&raw, DEFAULT_DELIMITER);
            println!("Raw title:        {raw:?}");
            if title.is_empty() {
                println!("Normalized title: (none, would not be counted)");
            } else {
                println!("Normalized title: {title:?}");
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_privacy() {
    println!("{PRIVACY_DECLARATION}");
}

fn cmd_config() {
    let config = load_config();

    println!("Configuration");
    println!("=============");
    println!();
    println!(
        "{}",
        serde_json::to_string_pretty(&config).unwrap_or_else(|_| "Error".to_string())
    );
}

/// Load configuration from the environment or exit with status 1.
fn load_config() -> Config {
    match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!();
            eprintln!("The agent needs two environment variables:");
            eprintln!("  {AUTH_TOKEN_VAR}  bearer token for the report endpoint");
            eprintln!("  {API_URL_VAR}  URL the reports are POSTed to");
            std::process::exit(1);
        }
    }
}

//! Postcal CLI and REST API entry point.
//!
//! Binary name: `postcal`
//!
//! `postcal serve` starts the HTTP API with the background retention job;
//! `postcal purge` runs one retention sweep and exits.

mod http;
mod purge;
mod state;
#[cfg(test)]
mod test_support;

use clap::{Parser, Subcommand};

use postcal_core::retention::run_purge;
use postcal_infra::config::{load_config, resolve_data_dir};
use state::AppState;

#[derive(Parser)]
#[command(name = "postcal", about = "Personal content-scheduling service", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Bridge tracing spans to OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    otel: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server.
    Serve {
        /// Bind host (overrides config).
        #[arg(long)]
        host: Option<String>,
        /// Bind port (overrides config).
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run one retention sweep and exit.
    Purge,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Default filter from verbosity; RUST_LOG still wins when set.
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "info,postcal=debug",
        _ => "trace",
    };
    postcal_observe::tracing_setup::init_tracing(filter, cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let data_dir = resolve_data_dir();
    let config = load_config(&data_dir).await;

    match cli.command {
        Commands::Serve { host, port } => {
            let state = AppState::init(&config, &data_dir).await?;

            // Keep the scheduler handle alive for the server's lifetime.
            let _scheduler = purge::spawn_purge_job(&state, &config.retention.schedule).await?;

            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            println!(
                "  {} Postcal API listening on {}",
                console::style("✓").green(),
                console::style(&addr).cyan()
            );
            if !state.generator.has_provider() {
                println!(
                    "  {} no API key configured; generation uses template fallback",
                    console::style("!").yellow()
                );
            }

            let router = http::router::build_router(state);
            axum::serve(listener, router).await?;
        }

        Commands::Purge => {
            let state = AppState::init(&config, &data_dir).await?;
            let report = run_purge(&state.retention, &state.posts, &state.schedules).await?;
            println!(
                "  {} removed {} posts and {} scheduled posts past the {}-day window",
                console::style("✓").green(),
                report.posts_deleted,
                report.schedules_deleted,
                state.retention.max_age_days()
            );
        }
    }

    postcal_observe::tracing_setup::shutdown_tracing();
    Ok(())
}

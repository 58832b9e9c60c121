//! Waypoint CLI and REST API entry point.
//!
//! Binary name: `waypoint`
//!
//! Parses CLI arguments, initializes configuration and services, then
//! dispatches to the appropriate command handler or starts the REST API
//! server.

use clap::Parser;
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use waypoint_api::cli::{Cli, Commands};
use waypoint_api::http;
use waypoint_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need app state or tracing
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "waypoint", &mut std::io::stdout());
        return Ok(());
    }

    // Set up tracing. The server path goes through waypoint-observe so
    // spans can be bridged to OpenTelemetry; one-shot commands use a plain
    // fmt subscriber driven by verbosity flags.
    match &cli.command {
        Commands::Serve { otel, .. } => {
            if std::env::var_os("RUST_LOG").is_none() {
                // SAFETY: called before any threads are spawned.
                unsafe { std::env::set_var("RUST_LOG", "info,waypoint=debug") };
            }
            waypoint_observe::tracing_setup::init_tracing(*otel)
                .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;
        }
        _ => {
            let filter = match cli.verbose {
                0 if cli.quiet => "error",
                0 => "warn",
                1 => "info,waypoint=debug",
                _ => "trace",
            };
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::new(filter))
                .with_target(false)
                .init();
        }
    }

    // Initialize application state (config, credentials, services)
    let state = AppState::init().await?;

    match cli.command {
        Commands::Serve { port, host, .. } => {
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            println!(
                "  {} Waypoint API listening on {}",
                console::style("⚡").bold(),
                console::style(format!("http://{addr}")).cyan()
            );
            if state.turn_processor.is_none() {
                println!(
                    "  {}",
                    console::style("Chat turns disabled: GOOGLE_AI_API_KEY not set").yellow()
                );
            }
            if state.search_service.is_none() {
                println!(
                    "  {}",
                    console::style("Place search disabled: GOOGLE_MAPS_API_KEY not set").yellow()
                );
            }
            println!("  {}", console::style("Press Ctrl+C to stop").dim());

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            waypoint_observe::tracing_setup::shutdown_tracing();
            println!("\n  Server stopped.");
        }

        Commands::Status => {
            waypoint_api::cli::status::status(&state, cli.json).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

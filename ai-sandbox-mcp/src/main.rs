use anyhow::Result;
use tracing_subscriber::EnvFilter;

use ai_sandbox_mcp::build_router;
use sandbox_mcp_server::{RouterService, Server, StdioTransport};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // stdout carries the protocol; all logging goes to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::info!("Starting AI Sandbox MCP Server...");

    if let Err(error) = run().await {
        tracing::error!(%error, "Error starting MCP server");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let router = RouterService(build_router()?);
    let server = Server::new(router);
    let transport = StdioTransport::new(tokio::io::stdin(), tokio::io::stdout());

    tracing::info!("MCP Server started successfully");

    tokio::select! {
        outcome = server.run(transport) => {
            outcome?;
        }
        outcome = shutdown_signal() => {
            outcome?;
            tracing::info!("Server shutting down...");
        }
    }

    Ok(())
}

#[cfg(unix)]
async fn shutdown_signal() -> Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        _ = interrupt.recv() => {}
        _ = terminate.recv() => {}
    }
    Ok(())
}

#[cfg(not(unix))]
async fn shutdown_signal() -> Result<()> {
    tokio::signal::ctrl_c().await?;
    Ok(())
}

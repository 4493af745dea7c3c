use std::net::SocketAddr;
use std::process::ExitCode;

use clap::Parser;

use coilmq::cli::Cli;
use coilmq::config::init_config;
use coilmq::observability::{logging, metrics};
use coilmq::{build_server, BootstrapError, ComponentRegistry};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            eprintln!("coilmq: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), BootstrapError> {
    let registry = ComponentRegistry::discover();

    if cli.list_components {
        for (identifier, kind) in registry.identifiers() {
            println!("{:<22} {}", kind.as_str(), identifier);
        }
        return Ok(());
    }

    let config = init_config(cli.config.as_deref(), &cli.overrides())?;

    if cli.print_config {
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config_file = ?cli.config,
        listen_addr = %config.coilmq.listen_addr,
        listen_port = config.coilmq.listen_port,
        "Configuration loaded"
    );

    let server = build_server(&config, &registry)?;

    if cli.check {
        println!("configuration OK, server would listen on {}", server.bind_addr());
        return Ok(());
    }

    if config.metrics.enabled {
        if let Ok(addr) = config.metrics.address.parse::<SocketAddr>() {
            if let Err(e) = metrics::init_metrics(addr) {
                tracing::error!(error = %e, "Failed to start metrics exporter");
            }
        }
    }

    server.serve_forever().await?;
    Ok(())
}

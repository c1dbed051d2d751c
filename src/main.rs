use std::io;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info, warn};

use one_page_server::bootstrap;
use one_page_server::error::StartupError;
use one_page_server::logger;
use one_page_server::server::HttpServer;
use one_page_server::server::config::Cli;

fn main() -> ExitCode {
    logger::init();

    let cli = Cli::parse();
    info!("Starting single page HTTP server with options: {:?}", cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), StartupError> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| cli.root.join(bootstrap::CONFIG_FILE));

    bootstrap::ensure_default_files(&cli.root, &config_path)?;
    let config = bootstrap::resolve_config(&config_path)?;
    info!("Resolved config: {:?}", config);

    let mut server = HttpServer::bind(&config)?;
    server.serve(cli.root.join(bootstrap::INDEX_FILE));

    println!("Server running on http://{}/", server.local_addr());
    println!("Press Enter to stop the server...");
    wait_for_stop_request();

    server.stop();
    server.join();

    Ok(())
}

/// Blocks until the operator asks for shutdown with a line on stdin. EOF
/// counts as a stop request, so the server also winds down cleanly when its
/// stdin is detached.
fn wait_for_stop_request() {
    let mut line = String::new();
    if let Err(e) = io::stdin().read_line(&mut line) {
        warn!("Error reading from stdin, stopping the server: {}", e);
    }
}

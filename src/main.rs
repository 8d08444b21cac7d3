//! # Web Server - Entry Point
//! src/main.rs
//!
//! Lee la configuración, registra los servicios y arranca el servidor.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use web_server::config::Config;
use web_server::router::{RequestRouter, ServiceRegistry, StaticFileLoader};
use web_server::server::Server;
use web_server::services;

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "web_server=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::parse();
    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(2);
    }
    config.print_summary();

    // La tabla de servicios se arma una sola vez, antes de escuchar
    let mut registry = ServiceRegistry::new();
    registry.register("/convertir", services::convert_handler);

    let router = RequestRouter::new(registry, StaticFileLoader::new(&config.static_dir));
    let mut server = Server::new(config, router);

    if let Err(e) = server.run() {
        tracing::error!(error = %e, "Failed to start server");
        std::process::exit(1);
    }
}

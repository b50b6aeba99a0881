//! Point d'entrée principal de l'application.
//! Charge la configuration et démarre le serveur web avec Axum.

use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use dotenv::dotenv;
use log::info;
use upload_guard::{backend, config::Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Charger les variables d'environnement
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Arc::new(Config::from_env()?);
    info!("Uploads are stored in {}", config.uploads_dir.display());

    let app = backend::router::get_router(config.clone());

    // Démarrer le serveur web
    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to open web server listener")?;

    axum::serve(listener, app)
        .await
        .context("Failed to bind Axum to listener")
}

//! Configuration des routes pour l'application.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::backend::handlers::{health, upload_file};
use crate::config::Config;
use crate::consts;

/// Initialisation du routeur principal
pub fn get_router(config: Arc<Config>) -> Router {
    let router = Router::new()
        .route("/health", get(health)) // Vérification de l'état du serveur
        .route("/upload", post(upload_file)) // Envoi d'un fichier
        .layer(DefaultBodyLimit::max(consts::MAX_REQUEST_BYTES))
        .layer(Extension(config));

    // Configuration CORS pour permettre les requêtes de n'importe quelle origine (en mode debug uniquement)
    if cfg!(debug_assertions) {
        let cors = CorsLayer::new()
            .allow_methods(tower_http::cors::AllowMethods::any())
            .allow_origin(Any);
        router.layer(cors)
    } else {
        router
    }
}

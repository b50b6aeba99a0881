//! Configuration de l'application, lue depuis l'environnement (et `.env`).

use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use log::info;

use crate::consts;
use crate::utils::validation::ValidationRules;

#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub uploads_dir: PathBuf,
    pub rules: ValidationRules,
}

impl Config {
    /// Charge la configuration depuis les variables d'environnement
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construit la configuration à partir d'une fonction de lecture des variables
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let http_port = match lookup("HTTP_PORT") {
            Some(port) => port
                .parse()
                .with_context(|| format!("Invalid HTTP_PORT: {port}"))?,
            None => consts::HTTP_PORT,
        };

        let uploads_dir = lookup("UPLOADS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(consts::UPLOADS_DIR));

        let rules = match lookup("UPLOAD_RULES") {
            Some(path) => {
                info!("Loading upload rules from {}", path);
                ValidationRules::load(Path::new(&path))?
            }
            None => ValidationRules::default_images(),
        };

        Ok(Self { http_port, uploads_dir, rules })
    }
}

//! Gestion des routes d'upload.

use std::{
    io::Write,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;
use axum::{extract::Multipart, Extension, Json};
use http::StatusCode;
use log::{error, info};
use serde_json::json;
use tempfile::NamedTempFile;
use thiserror::Error;
use uuid::Uuid;

use crate::config::Config;
use crate::consts;
use crate::utils::error_messages::{MALFORMED_UPLOAD, UPLOAD_FAILED};
use crate::utils::validation::{FileValidator, LocalUpload, ValidationError};

/// Fichier reçu dans la requête multipart, pas encore validé
struct ReceivedFile {
    filename: String,
    mime_type: String,
    bytes: Vec<u8>,
}

#[derive(Debug, Error)]
enum UploadFailure {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Indique que le serveur répond
pub async fn health() -> &'static str {
    "ok"
}

/// Reçoit un fichier, le valide selon les règles configurées et l'enregistre
pub async fn upload_file(
    Extension(config): Extension<Arc<Config>>,
    mut multipart: Multipart,
) -> axum::response::Result<(StatusCode, Json<serde_json::Value>)> {
    let mut received: Option<ReceivedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| (StatusCode::BAD_REQUEST, MALFORMED_UPLOAD))?
    {
        if field.name() != Some(consts::UPLOAD_FIELD) {
            continue; // Ignore unknown fields
        }

        let filename = field.file_name().map(sanitize_filename).unwrap_or_default();
        let mime_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|_| (StatusCode::BAD_REQUEST, MALFORMED_UPLOAD))?;

        // An empty file input still sends a part, without a name. The first
        // named file is the upload.
        if received.is_none() && !filename.is_empty() {
            received = Some(ReceivedFile {
                filename,
                mime_type,
                bytes: bytes.to_vec(),
            });
        }
    }

    let outcome = tokio::task::spawn_blocking(move || store_upload(&config, received))
        .await
        .map_err(|e| {
            error!("Upload task failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, UPLOAD_FAILED)
        })?;

    match outcome {
        Ok(path) => Ok((
            StatusCode::CREATED,
            Json(json!({ "path": path.display().to_string() })),
        )),
        Err(UploadFailure::Invalid(e)) => Ok((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": e.to_string() })),
        )),
        Err(UploadFailure::Storage(e)) => {
            error!("Failed to store upload: {:#}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, UPLOAD_FAILED).into())
        }
    }
}

/// Valide puis enregistre le fichier dans le dossier d'upload
fn store_upload(config: &Config, received: Option<ReceivedFile>) -> Result<PathBuf, UploadFailure> {
    let Some(received) = received else {
        return Err(ValidationError::NoFile.into());
    };

    // The validator works on a file on disk, as a regular form post would
    let mut temp = NamedTempFile::new().context("Failed to create temporary file")?;
    temp.write_all(&received.bytes)
        .and_then(|_| temp.flush())
        .context("Failed to buffer upload")?;

    let upload = LocalUpload::new(
        temp.path(),
        received.filename.as_str(),
        received.mime_type,
        received.bytes.len() as u64,
    );
    let validator = FileValidator::for_file(&upload);
    validator.check(&config.rules)?;

    // Generate a unique filename to prevent collisions
    let destination = config
        .uploads_dir
        .join(format!("{}-{}", Uuid::new_v4(), received.filename));

    let saved = validator
        .save_image(&destination, config.rules.convert_png_to_jpg)
        .context("Failed to save upload")?
        .with_context(|| format!("Failed to copy upload to {}", destination.display()))?;

    info!("Stored {} as {}", received.filename, saved.display());
    Ok(saved)
}

/// Garde uniquement le nom du fichier, sans composant de chemin
fn sanitize_filename(filename: &str) -> String {
    Path::new(filename.trim())
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
        .to_string()
}

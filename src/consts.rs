//! Valeurs par défaut de la configuration de l'application.

pub const HTTP_PORT: u16 = 8080; // Port par défaut pour le serveur HTTP.
pub const UPLOADS_DIR: &str = "./data/uploads"; // Dossier pour les fichiers uploadés.
pub const MAX_REQUEST_BYTES: usize = 16 * 1024 * 1024; // Taille maximale d'une requête.
pub const UPLOAD_FIELD: &str = "file"; // Nom du champ multipart contenant le fichier.

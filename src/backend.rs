//! Module principal pour le backend de l'application.
//! Contient les gestionnaires pour les routes et le routeur.
pub mod handlers;
pub mod router;

// Déclaration des modules disponibles dans le CLI

pub mod config;
pub mod replay;
pub mod train;

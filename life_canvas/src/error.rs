// error.rs - Errors surfaced by the canvas binary

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("window error: {0}")]
    Window(#[from] eframe::Error),
}

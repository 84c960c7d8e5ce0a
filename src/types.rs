// Core types for hocba-viewer
use std::path::PathBuf;

// App state flags using bitflags
bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AppFlags: u8 {
        const EXIT   = 0b0001;
        const REDRAW = 0b0010;
    }
}

// Error types
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid result file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Rasterization failed: {0}")]
    Rasterize(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Unknown document {0}")]
    UnknownDocument(usize),

    #[error("Page {page} out of range (1..={max})")]
    PageOutOfRange { page: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, ViewerError>;

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for roimap operations.
#[derive(Debug, Error)]
pub enum RoiError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("A polygon needs at least 3 vertices to close (have {count})")]
    InsufficientVertices { count: usize },

    #[error("Imported {images} image(s) but the mosaic has {cameras} camera(s)")]
    MappingCountMismatch { images: usize, cameras: usize },

    #[error("Got {assignments} camera assignment(s) for {images} image(s)")]
    InvalidAssignment { assignments: usize, images: usize },

    #[error("Failed to parse project JSON from {path}: {source}")]
    ProjectParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write project JSON to {path}: {source}")]
    ProjectWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid project: {0}")]
    InvalidProject(String),

    #[error("Failed to load image {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to read image size of {path}: {source}")]
    ImageProbe {
        path: PathBuf,
        #[source]
        source: imagesize::ImageError,
    },

    #[error("Failed to collect images from {path}: {message}")]
    ImageDir { path: PathBuf, message: String },

    #[error("Failed to encode image {path}: {source}")]
    ImageEncode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to parse edit event on line {line}: {source}")]
    ReplayParse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

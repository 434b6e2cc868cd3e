/// Error types shared across the pipeline
use std::path::PathBuf;

use thiserror::Error;

/// Failures while turning mesh text into a `Mesh`. All of these abort loading.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read mesh file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: malformed vertex `{text}`")]
    MalformedVertex { line: usize, text: String },

    #[error("line {line}: malformed face `{text}` (expected four integer indices)")]
    MalformedFace { line: usize, text: String },

    #[error("face {face}: index {index} is outside the {vertex_count} loaded vertices")]
    DanglingReference {
        face: usize,
        index: i64,
        vertex_count: usize,
    },
}

/// Per-vertex or per-triangle anomalies. The compositor skips the affected
/// triangle and keeps drawing the rest of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RenderError {
    #[error("vertex at z = {z} sits on or behind the camera plane")]
    DegenerateProjection { z: f32 },

    #[error("triangle has non-finite screen coordinates")]
    NonFinite,

    #[error("face references vertex {index}, which the mesh does not have")]
    DanglingIndex { index: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

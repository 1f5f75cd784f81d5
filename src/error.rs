// filepath: src/error.rs
//! Error types for scribbler

use std::path::PathBuf;

/// Startup faults raised while binding the pipeline to its host
#[derive(thiserror::Error, Debug)]
pub enum SetupError {
    #[error("no drawing surface with id `{id}`")]
    SurfaceNotFound { id: String },

    #[error("viewport has no area")]
    EmptyViewport,
}

/// Faults raised while loading or resolving configuration
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to access config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid stroke color `{value}`")]
    InvalidColor {
        value: String,
        #[source]
        source: csscolorparser::ParseColorError,
    },

    #[error("line width must be a positive number, got {0}")]
    InvalidLineWidth(f32),

    #[error("unknown layer `{0}`")]
    InvalidLayer(String),

    #[error("active layer {active:?} is below inactive layer {inactive:?}")]
    InvertedLayers {
        active: crate::surface::StackLayer,
        inactive: crate::surface::StackLayer,
    },

    #[error("environment variable {name} has invalid value `{value}`")]
    InvalidEnv { name: String, value: String },
}

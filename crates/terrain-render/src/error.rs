use diamond_square::TerrainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Gradient has no colour stops")]
    EmptyGradient,

    #[error("Invalid gradient stop key: {0}")]
    InvalidStop(f64),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Terrain error: {0}")]
    Terrain(#[from] TerrainError),
}

pub type Result<T> = std::result::Result<T, RenderError>;

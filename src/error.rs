use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid scene: {0}")]
    InvalidScene(String),
    #[error("invalid camera: {0}")]
    InvalidCamera(String),
    #[error("bad pixel buffer: {0}")]
    PixelBuffer(String),
    #[error("scene file '{}' not found", .0.display())]
    SceneNotFound(PathBuf),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid range: source [{src_min}, {src_max}] cannot be normalised")]
    InvalidRange { src_min: f64, src_max: f64 },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("point ({x}, {y}) not in bounds {width}x{height}")]
    OutOfBounds { x: i64, y: i64, width: u32, height: u32 },

    #[error("unsupported pixel format: {0}")]
    UnsupportedPixelFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;

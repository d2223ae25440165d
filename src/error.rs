use std::path::PathBuf;

use thiserror::Error;

/// Failures the reveal layer can run into. None of these reach the user;
/// the widget logs them and stays on its placeholder.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unsupported image source scheme: {0}")]
    UnsupportedScheme(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("could not allocate a {width}x{height} surface")]
    Allocation { width: usize, height: usize },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, Error>;

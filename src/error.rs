//! Error types for the model generator.
//!
//! Only two conditions are fatal for inference itself: input that is not JSON,
//! and a document whose root is not an object. Everything else inside the
//! engine degrades instead of failing.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("root value must be a JSON object, found {found}")]
    InvalidRoot { found: &'static str },

    #[error("malformed JSON input: {0}")]
    MalformedInput(#[from] serde_json::Error),

    #[error("I/O error at '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown serializer '{0}' (expected jackson, gson or none)")]
    UnknownSerializer(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }
}

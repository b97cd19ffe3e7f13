// crates/faculty-core/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Invalid synchronization direction: {direction}")]
    InvalidDirection { direction: String },

    #[error("Record could not be decoded for {direction}: {source}")]
    Decode {
        direction: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Sync options could not be parsed: {0}")]
    Options(#[from] toml::de::Error),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SyncError>;

// crates/input_core/src/error.rs
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    /// A channel was linked or unlinked without a raw action behind it.
    #[error("input action for channel `{channel}` is missing, cannot link/unlink")]
    MissingAction { channel: String },

    #[error("failed to read input config {path}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse input config: {0}")]
    ConfigParse(#[from] ron::error::SpannedError),

    #[error("failed to serialize input config: {0}")]
    ConfigSerialize(#[from] ron::Error),
}

impl InputError {
    pub fn missing_action(channel: impl Into<String>) -> Self {
        Self::MissingAction {
            channel: channel.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, InputError>;

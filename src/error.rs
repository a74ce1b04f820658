//! Error types for soundstage

use crate::channel::Category;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SoundStageError {
    /// A clip or set index pointed outside its bank. This is a
    /// content-authoring bug, so it propagates to the caller instead of
    /// being absorbed.
    #[error("index {index} is out of range ({len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    /// A channel pool is at its hard cap and every channel is busy.
    #[error("{category} channel pool exhausted (cap {cap})")]
    ResourceExhausted { category: Category, cap: usize },

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("configuration error: {0}")]
    Configuration(String),
}

pub type Result<T> = std::result::Result<T, SoundStageError>;

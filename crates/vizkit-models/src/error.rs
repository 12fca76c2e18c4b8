//! Error types for model construction.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("a network needs at least two layers, got {0}")]
    TooFewLayers(usize),

    #[error("every layer of the network is empty")]
    EmptyNetwork,
}

//! Error type returned by [`crate::run`].

use thiserror::Error;

use vizkit::VizError;
use vizkit_models::ModelError;

use crate::config::ConfigError;

/// Everything that can stop the CLI from producing a document.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Render error: {0}")]
    Render(#[from] VizError),
}

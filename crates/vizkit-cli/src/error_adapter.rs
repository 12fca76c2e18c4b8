//! Error adapter for converting [`CliError`] to miette diagnostics.
//!
//! The library crates report plain `thiserror` errors; this module attaches
//! the codes and help texts used by the CLI's graphical report handler.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use vizkit::VizError;
use vizkit_models::ModelError;

use crate::{CliError, config::ConfigError};

/// Adapter that renders a [`CliError`] as a miette diagnostic.
pub struct ErrorAdapter<'a>(pub &'a CliError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            CliError::Io(_) => "vizkit::io",
            CliError::Config(_) => "vizkit::config",
            CliError::Model(_) => "vizkit::model",
            CliError::Render(_) => "vizkit::render",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            CliError::Config(ConfigError::MissingFile(_)) => {
                "pass an existing TOML file to --config, or omit it to use the defaults"
            }
            CliError::Config(ConfigError::Validation(_)) => {
                "background_color accepts any CSS color, e.g. \"#ffffff\" or \"white\""
            }
            CliError::Model(ModelError::TooFewLayers(_)) => {
                "list at least an input and an output layer, e.g. --layers 3,2"
            }
            CliError::Model(ModelError::EmptyNetwork) => "give at least one layer a neuron",
            CliError::Render(VizError::NonFiniteCoordinate { .. }) => {
                "check the scene width and height in the configuration"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Convert a [`CliError`] into the diagnostics reported to the user.
///
/// Every error currently maps to a single diagnostic; the list shape keeps
/// the reporting loop in `main` independent of that.
pub fn to_reportables(err: &CliError) -> Vec<ErrorAdapter<'_>> {
    vec![ErrorAdapter(err)]
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_codes() {
        let err = CliError::Model(ModelError::EmptyNetwork);
        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);
        assert_eq!(
            reportables[0].code().unwrap().to_string(),
            "vizkit::model"
        );
        assert_eq!(
            reportables[0].to_string(),
            "Model error: every layer of the network is empty"
        );
    }

    #[test]
    fn test_config_error_is_transparent() {
        let err = CliError::Config(ConfigError::MissingFile(PathBuf::from("a.toml")));
        let adapter = ErrorAdapter(&err);
        assert_eq!(adapter.to_string(), "Missing configuration file: a.toml");
        assert!(adapter.help().is_some());
    }

    #[test]
    fn test_io_error_has_no_help() {
        let err = CliError::Io(std::io::Error::other("disk full"));
        let adapter = ErrorAdapter(&err);
        assert_eq!(adapter.code().unwrap().to_string(), "vizkit::io");
        assert!(adapter.help().is_none());
    }

    #[test]
    fn test_renders_with_graphical_handler() {
        let err = CliError::Model(ModelError::TooFewLayers(1));
        let mut out = String::new();
        miette::GraphicalReportHandler::new()
            .render_report(&mut out, &ErrorAdapter(&err))
            .unwrap();
        assert!(out.contains("vizkit::model"));
    }
}

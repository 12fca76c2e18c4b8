//! Configuration types for vizkit scenes.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file; every section and field is optional.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining scene and style settings.
//! - [`SceneConfig`] - Default view box and grid padding for new scene builders.
//! - [`StyleConfig`] - Visual options of exported documents.
//!
//! # Example
//!
//! ```
//! # use vizkit::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.scene().view_box().width(), 800.0);
//! assert!(config.style().embed_stylesheet());
//! assert!(config.style().background_color().is_ok());
//! ```

use serde::Deserialize;

use vizkit_core::{
    color::Color,
    geometry::{Padding, ViewBox},
};

/// Top-level configuration combining scene and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Scene defaults section.
    #[serde(default)]
    scene: SceneConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    pub fn new(scene: SceneConfig, style: StyleConfig) -> Self {
        Self { scene, style }
    }

    /// Returns the scene configuration.
    pub fn scene(&self) -> &SceneConfig {
        &self.scene
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Defaults applied to every scene builder created from this configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    width: f64,
    height: f64,
    grid_padding_x: f64,
    grid_padding_y: f64,
}

impl SceneConfig {
    pub fn new(view_box: ViewBox, grid_padding: Padding) -> Self {
        Self {
            width: view_box.width(),
            height: view_box.height(),
            grid_padding_x: grid_padding.x(),
            grid_padding_y: grid_padding.y(),
        }
    }

    pub fn view_box(&self) -> ViewBox {
        ViewBox::new(self.width, self.height)
    }

    /// Padding used by grids configured without an explicit padding.
    pub fn grid_padding(&self) -> Padding {
        Padding::new(self.grid_padding_x, self.grid_padding_y)
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::new(ViewBox::default(), Padding::default())
    }
}

/// Visual styling configuration for exported documents.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Background color as a CSS color string.
    background_color: Option<String>,

    /// Whether the default stylesheet is inlined into exported documents.
    embed_stylesheet: bool,

    /// Class added to the root element of exported documents.
    container_class: Option<String>,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_deref()
            .map(Color::new)
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    pub fn embed_stylesheet(&self) -> bool {
        self.embed_stylesheet
    }

    pub fn container_class(&self) -> Option<&str> {
        self.container_class.as_deref()
    }

    /// Sets the background color string (builder style).
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    /// Enables or disables the inlined stylesheet (builder style).
    pub fn with_embedded_stylesheet(mut self, embed: bool) -> Self {
        self.embed_stylesheet = embed;
        self
    }

    /// Sets the container class (builder style).
    pub fn with_container_class(mut self, class: impl Into<String>) -> Self {
        self.container_class = Some(class.into());
        self
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            embed_stylesheet: true,
            container_class: None,
        }
    }
}

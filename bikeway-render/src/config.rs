//! Renderer configuration.
//!
//! Every field has a default matching the stock bicycle-parking map, so an
//! empty JSON object is a valid configuration.

use serde::Deserialize;
use thiserror::Error;

use bikeway_core::Color;

/// Layer the street overlays are inserted below.
pub const DEFAULT_ANCHOR_LAYER: &str = "SharedUse";

/// Marker sizing and default colour.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkerConfig {
    /// Colour used when no rule applies.
    pub default_color: Color,
    /// Scale used when the record has no `capacity` tag.
    pub default_scale: f64,
    /// Capacity that adds `1.0` to the scale.
    pub capacity_divisor: f64,
    /// Upper bound on the scale.
    pub max_scale: f64,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            default_color: Color::from("gray"),
            default_scale: 0.5,
            capacity_divisor: 30.0,
            max_scale: 2.0,
        }
    }
}

/// Street overlay placement.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StreetConfig {
    /// Existing style layer the overlays are drawn beneath.
    pub anchor_layer: String,
}

impl Default for StreetConfig {
    fn default() -> Self {
        Self {
            anchor_layer: DEFAULT_ANCHOR_LAYER.to_owned(),
        }
    }
}

/// Complete overlay configuration.
///
/// # Examples
/// ```
/// use bikeway_render::OverlayConfig;
///
/// let config = OverlayConfig::from_json(r#"{"recenter_on_tap": true}"#)?;
/// assert!(config.recenter_on_tap);
/// assert_eq!(config.streets.anchor_layer, "SharedUse");
/// # Ok::<(), bikeway_render::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverlayConfig {
    /// Marker styling.
    pub markers: MarkerConfig,
    /// Street layer placement.
    pub streets: StreetConfig,
    /// Whether tapping a marker re-centres the map. Embedders set this on
    /// touch-capable platforms.
    pub recenter_on_tap: bool,
}

/// Errors raised while loading an [`OverlayConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON or contains unknown fields.
    #[error("failed to parse overlay configuration: {0}")]
    Parse(#[from] serde_json::Error),
    /// A setting holds an unusable value.
    #[error("invalid setting {field}: {reason}")]
    InvalidSetting {
        /// Offending field, dotted from the document root.
        field: &'static str,
        /// Constraint that was violated.
        reason: &'static str,
    },
}

impl OverlayConfig {
    /// Parse and validate a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields and
    /// [`ConfigError::InvalidSetting`] when [`Self::validate`] rejects a value.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check numeric settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSetting`] naming the first field that is
    /// non-finite, a non-positive divisor, or an empty anchor layer.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let markers = &self.markers;
        if !markers.default_scale.is_finite() {
            return Err(ConfigError::InvalidSetting {
                field: "markers.default_scale",
                reason: "must be finite",
            });
        }
        if !markers.max_scale.is_finite() {
            return Err(ConfigError::InvalidSetting {
                field: "markers.max_scale",
                reason: "must be finite",
            });
        }
        if !(markers.capacity_divisor.is_finite() && markers.capacity_divisor > 0.0) {
            return Err(ConfigError::InvalidSetting {
                field: "markers.capacity_divisor",
                reason: "must be positive and finite",
            });
        }
        if self.streets.anchor_layer.is_empty() {
            return Err(ConfigError::InvalidSetting {
                field: "streets.anchor_layer",
                reason: "must not be empty",
            });
        }
        Ok(())
    }
}

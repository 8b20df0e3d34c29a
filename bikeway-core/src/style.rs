//! Visual styles handed to the map surface.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// A CSS colour: a named colour such as `"gray"` or a hex string.
///
/// The value is passed to the surface verbatim.
///
/// # Examples
/// ```
/// use bikeway_core::Color;
///
/// let color = Color::from("#00ec18");
/// assert_eq!(color.as_str(), "#00ec18");
/// assert_eq!(color.to_string(), "#00ec18");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    /// Wrap a colour string.
    #[must_use]
    pub fn new(color: impl Into<String>) -> Self {
        Self(color.into())
    }

    /// Borrow the colour string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Color {
    fn from(color: &str) -> Self {
        Self::new(color)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Colour and size of a marker.
///
/// `scale` multiplies the widget's default marker size. It is not validated
/// and may be NaN when a record carries a non-numeric capacity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerStyle {
    /// Marker fill colour.
    pub color: Color,
    /// Size multiplier.
    pub scale: f64,
}

/// Paint properties of a line layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinePaint {
    /// Stroke colour.
    #[serde(rename = "line-color")]
    pub color: Color,
    /// Stroke width in pixels.
    #[serde(rename = "line-width")]
    pub width: f64,
    /// Stroke opacity in `0.0..=1.0`.
    #[serde(rename = "line-opacity")]
    pub opacity: f64,
}

/// A line layer drawing the features of one source.
#[derive(Debug, Clone, PartialEq)]
pub struct LineLayer {
    /// Layer identifier, unique on the surface.
    pub id: String,
    /// Identifier of the source providing the geometry.
    pub source: String,
    /// Stroke styling.
    pub paint: LinePaint,
}

impl LineLayer {
    /// Render the layer as a Mapbox style layer object.
    ///
    /// Surfaces backed by a Mapbox-style widget can forward this value as is.
    ///
    /// # Examples
    /// ```
    /// use bikeway_core::{Color, LineLayer, LinePaint};
    ///
    /// let layer = LineLayer {
    ///     id: "redRoadsId".to_owned(),
    ///     source: "redRoads".to_owned(),
    ///     paint: LinePaint { color: Color::from("red"), width: 3.0, opacity: 0.3 },
    /// };
    /// let json = layer.to_style_json();
    /// assert_eq!(json["type"], "line");
    /// assert_eq!(json["paint"]["line-color"], "red");
    /// ```
    #[must_use]
    pub fn to_style_json(&self) -> Value {
        json!({
            "id": self.id,
            "type": "line",
            "source": self.source,
            "layout": {},
            "paint": self.paint,
        })
    }
}

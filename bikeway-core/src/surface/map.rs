//! `MapSurface` and `Camera` traits plus the marker identifier.

use geo::Coord;

use crate::{FeatureCollection, LineLayer, MarkerStyle};

use super::error::SurfaceError;

/// Identifier of a marker placed on a [`MapSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(u64);

impl MarkerId {
    /// Wrap a surface-specific marker number.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Return the raw marker number.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for MarkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Controls the map viewport.
pub trait Camera {
    /// Animate the view so it is centred on `center`, keeping the zoom level.
    fn fly_to(&mut self, center: Coord<f64>);
}

/// Callback run when a marker is clicked.
///
/// The surface passes itself as the [`Camera`] so the handler can move the
/// view. Handlers may run any number of times and are dropped together with
/// their marker.
pub type ClickHandler = Box<dyn FnMut(&mut dyn Camera)>;

/// A map widget that can draw markers and line layers.
///
/// Coordinates use `x = longitude`, `y = latitude`. Layers are kept in draw
/// order; a layer added later draws above those added before it unless it is
/// anchored below an existing layer.
pub trait MapSurface: Camera {
    /// Place a marker and return its identifier.
    fn add_marker(&mut self, location: Coord<f64>, style: &MarkerStyle) -> MarkerId;

    /// Remove a marker along with its click handler.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::MarkerNotFound`] when the marker is not placed.
    fn remove_marker(&mut self, marker: MarkerId) -> Result<(), SurfaceError>;

    /// Attach a click handler to a marker.
    ///
    /// # Errors
    ///
    /// Returns a [`SurfaceError`] when the marker is unknown or the surface
    /// refuses the listener.
    fn on_marker_click(&mut self, marker: MarkerId, handler: ClickHandler)
    -> Result<(), SurfaceError>;

    /// Register a geometry source.
    ///
    /// Widgets that take GeoJSON can pass
    /// [`FeatureCollection::to_source_json`] through unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::DuplicateSource`] when `id` is already taken.
    fn add_source(&mut self, id: &str, data: FeatureCollection) -> Result<(), SurfaceError>;

    /// Remove a geometry source.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::SourceNotFound`] for an unknown `id` and
    /// [`SurfaceError::SourceInUse`] while a layer still draws it.
    fn remove_source(&mut self, id: &str) -> Result<(), SurfaceError>;

    /// Add a line layer, directly below `before` when given, otherwise on top.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::DuplicateLayer`],
    /// [`SurfaceError::SourceNotFound`] or [`SurfaceError::AnchorNotFound`].
    fn add_layer(&mut self, layer: LineLayer, before: Option<&str>) -> Result<(), SurfaceError>;

    /// Remove a layer.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::LayerNotFound`] for an unknown `id`.
    fn remove_layer(&mut self, id: &str) -> Result<(), SurfaceError>;
}

//! Test-only, in-memory `MapSurface` implementation used by unit and
//! behaviour tests.

use std::collections::{BTreeMap, HashMap};

use geo::Coord;

use crate::{
    Camera, ClickHandler, FeatureCollection, LineLayer, MapSurface, MarkerId, MarkerStyle,
    SurfaceError,
};

/// A marker as placed on a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedMarker {
    /// Marker position.
    pub location: Coord<f64>,
    /// Style the marker was created with.
    pub style: MarkerStyle,
}

#[derive(Debug, Clone, PartialEq)]
enum LayerEntry {
    /// A layer supplied by the base style, such as `SharedUse`.
    Base(String),
    Line(LineLayer),
}

impl LayerEntry {
    fn id(&self) -> &str {
        match self {
            Self::Base(id) => id,
            Self::Line(layer) => &layer.id,
        }
    }
}

/// In-memory map surface that records every drawing call.
///
/// Layers are stored bottom first. Removing anything that does not exist
/// returns an error, as Mapbox-style map widgets do.
///
/// # Examples
/// ```
/// use bikeway_core::{Color, MapSurface, MarkerStyle, test_support::RecordingSurface};
/// use geo::Coord;
///
/// let mut surface = RecordingSurface::with_base_layers(["SharedUse"]);
/// let style = MarkerStyle { color: Color::from("gray"), scale: 0.5 };
/// let marker = surface.add_marker(Coord { x: 13.4, y: 52.5 }, &style);
///
/// assert_eq!(surface.marker_count(), 1);
/// assert!(surface.remove_marker(marker).is_ok());
/// assert!(surface.remove_marker(marker).is_err());
/// assert_eq!(surface.layer_ids(), vec!["SharedUse"]);
/// ```
#[derive(Default)]
pub struct RecordingSurface {
    next_marker: u64,
    markers: BTreeMap<MarkerId, PlacedMarker>,
    handlers: HashMap<MarkerId, ClickHandler>,
    sources: BTreeMap<String, FeatureCollection>,
    layers: Vec<LayerEntry>,
    flights: Vec<Coord<f64>>,
}

impl std::fmt::Debug for RecordingSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingSurface")
            .field("markers", &self.markers)
            .field("handlers", &self.handlers.len())
            .field("sources", &self.sources.keys().collect::<Vec<_>>())
            .field("layers", &self.layer_ids())
            .field("flights", &self.flights)
            .finish_non_exhaustive()
    }
}

impl RecordingSurface {
    /// Create an empty surface without base layers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a surface whose style already contains the given layers,
    /// bottom first.
    #[must_use]
    pub fn with_base_layers<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            layers: ids
                .into_iter()
                .map(|id| LayerEntry::Base(id.into()))
                .collect(),
            ..Self::default()
        }
    }

    /// Look up a placed marker.
    #[must_use]
    pub fn marker(&self, marker: MarkerId) -> Option<&PlacedMarker> {
        self.markers.get(&marker)
    }

    /// Iterate over live markers in creation order.
    pub fn markers(&self) -> impl Iterator<Item = (MarkerId, &PlacedMarker)> {
        self.markers.iter().map(|(id, placed)| (*id, placed))
    }

    /// Number of live markers.
    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Report whether a click handler is attached to the marker.
    #[must_use]
    pub fn has_click_handler(&self, marker: MarkerId) -> bool {
        self.handlers.contains_key(&marker)
    }

    /// Number of attached click handlers.
    #[must_use]
    pub fn click_handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Simulate a click on a marker.
    ///
    /// Clicking a marker without a handler does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::MarkerNotFound`] when the marker is not placed.
    pub fn click(&mut self, marker: MarkerId) -> Result<(), SurfaceError> {
        if !self.markers.contains_key(&marker) {
            return Err(SurfaceError::MarkerNotFound { marker });
        }
        let Some(mut handler) = self.handlers.remove(&marker) else {
            return Ok(());
        };
        let camera: &mut dyn Camera = &mut *self;
        handler(camera);
        self.handlers.insert(marker, handler);
        Ok(())
    }

    /// Look up a source's data.
    #[must_use]
    pub fn source(&self, id: &str) -> Option<&FeatureCollection> {
        self.sources.get(id)
    }

    /// Number of registered sources.
    #[must_use]
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Look up a line layer.
    #[must_use]
    pub fn layer(&self, id: &str) -> Option<&LineLayer> {
        self.layers.iter().find_map(|entry| match entry {
            LayerEntry::Line(layer) if layer.id == id => Some(layer),
            _ => None,
        })
    }

    /// Layer identifiers in draw order, bottom first.
    #[must_use]
    pub fn layer_ids(&self) -> Vec<&str> {
        self.layers.iter().map(LayerEntry::id).collect()
    }

    /// Centres passed to [`Camera::fly_to`], oldest first.
    #[must_use]
    pub fn flights(&self) -> &[Coord<f64>] {
        &self.flights
    }

    /// Current view centre, if the view has been moved.
    #[must_use]
    pub fn center(&self) -> Option<Coord<f64>> {
        self.flights.last().copied()
    }

    fn layer_position(&self, id: &str) -> Option<usize> {
        self.layers.iter().position(|entry| entry.id() == id)
    }
}

impl Camera for RecordingSurface {
    fn fly_to(&mut self, center: Coord<f64>) {
        self.flights.push(center);
    }
}

impl MapSurface for RecordingSurface {
    fn add_marker(&mut self, location: Coord<f64>, style: &MarkerStyle) -> MarkerId {
        let marker = MarkerId::new(self.next_marker);
        self.next_marker += 1;
        self.markers.insert(
            marker,
            PlacedMarker {
                location,
                style: style.clone(),
            },
        );
        marker
    }

    fn remove_marker(&mut self, marker: MarkerId) -> Result<(), SurfaceError> {
        self.handlers.remove(&marker);
        self.markers
            .remove(&marker)
            .map(|_| ())
            .ok_or(SurfaceError::MarkerNotFound { marker })
    }

    fn on_marker_click(
        &mut self,
        marker: MarkerId,
        handler: ClickHandler,
    ) -> Result<(), SurfaceError> {
        if !self.markers.contains_key(&marker) {
            return Err(SurfaceError::MarkerNotFound { marker });
        }
        self.handlers.insert(marker, handler);
        Ok(())
    }

    fn add_source(&mut self, id: &str, data: FeatureCollection) -> Result<(), SurfaceError> {
        if self.sources.contains_key(id) {
            return Err(SurfaceError::DuplicateSource { id: id.to_owned() });
        }
        self.sources.insert(id.to_owned(), data);
        Ok(())
    }

    fn remove_source(&mut self, id: &str) -> Result<(), SurfaceError> {
        let user = self.layers.iter().find_map(|entry| match entry {
            LayerEntry::Line(layer) if layer.source == id => Some(layer.id.clone()),
            LayerEntry::Line(_) | LayerEntry::Base(_) => None,
        });
        if let Some(layer_id) = user {
            return Err(SurfaceError::SourceInUse {
                source_id: id.to_owned(),
                layer_id,
            });
        }
        self.sources
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| SurfaceError::SourceNotFound { id: id.to_owned() })
    }

    fn add_layer(&mut self, layer: LineLayer, before: Option<&str>) -> Result<(), SurfaceError> {
        if self.layer_position(&layer.id).is_some() {
            return Err(SurfaceError::DuplicateLayer { id: layer.id });
        }
        if !self.sources.contains_key(&layer.source) {
            return Err(SurfaceError::SourceNotFound { id: layer.source });
        }
        let index = match before {
            Some(anchor) => self
                .layer_position(anchor)
                .ok_or_else(|| SurfaceError::AnchorNotFound {
                    before: anchor.to_owned(),
                })?,
            None => self.layers.len(),
        };
        self.layers.insert(index, LayerEntry::Line(layer));
        Ok(())
    }

    fn remove_layer(&mut self, id: &str) -> Result<(), SurfaceError> {
        let index = self
            .layer_position(id)
            .ok_or_else(|| SurfaceError::LayerNotFound { id: id.to_owned() })?;
        self.layers.remove(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, LinePaint};
    use rstest::{fixture, rstest};

    fn line(id: &str, source: &str) -> LineLayer {
        LineLayer {
            id: id.to_owned(),
            source: source.to_owned(),
            paint: LinePaint {
                color: Color::from("red"),
                width: 1.0,
                opacity: 1.0,
            },
        }
    }

    #[fixture]
    fn surface() -> RecordingSurface {
        RecordingSurface::with_base_layers(["background", "SharedUse"])
    }

    #[rstest]
    fn anchored_layers_stack_below_anchor(mut surface: RecordingSurface) {
        surface
            .add_source("a", FeatureCollection::default())
            .expect("add source");
        surface.add_layer(line("one", "a"), Some("SharedUse")).expect("first");
        surface.add_layer(line("two", "a"), Some("SharedUse")).expect("second");
        assert_eq!(
            surface.layer_ids(),
            vec!["background", "one", "two", "SharedUse"]
        );
    }

    #[rstest]
    fn unanchored_layer_goes_on_top(mut surface: RecordingSurface) {
        surface
            .add_source("a", FeatureCollection::default())
            .expect("add source");
        surface.add_layer(line("top", "a"), None).expect("add layer");
        assert_eq!(surface.layer_ids().last(), Some(&"top"));
    }

    #[rstest]
    fn missing_anchor_is_rejected(mut surface: RecordingSurface) {
        surface
            .add_source("a", FeatureCollection::default())
            .expect("add source");
        let err = surface
            .add_layer(line("one", "a"), Some("Nowhere"))
            .expect_err("anchor missing");
        assert_eq!(
            err,
            SurfaceError::AnchorNotFound {
                before: "Nowhere".to_owned()
            }
        );
    }

    #[rstest]
    fn source_in_use_cannot_be_removed(mut surface: RecordingSurface) {
        surface
            .add_source("a", FeatureCollection::default())
            .expect("add source");
        surface.add_layer(line("one", "a"), None).expect("add layer");
        assert!(matches!(
            surface.remove_source("a"),
            Err(SurfaceError::SourceInUse { .. })
        ));
        surface.remove_layer("one").expect("remove layer");
        surface.remove_source("a").expect("remove source");
        assert_eq!(surface.source_count(), 0);
    }

    #[rstest]
    fn duplicate_source_is_rejected(mut surface: RecordingSurface) {
        surface
            .add_source("a", FeatureCollection::default())
            .expect("add source");
        assert!(matches!(
            surface.add_source("a", FeatureCollection::default()),
            Err(SurfaceError::DuplicateSource { .. })
        ));
    }

    #[rstest]
    fn click_runs_handler_and_removal_drops_it(mut surface: RecordingSurface) {
        let style = MarkerStyle {
            color: Color::from("gray"),
            scale: 0.5,
        };
        let at = Coord { x: 2.0, y: 1.0 };
        let marker = surface.add_marker(at, &style);
        let handler: ClickHandler = Box::new(move |camera: &mut dyn Camera| camera.fly_to(at));
        surface
            .on_marker_click(marker, handler)
            .expect("attach handler");
        surface.click(marker).expect("click");
        surface.click(marker).expect("click again");
        assert_eq!(surface.flights(), &[at, at]);

        surface.remove_marker(marker).expect("remove marker");
        assert!(!surface.has_click_handler(marker));
        assert!(surface.click(marker).is_err());
    }
}

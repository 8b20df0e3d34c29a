//! Bicycle-parking markers.
//!
//! [`MarkerRenderer`] derives a [`MarkerStyle`] from a record's tags and
//! places the marker on a [`MapSurface`]. Size follows the `capacity` tag;
//! colour follows [`PARKING_COLOR_RULES`]. Records without a `capacity` tag
//! keep the default colour and scale even when other rules would match.

mod capacity;
mod rules;

use geo::Coord;
use log::{debug, warn};

use bikeway_core::{Camera, Color, MapSurface, MarkerId, MarkerStyle, PointRecord};

use crate::config::{MarkerConfig, OverlayConfig};

pub use capacity::{capacity_scale, leading_integer};
pub use rules::{ColorRule, PARKING_COLOR_RULES, last_matching_rule};

/// Tag controlling marker size and enabling colour rules.
pub const CAPACITY_TAG: &str = "capacity";

/// A marker placed by [`MarkerRenderer`].
///
/// The caller owns the handle until it passes it to [`remove_markers`].
#[derive(Debug, PartialEq)]
pub struct MarkerHandle {
    id: MarkerId,
    location: Coord<f64>,
    record_id: Option<u64>,
}

impl MarkerHandle {
    /// Surface identifier of the marker.
    #[must_use]
    pub const fn id(&self) -> MarkerId {
        self.id
    }

    /// Position the marker was placed at.
    #[must_use]
    pub const fn location(&self) -> Coord<f64> {
        self.location
    }

    /// Identifier of the record the marker represents.
    #[must_use]
    pub const fn record_id(&self) -> Option<u64> {
        self.record_id
    }
}

/// Places styled markers for point records.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use bikeway_core::{PointRecord, Tags};
/// use bikeway_render::MarkerRenderer;
///
/// let renderer = MarkerRenderer::default();
/// let tags = Tags::from([
///     ("capacity".to_owned(), "15".to_owned()),
///     ("covered".to_owned(), "yes".to_owned()),
/// ]);
/// let style = renderer.style_for(&PointRecord::node(1, Coord { x: 0.0, y: 0.0 }, tags));
///
/// assert_eq!(style.color.as_str(), "green");
/// assert!((style.scale - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct MarkerRenderer {
    config: MarkerConfig,
    rules: Vec<ColorRule>,
    recenter_on_tap: bool,
}

impl Default for MarkerRenderer {
    fn default() -> Self {
        Self::new(MarkerConfig::default())
    }
}

impl MarkerRenderer {
    /// Create a renderer with the parking colour rules and no tap handling.
    #[must_use]
    pub fn new(config: MarkerConfig) -> Self {
        Self {
            config,
            rules: PARKING_COLOR_RULES.to_vec(),
            recenter_on_tap: false,
        }
    }

    /// Create a renderer from an overlay configuration.
    #[must_use]
    pub fn from_config(config: &OverlayConfig) -> Self {
        Self::new(config.markers.clone()).with_recenter_on_tap(config.recenter_on_tap)
    }

    /// Replace the colour rules. Rules are evaluated in iteration order and
    /// the last match wins.
    #[must_use]
    pub fn with_rules<I>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = ColorRule>,
    {
        self.rules = rules.into_iter().collect();
        self
    }

    /// Enable or disable re-centring the map when a marker is tapped.
    #[must_use]
    pub const fn with_recenter_on_tap(mut self, enabled: bool) -> Self {
        self.recenter_on_tap = enabled;
        self
    }

    /// Derive the marker style for a record.
    #[must_use]
    pub fn style_for(&self, record: &PointRecord) -> MarkerStyle {
        let mut style = MarkerStyle {
            color: self.config.default_color.clone(),
            scale: self.config.default_scale,
        };
        let Some(raw) = record.tag(CAPACITY_TAG) else {
            return style;
        };
        let capacity = leading_integer(raw);
        debug!(
            "record {:?}: capacity {raw:?} parsed as {capacity:?}",
            record.id
        );
        style.scale = capacity_scale(capacity, &self.config);
        if let Some(rule) = last_matching_rule(&self.rules, record) {
            style.color = Color::from(rule.color);
        }
        style
    }

    /// Place a marker for `record` and return its handle.
    ///
    /// With tap handling enabled, clicking the marker flies the view to the
    /// marker's position without changing the zoom.
    pub fn create<S>(&self, surface: &mut S, record: &PointRecord) -> MarkerHandle
    where
        S: MapSurface + ?Sized,
    {
        let style = self.style_for(record);
        let location = record.location();
        let id = surface.add_marker(location, &style);
        if self.recenter_on_tap {
            let attached = surface.on_marker_click(
                id,
                Box::new(move |camera: &mut dyn Camera| camera.fly_to(location)),
            );
            if let Err(err) = attached {
                warn!("marker {id} placed without tap handler: {err}");
            }
        }
        MarkerHandle {
            id,
            location,
            record_id: record.id,
        }
    }

    /// Place a marker for every node in `records`, keeping input order.
    ///
    /// Ways, relations and other element kinds are skipped.
    pub fn create_all_for_nodes<S>(
        &self,
        surface: &mut S,
        records: &[PointRecord],
    ) -> Vec<MarkerHandle>
    where
        S: MapSurface + ?Sized,
    {
        let handles: Vec<_> = records
            .iter()
            .filter(|record| record.is_node())
            .map(|record| self.create(&mut *surface, record))
            .collect();
        debug!(
            "placed {} markers for {} records",
            handles.len(),
            records.len()
        );
        handles
    }
}

/// Remove every marker in `handles` from the surface.
///
/// Markers that are already gone are skipped, so calling this twice with the
/// same handles is harmless.
pub fn remove_markers<S>(surface: &mut S, handles: &[MarkerHandle])
where
    S: MapSurface + ?Sized,
{
    for handle in handles {
        if let Err(err) = surface.remove_marker(handle.id) {
            debug!("skipping marker removal: {err}");
        }
    }
}

//! Street network overlays.
//!
//! Features are split into four categories by injected predicates and drawn
//! as line layers beneath an anchor layer of the base style. Layer and source
//! identifiers are fixed per category, so the overlay must be removed with
//! [`remove_street_layers`] before it is added again.
//!
//! Surface failures never reach the caller. They are logged and returned in
//! [`StreetLayerSummary`] or [`StreetLayerRemoval`].

mod category;
mod classify;

use log::{debug, info, warn};

use bikeway_core::{FeatureCollection, MapSurface, SurfaceError};

use crate::config::{DEFAULT_ANCHOR_LAYER, StreetConfig};

pub use category::StreetCategory;
pub use classify::{FeaturePredicate, StreetClassifiers};

/// Outcome of [`StreetLayerRenderer::add_layers`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreetLayerSummary {
    counts: Vec<(StreetCategory, usize)>,
    /// Surface errors that were logged and skipped.
    pub failures: Vec<SurfaceError>,
}

impl StreetLayerSummary {
    /// Number of features registered for `category`.
    #[must_use]
    pub fn count(&self, category: StreetCategory) -> usize {
        self.counts
            .iter()
            .find(|(c, _)| *c == category)
            .map_or(0, |(_, count)| *count)
    }

    /// Report whether every source and layer was added.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Outcome of [`remove_street_layers`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreetLayerRemoval {
    /// Layer and source identifiers that were removed.
    pub removed: Vec<&'static str>,
    /// Removal errors that were logged and ignored.
    pub failures: Vec<SurfaceError>,
}

impl StreetLayerRemoval {
    /// Report whether every layer and source was present and removed.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, id: &'static str, outcome: Result<(), SurfaceError>) {
        match outcome {
            Ok(()) => self.removed.push(id),
            Err(err) => {
                info!("not removing {id}: {err}");
                self.failures.push(err);
            }
        }
    }
}

/// Remove the four street layers, then their four sources.
///
/// Missing layers or sources are expected before the first
/// [`StreetLayerRenderer::add_layers`] call; each failure is logged as a
/// notice and the remaining removals still run.
pub fn remove_street_layers<S>(surface: &mut S) -> StreetLayerRemoval
where
    S: MapSurface + ?Sized,
{
    debug!("removing street layers and sources");
    let mut removal = StreetLayerRemoval::default();
    for category in StreetCategory::REMOVAL_ORDER {
        let id = category.layer_id();
        removal.record(id, surface.remove_layer(id));
    }
    for category in StreetCategory::REMOVAL_ORDER {
        let id = category.source_id();
        removal.record(id, surface.remove_source(id));
    }
    if !removal.is_clean() {
        info!(
            "street overlay partly absent: removed {}, skipped {}",
            removal.removed.len(),
            removal.failures.len()
        );
    }
    removal
}

/// Draws classified street features as line layers.
///
/// # Examples
/// ```
/// use bikeway_core::{Feature, FeatureCollection};
/// use bikeway_render::{StreetClassifiers, StreetLayerRenderer};
///
/// let classifiers = StreetClassifiers::new(
///     |_: &Feature| false,
///     |_: &Feature| false,
///     |_: &Feature| false,
///     |_: &Feature| false,
/// );
/// let renderer = StreetLayerRenderer::new(classifiers);
/// assert_eq!(renderer.anchor_layer(), "SharedUse");
/// ```
#[derive(Debug)]
pub struct StreetLayerRenderer {
    classifiers: StreetClassifiers,
    anchor: String,
}

impl StreetLayerRenderer {
    /// Create a renderer anchored below `SharedUse`.
    #[must_use]
    pub fn new(classifiers: StreetClassifiers) -> Self {
        Self {
            classifiers,
            anchor: DEFAULT_ANCHOR_LAYER.to_owned(),
        }
    }

    /// Create a renderer using the configured anchor layer.
    #[must_use]
    pub fn from_config(classifiers: StreetClassifiers, config: &StreetConfig) -> Self {
        Self::new(classifiers).with_anchor(config.anchor_layer.clone())
    }

    /// Insert layers below `anchor` instead.
    #[must_use]
    pub fn with_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchor = anchor.into();
        self
    }

    /// Layer the overlays are inserted below.
    #[must_use]
    pub fn anchor_layer(&self) -> &str {
        &self.anchor
    }

    /// Partition `collection` and draw one line layer per category.
    ///
    /// All four sources are registered first, then the four layers are added
    /// in [`StreetCategory::ALL`] order, each directly below the anchor.
    pub fn add_layers<S>(
        &self,
        surface: &mut S,
        collection: &FeatureCollection,
    ) -> StreetLayerSummary
    where
        S: MapSurface + ?Sized,
    {
        let subsets = self.classifiers.partition(collection);
        let counts: Vec<_> = subsets
            .iter()
            .map(|(category, subset)| (*category, subset.len()))
            .collect();
        let mut failures = Vec::new();

        for (category, subset) in subsets {
            debug!("{category} streets: {} features", subset.len());
            if let Err(err) = surface.add_source(category.source_id(), subset) {
                warn!("failed to add {category} street source: {err}");
                failures.push(err);
            }
        }
        for category in StreetCategory::ALL {
            if let Err(err) = surface.add_layer(category.line_layer(), Some(self.anchor.as_str())) {
                warn!("failed to add {category} street layer: {err}");
                failures.push(err);
            }
        }
        StreetLayerSummary { counts, failures }
    }
}

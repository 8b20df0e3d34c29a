//! Map overlay rendering for bicycle parking and street classifications.
//!
//! Two renderers issue drawing calls against a
//! [`MapSurface`](bikeway_core::MapSurface):
//! - [`MarkerRenderer`] places one marker per OSM node, sized by its
//!   `capacity` tag and coloured by an ordered list of [`ColorRule`]s.
//! - [`StreetLayerRenderer`] partitions a
//!   [`FeatureCollection`](bikeway_core::FeatureCollection) with injected
//!   [`StreetClassifiers`] and adds one line layer per [`StreetCategory`].
//!
//! Neither renderer returns errors. Surface failures are logged through the
//! `log` facade and, for street layers, reported in the returned summaries.
//!
//! # Examples
//!
//! ```no_run
//! use bikeway_core::{MapSurface, PointRecord};
//! use bikeway_render::{MarkerRenderer, OverlayConfig, remove_markers};
//!
//! fn refresh<S: MapSurface>(surface: &mut S, json: &str) -> Result<(), Box<dyn std::error::Error>> {
//!     let config = OverlayConfig::from_json(r#"{"recenter_on_tap": true}"#)?;
//!     let renderer = MarkerRenderer::from_config(&config);
//!     let records = PointRecord::from_overpass_json(json)?;
//!     let handles = renderer.create_all_for_nodes(surface, &records);
//!     remove_markers(surface, &handles);
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]

mod config;
pub mod marker;
pub mod streets;

pub use config::{ConfigError, DEFAULT_ANCHOR_LAYER, MarkerConfig, OverlayConfig, StreetConfig};
pub use marker::{ColorRule, MarkerHandle, MarkerRenderer, PARKING_COLOR_RULES, remove_markers};
pub use streets::{
    FeaturePredicate, StreetCategory, StreetClassifiers, StreetLayerRemoval, StreetLayerRenderer,
    StreetLayerSummary, remove_street_layers,
};

//! Facade crate for the bikeway map overlay.
//!
//! This crate re-exports the core domain types and both renderers. Enable the
//! `test-support` feature for the in-memory recording surface.

#![forbid(unsafe_code)]

pub use bikeway_core::{
    Camera, ClickHandler, Color, ElementKind, Feature, FeatureCollection, GeoJsonError, LineLayer,
    LinePaint, MapSurface, MarkerId, MarkerStyle, PointRecord, Properties, RecordError,
    SurfaceError, Tags,
};

#[cfg(feature = "test-support")]
pub use bikeway_core::test_support;

pub use bikeway_render::{
    ColorRule, ConfigError, FeaturePredicate, MarkerConfig, MarkerHandle, MarkerRenderer,
    OverlayConfig, PARKING_COLOR_RULES, StreetCategory, StreetClassifiers, StreetConfig,
    StreetLayerRemoval, StreetLayerRenderer, StreetLayerSummary, remove_markers,
    remove_street_layers,
};

//! Core domain types for the bikeway overlay.
//!
//! The crate models the inputs the renderer reads (Overpass point records and
//! classified street features), the styles it produces, and the
//! [`MapSurface`] seam through which every drawing call is issued. Embedders
//! implement [`MapSurface`] for their map widget; tests use the in-memory
//! `RecordingSurface` from the `test_support` module (feature
//! `test-support`).

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod feature;
pub mod record;
pub mod style;
pub mod surface;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use feature::{Feature, FeatureCollection, GeoJsonError, Properties};
pub use record::{ElementKind, PointRecord, RecordError, Tags};
pub use style::{Color, LineLayer, LinePaint, MarkerStyle};
pub use surface::{Camera, ClickHandler, MapSurface, MarkerId, SurfaceError};

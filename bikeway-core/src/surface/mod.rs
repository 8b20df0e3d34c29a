//! The map widget seam.
//!
//! [`MapSurface`] lists every drawing call the renderer issues. Sources and
//! layers are addressed by string identifiers owned by the surface; markers
//! are addressed by the [`MarkerId`] the surface hands out.
//!
//! Removal of a missing item returns an error rather than panicking, so
//! callers can treat "already gone" as a non-fatal outcome.

mod error;
mod map;

pub use error::SurfaceError;
pub use map::{Camera, ClickHandler, MapSurface, MarkerId};

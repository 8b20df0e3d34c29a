use thiserror::Error;

use super::MarkerId;

/// Errors from [`crate::surface::MapSurface`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    /// The marker was never added or has already been removed.
    #[error("marker {marker} does not exist")]
    MarkerNotFound {
        /// Marker that was addressed.
        marker: MarkerId,
    },
    /// No layer with this identifier exists.
    #[error("layer '{id}' does not exist")]
    LayerNotFound {
        /// Requested layer identifier.
        id: String,
    },
    /// No source with this identifier exists.
    #[error("source '{id}' does not exist")]
    SourceNotFound {
        /// Requested source identifier.
        id: String,
    },
    /// A layer with this identifier is already present.
    #[error("layer '{id}' already exists")]
    DuplicateLayer {
        /// Conflicting layer identifier.
        id: String,
    },
    /// A source with this identifier is already present.
    #[error("source '{id}' already exists")]
    DuplicateSource {
        /// Conflicting source identifier.
        id: String,
    },
    /// The source is still referenced by a layer.
    ///
    /// Remove the layer before its source.
    #[error("source '{source_id}' is still used by layer '{layer_id}'")]
    SourceInUse {
        /// Source that could not be removed.
        source_id: String,
        /// Layer still drawing the source.
        layer_id: String,
    },
    /// The layer named as the insertion anchor does not exist.
    #[error("anchor layer '{before}' does not exist")]
    AnchorNotFound {
        /// Requested anchor layer.
        before: String,
    },
}

//! The four street overlay categories and their fixed styling.

use bikeway_core::{Color, LineLayer, LinePaint};

/// Street overlay category.
///
/// # Examples
/// ```
/// use bikeway_render::StreetCategory;
///
/// let layer = StreetCategory::GreenRoad.line_layer();
/// assert_eq!(layer.id, "greenRoadsId");
/// assert_eq!(layer.source, "greenRoads");
/// assert_eq!(layer.paint.width, 7.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreetCategory {
    /// Streets unpleasant to cycle on.
    Red,
    /// Streets that are tolerable with care.
    Orange,
    /// Roads that are good for cycling.
    GreenRoad,
    /// Dedicated paths.
    GreenPath,
}

impl StreetCategory {
    /// Categories in the order their sources and layers are added.
    ///
    /// Each layer is inserted directly below the anchor, so later entries
    /// draw above earlier ones.
    pub const ALL: [Self; 4] = [Self::Red, Self::Orange, Self::GreenRoad, Self::GreenPath];

    /// Categories in the order their layers and sources are removed.
    pub const REMOVAL_ORDER: [Self; 4] = [Self::GreenRoad, Self::Red, Self::Orange, Self::GreenPath];

    /// Identifier of the category's geometry source.
    #[must_use]
    pub const fn source_id(self) -> &'static str {
        match self {
            Self::Red => "redRoads",
            Self::Orange => "orangeRoads",
            Self::GreenRoad => "greenRoads",
            Self::GreenPath => "greenPaths",
        }
    }

    /// Identifier of the category's line layer.
    #[must_use]
    pub const fn layer_id(self) -> &'static str {
        match self {
            Self::Red => "redRoadsId",
            Self::Orange => "orangeRoadsId",
            Self::GreenRoad => "greenRoadsId",
            Self::GreenPath => "greenPathsId",
        }
    }

    /// Stroke styling for the category.
    #[must_use]
    pub fn paint(self) -> LinePaint {
        let (color, width, opacity) = match self {
            Self::Red => ("red", 3.0, 0.3),
            Self::Orange => ("orange", 3.0, 0.5),
            Self::GreenRoad => ("#00FF00", 7.0, 0.8),
            Self::GreenPath => ("#00FF00", 1.0, 0.5),
        };
        LinePaint {
            color: Color::from(color),
            width,
            opacity,
        }
    }

    /// The category's complete line layer.
    #[must_use]
    pub fn line_layer(self) -> LineLayer {
        LineLayer {
            id: self.layer_id().to_owned(),
            source: self.source_id().to_owned(),
            paint: self.paint(),
        }
    }
}

impl std::fmt::Display for StreetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Red => "red",
            Self::Orange => "orange",
            Self::GreenRoad => "green-road",
            Self::GreenPath => "green-path",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;

    #[rstest]
    #[case(StreetCategory::Red, "red", 3.0, 0.3)]
    #[case(StreetCategory::Orange, "orange", 3.0, 0.5)]
    #[case(StreetCategory::GreenRoad, "#00FF00", 7.0, 0.8)]
    #[case(StreetCategory::GreenPath, "#00FF00", 1.0, 0.5)]
    fn paint_matches_category(
        #[case] category: StreetCategory,
        #[case] color: &str,
        #[case] width: f64,
        #[case] opacity: f64,
    ) {
        let paint = category.paint();
        assert_eq!(paint.color.as_str(), color);
        assert_eq!(paint.width, width);
        assert_eq!(paint.opacity, opacity);
    }

    #[rstest]
    fn identifiers_are_unique() {
        let ids: HashSet<_> = StreetCategory::ALL
            .iter()
            .flat_map(|c| [c.source_id(), c.layer_id()])
            .collect();
        assert_eq!(ids.len(), 8);
    }

    #[rstest]
    fn removal_order_covers_every_category() {
        let removal: HashSet<_> = StreetCategory::REMOVAL_ORDER.into_iter().collect();
        let all: HashSet<_> = StreetCategory::ALL.into_iter().collect();
        assert_eq!(removal, all);
    }
}

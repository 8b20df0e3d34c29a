//! GeoJSON encoding for [`Feature`] and [`FeatureCollection`].
//!
//! Geometries map onto the seven RFC 7946 geometry objects. `Line`, `Rect`
//! and `Triangle` have no GeoJSON counterpart and are written as a
//! `LineString` or `Polygon`. Positions with an altitude are accepted and the
//! altitude is dropped.

use geo::{
    Coord, Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon,
    Point, Polygon,
};
use log::warn;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use thiserror::Error;

use super::{Feature, FeatureCollection, Properties};

/// Errors returned by [`FeatureCollection::from_geojson`].
#[derive(Debug, Error)]
pub enum GeoJsonError {
    /// The text is not a GeoJSON `FeatureCollection`.
    #[error("failed to decode GeoJSON feature collection: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
#[error("a position needs a longitude and a latitude, got {0} numbers")]
struct ShortPosition(usize);

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "[f64; 2]")]
struct Position(Coord<f64>);

impl TryFrom<Vec<f64>> for Position {
    type Error = ShortPosition;

    fn try_from(numbers: Vec<f64>) -> Result<Self, Self::Error> {
        match numbers.as_slice() {
            [x, y, ..] => Ok(Self(Coord { x: *x, y: *y })),
            _ => Err(ShortPosition(numbers.len())),
        }
    }
}

impl From<Position> for [f64; 2] {
    fn from(Position(coord): Position) -> Self {
        [coord.x, coord.y]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
enum GeometryDocument {
    Point {
        coordinates: Position,
    },
    MultiPoint {
        coordinates: Vec<Position>,
    },
    LineString {
        coordinates: Vec<Position>,
    },
    MultiLineString {
        coordinates: Vec<Vec<Position>>,
    },
    Polygon {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Position>>>,
    },
    GeometryCollection {
        geometries: Vec<GeometryDocument>,
    },
}

fn positions(line: &LineString<f64>) -> Vec<Position> {
    line.coords().copied().map(Position).collect()
}

fn rings(polygon: &Polygon<f64>) -> Vec<Vec<Position>> {
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(positions)
        .collect()
}

fn line_string(coordinates: Vec<Position>) -> LineString<f64> {
    coordinates
        .into_iter()
        .map(|Position(coord)| coord)
        .collect()
}

fn polygon(coordinates: Vec<Vec<Position>>) -> Polygon<f64> {
    let mut ring_lines = coordinates.into_iter().map(line_string);
    let exterior = ring_lines
        .next()
        .unwrap_or_else(|| LineString::new(Vec::new()));
    Polygon::new(exterior, ring_lines.collect())
}

impl From<&Geometry<f64>> for GeometryDocument {
    fn from(geometry: &Geometry<f64>) -> Self {
        match geometry {
            Geometry::Point(point) => Self::Point {
                coordinates: Position(point.0),
            },
            Geometry::Line(line) => Self::LineString {
                coordinates: vec![Position(line.start), Position(line.end)],
            },
            Geometry::LineString(line) => Self::LineString {
                coordinates: positions(line),
            },
            Geometry::Polygon(shape) => Self::Polygon {
                coordinates: rings(shape),
            },
            Geometry::MultiPoint(points) => Self::MultiPoint {
                coordinates: points.iter().map(|point| Position(point.0)).collect(),
            },
            Geometry::MultiLineString(lines) => Self::MultiLineString {
                coordinates: lines.iter().map(positions).collect(),
            },
            Geometry::MultiPolygon(shapes) => Self::MultiPolygon {
                coordinates: shapes.iter().map(rings).collect(),
            },
            Geometry::GeometryCollection(members) => Self::GeometryCollection {
                geometries: members.iter().map(Self::from).collect(),
            },
            Geometry::Rect(rect) => Self::Polygon {
                coordinates: rings(&rect.to_polygon()),
            },
            Geometry::Triangle(triangle) => Self::Polygon {
                coordinates: rings(&triangle.to_polygon()),
            },
        }
    }
}

impl From<GeometryDocument> for Geometry<f64> {
    fn from(document: GeometryDocument) -> Self {
        match document {
            GeometryDocument::Point {
                coordinates: Position(coord),
            } => Self::Point(Point(coord)),
            GeometryDocument::MultiPoint { coordinates } => Self::MultiPoint(MultiPoint(
                coordinates
                    .into_iter()
                    .map(|Position(coord)| Point(coord))
                    .collect(),
            )),
            GeometryDocument::LineString { coordinates } => {
                Self::LineString(line_string(coordinates))
            }
            GeometryDocument::MultiLineString { coordinates } => Self::MultiLineString(
                MultiLineString(coordinates.into_iter().map(line_string).collect()),
            ),
            GeometryDocument::Polygon { coordinates } => Self::Polygon(polygon(coordinates)),
            GeometryDocument::MultiPolygon { coordinates } => Self::MultiPolygon(MultiPolygon(
                coordinates.into_iter().map(polygon).collect(),
            )),
            GeometryDocument::GeometryCollection { geometries } => Self::GeometryCollection(
                GeometryCollection(geometries.into_iter().map(Self::from).collect()),
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
enum FeatureTag {
    Feature,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
enum CollectionTag {
    FeatureCollection,
}

#[derive(Serialize)]
struct FeatureOut<'a> {
    #[serde(rename = "type")]
    kind: FeatureTag,
    geometry: GeometryDocument,
    properties: &'a Properties,
}

impl<'a> From<&'a Feature> for FeatureOut<'a> {
    fn from(feature: &'a Feature) -> Self {
        Self {
            kind: FeatureTag::Feature,
            geometry: GeometryDocument::from(&feature.geometry),
            properties: &feature.properties,
        }
    }
}

#[derive(Deserialize)]
struct FeatureIn {
    #[serde(rename = "type")]
    _kind: FeatureTag,
    geometry: Option<GeometryDocument>,
    properties: Option<Properties>,
}

impl FeatureIn {
    fn into_feature(self) -> Option<Feature> {
        let geometry = self.geometry?;
        Some(Feature {
            geometry: geometry.into(),
            properties: self.properties.unwrap_or_default(),
        })
    }
}

#[derive(Serialize)]
struct CollectionOut<'a> {
    #[serde(rename = "type")]
    kind: CollectionTag,
    features: Vec<FeatureOut<'a>>,
}

#[derive(Deserialize)]
struct CollectionIn {
    #[serde(rename = "type")]
    _kind: CollectionTag,
    features: Vec<FeatureIn>,
}

impl Serialize for Feature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        FeatureOut::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Feature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        FeatureIn::deserialize(deserializer)?
            .into_feature()
            .ok_or_else(|| de::Error::custom("feature has no geometry"))
    }
}

impl Serialize for FeatureCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        CollectionOut {
            kind: CollectionTag::FeatureCollection,
            features: self.iter().map(FeatureOut::from).collect(),
        }
        .serialize(serializer)
    }
}

/// Features with a `null` geometry are skipped with a warning.
impl<'de> Deserialize<'de> for FeatureCollection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let document = CollectionIn::deserialize(deserializer)?;
        let total = document.features.len();
        let collection: Self = document
            .features
            .into_iter()
            .filter_map(FeatureIn::into_feature)
            .collect();
        if collection.len() < total {
            warn!(
                "skipped {} of {total} GeoJSON features without geometry",
                total - collection.len()
            );
        }
        Ok(collection)
    }
}

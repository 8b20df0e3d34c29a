//! Point records as returned by the Overpass API.
//!
//! Only the fields the renderer reads are modelled. Coordinates are WGS84 and
//! are passed through without validation. Ways and relations carry a position
//! only when the query asked for one (`out center`); without it they are
//! skipped while decoding.

use std::collections::HashMap;

use geo::Coord;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// OpenStreetMap-style tags keyed by tag name.
pub type Tags = HashMap<String, String>;

/// The OSM element type carried in the Overpass `type` field.
///
/// # Examples
/// ```
/// use bikeway_core::ElementKind;
///
/// assert_eq!(ElementKind::from("node".to_owned()), ElementKind::Node);
/// assert_eq!(ElementKind::from("area".to_owned()).as_str(), "area");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ElementKind {
    /// A single point.
    Node,
    /// An ordered list of nodes.
    Way,
    /// A grouping of other elements.
    Relation,
    /// Any other type string, kept verbatim.
    Other(String),
}

impl ElementKind {
    /// Return the type string as it appears in Overpass output.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Node => "node",
            Self::Way => "way",
            Self::Relation => "relation",
            Self::Other(kind) => kind,
        }
    }
}

impl From<String> for ElementKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "node" => Self::Node,
            "way" => Self::Way,
            "relation" => Self::Relation,
            _ => Self::Other(kind),
        }
    }
}

impl From<ElementKind> for String {
    fn from(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Other(other) => other,
            known => known.as_str().to_owned(),
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A point-like Overpass element.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use bikeway_core::{ElementKind, PointRecord, Tags};
///
/// let tags = Tags::from([("capacity".to_owned(), "12".to_owned())]);
/// let record = PointRecord::node(7, Coord { x: 13.4, y: 52.5 }, tags);
///
/// assert_eq!(record.kind, ElementKind::Node);
/// assert_eq!(record.tag("capacity"), Some("12"));
/// assert_eq!(record.location(), Coord { x: 13.4, y: 52.5 });
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    /// OSM identifier, when supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Element type.
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Free-form tags; Overpass omits the field for untagged elements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
}

/// Errors returned by [`PointRecord::from_overpass_json`].
#[derive(Debug, Error)]
pub enum RecordError {
    /// The payload is not valid JSON.
    #[error("failed to decode Overpass JSON: {0}")]
    Decode(#[from] serde_json::Error),
    /// The payload is neither a response object with an `elements` array nor
    /// a bare element array.
    #[error("expected an Overpass response object or an element array")]
    UnexpectedShape,
    /// An element has missing or mistyped fields.
    #[error("Overpass element {index} is malformed: {source}")]
    Element {
        /// Position of the element in the `elements` array.
        index: usize,
        /// Field-level decoding error.
        source: serde_json::Error,
    },
    /// A node carries no `lat`/`lon` pair.
    #[error("Overpass node {index} has no coordinates")]
    MissingCoordinates {
        /// Position of the element in the `elements` array.
        index: usize,
    },
}

/// One element as Overpass emits it, before coordinates are resolved.
#[derive(Deserialize)]
struct RawElement {
    id: Option<u64>,
    #[serde(rename = "type")]
    kind: ElementKind,
    lat: Option<f64>,
    lon: Option<f64>,
    center: Option<RawCenter>,
    tags: Option<Tags>,
}

#[derive(Deserialize)]
struct RawCenter {
    lat: f64,
    lon: f64,
}

impl RawElement {
    /// Resolve the element position; `Ok(None)` drops a non-node without one.
    fn into_record(self, index: usize) -> Result<Option<PointRecord>, RecordError> {
        let position = match (self.lat, self.lon, self.center) {
            (Some(lat), Some(lon), _) => Some((lat, lon)),
            (_, _, Some(center)) => Some((center.lat, center.lon)),
            _ => None,
        };
        let Some((lat, lon)) = position else {
            if self.kind == ElementKind::Node {
                return Err(RecordError::MissingCoordinates { index });
            }
            warn!(
                "skipping Overpass {} {:?} at {index}: no coordinates",
                self.kind, self.id
            );
            return Ok(None);
        };
        Ok(Some(PointRecord {
            id: self.id,
            kind: self.kind,
            lat,
            lon,
            tags: self.tags,
        }))
    }
}

fn element_array(payload: Value) -> Result<Vec<Value>, RecordError> {
    match payload {
        Value::Array(elements) => Ok(elements),
        Value::Object(mut response) => match response.remove("elements") {
            Some(Value::Array(elements)) => Ok(elements),
            _ => Err(RecordError::UnexpectedShape),
        },
        _ => Err(RecordError::UnexpectedShape),
    }
}

impl PointRecord {
    /// Construct a record of any kind.
    #[must_use]
    pub const fn new(
        id: Option<u64>,
        kind: ElementKind,
        location: Coord<f64>,
        tags: Option<Tags>,
    ) -> Self {
        Self {
            id,
            kind,
            lat: location.y,
            lon: location.x,
            tags,
        }
    }

    /// Construct a tagged node.
    #[must_use]
    pub const fn node(id: u64, location: Coord<f64>, tags: Tags) -> Self {
        Self::new(Some(id), ElementKind::Node, location, Some(tags))
    }

    /// Construct a node without a `tags` field.
    #[must_use]
    pub const fn untagged_node(id: u64, location: Coord<f64>) -> Self {
        Self::new(Some(id), ElementKind::Node, location, None)
    }

    /// Report whether the record is an OSM node.
    #[must_use]
    pub fn is_node(&self) -> bool {
        self.kind == ElementKind::Node
    }

    /// Position with `x = longitude` and `y = latitude`.
    #[must_use]
    pub const fn location(&self) -> Coord<f64> {
        Coord {
            x: self.lon,
            y: self.lat,
        }
    }

    /// Look up a tag value.
    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .as_ref()
            .and_then(|tags| tags.get(key))
            .map(String::as_str)
    }

    /// Decode records from Overpass JSON.
    ///
    /// Accepts either a full response (`{"elements": [...]}`) or a bare array
    /// of elements. Each element needs a `type`. Its position comes from
    /// `lat`/`lon`, falling back to `center` for ways and relations queried
    /// with `out center`. Ways and relations with neither are skipped.
    ///
    /// # Errors
    ///
    /// - [`RecordError::Decode`] when the text is not JSON, with its line and
    ///   column.
    /// - [`RecordError::UnexpectedShape`] when no element array is found.
    /// - [`RecordError::Element`] when an element has a mistyped field.
    /// - [`RecordError::MissingCoordinates`] when a node has no position.
    ///
    /// # Examples
    /// ```
    /// use bikeway_core::PointRecord;
    ///
    /// let json = r#"{"elements":[
    ///     {"type":"node","id":1,"lat":52.5,"lon":13.4},
    ///     {"type":"way","id":2,"nodes":[1,3]}
    /// ]}"#;
    /// let records = PointRecord::from_overpass_json(json)?;
    /// assert_eq!(records.len(), 1);
    /// assert!(records[0].tags.is_none());
    /// # Ok::<(), bikeway_core::RecordError>(())
    /// ```
    pub fn from_overpass_json(json: &str) -> Result<Vec<Self>, RecordError> {
        let elements = element_array(serde_json::from_str(json)?)?;
        let total = elements.len();
        let mut records = Vec::with_capacity(total);
        for (index, element) in elements.into_iter().enumerate() {
            let raw: RawElement = serde_json::from_value(element)
                .map_err(|source| RecordError::Element { index, source })?;
            if let Some(record) = raw.into_record(index)? {
                records.push(record);
            }
        }
        debug!("decoded {} of {total} Overpass elements", records.len());
        Ok(records)
    }
}

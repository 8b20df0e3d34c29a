//! Street features awaiting classification.
//!
//! A [`FeatureCollection`] is an ordered list of geometries with GeoJSON-style
//! properties. Classification happens outside this crate; the collection only
//! offers order-preserving filtering and conversion to and from GeoJSON.

mod geojson;

use geo::Geometry;
use serde_json::{Value, json};

pub use geojson::GeoJsonError;

/// GeoJSON-style feature properties.
pub type Properties = serde_json::Map<String, Value>;

/// A single geometry with its properties.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Feature geometry in WGS84 (`x = longitude`).
    pub geometry: Geometry<f64>,
    /// Arbitrary properties, typically the OSM tags of a way.
    pub properties: Properties,
}

impl Feature {
    /// Construct a feature from any geometry type.
    ///
    /// # Examples
    /// ```
    /// use geo::{LineString, coord};
    /// use bikeway_core::{Feature, Properties};
    ///
    /// let line = LineString::new(vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 1.0 }]);
    /// let mut properties = Properties::new();
    /// properties.insert("highway".to_owned(), "cycleway".into());
    ///
    /// let feature = Feature::new(line, properties);
    /// assert_eq!(feature.property_str("highway"), Some("cycleway"));
    /// ```
    #[must_use]
    pub fn new(geometry: impl Into<Geometry<f64>>, properties: Properties) -> Self {
        Self {
            geometry: geometry.into(),
            properties,
        }
    }

    /// Look up a raw property value.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Look up a property holding a string.
    #[must_use]
    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.property(key).and_then(Value::as_str)
    }
}

/// Ordered sequence of features.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureCollection {
    /// Features in input order.
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Wrap a list of features.
    #[must_use]
    pub const fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    /// Number of features.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.features.len()
    }

    /// Report whether the collection holds no features.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Iterate over the features in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Feature> {
        self.features.iter()
    }

    /// Decode a GeoJSON `FeatureCollection` document.
    ///
    /// Features whose geometry is `null` are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`GeoJsonError::Decode`] when the text is not a GeoJSON
    /// feature collection, carrying the `serde_json` line and column.
    pub fn from_geojson(json: &str) -> Result<Self, GeoJsonError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode the collection as a GeoJSON `FeatureCollection` object.
    #[must_use]
    pub fn to_geojson(&self) -> Value {
        json!(self)
    }

    /// Wrap the collection as a `geojson` map source.
    ///
    /// # Examples
    /// ```
    /// use geo::{LineString, coord};
    /// use bikeway_core::{Feature, FeatureCollection, Properties};
    ///
    /// let line = LineString::new(vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 1.0 }]);
    /// let collection: FeatureCollection =
    ///     std::iter::once(Feature::new(line, Properties::new())).collect();
    ///
    /// let source = collection.to_source_json();
    /// assert_eq!(source["type"], "geojson");
    /// assert_eq!(source["data"]["features"][0]["geometry"]["type"], "LineString");
    /// ```
    #[must_use]
    pub fn to_source_json(&self) -> Value {
        json!({
            "type": "geojson",
            "data": self,
        })
    }

    /// Clone the features matching `predicate` into a new collection.
    ///
    /// Input order is preserved.
    #[must_use]
    pub fn filtered<P>(&self, predicate: P) -> Self
    where
        P: Fn(&Feature) -> bool,
    {
        self.iter()
            .filter(|feature| predicate(*feature))
            .cloned()
            .collect()
    }
}

impl FromIterator<Feature> for FeatureCollection {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a FeatureCollection {
    type Item = &'a Feature;
    type IntoIter = std::slice::Iter<'a, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Point, coord};
    use rstest::{fixture, rstest};

    fn feature(highway: &str, index: u32) -> Feature {
        let mut properties = Properties::new();
        properties.insert("highway".to_owned(), highway.into());
        properties.insert("index".to_owned(), index.into());
        Feature::new(Point(coord! { x: 0.0, y: 0.0 }), properties)
    }

    #[fixture]
    fn mixed() -> FeatureCollection {
        ["primary", "cycleway", "primary", "footway"]
            .into_iter()
            .zip(0..)
            .map(|(highway, index)| feature(highway, index))
            .collect()
    }

    #[rstest]
    fn filtered_preserves_order(mixed: FeatureCollection) {
        let primaries = mixed.filtered(|f| f.property_str("highway") == Some("primary"));
        let indices: Vec<_> = primaries
            .iter()
            .filter_map(|f| f.property("index").and_then(Value::as_u64))
            .collect();
        assert_eq!(indices, vec![0, 2]);
        assert_eq!(mixed.len(), 4);
    }

    #[rstest]
    fn filtered_may_be_empty(mixed: FeatureCollection) {
        assert!(mixed.filtered(|_| false).is_empty());
    }

    #[rstest]
    fn non_string_properties_are_not_strings(mixed: FeatureCollection) {
        let first = mixed.iter().next().expect("first feature");
        assert_eq!(first.property_str("index"), None);
    }
}

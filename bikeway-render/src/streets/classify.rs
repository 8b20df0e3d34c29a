//! Injected street classifiers.

use bikeway_core::{Feature, FeatureCollection};

use super::StreetCategory;

/// Decides whether a feature belongs to a category.
///
/// Implementations must be side-effect free and must not panic. Any
/// `Fn(&Feature) -> bool` qualifies.
pub trait FeaturePredicate {
    /// Report whether `feature` matches.
    fn matches(&self, feature: &Feature) -> bool;
}

impl<F> FeaturePredicate for F
where
    F: Fn(&Feature) -> bool,
{
    fn matches(&self, feature: &Feature) -> bool {
        self(feature)
    }
}

/// One predicate per [`StreetCategory`].
///
/// The predicates are not required to be mutually exclusive; a feature that
/// matches several categories is drawn in each of them.
///
/// # Examples
/// ```
/// use bikeway_core::{Feature, FeatureCollection};
/// use bikeway_render::{StreetCategory, StreetClassifiers};
///
/// fn highway_is(feature: &Feature, value: &str) -> bool {
///     feature.property_str("highway") == Some(value)
/// }
///
/// let classifiers = StreetClassifiers::new(
///     |f: &Feature| highway_is(f, "primary"),
///     |f: &Feature| highway_is(f, "secondary"),
///     |f: &Feature| highway_is(f, "residential"),
///     |f: &Feature| highway_is(f, "cycleway"),
/// );
/// let parts = classifiers.partition(&FeatureCollection::default());
/// assert_eq!(parts.len(), 4);
/// assert_eq!(parts[0].0, StreetCategory::Red);
/// ```
pub struct StreetClassifiers {
    red: Box<dyn FeaturePredicate>,
    orange: Box<dyn FeaturePredicate>,
    green_road: Box<dyn FeaturePredicate>,
    green_path: Box<dyn FeaturePredicate>,
}

impl std::fmt::Debug for StreetClassifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreetClassifiers").finish_non_exhaustive()
    }
}

impl StreetClassifiers {
    /// Bundle the four category predicates.
    pub fn new<R, O, G, P>(red: R, orange: O, green_road: G, green_path: P) -> Self
    where
        R: FeaturePredicate + 'static,
        O: FeaturePredicate + 'static,
        G: FeaturePredicate + 'static,
        P: FeaturePredicate + 'static,
    {
        Self {
            red: Box::new(red),
            orange: Box::new(orange),
            green_road: Box::new(green_road),
            green_path: Box::new(green_path),
        }
    }

    /// Predicate for a category.
    #[must_use]
    pub fn predicate(&self, category: StreetCategory) -> &dyn FeaturePredicate {
        match category {
            StreetCategory::Red => self.red.as_ref(),
            StreetCategory::Orange => self.orange.as_ref(),
            StreetCategory::GreenRoad => self.green_road.as_ref(),
            StreetCategory::GreenPath => self.green_path.as_ref(),
        }
    }

    /// Split `collection` into one subset per category, in
    /// [`StreetCategory::ALL`] order. Feature order is preserved.
    #[must_use]
    pub fn partition(
        &self,
        collection: &FeatureCollection,
    ) -> Vec<(StreetCategory, FeatureCollection)> {
        StreetCategory::ALL
            .into_iter()
            .map(|category| {
                let predicate = self.predicate(category);
                (category, collection.filtered(|f| predicate.matches(f)))
            })
            .collect()
    }
}

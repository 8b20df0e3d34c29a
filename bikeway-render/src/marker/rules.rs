//! Ordered colour rules for parking markers.

use bikeway_core::PointRecord;

/// Sets the marker colour when a tag holds a given value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRule {
    /// Tag name to inspect.
    pub key: &'static str,
    /// Value the tag must equal.
    pub value: &'static str,
    /// Colour applied on a match.
    pub color: &'static str,
}

impl ColorRule {
    /// Construct a rule.
    #[must_use]
    pub const fn new(key: &'static str, value: &'static str, color: &'static str) -> Self {
        Self { key, value, color }
    }

    /// Report whether the record's tag equals the rule's value.
    #[must_use]
    pub fn matches(&self, record: &PointRecord) -> bool {
        record.tag(self.key) == Some(self.value)
    }
}

/// Default rules for bicycle parking, in evaluation order.
///
/// A lit parking overrides a covered one, and a shed overrides both.
pub const PARKING_COLOR_RULES: [ColorRule; 3] = [
    ColorRule::new("covered", "yes", "green"),
    ColorRule::new("lit", "yes", "yellow"),
    ColorRule::new("bicycle_parking", "shed", "#00ec18"),
];

/// Evaluate `rules` in order and return the last one that matches.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use bikeway_core::{PointRecord, Tags};
/// use bikeway_render::marker::{PARKING_COLOR_RULES, last_matching_rule};
///
/// let tags = Tags::from([
///     ("covered".to_owned(), "yes".to_owned()),
///     ("lit".to_owned(), "yes".to_owned()),
/// ]);
/// let record = PointRecord::node(1, Coord { x: 0.0, y: 0.0 }, tags);
/// let rule = last_matching_rule(&PARKING_COLOR_RULES, &record);
/// assert_eq!(rule.map(|r| r.color), Some("yellow"));
/// ```
#[must_use]
pub fn last_matching_rule<'a>(
    rules: &'a [ColorRule],
    record: &PointRecord,
) -> Option<&'a ColorRule> {
    rules.iter().rev().find(|rule| rule.matches(record))
}

//! Behavioural tests for placing and removing parking markers.

use std::cell::RefCell;

use bikeway_core::{Color, ElementKind, PointRecord, Tags, test_support::RecordingSurface};
use bikeway_render::{MarkerHandle, MarkerRenderer, remove_markers};
use geo::Coord;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

fn node(id: u64, x: f64, y: f64, pairs: &[(&str, &str)]) -> PointRecord {
    let tags: Tags = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    PointRecord::node(id, Coord { x, y }, tags)
}

fn only_marker(surface: &RecordingSurface) -> bikeway_core::MarkerStyle {
    let mut markers = surface.markers();
    let Some((_, placed)) = markers.next() else {
        panic!("expected one marker");
    };
    assert!(markers.next().is_none(), "expected exactly one marker");
    placed.style.clone()
}

#[fixture]
fn records() -> RefCell<Vec<PointRecord>> {
    RefCell::new(Vec::new())
}

#[fixture]
fn renderer() -> RefCell<MarkerRenderer> {
    RefCell::new(MarkerRenderer::default())
}

#[fixture]
fn surface() -> RefCell<RecordingSurface> {
    RefCell::new(RecordingSurface::new())
}

#[fixture]
fn handles() -> RefCell<Vec<MarkerHandle>> {
    RefCell::new(Vec::new())
}

#[given("parking records with two nodes and one way")]
fn given_mixed_records(#[from(records)] records: &RefCell<Vec<PointRecord>>) {
    *records.borrow_mut() = vec![
        node(10, 13.40, 52.52, &[("capacity", "4")]),
        PointRecord::new(
            Some(11),
            ElementKind::Way,
            Coord { x: 13.41, y: 52.53 },
            Some(Tags::from([("capacity".to_owned(), "40".to_owned())])),
        ),
        node(12, 13.42, 52.54, &[]),
    ];
}

#[given("an untagged parking node")]
fn given_untagged(#[from(records)] records: &RefCell<Vec<PointRecord>>) {
    *records.borrow_mut() = vec![PointRecord::untagged_node(1, Coord { x: 8.68, y: 50.11 })];
}

#[given("a shed node with capacity 15 that is covered and lit")]
fn given_shed(#[from(records)] records: &RefCell<Vec<PointRecord>>) {
    *records.borrow_mut() = vec![node(
        2,
        8.68,
        50.11,
        &[
            ("capacity", "15"),
            ("covered", "yes"),
            ("lit", "yes"),
            ("bicycle_parking", "shed"),
        ],
    )];
}

#[given("tap re-centring is enabled")]
fn given_tap(#[from(renderer)] renderer: &RefCell<MarkerRenderer>) {
    let enabled = renderer.borrow().clone().with_recenter_on_tap(true);
    *renderer.borrow_mut() = enabled;
}

#[when("I create markers for all nodes")]
fn when_create(
    #[from(records)] records: &RefCell<Vec<PointRecord>>,
    #[from(renderer)] renderer: &RefCell<MarkerRenderer>,
    #[from(surface)] surface: &RefCell<RecordingSurface>,
    #[from(handles)] handles: &RefCell<Vec<MarkerHandle>>,
) {
    let created = renderer
        .borrow()
        .create_all_for_nodes(&mut *surface.borrow_mut(), &records.borrow());
    *handles.borrow_mut() = created;
}

#[when("I remove the markers twice")]
fn when_remove_twice(
    #[from(surface)] surface: &RefCell<RecordingSurface>,
    #[from(handles)] handles: &RefCell<Vec<MarkerHandle>>,
) {
    let placed = handles.borrow();
    remove_markers(&mut *surface.borrow_mut(), &placed);
    remove_markers(&mut *surface.borrow_mut(), &placed);
}

#[when("I tap the first marker")]
fn when_tap(
    #[from(surface)] surface: &RefCell<RecordingSurface>,
    #[from(handles)] handles: &RefCell<Vec<MarkerHandle>>,
) {
    let placed = handles.borrow();
    let Some(first) = placed.first() else {
        panic!("expected a marker to tap");
    };
    if let Err(err) = surface.borrow_mut().click(first.id()) {
        panic!("click failed: {err}");
    }
}

#[then("two markers are placed in input order")]
fn then_two_in_order(
    #[from(surface)] surface: &RefCell<RecordingSurface>,
    #[from(handles)] handles: &RefCell<Vec<MarkerHandle>>,
) {
    let ids: Vec<_> = handles.borrow().iter().map(MarkerHandle::record_id).collect();
    assert_eq!(ids, vec![Some(10), Some(12)]);
    assert_eq!(surface.borrow().marker_count(), 2);
}

#[then("the marker is gray at half scale")]
fn then_default_style(#[from(surface)] surface: &RefCell<RecordingSurface>) {
    let style = only_marker(&surface.borrow());
    assert_eq!(style.color, Color::from("gray"));
    assert!((style.scale - 0.5).abs() < 1e-9, "scale was {}", style.scale);
}

#[then("the marker is shed green at full scale")]
fn then_shed_style(#[from(surface)] surface: &RefCell<RecordingSurface>) {
    let style = only_marker(&surface.borrow());
    assert_eq!(style.color, Color::from("#00ec18"));
    assert!((style.scale - 1.0).abs() < 1e-9, "scale was {}", style.scale);
}

#[then("no markers remain on the surface")]
fn then_none_remain(#[from(surface)] surface: &RefCell<RecordingSurface>) {
    let map = surface.borrow();
    assert_eq!(map.marker_count(), 0);
    assert_eq!(map.click_handler_count(), 0);
}

#[then("the map is centred on that marker")]
fn then_centred(
    #[from(surface)] surface: &RefCell<RecordingSurface>,
    #[from(handles)] handles: &RefCell<Vec<MarkerHandle>>,
) {
    let expected = handles.borrow().first().map(MarkerHandle::location);
    assert_eq!(surface.borrow().center(), expected);
    assert_eq!(surface.borrow().flights().len(), 1);
}

#[scenario(path = "tests/features/markers.feature", index = 0)]
fn only_nodes_receive_markers(
    records: RefCell<Vec<PointRecord>>,
    renderer: RefCell<MarkerRenderer>,
    surface: RefCell<RecordingSurface>,
    handles: RefCell<Vec<MarkerHandle>>,
) {
    let _ = (records, renderer, surface, handles);
}

#[scenario(path = "tests/features/markers.feature", index = 1)]
fn untagged_node_keeps_default_style(
    records: RefCell<Vec<PointRecord>>,
    renderer: RefCell<MarkerRenderer>,
    surface: RefCell<RecordingSurface>,
    handles: RefCell<Vec<MarkerHandle>>,
) {
    let _ = (records, renderer, surface, handles);
}

#[scenario(path = "tests/features/markers.feature", index = 2)]
fn shed_colour_wins(
    records: RefCell<Vec<PointRecord>>,
    renderer: RefCell<MarkerRenderer>,
    surface: RefCell<RecordingSurface>,
    handles: RefCell<Vec<MarkerHandle>>,
) {
    let _ = (records, renderer, surface, handles);
}

#[scenario(path = "tests/features/markers.feature", index = 3)]
fn removing_twice_is_harmless(
    records: RefCell<Vec<PointRecord>>,
    renderer: RefCell<MarkerRenderer>,
    surface: RefCell<RecordingSurface>,
    handles: RefCell<Vec<MarkerHandle>>,
) {
    let _ = (records, renderer, surface, handles);
}

#[scenario(path = "tests/features/markers.feature", index = 4)]
fn tapping_recentres_map(
    records: RefCell<Vec<PointRecord>>,
    renderer: RefCell<MarkerRenderer>,
    surface: RefCell<RecordingSurface>,
    handles: RefCell<Vec<MarkerHandle>>,
) {
    let _ = (records, renderer, surface, handles);
}

#![allow(dead_code)]

use roimap::editor::{EditEvent, Tool};
use roimap::geom::Point;
use roimap::model::{RoiShape, Square};
use roimap::project::{Project, SurfaceSize};
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub const SURFACE_W: f64 = 1280.0;
pub const SURFACE_H: f64 = 720.0;

pub const EPS_MAP: f64 = 1e-9;

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Quarter-pixel coordinates: exact in both f64 and their JSON text.
pub fn arb_coord(max: f64) -> BoxedStrategy<f64> {
    let quarters = (max * 4.0) as i32;
    (0..=quarters).prop_map(|q| f64::from(q) / 4.0).boxed()
}

pub fn arb_point() -> BoxedStrategy<Point> {
    (arb_coord(SURFACE_W), arb_coord(SURFACE_H))
        .prop_map(|(x, y)| Point::new(x, y))
        .boxed()
}

pub fn arb_color() -> BoxedStrategy<String> {
    prop_oneof![
        Just("#ff0000".to_string()),
        Just("#00ff00".to_string()),
        Just("#0000ff".to_string()),
        "#[0-9a-f]{6}",
    ]
    .boxed()
}

pub fn arb_shape() -> BoxedStrategy<RoiShape> {
    prop_oneof![
        (arb_point(), arb_point(), arb_color()).prop_map(|(a, b, c)| RoiShape::line(a, b, c)),
        (prop::collection::vec(arb_point(), 3..8), arb_color())
            .prop_map(|(pts, c)| RoiShape::polygon(pts, c)),
        (arb_point(), 1u32..400, arb_color()).prop_map(|(p, size, c)| {
            RoiShape::Square(Square::new(p.x, p.y, f64::from(size), c))
        }),
    ]
    .boxed()
}

pub fn arb_project(max_shapes: usize) -> BoxedStrategy<Project> {
    (
        1u32..=9,
        prop::collection::vec(arb_shape(), 0..=max_shapes),
    )
        .prop_map(|(camera_count, rois)| Project {
            camera_count,
            surface: SurfaceSize::new(SURFACE_W, SURFACE_H),
            rois,
        })
        .boxed()
}

pub fn arb_tool() -> BoxedStrategy<Tool> {
    prop_oneof![
        Just(Tool::Select),
        Just(Tool::Line),
        Just(Tool::Polygon),
        Just(Tool::Square),
    ]
    .boxed()
}

/// Any event the edit controller accepts.
pub fn arb_event() -> BoxedStrategy<EditEvent> {
    prop_oneof![
        4 => arb_point().prop_map(|p| EditEvent::Click { x: p.x, y: p.y }),
        2 => arb_point().prop_map(|p| EditEvent::PointerDown { x: p.x, y: p.y }),
        2 => arb_point().prop_map(|p| EditEvent::PointerMove { x: p.x, y: p.y }),
        1 => arb_point().prop_map(|p| EditEvent::PointerUp { x: p.x, y: p.y }),
        2 => arb_tool().prop_map(|tool| EditEvent::Tool { tool }),
        1 => arb_color().prop_map(|color| EditEvent::Color { color }),
        1 => Just(EditEvent::ClosePolygon),
        1 => Just(EditEvent::Delete),
        2 => Just(EditEvent::Undo),
        1 => Just(EditEvent::Redo),
        1 => (-20i32..20).prop_map(|d| EditEvent::ResizeSquare { delta: f64::from(d) }),
        1 => prop_oneof![0u32..=9, any::<u32>()]
            .prop_map(|cameras| EditEvent::SplitScreen { cameras }),
    ]
    .boxed()
}

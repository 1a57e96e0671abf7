//! End-to-end: an editing session drawn over the default mosaic, exported
//! onto per-camera images on disk.

use std::fs;

use roimap::editor::{EditEvent, Editor, Tool};
use roimap::export::{write_export, CameraImageMapping, MANIFEST_FILE_NAME};
use roimap::images::{collect_images, load_image, probe_image};
use roimap::project::SurfaceSize;
use roimap::render::{draw_scene, DrawList, DrawOp};
use roimap::RoiError;

mod common;

fn handle_all(editor: &mut Editor, events: impl IntoIterator<Item = EditEvent>) {
    for event in events {
        editor.handle(event).expect("event applies");
    }
}

/// A line in camera 1, then a polygon and a dragged square in camera 2.
fn session() -> Editor {
    let mut editor = Editor::new(SurfaceSize::new(1280.0, 720.0));
    handle_all(
        &mut editor,
        [
            EditEvent::Tool { tool: Tool::Line },
            EditEvent::Click { x: 10.0, y: 10.0 },
            EditEvent::Click { x: 50.0, y: 50.0 },
            EditEvent::Tool { tool: Tool::Polygon },
            EditEvent::Color { color: "#00ff00".into() },
            EditEvent::Click { x: 500.0, y: 50.0 },
            EditEvent::Click { x: 600.0, y: 50.0 },
            EditEvent::Click { x: 600.0, y: 150.0 },
            EditEvent::ClosePolygon,
            EditEvent::Tool { tool: Tool::Square },
            EditEvent::PointerDown { x: 150.0, y: 150.0 },
            EditEvent::PointerMove { x: 500.0, y: 200.0 },
            EditEvent::PointerUp { x: 500.0, y: 200.0 },
        ],
    );
    editor
}

#[test]
fn session_builds_three_rois() {
    let editor = session();
    let kinds: Vec<String> = editor
        .model()
        .shapes()
        .iter()
        .map(|s| s.kind().to_string())
        .collect();
    assert_eq!(kinds, ["Line", "Polygon", "Square"]);
    assert_eq!(editor.model().shapes()[1].color(), "#00ff00");

    let square = editor.model().shapes()[2].as_square().expect("square");
    assert_eq!((square.x, square.y, square.size), (475.0, 175.0, 50.0));
}

#[test]
fn scene_draws_tiles_then_shapes() {
    let editor = session();
    let mut list = DrawList::new();
    draw_scene(&editor.scene(), &mut list);

    assert_eq!(list.ops[0], DrawOp::Clear);
    assert_eq!(
        list.labels(),
        ["Camera 1", "Camera 2", "Camera 3", "Camera 4", "Camera 5", "Camera 6"]
    );
    let fills = list
        .ops
        .iter()
        .filter(|op| matches!(op, DrawOp::FillPath { .. }))
        .count();
    assert_eq!(fills, 1);
}

#[test]
fn export_writes_manifest_and_rasters() {
    let dir = tempfile::tempdir().expect("temp dir");
    let images_dir = dir.path().join("images");
    for i in 1..=6 {
        common::write_bmp(&images_dir.join(format!("cam{i}.bmp")), 640, 360);
    }

    let editor = session();
    let images = collect_images(&images_dir)
        .expect("collect")
        .iter()
        .map(|p| load_image(p))
        .collect::<Result<Vec<_>, _>>()
        .expect("load images");
    let mapping = CameraImageMapping::in_order(images, editor.tiles().len()).expect("mapping");

    let out = dir.path().join("out");
    let snapshot = editor.model().snapshot();
    let summary = write_export(&out, &snapshot, editor.tiles(), &mapping).expect("export");
    assert_eq!(summary.images_written.len(), 6);
    assert_eq!(summary.shapes_exported, 3);

    let manifest = fs::read_to_string(out.join(MANIFEST_FILE_NAME)).expect("manifest");
    let expected_head = concat!(
        "cam1.bmp\n",
        r#"ROI: [{"x":15,"y":10},{"x":75,"y":50}]"#,
        "\n\n",
        "cam2.bmp\n",
        r#"ROI: [{"x":110,"y":50},{"x":260,"y":50},{"x":260,"y":150}]"#,
        "\n",
        "Square ROI: { x: 72.5, y: 175, size: 75 }",
        "\n\n",
        "cam3.bmp\n",
    );
    assert!(
        manifest.starts_with(expected_head),
        "unexpected manifest:\n{manifest}"
    );
    assert!(manifest.ends_with("cam6.bmp\n"));

    let annotated = image::open(out.join("cam2.bmp_roi.png"))
        .expect("annotated png")
        .to_rgba8();
    assert_eq!(annotated.dimensions(), (640, 360));
    // Polygon outline at its top edge, green on black
    let edge = annotated.get_pixel(180, 50).0;
    assert!(edge[1] > 200 && edge[0] < 50, "pixel {edge:?}");
}

#[test]
fn manifest_only_export_works_from_probed_sizes() {
    let dir = tempfile::tempdir().expect("temp dir");
    let editor = session();

    let images = (1..=6)
        .map(|i| {
            let path = dir.path().join(format!("cam{i}.bmp"));
            common::write_bmp(&path, 1280, 720);
            probe_image(&path)
        })
        .collect::<Result<Vec<_>, _>>()
        .expect("probe");
    let mapping = CameraImageMapping::in_order(images, 6).expect("mapping");

    let out = dir.path().join("out");
    let summary =
        write_export(&out, &editor.model().snapshot(), editor.tiles(), &mapping).expect("export");
    assert!(summary.images_written.is_empty());
    let manifest = fs::read_to_string(summary.manifest_path).expect("manifest");
    assert!(manifest.contains(r#"ROI: [{"x":30,"y":20},{"x":150,"y":100}]"#));
}

#[test]
fn mapping_rejects_wrong_image_count() {
    let editor = session();
    let images = vec![roimap::images::TargetImage::with_size("only.png", 10, 10)];
    let err = CameraImageMapping::in_order(images, editor.tiles().len()).unwrap_err();
    assert!(matches!(
        err,
        RoiError::MappingCountMismatch {
            images: 1,
            cameras: 6
        }
    ));
}

#[test]
fn export_ignores_edits_after_snapshot() {
    let mut editor = session();
    let snapshot = editor.model().snapshot();
    handle_all(&mut editor, [EditEvent::Undo, EditEvent::Undo]);
    assert_eq!(editor.model().shapes().len(), 1);
    assert_eq!(snapshot.len(), 3);
}

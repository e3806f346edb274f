use std::path::Path;

use serde_json::json;

use corkboard_canvas::{
    BoardFile, ImageContent, InteractionController, NoteColor, NoteContent, ObjectId, ObjectKind,
    ObjectRecord, Point, Rect, Rgb, SceneDocument, SceneObject, TextContent, Viewport,
};
use corkboard_core::RecordError;
use corkboard_settings::CanvasConfig;

fn note() -> SceneObject {
    SceneObject::note(
        Rect::new(10.0, 20.0, 200.0, 150.0),
        NoteContent::new("Buy milk", NoteColor::Green, 14.0, 10.0),
    )
    .with_z_index(3)
}

fn record(kind: &str, z_index: i64, data: serde_json::Value) -> ObjectRecord {
    ObjectRecord {
        id: ObjectId::new().to_string(),
        kind: kind.to_string(),
        x: 0.0,
        y: 0.0,
        width: 100.0,
        height: 100.0,
        z_index,
        data,
    }
}

fn write_png(path: &Path, width: u32, height: u32) {
    image::RgbImage::new(width, height)
        .save(path)
        .expect("write png");
}

#[test]
fn test_note_record_layout() {
    let obj = note();
    let record = obj.to_record();

    assert_eq!(record.kind, "note");
    assert_eq!(record.id, obj.id.to_string());
    assert_eq!((record.x, record.y, record.width, record.height), (10.0, 20.0, 200.0, 150.0));
    assert_eq!(record.z_index, 3);
    assert_eq!(
        record.data,
        json!({ "text": "Buy milk", "color_name": "green", "font_size": 14.0 })
    );

    let value = serde_json::to_value(&record).expect("serialize");
    assert_eq!(value["type"], "note");
    assert!(value.get("selected").is_none());
}

#[test]
fn test_text_record_layout() {
    let obj = SceneObject::text(
        Rect::new(0.0, 0.0, 300.0, 50.0),
        TextContent::new("Title", "Serif", 24.0, Rgb::new(255, 136, 0), 5.0),
    );
    let record = obj.to_record();
    assert_eq!(
        record.data,
        json!({ "text": "Title", "font_family": "Serif", "font_size": 24.0, "color": "#FF8800" })
    );

    let restored = SceneObject::from_record(&record).expect("valid record");
    assert_eq!(restored.kind, obj.kind);
}

#[test]
fn test_image_record_layout() {
    let obj = SceneObject::image(
        Rect::new(0.0, 0.0, 300.0, 150.0),
        ImageContent::new("/boards/assets/photo.png", 600.0, 300.0),
    );
    let record = obj.to_record();
    assert_eq!(
        record.data,
        json!({
            "asset_reference": "/boards/assets/photo.png",
            "original_width": 600.0,
            "original_height": 300.0
        })
    );

    let restored = SceneObject::from_record(&record).expect("valid record");
    assert_eq!(restored.aspect_ratio(), Some(2.0));
    match &restored.kind {
        ObjectKind::Image(image) => assert!(!image.is_available()),
        other => panic!("expected image, got {:?}", other),
    }
}

#[test]
fn test_selection_is_not_persisted() {
    let mut obj = note();
    obj.selected = true;
    obj.hovered = true;

    let restored = SceneObject::from_record(&obj.to_record()).expect("valid record");
    assert!(!restored.selected);
    assert!(!restored.hovered);
}

#[test]
fn test_unknown_type_is_an_error() {
    let result = SceneObject::from_record(&record("sketch", 0, json!({})));
    assert!(matches!(result, Err(RecordError::UnknownType { .. })));
}

#[test]
fn test_malformed_payload_is_an_error() {
    let result = SceneObject::from_record(&record("note", 0, json!({ "text": 5 })));
    assert!(matches!(result, Err(RecordError::MalformedPayload { .. })));

    let mut bad_id = note().to_record();
    bad_id.id = "not-a-uuid".to_string();
    assert!(matches!(
        SceneObject::from_record(&bad_id),
        Err(RecordError::InvalidId { .. })
    ));

    let bad_color = record(
        "text",
        0,
        json!({ "text": "t", "font_family": "Sans", "font_size": 12.0, "color": "orange" }),
    );
    assert!(matches!(
        SceneObject::from_record(&bad_color),
        Err(RecordError::InvalidColor { .. })
    ));

    let signed_color = record(
        "text",
        0,
        json!({ "text": "t", "font_family": "Sans", "font_size": 12.0, "color": "#+F+F+F" }),
    );
    assert!(matches!(
        SceneObject::from_record(&signed_color),
        Err(RecordError::InvalidColor { .. })
    ));
}

#[test]
fn test_unknown_note_color_falls_back() {
    let rec = record(
        "note",
        0,
        json!({ "text": "t", "color_name": "magenta", "font_size": 14.0 }),
    );
    let obj = SceneObject::from_record(&rec).expect("valid record");
    assert_eq!(obj.as_note().map(|n| n.color_name), Some(NoteColor::Yellow));
}

#[test]
fn test_legacy_field_names() {
    let rec = record(
        "note",
        0,
        json!({ "text": "t", "color": "purple", "font_size": 14.0 }),
    );
    let obj = SceneObject::from_record(&rec).expect("valid record");
    assert_eq!(obj.as_note().map(|n| n.color_name), Some(NoteColor::Purple));
}

#[test]
fn test_image_without_dimensions_is_probed() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("sized.png");
    write_png(&path, 80, 40);

    let rec = record(
        "image",
        0,
        json!({ "asset_path": path.display().to_string() }),
    );
    let obj = SceneObject::from_record(&rec).expect("valid record");
    assert_eq!(obj.aspect_ratio(), Some(2.0));
}

#[test]
fn test_load_records_skips_bad_entries_and_orders_by_z() {
    let mut doc = SceneDocument::new();
    let records = vec![
        record("note", 5, json!({ "text": "top", "color_name": "blue", "font_size": 14.0 })),
        record("sketch", 0, json!({})),
        record("note", -2, json!({ "text": "bottom", "color_name": "blue", "font_size": 14.0 })),
        record("note", 1, json!({ "oops": true })),
    ];

    let report = doc.load_records(&records);
    assert_eq!(report.loaded, 2);
    assert_eq!(report.skipped, 2);

    let texts: Vec<&str> = doc.objects().iter().filter_map(|o| o.editable_text()).collect();
    assert_eq!(texts, vec!["bottom", "top"]);
    assert!(!doc.can_undo());
}

#[test]
fn test_load_records_accepts_enormous_geometry() {
    let mut doc = SceneDocument::new();
    let mut wide = record("note", 0, json!({ "text": "wide", "color_name": "blue", "font_size": 14.0 }));
    wide.x = -1e18;
    wide.width = 2e18;
    let mut vast = record("note", 1, json!({ "text": "vast", "color_name": "blue", "font_size": 14.0 }));
    vast.x = -1e300;
    vast.y = -1e300;
    vast.width = 2e300;
    vast.height = 2e300;

    let report = doc.load_records(&[wide, vast]);
    assert_eq!(report.loaded, 2);
    assert_eq!(report.skipped, 0);
    assert_eq!(doc.scene().index_stats().oversized_items, 2);

    let top = doc.scene().hit_test(Point::new(0.0, 50.0)).expect("hit");
    assert_eq!(doc.get(top).and_then(|o| o.editable_text()), Some("vast"));
}

#[test]
fn test_document_records_round_trip() {
    let mut doc = SceneDocument::new();
    doc.add_object(note());
    doc.add_object(SceneObject::text(
        Rect::new(400.0, 0.0, 300.0, 50.0),
        TextContent::new("label", "Sans", 16.0, Rgb::BLACK, 5.0),
    ));
    let records = doc.to_records();

    let mut reloaded = SceneDocument::new();
    let report = reloaded.load_records(&records);
    assert_eq!(report.loaded, 2);
    assert_eq!(reloaded.to_records(), records);
}

#[test]
fn test_board_file_save_and_load() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("board.json");

    let mut canvas = InteractionController::new(&CanvasConfig::default());
    canvas.set_screen_size(800.0, 600.0);
    canvas.document_mut().add_object(note());
    canvas.viewport_mut().set_zoom(2.0, None);
    canvas.viewport_mut().set_offset(-30.0, 45.0);
    canvas.save_board(&path, "Groceries").expect("save board");

    let board = BoardFile::load_from_file(&path).expect("load board");
    assert_eq!(board.version, "1.0");
    assert_eq!(board.metadata.name, "Groceries");
    assert_eq!(board.objects.len(), 1);
    assert_eq!(board.skipped_entries, 0);

    let mut other = InteractionController::new(&CanvasConfig::default());
    let report = other.open_board(&path).expect("open board");
    assert_eq!(report.loaded, 1);
    assert_eq!(report.skipped, 0);
    assert_eq!(other.viewport().zoom(), 2.0);
    assert_eq!(other.viewport().offset_x(), -30.0);
    assert_eq!(other.viewport().offset_y(), 45.0);
    assert_eq!(other.document().to_records(), canvas.document().to_records());
}

#[test]
fn test_board_file_skips_malformed_entries() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("board.json");
    let good = note().to_record();
    let content = json!({
        "version": "1.0",
        "metadata": {
            "name": "Mixed",
            "created": "2024-01-01T00:00:00Z",
            "modified": "2024-01-02T00:00:00Z"
        },
        "viewport": { "zoom": 1.0, "offset_x": 0.0, "offset_y": 0.0 },
        "objects": [
            good,
            { "id": "x", "type": "note" },
            record("sketch", 0, json!({}))
        ]
    });
    std::fs::write(&path, content.to_string()).expect("write board");

    let mut canvas = InteractionController::new(&CanvasConfig::default());
    let report = canvas.open_board(&path).expect("open board");
    assert_eq!(report.loaded, 1);
    assert_eq!(report.skipped, 2);
}

#[test]
fn test_relative_image_paths_resolve_against_board_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::create_dir(dir.path().join("assets")).expect("assets dir");
    write_png(&dir.path().join("assets").join("cat.png"), 30, 60);

    let path = dir.path().join("board.json");
    let mut board = BoardFile::capture("Pets", &SceneDocument::new(), &Viewport::new());
    board.objects.push(record(
        "image",
        0,
        json!({ "asset_reference": "assets/cat.png", "original_width": 30.0, "original_height": 60.0 }),
    ));
    board.save_to_file(&path).expect("save board");

    let loaded = BoardFile::load_from_file(&path).expect("load board");
    let expected = dir.path().join("assets").join("cat.png").display().to_string();
    assert_eq!(loaded.objects[0].data["asset_reference"], expected);

    let mut doc = SceneDocument::new();
    doc.load_records(&loaded.objects);
    match &doc.objects()[0].kind {
        ObjectKind::Image(image) => assert!(image.is_available()),
        other => panic!("expected image, got {:?}", other),
    }
}

#[test]
fn test_load_missing_board_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let result = BoardFile::load_from_file(dir.path().join("absent.json"));
    assert!(result.is_err());

    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, "{ not json").expect("write");
    let mut canvas = InteractionController::new(&CanvasConfig::default());
    assert!(canvas.open_board(&bad).is_err());
}

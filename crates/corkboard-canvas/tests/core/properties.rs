//! Property tests for undo, records, zoom, resize and spatial queries.

use std::collections::HashSet;

use proptest::prelude::*;

use corkboard_canvas::commands::{DeleteObjects, MoveObjects, ResizeObject};
use corkboard_canvas::interaction::compute_resize;
use corkboard_canvas::{
    Grid, NoteColor, NoteContent, ObjectId, ObjectRecord, Point, Rect, ResizeHandle, Rgb, Scene,
    SceneCommand, SceneDocument, SceneObject, TextContent, Viewport,
};

#[derive(Debug, Clone)]
enum Action {
    AddNote(f64, f64),
    Delete(usize),
    Move(usize, f64, f64),
    Resize(usize, f64, f64),
    Recolor(usize, usize),
    Raise(usize),
    Edit(usize, String),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        (-2000.0..2000.0, -2000.0..2000.0).prop_map(|(x, y)| Action::AddNote(x, y)),
        any::<usize>().prop_map(Action::Delete),
        (any::<usize>(), -800.0..800.0, -800.0..800.0).prop_map(|(i, dx, dy)| Action::Move(i, dx, dy)),
        (any::<usize>(), 1.0..900.0, 1.0..900.0).prop_map(|(i, w, h)| Action::Resize(i, w, h)),
        (any::<usize>(), 0..NoteColor::ALL.len()).prop_map(|(i, c)| Action::Recolor(i, c)),
        any::<usize>().prop_map(Action::Raise),
        (any::<usize>(), "[a-z ]{0,12}").prop_map(|(i, s)| Action::Edit(i, s)),
    ]
}

fn pick(doc: &SceneDocument, i: usize) -> Option<ObjectId> {
    let objects = doc.objects();
    if objects.is_empty() {
        None
    } else {
        Some(objects[i % objects.len()].id)
    }
}

fn apply(doc: &mut SceneDocument, action: &Action) {
    match action {
        Action::AddNote(x, y) => {
            doc.add_note(Point::new(*x, *y));
        }
        Action::Delete(i) => {
            if let Some(id) = pick(doc, *i) {
                let cmd = DeleteObjects::new(doc.scene(), &[id]);
                doc.execute(SceneCommand::DeleteObjects(cmd));
            }
        }
        Action::Move(i, dx, dy) => {
            if let Some(obj) = pick(doc, *i).and_then(|id| doc.get(id)) {
                let origins = vec![(obj.id, obj.x, obj.y)];
                doc.execute(SceneCommand::MoveObjects(MoveObjects {
                    origins,
                    dx: *dx,
                    dy: *dy,
                }));
            }
        }
        Action::Resize(i, w, h) => {
            if let Some(obj) = pick(doc, *i).and_then(|id| doc.get(id)) {
                let cmd = ResizeObject {
                    id: obj.id,
                    old: obj.rect(),
                    new: Rect::new(obj.x, obj.y, *w, *h),
                };
                doc.execute(SceneCommand::ResizeObject(cmd));
            }
        }
        Action::Recolor(i, c) => {
            if let Some(id) = pick(doc, *i) {
                doc.change_note_color(id, NoteColor::ALL[*c]);
            }
        }
        Action::Raise(i) => {
            if let Some(id) = pick(doc, *i) {
                doc.scene_mut().select_only(id);
                doc.bring_to_front();
                doc.scene_mut().clear_selection();
            }
        }
        Action::Edit(i, text) => {
            if let Some(id) = pick(doc, *i) {
                doc.commit_text_edit(id, text);
            }
        }
    }
}

#[derive(Debug, PartialEq)]
struct Snapshot {
    records: Vec<ObjectRecord>,
    selected: Vec<ObjectId>,
    cells: Vec<Vec<(i64, i64)>>,
    index_len: usize,
}

fn snapshot(doc: &SceneDocument) -> Snapshot {
    let index = doc.scene().index();
    Snapshot {
        records: doc.to_records(),
        selected: doc.scene().selected_ids(),
        cells: doc
            .objects()
            .iter()
            .map(|obj| {
                let mut cells = index.cells_of(obj.id).map(<[_]>::to_vec).unwrap_or_default();
                cells.sort_unstable();
                cells
            })
            .collect(),
        index_len: index.len(),
    }
}

fn seeded_document() -> SceneDocument {
    let mut doc = SceneDocument::new();
    doc.replace_objects(vec![
        SceneObject::note(
            Rect::new(0.0, 0.0, 200.0, 200.0),
            NoteContent::new("seed", NoteColor::Orange, 14.0, 10.0),
        ),
        SceneObject::text(
            Rect::new(700.0, -300.0, 300.0, 50.0),
            TextContent::new("label", "Sans", 16.0, Rgb::BLACK, 5.0),
        )
        .with_z_index(1),
    ]);
    doc
}

fn note_or_text() -> impl Strategy<Value = SceneObject> {
    (
        -1e5..1e5f64,
        -1e5..1e5f64,
        10.0..2000.0f64,
        10.0..2000.0f64,
        -1000i64..1000,
        "\\PC{0,30}",
        0..NoteColor::ALL.len(),
        any::<bool>(),
    )
        .prop_map(|(x, y, w, h, z, text, color, is_note)| {
            let rect = Rect::new(x, y, w, h);
            let obj = if is_note {
                SceneObject::note(rect, NoteContent::new(text, NoteColor::ALL[color], 14.0, 10.0))
            } else {
                let rgb = Rgb::new(color as u8 * 40, 17, 255);
                SceneObject::text(rect, TextContent::new(text, "Serif", 18.5, rgb, 5.0))
            };
            obj.with_z_index(z)
        })
}

fn handle() -> impl Strategy<Value = ResizeHandle> {
    prop::sample::select(ResizeHandle::LOOKUP_ORDER.to_vec())
}

proptest! {
    #[test]
    fn prop_undo_restores_state(actions in prop::collection::vec(action(), 1..20)) {
        let mut doc = seeded_document();
        let before = snapshot(&doc);

        for action in &actions {
            apply(&mut doc, action);
        }
        while doc.undo() {}

        prop_assert_eq!(snapshot(&doc), before);
    }

    #[test]
    fn prop_undo_redo_undo_is_stable(actions in prop::collection::vec(action(), 1..20)) {
        let mut doc = seeded_document();
        for action in &actions {
            apply(&mut doc, action);
        }
        prop_assume!(doc.can_undo());

        doc.undo();
        let once = snapshot(&doc);
        doc.redo();
        doc.undo();
        prop_assert_eq!(snapshot(&doc), once);
    }

    #[test]
    fn prop_record_round_trip_is_fixed_point(obj in note_or_text()) {
        let record = obj.to_record();
        let restored = SceneObject::from_record(&record).expect("valid record");

        prop_assert_eq!(restored.rect(), obj.rect());
        prop_assert_eq!(restored.z_index, obj.z_index);
        prop_assert_eq!(restored.id, obj.id);
        prop_assert_eq!(&restored.kind, &obj.kind);

        let again = SceneObject::from_record(&restored.to_record()).expect("valid record");
        prop_assert_eq!(again.to_record(), record);
    }

    #[test]
    fn prop_reciprocal_zoom_restores_view(
        zoom in 0.2..3.0f64,
        factor in 1.01..1.3f64,
        ox in -5000.0..5000.0f64,
        oy in -5000.0..5000.0f64,
        sx in 0.0..1920.0f64,
        sy in 0.0..1080.0f64,
    ) {
        let mut viewport = Viewport::new();
        viewport.set_zoom(zoom, None);
        viewport.set_offset(ox, oy);

        prop_assert!(viewport.zoom_at(sx, sy, factor));
        prop_assert!(viewport.zoom_at(sx, sy, 1.0 / factor));

        prop_assert!((viewport.zoom() - zoom).abs() < 1e-9);
        prop_assert!((viewport.offset_x() - ox).abs() < 1e-6);
        prop_assert!((viewport.offset_y() - oy).abs() < 1e-6);
    }

    #[test]
    fn prop_aspect_ratio_survives_resize(
        x in -500.0..500.0f64,
        y in -500.0..500.0f64,
        w in 20.0..800.0f64,
        ratio in 0.2..5.0f64,
        handle in handle(),
        cx in -1500.0..1500.0f64,
        cy in -1500.0..1500.0f64,
        snap in any::<bool>(),
    ) {
        let original = Rect::new(x, y, w, w / ratio);
        let mut grid = Grid::default();
        grid.snap_enabled = snap;

        let rect = compute_resize(&original, handle, Point::new(cx, cy), 20.0, Some(ratio), &grid);

        prop_assert!(rect.width >= 20.0 - 1e-9);
        prop_assert!(rect.height >= 20.0 - 1e-9);
        prop_assert!((rect.width / rect.height - ratio).abs() < 1e-9 * ratio.max(1.0));
    }

    #[test]
    fn prop_query_over_content_bounds_finds_everything(
        objects in prop::collection::vec(note_or_text(), 1..40),
        cell_size in 50.0..1000.0f64,
    ) {
        let mut scene = Scene::new(cell_size);
        let mut expected = HashSet::new();
        for obj in objects {
            expected.insert(obj.id);
            scene.push(obj);
        }
        let bounds = scene.content_bounds().expect("non-empty scene");

        let candidates = scene.index().query_rect(&bounds.to_bounds());
        prop_assert!(expected.iter().all(|id| candidates.contains(id)));

        let found: HashSet<ObjectId> = scene.query_rect(&bounds).into_iter().collect();
        prop_assert_eq!(found, expected);
    }
}

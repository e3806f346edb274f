use corkboard_canvas::commands::{
    AddObject, ChangeColor, ChangeZOrder, DeleteObjects, EditText, MoveObjects, ResizeObject,
};
use corkboard_canvas::{Command, NoteColor, ObjectId, Point, Rect, Scene, SceneCommand};

use crate::support::{note_at, text_at};

fn scene_with(objects: Vec<corkboard_canvas::SceneObject>) -> (Scene, Vec<ObjectId>) {
    let mut scene = Scene::default();
    let ids = objects.iter().map(|obj| obj.id).collect();
    for obj in objects {
        scene.push(obj);
    }
    (scene, ids)
}

fn order(scene: &Scene) -> Vec<ObjectId> {
    scene.objects().iter().map(|obj| obj.id).collect()
}

#[test]
fn test_add_object_execute_and_undo() {
    let mut scene = Scene::default();
    let note = note_at(100.0, 100.0, 200.0, 200.0);
    let id = note.id;
    let mut cmd = SceneCommand::AddObject(AddObject::new(note));

    cmd.execute(&mut scene);
    assert_eq!(scene.len(), 1);
    assert_eq!(scene.hit_test(Point::new(150.0, 150.0)), Some(id));

    cmd.undo(&mut scene);
    assert!(scene.is_empty());
    assert!(scene.index().is_empty());

    cmd.execute(&mut scene);
    assert_eq!(scene.get(id).map(|obj| obj.x), Some(100.0));
}

#[test]
fn test_delete_restores_positions() {
    let (mut scene, ids) = scene_with(vec![
        note_at(0.0, 0.0, 50.0, 50.0),
        note_at(100.0, 0.0, 50.0, 50.0),
        note_at(200.0, 0.0, 50.0, 50.0),
    ]);
    let before = order(&scene);

    let mut cmd = SceneCommand::DeleteObjects(DeleteObjects::new(&scene, &[ids[2], ids[0]]));
    cmd.execute(&mut scene);
    assert_eq!(order(&scene), vec![ids[1]]);
    assert!(!scene.index().contains(ids[0]));

    cmd.undo(&mut scene);
    assert_eq!(order(&scene), before);
    assert!(scene.index().contains(ids[0]));
    assert!(scene.index().contains(ids[2]));
}

#[test]
fn test_delete_ignores_unknown_ids() {
    let (scene, ids) = scene_with(vec![note_at(0.0, 0.0, 50.0, 50.0)]);
    let cmd = DeleteObjects::new(&scene, &[ObjectId::new(), ids[0], ids[0]]);
    assert_eq!(cmd.entries.len(), 1);
    assert!(!cmd.is_empty());
}

#[test]
fn test_delete_and_undo_restores_selection() {
    let (mut scene, ids) = scene_with(vec![note_at(0.0, 0.0, 50.0, 50.0)]);
    scene.select_only(ids[0]);

    let mut cmd = SceneCommand::DeleteObjects(DeleteObjects::new(&scene, &ids));
    cmd.execute(&mut scene);
    assert!(scene.selection().is_empty());

    cmd.undo(&mut scene);
    assert!(scene.selection().contains(ids[0]));
}

#[test]
fn test_move_undo_restores_exact_origin() {
    let (mut scene, ids) = scene_with(vec![
        note_at(0.1, 0.2, 50.0, 50.0),
        note_at(1000.0, 1000.0, 50.0, 50.0),
    ]);
    let mut cmd = SceneCommand::MoveObjects(MoveObjects {
        origins: vec![(ids[0], 0.1, 0.2), (ids[1], 1000.0, 1000.0)],
        dx: 0.7,
        dy: 600.0,
    });

    cmd.execute(&mut scene);
    assert_eq!(scene.get(ids[0]).map(|obj| (obj.x, obj.y)), Some((0.1 + 0.7, 0.2 + 600.0)));
    assert_eq!(scene.hit_test(Point::new(1010.0, 1610.0)), Some(ids[1]));
    assert_eq!(scene.hit_test(Point::new(1010.0, 1010.0)), None);

    cmd.undo(&mut scene);
    assert_eq!(scene.get(ids[0]).map(|obj| (obj.x, obj.y)), Some((0.1, 0.2)));
    assert_eq!(scene.hit_test(Point::new(1010.0, 1010.0)), Some(ids[1]));
}

#[test]
fn test_resize_refreshes_index() {
    let (mut scene, ids) = scene_with(vec![note_at(0.0, 0.0, 50.0, 50.0)]);
    let mut cmd = SceneCommand::ResizeObject(ResizeObject {
        id: ids[0],
        old: Rect::new(0.0, 0.0, 50.0, 50.0),
        new: Rect::new(0.0, 0.0, 1200.0, 50.0),
    });

    cmd.execute(&mut scene);
    assert_eq!(scene.hit_test(Point::new(1100.0, 25.0)), Some(ids[0]));

    cmd.undo(&mut scene);
    assert_eq!(scene.hit_test(Point::new(1100.0, 25.0)), None);
    assert_eq!(scene.get(ids[0]).map(|obj| obj.rect()), Some(Rect::new(0.0, 0.0, 50.0, 50.0)));
}

#[test]
fn test_edit_text() {
    let (mut scene, ids) = scene_with(vec![text_at(0.0, 0.0)]);
    let mut cmd = SceneCommand::EditText(EditText {
        id: ids[0],
        old_text: "text".to_string(),
        new_text: "hello".to_string(),
    });

    cmd.execute(&mut scene);
    assert_eq!(scene.get(ids[0]).and_then(|obj| obj.editable_text()), Some("hello"));
    cmd.undo(&mut scene);
    assert_eq!(scene.get(ids[0]).and_then(|obj| obj.editable_text()), Some("text"));
}

#[test]
fn test_change_color() {
    let (mut scene, ids) = scene_with(vec![note_at(0.0, 0.0, 50.0, 50.0)]);
    let mut cmd = SceneCommand::ChangeColor(ChangeColor {
        id: ids[0],
        old_color_name: NoteColor::Yellow,
        old_rgb: NoteColor::Yellow.rgb(),
        new_color_name: NoteColor::Purple,
        new_rgb: NoteColor::Purple.rgb(),
    });

    cmd.execute(&mut scene);
    let note = scene.get(ids[0]).and_then(|obj| obj.as_note()).cloned();
    assert_eq!(note.as_ref().map(|n| n.color_name), Some(NoteColor::Purple));
    assert_eq!(note.map(|n| n.color), Some(NoteColor::Purple.rgb()));

    cmd.undo(&mut scene);
    let note = scene.get(ids[0]).and_then(|obj| obj.as_note());
    assert_eq!(note.map(|n| n.color_name), Some(NoteColor::Yellow));
}

#[test]
fn test_change_z_order() {
    let (mut scene, ids) = scene_with(vec![
        note_at(0.0, 0.0, 50.0, 50.0).with_z_index(0),
        note_at(10.0, 10.0, 50.0, 50.0).with_z_index(1),
    ]);
    let mut cmd = SceneCommand::ChangeZOrder(ChangeZOrder {
        ids: vec![ids[0]],
        old_z: vec![0],
        new_z: vec![2],
    });

    assert_eq!(scene.hit_test(Point::new(20.0, 20.0)), Some(ids[1]));
    cmd.execute(&mut scene);
    assert_eq!(scene.hit_test(Point::new(20.0, 20.0)), Some(ids[0]));
    cmd.undo(&mut scene);
    assert_eq!(scene.hit_test(Point::new(20.0, 20.0)), Some(ids[1]));
}

#[test]
fn test_command_names() {
    let note = note_at(0.0, 0.0, 50.0, 50.0);
    let id = note.id;
    let cmd = SceneCommand::AddObject(AddObject::new(note));
    assert_eq!(cmd.name(), "Add Object");

    let cmd = SceneCommand::ChangeZOrder(ChangeZOrder {
        ids: vec![id],
        old_z: vec![0],
        new_z: vec![1],
    });
    assert_eq!(cmd.name(), "Change Z-Order");
}

//! Reversible scene mutations.
//!
//! Each variant of [`SceneCommand`] carries exactly the state needed to
//! apply and invert itself. Commands that change geometry re-bucket the
//! affected objects in the spatial index before returning.

use crate::model::{NoteColor, ObjectId, Rect, Rgb, SceneObject};
use crate::scene::Scene;

/// A command that can be executed and undone against a target.
pub trait Command<T> {
    /// Applies the mutation.
    fn execute(&mut self, target: &mut T);

    /// Reverts a previous [`Command::execute`].
    fn undo(&mut self, target: &mut T);

    /// Returns the name of the command for display.
    fn name(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq)]
#[allow(clippy::large_enum_variant)]
pub enum SceneCommand {
    AddObject(AddObject),
    DeleteObjects(DeleteObjects),
    MoveObjects(MoveObjects),
    ResizeObject(ResizeObject),
    EditText(EditText),
    ChangeColor(ChangeColor),
    ChangeZOrder(ChangeZOrder),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddObject {
    pub id: ObjectId,
    /// List position the object occupies while added.
    pub position: Option<usize>,
    /// Some while the object is out of the scene.
    pub object: Option<SceneObject>,
}

impl AddObject {
    /// Appends `object` to the end of the list on execute.
    pub fn new(object: SceneObject) -> Self {
        Self {
            id: object.id,
            position: None,
            object: Some(object),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeletedEntry {
    pub position: usize,
    pub id: ObjectId,
    /// Some while the object is deleted.
    pub object: Option<SceneObject>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteObjects {
    /// Sorted by ascending list position.
    pub entries: Vec<DeletedEntry>,
}

impl DeleteObjects {
    /// Captures the current positions of `ids`. Unknown ids are dropped.
    pub fn new(scene: &Scene, ids: &[ObjectId]) -> Self {
        let mut entries: Vec<DeletedEntry> = ids
            .iter()
            .filter_map(|id| {
                scene.position_of(*id).map(|position| DeletedEntry {
                    position,
                    id: *id,
                    object: None,
                })
            })
            .collect();
        entries.sort_by_key(|entry| entry.position);
        entries.dedup_by_key(|entry| entry.id);
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Translation of a set of objects by one common delta.
///
/// Each object's origin is kept so undo restores coordinates exactly
/// instead of subtracting the delta back out.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveObjects {
    pub origins: Vec<(ObjectId, f64, f64)>,
    pub dx: f64,
    pub dy: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResizeObject {
    pub id: ObjectId,
    pub old: Rect,
    pub new: Rect,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditText {
    pub id: ObjectId,
    pub old_text: String,
    pub new_text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChangeColor {
    pub id: ObjectId,
    pub old_color_name: NoteColor,
    pub old_rgb: Rgb,
    pub new_color_name: NoteColor,
    pub new_rgb: Rgb,
}

/// Parallel arrays of ids and their z values before and after.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeZOrder {
    pub ids: Vec<ObjectId>,
    pub old_z: Vec<i64>,
    pub new_z: Vec<i64>,
}

impl SceneCommand {
    fn apply(&mut self, scene: &mut Scene) {
        match self {
            SceneCommand::AddObject(cmd) => {
                if let Some(object) = cmd.object.take() {
                    let position = cmd.position.unwrap_or(scene.len());
                    cmd.position = scene.insert_at(position, object);
                }
            }
            SceneCommand::DeleteObjects(cmd) => {
                for entry in cmd.entries.iter_mut().rev() {
                    if let Some((position, object)) = scene.remove(entry.id) {
                        entry.position = position;
                        entry.object = Some(object);
                    }
                }
            }
            SceneCommand::MoveObjects(cmd) => {
                for (id, x0, y0) in &cmd.origins {
                    if let Some(obj) = scene.get_mut(*id) {
                        obj.move_to(x0 + cmd.dx, y0 + cmd.dy);
                        scene.refresh(*id);
                    }
                }
            }
            SceneCommand::ResizeObject(cmd) => set_rect(scene, cmd.id, cmd.new),
            SceneCommand::EditText(cmd) => set_text(scene, cmd.id, &cmd.new_text),
            SceneCommand::ChangeColor(cmd) => {
                set_color(scene, cmd.id, cmd.new_color_name, cmd.new_rgb)
            }
            SceneCommand::ChangeZOrder(cmd) => set_z(scene, &cmd.ids, &cmd.new_z),
        }
    }

    fn revert(&mut self, scene: &mut Scene) {
        match self {
            SceneCommand::AddObject(cmd) => {
                if let Some((position, object)) = scene.remove(cmd.id) {
                    cmd.position = Some(position);
                    cmd.object = Some(object);
                }
            }
            SceneCommand::DeleteObjects(cmd) => {
                for entry in cmd.entries.iter_mut() {
                    if let Some(object) = entry.object.take() {
                        scene.insert_at(entry.position, object);
                    }
                }
            }
            SceneCommand::MoveObjects(cmd) => {
                for (id, x0, y0) in &cmd.origins {
                    if let Some(obj) = scene.get_mut(*id) {
                        obj.move_to(*x0, *y0);
                        scene.refresh(*id);
                    }
                }
            }
            SceneCommand::ResizeObject(cmd) => set_rect(scene, cmd.id, cmd.old),
            SceneCommand::EditText(cmd) => set_text(scene, cmd.id, &cmd.old_text),
            SceneCommand::ChangeColor(cmd) => {
                set_color(scene, cmd.id, cmd.old_color_name, cmd.old_rgb)
            }
            SceneCommand::ChangeZOrder(cmd) => set_z(scene, &cmd.ids, &cmd.old_z),
        }
    }
}

impl Command<Scene> for SceneCommand {
    fn execute(&mut self, scene: &mut Scene) {
        self.apply(scene);
    }

    fn undo(&mut self, scene: &mut Scene) {
        self.revert(scene);
    }

    fn name(&self) -> &str {
        match self {
            SceneCommand::AddObject(_) => "Add Object",
            SceneCommand::DeleteObjects(_) => "Delete Objects",
            SceneCommand::MoveObjects(_) => "Move Objects",
            SceneCommand::ResizeObject(_) => "Resize Object",
            SceneCommand::EditText(_) => "Edit Text",
            SceneCommand::ChangeColor(_) => "Change Color",
            SceneCommand::ChangeZOrder(_) => "Change Z-Order",
        }
    }
}

fn set_rect(scene: &mut Scene, id: ObjectId, rect: Rect) {
    if let Some(obj) = scene.get_mut(id) {
        obj.set_rect(rect);
        scene.refresh(id);
    }
}

fn set_text(scene: &mut Scene, id: ObjectId, text: &str) {
    if let Some(obj) = scene.get_mut(id) {
        obj.set_text(text);
    }
}

fn set_color(scene: &mut Scene, id: ObjectId, name: NoteColor, rgb: Rgb) {
    if let Some(note) = scene.get_mut(id).and_then(SceneObject::as_note_mut) {
        note.color_name = name;
        note.color = rgb;
    }
}

fn set_z(scene: &mut Scene, ids: &[ObjectId], values: &[i64]) {
    for (id, z) in ids.iter().zip(values) {
        if let Some(obj) = scene.get_mut(*id) {
            obj.z_index = *z;
        }
    }
}

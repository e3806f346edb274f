//! The open board: objects, selection, spatial index and undo history.
//!
//! All user-level mutations go through [`SceneDocument`] so that every
//! change lands on the command stack and the modification callback fires
//! exactly once per committed command, undo or redo.

use std::fmt;
use std::path::Path;

use tracing::{debug, info};

use corkboard_core::constants::PLACEHOLDER_TEXT;
use corkboard_core::{AssetError, Callback, HistoryCallback};
use corkboard_settings::{CanvasConfig, InteractionSettings, ObjectDefaults};

use crate::commands::{
    AddObject, ChangeColor, ChangeZOrder, DeleteObjects, EditText, SceneCommand,
};
use crate::history::CommandStack;
use crate::model::{
    ImageContent, NoteColor, NoteContent, ObjectId, Point, Rect, Rgb, SceneObject, TextContent,
};
use crate::scene::Scene;

pub struct SceneDocument {
    scene: Scene,
    history: CommandStack<SceneCommand>,
    last_note_color: NoteColor,
    defaults: ObjectDefaults,
    interaction: InteractionSettings,
    on_modified: Option<Callback>,
}

impl SceneDocument {
    pub fn new() -> Self {
        Self::with_config(&CanvasConfig::default())
    }

    pub fn with_config(config: &CanvasConfig) -> Self {
        Self {
            scene: Scene::new(config.index.cell_size),
            history: CommandStack::new(config.history.max_depth),
            last_note_color: NoteColor::default(),
            defaults: config.objects.clone(),
            interaction: config.interaction.clone(),
            on_modified: None,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Direct scene access for live gesture previews. Changes made here are
    /// not recorded; commit them with [`SceneDocument::push_done`].
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn objects(&self) -> &[SceneObject] {
        self.scene.objects()
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.scene.get(id)
    }

    pub fn history(&self) -> &CommandStack<SceneCommand> {
        &self.history
    }

    pub fn defaults(&self) -> &ObjectDefaults {
        &self.defaults
    }

    pub fn interaction(&self) -> &InteractionSettings {
        &self.interaction
    }

    pub fn last_note_color(&self) -> NoteColor {
        self.last_note_color
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Called after every committed command, undo and redo.
    pub fn set_on_modified(&mut self, callback: Callback) {
        self.on_modified = Some(callback);
    }

    /// Called with `(can_undo, can_redo)` whenever the history changes.
    pub fn set_history_observer(&mut self, observer: HistoryCallback) {
        self.history.set_observer(observer);
    }

    fn modified(&self) {
        if let Some(callback) = &self.on_modified {
            callback();
        }
    }

    /// Runs and records a command.
    pub fn execute(&mut self, cmd: SceneCommand) {
        self.history.execute(cmd, &mut self.scene);
        self.modified();
    }

    /// Records a command whose effect was already applied to the scene.
    pub fn push_done(&mut self, cmd: SceneCommand) {
        self.history.push_done(cmd);
        self.modified();
    }

    pub fn undo(&mut self) -> bool {
        let changed = self.history.undo(&mut self.scene);
        if changed {
            self.modified();
        }
        changed
    }

    pub fn redo(&mut self) -> bool {
        let changed = self.history.redo(&mut self.scene);
        if changed {
            self.modified();
        }
        changed
    }

    /// Adds an object above everything present.
    pub fn add_object(&mut self, object: SceneObject) -> ObjectId {
        let object = object.with_z_index(self.scene.next_z());
        let id = object.id;
        debug!("Adding {} {}", object.type_name(), id);
        self.execute(SceneCommand::AddObject(AddObject::new(object)));
        id
    }

    /// Adds a note centered on `center` in the last used color.
    pub fn add_note(&mut self, center: Point) -> ObjectId {
        let d = &self.defaults;
        let rect = centered(center, d.note_width, d.note_height);
        let content = NoteContent::new(
            PLACEHOLDER_TEXT,
            self.last_note_color,
            d.note_font_size,
            d.note_padding,
        );
        self.add_object(SceneObject::note(rect, content))
    }

    /// Adds a text block centered on `center`.
    pub fn add_text(&mut self, center: Point) -> ObjectId {
        let d = &self.defaults;
        let rect = centered(center, d.text_width, d.text_height);
        let content = TextContent::new(
            PLACEHOLDER_TEXT,
            d.text_font_family.clone(),
            d.text_font_size,
            Rgb::BLACK,
            d.text_padding,
        );
        self.add_object(SceneObject::text(rect, content))
    }

    /// Adds the image at `path` centered on `center`, scaled down to the
    /// default maximum width if wider.
    pub fn add_image(&mut self, path: &Path, center: Point) -> Result<ObjectId, AssetError> {
        let content = ImageContent::open(path)?;
        let mut width = content.original_width;
        let mut height = content.original_height;
        let max_width = self.defaults.image_max_width;
        if width > max_width {
            height *= max_width / width;
            width = max_width;
        }
        let rect = centered(center, width, height);
        Ok(self.add_object(SceneObject::image(rect, content)))
    }

    /// Deletes every selected object as one command.
    pub fn delete_selection(&mut self) -> usize {
        let ids = self.scene.selected_ids();
        if ids.is_empty() {
            return 0;
        }
        let cmd = DeleteObjects::new(&self.scene, &ids);
        let count = cmd.entries.len();
        debug!("Deleting {} objects", count);
        self.execute(SceneCommand::DeleteObjects(cmd));
        count
    }

    /// Clones the selection above all objects and selects the clones.
    ///
    /// Each clone is recorded as its own add command.
    pub fn duplicate_selection(&mut self) -> Vec<ObjectId> {
        let originals: Vec<SceneObject> = self
            .scene
            .selected_by_z()
            .into_iter()
            .cloned()
            .collect();
        if originals.is_empty() {
            return Vec::new();
        }
        let offset = self.interaction.duplicate_offset;
        let base_z = self.scene.next_z();
        let mut clones = Vec::with_capacity(originals.len());
        for (i, original) in originals.iter().enumerate() {
            let copy = original.duplicate(offset).with_z_index(base_z + i as i64);
            clones.push(copy.id);
            self.execute(SceneCommand::AddObject(AddObject::new(copy)));
        }
        self.scene.clear_selection();
        self.scene.extend_selection(clones.iter().copied());
        clones
    }

    /// Moves the selection above every object, keeping its relative order.
    pub fn bring_to_front(&mut self) -> bool {
        let Some(max_z) = self.scene.max_z() else {
            return false;
        };
        self.restack(|i, _len| max_z + 1 + i)
    }

    /// Moves the selection below every object, keeping its relative order.
    pub fn send_to_back(&mut self) -> bool {
        let Some(min_z) = self.scene.min_z() else {
            return false;
        };
        self.restack(|i, len| min_z - len + i)
    }

    fn restack<F>(&mut self, new_z: F) -> bool
    where
        F: Fn(i64, i64) -> i64,
    {
        let selected = self.scene.selected_by_z();
        if selected.is_empty() {
            return false;
        }
        let len = selected.len() as i64;
        let ids: Vec<ObjectId> = selected.iter().map(|obj| obj.id).collect();
        let old_z: Vec<i64> = selected.iter().map(|obj| obj.z_index).collect();
        let new_z: Vec<i64> = (0..len).map(|i| new_z(i, len)).collect();
        self.execute(SceneCommand::ChangeZOrder(ChangeZOrder { ids, old_z, new_z }));
        true
    }

    /// Recolors a note and remembers the color for the next new note.
    ///
    /// Returns `false` if `id` is not a note or already has that color.
    pub fn change_note_color(&mut self, id: ObjectId, color: NoteColor) -> bool {
        let Some(note) = self.scene.get(id).and_then(SceneObject::as_note) else {
            return false;
        };
        self.last_note_color = color;
        if note.color_name == color && note.color == color.rgb() {
            return false;
        }
        let cmd = ChangeColor {
            id,
            old_color_name: note.color_name,
            old_rgb: note.color,
            new_color_name: color,
            new_rgb: color.rgb(),
        };
        self.execute(SceneCommand::ChangeColor(cmd));
        true
    }

    /// Commits the result of a text edit. Unchanged text records nothing.
    pub fn commit_text_edit(&mut self, id: ObjectId, new_text: &str) -> bool {
        let Some(old_text) = self.scene.get(id).and_then(SceneObject::editable_text) else {
            return false;
        };
        if old_text == new_text {
            return false;
        }
        let cmd = EditText {
            id,
            old_text: old_text.to_string(),
            new_text: new_text.to_string(),
        };
        self.execute(SceneCommand::EditText(cmd));
        true
    }

    /// Replaces the content with `objects`, ordered by ascending z
    /// (stable with respect to the given order). History is cleared.
    pub fn replace_objects(&mut self, mut objects: Vec<SceneObject>) {
        self.scene.clear();
        objects.sort_by_key(|obj| obj.z_index);
        for mut obj in objects {
            obj.selected = false;
            obj.hovered = false;
            let id = obj.id;
            if self.scene.push(obj).is_none() {
                debug!("Skipping duplicate object id {}", id);
            }
        }
        self.history.clear();
        info!("Loaded {} objects", self.scene.len());
        self.modified();
    }

    /// Empties the board and its history.
    pub fn clear(&mut self) {
        self.scene.clear();
        self.history.clear();
        self.modified();
    }
}

fn centered(center: Point, width: f64, height: f64) -> Rect {
    Rect::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
}

impl Default for SceneDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SceneDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneDocument")
            .field("objects", &self.scene.len())
            .field("selected", &self.scene.selection().len())
            .field("history", &self.history)
            .field("last_note_color", &self.last_note_color)
            .finish()
    }
}

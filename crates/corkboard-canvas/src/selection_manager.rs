use crate::model::{ObjectId, SceneObject};
use std::collections::HashSet;

/// Tracks which objects are selected.
///
/// The set of ids is authoritative; each object's `selected` flag mirrors
/// it so renderers and handle lookups can read the flag directly. Every
/// mutating method takes the object list and keeps both in step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionManager {
    ids: HashSet<ObjectId>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &HashSet<ObjectId> {
        &self.ids
    }

    /// True when `id` is the one and only selected object.
    pub fn is_sole(&self, id: ObjectId) -> bool {
        self.ids.len() == 1 && self.ids.contains(&id)
    }

    /// Replaces the selection with a single object.
    pub fn select_only(&mut self, objects: &mut [SceneObject], id: ObjectId) {
        self.ids.clear();
        self.ids.insert(id);
        self.sync(objects);
    }

    /// Adds or removes `id`.
    pub fn toggle(&mut self, objects: &mut [SceneObject], id: ObjectId) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
        self.sync(objects);
    }

    /// Unions `ids` into the selection.
    pub fn extend<I>(&mut self, objects: &mut [SceneObject], ids: I)
    where
        I: IntoIterator<Item = ObjectId>,
    {
        self.ids.extend(ids);
        self.sync(objects);
    }

    pub fn clear(&mut self, objects: &mut [SceneObject]) {
        self.ids.clear();
        self.sync(objects);
    }

    /// Records an object entering the scene. Its own flag decides membership.
    pub(crate) fn on_inserted(&mut self, object: &SceneObject) {
        if object.selected {
            self.ids.insert(object.id);
        }
    }

    /// Forgets an object leaving the scene. The object's flag is untouched so
    /// a later reinsert restores the same selection.
    pub(crate) fn on_removed(&mut self, id: ObjectId) {
        self.ids.remove(&id);
    }

    pub(crate) fn reset(&mut self) {
        self.ids.clear();
    }

    fn sync(&mut self, objects: &mut [SceneObject]) {
        // Drop ids that are not in the scene.
        let present: HashSet<ObjectId> = objects.iter().map(|obj| obj.id).collect();
        self.ids.retain(|id| present.contains(id));
        for obj in objects.iter_mut() {
            obj.selected = self.ids.contains(&obj.id);
        }
    }
}

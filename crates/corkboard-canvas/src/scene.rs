//! Object collection with its spatial index and selection.
//!
//! [`Scene`] is the state commands operate on. Every method that adds,
//! removes or moves an object keeps the index and the selection in step
//! with the object list.

use crate::model::{ObjectId, Point, Rect, SceneObject};
use crate::selection_manager::SelectionManager;
use crate::spatial_index::{SpatialIndex, SpatialIndexStats};

#[derive(Debug, Clone)]
pub struct Scene {
    objects: Vec<SceneObject>,
    index: SpatialIndex,
    selection: SelectionManager,
}

impl Scene {
    pub fn new(cell_size: f64) -> Self {
        Self {
            objects: Vec::new(),
            index: SpatialIndex::new(cell_size),
            selection: SelectionManager::new(),
        }
    }

    /// Objects in list order.
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn index(&self) -> &SpatialIndex {
        &self.index
    }

    pub fn index_stats(&self) -> SpatialIndexStats {
        self.index.stats()
    }

    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    pub fn position_of(&self, id: ObjectId) -> Option<usize> {
        self.objects.iter().position(|obj| obj.id == id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|obj| obj.id == id)
    }

    /// Mutable access to an object. Callers that change geometry must
    /// follow up with [`Scene::refresh`].
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|obj| obj.id == id)
    }

    /// Inserts at `position` (clamped to the list length). Returns the
    /// position actually used. An object whose id is already present
    /// replaces nothing and is dropped.
    pub fn insert_at(&mut self, position: usize, object: SceneObject) -> Option<usize> {
        if self.position_of(object.id).is_some() {
            return None;
        }
        let position = position.min(self.objects.len());
        self.index.insert(object.id, &object.bounds());
        self.selection.on_inserted(&object);
        self.objects.insert(position, object);
        Some(position)
    }

    pub fn push(&mut self, object: SceneObject) -> Option<usize> {
        self.insert_at(self.objects.len(), object)
    }

    /// Removes an object, returning its former position and the object.
    /// The hover flag is cleared; the selection flag is kept for reinsert.
    pub fn remove(&mut self, id: ObjectId) -> Option<(usize, SceneObject)> {
        let position = self.position_of(id)?;
        let mut object = self.objects.remove(position);
        object.hovered = false;
        self.index.remove(id);
        self.selection.on_removed(id);
        Some((position, object))
    }

    /// Re-buckets an object after its geometry changed.
    pub fn refresh(&mut self, id: ObjectId) {
        if let Some(bounds) = self.get(id).map(SceneObject::bounds) {
            self.index.update(id, &bounds);
        }
    }

    pub fn rebuild_index(&mut self) {
        let entries: Vec<_> = self.objects.iter().map(|obj| (obj.id, obj.bounds())).collect();
        self.index.rebuild(entries);
    }

    /// Topmost object containing the point.
    pub fn hit_test(&self, point: Point) -> Option<ObjectId> {
        let candidates = self.index.query_point(point.x, point.y);
        // max_by_key keeps the last maximum, so equal z resolves to list order.
        self.objects
            .iter()
            .filter(|obj| candidates.contains(&obj.id) && obj.contains_point(point.x, point.y))
            .max_by_key(|obj| obj.z_index)
            .map(|obj| obj.id)
    }

    /// Objects intersecting `rect`, in list order.
    pub fn query_rect(&self, rect: &Rect) -> Vec<ObjectId> {
        let candidates = self.index.query_rect(&rect.to_bounds());
        self.objects
            .iter()
            .filter(|obj| candidates.contains(&obj.id) && obj.intersects(rect))
            .map(|obj| obj.id)
            .collect()
    }

    /// Objects intersecting `rect`, sorted by ascending z (stable in list order).
    pub fn visible_objects(&self, rect: &Rect) -> Vec<&SceneObject> {
        let candidates = self.index.query_rect(&rect.to_bounds());
        let mut visible: Vec<&SceneObject> = self
            .objects
            .iter()
            .filter(|obj| candidates.contains(&obj.id) && obj.intersects(rect))
            .collect();
        visible.sort_by_key(|obj| obj.z_index);
        visible
    }

    pub fn max_z(&self) -> Option<i64> {
        self.objects.iter().map(|obj| obj.z_index).max()
    }

    pub fn min_z(&self) -> Option<i64> {
        self.objects.iter().map(|obj| obj.z_index).min()
    }

    /// z_index placing a new object above everything present.
    pub fn next_z(&self) -> i64 {
        self.max_z().map_or(0, |z| z + 1)
    }

    /// Selected objects sorted by ascending z, ties in list order.
    pub fn selected_by_z(&self) -> Vec<&SceneObject> {
        let mut selected: Vec<&SceneObject> =
            self.objects.iter().filter(|obj| obj.selected).collect();
        selected.sort_by_key(|obj| obj.z_index);
        selected
    }

    /// Selected ids in list order.
    pub fn selected_ids(&self) -> Vec<ObjectId> {
        self.objects
            .iter()
            .filter(|obj| obj.selected)
            .map(|obj| obj.id)
            .collect()
    }

    /// Bounding box of all objects.
    pub fn content_bounds(&self) -> Option<Rect> {
        self.objects
            .iter()
            .map(SceneObject::rect)
            .reduce(|acc, rect| acc.union(&rect))
    }

    pub fn select_only(&mut self, id: ObjectId) {
        self.selection.select_only(&mut self.objects, id);
    }

    pub fn toggle_selection(&mut self, id: ObjectId) {
        self.selection.toggle(&mut self.objects, id);
    }

    pub fn extend_selection<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = ObjectId>,
    {
        self.selection.extend(&mut self.objects, ids);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear(&mut self.objects);
    }

    /// Sets the hover flag on `id` alone. Returns whether anything changed.
    pub fn set_hovered(&mut self, id: Option<ObjectId>) -> bool {
        let mut changed = false;
        for obj in &mut self.objects {
            let hovered = Some(obj.id) == id;
            if obj.hovered != hovered {
                obj.hovered = hovered;
                changed = true;
            }
        }
        changed
    }

    pub fn clear(&mut self) {
        self.objects.clear();
        self.index.clear();
        self.selection.reset();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(corkboard_core::constants::SPATIAL_CELL_SIZE)
    }
}

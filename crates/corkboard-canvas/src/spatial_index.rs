//! Uniform-grid spatial index for hit-testing and culling.
//!
//! Objects are bucketed into square cells by floor-dividing their bounds
//! by the cell size. Queries return candidate sets only: an object is a
//! candidate whenever it shares a cell with the query, so callers must
//! confirm with an exact containment or intersection test.
//!
//! Bounds covering more than [`MAX_CELLS_PER_ITEM`] cells, or with
//! non-finite coordinates, are kept in an oversized set that every query
//! returns.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use corkboard_core::constants::SPATIAL_CELL_SIZE;

use crate::model::ObjectId;

/// Axis-aligned bounding box given by its extreme coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    pub fn intersects(&self, other: &Bounds) -> bool {
        !(self.max_x < other.min_x
            || other.max_x < self.min_x
            || self.max_y < other.min_y
            || other.max_y < self.min_y)
    }
}

/// Integer cell coordinate.
pub type Cell = (i64, i64);

/// Largest number of cells a single item is bucketed into.
pub const MAX_CELLS_PER_ITEM: i128 = 4096;

/// Statistics about the index occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpatialIndexStats {
    pub total_items: usize,
    pub occupied_cells: usize,
    pub max_items_per_cell: usize,
    pub oversized_items: usize,
}

/// Grid bucketing of object bounds.
///
/// Keyed by object id so the index never owns objects. Each id remembers
/// the cells it was inserted into, which makes removal independent of the
/// object's current geometry.
#[derive(Debug, Clone)]
pub struct SpatialIndex<K = ObjectId> {
    cell_size: f64,
    cells: HashMap<Cell, HashSet<K>>,
    item_cells: HashMap<K, Vec<Cell>>,
    oversized: HashSet<K>,
}

impl<K: Copy + Eq + Hash> SpatialIndex<K> {
    /// Creates an empty index. Non-positive cell sizes fall back to the default.
    pub fn new(cell_size: f64) -> Self {
        let cell_size = if cell_size > 0.0 && cell_size.is_finite() {
            cell_size
        } else {
            SPATIAL_CELL_SIZE
        };
        Self {
            cell_size,
            cells: HashMap::new(),
            item_cells: HashMap::new(),
            oversized: HashSet::new(),
        }
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn len(&self) -> usize {
        self.item_cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.item_cells.is_empty()
    }

    pub fn contains(&self, id: K) -> bool {
        self.item_cells.contains_key(&id)
    }

    fn cell_of(&self, x: f64, y: f64) -> Cell {
        (
            (x / self.cell_size).floor() as i64,
            (y / self.cell_size).floor() as i64,
        )
    }

    /// Number of cells in the inclusive range, zero if inverted.
    fn span(x0: i64, y0: i64, x1: i64, y1: i64) -> i128 {
        let w = (i128::from(x1) - i128::from(x0) + 1).max(0);
        let h = (i128::from(y1) - i128::from(y0) + 1).max(0);
        w.saturating_mul(h)
    }

    /// Cells covered by `bounds`, or `None` if they are too many to bucket.
    fn cells_covering(&self, bounds: &Bounds) -> Option<Vec<Cell>> {
        let finite = [bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return None;
        }
        let (x0, y0) = self.cell_of(bounds.min_x, bounds.min_y);
        let (x1, y1) = self.cell_of(bounds.max_x, bounds.max_y);
        let span = Self::span(x0, y0, x1, y1);
        if span > MAX_CELLS_PER_ITEM {
            return None;
        }
        let mut cells = Vec::with_capacity(span.max(1) as usize);
        for cx in x0..=x1 {
            for cy in y0..=y1 {
                cells.push((cx, cy));
            }
        }
        Some(cells)
    }

    /// Adds `id` to every cell `bounds` overlaps. Re-inserting an id
    /// replaces its previous membership.
    pub fn insert(&mut self, id: K, bounds: &Bounds) {
        self.remove(id);
        let Some(cells) = self.cells_covering(bounds) else {
            self.oversized.insert(id);
            self.item_cells.insert(id, Vec::new());
            return;
        };
        for cell in &cells {
            self.cells.entry(*cell).or_default().insert(id);
        }
        self.item_cells.insert(id, cells);
    }

    /// Removes `id` from all cells. Unknown ids are ignored.
    pub fn remove(&mut self, id: K) {
        let Some(cells) = self.item_cells.remove(&id) else {
            return;
        };
        self.oversized.remove(&id);
        for cell in cells {
            if let Some(bucket) = self.cells.get_mut(&cell) {
                bucket.remove(&id);
                if bucket.is_empty() {
                    self.cells.remove(&cell);
                }
            }
        }
    }

    /// Refreshes `id` after its geometry changed.
    pub fn update(&mut self, id: K, bounds: &Bounds) {
        self.insert(id, bounds);
    }

    /// Candidates whose cells contain the point.
    pub fn query_point(&self, x: f64, y: f64) -> HashSet<K> {
        let mut result = self.oversized.clone();
        if let Some(bucket) = self.cells.get(&self.cell_of(x, y)) {
            result.extend(bucket.iter().copied());
        }
        result
    }

    /// Candidates sharing at least one cell with `bounds`.
    pub fn query_rect(&self, bounds: &Bounds) -> HashSet<K> {
        let (x0, y0) = self.cell_of(bounds.min_x, bounds.min_y);
        let (x1, y1) = self.cell_of(bounds.max_x, bounds.max_y);
        let span = Self::span(x0, y0, x1, y1);

        let mut result = self.oversized.clone();
        // For very large queries walking the occupied cells is cheaper.
        if span > self.cells.len() as i128 {
            for ((cx, cy), bucket) in &self.cells {
                if (x0..=x1).contains(cx) && (y0..=y1).contains(cy) {
                    result.extend(bucket.iter().copied());
                }
            }
        } else {
            for cx in x0..=x1 {
                for cy in y0..=y1 {
                    if let Some(bucket) = self.cells.get(&(cx, cy)) {
                        result.extend(bucket.iter().copied());
                    }
                }
            }
        }
        result
    }

    /// Cells currently holding `id`.
    pub fn cells_of(&self, id: K) -> Option<&[Cell]> {
        self.item_cells.get(&id).map(Vec::as_slice)
    }

    /// Discards everything and reinserts the given items.
    pub fn rebuild<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = (K, Bounds)>,
    {
        self.clear();
        for (id, bounds) in items {
            self.insert(id, &bounds);
        }
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.item_cells.clear();
        self.oversized.clear();
    }

    pub fn stats(&self) -> SpatialIndexStats {
        SpatialIndexStats {
            total_items: self.item_cells.len(),
            occupied_cells: self.cells.len(),
            max_items_per_cell: self.cells.values().map(HashSet::len).max().unwrap_or(0),
            oversized_items: self.oversized.len(),
        }
    }
}

impl<K: Copy + Eq + Hash> Default for SpatialIndex<K> {
    fn default() -> Self {
        Self::new(SPATIAL_CELL_SIZE)
    }
}

//! # Corkboard Canvas
//!
//! The canvas engine behind Corkboard: an infinite, pannable and zoomable
//! plane holding sticky notes, text blocks and images, with full undo/redo.
//!
//! ## Core Components
//!
//! - **Viewport**: screen/canvas coordinate mapping, pan, zoom-to-point
//! - **Model**: [`SceneObject`] with note, text and image payloads
//! - **Spatial Index**: uniform grid for hit-testing and culling
//! - **Commands/History**: reversible mutations on a bounded stack pair
//! - **Document**: objects, selection, index and history as one unit
//! - **Interaction**: the gesture state machine driving all of the above
//! - **Renderer**: draw order over an injected [`DrawContext`]
//! - **Serialization**: flat object records and the JSON board file
//!
//! ## Architecture
//!
//! ```text
//! input events
//!   └── InteractionController (gestures, clicks, keys)
//!         ├── Viewport (screen <-> canvas)
//!         ├── Grid (snapping)
//!         └── SceneDocument
//!               ├── Scene (objects, SpatialIndex, selection)
//!               └── CommandStack<SceneCommand>
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use corkboard_canvas::{InteractionController, Modifiers};
//! use corkboard_settings::CanvasConfig;
//!
//! let mut canvas = InteractionController::new(&CanvasConfig::default());
//! canvas.set_screen_size(1200.0, 800.0);
//! let id = canvas.add_note();
//!
//! // Drag the note 30px to the right.
//! canvas.drag_begin(600.0, 400.0, Modifiers::NONE);
//! canvas.drag_end(630.0, 400.0);
//! canvas.undo();
//! ```

pub mod commands;
pub mod document;
pub mod grid;
pub mod history;
pub mod interaction;
pub mod model;
pub mod renderer;
pub mod scene;
pub mod selection_manager;
pub mod serialization;
pub mod spatial_index;
pub mod text_layout;
pub mod viewport;

pub use commands::{Command, SceneCommand};
pub use document::SceneDocument;
pub use grid::Grid;
pub use history::CommandStack;
pub use interaction::{ClickOutcome, CursorHint, GestureState, InteractionController, Key, Modifiers};
pub use model::{
    ImageContent, NoteColor, NoteContent, ObjectId, ObjectKind, Point, Rect, ResizeHandle, Rgb,
    SceneObject, TextContent,
};
pub use renderer::{render_scene, DrawContext, Frame};
pub use scene::Scene;
pub use selection_manager::SelectionManager;
pub use serialization::{BoardFile, LoadReport, ObjectRecord};
pub use spatial_index::{Bounds, SpatialIndex, SpatialIndexStats};
pub use viewport::Viewport;

//! Callback aliases shared by the Corkboard crates.
//!
//! The canvas engine is single-threaded: every mutation happens on the
//! event-processing thread, so callbacks are non-`Send` boxed closures.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use corkboard_core::types::*;
//!
//! let observer: HistoryCallback = Box::new(|can_undo, can_redo| {
//!     undo_button.set_sensitive(can_undo);
//!     redo_button.set_sensitive(can_redo);
//! });
//! ```

/// A simple callback with no parameters or return value.
pub type Callback = Box<dyn Fn()>;

/// A callback that receives two parameters.
pub type DataCallback2<T, U> = Box<dyn Fn(T, U)>;

/// Observer for undo/redo availability, called with `(can_undo, can_redo)`.
pub type HistoryCallback = DataCallback2<bool, bool>;

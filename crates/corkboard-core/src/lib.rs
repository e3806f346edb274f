//! # Corkboard Core
//!
//! Core types, constants, and error handling shared by the Corkboard crates.

pub mod constants;
pub mod error;
pub mod types;

pub use error::{AssetError, Error, RecordError, Result};

pub use types::{Callback, DataCallback2, HistoryCallback};

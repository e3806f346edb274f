//! Type system utilities and aliases.
//!
//! ## Modules
//!
//! - [`aliases`]: Observer callback aliases.

pub mod aliases;

pub use aliases::*;

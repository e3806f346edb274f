//! Error handling for Corkboard
//!
//! Provides error types for the layers that can actually fail:
//! - Record errors (decoding persisted object records)
//! - Asset errors (loading image assets from disk)
//!
//! Interactive canvas operations never return errors; invalid geometry is
//! clamped and empty selections are no-ops. Errors only surface at the
//! persistence boundary. All error types use `thiserror`.

use thiserror::Error;

/// Record error type
///
/// Represents a persisted object record that cannot be turned back into a
/// scene object. Loaders skip such records instead of aborting.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    /// The type discriminator is not one of `note`, `text`, `image`
    #[error("Unknown object type: {kind}")]
    UnknownType {
        /// The unrecognized discriminator.
        kind: String,
    },

    /// The type-specific payload could not be decoded
    #[error("Malformed {kind} payload: {reason}")]
    MalformedPayload {
        /// The object type whose payload failed to decode.
        kind: String,
        /// The decoder message.
        reason: String,
    },

    /// The object identifier is not a valid UUID
    #[error("Invalid object id '{id}'")]
    InvalidId {
        /// The rejected identifier.
        id: String,
    },

    /// A color value is not a `#RRGGBB` string
    #[error("Invalid color '{value}'")]
    InvalidColor {
        /// The rejected color text.
        value: String,
    },
}

/// Asset error type
///
/// Represents an image asset that cannot be read. Callers degrade to a
/// placeholder instead of propagating.
#[derive(Error, Debug)]
pub enum AssetError {
    /// The asset file does not exist
    #[error("Asset not found: {path}")]
    NotFound {
        /// The path that was probed.
        path: String,
    },

    /// The asset exists but could not be decoded
    #[error("Failed to decode asset {path}: {reason}")]
    Decode {
        /// The path that was probed.
        path: String,
        /// The decoder message.
        reason: String,
    },
}

/// Main error type for Corkboard
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Record error
    #[error(transparent)]
    Record(#[from] RecordError),

    /// Asset error
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding/decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a record decoding error
    pub fn is_record_error(&self) -> bool {
        matches!(self, Error::Record(_))
    }

    /// Check if this is an asset error
    pub fn is_asset_error(&self) -> bool {
        matches!(self, Error::Asset(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

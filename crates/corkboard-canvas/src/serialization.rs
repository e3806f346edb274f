//! Serialization and deserialization for board files.
//!
//! Each object maps to a flat [`ObjectRecord`]: shared geometry plus a
//! type-specific `data` payload. Records are the contract with whatever
//! stores them; [`BoardFile`] is the JSON container used by the binary.
//!
//! Loading is lenient. A record with an unknown type or a malformed
//! payload is skipped with a warning and the rest of the board loads.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

use corkboard_core::RecordError;
use corkboard_settings::ObjectDefaults;

use crate::document::SceneDocument;
use crate::interaction::InteractionController;
use crate::model::{
    ImageContent, NoteColor, NoteContent, ObjectId, ObjectKind, Rect, Rgb, SceneObject,
    TextContent,
};
use crate::viewport::Viewport;

/// Board file format version
const FILE_FORMAT_VERSION: &str = "1.0";

/// Persisted form of one scene object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub z_index: i64,
    pub data: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotePayload {
    pub text: String,
    #[serde(alias = "color")]
    pub color_name: String,
    pub font_size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPayload {
    pub text: String,
    pub font_family: String,
    pub font_size: f64,
    /// `#RRGGBB`
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePayload {
    #[serde(alias = "asset_path")]
    pub asset_reference: String,
    #[serde(default)]
    pub original_width: f64,
    #[serde(default)]
    pub original_height: f64,
}

fn payload<T: DeserializeOwned>(kind: &str, data: &serde_json::Value) -> Result<T, RecordError> {
    serde_json::from_value(data.clone()).map_err(|e| RecordError::MalformedPayload {
        kind: kind.to_string(),
        reason: e.to_string(),
    })
}

fn to_value<T: Serialize>(value: &T) -> serde_json::Value {
    // Payload structs hold only strings and numbers.
    serde_json::to_value(value).unwrap_or(serde_json::Value::Null)
}

impl SceneObject {
    /// Persisted form of this object. Selection and hover are not included.
    pub fn to_record(&self) -> ObjectRecord {
        let data = match &self.kind {
            ObjectKind::Note(note) => to_value(&NotePayload {
                text: note.text.clone(),
                color_name: note.color_name.name().to_string(),
                font_size: note.font_size,
            }),
            ObjectKind::Text(text) => to_value(&TextPayload {
                text: text.text.clone(),
                font_family: text.font_family.clone(),
                font_size: text.font_size,
                color: text.color.to_hex(),
            }),
            ObjectKind::Image(image) => to_value(&ImagePayload {
                asset_reference: image.asset_reference.clone(),
                original_width: image.original_width,
                original_height: image.original_height,
            }),
        };
        ObjectRecord {
            id: self.id.to_string(),
            kind: self.type_name().to_string(),
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            z_index: self.z_index,
            data,
        }
    }

    /// Rebuilds an object from its record, with default paddings.
    pub fn from_record(record: &ObjectRecord) -> Result<Self, RecordError> {
        Self::from_record_with(record, &ObjectDefaults::default())
    }

    /// Rebuilds an object from its record. Values that are not persisted
    /// (text padding) come from `defaults`.
    pub fn from_record_with(record: &ObjectRecord, defaults: &ObjectDefaults) -> Result<Self, RecordError> {
        let kind = match record.kind.as_str() {
            "note" => {
                let p: NotePayload = payload("note", &record.data)?;
                let color = NoteColor::from_name(&p.color_name).unwrap_or_else(|| {
                    warn!("Unknown note color '{}', using default", p.color_name);
                    NoteColor::default()
                });
                ObjectKind::Note(NoteContent::new(p.text, color, p.font_size, defaults.note_padding))
            }
            "text" => {
                let p: TextPayload = payload("text", &record.data)?;
                ObjectKind::Text(TextContent::new(
                    p.text,
                    p.font_family,
                    p.font_size,
                    Rgb::from_hex(&p.color)?,
                    defaults.text_padding,
                ))
            }
            "image" => {
                let p: ImagePayload = payload("image", &record.data)?;
                let content = if p.original_width > 0.0 && p.original_height > 0.0 {
                    ImageContent::new(p.asset_reference, p.original_width, p.original_height)
                } else {
                    // Older records may lack dimensions; probe the file once.
                    ImageContent::open(Path::new(&p.asset_reference))
                        .unwrap_or_else(|_| ImageContent::new(p.asset_reference, 0.0, 0.0))
                };
                ObjectKind::Image(content)
            }
            other => {
                return Err(RecordError::UnknownType {
                    kind: other.to_string(),
                })
            }
        };
        let rect = Rect::new(record.x, record.y, record.width, record.height);
        Ok(SceneObject::new(rect, kind)
            .with_id(ObjectId::parse(&record.id)?)
            .with_z_index(record.z_index))
    }
}

/// Outcome of loading a list of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: usize,
}

impl SceneDocument {
    /// Records for every object, in list order.
    pub fn to_records(&self) -> Vec<ObjectRecord> {
        self.objects().iter().map(SceneObject::to_record).collect()
    }

    /// Replaces the board with the given records.
    ///
    /// Image asset references must already be resolved. Records that cannot
    /// be decoded are skipped.
    pub fn load_records(&mut self, records: &[ObjectRecord]) -> LoadReport {
        let mut report = LoadReport::default();
        let mut objects = Vec::with_capacity(records.len());
        for record in records {
            match SceneObject::from_record_with(record, self.defaults()) {
                Ok(obj) => objects.push(obj),
                Err(e) => {
                    warn!("Skipping record {}: {}", record.id, e);
                    report.skipped += 1;
                }
            }
        }
        self.replace_objects(objects);
        report.loaded = self.objects().len();
        report.skipped += records.len() - report.skipped - report.loaded;
        report
    }
}

/// Board metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// Viewport state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub zoom: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl From<&Viewport> for ViewportState {
    fn from(viewport: &Viewport) -> Self {
        Self {
            zoom: viewport.zoom(),
            offset_x: viewport.offset_x(),
            offset_y: viewport.offset_y(),
        }
    }
}

impl ViewportState {
    pub fn apply_to(&self, viewport: &mut Viewport) {
        viewport.set_zoom(self.zoom, None);
        viewport.set_offset(self.offset_x, self.offset_y);
    }
}

/// Complete board file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardFile {
    pub version: String,
    pub metadata: BoardMetadata,
    pub viewport: ViewportState,
    pub objects: Vec<ObjectRecord>,
    /// Entries dropped while reading because they were not valid records.
    #[serde(skip)]
    pub skipped_entries: usize,
}

/// Shape used for reading, so one bad entry does not fail the file.
#[derive(Deserialize)]
struct RawBoardFile {
    version: String,
    metadata: BoardMetadata,
    viewport: ViewportState,
    #[serde(default)]
    objects: Vec<serde_json::Value>,
}

impl BoardFile {
    /// Captures the document and view.
    pub fn capture(name: impl Into<String>, document: &SceneDocument, viewport: &Viewport) -> Self {
        let now = Utc::now();
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            metadata: BoardMetadata {
                name: name.into(),
                created: now,
                modified: now,
            },
            viewport: ViewportState::from(viewport),
            objects: document.to_records(),
            skipped_entries: 0,
        }
    }

    /// Save board to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize board")?;

        std::fs::write(path.as_ref(), json).context("Failed to write board file")?;

        Ok(())
    }

    /// Load board from file, resolving relative image references against
    /// the file's directory.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read board file {}", path.display()))?;
        let raw: RawBoardFile =
            serde_json::from_str(&content).context("Failed to parse board file")?;

        let mut objects = Vec::with_capacity(raw.objects.len());
        let mut skipped_entries = 0;
        for value in raw.objects {
            match serde_json::from_value::<ObjectRecord>(value) {
                Ok(record) => objects.push(record),
                Err(e) => {
                    warn!("Skipping malformed object entry: {}", e);
                    skipped_entries += 1;
                }
            }
        }

        let mut board = Self {
            version: raw.version,
            metadata: raw.metadata,
            viewport: raw.viewport,
            objects,
            skipped_entries,
        };
        if let Some(base) = path.parent() {
            board.resolve_asset_paths(base);
        }
        Ok(board)
    }

    /// Makes relative image references absolute with respect to `base`.
    pub fn resolve_asset_paths(&mut self, base: &Path) {
        for record in self.objects.iter_mut().filter(|r| r.kind == "image") {
            let Some(data) = record.data.as_object_mut() else {
                continue;
            };
            for key in ["asset_reference", "asset_path"] {
                if let Some(serde_json::Value::String(reference)) = data.get_mut(key) {
                    if Path::new(reference.as_str()).is_relative() {
                        *reference = base.join(reference.as_str()).display().to_string();
                    }
                }
            }
        }
    }
}

impl InteractionController {
    /// Writes the board and current view to `path`.
    pub fn save_board(&self, path: &Path, name: &str) -> Result<()> {
        BoardFile::capture(name, self.document(), self.viewport()).save_to_file(path)
    }

    /// Replaces the board with the contents of `path`.
    pub fn open_board(&mut self, path: &Path) -> Result<LoadReport> {
        let board = BoardFile::load_from_file(path)?;
        self.cancel_gesture();
        let mut report = self.document_mut().load_records(&board.objects);
        report.skipped += board.skipped_entries;
        board.viewport.apply_to(self.viewport_mut());
        Ok(report)
    }
}

//! Persistence of whole-part colors across sessions.
//!
//! The engine reads a part's stored color when its raster is created and
//! writes it back on every whole-part recolor. Nothing else is persisted.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::StoreError;
use crate::types::{PartId, Rgba};

/// Key-value store of `part name -> color`
pub trait ColorStore {
    /// Stored color for a part, if any
    fn load(&self, part: PartId) -> Option<Rgba>;

    /// Remember a part's color
    fn save(&mut self, part: PartId, color: Rgba) -> Result<(), StoreError>;
}

/// Volatile store, used in tests and when no store path is configured
#[derive(Debug, Default, Clone)]
pub struct MemoryColorStore {
    colors: HashMap<PartId, Rgba>,
}

impl MemoryColorStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ColorStore for MemoryColorStore {
    fn load(&self, part: PartId) -> Option<Rgba> {
        self.colors.get(&part).copied()
    }

    fn save(&mut self, part: PartId, color: Rgba) -> Result<(), StoreError> {
        self.colors.insert(part, color);
        Ok(())
    }
}

/// Store backed by a small JSON object on disk:
///
/// ```json
/// { "head": "#ff0000", "left-arm": "#0000ff" }
/// ```
///
/// Unknown keys are preserved on write. The whole file is rewritten on every save.
#[derive(Debug)]
pub struct JsonColorStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonColorStore {
    /// Open a store, starting empty if the file does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Color store {} not found, starting empty", path.display());
                BTreeMap::new()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl ColorStore for JsonColorStore {
    fn load(&self, part: PartId) -> Option<Rgba> {
        let raw = self.entries.get(part.name())?;
        match raw.parse() {
            Ok(color) => Some(color),
            Err(source) => {
                let err = StoreError::InvalidColor {
                    part: part.name().to_string(),
                    source,
                };
                warn!("Ignoring stored color: {}", err);
                None
            }
        }
    }

    fn save(&mut self, part: PartId, color: Rgba) -> Result<(), StoreError> {
        self.entries.insert(part.name().to_string(), color.to_hex());
        self.flush()
    }
}

//! Model persistence: save and load trained engines.
//!
//! Provides the `ModelPersistence` trait and a `JsonFileModel`
//! implementation that stores a `FamrSnapshot` as a JSON file.
//! Floats are written with enough digits to read back bit-exact.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::engine::{Famr, FamrSnapshot};
use crate::error::{FamrError, FamrResult};

/// Write `contents` to a `.tmp` sibling of `path`, then rename it over
/// `path`. Readers never see a partially written file.
pub fn write_atomic(path: &Path, contents: impl AsRef<[u8]>) -> std::io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    std::fs::write(&tmp_path, contents)?;
    std::fs::rename(&tmp_path, path)
}

/// Storage for engine snapshots.
pub trait ModelPersistence {
    /// Save a snapshot, replacing any previous one.
    fn save(&self, snapshot: &FamrSnapshot) -> FamrResult<()>;

    /// Load the stored snapshot, or `None` if nothing was saved yet.
    fn load(&self) -> FamrResult<Option<FamrSnapshot>>;

    /// Snapshot and save an engine.
    fn save_engine(&self, engine: &Famr) -> FamrResult<()> {
        self.save(&engine.snapshot())
    }

    /// Load and validate a stored engine.
    fn load_engine(&self) -> FamrResult<Option<Famr>> {
        self.load()?.map(Famr::from_snapshot).transpose()
    }
}

/// JSON-file based model persistence. Saves go through [`write_atomic`].
pub struct JsonFileModel {
    path: PathBuf,
}

impl JsonFileModel {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ModelPersistence for JsonFileModel {
    fn save(&self, snapshot: &FamrSnapshot) -> FamrResult<()> {
        let json = serde_json::to_string_pretty(snapshot)
            .map_err(|e| FamrError::Persistence(format!("serialization failed: {}", e)))?;
        write_atomic(&self.path, json)?;
        Ok(())
    }

    fn load(&self) -> FamrResult<Option<FamrSnapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&self.path)?;
        let snapshot = serde_json::from_str(&contents)
            .map_err(|e| FamrError::Persistence(format!("deserialization failed: {}", e)))?;
        Ok(Some(snapshot))
    }
}

/// In-memory model persistence (for testing).
#[derive(Default)]
pub struct InMemoryModel {
    data: Mutex<Option<FamrSnapshot>>,
}

impl InMemoryModel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ModelPersistence for InMemoryModel {
    fn save(&self, snapshot: &FamrSnapshot) -> FamrResult<()> {
        let mut data = self
            .data
            .lock()
            .map_err(|_| FamrError::Persistence("lock poisoned".into()))?;
        *data = Some(snapshot.clone());
        Ok(())
    }

    fn load(&self) -> FamrResult<Option<FamrSnapshot>> {
        let data = self
            .data
            .lock()
            .map_err(|_| FamrError::Persistence("lock poisoned".into()))?;
        Ok(data.clone())
    }
}

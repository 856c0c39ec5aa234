//! Flat-file record store.
//!
//! The whole user base lives in one JSON document mapping username to
//! [`UserRecord`]. Every operation reloads the file and every mutation
//! rewrites it wholesale. There is no locking and no atomic rename: two
//! concurrent writers race and the last one wins.

use std::{collections::BTreeMap, fs, path::Path, path::PathBuf};

use serde::Serialize;

use crate::{ResultEngine, users::UserRecord};

/// Handle to the on-disk user data file.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Opens the store, creating an empty `{}` data file when absent.
    pub fn open(path: impl Into<PathBuf>) -> ResultEngine<Self> {
        let path = path.into();
        if !path.exists() {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, "{}")?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the whole data file.
    ///
    /// Unreadable or malformed content propagates as [`EngineError::Io`] /
    /// [`EngineError::Json`]; there is no recovery.
    ///
    /// [`EngineError::Io`]: crate::EngineError::Io
    /// [`EngineError::Json`]: crate::EngineError::Json
    pub fn load(&self) -> ResultEngine<BTreeMap<String, UserRecord>> {
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Overwrites the whole data file with the given mapping.
    ///
    /// Pretty-printed with a 4-space indent, matching the historical file
    /// format. Plain overwrite, not an atomic replace.
    pub fn save(&self, users: &BTreeMap<String, UserRecord>) -> ResultEngine<()> {
        let mut payload = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut payload, formatter);
        users.serialize(&mut serializer)?;
        fs::write(&self.path, payload)?;
        Ok(())
    }
}

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use resurrect_model::{EncryptionAdapter, EventSink, ResurrectError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::sanitize::sanitize_filename;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateKind {
    Workspace,
    Window,
    Tab,
}

impl StateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StateKind::Workspace => "workspace",
            StateKind::Window => "window",
            StateKind::Tab => "tab",
        }
    }

    pub fn from_str(s: &str) -> Option<StateKind> {
        match s {
            "workspace" => Some(StateKind::Workspace),
            "window" => Some(StateKind::Window),
            "tab" => Some(StateKind::Tab),
            _ => None,
        }
    }
}

/// A directory of JSON-encoded saved state, laid out as
/// `<base>/{workspace,window,tab}/<name>.json` plus a `current_state`
/// pointer file at the base.
pub struct Store {
    base_dir: PathBuf,
    encryption: Option<Arc<dyn EncryptionAdapter>>,
}

impl Store {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Store { base_dir: base_dir.into(), encryption: None }
    }

    /// Pass saved state through `encryption` before it hits disk, and
    /// back through it on read. `None` leaves plain JSON on disk.
    pub fn with_encryption(mut self, encryption: Option<Arc<dyn EncryptionAdapter>>) -> Self {
        self.encryption = encryption;
        self
    }

    fn dir_for(&self, kind: StateKind) -> PathBuf {
        self.base_dir.join(kind.as_str())
    }

    fn path_for(&self, kind: StateKind, name: &str) -> PathBuf {
        let sanitized = sanitize_filename(Some(name));
        self.dir_for(kind).join(format!("{sanitized}.json"))
    }

    fn current_state_path(&self) -> PathBuf {
        self.base_dir.join("current_state")
    }

    pub fn write<T: Serialize>(
        &self,
        kind: StateKind,
        name: &str,
        value: &T,
        sink: &dyn EventSink,
    ) -> Result<()> {
        sink.emit("file_io.write_state.start", Some(name));
        let result = self.write_inner(kind, name, value);
        sink.emit("file_io.write_state.finished", Some(name));
        if let Err(err) = &result {
            log::error!("failed to write {name}: {err}");
            sink.emit("resurrect.error", Some(&err.to_string()));
        }
        result
    }

    fn write_inner<T: Serialize>(&self, kind: StateKind, name: &str, value: &T) -> Result<()> {
        let dir = self.dir_for(kind);
        fs::create_dir_all(&dir).map_err(|source| ResurrectError::IoFailure {
            path: dir.display().to_string(),
            source,
        })?;
        let path = self.path_for(kind, name);
        let json = serde_json::to_string_pretty(value)?;
        let bytes = match &self.encryption {
            Some(adapter) => adapter.encrypt(json.as_bytes())?,
            None => json.into_bytes(),
        };
        fs::write(&path, bytes).map_err(|source| ResurrectError::IoFailure {
            path: path.display().to_string(),
            source,
        })
    }

    /// Returns `None` on any failure (missing file, bad JSON, a failed
    /// decrypt): read failures are reported, not unwound, per the
    /// propagation policy.
    pub fn read<T: DeserializeOwned>(
        &self,
        kind: StateKind,
        name: &str,
        sink: &dyn EventSink,
    ) -> Option<T> {
        let path = self.path_for(kind, name);
        let raw = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) => {
                log::error!("failed to read {}: {err}", path.display());
                sink.emit("resurrect.error", Some(&format!("{}: {err}", path.display())));
                return None;
            }
        };

        let decoded = match &self.encryption {
            Some(adapter) => match adapter.decrypt(&raw) {
                Ok(bytes) => bytes,
                Err(err) => {
                    log::error!("failed to decrypt {}: {err}", path.display());
                    sink.emit("resurrect.error", Some(&format!("{}: {err}", path.display())));
                    return None;
                }
            },
            None => raw,
        };

        match serde_json::from_slice(&decoded) {
            Ok(value) => Some(value),
            Err(err) => {
                log::error!("failed to parse {}: {err}", path.display());
                sink.emit("resurrect.error", Some(&format!("{}: {err}", path.display())));
                None
            }
        }
    }

    pub fn delete(&self, kind: StateKind, name: &str, sink: &dyn EventSink) -> Result<()> {
        sink.emit("state_manager.delete_state.start", Some(name));
        let path = self.path_for(kind, name);
        let result = fs::remove_file(&path).map_err(|source| ResurrectError::IoFailure {
            path: path.display().to_string(),
            source,
        });
        sink.emit("state_manager.delete_state.finished", Some(name));
        if let Err(err) = &result {
            log::error!("failed to delete {name}: {err}");
            sink.emit("resurrect.error", Some(&err.to_string()));
        }
        result
    }

    pub fn write_current_state(&self, name: &str, kind: StateKind) -> Result<()> {
        let contents = format!("{name}\n{}\n", kind.as_str());
        let path = self.current_state_path();
        fs::write(&path, contents).map_err(|source| ResurrectError::IoFailure {
            path: path.display().to_string(),
            source,
        })
    }

    /// Returns `None` if the file is absent or names an unrecognized
    /// state type — per spec, an invalid type yields a pair of nils,
    /// not an error.
    pub fn read_current_state(&self) -> Option<(String, StateKind)> {
        let path = self.current_state_path();
        let contents = fs::read_to_string(&path).ok()?;
        let mut lines = contents.lines();
        let name = lines.next()?.to_string();
        let kind = StateKind::from_str(lines.next()?)?;
        Some((name, kind))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

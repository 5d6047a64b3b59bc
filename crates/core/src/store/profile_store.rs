use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::bindings::entry::{BindingEntry, NamespaceInfo, ProfileBindings};
use crate::registry_log::RegistryLog;

/// Serialization extension for per-profile binding files.
pub const BINDINGS_EXT: &str = "json";

/// Current on-disk schema version. Files carrying any other version fail the
/// schema check and read as absent; the file is left in place.
pub const FORMAT_VERSION: u32 = 1;

/// On-disk shape of one profile file. Typed and versioned so corrupt or
/// older-format files fail decoding deterministically.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileFile {
    version: u32,
    #[serde(default)]
    saved_at: Option<DateTime<Utc>>,
    bindings: Vec<BindingEntry>,
    #[serde(default)]
    namespaces: IndexMap<String, NamespaceInfo>,
}

/// Compute the default data root for binding files: `<user data dir>/<app_id>/bindings`.
pub fn default_bindings_root(app_id: &str) -> Result<PathBuf, String> {
    let base = directories::BaseDirs::new().ok_or("Could not find user data directory")?;
    let dir = base.data_dir().join(app_id).join("bindings");
    fs::create_dir_all(&dir).map_err(|e| format!("create {}: {e}", dir.display()))?;
    Ok(dir)
}

/// File-backed storage of binding sets, one file per profile under a fixed
/// root. Profile ids are hierarchical paths like
/// `/interaction_profiles/oculus/touch_controller`; the directory tree under
/// the root mirrors their segments.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    root: PathBuf,
}

impl ProfileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File location for a profile id: leading separator stripped, segments
    /// mirrored as directories, `.json` appended. Inverse of [`Self::profile_id_for`].
    ///
    /// `.` and `..` segments are dropped so every location resolves under the
    /// root; a traversal attempt cannot place a file the store cannot later
    /// enumerate or delete.
    pub fn path_for(&self, profile_id: &str) -> PathBuf {
        let rel = profile_id.strip_prefix('/').unwrap_or(profile_id);
        let mut path = self.root.clone();
        for seg in rel
            .split('/')
            .filter(|s| !s.is_empty() && *s != "." && *s != "..")
        {
            path.push(seg);
        }
        let mut os = path.into_os_string();
        os.push(format!(".{BINDINGS_EXT}"));
        PathBuf::from(os)
    }

    /// Invert a stored file path back to its profile id. Returns `None` for
    /// paths outside the root or without the bindings extension.
    pub fn profile_id_for(&self, path: &Path) -> Option<String> {
        let rel = path.strip_prefix(&self.root).ok()?;
        let rel = rel.to_string_lossy().replace('\\', "/");
        let rel = rel.strip_suffix(&format!(".{BINDINGS_EXT}"))?;
        if rel.is_empty() {
            return None;
        }
        Some(format!("/{rel}"))
    }

    pub fn exists(&self, profile_id: &str) -> bool {
        self.path_for(profile_id).is_file()
    }

    /// Load a profile's binding set. Missing file reads as absent; a file that
    /// fails decoding or the schema version check also reads as absent and is
    /// left in place for inspection.
    ///
    /// Entry namespaces are recomputed from the action on load; the persisted
    /// namespace field is denormalized context, not authoritative input.
    pub fn load(&self, profile_id: &str, logger: &Arc<dyn RegistryLog>) -> Option<ProfileBindings> {
        let file = self.path_for(profile_id);
        let content = match fs::read_to_string(&file) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                logger.debug(&format!("no bindings file at {}", file.display()));
                return None;
            }
            Err(e) => {
                logger.warn(&format!("read {}: {e}", file.display()));
                return None;
            }
        };

        let data: ProfileFile = match serde_json::from_str(&content) {
            Ok(d) => d,
            Err(e) => {
                logger.warn(&format!(
                    "undecodable bindings file {} (left in place): {e}",
                    file.display()
                ));
                return None;
            }
        };
        if data.version != FORMAT_VERSION {
            logger.warn(&format!(
                "bindings file {} has schema version {} (expected {FORMAT_VERSION}), ignoring",
                file.display(),
                data.version
            ));
            return None;
        }

        let entries = data
            .bindings
            .into_iter()
            .map(|e| BindingEntry::new(e.action, e.input_path))
            .collect();
        Some(ProfileBindings {
            profile_id: profile_id.to_string(),
            entries,
            namespaces: data.namespaces,
        })
    }

    /// Persist a profile's binding set: parent directories created, pretty
    /// JSON with stable key order, written to a `.tmp` sibling and renamed so
    /// no reader ever sees partial JSON as final state.
    pub fn save(
        &self,
        bindings: &ProfileBindings,
        logger: &Arc<dyn RegistryLog>,
    ) -> Result<PathBuf, String> {
        let file = self.path_for(&bindings.profile_id);
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent).map_err(|e| format!("create {}: {e}", parent.display()))?;
        }

        let data = ProfileFile {
            version: FORMAT_VERSION,
            saved_at: Some(Utc::now()),
            bindings: bindings.entries.clone(),
            namespaces: bindings.namespaces.clone(),
        };
        let json = serde_json::to_string_pretty(&data)
            .map_err(|e| format!("serialize {}: {e}", bindings.profile_id))?;

        let tmp = {
            let mut os = file.clone().into_os_string();
            os.push(".tmp");
            PathBuf::from(os)
        };
        fs::write(&tmp, json).map_err(|e| format!("write {}: {e}", tmp.display()))?;
        fs::rename(&tmp, &file).map_err(|e| format!("rename {} -> {}: {e}", tmp.display(), file.display()))?;

        logger.info(&format!(
            "saved {} binding(s) for {} to {}",
            bindings.entries.len(),
            bindings.profile_id,
            file.display()
        ));
        Ok(file)
    }

    /// Enumerate every stored profile id by walking the root and inverting
    /// each file path.
    pub fn list_profiles(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.walk(&self.root, &mut out);
        out
    }

    fn walk(&self, dir: &Path, out: &mut BTreeSet<String>) {
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                self.walk(&path, out);
            } else if path.extension().and_then(|e| e.to_str()) == Some(BINDINGS_EXT) {
                if let Some(id) = self.profile_id_for(&path) {
                    out.insert(id);
                }
            }
        }
    }

    /// Delete one profile's file. Missing file is not an error.
    pub fn delete(&self, profile_id: &str) -> Result<(), String> {
        let file = self.path_for(profile_id);
        match fs::remove_file(&file) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(format!("delete {}: {e}", file.display())),
        }
    }

    /// Delete the entire root tree. Missing root is not an error.
    pub fn clear(&self) -> Result<(), String> {
        match fs::remove_dir_all(&self.root) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(format!("clear {}: {e}", self.root.display())),
        }
    }
}

//! Persistence for report artifacts.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Somewhere report artifacts can be written and later fetched by id.
pub trait ArtifactStore {
    /// Store `contents` and return the new object id.
    fn upload(&self, contents: &[u8]) -> io::Result<String>;
}

/// Stores each artifact as a file named by a fresh UUID under one directory.
#[derive(Debug, Clone)]
pub struct LocalArtifactStore {
    root: PathBuf,
}

impl LocalArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path an object id resolves to.
    pub fn path_for(&self, object_id: &str) -> PathBuf {
        self.root.join(object_id)
    }
}

impl ArtifactStore for LocalArtifactStore {
    fn upload(&self, contents: &[u8]) -> io::Result<String> {
        fs::create_dir_all(&self.root)?;

        let object_id = Uuid::new_v4().to_string();
        let path = self.path_for(&object_id);

        // Write to a temp name first so a crash never leaves a partial artifact.
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, contents)?;
        fs::rename(&temp_path, &path)?;

        log::debug!("stored artifact {} ({} bytes)", object_id, contents.len());
        Ok(object_id)
    }
}

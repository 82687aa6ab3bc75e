use crate::errors::MacroError;
use crate::slots::BYPRODUCT_EXTENSIONS;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A generated macro file and the byproducts the host compiles next to it.
///
/// Call [`ScriptArtifact::cleanup`] once the host is done with the macro. If
/// the artifact is dropped without that (an early return, a cancelled
/// future), the files are removed synchronously on drop.
#[derive(Debug)]
pub struct ScriptArtifact {
    dir: PathBuf,
    file_name: String,
    cleaned: bool,
}

impl ScriptArtifact {
    pub fn new(dir: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            file_name: file_name.into(),
            cleaned: false,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    /// Source file plus every byproduct, in deletion order
    pub fn paths(&self) -> Vec<PathBuf> {
        let source = self.path();
        let mut paths = Vec::with_capacity(1 + BYPRODUCT_EXTENSIONS.len());
        for ext in BYPRODUCT_EXTENSIONS {
            paths.push(source.with_extension(ext));
        }
        paths.insert(0, source);
        paths
    }

    /// Write the script file.
    ///
    /// Blocking: when this returns the file exists or it does not, and a drop
    /// at any later await point removes it.
    pub fn write(&self, contents: &str) -> Result<(), MacroError> {
        let path = self.path();
        info!("Writing macro script to {} ({} bytes)", path.display(), contents.len());
        std::fs::write(&path, contents).map_err(|e| MacroError::io(path, e))
    }

    /// Delete the script and its byproducts.
    ///
    /// Missing files are fine. Every path is attempted; the first failure is
    /// returned. Dropping this future part way leaves the rest to `Drop`.
    pub async fn cleanup(mut self) -> Result<(), MacroError> {
        let mut first_error = None;
        for path in self.paths() {
            if let Err(e) = remove_if_exists(&path).await {
                warn!("Failed to remove {}: {}", path.display(), e);
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
        self.cleaned = true;
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Drop for ScriptArtifact {
    fn drop(&mut self) {
        if self.cleaned {
            return;
        }
        debug!("Removing macro artifacts for {} on drop", self.file_name);
        for path in self.paths() {
            match std::fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => warn!("Failed to remove {}: {}", path.display(), e),
            }
        }
    }
}

/// Remove a file, treating "not found" as success.
pub async fn remove_if_exists(path: &Path) -> Result<(), MacroError> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {
            debug!("Removed {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(MacroError::io(path, e)),
    }
}

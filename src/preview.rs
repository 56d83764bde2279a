//! Local previews for attachments picked during an edit session.
//!
//! Each selected file is copied into a temporary directory owned by the session. The copy
//! is deleted when its attachment is removed, and the whole directory goes away when the
//! store is closed or dropped.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::TempDir;

const PREVIEW_DIR_PREFIX: &str = "taskdesk-preview-";

#[derive(Debug, Default)]
pub struct PreviewStore {
    dir: Option<TempDir>,
    staged: HashMap<String, PathBuf>,
}

impl PreviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy `source` into the session directory under `attachment_id`.
    ///
    /// The directory is created on first use.
    pub fn stage(&mut self, attachment_id: &str, source: &Path) -> Result<PathBuf> {
        let file_name = source
            .file_name()
            .ok_or_else(|| anyhow::anyhow!("Not a file: {}", source.display()))?;

        let dir = match &self.dir {
            Some(dir) => dir.path().to_path_buf(),
            None => {
                let dir = tempfile::Builder::new()
                    .prefix(PREVIEW_DIR_PREFIX)
                    .tempdir()
                    .context("Failed to create preview directory")?;
                let path = dir.path().to_path_buf();
                self.dir = Some(dir);
                path
            }
        };

        let target = dir.join(format!("{}-{}", attachment_id, file_name.to_string_lossy()));
        std::fs::copy(source, &target)
            .with_context(|| format!("Failed to copy {} for preview", source.display()))?;

        self.staged.insert(attachment_id.to_string(), target.clone());
        Ok(target)
    }

    /// Delete the preview staged for `attachment_id`. Returns false if there was none.
    pub fn release(&mut self, attachment_id: &str) -> bool {
        match self.staged.remove(attachment_id) {
            Some(path) => {
                if let Err(e) = std::fs::remove_file(&path) {
                    log::warn!("Failed to remove preview {}: {}", path.display(), e);
                }
                true
            }
            None => false,
        }
    }

    pub fn path(&self, attachment_id: &str) -> Option<&Path> {
        self.staged.get(attachment_id).map(PathBuf::as_path)
    }

    /// The session directory, once something has been staged
    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_ref().map(TempDir::path)
    }

    pub fn len(&self) -> usize {
        self.staged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    /// Remove every staged file and the session directory.
    pub fn close(mut self) -> Result<()> {
        self.staged.clear();
        if let Some(dir) = self.dir.take() {
            dir.close().context("Failed to remove preview directory")?;
        }
        Ok(())
    }
}

/// Hand a file path or URL to the desktop's default opener.
pub fn open_with_system(target: &str) -> Result<()> {
    let mut command = if cfg!(target_os = "macos") {
        let mut c = Command::new("open");
        c.arg(target);
        c
    } else if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", "", target]);
        c
    } else {
        let mut c = Command::new("xdg-open");
        c.arg(target);
        c
    };

    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to open {}", target))?;
    Ok(())
}

//! Output directory holding the rendered page and its fault-line script.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;
use crate::html::{render_fault_lines_script, render_index};
use crate::layers::FaultLineGroup;
use crate::map::QuakeMap;

/// Writes `index.html` and the fault-line script into one directory.
///
/// The index is written once per map. The fault-line script is written
/// separately whenever boundaries are available, so a late-arriving feed
/// never forces the index to be regenerated.
#[derive(Debug, Clone)]
pub struct SiteWriter {
    dir: PathBuf,
    fault_line_script: String,
}

impl SiteWriter {
    /// Prepare `dir` (created if missing) for the given map configuration.
    pub fn create(dir: impl AsRef<Path>, fault_line_script: &str) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            fault_line_script: fault_line_script.to_string(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn index_path(&self) -> PathBuf {
        self.dir.join("index.html")
    }

    pub fn fault_lines_path(&self) -> PathBuf {
        self.dir.join(&self.fault_line_script)
    }

    /// Write the page. Any fault-line script left over from an earlier run is
    /// removed so the page never shows stale boundaries.
    pub fn write_index(&self, map: &QuakeMap) -> Result<PathBuf> {
        let stale = self.fault_lines_path();
        if stale.exists() {
            fs::remove_file(&stale)?;
        }

        let path = self.index_path();
        fs::write(&path, render_index(map)?)?;
        info!("map written to {}", path.display());
        Ok(path)
    }

    /// Write the fault-line script for the group's current contents.
    pub fn write_fault_lines(&self, group: &FaultLineGroup) -> Result<PathBuf> {
        let path = self.fault_lines_path();
        fs::write(&path, render_fault_lines_script(group)?)?;
        info!("{} plate boundaries written to {}", group.len(), path.display());
        Ok(path)
    }
}

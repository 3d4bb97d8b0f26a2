// ── Device sources ──
//
// Where the candidate MAC list comes from. A readable device file always
// wins; only when it is absent (or unreadable) is the operator asked.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use siteforge_api::InventoryDevice;

use crate::error::CoreError;

pub const MAC_PROMPT: &str = "Enter \",\" separated list of device MACs to add to site";

/// The operator's terminal.
///
/// The CLI implements this with interactive prompts; tests substitute a
/// scripted double.
pub trait Operator {
    /// Ask a question and return the entered line.
    fn ask(&mut self, prompt: &str) -> Result<String, CoreError>;

    /// Show the unassigned inventory before asking for MACs.
    fn present_inventory(&mut self, devices: &[InventoryDevice]);
}

/// Which provider produced the candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    File(PathBuf),
    Prompt,
}

/// A provider of raw, unvalidated MAC candidates.
pub trait DeviceSource {
    fn read_candidates(&mut self, pool: &[InventoryDevice]) -> Result<Vec<String>, CoreError>;

    fn kind(&self) -> SourceKind;
}

// ── File provider ───────────────────────────────────────────────────

/// Candidates read from a line-delimited file, one MAC per line.
#[derive(Debug)]
pub struct FileDeviceSource {
    path: PathBuf,
    contents: String,
}

impl FileDeviceSource {
    /// Read the file up front.
    ///
    /// Returns `None` when the file is missing or unreadable; that is the
    /// signal to fall back to the prompt, not an error.
    pub fn open(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => {
                info!(path = %path.display(), "reading device list from file");
                Some(Self {
                    path: path.to_path_buf(),
                    contents,
                })
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "no usable device file");
                None
            }
        }
    }
}

impl DeviceSource for FileDeviceSource {
    fn read_candidates(&mut self, _pool: &[InventoryDevice]) -> Result<Vec<String>, CoreError> {
        Ok(self
            .contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect())
    }

    fn kind(&self) -> SourceKind {
        SourceKind::File(self.path.clone())
    }
}

// ── Prompt provider ─────────────────────────────────────────────────

/// Candidates typed by the operator as one comma-separated line.
pub struct PromptDeviceSource<'a> {
    operator: &'a mut dyn Operator,
}

impl<'a> PromptDeviceSource<'a> {
    pub fn new(operator: &'a mut dyn Operator) -> Self {
        Self { operator }
    }
}

impl DeviceSource for PromptDeviceSource<'_> {
    fn read_candidates(&mut self, pool: &[InventoryDevice]) -> Result<Vec<String>, CoreError> {
        self.operator.present_inventory(pool);
        let line = self.operator.ask(MAC_PROMPT)?;
        Ok(split_candidates(&line))
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Prompt
    }
}

/// Split an operator entry on commas. Pieces are kept raw so validation
/// can report them exactly as typed.
pub fn split_candidates(line: &str) -> Vec<String> {
    line.split(',').map(str::to_owned).collect()
}

/// Pick the device source for this run.
pub fn select_source<'a>(
    device_file: &Path,
    operator: &'a mut dyn Operator,
) -> Box<dyn DeviceSource + 'a> {
    match FileDeviceSource::open(device_file) {
        Some(file) => Box::new(file),
        None => Box::new(PromptDeviceSource::new(operator)),
    }
}

//! Output destinations.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default directory the bundle runtime collects outputs from.
pub const DEFAULT_OUTPUTS_DIR: &str = "/cnab/app/porter/outputs";

/// Receives captured output values, once per declared name.
pub trait OutputSink {
    fn write_output(&mut self, name: &str, value: &[u8]) -> io::Result<()>;
}

/// Writes each output to `<dir>/<name>`.
#[derive(Debug, Clone)]
pub struct FileOutputSink {
    dir: PathBuf,
}

impl FileOutputSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Default for FileOutputSink {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUTS_DIR)
    }
}

impl OutputSink for FileOutputSink {
    fn write_output(&mut self, name: &str, value: &[u8]) -> io::Result<()> {
        // Output names become file names; refuse anything that would escape the directory.
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid output name '{}'", name),
            ));
        }

        fs::create_dir_all(&self.dir)?;
        fs::write(self.dir.join(name), value)
    }
}

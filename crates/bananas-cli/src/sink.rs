//! Desktop sink: writes artifacts and opens printable reports.

use std::path::PathBuf;

use bananas_core::{ArtifactSink, DirectorySink, PrintableDocument, Result};
use tracing::warn;

pub struct DesktopSink {
    inner: DirectorySink,
    open_documents: bool,
}

impl DesktopSink {
    pub fn new(output_dir: PathBuf, open_documents: bool) -> Self {
        Self {
            inner: DirectorySink::new(output_dir),
            open_documents,
        }
    }
}

impl ArtifactSink for DesktopSink {
    fn save(&mut self, filename: &str, bytes: &[u8]) -> Result<()> {
        self.inner.save(filename, bytes)?;
        if let Some(path) = self.inner.last_written() {
            eprintln!("Exported to: {}", path.display());
        }
        Ok(())
    }

    fn present(&mut self, document: &PrintableDocument) -> Result<()> {
        self.inner.present(document)?;
        let Some(path) = self.inner.last_written() else {
            return Ok(());
        };
        eprintln!("Printable report: {}", path.display());

        if self.open_documents
            && let Err(e) = open::that(path)
        {
            // The file is already written; the user can open it manually.
            warn!("Failed to open {}: {}", path.display(), e);
        }
        Ok(())
    }

    fn notify(&mut self, message: &str) {
        eprintln!("{}", message);
    }
}

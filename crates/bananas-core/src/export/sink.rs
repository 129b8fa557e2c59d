use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::PrintableDocument;
use crate::error::Result;

/// Host capability that receives generated artifacts.
pub trait ArtifactSink {
    /// Store a file artifact (a download in a browser host).
    fn save(&mut self, filename: &str, bytes: &[u8]) -> Result<()>;

    /// Render or print a document.
    fn present(&mut self, document: &PrintableDocument) -> Result<()>;

    /// Show a user-facing notice.
    fn notify(&mut self, message: &str);
}

/// A call recorded by [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    Saved { filename: String, bytes: Vec<u8> },
    Presented(PrintableDocument),
    Notified(String),
}

/// Sink that keeps every call in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    events: Vec<SinkEvent>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SinkEvent] {
        &self.events
    }

    pub fn saved(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.events.iter().filter_map(|e| match e {
            SinkEvent::Saved { filename, bytes } => Some((filename.as_str(), bytes.as_slice())),
            _ => None,
        })
    }

    pub fn presented(&self) -> impl Iterator<Item = &PrintableDocument> {
        self.events.iter().filter_map(|e| match e {
            SinkEvent::Presented(doc) => Some(doc),
            _ => None,
        })
    }

    pub fn notices(&self) -> impl Iterator<Item = &str> {
        self.events.iter().filter_map(|e| match e {
            SinkEvent::Notified(message) => Some(message.as_str()),
            _ => None,
        })
    }
}

impl ArtifactSink for MemorySink {
    fn save(&mut self, filename: &str, bytes: &[u8]) -> Result<()> {
        self.events.push(SinkEvent::Saved {
            filename: filename.to_string(),
            bytes: bytes.to_vec(),
        });
        Ok(())
    }

    fn present(&mut self, document: &PrintableDocument) -> Result<()> {
        self.events.push(SinkEvent::Presented(document.clone()));
        Ok(())
    }

    fn notify(&mut self, message: &str) {
        self.events.push(SinkEvent::Notified(message.to_string()));
    }
}

/// Keep a filename to a single path component inside the sink directory.
pub fn sanitize_filename(filename: &str) -> String {
    let cleaned: String = filename
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if matches!(cleaned.as_str(), "" | "." | "..") {
        "_".to_string()
    } else {
        cleaned
    }
}

/// Sink that writes artifacts into a directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    base_dir: PathBuf,
    last_written: Option<PathBuf>,
}

impl DirectorySink {
    pub fn new<P: Into<PathBuf>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.into(),
            last_written: None,
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path of the most recently written artifact.
    pub fn last_written(&self) -> Option<&Path> {
        self.last_written.as_deref()
    }

    fn write_file(&mut self, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.base_dir)?;
        let path = self.base_dir.join(sanitize_filename(filename));
        fs::write(&path, bytes)?;
        self.last_written = Some(path.clone());
        Ok(path)
    }
}

impl ArtifactSink for DirectorySink {
    fn save(&mut self, filename: &str, bytes: &[u8]) -> Result<()> {
        let path = self.write_file(filename, bytes)?;
        info!("Saved {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }

    fn present(&mut self, document: &PrintableDocument) -> Result<()> {
        let path = self.write_file(&document.filename, document.html.as_bytes())?;
        info!("Wrote printable report to {}", path.display());
        Ok(())
    }

    fn notify(&mut self, message: &str) {
        warn!("{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> PrintableDocument {
        PrintableDocument {
            filename: "Rapor_Budi_2025-06-01.html".to_string(),
            title: "Rapor Budi".to_string(),
            html: "<html></html>".to_string(),
        }
    }

    #[test]
    fn test_memory_sink_records_calls_in_order() {
        let mut sink = MemorySink::new();
        sink.notify("hello");
        sink.save("a.csv", b"x").unwrap();
        sink.present(&document()).unwrap();

        assert_eq!(sink.events().len(), 3);
        assert_eq!(sink.notices().collect::<Vec<_>>(), vec!["hello"]);
        assert_eq!(sink.saved().next(), Some(("a.csv", b"x".as_slice())));
        assert_eq!(sink.presented().count(), 1);
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(
            sanitize_filename("Rapor_Budi/Andi_2025-06-01.csv"),
            "Rapor_Budi_Andi_2025-06-01.csv"
        );
        assert_eq!(sanitize_filename("../../x.csv"), ".._.._x.csv");
        assert_eq!(sanitize_filename("a\\b:c.csv"), "a_b_c.csv");
        assert_eq!(sanitize_filename(".."), "_");
        assert_eq!(sanitize_filename(""), "_");
        assert_eq!(
            sanitize_filename("Rapor_Budi_Santoso_2025-06-01.csv"),
            "Rapor_Budi_Santoso_2025-06-01.csv"
        );
    }

    #[test]
    fn test_directory_sink_stays_in_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("reports");
        let mut sink = DirectorySink::new(&out);

        sink.save("Rapor_Budi/Andi_2025-06-01.csv", b"a").unwrap();
        assert!(out.join("Rapor_Budi_Andi_2025-06-01.csv").is_file());

        sink.save("../../escaped.csv", b"b").unwrap();
        let written = sink.last_written().unwrap();
        assert_eq!(written.parent(), Some(out.as_path()));
        assert!(!dir.path().join("escaped.csv").exists());
    }

    #[test]
    fn test_directory_sink_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("reports");
        let mut sink = DirectorySink::new(&out);

        sink.save("a.csv", b"content").unwrap();
        assert_eq!(fs::read(out.join("a.csv")).unwrap(), b"content");

        sink.present(&document()).unwrap();
        let written = out.join("Rapor_Budi_2025-06-01.html");
        assert_eq!(fs::read_to_string(&written).unwrap(), "<html></html>");
        assert_eq!(sink.last_written(), Some(written.as_path()));
    }
}

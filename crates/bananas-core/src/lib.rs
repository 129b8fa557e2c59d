pub mod config;
pub mod dispatch;
pub mod error;
pub mod export;
pub mod grade;
pub mod service;
pub mod storage;

pub use config::{Config, ExportConfig, StoreConfig};
pub use dispatch::{Directory, Dispatcher, JsonDirectory, Request, Response, Student};
pub use error::{Error, Result};
pub use export::{
    Artifact, ArtifactSink, DirectorySink, ExportOutcome, MemorySink, PrintableDocument,
    SinkEvent, format_report_console, generate_csv, generate_report_json,
};
pub use grade::{Period, SubjectRecord, overall_average, subject_average};
pub use service::GradeExportService;
pub use storage::{GRADES_KEY, GradeRepository, LocalStore, MemoryRepository, StoreRepository};

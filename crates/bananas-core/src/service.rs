//! Grade export service.
//!
//! Ties the repository, the averaging rules, the artifact formats and the
//! sink together. The service never writes to the repository.

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::config::{APP_NAME, ExportConfig};
use crate::error::{Error, Result};
use crate::export::{
    Artifact, ArtifactSink, DEFAULT_LEARNER_NAME, EMPTY_EXPORT_NOTICE, ExportOutcome,
    PrintableDocument, csv_filename, display_learner_name, document_filename, generate_csv,
    render_printable_document,
};
use crate::grade::{self, SubjectRecord};
use crate::storage::GradeRepository;

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

pub struct GradeExportService<R, S> {
    repository: R,
    sink: S,
    app_name: String,
    default_learner: String,
    clock: Box<dyn Fn() -> NaiveDate>,
}

impl<R: GradeRepository, S: ArtifactSink> GradeExportService<R, S> {
    pub fn new(repository: R, sink: S) -> Self {
        Self {
            repository,
            sink,
            app_name: APP_NAME.to_string(),
            default_learner: DEFAULT_LEARNER_NAME.to_string(),
            clock: Box::new(local_today),
        }
    }

    pub fn with_config(mut self, config: &ExportConfig) -> Self {
        self.app_name = config.app_name.clone();
        self.default_learner = config.default_learner.clone();
        self
    }

    /// Replace the date source used for filenames and title blocks.
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> NaiveDate + 'static,
    {
        self.clock = Box::new(clock);
        self
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    /// Stored grade set, or an empty set when it is missing or unreadable.
    pub fn load_grade_set(&self) -> Vec<SubjectRecord> {
        match self.repository.load() {
            Ok(records) => {
                debug!("Loaded {} subject records", records.len());
                records
            }
            Err(e @ Error::StorageRead { .. }) => {
                debug!("{}, using empty grade set", e);
                Vec::new()
            }
            Err(e) => {
                warn!("Failed to load grade set: {}, using empty grade set", e);
                Vec::new()
            }
        }
    }

    pub fn subject_average(&self, record: &SubjectRecord) -> f64 {
        grade::subject_average(record)
    }

    pub fn overall_average(&self, records: &[SubjectRecord]) -> f64 {
        grade::overall_average(records)
    }

    /// Learner name used in reports, falling back to the configured default.
    pub fn learner_name<'a>(&'a self, name: Option<&'a str>) -> &'a str {
        display_learner_name(name, &self.default_learner)
    }

    /// Build the CSV report and hand it to the sink.
    pub fn export_delimited_text(
        &mut self,
        learner_name: Option<&str>,
        records: &[SubjectRecord],
    ) -> Result<ExportOutcome<Artifact>> {
        if records.is_empty() {
            self.sink.notify(EMPTY_EXPORT_NOTICE);
            return Ok(ExportOutcome::NothingToExport);
        }

        let learner = self.learner_name(learner_name).to_string();
        let artifact = Artifact {
            filename: csv_filename(&learner, self.today()),
            bytes: generate_csv(records).into_bytes(),
        };

        self.sink.save(&artifact.filename, &artifact.bytes)?;
        info!(
            "Exported {} subjects to {}",
            records.len(),
            artifact.filename
        );
        Ok(ExportOutcome::Exported(artifact))
    }

    /// Build the printable report and ask the sink to present it.
    pub fn export_printable_document(
        &mut self,
        learner_name: Option<&str>,
        records: &[SubjectRecord],
    ) -> Result<ExportOutcome<PrintableDocument>> {
        if records.is_empty() {
            self.sink.notify(EMPTY_EXPORT_NOTICE);
            return Ok(ExportOutcome::NothingToExport);
        }

        let learner = self.learner_name(learner_name).to_string();
        let date = self.today();
        let document = PrintableDocument {
            filename: document_filename(&learner, date),
            title: format!("Rapor {} - {}", learner, self.app_name),
            html: render_printable_document(&self.app_name, &learner, date, records),
        };

        self.sink.present(&document)?;
        info!("Presented printable report {}", document.filename);
        Ok(ExportOutcome::Exported(document))
    }
}

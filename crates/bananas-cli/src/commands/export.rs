//! Export command for writing grade reports.

use std::path::PathBuf;

use anyhow::Result;
use bananas_core::{Config, GradeExportService, generate_report_json};

use super::open_repository;
use crate::cli::ExportFormat;
use crate::sink::DesktopSink;

/// Export the stored grade set in the requested format
pub fn run(
    config: &Config,
    learner: Option<&str>,
    format: ExportFormat,
    output_dir: Option<PathBuf>,
    no_open: bool,
) -> Result<()> {
    let repository = open_repository(config)?;
    let output_dir = output_dir.unwrap_or_else(|| config.export.output_dir.clone());
    let sink = DesktopSink::new(output_dir, config.export.open_documents && !no_open);
    let mut service = GradeExportService::new(repository, sink).with_config(&config.export);

    let records = service.load_grade_set();
    eprintln!("Loaded {} subjects", records.len());

    // An empty grade set is reported through the sink, not as an error.
    match format {
        ExportFormat::Csv => {
            service.export_delimited_text(learner, &records)?;
        }
        ExportFormat::Html => {
            service.export_printable_document(learner, &records)?;
        }
        ExportFormat::Json => {
            let learner = service.learner_name(learner);
            println!("{}", generate_report_json(learner, service.today(), &records)?);
        }
    }

    Ok(())
}

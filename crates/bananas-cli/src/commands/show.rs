//! Show command implementation.

use anyhow::Result;
use bananas_core::{Config, GradeExportService, MemorySink, format_report_console};

use super::open_repository;

/// Print the stored grade set
pub fn run(config: &Config, learner: Option<&str>) -> Result<()> {
    let repository = open_repository(config)?;
    let service =
        GradeExportService::new(repository, MemorySink::new()).with_config(&config.export);
    let records = service.load_grade_set();

    let learner = service.learner_name(learner);
    println!("{}", format_report_console(learner, &records));
    Ok(())
}

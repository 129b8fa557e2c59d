//! Export formats for a learner's grade set.

mod document;
mod sink;

pub use document::{PrintableDocument, escape_html, render_printable_document};
pub use sink::{ArtifactSink, DirectorySink, MemorySink, SinkEvent, sanitize_filename};

use std::fmt::Write as _;

use chrono::NaiveDate;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::grade::{
    Period, SubjectRecord, format_average, format_score, overall_average, subject_average,
};

/// Byte-order marker so spreadsheet tools detect UTF-8.
pub const UTF8_BOM: &str = "\u{FEFF}";

/// Learner name used when none is given.
pub const DEFAULT_LEARNER_NAME: &str = "Siswa";

/// Label of the trailing summary row.
pub const OVERALL_LABEL: &str = "Rata-rata Keseluruhan";

/// Notice shown when an export is requested with no records.
pub const EMPTY_EXPORT_NOTICE: &str = "Tidak ada data nilai untuk diekspor";

/// A generated file ready to be handed to a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Result of an export request.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome<T> {
    Exported(T),
    NothingToExport,
}

impl<T> ExportOutcome<T> {
    pub fn is_exported(&self) -> bool {
        matches!(self, Self::Exported(_))
    }

    /// Treat an empty export set as an error.
    pub fn into_artifact(self) -> Result<T> {
        match self {
            Self::Exported(artifact) => Ok(artifact),
            Self::NothingToExport => Err(Error::EmptyExportSet),
        }
    }
}

/// Learner name to print, falling back to `default` when missing or blank.
pub fn display_learner_name<'a>(name: Option<&'a str>, default: &'a str) -> &'a str {
    match name {
        Some(n) if !n.trim().is_empty() => n,
        _ => default,
    }
}

/// Replace every run of whitespace with a single underscore.
fn filename_safe(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push('_');
            }
            in_whitespace = true;
        } else {
            out.push(c);
            in_whitespace = false;
        }
    }
    out
}

fn report_basename(learner: &str, date: NaiveDate) -> String {
    format!("Rapor_{}_{}", filename_safe(learner), date.format("%Y-%m-%d"))
}

/// `Rapor_<learner>_<YYYY-MM-DD>.csv`
pub fn csv_filename(learner: &str, date: NaiveDate) -> String {
    format!("{}.csv", report_basename(learner, date))
}

/// `Rapor_<learner>_<YYYY-MM-DD>.html`
pub fn document_filename(learner: &str, date: NaiveDate) -> String {
    format!("{}.html", report_basename(learner, date))
}

/// Column labels shared by the CSV and the printable table.
pub fn report_columns() -> Vec<&'static str> {
    let mut columns = vec!["No", "Mata Pelajaran"];
    columns.extend(Period::ALL.iter().map(|p| p.label()));
    columns.push("Rata-rata");
    columns
}

fn escape_csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r')
    {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn csv_line<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|f| escape_csv_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

pub fn format_csv_header() -> String {
    csv_line(&report_columns())
}

/// Cells of one subject row: sequence number, name, slots, average.
pub fn subject_row_cells(position: usize, record: &SubjectRecord) -> Vec<String> {
    let mut cells = vec![position.to_string(), record.name.clone()];
    cells.extend(record.scores.iter().map(|s| format_score(*s)));
    cells.push(format_average(subject_average(record)));
    cells
}

/// One subject row; `position` is 1-based.
pub fn format_csv_row(position: usize, record: &SubjectRecord) -> String {
    csv_line(&subject_row_cells(position, record))
}

/// Summary row: empty prefix cells, the label, then the overall average.
pub fn format_csv_summary_row(records: &[SubjectRecord]) -> String {
    let width = report_columns().len();
    let mut cells = vec![String::new(); width - 2];
    cells.push(OVERALL_LABEL.to_string());
    cells.push(format_average(overall_average(records)));
    csv_line(&cells)
}

/// Full CSV text including the byte-order marker.
pub fn generate_csv(records: &[SubjectRecord]) -> String {
    let mut content = String::from(UTF8_BOM);
    content.push_str(&format_csv_header());
    content.push('\n');
    for (i, record) in records.iter().enumerate() {
        content.push_str(&format_csv_row(i + 1, record));
        content.push('\n');
    }
    content.push_str(&format_csv_summary_row(records));
    content.push('\n');
    content
}

/// Subject entry for JSON export
#[derive(Debug, Serialize)]
pub struct SubjectJson {
    pub id: String,
    pub name: String,
    pub scores: Vec<Option<f64>>,
    pub average: f64,
}

/// Report for JSON export
#[derive(Debug, Serialize)]
pub struct ReportJson {
    pub learner: String,
    pub date: String,
    pub subjects: Vec<SubjectJson>,
    pub overall_average: f64,
}

/// Generate report JSON string (for stdout output)
pub fn generate_report_json(
    learner: &str,
    date: NaiveDate,
    records: &[SubjectRecord],
) -> Result<String> {
    let subjects = records
        .iter()
        .map(|r| SubjectJson {
            id: r.id.clone(),
            name: r.name.clone(),
            scores: r.scores.to_vec(),
            average: subject_average(r),
        })
        .collect();

    let report = ReportJson {
        learner: learner.to_string(),
        date: date.format("%Y-%m-%d").to_string(),
        subjects,
        overall_average: overall_average(records),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

fn format_colored_average(average: f64) -> String {
    let text = format_average(average);
    if average == 0.0 {
        text.dimmed().to_string()
    } else {
        text.bold().to_string()
    }
}

/// Format the grade set for console display with aligned columns.
pub fn format_report_console(learner: &str, records: &[SubjectRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{} {}", "RAPOR:".bold(), learner);

    if records.is_empty() {
        let _ = writeln!(out, "  {}", EMPTY_EXPORT_NOTICE.dimmed());
        return out;
    }

    let name_width = records
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Mata Pelajaran".len());

    let _ = write!(out, "{:>3}  {:<name_width$}", "No", "Mata Pelajaran");
    for period in Period::ALL {
        let _ = write!(out, " {:>6}", period.label());
    }
    let _ = writeln!(out, " {:>9}", "Rata-rata");

    for (i, record) in records.iter().enumerate() {
        let _ = write!(out, "{:>3}  {:<name_width$}", i + 1, record.name);
        for score in record.scores {
            let _ = write!(out, " {:>6}", format_score(score));
        }
        // Pad by hand: escape codes would skew width-based alignment.
        let average = subject_average(record);
        let padding = 9usize.saturating_sub(format_average(average).len());
        let _ = writeln!(
            out,
            " {}{}",
            " ".repeat(padding),
            format_colored_average(average)
        );
    }

    let _ = writeln!(
        out,
        "{:>width$}: {}",
        OVERALL_LABEL,
        format_colored_average(overall_average(records)),
        width = 5 + name_width + 7 * Period::ALL.len()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<SubjectRecord> {
        vec![
            SubjectRecord::new(
                "mtk",
                "Matematika",
                [Some(80.0), Some(0.0), None, Some(90.0), Some(-5.0)],
            ),
            SubjectRecord::new("ipa", "IPA", [Some(70.0), None, None, None, None]),
        ]
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn test_csv_filename() {
        assert_eq!(
            csv_filename("Budi Santoso", date()),
            "Rapor_Budi_Santoso_2025-06-01.csv"
        );
    }

    #[test]
    fn test_filename_collapses_whitespace_runs() {
        assert_eq!(
            csv_filename("Siti  Nur\tAisyah", date()),
            "Rapor_Siti_Nur_Aisyah_2025-06-01.csv"
        );
        assert_eq!(
            document_filename("Budi Santoso", date()),
            "Rapor_Budi_Santoso_2025-06-01.html"
        );
    }

    #[test]
    fn test_display_learner_name_default() {
        assert_eq!(display_learner_name(None, DEFAULT_LEARNER_NAME), "Siswa");
        assert_eq!(display_learner_name(Some(""), DEFAULT_LEARNER_NAME), "Siswa");
        assert_eq!(display_learner_name(Some("   "), "Murid"), "Murid");
        assert_eq!(display_learner_name(Some("Budi"), "Murid"), "Budi");
    }

    #[test]
    fn test_csv_header() {
        assert_eq!(
            format_csv_header(),
            "No,Mata Pelajaran,S1,S2,S3,S4,S5,Rata-rata"
        );
    }

    #[test]
    fn test_csv_row_keeps_raw_values() {
        let records = sample_records();
        assert_eq!(
            format_csv_row(1, &records[0]),
            "1,Matematika,80,0,-,90,-5,85.00"
        );
        assert_eq!(format_csv_row(2, &records[1]), "2,IPA,70,-,-,-,-,70.00");
    }

    #[test]
    fn test_csv_summary_row() {
        assert_eq!(
            format_csv_summary_row(&sample_records()),
            ",,,,,,Rata-rata Keseluruhan,80.00"
        );
    }

    #[test]
    fn test_csv_summary_row_rounds_half_up() {
        let records = vec![
            SubjectRecord::new("a", "A", [Some(80.0); 5]),
            SubjectRecord::new("b", "B", [Some(80.0), Some(80.0), Some(81.0), None, None]),
        ];
        assert_eq!(
            format_csv_summary_row(&records),
            ",,,,,,Rata-rata Keseluruhan,80.13"
        );
    }

    #[test]
    fn test_csv_quotes_special_names() {
        let record = SubjectRecord::new("x", "Seni, Budaya \"SBdP\"", [None; 5]);
        assert_eq!(
            format_csv_row(1, &record),
            "1,\"Seni, Budaya \"\"SBdP\"\"\",-,-,-,-,-,0.00"
        );
    }

    #[test]
    fn test_generate_csv_layout() {
        let csv = generate_csv(&sample_records());
        assert!(csv.starts_with(UTF8_BOM));

        let lines: Vec<&str> = csv.trim_start_matches(UTF8_BOM).lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "No,Mata Pelajaran,S1,S2,S3,S4,S5,Rata-rata");
        assert_eq!(lines[3], ",,,,,,Rata-rata Keseluruhan,80.00");
    }

    #[test]
    fn test_generate_report_json() {
        let json = generate_report_json("Budi", date(), &sample_records()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["learner"], "Budi");
        assert_eq!(value["date"], "2025-06-01");
        assert_eq!(value["subjects"][0]["average"], 85.0);
        assert_eq!(value["subjects"][0]["scores"][2], serde_json::Value::Null);
        assert_eq!(value["overall_average"], 80.0);
    }

    #[test]
    fn test_format_report_console_contains_subjects() {
        let output = format_report_console("Budi", &sample_records());
        assert!(output.contains("Budi"));
        assert!(output.contains("Matematika"));
        assert!(output.contains("85.00"));
        assert!(output.contains(OVERALL_LABEL));
        assert!(output.contains("80.00"));
    }

    #[test]
    fn test_format_report_console_empty() {
        let output = format_report_console(DEFAULT_LEARNER_NAME, &[]);
        assert!(output.contains("Siswa"));
        assert!(output.contains(EMPTY_EXPORT_NOTICE));
    }

    #[test]
    fn test_export_outcome_into_artifact() {
        let outcome: ExportOutcome<Artifact> = ExportOutcome::NothingToExport;
        assert!(!outcome.is_exported());
        assert!(matches!(outcome.into_artifact(), Err(Error::EmptyExportSet)));
    }
}

//! Printable HTML rendering of a grade report.

use std::fmt::Write as _;

use chrono::NaiveDate;

use super::{OVERALL_LABEL, report_columns, subject_row_cells};
use crate::grade::{SubjectRecord, format_average, overall_average};

const STYLE: &str = r#"
  body { font-family: "Segoe UI", Arial, sans-serif; margin: 32px; color: #1f2937; }
  .header { text-align: center; margin-bottom: 24px; border-bottom: 3px solid #f59e0b; padding-bottom: 12px; }
  .header h1 { margin: 0; font-size: 26px; color: #b45309; }
  .header p { margin: 4px 0; font-size: 14px; }
  table { width: 100%; border-collapse: collapse; font-size: 13px; }
  th, td { border: 1px solid #d1d5db; padding: 8px; text-align: center; }
  th { background: #fef3c7; }
  td.subject { text-align: left; }
  tr.total td { background: #fde68a; font-weight: bold; }
  @media print { body { margin: 12px; } }
"#;

/// A rendered document handed to a sink for presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintableDocument {
    pub filename: String,
    pub title: String,
    pub html: String,
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a self-contained, styled report that prints itself on load.
pub fn render_printable_document(
    app_name: &str,
    learner: &str,
    date: NaiveDate,
    records: &[SubjectRecord],
) -> String {
    let app_name = escape_html(app_name);
    let learner = escape_html(learner);
    let date = date.format("%Y-%m-%d");

    let mut html = String::new();
    let _ = writeln!(html, "<!DOCTYPE html>");
    let _ = writeln!(html, "<html lang=\"id\">");
    let _ = writeln!(html, "<head>");
    let _ = writeln!(html, "<meta charset=\"utf-8\">");
    let _ = writeln!(html, "<title>Rapor {} - {}</title>", learner, app_name);
    let _ = writeln!(html, "<style>{}</style>", STYLE);
    let _ = writeln!(html, "</head>");
    let _ = writeln!(html, "<body onload=\"window.print()\">");

    let _ = writeln!(html, "<div class=\"header\">");
    let _ = writeln!(html, "<h1>{}</h1>", app_name);
    let _ = writeln!(html, "<p>Laporan Nilai Akademik</p>");
    let _ = writeln!(html, "<p><strong>Nama:</strong> {}</p>", learner);
    let _ = writeln!(html, "<p><strong>Tanggal:</strong> {}</p>", date);
    let _ = writeln!(html, "</div>");

    let _ = writeln!(html, "<table>");
    let _ = write!(html, "<thead><tr>");
    for column in report_columns() {
        let _ = write!(html, "<th>{}</th>", column);
    }
    let _ = writeln!(html, "</tr></thead>");

    let _ = writeln!(html, "<tbody>");
    for (i, record) in records.iter().enumerate() {
        let cells = subject_row_cells(i + 1, record);
        let _ = write!(html, "<tr>");
        for (col, cell) in cells.iter().enumerate() {
            if col == 1 {
                let _ = write!(html, "<td class=\"subject\">{}</td>", escape_html(cell));
            } else {
                let _ = write!(html, "<td>{}</td>", escape_html(cell));
            }
        }
        let _ = writeln!(html, "</tr>");
    }

    let span = report_columns().len() - 1;
    let _ = writeln!(
        html,
        "<tr class=\"total\"><td colspan=\"{}\">{}</td><td>{}</td></tr>",
        span,
        OVERALL_LABEL,
        format_average(overall_average(records))
    );
    let _ = writeln!(html, "</tbody>");
    let _ = writeln!(html, "</table>");
    let _ = writeln!(html, "</body>");
    let _ = writeln!(html, "</html>");
    html
}

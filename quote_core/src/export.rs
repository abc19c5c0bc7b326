//! # Summary Export
//!
//! Builds the summary table of a quote and writes it as an `.xlsx` workbook.
//!
//! ## Architecture
//!
//! - [`build_summary_table`] turns an [`AggregateState`] into ordered rows
//! - [`serialize_to_spreadsheet`] renders rows into workbook bytes
//!   (one sheet named `Summary`, header first)
//! - [`export_summary`] names the file after the current time and writes it
//!
//! ## Sheet Layout
//!
//! ```text
//! Category | Description       | Amount
//! Kitchen  | Total with GST    | kitchen wood + accessories
//! Wardrobe | Total with GST    | wardrobe wood + accessories
//! Services | Total without GST | ...
//! Services | Total with GST    | ...
//! Services | Discount          | ...
//! Services | Handling Fee      | ...
//!          | Grand Total       | ...
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use quote_core::aggregate::AggregateState;
//! use quote_core::export::export_summary;
//! use std::path::Path;
//!
//! let state = AggregateState::default();
//! let path = export_summary(&state, Path::new("."))?;
//! println!("wrote {}", path.display());
//! # Ok::<(), quote_core::errors::QuoteError>(())
//! ```

use std::fmt;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};
use rust_xlsxwriter::{Format, Workbook};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::aggregate::AggregateState;
use crate::category::Section;
use crate::errors::{QuoteError, QuoteResult};

/// Name of the single worksheet
pub const SUMMARY_SHEET: &str = "Summary";

/// Column headers of the summary sheet
pub const SUMMARY_HEADER: [&str; 3] = ["Category", "Description", "Amount"];

/// One data line of the summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryLine {
    pub category: String,
    pub description: String,
    pub amount: f64,
}

impl SummaryLine {
    fn new(category: &str, description: &str, amount: f64) -> Self {
        SummaryLine {
            category: category.to_string(),
            description: description.to_string(),
            amount,
        }
    }
}

/// A row of the summary sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SummaryRow {
    Header,
    Line(SummaryLine),
}

/// A single sheet cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    Text(&'a str),
    Number(f64),
}

impl SummaryRow {
    pub fn cells(&self) -> [Cell<'_>; 3] {
        match self {
            SummaryRow::Header => SUMMARY_HEADER.map(Cell::Text),
            SummaryRow::Line(line) => [
                Cell::Text(&line.category),
                Cell::Text(&line.description),
                Cell::Number(line.amount),
            ],
        }
    }
}

impl fmt::Display for SummaryRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryRow::Header => write!(
                f,
                "{:<10} {:<20} {:>14}",
                SUMMARY_HEADER[0], SUMMARY_HEADER[1], SUMMARY_HEADER[2]
            ),
            SummaryRow::Line(line) => write!(
                f,
                "{:<10} {:<20} {:>14.2}",
                line.category, line.description, line.amount
            ),
        }
    }
}

/// Ordered summary rows for an aggregate, header first and grand total last.
///
/// # Example
///
/// ```rust
/// use quote_core::aggregate::AggregateState;
/// use quote_core::export::{build_summary_table, SummaryRow};
///
/// let rows = build_summary_table(&AggregateState::default());
/// assert_eq!(rows.len(), 8);
/// assert_eq!(rows[0], SummaryRow::Header);
/// ```
pub fn build_summary_table(state: &AggregateState) -> Vec<SummaryRow> {
    let services = state.services();
    vec![
        SummaryRow::Header,
        SummaryRow::Line(SummaryLine::new(
            Section::Kitchen.label(),
            "Total with GST",
            state.section_total(Section::Kitchen),
        )),
        SummaryRow::Line(SummaryLine::new(
            Section::Wardrobe.label(),
            "Total with GST",
            state.section_total(Section::Wardrobe),
        )),
        SummaryRow::Line(SummaryLine::new("Services", "Total without GST", services.without_gst)),
        SummaryRow::Line(SummaryLine::new("Services", "Total with GST", services.with_gst)),
        SummaryRow::Line(SummaryLine::new("Services", "Discount", services.discount_total)),
        SummaryRow::Line(SummaryLine::new("Services", "Handling Fee", services.handling_fee)),
        SummaryRow::Line(SummaryLine::new("", "Grand Total", state.grand_total())),
    ]
}

/// Render rows into the bytes of an `.xlsx` workbook.
pub fn serialize_to_spreadsheet(rows: &[SummaryRow]) -> QuoteResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SUMMARY_SHEET)?;
    worksheet.set_column_width(0, 12)?;
    worksheet.set_column_width(1, 20)?;
    worksheet.set_column_width(2, 14)?;

    for (index, row) in rows.iter().enumerate() {
        let row_num = u32::try_from(index).map_err(|_| QuoteError::ExportError {
            reason: format!("too many summary rows: {}", rows.len()),
        })?;
        let is_header = matches!(row, SummaryRow::Header);

        for (col, cell) in (0u16..).zip(row.cells()) {
            match cell {
                // Leave blank cells empty rather than writing ""
                Cell::Text("") => {}
                Cell::Text(text) if is_header => {
                    worksheet.write_string_with_format(row_num, col, text, &bold)?;
                }
                Cell::Text(text) => {
                    worksheet.write_string(row_num, col, text)?;
                }
                Cell::Number(n) => {
                    worksheet.write_number(row_num, col, n)?;
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// File name for an export made at `at`: `summary-YYYY-MM-DD-HHMMSS.xlsx`.
///
/// # Example
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use quote_core::export::summary_file_name;
///
/// let at = Utc.with_ymd_and_hms(2025, 3, 7, 9, 5, 2).unwrap();
/// assert_eq!(summary_file_name(&at), "summary-2025-03-07-090502.xlsx");
/// ```
pub fn summary_file_name<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    at.format("summary-%Y-%m-%d-%H%M%S.xlsx").to_string()
}

/// Export the summary into `dir`, named after the current local time.
///
/// Date and time in the file name both come from the same local timestamp,
/// so an export just after local midnight carries the new local date even
/// where the UTC date is still the previous day.
///
/// Returns the path of the written file. Write failures are returned
/// unchanged as [`QuoteError::FileError`].
pub fn export_summary(state: &AggregateState, dir: &Path) -> QuoteResult<PathBuf> {
    export_summary_at(state, dir, &Local::now())
}

/// Export the summary into `dir`, named after `at`.
pub fn export_summary_at<Tz>(state: &AggregateState, dir: &Path, at: &DateTime<Tz>) -> QuoteResult<PathBuf>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let rows = build_summary_table(state);
    let bytes = serialize_to_spreadsheet(&rows)?;
    let path = dir.join(summary_file_name(at));
    write_file(&path, &bytes)?;
    info!(path = %path.display(), bytes = bytes.len(), grand_total = state.grand_total(), "summary exported");
    Ok(path)
}

/// Write to a `.tmp` sibling, sync, then rename into place.
fn write_file(path: &Path, bytes: &[u8]) -> QuoteResult<()> {
    let tmp_path = path.with_extension("xlsx.tmp");

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        QuoteError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(bytes).map_err(|e| {
        QuoteError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        QuoteError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        QuoteError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::ServicesTotals;
    use crate::category::Category;
    use calamine::{open_workbook_from_rs, DataType, Reader, Xlsx};
    use chrono::{FixedOffset, Utc};
    use std::io::Cursor;

    fn example_state() -> AggregateState {
        let mut state = AggregateState::new();
        state.set_category_sum(Category::WardrobeWood, 100.0);
        state.set_category_sum(Category::WardrobeAccessories, 50.0);
        state.set_category_sum(Category::KitchenWood, 200.0);
        state.set_category_sum(Category::KitchenAccessories, 0.0);
        state.set_services(ServicesTotals {
            without_gst: 300.0,
            with_gst: 330.0,
            discount_total: 30.0,
            handling_fee: 20.0,
        });
        state
    }

    fn amount(row: &SummaryRow) -> f64 {
        match row {
            SummaryRow::Line(line) => line.amount,
            SummaryRow::Header => panic!("header has no amount"),
        }
    }

    #[test]
    fn test_summary_table_rows() {
        let rows = build_summary_table(&example_state());
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0], SummaryRow::Header);
        assert_eq!(amount(&rows[1]), 200.0);
        assert_eq!(amount(&rows[2]), 150.0);
        assert_eq!(amount(&rows[3]), 300.0);
        assert_eq!(amount(&rows[4]), 330.0);
        assert_eq!(amount(&rows[5]), 30.0);
        assert_eq!(amount(&rows[6]), 20.0);
        assert_eq!(
            rows[7].cells(),
            [Cell::Text(""), Cell::Text("Grand Total"), Cell::Number(670.0)]
        );
    }

    #[test]
    fn test_row_labels() {
        let rows = build_summary_table(&example_state());
        let labels: Vec<_> = rows[1..]
            .iter()
            .map(|row| match row.cells() {
                [Cell::Text(c), Cell::Text(d), _] => format!("{}/{}", c, d),
                other => panic!("unexpected cells {:?}", other),
            })
            .collect();
        assert_eq!(
            labels,
            vec![
                "Kitchen/Total with GST",
                "Wardrobe/Total with GST",
                "Services/Total without GST",
                "Services/Total with GST",
                "Services/Discount",
                "Services/Handling Fee",
                "/Grand Total",
            ]
        );
    }

    #[test]
    fn test_workbook_contents() {
        let bytes = serialize_to_spreadsheet(&build_summary_table(&example_state())).unwrap();
        let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();
        assert_eq!(workbook.sheet_names(), vec![SUMMARY_SHEET.to_string()]);

        let range = workbook.worksheet_range(SUMMARY_SHEET).unwrap();
        assert_eq!(range.get_size(), (8, 3));

        let header: Vec<_> = (0..3)
            .map(|c| range.get((0, c)).and_then(|d| d.get_string()).unwrap_or_default().to_string())
            .collect();
        assert_eq!(header, vec!["Category", "Description", "Amount"]);

        assert_eq!(range.get((1, 0)).and_then(|d| d.get_string()), Some("Kitchen"));
        assert_eq!(range.get((7, 1)).and_then(|d| d.get_string()), Some("Grand Total"));
        assert_eq!(range.get((7, 2)).and_then(|d| d.as_f64()), Some(670.0));
    }

    #[test]
    fn test_file_name_format() {
        let at = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 8).unwrap();
        assert_eq!(summary_file_name(&at), "summary-2024-12-31-235908.xlsx");
    }

    #[test]
    fn test_file_name_uses_one_timestamp() {
        // 00:15 at +05:30 is still 2024-12-31 in UTC
        let offset = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let at = offset.with_ymd_and_hms(2025, 1, 1, 0, 15, 0).unwrap();
        assert_eq!(summary_file_name(&at), "summary-2025-01-01-001500.xlsx");
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let path = export_summary_at(&example_state(), dir.path(), &at).unwrap();

        assert_eq!(path, dir.path().join("summary-2025-01-02-030405.xlsx"));
        assert!(path.exists());
        assert!(!path.with_extension("xlsx.tmp").exists());
        let bytes = fs::read(&path).unwrap();
        // xlsx is a zip container
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_export_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = export_summary(&example_state(), &missing).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_display_rows() {
        let rows = build_summary_table(&example_state());
        assert!(rows[0].to_string().starts_with("Category"));
        assert!(rows[7].to_string().contains("670.00"));
    }
}

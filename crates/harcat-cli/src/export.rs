//! Spreadsheet export of extracted product records.
//!
//! The format follows the export path's extension: `.csv` writes a plain CSV
//! file, anything else an `.xlsx` workbook with a single `Products` sheet.
//! Both write a header row of [`COLUMNS`] and one row per record, every cell
//! as text. xlsx cells longer than Excel's per-cell limit are truncated with
//! a warning rather than failing the export.

use std::path::Path;

use anyhow::Context;
use harcat_core::{ProductRecord, COLUMNS};
use rust_xlsxwriter::Workbook;

const SHEET_NAME: &str = "Products";
/// Excel's per-cell string limit, in characters.
const XLSX_MAX_CELL_CHARS: usize = 32_767;

/// Writes `records` to `path` in encounter order.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub(crate) fn export_records(path: &Path, records: &[ProductRecord]) -> anyhow::Result<()> {
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    let written = if is_csv {
        write_csv(path, records)
    } else {
        write_xlsx(path, records)
    };
    written.with_context(|| format!("cannot export products to {}", path.display()))?;

    tracing::info!(path = %path.display(), rows = records.len(), "exported products");
    Ok(())
}

fn write_csv(path: &Path, records: &[ProductRecord]) -> anyhow::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    // Header written explicitly so an empty batch still gets one.
    writer.write_record(COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_xlsx(path: &Path, records: &[ProductRecord]) -> anyhow::Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, header) in (0u16..).zip(COLUMNS) {
        worksheet.write_string(0, col, header)?;
    }
    for (row, record) in (1u32..).zip(records) {
        for (col, cell) in (0u16..).zip(record.cells()) {
            let text = xlsx_cell(cell);
            if text.len() < cell.len() {
                tracing::warn!(
                    sku = %record.sku,
                    column = COLUMNS[usize::from(col)],
                    chars = cell.chars().count(),
                    "truncating cell to the xlsx limit"
                );
            }
            worksheet.write_string(row, col, text)?;
        }
    }

    workbook.save(path)?;
    Ok(())
}

/// Clips `cell` to at most [`XLSX_MAX_CELL_CHARS`] characters.
fn xlsx_cell(cell: &str) -> &str {
    match cell.char_indices().nth(XLSX_MAX_CELL_CHARS) {
        Some((end, _)) => &cell[..end],
        None => cell,
    }
}

#[cfg(test)]
mod tests {
    use harcat_core::sentinel;

    use super::*;

    fn record(sku: &str, description: &str) -> ProductRecord {
        ProductRecord {
            sku: sku.to_string(),
            name: "NIKE Air".to_string(),
            price: "300".to_string(),
            description: description.to_string(),
            category: "Shoes".to_string(),
            brand: "NIKE".to_string(),
            source_file: "capture.har".to_string(),
            image_path: sentinel::NO_IMAGE.to_string(),
            availability: sentinel::NO_AVAILABILITY.to_string(),
            url: sentinel::NO_URL.to_string(),
        }
    }

    #[test]
    fn csv_export_writes_header_and_rows_in_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("products.csv");
        export_records(&path, &[record("1", "~300dh~"), record("2", "a, b")]).expect("export");

        let text = std::fs::read_to_string(&path).expect("read export");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "sku,name,price,description,category,brand,Source File,Image Path,availability,url"
        );
        assert!(lines[1].starts_with("1,NIKE Air,300,~300dh~,Shoes,NIKE,capture.har,No image"));
        assert!(lines[2].starts_with("2,NIKE Air,300,\"a, b\","));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn csv_export_of_no_records_still_writes_header() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("empty.CSV");
        export_records(&path, &[]).expect("export");
        let text = std::fs::read_to_string(&path).expect("read export");
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn xlsx_export_creates_workbook() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("product_data.xlsx");
        export_records(&path, &[record("1", "~300dh~")]).expect("export");

        let bytes = std::fs::read(&path).expect("read export");
        // xlsx files are zip containers.
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn xlsx_export_truncates_oversized_cells_instead_of_failing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("product_data.xlsx");
        let long_description = format!("~300dh~ {}", "é".repeat(40_000));
        export_records(&path, &[record("1", &long_description)]).expect("export");
        assert!(path.exists());
    }

    #[test]
    fn xlsx_cell_clips_on_char_boundaries() {
        let long = "é".repeat(XLSX_MAX_CELL_CHARS + 5);
        assert_eq!(xlsx_cell(&long).chars().count(), XLSX_MAX_CELL_CHARS);
        let exact = "a".repeat(XLSX_MAX_CELL_CHARS);
        assert_eq!(xlsx_cell(&exact), exact);
        assert_eq!(xlsx_cell("short"), "short");
    }

    #[test]
    fn export_into_missing_directory_fails_with_context() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent").join("out.csv");
        let err = export_records(&path, &[]).unwrap_err();
        assert!(format!("{err:#}").contains("cannot export products"));
    }
}

//! Spreadsheet flattening.
//!
//! Reads the first sheet of a workbook and spills every row to a temporary
//! CSV file with the run's separator and quote character, every field
//! quoted. The temp file is owned by the caller and removed when dropped,
//! whether or not the run succeeds.

use anyhow::Context;
use calamine::{open_workbook_auto, DataType, Reader};
use std::path::Path;
use tempfile::NamedTempFile;

pub fn spill_to_csv(
    path: &Path,
    column_sep: u8,
    string_sep: u8,
) -> anyhow::Result<NamedTempFile> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("failed to open workbook '{}'", path.display()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| anyhow::anyhow!("workbook '{}' contains no sheets", path.display()))?
        .with_context(|| format!("failed to read first sheet of '{}'", path.display()))?;

    let spill = NamedTempFile::new().context("failed to create temporary conversion file")?;

    let mut writer = csv::WriterBuilder::new()
        .delimiter(column_sep)
        .quote(string_sep)
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(
            spill
                .as_file()
                .try_clone()
                .context("failed to open temporary conversion file for writing")?,
        );

    for row in range.rows() {
        let cells: Vec<String> = row
            .iter()
            .map(|cell| cell.as_string().unwrap_or_else(|| cell.to_string()))
            .collect();
        writer.write_record(&cells)?;
    }

    writer
        .flush()
        .context("failed to flush converted spreadsheet data")?;

    Ok(spill)
}

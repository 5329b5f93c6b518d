//! Row sources: uniform streaming access to tabular input files.
//!
//! Both input formats are surfaced as the same thing, an iterator of raw
//! string rows. Delimited text is read directly; spreadsheet workbooks are
//! flattened to a temporary CSV first (see [`xls`]) so the generator never
//! has to care where rows come from.

mod xls;

use anyhow::Context;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tempfile::NamedTempFile;

/// Input file format. Always configured explicitly, never sniffed from
/// file content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
    /// Delimited text
    #[default]
    Csv,
    /// Spreadsheet workbook, first sheet only
    Xls,
}

impl std::str::FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(InputFormat::Csv),
            "xls" | "xlsx" => Ok(InputFormat::Xls),
            _ => Err(format!(
                "Unknown input format: {}. Valid options: csv, xls",
                s
            )),
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Csv => write!(f, "csv"),
            InputFormat::Xls => write!(f, "xls"),
        }
    }
}

/// Compression format detected from file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
    Bzip2,
    Xz,
    Zstd,
}

impl Compression {
    /// Detect compression format from file extension
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("gz" | "gzip") => Compression::Gzip,
            Some("bz2" | "bzip2") => Compression::Bzip2,
            Some("xz" | "lzma") => Compression::Xz,
            Some("zst" | "zstd") => Compression::Zstd,
            _ => Compression::None,
        }
    }

    /// Wrap a reader with the appropriate decompressor
    pub fn wrap_reader(&self, reader: Box<dyn Read>) -> anyhow::Result<Box<dyn Read>> {
        Ok(match self {
            Compression::None => reader,
            Compression::Gzip => Box::new(flate2::read::GzDecoder::new(reader)),
            Compression::Bzip2 => Box::new(bzip2::read::BzDecoder::new(reader)),
            Compression::Xz => Box::new(xz2::read::XzDecoder::new(reader)),
            Compression::Zstd => Box::new(zstd::stream::read::Decoder::new(reader)?),
        })
    }
}

/// Streaming reader producing one `Vec<String>` per input row, header
/// included as the first row.
///
/// Records are length-checked: a data row with a different cell count than
/// the first record is a fatal format error.
pub struct RowReader {
    records: csv::Reader<Box<dyn Read>>,
    // Keeps the spilled spreadsheet on disk until reading finishes;
    // dropped (and deleted) with the reader on every exit path.
    spill: Option<NamedTempFile>,
}

impl RowReader {
    /// Open `path` as a row source of the given format.
    pub fn open(
        path: &Path,
        format: InputFormat,
        column_sep: u8,
        string_sep: u8,
    ) -> anyhow::Result<Self> {
        let (input, spill): (Box<dyn Read>, Option<NamedTempFile>) = match format {
            InputFormat::Csv => {
                let file = File::open(path)
                    .with_context(|| format!("cannot open input file '{}'", path.display()))?;
                let reader = Compression::from_path(path).wrap_reader(Box::new(file))?;
                (reader, None)
            }
            InputFormat::Xls => {
                let spill = xls::spill_to_csv(path, column_sep, string_sep)?;
                let file = spill
                    .reopen()
                    .context("failed to reopen converted spreadsheet data")?;
                (Box::new(file), Some(spill))
            }
        };

        let records = csv::ReaderBuilder::new()
            .delimiter(column_sep)
            .quote(string_sep)
            .has_headers(false)
            .from_reader(input);

        Ok(Self { records, spill })
    }

    /// Path of the temporary conversion file backing a spreadsheet source,
    /// if there is one. It disappears when the reader is dropped.
    pub fn spill_path(&self) -> Option<&Path> {
        self.spill.as_ref().map(|s| s.path())
    }
}

impl Iterator for RowReader {
    type Item = anyhow::Result<Vec<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut record = csv::StringRecord::new();
        match self.records.read_record(&mut record) {
            Ok(true) => Some(Ok(record.iter().map(str::to_string).collect())),
            Ok(false) => None,
            Err(e) => Some(Err(anyhow::Error::new(e).context("malformed input record"))),
        }
    }
}

//! Core transcoding engine: turns a stream of rows into batched SQL
//! INSERT statements.
//!
//! The first row of the source is the header; its cells become the column
//! list shared by every statement. Data rows are grouped into blocks of
//! `block_size` value tuples per statement. The final block is always
//! closed with a `;` even when the source runs out mid-block, so the
//! output is loadable as-is.

mod normalize;

pub use normalize::{normalize_field_name, normalize_value};

use std::io::Write;

/// Settings for one generation run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Target table for the INSERT statements
    pub table: String,
    /// Column separator of the delimited input
    pub column_sep: char,
    /// String delimiter (quote character) of the delimited input
    pub string_sep: char,
    /// Number of value tuples per INSERT statement
    pub block_size: usize,
}

impl GeneratorConfig {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column_sep: ',',
            string_sep: '"',
            block_size: 1,
        }
    }

    pub fn with_separators(mut self, column_sep: char, string_sep: char) -> Self {
        self.column_sep = column_sep;
        self.string_sep = string_sep;
        self
    }

    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.table.is_empty() {
            anyhow::bail!("table name must not be empty");
        }
        if self.block_size == 0 {
            anyhow::bail!("block size must be at least 1");
        }
        if self.column_sep == self.string_sep {
            anyhow::bail!(
                "column separator and string delimiter must differ (both are '{}')",
                self.column_sep
            );
        }
        Ok(())
    }
}

/// Statistics from a generation run
#[derive(Debug, Default)]
pub struct GenerateStats {
    /// Data rows converted to value tuples (the header is not counted)
    pub rows_processed: u64,
    /// INSERT statements written
    pub statements_written: u64,
}

/// Consume `rows` and write batched INSERT statements to `out`.
///
/// The iterator yields raw rows, header first. An empty source produces no
/// output. Row errors from the source abort the run.
pub fn generate<I, W>(rows: I, config: &GeneratorConfig, out: &mut W) -> anyhow::Result<GenerateStats>
where
    I: IntoIterator<Item = anyhow::Result<Vec<String>>>,
    W: Write,
{
    let mut stats = GenerateStats::default();
    let mut rows = rows.into_iter();

    // First row is the header; an empty source produces no output at all.
    let fields = match rows.next() {
        Some(header) => header?
            .iter()
            .map(|c| normalize_field_name(c))
            .collect::<Vec<_>>()
            .join(", "),
        None => return Ok(stats),
    };

    let mut block_pos: usize = 1;
    let mut block_open = false;

    for row in rows {
        let row = row?;

        let tuple = row
            .iter()
            .map(|c| normalize_value(c, config.string_sep))
            .collect::<Vec<_>>()
            .join(", ");

        if block_pos == 1 {
            write!(
                out,
                "INSERT INTO {} ({}) VALUES\n\t ({})\n",
                config.table, fields, tuple
            )?;
            stats.statements_written += 1;
        } else {
            write!(out, "\t,({})\n", tuple)?;
        }
        block_open = true;

        if block_pos == config.block_size {
            out.write_all(b";\n")?;
            block_pos = 1;
            block_open = false;
        } else {
            block_pos += 1;
        }

        stats.rows_processed += 1;
    }

    // Close a statement the source left open mid-block
    if block_open {
        out.write_all(b";\n")?;
    }

    Ok(stats)
}

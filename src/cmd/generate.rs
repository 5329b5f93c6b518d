//! Generate command CLI handler.

use crate::generator::{self, GeneratorConfig};
use crate::profile::{FormatSettings, ProfileStore};
use crate::source::{InputFormat, RowReader};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

#[allow(clippy::too_many_arguments)]
pub fn run(
    file: PathBuf,
    table: String,
    output: PathBuf,
    profile: Option<String>,
    profile_file: Option<PathBuf>,
    column_sep: String,
    string_sep: String,
    block_size: usize,
    format: String,
) -> anyhow::Result<()> {
    if !file.exists() {
        anyhow::bail!("Input file '{}' not found", file.display());
    }

    let format = format
        .parse::<InputFormat>()
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let mut settings = FormatSettings {
        column_sep,
        string_sep,
        block_size,
    };

    if let Some(ref name) = profile {
        let path = match profile_file {
            Some(p) => p,
            None => ProfileStore::default_path().ok_or_else(|| {
                anyhow::anyhow!("no profile file location available on this system")
            })?,
        };

        let store = ProfileStore::load(&path)?;
        let entry = store.get(name).ok_or_else(|| {
            anyhow::anyhow!("Profile '{}' not found in '{}'", name, path.display())
        })?;

        settings = settings.apply_profile(entry);
    }

    let column_sep = single_char(&settings.column_sep, "column separator")?;
    let string_sep = single_char(&settings.string_sep, "string delimiter")?;

    let config = GeneratorConfig::new(table)
        .with_separators(column_sep as char, string_sep as char)
        .with_block_size(settings.block_size);
    config.validate()?;

    let rows = RowReader::open(&file, format, column_sep, string_sep)?;

    let out = File::create(&output).map_err(|e| {
        anyhow::anyhow!("cannot create output file '{}': {}", output.display(), e)
    })?;
    let mut out = BufWriter::new(out);

    let stats = generator::generate(rows, &config, &mut out)?;
    out.flush()?;

    eprintln!(
        "Processed {} rows, wrote {} INSERT statements to {}",
        stats.rows_processed,
        stats.statements_written,
        output.display()
    );

    Ok(())
}

/// Parse a separator flag into its single ASCII byte.
fn single_char(value: &str, what: &str) -> anyhow::Result<u8> {
    let mut bytes = value.bytes();
    match (bytes.next(), bytes.next()) {
        (Some(b), None) if b.is_ascii() => Ok(b),
        _ => anyhow::bail!("{} must be a single ASCII character, got '{}'", what, value),
    }
}

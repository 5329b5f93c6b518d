mod generate;
mod profiles;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "insgen")]
#[command(version)]
#[command(about = "Convert CSV and spreadsheet data files into SQL INSERT statements", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate INSERT statements from a data file
    Generate {
        /// Input data file. CSV inputs support .gz, .bz2, .xz, .zst compression
        file: PathBuf,

        /// Table name used in the INSERT statements
        #[arg(short, long)]
        table: String,

        /// Output SQL file
        #[arg(short, long)]
        output: PathBuf,

        /// Profile name for the input file layout (non-empty profile
        /// settings override the flags below)
        #[arg(short, long)]
        profile: Option<String>,

        /// Alternate profile file (default: profiles.dat next to the
        /// executable, then the user config directory)
        #[arg(long)]
        profile_file: Option<PathBuf>,

        /// Input file column separator
        #[arg(long, default_value = ",")]
        column_sep: String,

        /// Input file string delimiter
        #[arg(long, default_value = "\"")]
        string_sep: String,

        /// Number of value tuples per INSERT statement
        #[arg(short, long, default_value_t = 1)]
        block_size: usize,

        /// Input format: csv or xls (explicit, never detected from content)
        #[arg(short, long, default_value = "csv")]
        format: String,
    },

    /// List the profiles available in the profile file
    Profiles {
        /// Alternate profile file
        #[arg(long)]
        profile_file: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            file,
            table,
            output,
            profile,
            profile_file,
            column_sep,
            string_sep,
            block_size,
            format,
        } => generate::run(
            file,
            table,
            output,
            profile,
            profile_file,
            column_sep,
            string_sep,
            block_size,
            format,
        ),
        Commands::Profiles { profile_file } => profiles::run(profile_file),
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "insgen", &mut io::stdout());
            Ok(())
        }
    }
}

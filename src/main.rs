use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use colf::engine::core::column::compression::CompressionAlgo;
use colf::engine::core::column::format::FormatVersion;
use colf::engine::core::read::ColfReader;
use colf::engine::core::write::{ColfWriter, WriteOptions};
use colf::engine::errors::ColfError;
use colf::logging;
use colf::shared::config::{Settings, load_settings};
use colf::shared::csv_io::{read_csv_path, write_columns_csv, write_rows_csv};
use tracing::info;

#[derive(Parser)]
#[command(name = "colf")]
#[command(about = "Columnar container files: convert CSV, read back selected columns", long_about = None)]
struct Cli {
    /// Config file (defaults to $COLF_CONFIG, then ./config)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
#[command(rename_all = "snake_case")]
enum Command {
    /// Convert a CSV file into a COLF file
    CsvToCustom {
        input: PathBuf,
        output: PathBuf,
        /// zlib, lz4 or zstd
        #[arg(long)]
        compression: Option<CompressionAlgo>,
        #[arg(long)]
        level: Option<i32>,
        /// 1 (legacy string offsets) or 2 (cumulative string offsets)
        #[arg(long = "format-version")]
        format_version: Option<u8>,
    },
    /// Convert a COLF file back into CSV
    CustomToCsv { input: PathBuf, output: PathBuf },
    /// Print the named columns as CSV on stdout
    ReadColumns {
        input: PathBuf,
        /// Comma-separated column names
        columns: String,
    },
    /// Print the header and location table as JSON
    Inspect { input: PathBuf },
}

fn write_options(
    settings: &Settings,
    compression: Option<CompressionAlgo>,
    level: Option<i32>,
    format_version: Option<u8>,
) -> anyhow::Result<WriteOptions> {
    let mut options = WriteOptions::try_from(&settings.writer)?;
    if let Some(algo) = compression {
        options = options.with_compression(algo);
    }
    if let Some(level) = level {
        options = options.with_level(level);
    }
    if let Some(v) = format_version {
        let version = FormatVersion::try_from(v).map_err(|v| {
            ColfError::UnsupportedFormat(format!("cannot write format version {}", v))
        })?;
        options = options.with_format_version(version);
    }
    Ok(options)
}

fn run(command: Command, settings: &Settings) -> anyhow::Result<()> {
    match command {
        Command::CsvToCustom {
            input,
            output,
            compression,
            level,
            format_version,
        } => {
            let options = write_options(settings, compression, level, format_version)?;
            let table = read_csv_path(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let summary = ColfWriter::new(options).write_path(&table, &output)?;
            println!(
                "Wrote {} with {} rows and {} columns",
                output.display(),
                summary.rows,
                summary.columns
            );
        }
        Command::CustomToCsv { input, output } => {
            let mut reader = ColfReader::open(&input)?;
            let rows = reader.read_all()?;
            let file = File::create(&output)
                .with_context(|| format!("creating {}", output.display()))?;
            write_rows_csv(reader.schema(), &rows, BufWriter::new(file))?;
            println!("Wrote CSV to {}", output.display());
        }
        Command::ReadColumns { input, columns } => {
            let names: Vec<&str> = columns
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .collect();
            if names.is_empty() {
                anyhow::bail!("no column names given");
            }
            let mut reader = ColfReader::open(&input)?;
            let selected = reader.read_columns(&names)?;
            let stdout = io::stdout();
            write_columns_csv(&selected, stdout.lock())?;
        }
        Command::Inspect { input } => {
            let reader = ColfReader::open(&input)?;
            let mut stdout = io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, &reader.header().describe())?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref()).context("loading configuration")?;
    logging::init(&settings.logging)?;
    info!(target: "colf::cli", "starting");

    run(cli.command, &settings).inspect_err(|err| {
        if let Some(e) = err.downcast_ref::<ColfError>() {
            e.log_error();
        }
    })
}

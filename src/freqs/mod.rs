//! Per-allele population frequencies from gnomAD-style VCF files.

pub mod info;
pub mod reading;
pub mod record;

use std::io::Write;
use std::time::Instant;

use anyhow::Context;
use biocommons_bioutils::assemblies::Assembly;
use clap::Parser;
use thousands::Separable;

use crate::common::contig::{guess_assembly, ContigManager};
use crate::common::io::std::{open_read_maybe_gz, open_write_maybe_gz};
use crate::common::GenomeRelease;

use self::reading::{read_header, Reader};

/// What to do with malformed lines.
///
/// Read errors always stop the run.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OnError {
    /// Stop with an error naming the line.
    #[default]
    Abort,
    /// Log a warning and continue with the next line.
    Skip,
}

/// Command line arguments for `freqs import` sub command.
#[derive(Parser, Debug)]
#[command(about = "Extract per-allele population frequencies from a VCF file", long_about = None)]
pub struct Args {
    /// Genome release to use, default is to auto-detect from `##contig` lines.
    #[arg(long, value_enum)]
    pub genome_release: Option<GenomeRelease>,
    /// Path to the input VCF file, may be gzip-compressed.
    #[arg(long)]
    pub path_input: String,
    /// Path to the output JSONL file, compressed if ending in `.gz`.
    #[arg(long)]
    pub path_output: String,

    /// How to handle lines with malformed numbers.
    #[arg(long, value_enum, default_value_t = OnError::Abort)]
    pub on_error: OnError,
    /// For debug purposes, maximal number of records to write.
    #[arg(long)]
    pub max_var_count: Option<usize>,
}

/// Determine the assembly from the arguments or the input header.
fn select_assembly(args: &Args) -> Result<Assembly, anyhow::Error> {
    if let Some(genome_release) = args.genome_release {
        return Ok(genome_release.into());
    }

    tracing::info!("Guessing genome release from {}", &args.path_input);
    let header = read_header(open_read_maybe_gz(&args.path_input)?)?;
    guess_assembly(&header, true, None)
        .with_context(|| format!("could not guess genome release of {}", &args.path_input))
}

/// Main entry point for `freqs import` sub command.
pub fn run(common: &crate::common::Args, args: &Args) -> Result<(), anyhow::Error> {
    tracing::info!(
        "Extracting population frequencies\ncommon args: {:#?}\nargs: {:#?}",
        common,
        args
    );

    let contig_manager = ContigManager::new(select_assembly(args)?);
    tracing::info!(
        "Using genome release {} ({:?})",
        GenomeRelease::from(contig_manager.assembly()).name(),
        contig_manager.assembly()
    );

    let mut reader = Reader::from_path(&args.path_input, &contig_manager)?;
    let mut writer = open_write_maybe_gz(&args.path_output)?;

    let start = Instant::now();
    let mut count: usize = 0;
    for result in reader.by_ref() {
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_recoverable() && args.on_error == OnError::Skip => {
                tracing::warn!("Skipping malformed {}", e);
                continue;
            }
            Err(e) => {
                return Err(
                    anyhow::Error::new(e).context(format!("problem reading {}", &args.path_input))
                );
            }
        };

        serde_json::to_writer(&mut writer, &record)?;
        writeln!(writer)?;

        count += 1;
        if count % 100_000 == 0 {
            tracing::info!(
                "... at {}:{} ({} records)",
                &record.contig.name,
                record.position.separate_with_commas(),
                count.separate_with_commas()
            );
        }
        if args.max_var_count.is_some_and(|max_var_count| count >= max_var_count) {
            tracing::warn!("Stopping after {} records as requested", count);
            break;
        }
    }
    writer.flush()?;

    let stats = reader.stats();
    tracing::info!(
        "Wrote {} records from {} lines in {:?} ({} lines skipped, {} malformed)",
        count.separate_with_commas(),
        stats.lines.separate_with_commas(),
        start.elapsed(),
        stats.skipped().separate_with_commas(),
        stats.errors.separate_with_commas()
    );
    tracing::debug!("Reader statistics: {:#?}", stats);

    tracing::info!("Done extracting population frequencies");
    Ok(())
}

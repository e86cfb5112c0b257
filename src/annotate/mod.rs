//! Consequence annotation of (variant, transcript) overlaps.

pub mod ann;
pub mod csq;

use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use itertools::Itertools;
use rayon::prelude::*;
use thousands::Separable;

use crate::common::io::std::{open_read_maybe_gz, open_write_maybe_gz};

use self::ann::{FeatureBiotype, PutativeImpact};
use self::csq::{classify, PositionalOverlap, Strand, TranscriptContext};

/// Number of rows to classify in parallel at a time.
const CHUNK_SIZE: usize = 10_000;

/// Command line arguments for `csq classify` sub command.
#[derive(Parser, Debug)]
#[command(about = "Classify consequences from positional overlap flags", long_about = None)]
pub struct Args {
    /// Path to the input TSV file with one overlap per row, may be gzip-compressed.
    #[arg(long)]
    pub path_input_tsv: String,
    /// Path to the output TSV file, compressed if ending in `.gz`.
    #[arg(long)]
    pub path_output_tsv: String,
}

/// One row of the input TSV file.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct OverlapRow {
    pub feature_id: String,
    pub strand: Strand,
    pub biotype: FeatureBiotype,
    pub is_start_splice_site: bool,
    pub is_end_splice_site: bool,
    pub before_coding: bool,
    pub after_coding: bool,
    pub within_cdna: bool,
}

impl OverlapRow {
    fn overlap(&self) -> PositionalOverlap {
        PositionalOverlap {
            is_start_splice_site: self.is_start_splice_site,
            is_end_splice_site: self.is_end_splice_site,
            before_coding: self.before_coding,
            after_coding: self.after_coding,
            within_cdna: self.within_cdna,
        }
    }

    fn transcript(&self) -> TranscriptContext {
        TranscriptContext {
            strand: self.strand,
            biotype: self.biotype,
        }
    }
}

/// One row of the output TSV file.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct VerdictRow {
    pub feature_id: String,
    /// Consequence terms joined by `&`, most severe first.
    pub consequences: String,
    /// Impact of the most severe consequence, if any.
    pub putative_impact: Option<PutativeImpact>,
}

impl From<&OverlapRow> for VerdictRow {
    fn from(row: &OverlapRow) -> Self {
        let consequences = classify(&row.overlap(), &row.transcript());
        VerdictRow {
            feature_id: row.feature_id.clone(),
            putative_impact: consequences.first().map(|c| c.impact()),
            consequences: consequences.iter().join("&"),
        }
    }
}

/// Main entry point for `csq classify` sub command.
pub fn run(common: &crate::common::Args, args: &Args) -> Result<(), anyhow::Error> {
    tracing::info!(
        "Classifying consequences\ncommon args: {:#?}\nargs: {:#?}",
        common,
        args
    );

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .comment(Some(b'#'))
        .has_headers(true)
        .from_reader(open_read_maybe_gz(&args.path_input_tsv)?);
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_writer(open_write_maybe_gz(&args.path_output_tsv)?);

    let start = Instant::now();
    let mut count: usize = 0;
    for chunk in &reader.deserialize::<OverlapRow>().chunks(CHUNK_SIZE) {
        let rows = chunk
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("problem reading {}", &args.path_input_tsv))?;
        let verdicts = rows.par_iter().map(VerdictRow::from).collect::<Vec<_>>();
        for verdict in &verdicts {
            writer.serialize(verdict)?;
        }

        count += rows.len();
        tracing::debug!("... classified {} rows", count.separate_with_commas());
    }
    writer.flush()?;

    tracing::info!(
        "Classified {} rows in {:?}",
        count.separate_with_commas(),
        start.elapsed()
    );
    Ok(())
}

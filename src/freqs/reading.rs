//! Reading of population frequency records from VCF text lines.

use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::num::ParseIntError;
use std::path::Path;
use std::str::Utf8Error;

use noodles::vcf;
use parse_display::Display;

use crate::common::contig::ContigResolver;
use crate::common::io::std::open_read_maybe_gz;

use super::info::{InvalidInteger, ParseState};
use super::record::AlleleFrequencyRecord;

/// 0-based column indices in VCF body lines.
const CHROM_IDX: usize = 0;
const POS_IDX: usize = 1;
const REF_IDX: usize = 3;
const ALT_IDX: usize = 4;
const INFO_IDX: usize = 7;
/// Lines with fewer columns do not reach the INFO column.
const MIN_FIELDS: usize = INFO_IDX + 1;

/// Why a line did not yield any records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(style = "snake_case")]
pub enum SkipReason {
    /// Empty or whitespace-only line.
    Blank,
    /// Header or comment line.
    Comment,
    /// Fewer than 8 tab-separated fields.
    TooFewFields,
    /// Chromosome not known to the resolver.
    UnknownContig,
    /// Total allele number is zero or missing.
    NoAlleleNumber,
}

/// Result of parsing one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// The line was skipped.
    Skipped(SkipReason),
    /// One record per alternate allele, in ALT column order.
    Records(Vec<AlleleFrequencyRecord>),
}

impl ParseOutcome {
    /// The records, empty if the line was skipped.
    pub fn into_records(self) -> Vec<AlleleFrequencyRecord> {
        match self {
            ParseOutcome::Skipped(_) => Vec::new(),
            ParseOutcome::Records(records) => records,
        }
    }
}

/// Problems with the content of a line that are not expected structural variation.
#[derive(Debug, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("I/O error")]
    Io(#[from] io::Error),
    #[error("line is not valid UTF-8")]
    InvalidUtf8(#[from] Utf8Error),
    #[error("invalid position {value:?}")]
    InvalidPosition {
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error(transparent)]
    InvalidInteger(#[from] InvalidInteger),
}

/// A `ParseErrorKind` together with the offending line.
#[derive(Debug, thiserror::Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// 1-based line number in the input.
    pub line: u64,
    /// The raw line, empty for I/O errors.
    pub raw: String,
    #[source]
    pub kind: ParseErrorKind,
}

impl ParseError {
    /// Whether the error concerns a single line only, so reading can go on.
    ///
    /// I/O errors end the input and are never recoverable.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self.kind, ParseErrorKind::Io(_))
    }
}

/// Parse one VCF body line into per-allele records.
///
/// Blank lines, comments, truncated lines, lines on unknown contigs and lines without
/// a total allele number are skipped.  Malformed integers in the position or in a
/// recognized INFO field are errors.
pub fn parse_line<C>(line: &str, resolver: &C) -> Result<ParseOutcome, ParseErrorKind>
where
    C: ContigResolver + ?Sized,
{
    if line.trim().is_empty() {
        return Ok(ParseOutcome::Skipped(SkipReason::Blank));
    }
    if line.starts_with('#') {
        return Ok(ParseOutcome::Skipped(SkipReason::Comment));
    }

    let fields = line.split('\t').collect::<Vec<_>>();
    if fields.len() < MIN_FIELDS {
        return Ok(ParseOutcome::Skipped(SkipReason::TooFewFields));
    }

    let Some(contig) = resolver.resolve(fields[CHROM_IDX]) else {
        return Ok(ParseOutcome::Skipped(SkipReason::UnknownContig));
    };
    let position = fields[POS_IDX]
        .parse::<u32>()
        .map_err(|source| ParseErrorKind::InvalidPosition {
            value: fields[POS_IDX].to_string(),
            source,
        })?;
    let reference = fields[REF_IDX];
    let alternatives = fields[ALT_IDX].split(',');

    let state = ParseState::from_info(fields[INFO_IDX])?;
    if state.allele_number == 0 {
        return Ok(ParseOutcome::Skipped(SkipReason::NoAlleleNumber));
    }

    Ok(ParseOutcome::Records(
        alternatives
            .enumerate()
            .map(|(idx, alternative)| AlleleFrequencyRecord {
                contig: contig.clone(),
                position,
                reference: reference.to_string(),
                alternative: alternative.to_string(),
                depth: state.depth,
                all: state.all_counts(idx),
                populations: state.population_counts(idx),
            })
            .collect(),
    ))
}

/// Counters kept while reading.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stats {
    /// Number of lines read.
    pub lines: u64,
    /// Number of records emitted.
    pub records: u64,
    /// Number of lines that failed to parse.
    pub errors: u64,
    pub blank: u64,
    pub comment: u64,
    pub too_few_fields: u64,
    pub unknown_contig: u64,
    pub no_allele_number: u64,
}

impl Stats {
    fn count_skip(&mut self, reason: SkipReason) {
        let counter = match reason {
            SkipReason::Blank => &mut self.blank,
            SkipReason::Comment => &mut self.comment,
            SkipReason::TooFewFields => &mut self.too_few_fields,
            SkipReason::UnknownContig => &mut self.unknown_contig,
            SkipReason::NoAlleleNumber => &mut self.no_allele_number,
        };
        *counter += 1;
    }

    /// Number of skipped lines, excluding header and comment lines.
    pub fn skipped(&self) -> u64 {
        self.blank + self.too_few_fields + self.unknown_contig + self.no_allele_number
    }
}

/// Lazily reads `AlleleFrequencyRecord`s from line-based input.
///
/// The records of one line are produced before the next line is read.  After an error
/// in the content of a line, iteration continues with the next line; after an I/O
/// error, the iterator is exhausted.  The input is released as soon as it is exhausted
/// or has failed.
pub struct Reader<R, C> {
    /// `None` after the end of input or an I/O error.
    inner: Option<R>,
    resolver: C,
    buf: Vec<u8>,
    pending: VecDeque<AlleleFrequencyRecord>,
    stats: Stats,
}

impl<R, C> Reader<R, C>
where
    R: BufRead,
    C: ContigResolver,
{
    pub fn new(inner: R, resolver: C) -> Self {
        Self {
            inner: Some(inner),
            resolver,
            buf: Vec::new(),
            pending: VecDeque::new(),
            stats: Stats::default(),
        }
    }

    /// Counters for the lines consumed so far.
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    fn read_next_line(&mut self) -> Option<Result<(), ParseError>> {
        let inner = self.inner.as_mut()?;
        self.buf.clear();
        match inner.read_until(b'\n', &mut self.buf) {
            Ok(0) => {
                self.inner = None;
                None
            }
            Ok(_) => {
                self.stats.lines += 1;
                let line = self.buf.strip_suffix(b"\n").unwrap_or(&self.buf[..]);
                let line = line.strip_suffix(b"\r").unwrap_or(line);
                let result = match std::str::from_utf8(line) {
                    Ok(line) => parse_line(line, &self.resolver),
                    // header descriptions are free text and not inspected
                    Err(_) if line.starts_with(b"#") => {
                        Ok(ParseOutcome::Skipped(SkipReason::Comment))
                    }
                    Err(e) => Err(ParseErrorKind::InvalidUtf8(e)),
                };
                match result {
                    Ok(ParseOutcome::Skipped(reason)) => {
                        tracing::trace!("skipping line {} ({})", self.stats.lines, reason);
                        self.stats.count_skip(reason);
                    }
                    Ok(ParseOutcome::Records(records)) => {
                        self.stats.records += records.len() as u64;
                        self.pending.extend(records);
                    }
                    Err(kind) => {
                        self.stats.errors += 1;
                        return Some(Err(ParseError {
                            line: self.stats.lines,
                            raw: String::from_utf8_lossy(line).into_owned(),
                            kind,
                        }));
                    }
                }
                Some(Ok(()))
            }
            Err(e) => {
                self.inner = None;
                self.stats.errors += 1;
                Some(Err(ParseError {
                    line: self.stats.lines + 1,
                    raw: String::new(),
                    kind: ParseErrorKind::Io(e),
                }))
            }
        }
    }
}

impl<C> Reader<Box<dyn BufRead>, C>
where
    C: ContigResolver,
{
    /// Open a plain text or gzip-compressed file.
    pub fn from_path<P>(path: P, resolver: C) -> Result<Self, anyhow::Error>
    where
        P: AsRef<Path>,
    {
        Ok(Self::new(open_read_maybe_gz(path)?, resolver))
    }
}

impl<R, C> Iterator for Reader<R, C>
where
    R: BufRead,
    C: ContigResolver,
{
    type Item = Result<AlleleFrequencyRecord, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.pending.pop_front() {
                return Some(Ok(record));
            }
            match self.read_next_line()? {
                Ok(()) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Read the VCF header up to and including the `#CHROM` line.
pub fn read_header<R: BufRead>(reader: R) -> Result<vcf::Header, anyhow::Error> {
    Ok(vcf::io::Reader::new(reader).read_header()?)
}

//! Classification of transcript-relative consequences from positional overlaps.
//!
//! The overlap flags are computed upstream from variant and transcript coordinates and
//! are taken as given.  Each consequence has its own predicate; strand handling for all
//! of them goes through `Strand::five_prime()` and `Strand::three_prime()`.

use parse_display::{Display, FromStr};
use strum::IntoEnumIterator;

use super::ann::{Consequence, FeatureBiotype};

/// Enumeration for the two strands of the genome.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    FromStr,
    serde::Serialize,
    serde::Deserialize,
)]
#[display(style = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Strand {
    #[default]
    Plus,
    Minus,
}

impl Strand {
    /// Of a value for the genomic start side and one for the genomic end side, pick
    /// the one on the transcript's 5' side.
    #[inline]
    pub fn five_prime<T>(self, start: T, end: T) -> T {
        match self {
            Strand::Plus => start,
            Strand::Minus => end,
        }
    }

    /// Of a value for the genomic start side and one for the genomic end side, pick
    /// the one on the transcript's 3' side.
    #[inline]
    pub fn three_prime<T>(self, start: T, end: T) -> T {
        self.five_prime(end, start)
    }
}

/// Positional overlap of a variant with a transcript.
///
/// "Start" and "end" refer to genomic coordinates, independent of strand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct PositionalOverlap {
    /// Overlaps the splice site at the genomic start of an intron.
    pub is_start_splice_site: bool,
    /// Overlaps the splice site at the genomic end of an intron.
    pub is_end_splice_site: bool,
    /// Lies before the coding region in genomic coordinates.
    pub before_coding: bool,
    /// Lies after the coding region in genomic coordinates.
    pub after_coding: bool,
    /// Lies within the transcribed region.
    pub within_cdna: bool,
}

/// The properties of the transcript that the predicates read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct TranscriptContext {
    /// Strand of the transcript's gene.
    pub strand: Strand,
    /// Whether the transcript has a translation.
    pub biotype: FeatureBiotype,
}

/// Signature shared by all consequence predicates.
pub type Predicate = fn(&PositionalOverlap, &TranscriptContext) -> bool;

/// The acceptor site is at the 3' end of the intron.
pub fn is_splice_acceptor_variant(overlap: &PositionalOverlap, tx: &TranscriptContext) -> bool {
    tx.strand
        .three_prime(overlap.is_start_splice_site, overlap.is_end_splice_site)
}

/// The donor site is at the 5' end of the intron.
pub fn is_splice_donor_variant(overlap: &PositionalOverlap, tx: &TranscriptContext) -> bool {
    tx.strand
        .five_prime(overlap.is_start_splice_site, overlap.is_end_splice_site)
}

/// Within the transcribed region but 5' of the coding region of a coding transcript.
pub fn is_five_prime_utr_variant(overlap: &PositionalOverlap, tx: &TranscriptContext) -> bool {
    overlap.within_cdna
        && tx.strand.five_prime(overlap.before_coding, overlap.after_coding)
        && tx.biotype.is_coding()
}

/// The predicate deciding whether `consequence` applies.
pub fn predicate(consequence: Consequence) -> Predicate {
    match consequence {
        Consequence::SpliceAcceptorVariant => is_splice_acceptor_variant,
        Consequence::SpliceDonorVariant => is_splice_donor_variant,
        Consequence::FivePrimeUtrVariant => is_five_prime_utr_variant,
    }
}

/// All consequences whose predicate holds, most severe first.
pub fn classify(overlap: &PositionalOverlap, tx: &TranscriptContext) -> Vec<Consequence> {
    let mut consequences = Consequence::iter()
        .filter(|consequence| predicate(*consequence)(overlap, tx))
        .collect::<Vec<_>>();
    consequences.sort();
    consequences
}

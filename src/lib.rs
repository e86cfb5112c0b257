//! Population allele frequencies and transcript consequence classification.

pub mod annotate;
pub mod common;
pub mod freqs;

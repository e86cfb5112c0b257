//! Contig name resolution.

use std::collections::HashMap;
use std::hash::BuildHasher;

use biocommons_bioutils::assemblies::{Assembly, ASSEMBLY_INFOS};
use noodles::vcf;

const CHR_X: u32 = 23;
const CHR_Y: u32 = 24;
const CHR_M: u32 = 25;

/// A resolved contig.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Contig {
    /// The primary name without a "chr" prefix (e.g., "1", "X", "MT").
    pub name: String,
    /// The RefSeq accession (e.g., "NC_000001.10").
    pub accession: String,
    /// The chromosome number (1-22, 23=X, 24=Y, 25=MT).
    pub chrom_no: u32,
    /// Length of the sequence.
    pub length: usize,
}

/// Lookup from a contig name as found in input files to a resolved `Contig`.
pub trait ContigResolver {
    /// Resolve `alias`, returning `None` for unknown contigs.
    fn resolve(&self, alias: &str) -> Option<Contig>;
}

impl<T: ContigResolver + ?Sized> ContigResolver for &T {
    fn resolve(&self, alias: &str) -> Option<Contig> {
        (**self).resolve(alias)
    }
}

impl<S: BuildHasher> ContigResolver for HashMap<String, Contig, S> {
    fn resolve(&self, alias: &str) -> Option<Contig> {
        self.get(alias).cloned()
    }
}

/// Map a primary sequence name to its chromosome number.
fn chrom_no(name: &str) -> Option<u32> {
    match name.strip_prefix("chr").unwrap_or(name) {
        "X" => Some(CHR_X),
        "Y" => Some(CHR_Y),
        "M" | "MT" => Some(CHR_M),
        other => other.parse::<u32>().ok().filter(|no| (1..=22).contains(no)),
    }
}

/// Assembly-backed contig resolution.
///
/// Knows all primary assembled molecules of the assembly (and chrMT where the assembly
/// has it) under their primary name, RefSeq accession, any alias from the assembly
/// report, and the name with and without "chr" prefix.
#[derive(Debug, Clone)]
pub struct ContigManager {
    /// The assembly this manager was built for.
    assembly: Assembly,
    /// Mapping from any known alias to the resolved contig.
    alias_to_contig: HashMap<String, Contig>,
}

impl ContigManager {
    /// Create a new manager for a given assembly.
    pub fn new(assembly: Assembly) -> Self {
        let mut alias_to_contig = HashMap::new();

        for seq in &ASSEMBLY_INFOS[assembly].sequences {
            // Skip non-primary sequences, but keep chrMT.
            if !["Primary Assembly", "non-nuclear"].contains(&&*seq.assembly_unit)
                || seq.sequence_role != "assembled-molecule"
            {
                tracing::trace!("Skipping non-primary sequence: {:?}", seq);
                continue;
            }
            let Some(no) = chrom_no(&seq.name) else {
                tracing::debug!("No chromosome number for {}; skipping", &seq.name);
                continue;
            };

            let name = seq.name.strip_prefix("chr").unwrap_or(&seq.name).to_string();
            let contig = Contig {
                name: name.clone(),
                accession: seq.refseq_ac.clone(),
                chrom_no: no,
                length: seq.length,
            };

            let mut aliases = vec![
                seq.name.clone(),
                seq.refseq_ac.clone(),
                name.clone(),
                format!("chr{}", name),
            ];
            aliases.extend(seq.aliases.iter().cloned());
            if no == CHR_M {
                aliases.extend(["M", "chrM", "MT", "chrMT"].map(String::from));
            }
            for alias in aliases {
                alias_to_contig.entry(alias).or_insert_with(|| contig.clone());
            }
        }

        Self {
            assembly,
            alias_to_contig,
        }
    }

    /// The assembly that the manager was built for.
    pub fn assembly(&self) -> Assembly {
        self.assembly
    }
}

impl ContigResolver for ContigManager {
    fn resolve(&self, alias: &str) -> Option<Contig> {
        self.alias_to_contig.get(alias).cloned()
    }
}

/// Guess the assembly from the `##contig` lines of a VCF header.
///
/// Only assemblies where at least one canonical contig matches by length and none
/// mismatches are considered; contigs without a length are ignored.  If more than one
/// assembly matches and `ambiguous_ok` is not set, an error is returned.  A matching
/// `initial_assembly` is preferred; if the contigs are incompatible with it then an
/// error is returned.
pub fn guess_assembly(
    vcf_header: &vcf::Header,
    ambiguous_ok: bool,
    initial_assembly: Option<Assembly>,
) -> Result<Assembly, anyhow::Error> {
    let mut result: Option<Assembly> = None;

    for assembly in [Assembly::Grch37p10, Assembly::Grch38] {
        let manager = ContigManager::new(assembly);

        let mut compatible = 0;
        let mut incompatible = 0;
        for (name, data) in vcf_header.contigs() {
            let Some(length) = data.length() else {
                tracing::trace!("No length for contig {}", name);
                continue;
            };
            if let Some(contig) = manager.resolve(name) {
                if contig.length == length {
                    compatible += 1;
                } else {
                    incompatible += 1;
                }
            }
        }
        tracing::debug!(
            "{:?}: {} compatible, {} incompatible contigs",
            assembly,
            compatible,
            incompatible
        );

        if compatible > 0 && incompatible == 0 {
            match result {
                Some(previous) if !ambiguous_ok => anyhow::bail!(
                    "Found ambiguity; initial={:?}, previous={:?}, current={:?}",
                    initial_assembly,
                    previous,
                    assembly
                ),
                Some(_) if initial_assembly == Some(assembly) => result = Some(assembly),
                Some(_) => (),
                None => result = Some(assembly),
            }
        } else if initial_assembly == Some(assembly) {
            anyhow::bail!("Contigs incompatible with initial assembly {:?}", assembly);
        }
    }

    result.ok_or_else(|| anyhow::anyhow!("No matching assembly found"))
}

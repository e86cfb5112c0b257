//! Normalized per-allele frequency records.

use crate::common::contig::Contig;

use super::info::Population;

/// Allele number and count of one cohort for one alternate allele.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Counts {
    /// Total number of genotyped alleles.
    pub an: u32,
    /// Number of alternate alleles, absent if not reported for this allele.
    pub ac: Option<u32>,
}

impl Counts {
    /// Allele frequency, if the count is known and the allele number is non-zero.
    pub fn allele_frequency(&self) -> Option<f64> {
        match (self.ac, self.an) {
            (Some(ac), an) if an > 0 => Some(ac as f64 / an as f64),
            _ => None,
        }
    }
}

/// Counts for each `Population`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PopulationCounts {
    pub afr: Counts,
    pub amr: Counts,
    pub eas: Counts,
    pub fin: Counts,
    pub nfe: Counts,
    pub oth: Counts,
    pub asj: Counts,
}

impl PopulationCounts {
    /// Counts of the given population.
    pub fn get_mut(&mut self, pop: Population) -> &mut Counts {
        match pop {
            Population::Afr => &mut self.afr,
            Population::Amr => &mut self.amr,
            Population::Eas => &mut self.eas,
            Population::Fin => &mut self.fin,
            Population::Nfe => &mut self.nfe,
            Population::Oth => &mut self.oth,
            Population::Asj => &mut self.asj,
        }
    }
}

/// Population frequencies of one alternate allele at one site.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AlleleFrequencyRecord {
    /// The resolved contig.
    pub contig: Contig,
    /// 1-based position of the first reference base.
    pub position: u32,
    /// Reference bases.
    pub reference: String,
    /// Alternative bases.
    pub alternative: String,
    /// Total read depth.
    pub depth: u64,
    /// Counts over all samples.
    pub all: Counts,
    /// Counts per population.
    pub populations: PopulationCounts,
}

impl AlleleFrequencyRecord {
    /// Allele frequency over all samples.
    pub fn allele_frequency(&self) -> Option<f64> {
        self.all.allele_frequency()
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    use super::*;

    #[rstest::rstest]
    #[case(Counts { an: 200, ac: Some(50) }, Some(0.25))]
    #[case(Counts { an: 200, ac: Some(0) }, Some(0.0))]
    #[case(Counts { an: 200, ac: None }, None)]
    #[case(Counts { an: 0, ac: Some(0) }, None)]
    fn counts_allele_frequency(#[case] counts: Counts, #[case] expected: Option<f64>) {
        assert_eq!(counts.allele_frequency(), expected);
    }

    #[test]
    fn population_counts_get_mut() {
        let mut counts = PopulationCounts::default();
        for (no, pop) in Population::iter().enumerate() {
            counts.get_mut(pop).an = no as u32 + 1;
        }

        assert_eq!(
            [
                counts.afr.an,
                counts.amr.an,
                counts.eas.an,
                counts.fin.an,
                counts.nfe.an,
                counts.oth.an,
                counts.asj.an,
            ],
            [1, 2, 3, 4, 5, 6, 7]
        );
    }

    #[test]
    fn counts_serialize_absent_as_null() -> Result<(), anyhow::Error> {
        let json = serde_json::to_string(&Counts { an: 4, ac: None })?;
        assert_eq!(json, r#"{"an":4,"ac":null}"#);

        Ok(())
    }
}

//! Dispatch of INFO fields to the per-line parse state.

use std::collections::HashMap;
use std::num::ParseIntError;

use once_cell::sync::Lazy;
use parse_display::{Display, FromStr};
use strum::{EnumCount, IntoEnumIterator};

use super::record::{Counts, PopulationCounts};

/// Populations with dedicated `AC_*`/`AN_*` INFO fields.
///
/// The display value is the key suffix, e.g., `AFR` for `AC_AFR` and `AN_AFR`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    FromStr,
    serde::Serialize,
    serde::Deserialize,
    strum::EnumIter,
    strum::EnumCount,
)]
#[display(style = "UPPERCASE")]
#[serde(rename_all = "lowercase")]
pub enum Population {
    /// African / African American.
    Afr,
    /// Latino / Admixed American.
    Amr,
    /// East Asian.
    Eas,
    /// Finnish.
    Fin,
    /// Non-Finnish European.
    Nfe,
    /// Other.
    Oth,
    /// Ashkenazi Jewish.
    ///
    /// This is the seventh cohort, fed by `AN_ASJ` and `AC_ASJ`.  Older tooling stored
    /// these keys in a slot labelled "South Asian"; there are no `*_SAS` keys.
    Asj,
}

/// Which cohort an `AC`/`AN` field refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cohort {
    /// The un-suffixed `AC`/`AN` over all samples.
    All,
    /// One population.
    Population(Population),
}

/// The typed setter that an INFO key maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoField {
    /// Comma-separated allele counts, one per alternate allele.
    AlleleCounts(Cohort),
    /// Single total allele number.
    AlleleNumber(Cohort),
    /// Single total read depth.
    Depth,
}

/// All recognized INFO keys.
pub static INFO_FIELDS: Lazy<HashMap<String, InfoField>> = Lazy::new(|| {
    let mut result = HashMap::from([
        (String::from("AC"), InfoField::AlleleCounts(Cohort::All)),
        (String::from("AN"), InfoField::AlleleNumber(Cohort::All)),
        (String::from("DP"), InfoField::Depth),
    ]);
    for pop in Population::iter() {
        result.insert(
            format!("AC_{}", pop),
            InfoField::AlleleCounts(Cohort::Population(pop)),
        );
        result.insert(
            format!("AN_{}", pop),
            InfoField::AlleleNumber(Cohort::Population(pop)),
        );
    }
    result
});

/// A recognized INFO field had a value that is not a valid integer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid integer value {value:?} for INFO field {key}")]
pub struct InvalidInteger {
    pub key: String,
    pub value: String,
    #[source]
    pub source: ParseIntError,
}

/// State accumulated while parsing the INFO column of one line.
///
/// Constructed fresh for every line; absent arrays stay `None`, absent scalars stay `0`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParseState {
    /// Total read depth (`DP`).
    pub depth: u64,
    /// Total allele number (`AN`).
    pub allele_number: u32,
    /// Allele counts over all samples (`AC`).
    pub allele_counts: Option<Vec<u32>>,
    /// Per-population allele numbers, indexed by `Population`.
    pub population_numbers: [u32; Population::COUNT],
    /// Per-population allele counts, indexed by `Population`.
    pub population_counts: [Option<Vec<u32>>; Population::COUNT],
}

fn parse_int<T: std::str::FromStr<Err = ParseIntError>>(
    key: &str,
    value: &str,
) -> Result<T, InvalidInteger> {
    value.parse::<T>().map_err(|source| InvalidInteger {
        key: key.to_string(),
        value: value.to_string(),
        source,
    })
}

impl ParseState {
    /// Build the state from a raw INFO column.
    ///
    /// Entries that are not of the form `key=value` and unknown keys are ignored.
    pub fn from_info(info: &str) -> Result<Self, InvalidInteger> {
        let mut state = Self::default();
        for entry in info.split(';') {
            let mut tokens = entry.split('=');
            if let (Some(key), Some(value), None) = (tokens.next(), tokens.next(), tokens.next()) {
                state.set(key, value)?;
            }
        }
        Ok(state)
    }

    /// Apply one `key=value` pair.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), InvalidInteger> {
        let Some(field) = INFO_FIELDS.get(key) else {
            return Ok(());
        };
        match *field {
            InfoField::AlleleCounts(cohort) => {
                let counts = value
                    .split(',')
                    .map(|v| parse_int::<u32>(key, v))
                    .collect::<Result<Vec<_>, _>>()?;
                match cohort {
                    Cohort::All => self.allele_counts = Some(counts),
                    Cohort::Population(pop) => self.population_counts[pop as usize] = Some(counts),
                }
            }
            InfoField::AlleleNumber(cohort) => {
                let number = parse_int::<u32>(key, value)?;
                match cohort {
                    Cohort::All => self.allele_number = number,
                    Cohort::Population(pop) => self.population_numbers[pop as usize] = number,
                }
            }
            InfoField::Depth => self.depth = parse_int::<u64>(key, value)?,
        }
        Ok(())
    }

    /// Counts over all samples for the alternate allele with index `allele_idx`.
    pub fn all_counts(&self, allele_idx: usize) -> Counts {
        Counts {
            an: self.allele_number,
            ac: allele_count(&self.allele_counts, allele_idx),
        }
    }

    /// Per-population counts for the alternate allele with index `allele_idx`.
    pub fn population_counts(&self, allele_idx: usize) -> PopulationCounts {
        let mut result = PopulationCounts::default();
        for pop in Population::iter() {
            *result.get_mut(pop) = Counts {
                an: self.population_numbers[pop as usize],
                ac: allele_count(&self.population_counts[pop as usize], allele_idx),
            };
        }
        result
    }
}

/// The count at `idx`, absent if the array or the index is.
fn allele_count(counts: &Option<Vec<u32>>, idx: usize) -> Option<u32> {
    counts.as_ref().and_then(|counts| counts.get(idx).copied())
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn info_fields_table() {
        assert_eq!(INFO_FIELDS.len(), 3 + 2 * Population::COUNT);
        assert_eq!(
            INFO_FIELDS.get("AC_NFE"),
            Some(&InfoField::AlleleCounts(Cohort::Population(Population::Nfe)))
        );
        assert_eq!(
            INFO_FIELDS.get("AN_ASJ"),
            Some(&InfoField::AlleleNumber(Cohort::Population(Population::Asj)))
        );
        assert_eq!(INFO_FIELDS.get("AN_SAS"), None);
        assert_eq!(INFO_FIELDS.get("ac"), None);
    }

    #[test]
    fn population_display_from_str() -> Result<(), anyhow::Error> {
        assert_eq!(format!("{}", Population::Afr), "AFR");
        assert_eq!(Population::from_str("OTH")?, Population::Oth);

        Ok(())
    }

    #[test]
    fn from_info_full() -> Result<(), anyhow::Error> {
        let state =
            ParseState::from_info("AC=3,1;AN=100;AC_AFR=2,0;AN_AFR=40;DP=1234;AN_ASJ=8;AF=0.03")?;

        assert_eq!(state.depth, 1234);
        assert_eq!(state.allele_number, 100);
        assert_eq!(state.allele_counts, Some(vec![3, 1]));
        assert_eq!(state.population_numbers[Population::Afr as usize], 40);
        assert_eq!(state.population_numbers[Population::Asj as usize], 8);
        assert_eq!(state.population_numbers[Population::Nfe as usize], 0);
        assert_eq!(
            state.population_counts[Population::Afr as usize],
            Some(vec![2, 0])
        );
        assert_eq!(state.population_counts[Population::Amr as usize], None);

        Ok(())
    }

    #[rstest::rstest]
    #[case("")]
    #[case(".")]
    #[case("DB;H2")]
    #[case("AN=1=2;X=;=3")]
    fn from_info_ignores_malformed(#[case] info: &str) -> Result<(), anyhow::Error> {
        assert_eq!(ParseState::from_info(info)?, ParseState::default());

        Ok(())
    }

    #[rstest::rstest]
    #[case("AN=abc", "AN", "abc")]
    #[case("AC=1,.", "AC", ".")]
    #[case("AC_FIN=-1", "AC_FIN", "-1")]
    #[case("DP=", "DP", "")]
    fn from_info_invalid_integer(#[case] info: &str, #[case] key: &str, #[case] value: &str) {
        let err = ParseState::from_info(info).unwrap_err();

        assert_eq!(err.key, key);
        assert_eq!(err.value, value);
    }

    #[test]
    fn counts_beyond_array_are_absent() -> Result<(), anyhow::Error> {
        let state = ParseState::from_info("AN=10;AC=1;AC_EAS=0,2;AN_EAS=4")?;

        let first = state.all_counts(0);
        assert_eq!(first, Counts { an: 10, ac: Some(1) });
        let second = state.all_counts(1);
        assert_eq!(second, Counts { an: 10, ac: None });

        assert_eq!(
            state.population_counts(1).eas,
            Counts { an: 4, ac: Some(2) }
        );
        assert_eq!(state.population_counts(2).eas, Counts { an: 4, ac: None });
        assert_eq!(state.population_counts(0).afr, Counts { an: 0, ac: None });

        Ok(())
    }
}

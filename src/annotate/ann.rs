//! Consequence terms, their putative impact, and transcript biotypes.

use parse_display::{Display, FromStr};

/// Putative impact level.
#[derive(
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Clone,
    Copy,
    Display,
    FromStr,
    serde::Deserialize,
    serde::Serialize,
    strum::EnumIter,
)]
#[display(style = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum PutativeImpact {
    High,
    Moderate,
    Low,
    Modifier,
}

/// Sequence Ontology consequence terms that can be classified.
///
/// Variants are ordered by decreasing severity.
#[derive(
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Clone,
    Copy,
    Display,
    FromStr,
    serde::Deserialize,
    serde::Serialize,
    strum::EnumIter,
)]
#[display(style = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Consequence {
    // high impact
    SpliceAcceptorVariant,
    SpliceDonorVariant,
    // modifier
    #[display("5_prime_UTR_variant")]
    #[serde(rename = "5_prime_UTR_variant")]
    FivePrimeUtrVariant,
}

impl From<Consequence> for PutativeImpact {
    fn from(val: Consequence) -> Self {
        match val {
            Consequence::SpliceAcceptorVariant | Consequence::SpliceDonorVariant => {
                PutativeImpact::High
            }
            Consequence::FivePrimeUtrVariant => PutativeImpact::Modifier,
        }
    }
}

impl Consequence {
    pub fn impact(&self) -> PutativeImpact {
        PutativeImpact::from(*self)
    }
}

/// Encode feature biotype.
///
/// A coding transcript is one with an associated translation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Display,
    FromStr,
    serde::Deserialize,
    serde::Serialize,
    strum::EnumIter,
)]
#[display(style = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FeatureBiotype {
    #[default]
    Coding,
    Noncoding,
}

impl FeatureBiotype {
    pub fn is_coding(&self) -> bool {
        match self {
            FeatureBiotype::Coding => true,
            FeatureBiotype::Noncoding => false,
        }
    }
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    use super::*;

    #[rstest::rstest]
    #[case(Consequence::SpliceAcceptorVariant, "splice_acceptor_variant")]
    #[case(Consequence::SpliceDonorVariant, "splice_donor_variant")]
    #[case(Consequence::FivePrimeUtrVariant, "5_prime_UTR_variant")]
    fn consequence_display_from_str(
        #[case] consequence: Consequence,
        #[case] expected: &str,
    ) -> Result<(), anyhow::Error> {
        assert_eq!(format!("{}", consequence), expected);
        assert_eq!(Consequence::from_str(expected)?, consequence);
        assert_eq!(
            serde_json::to_string(&consequence)?,
            format!("\"{}\"", expected)
        );

        Ok(())
    }

    #[test]
    fn consequence_impact() {
        assert_eq!(
            Consequence::iter()
                .map(|c| c.impact())
                .collect::<Vec<_>>(),
            vec![
                PutativeImpact::High,
                PutativeImpact::High,
                PutativeImpact::Modifier
            ]
        );
    }

    #[test]
    fn putative_impact_display() -> Result<(), anyhow::Error> {
        assert_eq!(format!("{}", PutativeImpact::Modifier), "MODIFIER");
        assert_eq!(PutativeImpact::from_str("HIGH")?, PutativeImpact::High);
        assert!(PutativeImpact::High < PutativeImpact::Modifier);

        Ok(())
    }

    #[test]
    fn feature_biotype() -> Result<(), anyhow::Error> {
        assert_eq!(FeatureBiotype::from_str("coding")?, FeatureBiotype::Coding);
        assert_eq!(
            FeatureBiotype::from_str("noncoding")?,
            FeatureBiotype::Noncoding
        );
        assert!(FeatureBiotype::Coding.is_coding());
        assert!(!FeatureBiotype::Noncoding.is_coding());

        Ok(())
    }
}

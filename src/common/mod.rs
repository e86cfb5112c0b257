//! Commonly used code.

use biocommons_bioutils::assemblies::Assembly;
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};

pub mod contig;
pub mod io;

/// Commonly used command line arguments.
#[derive(Parser, Debug, Default)]
pub struct Args {
    /// Verbosity of the program
    #[clap(flatten)]
    pub verbose: Verbosity<InfoLevel>,
}

impl Args {
    /// Translate the verbosity flags into a `tracing` level.
    pub fn tracing_level(&self) -> tracing::Level {
        match self.verbose.log_level() {
            Some(level) => match level {
                log::Level::Error => tracing::Level::ERROR,
                log::Level::Warn => tracing::Level::WARN,
                log::Level::Info => tracing::Level::INFO,
                log::Level::Debug => tracing::Level::DEBUG,
                log::Level::Trace => tracing::Level::TRACE,
            },
            None => tracing::Level::INFO,
        }
    }
}

/// Select the genome release to use.
#[derive(
    clap::ValueEnum,
    serde::Serialize,
    serde::Deserialize,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Default,
)]
#[serde(rename_all = "snake_case")]
pub enum GenomeRelease {
    #[default]
    Grch37,
    Grch38,
}

impl GenomeRelease {
    pub fn name(&self) -> String {
        match self {
            GenomeRelease::Grch37 => String::from("GRCh37"),
            GenomeRelease::Grch38 => String::from("GRCh38"),
        }
    }
}

impl From<GenomeRelease> for Assembly {
    fn from(val: GenomeRelease) -> Self {
        match val {
            // p10 has chrMT
            GenomeRelease::Grch37 => Assembly::Grch37p10,
            GenomeRelease::Grch38 => Assembly::Grch38,
        }
    }
}

impl From<Assembly> for GenomeRelease {
    fn from(assembly: Assembly) -> Self {
        match assembly {
            Assembly::Grch37 | Assembly::Grch37p10 => GenomeRelease::Grch37,
            Assembly::Grch38 => GenomeRelease::Grch38,
        }
    }
}

/// The version of `popcsq` package.
#[cfg(not(test))]
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// This allows us to override the version to `0.0.0` in tests.
pub fn version() -> &'static str {
    #[cfg(test)]
    return "0.0.0";
    #[cfg(not(test))]
    return VERSION;
}

#[cfg(test)]
mod test {
    use biocommons_bioutils::assemblies::Assembly;
    use clap_verbosity_flag::Verbosity;
    use pretty_assertions::assert_eq;

    use super::{Args, GenomeRelease};

    #[rstest::rstest]
    #[case(GenomeRelease::Grch37, Assembly::Grch37p10)]
    #[case(GenomeRelease::Grch38, Assembly::Grch38)]
    fn genome_release_to_assembly(#[case] release: GenomeRelease, #[case] assembly: Assembly) {
        assert_eq!(Assembly::from(release), assembly);
        assert_eq!(GenomeRelease::from(assembly), release);
    }

    #[test]
    fn genome_release_name() {
        assert_eq!(GenomeRelease::Grch37.name(), "GRCh37");
        assert_eq!(GenomeRelease::Grch38.name(), "GRCh38");
    }

    #[test]
    fn default_verbosity_is_info() {
        let args = Args {
            verbose: Verbosity::new(0, 0),
        };
        assert_eq!(args.tracing_level(), tracing::Level::INFO);

        let args = Args {
            verbose: Verbosity::new(2, 0),
        };
        assert_eq!(args.tracing_level(), tracing::Level::TRACE);
    }
}

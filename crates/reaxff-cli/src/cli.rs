use clap::{Args, Parser, Subcommand};
use reaxff::core::forcefield::term::EnergyTermKind;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu, William A. Goddard III, Victor Wai Tak Kam",
    version,
    about = "ReaxFF CLI - Parse ReaxFF force field parameter files and evaluate reactive force field energies.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a ReaxFF parameter file and print a summary of its contents.
    Inspect(InspectArgs),
    /// Evaluate the energy of every frame in an XYZ file.
    Energy(EnergyArgs),
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to the ReaxFF parameter file (ffield).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub ffield: PathBuf,
}

/// Arguments for the `energy` subcommand.
#[derive(Args, Debug)]
pub struct EnergyArgs {
    // --- Core Arguments ---
    /// Path to the input XYZ file. Every frame is evaluated.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write a TOML energy report to this path.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    // --- Configuration Overrides ---
    /// Override the ReaxFF parameter file from the config file.
    #[arg(short, long, value_name = "PATH")]
    pub ffield: Option<PathBuf>,

    /// Comma-separated energy terms to evaluate (e.g., 'bond,valence,coulomb').
    /// Defaults to every implemented term.
    #[arg(short, long, value_delimiter = ',', value_name = "TERMS")]
    pub terms: Vec<EnergyTermKind>,

    /// Leave out angle triples without parameters instead of failing.
    #[arg(long)]
    pub skip_missing: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn energy_arguments_parse_term_list() {
        let cli = Cli::parse_from([
            "reaxff",
            "-vv",
            "energy",
            "-i",
            "water.xyz",
            "--ffield",
            "ffield",
            "--terms",
            "bond,van-der-waals",
            "--skip-missing",
        ]);
        assert_eq!(cli.verbose, 2);
        let Commands::Energy(args) = cli.command else {
            panic!("Expected 'energy' subcommand");
        };
        assert_eq!(
            args.terms,
            vec![EnergyTermKind::Bond, EnergyTermKind::VanDerWaals]
        );
        assert!(args.skip_missing);
        assert_eq!(args.ffield, Some(PathBuf::from("ffield")));
    }

    #[test]
    fn unknown_term_is_rejected() {
        let result = Cli::try_parse_from([
            "reaxff", "energy", "-i", "water.xyz", "--terms", "bond,angle",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["reaxff", "-q", "-v", "inspect", "-f", "ffield"]);
        assert!(result.is_err());
    }
}

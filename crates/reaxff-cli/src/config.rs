use crate::cli::EnergyArgs;
use crate::error::{CliError, Result};
use reaxff::core::forcefield::term::EnergyTermKind;
use reaxff::engine::config::{EvaluationConfig, EvaluationConfigBuilder, MissingParamPolicy};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
enum PartialMissingParams {
    Fail,
    Skip,
}

impl From<PartialMissingParams> for MissingParamPolicy {
    fn from(p: PartialMissingParams) -> Self {
        match p {
            PartialMissingParams::Fail => MissingParamPolicy::Fail,
            PartialMissingParams::Skip => MissingParamPolicy::Skip,
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialEnergyConfig {
    #[serde(rename = "ffield-path")]
    ffield_path: Option<PathBuf>,
    terms: Option<Vec<String>>,
    #[serde(rename = "missing-params")]
    missing_params: Option<PartialMissingParams>,
}

/// The fully resolved settings of one `energy` run.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyRunConfig {
    pub ffield_path: PathBuf,
    pub evaluation: EvaluationConfig,
}

impl PartialEnergyConfig {
    /// Reads a config file. A relative `ffield-path` is resolved against the
    /// directory containing the config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;

        if let (Some(ffield), Some(base)) = (config.ffield_path.as_mut(), path.parent()) {
            if ffield.is_relative() {
                *ffield = base.join(&*ffield);
            }
        }
        Ok(config)
    }

    pub fn merge_with_cli(self, args: &EnergyArgs) -> Result<EnergyRunConfig> {
        let ffield_path = args.ffield.clone().or(self.ffield_path).ok_or_else(|| {
            CliError::Config(
                "A value for 'ffield-path' is required either in the config file or via --ffield."
                    .to_string(),
            )
        })?;

        let terms = if !args.terms.is_empty() {
            Some(args.terms.clone())
        } else {
            self.terms.map(|names| Self::parse_terms(&names)).transpose()?
        };

        let missing_params = if args.skip_missing {
            MissingParamPolicy::Skip
        } else {
            self.missing_params.map(Into::into).unwrap_or_default()
        };

        let mut builder = EvaluationConfigBuilder::new().missing_params(missing_params);
        if let Some(terms) = terms {
            builder = builder.terms(terms);
        }
        let evaluation = builder
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        Ok(EnergyRunConfig {
            ffield_path,
            evaluation,
        })
    }

    fn parse_terms(names: &[String]) -> Result<Vec<EnergyTermKind>> {
        names
            .iter()
            .map(|name| {
                name.parse::<EnergyTermKind>()
                    .map_err(|e| CliError::Config(e.to_string()))
            })
            .collect()
    }
}

use reaxff::core::forcefield::term::EnergyBreakdown;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct EnergyReport {
    pub ffield_path: PathBuf,
    pub input_path: PathBuf,
    pub frames: Vec<FrameReport>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct FrameReport {
    pub index: usize,
    pub comment: String,
    pub atoms: usize,
    pub total_energy: f64,
    pub skipped_triples: usize,
    pub terms: BTreeMap<String, f64>,
}

impl FrameReport {
    pub fn new(index: usize, comment: &str, atoms: usize, breakdown: &EnergyBreakdown) -> Self {
        Self {
            index,
            comment: comment.to_string(),
            atoms,
            total_energy: breakdown.total(),
            skipped_triples: breakdown.skipped_tuples,
            terms: breakdown
                .terms
                .iter()
                .map(|(kind, energy)| (kind.name().to_string(), *energy))
                .collect(),
        }
    }
}

impl EnergyReport {
    pub fn write_to(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

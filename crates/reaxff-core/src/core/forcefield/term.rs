use phf::phf_map;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;
use thiserror::Error;

/// The energy contributions of the ReaxFF functional form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EnergyTermKind {
    Bond,
    LonePair,
    OverCoordination,
    UnderCoordination,
    Valence,
    Penalty,
    Coalition,
    Torsion,
    Conjugation,
    HydrogenBond,
    C2Correction,
    VanDerWaals,
    Coulomb,
}

static TERM_NAMES: phf::Map<&'static str, EnergyTermKind> = phf_map! {
    "bond" => EnergyTermKind::Bond,
    "lone_pair" => EnergyTermKind::LonePair,
    "over_coordination" => EnergyTermKind::OverCoordination,
    "under_coordination" => EnergyTermKind::UnderCoordination,
    "valence" => EnergyTermKind::Valence,
    "penalty" => EnergyTermKind::Penalty,
    "coalition" => EnergyTermKind::Coalition,
    "torsion" => EnergyTermKind::Torsion,
    "conjugation" => EnergyTermKind::Conjugation,
    "hydrogen_bond" => EnergyTermKind::HydrogenBond,
    "c2_correction" => EnergyTermKind::C2Correction,
    "van_der_waals" => EnergyTermKind::VanDerWaals,
    "coulomb" => EnergyTermKind::Coulomb,
};

impl EnergyTermKind {
    pub const ALL: [EnergyTermKind; 13] = [
        EnergyTermKind::Bond,
        EnergyTermKind::LonePair,
        EnergyTermKind::OverCoordination,
        EnergyTermKind::UnderCoordination,
        EnergyTermKind::Valence,
        EnergyTermKind::Penalty,
        EnergyTermKind::Coalition,
        EnergyTermKind::Torsion,
        EnergyTermKind::Conjugation,
        EnergyTermKind::HydrogenBond,
        EnergyTermKind::C2Correction,
        EnergyTermKind::VanDerWaals,
        EnergyTermKind::Coulomb,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EnergyTermKind::Bond => "bond",
            EnergyTermKind::LonePair => "lone_pair",
            EnergyTermKind::OverCoordination => "over_coordination",
            EnergyTermKind::UnderCoordination => "under_coordination",
            EnergyTermKind::Valence => "valence",
            EnergyTermKind::Penalty => "penalty",
            EnergyTermKind::Coalition => "coalition",
            EnergyTermKind::Torsion => "torsion",
            EnergyTermKind::Conjugation => "conjugation",
            EnergyTermKind::HydrogenBond => "hydrogen_bond",
            EnergyTermKind::C2Correction => "c2_correction",
            EnergyTermKind::VanDerWaals => "van_der_waals",
            EnergyTermKind::Coulomb => "coulomb",
        }
    }

    /// Whether the engine can produce an energy for this term.
    pub fn is_implemented(self) -> bool {
        !matches!(
            self,
            EnergyTermKind::Torsion
                | EnergyTermKind::Conjugation
                | EnergyTermKind::HydrogenBond
                | EnergyTermKind::C2Correction
        )
    }

    pub fn implemented() -> impl Iterator<Item = EnergyTermKind> {
        Self::ALL.into_iter().filter(|kind| kind.is_implemented())
    }
}

impl fmt::Display for EnergyTermKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("Unknown energy term '{0}'")]
pub struct UnknownTermError(pub String);

impl FromStr for EnergyTermKind {
    type Err = UnknownTermError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        TERM_NAMES
            .get(key.as_str())
            .copied()
            .ok_or_else(|| UnknownTermError(s.to_string()))
    }
}

/// Per-term energies of one evaluation pass, in kcal/mol.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnergyBreakdown {
    pub terms: BTreeMap<EnergyTermKind, f64>,
    /// Atom triples left out because no angle parameters exist for their types.
    pub skipped_tuples: usize,
}

impl EnergyBreakdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: EnergyTermKind) -> Option<f64> {
        self.terms.get(&kind).copied()
    }

    pub fn add_term(&mut self, kind: EnergyTermKind, energy: f64) {
        *self.terms.entry(kind).or_insert(0.0) += energy;
    }

    #[inline]
    pub fn total(&self) -> f64 {
        self.terms.values().sum()
    }
}

impl Add for EnergyBreakdown {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign for EnergyBreakdown {
    fn add_assign(&mut self, rhs: Self) {
        for (kind, energy) in rhs.terms {
            self.add_term(kind, energy);
        }
        self.skipped_tuples += rhs.skipped_tuples;
    }
}

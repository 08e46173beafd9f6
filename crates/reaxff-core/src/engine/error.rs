use thiserror::Error;

use super::config::ConfigError;
use crate::core::forcefield::term::EnergyTermKind;
use crate::core::params::error::LookupError;

/// An energy query was made before its inputs were ready.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PreconditionError {
    #[error("Atom {atom} has no resolved charge; charges must be equilibrated before evaluating Coulomb energy")]
    ChargeUnresolved { atom: usize },

    #[error("Bond orders were computed for a different geometry than the one being evaluated")]
    StaleBondOrders,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Parameter lookup failed: {source}")]
    Lookup {
        #[from]
        source: LookupError,
    },

    #[error("Precondition failed: {source}")]
    Precondition {
        #[from]
        source: PreconditionError,
    },

    #[error("Atom index {index} is out of range for a configuration of {count} atoms")]
    InvalidAtomIndex { index: usize, count: usize },

    #[error("The {term} energy term is not implemented")]
    Unimplemented { term: EnergyTermKind },

    #[error("Invalid evaluation configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },
}

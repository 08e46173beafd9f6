use crate::core::forcefield::term::EnergyTermKind;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("The {0} energy term is not implemented and cannot be selected")]
    UnimplementedTerm(EnergyTermKind),

    #[error("At least one energy term must be selected")]
    NoTermsSelected,
}

/// What to do with an atom triple whose types have no angle parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingParamPolicy {
    /// Abort the evaluation with a lookup error.
    #[default]
    Fail,
    /// Leave the triple out of the three-body sums and count it.
    Skip,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationConfig {
    pub terms: Vec<EnergyTermKind>,
    pub missing_params: MissingParamPolicy,
}

impl EvaluationConfig {
    pub fn includes(&self, kind: EnergyTermKind) -> bool {
        self.terms.contains(&kind)
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            terms: EnergyTermKind::implemented().collect(),
            missing_params: MissingParamPolicy::default(),
        }
    }
}

#[derive(Default)]
pub struct EvaluationConfigBuilder {
    terms: Option<Vec<EnergyTermKind>>,
    missing_params: Option<MissingParamPolicy>,
}

impl EvaluationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn terms(mut self, terms: Vec<EnergyTermKind>) -> Self {
        self.terms = Some(terms);
        self
    }
    pub fn missing_params(mut self, policy: MissingParamPolicy) -> Self {
        self.missing_params = Some(policy);
        self
    }

    pub fn build(self) -> Result<EvaluationConfig, ConfigError> {
        let mut terms = match self.terms {
            Some(terms) => terms,
            None => EnergyTermKind::implemented().collect(),
        };
        if let Some(&kind) = terms.iter().find(|kind| !kind.is_implemented()) {
            return Err(ConfigError::UnimplementedTerm(kind));
        }
        terms.sort();
        terms.dedup();
        if terms.is_empty() {
            return Err(ConfigError::NoTermsSelected);
        }

        Ok(EvaluationConfig {
            terms,
            missing_params: self.missing_params.unwrap_or_default(),
        })
    }
}

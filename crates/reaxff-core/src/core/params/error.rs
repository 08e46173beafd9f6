use super::section::Section;
use thiserror::Error;

/// A parameter file could not be loaded. No partial tables are ever returned.
#[derive(Debug, Error)]
pub enum ParamFileError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Malformed parameter file: missing {section} section header at line {line}")]
    MissingHeader { section: Section, line: usize },

    #[error("Malformed parameter file: invalid {section} count '{value}' on line {line}")]
    InvalidCount {
        section: Section,
        line: usize,
        value: String,
    },

    #[error(
        "Malformed parameter file: {section} section declares {declared} record(s) needing {expected} line(s) after line {line}, but only {available} remain"
    )]
    Truncated {
        section: Section,
        line: usize,
        declared: usize,
        expected: usize,
        available: usize,
    },

    #[error(
        "Malformed parameter file: general section declares {declared} parameter(s) on line {line}, at least {required} are required"
    )]
    TooFewGlobals {
        line: usize,
        declared: usize,
        required: usize,
    },

    #[error("Malformed parameter file: invalid number '{token}' in {section} section on line {line}")]
    InvalidNumber {
        section: Section,
        line: usize,
        token: String,
    },

    #[error("Malformed parameter file: field {field} missing in {section} section on line {line}")]
    MissingField {
        section: Section,
        line: usize,
        field: usize,
    },

    #[error(
        "Malformed parameter file: type index {index} in {section} section on line {line} is outside 1..={count}"
    )]
    InvalidTypeIndex {
        section: Section,
        line: usize,
        index: i64,
        count: usize,
    },

    #[error(
        "Malformed parameter file: {section} section declares {declared} record(s) on line {line}, but line {continued_at} continues it"
    )]
    CountMismatch {
        section: Section,
        line: usize,
        declared: usize,
        continued_at: usize,
    },

    #[error(
        "Malformed parameter file: {section} section declares {declared} record(s), but {extra} more line(s) follow from line {line}"
    )]
    TrailingContent {
        section: Section,
        line: usize,
        declared: usize,
        extra: usize,
    },
}

impl ParamFileError {
    /// The section the error was raised in, when it is tied to one.
    pub fn section(&self) -> Option<Section> {
        match self {
            ParamFileError::MissingHeader { section, .. }
            | ParamFileError::InvalidCount { section, .. }
            | ParamFileError::Truncated { section, .. }
            | ParamFileError::InvalidNumber { section, .. }
            | ParamFileError::MissingField { section, .. }
            | ParamFileError::InvalidTypeIndex { section, .. }
            | ParamFileError::CountMismatch { section, .. }
            | ParamFileError::TrailingContent { section, .. } => Some(*section),
            ParamFileError::TooFewGlobals { .. } => Some(Section::General),
            ParamFileError::Io { .. } => None,
        }
    }
}

/// A parameter record requested for a type tuple that has none.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("No atom type with index {0}")]
    AtomType(usize),
    #[error("No bond type for atom types ({0}, {1})")]
    BondType(usize, usize),
    #[error("No bond parameters declared for atom types ({0}, {1})")]
    BondDeclaration(usize, usize),
    #[error("No angle parameters for atom types ({0}, {1}, {2})")]
    Angle(usize, usize, usize),
    #[error("No torsion parameters for atom types ({0}, {1}, {2}, {3})")]
    Torsion(usize, usize, usize, usize),
    #[error("No hydrogen bond parameters for atom types ({0}, {1}, {2})")]
    HydrogenBond(usize, usize, usize),
}

//! # Force Field Module
//!
//! Energy expressions of the ReaxFF functional form, independent of any
//! particular configuration.
//!
//! - [`potentials`] - closed-form scalar energy functions and bond-order factors
//! - [`taper`] - the seventh-order cutoff polynomial shared by the non-bonded terms
//! - [`term`] - term identifiers and the per-term energy breakdown

pub mod potentials;
pub mod taper;
pub mod term;

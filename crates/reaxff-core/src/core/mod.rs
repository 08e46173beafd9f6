//! # Core Module
//!
//! Stateless building blocks of the library.
//!
//! - **Parameters** ([`params`]) - the parameter-file parser and the immutable
//!   tables it produces, including the two-body combination rules
//! - **Energy Expressions** ([`forcefield`]) - closed-form potentials, the taper
//!   polynomial and energy term bookkeeping
//! - **Molecular Representation** ([`models`]) - the runtime atom snapshot

pub mod forcefield;
pub mod models;
pub mod params;

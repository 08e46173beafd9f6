//! # Workflows Module
//!
//! High-level entry points that tie the parameter tables and the engine
//! together.
//!
//! - **Energy Evaluation** ([`evaluate`]) - computes bond orders for a geometry and
//!   sums every selected energy term into an [`EnergyBreakdown`](crate::core::forcefield::term::EnergyBreakdown)

pub mod evaluate;

//! # Engine Module
//!
//! The stateful layer that turns a parsed parameter set and an atom snapshot
//! into energies.
//!
//! ## Overview
//!
//! Evaluation happens in two stages. [`bond_order`] first derives corrected bond
//! orders and per-atom coordination quantities for one geometry. The
//! [`evaluator`] then answers per-term queries (pairs, atoms, angle triples)
//! against that snapshot, refusing to run on bond orders computed for another
//! geometry.
//!
//! ## Architecture
//!
//! - **Bond Orders** ([`bond_order`]) - uncorrected and corrected bond orders, atom deltas
//! - **Term Queries** ([`evaluator`]) - per-interaction energies with parameter lookup
//! - **Neighbor Search** ([`neighbors`]) - k-d tree pair search within a cutoff
//! - **Configuration** ([`config`]) - term selection and missing-parameter policy
//! - **Progress Monitoring** ([`progress`]) - callback-based progress events
//! - **Error Handling** ([`error`]) - lookup, precondition and configuration failures

pub mod bond_order;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod neighbors;
pub mod progress;

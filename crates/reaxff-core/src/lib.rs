//! # ReaxFF Core Library
//!
//! A parser for ReaxFF force field parameter files and an energy engine for the
//! reactive, bond-order based ReaxFF functional form.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture.
//!
//! - **[`core`]: The Foundation.** Immutable parameter tables produced by the
//!   parameter-file parser, the combination rules for unlisted atom-type pairs,
//!   closed-form potentials and the taper polynomial, and the atom snapshot model.
//!
//! - **[`engine`]: The Logic Core.** Computes corrected bond orders for a geometry
//!   and evaluates individual energy terms against them, with neighbor search,
//!   progress reporting and typed errors.
//!
//! - **[`workflows`]: The Public API.** Runs a complete evaluation of a
//!   configuration and returns the per-term energy breakdown.

pub mod core;
pub mod engine;
pub mod workflows;

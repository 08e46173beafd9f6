use crate::core::forcefield::term::{EnergyBreakdown, EnergyTermKind};
use crate::core::models::atom::Atom;
use crate::core::params::error::LookupError;
use crate::core::params::tables::ParameterTables;
use crate::engine::bond_order::BondOrderMatrix;
use crate::engine::config::{ConfigError, EvaluationConfig, MissingParamPolicy};
use crate::engine::error::{EngineError, PreconditionError};
use crate::engine::evaluator::Evaluator;
use crate::engine::neighbors::{self, AtomPair};
use crate::engine::progress::{Progress, ProgressReporter};
use itertools::Itertools;
use tracing::{debug, info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Interactions of one geometry, enumerated once and shared by every term.
struct Interactions {
    atoms: Vec<usize>,
    bonded_pairs: Vec<[usize; 2]>,
    non_bonded_pairs: Vec<AtomPair>,
    angle_triples: Vec<[usize; 3]>,
    skipped_triples: usize,
}

/// Evaluates every selected energy term of `atoms`.
///
/// Bond orders are computed for the given geometry first; the per-term sums
/// are accumulated in a fixed order, so repeated runs on the same input
/// produce bit-identical energies.
#[instrument(skip_all, name = "evaluation_workflow", fields(atoms = atoms.len()))]
pub fn run(
    atoms: &[Atom],
    tables: &ParameterTables,
    config: &EvaluationConfig,
    reporter: &ProgressReporter,
) -> Result<EnergyBreakdown, EngineError> {
    if let Some(&term) = config.terms.iter().find(|term| !term.is_implemented()) {
        return Err(ConfigError::UnimplementedTerm(term).into());
    }
    if config.includes(EnergyTermKind::Coulomb) {
        if let Some(atom) = atoms.iter().position(|atom| atom.charge.is_none()) {
            return Err(PreconditionError::ChargeUnresolved { atom }.into());
        }
    }

    // === Phase 1: Bond orders ===
    reporter.report(Progress::PhaseStart {
        name: "Bond Orders",
    });
    let bond_orders = BondOrderMatrix::compute(atoms, tables)?;
    let evaluator = Evaluator::new(atoms, tables, &bond_orders)?;
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Interaction lists ===
    reporter.report(Progress::PhaseStart {
        name: "Interaction Lists",
    });
    let interactions = enumerate_interactions(&evaluator, config)?;
    if interactions.skipped_triples > 0 {
        reporter.report(Progress::Message(format!(
            "{} angle triple(s) skipped for lack of parameters",
            interactions.skipped_triples
        )));
    }
    reporter.report(Progress::PhaseFinish);

    // === Phase 3: Energy terms ===
    reporter.report(Progress::PhaseStart {
        name: "Energy Terms",
    });
    let mut breakdown = EnergyBreakdown::new();
    breakdown.skipped_tuples = interactions.skipped_triples;

    for &term in &config.terms {
        reporter.report(Progress::TermStart { term });
        let energy = evaluate_term(&evaluator, &interactions, term)?;
        debug!(term = %term, energy, "Energy term evaluated.");
        breakdown.add_term(term, energy);
        reporter.report(Progress::TermFinish { term, energy });
    }
    reporter.report(Progress::PhaseFinish);

    info!(
        total_energy = breakdown.total(),
        bonds = bond_orders.bond_count(),
        "Evaluation complete."
    );
    Ok(breakdown)
}

fn enumerate_interactions(
    evaluator: &Evaluator,
    config: &EvaluationConfig,
) -> Result<Interactions, EngineError> {
    let atoms = evaluator.atoms();
    let bond_orders = evaluator.bond_orders();

    let bonded_pairs: Vec<[usize; 2]> = (0..atoms.len())
        .flat_map(|i| {
            bond_orders
                .bonds(i)
                .iter()
                .filter(move |bond| bond.neighbor > i)
                .map(move |bond| [i, bond.neighbor])
        })
        .collect();

    let needs_pairs = config.includes(EnergyTermKind::VanDerWaals)
        || config.includes(EnergyTermKind::Coulomb);
    let non_bonded_pairs = if needs_pairs {
        neighbors::pairs_within(atoms, evaluator.taper().cutoff())
    } else {
        Vec::new()
    };

    let needs_triples = [
        EnergyTermKind::Valence,
        EnergyTermKind::Penalty,
        EnergyTermKind::Coalition,
    ]
    .into_iter()
    .any(|kind| config.includes(kind));
    let (angle_triples, skipped_triples) = if needs_triples {
        angle_triples(evaluator, config.missing_params)?
    } else {
        (Vec::new(), 0)
    };

    debug!(
        bonded_pairs = bonded_pairs.len(),
        non_bonded_pairs = non_bonded_pairs.len(),
        angle_triples = angle_triples.len(),
        "Interaction lists built."
    );

    Ok(Interactions {
        atoms: (0..atoms.len()).collect(),
        bonded_pairs,
        non_bonded_pairs,
        angle_triples,
        skipped_triples,
    })
}

/// Every `[a, center, b]` with both arms bonded above the bond-order cutoff,
/// `a < b`, whose angle parameters exist.
///
/// Triples without parameters abort the evaluation or are dropped and counted,
/// depending on `policy`.
fn angle_triples(
    evaluator: &Evaluator,
    policy: MissingParamPolicy,
) -> Result<(Vec<[usize; 3]>, usize), EngineError> {
    let atoms = evaluator.atoms();
    let tables = evaluator.tables();
    let bond_orders = evaluator.bond_orders();
    let bo_cut = tables.globals().bo_cut;

    let mut triples = Vec::new();
    let mut missing: Vec<LookupError> = Vec::new();

    for center in 0..atoms.len() {
        let arms = bond_orders
            .bonds(center)
            .iter()
            .filter(|bond| bond.order.total > bo_cut)
            .map(|bond| bond.neighbor);

        for (a, b) in arms.tuple_combinations() {
            let lookup = tables.angle(
                atoms[a].type_index,
                atoms[center].type_index,
                atoms[b].type_index,
            );
            match (lookup, policy) {
                (Ok(_), _) => triples.push([a, center, b]),
                (Err(error), MissingParamPolicy::Fail) => return Err(error.into()),
                (Err(error), MissingParamPolicy::Skip) => missing.push(error),
            }
        }
    }

    if !missing.is_empty() {
        let distinct: Vec<String> = missing
            .iter()
            .map(ToString::to_string)
            .unique()
            .collect();
        warn!(
            skipped = missing.len(),
            "Skipped angle triples without parameters: {}",
            distinct.join("; ")
        );
    }
    Ok((triples, missing.len()))
}

fn evaluate_term(
    evaluator: &Evaluator,
    interactions: &Interactions,
    term: EnergyTermKind,
) -> Result<f64, EngineError> {
    match term {
        EnergyTermKind::Bond => sum_over(&interactions.bonded_pairs, |&[i, j]| {
            evaluator.bond(i, j)
        }),
        EnergyTermKind::LonePair => {
            sum_over(&interactions.atoms, |&i| evaluator.lone_pair(i))
        }
        EnergyTermKind::OverCoordination => {
            sum_over(&interactions.atoms, |&i| evaluator.over_coordination(i))
        }
        EnergyTermKind::UnderCoordination => {
            sum_over(&interactions.atoms, |&i| evaluator.under_coordination(i))
        }
        EnergyTermKind::Valence => {
            sum_over(&interactions.angle_triples, |&triple| evaluator.valence(triple))
        }
        EnergyTermKind::Penalty => {
            sum_over(&interactions.angle_triples, |&triple| evaluator.penalty(triple))
        }
        EnergyTermKind::Coalition => {
            sum_over(&interactions.angle_triples, |&triple| evaluator.coalition(triple))
        }
        EnergyTermKind::VanDerWaals => sum_over(&interactions.non_bonded_pairs, |pair| {
            evaluator.van_der_waals(pair.i, pair.j)
        }),
        EnergyTermKind::Coulomb => sum_over(&interactions.non_bonded_pairs, |pair| {
            evaluator.coulomb(pair.i, pair.j)
        }),
        EnergyTermKind::Torsion
        | EnergyTermKind::Conjugation
        | EnergyTermKind::HydrogenBond
        | EnergyTermKind::C2Correction => Err(EngineError::Unimplemented { term }),
    }
}

/// Sums `energy` over `items` in item order, evaluating in parallel when enabled.
fn sum_over<T, F>(items: &[T], energy: F) -> Result<f64, EngineError>
where
    T: Sync,
    F: Fn(&T) -> Result<f64, EngineError> + Sync + Send,
{
    #[cfg(not(feature = "parallel"))]
    let energies: Vec<f64> = items.iter().map(&energy).collect::<Result<_, _>>()?;

    #[cfg(feature = "parallel")]
    let energies: Vec<f64> = items.par_iter().map(&energy).collect::<Result<_, _>>()?;

    Ok(energies.iter().sum())
}

use super::error::EngineError;
use super::neighbors::{self, AtomPair};
use crate::core::forcefield::potentials;
use crate::core::models::atom::Atom;
use crate::core::params::globals::GlobalParams;
use crate::core::params::records::{AtomTypeRecord, BondTypeRecord};
use crate::core::params::tables::ParameterTables;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tracing::{debug, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Atoms farther apart than this are never considered bonded.
pub const BOND_SEARCH_RADIUS: f64 = 5.0;

/// Corrected bond-order components smaller than this are stored as zero.
const BOND_ORDER_FLOOR: f64 = 1e-10;

/// `ovc` and `v13cor` values below this switch their correction off.
const CORRECTION_SWITCH: f64 = 0.001;

/// Bond order of one atom pair split into its σ, π and ππ components.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BondOrder {
    pub total: f64,
    pub sigma: f64,
    pub pi: f64,
    pub pi_pi: f64,
}

impl BondOrder {
    pub const ZERO: BondOrder = BondOrder {
        total: 0.0,
        sigma: 0.0,
        pi: 0.0,
        pi_pi: 0.0,
    };

    /// Combined π and ππ order.
    #[inline]
    pub fn pi_total(&self) -> f64 {
        self.pi + self.pi_pi
    }
}

/// Uncorrected bond order of two atoms `dist` apart.
///
/// Pairs without an explicit bond declaration have no bond order. A component
/// is zero when either atom type has a non-positive radius for it.
pub fn uncorrected_bond_order(
    dist: f64,
    type_i: &AtomTypeRecord,
    type_j: &AtomTypeRecord,
    record: &BondTypeRecord,
) -> BondOrder {
    let Some(bond) = &record.declared else {
        return BondOrder::ZERO;
    };

    let sigma = if type_i.r_sigma > 0.0 && type_j.r_sigma > 0.0 {
        potentials::uncorrected_bond_order(dist, record.r_sigma, bond.p_bo1, bond.p_bo2)
    } else {
        0.0
    };
    let pi = if type_i.r_pi > 0.0 && type_j.r_pi > 0.0 {
        potentials::uncorrected_bond_order(dist, record.r_pi, bond.p_bo3, bond.p_bo4)
    } else {
        0.0
    };
    let pi_pi = if type_i.r_pi_pi > 0.0 && type_j.r_pi_pi > 0.0 {
        potentials::uncorrected_bond_order(dist, record.r_pi_pi, bond.p_bo5, bond.p_bo6)
    } else {
        0.0
    };

    BondOrder {
        total: sigma + pi + pi_pi,
        sigma,
        pi,
        pi_pi,
    }
}

/// Per-atom quantities derived from the corrected bond orders.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AtomBondState {
    /// Sum of corrected bond orders over all bonds of the atom.
    pub total: f64,
    /// `total - valency`.
    pub delta: f64,
    /// `total - valency_e`.
    pub delta_e: f64,
    /// `total - valency_boc`.
    pub delta_boc: f64,
    /// `total - valency_val`.
    pub delta_val: f64,
    /// Excess of `delta_e` over the nearest lower even number.
    pub vlpex: f64,
    /// Number of lone pairs.
    pub n_lp: f64,
    /// Lone-pair deficit relative to the optimal count.
    pub delta_lp: f64,
    /// `delta_lp` for light atoms and zero for heavy ones.
    pub delta_lp_temp: f64,
}

impl AtomBondState {
    fn new(total: f64, atom_type: &AtomTypeRecord, p_lp1: f64) -> Self {
        let delta_e = total - atom_type.valency_e;
        let half_delta_e = (delta_e / 2.0).trunc();
        let vlpex = delta_e - 2.0 * half_delta_e;
        let n_lp = (-p_lp1 * (2.0 + vlpex).powi(2)).exp() - half_delta_e;
        let delta_lp = atom_type.optimal_lone_pairs() - n_lp;

        Self {
            total,
            delta: total - atom_type.valency,
            delta_e,
            delta_boc: total - atom_type.valency_boc,
            delta_val: total - atom_type.valency_val,
            vlpex,
            n_lp,
            delta_lp,
            delta_lp_temp: if atom_type.is_heavy() { 0.0 } else { delta_lp },
        }
    }
}

/// Identifies the geometry (positions and types) a bond-order matrix was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryFingerprint(u64);

impl GeometryFingerprint {
    pub fn of(atoms: &[Atom]) -> Self {
        let mut hasher = DefaultHasher::new();
        atoms.len().hash(&mut hasher);
        for atom in atoms {
            atom.type_index.hash(&mut hasher);
            atom.position.x.to_bits().hash(&mut hasher);
            atom.position.y.to_bits().hash(&mut hasher);
            atom.position.z.to_bits().hash(&mut hasher);
        }
        Self(hasher.finish())
    }
}

/// One entry of an atom's bond list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bond {
    pub neighbor: usize,
    pub order: BondOrder,
}

/// Corrected bond orders of every atom pair in one geometry.
///
/// The matrix is symmetric and stored sparsely: each atom keeps the bonds with
/// a non-zero corrected order, sorted by neighbour index. Every other pair has
/// a zero bond order.
#[derive(Debug, Clone, PartialEq)]
pub struct BondOrderMatrix {
    bonds: Vec<Vec<Bond>>,
    states: Vec<AtomBondState>,
    fingerprint: GeometryFingerprint,
}

struct Correction<'a> {
    types: &'a [&'a AtomTypeRecord],
    deltas: &'a [f64],
    deltas_boc: &'a [f64],
    p_boc1: f64,
    p_boc2: f64,
}

impl Correction<'_> {
    fn apply(&self, pair: &AtomPair, raw: BondOrder, record: &BondTypeRecord) -> BondOrder {
        let Some(bond) = &record.declared else {
            return BondOrder::ZERO;
        };
        let (i, j) = (pair.i, pair.j);

        let f1 = if bond.ovc >= CORRECTION_SWITCH {
            potentials::overcoordination_factor(
                self.types[i].valency,
                self.types[j].valency,
                self.deltas[i],
                self.deltas[j],
                self.p_boc1,
                self.p_boc2,
            )
        } else {
            1.0
        };

        let (f4, f5) = if bond.v13cor >= CORRECTION_SWITCH {
            let factor = |delta_boc| {
                potentials::one_three_correction_factor(
                    raw.total,
                    delta_boc,
                    record.p_boc3,
                    record.p_boc4,
                    record.p_boc5,
                )
            };
            (factor(self.deltas_boc[i]), factor(self.deltas_boc[j]))
        } else {
            (1.0, 1.0)
        };

        let total = raw.total * f1 * f4 * f5;
        let pi = raw.pi * f1 * f1 * f4 * f5;
        let pi_pi = raw.pi_pi * f1 * f1 * f4 * f5;
        let floor = |value: f64| if value < BOND_ORDER_FLOOR { 0.0 } else { value };

        BondOrder {
            total: floor(total),
            sigma: floor(total - pi - pi_pi),
            pi: floor(pi),
            pi_pi: floor(pi_pi),
        }
    }
}

impl BondOrderMatrix {
    /// Computes corrected bond orders for the given atoms.
    ///
    /// Pairs whose uncorrected total falls below `bo_cut` are dropped; kept
    /// totals are not shifted down by it.
    ///
    /// Fails with a lookup error if an atom refers to a type the tables do not
    /// declare.
    #[instrument(skip_all, name = "bond_order_compute", fields(atoms = atoms.len()))]
    pub fn compute(atoms: &[Atom], tables: &ParameterTables) -> Result<Self, EngineError> {
        let globals: &GlobalParams = tables.globals();
        let types = atoms
            .iter()
            .map(|atom| tables.atom_type(atom.type_index))
            .collect::<Result<Vec<_>, _>>()?;

        let mut candidates = Vec::new();
        for pair in neighbors::pairs_within(atoms, BOND_SEARCH_RADIUS) {
            let record = tables.bond_type(atoms[pair.i].type_index, atoms[pair.j].type_index)?;
            let raw = uncorrected_bond_order(pair.distance, types[pair.i], types[pair.j], record);
            if raw.total > 0.0 && raw.total >= globals.bo_cut {
                candidates.push((pair, raw, record));
            }
        }

        let mut raw_sums = vec![0.0; atoms.len()];
        for (pair, raw, _) in &candidates {
            raw_sums[pair.i] += raw.total;
            raw_sums[pair.j] += raw.total;
        }
        let deltas: Vec<f64> = types
            .iter()
            .zip(&raw_sums)
            .map(|(atom_type, sum)| sum - atom_type.valency)
            .collect();
        let deltas_boc: Vec<f64> = types
            .iter()
            .zip(&raw_sums)
            .map(|(atom_type, sum)| sum - atom_type.valency_val)
            .collect();

        let correction = Correction {
            types: &types,
            deltas: &deltas,
            deltas_boc: &deltas_boc,
            p_boc1: globals.p_boc1,
            p_boc2: globals.p_boc2,
        };

        #[cfg(not(feature = "parallel"))]
        let corrected: Vec<(AtomPair, BondOrder)> = candidates
            .iter()
            .map(|(pair, raw, record)| (*pair, correction.apply(pair, *raw, record)))
            .collect();

        #[cfg(feature = "parallel")]
        let corrected: Vec<(AtomPair, BondOrder)> = candidates
            .par_iter()
            .map(|(pair, raw, record)| (*pair, correction.apply(pair, *raw, record)))
            .collect();

        let mut bonds = vec![Vec::new(); atoms.len()];
        let mut totals = vec![0.0; atoms.len()];
        for (pair, order) in corrected {
            if order.total <= 0.0 {
                continue;
            }
            bonds[pair.i].push(Bond {
                neighbor: pair.j,
                order,
            });
            bonds[pair.j].push(Bond {
                neighbor: pair.i,
                order,
            });
            totals[pair.i] += order.total;
            totals[pair.j] += order.total;
        }
        for list in &mut bonds {
            list.sort_unstable_by_key(|bond| bond.neighbor);
        }

        let states = types
            .iter()
            .zip(&totals)
            .map(|(atom_type, &total)| AtomBondState::new(total, atom_type, globals.p_lp1))
            .collect();

        debug!(
            bonds = bonds.iter().map(Vec::len).sum::<usize>() / 2,
            "Bond orders computed."
        );

        Ok(Self {
            bonds,
            states,
            fingerprint: GeometryFingerprint::of(atoms),
        })
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn fingerprint(&self) -> GeometryFingerprint {
        self.fingerprint
    }

    /// Whether the matrix was computed for exactly this geometry.
    pub fn matches(&self, atoms: &[Atom]) -> bool {
        self.len() == atoms.len() && self.fingerprint == GeometryFingerprint::of(atoms)
    }

    /// Bond order between `i` and `j`; zero for unbonded or out-of-range pairs.
    pub fn order(&self, i: usize, j: usize) -> BondOrder {
        self.bonds
            .get(i)
            .and_then(|list| {
                list.binary_search_by_key(&j, |bond| bond.neighbor)
                    .ok()
                    .map(|k| list[k].order)
            })
            .unwrap_or(BondOrder::ZERO)
    }

    /// Bonds of atom `i`, sorted by neighbour index.
    pub fn bonds(&self, i: usize) -> &[Bond] {
        self.bonds.get(i).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn state(&self, i: usize) -> Option<&AtomBondState> {
        self.states.get(i)
    }

    pub fn states(&self) -> &[AtomBondState] {
        &self.states
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.iter().map(Vec::len).sum::<usize>() / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::params::test_fixtures::{CHO_FFIELD, OXYGEN_FFIELD};
    use nalgebra::Point3;

    const TOLERANCE: f64 = 1e-9;

    fn tables() -> ParameterTables {
        CHO_FFIELD.parse().unwrap()
    }

    fn water(tables: &ParameterTables) -> Vec<Atom> {
        let o = tables.type_index("O").unwrap();
        let h = tables.type_index("H").unwrap();
        let angle = 104.5f64.to_radians();
        vec![
            Atom::new(o, Point3::origin()),
            Atom::new(h, Point3::new(0.9572, 0.0, 0.0)),
            Atom::new(h, Point3::new(0.9572 * angle.cos(), 0.9572 * angle.sin(), 0.0)),
        ]
    }

    #[test]
    fn uncorrected_bond_order_decreases_strictly_with_distance() {
        let tables = tables();
        let c = tables.type_index("C").unwrap();
        let carbon = tables.atom_type(c).unwrap();
        let record = tables.bond_type(c, c).unwrap();

        let orders: Vec<f64> = (1..80)
            .map(|k| uncorrected_bond_order(k as f64 * 0.05, carbon, carbon, record).total)
            .collect();
        assert!(orders.windows(2).all(|w| w[1] < w[0]));
        assert!(orders[0] <= 3.0);
        assert!(uncorrected_bond_order(20.0, carbon, carbon, record).total < 1e-12);
    }

    #[test]
    fn uncorrected_bond_order_is_zero_for_undeclared_pairs() {
        let tables = tables();
        let h = tables.type_index("H").unwrap();
        let mut record = tables.bond_type(h, h).unwrap().clone();
        record.declared = None;
        let hydrogen = tables.atom_type(h).unwrap();
        assert_eq!(
            uncorrected_bond_order(0.74, hydrogen, hydrogen, &record),
            BondOrder::ZERO
        );
    }

    #[test]
    fn uncorrected_bond_order_skips_components_with_non_positive_radius() {
        let tables = tables();
        let h = tables.type_index("H").unwrap();
        let hydrogen = tables.atom_type(h).unwrap();
        let record = tables.bond_type(h, h).unwrap();
        let order = uncorrected_bond_order(0.74, hydrogen, hydrogen, record);
        assert!(order.sigma > 0.0);
        assert_eq!(order.pi, 0.0);
        assert_eq!(order.pi_pi, 0.0);
    }

    #[test]
    fn orders_above_cutoff_are_kept_unshifted() {
        let text = CHO_FFIELD.replace(
            "  2  3 160.0000   0.0000   0.0000  -0.5725   0.0000   1.0000",
            "  2  3 160.0000   0.0000   0.0000  -0.5725   0.0000   0.0000",
        );
        let tables: ParameterTables = text.parse().unwrap();
        let o = tables.type_index("O").unwrap();
        let h = tables.type_index("H").unwrap();
        let atoms = vec![
            Atom::new(o, Point3::origin()),
            Atom::new(h, Point3::new(0.98, 0.0, 0.0)),
        ];

        let matrix = BondOrderMatrix::compute(&atoms, &tables).unwrap();
        let raw = uncorrected_bond_order(
            0.98,
            tables.atom_type(o).unwrap(),
            tables.atom_type(h).unwrap(),
            tables.bond_type(o, h).unwrap(),
        );
        assert!(raw.total > tables.globals().bo_cut);
        assert_eq!(matrix.order(0, 1).total, raw.total);
    }

    #[test]
    fn compute_produces_symmetric_bond_orders() {
        let tables = tables();
        let atoms = water(&tables);
        let matrix = BondOrderMatrix::compute(&atoms, &tables).unwrap();

        assert_eq!(matrix.len(), 3);
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(matrix.order(i, j), matrix.order(j, i));
            }
        }
        assert!(matrix.order(0, 1).total > 0.5);
        assert!(matrix.order(0, 2).total > 0.5);
        assert_eq!(matrix.order(0, 0), BondOrder::ZERO);
    }

    #[test]
    fn compute_splits_total_into_components() {
        let tables = tables();
        let matrix = BondOrderMatrix::compute(&water(&tables), &tables).unwrap();
        let order = matrix.order(0, 1);
        assert!((order.sigma + order.pi + order.pi_pi - order.total).abs() < TOLERANCE);
        assert_eq!(order.pi, 0.0);
    }

    #[test]
    fn compute_sums_atom_totals_and_deviations() {
        let tables = tables();
        let matrix = BondOrderMatrix::compute(&water(&tables), &tables).unwrap();
        let oxygen = tables.atom_type(tables.type_index("O").unwrap()).unwrap();
        let state = matrix.state(0).unwrap();

        let expected_total = matrix.order(0, 1).total + matrix.order(0, 2).total;
        assert!((state.total - expected_total).abs() < TOLERANCE);
        assert!((state.delta - (expected_total - oxygen.valency)).abs() < TOLERANCE);
        assert!((state.delta_e - (expected_total - oxygen.valency_e)).abs() < TOLERANCE);
        assert_eq!(state.delta_lp_temp, state.delta_lp);
        assert_eq!(matrix.bonds(0).len(), 2);
        assert_eq!(matrix.bond_count(), matrix.bonds(0).len() + matrix.bonds(1).len() - 1);
    }

    #[test]
    fn distant_atoms_are_not_bonded() {
        let tables: ParameterTables = OXYGEN_FFIELD.parse().unwrap();
        let atoms = vec![
            Atom::new(0, Point3::origin()),
            Atom::new(0, Point3::new(6.0, 0.0, 0.0)),
        ];
        let matrix = BondOrderMatrix::compute(&atoms, &tables).unwrap();
        assert_eq!(matrix.bond_count(), 0);
        assert_eq!(matrix.order(0, 1), BondOrder::ZERO);
        assert_eq!(matrix.state(0).unwrap().total, 0.0);
    }

    #[test]
    fn compute_rejects_unknown_atom_types() {
        let tables: ParameterTables = OXYGEN_FFIELD.parse().unwrap();
        let atoms = vec![Atom::new(3, Point3::origin())];
        let result = BondOrderMatrix::compute(&atoms, &tables);
        assert!(matches!(result, Err(EngineError::Lookup { .. })));
    }

    #[test]
    fn compute_is_deterministic() {
        let tables = tables();
        let atoms = water(&tables);
        let first = BondOrderMatrix::compute(&atoms, &tables).unwrap();
        let second = BondOrderMatrix::compute(&atoms, &tables).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn fingerprint_tracks_positions_and_types() {
        let tables = tables();
        let atoms = water(&tables);
        let matrix = BondOrderMatrix::compute(&atoms, &tables).unwrap();
        assert!(matrix.matches(&atoms));

        let mut moved = atoms.clone();
        moved[1].position.x += 1e-6;
        assert!(!matrix.matches(&moved));

        let mut retyped = atoms.clone();
        retyped[1].type_index = tables.type_index("C").unwrap();
        assert!(!matrix.matches(&retyped));

        let charged: Vec<Atom> = atoms.into_iter().map(|a| a.with_charge(0.1)).collect();
        assert!(matrix.matches(&charged));
    }
}

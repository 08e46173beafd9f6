use super::bond_order::{AtomBondState, BondOrderMatrix};
use super::error::{EngineError, PreconditionError};
use crate::core::forcefield::potentials;
use crate::core::forcefield::taper::Taper;
use crate::core::forcefield::term::EnergyTermKind;
use crate::core::models::atom::Atom;
use crate::core::params::error::LookupError;
use crate::core::params::globals::GlobalParams;
use crate::core::params::records::{AngleTypeRecord, AtomTypeRecord};
use crate::core::params::tables::ParameterTables;

/// Below this magnitude `p_val1` switches off all three-body energies of an angle.
const MIN_ANGLE_FORCE_CONSTANT: f64 = 0.001;

/// Per-term energy queries for one geometry.
///
/// An evaluator borrows the atom snapshot, the parameter tables and the bond
/// orders computed for that snapshot. Every query looks parameters up by the
/// atoms' current types. Energies are in kcal/mol.
pub struct Evaluator<'a> {
    atoms: &'a [Atom],
    tables: &'a ParameterTables,
    bond_orders: &'a BondOrderMatrix,
    taper: Taper,
}

/// Bond orders of the two arms of a valence angle, shifted by the bond-order cutoff.
struct AngleArms<'a> {
    angle: &'a AngleTypeRecord,
    bo_a: f64,
    bo_b: f64,
}

impl<'a> Evaluator<'a> {
    pub fn new(
        atoms: &'a [Atom],
        tables: &'a ParameterTables,
        bond_orders: &'a BondOrderMatrix,
    ) -> Result<Self, EngineError> {
        if !bond_orders.matches(atoms) {
            return Err(PreconditionError::StaleBondOrders.into());
        }
        for atom in atoms {
            tables.atom_type(atom.type_index)?;
        }

        Ok(Self {
            atoms,
            tables,
            bond_orders,
            taper: Taper::new(tables.globals().taper_upper),
        })
    }

    pub fn atoms(&self) -> &'a [Atom] {
        self.atoms
    }

    pub fn tables(&self) -> &'a ParameterTables {
        self.tables
    }

    pub fn bond_orders(&self) -> &'a BondOrderMatrix {
        self.bond_orders
    }

    pub fn taper(&self) -> &Taper {
        &self.taper
    }

    #[inline]
    fn globals(&self) -> &'a GlobalParams {
        self.tables.globals()
    }

    fn check_indices(&self, indices: &[usize]) -> Result<(), EngineError> {
        match indices.iter().find(|&&index| index >= self.atoms.len()) {
            Some(&index) => Err(EngineError::InvalidAtomIndex {
                index,
                count: self.atoms.len(),
            }),
            None => Ok(()),
        }
    }

    fn has_repeats(indices: &[usize]) -> bool {
        indices
            .iter()
            .enumerate()
            .any(|(k, index)| indices[..k].contains(index))
    }

    fn atom_type(&self, index: usize) -> Result<&'a AtomTypeRecord, EngineError> {
        Ok(self.tables.atom_type(self.atoms[index].type_index)?)
    }

    fn state(&self, index: usize) -> AtomBondState {
        self.bond_orders
            .state(index)
            .copied()
            .unwrap_or_default()
    }

    /// Tapered, shielded van der Waals energy of a pair.
    pub fn van_der_waals(&self, i: usize, j: usize) -> Result<f64, EngineError> {
        self.check_indices(&[i, j])?;
        if i == j {
            return Ok(0.0);
        }
        let (a, b) = (&self.atoms[i], &self.atoms[j]);
        let record = self.tables.bond_type(a.type_index, b.type_index)?;
        let r = a.distance_to(b);
        let tap = self.taper.value(r);
        if tap == 0.0 {
            return Ok(0.0);
        }

        Ok(tap
            * potentials::shielded_vdw(
                r,
                record.d,
                record.alpha,
                record.r_vdw,
                record.gamma_w,
                self.globals().p_vdw1,
            ))
    }

    /// Tapered, shielded Coulomb energy of a pair.
    ///
    /// Both atoms must carry resolved charges.
    pub fn coulomb(&self, i: usize, j: usize) -> Result<f64, EngineError> {
        self.check_indices(&[i, j])?;
        if i == j {
            return Ok(0.0);
        }
        let (a, b) = (&self.atoms[i], &self.atoms[j]);
        let q_i = a
            .charge
            .ok_or(PreconditionError::ChargeUnresolved { atom: i })?;
        let q_j = b
            .charge
            .ok_or(PreconditionError::ChargeUnresolved { atom: j })?;
        let record = self.tables.bond_type(a.type_index, b.type_index)?;
        let r = a.distance_to(b);

        Ok(self.taper.value(r) * potentials::shielded_coulomb(r, q_i, q_j, record.gamma))
    }

    /// Bond energy of a pair; zero when the pair is not bonded.
    pub fn bond(&self, i: usize, j: usize) -> Result<f64, EngineError> {
        self.check_indices(&[i, j])?;
        let order = self.bond_orders.order(i, j);
        if order.total <= 0.0 {
            return Ok(0.0);
        }
        let (ti, tj) = (self.atoms[i].type_index, self.atoms[j].type_index);
        let declared = self
            .tables
            .bond_type(ti, tj)?
            .declared
            .as_ref()
            .ok_or(LookupError::BondDeclaration(ti, tj))?;

        Ok(potentials::bond_energy(
            order.sigma,
            order.pi,
            order.pi_pi,
            declared.de_sigma,
            declared.de_pi,
            declared.de_pi_pi,
            declared.p_be1,
            declared.p_be2,
        ))
    }

    pub fn lone_pair(&self, i: usize) -> Result<f64, EngineError> {
        self.check_indices(&[i])?;
        let atom_type = self.atom_type(i)?;
        Ok(potentials::lone_pair_energy(
            self.state(i).delta_lp,
            atom_type.p_lp2,
        ))
    }

    /// `(Σ p_ovun1 De_σ BO, Σ (Δj - Δlp_j)(BOπ + BOππ))` over the bonds of `i`.
    fn coordination_sums(&self, i: usize) -> Result<(f64, f64), EngineError> {
        let atom_type = self.atom_type(i)?;
        let lone_pair_weight = if atom_type.is_heavy() { 0.0 } else { 1.0 };
        let mut sum_ovun1 = 0.0;
        let mut sum_ovun2 = 0.0;

        for bond in self.bond_orders.bonds(i) {
            let j = bond.neighbor;
            let record = self
                .tables
                .bond_type(self.atoms[i].type_index, self.atoms[j].type_index)?;
            if let Some(declared) = &record.declared {
                sum_ovun1 += declared.p_ovun1 * declared.de_sigma * bond.order.total;
            }
            let neighbor = self.state(j);
            sum_ovun2 += (neighbor.delta - lone_pair_weight * neighbor.delta_lp_temp)
                * bond.order.pi_total();
        }
        Ok((sum_ovun1, sum_ovun2))
    }

    fn lone_pair_corrected_delta(&self, i: usize, sum_ovun2: f64) -> f64 {
        let state = self.state(i);
        let globals = self.globals();
        potentials::lone_pair_corrected_delta(
            state.delta,
            state.delta_lp_temp,
            sum_ovun2,
            globals.p_ovun3,
            globals.p_ovun4,
        )
    }

    pub fn over_coordination(&self, i: usize) -> Result<f64, EngineError> {
        self.check_indices(&[i])?;
        let atom_type = self.atom_type(i)?;
        let (sum_ovun1, sum_ovun2) = self.coordination_sums(i)?;
        let delta_lpcorr = self.lone_pair_corrected_delta(i, sum_ovun2);

        Ok(potentials::over_coordination_energy(
            sum_ovun1,
            delta_lpcorr,
            atom_type.valency,
            atom_type.p_ovun2,
        ))
    }

    pub fn under_coordination(&self, i: usize) -> Result<f64, EngineError> {
        self.check_indices(&[i])?;
        let atom_type = self.atom_type(i)?;
        let (_, sum_ovun2) = self.coordination_sums(i)?;
        let delta_lpcorr = self.lone_pair_corrected_delta(i, sum_ovun2);
        let globals = self.globals();

        Ok(potentials::under_coordination_energy(
            delta_lpcorr,
            sum_ovun2,
            atom_type.p_ovun2,
            atom_type.p_ovun5,
            globals.p_ovun6,
            globals.p_ovun7,
            globals.p_ovun8,
        ))
    }

    /// Resolves the angle record and arm bond orders of `[a, center, b]`.
    ///
    /// Returns `None` when either arm is not bonded above the bond-order cutoff
    /// or when the triple repeats an atom.
    fn angle_arms(&self, triple: [usize; 3]) -> Result<Option<AngleArms<'a>>, EngineError> {
        self.check_indices(&triple)?;
        if Self::has_repeats(&triple) {
            return Ok(None);
        }
        let [a, center, b] = triple;
        let bo_cut = self.globals().bo_cut;
        let bo_a = self.bond_orders.order(center, a).total;
        let bo_b = self.bond_orders.order(center, b).total;
        if bo_a <= bo_cut || bo_b <= bo_cut {
            return Ok(None);
        }

        let angle = self.tables.angle(
            self.atoms[a].type_index,
            self.atoms[center].type_index,
            self.atoms[b].type_index,
        )?;
        if angle.p_val1.abs() <= MIN_ANGLE_FORCE_CONSTANT {
            return Ok(None);
        }

        Ok(Some(AngleArms {
            angle,
            bo_a: bo_a - bo_cut,
            bo_b: bo_b - bo_cut,
        }))
    }

    /// Valence angle `a-center-b` in radians.
    fn bend_angle(&self, [a, center, b]: [usize; 3]) -> f64 {
        let origin = self.atoms[center].position;
        let arm_a = self.atoms[a].position - origin;
        let arm_b = self.atoms[b].position - origin;
        arm_a.angle(&arm_b)
    }

    /// Sum of π bond orders of `center`, corrected for its over-coordination
    /// and lone pairs.
    fn pi_bond_sum(&self, center: usize) -> f64 {
        let state = self.state(center);
        let (pi_sum, sigma_product) = self.bond_orders.bonds(center).iter().fold(
            (0.0, 1.0),
            |(pi_sum, product), bond| {
                (
                    pi_sum + bond.order.pi_total(),
                    product * (-bond.order.total.powi(8)).exp(),
                )
            },
        );
        let lone_pair_adjustment = if state.vlpex >= 0.0 { 0.0 } else { state.n_lp };
        pi_sum
            + (1.0 - sigma_product)
                * (-state.delta_boc - self.globals().p_val8 * lone_pair_adjustment)
    }

    /// Valence angle energy of `[a, center, b]`.
    pub fn valence(&self, triple: [usize; 3]) -> Result<f64, EngineError> {
        let Some(arms) = self.angle_arms(triple)? else {
            return Ok(0.0);
        };
        let center = triple[1];
        let center_type = self.atom_type(center)?;
        let globals = self.globals();
        let angle = arms.angle;

        let f7_a = potentials::valence_bond_factor(arms.bo_a, center_type.p_val3, angle.p_val4);
        let f7_b = potentials::valence_bond_factor(arms.bo_b, center_type.p_val3, angle.p_val4);
        let f8 = potentials::valence_center_factor(
            self.state(center).delta_boc,
            center_type.p_val5,
            globals.p_val6,
            angle.p_val7,
        );
        let sbo2 = potentials::effective_pi_sum(self.pi_bond_sum(center), globals.p_val9);
        let theta_0 = potentials::equilibrium_angle(angle.theta_00, sbo2, globals.p_val10);

        Ok(potentials::valence_angle_energy(
            f7_a,
            f7_b,
            f8,
            self.bend_angle(triple),
            theta_0,
            angle.p_val1,
            angle.p_val2,
        ))
    }

    /// Double-bond penalty energy of `[a, center, b]`.
    pub fn penalty(&self, triple: [usize; 3]) -> Result<f64, EngineError> {
        let Some(arms) = self.angle_arms(triple)? else {
            return Ok(0.0);
        };
        let globals = self.globals();
        let f9 = potentials::penalty_center_factor(
            self.state(triple[1]).delta,
            globals.p_pen3,
            globals.p_pen4,
        );

        Ok(potentials::penalty_energy(
            arms.bo_a,
            arms.bo_b,
            f9,
            arms.angle.p_pen1,
            globals.p_pen2,
        ))
    }

    /// Three-body conjugation (coalition) energy of `[a, center, b]`.
    pub fn coalition(&self, triple: [usize; 3]) -> Result<f64, EngineError> {
        let Some(arms) = self.angle_arms(triple)? else {
            return Ok(0.0);
        };
        let [a, center, b] = triple;
        let globals = self.globals();

        Ok(potentials::coalition_energy(
            arms.bo_a,
            arms.bo_b,
            self.state(a).total,
            self.state(b).total,
            self.state(center).delta_val,
            arms.angle.p_coa1,
            globals.p_coa2,
            globals.p_coa3,
            globals.p_coa4,
        ))
    }

    /// Torsion energy of the dihedral `[a, b, c, d]`. Not implemented yet;
    /// parameters are still resolved so missing entries surface as lookup errors.
    pub fn torsion(&self, quad: [usize; 4]) -> Result<f64, EngineError> {
        self.check_indices(&quad)?;
        let [a, b, c, d] = quad.map(|index| self.atoms[index].type_index);
        self.tables.torsion(a, b, c, d)?;
        Err(EngineError::Unimplemented {
            term: EnergyTermKind::Torsion,
        })
    }

    /// Hydrogen bond energy of `[donor, hydrogen, acceptor]`. Not implemented yet.
    pub fn hydrogen_bond(&self, triple: [usize; 3]) -> Result<f64, EngineError> {
        self.check_indices(&triple)?;
        let [a, b, c] = triple.map(|index| self.atoms[index].type_index);
        self.tables.hydrogen_bond(a, b, c)?;
        Err(EngineError::Unimplemented {
            term: EnergyTermKind::HydrogenBond,
        })
    }

    /// Four-body conjugation energy of `[a, b, c, d]`. Not implemented yet.
    pub fn conjugation(&self, quad: [usize; 4]) -> Result<f64, EngineError> {
        self.check_indices(&quad)?;
        let [a, b, c, d] = quad.map(|index| self.atoms[index].type_index);
        self.tables.torsion(a, b, c, d)?;
        Err(EngineError::Unimplemented {
            term: EnergyTermKind::Conjugation,
        })
    }

    /// C2 over-stabilisation correction of a bonded pair. Not implemented yet.
    pub fn c2_correction(&self, pair: [usize; 2]) -> Result<f64, EngineError> {
        self.check_indices(&pair)?;
        let [a, b] = pair.map(|index| self.atoms[index].type_index);
        self.tables
            .bond_type(a, b)?
            .declared
            .as_ref()
            .ok_or(LookupError::BondDeclaration(a, b))?;
        Err(EngineError::Unimplemented {
            term: EnergyTermKind::C2Correction,
        })
    }
}

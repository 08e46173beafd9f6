use std::fmt;

/// One-body parameters of a single atom type.
///
/// The record mirrors the four data lines of an atom-type entry. Columns that
/// no energy term reads are preserved in [`AtomTypeRecord::reserved`].
#[derive(Debug, Clone, PartialEq)]
pub struct AtomTypeRecord {
    /// Element symbol or type label (e.g., "C", "H", "O").
    pub symbol: String,
    /// Sigma covalent radius in Angstroms.
    pub r_sigma: f64,
    /// Number of bonds the atom wants to form.
    pub valency: f64,
    /// Atomic mass in amu.
    pub mass: f64,
    /// Van der Waals radius in Angstroms.
    pub r_vdw: f64,
    /// Van der Waals well depth in kcal/mol.
    pub epsilon: f64,
    /// Coulomb shielding parameter.
    pub gamma: f64,
    /// Pi covalent radius in Angstroms.
    pub r_pi: f64,
    /// Valency used by the lone pair term.
    pub valency_e: f64,
    /// Van der Waals exponent.
    pub alpha: f64,
    /// Van der Waals shielding parameter.
    pub gamma_w: f64,
    /// Valency used by the bond-order correction.
    pub valency_boc: f64,
    /// Undercoordination energy.
    pub p_ovun5: f64,
    /// Charge equilibration electronegativity (eV).
    pub chi: f64,
    /// Charge equilibration hardness (eV).
    pub eta: f64,
    /// Hydrogen bond role flag.
    pub p_hbond: f64,
    /// Double pi covalent radius in Angstroms.
    pub r_pi_pi: f64,
    /// Lone pair energy.
    pub p_lp2: f64,
    pub b_o_131: f64,
    pub b_o_132: f64,
    pub b_o_133: f64,
    /// Over/undercoordination exponent.
    pub p_ovun2: f64,
    pub p_val3: f64,
    /// Valency used by the angle terms.
    pub valency_val: f64,
    pub p_val5: f64,
    /// Inner wall parameters of the short-range core correction.
    pub r_core2: f64,
    pub e_core2: f64,
    pub a_core2: f64,
    /// Unused columns: line 2 column 5, line 3 columns 3, 7 and 8, line 4 column 3.
    pub reserved: [f64; 5],
}

impl AtomTypeRecord {
    /// Optimal number of lone pairs for this type.
    #[inline]
    pub fn optimal_lone_pairs(&self) -> f64 {
        0.5 * (self.valency_e - self.valency)
    }

    /// Heavy atoms (mass above 21 amu) are exempt from the lone-pair correction
    /// of the overcoordination term.
    #[inline]
    pub fn is_heavy(&self) -> bool {
        self.mass > 21.0
    }
}

/// Explicitly declared two-body bond parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct BondDeclaration {
    /// Sigma, pi and double-pi bond dissociation energies in kcal/mol.
    pub de_sigma: f64,
    pub de_pi: f64,
    pub de_pi_pi: f64,
    pub p_be1: f64,
    pub p_be2: f64,
    pub p_bo1: f64,
    pub p_bo2: f64,
    pub p_bo3: f64,
    pub p_bo4: f64,
    pub p_bo5: f64,
    pub p_bo6: f64,
    /// Switch for the 1-3 bond-order correction (`f4`, `f5`).
    pub v13cor: f64,
    /// Switch for the overcoordination bond-order correction (`f1`).
    pub ovc: f64,
    pub p_ovun1: f64,
    /// Unused columns: line 2 columns 4 and 8.
    pub reserved: [f64; 2],
}

/// Complete two-body record for an unordered pair of atom types.
///
/// `declared` holds the values from the bond section and is `None` when the
/// file declares no bond for the pair. Every other field is derived from the
/// two atom-type records by the combination pass, and then optionally
/// overridden by an off-diagonal entry.
#[derive(Debug, Clone, PartialEq)]
pub struct BondTypeRecord {
    pub declared: Option<BondDeclaration>,
    pub r_sigma: f64,
    pub r_pi: f64,
    pub r_pi_pi: f64,
    /// Van der Waals well depth.
    pub d: f64,
    pub r_vdw: f64,
    pub alpha: f64,
    pub gamma_w: f64,
    /// Coulomb shielding term, stored as `(gamma_i * gamma_j)^-1.5`.
    pub gamma: f64,
    pub p_boc3: f64,
    pub p_boc4: f64,
    pub p_boc5: f64,
    pub r_core: f64,
    pub e_core: f64,
    pub a_core: f64,
}

/// Explicit pairwise overrides from the off-diagonal section.
///
/// A value only replaces the mixed one when it is positive.
#[derive(Debug, Clone, PartialEq)]
pub struct OffDiagonalRecord {
    pub d: f64,
    /// Declared as a radius; the bond record stores twice this value.
    pub r_vdw: f64,
    pub alpha: f64,
    pub r_sigma: f64,
    pub r_pi: f64,
    pub r_pi_pi: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AngleTypeRecord {
    /// Equilibrium angle at zero sum of pi bond orders, in degrees.
    pub theta_00: f64,
    pub p_val1: f64,
    pub p_val2: f64,
    pub p_coa1: f64,
    pub p_val7: f64,
    pub p_pen1: f64,
    pub p_val4: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TorsionTypeRecord {
    pub v1: f64,
    pub v2: f64,
    pub v3: f64,
    pub p_tor1: f64,
    pub p_cot1: f64,
    /// Unused trailing columns.
    pub reserved: [f64; 2],
}

#[derive(Debug, Clone, PartialEq)]
pub struct HydrogenBondTypeRecord {
    pub r0_hb: f64,
    pub p_hb1: f64,
    pub p_hb2: f64,
    pub p_hb3: f64,
}

/// A position in a torsion key: either a concrete atom type or a wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeSlot {
    /// Matches any atom type (written as `0` in the file).
    Any,
    Type(usize),
}

impl TypeSlot {
    #[inline]
    pub fn matches(self, type_index: usize) -> bool {
        match self {
            TypeSlot::Any => true,
            TypeSlot::Type(t) => t == type_index,
        }
    }

    #[inline]
    pub fn is_wildcard(self) -> bool {
        matches!(self, TypeSlot::Any)
    }
}

impl fmt::Display for TypeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSlot::Any => write!(f, "*"),
            TypeSlot::Type(t) => write!(f, "{}", t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_slot_wildcard_matches_every_type() {
        assert!(TypeSlot::Any.matches(0));
        assert!(TypeSlot::Any.matches(17));
        assert!(TypeSlot::Any.is_wildcard());
    }

    #[test]
    fn type_slot_concrete_matches_only_itself() {
        assert!(TypeSlot::Type(2).matches(2));
        assert!(!TypeSlot::Type(2).matches(3));
        assert!(!TypeSlot::Type(2).is_wildcard());
    }

    #[test]
    fn type_slot_wildcard_sorts_before_concrete_types() {
        assert!(TypeSlot::Any < TypeSlot::Type(0));
    }

    #[test]
    fn type_slot_display_uses_star_for_wildcard() {
        assert_eq!(TypeSlot::Any.to_string(), "*");
        assert_eq!(TypeSlot::Type(4).to_string(), "4");
    }
}

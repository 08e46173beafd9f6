//! Combination rules deriving two-body parameters from a pair of atom types.
//!
//! Each field is computed by exactly one rule:
//!
//! - arithmetic mean for the covalent radii,
//! - geometric mean for energy-like and shape parameters,
//! - `2 * sqrt(r_i * r_j)` for the van der Waals radius,
//! - `(gamma_i * gamma_j)^-1.5` for the Coulomb shielding term.

use super::records::{AtomTypeRecord, BondDeclaration, BondTypeRecord, OffDiagonalRecord};

#[inline]
pub fn arithmetic_mean(a: f64, b: f64) -> f64 {
    0.5 * (a + b)
}

#[inline]
pub fn geometric_mean(a: f64, b: f64) -> f64 {
    (a * b).sqrt()
}

#[inline]
pub fn vdw_radius(r_vdw_i: f64, r_vdw_j: f64) -> f64 {
    2.0 * (r_vdw_i * r_vdw_j).sqrt()
}

#[inline]
pub fn shielding_gamma(gamma_i: f64, gamma_j: f64) -> f64 {
    (gamma_i * gamma_j).powf(-1.5)
}

/// Builds the mixed record for a pair, carrying over the declared bond part.
pub fn mix(
    type_i: &AtomTypeRecord,
    type_j: &AtomTypeRecord,
    declared: Option<BondDeclaration>,
) -> BondTypeRecord {
    BondTypeRecord {
        declared,
        r_sigma: arithmetic_mean(type_i.r_sigma, type_j.r_sigma),
        r_pi: arithmetic_mean(type_i.r_pi, type_j.r_pi),
        r_pi_pi: arithmetic_mean(type_i.r_pi_pi, type_j.r_pi_pi),
        d: geometric_mean(type_i.epsilon, type_j.epsilon),
        r_vdw: vdw_radius(type_i.r_vdw, type_j.r_vdw),
        alpha: geometric_mean(type_i.alpha, type_j.alpha),
        gamma_w: geometric_mean(type_i.gamma_w, type_j.gamma_w),
        gamma: shielding_gamma(type_i.gamma, type_j.gamma),
        p_boc3: geometric_mean(type_i.b_o_132, type_j.b_o_132),
        p_boc4: geometric_mean(type_i.b_o_131, type_j.b_o_131),
        p_boc5: geometric_mean(type_i.b_o_133, type_j.b_o_133),
        r_core: geometric_mean(type_i.r_core2, type_j.r_core2),
        e_core: geometric_mean(type_i.e_core2, type_j.e_core2),
        a_core: geometric_mean(type_i.a_core2, type_j.a_core2),
    }
}

/// Applies the positive values of an off-diagonal entry on top of a mixed record.
pub fn apply_off_diagonal(record: &mut BondTypeRecord, off: &OffDiagonalRecord) {
    if off.d > 0.0 {
        record.d = off.d;
    }
    if off.r_vdw > 0.0 {
        record.r_vdw = 2.0 * off.r_vdw;
    }
    if off.alpha > 0.0 {
        record.alpha = off.alpha;
    }
    if off.r_sigma > 0.0 {
        record.r_sigma = off.r_sigma;
    }
    if off.r_pi > 0.0 {
        record.r_pi = off.r_pi;
    }
    if off.r_pi_pi > 0.0 {
        record.r_pi_pi = off.r_pi_pi;
    }
}

//! Closed-form ReaxFF energy expressions.
//!
//! Every function here takes plain scalars so that it can be tested in
//! isolation. Table lookups and bond-order bookkeeping live in the engine.
//! Notation follows Chenoweth, van Duin and Goddard, J. Phys. Chem. A 112
//! (2008) 1040.

pub const COULOMB_CONSTANT: f64 = 332.0637; // In kcal·Å/(mol·e²)

/// Steepness of the lone-pair switching function.
const LONE_PAIR_STEEPNESS: f64 = 75.0;

/// Guards the over-coordination denominator against `Δ + Val = 0`.
const OVER_COORDINATION_EPSILON: f64 = 1e-8;

/// Below this magnitude `p_val1` is treated as zero and no angle energy is produced.
const MIN_ANGLE_FORCE_CONSTANT: f64 = 0.001;

/// One component of the uncorrected bond order, `exp(p_a (r / r0)^p_b)`.
///
/// Returns zero for a non-positive reference radius.
#[inline]
pub fn uncorrected_bond_order(dist: f64, r0: f64, p_a: f64, p_b: f64) -> f64 {
    if r0 <= 0.0 {
        return 0.0;
    }
    (p_a * (dist / r0).powf(p_b)).exp()
}

/// Overcoordination correction `f1` for a pair with uncorrected deviations
/// `Δ'i`, `Δ'j` from the atoms' valencies.
#[inline]
pub fn overcoordination_factor(
    valency_i: f64,
    valency_j: f64,
    delta_i: f64,
    delta_j: f64,
    p_boc1: f64,
    p_boc2: f64,
) -> f64 {
    let f2 = (-p_boc1 * delta_i).exp() + (-p_boc1 * delta_j).exp();
    let f3 = -1.0 / p_boc2 * (0.5 * ((-p_boc2 * delta_i).exp() + (-p_boc2 * delta_j).exp())).ln();
    0.5 * ((valency_i + f2) / (valency_i + f2 + f3) + (valency_j + f2) / (valency_j + f2 + f3))
}

/// 1-3 bond-order correction `f4` (or `f5` for the other atom).
#[inline]
pub fn one_three_correction_factor(
    bond_order: f64,
    delta_boc: f64,
    p_boc3: f64,
    p_boc4: f64,
    p_boc5: f64,
) -> f64 {
    1.0 / (1.0 + (-p_boc3 * (p_boc4 * bond_order * bond_order - delta_boc) + p_boc5).exp())
}

#[inline]
pub fn bond_energy(
    bo_sigma: f64,
    bo_pi: f64,
    bo_pi_pi: f64,
    de_sigma: f64,
    de_pi: f64,
    de_pi_pi: f64,
    p_be1: f64,
    p_be2: f64,
) -> f64 {
    let sigma_power = if bo_sigma > 0.0 {
        bo_sigma.powf(p_be2)
    } else {
        0.0
    };
    -de_sigma * bo_sigma * (p_be1 * (1.0 - sigma_power)).exp() - de_pi * bo_pi - de_pi_pi * bo_pi_pi
}

#[inline]
pub fn lone_pair_energy(delta_lp: f64, p_lp2: f64) -> f64 {
    p_lp2 * delta_lp / (1.0 + (-LONE_PAIR_STEEPNESS * delta_lp).exp())
}

/// Deviation from the valency after removing the lone-pair contribution.
///
/// `sum_ovun2` is `Σ (Δj - Δlp_j)(BOπ + BOππ)` over the atom's bonds.
#[inline]
pub fn lone_pair_corrected_delta(
    delta: f64,
    delta_lp: f64,
    sum_ovun2: f64,
    p_ovun3: f64,
    p_ovun4: f64,
) -> f64 {
    delta - delta_lp / (1.0 + p_ovun3 * (p_ovun4 * sum_ovun2).exp())
}

/// Over-coordination energy; `sum_ovun1` is `Σ p_ovun1 De_σ BO` over the atom's bonds.
#[inline]
pub fn over_coordination_energy(
    sum_ovun1: f64,
    delta_lpcorr: f64,
    valency: f64,
    p_ovun2: f64,
) -> f64 {
    sum_ovun1 * delta_lpcorr / (delta_lpcorr + valency + OVER_COORDINATION_EPSILON)
        / (1.0 + (p_ovun2 * delta_lpcorr).exp())
}

#[inline]
pub fn under_coordination_energy(
    delta_lpcorr: f64,
    sum_ovun2: f64,
    p_ovun2: f64,
    p_ovun5: f64,
    p_ovun6: f64,
    p_ovun7: f64,
    p_ovun8: f64,
) -> f64 {
    -p_ovun5 * (1.0 - (p_ovun6 * delta_lpcorr).exp())
        / (1.0 + (-p_ovun2 * delta_lpcorr).exp())
        / (1.0 + p_ovun7 * (p_ovun8 * sum_ovun2).exp())
}

/// Bond-order dependence `f7` of the valence angle energy for one arm.
#[inline]
pub fn valence_bond_factor(arm_bond_order: f64, p_val3: f64, p_val4: f64) -> f64 {
    1.0 - (-p_val3 * arm_bond_order.powf(p_val4)).exp()
}

/// Valency dependence `f8` of the valence angle energy for the central atom.
#[inline]
pub fn valence_center_factor(delta_boc: f64, p_val5: f64, p_val6: f64, p_val7: f64) -> f64 {
    let exp6 = (p_val6 * delta_boc).exp();
    let exp7 = (-p_val7 * delta_boc).exp();
    p_val5 - (p_val5 - 1.0) * (2.0 + exp6) / (1.0 + exp6 + exp7)
}

/// Maps the sum of π bond orders `SBO` of the central atom onto `[0, 2]`.
#[inline]
pub fn effective_pi_sum(sbo: f64, p_val9: f64) -> f64 {
    if sbo <= 0.0 {
        0.0
    } else if sbo <= 1.0 {
        sbo.powf(p_val9)
    } else if sbo < 2.0 {
        2.0 - (2.0 - sbo).powf(p_val9)
    } else {
        2.0
    }
}

/// Equilibrium angle in radians, shifted from `180° - θ00` by the hybridisation
/// measure `sbo2` (from [`effective_pi_sum`]).
#[inline]
pub fn equilibrium_angle(theta_00_deg: f64, sbo2: f64, p_val10: f64) -> f64 {
    (180.0 - theta_00_deg * (1.0 - (-p_val10 * (2.0 - sbo2)).exp())).to_radians()
}

#[inline]
pub fn valence_angle_energy(
    f7_a: f64,
    f7_b: f64,
    f8: f64,
    theta: f64,
    theta_0: f64,
    p_val1: f64,
    p_val2: f64,
) -> f64 {
    if p_val1.abs() <= MIN_ANGLE_FORCE_CONSTANT {
        return 0.0;
    }
    let well = (-p_val2 * (theta_0 - theta).powi(2)).exp();
    let angular = if p_val1 >= 0.0 {
        p_val1 * (1.0 - well)
    } else {
        -p_val1 * well
    };
    f7_a * f7_b * f8 * angular
}

/// Over/under-coordination dependence `f9` of the angle penalty.
#[inline]
pub fn penalty_center_factor(delta: f64, p_pen3: f64, p_pen4: f64) -> f64 {
    let exp3 = (-p_pen3 * delta).exp();
    let exp4 = (p_pen4 * delta).exp();
    (2.0 + exp3) / (1.0 + exp3 + exp4)
}

#[inline]
pub fn penalty_energy(
    bo_a: f64,
    bo_b: f64,
    f9: f64,
    p_pen1: f64,
    p_pen2: f64,
) -> f64 {
    p_pen1 * f9 * (-p_pen2 * (bo_a - 2.0).powi(2)).exp() * (-p_pen2 * (bo_b - 2.0).powi(2)).exp()
}

/// Three-body conjugation (coalition) energy for arms `a-center-b`.
///
/// `total_a` and `total_b` are the total bond orders of the outer atoms, and
/// `delta_val` is the central atom's deviation from its angle valency.
#[inline]
pub fn coalition_energy(
    bo_a: f64,
    bo_b: f64,
    total_a: f64,
    total_b: f64,
    delta_val: f64,
    p_coa1: f64,
    p_coa2: f64,
    p_coa3: f64,
    p_coa4: f64,
) -> f64 {
    p_coa1 / (1.0 + (p_coa2 * delta_val).exp())
        * (-p_coa3 * (total_a - bo_a).powi(2)).exp()
        * (-p_coa3 * (total_b - bo_b).powi(2)).exp()
        * (-p_coa4 * (bo_a - 1.5).powi(2)).exp()
        * (-p_coa4 * (bo_b - 1.5).powi(2)).exp()
}

/// Shielded Morse-type van der Waals energy, before tapering.
#[inline]
pub fn shielded_vdw(
    dist: f64,
    well_depth: f64,
    alpha: f64,
    r_vdw: f64,
    gamma_w: f64,
    p_vdw1: f64,
) -> f64 {
    let shielded = (dist.powf(p_vdw1) + gamma_w.recip().powf(p_vdw1)).powf(p_vdw1.recip());
    let x = 1.0 - shielded / r_vdw;
    well_depth * ((alpha * x).exp() - 2.0 * (0.5 * alpha * x).exp())
}

/// Shielded Coulomb energy, before tapering.
///
/// `shielding` is the pair's stored `(γi γj)^-1.5`, i.e. the cubed shielding length.
#[inline]
pub fn shielded_coulomb(dist: f64, q1: f64, q2: f64, shielding: f64) -> f64 {
    COULOMB_CONSTANT * q1 * q2 / (dist.powi(3) + shielding).cbrt()
}

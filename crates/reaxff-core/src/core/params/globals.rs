/// Number of general parameters carried by a ReaxFF parameter file.
pub const GLOBAL_PARAM_COUNT: usize = 39;

/// Zero-based file positions of the general parameters that no energy term reads.
///
/// The values are kept in [`GlobalParams::reserved`] in this order so that a
/// file can be inspected without losing information.
pub const RESERVED_GLOBAL_SLOTS: [usize; 8] = [13, 18, 22, 26, 34, 35, 36, 37];

/// Force-field-wide scalar constants from the general section.
///
/// Field names follow the conventional ReaxFF notation (Chenoweth et al., 2008).
/// Values are stored exactly as declared, except `bo_cut`, which the file
/// stores scaled by 100.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalParams {
    /// Overcoordination correction parameters used by the `f1` bond-order factor.
    pub p_boc1: f64,
    pub p_boc2: f64,
    /// Valency angle conjugation (coalition) parameters.
    pub p_coa2: f64,
    pub p_coa3: f64,
    pub p_coa4: f64,
    /// Triple bond stabilisation parameters.
    pub p_trip1: f64,
    pub p_trip2: f64,
    pub p_trip3: f64,
    pub p_trip4: f64,
    /// C2 correction force constant.
    pub kc2: f64,
    /// Over/under-coordination parameters.
    pub p_ovun3: f64,
    pub p_ovun4: f64,
    pub p_ovun6: f64,
    pub p_ovun7: f64,
    pub p_ovun8: f64,
    /// Valence angle parameters.
    pub p_val6: f64,
    pub p_val8: f64,
    pub p_val9: f64,
    pub p_val10: f64,
    /// Lone pair parameter.
    pub p_lp1: f64,
    /// Double bond / angle penalty parameters.
    pub p_pen2: f64,
    pub p_pen3: f64,
    pub p_pen4: f64,
    /// Torsion parameters.
    pub p_tor2: f64,
    pub p_tor3: f64,
    pub p_tor4: f64,
    /// Conjugation parameter.
    pub p_cot2: f64,
    /// Van der Waals shielding exponent.
    pub p_vdw1: f64,
    /// Bond-order cutoff below which bonds are ignored.
    pub bo_cut: f64,
    /// Lower taper radius in Angstroms.
    pub taper_lower: f64,
    /// Upper taper radius (non-bonded cutoff) in Angstroms.
    pub taper_upper: f64,
    /// Unused slots, indexed as [`RESERVED_GLOBAL_SLOTS`].
    pub reserved: [f64; RESERVED_GLOBAL_SLOTS.len()],
}

impl GlobalParams {
    /// Builds the record from the declared values in file order.
    pub fn from_slots(slots: &[f64; GLOBAL_PARAM_COUNT]) -> Self {
        let mut reserved = [0.0; RESERVED_GLOBAL_SLOTS.len()];
        for (value, &slot) in reserved.iter_mut().zip(RESERVED_GLOBAL_SLOTS.iter()) {
            *value = slots[slot];
        }

        Self {
            p_boc1: slots[0],
            p_boc2: slots[1],
            p_coa2: slots[2],
            p_trip4: slots[3],
            p_trip3: slots[4],
            kc2: slots[5],
            p_ovun6: slots[6],
            p_trip2: slots[7],
            p_ovun7: slots[8],
            p_ovun8: slots[9],
            p_trip1: slots[10],
            taper_lower: slots[11],
            taper_upper: slots[12],
            p_val6: slots[14],
            p_lp1: slots[15],
            p_val9: slots[16],
            p_val10: slots[17],
            p_pen2: slots[19],
            p_pen3: slots[20],
            p_pen4: slots[21],
            p_tor2: slots[23],
            p_tor3: slots[24],
            p_tor4: slots[25],
            p_cot2: slots[27],
            p_vdw1: slots[28],
            bo_cut: 0.01 * slots[29],
            p_coa4: slots[30],
            p_ovun4: slots[31],
            p_ovun3: slots[32],
            p_val8: slots[33],
            p_coa3: slots[38],
            reserved,
        }
    }
}

/// Seventh-order taper polynomial giving pairwise energies a smooth cutoff.
///
/// `Tap(r) = 1 - 35x^4 + 84x^5 - 70x^6 + 20x^7` with `x = r / r_cut`, and zero
/// from `r_cut` onward. Both the value and the first derivative vanish at the
/// cutoff. Coefficients are pre-scaled by powers of `r_cut` so an evaluation
/// is a single Horner pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Taper {
    cutoff: f64,
    coefficients: [f64; 8],
}

const UNIT_COEFFICIENTS: [f64; 8] = [1.0, 0.0, 0.0, 0.0, -35.0, 84.0, -70.0, 20.0];

impl Taper {
    pub fn new(cutoff: f64) -> Self {
        let mut coefficients = UNIT_COEFFICIENTS;
        if cutoff > 0.0 {
            let inverse = cutoff.recip();
            let mut scale = 1.0;
            for c in coefficients.iter_mut() {
                *c *= scale;
                scale *= inverse;
            }
        }
        Self {
            cutoff,
            coefficients,
        }
    }

    #[inline]
    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    #[inline]
    pub fn value(&self, r: f64) -> f64 {
        if r >= self.cutoff {
            return 0.0;
        }
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc * r + c)
    }

    #[inline]
    pub fn derivative(&self, r: f64) -> f64 {
        if r >= self.cutoff {
            return 0.0;
        }
        self.coefficients
            .iter()
            .enumerate()
            .skip(1)
            .rev()
            .fold(0.0, |acc, (power, &c)| acc * r + power as f64 * c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn reference(r: f64, cutoff: f64) -> f64 {
        let x = r / cutoff;
        1.0 - 35.0 * x.powi(4) + 84.0 * x.powi(5) - 70.0 * x.powi(6) + 20.0 * x.powi(7)
    }

    #[test]
    fn value_is_one_at_origin() {
        assert!(f64_approx_equal(Taper::new(10.0).value(0.0), 1.0));
    }

    #[test]
    fn value_and_derivative_vanish_at_cutoff_for_any_positive_cutoff() {
        for cutoff in [0.5, 1.0, 4.2, 10.0, 12.5] {
            let taper = Taper::new(cutoff);
            assert_eq!(taper.value(cutoff), 0.0);
            assert_eq!(taper.derivative(cutoff), 0.0);
            let just_inside = cutoff * (1.0 - 1e-7);
            assert!(taper.value(just_inside).abs() < 1e-9);
            assert!(taper.derivative(just_inside).abs() < 1e-9);
        }
    }

    #[test]
    fn value_matches_polynomial_inside_cutoff() {
        let taper = Taper::new(10.0);
        for r in [0.3, 1.0, 2.5, 5.0, 7.75, 9.9] {
            assert!(f64_approx_equal(taper.value(r), reference(r, 10.0)));
        }
    }

    #[test]
    fn derivative_matches_finite_difference() {
        let taper = Taper::new(10.0);
        let h = 1e-6;
        for r in [1.0, 4.0, 6.5, 9.0] {
            let numeric = (reference(r + h, 10.0) - reference(r - h, 10.0)) / (2.0 * h);
            assert!((taper.derivative(r) - numeric).abs() < 1e-6);
        }
    }

    #[test]
    fn value_is_zero_beyond_cutoff() {
        let taper = Taper::new(10.0);
        assert_eq!(taper.value(10.5), 0.0);
        assert_eq!(taper.value(100.0), 0.0);
        assert_eq!(taper.derivative(11.0), 0.0);
    }

    #[test]
    fn value_decreases_monotonically_inside_cutoff() {
        let taper = Taper::new(8.0);
        let values: Vec<f64> = (0..80).map(|i| taper.value(i as f64 * 0.1)).collect();
        assert!(values.windows(2).all(|w| w[1] <= w[0]));
    }
}

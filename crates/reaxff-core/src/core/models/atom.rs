use nalgebra::Point3;

/// An atom of the configuration being evaluated.
///
/// The atom list is owned by the caller and handed to the engine as an
/// immutable snapshot for each evaluation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Cartesian position in Angstroms.
    pub position: Point3<f64>,
    /// Zero-based index into the atom types of the loaded parameter tables.
    pub type_index: usize,
    /// Partial charge in elementary charges, once resolved by charge
    /// equilibration. Required by the Coulomb term.
    pub charge: Option<f64>,
}

impl Atom {
    pub fn new(type_index: usize, position: Point3<f64>) -> Self {
        Self {
            position,
            type_index,
            charge: None,
        }
    }

    pub fn with_charge(mut self, charge: f64) -> Self {
        self.charge = Some(charge);
        self
    }

    #[inline]
    pub fn distance_to(&self, other: &Atom) -> f64 {
        nalgebra::distance(&self.position, &other.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_atom_has_unresolved_charge() {
        let atom = Atom::new(2, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(atom.type_index, 2);
        assert_eq!(atom.position, Point3::new(1.0, 2.0, 3.0));
        assert!(atom.charge.is_none());
    }

    #[test]
    fn with_charge_sets_the_charge() {
        let atom = Atom::new(0, Point3::origin()).with_charge(-0.42);
        assert_eq!(atom.charge, Some(-0.42));
    }

    #[test]
    fn distance_to_is_euclidean() {
        let a = Atom::new(0, Point3::origin());
        let b = Atom::new(0, Point3::new(3.0, 4.0, 0.0));
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
        assert_eq!(a.distance_to(&b), b.distance_to(&a));
    }
}

use crate::core::models::atom::Atom;
use itertools::Itertools;
use kiddo::{KdTree, SquaredEuclidean};
use std::collections::HashMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Two distinct atoms, `i < j`, and their separation in Angstroms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtomPair {
    pub i: usize,
    pub j: usize,
    pub distance: f64,
}

/// Finds every pair of atoms closer than `cutoff`, ordered by `(i, j)`.
pub fn pairs_within(atoms: &[Atom], cutoff: f64) -> Vec<AtomPair> {
    if atoms.len() < 2 || cutoff <= 0.0 {
        return Vec::new();
    }

    let (positions, sites) = group_by_position(atoms);
    let sites = &sites;
    let kdtree: KdTree<f64, 3> = (&positions).into();
    let radius_sq = cutoff * cutoff;

    let neighbors_of = |(site, pos): (usize, &[f64; 3])| {
        kdtree
            .within_unsorted::<SquaredEuclidean>(pos, radius_sq)
            .into_iter()
            .map(|neighbor| neighbor.item as usize)
            .filter(move |&other| other >= site)
            .flat_map(move |other| atom_pairs(&sites[site], &sites[other], site == other))
            .filter_map(|(i, j)| {
                let distance = atoms[i].distance_to(&atoms[j]);
                (distance < cutoff).then_some(AtomPair { i, j, distance })
            })
            .collect::<Vec<_>>()
    };

    #[cfg(not(feature = "parallel"))]
    let mut pairs: Vec<AtomPair> = positions
        .iter()
        .enumerate()
        .flat_map(neighbors_of)
        .collect();

    #[cfg(feature = "parallel")]
    let mut pairs: Vec<AtomPair> = positions
        .par_iter()
        .enumerate()
        .flat_map_iter(neighbors_of)
        .collect();

    pairs.sort_unstable_by_key(|pair| (pair.i, pair.j));
    pairs
}

/// Distinct positions and the atoms sitting on each.
///
/// kiddo cannot split a leaf whose points coincide on every axis, so the tree
/// holds every position once.
fn group_by_position(atoms: &[Atom]) -> (Vec<[f64; 3]>, Vec<Vec<usize>>) {
    let mut positions = Vec::new();
    let mut sites: Vec<Vec<usize>> = Vec::new();
    let mut site_of: HashMap<[u64; 3], usize> = HashMap::with_capacity(atoms.len());

    for (index, atom) in atoms.iter().enumerate() {
        let point = [atom.position.x, atom.position.y, atom.position.z];
        // `+ 0.0` folds -0.0 into 0.0.
        let key = point.map(|coord| (coord + 0.0).to_bits());
        let site = *site_of.entry(key).or_insert_with(|| {
            positions.push(point);
            sites.push(Vec::new());
            sites.len() - 1
        });
        sites[site].push(index);
    }
    (positions, sites)
}

/// Atom pairs `(i, j)`, `i < j`, between two sites, or within one.
fn atom_pairs(a: &[usize], b: &[usize], same_site: bool) -> Vec<(usize, usize)> {
    if same_site {
        a.iter().copied().tuple_combinations().collect()
    } else {
        a.iter()
            .cartesian_product(b)
            .map(|(&i, &j)| (i.min(j), i.max(j)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn lattice(n: usize, spacing: f64) -> Vec<Atom> {
        let mut atoms = Vec::new();
        for x in 0..n {
            for y in 0..n {
                for z in 0..n {
                    let position = Point3::new(
                        x as f64 * spacing + 0.01 * y as f64,
                        y as f64 * spacing + 0.02 * z as f64,
                        z as f64 * spacing + 0.03 * x as f64,
                    );
                    atoms.push(Atom::new(0, position));
                }
            }
        }
        atoms
    }

    fn brute_force(atoms: &[Atom], cutoff: f64) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for i in 0..atoms.len() {
            for j in (i + 1)..atoms.len() {
                if atoms[i].distance_to(&atoms[j]) < cutoff {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }

    #[test]
    fn pairs_within_matches_brute_force_search() {
        let atoms = lattice(4, 1.3);
        let found: Vec<_> = pairs_within(&atoms, 2.0)
            .into_iter()
            .map(|pair| (pair.i, pair.j))
            .collect();
        assert_eq!(found, brute_force(&atoms, 2.0));
        assert!(!found.is_empty());
    }

    #[test]
    fn pairs_within_reports_exact_distances() {
        let atoms = vec![
            Atom::new(0, Point3::origin()),
            Atom::new(0, Point3::new(0.0, 3.0, 4.0)),
        ];
        let pairs = pairs_within(&atoms, 6.0);
        assert_eq!(pairs.len(), 1);
        assert_eq!((pairs[0].i, pairs[0].j), (0, 1));
        assert!((pairs[0].distance - 5.0).abs() < 1e-12);
    }

    #[test]
    fn pairs_within_excludes_pairs_beyond_cutoff() {
        let atoms = vec![
            Atom::new(0, Point3::origin()),
            Atom::new(0, Point3::new(10.0, 0.0, 0.0)),
        ];
        assert!(pairs_within(&atoms, 9.9).is_empty());
    }

    #[test]
    fn pairs_within_handles_degenerate_inputs() {
        assert!(pairs_within(&[], 5.0).is_empty());
        assert!(pairs_within(&[Atom::new(0, Point3::origin())], 5.0).is_empty());
    }

    #[test]
    fn pairs_within_handles_many_coincident_atoms() {
        let mut atoms: Vec<Atom> = (0..40).map(|_| Atom::new(0, Point3::origin())).collect();
        atoms.push(Atom::new(0, Point3::new(1.0, 0.0, 0.0)));
        atoms.push(Atom::new(0, Point3::new(0.0, -0.0, 0.0)));

        let pairs = pairs_within(&atoms, 2.0);
        let found: Vec<_> = pairs.iter().map(|pair| (pair.i, pair.j)).collect();
        assert_eq!(found, brute_force(&atoms, 2.0));
        assert_eq!(pairs.len(), 42 * 41 / 2);
        assert!(pairs.iter().filter(|pair| pair.j < 40).all(|pair| pair.distance == 0.0));
    }
}

use super::error::{LookupError, ParamFileError};
use super::globals::GlobalParams;
use super::parser;
use super::records::{
    AngleTypeRecord, AtomTypeRecord, BondTypeRecord, HydrogenBondTypeRecord, OffDiagonalRecord,
    TorsionTypeRecord, TypeSlot,
};
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

/// A key that identifies the same entry when read in reverse order.
pub trait ReversibleKey: Copy + Ord {
    fn reversed(self) -> Self;

    /// The smaller of the key and its reverse; every stored key is canonical.
    fn canonical(self) -> Self {
        let reversed = self.reversed();
        if reversed < self { reversed } else { self }
    }
}

impl<T: Copy + Ord, const N: usize> ReversibleKey for [T; N] {
    fn reversed(mut self) -> Self {
        self.reverse();
        self
    }
}

/// A sparse table whose keys are equal under reversal.
#[derive(Debug, Clone, PartialEq)]
pub struct SymmetricTable<K: ReversibleKey, V> {
    entries: BTreeMap<K, V>,
}

impl<K: ReversibleKey, V> Default for SymmetricTable<K, V> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<K: ReversibleKey, V> SymmetricTable<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, returning the previous value stored under the same key.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.entries.insert(key.canonical(), value)
    }

    pub fn get(&self, key: K) -> Option<&V> {
        self.entries.get(&key.canonical())
    }

    pub fn contains(&self, key: K) -> bool {
        self.entries.contains_key(&key.canonical())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter()
    }
}

/// Dense two-body table with one shared record per unordered pair of types.
#[derive(Debug, Clone, PartialEq)]
pub struct BondTable {
    type_count: usize,
    records: Vec<BondTypeRecord>,
}

impl BondTable {
    /// Builds the table by calling `build(i, j)` once for each pair with `i <= j`.
    pub(crate) fn build<F>(type_count: usize, mut build: F) -> Self
    where
        F: FnMut(usize, usize) -> BondTypeRecord,
    {
        let mut records = Vec::with_capacity(type_count * (type_count + 1) / 2);
        for j in 0..type_count {
            for i in 0..=j {
                records.push(build(i, j));
            }
        }
        Self {
            type_count,
            records,
        }
    }

    #[inline]
    fn slot(i: usize, j: usize) -> usize {
        let (lo, hi) = if i <= j { (i, j) } else { (j, i) };
        hi * (hi + 1) / 2 + lo
    }

    pub fn type_count(&self) -> usize {
        self.type_count
    }

    pub fn get(&self, i: usize, j: usize) -> Option<&BondTypeRecord> {
        if i >= self.type_count || j >= self.type_count {
            return None;
        }
        self.records.get(Self::slot(i, j))
    }

    pub(crate) fn get_mut(&mut self, i: usize, j: usize) -> Option<&mut BondTypeRecord> {
        if i >= self.type_count || j >= self.type_count {
            return None;
        }
        self.records.get_mut(Self::slot(i, j))
    }

    /// Number of pairs that carry an explicit bond declaration.
    pub fn declared_count(&self) -> usize {
        self.records.iter().filter(|r| r.declared.is_some()).count()
    }
}

/// The immutable result of parsing a parameter file.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterTables {
    globals: GlobalParams,
    atom_types: Vec<AtomTypeRecord>,
    bond_types: BondTable,
    off_diagonals: SymmetricTable<[usize; 2], OffDiagonalRecord>,
    angles: SymmetricTable<[usize; 3], AngleTypeRecord>,
    torsions: SymmetricTable<[TypeSlot; 4], TorsionTypeRecord>,
    hydrogen_bonds: SymmetricTable<[usize; 3], HydrogenBondTypeRecord>,
}

impl ParameterTables {
    pub(crate) fn new(
        globals: GlobalParams,
        atom_types: Vec<AtomTypeRecord>,
        bond_types: BondTable,
        off_diagonals: SymmetricTable<[usize; 2], OffDiagonalRecord>,
        angles: SymmetricTable<[usize; 3], AngleTypeRecord>,
        torsions: SymmetricTable<[TypeSlot; 4], TorsionTypeRecord>,
        hydrogen_bonds: SymmetricTable<[usize; 3], HydrogenBondTypeRecord>,
    ) -> Self {
        Self {
            globals,
            atom_types,
            bond_types,
            off_diagonals,
            angles,
            torsions,
            hydrogen_bonds,
        }
    }

    /// Reads and parses a parameter file from disk.
    pub fn load(path: &Path) -> Result<Self, ParamFileError> {
        let content = std::fs::read_to_string(path).map_err(|e| ParamFileError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        parser::parse(&content)
    }

    pub fn globals(&self) -> &GlobalParams {
        &self.globals
    }

    pub fn type_count(&self) -> usize {
        self.atom_types.len()
    }

    pub fn atom_types(&self) -> &[AtomTypeRecord] {
        &self.atom_types
    }

    pub fn atom_type(&self, index: usize) -> Result<&AtomTypeRecord, LookupError> {
        self.atom_types
            .get(index)
            .ok_or(LookupError::AtomType(index))
    }

    /// Finds the type whose symbol matches, ignoring ASCII case.
    pub fn type_index(&self, symbol: &str) -> Option<usize> {
        let symbol = symbol.trim();
        self.atom_types
            .iter()
            .position(|t| t.symbol.eq_ignore_ascii_case(symbol))
    }

    pub fn bond_types(&self) -> &BondTable {
        &self.bond_types
    }

    pub fn bond_type(&self, i: usize, j: usize) -> Result<&BondTypeRecord, LookupError> {
        self.bond_types
            .get(i, j)
            .ok_or(LookupError::BondType(i, j))
    }

    pub fn off_diagonal(&self, i: usize, j: usize) -> Option<&OffDiagonalRecord> {
        self.off_diagonals.get([i, j])
    }

    pub fn off_diagonals(&self) -> &SymmetricTable<[usize; 2], OffDiagonalRecord> {
        &self.off_diagonals
    }

    pub fn angle(&self, a: usize, b: usize, c: usize) -> Result<&AngleTypeRecord, LookupError> {
        self.angles
            .get([a, b, c])
            .ok_or(LookupError::Angle(a, b, c))
    }

    pub fn angles(&self) -> &SymmetricTable<[usize; 3], AngleTypeRecord> {
        &self.angles
    }

    /// Looks up torsion parameters, falling back to wildcard entries.
    ///
    /// An exact entry always wins; otherwise the matching entry with the fewest
    /// wildcard positions is returned, in either direction.
    pub fn torsion(
        &self,
        a: usize,
        b: usize,
        c: usize,
        d: usize,
    ) -> Result<&TorsionTypeRecord, LookupError> {
        let exact = [
            TypeSlot::Type(a),
            TypeSlot::Type(b),
            TypeSlot::Type(c),
            TypeSlot::Type(d),
        ];
        if let Some(record) = self.torsions.get(exact) {
            return Ok(record);
        }

        let forward = [a, b, c, d];
        let backward = [d, c, b, a];
        let matches = |key: &[TypeSlot; 4], types: &[usize; 4]| {
            key.iter().zip(types.iter()).all(|(slot, &t)| slot.matches(t))
        };

        self.torsions
            .iter()
            .filter(|(key, _)| matches(key, &forward) || matches(key, &backward))
            .min_by_key(|(key, _)| key.iter().filter(|slot| slot.is_wildcard()).count())
            .map(|(_, record)| record)
            .ok_or(LookupError::Torsion(a, b, c, d))
    }

    pub fn torsions(&self) -> &SymmetricTable<[TypeSlot; 4], TorsionTypeRecord> {
        &self.torsions
    }

    pub fn hydrogen_bond(
        &self,
        a: usize,
        b: usize,
        c: usize,
    ) -> Result<&HydrogenBondTypeRecord, LookupError> {
        self.hydrogen_bonds
            .get([a, b, c])
            .ok_or(LookupError::HydrogenBond(a, b, c))
    }

    pub fn hydrogen_bonds(&self) -> &SymmetricTable<[usize; 3], HydrogenBondTypeRecord> {
        &self.hydrogen_bonds
    }
}

impl FromStr for ParameterTables {
    type Err = ParamFileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parser::parse(s)
    }
}

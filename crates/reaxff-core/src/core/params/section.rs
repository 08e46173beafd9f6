use std::fmt;

/// The sections of a parameter file, in the order they must appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    General,
    AtomTypes,
    BondTypes,
    OffDiagonal,
    Angles,
    Torsions,
    HydrogenBonds,
}

impl Section {
    const ORDER: [Section; 7] = [
        Section::General,
        Section::AtomTypes,
        Section::BondTypes,
        Section::OffDiagonal,
        Section::Angles,
        Section::Torsions,
        Section::HydrogenBonds,
    ];

    /// The section that must follow this one, `None` for the last.
    pub fn next(self) -> Option<Section> {
        let position = Self::ORDER.iter().position(|&section| section == self)?;
        Self::ORDER.get(position + 1).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Section::General => "general",
            Section::AtomTypes => "atom types",
            Section::BondTypes => "bond types",
            Section::OffDiagonal => "off-diagonal",
            Section::Angles => "angles",
            Section::Torsions => "torsions",
            Section::HydrogenBonds => "hydrogen bonds",
        }
    }

    /// Column-legend lines that follow the count line.
    pub fn legend_lines(self) -> usize {
        match self {
            Section::AtomTypes => 3,
            Section::BondTypes => 1,
            _ => 0,
        }
    }

    pub fn lines_per_record(self) -> usize {
        match self {
            Section::AtomTypes => 4,
            Section::BondTypes => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_lists_every_section_once_in_file_order() {
        assert_eq!(Section::ORDER.len(), 7);
        assert!(Section::ORDER.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn next_walks_the_file_order() {
        assert_eq!(Section::General.next(), Some(Section::AtomTypes));
        assert_eq!(Section::Angles.next(), Some(Section::Torsions));
        assert_eq!(Section::HydrogenBonds.next(), None);
    }

    #[test]
    fn record_spans_match_file_layout() {
        assert_eq!(Section::AtomTypes.lines_per_record(), 4);
        assert_eq!(Section::BondTypes.lines_per_record(), 2);
        assert_eq!(Section::Torsions.lines_per_record(), 1);
        assert_eq!(Section::AtomTypes.legend_lines(), 3);
        assert_eq!(Section::BondTypes.legend_lines(), 1);
        assert_eq!(Section::Angles.legend_lines(), 0);
    }
}

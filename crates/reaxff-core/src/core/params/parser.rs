use super::combine;
use super::error::ParamFileError;
use super::globals::{GLOBAL_PARAM_COUNT, GlobalParams};
use super::records::{
    AngleTypeRecord, AtomTypeRecord, BondDeclaration, HydrogenBondTypeRecord, OffDiagonalRecord,
    TorsionTypeRecord, TypeSlot,
};
use super::section::Section;
use super::tables::{BondTable, ParameterTables, ReversibleKey, SymmetricTable};
use std::collections::HashMap;
use std::str::SplitWhitespace;
use tracing::{debug, instrument, warn};

#[derive(Debug, Clone, Copy)]
struct SourceLine<'a> {
    number: usize,
    text: &'a str,
}

/// Position of the next unread line. Each section reader consumes a cursor and
/// hands back the one following its last line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct LineCursor(usize);

/// One decoded data record, tagged by the section it came from.
#[derive(Debug, Clone, PartialEq)]
enum Record {
    General(f64),
    AtomType(AtomTypeRecord),
    BondType([usize; 2], BondDeclaration),
    OffDiagonal([usize; 2], OffDiagonalRecord),
    Angle([usize; 3], AngleTypeRecord),
    Torsion([TypeSlot; 4], TorsionTypeRecord),
    HydrogenBond([usize; 3], HydrogenBondTypeRecord),
}

#[derive(Debug)]
struct SectionBlock {
    header_line: usize,
    records: Vec<(usize, Record)>,
}

struct FieldReader<'a> {
    section: Section,
    line: usize,
    tokens: SplitWhitespace<'a>,
    field: usize,
}

impl<'a> FieldReader<'a> {
    fn new(section: Section, line: &SourceLine<'a>) -> Self {
        Self {
            section,
            line: line.number,
            tokens: line.text.split_whitespace(),
            field: 0,
        }
    }

    fn token(&mut self) -> Result<&'a str, ParamFileError> {
        self.field += 1;
        self.tokens.next().ok_or(ParamFileError::MissingField {
            section: self.section,
            line: self.line,
            field: self.field,
        })
    }

    fn number(&mut self) -> Result<f64, ParamFileError> {
        let token = self.token()?;
        token
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| ParamFileError::InvalidNumber {
                section: self.section,
                line: self.line,
                token: token.to_string(),
            })
    }

    fn numbers<const N: usize>(&mut self) -> Result<[f64; N], ParamFileError> {
        let mut values = [0.0; N];
        for value in values.iter_mut() {
            *value = self.number()?;
        }
        Ok(values)
    }

    fn raw_index(&mut self) -> Result<i64, ParamFileError> {
        let token = self.token()?;
        token.parse::<i64>().map_err(|_| ParamFileError::InvalidNumber {
            section: self.section,
            line: self.line,
            token: token.to_string(),
        })
    }

    /// Reads a 1-based type reference and converts it to a 0-based index.
    fn type_index(&mut self, type_count: usize) -> Result<usize, ParamFileError> {
        let index = self.raw_index()?;
        if index < 1 || index as u64 > type_count as u64 {
            return Err(ParamFileError::InvalidTypeIndex {
                section: self.section,
                line: self.line,
                index,
                count: type_count,
            });
        }
        Ok((index - 1) as usize)
    }

    /// Like [`FieldReader::type_index`], but `0` reads as a wildcard.
    fn type_slot(&mut self, type_count: usize) -> Result<TypeSlot, ParamFileError> {
        let index = self.raw_index()?;
        if index == 0 {
            return Ok(TypeSlot::Any);
        }
        if index < 0 || index as u64 > type_count as u64 {
            return Err(ParamFileError::InvalidTypeIndex {
                section: self.section,
                line: self.line,
                index,
                count: type_count,
            });
        }
        Ok(TypeSlot::Type((index - 1) as usize))
    }
}

/// Parses the text of a parameter file into complete parameter tables.
///
/// The first line is a free-form title and is ignored; blank lines are skipped
/// everywhere. Any malformed section aborts the whole load.
#[instrument(skip_all, name = "parse_parameter_file")]
pub fn parse(text: &str) -> Result<ParameterTables, ParamFileError> {
    let lines: Vec<SourceLine<'_>> = text
        .lines()
        .enumerate()
        .skip(1)
        .map(|(i, text)| SourceLine { number: i + 1, text })
        .filter(|line| !line.text.trim().is_empty())
        .collect();

    let cursor = LineCursor::default();
    let (general, cursor) = read_section(&lines, cursor, Section::General, 0)?;
    let globals = collect_globals(&general)?;

    let (atoms, cursor) = read_section(&lines, cursor, Section::AtomTypes, 0)?;
    let atom_types: Vec<AtomTypeRecord> = atoms
        .records
        .into_iter()
        .filter_map(|(_, record)| match record {
            Record::AtomType(atom_type) => Some(atom_type),
            _ => None,
        })
        .collect();
    let type_count = atom_types.len();

    let (bonds, cursor) = read_section(&lines, cursor, Section::BondTypes, type_count)?;
    let (off_diagonals, cursor) = read_section(&lines, cursor, Section::OffDiagonal, type_count)?;
    let (angles, cursor) = read_section(&lines, cursor, Section::Angles, type_count)?;
    let (torsions, cursor) = read_section(&lines, cursor, Section::Torsions, type_count)?;
    let (hydrogen_bonds, _) = read_section(&lines, cursor, Section::HydrogenBonds, type_count)?;

    let mut declared = HashMap::new();
    let mut off_diagonal_table = SymmetricTable::new();
    let mut angle_table = SymmetricTable::new();
    let mut torsion_table = SymmetricTable::new();
    let mut hydrogen_bond_table = SymmetricTable::new();

    for (line, record) in bonds
        .records
        .into_iter()
        .chain(off_diagonals.records)
        .chain(angles.records)
        .chain(torsions.records)
        .chain(hydrogen_bonds.records)
    {
        let replaced = match record {
            Record::BondType(key, bond) => declared.insert(key.canonical(), bond).is_some(),
            Record::OffDiagonal(key, off) => off_diagonal_table.insert(key, off).is_some(),
            Record::Angle(key, angle) => angle_table.insert(key, angle).is_some(),
            Record::Torsion(key, torsion) => torsion_table.insert(key, torsion).is_some(),
            Record::HydrogenBond(key, hbond) => hydrogen_bond_table.insert(key, hbond).is_some(),
            Record::General(_) | Record::AtomType(_) => false,
        };
        if replaced {
            warn!(line, "Duplicate parameter entry replaces an earlier declaration.");
        }
    }

    let mut bond_types = BondTable::build(type_count, |i, j| {
        combine::mix(&atom_types[i], &atom_types[j], declared.remove(&[i, j]))
    });
    for (&[i, j], off) in off_diagonal_table.iter() {
        if let Some(record) = bond_types.get_mut(i, j) {
            combine::apply_off_diagonal(record, off);
        }
    }

    if globals.taper_lower != 0.0 {
        warn!(
            taper_lower = globals.taper_lower,
            "Non-zero lower taper radius is not supported and will be ignored."
        );
    }

    debug!(
        atom_types = type_count,
        declared_bonds = bond_types.declared_count(),
        off_diagonals = off_diagonal_table.len(),
        angles = angle_table.len(),
        torsions = torsion_table.len(),
        hydrogen_bonds = hydrogen_bond_table.len(),
        "Parameter file parsed."
    );

    Ok(ParameterTables::new(
        globals,
        atom_types,
        bond_types,
        off_diagonal_table,
        angle_table,
        torsion_table,
        hydrogen_bond_table,
    ))
}

fn collect_globals(block: &SectionBlock) -> Result<GlobalParams, ParamFileError> {
    if block.records.len() < GLOBAL_PARAM_COUNT {
        return Err(ParamFileError::TooFewGlobals {
            line: block.header_line,
            declared: block.records.len(),
            required: GLOBAL_PARAM_COUNT,
        });
    }
    if block.records.len() > GLOBAL_PARAM_COUNT {
        warn!(
            declared = block.records.len(),
            "Extra general parameters beyond the standard set are ignored."
        );
    }

    let mut slots = [0.0; GLOBAL_PARAM_COUNT];
    for (slot, (_, record)) in slots.iter_mut().zip(block.records.iter()) {
        if let Record::General(value) = record {
            *slot = *value;
        }
    }
    Ok(GlobalParams::from_slots(&slots))
}

fn read_section(
    lines: &[SourceLine<'_>],
    cursor: LineCursor,
    section: Section,
    type_count: usize,
) -> Result<(SectionBlock, LineCursor), ParamFileError> {
    let header = lines.get(cursor.0).ok_or(ParamFileError::MissingHeader {
        section,
        line: lines.last().map_or(2, |line| line.number + 1),
    })?;

    let count_token = header.text.split_whitespace().next().unwrap_or("");
    let declared: usize = count_token
        .parse()
        .map_err(|_| ParamFileError::InvalidCount {
            section,
            line: header.number,
            value: count_token.to_string(),
        })?;

    let body_start = cursor.0 + 1;
    let expected = declared
        .checked_mul(section.lines_per_record())
        .and_then(|span| span.checked_add(section.legend_lines()))
        .ok_or_else(|| ParamFileError::InvalidCount {
            section,
            line: header.number,
            value: count_token.to_string(),
        })?;
    let available = lines.len() - body_start;
    if expected > available {
        return Err(ParamFileError::Truncated {
            section,
            line: header.number,
            declared,
            expected,
            available,
        });
    }

    let data_start = body_start + section.legend_lines();
    let data = &lines[data_start..body_start + expected];
    let records = data
        .chunks(section.lines_per_record())
        .map(|chunk| decode(section, chunk, type_count).map(|record| (chunk[0].number, record)))
        .collect::<Result<Vec<_>, _>>()?;

    let next = LineCursor(body_start + expected);
    check_section_end(lines, next, section, header.number, declared)?;
    debug!(section = section.name(), declared, "Section read.");

    Ok((
        SectionBlock {
            header_line: header.number,
            records,
        },
        next,
    ))
}

/// Rejects a section whose declared count stops short of its records: the
/// line after it must open the next section, and nothing may follow the last.
fn check_section_end(
    lines: &[SourceLine<'_>],
    next: LineCursor,
    section: Section,
    header_line: usize,
    declared: usize,
) -> Result<(), ParamFileError> {
    let Some(line) = lines.get(next.0) else {
        return Ok(());
    };
    if section.next().is_none() {
        return Err(ParamFileError::TrailingContent {
            section,
            line: line.number,
            declared,
            extra: lines.len() - next.0,
        });
    }
    if continues_section(line.text) {
        return Err(ParamFileError::CountMismatch {
            section,
            line: header_line,
            declared,
            continued_at: line.number,
        });
    }
    Ok(())
}

/// Whether a line reads as a data record rather than a count line.
///
/// A count line holds one integer, optionally followed by a `!` comment or
/// free text. Data lines carry several numbers, or a leading real value.
fn continues_section(text: &str) -> bool {
    let data = text.split('!').next().unwrap_or_default();
    let mut tokens = data.split_whitespace().peekable();
    let Some(first) = tokens.peek().copied() else {
        return false;
    };
    let numeric = tokens.filter(|token| token.parse::<f64>().is_ok()).count();
    numeric > 1 || (first.parse::<f64>().is_ok() && first.parse::<usize>().is_err())
}

fn decode(
    section: Section,
    chunk: &[SourceLine<'_>],
    type_count: usize,
) -> Result<Record, ParamFileError> {
    let mut first = FieldReader::new(section, &chunk[0]);

    let record = match section {
        Section::General => Record::General(first.number()?),
        Section::AtomTypes => {
            let symbol = first.token()?.to_string();
            let [r_sigma, valency, mass, r_vdw, epsilon, gamma, r_pi, valency_e] =
                first.numbers()?;
            let [alpha, gamma_w, valency_boc, p_ovun5, unused_2_5, chi, eta, p_hbond] =
                FieldReader::new(section, &chunk[1]).numbers()?;
            let [r_pi_pi, p_lp2, unused_3_3, b_o_131, b_o_132, b_o_133, unused_3_7, unused_3_8] =
                FieldReader::new(section, &chunk[2]).numbers()?;
            let [p_ovun2, p_val3, unused_4_3, valency_val, p_val5, r_core2, e_core2, a_core2] =
                FieldReader::new(section, &chunk[3]).numbers()?;

            Record::AtomType(AtomTypeRecord {
                symbol,
                r_sigma,
                valency,
                mass,
                r_vdw,
                epsilon,
                gamma,
                r_pi,
                valency_e,
                alpha,
                gamma_w,
                valency_boc,
                p_ovun5,
                chi,
                eta,
                p_hbond,
                r_pi_pi,
                p_lp2,
                b_o_131,
                b_o_132,
                b_o_133,
                p_ovun2,
                p_val3,
                valency_val,
                p_val5,
                r_core2,
                e_core2,
                a_core2,
                reserved: [unused_2_5, unused_3_3, unused_3_7, unused_3_8, unused_4_3],
            })
        }
        Section::BondTypes => {
            let key = [first.type_index(type_count)?, first.type_index(type_count)?];
            let [de_sigma, de_pi, de_pi_pi, p_be1, p_bo5, v13cor, p_bo6, p_ovun1] =
                first.numbers()?;
            let [p_be2, p_bo3, p_bo4, unused_2_4, p_bo1, p_bo2, ovc, unused_2_8] =
                FieldReader::new(section, &chunk[1]).numbers()?;

            Record::BondType(
                key,
                BondDeclaration {
                    de_sigma,
                    de_pi,
                    de_pi_pi,
                    p_be1,
                    p_be2,
                    p_bo1,
                    p_bo2,
                    p_bo3,
                    p_bo4,
                    p_bo5,
                    p_bo6,
                    v13cor,
                    ovc,
                    p_ovun1,
                    reserved: [unused_2_4, unused_2_8],
                },
            )
        }
        Section::OffDiagonal => {
            let key = [first.type_index(type_count)?, first.type_index(type_count)?];
            let [d, r_vdw, alpha, r_sigma, r_pi, r_pi_pi] = first.numbers()?;
            Record::OffDiagonal(
                key,
                OffDiagonalRecord {
                    d,
                    r_vdw,
                    alpha,
                    r_sigma,
                    r_pi,
                    r_pi_pi,
                },
            )
        }
        Section::Angles => {
            let key = [
                first.type_index(type_count)?,
                first.type_index(type_count)?,
                first.type_index(type_count)?,
            ];
            let [theta_00, p_val1, p_val2, p_coa1, p_val7, p_pen1, p_val4] = first.numbers()?;
            Record::Angle(
                key,
                AngleTypeRecord {
                    theta_00,
                    p_val1,
                    p_val2,
                    p_coa1,
                    p_val7,
                    p_pen1,
                    p_val4,
                },
            )
        }
        Section::Torsions => {
            let key = [
                first.type_slot(type_count)?,
                first.type_slot(type_count)?,
                first.type_slot(type_count)?,
                first.type_slot(type_count)?,
            ];
            let [v1, v2, v3, p_tor1, p_cot1, unused_10, unused_11] = first.numbers()?;
            Record::Torsion(
                key,
                TorsionTypeRecord {
                    v1,
                    v2,
                    v3,
                    p_tor1,
                    p_cot1,
                    reserved: [unused_10, unused_11],
                },
            )
        }
        Section::HydrogenBonds => {
            let key = [
                first.type_index(type_count)?,
                first.type_index(type_count)?,
                first.type_index(type_count)?,
            ];
            let [r0_hb, p_hb1, p_hb2, p_hb3] = first.numbers()?;
            Record::HydrogenBond(
                key,
                HydrogenBondTypeRecord {
                    r0_hb,
                    p_hb1,
                    p_hb2,
                    p_hb3,
                },
            )
        }
    };

    Ok(record)
}

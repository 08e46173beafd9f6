use nalgebra::Point3;
use reaxff::core::models::atom::Atom;
use reaxff::core::params::tables::ParameterTables;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum XyzError {
    #[error("Invalid atom count '{value}' on line {line}")]
    InvalidAtomCount { line: usize, value: String },

    #[error("Frame starting on line {line} declares {declared} atom(s) but only {available} line(s) remain")]
    Truncated {
        line: usize,
        declared: usize,
        available: usize,
    },

    #[error("Missing {field} on line {line}")]
    MissingField { line: usize, field: &'static str },

    #[error("Invalid number '{token}' on line {line}")]
    InvalidNumber { line: usize, token: String },

    #[error("Element '{symbol}' on line {line} matches no atom type in the parameter file")]
    UnknownElement { line: usize, symbol: String },

    #[error("The file contains no frames")]
    Empty,
}

/// One configuration of an XYZ file.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub comment: String,
    pub atoms: Vec<Atom>,
}

pub fn read_frames(path: &Path, tables: &ParameterTables) -> anyhow::Result<Vec<Frame>> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_frames(&content, tables)?)
}

/// Parses every frame of an XYZ file.
///
/// Each atom line reads `element x y z [charge]`; the element is matched to an
/// atom-type symbol ignoring case.
pub fn parse_frames(text: &str, tables: &ParameterTables) -> Result<Vec<Frame>, XyzError> {
    let lines: Vec<&str> = text.lines().collect();
    let mut frames = Vec::new();
    let mut cursor = 0;

    while cursor < lines.len() {
        if lines[cursor].trim().is_empty() {
            cursor += 1;
            continue;
        }
        let header_line = cursor + 1;
        let count_token = lines[cursor].trim();
        let count: usize = count_token.parse().map_err(|_| XyzError::InvalidAtomCount {
            line: header_line,
            value: count_token.to_string(),
        })?;

        let available = lines.len().saturating_sub(cursor + 2);
        if cursor + 1 >= lines.len() || available < count {
            return Err(XyzError::Truncated {
                line: header_line,
                declared: count,
                available,
            });
        }

        let comment = lines[cursor + 1].trim().to_string();
        let atoms = lines[cursor + 2..cursor + 2 + count]
            .iter()
            .enumerate()
            .map(|(k, line)| parse_atom(line, cursor + 3 + k, tables))
            .collect::<Result<Vec<_>, _>>()?;

        frames.push(Frame { comment, atoms });
        cursor += 2 + count;
    }

    if frames.is_empty() {
        return Err(XyzError::Empty);
    }
    Ok(frames)
}

fn parse_atom(text: &str, line: usize, tables: &ParameterTables) -> Result<Atom, XyzError> {
    let mut tokens = text.split_whitespace();
    let symbol = tokens.next().ok_or(XyzError::MissingField {
        line,
        field: "element",
    })?;
    let type_index = tables.type_index(symbol).ok_or_else(|| XyzError::UnknownElement {
        line,
        symbol: symbol.to_string(),
    })?;

    let mut coordinate = |field: &'static str| -> Result<f64, XyzError> {
        let token = tokens.next().ok_or(XyzError::MissingField { line, field })?;
        parse_number(token, line)
    };
    let position = Point3::new(coordinate("x")?, coordinate("y")?, coordinate("z")?);

    let atom = Atom::new(type_index, position);
    match tokens.next() {
        Some(token) => Ok(atom.with_charge(parse_number(token, line)?)),
        None => Ok(atom),
    }
}

fn parse_number(token: &str, line: usize) -> Result<f64, XyzError> {
    token
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| XyzError::InvalidNumber {
            line,
            token: token.to_string(),
        })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const TWO_ATOM_TYPES: &str = "\
Test force field with oxygen and hydrogen
 39       ! Number of general parameters
   50.0000 !p(boc1)
    9.5469 !p(boc2)
   26.5405 !p(coa2)
    1.7224 !p(trip4)
    6.8702 !p(trip3)
   60.4850 !kc2
    1.0588 !p(ovun6)
    4.6000 !p(trip2)
   12.1176 !p(ovun7)
   13.3056 !p(ovun8)
  -70.5044 !p(trip1)
    0.0000 !Lower Taper-radius
   10.0000 !Upper Taper-radius
    2.8793 !not used
   33.8667 !p(val7)
    6.0891 !p(lp1)
    1.0563 !p(val9)
    2.0384 !p(val10)
    6.1431 !not used
    6.9290 !p(pen2)
    0.3989 !p(pen3)
    3.9954 !p(pen4)
   -2.4837 !not used
    5.7796 !p(tor2)
   10.0000 !p(tor3)
    1.9487 !p(tor4)
   -1.2327 !not used
    2.1645 !p(cot2)
    1.5591 !p(vdW1)
    0.1000 !Cutoff for bond order*100 (cutoff)
    2.1365 !p(coa4)
    0.6991 !p(ovun4)
   50.0000 !p(ovun3)
    1.8512 !p(val8)
    0.5000 !not used
   20.0000 !not used
    5.0000 !not used
    0.0000 !not used
    2.6962 !p(coa3)
  2    ! Nr of atoms; cov.r; valency;a.m;Rvdw;Evdw;gammaEEM;cov.r2;#
            alfa;gammavdW;valency;Eunder;Eover;chiEEM;etaEEM;n.u.
            cov r3;Elp;Heat inc.;n.u.;n.u.;n.u.;n.u.
            ov/un;val1;n.u.;val3,vval4
 O    1.2450   2.0000  15.9990   2.3890   0.1000   0.8462   1.0548   6.0000
     9.7300  13.8449   4.0000  37.5000 116.0768   8.5000   8.3122   2.0000
     0.9049   0.4056  59.0626   3.5027   0.7640   0.0021   0.9745   0.0000
    -3.5500   2.9000   1.0493   4.0000   2.9225   0.0000   0.0000   0.0000
 H    0.8930   1.0000   1.0080   1.3550   0.0930   0.8203  -0.1000   1.0000
     8.2230  33.2894   1.0000   0.0000 121.1250   3.7248   9.6093   1.0000
    -0.1000   0.0000  61.6606   3.0408   2.4197   0.0003   1.0698   0.0000
   -19.4571   4.2733   1.0338   1.0000   2.8793   0.0000   0.0000   0.0000
  2      ! Nr of bonds; Edis1;LPpen;n.u.;pbe1;pbo5;13corr;pbo6
                         pbe2;pbo3;pbo4;n.u.;pbo1;pbo2;ovcorr
  1  1 142.2858 145.0000  50.8293   0.2506  -0.1000   1.0000  29.7503   0.6051
         0.3451  -0.1055   9.0000   1.0000  -0.1225   5.5000   1.0000   0.0000
  1  2 160.0000   0.0000   0.0000  -0.5725   0.0000   1.0000   6.0000   0.5626
         1.1150   0.0000   0.0000   0.0000  -0.0920   4.2790   0.0000   0.0000
  0    ! Nr of off-diagonal terms; Ediss;Ro;gamma;rsigma;rpi;rpi2
  0    ! Nr of angles;at1;at2;at3;Thetao,o;ka;kb;pv1;pv2
  0    ! Nr of torsions;at1;at2;at3;at4;;V1;V2;V3;V2(BO);vconj;n.u;n
  0    ! Nr of hydrogen bonds;at1;at2;at3;Rhb;Dehb;vhb1
";

    pub(crate) fn tables() -> ParameterTables {
        TWO_ATOM_TYPES.parse().unwrap()
    }

    #[test]
    fn parses_multiple_frames_with_optional_charges() {
        let tables = tables();
        let text = "\
3
water, charged
O   0.000  0.000  0.000  -0.82
H   0.957  0.000  0.000   0.41
H  -0.240  0.927  0.000   0.41

2
hydroxyl radical
o   0.0  0.0  0.0
h   0.97 0.0  0.0
";
        let frames = parse_frames(text, &tables).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].comment, "water, charged");
        assert_eq!(frames[0].atoms.len(), 3);
        assert_eq!(frames[0].atoms[0].charge, Some(-0.82));
        assert_eq!(frames[0].atoms[1].type_index, 1);
        assert_eq!(frames[0].atoms[1].position, Point3::new(0.957, 0.0, 0.0));

        assert_eq!(frames[1].atoms[0].type_index, 0);
        assert_eq!(frames[1].atoms[1].type_index, 1);
        assert_eq!(frames[1].atoms[1].charge, None);
    }

    #[test]
    fn truncated_frame_is_reported() {
        let tables = tables();
        let text = "3\ncomment\nO 0 0 0\nH 1 0 0\n";
        assert_eq!(
            parse_frames(text, &tables),
            Err(XyzError::Truncated {
                line: 1,
                declared: 3,
                available: 2
            })
        );
    }

    #[test]
    fn unknown_element_is_reported_with_line() {
        let tables = tables();
        let text = "2\n\nO 0 0 0\nN 1 0 0\n";
        assert_eq!(
            parse_frames(text, &tables),
            Err(XyzError::UnknownElement {
                line: 4,
                symbol: "N".to_string()
            })
        );
    }

    #[test]
    fn malformed_fields_are_reported() {
        let tables = tables();
        assert_eq!(
            parse_frames("1\n\nO 0 0\n", &tables),
            Err(XyzError::MissingField { line: 3, field: "z" })
        );
        assert_eq!(
            parse_frames("1\n\nO 0 0 zero\n", &tables),
            Err(XyzError::InvalidNumber {
                line: 3,
                token: "zero".to_string()
            })
        );
        assert!(matches!(
            parse_frames("two\n\nO 0 0 0\n", &tables),
            Err(XyzError::InvalidAtomCount { line: 1, .. })
        ));
    }

    #[test]
    fn empty_input_has_no_frames() {
        assert_eq!(parse_frames("\n\n", &tables()), Err(XyzError::Empty));
    }
}

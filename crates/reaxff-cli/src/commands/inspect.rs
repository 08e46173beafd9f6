use crate::cli::InspectArgs;
use crate::error::Result;
use reaxff::core::params::tables::ParameterTables;
use std::fmt::Write;
use tracing::info;

pub fn run(args: InspectArgs) -> Result<()> {
    info!("Loading parameter file from {:?}", &args.ffield);
    let tables = ParameterTables::load(&args.ffield)?;
    print!("{}", summarize(&tables));
    Ok(())
}

fn summarize(tables: &ParameterTables) -> String {
    let globals = tables.globals();
    let symbols: Vec<&str> = tables
        .atom_types()
        .iter()
        .map(|atom_type| atom_type.symbol.as_str())
        .collect();

    let mut out = String::new();
    let _ = writeln!(out, "Atom types      {:>6}  ({})", tables.type_count(), symbols.join(", "));
    let _ = writeln!(
        out,
        "Bond types      {:>6}  ({} declared)",
        tables.type_count() * (tables.type_count() + 1) / 2,
        tables.bond_types().declared_count()
    );
    let _ = writeln!(out, "Off-diagonals   {:>6}", tables.off_diagonals().len());
    let _ = writeln!(out, "Angles          {:>6}", tables.angles().len());
    let _ = writeln!(out, "Torsions        {:>6}", tables.torsions().len());
    let _ = writeln!(out, "Hydrogen bonds  {:>6}", tables.hydrogen_bonds().len());
    let _ = writeln!(out, "Taper cutoff    {:>10.4} A", globals.taper_upper);
    let _ = writeln!(out, "Bond-order cut  {:>10.4}", globals.bo_cut);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::xyz::tests::{TWO_ATOM_TYPES, tables};
    use std::path::PathBuf;

    #[test]
    fn summary_lists_symbols_and_section_counts() {
        let summary = summarize(&tables());
        assert!(summary.contains("(O, H)"));
        assert!(summary.contains("(2 declared)"));
        assert!(summary.contains("Angles               0"));
        assert!(summary.contains("10.0000 A"));
    }

    #[test]
    fn run_loads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ffield");
        std::fs::write(&path, TWO_ATOM_TYPES).unwrap();
        assert!(run(InspectArgs { ffield: path }).is_ok());
    }

    #[test]
    fn run_reports_missing_file() {
        let result = run(InspectArgs {
            ffield: PathBuf::from("/nonexistent/ffield"),
        });
        assert!(result.is_err());
    }
}

use crate::cli::EnergyArgs;
use crate::config::PartialEnergyConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use crate::utils::report::{EnergyReport, FrameReport};
use crate::utils::xyz;
use reaxff::core::forcefield::term::EnergyBreakdown;
use reaxff::core::params::tables::ParameterTables;
use reaxff::engine::progress::ProgressReporter;
use reaxff::workflows;
use tracing::{info, warn};

pub fn run(args: EnergyArgs) -> Result<()> {
    let partial_config = match &args.config {
        Some(path) => PartialEnergyConfig::from_file(path)?,
        None => PartialEnergyConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args)?;

    info!("Loading parameter file from {:?}", &config.ffield_path);
    let tables = ParameterTables::load(&config.ffield_path)?;

    info!("Loading input frames from {:?}", &args.input);
    let frames = xyz::read_frames(&args.input, &tables).map_err(|e| CliError::FileParsing {
        path: args.input.clone(),
        source: e,
    })?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Evaluating {} frame(s)...", frames.len());
    let mut reports = Vec::with_capacity(frames.len());
    for (index, frame) in frames.iter().enumerate() {
        info!(
            "Evaluating frame {} ({} atoms).",
            index + 1,
            frame.atoms.len()
        );
        let breakdown =
            workflows::evaluate::run(&frame.atoms, &tables, &config.evaluation, &reporter)?;
        if breakdown.skipped_tuples > 0 {
            warn!(
                "Frame {}: {} angle triple(s) skipped for lack of parameters.",
                index + 1,
                breakdown.skipped_tuples
            );
        }
        print!("{}", format_breakdown(index, &frame.comment, &breakdown));
        reports.push(FrameReport::new(
            index,
            &frame.comment,
            frame.atoms.len(),
            &breakdown,
        ));
    }

    if let Some(output) = &args.output {
        let report = EnergyReport {
            ffield_path: config.ffield_path.clone(),
            input_path: args.input.clone(),
            frames: reports,
        };
        report
            .write_to(output)
            .map_err(|e| CliError::FileParsing {
                path: output.clone(),
                source: e,
            })?;
        println!("✓ Energy report written to: {}", output.display());
    }

    Ok(())
}

fn format_breakdown(index: usize, comment: &str, breakdown: &EnergyBreakdown) -> String {
    let mut out = if comment.is_empty() {
        format!("Frame {}\n", index + 1)
    } else {
        format!("Frame {}: {}\n", index + 1, comment)
    };
    for (kind, energy) in &breakdown.terms {
        out.push_str(&format!("  {:<20} {:>16.6}\n", kind.name(), energy));
    }
    out.push_str(&format!("  {:<20} {:>16.6} kcal/mol\n", "total", breakdown.total()));
    if breakdown.skipped_tuples > 0 {
        out.push_str(&format!(
            "  ({} angle triple(s) skipped)\n",
            breakdown.skipped_tuples
        ));
    }
    out
}

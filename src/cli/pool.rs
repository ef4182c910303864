use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use masspool::collision::detect;
use masspool::compound::{ColumnSpec, CompoundTable, Delimiter};
use masspool::plate::PlateFormat;
use masspool::pooling::{assign, Capacity};
use masspool::report::{ReportEmitter, RunSummary};

use super::config::Config;

/// Run the full pooling pipeline: read, assign, scan, report.
#[allow(clippy::too_many_arguments)]
pub fn run(
    input: PathBuf,
    plate_format: Option<PlateFormat>,
    compounds_per_well: Option<usize>,
    total_wells: Option<usize>,
    threshold: Option<f64>,
    output_prefix: Option<String>,
    delimiter: Option<Delimiter>,
    sample_column: Option<String>,
    mass_column: Option<String>,
    config: Option<PathBuf>,
) -> Result<()> {
    // Validate input file exists
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }

    let config = match config {
        Some(path) => Config::from_file(&path)?,
        None => Config::default(),
    };
    let file_settings = config.pooling;

    // CLI flags win over config file values; fixed defaults apply last.
    let plate_format = match (plate_format, file_settings.plate_format) {
        (Some(format), _) => format,
        (None, Some(wells)) => PlateFormat::from_wells(wells)?,
        (None, None) => PlateFormat::W384,
    };
    let delimiter = match (delimiter, file_settings.delimiter) {
        (Some(delimiter), _) => delimiter,
        (None, Some(name)) => Delimiter::from_name(&name)?,
        (None, None) => Delimiter::Tab,
    };
    let threshold = threshold.or(file_settings.threshold).unwrap_or(0.1);
    let output_prefix = output_prefix
        .or(file_settings.output_prefix)
        .unwrap_or_else(|| "output".to_string());
    let columns = ColumnSpec {
        sample: sample_column
            .or(file_settings.sample_column)
            .unwrap_or_else(|| "sample".to_string()),
        mass: mass_column
            .or(file_settings.mass_column)
            .unwrap_or_else(|| "ExactMass".to_string()),
    };

    let compounds_per_well = compounds_per_well.or(file_settings.compounds_per_well);
    let total_wells = total_wells.or(file_settings.total_wells);
    let capacity = match (compounds_per_well, total_wells) {
        (Some(quota), None) => Capacity::PerWell(quota),
        (None, Some(wells)) => Capacity::TotalWells(wells),
        (Some(_), Some(_)) => {
            anyhow::bail!("--compounds-per-well and --total-wells are mutually exclusive")
        }
        (None, None) => {
            anyhow::bail!("one of --compounds-per-well or --total-wells is required")
        }
    };

    if !threshold.is_finite() || threshold < 0.0 {
        anyhow::bail!("collision threshold must be a non-negative number, got {threshold}");
    }

    info!("masspool - compound pooling and collision detection");
    info!("===================================================");
    info!("Input: {}", input.display());
    info!("Plate format: {} wells", plate_format);
    match capacity {
        Capacity::PerWell(quota) => info!("Capacity: {} compounds per well", quota),
        Capacity::TotalWells(wells) => info!("Capacity: {} total wells", wells),
    }
    info!("Collision threshold: {}", threshold);
    info!("Delimiter: {}", delimiter);
    info!("Columns: sample='{}', mass='{}'", columns.sample, columns.mass);

    let table = CompoundTable::from_path(&input, &columns, delimiter)
        .with_context(|| format!("Failed to read compound table: {}", input.display()))?;
    info!("Read {} compounds", table.len());

    let assignment =
        assign(table, plate_format, capacity).context("Well assignment failed")?;
    let scan = detect(&assignment, threshold);

    let emitter = ReportEmitter::new(&output_prefix, plate_format);
    let paths = emitter
        .emit(&assignment, &scan, threshold)
        .context("Failed to write reports")?;

    info!("Reports written:");
    info!("  Compounds:   {}", paths.compounds.display());
    info!("  Collisions:  {}", paths.collision_summary.display());
    info!("  Comparisons: {}", paths.comparisons.display());
    info!("  Manifest:    {}", paths.manifest.display());

    let summary = RunSummary::new(&assignment, &scan, threshold);

    #[cfg(feature = "colorized_output")]
    {
        println!("{}", summary.format_colored());
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        println!("{}", summary);
    }

    Ok(())
}

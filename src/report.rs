//! Report emission: the three CSV tables, a JSON run manifest and a
//! terminal run summary.
//!
//! File names carry the output prefix, the plate format and a
//! `%Y%m%d_%H%M%S` timestamp so repeated runs never clobber each other.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

#[cfg(feature = "colorized_output")]
use console::style;

use crate::collision::CollisionScan;
use crate::plate::PlateFormat;
use crate::pooling::PoolAssignment;

/// Errors raised while writing reports.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// I/O error writing an output file.
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error.
    #[error("CSV writing error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error for the run manifest.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Paths of every file produced by one [`ReportEmitter::emit`] call.
#[derive(Debug, Clone)]
pub struct ReportPaths {
    /// Compounds-with-address table.
    pub compounds: PathBuf,
    /// Per-well collision-count summary.
    pub collision_summary: PathBuf,
    /// Pairwise mass comparison table.
    pub comparisons: PathBuf,
    /// JSON run manifest.
    pub manifest: PathBuf,
}

/// Machine-readable record of one run: parameters, counts and outputs.
#[derive(Debug, Clone, Serialize)]
pub struct RunManifest {
    /// RFC 3339 creation time.
    pub created: String,
    /// Tool name.
    pub tool: String,
    /// Tool version.
    pub version: String,
    /// Plate format id (96, 384, 1536).
    pub plate_format: u32,
    /// Collision mass threshold.
    pub threshold: f64,
    /// Resolved total well count.
    pub total_wells: usize,
    /// Resolved compounds-per-well quota.
    pub per_well: usize,
    /// Number of compounds assigned.
    pub compounds: usize,
    /// Number of occupied wells.
    pub wells: usize,
    /// Number of plates touched.
    pub plates: u32,
    /// Number of recorded pair comparisons.
    pub comparisons: usize,
    /// Number of colliding pairs.
    pub collisions: usize,
    /// Output file names keyed by report kind.
    pub outputs: BTreeMap<String, String>,
}

/// Writes the run's reports under a shared prefix and timestamp.
#[derive(Debug, Clone)]
pub struct ReportEmitter {
    prefix: String,
    format: PlateFormat,
    timestamp: String,
}

impl ReportEmitter {
    /// Create an emitter stamped with the current local time.
    pub fn new(prefix: &str, format: PlateFormat) -> Self {
        Self::with_timestamp(
            prefix,
            format,
            &chrono::Local::now().format("%Y%m%d_%H%M%S").to_string(),
        )
    }

    /// Create an emitter with a fixed timestamp (stable names for tests).
    pub fn with_timestamp(prefix: &str, format: PlateFormat, timestamp: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            format,
            timestamp: timestamp.to_string(),
        }
    }

    /// Path of the compounds-with-address table.
    pub fn compounds_path(&self) -> PathBuf {
        PathBuf::from(format!(
            "{}_plate{}_compounds_{}.csv",
            self.prefix, self.format, self.timestamp
        ))
    }

    /// Path of the per-well collision summary.
    pub fn collision_summary_path(&self) -> PathBuf {
        PathBuf::from(format!(
            "{}_plate{}_collisions_summary_{}.csv",
            self.prefix, self.format, self.timestamp
        ))
    }

    /// Path of the pairwise comparison table.
    pub fn comparisons_path(&self) -> PathBuf {
        PathBuf::from(format!(
            "{}_exact_mass_comparisons_plate{}_{}.csv",
            self.prefix, self.format, self.timestamp
        ))
    }

    /// Path of the JSON run manifest.
    pub fn manifest_path(&self) -> PathBuf {
        PathBuf::from(format!(
            "{}_plate{}_manifest_{}.json",
            self.prefix, self.format, self.timestamp
        ))
    }

    /// Write all four reports and return their paths.
    pub fn emit(
        &self,
        assignment: &PoolAssignment,
        scan: &CollisionScan,
        threshold: f64,
    ) -> Result<ReportPaths, ReportError> {
        let compounds = self.write_compounds(assignment)?;
        let collision_summary = self.write_collision_summary(scan)?;
        let comparisons = self.write_comparisons(scan)?;
        let manifest = self.write_manifest(assignment, scan, threshold)?;

        Ok(ReportPaths {
            compounds,
            collision_summary,
            comparisons,
            manifest,
        })
    }

    /// Write the compounds table: original columns plus `PoolPlate` and
    /// `PoolWell`, sorted by plate, then row, then column for stable review.
    pub fn write_compounds(&self, assignment: &PoolAssignment) -> Result<PathBuf, ReportError> {
        let path = self.compounds_path();
        let mut writer = csv::Writer::from_path(&path)?;

        writer.write_record(&assignment.header)?;

        let mut rows: Vec<_> = assignment
            .wells
            .iter()
            .flat_map(|well| well.compounds.iter().map(move |c| (well.address, c)))
            .collect();
        rows.sort_by_key(|(address, _)| *address);

        for (address, compound) in rows {
            let mut record: Vec<String> = compound.fields.clone();
            record.push(address.plate.to_string());
            record.push(address.well_label());
            writer.write_record(&record)?;
        }

        writer.flush()?;
        log::info!("compound report saved as {}", path.display());
        Ok(path)
    }

    /// Write the per-well collision-count table (`Plate, Well, Collisions`).
    pub fn write_collision_summary(&self, scan: &CollisionScan) -> Result<PathBuf, ReportError> {
        let path = self.collision_summary_path();
        let mut writer = csv::Writer::from_path(&path)?;

        writer.write_record(["Plate", "Well", "Collisions"])?;
        for well in &scan.per_well {
            writer.write_record([
                well.address.plate.to_string(),
                well.address.well_label(),
                well.collisions.to_string(),
            ])?;
        }

        writer.flush()?;
        log::info!("collision summary saved as {}", path.display());
        Ok(path)
    }

    /// Write the pairwise comparison table with a `Yes`/`No` verdict column.
    pub fn write_comparisons(&self, scan: &CollisionScan) -> Result<PathBuf, ReportError> {
        let path = self.comparisons_path();
        let mut writer = csv::Writer::from_path(&path)?;

        writer.write_record(["Plate", "Well", "ID_1", "Mass_1", "ID_2", "Mass_2", "Comparison"])?;
        for comparison in &scan.comparisons {
            writer.write_record([
                comparison.address.plate.to_string(),
                comparison.address.well_label(),
                comparison.id_1.clone(),
                comparison.mass_1.to_string(),
                comparison.id_2.clone(),
                comparison.mass_2.to_string(),
                if comparison.collision { "Yes" } else { "No" }.to_string(),
            ])?;
        }

        writer.flush()?;
        log::info!("comparison report saved as {}", path.display());
        Ok(path)
    }

    /// Write the JSON run manifest.
    pub fn write_manifest(
        &self,
        assignment: &PoolAssignment,
        scan: &CollisionScan,
        threshold: f64,
    ) -> Result<PathBuf, ReportError> {
        let path = self.manifest_path();

        let mut outputs = BTreeMap::new();
        outputs.insert(
            "compounds".to_string(),
            self.compounds_path().display().to_string(),
        );
        outputs.insert(
            "collision_summary".to_string(),
            self.collision_summary_path().display().to_string(),
        );
        outputs.insert(
            "comparisons".to_string(),
            self.comparisons_path().display().to_string(),
        );

        let manifest = RunManifest {
            created: chrono::Local::now().to_rfc3339(),
            tool: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            plate_format: assignment.format.well_count(),
            threshold,
            total_wells: assignment.total_wells,
            per_well: assignment.per_well,
            compounds: assignment.compound_count(),
            wells: assignment.wells.len(),
            plates: assignment.plate_count(),
            comparisons: scan.comparisons.len(),
            collisions: scan.collision_count(),
            outputs,
        };

        std::fs::write(&path, serde_json::to_string_pretty(&manifest)?)?;
        log::info!("run manifest saved as {}", path.display());
        Ok(path)
    }
}

/// Terminal summary of one run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Number of compounds assigned.
    pub compounds: usize,
    /// Number of occupied wells.
    pub wells: usize,
    /// Number of plates touched.
    pub plates: u32,
    /// Number of recorded pair comparisons.
    pub comparisons: usize,
    /// Number of colliding pairs.
    pub collisions: usize,
    /// Collision mass threshold.
    pub threshold: f64,
}

impl RunSummary {
    /// Build a summary from the run's assignment and scan.
    pub fn new(assignment: &PoolAssignment, scan: &CollisionScan, threshold: f64) -> Self {
        Self {
            compounds: assignment.compound_count(),
            wells: assignment.wells.len(),
            plates: assignment.plate_count(),
            comparisons: scan.comparisons.len(),
            collisions: scan.collision_count(),
            threshold,
        }
    }

    /// Format the summary with colors (requires the console feature).
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            let mut output = String::new();
            output.push_str(&format!("{}\n", style("Pooling Summary").bold().cyan()));
            output.push_str(&format!("{}\n", style("===============").cyan()));
            output.push_str(&format!(
                "Compounds: {}  Wells: {}  Plates: {}\n",
                style(self.compounds).bold(),
                style(self.wells).bold(),
                style(self.plates).bold()
            ));
            output.push_str(&format!(
                "Comparisons: {} at threshold {}\n",
                self.comparisons, self.threshold
            ));

            if self.collisions > 0 {
                output.push_str(&format!(
                    "{}: {} colliding pairs\n",
                    style("Collisions").red().bold(),
                    style(self.collisions).red()
                ));
            } else {
                output.push_str(&format!(
                    "{}\n",
                    style("No mass collisions detected").green().bold()
                ));
            }

            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pooling Summary")?;
        writeln!(f, "===============")?;
        writeln!(
            f,
            "Compounds: {}  Wells: {}  Plates: {}",
            self.compounds, self.wells, self.plates
        )?;
        writeln!(
            f,
            "Comparisons: {} at threshold {}",
            self.comparisons, self.threshold
        )?;

        if self.collisions > 0 {
            writeln!(f, "Collisions: {} colliding pairs", self.collisions)?;
        } else {
            writeln!(f, "No mass collisions detected")?;
        }

        Ok(())
    }
}

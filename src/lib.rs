//! # masspool - Mass-Aware Compound Pooling
//!
//! `masspool` assigns a library of chemical compounds (sample ID plus exact
//! molecular mass) to wells on standard laboratory microplates, then scans
//! every well for pairs of compounds whose masses are too close to resolve
//! in a downstream mass-spectrometry measurement.
//!
//! ## How pooling works
//!
//! Compounds are sorted by exact mass and then dealt out **round-robin**
//! across the target wells. Mass-adjacent compounds therefore land in
//! different wells, and the near-mass pairs that still share a well are
//! exactly the ones worth flagging - the collision scan only needs to
//! compare within wells, never across the full table.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use masspool::compound::{ColumnSpec, CompoundTable, Delimiter};
//! use masspool::plate::PlateFormat;
//! use masspool::pooling::{assign, Capacity};
//! use masspool::collision::detect;
//! use masspool::report::ReportEmitter;
//!
//! let table = CompoundTable::from_path(
//!     "compounds.tsv",
//!     &ColumnSpec::default(),
//!     Delimiter::Tab,
//! )?;
//!
//! let assignment = assign(table, PlateFormat::W384, Capacity::PerWell(10))?;
//! let scan = detect(&assignment, 0.1);
//!
//! let emitter = ReportEmitter::new("output", PlateFormat::W384);
//! let paths = emitter.emit(&assignment, &scan, 0.1)?;
//! println!("compound report: {}", paths.compounds.display());
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! This produces three timestamped CSV reports (compounds with addresses,
//! per-well collision counts, pairwise comparisons) plus a JSON manifest.
//!
//! ## Architecture
//!
//! - [`plate`]: plate geometries and slot-to-well addressing
//! - [`compound`]: delimited compound-table input
//! - [`pooling`]: capacity resolution and round-robin assignment
//! - [`collision`]: per-well mass proximity scan with global pair dedup
//! - [`report`]: CSV/JSON report emission and the terminal summary

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod collision;
pub mod compound;
pub mod plate;
pub mod pooling;
pub mod report;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::collision::{
        detect, detect_with_seen, CollisionScan, MassComparison, PairKey, WellCollisionCount,
    };
    pub use crate::compound::{ColumnSpec, Compound, CompoundTable, Delimiter, TableError};
    pub use crate::plate::{well_address, PlateError, PlateFormat, WellAddress, ROW_LABELS};
    pub use crate::pooling::{assign, Capacity, PoolAssignment, PooledWell, PoolingError};
    pub use crate::report::{ReportEmitter, ReportError, ReportPaths, RunManifest, RunSummary};
}

//! Round-robin assignment of compounds to pool wells.
//!
//! Compounds are sorted by exact mass (ascending, stable) and then dealt
//! out round-robin across the resolved number of wells. Sorting first means
//! mass-adjacent compounds land in *different* wells, so the pairs that do
//! share a well are exactly the highest-risk near-mass pairs for the
//! downstream collision scan.

use crate::compound::{Compound, CompoundTable};
use crate::plate::{well_address, PlateFormat, WellAddress};

/// Errors raised while resolving pool capacity.
#[derive(Debug, thiserror::Error)]
pub enum PoolingError {
    /// The capacity value (wells or compounds per well) is zero.
    #[error("pool capacity must be at least 1, got {0}")]
    InvalidCapacity(usize),
}

/// Pool capacity: exactly one of the two sizing modes.
///
/// The other dimension is resolved from the compound count by ceiling
/// division. A tagged variant rather than two optional parameters, so a
/// "both supplied" state is unrepresentable here; the CLI boundary rejects
/// it before constructing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
    /// Target number of compounds per well; well count is derived.
    PerWell(usize),
    /// Target total number of wells; compounds per well is derived.
    TotalWells(usize),
}

/// One occupied well and the compounds pooled into it, in assignment order.
#[derive(Debug, Clone)]
pub struct PooledWell {
    /// The physical well position.
    pub address: WellAddress,
    /// Compounds assigned to this well, in round-robin arrival order.
    pub compounds: Vec<Compound>,
}

/// The complete well assignment for one run. Immutable once built.
///
/// Wells appear in construction (slot) order; only wells that received at
/// least one compound are present.
#[derive(Debug, Clone)]
pub struct PoolAssignment {
    /// Input header extended with `PoolPlate` and `PoolWell`.
    pub header: Vec<String>,
    /// Occupied wells in slot order.
    pub wells: Vec<PooledWell>,
    /// Index of the sample identifier column in each compound's fields.
    pub sample_index: usize,
    /// Index of the exact mass column in each compound's fields.
    pub mass_index: usize,
    /// The plate geometry used for addressing.
    pub format: PlateFormat,
    /// Resolved total well count (0 for an empty input).
    pub total_wells: usize,
    /// Resolved compounds-per-well quota (0 for an empty input).
    pub per_well: usize,
}

impl PoolAssignment {
    /// Total number of compounds across all wells.
    pub fn compound_count(&self) -> usize {
        self.wells.iter().map(|w| w.compounds.len()).sum()
    }

    /// Number of plates touched by the assignment.
    pub fn plate_count(&self) -> u32 {
        self.wells.iter().map(|w| w.address.plate).max().unwrap_or(0)
    }
}

fn ceil_div(n: usize, d: usize) -> usize {
    n / d + usize::from(n % d != 0)
}

/// Distribute the table's compounds across wells round-robin.
///
/// Sorted rank `r` lands in slot `r % total_wells`, so a well holds every
/// compound whose rank is congruent to its slot, not a contiguous block.
/// No compound is dropped or duplicated. An empty table yields an empty
/// assignment without error.
pub fn assign(
    table: CompoundTable,
    format: PlateFormat,
    capacity: Capacity,
) -> Result<PoolAssignment, PoolingError> {
    match capacity {
        Capacity::PerWell(0) | Capacity::TotalWells(0) => {
            return Err(PoolingError::InvalidCapacity(0));
        }
        _ => {}
    }

    let CompoundTable {
        header,
        mut compounds,
        sample_index,
        mass_index,
    } = table;

    let mut header = header;
    header.push("PoolPlate".to_string());
    header.push("PoolWell".to_string());

    let n = compounds.len();
    if n == 0 {
        return Ok(PoolAssignment {
            header,
            wells: Vec::new(),
            sample_index,
            mass_index,
            format,
            total_wells: 0,
            per_well: 0,
        });
    }

    let (total_wells, per_well) = match capacity {
        Capacity::PerWell(quota) => (ceil_div(n, quota), quota),
        Capacity::TotalWells(wells) => (wells, ceil_div(n, wells)),
    };

    // Stable sort: equal masses keep their input order.
    compounds.sort_by(|a, b| a.exact_mass.total_cmp(&b.exact_mass));

    log::info!(
        "assigning {} compounds to {} wells ({} per well, {}-well plates)",
        n,
        total_wells,
        per_well,
        format
    );

    let occupied = total_wells.min(n);
    let mut wells: Vec<PooledWell> = (0..occupied)
        .map(|slot| PooledWell {
            address: well_address(slot, format),
            compounds: Vec::new(),
        })
        .collect();

    for (rank, compound) in compounds.into_iter().enumerate() {
        wells[rank % total_wells].compounds.push(compound);
    }

    Ok(PoolAssignment {
        header,
        wells,
        sample_index,
        mass_index,
        format,
        total_wells,
        per_well,
    })
}

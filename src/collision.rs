//! Per-well exact-mass collision detection.
//!
//! For each occupied well, every unordered pair of its compounds is
//! compared; a pair whose mass difference is within the threshold is a
//! collision (indistinguishable to the downstream MS readout).
//!
//! Pair comparisons are deduplicated **globally** by sample-id pair, not
//! per well: if the same id pair recurs in a later well (possible only when
//! the input carries duplicate sample ids), the later occurrence is
//! silently skipped and does not increment that well's count. This mirrors
//! the behavior of the original pooling tool and is deliberately preserved;
//! see `detect_with_seen` for the explicit dedup set.

use std::collections::HashSet;

use crate::plate::WellAddress;
use crate::pooling::PoolAssignment;

/// Unordered sample-id pair, stored in lexicographic order.
pub type PairKey = (String, String);

/// Build the canonical key for an unordered id pair.
pub fn pair_key(a: &str, b: &str) -> PairKey {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

/// One recorded mass comparison between two compounds sharing a well.
#[derive(Debug, Clone, PartialEq)]
pub struct MassComparison {
    /// The well both compounds were assigned to.
    pub address: WellAddress,
    /// Sample id of the first compound (well list order).
    pub id_1: String,
    /// Exact mass of the first compound.
    pub mass_1: f64,
    /// Sample id of the second compound.
    pub id_2: String,
    /// Exact mass of the second compound.
    pub mass_2: f64,
    /// Whether the masses are within the collision threshold.
    pub collision: bool,
}

/// Collision tally for one occupied well.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WellCollisionCount {
    /// The well.
    pub address: WellAddress,
    /// Colliding comparisons actually performed for this well.
    pub collisions: usize,
}

/// Result of a collision scan over one assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionScan {
    /// One entry per occupied well, in assignment construction order.
    pub per_well: Vec<WellCollisionCount>,
    /// All recorded comparisons: wells in construction order, pairs in
    /// ascending index order within a well.
    pub comparisons: Vec<MassComparison>,
}

impl CollisionScan {
    /// Total number of colliding comparisons across all wells.
    pub fn collision_count(&self) -> usize {
        self.comparisons.iter().filter(|c| c.collision).count()
    }
}

/// Scan an assignment for mass collisions with a fresh dedup set.
///
/// Running this twice on the same assignment yields identical results; no
/// state is carried between invocations.
pub fn detect(assignment: &PoolAssignment, threshold: f64) -> CollisionScan {
    let mut seen = HashSet::new();
    detect_with_seen(assignment, threshold, &mut seen)
}

/// Scan an assignment for mass collisions using a caller-owned dedup set.
///
/// The set keys comparisons by unordered sample-id pair across the whole
/// run; pairs already present are skipped. Passing the set explicitly keeps
/// the scan a pure function of its inputs.
pub fn detect_with_seen(
    assignment: &PoolAssignment,
    threshold: f64,
    seen: &mut HashSet<PairKey>,
) -> CollisionScan {
    let mut per_well = Vec::with_capacity(assignment.wells.len());
    let mut comparisons = Vec::new();

    for well in &assignment.wells {
        let compounds = &well.compounds;
        let mut collisions = 0;

        for i in 0..compounds.len() {
            for j in (i + 1)..compounds.len() {
                let a = &compounds[i];
                let b = &compounds[j];

                let key = pair_key(&a.sample_id, &b.sample_id);
                if !seen.insert(key) {
                    continue;
                }

                let collision = (a.exact_mass - b.exact_mass).abs() <= threshold;
                if collision {
                    collisions += 1;
                }

                comparisons.push(MassComparison {
                    address: well.address,
                    id_1: a.sample_id.clone(),
                    mass_1: a.exact_mass,
                    id_2: b.sample_id.clone(),
                    mass_2: b.exact_mass,
                    collision,
                });
            }
        }

        per_well.push(WellCollisionCount {
            address: well.address,
            collisions,
        });
    }

    log::info!(
        "compared {} pairs across {} wells, {} collisions at threshold {}",
        comparisons.len(),
        per_well.len(),
        comparisons.iter().filter(|c| c.collision).count(),
        threshold
    );

    CollisionScan {
        per_well,
        comparisons,
    }
}

use std::fmt::Debug;

use log::debug;
use num_traits::{Float, Zero};
use serde::Serialize;

use crate::algorithm::{OperationCounts, ShortestPathResult};
use crate::decomposition::Decomposition;
use crate::{Error, Result};

/// Operation counts of both engines side by side, plus the shape of the
/// decomposition that drove the hierarchical run
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub flat: OperationCounts,
    pub hierarchical: OperationCounts,
    /// Fraction of flat operations saved by the hierarchical engine;
    /// negative when it performs more
    pub improvement: f64,
    pub reachable: usize,
    pub nesting_width: usize,
    pub components: usize,
    pub levels: usize,
}

/// Fails with [`Error::EngineMismatch`] at the first vertex whose distances
/// differ between the two results.
pub fn verify_agreement<W>(flat: &ShortestPathResult<W>, hierarchical: &ShortestPathResult<W>) -> Result<()>
where
    W: Float + Zero + Debug + Copy,
{
    if flat.distances.len() != hierarchical.distances.len() {
        return Err(Error::Inconsistency(format!(
            "results cover {} and {} vertices",
            flat.distances.len(),
            hierarchical.distances.len()
        )));
    }

    let as_f64 = |d: Option<W>| d.and_then(|w| w.to_f64());
    for (vertex, (a, b)) in flat.distances.iter().zip(&hierarchical.distances).enumerate() {
        if a != b {
            return Err(Error::EngineMismatch {
                vertex,
                flat: as_f64(*a),
                hierarchical: as_f64(*b),
            });
        }
    }

    Ok(())
}

/// Verifies agreement and summarizes both runs
pub fn compare<W>(
    flat: &ShortestPathResult<W>,
    hierarchical: &ShortestPathResult<W>,
    decomposition: &Decomposition,
) -> Result<ComparisonReport>
where
    W: Float + Zero + Debug + Copy,
{
    verify_agreement(flat, hierarchical)?;

    let flat_total = flat.operations.total();
    let improvement = if flat_total > 0 {
        (flat_total as f64 - hierarchical.operations.total() as f64) / flat_total as f64
    } else {
        0.0
    };

    let tree = &decomposition.tree;
    let structure = &decomposition.structure;
    let report = ComparisonReport {
        flat: flat.operations,
        hierarchical: hierarchical.operations,
        improvement,
        reachable: flat.reachable_count(),
        nesting_width: structure.nesting_width(tree),
        components: structure.component_count(),
        levels: structure.levels(tree),
    };
    debug!("comparison: {:?}", report);

    Ok(report)
}

//! Tentative prolongator fitting.

use crate::error::AmgError;
use crate::matrix::CooMatrix;
use num_traits::Float;

/// Fit the tentative prolongator `T` and coarse candidate from an aggregate
/// assignment and the fine-level near-kernel candidate `b`.
///
/// `T` has exactly one entry per fine row, at column `aggregates[row]` with
/// value `b[row]`, then each column is unit-normalized; the coarse candidate
/// collects the per-aggregate norms. Consequence (the least-squares fit
/// property for a single candidate): `T · b_coarse` reproduces `b` exactly.
pub fn fit_candidates<T: Float>(
    aggregates: &[usize],
    b: &[T],
) -> Result<(CooMatrix<T>, Vec<T>), AmgError> {
    assert_eq!(aggregates.len(), b.len());
    if aggregates.is_empty() {
        return Err(AmgError::DegenerateAggregation("no rows to aggregate".into()));
    }
    // an unassigned sentinel must have been caught by aggregation already
    if aggregates.contains(&usize::MAX) {
        return Err(AmgError::DegenerateAggregation(
            "unaggregated row reached candidate fitting".into(),
        ));
    }
    let num_aggregates = aggregates.iter().max().unwrap() + 1;

    let mut norms = vec![T::zero(); num_aggregates];
    for (&agg, &bi) in aggregates.iter().zip(b) {
        norms[agg] = norms[agg] + bi * bi;
    }
    for (agg, nrm) in norms.iter_mut().enumerate() {
        *nrm = nrm.sqrt();
        if *nrm <= T::epsilon() {
            return Err(AmgError::DegenerateAggregation(format!(
                "candidate vector vanishes on aggregate {agg}"
            )));
        }
    }

    let n = aggregates.len();
    let mut t = CooMatrix::with_capacity(n, num_aggregates, n);
    for (row, (&agg, &bi)) in aggregates.iter().zip(b).enumerate() {
        t.push(row, agg, bi / norms[agg]);
    }
    Ok((t, norms))
}

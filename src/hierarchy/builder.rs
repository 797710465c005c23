//! Hierarchy construction: repeated coarsening followed by the dense
//! factorization of the coarsest operator.

use crate::config::{AmgOptions, SmootherType};
use crate::error::AmgError;
use crate::hierarchy::strength::offdiag_count;
use crate::hierarchy::{
    fit_candidates, smooth_prolongator, standard_aggregation, symmetric_strength, Level,
    SmoothedAggregation,
};
use crate::matrix::{spgemm, CsrMatrix};
use crate::relaxation::{ChebyshevSmoother, JacobiSmoother, LevelSmoother};
use crate::solver::coarse::CoarseSolver;
use crate::utils::spectral::estimate_rho_dinv_a;
use faer::traits::{ComplexField, RealField};
use num_traits::Float;

impl<T> SmoothedAggregation<T>
where
    T: Float + Send + Sync + ComplexField + RealField,
{
    /// Build a hierarchy from `a` with strength threshold `theta` and
    /// default options.
    pub fn new(a: CsrMatrix<T>, theta: T) -> Result<Self, AmgError> {
        Self::with_options(a, AmgOptions::new(theta))
    }

    /// Build a hierarchy with explicit options.
    ///
    /// Coarsening repeats until the current operator has at most
    /// `coarse_size` rows, the level cap is hit, or aggregation stops making
    /// progress (e.g. all-singleton aggregates on a diagonal matrix). Any
    /// per-step failure aborts construction; there is no partial hierarchy.
    pub fn with_options(a: CsrMatrix<T>, opts: AmgOptions<T>) -> Result<Self, AmgError> {
        if a.nrows() == 0 {
            return Err(AmgError::InvalidInput("empty matrix".into()));
        }
        if a.nrows() != a.ncols() {
            return Err(AmgError::InvalidInput(format!(
                "matrix must be square, got {}x{}",
                a.nrows(),
                a.ncols()
            )));
        }
        if !(opts.theta >= num_traits::Zero::zero()) {
            return Err(AmgError::InvalidInput(
                "strength threshold must be nonnegative".into(),
            ));
        }

        let candidate = vec![num_traits::One::one(); a.nrows()];
        let mut levels = vec![Level::new(a, candidate)];

        while levels.last().unwrap().a.nrows() > opts.coarse_size
            && levels.len() < opts.max_levels
        {
            if !extend_hierarchy(&mut levels, &opts)? {
                break;
            }
        }

        let coarse = CoarseSolver::factor(&levels.last().unwrap().a)?;
        Ok(SmoothedAggregation { levels, coarse })
    }
}

/// One coarsening step. Returns false when aggregation cannot shrink the
/// operator any further; the current level then stays terminal.
fn extend_hierarchy<T>(levels: &mut Vec<Level<T>>, opts: &AmgOptions<T>) -> Result<bool, AmgError>
where
    T: Float + Send + Sync,
{
    let (aggregates, p, r, a_coarse, b_coarse, smoother) = {
        let level = levels.last().unwrap();
        let a = &level.a;

        let c = symmetric_strength(a, opts.theta);
        if offdiag_count(a) > 0 && offdiag_count(&c) == 0 {
            return Err(AmgError::InvalidInput(
                "strength threshold removed every connection".into(),
            ));
        }

        let rho = estimate_rho_dinv_a(a)?;
        let aggregates = standard_aggregation(&c)?;
        let num_aggregates = aggregates.iter().max().unwrap() + 1;
        if num_aggregates >= a.nrows() {
            return Ok(false);
        }

        let (t, b_coarse) = fit_candidates(&aggregates, &level.candidate)?;
        let p = smooth_prolongator(a, &t, opts.omega, rho)?;
        let r = p.transpose();

        let ap = spgemm(a, &p);
        let a_coarse = spgemm(&r, &ap);
        assert_eq!(a_coarse.nrows(), num_aggregates);
        assert_eq!(a_coarse.ncols(), num_aggregates);

        let smoother = match opts.smoother {
            SmootherType::Jacobi => {
                LevelSmoother::Jacobi(JacobiSmoother::new(a, opts.omega / rho)?)
            }
            SmootherType::Chebyshev => {
                LevelSmoother::Chebyshev(ChebyshevSmoother::new(a, rho, opts.cheby_degree)?)
            }
        };
        (aggregates, p, r, a_coarse, b_coarse, smoother)
    };

    let fine = levels.last_mut().unwrap();
    fine.aggregates = aggregates;
    fine.residual = vec![num_traits::Zero::zero(); fine.a.nrows()];
    fine.p = Some(p);
    fine.r = Some(r);
    fine.smoother = Some(smoother);

    levels.push(Level::new(a_coarse, b_coarse));
    Ok(true)
}

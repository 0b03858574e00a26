//! Parallel optimal-aliasing search.
//!
//! This module provides a Rayon-backed version of
//! [`fracfact_opt`](crate::fracfact_opt). Enable with the `parallel`
//! feature flag.
//!
//! Candidate generators have no data dependency on each other, so their
//! evaluation (matrix realization plus alias analysis) parallelizes
//! cleanly. Determinism is preserved: candidates are reduced on
//! (cost vector, candidate index), so the first candidate in the defined
//! search order still wins ties regardless of thread scheduling.
//!
//! # Usage
//!
//! ```ignore
//! use fracfact::parallel::par_fracfact_opt;
//!
//! let best = par_fracfact_opt(6, 2, 0).unwrap();
//! assert!(best.is_exhaustive());
//! ```
//!
//! # Performance
//!
//! Parallel search is most beneficial for large candidate spaces (several
//! erased factors, or many main factors). For small searches the
//! sequential version may be faster due to scheduling overhead. The
//! candidate list is materialized up front (bounded by `max_attempts`
//! when set), so an unbounded search over a huge space costs memory
//! proportional to the candidate count.

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::optimize::{
    candidate_interactions, check_search_params, evaluate_candidate, search_space, OptimalDesign,
};
use crate::utils::combinations;

/// Parallel variant of [`fracfact_opt`](crate::fracfact_opt).
///
/// Identical contract and identical result, including the first-seen
/// tie-break: for any parameters, `par_fracfact_opt` returns the same
/// generator, cost vector, attempt count, and exhaustiveness flag as the
/// sequential search.
///
/// # Errors
///
/// Same conditions as [`fracfact_opt`](crate::fracfact_opt).
pub fn par_fracfact_opt(
    n_factors: usize,
    n_erased: usize,
    max_attempts: usize,
) -> Result<OptimalDesign> {
    let n_main = check_search_params(n_factors, n_erased)?;
    let interactions = candidate_interactions(n_main);

    let total = search_space(interactions.len(), n_erased);
    let truncated = max_attempts > 0 && (max_attempts as u64) < total;

    let candidates: Vec<Vec<usize>> = if truncated {
        combinations(interactions.len(), n_erased)
            .take(max_attempts)
            .collect()
    } else {
        combinations(interactions.len(), n_erased).collect()
    };
    let attempts = candidates.len();

    let best = candidates
        .into_par_iter()
        .enumerate()
        .map(|(idx, chosen)| {
            evaluate_candidate(n_main, &interactions, &chosen)
                .map(|(spec, analysis)| (idx, spec, analysis))
        })
        .try_reduce_with(|a, b| {
            // Reduce in candidate order: lower cost wins, index breaks ties.
            let keep_a = match a.2.cost_vector().cmp(b.2.cost_vector()) {
                std::cmp::Ordering::Less => true,
                std::cmp::Ordering::Greater => false,
                std::cmp::Ordering::Equal => a.0 < b.0,
            };
            Ok(if keep_a { a } else { b })
        })
        .transpose()?
        .ok_or_else(|| Error::design_not_possible("no candidate generator could be evaluated"))?;

    let (_, spec, analysis) = best;
    Ok(OptimalDesign::new(spec, analysis, attempts, !truncated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimize::fracfact_opt;

    #[test]
    fn test_par_matches_sequential() {
        for (n, e) in [(4, 1), (5, 1), (5, 2), (6, 2)] {
            let seq = fracfact_opt(n, e, 0).unwrap();
            let par = par_fracfact_opt(n, e, 0).unwrap();
            assert_eq!(par.generator(), seq.generator());
            assert_eq!(par.cost_vector(), seq.cost_vector());
            assert_eq!(par.attempts(), seq.attempts());
            assert_eq!(par.is_exhaustive(), seq.is_exhaustive());
        }
    }

    #[test]
    fn test_par_truncated_matches_sequential() {
        let seq = fracfact_opt(6, 2, 5).unwrap();
        let par = par_fracfact_opt(6, 2, 5).unwrap();
        assert!(!par.is_exhaustive());
        assert_eq!(par.attempts(), 5);
        assert_eq!(par.generator(), seq.generator());
        assert_eq!(par.cost_vector(), seq.cost_vector());
    }

    #[test]
    fn test_par_parameter_errors() {
        assert!(par_fracfact_opt(1, 0, 0).is_err());
        assert!(par_fracfact_opt(4, 2, 0).is_err());
    }
}

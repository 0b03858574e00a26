//! Exhaustive search for minimally-aliased fractional designs.
//!
//! [`fracfact_opt`] searches the ways to express `n_erased` of `n_factors`
//! factors as interactions of the remaining main factors, scoring every
//! candidate generator by its alias cost vector and keeping the
//! lexicographic minimum. Main factors never alias each other by
//! construction; what the search trades off is which interactions absorb
//! the erased factors.
//!
//! Candidate interactions are visited highest-order first (cheaper to
//! alias away), and `max_attempts` can truncate the search on large
//! spaces, trading certified optimality for bounded runtime.
//!
//! # Example
//!
//! ```
//! use fracfact::fracfact_opt;
//!
//! let best = fracfact_opt(4, 1, 0).unwrap();
//! assert_eq!(best.generator(), "a b c abc");
//! assert!(best.is_exhaustive());
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::alias::{fracfact_aliasing, AliasAnalysis};
use crate::design::Design;
use crate::error::{Error, Result};
use crate::generator::{GeneratorSpec, Term};
use crate::utils::{binomial, combinations};
use crate::MAX_FACTORS;

/// The outcome of an optimal-aliasing search.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OptimalDesign {
    spec: GeneratorSpec,
    analysis: AliasAnalysis,
    attempts: usize,
    exhaustive: bool,
}

impl OptimalDesign {
    pub(crate) fn new(
        spec: GeneratorSpec,
        analysis: AliasAnalysis,
        attempts: usize,
        exhaustive: bool,
    ) -> Self {
        Self {
            spec,
            analysis,
            attempts,
            exhaustive,
        }
    }

    /// The winning generator specification.
    #[must_use]
    pub fn spec(&self) -> &GeneratorSpec {
        &self.spec
    }

    /// The winning generator in textual form, e.g. `"a b c abc"`.
    #[must_use]
    pub fn generator(&self) -> String {
        self.spec.to_string()
    }

    /// The alias analysis of the winning design.
    #[must_use]
    pub fn analysis(&self) -> &AliasAnalysis {
        &self.analysis
    }

    /// The winning alias cost vector.
    #[must_use]
    pub fn cost_vector(&self) -> &[u32] {
        self.analysis.cost_vector()
    }

    /// Realize the winning design matrix.
    ///
    /// # Errors
    ///
    /// Propagates realization errors; cannot fail for a result produced by
    /// the search itself.
    pub fn design(&self) -> Result<Design> {
        Design::from_spec(&self.spec)
    }

    /// How many candidate generators were evaluated.
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Whether the whole candidate space was searched. When `false` (the
    /// search was truncated by `max_attempts`) the result is a best-effort
    /// optimum, not a certified one.
    #[must_use]
    pub fn is_exhaustive(&self) -> bool {
        self.exhaustive
    }
}

/// Validate search parameters and return the main-factor count.
///
/// Feasibility is counted analytically before any search: the erased
/// factors must fit among the 2^m - m - 1 interactions of the m main
/// factors.
pub(crate) fn check_search_params(n_factors: usize, n_erased: usize) -> Result<usize> {
    if n_factors > MAX_FACTORS {
        return Err(Error::DesignTooLarge {
            factors: n_factors,
            max: MAX_FACTORS,
        });
    }
    if n_factors < 2 {
        return Err(Error::invalid_specification(
            "optimal search needs at least two factors",
        ));
    }

    let n_main = n_factors.checked_sub(n_erased).filter(|&m| m >= 2).ok_or_else(|| {
        Error::design_not_possible(format!(
            "erasing {n_erased} of {n_factors} factors leaves fewer than two main factors"
        ))
    })?;

    let n_interactions = (1u64 << n_main) - 1 - n_main as u64;
    if (n_erased as u64) > n_interactions {
        return Err(Error::design_not_possible(format!(
            "{n_main} main factors offer only {n_interactions} interactions \
             for {n_erased} erased factors"
        )));
    }

    Ok(n_main)
}

/// All interactions of order >= 2 among `n_main` factors, sorted by
/// (order descending, lexicographic descending).
///
/// The search visits combinations of these in order, so higher-order
/// interactions, the cheapest to alias away, are attempted first. This
/// ordering also fixes which design wins among cost ties (first seen), so
/// it is part of the reproducibility contract.
pub(crate) fn candidate_interactions(n_main: usize) -> Vec<Vec<usize>> {
    let mut interactions: Vec<Vec<usize>> = (2..=n_main)
        .flat_map(|order| combinations(n_main, order))
        .collect();
    interactions.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| b.cmp(a)));
    interactions
}

/// Build and score the candidate generator selecting the interactions at
/// `chosen` (indices into `interactions`).
pub(crate) fn evaluate_candidate(
    n_main: usize,
    interactions: &[Vec<usize>],
    chosen: &[usize],
) -> Result<(GeneratorSpec, AliasAnalysis)> {
    let mut terms: Vec<Term> = (0..n_main).map(Term::main).collect();
    for &idx in chosen {
        terms.push(Term::interaction(interactions[idx].clone(), false)?);
    }
    let spec = GeneratorSpec::new(terms)?;
    let design = Design::from_spec(&spec)?;
    let analysis = fracfact_aliasing(&design)?;
    Ok((spec, analysis))
}

/// Number of candidate combinations the search would visit exhaustively.
pub(crate) fn search_space(n_interactions: usize, n_erased: usize) -> u64 {
    binomial(n_interactions as u64, n_erased as u64).unwrap_or(u64::MAX)
}

/// Find the generator minimizing aliasing for a 2^(k-p) fractional design,
/// where `k = n_factors` and `p = n_erased`.
///
/// Every way of assigning the `n_erased` factors to distinct interactions
/// of the `n_factors - n_erased` main factors is realized, analyzed, and
/// compared by its alias cost vector (lexicographic, lower is better).
/// The first candidate in search order wins ties, so results are
/// reproducible run to run.
///
/// `max_attempts` bounds the search to the first N candidates; 0 means
/// exhaustive. A truncated search reports `is_exhaustive() == false`.
///
/// This is the most expensive operation in the library: the candidate
/// count is combinatorial in `n_erased` and each evaluation is exponential
/// in the main-factor count. See the `parallel` feature for a
/// multi-threaded variant.
///
/// # Errors
///
/// * `DesignTooLarge` if `n_factors` exceeds [`MAX_FACTORS`].
/// * `InvalidSpecification` if `n_factors < 2`.
/// * `DesignNotPossible` if the main factors left after erasure offer
///   fewer interactions than `n_erased` (checked before searching).
pub fn fracfact_opt(n_factors: usize, n_erased: usize, max_attempts: usize) -> Result<OptimalDesign> {
    let n_main = check_search_params(n_factors, n_erased)?;
    let interactions = candidate_interactions(n_main);

    let total = search_space(interactions.len(), n_erased);
    let exhaustive = max_attempts == 0 || (max_attempts as u64) >= total;

    let mut best: Option<(GeneratorSpec, AliasAnalysis)> = None;
    let mut attempts = 0usize;

    for chosen in combinations(interactions.len(), n_erased) {
        if max_attempts > 0 && attempts == max_attempts {
            break;
        }
        attempts += 1;

        let (spec, analysis) = evaluate_candidate(n_main, &interactions, &chosen)?;
        let improved = match &best {
            None => true,
            // Strict comparison keeps the first-seen candidate on ties.
            Some((_, incumbent)) => analysis.cost_vector() < incumbent.cost_vector(),
        };
        if improved {
            best = Some((spec, analysis));
        }
    }

    // Feasibility guarantees at least one candidate.
    let (spec, analysis) = best.ok_or_else(|| {
        Error::design_not_possible("no candidate generator could be evaluated")
    })?;

    Ok(OptimalDesign::new(spec, analysis, attempts, exhaustive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::fracfact;

    #[test]
    fn test_opt_prefers_high_order_word() {
        // Erasing one of four factors: d = abc (resolution IV) beats any
        // two-factor assignment (resolution III).
        let best = fracfact_opt(4, 1, 0).unwrap();
        assert_eq!(best.generator(), "a b c abc");
        assert_eq!(best.attempts(), 4); // 4 interactions of 3 mains, choose 1
        assert!(best.is_exhaustive());
    }

    #[test]
    fn test_opt_no_erasure_is_full_factorial() {
        let best = fracfact_opt(3, 0, 0).unwrap();
        assert_eq!(best.generator(), "a b c");
        assert_eq!(best.attempts(), 1);
        assert!(best.cost_vector().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_opt_result_round_trips() {
        let best = fracfact_opt(5, 1, 0).unwrap();
        let design = fracfact(&best.generator()).unwrap();
        let analysis = fracfact_aliasing(&design).unwrap();
        assert_eq!(analysis.cost_vector(), best.cost_vector());
        assert_eq!(analysis.readable(), best.analysis().readable());
    }

    #[test]
    fn test_opt_beats_every_candidate() {
        // Re-score the full candidate space and confirm nothing beats the
        // reported optimum.
        let best = fracfact_opt(5, 2, 0).unwrap();

        let n_main = check_search_params(5, 2).unwrap();
        let interactions = candidate_interactions(n_main);
        let mut evaluated = 0;
        for chosen in combinations(interactions.len(), 2) {
            let (_, analysis) = evaluate_candidate(n_main, &interactions, &chosen).unwrap();
            assert!(best.cost_vector() <= analysis.cost_vector());
            evaluated += 1;
        }
        assert_eq!(best.attempts(), evaluated);
    }

    #[test]
    fn test_opt_first_seen_wins_ties() {
        // With max_attempts = 1 only the first candidate in the defined
        // order is evaluated; an exhaustive search must never return a
        // strictly worse vector.
        let first_only = fracfact_opt(5, 2, 1).unwrap();
        let exhaustive = fracfact_opt(5, 2, 0).unwrap();

        assert!(!first_only.is_exhaustive());
        assert_eq!(first_only.attempts(), 1);
        assert!(exhaustive.cost_vector() <= first_only.cost_vector());
        if exhaustive.cost_vector() == first_only.cost_vector() {
            assert_eq!(exhaustive.generator(), first_only.generator());
        }
    }

    #[test]
    fn test_opt_truncation_flag() {
        let total = search_space(candidate_interactions(3).len(), 1) as usize;
        // Exactly the whole space is still exhaustive.
        let best = fracfact_opt(4, 1, total).unwrap();
        assert!(best.is_exhaustive());

        let truncated = fracfact_opt(4, 1, total - 1).unwrap();
        assert!(!truncated.is_exhaustive());
        assert_eq!(truncated.attempts(), total - 1);
    }

    #[test]
    fn test_opt_candidate_ordering() {
        let interactions = candidate_interactions(3);
        assert_eq!(
            interactions,
            vec![vec![0, 1, 2], vec![1, 2], vec![0, 2], vec![0, 1]]
        );
    }

    #[test]
    fn test_opt_parameter_errors() {
        assert!(matches!(
            fracfact_opt(MAX_FACTORS + 1, 1, 0),
            Err(Error::DesignTooLarge { .. })
        ));
        assert!(matches!(
            fracfact_opt(1, 0, 0),
            Err(Error::InvalidSpecification { .. })
        ));
        // Erasing everything leaves no mains to borrow interactions from.
        assert!(matches!(
            fracfact_opt(3, 3, 0),
            Err(Error::DesignNotPossible { .. })
        ));
        // Two mains offer a single interaction; two erased cannot fit.
        assert!(matches!(
            fracfact_opt(4, 2, 0),
            Err(Error::DesignNotPossible { .. })
        ));
    }
}

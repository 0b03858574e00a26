//! Resolution-constrained fractional-factorial construction.
//!
//! The resolution of a design is the length of the shortest word in its
//! defining relation and bounds how severely effects confound:
//!
//! * III: main effects may be confounded with two-factor interactions.
//! * IV: main effects are clean, two-factor interactions may confound
//!   with each other.
//! * V: two-factor interactions are clean of each other.
//!
//! [`fracfact_by_res`] deterministically derives the generator with the
//! fewest possible main factors (hence the fewest runs) for a requested
//! factor count and resolution, assigning the remaining factors to
//! interaction terms of order at least `res - 1`.

use crate::design::Design;
use crate::error::{Error, Result};
use crate::generator::{GeneratorSpec, Term};
use crate::utils::{binomial, combinations};
use crate::MAX_FACTORS;

/// Number of factors a design with `k` base factors can carry at
/// resolution `res`: the k mains plus every interaction of order
/// `res - 1` up to `k - 1`.
fn n_factors_at_res(k: usize, res: usize) -> u64 {
    let mut total = k as u64;
    for r in (res - 1)..k {
        total = total.saturating_add(binomial(k as u64, r as u64).unwrap_or(u64::MAX));
    }
    total
}

/// Create a two-level fractional-factorial design with `n` factors at
/// resolution `res`, using the minimal number of runs.
///
/// The smallest feasible main-factor count `k` is searched upward from
/// `res - 1`; the `n - k` remaining factors are filled with the
/// lowest-order, earliest-enumerated interaction terms of order at least
/// `res - 1`.
///
/// # Errors
///
/// * `InvalidSpecification` if `n` is zero or `res` is less than 3.
/// * `DesignNotPossible` if no main-factor count below `n` can carry `n`
///   factors at resolution `res`.
/// * `TooManyFactors` if the derived main-factor count exceeds
///   [`MAX_FACTORS`].
///
/// # Example
///
/// ```
/// use fracfact::fracfact_by_res;
///
/// let design = fracfact_by_res(6, 3).unwrap();
/// assert_eq!(design.runs(), 8);
/// assert_eq!(design.n_columns(), 6);
/// assert_eq!(design.spec().to_string(), "a b c ab ac bc");
///
/// assert!(fracfact_by_res(5, 5).is_err());
/// ```
pub fn fracfact_by_res(n: usize, res: usize) -> Result<Design> {
    if n == 0 {
        return Err(Error::invalid_specification(
            "a design needs at least one factor",
        ));
    }
    if res < 3 {
        return Err(Error::invalid_specification(
            "resolution must be at least 3 (lower resolutions alias main factors with each other)",
        ));
    }

    // Smallest k with enough order >= res-1 interactions to host the
    // n - k non-main factors. A full factorial (k = n) is never
    // considered; the caller asked for a fraction.
    let k = ((res - 1)..n)
        .find(|&k| n_factors_at_res(k, res) >= n as u64)
        .ok_or_else(|| {
            Error::design_not_possible(format!(
                "no main-factor count below {n} supports {n} factors at resolution {res}"
            ))
        })?;

    if k > MAX_FACTORS {
        return Err(Error::TooManyFactors {
            required: k,
            max: MAX_FACTORS,
        });
    }

    let mut terms: Vec<Term> = (0..k).map(Term::main).collect();
    'fill: for order in (res - 1)..k {
        for combo in combinations(k, order) {
            if terms.len() == n {
                break 'fill;
            }
            terms.push(Term::interaction(combo, false)?);
        }
    }

    Design::from_spec(&GeneratorSpec::new(terms)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_by_res_6_3_literal() {
        let design = fracfact_by_res(6, 3).unwrap();
        let expected = array![
            [-1.0, -1.0, -1.0, 1.0, 1.0, 1.0],
            [1.0, -1.0, -1.0, -1.0, -1.0, 1.0],
            [-1.0, 1.0, -1.0, -1.0, 1.0, -1.0],
            [1.0, 1.0, -1.0, 1.0, -1.0, -1.0],
            [-1.0, -1.0, 1.0, 1.0, -1.0, -1.0],
            [1.0, -1.0, 1.0, -1.0, 1.0, -1.0],
            [-1.0, 1.0, 1.0, -1.0, -1.0, 1.0],
            [1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
        ];
        assert_eq!(design.data(), &expected);
        assert_eq!(design.resolution().unwrap(), Some(3));
    }

    #[test]
    fn test_by_res_not_possible() {
        let err = fracfact_by_res(5, 5).unwrap_err();
        assert!(matches!(err, Error::DesignNotPossible { .. }));

        assert!(fracfact_by_res(3, 4).is_err());
    }

    #[test]
    fn test_by_res_minimal_base() {
        // k = 3 carries only 3 + C(3,2) = 6 factors at resolution 3, so
        // 7 factors need k = 4 mains and 16 runs.
        let design = fracfact_by_res(7, 3).unwrap();
        assert_eq!(design.runs(), 16);
        assert_eq!(design.n_columns(), 7);
        assert_eq!(design.spec().n_main(), 4);

        let res = design.resolution().unwrap().unwrap();
        assert!(res >= 3);
    }

    #[test]
    fn test_by_res_resolution_iv() {
        let design = fracfact_by_res(8, 4).unwrap();
        assert_eq!(design.runs(), 16);
        assert_eq!(design.spec().to_string(), "a b c d abc abd acd bcd");
        assert_eq!(design.resolution().unwrap(), Some(4));
    }

    #[test]
    fn test_by_res_excludes_full_order_word() {
        // Interaction fill stops at order k-1, so 4 factors at resolution
        // IV would need the full word abc and is rejected.
        assert!(matches!(
            fracfact_by_res(4, 4),
            Err(Error::DesignNotPossible { .. })
        ));
    }

    #[test]
    fn test_by_res_fills_lowest_order_first() {
        let design = fracfact_by_res(8, 3).unwrap();
        // k = 4; after the mains, the order-2 interactions come first in
        // combinatorial order.
        assert_eq!(design.spec().to_string(), "a b c d ab ac ad bc");
    }

    #[test]
    fn test_by_res_invalid_inputs() {
        assert!(fracfact_by_res(0, 3).is_err());
        assert!(fracfact_by_res(6, 1).is_err());
        assert!(fracfact_by_res(6, 2).is_err());
    }
}

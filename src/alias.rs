//! Alias (confounding) structure analysis for realized designs.
//!
//! Two effects are aliased when their contrasts, the row-wise products of
//! the columns involved, are numerically identical: the design cannot tell
//! them apart. This module enumerates every non-empty combination of
//! columns, partitions the combinations into [`AliasClass`]es by contrast
//! equality, and condenses the result into a cost vector used as the
//! optimization objective by [`fracfact_opt`](crate::fracfact_opt).
//!
//! The enumeration is intentionally exhaustive (2^n - 1 combinations for n
//! columns) and is the dominant cost of analysis, hence the hard
//! [`MAX_FACTORS`] ceiling.
//!
//! # Example
//!
//! ```
//! use fracfact::{fracfact, fracfact_aliasing};
//!
//! let design = fracfact("a b ab").unwrap();
//! let analysis = fracfact_aliasing(&design).unwrap();
//! assert_eq!(analysis.readable()[0], "a = bc");
//! ```

use std::collections::HashMap;
use std::fmt;

use ndarray::Array2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::design::Design;
use crate::error::{Error, Result};
use crate::generator::word;
use crate::utils::combinations;
use crate::MAX_FACTORS;

/// Compute the contrast of a column combination: the row-wise product of
/// the selected columns, collapsed to a sign per row.
///
/// All entries are exactly -1.0 or +1.0, so the product is exact and the
/// sign representation loses nothing.
pub(crate) fn contrast(data: &Array2<f64>, combo: &[usize]) -> Vec<i8> {
    (0..data.nrows())
        .map(|row| {
            let mut v = 1.0;
            for &col in combo {
                v *= data[[row, col]];
            }
            if v > 0.0 { 1 } else { -1 }
        })
        .collect()
}

/// A set of column combinations whose contrasts are identical.
///
/// Each member is a sorted list of 0-based column indices; a singleton
/// member is a main effect, larger members are interactions. Members are
/// ordered by (size, lexicographic).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AliasClass {
    members: Vec<Vec<usize>>,
}

impl AliasClass {
    /// The member combinations, ordered by (size, lexicographic).
    #[must_use]
    pub fn members(&self) -> &[Vec<usize>] {
        &self.members
    }

    /// Whether this class records an actual confounding (two or more
    /// effects sharing a contrast).
    #[must_use]
    pub fn is_confounded(&self) -> bool {
        self.members.len() > 1
    }
}

impl fmt::Display for AliasClass {
    /// Renders the class as `a = bc = abd`, letters in ascending factor
    /// order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                write!(f, " = ")?;
            }
            write!(f, "{}", word(member))?;
        }
        Ok(())
    }
}

/// The full confounding structure of a design.
///
/// Produced by [`fracfact_aliasing`]; deterministic and idempotent (the
/// same matrix always yields the same classes and cost vector).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AliasAnalysis {
    classes: Vec<AliasClass>,
    cost_vector: Vec<u32>,
}

impl AliasAnalysis {
    /// Analyze a raw coded matrix.
    ///
    /// Enumerates all non-empty column combinations, groups them by exact
    /// contrast equality, and accumulates the alias cost vector.
    ///
    /// # Errors
    ///
    /// Returns `DesignTooLarge` if the matrix has more than
    /// [`MAX_FACTORS`] columns.
    pub fn from_matrix(data: &Array2<f64>) -> Result<Self> {
        let n_cols = data.ncols();
        if n_cols > MAX_FACTORS {
            return Err(Error::DesignTooLarge {
                factors: n_cols,
                max: MAX_FACTORS,
            });
        }

        // Group combinations by contrast. Enumeration runs by increasing
        // size, lexicographic within a size, so each class's members arrive
        // already in (size, lex) order.
        let mut groups: HashMap<Vec<i8>, usize> = HashMap::new();
        let mut classes: Vec<Vec<Vec<usize>>> = Vec::new();
        for size in 1..=n_cols {
            for combo in combinations(n_cols, size) {
                let key = contrast(data, &combo);
                match groups.get(&key) {
                    Some(&idx) => classes[idx].push(combo),
                    None => {
                        groups.insert(key, classes.len());
                        classes.push(vec![combo]);
                    }
                }
            }
        }

        // Order classes by their member-size profile, then lexicographic,
        // for reproducible output.
        classes.sort_by(|a, b| {
            let sizes_a: Vec<usize> = a.iter().map(Vec::len).collect();
            let sizes_b: Vec<usize> = b.iter().map(Vec::len).collect();
            sizes_a.cmp(&sizes_b).then_with(|| a.cmp(b))
        });

        // Every unordered pair of member sizes within a class is one
        // collision, tallied in an upper-triangular order x order matrix.
        let mut matrix = vec![vec![0u32; n_cols]; n_cols];
        for class in &classes {
            let sizes: Vec<usize> = class.iter().map(Vec::len).collect();
            for pair in combinations(sizes.len(), 2) {
                let (i, j) = (sizes[pair[0]], sizes[pair[1]]);
                debug_assert!(i <= j);
                matrix[i - 1][j - 1] += 1;
            }
        }

        let cost_vector = alias_vector_indices(n_cols)?
            .into_iter()
            .map(|(row, col)| matrix[row][col])
            .collect();

        Ok(Self {
            classes: classes
                .into_iter()
                .map(|members| AliasClass { members })
                .collect(),
            cost_vector,
        })
    }

    /// The alias classes, in canonical order.
    #[must_use]
    pub fn classes(&self) -> &[AliasClass] {
        &self.classes
    }

    /// The alias cost vector.
    ///
    /// One entry per unordered pair of interaction orders, flattened per
    /// [`alias_vector_indices`] so that lexicographic comparison weights
    /// low-order (serious) collisions first. Lower is better.
    #[must_use]
    pub fn cost_vector(&self) -> &[u32] {
        &self.cost_vector
    }

    /// Render the classes as human-readable strings, `a = bc = abd`.
    #[must_use]
    pub fn readable(&self) -> Vec<String> {
        self.classes.iter().map(ToString::to_string).collect()
    }
}

/// Compute the full confounding structure of a design.
///
/// Returns the partition of all column combinations into alias classes,
/// together with the cost vector summarizing collision counts by
/// interaction order. With no fractionation (all 2^k contrasts distinct)
/// every class is a singleton and the cost vector is all zeros.
///
/// # Errors
///
/// Returns `DesignTooLarge` above [`MAX_FACTORS`] columns.
pub fn fracfact_aliasing(design: &Design) -> Result<AliasAnalysis> {
    AliasAnalysis::from_matrix(design.data())
}

/// Canonical cell ordering for the flattened alias cost vector.
///
/// Returns the (row, col) pairs of the conceptual upper-triangular
/// order x order cost matrix, ordered by `max(pair)` ascending (stable on
/// ties) so that collisions involving only low orders sort first. The
/// length is C(n_factors + 1, 2).
///
/// This ordering is what makes lexicographic comparison of cost vectors
/// prioritize main-effect collisions over high-order interaction
/// collisions; the optimal-aliasing search depends on it.
///
/// # Errors
///
/// Returns `DesignTooLarge` above [`MAX_FACTORS`] factors.
///
/// # Example
///
/// ```
/// use fracfact::alias_vector_indices;
///
/// let pairs = alias_vector_indices(3).unwrap();
/// assert_eq!(pairs, vec![(0, 0), (0, 1), (1, 1), (0, 2), (1, 2), (2, 2)]);
/// ```
pub fn alias_vector_indices(n_factors: usize) -> Result<Vec<(usize, usize)>> {
    if n_factors > MAX_FACTORS {
        return Err(Error::DesignTooLarge {
            factors: n_factors,
            max: MAX_FACTORS,
        });
    }

    // Combinations-with-repetition of 0..n taken 2 at a time, stably
    // sorted by the pair maximum.
    let mut pairs = Vec::with_capacity(n_factors * (n_factors + 1) / 2);
    for max in 0..n_factors {
        for min in 0..=max {
            pairs.push((min, max));
        }
    }
    Ok(pairs)
}

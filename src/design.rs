//! Two-level design matrices and their realization from generators.
//!
//! The central type is [`Design`]: a dense `Array2<f64>` of coded levels in
//! {-1.0, +1.0} together with the [`GeneratorSpec`] that produced it. Main
//! factor columns carry the base full factorial; interaction columns are the
//! row-wise products of their constituent main-factor columns, times the
//! term sign.
//!
//! # Example
//!
//! ```
//! use fracfact::fracfact;
//!
//! let design = fracfact("a b ab").unwrap();
//! assert_eq!(design.runs(), 4);
//! assert_eq!(design.n_columns(), 3);
//! assert_eq!(design.get(0, 2), 1.0); // (-1) * (-1)
//! ```

use std::fmt;

use ndarray::Array2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::alias::contrast;
use crate::error::{Error, Result};
use crate::generator::GeneratorSpec;
use crate::utils::combinations;
use crate::MAX_FACTORS;

/// Create a two-level full-factorial design with `n` factors.
///
/// Returns a 2^n x n matrix of coded levels -1.0 and +1.0, with the first
/// factor varying fastest.
///
/// # Errors
///
/// Returns `InvalidSpecification` for `n = 0` and `DesignTooLarge` above
/// [`MAX_FACTORS`] (the row count doubles per factor).
///
/// # Example
///
/// ```
/// use fracfact::ff2n;
///
/// let h = ff2n(2).unwrap();
/// assert_eq!(h.nrows(), 4);
/// assert_eq!(h.row(1).to_vec(), vec![1.0, -1.0]);
/// ```
pub fn ff2n(n: usize) -> Result<Array2<f64>> {
    if n == 0 {
        return Err(Error::invalid_specification(
            "a factorial design needs at least one factor",
        ));
    }
    if n > MAX_FACTORS {
        return Err(Error::DesignTooLarge {
            factors: n,
            max: MAX_FACTORS,
        });
    }

    let runs = 1usize << n;
    Ok(Array2::from_shape_fn((runs, n), |(row, col)| {
        if (row >> col) & 1 == 1 { 1.0 } else { -1.0 }
    }))
}

/// Create a two-level fractional-factorial design from a generator string.
///
/// This parses `gen` (see [`GeneratorSpec`]) and realizes the matrix, with
/// 2^k rows for k main factors and one column per term, in term order.
///
/// # Errors
///
/// Returns `InvalidSpecification` for malformed generators and
/// `DesignTooLarge` above [`MAX_FACTORS`] main factors.
///
/// # Example
///
/// ```
/// use fracfact::fracfact;
///
/// let design = fracfact("a b -ab").unwrap();
/// assert_eq!(design.row(0), vec![-1.0, -1.0, -1.0]);
/// assert_eq!(design.row(1), vec![1.0, -1.0, 1.0]);
/// ```
pub fn fracfact(gen: &str) -> Result<Design> {
    Design::from_spec(&gen.parse()?)
}

/// Fold a two-level design to reduce confounding.
///
/// The selected columns (all of them when `columns` is `None`) are
/// level-swapped and the mirrored matrix is stacked below the original,
/// doubling the run count. Folding over every column of a resolution-III
/// design de-aliases main effects from two-factor interactions.
///
/// # Errors
///
/// Returns `InvalidSpecification` if a folded column does not have exactly
/// two distinct values, and `IndexOutOfBounds` for bad column indices.
pub fn fold(design: &Array2<f64>, columns: Option<&[usize]>) -> Result<Array2<f64>> {
    let (rows, cols) = design.dim();
    let all: Vec<usize> = (0..cols).collect();
    let columns = columns.unwrap_or(&all);

    let mut folded = design.clone();
    for &col in columns {
        if col >= cols {
            return Err(Error::IndexOutOfBounds {
                index: col,
                size: cols,
            });
        }

        let mut values: Vec<f64> = design.column(col).to_vec();
        values.sort_by(f64::total_cmp);
        values.dedup();
        let (low, high) = match values.as_slice() {
            &[low, high] => (low, high),
            _ => {
                return Err(Error::invalid_specification(format!(
                    "column {col} is not a two-level factor"
                )))
            }
        };

        for row in 0..rows {
            let v = folded[[row, col]];
            folded[[row, col]] = if v == low { high } else { low };
        }
    }

    let mut stacked = Array2::zeros((2 * rows, cols));
    for row in 0..rows {
        for col in 0..cols {
            stacked[[row, col]] = design[[row, col]];
            stacked[[rows + row, col]] = folded[[row, col]];
        }
    }
    Ok(stacked)
}

/// A realized two-level fractional-factorial design.
///
/// Pairs the coded matrix with the generator specification that produced
/// it. All entries are -1.0 or +1.0; rows = 2^n_main, columns = term count.
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Design {
    /// The coded matrix, shape (runs, columns).
    data: Array2<f64>,
    /// The generator that produced the matrix.
    spec: GeneratorSpec,
}

impl Design {
    /// Realize the design matrix for a generator specification.
    ///
    /// # Errors
    ///
    /// Returns `DesignTooLarge` if the specification has more than
    /// [`MAX_FACTORS`] main factors.
    pub fn from_spec(spec: &GeneratorSpec) -> Result<Self> {
        let base = ff2n(spec.n_main())?;
        let runs = base.nrows();

        let mut data = Array2::zeros((runs, spec.n_columns()));
        for (col, term) in spec.terms().iter().enumerate() {
            for row in 0..runs {
                let mut v = term.sign();
                for &f in term.factors() {
                    v *= base[[row, f]];
                }
                data[[row, col]] = v;
            }
        }

        Ok(Self {
            data,
            spec: spec.clone(),
        })
    }

    /// Create a design from an existing matrix, validating it against the
    /// specification.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the shape is not
    /// (2^n_main, n_columns), and `InvalidSpecification` if any entry is
    /// not -1.0 or +1.0.
    pub fn try_new(data: Array2<f64>, spec: GeneratorSpec) -> Result<Self> {
        let runs = 1usize << spec.n_main();
        if data.nrows() != runs {
            return Err(Error::DimensionMismatch {
                expected: format!("{runs} rows"),
                actual: format!("{} rows", data.nrows()),
            });
        }
        if data.ncols() != spec.n_columns() {
            return Err(Error::DimensionMismatch {
                expected: format!("{} columns", spec.n_columns()),
                actual: format!("{} columns", data.ncols()),
            });
        }
        if data.iter().any(|&v| v != 1.0 && v != -1.0) {
            return Err(Error::invalid_specification(
                "design entries must be coded -1 or +1",
            ));
        }

        Ok(Self { data, spec })
    }

    /// Get the number of runs (rows).
    #[must_use]
    pub fn runs(&self) -> usize {
        self.data.nrows()
    }

    /// Get the number of columns (terms).
    #[must_use]
    pub fn n_columns(&self) -> usize {
        self.data.ncols()
    }

    /// Get the generator specification.
    #[must_use]
    pub fn spec(&self) -> &GeneratorSpec {
        &self.spec
    }

    /// Get a reference to the coded matrix.
    #[must_use]
    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    /// Consume the design and return the coded matrix.
    #[must_use]
    pub fn into_data(self) -> Array2<f64> {
        self.data
    }

    /// Get the value at a specific position.
    ///
    /// # Panics
    ///
    /// Panics if the indices are out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[[row, col]]
    }

    /// Get a row of the design as a vector.
    ///
    /// # Panics
    ///
    /// Panics if the row index is out of bounds.
    #[must_use]
    pub fn row(&self, idx: usize) -> Vec<f64> {
        self.data.row(idx).to_vec()
    }

    /// Compute the resolution of the design.
    ///
    /// The resolution is the length of the shortest word in the defining
    /// relation: the smallest set of columns whose row-wise product is
    /// constant. Returns `None` for an unconfounded design (no defining
    /// word exists, e.g. a plain full factorial).
    ///
    /// # Errors
    ///
    /// Returns `DesignTooLarge` above [`MAX_FACTORS`] columns.
    pub fn resolution(&self) -> Result<Option<usize>> {
        let n = self.n_columns();
        if n > MAX_FACTORS {
            return Err(Error::DesignTooLarge {
                factors: n,
                max: MAX_FACTORS,
            });
        }

        for size in 1..=n {
            for combo in combinations(n, size) {
                let c = contrast(&self.data, &combo);
                if c.iter().all(|&v| v == c[0]) {
                    return Ok(Some(size));
                }
            }
        }
        Ok(None)
    }
}

impl fmt::Debug for Design {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Design(\"{}\") with data {:?}", self.spec, self.data)
    }
}

impl fmt::Display for Design {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.spec)?;
        for row in self.data.rows() {
            let row_str: Vec<String> = row.iter().map(|&v| format!("{:>2}", v as i64)).collect();
            writeln!(f, "  {}", row_str.join(" "))?;
        }
        Ok(())
    }
}

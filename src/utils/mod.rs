//! Combinatorial utilities used throughout the library.
//!
//! Fractional-factorial construction and alias analysis are driven by
//! enumeration of index combinations; this module provides the binomial
//! coefficient and a lexicographic combination iterator they share.

/// Compute binomial coefficient C(n, k) = n! / (k! * (n-k)!)
///
/// Returns `None` if the result would overflow `u64`.
///
/// # Examples
///
/// ```
/// use fracfact::utils::binomial;
///
/// assert_eq!(binomial(5, 2), Some(10));
/// assert_eq!(binomial(10, 5), Some(252));
/// assert_eq!(binomial(5, 0), Some(1));
/// assert_eq!(binomial(5, 5), Some(1));
/// assert_eq!(binomial(3, 5), Some(0)); // k > n
/// ```
#[must_use]
pub fn binomial(n: u64, k: u64) -> Option<u64> {
    if k > n {
        return Some(0);
    }

    // Use symmetry: C(n, k) = C(n, n-k)
    let k = k.min(n - k);

    if k == 0 {
        return Some(1);
    }

    let mut result: u64 = 1;
    for i in 0..k {
        // Multiply before dividing keeps the intermediate an exact integer.
        result = result.checked_mul(n - i)?;
        result /= i + 1;
    }

    Some(result)
}

/// Generate all k-combinations of indices 0..n in lexicographic order.
///
/// The enumeration order is load-bearing for the alias search: candidate
/// generators are visited in the order this iterator yields them, and the
/// first candidate achieving the best cost vector wins ties.
///
/// # Examples
///
/// ```
/// use fracfact::utils::combinations;
///
/// let combos: Vec<Vec<usize>> = combinations(4, 2).collect();
/// assert_eq!(combos.len(), 6); // C(4,2) = 6
/// assert_eq!(combos[0], vec![0, 1]);
/// assert_eq!(combos[5], vec![2, 3]);
/// ```
pub fn combinations(n: usize, k: usize) -> impl Iterator<Item = Vec<usize>> {
    CombinationIter::new(n, k)
}

/// Iterator over k-combinations of 0..n.
struct CombinationIter {
    n: usize,
    k: usize,
    indices: Vec<usize>,
    finished: bool,
}

impl CombinationIter {
    fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            k,
            indices: if k > n { Vec::new() } else { (0..k).collect() },
            finished: k > n,
        }
    }
}

impl Iterator for CombinationIter {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if self.k == 0 {
            self.finished = true;
            return Some(Vec::new());
        }

        let result = self.indices.clone();

        // Advance the rightmost index that still has room, then reset the
        // tail to the smallest values above it.
        let mut i = self.k;
        while i > 0 {
            i -= 1;
            if self.indices[i] < self.n - self.k + i {
                self.indices[i] += 1;
                for j in (i + 1)..self.k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                return Some(result);
            }
        }

        self.finished = true;
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            (0, Some(0))
        } else {
            let count =
                binomial(self.n as u64, self.k as u64).unwrap_or(usize::MAX as u64) as usize;
            (0, Some(count))
        }
    }
}

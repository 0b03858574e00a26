//! Generator specifications for two-level fractional-factorial designs.
//!
//! A generator is an ordered sequence of terms, each naming either a main
//! factor (a single letter) or an interaction (a product of main factors),
//! optionally sign-flipped. The textual form is a whitespace-separated
//! string where each term matches `[+-]?[A-Za-z]+`:
//!
//! ```text
//! a b c abc      the 2^3 full factorial plus the column a*b*c
//! a b -ab        third column is the negated product of the first two
//! ```
//!
//! Letters are case-insensitive and mapped to dense 0-based factor indices
//! by first-occurrence order among the single-letter terms; letter rendering
//! happens only at the formatting boundary.
//!
//! # Example
//!
//! ```
//! use fracfact::GeneratorSpec;
//!
//! let spec: GeneratorSpec = "a b c ab".parse().unwrap();
//! assert_eq!(spec.n_main(), 3);
//! assert_eq!(spec.n_columns(), 4);
//! assert_eq!(spec.to_string(), "a b c ab");
//! ```

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Render a set of factor indices as a lowercase word, e.g. `[0, 2]` -> "ac".
pub(crate) fn word(factors: &[usize]) -> String {
    factors
        .iter()
        .map(|&f| char::from(b'a' + u8::try_from(f).expect("factor index fits the alphabet")))
        .collect()
}

/// One term of a generator specification: a main factor or an interaction,
/// with an optional sign flip.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Term {
    /// Constituent factor indices, ascending and distinct.
    factors: Vec<usize>,
    /// Whether the realized column is negated.
    negated: bool,
}

impl Term {
    /// Create a main-factor term for the given factor index.
    #[must_use]
    pub fn main(factor: usize) -> Self {
        Self {
            factors: vec![factor],
            negated: false,
        }
    }

    /// Create an interaction term from two or more factor indices.
    ///
    /// Indices are sorted and deduplicated; a term is a set of factors.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSpecification` if fewer than two distinct factors
    /// remain after deduplication.
    pub fn interaction(mut factors: Vec<usize>, negated: bool) -> Result<Self> {
        factors.sort_unstable();
        factors.dedup();
        if factors.len() < 2 {
            return Err(Error::invalid_specification(
                "an interaction term needs at least two distinct factors",
            ));
        }
        Ok(Self { factors, negated })
    }

    /// The constituent factor indices, ascending.
    #[must_use]
    pub fn factors(&self) -> &[usize] {
        &self.factors
    }

    /// The interaction order (1 for a main factor).
    #[must_use]
    pub fn order(&self) -> usize {
        self.factors.len()
    }

    /// Whether this term names a single main factor.
    #[must_use]
    pub fn is_main(&self) -> bool {
        self.factors.len() == 1
    }

    /// Whether the realized column is sign-flipped.
    #[must_use]
    pub fn negated(&self) -> bool {
        self.negated
    }

    /// The sign multiplier applied to the realized column.
    #[must_use]
    pub fn sign(&self) -> f64 {
        if self.negated { -1.0 } else { 1.0 }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "-")?;
        }
        write!(f, "{}", word(&self.factors))
    }
}

/// An ordered sequence of terms defining a fractional-factorial design.
///
/// Invariants, enforced on construction:
///
/// - at least one main-factor term, at most [`MAX_FACTORS`](crate::MAX_FACTORS);
/// - each main factor is declared exactly once, and the main indices are
///   dense (0..n_main);
/// - every interaction references only declared main factors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeneratorSpec {
    terms: Vec<Term>,
    n_main: usize,
}

impl GeneratorSpec {
    /// Create a specification from an ordered list of terms.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSpecification` if the term list violates any of the
    /// invariants listed on [`GeneratorSpec`], and `DesignTooLarge` beyond
    /// the factor ceiling.
    pub fn new(terms: Vec<Term>) -> Result<Self> {
        let mut mains: Vec<usize> = Vec::new();
        for term in &terms {
            if term.is_main() {
                let f = term.factors[0];
                if mains.contains(&f) {
                    return Err(Error::invalid_specification(format!(
                        "main factor '{}' is declared more than once",
                        word(&[f])
                    )));
                }
                mains.push(f);
            }
        }

        if mains.is_empty() {
            return Err(Error::invalid_specification(
                "a specification needs at least one main factor",
            ));
        }

        let n_main = mains.len();
        if n_main > crate::MAX_FACTORS {
            return Err(Error::DesignTooLarge {
                factors: n_main,
                max: crate::MAX_FACTORS,
            });
        }
        mains.sort_unstable();
        if mains != (0..n_main).collect::<Vec<_>>() {
            return Err(Error::invalid_specification(format!(
                "main factor indices must be dense 0..{n_main}"
            )));
        }

        for term in &terms {
            for &f in term.factors() {
                if f >= n_main {
                    return Err(Error::invalid_specification(format!(
                        "term '{}' references factor '{}', which is not declared \
                         as a main factor",
                        word(term.factors()),
                        word(&[f])
                    )));
                }
            }
        }

        Ok(Self { terms, n_main })
    }

    /// The terms, in column order.
    #[must_use]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Number of main factors (the base full factorial has 2^n_main runs).
    #[must_use]
    pub fn n_main(&self) -> usize {
        self.n_main
    }

    /// Number of columns the realized design will have.
    #[must_use]
    pub fn n_columns(&self) -> usize {
        self.terms.len()
    }
}

impl FromStr for GeneratorSpec {
    type Err = Error;

    /// Parse the textual generator form.
    ///
    /// Terms are split on whitespace; a leading `+` or `-` sets the sign
    /// (default `+`); the remaining letters name the constituent factors,
    /// case-insensitively.
    fn from_str(gen: &str) -> Result<Self> {
        // First pass: assign dense indices to single-letter terms in
        // first-occurrence order.
        let mut letters: Vec<char> = Vec::new();
        let mut tokens: Vec<(bool, Vec<char>)> = Vec::new();

        for token in gen.split_whitespace() {
            let (negated, body) = match token.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, token.strip_prefix('+').unwrap_or(token)),
            };

            if body.is_empty() || !body.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(Error::invalid_specification(format!(
                    "term '{token}' does not match [+-]?[A-Za-z]+"
                )));
            }

            let chars: Vec<char> = body.chars().map(|c| c.to_ascii_lowercase()).collect();
            if chars.len() == 1 {
                if letters.contains(&chars[0]) {
                    return Err(Error::invalid_specification(format!(
                        "main factor '{}' is declared more than once",
                        chars[0]
                    )));
                }
                letters.push(chars[0]);
            }
            tokens.push((negated, chars));
        }

        // Second pass: map letters to indices and build the terms.
        let lookup = |c: char| -> Result<usize> {
            letters.iter().position(|&l| l == c).ok_or_else(|| {
                Error::invalid_specification(format!(
                    "letter '{c}' is never declared as a single-letter main factor"
                ))
            })
        };

        let mut terms = Vec::with_capacity(tokens.len());
        for (negated, chars) in tokens {
            if chars.len() == 1 {
                let mut term = Term::main(lookup(chars[0])?);
                term.negated = negated;
                terms.push(term);
            } else {
                let factors = chars.iter().map(|&c| lookup(c)).collect::<Result<Vec<_>>>()?;
                terms.push(Term::interaction(factors, negated)?);
            }
        }

        Self::new(terms)
    }
}

impl fmt::Display for GeneratorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let spec: GeneratorSpec = "a b ab".parse().unwrap();
        assert_eq!(spec.n_main(), 2);
        assert_eq!(spec.n_columns(), 3);
        assert!(spec.terms()[0].is_main());
        assert!(spec.terms()[1].is_main());
        assert_eq!(spec.terms()[2].factors(), &[0, 1]);
        assert!(!spec.terms()[2].negated());
    }

    #[test]
    fn test_parse_case_insensitive() {
        let lower: GeneratorSpec = "a b ab".parse().unwrap();
        let upper: GeneratorSpec = "A B AB".parse().unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_parse_signs() {
        let spec: GeneratorSpec = "a b -ab c +abc".parse().unwrap();
        assert_eq!(spec.n_main(), 3);
        assert_eq!(spec.n_columns(), 5);
        assert!(spec.terms()[2].negated());
        assert!(!spec.terms()[4].negated());
        assert_eq!(spec.terms()[4].factors(), &[0, 1, 2]);
    }

    #[test]
    fn test_parse_first_occurrence_indexing() {
        // 'c' is the second declared main factor, so it maps to index 1.
        let spec: GeneratorSpec = "a c ac".parse().unwrap();
        assert_eq!(spec.n_main(), 2);
        assert_eq!(spec.terms()[1].factors(), &[1]);
        assert_eq!(spec.terms()[2].factors(), &[0, 1]);
    }

    #[test]
    fn test_parse_undeclared_letter() {
        let err = "a b ax".parse::<GeneratorSpec>().unwrap_err();
        assert!(matches!(err, Error::InvalidSpecification { .. }));
        assert!(err.to_string().contains("'x'"));
    }

    #[test]
    fn test_parse_no_main_factor() {
        assert!("ab".parse::<GeneratorSpec>().is_err());
        assert!("".parse::<GeneratorSpec>().is_err());
    }

    #[test]
    fn test_parse_duplicate_main() {
        assert!("a a b".parse::<GeneratorSpec>().is_err());
        // Same letter in different case is still the same factor.
        assert!("a A b".parse::<GeneratorSpec>().is_err());
    }

    #[test]
    fn test_parse_malformed_token() {
        assert!("a b a+b".parse::<GeneratorSpec>().is_err());
        assert!("a b --ab".parse::<GeneratorSpec>().is_err());
        assert!("a b a1".parse::<GeneratorSpec>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for gen in ["a b ab", "a b -ab c abc", "a b c d abcd"] {
            let spec: GeneratorSpec = gen.parse().unwrap();
            assert_eq!(spec.to_string(), gen);
            let again: GeneratorSpec = spec.to_string().parse().unwrap();
            assert_eq!(spec, again);
        }
        // '+' and case are normalized away.
        let spec: GeneratorSpec = "A b +aB".parse().unwrap();
        assert_eq!(spec.to_string(), "a b ab");
    }

    #[test]
    fn test_programmatic_construction() {
        let terms = vec![
            Term::main(0),
            Term::main(1),
            Term::interaction(vec![1, 0], true).unwrap(),
        ];
        let spec = GeneratorSpec::new(terms).unwrap();
        assert_eq!(spec.to_string(), "a b -ab");

        // Interaction factors are kept as a sorted set.
        let term = Term::interaction(vec![2, 0, 2], false).unwrap();
        assert_eq!(term.factors(), &[0, 2]);
        assert!(Term::interaction(vec![1, 1], false).is_err());
    }

    #[test]
    fn test_sparse_main_indices_rejected() {
        let terms = vec![Term::main(0), Term::main(2)];
        assert!(GeneratorSpec::new(terms).is_err());
    }

    #[test]
    fn test_factor_ceiling() {
        let terms: Vec<Term> = (0..=crate::MAX_FACTORS).map(Term::main).collect();
        assert!(matches!(
            GeneratorSpec::new(terms),
            Err(Error::DesignTooLarge { .. })
        ));
    }
}

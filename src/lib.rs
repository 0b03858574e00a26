//! # fracfact
//!
//! Two-level fractional-factorial experiment designs with full alias
//! (confounding) analysis, resolution-constrained construction, and
//! optimal-aliasing search.
//!
//! ## Overview
//!
//! A 2^k full factorial runs every combination of k two-level factors. A
//! fractional factorial 2^(k-p) design trades runs for confounding: p of
//! the factors are expressed as interactions of the others, so some
//! effects become statistically indistinguishable (aliased). This library
//! lets you:
//!
//! - realize a design from a symbolic generator (`fracfact`)
//! - inspect exactly which effects a design confounds (`fracfact_aliasing`)
//! - construct the minimal-run design at a requested resolution
//!   (`fracfact_by_res`)
//! - search for the generator that minimizes aliasing severity
//!   (`fracfact_opt`)
//!
//! ## Quick Start
//!
//! ```rust
//! use fracfact::{fracfact, fracfact_aliasing};
//!
//! // Two main factors plus their product as a third column.
//! let design = fracfact("a b ab").unwrap();
//! assert_eq!(design.runs(), 4);
//! assert_eq!(design.row(0), vec![-1.0, -1.0, 1.0]);
//!
//! // Every main effect is aliased with a two-factor interaction.
//! let analysis = fracfact_aliasing(&design).unwrap();
//! assert_eq!(analysis.readable()[0], "a = bc");
//! ```
//!
//! Or let the library pick the least-confounded generator:
//!
//! ```rust
//! use fracfact::fracfact_opt;
//!
//! // 2^(4-1): erase one of four factors, minimizing aliasing.
//! let best = fracfact_opt(4, 1, 0).unwrap();
//! assert_eq!(best.generator(), "a b c abc");
//! assert!(best.is_exhaustive());
//! ```
//!
//! ## Generator notation
//!
//! A generator is a whitespace-separated list of terms: single letters are
//! main factors, multi-letter terms are products of main factors, and a
//! leading `-` negates the realized column. `"a b c ab"` is the 2^3
//! factorial with a fourth column equal to the product of the first two.
//!
//! ## Coding
//!
//! Design matrices are dense `ndarray::Array2<f64>` grids with entries
//! coded -1.0 and +1.0, one row per run, one column per term in generator
//! order.
//!
//! ## Features
//!
//! - `serde`: Enable serialization/deserialization of designs and analyses
//! - `parallel`: Enable parallel optimal-aliasing search using rayon
//! - `python`: Enable Python bindings via PyO3

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod alias;
pub mod design;
pub mod error;
pub mod generator;
pub mod optimize;
#[cfg(feature = "python")]
pub mod python;
pub mod resolution;
pub mod utils;

#[cfg(feature = "parallel")]
pub mod parallel;

/// Hard ceiling on factors/columns.
///
/// Alias analysis enumerates 2^n column combinations and realization
/// allocates 2^k rows; beyond 20 both are combinatorially infeasible, and
/// labels are drawn from a 26-letter alphabet in any case.
pub const MAX_FACTORS: usize = 20;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::alias::{alias_vector_indices, fracfact_aliasing, AliasAnalysis, AliasClass};
    pub use crate::design::{ff2n, fold, fracfact, Design};
    pub use crate::error::{Error, Result};
    pub use crate::generator::{GeneratorSpec, Term};
    pub use crate::optimize::{fracfact_opt, OptimalDesign};
    pub use crate::resolution::fracfact_by_res;
    pub use crate::MAX_FACTORS;

    #[cfg(feature = "parallel")]
    pub use crate::parallel::par_fracfact_opt;
}

// Re-export commonly used items at crate root
pub use alias::{alias_vector_indices, fracfact_aliasing, AliasAnalysis, AliasClass};
pub use design::{ff2n, fold, fracfact, Design};
pub use error::{Error, Result};
pub use generator::{GeneratorSpec, Term};
pub use optimize::{fracfact_opt, OptimalDesign};
pub use resolution::fracfact_by_res;

#[cfg(feature = "parallel")]
pub use parallel::par_fracfact_opt;

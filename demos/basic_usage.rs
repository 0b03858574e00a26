//! Basic usage example for the fracfact library.
//!
//! This example demonstrates realizing a fractional-factorial design,
//! inspecting its confounding structure, and searching for an optimal
//! generator.

use fracfact::{fracfact, fracfact_aliasing, fracfact_by_res, fracfact_opt};

fn main() {
    println!("Fracfact Library - Basic Usage Example\n");

    // Realize a 2^(3-1) style design: the third column is the product ab.
    println!("Realizing design for generator \"a b ab\"...");
    let design = fracfact("a b ab").expect("Failed to realize design");

    println!("Design:");
    println!("  Runs: {}", design.runs());
    println!("  Columns: {}", design.n_columns());
    println!();
    println!("{}", design);

    // Show what the fractionation confounds.
    println!("Alias structure:");
    let analysis = fracfact_aliasing(&design).expect("Analysis failed");
    for class in analysis.readable() {
        println!("  {}", class);
    }
    println!("  Cost vector: {:?}", analysis.cost_vector());
    println!();

    // Minimal-run design for 6 factors at resolution III.
    println!("Constructing 6 factors at resolution III...");
    let design = fracfact_by_res(6, 3).expect("Failed to construct design");
    println!("  Generator: {}", design.spec());
    println!("  Runs: {}", design.runs());
    match design.resolution().expect("Resolution check failed") {
        Some(res) => println!("  Resolution: {}", res),
        None => println!("  Resolution: unconfounded"),
    }
    println!();

    // Search for the least-confounded 2^(5-1) design.
    println!("Searching optimal generator for 5 factors, 1 erased...");
    let best = fracfact_opt(5, 1, 0).expect("Search failed");
    println!("  Best generator: {}", best.generator());
    println!("  Candidates evaluated: {}", best.attempts());
    println!("  Exhaustive: {}", best.is_exhaustive());
    println!("  Cost vector: {:?}", best.cost_vector());
}

//! Exact TSP Solver Library
//!
//! An exhaustive / branch-and-bound solver for the small-instance symmetric
//! Traveling Salesman Problem: given a square matrix of pairwise city
//! distances and a start city, find a minimum-cost closed tour visiting
//! every city exactly once. Instances are limited to 26 cities so each city
//! can be rendered as a letter A-Z.
//!
//! # Features
//!
//! - Depth-first exhaustive enumeration with deterministic candidate order
//! - Optional branch-and-bound pruning on partial tour distances
//! - Whitespace-delimited text format for distance matrices
//! - Seeded random instance generation
//! - Pruning-effect benchmarking with CSV export
//!
//! # Example
//!
//! ```no_run
//! use tsp_exact_solver::matrix::DistanceMatrix;
//! use tsp_exact_solver::solver::{ExactSolver, SolverConfig};
//!
//! // Load instance
//! let matrix = DistanceMatrix::from_file("instance.txt").unwrap();
//!
//! // Solve with pruning enabled
//! let config = SolverConfig { start: 0, prune: true, ..Default::default() };
//! let report = ExactSolver::new(&matrix, config).solve();
//!
//! println!("Best tour: {}", report.best);
//! println!("Fully explored tours: {}", report.explored);
//! ```

pub mod benchmark;
pub mod matrix;
pub mod solver;
pub mod tour;

pub use matrix::DistanceMatrix;
pub use solver::{ExactSolver, SolveReport, SolverConfig};
pub use tour::Tour;

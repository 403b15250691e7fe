//! Exhaustive depth-first solver with optional branch-and-bound pruning.
//!
//! The search extends a single working `Tour` in place, trying candidate
//! cities in increasing index order, and backtracks after each attempt.
//! A tentative extension is abandoned if the appended city already occurs
//! earlier in the tour, or (with pruning enabled) if the partial distance
//! already reaches the best complete tour found so far. The bound is
//! admissible because edge weights are non-negative: extending a partial
//! tour can never decrease its accumulated distance, so pruning changes the
//! amount of work, never the returned optimum.

use serde::{Deserialize, Serialize};

use crate::matrix::DistanceMatrix;
use crate::tour::Tour;

/// Solver options: start city, pruning, and trace flags.
///
/// Trace flags only affect logging output, never the computed result.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// City the tour starts from and returns to
    pub start: usize,
    /// Enable the branch-and-bound cut on partial distances
    pub prune: bool,
    /// Log every partial path visited by the recursion
    pub trace_steps: bool,
    /// Log every completed closed tour
    pub trace_tours: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            start: 0,
            prune: false,
            trace_steps: false,
            trace_tours: false,
        }
    }
}

/// Result of a solve: the optimal closed tour and the number of candidate
/// tours that were fully closed during the search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveReport {
    /// Best closed tour found, `n + 1` cities with first == last == start
    pub best: Tour,
    /// Completed candidate tours examined; `(n-1)!` without pruning
    pub explored: u64,
}

/// Exhaustive solver over a read-only distance matrix.
pub struct ExactSolver<'a> {
    matrix: &'a DistanceMatrix,
    config: SolverConfig,
}

impl<'a> ExactSolver<'a> {
    /// Create a solver for the given instance.
    ///
    /// The caller must have validated the configuration: an instance of
    /// fewer than 2 cities or an out-of-range start city is a defect.
    pub fn new(matrix: &'a DistanceMatrix, config: SolverConfig) -> Self {
        assert!(matrix.size() >= 2);
        assert!(config.start < matrix.size());
        ExactSolver { matrix, config }
    }

    /// Run the full search and return the best tour with the explored count.
    pub fn solve(&self) -> SolveReport {
        let n = self.matrix.size();
        let mut working = Tour::with_capacity(n + 1);
        working.push(self.matrix, self.config.start);

        let mut best: Option<Tour> = None;
        let mut explored = 0u64;
        self.explore(&mut working, &mut best, &mut explored);

        // n >= 2 on a complete graph: at least one tour always closes
        let best = best.expect("search closed no tour");
        SolveReport { best, explored }
    }

    /// Recursive extension step: try every city in increasing index order.
    fn explore(&self, working: &mut Tour, best: &mut Option<Tour>, explored: &mut u64) {
        let n = self.matrix.size();
        if self.config.trace_steps {
            log::debug!("{}", working);
        }

        for city in 0..n {
            working.push(self.matrix, city);
            if self.accept(working, best.as_ref()) {
                if working.len() == n {
                    self.close_tour(working, best, explored);
                } else {
                    self.explore(working, best, explored);
                }
            }
            working.pop(self.matrix);
        }
    }

    /// Validity check for the tentative last city of the working tour.
    fn accept(&self, working: &Tour, best: Option<&Tour>) -> bool {
        if working.len() <= 1 {
            return true;
        }
        if working.last_is_repeat() {
            return false;
        }
        if self.config.prune {
            if let Some(best) = best {
                if working.total_distance() >= best.total_distance() {
                    return false;
                }
            }
        }
        true
    }

    /// All cities are placed: close the cycle back to the start, count it,
    /// keep it as the new best on strict improvement, then reopen.
    ///
    /// The closing append is exempt from the repetition check, and it is
    /// evaluative only: popping it restores the pre-closure working tour.
    fn close_tour(&self, working: &mut Tour, best: &mut Option<Tour>, explored: &mut u64) {
        working.push(self.matrix, self.config.start);
        *explored += 1;
        if self.config.trace_tours {
            log::info!("{}", working);
        }

        let improves = best
            .as_ref()
            .map_or(true, |b| working.total_distance() < b.total_distance());
        if improves {
            *best = Some(working.clone());
        }

        working.pop(self.matrix);
    }
}

/// `x!`, used to report the size of the unpruned search space.
pub fn factorial(x: u64) -> u64 {
    (1..=x).product()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scenario matrix: d(0,1)=1, d(0,2)=2, d(1,2)=3.
    fn triangle() -> DistanceMatrix {
        DistanceMatrix::from_text("3 0 1 2 1 0 3 2 3 0").unwrap()
    }

    /// 4-city matrix whose optimum from city 0 is 0-1-2-3-0 = 1+2+1+3 = 7.
    fn square() -> DistanceMatrix {
        DistanceMatrix::from_text("4  0 1 4 3  1 0 2 5  4 2 0 1  3 5 1 0").unwrap()
    }

    fn solve(matrix: &DistanceMatrix, start: usize, prune: bool) -> SolveReport {
        let config = SolverConfig {
            start,
            prune,
            ..Default::default()
        };
        ExactSolver::new(matrix, config).solve()
    }

    #[test]
    fn test_factorial() {
        assert_eq!(factorial(0), 1);
        assert_eq!(factorial(1), 1);
        assert_eq!(factorial(5), 120);
    }

    #[test]
    fn test_two_cities() {
        let matrix = DistanceMatrix::from_text("2 0 5 5 0").unwrap();
        for prune in [false, true] {
            let report = solve(&matrix, 0, prune);
            assert_eq!(report.best.cities(), &[0, 1, 0]);
            assert_eq!(report.best.total_distance(), 10);
            assert_eq!(report.explored, 1);
        }
    }

    #[test]
    fn test_triangle_optimum_and_count() {
        let report = solve(&triangle(), 0, false);
        assert_eq!(report.best.total_distance(), 6);
        assert_eq!(report.explored, 2);
    }

    #[test]
    fn test_equal_cost_tours_keep_first_in_canonical_order() {
        // Both 0-1-2-0 and 0-2-1-0 cost 6; candidate order explores city 1
        // before city 2, and equal cost never replaces the incumbent.
        for prune in [false, true] {
            let report = solve(&triangle(), 0, prune);
            assert_eq!(report.best.cities(), &[0, 1, 2, 0]);
            assert_eq!(report.best.total_distance(), 6);
        }
    }

    #[test]
    fn test_square_hand_computed_optimum() {
        let report = solve(&square(), 0, false);
        assert_eq!(report.best.total_distance(), 7);
        assert_eq!(report.best.cities(), &[0, 1, 2, 3, 0]);
        assert_eq!(report.explored, 6);

        let pruned = solve(&square(), 0, true);
        assert_eq!(pruned.best.total_distance(), 7);
        assert!(pruned.explored <= 6);
        assert!(pruned.explored >= 1);
    }

    #[test]
    fn test_unpruned_count_is_factorial_for_any_matrix() {
        for n in 2..8 {
            let matrix = DistanceMatrix::random(n, n as u64, 10);
            let report = solve(&matrix, 0, false);
            assert_eq!(report.explored, factorial(n as u64 - 1));
        }
    }

    #[test]
    fn test_pruning_never_changes_the_optimum() {
        for seed in 0..5 {
            for n in [5, 6, 7] {
                let matrix = DistanceMatrix::random(n, seed, 10);
                for start in [0, n - 1] {
                    let plain = solve(&matrix, start, false);
                    let pruned = solve(&matrix, start, true);
                    assert_eq!(
                        pruned.best.total_distance(),
                        plain.best.total_distance()
                    );
                    assert_eq!(pruned.best.cities(), plain.best.cities());
                    assert!(pruned.explored <= plain.explored);
                }
            }
        }
    }

    #[test]
    fn test_best_tour_is_a_closed_permutation() {
        let n = 7;
        let start = 2;
        let matrix = DistanceMatrix::random(n, 99, 10);
        let report = solve(&matrix, start, true);

        let cities = report.best.cities();
        assert_eq!(cities.len(), n + 1);
        assert_eq!(cities[0], start);
        assert_eq!(cities[n], start);

        let mut seen = vec![false; n];
        for &city in &cities[..n] {
            assert!(!seen[city]);
            seen[city] = true;
        }
        assert!(seen.iter().all(|&v| v));

        assert_eq!(
            report.best.recompute_distance(&matrix),
            report.best.total_distance()
        );
    }

    #[test]
    fn test_determinism() {
        let matrix = DistanceMatrix::random(6, 3, 10);
        for prune in [false, true] {
            let a = solve(&matrix, 1, prune);
            let b = solve(&matrix, 1, prune);
            assert_eq!(a.best.cities(), b.best.cities());
            assert_eq!(a.best.total_distance(), b.best.total_distance());
            assert_eq!(a.explored, b.explored);
        }
    }

    #[test]
    #[should_panic]
    fn test_start_out_of_range_is_fatal() {
        let matrix = triangle();
        let config = SolverConfig {
            start: 3,
            ..Default::default()
        };
        ExactSolver::new(&matrix, config);
    }
}

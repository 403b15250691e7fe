//! Benchmarking and experimentation module.
//!
//! Measures the effect of branch-and-bound pruning: for seeded random
//! instances of each size, every run is solved twice (pruning off, then on)
//! and the completed-tour counts and wall times are recorded. Both runs of a
//! pair must agree on the optimal distance.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::matrix::DistanceMatrix;
use crate::solver::{factorial, ExactSolver, SolverConfig};

/// Result of one solver run on one instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Instance size
    pub size: usize,
    /// Seed the instance was generated from
    pub seed: u64,
    /// Whether pruning was enabled
    pub pruning: bool,
    /// Optimal tour distance
    pub best_distance: u32,
    /// Completed candidate tours examined
    pub explored: u64,
    /// Size of the unpruned search space, `(size-1)!`
    pub total_tours: u64,
    /// Wall time in seconds
    pub time: f64,
}

/// Aggregated pruning statistics for one instance size
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizeStatistics {
    pub size: usize,
    pub num_runs: usize,
    /// `(size-1)!`
    pub total_tours: u64,
    /// Average completed-tour count with pruning enabled
    pub avg_pruned_explored: f64,
    /// Average fraction of the search space still fully explored with pruning
    pub avg_explored_fraction: f64,
    /// Average wall time without pruning
    pub avg_time_plain: f64,
    /// Average wall time with pruning
    pub avg_time_pruned: f64,
}

/// Benchmark configuration
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Instance sizes to generate
    pub sizes: Vec<usize>,
    /// Number of seeded instances per size
    pub runs: usize,
    /// Maximum random edge distance
    pub max_distance: u32,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        BenchmarkConfig {
            sizes: vec![5, 6, 7, 8, 9],
            runs: 5,
            max_distance: 10,
        }
    }
}

/// Benchmarking engine
pub struct Benchmark {
    config: BenchmarkConfig,
    results: Vec<RunResult>,
}

impl Benchmark {
    pub fn new(config: BenchmarkConfig) -> Self {
        Benchmark {
            config,
            results: Vec::new(),
        }
    }

    /// Solve one instance with and without pruning and record both runs.
    pub fn run_instance(&mut self, size: usize, seed: u64) {
        let matrix = DistanceMatrix::random(size, seed, self.config.max_distance);
        let total_tours = factorial(size as u64 - 1);

        let mut distances = Vec::with_capacity(2);
        for pruning in [false, true] {
            let config = SolverConfig {
                start: 0,
                prune: pruning,
                ..Default::default()
            };
            let solver = ExactSolver::new(&matrix, config);

            let started = Instant::now();
            let report = solver.solve();
            let time = started.elapsed().as_secs_f64();

            distances.push(report.best.total_distance());
            self.results.push(RunResult {
                size,
                seed,
                pruning,
                best_distance: report.best.total_distance(),
                explored: report.explored,
                total_tours,
                time,
            });
        }

        // Pruning is an optimization only: both runs must agree
        assert_eq!(distances[0], distances[1]);
    }

    /// Run the configured experiment grid.
    pub fn run_all(&mut self) {
        let sizes = self.config.sizes.clone();
        for size in sizes {
            log::info!("Benchmarking size {} ({} runs)...", size, self.config.runs);
            for seed in 0..self.config.runs as u64 {
                self.run_instance(size, seed);
            }
        }
    }

    /// Aggregate pruning statistics per instance size.
    pub fn compute_statistics(&self) -> Vec<SizeStatistics> {
        let mut by_size: BTreeMap<usize, Vec<&RunResult>> = BTreeMap::new();
        for result in &self.results {
            by_size.entry(result.size).or_default().push(result);
        }

        let mut statistics = Vec::new();
        for (size, results) in by_size {
            let pruned: Vec<_> = results.iter().filter(|r| r.pruning).collect();
            let plain: Vec<_> = results.iter().filter(|r| !r.pruning).collect();
            if pruned.is_empty() || plain.is_empty() {
                continue;
            }

            let total_tours = pruned[0].total_tours;
            let avg_pruned_explored =
                pruned.iter().map(|r| r.explored as f64).sum::<f64>() / pruned.len() as f64;
            let avg_explored_fraction = avg_pruned_explored / total_tours as f64;
            let avg_time_plain = plain.iter().map(|r| r.time).sum::<f64>() / plain.len() as f64;
            let avg_time_pruned = pruned.iter().map(|r| r.time).sum::<f64>() / pruned.len() as f64;

            statistics.push(SizeStatistics {
                size,
                num_runs: pruned.len(),
                total_tours,
                avg_pruned_explored,
                avg_explored_fraction,
                avg_time_plain,
                avg_time_pruned,
            });
        }

        statistics
    }

    /// Export per-run results to CSV.
    pub fn export_to_csv<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(file);

        for result in &self.results {
            writer.serialize(result)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Generate summary report.
    pub fn generate_report(&self) -> String {
        let mut report = String::new();

        report.push_str("========================================\n");
        report.push_str("     TSP Pruning Benchmark Report\n");
        report.push_str("========================================\n\n");

        report.push_str(&format!(
            "{:<6} {:>6} {:>12} {:>14} {:>10} {:>12} {:>12}\n",
            "Size", "Runs", "(n-1)!", "Avg explored", "Fraction", "Plain time", "Pruned time"
        ));
        report.push_str(&"-".repeat(78));
        report.push('\n');

        for stat in self.compute_statistics() {
            report.push_str(&format!(
                "{:<6} {:>6} {:>12} {:>14.1} {:>9.1}% {:>11.4}s {:>11.4}s\n",
                stat.size,
                stat.num_runs,
                stat.total_tours,
                stat.avg_pruned_explored,
                stat.avg_explored_fraction * 100.0,
                stat.avg_time_plain,
                stat.avg_time_pruned
            ));
        }

        report.push_str(&"-".repeat(78));
        report.push('\n');
        report
    }

    /// Get all recorded results.
    pub fn results(&self) -> &[RunResult] {
        &self.results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_benchmark_config() {
        let config = BenchmarkConfig::default();
        assert_eq!(config.runs, 5);
        assert_eq!(config.max_distance, 10);
    }

    #[test]
    fn test_run_instance_records_both_runs() {
        let mut benchmark = Benchmark::new(BenchmarkConfig {
            sizes: vec![5],
            runs: 1,
            max_distance: 10,
        });
        benchmark.run_instance(5, 42);

        let results = benchmark.results();
        assert_eq!(results.len(), 2);
        assert!(!results[0].pruning);
        assert!(results[1].pruning);
        assert_eq!(results[0].explored, 24);
        assert!(results[1].explored <= 24);
        assert_eq!(results[0].best_distance, results[1].best_distance);
    }

    #[test]
    fn test_statistics_aggregate_per_size() {
        let mut benchmark = Benchmark::new(BenchmarkConfig {
            sizes: vec![4, 5],
            runs: 2,
            max_distance: 10,
        });
        benchmark.run_all();

        let stats = benchmark.compute_statistics();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].size, 4);
        assert_eq!(stats[0].total_tours, 6);
        assert_eq!(stats[1].size, 5);
        assert_eq!(stats[1].num_runs, 2);
        assert!(stats[0].avg_explored_fraction <= 1.0);
    }
}

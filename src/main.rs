//! Exact TSP Solver - Command Line Interface
//!
//! Exhaustive / branch-and-bound solving, instance generation, analysis,
//! regression checking and pruning benchmarks for small symmetric TSP
//! instances.

use clap::{Parser, Subcommand};
use tsp_exact_solver::benchmark::{Benchmark, BenchmarkConfig};
use tsp_exact_solver::matrix::{city_letter, DistanceMatrix, MAX_CITIES};
use tsp_exact_solver::solver::{factorial, ExactSolver, SolverConfig};

use std::path::PathBuf;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

#[derive(Parser)]
#[command(name = "tsp-exact-solver")]
#[command(author = "M2 AI2D Student")]
#[command(version = "1.0")]
#[command(about = "An exhaustive branch-and-bound solver for the symmetric TSP")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve an instance loaded from a distance matrix file
    Solve {
        /// Path to the distance matrix file
        #[arg(short, long)]
        matrix: PathBuf,

        /// Start city index
        #[arg(short, long, default_value = "0")]
        start: usize,

        /// Enable branch-and-bound pruning
        #[arg(short, long)]
        prune: bool,

        /// Log every completed tour
        #[arg(short, long)]
        verbose: bool,

        /// Log every partial path (implies --verbose)
        #[arg(short, long)]
        debug: bool,

        /// Write the result as JSON to a file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a random symmetric distance matrix
    Generate {
        /// Number of cities
        #[arg(short, long, default_value = "5")]
        size: usize,

        /// Random seed (defaults to the current time)
        #[arg(long)]
        seed: Option<u64>,

        /// Maximum edge distance
        #[arg(short, long, default_value = "10")]
        max_distance: u32,

        /// Save the matrix to a file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Solve an instance and compare against an expected optimal distance
    Check {
        /// Path to the distance matrix file
        #[arg(short, long)]
        matrix: PathBuf,

        /// Expected optimal distance
        #[arg(short, long)]
        expected: u32,
    },

    /// Analyze an instance
    Analyze {
        /// Path to the distance matrix file
        #[arg(short, long)]
        matrix: PathBuf,
    },

    /// Measure the effect of pruning on random instances
    Bench {
        /// Instance sizes to benchmark
        #[arg(long, value_delimiter = ',', default_value = "5,6,7,8,9")]
        sizes: Vec<usize>,

        /// Number of seeded instances per size
        #[arg(short, long, default_value = "5")]
        runs: usize,

        /// Maximum edge distance
        #[arg(short, long, default_value = "10")]
        max_distance: u32,

        /// Output directory for results
        #[arg(short, long, default_value = "results")]
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            matrix,
            start,
            prune,
            verbose,
            debug,
            output,
        } => {
            init_logging(verbose || debug, debug);
            solve_instance(&matrix, start, prune, verbose, debug, output);
        }

        Commands::Generate {
            size,
            seed,
            max_distance,
            output,
        } => {
            env_logger::init();
            generate_instance(size, seed, max_distance, output);
        }

        Commands::Check { matrix, expected } => {
            env_logger::init();
            check_instance(&matrix, expected);
        }

        Commands::Analyze { matrix } => {
            env_logger::init();
            analyze_instance(&matrix);
        }

        Commands::Bench {
            sizes,
            runs,
            max_distance,
            output,
        } => {
            env_logger::Builder::from_default_env()
                .filter_level(log::LevelFilter::Info)
                .init();
            run_benchmark(sizes, runs, max_distance, &output);
        }
    }
}

/// Raise the log level so the solver trace flags become visible.
fn init_logging(verbose: bool, debug: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    } else if verbose {
        builder.filter_level(log::LevelFilter::Info);
    }
    builder.init();
}

/// Load a matrix and validate the boundary preconditions, exiting on defects.
fn load_matrix(path: &PathBuf) -> DistanceMatrix {
    let matrix = match DistanceMatrix::from_file(path) {
        Ok(matrix) => matrix,
        Err(e) => {
            eprintln!("Error loading matrix: {}", e);
            std::process::exit(1);
        }
    };

    if matrix.size() < 2 || matrix.size() > MAX_CITIES {
        eprintln!(
            "Error: instance size {} out of range [2, {}]",
            matrix.size(),
            MAX_CITIES
        );
        std::process::exit(1);
    }

    matrix
}

fn solve_instance(
    path: &PathBuf,
    start: usize,
    prune: bool,
    verbose: bool,
    debug: bool,
    output: Option<PathBuf>,
) {
    let matrix = load_matrix(path);

    if start >= matrix.size() {
        eprintln!(
            "Error: start city {} out of range for size {}",
            start,
            matrix.size()
        );
        std::process::exit(1);
    }

    let config = SolverConfig {
        start,
        prune,
        trace_steps: debug,
        trace_tours: verbose || debug,
    };

    println!(
        "TSP problem of size {} starting from city {}.",
        matrix.size(),
        city_letter(start)
    );
    print!("{}", matrix);
    println!("Starting path exploration...");

    let started = Instant::now();
    let report = ExactSolver::new(&matrix, config).solve();
    let elapsed = started.elapsed();

    let total = factorial(matrix.size() as u64 - 1);
    println!(
        "TSP solved after {} paths fully explored over {}.",
        report.explored, total
    );
    println!("{}", report.best);
    println!("Time: {:.4}s", elapsed.as_secs_f64());

    if let Some(out_path) = output {
        let json = serde_json::to_string_pretty(&report).expect("Failed to serialize result");
        std::fs::write(&out_path, json).expect("Failed to write output");
        println!("Result saved to {:?}", out_path);
    }
}

fn generate_instance(size: usize, seed: Option<u64>, max_distance: u32, output: Option<PathBuf>) {
    if size < 2 || size > MAX_CITIES {
        eprintln!("Error: instance size {} out of range [2, {}]", size, MAX_CITIES);
        std::process::exit(1);
    }
    if max_distance == 0 {
        eprintln!("Error: maximum distance must be positive");
        std::process::exit(1);
    }

    let seed = seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    });

    let matrix = DistanceMatrix::random(size, seed, max_distance);
    println!("Random instance of size {} (seed {}).", size, seed);
    print!("{}", matrix);

    if let Some(out_path) = output {
        match matrix.save(&out_path) {
            Ok(()) => println!("Matrix saved to {:?}", out_path),
            Err(e) => {
                eprintln!("Error saving matrix: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn check_instance(path: &PathBuf, expected: u32) {
    let matrix = load_matrix(path);

    let config = SolverConfig {
        prune: true,
        ..Default::default()
    };

    print!("{}", matrix);
    let report = ExactSolver::new(&matrix, config).solve();
    println!("{}", report.best);

    let dist = report.best.total_distance();
    println!("tsp dist: {} (expected: {})", dist, expected);
    if dist != expected {
        std::process::exit(1);
    }
}

fn analyze_instance(path: &PathBuf) {
    let matrix = load_matrix(path);

    println!("========== Instance Analysis ==========\n");
    print!("{}", matrix);
    println!();
    print!("{}", matrix.statistics());
    println!("  Symmetric: {}", matrix.is_symmetric());
    println!(
        "  Search space: {} closed tours from a fixed start",
        factorial(matrix.size() as u64 - 1)
    );
}

fn run_benchmark(sizes: Vec<usize>, runs: usize, max_distance: u32, output: &PathBuf) {
    for &size in &sizes {
        if size < 2 || size > MAX_CITIES {
            eprintln!("Error: instance size {} out of range [2, {}]", size, MAX_CITIES);
            std::process::exit(1);
        }
    }

    std::fs::create_dir_all(output).expect("Failed to create output directory");

    let config = BenchmarkConfig {
        sizes,
        runs,
        max_distance,
    };

    let mut benchmark = Benchmark::new(config);
    benchmark.run_all();

    let results_path = output.join("results.csv");
    benchmark
        .export_to_csv(&results_path)
        .expect("Failed to export results");
    println!("Results exported to {:?}", results_path);

    let report = benchmark.generate_report();
    println!("\n{}", report);

    let report_path = output.join("report.txt");
    std::fs::write(&report_path, &report).expect("Failed to save report");
    println!("Report saved to {:?}", report_path);
}

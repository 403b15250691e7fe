//! Module for representing and loading symmetric distance matrices.
//!
//! This module handles the whitespace-delimited text format used for TSP
//! distance matrices (first token is the size, followed by `size * size`
//! non-negative integers in row-major order) and provides seeded random
//! instance generation for experiments.

use std::fmt;
use std::fs;
use std::path::Path;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Largest supported instance: city identities are rendered as letters A-Z.
pub const MAX_CITIES: usize = 26;

/// Render a city index as its display letter (`0 -> 'A'`, `1 -> 'B'`, ...).
#[inline]
pub fn city_letter(city: usize) -> char {
    debug_assert!(city < MAX_CITIES);
    (b'A' + city as u8) as char
}

/// A symmetric square table of non-negative integer distances between cities.
///
/// Built once by a loader or generator, then treated as read-only for the
/// lifetime of a solve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceMatrix {
    /// Number of cities
    size: usize,
    /// Row-major distances, `size * size` entries, zero diagonal
    distances: Vec<u32>,
}

impl DistanceMatrix {
    /// Build a matrix from row-major distances.
    ///
    /// Returns an error if the entry count does not match `size * size`.
    pub fn from_distances(size: usize, distances: Vec<u32>) -> Result<Self, String> {
        if distances.len() != size * size {
            return Err(format!(
                "expected {} distances for size {}, got {}",
                size * size,
                size,
                distances.len()
            ));
        }
        Ok(DistanceMatrix { size, distances })
    }

    /// Generate a random symmetric matrix with distances in `[1, max_distance]`
    /// and a zero diagonal. Deterministic via seed.
    pub fn random(size: usize, seed: u64, max_distance: u32) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut distances = vec![0u32; size * size];

        for i in 0..size {
            for j in 0..i {
                let dist = rng.gen_range(1..=max_distance);
                distances[i * size + j] = dist;
                distances[j * size + i] = dist;
            }
        }

        DistanceMatrix { size, distances }
    }

    /// Parse a matrix from its text form: the size token followed by
    /// `size * size` whitespace-delimited non-negative integers.
    pub fn from_text(text: &str) -> Result<Self, String> {
        let mut tokens = text.split_whitespace();

        let size: usize = tokens
            .next()
            .ok_or_else(|| "empty matrix file".to_string())?
            .parse()
            .map_err(|_| "invalid size token".to_string())?;

        let mut distances = Vec::with_capacity(size * size);
        for token in tokens.by_ref().take(size * size) {
            let dist: u32 = token
                .parse()
                .map_err(|_| format!("invalid distance token '{}'", token))?;
            distances.push(dist);
        }

        Self::from_distances(size, distances)
    }

    /// Load a matrix from a text file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let text = fs::read_to_string(&path)
            .map_err(|e| format!("cannot open {:?}: {}", path.as_ref(), e))?;
        Self::from_text(&text)
    }

    /// Render the matrix in its text file form (one row per line).
    pub fn to_text(&self) -> String {
        let mut text = format!("{}\n", self.size);
        for i in 0..self.size {
            let row: Vec<String> = (0..self.size)
                .map(|j| self.distances[i * self.size + j].to_string())
                .collect();
            text.push_str(&row.join(" "));
            text.push('\n');
        }
        text
    }

    /// Save the matrix to a text file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        fs::write(path, self.to_text())
    }

    /// Get the distance between two cities.
    ///
    /// Out-of-range indices are contract violations, not recoverable errors.
    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> u32 {
        assert!(i < self.size && j < self.size);
        self.distances[i * self.size + j]
    }

    /// Number of cities.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Check that the matrix is symmetric with a zero diagonal.
    pub fn is_symmetric(&self) -> bool {
        for i in 0..self.size {
            if self.distances[i * self.size + i] != 0 {
                return false;
            }
            for j in 0..i {
                if self.distances[i * self.size + j] != self.distances[j * self.size + i] {
                    return false;
                }
            }
        }
        true
    }

    /// Get statistics about the instance.
    pub fn statistics(&self) -> MatrixStatistics {
        let mut distances: Vec<u32> = Vec::new();
        for i in 0..self.size {
            for j in i + 1..self.size {
                distances.push(self.distance(i, j));
            }
        }

        let min_distance = distances.iter().copied().min().unwrap_or(0);
        let max_distance = distances.iter().copied().max().unwrap_or(0);
        let avg_distance = if distances.is_empty() {
            0.0
        } else {
            distances.iter().sum::<u32>() as f64 / distances.len() as f64
        };

        MatrixStatistics {
            size: self.size,
            num_edges: distances.len(),
            min_distance,
            max_distance,
            avg_distance,
        }
    }
}

impl fmt::Display for DistanceMatrix {
    /// Letter-headed table, e.g. for a 3-city instance:
    ///
    /// ```text
    ///      A  B  C
    ///   ----------
    /// A |  0  1  2 |
    /// B |  1  0  3 |
    /// C |  2  3  0 |
    ///   ----------
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "    ")?;
        for j in 0..self.size {
            write!(f, " {} ", city_letter(j))?;
        }
        writeln!(f)?;
        writeln!(f, "  --{}-", "---".repeat(self.size))?;
        for i in 0..self.size {
            write!(f, "{} | ", city_letter(i))?;
            for j in 0..self.size {
                write!(f, "{:2} ", self.distances[i * self.size + j])?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "  --{}-", "---".repeat(self.size))
    }
}

/// Statistics about a distance matrix
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixStatistics {
    pub size: usize,
    pub num_edges: usize,
    pub min_distance: u32,
    pub max_distance: u32,
    pub avg_distance: f64,
}

impl fmt::Display for MatrixStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Instance of size {}", self.size)?;
        writeln!(f, "  Edges: {}", self.num_edges)?;
        writeln!(f, "  Min distance: {}", self.min_distance)?;
        writeln!(f, "  Max distance: {}", self.max_distance)?;
        writeln!(f, "  Avg distance: {:.2}", self.avg_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text() {
        let matrix = DistanceMatrix::from_text("3\n0 1 2\n1 0 3\n2 3 0\n").unwrap();
        assert_eq!(matrix.size(), 3);
        assert_eq!(matrix.distance(0, 1), 1);
        assert_eq!(matrix.distance(1, 2), 3);
        assert_eq!(matrix.distance(2, 0), 2);
        assert!(matrix.is_symmetric());
    }

    #[test]
    fn test_from_text_rejects_short_input() {
        assert!(DistanceMatrix::from_text("3\n0 1 2\n1 0 3\n").is_err());
        assert!(DistanceMatrix::from_text("").is_err());
        assert!(DistanceMatrix::from_text("2\n0 x\nx 0\n").is_err());
    }

    #[test]
    fn test_text_round_trip() {
        let matrix = DistanceMatrix::random(5, 42, 10);
        let reloaded = DistanceMatrix::from_text(&matrix.to_text()).unwrap();
        assert_eq!(reloaded.size(), 5);
        for i in 0..5 {
            for j in 0..5 {
                assert_eq!(reloaded.distance(i, j), matrix.distance(i, j));
            }
        }
    }

    #[test]
    fn test_random_is_symmetric_and_seeded() {
        let a = DistanceMatrix::random(8, 7, 10);
        let b = DistanceMatrix::random(8, 7, 10);
        assert!(a.is_symmetric());
        for i in 0..8 {
            assert_eq!(a.distance(i, i), 0);
            for j in 0..8 {
                assert_eq!(a.distance(i, j), b.distance(i, j));
                assert!(i == j || (1..=10).contains(&a.distance(i, j)));
            }
        }
        let c = DistanceMatrix::random(8, 8, 10);
        let differs = (0..8).any(|i| (0..8).any(|j| a.distance(i, j) != c.distance(i, j)));
        assert!(differs);
    }

    #[test]
    fn test_city_letters() {
        assert_eq!(city_letter(0), 'A');
        assert_eq!(city_letter(25), 'Z');
    }

    #[test]
    fn test_statistics() {
        let matrix = DistanceMatrix::from_text("3 0 1 2 1 0 3 2 3 0").unwrap();
        let stats = matrix.statistics();
        assert_eq!(stats.num_edges, 3);
        assert_eq!(stats.min_distance, 1);
        assert_eq!(stats.max_distance, 3);
        assert!((stats.avg_distance - 2.0).abs() < 1e-10);
    }
}

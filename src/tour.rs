//! Tour representation for the exact solver.
//!
//! A `Tour` is the mutable path buffer the search extends and retracts in
//! place: a sequence of city indices plus the running total distance of its
//! consecutive edges. Capacity is fixed at `n + 1` so a complete tour can
//! close back to its start city without reallocating.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::matrix::{city_letter, DistanceMatrix};

/// An ordered sequence of city indices with its accumulated distance.
///
/// Push and pop keep the total up to date incrementally: each call adds or
/// subtracts exactly one edge, which matches a full recomputation over all
/// consecutive pairs since edge weights are exact integers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tour {
    /// Cities in visiting order
    cities: Vec<usize>,
    /// Fixed capacity, `n + 1` for an instance of n cities
    max_len: usize,
    /// Sum of distances over consecutive pairs currently in `cities`
    total: u32,
}

impl Tour {
    /// Create an empty tour with room for `max_len` cities.
    pub fn with_capacity(max_len: usize) -> Self {
        assert!(max_len > 0);
        Tour {
            cities: Vec::with_capacity(max_len),
            max_len,
            total: 0,
        }
    }

    /// Append a city, extending the running total by the new closing edge.
    ///
    /// Pushing past capacity or with an out-of-range city index is a
    /// contract violation.
    pub fn push(&mut self, matrix: &DistanceMatrix, city: usize) {
        assert!(self.cities.len() < self.max_len);
        assert!(city < matrix.size());
        if let Some(&prev) = self.cities.last() {
            self.total += matrix.distance(prev, city);
        }
        self.cities.push(city);
    }

    /// Remove the last city, shrinking the running total by its edge.
    pub fn pop(&mut self, matrix: &DistanceMatrix) -> usize {
        let city = self.cities.pop().expect("pop on empty tour");
        if let Some(&prev) = self.cities.last() {
            self.total -= matrix.distance(prev, city);
        }
        city
    }

    /// The most recently pushed city.
    #[inline]
    pub fn last(&self) -> usize {
        *self.cities.last().expect("last on empty tour")
    }

    /// Current accumulated distance.
    #[inline]
    pub fn total_distance(&self) -> u32 {
        self.total
    }

    /// Number of cities currently in the tour.
    #[inline]
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Cities in visiting order.
    #[inline]
    pub fn cities(&self) -> &[usize] {
        &self.cities
    }

    /// True if the last city already occurs earlier in the tour.
    ///
    /// This is the repetition check applied after each tentative extension;
    /// the closing return to the start city is appended without it.
    pub fn last_is_repeat(&self) -> bool {
        let (last, rest) = match self.cities.split_last() {
            Some(split) => split,
            None => return false,
        };
        rest.contains(last)
    }

    /// Recompute the total from scratch over all consecutive pairs.
    ///
    /// Used by tests and the `check` surface to validate the incremental
    /// running sum independently.
    pub fn recompute_distance(&self, matrix: &DistanceMatrix) -> u32 {
        self.cities
            .windows(2)
            .map(|pair| matrix.distance(pair[0], pair[1]))
            .sum()
    }
}

impl fmt::Display for Tour {
    /// Letter form with unused slots as dashes, e.g. `[ A C B - ] => (6)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ ")?;
        for &city in &self.cities {
            write!(f, "{} ", city_letter(city))?;
        }
        for _ in self.cities.len()..self.max_len {
            write!(f, "- ")?;
        }
        write!(f, "] => ({})", self.total)
    }
}

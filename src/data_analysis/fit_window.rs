// src/data_analysis/fit_window.rs

use std::collections::VecDeque;

/// Fixed-capacity trailing buffer of (time, value) samples.
/// Pushing into a full window evicts the oldest sample.
#[derive(Debug, Clone)]
pub struct FitWindow {
    samples: VecDeque<(f64, f64)>,
    capacity: usize,
}

impl FitWindow {
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "fit window capacity must be non-zero");
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a sample and returns the one evicted to make room, if any.
    pub fn push(&mut self, time: f64, value: f64) -> Option<(f64, f64)> {
        let evicted = if self.samples.len() == self.capacity {
            self.samples.pop_front()
        } else {
            None
        };
        self.samples.push_back((time, value));
        evicted
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.samples.len() == self.capacity
    }

    pub fn oldest(&self) -> Option<(f64, f64)> {
        self.samples.front().copied()
    }

    /// Samples from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &(f64, f64)> + '_ {
        self.samples.iter()
    }

    /// Splits the window into separate time and value vectors, oldest first.
    pub fn columns(&self) -> (Vec<f64>, Vec<f64>) {
        self.samples.iter().copied().unzip()
    }
}


// src/data_analysis/fit_window.rs

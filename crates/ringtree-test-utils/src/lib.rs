//! Test utilities for ringtree development.
//!
//! Provides a [`Recorder`] that captures what a traversal visited, and
//! ready-made trees in [`fixtures`] for scenario and property tests.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{full_tree, scenario, Scenario};

use ringtree::{Flow, Position, Visit};

/// Collects `(position, payload)` pairs from `each` visits.
///
/// Optionally answers [`Flow::Stop`] once a chosen payload is seen, to
/// exercise early termination.
#[derive(Debug)]
pub struct Recorder<T> {
    visits: Vec<(Position, T)>,
    stop_at: Option<T>,
}

impl<T: Clone + PartialEq> Recorder<T> {
    pub fn new() -> Self {
        Self {
            visits: Vec::new(),
            stop_at: None,
        }
    }

    /// Answer [`Flow::Stop`] after recording a visit whose payload is `value`.
    pub fn stop_at(value: T) -> Self {
        Self {
            visits: Vec::new(),
            stop_at: Some(value),
        }
    }

    /// Record one visit; pass as `|v| recorder.record(v)`.
    pub fn record(&mut self, visit: Visit<'_, T>) -> Flow {
        self.visits.push((visit.position, visit.payload.clone()));
        if self.stop_at.as_ref() == Some(visit.payload) {
            Flow::Stop
        } else {
            Flow::Continue
        }
    }

    pub fn visits(&self) -> &[(Position, T)] {
        &self.visits
    }

    pub fn payloads(&self) -> Vec<T> {
        self.visits.iter().map(|(_, p)| p.clone()).collect()
    }

    pub fn positions(&self) -> Vec<Position> {
        self.visits.iter().map(|(pos, _)| *pos).collect()
    }

    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }
}

impl<T: Clone + PartialEq> Default for Recorder<T> {
    fn default() -> Self {
        Self::new()
    }
}

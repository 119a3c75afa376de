//! Core types for the runstat pipeline
//!
//! This module defines the data that flows through each stage: parsed
//! samples, per-file totals, the session body weight, and the final report.

use crate::error::ProcessError;
use serde::{Deserialize, Serialize};

/// A single parsed data line: one distance/time sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunSample {
    /// Distance covered (kilometers)
    pub distance_km: f64,
    /// Elapsed time (seconds)
    pub time_seconds: f64,
}

/// Aggregate distance and time for one input file
///
/// Both components are sums over the file's valid sample lines and only ever
/// grow as samples are folded in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunTotals {
    /// Total distance (kilometers)
    pub distance_km: f64,
    /// Total time (seconds)
    pub time_seconds: f64,
}

impl RunTotals {
    /// Fold one sample into the running totals
    pub fn add(&mut self, sample: RunSample) {
        self.distance_km += sample.distance_km;
        self.time_seconds += sample.time_seconds;
    }
}

/// Body weight in kilograms, validated strictly positive
///
/// Supplied once per session and passed explicitly into the calculation.
/// Only constructible through [`BodyWeight::new`], so a held value is
/// always finite and positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodyWeight(f64);

impl BodyWeight {
    /// Create a body weight, rejecting non-finite and non-positive values
    pub fn new(kilograms: f64) -> Result<Self, ProcessError> {
        if kilograms.is_finite() && kilograms > 0.0 {
            Ok(Self(kilograms))
        } else {
            Err(ProcessError::InvalidWeight(kilograms))
        }
    }

    /// Weight in kilograms
    pub fn kilograms(self) -> f64 {
        self.0
    }
}

/// Per-file summary derived from totals and body weight
///
/// Never mutated after creation; rendering formats each value to three
/// decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Estimated calories burned (kcal)
    pub calories_burned: f64,
    /// Average speed (mph)
    pub avg_speed_mph: f64,
    /// Total distance (kilometers)
    pub total_distance_km: f64,
    /// Total duration (minutes)
    pub total_time_minutes: f64,
}

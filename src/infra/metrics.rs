//! Lock-free counters for the classification fan-out
//!
//! Classification tasks run concurrently and each bumps one counter, so the
//! counters are plain atomics. Relaxed ordering only: these are statistics and
//! must not be used to coordinate the tasks.

use crate::domain::GeocodeStatus;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::info;

pub struct Metrics {
    rooftop: AtomicU64,
    interpolated: AtomicU64,
    approximate: AtomicU64,
    not_found: AtomicU64,
    /// Candidates the provider returned no response for
    missing_responses: AtomicU64,
    /// Lookups that failed inside the geocode source
    source_errors: AtomicU64,
    started_at: Instant,
}

/// Point-in-time copy of the counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub rooftop: u64,
    pub interpolated: u64,
    pub approximate: u64,
    pub not_found: u64,
    pub missing_responses: u64,
    pub source_errors: u64,
    pub elapsed_ms: u64,
}

impl MetricsSnapshot {
    pub fn classified(&self) -> u64 {
        self.rooftop + self.interpolated + self.approximate + self.not_found
    }

    pub fn log(&self) {
        info!(
            classified = %self.classified(),
            rooftop = %self.rooftop,
            interpolated = %self.interpolated,
            approximate = %self.approximate,
            not_found = %self.not_found,
            missing_responses = %self.missing_responses,
            source_errors = %self.source_errors,
            elapsed_ms = %self.elapsed_ms,
            "classification_metrics"
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            rooftop: AtomicU64::new(0),
            interpolated: AtomicU64::new(0),
            approximate: AtomicU64::new(0),
            not_found: AtomicU64::new(0),
            missing_responses: AtomicU64::new(0),
            source_errors: AtomicU64::new(0),
            started_at: Instant::now(),
        }
    }

    #[inline]
    pub fn record_classification(&self, status: GeocodeStatus) {
        let counter = match status {
            GeocodeStatus::Rooftop => &self.rooftop,
            GeocodeStatus::Interpolated => &self.interpolated,
            GeocodeStatus::Approximate => &self.approximate,
            GeocodeStatus::NotFound => &self.not_found,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_missing_response(&self) {
        self.missing_responses.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_source_error(&self) {
        self.source_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            rooftop: self.rooftop.load(Ordering::Relaxed),
            interpolated: self.interpolated.load(Ordering::Relaxed),
            approximate: self.approximate.load(Ordering::Relaxed),
            not_found: self.not_found.load(Ordering::Relaxed),
            missing_responses: self.missing_responses.load(Ordering::Relaxed),
            source_errors: self.source_errors.load(Ordering::Relaxed),
            elapsed_ms: self.started_at.elapsed().as_millis() as u64,
        }
    }
}

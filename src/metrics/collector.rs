//! Metrics collection using Prometheus

use crate::error::Result;
use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, Opts, Registry, TextEncoder};
use std::sync::Arc;
use std::time::Duration;

/// Metrics collector for the match confirmation and rating workflow
#[derive(Clone)]
pub struct MetricsCollector {
    registry: Arc<Registry>,

    /// Total matches proposed (entered pending state)
    pub matches_proposed_total: IntCounter,

    /// Total matches confirmed
    pub matches_confirmed_total: IntCounter,

    /// Total matches rejected by the counterparty
    pub matches_rejected_total: IntCounter,

    /// Proposals rejected before any write (bad scores, ties, self-match)
    pub validation_failures_total: IntCounter,

    /// Responses refused for authorization reasons (non-participant or
    /// reporter self-confirmation)
    pub forbidden_responses_total: IntCounter,

    /// Sum of absolute rating points applied to winners
    pub rating_points_exchanged_total: IntCounter,

    /// End-to-end confirm operation latency
    pub confirm_duration_seconds: Histogram,
}

impl MetricsCollector {
    /// Create a collector backed by a fresh registry
    pub fn new() -> Result<Self> {
        Self::with_registry(Arc::new(Registry::new()))
    }

    /// Create a collector registering into an existing registry
    pub fn with_registry(registry: Arc<Registry>) -> Result<Self> {
        let matches_proposed_total = IntCounter::with_opts(Opts::new(
            "matches_proposed_total",
            "Total matches reported and persisted as pending",
        ))?;
        let matches_confirmed_total = IntCounter::with_opts(Opts::new(
            "matches_confirmed_total",
            "Total matches confirmed with ratings applied",
        ))?;
        let matches_rejected_total = IntCounter::with_opts(Opts::new(
            "matches_rejected_total",
            "Total matches rejected by the counterparty",
        ))?;
        let validation_failures_total = IntCounter::with_opts(Opts::new(
            "validation_failures_total",
            "Total proposals refused before any persistence write",
        ))?;
        let forbidden_responses_total = IntCounter::with_opts(Opts::new(
            "forbidden_responses_total",
            "Total responses refused for authorization reasons",
        ))?;
        let rating_points_exchanged_total = IntCounter::with_opts(Opts::new(
            "rating_points_exchanged_total",
            "Sum of winner-side rating points applied by confirmations",
        ))?;
        let confirm_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "confirm_duration_seconds",
            "Latency of the atomic confirm operation",
        ))?;

        registry.register(Box::new(matches_proposed_total.clone()))?;
        registry.register(Box::new(matches_confirmed_total.clone()))?;
        registry.register(Box::new(matches_rejected_total.clone()))?;
        registry.register(Box::new(validation_failures_total.clone()))?;
        registry.register(Box::new(forbidden_responses_total.clone()))?;
        registry.register(Box::new(rating_points_exchanged_total.clone()))?;
        registry.register(Box::new(confirm_duration_seconds.clone()))?;

        Ok(Self {
            registry,
            matches_proposed_total,
            matches_confirmed_total,
            matches_rejected_total,
            validation_failures_total,
            forbidden_responses_total,
            rating_points_exchanged_total,
            confirm_duration_seconds,
        })
    }

    /// Record a successful proposal
    pub fn record_proposal(&self) {
        self.matches_proposed_total.inc();
    }

    /// Record a confirmed match with the winner-side points applied
    pub fn record_confirmation(&self, winner_change: i32, duration: Duration) {
        self.matches_confirmed_total.inc();
        self.rating_points_exchanged_total
            .inc_by(winner_change.unsigned_abs() as u64);
        self.confirm_duration_seconds
            .observe(duration.as_secs_f64());
    }

    /// Record a rejected match
    pub fn record_rejection(&self) {
        self.matches_rejected_total.inc();
    }

    /// Record a proposal refused during validation
    pub fn record_validation_failure(&self) {
        self.validation_failures_total.inc();
    }

    /// Record a response refused for authorization reasons
    pub fn record_forbidden(&self) {
        self.forbidden_responses_total.inc();
    }

    /// Render all registered metrics in the Prometheus text format
    pub fn export_text(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

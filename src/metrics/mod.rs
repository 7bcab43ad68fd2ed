//! Prometheus metrics for the match confirmation engine
//!
//! No HTTP exposition lives here; the collector renders the standard text
//! format and the embedding service decides how to serve it.

pub mod collector;

pub use collector::MetricsCollector;

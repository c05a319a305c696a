//! Metrics collection and registry.

use crate::engine::{EngineState, GeneratorEngine};
use crate::sampling::RandomSource;
use prometheus::{Encoder, Gauge, IntCounter, IntGauge, Registry, TextEncoder};
use thiserror::Error;

/// Errors that can occur during metrics operations.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// Underlying Prometheus registry error.
    #[error("prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
}

/// A snapshot of engine state for metrics update.
#[derive(Debug, Clone, Default)]
pub struct MetricsSnapshot {
    /// Whether the engine is currently running.
    pub running: bool,
    /// Whether the engine currently holds authorization.
    pub authorized: bool,
    /// Current password length in characters.
    pub password_length: usize,
    /// Current entropy estimate in bits.
    pub entropy_bits: f64,
    /// Current crack-time estimate in seconds.
    pub crack_seconds: f64,
    /// Total movement ticks consumed.
    pub tick_total: u64,
    /// Total explicit clears.
    pub clear_total: u64,
    /// Total resets forced by deauthorization.
    pub forced_reset_total: u64,
}

impl MetricsSnapshot {
    /// Captures the current state of an engine.
    pub fn from_engine<R: RandomSource>(engine: &GeneratorEngine<R>) -> Self {
        let snapshot = engine.snapshot();
        Self {
            running: engine.state() == EngineState::Running,
            authorized: engine.is_authorized(),
            password_length: snapshot.password.chars().count(),
            entropy_bits: snapshot.entropy_bits,
            crack_seconds: engine.estimator().estimate_seconds(snapshot.entropy_bits),
            tick_total: engine.tick_total(),
            clear_total: engine.clear_total(),
            forced_reset_total: engine.forced_reset_total(),
        }
    }
}

/// Prometheus metrics registry for generator monitoring.
pub struct MetricsRegistry {
    registry: Registry,

    // Engine state metrics
    engine_running: IntGauge,
    engine_authorized: IntGauge,

    // Strength metrics
    password_length: IntGauge,
    entropy_bits: Gauge,
    crack_seconds: Gauge,

    // Lifecycle counters
    ticks_total: IntCounter,
    clears_total: IntCounter,
    forced_resets_total: IntCounter,
}

impl MetricsRegistry {
    /// Creates a new metrics registry with all generator metrics registered.
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        // Engine state metrics
        let engine_running = IntGauge::new(
            "kinetic_pass_engine_running",
            "Current engine state (1=running, 0=idle)",
        )?;
        let engine_authorized = IntGauge::new(
            "kinetic_pass_engine_authorized",
            "Whether the engine holds authorization (1=yes, 0=no)",
        )?;

        // Strength metrics
        let password_length = IntGauge::new(
            "kinetic_pass_password_length",
            "Current password length in characters",
        )?;
        let entropy_bits = Gauge::new(
            "kinetic_pass_entropy_bits",
            "Current entropy estimate in bits",
        )?;
        let crack_seconds = Gauge::new(
            "kinetic_pass_crack_seconds",
            "Current crack-time estimate in seconds",
        )?;

        // Lifecycle counters
        let ticks_total = IntCounter::new(
            "kinetic_pass_ticks_total",
            "Total movement ticks consumed while running",
        )?;
        let clears_total = IntCounter::new(
            "kinetic_pass_clears_total",
            "Total explicit password clears",
        )?;
        let forced_resets_total = IntCounter::new(
            "kinetic_pass_forced_resets_total",
            "Total resets forced by loss of authorization",
        )?;

        // Register all metrics
        registry.register(Box::new(engine_running.clone()))?;
        registry.register(Box::new(engine_authorized.clone()))?;
        registry.register(Box::new(password_length.clone()))?;
        registry.register(Box::new(entropy_bits.clone()))?;
        registry.register(Box::new(crack_seconds.clone()))?;
        registry.register(Box::new(ticks_total.clone()))?;
        registry.register(Box::new(clears_total.clone()))?;
        registry.register(Box::new(forced_resets_total.clone()))?;

        Ok(Self {
            registry,
            engine_running,
            engine_authorized,
            password_length,
            entropy_bits,
            crack_seconds,
            ticks_total,
            clears_total,
            forced_resets_total,
        })
    }

    /// Updates all metrics from a snapshot of engine state.
    pub fn update(&self, snapshot: &MetricsSnapshot) {
        self.engine_running.set(i64::from(snapshot.running));
        self.engine_authorized.set(i64::from(snapshot.authorized));

        self.password_length.set(snapshot.password_length as i64);
        self.entropy_bits.set(snapshot.entropy_bits);
        self.crack_seconds.set(snapshot.crack_seconds);

        // Counters only move forward; apply the delta.
        let current_ticks = self.ticks_total.get();
        if snapshot.tick_total > current_ticks {
            self.ticks_total.inc_by(snapshot.tick_total - current_ticks);
        }

        let current_clears = self.clears_total.get();
        if snapshot.clear_total > current_clears {
            self.clears_total.inc_by(snapshot.clear_total - current_clears);
        }

        let current_resets = self.forced_resets_total.get();
        if snapshot.forced_reset_total > current_resets {
            self.forced_resets_total
                .inc_by(snapshot.forced_reset_total - current_resets);
        }
    }

    /// Returns the underlying Prometheus registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Encodes all metrics in Prometheus text format.
    pub fn encode(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::MockRandom;

    #[test]
    fn test_registry_creation() {
        let registry = MetricsRegistry::new();
        assert!(registry.is_ok());
    }

    #[test]
    fn test_metrics_update() {
        let registry = MetricsRegistry::new().unwrap();

        let snapshot = MetricsSnapshot {
            running: true,
            authorized: true,
            password_length: 12,
            entropy_bits: 77.3,
            crack_seconds: 1234.5,
            tick_total: 12,
            clear_total: 1,
            forced_reset_total: 0,
        };

        registry.update(&snapshot);

        let output = registry.encode().unwrap();
        assert!(output.contains("kinetic_pass_engine_running 1"));
        assert!(output.contains("kinetic_pass_password_length 12"));
        assert!(output.contains("kinetic_pass_ticks_total 12"));
    }

    #[test]
    fn test_snapshot_from_engine() {
        let mut engine = GeneratorEngine::new(MockRandom::constant(0.0));
        engine.authorize("0xabc123");
        engine.toggle();
        engine.on_movement_tick();

        let snapshot = MetricsSnapshot::from_engine(&engine);
        assert!(snapshot.running);
        assert!(snapshot.authorized);
        assert_eq!(snapshot.password_length, 1);
        assert_eq!(snapshot.tick_total, 1);
        assert!(snapshot.entropy_bits > 0.0);
        assert!(snapshot.crack_seconds > 0.0);
    }

    #[test]
    fn test_metrics_encode() {
        let registry = MetricsRegistry::new().unwrap();
        let output = registry.encode().unwrap();

        assert!(output.contains("kinetic_pass_engine_running"));
        assert!(output.contains("kinetic_pass_entropy_bits"));
        assert!(output.contains("kinetic_pass_forced_resets_total"));
    }
}

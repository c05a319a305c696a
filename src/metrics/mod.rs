//! Prometheus metrics exporter for generator monitoring.
//!
//! Provides observability into the generator by exposing metrics in
//! Prometheus format via an HTTP endpoint (behind the `metrics` feature).
//!
//! # Metrics Exposed
//!
//! ## Engine State
//! - `kinetic_pass_engine_running` - Current engine state (1=running, 0=idle)
//! - `kinetic_pass_engine_authorized` - Authorization held (1=yes, 0=no)
//!
//! ## Strength
//! - `kinetic_pass_password_length` - Current password length in characters
//! - `kinetic_pass_entropy_bits` - Current entropy estimate in bits
//! - `kinetic_pass_crack_seconds` - Current crack-time estimate in seconds
//!
//! ## Lifecycle Counters
//! - `kinetic_pass_ticks_total` - Total movement ticks consumed
//! - `kinetic_pass_clears_total` - Total explicit clears
//! - `kinetic_pass_forced_resets_total` - Total resets forced by deauthorization
//!
//! # Example
//!
//! ```
//! use kinetic_pass::metrics::{MetricsRegistry, MetricsSnapshot};
//!
//! let registry = MetricsRegistry::new().expect("Failed to create registry");
//!
//! let snapshot = MetricsSnapshot {
//!     running: true,
//!     authorized: true,
//!     password_length: 12,
//!     entropy_bits: 77.3,
//!     crack_seconds: 180.0,
//!     tick_total: 12,
//!     clear_total: 0,
//!     forced_reset_total: 0,
//! };
//!
//! registry.update(&snapshot);
//! ```

mod collector;
#[cfg(feature = "metrics")]
mod server;

pub use collector::{MetricsError, MetricsRegistry, MetricsSnapshot};
#[cfg(feature = "metrics")]
pub use server::{MetricsServer, MetricsServerConfig, ServerError};

//! Movement-driven password generation state machine.
//!
//! The engine consumes zero-argument movement notifications while
//! `Running`, appending one sampled character per notification and
//! recomputing both strength estimates after every append. Start/stop is
//! gated by an externally owned authorization signal; losing it forces
//! the engine back to `Idle` with a full reset.
//!
//! Every operation is total: inputs are pre-validated by policy
//! (authorization, bounded length), so nothing here can fail.

mod indicator;
mod state;

pub use indicator::{CopiedIndicator, DEFAULT_COPIED_TTL};
pub use state::{EngineState, EngineUpdate, Password, Snapshot, MAX_PASSWORD_LEN};

use crate::charset;
use crate::sampling::RandomSource;
use crate::strength::{estimate_entropy, CrackTimeEstimator};
use crossbeam_channel::{unbounded, Receiver, Sender};

/// The password generation state machine.
///
/// Owns the password buffer and lifecycle state exclusively; estimates
/// are always recomputed from the current buffer, never cached
/// independently. State-change events are published to subscribers and
/// the new snapshot is also returned by reference from mutating calls.
pub struct GeneratorEngine<R: RandomSource> {
    random: R,
    crack: CrackTimeEstimator,
    state: EngineState,
    /// Opaque identity label from the wallet collaborator; `None` means
    /// unauthorized.
    identity: Option<String>,
    password: Password,
    snapshot: Snapshot,
    subscribers: Vec<Sender<EngineUpdate>>,
    tick_total: u64,
    clear_total: u64,
    forced_reset_total: u64,
}

impl<R: RandomSource> GeneratorEngine<R> {
    /// Creates an idle, unauthorized engine with the default crack-time
    /// estimator.
    pub fn new(random: R) -> Self {
        Self::with_estimator(random, CrackTimeEstimator::default())
    }

    /// Creates an engine with a custom crack-time estimator.
    pub fn with_estimator(random: R, crack: CrackTimeEstimator) -> Self {
        Self {
            random,
            crack,
            state: EngineState::Idle,
            identity: None,
            password: Password::new(),
            snapshot: Snapshot::default(),
            subscribers: Vec::new(),
            tick_total: 0,
            clear_total: 0,
            forced_reset_total: 0,
        }
    }

    /// Records the authorization signal from the wallet collaborator.
    ///
    /// An empty identity label counts as unauthorized and is treated as
    /// a revocation.
    pub fn authorize(&mut self, identity: impl Into<String>) {
        let identity = identity.into();
        if identity.is_empty() {
            self.revoke_authorization();
            return;
        }
        tracing::info!(identity = %identity, "authorization granted");
        self.identity = Some(identity);
    }

    /// Revokes authorization.
    ///
    /// Forces the engine to `Idle` and fully resets the password and
    /// both estimates, publishing a [`EngineUpdate::Reset`]. No-op when
    /// already unauthorized.
    pub fn revoke_authorization(&mut self) {
        if self.identity.is_none() {
            return;
        }
        self.identity = None;

        let was_running = self.state == EngineState::Running;
        self.state = EngineState::Idle;
        self.reset_observable_state();
        self.forced_reset_total += 1;

        tracing::info!(was_running, "authorization revoked, engine reset");
        self.publish(EngineUpdate::Reset(self.snapshot.clone()));
    }

    /// Returns whether the engine currently holds authorization.
    #[inline]
    pub fn is_authorized(&self) -> bool {
        self.identity.is_some()
    }

    /// Returns the authorized identity label, if any.
    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    /// Flips `Idle` ↔ `Running`. No-op while unauthorized.
    pub fn toggle(&mut self) {
        if !self.is_authorized() {
            tracing::debug!("toggle ignored: unauthorized");
            return;
        }
        self.state = match self.state {
            EngineState::Idle => EngineState::Running,
            EngineState::Running => EngineState::Idle,
        };
        tracing::info!(state = ?self.state, "engine toggled");
    }

    /// Handles one movement notification.
    ///
    /// No-op unless `Running`. Samples one character, appends it, keeps
    /// only the most recent [`MAX_PASSWORD_LEN`] characters, recomputes
    /// both estimates from the (possibly truncated) password, and
    /// publishes the new observable state.
    pub fn on_movement_tick(&mut self) -> &Snapshot {
        if self.state != EngineState::Running {
            return &self.snapshot;
        }

        let u = self.random.sample();
        self.password.push(charset::sample_char(u));
        self.tick_total += 1;

        self.recompute();
        self.publish(EngineUpdate::State(self.snapshot.clone()));
        &self.snapshot
    }

    /// Resets the password and both estimates without changing
    /// `Idle`/`Running`. Available in any state.
    pub fn clear(&mut self) -> &Snapshot {
        self.reset_observable_state();
        self.clear_total += 1;

        tracing::debug!("password cleared");
        self.publish(EngineUpdate::State(self.snapshot.clone()));
        &self.snapshot
    }

    /// Returns the current password for the copy collaborator.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Returns the current lifecycle state.
    #[inline]
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Returns the current observable state.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Returns the crack-time estimator in use.
    pub fn estimator(&self) -> &CrackTimeEstimator {
        &self.crack
    }

    /// Returns total movement ticks consumed while running.
    pub fn tick_total(&self) -> u64 {
        self.tick_total
    }

    /// Returns total explicit clears.
    pub fn clear_total(&self) -> u64 {
        self.clear_total
    }

    /// Returns total resets forced by deauthorization.
    pub fn forced_reset_total(&self) -> u64 {
        self.forced_reset_total
    }

    /// Subscribes to discrete state-change events.
    ///
    /// Events are delivered synchronously at publish time on the
    /// caller's thread; dropped receivers are pruned silently.
    pub fn subscribe(&mut self) -> Receiver<EngineUpdate> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    fn recompute(&mut self) {
        let bits = estimate_entropy(self.password.as_str());
        self.snapshot = Snapshot {
            password: self.password.as_str().to_owned(),
            entropy_bits: bits,
            crack_time: self.crack.label(bits),
        };
        tracing::trace!(
            len = self.password.len(),
            entropy_bits = bits,
            "observable state recomputed"
        );
    }

    fn reset_observable_state(&mut self) {
        self.password.reset();
        self.snapshot = Snapshot::default();
    }

    fn publish(&mut self, update: EngineUpdate) {
        self.subscribers.retain(|tx| tx.send(update.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::MockRandom;

    fn running_engine(values: Vec<f64>) -> GeneratorEngine<MockRandom> {
        let mut engine = GeneratorEngine::new(MockRandom::new(values));
        engine.authorize("0xabc123");
        engine.toggle();
        engine
    }

    #[test]
    fn test_starts_idle_and_unauthorized() {
        let engine = GeneratorEngine::new(MockRandom::constant(0.0));
        assert_eq!(engine.state(), EngineState::Idle);
        assert!(!engine.is_authorized());
    }

    #[test]
    fn test_toggle_requires_authorization() {
        let mut engine = GeneratorEngine::new(MockRandom::constant(0.0));

        engine.toggle();
        assert_eq!(engine.state(), EngineState::Idle);

        engine.authorize("0xabc123");
        engine.toggle();
        assert_eq!(engine.state(), EngineState::Running);

        engine.toggle();
        assert_eq!(engine.state(), EngineState::Idle);
    }

    #[test]
    fn test_empty_identity_is_unauthorized() {
        let mut engine = GeneratorEngine::new(MockRandom::constant(0.0));
        engine.authorize("");
        assert!(!engine.is_authorized());

        engine.authorize("0xabc123");
        engine.toggle();
        engine.authorize("");
        assert_eq!(engine.state(), EngineState::Idle);
        assert!(!engine.is_authorized());
    }

    #[test]
    fn test_tick_ignored_while_idle() {
        let mut engine = GeneratorEngine::new(MockRandom::constant(0.0));
        engine.authorize("0xabc123");

        engine.on_movement_tick();
        assert!(engine.password().is_empty());
        assert_eq!(engine.tick_total(), 0);
    }

    #[test]
    fn test_tick_appends_and_recomputes() {
        // 0.0 maps to 'a'.
        let mut engine = running_engine(vec![0.0]);

        let snapshot = engine.on_movement_tick().clone();
        assert_eq!(snapshot.password, "a");
        assert!((snapshot.entropy_bits - 26f64.log2()).abs() < 1e-9);
        assert!(!snapshot.crack_time.is_empty());
        assert_eq!(engine.snapshot(), &snapshot);
    }

    #[test]
    fn test_length_capped_at_64() {
        let mut engine = running_engine(vec![0.0]);
        for _ in 0..64 {
            engine.on_movement_tick();
        }
        assert_eq!(engine.password().len(), 64);

        engine.on_movement_tick();
        assert_eq!(engine.password().len(), 64);
        assert_eq!(engine.tick_total(), 65);
    }

    #[test]
    fn test_overflow_keeps_most_recent() {
        // 87 distinct samples walk the full alphabet in order, so the
        // password after 65 ticks is positions 1..=64 of that walk.
        let total = charset::full_size();
        let values: Vec<f64> = (0..total).map(|i| (i as f64 + 0.5) / total as f64).collect();
        let expected: String = (1..=64)
            .map(|i| charset::sample_char((i as f64 + 0.5) / total as f64))
            .collect();

        let mut engine = running_engine(values);
        for _ in 0..65 {
            engine.on_movement_tick();
        }
        assert_eq!(engine.password(), expected);
    }

    #[test]
    fn test_estimates_follow_truncated_password() {
        let mut engine = running_engine(vec![0.0]);
        for _ in 0..65 {
            engine.on_movement_tick();
        }
        // 64 lowercase characters.
        let expected_bits = 26f64.log2() * 64.0;
        assert!((engine.snapshot().entropy_bits - expected_bits).abs() < 1e-9);
    }

    #[test]
    fn test_truncation_can_shrink_observed_pool() {
        // First tick lands on a digit, the next 64 on lowercase. Once the
        // digit falls off the front, only lowercase remains observed.
        let total = charset::full_size() as f64;
        let digit = (52.0 + 0.5) / total;
        let lower = 0.5 / total;

        let mut values = vec![digit];
        values.extend(std::iter::repeat(lower).take(64));

        let mut engine = running_engine(values);
        for _ in 0..65 {
            engine.on_movement_tick();
        }

        let expected_bits = 26f64.log2() * 64.0;
        assert!((engine.snapshot().entropy_bits - expected_bits).abs() < 1e-9);
    }

    #[test]
    fn test_clear_preserves_state() {
        let mut engine = running_engine(vec![0.0]);
        engine.on_movement_tick();

        let snapshot = engine.clear().clone();
        assert_eq!(snapshot, Snapshot::default());
        assert_eq!(engine.state(), EngineState::Running);
        assert!(engine.is_authorized());
        assert_eq!(engine.clear_total(), 1);

        // Clear is also available while idle.
        engine.toggle();
        engine.clear();
        assert_eq!(engine.clear_total(), 2);
    }

    #[test]
    fn test_revocation_forces_idle_and_reset() {
        let mut engine = running_engine(vec![0.0]);
        engine.on_movement_tick();
        assert!(!engine.password().is_empty());

        engine.revoke_authorization();
        assert_eq!(engine.state(), EngineState::Idle);
        assert!(!engine.is_authorized());
        assert!(engine.password().is_empty());
        assert_eq!(engine.snapshot(), &Snapshot::default());
        assert_eq!(engine.forced_reset_total(), 1);

        // Already unauthorized: no further reset counted.
        engine.revoke_authorization();
        assert_eq!(engine.forced_reset_total(), 1);
    }

    #[test]
    fn test_subscribers_receive_updates() {
        let mut engine = running_engine(vec![0.0]);
        let updates = engine.subscribe();

        engine.on_movement_tick();
        engine.clear();
        engine.revoke_authorization();

        let received: Vec<EngineUpdate> = updates.try_iter().collect();
        assert_eq!(received.len(), 3);
        assert!(matches!(received[0], EngineUpdate::State(ref s) if s.password == "a"));
        assert!(matches!(received[1], EngineUpdate::State(ref s) if s.password.is_empty()));
        assert!(matches!(received[2], EngineUpdate::Reset(_)));
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let mut engine = running_engine(vec![0.0]);
        drop(engine.subscribe());

        // Publishing to a dropped receiver must not fail.
        engine.on_movement_tick();
        assert_eq!(engine.password(), "a");
    }

    #[test]
    fn test_identity_exposed() {
        let mut engine = GeneratorEngine::new(MockRandom::constant(0.0));
        assert_eq!(engine.identity(), None);

        engine.authorize("0xabc123");
        assert_eq!(engine.identity(), Some("0xabc123"));
    }
}

//! Kinetic Pass Library
//!
//! Converts a continuous stream of low-entropy physical input events
//! (pointer movement) into a progressively built password, with live
//! estimates of its information content and adversarial crack time.
//!
//! # Architecture
//!
//! The system follows an explicit data flow:
//!
//! ```text
//! movement tick → sampling → charset → password buffer
//!                                           ↓
//!                            strength (entropy, crack time)
//!                                           ↓
//!                            snapshot → subscribers
//! ```
//!
//! # Design Principles
//!
//! - **Authorization-gated**: the engine runs only while an external
//!   collaborator vouches for the session; losing that signal resets it
//! - **Bounded growth**: the password keeps at most its 64 most recent
//!   characters
//! - **Always derived**: estimates are recomputed from the current
//!   password on every mutation, never cached independently
//! - **No cryptographic claims**: the entropy figure is a search-space
//!   estimate, not a randomness proof
//!
//! # Example
//!
//! ```
//! use kinetic_pass::{
//!     engine::{EngineState, GeneratorEngine},
//!     sampling::MockRandom,
//! };
//!
//! let mut engine = GeneratorEngine::new(MockRandom::new(vec![0.05, 0.35, 0.65, 0.95]));
//!
//! engine.authorize("0xdemo");
//! engine.toggle();
//! assert_eq!(engine.state(), EngineState::Running);
//!
//! for _ in 0..10 {
//!     engine.on_movement_tick();
//! }
//!
//! let snapshot = engine.snapshot();
//! assert_eq!(snapshot.password.len(), 10);
//! assert!(snapshot.entropy_bits > 0.0);
//! assert!(!snapshot.crack_time.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod charset;
pub mod config;
pub mod engine;
pub mod input;
pub mod metrics;
pub mod sampling;
pub mod strength;

// Re-export commonly used types at crate root
pub use charset::{CharacterClass, UnknownCharacter};
pub use engine::{CopiedIndicator, EngineState, EngineUpdate, GeneratorEngine, Snapshot};
pub use input::{MockMotion, MotionSource};
pub use sampling::{MockRandom, RandomSource, SystemRandom};
pub use strength::{estimate_entropy, CrackTimeEstimator};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

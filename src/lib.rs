// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod config;
pub mod dedup;
pub mod feed;
pub mod gate;
pub mod metrics;
pub mod notify;
pub mod orchestrator;

// ---- Re-exports for stable public API ----
pub use crate::feed::types::Warning;
pub use crate::gate::SpeechGate;
pub use crate::notify::Notifier;
pub use crate::orchestrator::{CycleState, Orchestrator};

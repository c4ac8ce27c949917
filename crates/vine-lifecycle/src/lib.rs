//! # vine-lifecycle
//!
//! The referral lifecycle state machine and its audit trail.
//!
//! A share action moves CREATED → SCHEDULED → ATTEMPTED → COMPLETED,
//! with CANCELLED reachable from any non-terminal state. The machine
//! itself ([`transition`]) is a pure function over a static edge table —
//! no behavior is attached to any edge. Callers that want behavior
//! (completion emails, reward math) observe the [`TransitionRecord`]
//! stream through an [`EffectHook`].
//!
//! [`Lifecycle`] combines the machine with an [`AuditSink`]: the state
//! change is authoritative, the audit write is retried and best-effort.

pub mod audit;
pub mod error;
pub mod hooks;
pub mod lifecycle;
pub mod machine;

pub use audit::{AuditSink, JsonlSink, MemorySink, TransitionRecord};
pub use error::LifecycleError;
pub use hooks::EffectHook;
pub use lifecycle::Lifecycle;
pub use machine::transition;

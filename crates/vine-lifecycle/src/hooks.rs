// hooks.rs — EffectHook: the seam where transition behavior attaches.
//
// The machine validates edges and nothing else. Anything that should
// happen *because* a transition committed — completion emails, reward
// computation — implements EffectHook and observes the record stream.
//
// There are deliberately no built-in implementations: the upstream
// system declared reward/fee computation and never specified it, so this
// engine ships the seam and not the semantics.

use crate::audit::TransitionRecord;

/// Observes committed transitions. Hook failures are logged by the
/// caller and never affect the state change.
pub trait EffectHook: Send + Sync {
    fn on_transition(&self, record: &TransitionRecord);
}

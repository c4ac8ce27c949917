//! # vine-reconcile
//!
//! Drives the lifecycle state machine from store change notifications.
//!
//! The directory store emits (old, new) snapshot pairs whenever a share
//! action mutates. The [`Reconciler`] replays each pair through the
//! lifecycle machine: equal statuses are an idempotent skip (duplicate
//! deliveries are expected), illegal edges are reported — not retried —
//! on the returned [`ReconcileReport`], and one bad record never blocks
//! the rest of its batch.

pub mod reconcile;

pub use reconcile::{ReconcileReport, Reconciler, ShareActionChange, TransitionRequest};

//! # vine-directory
//!
//! The directory store interface for Vine.
//!
//! The directory store is the sole persistent owner of every entity —
//! users, challenges, share actions, transactions, contact records. In
//! production it is a remote graph-query service; this crate defines the
//! narrow [`DirectoryStore`] trait the engine consumes, the [`Deadline`]
//! call-context every remote call must honor, and [`MemoryDirectory`],
//! a mutex-guarded reference implementation for tests and local runs.
//!
//! Reads are point-in-time snapshots. Writes round-trip through the
//! store. Callers must tolerate stale reads between a read and the
//! subsequent write; nothing here locks.

pub mod deadline;
pub mod error;
pub mod memory;
pub mod store;

pub use deadline::Deadline;
pub use error::DirectoryError;
pub use memory::MemoryDirectory;
pub use store::DirectoryStore;

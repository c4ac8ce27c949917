//! # vine-tree
//!
//! Builds and walks the referral forest.
//!
//! Every transaction wraps exactly one share action and points at zero
//! or one parent transaction. The set of transactions for a challenge
//! forms a forest rooted at challenge-creation events. [`TreeBuilder`]
//! creates roots and children through the directory store and resolves
//! ancestor chains, defending against corrupted store data.

pub mod builder;
pub mod error;

pub use builder::TreeBuilder;
pub use error::TreeError;

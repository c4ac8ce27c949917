//! # vine-model
//!
//! Entity model for the Vine referral engine.
//!
//! Every entity here lives authoritatively in the remote directory store;
//! the structs in this crate are point-in-time snapshots plus the input
//! types for store mutations. Ids are opaque strings minted by the store.
//!
//! ## Key types
//!
//! - [`User`] — a person, keyed by email, possibly sparse
//! - [`Challenge`] — a referral campaign started from an inbound email
//! - [`ShareAction`] — one referral attempt, governed by [`ActionStatus`]
//! - [`Transaction`] — a node in the referral forest, wraps one ShareAction
//! - [`ShareActionContact`] — "this referral was forwarded to this person"

pub mod challenge;
pub mod share;
pub mod transaction;
pub mod user;

pub use challenge::{Challenge, CreateChallengeInput};
pub use share::{
    ActionStatus, CreateShareActionContactInput, CreateShareActionInput, ShareAction,
    ShareActionContact, UpdateShareActionInput,
};
pub use transaction::{CreateTransactionInput, Transaction};
pub use user::{CreateUserInput, UpdateUserInput, User};

//! # vine-reshare
//!
//! Turns an existing referral into a forwardable one.
//!
//! Given a challenge and a parent transaction, [`ReshareGenerator`]
//! mints a child transaction and renders an HTML page whose only job is
//! to open the visitor's mail client with everything pre-filled: the
//! bcc carries the `share+<child-id>@<domain>` command address, so the
//! act of forwarding the email re-enters the mail router and records
//! the reshare.

pub mod error;
pub mod generate;
mod page;

pub use error::ReshareError;
pub use generate::{ReshareConfig, ReshareGenerator};

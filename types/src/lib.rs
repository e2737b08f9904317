//! Core domain types for the ownable registry.
//!
//! This crate contains pure value types with no IO and minimal dependencies:
//! identities, the ownership-change event, and the guard rejections. Both the
//! registry and any runtime hosting it depend on these.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod error;
mod event;
mod identity;

pub use error::{InvalidOwner, OwnershipError, RejectReason};
pub use event::OwnershipTransferred;
pub use identity::{IDENTITY_LEN, Identity, ParseIdentityError};

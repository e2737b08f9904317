//! The single-owner registry.
//!
//! # State machine
//!
//! ```text
//! deploy(caller) --> Owned(caller)
//!
//! Owned(old) --transfer_ownership(new)--> Owned(new)     emits (old, new)
//!            \--any guard fails---------> Owned(old)     emits nothing
//! ```
//!
//! # Guards
//!
//! Evaluated in this order; the first failure is the one reported:
//!
//! 1. caller == owner, else `NOT_OWNER`
//! 2. new owner != zero, else `ZERO_ADDRESS`
//! 3. new owner != owner, else `SAME_OWNER`
//!
//! All guards run before the write, so a rejected call never mutates state.

use std::mem;

use serde::{Deserialize, Serialize};

use ownable_types::{Identity, OwnershipError, OwnershipTransferred};

use crate::context::CallerContext;
use crate::sink::EventSink;

/// Holds exactly one owner identity, which is never [`Identity::ZERO`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerRegistry {
    current: Identity,
}

/// Persistable copy of a registry's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerSnapshot {
    pub owner: Identity,
}

impl OwnerRegistry {
    /// Create a registry owned by whoever is deploying it.
    pub fn deploy<C>(ctx: &C) -> Result<Self, OwnershipError>
    where
        C: CallerContext + ?Sized,
    {
        let deployer = ctx.caller();
        if deployer.is_zero() {
            tracing::warn!("Refusing to deploy registry from the zero identity");
            return Err(OwnershipError::zero_address());
        }

        tracing::debug!(owner = %deployer, "Registry deployed");
        Ok(Self { current: deployer })
    }

    /// Rebuild a registry from a snapshot taken by [`OwnerRegistry::snapshot`].
    ///
    /// Snapshots come from outside the process, so the zero-owner invariant is
    /// checked again here.
    pub fn restore(snapshot: OwnerSnapshot) -> Result<Self, OwnershipError> {
        if snapshot.owner.is_zero() {
            return Err(OwnershipError::zero_address());
        }
        Ok(Self {
            current: snapshot.owner,
        })
    }

    #[must_use]
    pub fn snapshot(&self) -> OwnerSnapshot {
        OwnerSnapshot {
            owner: self.current,
        }
    }

    #[must_use]
    pub fn owner(&self) -> Identity {
        self.current
    }

    #[must_use]
    pub fn is_owner<C>(&self, ctx: &C) -> bool
    where
        C: CallerContext + ?Sized,
    {
        ctx.caller() == self.current
    }

    /// Authorization guard shared by every owner-only operation.
    pub fn require_owner<C>(&self, ctx: &C) -> Result<(), OwnershipError>
    where
        C: CallerContext + ?Sized,
    {
        if self.is_owner(ctx) {
            Ok(())
        } else {
            Err(OwnershipError::Unauthorized)
        }
    }

    /// Reassign ownership to `new_owner`.
    ///
    /// On success the new owner is visible immediately and exactly one
    /// [`OwnershipTransferred`] is recorded on `sink`. On failure nothing is
    /// written and nothing is recorded.
    pub fn transfer_ownership<C, S>(
        &mut self,
        ctx: &C,
        sink: &mut S,
        new_owner: Identity,
    ) -> Result<(), OwnershipError>
    where
        C: CallerContext + ?Sized,
        S: EventSink + ?Sized,
    {
        let caller = ctx.caller();
        if let Err(err) = self.check_transfer(caller, new_owner) {
            tracing::warn!(
                caller = %caller,
                owner = %self.current,
                new_owner = %new_owner,
                reason = err.code(),
                "Ownership transfer rejected"
            );
            return Err(err);
        }

        let previous_owner = mem::replace(&mut self.current, new_owner);
        sink.record(OwnershipTransferred::new(previous_owner, new_owner));

        tracing::info!(
            previous_owner = %previous_owner,
            new_owner = %new_owner,
            "Ownership transferred"
        );
        Ok(())
    }

    fn check_transfer(&self, caller: Identity, new_owner: Identity) -> Result<(), OwnershipError> {
        if caller != self.current {
            return Err(OwnershipError::Unauthorized);
        }
        if new_owner.is_zero() {
            return Err(OwnershipError::zero_address());
        }
        if new_owner == self.current {
            return Err(OwnershipError::same_owner());
        }
        Ok(())
    }
}

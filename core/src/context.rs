//! Boundary: who is making the current call.
//!
//! The runtime hosting a registry owns caller authentication. The registry only
//! ever asks [`CallerContext::caller`] and compares the answer by equality.

use ownable_types::Identity;

/// Reports the identity invoking the current operation.
pub trait CallerContext {
    fn caller(&self) -> Identity;
}

impl<C: CallerContext + ?Sized> CallerContext for &C {
    fn caller(&self) -> Identity {
        (**self).caller()
    }
}

/// A caller fixed for the lifetime of one call, e.g. the signer of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Caller(Identity);

impl Caller {
    #[must_use]
    pub const fn new(identity: Identity) -> Self {
        Self(identity)
    }
}

impl CallerContext for Caller {
    fn caller(&self) -> Identity {
        self.0
    }
}

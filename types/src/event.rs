use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Identity;

/// Immutable record of one ownership transition, in (previous, new) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnershipTransferred {
    previous_owner: Identity,
    new_owner: Identity,
}

impl OwnershipTransferred {
    pub const NAME: &'static str = "OwnershipTransferred";

    #[must_use]
    pub const fn new(previous_owner: Identity, new_owner: Identity) -> Self {
        Self {
            previous_owner,
            new_owner,
        }
    }

    #[must_use]
    pub const fn previous_owner(&self) -> Identity {
        self.previous_owner
    }

    #[must_use]
    pub const fn new_owner(&self) -> Identity {
        self.new_owner
    }
}

impl fmt::Display for OwnershipTransferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}, {})",
            Self::NAME,
            self.previous_owner,
            self.new_owner
        )
    }
}

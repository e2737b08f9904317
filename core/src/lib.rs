//! Single-owner access control.
//!
//! [`OwnerRegistry`] holds one owner identity and only lets that owner hand it
//! to someone else. The registry never learns who is calling on its own: the
//! hosting runtime supplies a [`CallerContext`] per call and an [`EventSink`]
//! for the resulting [`OwnershipTransferred`] notifications.
//!
//! ```
//! use ownable_core::{Caller, EventLog, OwnerRegistry};
//! use ownable_types::{IDENTITY_LEN, Identity};
//!
//! let deployer = Identity::from_bytes([1; IDENTITY_LEN]);
//! let heir = Identity::from_bytes([2; IDENTITY_LEN]);
//!
//! let mut registry = OwnerRegistry::deploy(&Caller::new(deployer)).unwrap();
//! let mut log = EventLog::new();
//! registry
//!     .transfer_ownership(&Caller::new(deployer), &mut log, heir)
//!     .unwrap();
//!
//! assert_eq!(registry.owner(), heir);
//! assert_eq!(log.len(), 1);
//! ```

mod context;
mod registry;
mod sink;

pub use context::{Caller, CallerContext};
pub use registry::{OwnerRegistry, OwnerSnapshot};
pub use sink::{EventLog, EventSink};

pub use ownable_types::{Identity, OwnershipError, OwnershipTransferred};

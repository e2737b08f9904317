//! Shared infrastructure utilities for ownable.
//!
//! Kept out of the IO-free `ownable-types` and `ownable-core` crates:
//!
//! - **`atomic_write`**: Crash-safe file persistence (temp + rename)

mod atomic_write;

pub use atomic_write::{atomic_write, recover_bak_file};

//! RootFS: decide whether a worker can supply the root filesystem a task asks for.
//!
//! A worker advertises a scheme-keyed collection of providers. Each provider
//! either accepts any rootfs URL for its scheme or only those drawn from a
//! fixed allow-list. Schedulers match a task's rootfs URL against that
//! collection.
//!
//! ```rust
//! use rootfs::{RootFsProvider, RootFsProviders};
//!
//! let providers = RootFsProviders::new()
//!     .with("docker", RootFsProvider::arbitrary())
//!     .with("preloaded", RootFsProvider::fixed_set(["cflinuxfs4"]));
//!
//! assert!(providers.match_rootfs("preloaded:cflinuxfs4"));
//! assert!(!providers.match_rootfs("missingscheme://host/path"));
//! ```

pub use rootfs_providers::*;

//! RootFS providers: which root filesystems can a worker supply?
//!
//! A worker advertises a [`RootFsProviders`] collection mapping URL schemes to
//! providers. A scheduler asks the collection whether it can satisfy a task's
//! rootfs URL:
//!
//! - [`ArbitraryProvider`]: any URL with the scheme is acceptable
//!   (e.g. `docker`).
//! - [`FixedSetProvider`]: only payloads from an allow-list are acceptable
//!   (e.g. `preloaded:cflinuxfs4`).
//!
//! Collections travel as tagged JSON (see [`codec`]) and can be loaded from a
//! file at startup (see [`load`]).
//!
//! # Example
//!
//! ```rust
//! use rootfs_providers::RootFsProviders;
//!
//! let providers = RootFsProviders::from_json_str(r#"{
//!     "docker": {"type": "arbitrary"},
//!     "preloaded": {"type": "fixed_set", "set": {"cflinuxfs4": {}}}
//! }"#).unwrap();
//!
//! assert!(providers.match_rootfs("docker:///library/ubuntu"));
//! assert!(providers.match_rootfs("preloaded:cflinuxfs4"));
//! assert!(!providers.match_rootfs("preloaded:cflinuxfs3"));
//! assert!(!providers.match_rootfs("oci:///library/ubuntu"));
//! ```

pub mod codec;
mod error;
pub mod load;
pub mod payload;
mod provider;
mod providers;
mod set;

pub use error::Error;
pub use payload::candidate_key;
pub use provider::{ArbitraryProvider, FixedSetProvider, RootFsMatcher, RootFsProvider};
pub use providers::RootFsProviders;
pub use set::StringSet;

// Re-exported so callers can build URLs without naming the dependency.
pub use url::{ParseError, Url};

//! Deriving the candidate key a fixed-set provider tests for membership.
//!
//! A rootfs URL comes in one of two forms:
//!
//! - opaque, `scheme:value`: the key is `value` as the URL parser yields it
//!   (`preloaded:cflinuxfs4` → `cflinuxfs4`).
//! - hierarchical, `scheme://host[:port]/path`: the key is the authority host,
//!   its port if one is given, then the path
//!   (`docker://registry:5000/library/ubuntu` → `registry:5000/library/ubuntu`,
//!   `docker:///library/ubuntu` → `/library/ubuntu`).
//!
//! Query and fragment never take part, and neither does userinfo
//! (`docker://user:pw@registry/x` → `registry/x`). Nothing is normalized
//! beyond what `url::Url` already does while parsing.

use std::borrow::Cow;

use url::Url;

/// The payload string of `rootfs` used as a fixed-set key.
pub fn candidate_key(rootfs: &Url) -> Cow<'_, str> {
    if rootfs.cannot_be_a_base() {
        return Cow::Borrowed(rootfs.path());
    }

    match (rootfs.host_str(), rootfs.port()) {
        (Some(host), Some(port)) => Cow::Owned(format!("{}:{}{}", host, port, rootfs.path())),
        (Some(host), None) => Cow::Owned(format!("{}{}", host, rootfs.path())),
        (None, _) => Cow::Borrowed(rootfs.path()),
    }
}

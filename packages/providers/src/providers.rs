//! The scheme-keyed provider collection a worker advertises.

use std::collections::btree_map;
use std::collections::BTreeMap;

use url::Url;

use crate::provider::{RootFsMatcher, RootFsProvider};

/// Rootfs providers keyed by URL scheme.
///
/// Schemes are compared case-sensitively. Inserting a scheme that is already
/// present replaces its provider. Matching never mutates the collection.
///
/// # Example
///
/// ```rust
/// use rootfs_providers::{RootFsMatcher, RootFsProvider, RootFsProviders, Url};
///
/// let providers = RootFsProviders::new()
///     .with("docker", RootFsProvider::arbitrary())
///     .with("preloaded", RootFsProvider::fixed_set(["cflinuxfs4"]));
///
/// assert!(providers.matches(&Url::parse("preloaded:cflinuxfs4").unwrap()));
/// assert!(!providers.matches(&Url::parse("preloaded:cflinuxfs3").unwrap()));
/// assert!(providers.match_rootfs("docker:///library/ubuntu"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RootFsProviders {
    providers: BTreeMap<String, RootFsProvider>,
}

impl RootFsProviders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `provider` for `scheme`, returning the provider it replaced.
    pub fn insert(
        &mut self,
        scheme: impl Into<String>,
        provider: impl Into<RootFsProvider>,
    ) -> Option<RootFsProvider> {
        self.providers.insert(scheme.into(), provider.into())
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, scheme: impl Into<String>, provider: impl Into<RootFsProvider>) -> Self {
        self.insert(scheme, provider);
        self
    }

    pub fn remove(&mut self, scheme: &str) -> Option<RootFsProvider> {
        self.providers.remove(scheme)
    }

    pub fn get(&self, scheme: &str) -> Option<&RootFsProvider> {
        self.providers.get(scheme)
    }

    pub fn contains_scheme(&self, scheme: &str) -> bool {
        self.providers.contains_key(scheme)
    }

    /// Registered schemes in sorted order.
    pub fn schemes(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, RootFsProvider> {
        self.providers.iter()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Parse `rootfs` and match it.
    ///
    /// A string that is not a URL can never be satisfied, so it is a
    /// non-match rather than an error.
    pub fn match_rootfs(&self, rootfs: &str) -> bool {
        match Url::parse(rootfs) {
            Ok(url) => self.matches(&url),
            Err(err) => {
                tracing::debug!(rootfs, error = %err, "rootfs is not a valid URL");
                false
            }
        }
    }
}

impl RootFsMatcher for RootFsProviders {
    /// Dispatch on the URL's scheme. An unregistered scheme does not match.
    fn matches(&self, rootfs: &Url) -> bool {
        match self.providers.get(rootfs.scheme()) {
            Some(provider) => provider.matches(rootfs),
            None => {
                tracing::trace!(scheme = rootfs.scheme(), "no rootfs provider for scheme");
                false
            }
        }
    }
}

impl<K, P> FromIterator<(K, P)> for RootFsProviders
where
    K: Into<String>,
    P: Into<RootFsProvider>,
{
    fn from_iter<I: IntoIterator<Item = (K, P)>>(iter: I) -> Self {
        let mut providers = Self::new();
        providers.extend(iter);
        providers
    }
}

impl<K, P> Extend<(K, P)> for RootFsProviders
where
    K: Into<String>,
    P: Into<RootFsProvider>,
{
    fn extend<I: IntoIterator<Item = (K, P)>>(&mut self, iter: I) {
        for (scheme, provider) in iter {
            self.insert(scheme, provider);
        }
    }
}

impl From<BTreeMap<String, RootFsProvider>> for RootFsProviders {
    fn from(providers: BTreeMap<String, RootFsProvider>) -> Self {
        Self { providers }
    }
}

impl<'a> IntoIterator for &'a RootFsProviders {
    type Item = (&'a String, &'a RootFsProvider);
    type IntoIter = btree_map::Iter<'a, String, RootFsProvider>;

    fn into_iter(self) -> Self::IntoIter {
        self.providers.iter()
    }
}

impl IntoIterator for RootFsProviders {
    type Item = (String, RootFsProvider);
    type IntoIter = btree_map::IntoIter<String, RootFsProvider>;

    fn into_iter(self) -> Self::IntoIter {
        self.providers.into_iter()
    }
}

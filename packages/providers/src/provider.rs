//! The two kinds of rootfs provider.
//!
//! A provider decides whether a rootfs URL is acceptable for the scheme it is
//! registered under. [`ArbitraryProvider`] accepts anything; a
//! [`FixedSetProvider`] accepts only payloads from an enumerated allow-list.
//! [`RootFsProvider`] is the closed union of the two and carries the tagged
//! wire form:
//!
//! ```json
//! {"type": "arbitrary"}
//! {"type": "fixed_set", "set": {"cflinuxfs3": {}, "cflinuxfs4": {}}}
//! ```

use std::fmt;

use serde::de::value::MapAccessDeserializer;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use url::Url;

use crate::payload::candidate_key;
use crate::set::StringSet;

/// Something that can accept or reject a rootfs URL.
///
/// Matching is total: a rejection is `false`, never an error.
pub trait RootFsMatcher {
    fn matches(&self, rootfs: &Url) -> bool;
}

/// Accepts every URL.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct ArbitraryProvider;

impl RootFsMatcher for ArbitraryProvider {
    fn matches(&self, _rootfs: &Url) -> bool {
        true
    }
}

/// Accepts a URL iff its payload is a member of a fixed set.
///
/// See [`crate::payload`] for how the payload is derived from the URL. On the
/// wire it only appears inside a [`RootFsProvider`] entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FixedSetProvider {
    set: StringSet,
}

impl FixedSetProvider {
    /// Build a provider from its allowed payloads. Duplicates collapse.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            set: keys.into_iter().collect(),
        }
    }

    /// Test an already derived payload key.
    pub fn contains(&self, key: &str) -> bool {
        self.set.contains(key)
    }

    pub fn set(&self) -> &StringSet {
        &self.set
    }
}

impl From<StringSet> for FixedSetProvider {
    fn from(set: StringSet) -> Self {
        Self { set }
    }
}

impl RootFsMatcher for FixedSetProvider {
    fn matches(&self, rootfs: &Url) -> bool {
        self.contains(&candidate_key(rootfs))
    }
}

/// A provider of either kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RootFsProvider {
    /// Any payload is acceptable.
    Arbitrary,
    /// Only payloads in the set are acceptable.
    FixedSet(FixedSetProvider),
}

impl RootFsProvider {
    pub fn arbitrary() -> Self {
        RootFsProvider::Arbitrary
    }

    pub fn fixed_set<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RootFsProvider::FixedSet(FixedSetProvider::new(keys))
    }
}

impl From<ArbitraryProvider> for RootFsProvider {
    fn from(_: ArbitraryProvider) -> Self {
        RootFsProvider::Arbitrary
    }
}

impl From<FixedSetProvider> for RootFsProvider {
    fn from(provider: FixedSetProvider) -> Self {
        RootFsProvider::FixedSet(provider)
    }
}

/// Encoding shape of [`RootFsProvider`].
#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum TaggedProviderRef<'a> {
    Arbitrary,
    FixedSet { set: &'a StringSet },
}

/// Decoding shape of [`RootFsProvider`].
///
/// Derived internally tagged enums also accept a sequence whose first element
/// is the tag, so this is only ever fed a map.
#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum TaggedProvider {
    Arbitrary,
    FixedSet { set: StringSet },
}

impl Serialize for RootFsProvider {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let tagged = match self {
            RootFsProvider::Arbitrary => TaggedProviderRef::Arbitrary,
            RootFsProvider::FixedSet(provider) => TaggedProviderRef::FixedSet {
                set: &provider.set,
            },
        };
        tagged.serialize(serializer)
    }
}

struct RootFsProviderVisitor;

impl<'de> Visitor<'de> for RootFsProviderVisitor {
    type Value = RootFsProvider;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object with a `type` of \"arbitrary\" or \"fixed_set\"")
    }

    fn visit_map<A: MapAccess<'de>>(self, access: A) -> Result<Self::Value, A::Error> {
        Ok(
            match TaggedProvider::deserialize(MapAccessDeserializer::new(access))? {
                TaggedProvider::Arbitrary => RootFsProvider::Arbitrary,
                TaggedProvider::FixedSet { set } => RootFsProvider::FixedSet(set.into()),
            },
        )
    }
}

impl<'de> Deserialize<'de> for RootFsProvider {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RootFsProviderVisitor)
    }
}

impl RootFsMatcher for RootFsProvider {
    fn matches(&self, rootfs: &Url) -> bool {
        match self {
            RootFsProvider::Arbitrary => ArbitraryProvider.matches(rootfs),
            RootFsProvider::FixedSet(provider) => provider.matches(rootfs),
        }
    }
}

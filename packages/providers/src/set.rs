//! A membership-only set of strings.
//!
//! On the wire a `StringSet` is a JSON object whose keys are the members and
//! whose values are empty objects:
//!
//! ```json
//! {"baz": {}, "quux": {}}
//! ```

use std::collections::btree_set;
use std::collections::BTreeSet;
use std::fmt;

use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An unordered set of strings compared by exact byte equality.
///
/// Duplicates collapse on insertion. Iteration is sorted, which keeps the
/// encoded form deterministic without giving order any meaning.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq)]
pub struct StringSet {
    members: BTreeSet<String>,
}

impl StringSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a member. Returns `false` if it was already present.
    pub fn insert(&mut self, member: impl Into<String>) -> bool {
        self.members.insert(member.into())
    }

    /// Remove a member. Returns `true` if it was present.
    pub fn remove(&mut self, member: &str) -> bool {
        self.members.remove(member)
    }

    pub fn contains(&self, member: &str) -> bool {
        self.members.contains(member)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, String> {
        self.members.iter()
    }
}

impl<S: Into<String>> FromIterator<S> for StringSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for StringSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.members.extend(iter.into_iter().map(Into::into));
    }
}

impl<'a> IntoIterator for &'a StringSet {
    type Item = &'a String;
    type IntoIter = btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl IntoIterator for StringSet {
    type Item = String;
    type IntoIter = btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

/// The `{}` written as the value of every member.
#[derive(Serialize)]
struct Unit {}

impl Serialize for StringSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.members.len()))?;
        for member in &self.members {
            map.serialize_entry(member, &Unit {})?;
        }
        map.end()
    }
}

struct StringSetVisitor;

impl<'de> Visitor<'de> for StringSetVisitor {
    type Value = StringSet;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object whose keys are the set members")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut set = StringSet::new();
        // Values carry no meaning; only the keys are members.
        while let Some((member, IgnoredAny)) = access.next_entry::<String, IgnoredAny>()? {
            set.insert(member);
        }
        Ok(set)
    }
}

impl<'de> Deserialize<'de> for StringSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(StringSetVisitor)
    }
}

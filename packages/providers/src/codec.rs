//! Tagged JSON form of a provider collection.
//!
//! A collection is a JSON object keyed by scheme. Each value carries a `type`
//! discriminator:
//!
//! ```json
//! {
//!     "docker": {"type": "arbitrary"},
//!     "preloaded": {"type": "fixed_set", "set": {"cflinuxfs4": {}}}
//! }
//! ```
//!
//! Decoding is all-or-nothing: one bad entry fails the whole document and no
//! partial collection is returned.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;
use crate::provider::RootFsProvider;
use crate::providers::RootFsProviders;

impl Serialize for RootFsProviders {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (scheme, provider) in self {
            map.serialize_entry(scheme, provider)?;
        }
        map.end()
    }
}

struct RootFsProvidersVisitor;

impl<'de> Visitor<'de> for RootFsProvidersVisitor {
    type Value = RootFsProviders;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object mapping schemes to rootfs providers")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut providers = RootFsProviders::new();
        while let Some(scheme) = access.next_key::<String>()? {
            let provider = access.next_value::<RootFsProvider>().map_err(|err| {
                <A::Error as de::Error>::custom(format_args!(
                    "invalid rootfs provider for scheme '{}': {}",
                    scheme, err
                ))
            })?;
            providers.insert(scheme, provider);
        }
        Ok(providers)
    }
}

impl<'de> Deserialize<'de> for RootFsProviders {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RootFsProvidersVisitor)
    }
}

impl RootFsProviders {
    /// Decode a collection from a parsed JSON document.
    ///
    /// A bad entry yields [`Error::InvalidProvider`] naming its scheme; a
    /// document that is not an object yields [`Error::Json`].
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, Error> {
        let entries: BTreeMap<String, serde_json::Value> = serde_json::from_value(value)?;
        entries
            .into_iter()
            .map(|(scheme, entry)| match serde_json::from_value::<RootFsProvider>(entry) {
                Ok(provider) => Ok((scheme, provider)),
                Err(source) => Err(Error::InvalidProvider { scheme, source }),
            })
            .collect()
    }

    pub fn from_json_str(s: &str) -> Result<Self, Error> {
        Self::from_json_value(serde_json::from_str(s)?)
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, Error> {
        Self::from_json_value(serde_json::from_slice(bytes)?)
    }

    pub fn to_json_value(&self) -> Result<serde_json::Value, Error> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json_string(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_string_pretty(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn providers() -> RootFsProviders {
        RootFsProviders::new()
            .with("foo", RootFsProvider::arbitrary())
            .with("bar", RootFsProvider::fixed_set(["baz", "quux"]))
    }

    fn providers_json() -> serde_json::Value {
        json!({
            "foo": {"type": "arbitrary"},
            "bar": {"type": "fixed_set", "set": {"baz": {}, "quux": {}}}
        })
    }

    // ==================== Encoding ====================

    #[test]
    fn serializes() {
        assert_eq!(providers().to_json_value().unwrap(), providers_json());
    }

    #[test]
    fn empty_collection_serializes_as_empty_object() {
        assert_eq!(RootFsProviders::new().to_json_string().unwrap(), "{}");
    }

    #[test]
    fn string_forms_agree_with_value_form() {
        let compact: serde_json::Value =
            serde_json::from_str(&providers().to_json_string().unwrap()).unwrap();
        let pretty: serde_json::Value =
            serde_json::from_str(&providers().to_json_string_pretty().unwrap()).unwrap();
        assert_eq!(compact, providers_json());
        assert_eq!(pretty, providers_json());
    }

    // ==================== Decoding ====================

    #[test]
    fn deserializes() {
        let decoded = RootFsProviders::from_json_value(providers_json()).unwrap();
        assert_eq!(decoded, providers());
    }

    #[test]
    fn deserializes_through_serde() {
        let decoded: RootFsProviders = serde_json::from_value(providers_json()).unwrap();
        assert_eq!(decoded, providers());
    }

    #[test]
    fn round_trips() {
        let original = RootFsProviders::new()
            .with("docker", RootFsProvider::arbitrary())
            .with("preloaded", RootFsProvider::fixed_set(["cflinuxfs3", "cflinuxfs4"]))
            .with("empty", RootFsProvider::fixed_set(Vec::<String>::new()))
            .with("odd", RootFsProvider::fixed_set(["", "with space", "ÜNICODE", "a/b?c"]));

        let text = original.to_json_string().unwrap();
        assert_eq!(RootFsProviders::from_json_str(&text).unwrap(), original);
        assert_eq!(
            serde_json::from_str::<RootFsProviders>(&text).unwrap(),
            original
        );
    }

    #[test]
    fn unknown_type_names_scheme() {
        let err = RootFsProviders::from_json_value(json!({
            "foo": {"type": "arbitrary"},
            "bar": {"type": "unknown"}
        }))
        .unwrap_err();
        assert!(matches!(err, Error::InvalidProvider { .. }));
        assert_eq!(err.scheme(), Some("bar"));
    }

    #[test]
    fn unknown_type_fails_through_serde() {
        let err = serde_json::from_value::<RootFsProviders>(json!({
            "bar": {"type": "unknown"}
        }))
        .unwrap_err();
        assert!(err.to_string().contains("scheme 'bar'"));
    }

    #[test]
    fn missing_type_fails() {
        let err = RootFsProviders::from_json_value(json!({"foo": {}})).unwrap_err();
        assert_eq!(err.scheme(), Some("foo"));
    }

    #[test]
    fn non_object_entry_fails() {
        let err = RootFsProviders::from_json_value(json!({"foo": "arbitrary"})).unwrap_err();
        assert_eq!(err.scheme(), Some("foo"));
    }

    #[test]
    fn non_object_set_fails() {
        let err = RootFsProviders::from_json_value(json!({
            "bar": {"type": "fixed_set", "set": ["baz", "quux"]}
        }))
        .unwrap_err();
        assert_eq!(err.scheme(), Some("bar"));
    }

    #[test]
    fn missing_set_fails() {
        let err =
            RootFsProviders::from_json_value(json!({"bar": {"type": "fixed_set"}})).unwrap_err();
        assert_eq!(err.scheme(), Some("bar"));
    }

    #[test]
    fn non_object_document_fails() {
        let err = RootFsProviders::from_json_value(json!(["foo"])).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
        assert!(serde_json::from_value::<RootFsProviders>(json!("foo")).is_err());
    }

    #[test]
    fn malformed_text_fails() {
        let err = RootFsProviders::from_json_str("{\"foo\": ").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
        let err = RootFsProviders::from_json_slice(b"not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn decodes_from_bytes() {
        let bytes = serde_json::to_vec(&providers_json()).unwrap();
        assert_eq!(RootFsProviders::from_json_slice(&bytes).unwrap(), providers());
    }
}

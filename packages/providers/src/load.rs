//! Loading an advertised provider collection at startup.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::Error;
use crate::providers::RootFsProviders;

/// Decode a collection from any JSON byte source.
pub fn from_reader<R: Read>(reader: R) -> Result<RootFsProviders, Error> {
    let value: serde_json::Value = serde_json::from_reader(reader)?;
    RootFsProviders::from_json_value(value)
}

/// Decode a collection from a JSON file.
pub fn from_path(path: impl AsRef<Path>) -> Result<RootFsProviders, Error> {
    let path = path.as_ref();
    tracing::debug!("Reading rootfs providers from {}...", path.display());

    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let providers = from_reader(BufReader::new(file))?;

    tracing::debug!(
        schemes = providers.len(),
        "Loaded rootfs providers from {}",
        path.display()
    );
    Ok(providers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::RootFsProvider;
    use std::io::Write;

    #[test]
    fn reads_from_reader() {
        let json = br#"{"docker": {"type": "arbitrary"}}"#;
        let providers = from_reader(&json[..]).unwrap();
        assert_eq!(providers.get("docker"), Some(&RootFsProvider::Arbitrary));
    }

    #[test]
    fn reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"preloaded": {{"type": "fixed_set", "set": {{"cflinuxfs4": {{}}}}}}}}"#
        )
        .unwrap();

        let providers = from_path(file.path()).unwrap();
        assert_eq!(
            providers.get("preloaded"),
            Some(&RootFsProvider::fixed_set(["cflinuxfs4"]))
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = from_path(&path).unwrap_err();
        match err {
            Error::Io { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn bad_entry_in_file_names_scheme() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"docker": {"type": "bogus"}}"#).unwrap();
        let err = from_path(file.path()).unwrap_err();
        assert_eq!(err.scheme(), Some("docker"));
    }

    #[test]
    fn truncated_file_is_json_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"docker": {"type": "#).unwrap();
        let err = from_path(file.path()).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}

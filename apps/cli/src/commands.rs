//! Command implementations

use anyhow::{bail, Context};
use hrecord_binding::{from_xml_str, to_xml_string, WriteSettings};
use hrecord_things::{parse_document, parse_thing, AnyThing, ThingKind};
use hrecord_types::blob::{
    Blob, BlobChannel, BlobError, BlobHasher, BlobHashInfo, BlobPolicy, Sha256BlockHasher,
};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use uuid::Uuid;

fn read_document(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn parse(xml: &str, type_id: Option<Uuid>) -> anyhow::Result<AnyThing> {
    let thing = match type_id {
        Some(type_id) => parse_thing(type_id, xml),
        None => parse_document(xml),
    };
    thing.context("Failed to parse document")
}

/// Lists every supported thing type.
pub fn types() -> String {
    ThingKind::ALL
        .iter()
        .map(|kind| {
            format!(
                "{}  {:<24} <{}>",
                kind.type_id(),
                kind.type_name(),
                kind.root_element()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Routes a document and describes it.
pub fn inspect(path: &Path, type_id: Option<Uuid>) -> anyhow::Result<String> {
    let thing = parse(&read_document(path)?, type_id)?;
    let kind = thing.kind();
    Ok(format!(
        "Type:    {} ({})\nSummary: {}",
        kind.type_name(),
        kind.type_id(),
        thing.summary()
    ))
}

/// Parses and re-serializes a document. With `check`, also verifies that
/// writing the re-parsed output yields identical bytes.
pub fn roundtrip(
    path: &Path,
    type_id: Option<Uuid>,
    settings: &WriteSettings,
    check: bool,
) -> anyhow::Result<String> {
    let thing = parse(&read_document(path)?, type_id)?;
    let written = thing
        .to_xml_with(settings)
        .context("Failed to write document")?;

    if check {
        let again = parse(&written, Some(thing.kind().type_id()))?
            .to_xml_with(settings)
            .context("Failed to write re-parsed document")?;
        if again != written {
            bail!("Output is not stable: a second write produced different bytes");
        }
        tracing::info!(path = %path.display(), "round trip is stable");
    }
    Ok(written)
}

/// Computes the `hash-info` fragment for a file, or verifies the file
/// against an existing fragment.
pub fn hash(
    path: &Path,
    policy: &BlobPolicy,
    verify: Option<&Path>,
    settings: &WriteSettings,
) -> anyhow::Result<String> {
    let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;

    if let Some(info_path) = verify {
        let info: BlobHashInfo = from_xml_str(&read_document(info_path)?, "hash-info")
            .context("Failed to parse hash-info")?;
        let hasher = Sha256BlockHasher::for_info(&info)?;
        hasher.verify(&data, &info)?;
        return Ok(format!("OK {}", path.display()));
    }

    let hasher = Sha256BlockHasher::new(policy.block_size)?;
    let info = hasher.hash_info(&data)?;
    Ok(to_xml_string(&info, "hash-info", settings)?)
}

/// A single path component for `name`: a fresh UUID plus the name with
/// anything outside `[A-Za-z0-9._-]` replaced by `_`.
fn stored_file_name(name: &str) -> String {
    let safe: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if safe.is_empty() {
        format!("{}.bin", Uuid::new_v4())
    } else {
        format!("{}-{safe}", Uuid::new_v4())
    }
}

/// Stores blob content as files under a directory.
pub struct DirectoryChannel {
    root: PathBuf,
}

impl DirectoryChannel {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl BlobChannel for DirectoryChannel {
    fn upload(&mut self, name: &str, _content_type: &str, data: &[u8]) -> Result<String, BlobError> {
        fs::create_dir_all(&self.root)?;
        let path = self.root.join(stored_file_name(name));
        fs::write(&path, data)?;
        tracing::debug!(path = %path.display(), bytes = data.len(), "stored blob content");
        Ok(format!("file://{}", path.display()))
    }

    fn open<'c>(&'c mut self, url: &str) -> Result<Box<dyn Read + 'c>, BlobError> {
        let path = url
            .strip_prefix("file://")
            .ok_or_else(|| BlobError::Channel(format!("unsupported blob url: {url}")))?;
        Ok(Box::new(fs::File::open(path)?))
    }
}

/// Wraps a file as a `<blob>` element, inline or stored through `channel`.
pub fn blob(
    path: &Path,
    name: &str,
    content_type: &str,
    channel: &mut dyn BlobChannel,
    policy: &BlobPolicy,
    settings: &WriteSettings,
) -> anyhow::Result<String> {
    let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let mut blob = Blob::with_bytes(name, content_type, data)?;
    let mode = blob.commit(channel, policy)?;
    tracing::info!(?mode, blob = %blob, "blob committed");
    Ok(to_xml_string(&blob, "blob", settings)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrecord_types::blob::BlobContent;

    fn scratch_dir(label: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("hrecord-cli-{label}-{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn types_lists_every_kind() {
        let listing = types();
        assert_eq!(listing.lines().count(), ThingKind::ALL.len());
        assert!(listing.contains("4b7971d6-e427-427d-bf2c-2fbcf76606b3"));
        assert!(listing.contains("<heart-rate>"));
    }

    #[test]
    fn inspect_and_roundtrip_a_document() {
        let dir = scratch_dir("roundtrip");
        let path = dir.join("concern.xml");
        fs::write(
            &path,
            "<concern>\n  <description><text>Migraine</text></description>\n</concern>",
        )
        .unwrap();

        let report = inspect(&path, None).unwrap();
        assert!(report.contains("Type:    Concern"));
        assert!(report.ends_with("Summary: Migraine"));

        let written = roundtrip(&path, None, &WriteSettings::default(), true).unwrap();
        assert_eq!(
            written,
            "<concern><description><text>Migraine</text></description></concern>"
        );
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn hash_then_verify() {
        let dir = scratch_dir("hash");
        let data = dir.join("data.bin");
        fs::write(&data, vec![42u8; 100]).unwrap();
        let policy = BlobPolicy {
            inline_threshold: 10,
            block_size: 16,
        };

        let fragment = hash(&data, &policy, None, &WriteSettings::default()).unwrap();
        assert!(fragment.contains("<block-size>16</block-size>"));
        let info_path = dir.join("hash-info.xml");
        fs::write(&info_path, &fragment).unwrap();
        assert!(hash(&data, &policy, Some(&info_path), &WriteSettings::default()).is_ok());

        fs::write(&data, vec![43u8; 100]).unwrap();
        assert!(hash(&data, &policy, Some(&info_path), &WriteSettings::default()).is_err());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn stored_names_stay_inside_the_store() {
        let dir = scratch_dir("names");
        let store = dir.join("store");
        let mut channel = DirectoryChannel::new(&store);
        for name in ["../escape", "a/b/c", "/etc/passwd", "..", ""] {
            let url = channel.upload(name, "text/plain", b"x").unwrap();
            let path = PathBuf::from(url.strip_prefix("file://").unwrap());
            assert_eq!(path.parent(), Some(store.as_path()), "{name}");
            assert!(path.is_file());
        }
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 1);
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn large_blobs_go_through_the_channel() {
        let dir = scratch_dir("blob");
        let data = dir.join("scan.png");
        fs::write(&data, vec![1u8; 64]).unwrap();
        let mut channel = DirectoryChannel::new(dir.join("store"));
        let policy = BlobPolicy {
            inline_threshold: 32,
            block_size: 16,
        };

        let xml = blob(
            &data,
            "scan",
            "image/png",
            &mut channel,
            &policy,
            &WriteSettings::default(),
        )
        .unwrap();
        assert!(xml.contains("<blob-ref-url>file://"));
        assert!(!xml.contains("<base64data>"));

        let parsed: Blob = from_xml_str(&xml, "blob").unwrap();
        assert!(matches!(parsed.content(), BlobContent::Remote { .. }));
        let bytes = parsed.read_to_vec(&mut channel).unwrap();
        assert!(parsed.verify(&bytes, &Sha256BlockHasher::new(16).unwrap()).is_ok());
        fs::remove_dir_all(dir).unwrap();
    }
}

use super::error::{BlobError, Result};
use super::hash_info::{BlobHashInfo, DEFAULT_BLOCK_SIZE};
use super::hasher::{BlobHasher, Sha256BlockHasher};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hrecord_binding::validate::ensure_text;
use hrecord_binding::{require, Bindable, Error, TextPolicy, XmlNode, XmlSink};
use std::fmt;
use std::io::{self, Cursor, Read, Write};

/// Default largest payload embedded directly in the XML: 1 MiB.
pub const DEFAULT_INLINE_THRESHOLD: u64 = 1024 * 1024;

/// Where a blob's bytes currently live.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BlobContent {
    #[default]
    Empty,
    /// Bytes held in memory, written as `<base64data>`.
    Inline(Vec<u8>),
    /// Bytes stored out of band, written as `<blob-ref-url>`.
    Remote { url: String },
}

/// Transport for content that is too large to embed.
pub trait BlobChannel {
    /// Stores `data` and returns the URL it can be fetched from.
    fn upload(&mut self, name: &str, content_type: &str, data: &[u8]) -> Result<String>;

    fn open<'c>(&'c mut self, url: &str) -> Result<Box<dyn Read + 'c>>;
}

/// Decides how blob content is committed and hashed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlobPolicy {
    /// Payloads up to this many bytes are embedded inline.
    pub inline_threshold: u64,
    pub block_size: u32,
}

impl Default for BlobPolicy {
    fn default() -> Self {
        Self {
            inline_threshold: DEFAULT_INLINE_THRESHOLD,
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

/// Outcome of [`Blob::commit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitMode {
    /// Nothing changed since the last commit.
    Unchanged,
    Inline,
    Streamed,
    /// Only metadata changed on content that already lives remotely.
    MetadataOnly,
}

/// A named binary payload attached to a record.
///
/// ```xml
/// <blob>
///   <blob-info>
///     <name/>
///     <content-type>image/png</content-type>
///     <hash-info>...</hash-info>
///   </blob-info>
///   <content-length>1024</content-length>
///   <base64data>...</base64data>
/// </blob>
/// ```
///
/// The unnamed blob (empty name) is the default blob of a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blob {
    name: String,
    content_type: Option<String>,
    hash_info: Option<BlobHashInfo>,
    content_length: Option<u64>,
    content: BlobContent,
    dirty: bool,
}

impl Blob {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>) -> hrecord_binding::Result<Self> {
        let mut blob = Self {
            name: name.into(),
            ..Self::default()
        };
        blob.set_content_type(content_type)?;
        Ok(blob)
    }

    pub fn with_bytes(
        name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> hrecord_binding::Result<Self> {
        let mut blob = Self::new(name, content_type)?;
        blob.set_bytes(bytes);
        Ok(blob)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn hash_info(&self) -> Option<&BlobHashInfo> {
        self.hash_info.as_ref()
    }

    pub fn content_length(&self) -> Option<u64> {
        self.content_length
    }

    pub fn content(&self) -> &BlobContent {
        &self.content
    }

    /// True when content or metadata changed since the last parse or commit.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.dirty = true;
    }

    pub fn set_content_type(&mut self, content_type: impl Into<String>) -> hrecord_binding::Result<()> {
        self.content_type = Some(ensure_text(
            "content-type",
            content_type.into(),
            TextPolicy::NotWhitespace,
        )?);
        self.dirty = true;
        Ok(())
    }

    /// Replaces the content with in-memory bytes.
    pub fn set_bytes(&mut self, bytes: Vec<u8>) {
        self.content_length = Some(bytes.len() as u64);
        self.content = BlobContent::Inline(bytes);
        self.hash_info = None;
        self.dirty = true;
    }

    /// Inline bytes, if the content is held in memory.
    pub fn inline_bytes(&self) -> Option<&[u8]> {
        match &self.content {
            BlobContent::Inline(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Opens the content for reading, fetching remote content through `channel`.
    pub fn reader<'a>(&'a self, channel: &'a mut dyn BlobChannel) -> Result<Box<dyn Read + 'a>> {
        match &self.content {
            BlobContent::Empty => Ok(Box::new(io::empty())),
            BlobContent::Inline(bytes) => Ok(Box::new(Cursor::new(bytes.as_slice()))),
            BlobContent::Remote { url } => channel.open(url),
        }
    }

    /// Reads the whole content into memory.
    pub fn read_to_vec(&self, channel: &mut dyn BlobChannel) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.reader(channel)?.read_to_end(&mut bytes)?;
        Ok(bytes)
    }

    /// Starts replacing the content. Bytes written go to an in-memory buffer
    /// that becomes the new inline content.
    pub fn writer(&mut self) -> BlobWriter<'_> {
        self.set_bytes(Vec::new());
        BlobWriter { blob: self }
    }

    /// Checks `data` against the recorded hash.
    pub fn verify(&self, data: &[u8], hasher: &dyn BlobHasher) -> Result<()> {
        let info = self
            .hash_info
            .as_ref()
            .ok_or_else(|| BlobError::from(Error::MissingMandatory {
                record: Self::RECORD,
                field: "hash-info",
            }))?;
        hasher.verify(data, info)
    }

    /// Hashes pending content with `SHA256Block` at the policy's block size
    /// and decides whether it stays inline or is streamed through `channel`.
    /// Clears the dirty flag on success.
    pub fn commit(&mut self, channel: &mut dyn BlobChannel, policy: &BlobPolicy) -> Result<CommitMode> {
        let hasher = Sha256BlockHasher::new(policy.block_size)?;
        self.commit_with(channel, &hasher, policy.inline_threshold)
    }

    /// Like [`Blob::commit`], hashing with `hasher`. Content up to
    /// `inline_threshold` bytes stays inline.
    pub fn commit_with(
        &mut self,
        channel: &mut dyn BlobChannel,
        hasher: &dyn BlobHasher,
        inline_threshold: u64,
    ) -> Result<CommitMode> {
        if !self.dirty {
            return Ok(CommitMode::Unchanged);
        }
        let content_type = require(Self::RECORD, "content-type", &self.content_type)?.clone();

        let mode = match &self.content {
            BlobContent::Remote { .. } => CommitMode::MetadataOnly,
            BlobContent::Empty => {
                self.hash_info = Some(hasher.hash_info(&[])?);
                self.content_length = Some(0);
                self.content = BlobContent::Inline(Vec::new());
                CommitMode::Inline
            }
            BlobContent::Inline(bytes) => {
                let length = bytes.len() as u64;
                let hash_info = hasher.hash_info(bytes)?;
                let mode = if length <= inline_threshold {
                    CommitMode::Inline
                } else {
                    let url = channel.upload(&self.name, &content_type, bytes)?;
                    self.content = BlobContent::Remote { url };
                    CommitMode::Streamed
                };
                self.hash_info = Some(hash_info);
                self.content_length = Some(length);
                mode
            }
        };
        tracing::debug!(
            blob = %self.name,
            length = ?self.content_length,
            threshold = inline_threshold,
            ?mode,
            "committed blob"
        );
        self.dirty = false;
        Ok(mode)
    }
}

/// Streams bytes into a [`Blob`]. See [`Blob::writer`].
pub struct BlobWriter<'a> {
    blob: &'a mut Blob,
}

impl Write for BlobWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let BlobContent::Inline(bytes) = &mut self.blob.content {
            bytes.extend_from_slice(buf);
            self.blob.content_length = Some(bytes.len() as u64);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl fmt::Display for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.name.is_empty() { "(default)" } else { self.name.as_str() };
        write!(f, "{name}")?;
        if let Some(content_type) = &self.content_type {
            write!(f, " [{content_type}]")?;
        }
        if let Some(length) = self.content_length {
            write!(f, " {length} bytes")?;
        }
        Ok(())
    }
}

impl Bindable for Blob {
    const RECORD: &'static str = "Blob";

    fn parse_xml(&mut self, node: XmlNode<'_, '_>) -> hrecord_binding::Result<()> {
        let info = node.require_child("blob-info")?;
        let mut parsed = Self {
            name: info.read_text("name").unwrap_or_default(),
            hash_info: info.read_record("hash-info")?,
            content_length: node.read("content-length")?,
            ..Self::default()
        };
        if let Some(content_type) = info.read_text("content-type") {
            parsed.set_content_type(content_type)?;
        }
        if let Some(url) = node.read_text("blob-ref-url") {
            parsed.content = BlobContent::Remote { url };
        } else if let Some(data) = node.child("base64data") {
            let text: String = data.text().split_whitespace().collect();
            let bytes = STANDARD.decode(&text).map_err(|_| Error::InvalidContent {
                element: "base64data".to_string(),
                value: text.clone(),
                expected: "base64 binary",
            })?;
            parsed.content = BlobContent::Inline(bytes);
        }
        parsed.dirty = false;
        *self = parsed;
        Ok(())
    }

    fn ensure_complete(&self) -> hrecord_binding::Result<()> {
        require(Self::RECORD, "content-type", &self.content_type)?;
        if let Some(hash_info) = &self.hash_info {
            hash_info.ensure_complete()?;
        }
        Ok(())
    }

    fn write_body(&self, sink: &mut XmlSink) -> hrecord_binding::Result<()> {
        sink.start("blob-info")?;
        sink.element("name", &self.name)?;
        sink.element(
            "content-type",
            require(Self::RECORD, "content-type", &self.content_type)?,
        )?;
        sink.optional_record("hash-info", self.hash_info.as_ref())?;
        sink.end("blob-info")?;
        sink.optional("content-length", self.content_length.as_ref())?;
        match &self.content {
            BlobContent::Empty => Ok(()),
            BlobContent::Inline(bytes) => sink.text_element("base64data", &STANDARD.encode(bytes)),
            BlobContent::Remote { url } => sink.text_element("blob-ref-url", url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrecord_binding::{from_xml_str, to_xml_string, WriteSettings};
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryChannel {
        stored: HashMap<String, Vec<u8>>,
    }

    impl BlobChannel for MemoryChannel {
        fn upload(&mut self, name: &str, _content_type: &str, data: &[u8]) -> Result<String> {
            let url = format!("mem://{}/{}", self.stored.len(), name);
            self.stored.insert(url.clone(), data.to_vec());
            Ok(url)
        }

        fn open<'c>(&'c mut self, url: &str) -> Result<Box<dyn Read + 'c>> {
            let bytes = self
                .stored
                .get(url)
                .ok_or_else(|| BlobError::ContentUnavailable(url.to_string()))?;
            Ok(Box::new(bytes.as_slice()))
        }
    }

    fn policy(threshold: u64) -> BlobPolicy {
        BlobPolicy {
            inline_threshold: threshold,
            block_size: 4,
        }
    }

    #[test]
    fn mutations_mark_dirty() {
        let mut blob = Blob::with_bytes("", "text/plain", b"abc".to_vec()).unwrap();
        assert!(blob.is_dirty());
        let mut channel = MemoryChannel::default();
        blob.commit(&mut channel, &policy(16)).unwrap();
        assert!(!blob.is_dirty());

        blob.set_name("scan");
        assert!(blob.is_dirty());
    }

    #[test]
    fn small_content_stays_inline() {
        let mut blob = Blob::with_bytes("note", "text/plain", b"tiny".to_vec()).unwrap();
        let mut channel = MemoryChannel::default();
        let hasher = Sha256BlockHasher::new(4).unwrap();
        let mode = blob.commit(&mut channel, &policy(16)).unwrap();
        assert_eq!(mode, CommitMode::Inline);
        assert_eq!(blob.inline_bytes(), Some(&b"tiny"[..]));
        assert_eq!(blob.content_length(), Some(4));
        assert!(blob.verify(b"tiny", &hasher).is_ok());
        assert!(channel.stored.is_empty());
        assert_eq!(
            blob.commit(&mut channel, &policy(16)).unwrap(),
            CommitMode::Unchanged
        );
    }

    #[test]
    fn large_content_is_streamed() {
        let mut blob = Blob::new("scan", "image/png").unwrap();
        {
            let mut writer = blob.writer();
            writer.write_all(&[7u8; 40]).unwrap();
        }
        let mut channel = MemoryChannel::default();
        let hasher = Sha256BlockHasher::new(4).unwrap();
        let mode = blob.commit(&mut channel, &policy(16)).unwrap();
        assert_eq!(mode, CommitMode::Streamed);
        assert!(matches!(blob.content(), BlobContent::Remote { .. }));
        assert_eq!(blob.content_length(), Some(40));

        let bytes = blob.read_to_vec(&mut channel).unwrap();
        assert_eq!(bytes, vec![7u8; 40]);
        assert!(blob.verify(&bytes, &hasher).is_ok());
    }

    #[test]
    fn commit_hashes_at_the_policy_block_size() {
        let mut blob = Blob::with_bytes("note", "text/plain", b"abcdefghij".to_vec()).unwrap();
        let mut channel = MemoryChannel::default();
        blob.commit(&mut channel, &policy(16)).unwrap();
        let info = blob.hash_info().unwrap();
        assert_eq!(info.block_size(), Some(4));
        assert_eq!(
            info.hash(),
            Some(Sha256BlockHasher::new(4).unwrap().hash(b"abcdefghij").as_slice())
        );

        let mut other = Blob::with_bytes("note", "text/plain", b"abcdefghij".to_vec()).unwrap();
        other
            .commit_with(&mut channel, &Sha256BlockHasher::new(8).unwrap(), 16)
            .unwrap();
        assert_eq!(other.hash_info().unwrap().block_size(), Some(8));
        assert_ne!(other.hash_info(), blob.hash_info());
    }

    #[test]
    fn commit_requires_content_type() {
        let mut blob = Blob::default();
        blob.set_bytes(vec![1, 2, 3]);
        let mut channel = MemoryChannel::default();
        let err = blob
            .commit(&mut channel, &BlobPolicy::default())
            .unwrap_err();
        assert!(matches!(
            err,
            BlobError::Binding(Error::MissingMandatory {
                field: "content-type",
                ..
            })
        ));
        assert!(blob.is_dirty());
    }

    #[test]
    fn inline_round_trip_clears_dirty() {
        let mut blob = Blob::with_bytes("", "text/plain", b"hello".to_vec()).unwrap();
        let mut channel = MemoryChannel::default();
        blob.commit(&mut channel, &BlobPolicy::default()).unwrap();

        let xml = to_xml_string(&blob, "blob", &WriteSettings::default()).unwrap();
        assert!(xml.starts_with(
            "<blob><blob-info><name/><content-type>text/plain</content-type><hash-info>"
        ));
        assert!(xml.ends_with(
            "</blob-info><content-length>5</content-length><base64data>aGVsbG8=</base64data></blob>"
        ));

        let back: Blob = from_xml_str(&xml, "blob").unwrap();
        assert_eq!(back, blob);
        assert!(!back.is_dirty());
    }

    #[test]
    fn remote_reference_parses() {
        let xml = "<blob><blob-info><name>scan</name><content-type>image/png</content-type></blob-info>\
                   <content-length>10</content-length><blob-ref-url>https://blobs/1</blob-ref-url></blob>";
        let blob: Blob = from_xml_str(xml, "blob").unwrap();
        assert_eq!(
            blob.content(),
            &BlobContent::Remote {
                url: "https://blobs/1".to_string()
            }
        );
        let mut channel = MemoryChannel::default();
        assert!(matches!(
            blob.read_to_vec(&mut channel),
            Err(BlobError::ContentUnavailable(_))
        ));
    }

    #[test]
    fn missing_blob_info_is_structural() {
        let err = from_xml_str::<Blob>("<blob><content-length>1</content-length></blob>", "blob")
            .unwrap_err();
        assert!(err.is_structural());
    }
}

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hrecord_binding::validate::ensure_range;
use hrecord_binding::{require, Bindable, Error, Result, XmlNode, XmlSink};
use std::fmt;

/// Name of the block hash algorithm on the wire.
pub const SHA256_BLOCK: &str = "SHA256Block";

/// Default block size for [`HashAlgorithm::Sha256Block`]: 2 MiB.
pub const DEFAULT_BLOCK_SIZE: u32 = 2 * 1024 * 1024;

/// Algorithm used to compute a BLOB hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// SHA-256 over each block, then SHA-256 over the concatenated block hashes.
    Sha256Block,
    /// An algorithm this version does not implement; keeps the wire name.
    Unknown(String),
}

impl HashAlgorithm {
    /// Maps a wire name to an algorithm. Unrecognized names never fail.
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            SHA256_BLOCK => HashAlgorithm::Sha256Block,
            other => {
                tracing::debug!(algorithm = other, "unrecognized hash algorithm, using Unknown");
                HashAlgorithm::Unknown(other.to_string())
            }
        }
    }

    pub fn name(&self) -> &str {
        match self {
            HashAlgorithm::Sha256Block => SHA256_BLOCK,
            HashAlgorithm::Unknown(name) => name,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, HashAlgorithm::Unknown(_))
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Describes how a BLOB's integrity hash was computed, and its value.
///
/// ```xml
/// <hash-info>
///   <algorithm>SHA256Block</algorithm>
///   <params><block-size>2097152</block-size></params>
///   <hash>base64...</hash>
/// </hash-info>
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BlobHashInfo {
    algorithm: Option<HashAlgorithm>,
    block_size: Option<u32>,
    hash: Option<Vec<u8>>,
}

impl BlobHashInfo {
    pub fn new(algorithm: HashAlgorithm, block_size: u32, hash: Vec<u8>) -> Result<Self> {
        let mut info = Self {
            algorithm: Some(algorithm),
            ..Self::default()
        };
        info.set_block_size(Some(block_size))?;
        info.set_hash(hash)?;
        Ok(info)
    }

    pub fn algorithm(&self) -> Option<&HashAlgorithm> {
        self.algorithm.as_ref()
    }

    pub fn block_size(&self) -> Option<u32> {
        self.block_size
    }

    pub fn hash(&self) -> Option<&[u8]> {
        self.hash.as_deref()
    }

    pub fn set_algorithm(&mut self, algorithm: HashAlgorithm) {
        self.algorithm = Some(algorithm);
    }

    pub fn set_block_size(&mut self, block_size: Option<u32>) -> Result<()> {
        self.block_size = block_size
            .map(|size| ensure_range("block-size", size, 1, u32::MAX))
            .transpose()?;
        Ok(())
    }

    pub fn set_hash(&mut self, hash: Vec<u8>) -> Result<()> {
        if hash.is_empty() {
            return Err(Error::InvalidArgument {
                field: "hash",
                reason: "must not be empty",
            });
        }
        self.hash = Some(hash);
        Ok(())
    }
}

impl fmt::Display for BlobHashInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(algorithm) = &self.algorithm {
            write!(f, "{algorithm}")?;
        }
        if let Some(hash) = &self.hash {
            write!(f, " {}", hex::encode(hash))?;
        }
        Ok(())
    }
}

impl Bindable for BlobHashInfo {
    const RECORD: &'static str = "BlobHashInfo";

    fn parse_xml(&mut self, node: XmlNode<'_, '_>) -> Result<()> {
        let mut parsed = Self {
            algorithm: node
                .read_text("algorithm")
                .map(|name| HashAlgorithm::from_name(&name)),
            ..Self::default()
        };
        if let Some(params) = node.child("params") {
            parsed.set_block_size(params.read("block-size")?)?;
        }
        if let Some(hash) = node.child("hash") {
            let text = hash.text().trim();
            let bytes = STANDARD.decode(text).map_err(|_| Error::InvalidContent {
                element: "hash".to_string(),
                value: text.to_string(),
                expected: "base64 binary",
            })?;
            parsed.set_hash(bytes)?;
        }
        *self = parsed;
        Ok(())
    }

    fn ensure_complete(&self) -> Result<()> {
        require(Self::RECORD, "algorithm", &self.algorithm)?;
        require(Self::RECORD, "hash", &self.hash)?;
        Ok(())
    }

    fn write_body(&self, sink: &mut XmlSink) -> Result<()> {
        let algorithm = require(Self::RECORD, "algorithm", &self.algorithm)?;
        sink.text_element("algorithm", algorithm.name())?;
        if let Some(block_size) = &self.block_size {
            sink.start("params")?;
            sink.element("block-size", block_size)?;
            sink.end("params")?;
        }
        let hash = require(Self::RECORD, "hash", &self.hash)?;
        sink.text_element("hash", &STANDARD.encode(hash))
    }
}

//! Block hashing of BLOB content

use super::error::{BlobError, Result};
use super::hash_info::{BlobHashInfo, HashAlgorithm, DEFAULT_BLOCK_SIZE};
use sha2::{Digest, Sha256};
use std::io::{self, Read};

/// Computes and verifies the integrity hash stored in [`BlobHashInfo`].
pub trait BlobHasher {
    fn algorithm(&self) -> HashAlgorithm;

    fn block_size(&self) -> u32;

    /// Hashes everything the reader yields.
    fn hash_reader(&self, reader: &mut dyn Read) -> Result<Vec<u8>>;

    fn hash(&self, data: &[u8]) -> Vec<u8>;

    fn hash_info(&self, data: &[u8]) -> Result<BlobHashInfo> {
        Ok(BlobHashInfo::new(
            self.algorithm(),
            self.block_size(),
            self.hash(data),
        )?)
    }

    /// Recomputes the hash of `data` and compares it with `info`.
    fn verify(&self, data: &[u8], info: &BlobHashInfo) -> Result<()> {
        let Some(algorithm) = info.algorithm() else {
            return Err(BlobError::UnsupportedAlgorithm(String::new()));
        };
        if *algorithm != self.algorithm() {
            return Err(BlobError::UnsupportedAlgorithm(algorithm.name().to_string()));
        }
        let expected = info.hash().unwrap_or_default();
        let actual = self.hash(data);
        if expected != actual.as_slice() {
            return Err(BlobError::HashMismatch {
                expected: hex::encode(expected),
                actual: hex::encode(actual),
            });
        }
        Ok(())
    }
}

/// `SHA256Block`: SHA-256 over each fixed-size block, then SHA-256 over the
/// concatenation of the block hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sha256BlockHasher {
    block_size: u32,
}

impl Default for Sha256BlockHasher {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

impl Sha256BlockHasher {
    pub fn new(block_size: u32) -> Result<Self> {
        if block_size == 0 {
            return Err(hrecord_binding::Error::InvalidArgument {
                field: "block-size",
                reason: "must be positive",
            }
            .into());
        }
        Ok(Self { block_size })
    }

    /// Builds a hasher matching the parameters recorded in `info`.
    pub fn for_info(info: &BlobHashInfo) -> Result<Self> {
        match info.algorithm() {
            Some(HashAlgorithm::Sha256Block) => {
                Self::new(info.block_size().unwrap_or(DEFAULT_BLOCK_SIZE))
            }
            Some(other) => Err(BlobError::UnsupportedAlgorithm(other.name().to_string())),
            None => Err(BlobError::UnsupportedAlgorithm(String::new())),
        }
    }
}

impl BlobHasher for Sha256BlockHasher {
    fn algorithm(&self) -> HashAlgorithm {
        HashAlgorithm::Sha256Block
    }

    fn block_size(&self) -> u32 {
        self.block_size
    }

    fn hash_reader(&self, reader: &mut dyn Read) -> Result<Vec<u8>> {
        let block_size = u64::from(self.block_size);
        let mut outer = Sha256::new();
        let mut blocks = 0usize;
        loop {
            let mut inner = Sha256::new();
            let read = io::copy(&mut (&mut *reader).take(block_size), &mut inner)?;
            if read == 0 && blocks > 0 {
                break;
            }
            outer.update(inner.finalize());
            blocks += 1;
            if read < block_size {
                break;
            }
        }
        tracing::trace!(blocks, block_size = self.block_size, "hashed blob content");
        Ok(outer.finalize().to_vec())
    }

    fn hash(&self, data: &[u8]) -> Vec<u8> {
        let mut outer = Sha256::new();
        if data.is_empty() {
            outer.update(Sha256::digest(data));
        }
        for block in data.chunks(self.block_size as usize) {
            outer.update(Sha256::digest(block));
        }
        outer.finalize().to_vec()
    }
}

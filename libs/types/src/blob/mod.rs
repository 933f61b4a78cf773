//! Binary payloads attached to records, and their integrity hashes.

mod error;
mod hash_info;
mod hasher;
mod payload;

pub use error::{BlobError, Result};
pub use hash_info::{BlobHashInfo, HashAlgorithm, DEFAULT_BLOCK_SIZE, SHA256_BLOCK};
pub use hasher::{BlobHasher, Sha256BlockHasher};
pub use payload::{
    Blob, BlobChannel, BlobContent, BlobPolicy, BlobWriter, CommitMode, DEFAULT_INLINE_THRESHOLD,
};

//! Element codecs
//!
//! The sequence is generic over how an element becomes bytes.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Errors raised while encoding, framing, or decoding a slot
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("bincode: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("slot file truncated: {len} bytes is shorter than the frame header")]
    Truncated { len: usize },

    #[error("invalid slot magic: {found:?}")]
    BadMagic { found: [u8; 4] },

    #[error("payload length mismatch: header says {declared}, file holds {actual}")]
    LengthMismatch { declared: usize, actual: usize },

    #[error("checksum mismatch: expected {expected:#010x}, computed {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    #[error("payload of {0} bytes exceeds the 4 GiB frame limit")]
    PayloadTooLarge(usize),
}

/// Converts elements of `T` to and from a byte payload
///
/// Implementations only handle the payload; framing and checksums are
/// applied by `SlotStore`.
pub trait Codec<T> {
    fn encode(&self, value: &T) -> Result<Vec<u8>, CodecError>;

    fn decode(&self, bytes: &[u8]) -> Result<T, CodecError>;
}

/// Default codec: bincode over serde
#[derive(Debug, Clone, Copy, Default)]
pub struct BincodeCodec;

impl<T> Codec<T> for BincodeCodec
where
    T: Serialize + DeserializeOwned,
{
    fn encode(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        Ok(bincode::serialize(value)?)
    }

    fn decode(&self, bytes: &[u8]) -> Result<T, CodecError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

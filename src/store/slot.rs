//! Slot Store
//!
//! Reads and writes framed slot files inside one directory.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Result, SlotOp, SpillError};

use super::{Codec, CodecError, SlotId};

/// Magic bytes identifying a slot file
pub const MAGIC: &[u8; 4] = b"SPSL";

/// Frame header: Magic (4) + PayloadLen (4) + CRC32 (4) = 12 bytes
pub const FRAME_HEADER_SIZE: usize = 12;

/// Path of the file backing slot `id` in `dir`
pub fn slot_path(dir: &Path, id: SlotId) -> PathBuf {
    dir.join(id.to_string())
}

/// Keyed mapping from slot id to one encoded element
pub struct SlotStore<C> {
    /// Private directory holding the slot files
    dir: PathBuf,
    /// Element codec
    codec: C,
}

impl<C> SlotStore<C> {
    /// Create a store rooted at an existing directory
    pub fn new(dir: impl Into<PathBuf>, codec: C) -> Self {
        Self {
            dir: dir.into(),
            codec,
        }
    }

    /// Serialize `value` into slot `id`, replacing any previous content
    ///
    /// The frame is written to `<id>.partial` and renamed over `<id>`, so a
    /// failed persist leaves the previous slot content readable.
    pub fn persist<T>(&self, id: SlotId, value: &T) -> Result<()>
    where
        C: Codec<T>,
    {
        let payload = self
            .codec
            .encode(value)
            .map_err(|source| Self::codec_err(id, SlotOp::Persist, source))?;
        let frame = encode_frame(&payload)
            .map_err(|source| Self::codec_err(id, SlotOp::Persist, source))?;

        let path = self.slot_path(id);
        let partial = self.dir.join(format!("{}.partial", id));

        let written = fs::File::create(&partial)
            .and_then(|mut file| file.write_all(&frame))
            .and_then(|_| fs::rename(&partial, &path));

        if let Err(source) = written {
            // Best effort; the partial file is not a slot, so the reclaim
            // worker never tracks it.
            let _ = fs::remove_file(&partial);
            return Err(Self::io_err(id, SlotOp::Persist, source));
        }

        tracing::trace!("Persisted slot {} ({} bytes)", id, frame.len());
        Ok(())
    }

    /// Read and deserialize slot `id`
    pub fn load<T>(&self, id: SlotId) -> Result<T>
    where
        C: Codec<T>,
    {
        let bytes = fs::read(self.slot_path(id))
            .map_err(|source| Self::io_err(id, SlotOp::Load, source))?;
        let payload =
            decode_frame(&bytes).map_err(|source| Self::codec_err(id, SlotOp::Load, source))?;

        tracing::trace!("Loaded slot {} ({} bytes)", id, bytes.len());
        self.codec
            .decode(payload)
            .map_err(|source| Self::codec_err(id, SlotOp::Load, source))
    }

    /// Whether a file currently backs slot `id`
    pub fn contains(&self, id: SlotId) -> bool {
        fs::metadata(self.slot_path(id))
            .map(|meta| meta.is_file())
            .unwrap_or(false)
    }

    /// Get the directory holding the slot files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Get the file path for slot `id`
    pub fn slot_path(&self, id: SlotId) -> PathBuf {
        slot_path(&self.dir, id)
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn io_err(id: SlotId, op: SlotOp, source: std::io::Error) -> SpillError {
        SpillError::SlotIo { id, op, source }
    }

    fn codec_err(id: SlotId, op: SlotOp, source: CodecError) -> SpillError {
        SpillError::SlotCodec { id, op, source }
    }
}

/// Wrap a payload in the slot frame
fn encode_frame(payload: &[u8]) -> std::result::Result<Vec<u8>, CodecError> {
    let len =
        u32::try_from(payload.len()).map_err(|_| CodecError::PayloadTooLarge(payload.len()))?;

    let mut frame = Vec::with_capacity(FRAME_HEADER_SIZE + payload.len());
    frame.extend_from_slice(MAGIC);
    frame.extend_from_slice(&len.to_le_bytes());
    frame.extend_from_slice(&crc32fast::hash(payload).to_le_bytes());
    frame.extend_from_slice(payload);
    Ok(frame)
}

/// Validate the slot frame and return its payload
fn decode_frame(bytes: &[u8]) -> std::result::Result<&[u8], CodecError> {
    if bytes.len() < FRAME_HEADER_SIZE {
        return Err(CodecError::Truncated { len: bytes.len() });
    }

    let (header, payload) = bytes.split_at(FRAME_HEADER_SIZE);

    let mut magic = [0u8; 4];
    magic.copy_from_slice(&header[0..4]);
    if &magic != MAGIC {
        return Err(CodecError::BadMagic { found: magic });
    }

    let mut word = [0u8; 4];
    word.copy_from_slice(&header[4..8]);
    let declared = u32::from_le_bytes(word) as usize;
    if declared != payload.len() {
        return Err(CodecError::LengthMismatch {
            declared,
            actual: payload.len(),
        });
    }

    word.copy_from_slice(&header[8..12]);
    let expected = u32::from_le_bytes(word);
    let actual = crc32fast::hash(payload);
    if expected != actual {
        return Err(CodecError::ChecksumMismatch { expected, actual });
    }

    Ok(payload)
}

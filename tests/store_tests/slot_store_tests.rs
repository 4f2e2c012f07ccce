//! Tests for SlotStore
//!
//! These tests verify:
//! - Persist/load of structured values
//! - Overwriting an existing slot
//! - Frame validation (magic, length, checksum)
//! - Error context for missing slots

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use spillslice::store::{BincodeCodec, CodecError, SlotStore, FRAME_HEADER_SIZE, MAGIC};
use spillslice::{SlotOp, SpillError};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Message {
    sequence: u64,
    topic: String,
    payload: Vec<u8>,
}

fn message(sequence: u64) -> Message {
    Message {
        sequence,
        topic: format!("topic-{}", sequence % 3),
        payload: vec![sequence as u8; 64],
    }
}

fn setup_store() -> (TempDir, SlotStore<BincodeCodec>) {
    let temp_dir = TempDir::new().unwrap();
    let store = SlotStore::new(temp_dir.path(), BincodeCodec);
    (temp_dir, store)
}

fn slot_file(temp: &TempDir, id: u64) -> PathBuf {
    temp.path().join(id.to_string())
}

// =============================================================================
// Persist / Load Tests
// =============================================================================

#[test]
fn test_persist_and_load() {
    let (temp, store) = setup_store();

    store.persist(7, &message(7)).unwrap();
    let loaded: Message = store.load(7).unwrap();

    assert_eq!(loaded, message(7));
    assert!(slot_file(&temp, 7).is_file());
    assert!(store.contains(7));
    assert!(!store.contains(8));
}

#[test]
fn test_persist_overwrites_existing_slot() {
    let (_temp, store) = setup_store();

    store.persist(3, &message(1)).unwrap();
    store.persist(3, &message(2)).unwrap();

    let loaded: Message = store.load(3).unwrap();
    assert_eq!(loaded, message(2));
}

#[test]
fn test_persist_leaves_no_partial_file() {
    let (temp, store) = setup_store();

    store.persist(11, &"value".to_string()).unwrap();

    let names: Vec<String> = fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["11".to_string()]);
}

#[test]
fn test_slot_file_layout() {
    let (temp, store) = setup_store();

    store.persist(1, &42u32).unwrap();

    let bytes = fs::read(slot_file(&temp, 1)).unwrap();
    assert_eq!(&bytes[0..4], MAGIC);
    let len = u32::from_le_bytes(bytes[4..8].try_into().unwrap()) as usize;
    assert_eq!(len, bytes.len() - FRAME_HEADER_SIZE);
    let crc = u32::from_le_bytes(bytes[8..12].try_into().unwrap());
    assert_eq!(crc, crc32fast::hash(&bytes[FRAME_HEADER_SIZE..]));
}

// =============================================================================
// Failure Tests
// =============================================================================

#[test]
fn test_load_missing_slot() {
    let (_temp, store) = setup_store();

    let err = store.load::<u32>(99).unwrap_err();

    assert!(matches!(err, SpillError::SlotIo { id: 99, op: SlotOp::Load, .. }));
    assert!(err.to_string().starts_with("slot 99 load failed:"));
}

#[test]
fn test_load_detects_flipped_byte() {
    let (temp, store) = setup_store();
    store.persist(5, &message(5)).unwrap();

    let path = slot_file(&temp, 5);
    let mut bytes = fs::read(&path).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;
    fs::write(&path, bytes).unwrap();

    let err = store.load::<Message>(5).unwrap_err();
    assert!(matches!(
        err,
        SpillError::SlotCodec { id: 5, source: CodecError::ChecksumMismatch { .. }, .. }
    ));
}

#[test]
fn test_load_detects_truncated_payload() {
    let (temp, store) = setup_store();
    store.persist(6, &message(6)).unwrap();

    let path = slot_file(&temp, 6);
    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..bytes.len() - 10]).unwrap();

    let err = store.load::<Message>(6).unwrap_err();
    assert!(matches!(
        err,
        SpillError::SlotCodec { source: CodecError::LengthMismatch { .. }, .. }
    ));
}

#[test]
fn test_load_detects_bad_magic() {
    let (temp, store) = setup_store();
    fs::write(slot_file(&temp, 2), b"NOPE\0\0\0\0\0\0\0\0").unwrap();

    let err = store.load::<u8>(2).unwrap_err();
    assert!(matches!(
        err,
        SpillError::SlotCodec { source: CodecError::BadMagic { found }, .. } if &found == b"NOPE"
    ));
}

#[test]
fn test_load_with_wrong_type_is_codec_error() {
    let (_temp, store) = setup_store();
    store.persist(4, &1u8).unwrap();

    let err = store.load::<Message>(4).unwrap_err();
    assert!(matches!(
        err,
        SpillError::SlotCodec { op: SlotOp::Load, source: CodecError::Bincode(_), .. }
    ));
}

#[test]
fn test_persist_into_missing_directory() {
    let temp = TempDir::new().unwrap();
    let store = SlotStore::new(temp.path().join("gone"), BincodeCodec);

    let err = store.persist(1, &1u64).unwrap_err();

    assert!(matches!(err, SpillError::SlotIo { id: 1, op: SlotOp::Persist, .. }));
}

//! Reclamation Module
//!
//! Deletes orphaned slot files off the foreground path.
//!
//! ## Responsibilities
//! - Consume "delete slot N" requests until told to terminate
//! - Treat individual deletion failures as non-fatal (logged, counted)
//! - Remove the whole private directory on terminate
//!
//! ## Lifecycle
//! ```text
//!   Reclaimer::spawn ──► Running ──(Terminate | all senders dropped)──► Stopped
//!                          │                                              │
//!                  Slot(id) → remove_file                       remove dir -r
//! ```
//!
//! The worker is the only code that deletes slot files.

mod worker;

pub use worker::{CleanupHandle, ReclaimReport, ReclaimRequest, Reclaimer};

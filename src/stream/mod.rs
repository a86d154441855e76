//! Stream Module
//!
//! Moves encoded entries over byte streams (files, sockets).
//!
//! ## Frame Format
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ Frame 1                                 │
//! │ ┌─────────┬─────────┬─────────────────┐ │
//! │ │ Len (4) │ CRC (4) │  Entry bytes    │ │
//! │ └─────────┴─────────┴─────────────────┘ │
//! ├─────────────────────────────────────────┤
//! │ Frame 2                                 │
//! │ ┌─────────┬─────────┬─────────────────┐ │
//! │ │ Len (4) │ CRC (4) │  Entry bytes    │ │
//! │ └─────────┴─────────┴─────────────────┘ │
//! └─────────────────────────────────────────┘
//! ```
//!
//! Length and CRC32 are big-endian. The CRC covers the entry bytes only.

mod frame;
mod writer;
mod reader;

pub use frame::{FrameHeader, FRAME_HEADER_SIZE, compute_checksum, encode_frame};
pub use writer::{EntryWriter, write_command, write_entry};
pub use reader::{EntryReader, read_command, read_entry};

//! Frame definitions
//!
//! Length and checksum header placed in front of every entry on a stream.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{CommandError, Result};

/// Frame header size: 4 bytes length + 4 bytes CRC32
pub const FRAME_HEADER_SIZE: usize = 8;

/// Header preceding each entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Entry length in bytes
    pub length: u32,

    /// CRC32 of the entry bytes
    pub checksum: u32,
}

impl FrameHeader {
    /// Build the header for an entry
    ///
    /// Fails with [`CommandError::EntryTooLarge`] when the length does not
    /// fit the 4-byte length field.
    pub fn new(entry: &[u8]) -> Result<Self> {
        Ok(Self {
            length: frame_length(entry.len())?,
            checksum: compute_checksum(entry),
        })
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        buf.put_u32(self.length);
        buf.put_u32(self.checksum);
    }

    pub fn decode(bytes: &[u8; FRAME_HEADER_SIZE]) -> Self {
        let mut buf = &bytes[..];
        Self {
            length: buf.get_u32(),
            checksum: buf.get_u32(),
        }
    }

    /// Check the entry bytes against the stored checksum
    pub fn verify(&self, entry: &[u8]) -> Result<()> {
        let actual = compute_checksum(entry);
        if actual != self.checksum {
            return Err(CommandError::ChecksumMismatch {
                expected: self.checksum,
                actual,
            });
        }
        Ok(())
    }
}

/// Frame an entry: header followed by the entry bytes
pub fn encode_frame(entry: &[u8]) -> Result<Bytes> {
    let header = FrameHeader::new(entry)?;
    let mut buf = BytesMut::with_capacity(FRAME_HEADER_SIZE + entry.len());
    header.encode(&mut buf);
    buf.put_slice(entry);
    Ok(buf.freeze())
}

fn frame_length(size: usize) -> Result<u32> {
    u32::try_from(size).map_err(|_| CommandError::EntryTooLarge {
        size,
        max: u32::MAX as usize,
    })
}

pub fn compute_checksum(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}

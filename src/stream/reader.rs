//! Entry Reader
//!
//! Reads framed entries back from a byte stream.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use tracing::error;

use crate::error::Result;
use crate::protocol::{Codec, Command};
use super::frame::{FrameHeader, FRAME_HEADER_SIZE};

/// Read one framed entry
///
/// Returns `None` on a clean end of stream at a frame boundary.
pub fn read_entry<R: Read>(reader: &mut R, codec: &Codec) -> Result<Option<Vec<u8>>> {
    let mut header = [0u8; FRAME_HEADER_SIZE];
    if !read_header(reader, &mut header)? {
        return Ok(None);
    }
    let header = FrameHeader::decode(&header);

    let length = header.length as usize;
    codec.check_size(length)?;

    let mut entry = vec![0u8; length];
    reader.read_exact(&mut entry)?;

    if codec.config().verify_checksums {
        header.verify(&entry)?;
    }
    Ok(Some(entry))
}

/// Read one framed entry and decode it
pub fn read_command<R: Read>(reader: &mut R, codec: &Codec) -> Result<Option<Command>> {
    read_entry(reader, codec)?
        .map(|entry| codec.decode(&entry))
        .transpose()
}

/// Fill the header buffer; `false` if the stream ended before any byte
fn read_header<R: Read>(reader: &mut R, buf: &mut [u8; FRAME_HEADER_SIZE]) -> Result<bool> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) if filled == 0 => return Ok(false),
            Ok(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("truncated frame header: {} of {} bytes", filled, FRAME_HEADER_SIZE),
                )
                .into())
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(true)
}

/// Iterator over the commands in a framed stream
///
/// Stops after the first error; entries past a bad one are never yielded.
pub struct EntryReader<R: Read> {
    reader: R,
    codec: Codec,
    entries_read: u64,
    failed: bool,
}

impl EntryReader<BufReader<File>> {
    /// Open a framed entry file for reading
    pub fn open(path: &Path, codec: Codec) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file), codec))
    }
}

impl<R: Read> EntryReader<R> {
    pub fn new(reader: R, codec: Codec) -> Self {
        Self {
            reader,
            codec,
            entries_read: 0,
            failed: false,
        }
    }

    /// Number of entries successfully decoded so far
    pub fn entries_read(&self) -> u64 {
        self.entries_read
    }
}

impl<R: Read> Iterator for EntryReader<R> {
    type Item = Result<Command>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match read_command(&mut self.reader, &self.codec) {
            Ok(Some(command)) => {
                self.entries_read += 1;
                Some(Ok(command))
            }
            Ok(None) => None,
            Err(e) => {
                error!(entry = self.entries_read, error = %e, "failed to read log entry");
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

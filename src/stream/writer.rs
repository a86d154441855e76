//! Entry Writer
//!
//! Appends framed entries to a byte stream.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::protocol::{Codec, Command};
use super::frame::encode_frame;

/// Write one framed entry
pub fn write_entry<W: Write>(writer: &mut W, codec: &Codec, entry: &[u8]) -> Result<()> {
    codec.check_size(entry.len())?;
    writer.write_all(&encode_frame(entry)?)?;
    Ok(())
}

/// Encode a command and write it as one framed entry
pub fn write_command<W: Write>(writer: &mut W, codec: &Codec, command: &Command) -> Result<()> {
    let entry = codec.encode(command)?;
    write_entry(writer, codec, &entry)?;
    writer.flush()?;
    Ok(())
}

/// Appends commands to a framed stream
pub struct EntryWriter<W: Write> {
    writer: W,
    codec: Codec,
    entries_written: u64,
}

impl EntryWriter<BufWriter<File>> {
    /// Open a file for appending, creating it if missing
    pub fn open(path: &Path, codec: Codec) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(BufWriter::new(file), codec))
    }
}

impl<W: Write> EntryWriter<W> {
    pub fn new(writer: W, codec: Codec) -> Self {
        Self {
            writer,
            codec,
            entries_written: 0,
        }
    }

    /// Encode and append a command
    pub fn append(&mut self, command: &Command) -> Result<()> {
        let entry = self.codec.encode(command)?;
        self.append_entry(&entry)
    }

    /// Append already-encoded entry bytes
    pub fn append_entry(&mut self, entry: &[u8]) -> Result<()> {
        write_entry(&mut self.writer, &self.codec, entry)?;
        self.entries_written += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn entries_written(&self) -> u64 {
        self.entries_written
    }

    /// Flush and return the underlying writer
    pub fn into_inner(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

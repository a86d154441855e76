//! Configuration for raftcmd
//!
//! Centralized codec configuration with sensible defaults.

use crate::error::{CommandError, Result};

/// Default maximum size of a single encoded entry (16 MB)
pub const DEFAULT_MAX_ENTRY_SIZE: usize = 16 * 1024 * 1024;

/// Codec configuration
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Entry Limits
    // -------------------------------------------------------------------------
    /// Largest encoded entry accepted by encode, decode and the frame reader
    pub max_entry_size: usize,

    // -------------------------------------------------------------------------
    // Framed Streams
    // -------------------------------------------------------------------------
    /// Validate the CRC32 of every frame read from a stream
    pub verify_checksums: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entry_size: DEFAULT_MAX_ENTRY_SIZE,
            verify_checksums: true,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.max_entry_size == 0 {
            return Err(CommandError::Config(
                "max_entry_size must be greater than zero".to_string(),
            ));
        }
        if self.max_entry_size > u32::MAX as usize {
            return Err(CommandError::Config(format!(
                "max_entry_size {} does not fit a frame length",
                self.max_entry_size
            )));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the maximum encoded entry size (in bytes)
    pub fn max_entry_size(mut self, size: usize) -> Self {
        self.config.max_entry_size = size;
        self
    }

    /// Enable or disable frame checksum verification
    pub fn verify_checksums(mut self, verify: bool) -> Self {
        self.config.verify_checksums = verify;
        self
    }

    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}

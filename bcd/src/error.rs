//! Error types for device record decoding and encoding

use core::fmt;

/// Which device record variant produced an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Composite,
    Cimfs,
}

impl RecordKind {
    /// Name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            Self::Composite => "Composite",
            Self::Cimfs => "Cimfs",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Device record error
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// Stored version is not the one this codec understands
    #[error("Unknown {kind} version: {version}")]
    UnsupportedVersion { kind: RecordKind, version: u32 },

    /// A field would extend past the end of the buffer
    #[error("Device record is truncated: {needed} bytes at offset {offset}, buffer holds {available}")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },
}

impl RecordError {
    /// Version carried by an `UnsupportedVersion` error
    pub fn unsupported_version(&self) -> Option<u32> {
        match self {
            Self::UnsupportedVersion { version, .. } => Some(*version),
            Self::Truncated { .. } => None,
        }
    }
}

/// Result type for device record operations
pub type Result<T> = core::result::Result<T, RecordError>;

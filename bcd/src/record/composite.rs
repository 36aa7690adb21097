//! Composite device record
//!
//! A composite device layers a primary and a secondary device behind a
//! signature GUID. Only format version 0 is understood.
//!
//! Layout after the header (offsets relative to the record start):
//!
//! | Offset | Field                   | Width |
//! |--------|-------------------------|-------|
//! | 0x10   | signature               | GUID  |
//! | 0x20   | version                 | u32 LE |
//! | 0x24   | primary device offset   | u32 LE |
//! | 0x28   | secondary device offset | u32 LE |
//!
//! The signature is written in little-endian GUID layout but read back in
//! big-endian layout. Records produced by the BCD store decode the way the
//! store expects; a record encoded here only decodes to the same signature
//! when its first three GUID fields read the same in either byte order.

use core::fmt;

use uguid::Guid;

use super::{write_header, DeviceRecord, RecordHeader, HEADER_SIZE};
use crate::endian::{read_guid_be, read_u32_le, write_guid_le, write_u32_le, GUID_SIZE, U32_SIZE};
use crate::error::{RecordError, RecordKind, Result};

/// The only composite format version understood
pub const COMPATIBLE_VERSION: u32 = 0;

/// Encoded length, as stored in the header length field
const RECORD_LENGTH: u32 = 44;

const _: () = assert!(RECORD_LENGTH as usize == GUID_SIZE + U32_SIZE * 3 + HEADER_SIZE);

/// Payload of a version 0 composite record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositeDevice {
    pub signature: Guid,
    /// Offset of the primary device record in the enclosing buffer
    pub primary_device_offset: u32,
    /// Offset of the secondary device record in the enclosing buffer
    pub secondary_device_offset: u32,
}

impl Default for CompositeDevice {
    fn default() -> Self {
        Self {
            signature: Guid::ZERO,
            primary_device_offset: 0,
            secondary_device_offset: 0,
        }
    }
}

/// Version-tagged shape of a composite record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeLayout {
    /// Version 0 with its full payload
    Compatible(CompositeDevice),
    /// Any non-zero version; no payload is encoded
    Other { version: u32 },
}

/// Composite device record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositeDeviceRecord {
    header: RecordHeader,
    layout: CompositeLayout,
}

impl CompositeDeviceRecord {
    /// Build a version 0 record
    pub fn new(record_type: u32, device: CompositeDevice) -> Self {
        Self {
            header: RecordHeader::new(record_type, RECORD_LENGTH),
            layout: CompositeLayout::Compatible(device),
        }
    }

    /// Build a record carrying `version`.
    ///
    /// The compatible version yields a zeroed payload; any other version
    /// yields a record that encodes only its header.
    pub fn with_version(record_type: u32, version: u32) -> Self {
        let layout = if version == COMPATIBLE_VERSION {
            CompositeLayout::Compatible(CompositeDevice::default())
        } else {
            CompositeLayout::Other { version }
        };
        Self {
            header: RecordHeader::new(record_type, RECORD_LENGTH),
            layout,
        }
    }

    pub fn version(&self) -> u32 {
        match self.layout {
            CompositeLayout::Compatible(_) => COMPATIBLE_VERSION,
            CompositeLayout::Other { version } => version,
        }
    }

    /// Version-tagged shape. Records are only built through `new`,
    /// `with_version` and `parse`, so `Other` never carries the compatible
    /// version.
    pub fn layout(&self) -> &CompositeLayout {
        &self.layout
    }

    /// Payload, if the record is version 0
    pub fn device(&self) -> Option<&CompositeDevice> {
        match &self.layout {
            CompositeLayout::Compatible(device) => Some(device),
            CompositeLayout::Other { .. } => None,
        }
    }
}

impl DeviceRecord for CompositeDeviceRecord {
    const SIZE: usize = RECORD_LENGTH as usize;

    fn header(&self) -> &RecordHeader {
        &self.header
    }

    fn parse(data: &[u8], offset: usize) -> Result<Self> {
        let header = RecordHeader::parse(data, offset)?;

        let mut local = offset + HEADER_SIZE;
        let signature = read_guid_be(data, local)?;
        local += GUID_SIZE;
        let version = read_u32_le(data, local)?;

        if version != COMPATIBLE_VERSION {
            record_event!(warn, offset, version, "rejecting composite device record");
            return Err(RecordError::UnsupportedVersion {
                kind: RecordKind::Composite,
                version,
            });
        }

        local += U32_SIZE;
        let primary_device_offset = read_u32_le(data, local)?;
        local += U32_SIZE;
        let secondary_device_offset = read_u32_le(data, local)?;

        record_event!(
            debug,
            offset,
            %signature,
            primary_device_offset,
            secondary_device_offset,
            "parsed composite device record"
        );

        Ok(Self {
            header,
            layout: CompositeLayout::Compatible(CompositeDevice {
                signature,
                primary_device_offset,
                secondary_device_offset,
            }),
        })
    }

    fn write_to(&self, data: &mut [u8], offset: usize) -> Result<()> {
        write_header(self.header.record_type, RECORD_LENGTH, data, offset)?;

        let device = match &self.layout {
            CompositeLayout::Compatible(device) => device,
            CompositeLayout::Other { .. } => {
                record_event!(
                    debug,
                    offset,
                    version = self.version(),
                    "composite payload not written"
                );
                return Ok(());
            }
        };

        let mut local = offset + HEADER_SIZE;
        write_guid_le(device.signature, data, local)?;
        local += GUID_SIZE;
        write_u32_le(COMPATIBLE_VERSION, data, local)?;
        local += U32_SIZE;
        write_u32_le(device.primary_device_offset, data, local)?;
        local += U32_SIZE;
        write_u32_le(device.secondary_device_offset, data, local)
    }
}

impl fmt::Display for CompositeDeviceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.layout {
            CompositeLayout::Compatible(device) => write!(
                f,
                "Composite - (version:{}, signature:{}, primaryDeviceOffset:{}, secondaryDeviceOffset:{})",
                COMPATIBLE_VERSION,
                device.signature,
                device.primary_device_offset,
                device.secondary_device_offset
            ),
            CompositeLayout::Other { version } => write!(f, "Composite - (version:{})", version),
        }
    }
}

//! CIM filesystem device record
//!
//! Describes a root path and a target mount volume inside a composite
//! image. Only format version 2 is understood.
//!
//! | Offset | Field               | Width |
//! |--------|---------------------|-------|
//! | 0x10   | version             | u32 LE |
//! | 0x14   | parent offset       | u32 LE |
//! | 0x18   | root path offset    | u32 LE |
//! | 0x1C   | root path length    | u32 LE |
//! | 0x20   | target mount volume | GUID LE |

use core::fmt;

use uguid::Guid;

use super::{write_header, DeviceRecord, RecordHeader, HEADER_SIZE};
use crate::endian::{read_guid_le, read_u32_le, write_guid_le, write_u32_le, GUID_SIZE, U32_SIZE};
use crate::error::{RecordError, RecordKind, Result};

/// The only Cimfs format version understood
pub const COMPATIBLE_VERSION_2: u32 = 2;

/// Encoded length, as stored in the header length field
const RECORD_LENGTH: u32 = 48;

const _: () = assert!(RECORD_LENGTH as usize == GUID_SIZE + U32_SIZE * 4 + HEADER_SIZE);

/// Payload of a version 2 Cimfs record
///
/// Offsets point into the enclosing BCD buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CimfsDevice {
    pub parent_offset: u32,
    pub root_path_offset: u32,
    pub root_path_length: u32,
    pub target_mount_volume: Guid,
}

impl Default for CimfsDevice {
    fn default() -> Self {
        Self {
            parent_offset: 0,
            root_path_offset: 0,
            root_path_length: 0,
            target_mount_volume: Guid::ZERO,
        }
    }
}

/// Version-tagged shape of a Cimfs record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CimfsLayout {
    /// Version 2 with its full payload
    Compatible(CimfsDevice),
    /// Any version other than 2; only the version field is encoded
    Other { version: u32 },
}

/// CIM filesystem device record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CimfsDeviceRecord {
    header: RecordHeader,
    layout: CimfsLayout,
}

impl CimfsDeviceRecord {
    /// Build a version 2 record
    pub fn new(record_type: u32, device: CimfsDevice) -> Self {
        Self {
            header: RecordHeader::new(record_type, RECORD_LENGTH),
            layout: CimfsLayout::Compatible(device),
        }
    }

    /// Build a record carrying `version`, with a zeroed payload when the
    /// version is compatible.
    pub fn with_version(record_type: u32, version: u32) -> Self {
        let layout = if version == COMPATIBLE_VERSION_2 {
            CimfsLayout::Compatible(CimfsDevice::default())
        } else {
            CimfsLayout::Other { version }
        };
        Self {
            header: RecordHeader::new(record_type, RECORD_LENGTH),
            layout,
        }
    }

    pub fn version(&self) -> u32 {
        match self.layout {
            CimfsLayout::Compatible(_) => COMPATIBLE_VERSION_2,
            CimfsLayout::Other { version } => version,
        }
    }

    /// Version-tagged shape. Records are only built through `new`,
    /// `with_version` and `parse`, so `Other` never carries the compatible
    /// version.
    pub fn layout(&self) -> &CimfsLayout {
        &self.layout
    }

    pub fn device(&self) -> Option<&CimfsDevice> {
        match &self.layout {
            CimfsLayout::Compatible(device) => Some(device),
            CimfsLayout::Other { .. } => None,
        }
    }
}

impl DeviceRecord for CimfsDeviceRecord {
    const SIZE: usize = RECORD_LENGTH as usize;

    fn header(&self) -> &RecordHeader {
        &self.header
    }

    fn parse(data: &[u8], offset: usize) -> Result<Self> {
        let header = RecordHeader::parse(data, offset)?;

        let mut local = offset + HEADER_SIZE;
        let version = read_u32_le(data, local)?;
        if version != COMPATIBLE_VERSION_2 {
            record_event!(warn, offset, version, "rejecting cimfs device record");
            return Err(RecordError::UnsupportedVersion {
                kind: RecordKind::Cimfs,
                version,
            });
        }

        local += U32_SIZE;
        let parent_offset = read_u32_le(data, local)?;
        local += U32_SIZE;
        let root_path_offset = read_u32_le(data, local)?;
        local += U32_SIZE;
        let root_path_length = read_u32_le(data, local)?;
        local += U32_SIZE;
        let target_mount_volume = read_guid_le(data, local)?;

        record_event!(
            debug,
            offset,
            parent_offset,
            root_path_offset,
            root_path_length,
            %target_mount_volume,
            "parsed cimfs device record"
        );

        Ok(Self {
            header,
            layout: CimfsLayout::Compatible(CimfsDevice {
                parent_offset,
                root_path_offset,
                root_path_length,
                target_mount_volume,
            }),
        })
    }

    fn write_to(&self, data: &mut [u8], offset: usize) -> Result<()> {
        write_header(self.header.record_type, RECORD_LENGTH, data, offset)?;

        let mut local = offset + HEADER_SIZE;
        write_u32_le(self.version(), data, local)?;

        let device = match &self.layout {
            CimfsLayout::Compatible(device) => device,
            CimfsLayout::Other { .. } => {
                record_event!(
                    debug,
                    offset,
                    version = self.version(),
                    "cimfs payload not written"
                );
                return Ok(());
            }
        };

        local += U32_SIZE;
        write_u32_le(device.parent_offset, data, local)?;
        local += U32_SIZE;
        write_u32_le(device.root_path_offset, data, local)?;
        local += U32_SIZE;
        write_u32_le(device.root_path_length, data, local)?;
        local += U32_SIZE;
        write_guid_le(device.target_mount_volume, data, local)
    }
}

impl fmt::Display for CimfsDeviceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.layout {
            CimfsLayout::Compatible(device) => write!(
                f,
                "Cimfs - (version:{}, parentOffset:{}, rootPathOffset:{}, rootPathLength:{}, targetMountVolume:{})",
                COMPATIBLE_VERSION_2,
                device.parent_offset,
                device.root_path_offset,
                device.root_path_length,
                device.target_mount_volume
            ),
            CimfsLayout::Other { version } => write!(f, "Cimfs - (version:{})", version),
        }
    }
}

//! Device record header and the shared record contract
//!
//! Every device record starts with a 16-byte header window. Only two
//! fields inside it are meaningful to this codec:
//!
//! | Offset | Field         | Width |
//! |--------|---------------|-------|
//! | 0x00   | record type   | u32 LE |
//! | 0x08   | record length | u32 LE |
//!
//! Bytes 0x04..0x08 and 0x0C..0x10 are never read or written. Variant
//! payloads begin at [`HEADER_SIZE`].

pub mod cimfs;
pub mod composite;

use core::fmt;

use crate::endian::{read_u32_le, write_u32_le};
use crate::error::Result;

/// Size of the header window preceding every variant payload
pub const HEADER_SIZE: usize = 0x10;

/// Offset of the record type within the header
const TYPE_OFFSET: usize = 0x0;

/// Offset of the record length within the header
const LENGTH_OFFSET: usize = 0x8;

/// Common header of a device record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordHeader {
    /// Device record type code, owned by the BCD store
    pub record_type: u32,
    /// Encoded length as stored on disk
    pub length: u32,
}

impl RecordHeader {
    pub const fn new(record_type: u32, length: u32) -> Self {
        Self {
            record_type,
            length,
        }
    }

    /// Parse the header fields at `offset`
    pub fn parse(data: &[u8], offset: usize) -> Result<Self> {
        let record_type = read_u32_le(data, offset + TYPE_OFFSET)?;
        let length = read_u32_le(data, offset + LENGTH_OFFSET)?;
        Ok(Self {
            record_type,
            length,
        })
    }
}

/// Write a record header at `offset`.
///
/// Variants pass their own encoded length, regardless of what was parsed.
pub fn write_header(record_type: u32, length: u32, data: &mut [u8], offset: usize) -> Result<()> {
    write_u32_le(record_type, data, offset + TYPE_OFFSET)?;
    write_u32_le(length, data, offset + LENGTH_OFFSET)
}

/// A fixed-size device record
///
/// Implementors parse the header via [`RecordHeader::parse`] and write it via
/// [`write_header`] before touching their own fields, which start at
/// `offset + HEADER_SIZE`.
pub trait DeviceRecord: Sized + fmt::Display {
    /// Encoded size in bytes, independent of field values
    const SIZE: usize;

    /// Encoded size in bytes
    fn size(&self) -> usize {
        Self::SIZE
    }

    /// Header of this record
    fn header(&self) -> &RecordHeader;

    /// Decode a record starting at `offset`
    fn parse(data: &[u8], offset: usize) -> Result<Self>;

    /// Encode this record starting at `offset`.
    ///
    /// Bytes the variant does not write for its version are left as they
    /// were in `data`.
    fn write_to(&self, data: &mut [u8], offset: usize) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout() {
        let mut buf = [0xEEu8; HEADER_SIZE];
        write_header(0x12, 44, &mut buf, 0).unwrap();
        assert_eq!(
            buf,
            [
                0x12, 0, 0, 0, 0xEE, 0xEE, 0xEE, 0xEE, 44, 0, 0, 0, 0xEE, 0xEE, 0xEE, 0xEE
            ]
        );
    }

    #[test]
    fn test_header_parse_at_offset() {
        let mut buf = [0u8; 8 + HEADER_SIZE];
        write_header(7, 48, &mut buf, 8).unwrap();
        assert_eq!(RecordHeader::parse(&buf, 8).unwrap(), RecordHeader::new(7, 48));
    }

    #[test]
    fn test_header_length_is_full_u32() {
        let mut buf = [0u8; HEADER_SIZE];
        write_header(1, u32::MAX, &mut buf, 0).unwrap();
        assert_eq!(&buf[8..12], &[0xFF; 4]);
        assert_eq!(RecordHeader::parse(&buf, 0).unwrap().length, u32::MAX);
    }

    #[test]
    fn test_header_truncated() {
        let buf = [0u8; 10];
        assert!(RecordHeader::parse(&buf, 0).is_err());
    }
}

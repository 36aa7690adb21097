//! Byte-order primitives
//!
//! Bounds-checked reads and writes of little-endian integers and GUIDs at
//! an offset into a caller-owned buffer.
//!
//! GUIDs use the mixed-endian on-disk form: `time_low`, `time_mid` and
//! `time_high` are stored little-endian in the LE encoding and big-endian in
//! the BE encoding; the trailing 8 bytes are identical in both.

use gpt_disk_types::U32Le;
use uguid::Guid;

use crate::error::{RecordError, Result};

/// Size of an encoded GUID
pub const GUID_SIZE: usize = 16;

/// Size of an encoded `u32`
pub const U32_SIZE: usize = 4;

fn window(len: usize, offset: usize, needed: usize) -> Result<core::ops::Range<usize>> {
    match offset.checked_add(needed) {
        Some(end) if end <= len => Ok(offset..end),
        _ => Err(RecordError::Truncated {
            offset,
            needed,
            available: len,
        }),
    }
}

fn read_array<const N: usize>(data: &[u8], offset: usize) -> Result<[u8; N]> {
    let range = window(data.len(), offset, N)?;
    let mut bytes = [0u8; N];
    bytes.copy_from_slice(&data[range]);
    Ok(bytes)
}

fn write_array<const N: usize>(bytes: [u8; N], data: &mut [u8], offset: usize) -> Result<()> {
    let range = window(data.len(), offset, N)?;
    data[range].copy_from_slice(&bytes);
    Ok(())
}

/// Read a little-endian `u32`
pub fn read_u32_le(data: &[u8], offset: usize) -> Result<u32> {
    read_array(data, offset).map(|bytes| U32Le(bytes).to_u32())
}

/// Write a little-endian `u32`
pub fn write_u32_le(value: u32, data: &mut [u8], offset: usize) -> Result<()> {
    write_array(U32Le::from_u32(value).0, data, offset)
}

/// Read a GUID stored in little-endian (Microsoft) layout
pub fn read_guid_le(data: &[u8], offset: usize) -> Result<Guid> {
    read_array(data, offset).map(Guid::from_bytes)
}

/// Read a GUID stored in big-endian (RFC 4122) layout
pub fn read_guid_be(data: &[u8], offset: usize) -> Result<Guid> {
    read_array(data, offset).map(|bytes| Guid::from_bytes(swap_guid_fields(bytes)))
}

/// Write a GUID in little-endian (Microsoft) layout
pub fn write_guid_le(guid: Guid, data: &mut [u8], offset: usize) -> Result<()> {
    write_array(guid.to_bytes(), data, offset)
}

/// Reverse the byte order of the first three GUID fields.
///
/// Converts between the LE and BE encodings in either direction.
pub const fn swap_guid_fields(b: [u8; GUID_SIZE]) -> [u8; GUID_SIZE] {
    [
        b[3], b[2], b[1], b[0], // time_low
        b[5], b[4], // time_mid
        b[7], b[6], // time_high
        b[8], b[9], b[10], b[11], b[12], b[13], b[14], b[15],
    ]
}

//! On-disk layout checks through the public API

use bcd_device::{
    CimfsDevice, CimfsDeviceRecord, CompositeDevice, CompositeDeviceRecord, DeviceRecord, Guid,
    RecordError, RecordHeader, RecordKind, HEADER_SIZE,
};

const COMPOSITE_TYPE: u32 = 0x12;
const CIMFS_TYPE: u32 = 0x15;

fn signature() -> Guid {
    Guid::try_parse("00112233-4455-6677-8899-aabbccddeeff").unwrap()
}

#[test]
fn test_composite_example_record() {
    let record = CompositeDeviceRecord::new(
        COMPOSITE_TYPE,
        CompositeDevice {
            signature: signature(),
            primary_device_offset: 0x20,
            secondary_device_offset: 0x40,
        },
    );

    let mut buf = [0u8; 44];
    record.write_to(&mut buf, 0).unwrap();

    assert_eq!(&buf[16..20], &[0x33, 0x22, 0x11, 0x00]);
    assert_eq!(&buf[32..36], &[0, 0, 0, 0]);
    assert_eq!(&buf[36..40], &[0x20, 0, 0, 0]);
    assert_eq!(&buf[40..44], &[0x40, 0, 0, 0]);
}

#[test]
fn test_records_share_header_window() {
    let composite = CompositeDeviceRecord::with_version(COMPOSITE_TYPE, 0);
    let cimfs = CimfsDeviceRecord::with_version(CIMFS_TYPE, 2);

    let mut buf = [0xCDu8; 44 + 48];
    composite.write_to(&mut buf, 0).unwrap();
    cimfs.write_to(&mut buf, composite.size()).unwrap();

    let first = RecordHeader::parse(&buf, 0).unwrap();
    let second = RecordHeader::parse(&buf, composite.size()).unwrap();
    assert_eq!(&first, composite.header());
    assert_eq!(&second, cimfs.header());
    assert_eq!(first.length as usize, composite.size());
    assert_eq!(second.length as usize, cimfs.size());

    // Header bytes outside the type and length fields are never touched
    for base in [0, composite.size()] {
        assert_eq!(&buf[base + 4..base + 8], &[0xCD; 4]);
        assert_eq!(&buf[base + 12..base + HEADER_SIZE], &[0xCD; 4]);
    }
}

#[test]
fn test_records_back_to_back() {
    let composite = CompositeDeviceRecord::new(
        COMPOSITE_TYPE,
        CompositeDevice {
            signature: Guid::ZERO,
            primary_device_offset: 44,
            secondary_device_offset: 0,
        },
    );
    let cimfs = CimfsDeviceRecord::new(
        CIMFS_TYPE,
        CimfsDevice {
            parent_offset: 0,
            root_path_offset: 92,
            root_path_length: 12,
            target_mount_volume: signature(),
        },
    );

    let mut buf = [0u8; 44 + 48];
    composite.write_to(&mut buf, 0).unwrap();
    cimfs.write_to(&mut buf, composite.size()).unwrap();

    let first = CompositeDeviceRecord::parse(&buf, 0).unwrap();
    let offset = first.device().unwrap().primary_device_offset as usize;
    assert_eq!(CimfsDeviceRecord::parse(&buf, offset).unwrap(), cimfs);
}

#[test]
fn test_wrong_variant_is_rejected() {
    let mut buf = [0u8; 48];
    CimfsDeviceRecord::with_version(CIMFS_TYPE, 2)
        .write_to(&mut buf, 0)
        .unwrap();

    // Composite reads its version after the signature, where cimfs keeps
    // the target mount volume
    buf[32..36].copy_from_slice(&7u32.to_le_bytes());
    assert_eq!(
        CompositeDeviceRecord::parse(&buf, 0),
        Err(RecordError::UnsupportedVersion {
            kind: RecordKind::Composite,
            version: 7
        })
    );
}

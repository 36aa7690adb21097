//! BCD device records
//!
//! Codec for the fixed-layout device records that Windows Boot Configuration
//! Data (BCD) elements embed or point to.
//!
//! # Layout
//!
//! ```text
//! offset 0x00 ┌───────────────────────────┐
//!             │ header (16 bytes)         │  type @0x00, length @0x08
//! offset 0x10 ├───────────────────────────┤
//!             │ version-tagged payload    │  composite: 28 bytes
//!             │                           │  cimfs:     32 bytes
//!             └───────────────────────────┘
//! ```
//!
//! Two variants are supported:
//! - [`CompositeDeviceRecord`]: a primary/secondary device pair behind a
//!   signature GUID (version 0)
//! - [`CimfsDeviceRecord`]: a root path and target mount volume inside a
//!   composite image (version 2)
//!
//! Offsets stored in the records point into the surrounding BCD buffer and
//! are not resolved here.
//!
//! # Usage
//!
//! ```ignore
//! use bcd_device::{CimfsDeviceRecord, DeviceRecord};
//!
//! let record = CimfsDeviceRecord::parse(&element_data, 0)?;
//! if let Some(cimfs) = record.device() {
//!     println!("mount volume {}", cimfs.target_mount_volume);
//! }
//!
//! let mut out = [0u8; CimfsDeviceRecord::SIZE];
//! record.write_to(&mut out, 0)?;
//! ```

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod trace;

pub mod endian;
pub mod error;
pub mod record;

pub use error::{RecordError, RecordKind, Result};
pub use record::cimfs::{CimfsDevice, CimfsDeviceRecord, CimfsLayout};
pub use record::composite::{CompositeDevice, CompositeDeviceRecord, CompositeLayout};
pub use record::{write_header, DeviceRecord, RecordHeader, HEADER_SIZE};
pub use uguid::Guid;

//! Canonical little-endian serialization helpers.
//!
//! Every multi-byte integer is little-endian, every collection carries a
//! `u32` item count and every optional value a one byte discriminant. The
//! readers attach a [`SerKind`] and field name to each failure so decoding
//! errors point at the offending section.

mod collections;
mod cursor;
mod error;
mod writer;

pub use collections::{read_option, read_vec, write_option, write_vec};
pub use cursor::ByteReader;
pub use error::{SerError, SerKind, SerResult};
pub use writer::ByteWriter;

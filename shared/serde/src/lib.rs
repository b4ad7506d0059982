//! # Attrib Serde
//! Byte-aligned, big-endian wire codec shared by every attrib crate.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod byte_reader;
mod byte_writer;
mod constants;
mod error;
mod integer;
mod number;
mod serde;

pub use byte_reader::ByteReader;
pub use byte_writer::{ByteWrite, ByteWriter};
pub use constants::MAX_STRING_BYTES;
pub use error::SerdeErr;
pub use integer::VarInt;
pub use serde::{check_string_length, Serde};

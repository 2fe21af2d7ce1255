// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Write side of the protocol.

use super::{CodecError, CodecResult};
use crate::id::BinaryId;
use crate::object::BinaryObject;
use crate::registry::Registry;
use byteorder::{LittleEndian, WriteBytesExt};
use std::io::Write;

/// Generate little-endian write methods for fixed-width primitives.
///
/// Each generated method writes the value, maps I/O failures to
/// `CodecError::Io` at the current offset and advances the offset.
macro_rules! impl_write_le {
    ($name:ident, $write:ident, $type:ty) => {
        pub fn $name(&mut self, value: $type) -> CodecResult<()> {
            let offset = self.offset;
            self.writer
                .$write::<LittleEndian>(value)
                .map_err(|source| CodecError::Io { offset, source })?;
            self.offset += std::mem::size_of::<$type>() as u64;
            Ok(())
        }
    };
}

/// Encoder writing one message onto a byte stream.
///
/// Not shareable across threads; each exchange owns its own encoder.
pub struct Encoder<'a> {
    writer: &'a mut dyn Write,
    registry: &'a Registry,
    offset: u64,
}

impl<'a> Encoder<'a> {
    /// Encoder resolving types against [`Registry::global`].
    pub fn new(writer: &'a mut dyn Write) -> Self {
        Self::with_registry(writer, Registry::global())
    }

    pub fn with_registry(writer: &'a mut dyn Write, registry: &'a Registry) -> Self {
        Self {
            writer,
            registry,
            offset: 0,
        }
    }

    /// Bytes written so far.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    pub fn bool(&mut self, value: bool) -> CodecResult<()> {
        self.u8(u8::from(value))
    }

    pub fn u8(&mut self, value: u8) -> CodecResult<()> {
        self.raw(&[value])
    }

    pub fn i8(&mut self, value: i8) -> CodecResult<()> {
        self.raw(&value.to_le_bytes())
    }

    impl_write_le!(u16, write_u16, u16);
    impl_write_le!(i16, write_i16, i16);
    impl_write_le!(u32, write_u32, u32);
    impl_write_le!(i32, write_i32, i32);
    impl_write_le!(u64, write_u64, u64);
    impl_write_le!(i64, write_i64, i64);
    impl_write_le!(f32, write_f32, f32);
    impl_write_le!(f64, write_f64, f64);

    /// `u32` byte length followed by the UTF-8 bytes.
    pub fn string(&mut self, value: &str) -> CodecResult<()> {
        self.length("string", value.len())?;
        self.raw(value.as_bytes())
    }

    /// Element count prefix of a slice.
    pub fn count(&mut self, len: usize) -> CodecResult<()> {
        self.length("slice", len)
    }

    /// Raw bytes without prefix, for fixed-size arrays.
    pub fn bytes(&mut self, data: &[u8]) -> CodecResult<()> {
        self.raw(data)
    }

    /// 20 raw bytes.
    pub fn id(&mut self, id: &BinaryId) -> CodecResult<()> {
        self.raw(id.as_bytes())
    }

    /// Fields of a statically typed nested value, without fingerprint.
    pub fn value(&mut self, obj: &dyn BinaryObject) -> CodecResult<()> {
        obj.encode(self)
    }

    /// Polymorphic envelope: fingerprint followed by the fields, or the null
    /// id for `None`.
    ///
    /// The object's type must be registered so that a reader can resolve
    /// the fingerprint.
    pub fn object(&mut self, obj: Option<&dyn BinaryObject>) -> CodecResult<()> {
        let Some(obj) = obj else {
            return self.id(&BinaryId::zero());
        };

        let entity = obj.entity();
        let id = entity.fingerprint()?;
        let codec = self
            .registry
            .lookup(&id)
            .ok_or_else(|| CodecError::Unregistered {
                id,
                entity: entity.name(),
            })?;

        self.id(&id)?;
        if codec.accepts(obj) {
            codec.encode(obj, self)
        } else {
            // Same structure, different Rust type (e.g. a dynamic object).
            obj.encode(self)
        }
    }

    fn length(&mut self, what: &'static str, len: usize) -> CodecResult<()> {
        let len32 = u32::try_from(len).map_err(|_| CodecError::TooLarge { what, len })?;
        self.u32(len32)
    }

    fn raw(&mut self, data: &[u8]) -> CodecResult<()> {
        let offset = self.offset;
        self.writer
            .write_all(data)
            .map_err(|source| CodecError::Io { offset, source })?;
        self.offset += data.len() as u64;
        Ok(())
    }
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Read side of the protocol.

use super::{CodecError, CodecResult};
use crate::config::{DecodeLimits, PREALLOC_LIMIT};
use crate::dynamic::DynamicObject;
use crate::id::{BinaryId, ID_SIZE};
use crate::object::BinaryObject;
use crate::registry::Registry;
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Read;

/// Generate little-endian read methods for fixed-width primitives.
///
/// Each generated method reads the value, maps a short read to
/// `CodecError::Truncated` at the value's offset and advances the offset.
macro_rules! impl_read_le {
    ($name:ident, $read:ident, $type:ty) => {
        pub fn $name(&mut self) -> CodecResult<$type> {
            let offset = self.offset;
            let value = self
                .reader
                .$read::<LittleEndian>()
                .map_err(|e| CodecError::from_read(offset, e))?;
            self.offset += std::mem::size_of::<$type>() as u64;
            Ok(value)
        }
    };
}

/// Decoder reading messages from a byte stream.
///
/// Not shareable across threads; each exchange owns its own decoder.
pub struct Decoder<'a> {
    reader: &'a mut dyn Read,
    registry: &'a Registry,
    limits: DecodeLimits,
    offset: u64,
    depth: u32,
}

impl<'a> Decoder<'a> {
    /// Decoder resolving types against [`Registry::global`] with default limits.
    pub fn new(reader: &'a mut dyn Read) -> Self {
        Self::with_registry(reader, Registry::global())
    }

    pub fn with_registry(reader: &'a mut dyn Read, registry: &'a Registry) -> Self {
        Self {
            reader,
            registry,
            limits: DecodeLimits::default(),
            offset: 0,
            depth: 0,
        }
    }

    #[must_use]
    pub fn limits(mut self, limits: DecodeLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Bytes consumed so far.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    pub fn bool(&mut self) -> CodecResult<bool> {
        let offset = self.offset;
        match self.u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(CodecError::Corrupt {
                offset,
                reason: format!("invalid bool byte 0x{:02x}", other),
            }),
        }
    }

    pub fn u8(&mut self) -> CodecResult<u8> {
        let mut buf = [0u8; 1];
        self.raw(&mut buf)?;
        Ok(buf[0])
    }

    pub fn i8(&mut self) -> CodecResult<i8> {
        let mut buf = [0u8; 1];
        self.raw(&mut buf)?;
        Ok(i8::from_le_bytes(buf))
    }

    impl_read_le!(u16, read_u16, u16);
    impl_read_le!(i16, read_i16, i16);
    impl_read_le!(u32, read_u32, u32);
    impl_read_le!(i32, read_i32, i32);
    impl_read_le!(u64, read_u64, u64);
    impl_read_le!(i64, read_i64, i64);
    impl_read_le!(f32, read_f32, f32);
    impl_read_le!(f64, read_f64, f64);

    /// `u32` byte length followed by UTF-8 bytes.
    pub fn string(&mut self) -> CodecResult<String> {
        let offset = self.offset;
        let len = self.length("string", self.limits.max_string_len)?;
        let bytes = self.vec(len)?;
        String::from_utf8(bytes).map_err(|e| CodecError::Corrupt {
            offset,
            reason: format!("string is not valid UTF-8: {}", e.utf8_error()),
        })
    }

    /// Element count prefix of a slice.
    pub fn count(&mut self) -> CodecResult<usize> {
        self.length("slice", self.limits.max_array_len)
    }

    /// Fill `buf` with raw bytes (fixed-size arrays).
    pub fn bytes(&mut self, buf: &mut [u8]) -> CodecResult<()> {
        self.raw(buf)
    }

    pub fn id(&mut self) -> CodecResult<BinaryId> {
        let mut bytes = [0u8; ID_SIZE];
        self.raw(&mut bytes)?;
        Ok(BinaryId::from_bytes(bytes))
    }

    /// Decode the fields of a statically typed nested value in place.
    pub fn value(&mut self, obj: &mut dyn BinaryObject) -> CodecResult<()> {
        self.nested(|d| obj.decode(d))
    }

    /// Read a polymorphic envelope. `None` for the null id.
    ///
    /// The fingerprint is resolved through the registry, the codec creates
    /// a blank instance and decodes the remaining fields into it.
    pub fn object(&mut self) -> CodecResult<Option<Box<dyn BinaryObject>>> {
        let offset = self.offset;
        let id = self.id()?;
        if id.is_zero() {
            return Ok(None);
        }

        let codec = self
            .registry
            .lookup(&id)
            .ok_or(CodecError::UnknownType { id, offset })?;
        log::trace!(
            "[decoder] object {} at offset {}",
            codec.entity().name(),
            offset
        );

        let mut obj = codec.create();
        self.nested(|d| codec.decode(obj.as_mut(), d))?;
        Ok(Some(obj))
    }

    /// Read a polymorphic envelope that must not be null.
    pub fn required_object(&mut self) -> CodecResult<Box<dyn BinaryObject>> {
        let offset = self.offset;
        self.object()?.ok_or(CodecError::NullObject { offset })
    }

    /// Read a polymorphic envelope into a [`DynamicObject`], driven by the
    /// registered schema only. `None` for the null id.
    pub fn dynamic_object(&mut self) -> CodecResult<Option<DynamicObject>> {
        let offset = self.offset;
        let id = self.id()?;
        if id.is_zero() {
            return Ok(None);
        }

        let entity = self
            .registry
            .entity(&id)
            .ok_or(CodecError::UnknownType { id, offset })?;
        let mut obj = DynamicObject::new(entity);
        self.nested(|d| obj.decode(d))?;
        Ok(Some(obj))
    }

    fn nested<T, F>(&mut self, f: F) -> CodecResult<T>
    where
        F: FnOnce(&mut Self) -> CodecResult<T>,
    {
        if self.depth >= self.limits.max_depth {
            return Err(CodecError::Corrupt {
                offset: self.offset,
                reason: format!("nesting deeper than {}", self.limits.max_depth),
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn length(&mut self, what: &'static str, max: usize) -> CodecResult<usize> {
        let offset = self.offset;
        let len = self.u32()?;
        match usize::try_from(len) {
            Ok(len) if len <= max => Ok(len),
            _ => Err(CodecError::CorruptLength {
                what,
                len: u64::from(len),
                max: max as u64,
                offset,
            }),
        }
    }

    /// Read `len` bytes without trusting `len` for the allocation size.
    fn vec(&mut self, len: usize) -> CodecResult<Vec<u8>> {
        let offset = self.offset;
        let mut buf = Vec::with_capacity(len.min(PREALLOC_LIMIT * 16));
        let read = Read::take(&mut *self.reader, len as u64)
            .read_to_end(&mut buf)
            .map_err(|e| CodecError::from_read(offset, e))?;
        self.offset += read as u64;
        if read < len {
            return Err(CodecError::Truncated { offset });
        }
        Ok(buf)
    }

    fn raw(&mut self, buf: &mut [u8]) -> CodecResult<()> {
        let offset = self.offset;
        self.reader
            .read_exact(buf)
            .map_err(|e| CodecError::from_read(offset, e))?;
        self.offset += buf.len() as u64;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Encoder;

    fn decode_with<T, F>(bytes: &[u8], f: F) -> CodecResult<T>
    where
        F: FnOnce(&mut Decoder<'_>) -> CodecResult<T>,
    {
        let registry = Registry::new();
        let mut reader = bytes;
        let mut decoder = Decoder::with_registry(&mut reader, &registry);
        f(&mut decoder)
    }

    #[test]
    fn test_roundtrip_across_primitive_methods() {
        let registry = Registry::new();
        let mut buf = Vec::new();
        {
            let mut e = Encoder::with_registry(&mut buf, &registry);
            e.bool(true).unwrap();
            e.i8(-8).unwrap();
            e.u8(8).unwrap();
            e.i16(-16).unwrap();
            e.u16(16).unwrap();
            e.i32(-32).unwrap();
            e.u32(32).unwrap();
            e.i64(-64).unwrap();
            e.u64(64).unwrap();
            e.f32(3.5).unwrap();
            e.f64(std::f64::consts::PI).unwrap();
            e.string("slice").unwrap();
        }

        let mut reader = buf.as_slice();
        let mut d = Decoder::with_registry(&mut reader, &registry);
        assert!(d.bool().unwrap());
        assert_eq!(d.i8().unwrap(), -8);
        assert_eq!(d.u8().unwrap(), 8);
        assert_eq!(d.i16().unwrap(), -16);
        assert_eq!(d.u16().unwrap(), 16);
        assert_eq!(d.i32().unwrap(), -32);
        assert_eq!(d.u32().unwrap(), 32);
        assert_eq!(d.i64().unwrap(), -64);
        assert_eq!(d.u64().unwrap(), 64);
        assert_eq!(d.f32().unwrap().to_bits(), 3.5f32.to_bits());
        assert_eq!(d.f64().unwrap().to_bits(), std::f64::consts::PI.to_bits());
        assert_eq!(d.string().unwrap(), "slice");
        assert_eq!(d.offset(), buf.len() as u64);
    }

    #[test]
    fn test_short_read_reports_truncation_offset() {
        let err = decode_with(&[1, 2, 3, 4, 5], |d| {
            d.u32()?;
            d.u32()
        })
        .unwrap_err();
        assert!(matches!(err, CodecError::Truncated { offset: 4 }));
    }

    #[test]
    fn test_empty_stream_is_truncated() {
        let err = decode_with(&[], |d| d.u8()).unwrap_err();
        assert!(matches!(err, CodecError::Truncated { offset: 0 }));
    }

    #[test]
    fn test_invalid_bool_is_corrupt() {
        let err = decode_with(&[2], |d| d.bool()).unwrap_err();
        assert!(matches!(err, CodecError::Corrupt { offset: 0, .. }));
    }

    #[test]
    fn test_string_truncated_inside_payload() {
        let mut bytes = 10u32.to_le_bytes().to_vec();
        bytes.extend_from_slice(b"abc");
        let err = decode_with(&bytes, |d| d.string()).unwrap_err();
        assert!(matches!(err, CodecError::Truncated { offset: 4 }));
    }

    #[test]
    fn test_string_length_over_limit_is_corrupt() {
        let bytes = u32::MAX.to_le_bytes();
        let err = decode_with(&bytes, |d| d.string()).unwrap_err();
        match err {
            CodecError::CorruptLength {
                what, len, offset, ..
            } => {
                assert_eq!(what, "string");
                assert_eq!(len, u64::from(u32::MAX));
                assert_eq!(offset, 0);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_configured_limits_apply() {
        let registry = Registry::new();
        let bytes = 11u32.to_le_bytes();
        let mut reader = &bytes[..];
        let mut d = Decoder::with_registry(&mut reader, &registry)
            .limits(DecodeLimits::default().max_array_len(10));
        assert!(matches!(
            d.count().unwrap_err(),
            CodecError::CorruptLength { what: "slice", len: 11, max: 10, .. }
        ));
    }

    #[test]
    fn test_invalid_utf8_is_corrupt() {
        let mut bytes = 2u32.to_le_bytes().to_vec();
        bytes.extend_from_slice(&[0xC3, 0x28]);
        let err = decode_with(&bytes, |d| d.string()).unwrap_err();
        assert!(matches!(err, CodecError::Corrupt { offset: 0, .. }));
    }

    #[test]
    fn test_unknown_fingerprint() {
        let id = BinaryId::of(b"not registered");
        let err = decode_with(id.as_bytes(), |d| d.object()).unwrap_err();
        match err {
            CodecError::UnknownType { id: got, offset } => {
                assert_eq!(got, id);
                assert_eq!(offset, 0);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_null_object() {
        let zero = [0u8; ID_SIZE];
        assert!(decode_with(&zero, |d| d.object()).unwrap().is_none());
        assert!(decode_with(&zero, |d| d.dynamic_object()).unwrap().is_none());
        assert!(matches!(
            decode_with(&zero, |d| d.required_object()).unwrap_err(),
            CodecError::NullObject { offset: 0 }
        ));
    }

    #[test]
    fn test_fixed_bytes() {
        let mut out = [0u8; 3];
        decode_with(&[9, 8, 7], |d| d.bytes(&mut out)).unwrap();
        assert_eq!(out, [9, 8, 7]);
    }
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Streaming encoder/decoder.
//!
//! # Wire rules
//!
//! ```text
//! integers / floats   fixed width, little-endian, no alignment padding
//! bool                1 byte, 0 or 1
//! string              u32 byte length | UTF-8 bytes
//! fixed array         elements back to back (length is schema-known)
//! slice               u32 element count | elements
//! nested struct       fields inline, no fingerprint
//! polymorphic object  20-byte fingerprint | fields   (null: 20 zero bytes)
//! ```
//!
//! The fingerprint envelope is only written where a value is carried as
//! "some binary object" ([`Encoder::object`]); statically typed nested
//! values go through [`Encoder::value`] and stay compact.

mod decoder;
mod encoder;

pub use decoder::Decoder;
pub use encoder::Encoder;

use crate::id::BinaryId;
use crate::schema::SchemaError;
use std::io;

/// Encode/decode failures.
///
/// Decoding errors are terminal for the top-level object being read: the
/// stream position is unspecified afterwards.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("stream truncated reading value at offset {offset}")]
    Truncated { offset: u64 },

    #[error("corrupt {what} length {len} at offset {offset} (limit {max})")]
    CorruptLength {
        what: &'static str,
        len: u64,
        max: u64,
        offset: u64,
    },

    #[error("corrupt data at offset {offset}: {reason}")]
    Corrupt { offset: u64, reason: String },

    #[error("unknown type {id} at offset {offset}")]
    UnknownType { id: BinaryId, offset: u64 },

    #[error("null object at offset {offset}")]
    NullObject { offset: u64 },

    #[error("type {entity} ({id}) is not registered")]
    Unregistered { id: BinaryId, entity: String },

    #[error("codec for {expected} was handed a value of another type")]
    TypeMismatch { expected: String },

    #[error("field {field} of {entity} does not match its schema")]
    SchemaMismatch { entity: String, field: String },

    #[error("{what} too large to encode ({len})")]
    TooLarge { what: &'static str, len: usize },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("I/O error at offset {offset}: {source}")]
    Io {
        offset: u64,
        #[source]
        source: io::Error,
    },
}

impl CodecError {
    /// True for errors caused by malformed input rather than by the caller.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            CodecError::Truncated { .. }
                | CodecError::CorruptLength { .. }
                | CodecError::Corrupt { .. }
                | CodecError::UnknownType { .. }
                | CodecError::NullObject { .. }
        )
    }

    pub(crate) fn from_read(offset: u64, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::UnexpectedEof {
            CodecError::Truncated { offset }
        } else {
            CodecError::Io { offset, source }
        }
    }
}

pub type CodecResult<T> = core::result::Result<T, CodecError>;

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # objwire - schema-driven binary object protocol
//!
//! Exchanges typed, versioned records between processes. Every record type
//! has a structural schema ([`Entity`]) whose 20-byte fingerprint
//! ([`BinaryId`]) identifies it on the wire, so a reader can decode a
//! polymorphic stream without knowing in advance which types it will see.
//!
//! ## Quick Start
//!
//! ```rust
//! use objwire::schema::{Entity, Field, Method, Node};
//! use objwire::{BinaryObject, Class, CodecResult, Decoder, Encoder, Registry};
//! use std::sync::{Arc, LazyLock};
//!
//! static NOTE: LazyLock<Arc<Entity>> = LazyLock::new(|| {
//!     Arc::new(
//!         Entity::new("demo", "Note", "", "")
//!             .with_fields(vec![Field::new("Text", Node::of(Method::String))])
//!             .expect("static schema"),
//!     )
//! });
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Note {
//!     text: String,
//! }
//!
//! impl BinaryObject for Note {
//!     fn entity(&self) -> &Arc<Entity> {
//!         &NOTE
//!     }
//!     fn encode(&self, e: &mut Encoder<'_>) -> CodecResult<()> {
//!         e.string(&self.text)
//!     }
//!     fn decode(&mut self, d: &mut Decoder<'_>) -> CodecResult<()> {
//!         self.text = d.string()?;
//!         Ok(())
//!     }
//! }
//!
//! impl Class for Note {
//!     fn class_entity() -> &'static Arc<Entity> {
//!         &NOTE
//!     }
//! }
//!
//! fn main() -> objwire::Result<()> {
//!     let registry = Registry::new();
//!     registry.register_class::<Note>()?;
//!
//!     let mut buf = Vec::new();
//!     let note = Note { text: "hello".into() };
//!     Encoder::with_registry(&mut buf, &registry).object(Some(&note as &dyn BinaryObject))?;
//!
//!     let mut reader = buf.as_slice();
//!     let decoded = Decoder::with_registry(&mut reader, &registry).required_object()?;
//!     assert_eq!(decoded.downcast_ref::<Note>(), Some(&note));
//!     Ok(())
//! }
//! ```
//!
//! ## Wire Format
//!
//! ```text
//! +----------------------+---------------------------------------+
//! | fingerprint (20 B)   | fields in schema order                |
//! +----------------------+---------------------------------------+
//! ```
//!
//! See [`codec`] for the per-kind rules and [`schema::Entity::signature`]
//! for what the fingerprint covers.
//!
//! ## Modules Overview
//!
//! - [`schema`] - structural type descriptions
//! - [`id`] - fingerprints
//! - [`registry`] - fingerprint to codec map
//! - [`codec`] - encoder / decoder
//! - [`object`] - binary object contract
//! - [`dynamic`] - schema-driven values
//! - [`config`] - decode limits

pub mod codec;
pub mod config;
pub mod dynamic;
pub mod error;
pub mod id;
pub mod object;
pub mod registry;
pub mod schema;

pub use codec::{CodecError, CodecResult, Decoder, Encoder};
pub use config::DecodeLimits;
pub use dynamic::{DynamicObject, Value};
pub use error::{Error, Result};
pub use id::{BinaryId, ID_SIZE};
pub use object::{AsAny, BinaryObject, Class, Codec, CreateFn, DecodeFn, EncodeFn};
pub use registry::{Registry, RegistryError, RegistryResult};
pub use schema::{Entity, SchemaError};

use std::io::{Read, Write};
use std::sync::Arc;

/// Register a type with the global registry from explicit callables.
pub fn register_type<F>(
    entity: Arc<Entity>,
    create: F,
    encode: EncodeFn,
    decode: DecodeFn,
) -> Result<BinaryId>
where
    F: Fn() -> Box<dyn BinaryObject> + Send + Sync + 'static,
{
    Ok(Registry::global().register(Codec::new(entity, create, encode, decode))?)
}

/// Write `obj` as a polymorphic envelope, resolving its type in the
/// global registry.
pub fn encode_object(writer: &mut dyn Write, obj: &dyn BinaryObject) -> Result<()> {
    Encoder::new(writer).object(Some(obj))?;
    Ok(())
}

/// Read one polymorphic envelope using the global registry and the limits
/// from the environment. A null envelope is an error.
pub fn decode_object(reader: &mut dyn Read) -> Result<Box<dyn BinaryObject>> {
    let obj = Decoder::new(reader)
        .limits(DecodeLimits::from_env())
        .required_object()?;
    Ok(obj)
}

/// Encode `obj` as an envelope into a fresh buffer, against `registry`.
pub fn to_bytes(registry: &Registry, obj: &dyn BinaryObject) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    Encoder::with_registry(&mut buf, registry).object(Some(obj))?;
    Ok(buf)
}

/// Decode one envelope from `bytes` against `registry`.
///
/// Trailing bytes after the object are rejected.
pub fn from_bytes(registry: &Registry, bytes: &[u8]) -> Result<Box<dyn BinaryObject>> {
    let mut reader = bytes;
    let mut decoder = Decoder::with_registry(&mut reader, registry);
    let obj = decoder.required_object()?;
    let consumed = decoder.offset();
    if consumed != bytes.len() as u64 {
        return Err(CodecError::Corrupt {
            offset: consumed,
            reason: format!("{} trailing byte(s)", bytes.len() as u64 - consumed),
        }
        .into());
    }
    Ok(obj)
}

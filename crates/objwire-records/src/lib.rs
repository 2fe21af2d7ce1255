// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Leaf record types of the objwire protocol.
//!
//! | Type | Entity | Fields |
//! |------|--------|--------|
//! | [`Id`] | `any.id_` | `Value: id.ID [20]byte` |
//! | [`SliceMetadata`] | `memory.SliceMetadata` | `ElementTypeName: string` |
//!
//! Types are not registered implicitly; call [`init`] once at startup (or
//! [`register`] for an explicit registry) before decoding streams that may
//! carry them.
//!
//! ```rust
//! use objwire_records::{Id, SliceMetadata};
//!
//! objwire_records::init().expect("record types register");
//!
//! let mut stream = Vec::new();
//! let id = Id::new(objwire::BinaryId::of(b"trace"));
//! objwire::encode_object(&mut stream, &id).unwrap();
//! objwire::encode_object(&mut stream, &SliceMetadata::new("u32")).unwrap();
//!
//! let mut reader = stream.as_slice();
//! let first = objwire::decode_object(&mut reader).unwrap();
//! let second = objwire::decode_object(&mut reader).unwrap();
//! assert_eq!(first.downcast_ref::<Id>(), Some(&id));
//! assert_eq!(second.downcast_ref::<SliceMetadata>().unwrap().element_type_name(), "u32");
//! ```

pub mod any;
pub mod memory;

pub use any::Id;
pub use memory::SliceMetadata;

use objwire::{Registry, RegistryResult};

/// Register every record type with `registry`, leaf types first.
pub fn register(registry: &Registry) -> RegistryResult<()> {
    registry.register_class::<Id>()?;
    registry.register_class::<SliceMetadata>()?;
    log::debug!("[records] {} record type(s) available", registry.len());
    Ok(())
}

/// Register every record type with [`Registry::global`].
///
/// Registration is idempotent, so calling this more than once is harmless.
pub fn init() -> RegistryResult<()> {
    register(Registry::global())
}

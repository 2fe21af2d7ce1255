// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fingerprint-keyed type registry.
//!
//! Maps each entity fingerprint to the [`Codec`] that creates, encodes and
//! decodes its instances. Registration happens at startup, leaf types first;
//! after that the registry is read-mostly and lookups only take the read
//! lock. [`Registry::seal`] closes it to new types.

use crate::id::BinaryId;
use crate::object::{Class, Codec};
use crate::schema::{Entity, SchemaError};
use parking_lot::RwLock;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, LazyLock};

static GLOBAL: LazyLock<Registry> = LazyLock::new(Registry::new);

/// Registration failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("fingerprint {id} of {incoming} is already taken by {existing}")]
    Conflict {
        id: BinaryId,
        existing: String,
        incoming: String,
    },

    #[error("registry is sealed, cannot add {entity}")]
    Sealed { entity: String },
}

pub type RegistryResult<T> = core::result::Result<T, RegistryError>;

struct Entry {
    codec: Arc<Codec>,
    signature: Vec<u8>,
}

impl Entry {
    fn same_as(&self, signature: &[u8], type_id: TypeId) -> bool {
        self.signature == signature && self.codec.type_id() == type_id
    }
}

/// Concurrent map from fingerprint to codec.
pub struct Registry {
    entries: RwLock<HashMap<BinaryId, Entry>>,
    sealed: AtomicBool,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            sealed: AtomicBool::new(false),
        }
    }

    /// Process-wide registry used by [`crate::Encoder::new`],
    /// [`crate::Decoder::new`] and the free functions of the crate root.
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    /// Register `codec` under the fingerprint of its entity.
    ///
    /// Registering the same schema with a codec creating the same concrete
    /// type again is a no-op returning the id. Nested struct entities must
    /// be registered first.
    pub fn register(&self, codec: Codec) -> RegistryResult<BinaryId> {
        let entity = Arc::clone(codec.entity());
        let id = entity.fingerprint()?;
        if id.is_zero() {
            return Err(SchemaError::NullFingerprint {
                entity: entity.name(),
            }
            .into());
        }
        let signature = entity.signature()?;

        let mut entries = self.entries.write();

        if let Some(existing) = entries.get(&id) {
            if existing.same_as(&signature, codec.type_id()) {
                log::debug!("[registry] {} ({}) already registered", entity.name(), id);
                return Ok(id);
            }
            let existing = existing.codec.entity().name();
            log::warn!(
                "[registry] rejecting {}: fingerprint {} already taken by {}",
                entity.name(),
                id,
                existing
            );
            return Err(RegistryError::Conflict {
                id,
                existing,
                incoming: entity.name(),
            });
        }

        if self.is_sealed() {
            log::warn!("[registry] rejecting {}: registry is sealed", entity.name());
            return Err(RegistryError::Sealed {
                entity: entity.name(),
            });
        }

        check_nested(&entity, &entries)?;

        log::debug!(
            "[registry] registered {} ({}) with {} field(s)",
            entity.name(),
            id,
            entity.fields().len()
        );
        entries.insert(
            id,
            Entry {
                codec: Arc::new(codec),
                signature,
            },
        );
        Ok(id)
    }

    /// Register the static type `T`.
    pub fn register_class<T: Class>(&self) -> RegistryResult<BinaryId> {
        self.register(Codec::of::<T>())
    }

    /// Register `entity` for schema-driven decoding only.
    pub fn register_dynamic(&self, entity: Arc<Entity>) -> RegistryResult<BinaryId> {
        self.register(Codec::dynamic(entity))
    }

    #[must_use]
    pub fn lookup(&self, id: &BinaryId) -> Option<Arc<Codec>> {
        self.entries.read().get(id).map(|e| Arc::clone(&e.codec))
    }

    #[must_use]
    pub fn entity(&self, id: &BinaryId) -> Option<Arc<Entity>> {
        self.entries
            .read()
            .get(id)
            .map(|e| Arc::clone(e.codec.entity()))
    }

    pub fn contains(&self, id: &BinaryId) -> bool {
        self.entries.read().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Registered entities with their fingerprints, sorted by name.
    pub fn entities(&self) -> Vec<(BinaryId, Arc<Entity>)> {
        let mut out: Vec<_> = self
            .entries
            .read()
            .iter()
            .map(|(id, e)| (*id, Arc::clone(e.codec.entity())))
            .collect();
        out.sort_by(|a, b| a.1.name().cmp(&b.1.name()).then(a.0.cmp(&b.0)));
        out
    }

    /// Refuse new fingerprints from now on. Re-registering an existing
    /// type still succeeds.
    pub fn seal(&self) {
        if !self.sealed.swap(true, Ordering::AcqRel) {
            log::debug!("[registry] sealed with {} type(s)", self.len());
        }
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed.load(Ordering::Acquire)
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("types", &self.len())
            .field("sealed", &self.is_sealed())
            .finish()
    }
}

fn check_nested(entity: &Entity, entries: &HashMap<BinaryId, Entry>) -> RegistryResult<()> {
    for field in entity.fields() {
        let mut nested = Vec::new();
        field.node().nested_entities(&mut nested);
        for inner in nested {
            if !entries.contains_key(&inner.fingerprint()?) {
                return Err(SchemaError::UnregisteredNested {
                    entity: entity.name(),
                    nested: inner.name(),
                }
                .into());
            }
        }
    }
    Ok(())
}

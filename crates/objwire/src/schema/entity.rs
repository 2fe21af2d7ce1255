// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Entity: named, versioned composite schema.

use super::{Field, SchemaError, SchemaResult};
use crate::id::BinaryId;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Leading tag of every entity signature. Bump the suffix only together
/// with an incompatible change of the signature layout.
const SIGNATURE_PREFIX: &str = "objwire.entity/1";

/// Structural description of a composite type.
///
/// The field list is assigned exactly once through [`Entity::set_fields`];
/// the entity is frozen afterwards and its fingerprint is computed on first
/// use and cached.
///
/// ```
/// use objwire::schema::{Entity, Field, Method, Node};
///
/// let entity = Entity::new("memory", "SliceMetadata", "", "")
///     .with_fields(vec![Field::new("ElementTypeName", Node::of(Method::String))])
///     .unwrap();
/// assert_eq!(entity.name(), "memory.SliceMetadata");
/// assert!(entity.fingerprint().is_ok());
/// ```
#[derive(Debug)]
pub struct Entity {
    package: String,
    identity: String,
    version: String,
    display: String,
    doc: String,
    fields: OnceLock<Vec<Field>>,
    fingerprint: OnceLock<BinaryId>,
}

impl Entity {
    pub fn new(
        package: impl Into<String>,
        identity: impl Into<String>,
        display: impl Into<String>,
        doc: impl Into<String>,
    ) -> Self {
        Self {
            package: package.into(),
            identity: identity.into(),
            version: String::new(),
            display: display.into(),
            doc: doc.into(),
            fields: OnceLock::new(),
            fingerprint: OnceLock::new(),
        }
    }

    /// Tag the entity with a version. The version is part of the fingerprint.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Builder form of [`Entity::set_fields`].
    pub fn with_fields(self, fields: Vec<Field>) -> SchemaResult<Self> {
        self.set_fields(fields)?;
        Ok(self)
    }

    /// Assign the field list. Succeeds once per entity.
    pub fn set_fields(&self, fields: Vec<Field>) -> SchemaResult<()> {
        if self.is_finalized() {
            return Err(SchemaError::FieldsAlreadySet { entity: self.name() });
        }

        let mut seen = HashSet::with_capacity(fields.len());
        for field in &fields {
            if !seen.insert(field.name()) {
                return Err(SchemaError::DuplicateField {
                    entity: self.name(),
                    field: field.name().to_string(),
                });
            }

            let mut nested = Vec::new();
            field.node().nested_entities(&mut nested);
            if let Some(open) = nested.iter().find(|e| !e.is_finalized()) {
                return Err(SchemaError::UnfinalizedNested {
                    entity: self.name(),
                    field: field.name().to_string(),
                    nested: open.name(),
                });
            }
        }

        self.fields
            .set(fields)
            .map_err(|_| SchemaError::FieldsAlreadySet { entity: self.name() })
    }

    pub fn is_finalized(&self) -> bool {
        self.fields.get().is_some()
    }

    /// Ordered fields; empty until [`Entity::set_fields`] ran.
    pub fn fields(&self) -> &[Field] {
        self.fields.get().map_or(&[], Vec::as_slice)
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn doc(&self) -> &str {
        &self.doc
    }

    /// Qualified name, `package.identity`.
    pub fn name(&self) -> String {
        if self.package.is_empty() {
            self.identity.clone()
        } else {
            format!("{}.{}", self.package, self.identity)
        }
    }

    /// Canonical byte serialization of the structure.
    ///
    /// Covers package, identity, version and for every field its name and
    /// node. Display name, aliases and documentation are left out.
    pub fn signature(&self) -> SchemaResult<Vec<u8>> {
        let fields = self
            .fields
            .get()
            .ok_or_else(|| SchemaError::FieldsNotSet { entity: self.name() })?;

        let mut out = Vec::with_capacity(64 + fields.len() * 16);
        self.write_str(&mut out, SIGNATURE_PREFIX)?;
        self.write_str(&mut out, &self.package)?;
        self.write_str(&mut out, &self.identity)?;
        self.write_str(&mut out, &self.version)?;
        self.write_len(&mut out, fields.len())?;
        for field in fields {
            self.write_str(&mut out, field.name())?;
            field.node().write_signature(&mut out)?;
        }
        Ok(out)
    }

    /// Fingerprint of the structure, computed once.
    pub fn fingerprint(&self) -> SchemaResult<BinaryId> {
        if let Some(id) = self.fingerprint.get() {
            return Ok(*id);
        }
        let id = BinaryId::of(&self.signature()?);
        Ok(*self.fingerprint.get_or_init(|| id))
    }

    /// True when both entities have identical signatures.
    pub fn same_structure(&self, other: &Entity) -> bool {
        match (self.signature(), other.signature()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }

    fn write_len(&self, out: &mut Vec<u8>, len: usize) -> SchemaResult<()> {
        let len = u32::try_from(len).map_err(|_| SchemaError::TooLarge {
            entity: self.name(),
        })?;
        out.extend_from_slice(&len.to_le_bytes());
        Ok(())
    }

    fn write_str(&self, out: &mut Vec<u8>, value: &str) -> SchemaResult<()> {
        self.write_len(out, value.len())?;
        out.extend_from_slice(value.as_bytes());
        Ok(())
    }
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! `any.id_`: an opaque 20-byte identifier carried as a record.

use objwire::schema::{Entity, Field, Method, Node};
use objwire::{BinaryId, BinaryObject, Class, CodecResult, Decoder, Encoder, ID_SIZE};
use std::sync::{Arc, LazyLock};

static ENTITY: LazyLock<Arc<Entity>> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // static schema, validated by tests
    let entity = Entity::new("any", "id_", "", "")
        .with_fields(vec![Field::new(
            "Value",
            Node::fixed(
                "id.ID",
                Node::primitive("byte", Method::Uint8),
                ID_SIZE as u32,
            ),
        )])
        .expect("any.id_ schema is valid");
    Arc::new(entity)
});

/// Identifier record. Defaults to the null id.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id {
    value: BinaryId,
}

impl Id {
    pub fn new(value: BinaryId) -> Self {
        Self { value }
    }

    pub fn value(&self) -> BinaryId {
        self.value
    }

    pub fn set_value(&mut self, value: BinaryId) -> &mut Self {
        self.value = value;
        self
    }
}

impl From<BinaryId> for Id {
    fn from(value: BinaryId) -> Self {
        Self::new(value)
    }
}

impl BinaryObject for Id {
    fn entity(&self) -> &Arc<Entity> {
        &ENTITY
    }

    fn encode(&self, e: &mut Encoder<'_>) -> CodecResult<()> {
        e.id(&self.value)
    }

    fn decode(&mut self, d: &mut Decoder<'_>) -> CodecResult<()> {
        self.value = d.id()?;
        Ok(())
    }
}

impl Class for Id {
    fn class_entity() -> &'static Arc<Entity> {
        &ENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_shape() {
        let entity = Id::class_entity();
        assert_eq!(entity.name(), "any.id_");
        let fields = entity.fields();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name(), "Value");
        assert_eq!(fields[0].node().to_string(), "id.ID [20]byte");
    }

    #[test]
    fn test_accessors() {
        let mut id = Id::default();
        assert!(id.value().is_zero());
        let value = BinaryId::of(b"capture");
        id.set_value(value);
        assert_eq!(id.value(), value);
        assert_eq!(Id::from(value), id);
    }
}

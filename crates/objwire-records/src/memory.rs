// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! `memory.SliceMetadata`: describes the element type of a memory slice.

use objwire::schema::{Entity, Field, Method, Node};
use objwire::{BinaryObject, Class, CodecResult, Decoder, Encoder};
use std::sync::{Arc, LazyLock};

static ENTITY: LazyLock<Arc<Entity>> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // static schema, validated by tests
    let entity = Entity::new("memory", "SliceMetadata", "", "")
        .with_fields(vec![Field::new(
            "ElementTypeName",
            Node::primitive("string", Method::String),
        )])
        .expect("memory.SliceMetadata schema is valid");
    Arc::new(entity)
});

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SliceMetadata {
    element_type_name: String,
}

impl SliceMetadata {
    pub fn new(element_type_name: impl Into<String>) -> Self {
        Self {
            element_type_name: element_type_name.into(),
        }
    }

    pub fn element_type_name(&self) -> &str {
        &self.element_type_name
    }

    pub fn set_element_type_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.element_type_name = name.into();
        self
    }
}

impl BinaryObject for SliceMetadata {
    fn entity(&self) -> &Arc<Entity> {
        &ENTITY
    }

    fn encode(&self, e: &mut Encoder<'_>) -> CodecResult<()> {
        e.string(&self.element_type_name)
    }

    fn decode(&mut self, d: &mut Decoder<'_>) -> CodecResult<()> {
        self.element_type_name = d.string()?;
        Ok(())
    }
}

impl Class for SliceMetadata {
    fn class_entity() -> &'static Arc<Entity> {
        &ENTITY
    }
}

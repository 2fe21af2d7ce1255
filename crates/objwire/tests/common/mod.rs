// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Shared fixture types for the integration tests.
//!
//! Three envelope types (`Circle`, `Label`, `Group`) for polymorphic dispatch
//! and `Sample` covering every primitive method.

#![allow(dead_code)]

use objwire::schema::{Entity, Field, Method, Node};
use objwire::{BinaryObject, Class, CodecResult, Decoder, Encoder, Registry};
use std::sync::{Arc, LazyLock};

pub static CIRCLE: LazyLock<Arc<Entity>> = LazyLock::new(|| {
    Arc::new(
        Entity::new("shapes", "Circle", "Circle", "A filled or hollow circle")
            .with_fields(vec![
                Field::new("Radius", Node::of(Method::Float64)),
                Field::new("Filled", Node::of(Method::Bool)),
            ])
            .unwrap(),
    )
});

pub static LABEL: LazyLock<Arc<Entity>> = LazyLock::new(|| {
    Arc::new(
        Entity::new("shapes", "Label", "", "")
            .with_fields(vec![
                Field::new("Text", Node::of(Method::String)),
                Field::new("Sizes", Node::slice("", Node::of(Method::Uint16))),
            ])
            .unwrap(),
    )
});

pub static GROUP: LazyLock<Arc<Entity>> = LazyLock::new(|| {
    Arc::new(
        Entity::new("shapes", "Group", "", "")
            .with_fields(vec![
                Field::new("Origin", Node::structure(&CIRCLE)),
                Field::new("Key", Node::fixed("", Node::primitive("byte", Method::Uint8), 4)),
                Field::new("Members", Node::slice("", Node::Object)),
                Field::new("Note", Node::Object),
            ])
            .unwrap(),
    )
});

pub static SAMPLE: LazyLock<Arc<Entity>> = LazyLock::new(|| {
    Arc::new(
        Entity::new("test", "Sample", "", "")
            .with_version("2")
            .with_fields(vec![
                Field::new("B", Node::of(Method::Bool)),
                Field::new("I8", Node::of(Method::Int8)),
                Field::new("U8", Node::of(Method::Uint8)),
                Field::new("I16", Node::of(Method::Int16)),
                Field::new("U16", Node::of(Method::Uint16)),
                Field::new("I32", Node::of(Method::Int32)),
                Field::new("U32", Node::of(Method::Uint32)),
                Field::new("I64", Node::of(Method::Int64)),
                Field::new("U64", Node::of(Method::Uint64)),
                Field::new("F32", Node::of(Method::Float32)),
                Field::new("F64", Node::of(Method::Float64)),
                Field::new("S", Node::of(Method::String)),
            ])
            .unwrap(),
    )
});

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Circle {
    pub radius: f64,
    pub filled: bool,
}

impl BinaryObject for Circle {
    fn entity(&self) -> &Arc<Entity> {
        &CIRCLE
    }

    fn encode(&self, e: &mut Encoder<'_>) -> CodecResult<()> {
        e.f64(self.radius)?;
        e.bool(self.filled)
    }

    fn decode(&mut self, d: &mut Decoder<'_>) -> CodecResult<()> {
        self.radius = d.f64()?;
        self.filled = d.bool()?;
        Ok(())
    }
}

impl Class for Circle {
    fn class_entity() -> &'static Arc<Entity> {
        &CIRCLE
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub sizes: Vec<u16>,
}

impl BinaryObject for Label {
    fn entity(&self) -> &Arc<Entity> {
        &LABEL
    }

    fn encode(&self, e: &mut Encoder<'_>) -> CodecResult<()> {
        e.string(&self.text)?;
        e.count(self.sizes.len())?;
        for size in &self.sizes {
            e.u16(*size)?;
        }
        Ok(())
    }

    fn decode(&mut self, d: &mut Decoder<'_>) -> CodecResult<()> {
        self.text = d.string()?;
        let count = d.count()?;
        self.sizes = Vec::with_capacity(count.min(64));
        for _ in 0..count {
            self.sizes.push(d.u16()?);
        }
        Ok(())
    }
}

impl Class for Label {
    fn class_entity() -> &'static Arc<Entity> {
        &LABEL
    }
}

#[derive(Debug, Default)]
pub struct Group {
    pub origin: Circle,
    pub key: [u8; 4],
    pub members: Vec<Option<Box<dyn BinaryObject>>>,
    pub note: Option<Box<dyn BinaryObject>>,
}

impl BinaryObject for Group {
    fn entity(&self) -> &Arc<Entity> {
        &GROUP
    }

    fn encode(&self, e: &mut Encoder<'_>) -> CodecResult<()> {
        e.value(&self.origin)?;
        e.bytes(&self.key)?;
        e.count(self.members.len())?;
        for member in &self.members {
            e.object(member.as_deref())?;
        }
        e.object(self.note.as_deref())
    }

    fn decode(&mut self, d: &mut Decoder<'_>) -> CodecResult<()> {
        d.value(&mut self.origin)?;
        d.bytes(&mut self.key)?;
        let count = d.count()?;
        self.members = Vec::with_capacity(count.min(64));
        for _ in 0..count {
            self.members.push(d.object()?);
        }
        self.note = d.object()?;
        Ok(())
    }
}

impl Class for Group {
    fn class_entity() -> &'static Arc<Entity> {
        &GROUP
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Sample {
    pub b: bool,
    pub i8: i8,
    pub u8: u8,
    pub i16: i16,
    pub u16: u16,
    pub i32: i32,
    pub u32: u32,
    pub i64: i64,
    pub u64: u64,
    pub f32: f32,
    pub f64: f64,
    pub s: String,
}

impl BinaryObject for Sample {
    fn entity(&self) -> &Arc<Entity> {
        &SAMPLE
    }

    fn encode(&self, e: &mut Encoder<'_>) -> CodecResult<()> {
        e.bool(self.b)?;
        e.i8(self.i8)?;
        e.u8(self.u8)?;
        e.i16(self.i16)?;
        e.u16(self.u16)?;
        e.i32(self.i32)?;
        e.u32(self.u32)?;
        e.i64(self.i64)?;
        e.u64(self.u64)?;
        e.f32(self.f32)?;
        e.f64(self.f64)?;
        e.string(&self.s)
    }

    fn decode(&mut self, d: &mut Decoder<'_>) -> CodecResult<()> {
        self.b = d.bool()?;
        self.i8 = d.i8()?;
        self.u8 = d.u8()?;
        self.i16 = d.i16()?;
        self.u16 = d.u16()?;
        self.i32 = d.i32()?;
        self.u32 = d.u32()?;
        self.i64 = d.i64()?;
        self.u64 = d.u64()?;
        self.f32 = d.f32()?;
        self.f64 = d.f64()?;
        self.s = d.string()?;
        Ok(())
    }
}

impl Class for Sample {
    fn class_entity() -> &'static Arc<Entity> {
        &SAMPLE
    }
}

/// Registry with every fixture type, leaf types first.
pub fn registry() -> Registry {
    let registry = Registry::new();
    registry.register_class::<Circle>().unwrap();
    registry.register_class::<Label>().unwrap();
    registry.register_class::<Group>().unwrap();
    registry.register_class::<Sample>().unwrap();
    registry
}

pub fn sample() -> Sample {
    Sample {
        b: true,
        i8: -8,
        u8: 0xF8,
        i16: -1600,
        u16: 0xFEED,
        i32: -320_000,
        u32: 0xDEAD_BEEF,
        i64: -6_400_000_000,
        u64: u64::MAX - 1,
        f32: 1.25,
        f64: -2.5e-3,
        s: "wire ✓".to_string(),
    }
}

/// A group holding one of each envelope type, a null member and a nested group.
pub fn group() -> Group {
    let inner = Group {
        origin: Circle {
            radius: 0.5,
            filled: false,
        },
        key: [9, 9, 9, 9],
        members: vec![],
        note: boxed(Label {
            text: "inner".into(),
            sizes: vec![],
        }),
    };
    Group {
        origin: Circle {
            radius: 10.0,
            filled: true,
        },
        key: [1, 2, 3, 4],
        members: vec![
            boxed(Circle {
                radius: 1.5,
                filled: true,
            }),
            None,
            boxed(Label {
                text: "hello".into(),
                sizes: vec![8, 12, 16],
            }),
            boxed(inner),
        ],
        note: None,
    }
}

pub fn boxed<T: BinaryObject>(obj: T) -> Option<Box<dyn BinaryObject>> {
    Some(Box::new(obj))
}

/// Envelope bytes of `obj`.
pub fn envelope(registry: &Registry, obj: &dyn BinaryObject) -> Vec<u8> {
    objwire::to_bytes(registry, obj).unwrap()
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema-driven values.
//!
//! A [`DynamicObject`] carries one [`Value`] per field of its entity and
//! encodes/decodes purely from the schema, so any registered type can be
//! read and inspected without its concrete Rust type.

use crate::codec::{CodecError, CodecResult, Decoder, Encoder};
use crate::config::PREALLOC_LIMIT;
use crate::object::BinaryObject;
use crate::schema::{Entity, Field, Method, Node};
use std::fmt;
use std::sync::Arc;

/// A decoded field value, mirroring the [`Node`] kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int8(i8),
    Uint8(u8),
    Int16(i16),
    Uint16(u16),
    Int32(i32),
    Uint32(u32),
    Int64(i64),
    Uint64(u64),
    Float32(f32),
    Float64(f64),
    String(String),
    /// Fixed array or slice.
    Array(Vec<Value>),
    /// Nested entity, inline.
    Struct(DynamicObject),
    /// Polymorphic object, `None` for null.
    Object(Option<Box<DynamicObject>>),
}

impl Value {
    /// Zero value of `node`: numbers 0, empty strings and slices, fixed
    /// arrays of zeros, nested structs zero-filled, null objects.
    pub fn zero(node: &Node) -> Self {
        match node {
            Node::Primitive(p) => match p.method() {
                Method::Bool => Value::Bool(false),
                Method::Int8 => Value::Int8(0),
                Method::Uint8 => Value::Uint8(0),
                Method::Int16 => Value::Int16(0),
                Method::Uint16 => Value::Uint16(0),
                Method::Int32 => Value::Int32(0),
                Method::Uint32 => Value::Uint32(0),
                Method::Int64 => Value::Int64(0),
                Method::Uint64 => Value::Uint64(0),
                Method::Float32 => Value::Float32(0.0),
                Method::Float64 => Value::Float64(0.0),
                Method::String => Value::String(String::new()),
            },
            Node::Array(a) => match a.size() {
                Some(size) => Value::Array(
                    (0..size).map(|_| Value::zero(a.element())).collect(),
                ),
                None => Value::Array(Vec::new()),
            },
            Node::Struct(entity) => Value::Struct(DynamicObject::new(Arc::clone(entity))),
            Node::Object => Value::Object(None),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Contents of an array of `Uint8`.
    pub fn as_bytes(&self) -> Option<Vec<u8>> {
        match self {
            Value::Array(items) => items
                .iter()
                .map(|v| match v {
                    Value::Uint8(b) => Some(*b),
                    _ => None,
                })
                .collect(),
            _ => None,
        }
    }

    /// Integer content widened to `i128`.
    pub fn as_integer(&self) -> Option<i128> {
        match *self {
            Value::Int8(v) => Some(v.into()),
            Value::Uint8(v) => Some(v.into()),
            Value::Int16(v) => Some(v.into()),
            Value::Uint16(v) => Some(v.into()),
            Value::Int32(v) => Some(v.into()),
            Value::Uint32(v) => Some(v.into()),
            Value::Int64(v) => Some(v.into()),
            Value::Uint64(v) => Some(v.into()),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Value::Uint8(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int32(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Uint32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Uint64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Array(v.iter().copied().map(Value::Uint8).collect())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int8(v) => write!(f, "{}", v),
            Value::Uint8(v) => write!(f, "{}", v),
            Value::Int16(v) => write!(f, "{}", v),
            Value::Uint16(v) => write!(f, "{}", v),
            Value::Int32(v) => write!(f, "{}", v),
            Value::Uint32(v) => write!(f, "{}", v),
            Value::Int64(v) => write!(f, "{}", v),
            Value::Uint64(v) => write!(f, "{}", v),
            Value::Float32(v) => write!(f, "{}", v),
            Value::Float64(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "{:?}", v),
            Value::Array(items) => {
                if let (false, Some(bytes)) = (items.is_empty(), self.as_bytes()) {
                    for b in bytes {
                        write!(f, "{:02x}", b)?;
                    }
                    return Ok(());
                }
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Struct(obj) => write!(f, "{}", obj),
            Value::Object(None) => f.write_str("null"),
            Value::Object(Some(obj)) => write!(f, "{}{}", obj.entity().name(), obj),
        }
    }
}

/// Instance of an entity held as schema-ordered [`Value`]s.
#[derive(Debug, Clone)]
pub struct DynamicObject {
    entity: Arc<Entity>,
    fields: Vec<Value>,
}

impl DynamicObject {
    /// Zero-filled instance.
    pub fn new(entity: Arc<Entity>) -> Self {
        let fields = entity
            .fields()
            .iter()
            .map(|field| Value::zero(field.node()))
            .collect();
        Self { entity, fields }
    }

    /// Instance from field values in schema order.
    ///
    /// The values are checked against the schema when encoded.
    pub fn with_values(entity: Arc<Entity>, fields: Vec<Value>) -> Self {
        Self { entity, fields }
    }

    pub fn values(&self) -> &[Value] {
        &self.fields
    }

    pub fn into_values(self) -> Vec<Value> {
        self.fields
    }

    /// Value of the field called `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.position(name).and_then(|i| self.fields.get(i))
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.position(name).and_then(|i| self.fields.get_mut(i))
    }

    /// Replace the value of `name`, returning the previous one.
    /// `None` when the entity has no such field.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Option<Value> {
        self.get_mut(name)
            .map(|slot| std::mem::replace(slot, value.into()))
    }

    /// Fields paired with their values.
    pub fn iter(&self) -> impl Iterator<Item = (&Field, &Value)> {
        self.entity.fields().iter().zip(self.fields.iter())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entity.fields().iter().position(|f| f.name() == name)
    }

    fn mismatch(&self, field: &Field) -> CodecError {
        CodecError::SchemaMismatch {
            entity: self.entity.name(),
            field: field.name().to_string(),
        }
    }

    fn write_value(
        &self,
        e: &mut Encoder<'_>,
        field: &Field,
        node: &Node,
        value: &Value,
    ) -> CodecResult<()> {
        match (node, value) {
            (Node::Primitive(p), value) => match (p.method(), value) {
                (Method::Bool, Value::Bool(v)) => e.bool(*v),
                (Method::Int8, Value::Int8(v)) => e.i8(*v),
                (Method::Uint8, Value::Uint8(v)) => e.u8(*v),
                (Method::Int16, Value::Int16(v)) => e.i16(*v),
                (Method::Uint16, Value::Uint16(v)) => e.u16(*v),
                (Method::Int32, Value::Int32(v)) => e.i32(*v),
                (Method::Uint32, Value::Uint32(v)) => e.u32(*v),
                (Method::Int64, Value::Int64(v)) => e.i64(*v),
                (Method::Uint64, Value::Uint64(v)) => e.u64(*v),
                (Method::Float32, Value::Float32(v)) => e.f32(*v),
                (Method::Float64, Value::Float64(v)) => e.f64(*v),
                (Method::String, Value::String(v)) => e.string(v),
                _ => Err(self.mismatch(field)),
            },
            (Node::Array(a), Value::Array(items)) => {
                match a.size() {
                    Some(size) => {
                        if items.len() != size as usize {
                            return Err(self.mismatch(field));
                        }
                    }
                    None => e.count(items.len())?,
                }
                for item in items {
                    self.write_value(e, field, a.element(), item)?;
                }
                Ok(())
            }
            (Node::Struct(entity), Value::Struct(obj)) => {
                if !obj.entity.same_structure(entity) {
                    return Err(self.mismatch(field));
                }
                e.value(obj)
            }
            (Node::Object, Value::Object(obj)) => {
                e.object(obj.as_deref().map(|o| o as &dyn BinaryObject))
            }
            _ => Err(self.mismatch(field)),
        }
    }
}

impl PartialEq for DynamicObject {
    fn eq(&self, other: &Self) -> bool {
        (Arc::ptr_eq(&self.entity, &other.entity) || self.entity.same_structure(&other.entity))
            && self.fields == other.fields
    }
}

impl fmt::Display for DynamicObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (field, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", field.name(), value)?;
        }
        f.write_str("}")
    }
}

impl BinaryObject for DynamicObject {
    fn entity(&self) -> &Arc<Entity> {
        &self.entity
    }

    fn encode(&self, e: &mut Encoder<'_>) -> CodecResult<()> {
        let fields = self.entity.fields();
        if let Some(missing) = fields.get(self.fields.len()) {
            return Err(self.mismatch(missing));
        }
        if self.fields.len() > fields.len() {
            return Err(CodecError::SchemaMismatch {
                entity: self.entity.name(),
                field: format!("#{}", fields.len()),
            });
        }
        for (field, value) in fields.iter().zip(&self.fields) {
            self.write_value(e, field, field.node(), value)?;
        }
        Ok(())
    }

    fn decode(&mut self, d: &mut Decoder<'_>) -> CodecResult<()> {
        let entity = Arc::clone(&self.entity);
        let mut fields = Vec::with_capacity(entity.fields().len());
        for field in entity.fields() {
            fields.push(read_value(d, field.node())?);
        }
        self.fields = fields;
        Ok(())
    }
}

fn read_value(d: &mut Decoder<'_>, node: &Node) -> CodecResult<Value> {
    Ok(match node {
        Node::Primitive(p) => match p.method() {
            Method::Bool => Value::Bool(d.bool()?),
            Method::Int8 => Value::Int8(d.i8()?),
            Method::Uint8 => Value::Uint8(d.u8()?),
            Method::Int16 => Value::Int16(d.i16()?),
            Method::Uint16 => Value::Uint16(d.u16()?),
            Method::Int32 => Value::Int32(d.i32()?),
            Method::Uint32 => Value::Uint32(d.u32()?),
            Method::Int64 => Value::Int64(d.i64()?),
            Method::Uint64 => Value::Uint64(d.u64()?),
            Method::Float32 => Value::Float32(d.f32()?),
            Method::Float64 => Value::Float64(d.f64()?),
            Method::String => Value::String(d.string()?),
        },
        Node::Array(a) => {
            let len = match a.size() {
                Some(size) => size as usize,
                None => d.count()?,
            };
            let mut items = Vec::with_capacity(len.min(PREALLOC_LIMIT));
            for _ in 0..len {
                items.push(read_value(d, a.element())?);
            }
            Value::Array(items)
        }
        Node::Struct(entity) => {
            let mut obj = DynamicObject::new(Arc::clone(entity));
            d.value(&mut obj)?;
            Value::Struct(obj)
        }
        Node::Object => Value::Object(d.dynamic_object()?.map(Box::new)),
    })
}

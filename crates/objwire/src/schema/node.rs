// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema nodes: the shape of a field independent of any value.

use super::{Entity, Method, Primitive, SchemaResult};
use std::fmt;
use std::sync::Arc;

// Signature tags. Written into fingerprints: never renumber.
const TAG_PRIMITIVE: u8 = 0x01;
const TAG_FIXED_ARRAY: u8 = 0x02;
const TAG_SLICE: u8 = 0x03;
const TAG_STRUCT: u8 = 0x04;
const TAG_OBJECT: u8 = 0x05;

/// Homogeneous sequence of an element node.
///
/// `size == Some(n)` is a fixed array (no length prefix on the wire),
/// `size == None` a slice (`u32` element count prefix).
#[derive(Debug, Clone)]
pub struct Array {
    alias: String,
    element: Box<Node>,
    size: Option<u32>,
}

impl Array {
    pub fn fixed(alias: impl Into<String>, element: Node, size: u32) -> Self {
        Self {
            alias: alias.into(),
            element: Box::new(element),
            size: Some(size),
        }
    }

    pub fn slice(alias: impl Into<String>, element: Node) -> Self {
        Self {
            alias: alias.into(),
            element: Box::new(element),
            size: None,
        }
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn element(&self) -> &Node {
        &self.element
    }

    /// Fixed length, `None` for slices.
    pub const fn size(&self) -> Option<u32> {
        self.size
    }

    pub const fn is_fixed(&self) -> bool {
        self.size.is_some()
    }
}

/// Kind of a field.
#[derive(Debug, Clone)]
pub enum Node {
    Primitive(Primitive),
    Array(Array),
    /// Nested entity encoded inline, without a fingerprint.
    Struct(Arc<Entity>),
    /// Any registered binary object (or null), encoded through the
    /// fingerprint envelope.
    Object,
}

impl Node {
    pub fn primitive(name: impl Into<String>, method: Method) -> Self {
        Node::Primitive(Primitive::new(name, method))
    }

    /// Primitive named after its method.
    pub fn of(method: Method) -> Self {
        Node::Primitive(Primitive::of(method))
    }

    pub fn fixed(alias: impl Into<String>, element: Node, size: u32) -> Self {
        Node::Array(Array::fixed(alias, element, size))
    }

    pub fn slice(alias: impl Into<String>, element: Node) -> Self {
        Node::Array(Array::slice(alias, element))
    }

    pub fn structure(entity: &Arc<Entity>) -> Self {
        Node::Struct(Arc::clone(entity))
    }

    /// Append the canonical signature of this node to `out`.
    pub(crate) fn write_signature(&self, out: &mut Vec<u8>) -> SchemaResult<()> {
        match self {
            Node::Primitive(p) => {
                out.push(TAG_PRIMITIVE);
                out.push(p.method().to_u8());
            }
            Node::Array(a) => {
                match a.size() {
                    Some(size) => {
                        out.push(TAG_FIXED_ARRAY);
                        out.extend_from_slice(&size.to_le_bytes());
                    }
                    None => out.push(TAG_SLICE),
                }
                a.element().write_signature(out)?;
            }
            Node::Struct(entity) => {
                out.push(TAG_STRUCT);
                out.extend_from_slice(entity.fingerprint()?.as_bytes());
            }
            Node::Object => out.push(TAG_OBJECT),
        }
        Ok(())
    }

    /// Every entity this node refers to inline, depth first.
    pub fn nested_entities<'a>(&'a self, out: &mut Vec<&'a Arc<Entity>>) {
        match self {
            Node::Array(a) => a.element().nested_entities(out),
            Node::Struct(entity) => out.push(entity),
            Node::Primitive(_) | Node::Object => {}
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Primitive(p) => f.write_str(p.name()),
            Node::Array(a) => {
                if !a.alias().is_empty() {
                    f.write_str(a.alias())?;
                    f.write_str(" ")?;
                }
                match a.size() {
                    Some(size) => write!(f, "[{}]{}", size, a.element()),
                    None => write!(f, "[]{}", a.element()),
                }
            }
            Node::Struct(entity) => f.write_str(&entity.name()),
            Node::Object => f.write_str("object"),
        }
    }
}

/// A named, ordered component of an entity.
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    node: Node,
}

impl Field {
    pub fn new(name: impl Into<String>, node: Node) -> Self {
        Self {
            name: name.into(),
            node,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn node(&self) -> &Node {
        &self.node
    }
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Primitive wire methods.

use std::fmt;

/// Wire encoding method of a primitive value.
///
/// The discriminant is written into entity signatures, so existing values
/// must never be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Method {
    /// One byte, `0` or `1`
    Bool = 0x01,
    Int8 = 0x02,
    Uint8 = 0x03,
    Int16 = 0x04,
    Uint16 = 0x05,
    Int32 = 0x06,
    Uint32 = 0x07,
    Int64 = 0x08,
    Uint64 = 0x09,
    Float32 = 0x0A,
    Float64 = 0x0B,
    /// `u32` byte length + UTF-8 bytes
    String = 0x20,
}

impl Method {
    pub const ALL: [Method; 12] = [
        Method::Bool,
        Method::Int8,
        Method::Uint8,
        Method::Int16,
        Method::Uint16,
        Method::Int32,
        Method::Uint32,
        Method::Int64,
        Method::Uint64,
        Method::Float32,
        Method::Float64,
        Method::String,
    ];

    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x01 => Some(Method::Bool),
            0x02 => Some(Method::Int8),
            0x03 => Some(Method::Uint8),
            0x04 => Some(Method::Int16),
            0x05 => Some(Method::Uint16),
            0x06 => Some(Method::Int32),
            0x07 => Some(Method::Uint32),
            0x08 => Some(Method::Int64),
            0x09 => Some(Method::Uint64),
            0x0A => Some(Method::Float32),
            0x0B => Some(Method::Float64),
            0x20 => Some(Method::String),
            _ => None,
        }
    }

    /// Encoded size in bytes, `None` for variable-size methods.
    pub const fn fixed_size(self) -> Option<usize> {
        match self {
            Method::Bool | Method::Int8 | Method::Uint8 => Some(1),
            Method::Int16 | Method::Uint16 => Some(2),
            Method::Int32 | Method::Uint32 | Method::Float32 => Some(4),
            Method::Int64 | Method::Uint64 | Method::Float64 => Some(8),
            Method::String => None,
        }
    }

    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            Method::Int8
                | Method::Uint8
                | Method::Int16
                | Method::Uint16
                | Method::Int32
                | Method::Uint32
                | Method::Int64
                | Method::Uint64
        )
    }

    pub const fn name(self) -> &'static str {
        match self {
            Method::Bool => "bool",
            Method::Int8 => "int8",
            Method::Uint8 => "uint8",
            Method::Int16 => "int16",
            Method::Uint16 => "uint16",
            Method::Int32 => "int32",
            Method::Uint32 => "uint32",
            Method::Int64 => "int64",
            Method::Uint64 => "uint64",
            Method::Float32 => "float32",
            Method::Float64 => "float64",
            Method::String => "string",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A scalar schema node: display name plus wire method.
///
/// Only the method is structural. `Primitive::new("byte", Method::Uint8)`
/// and `Primitive::new("u8", Method::Uint8)` fingerprint identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Primitive {
    name: String,
    method: Method,
}

impl Primitive {
    pub fn new(name: impl Into<String>, method: Method) -> Self {
        Self {
            name: name.into(),
            method,
        }
    }

    /// Primitive named after its method (`int32`, `string`, ...).
    pub fn of(method: Method) -> Self {
        Self::new(method.name(), method)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn method(&self) -> Method {
        self.method
    }
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Crate-level error type.

use crate::codec::CodecError;
use crate::registry::RegistryError;
use crate::schema::SchemaError;

/// Any failure surfaced by the crate root functions.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
}

impl Error {
    /// True for errors caused by malformed input bytes.
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Error::Codec(e) if e.is_malformed_input())
    }
}

pub type Result<T> = core::result::Result<T, Error>;

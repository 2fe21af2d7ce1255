// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structural schema model.
//!
//! Describes the shape of a type independently of any value:
//!
//! - [`Method`] / [`Primitive`] - scalar wire kinds
//! - [`Array`] - fixed arrays and slices of an element node
//! - [`Node`] - the kind of a field (primitive, array, nested struct, polymorphic object)
//! - [`Field`] / [`Entity`] - named composite types
//!
//! Entities are compared structurally through their canonical signature,
//! which is also the input of the fingerprint (see [`Entity::signature`]).

mod entity;
mod method;
mod node;

pub use entity::Entity;
pub use method::{Method, Primitive};
pub use node::{Array, Field, Node};

/// Malformed schema definitions.
///
/// These are programming errors in a type definition and are expected to
/// abort startup when they surface from registration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("fields of {entity} were already assigned")]
    FieldsAlreadySet { entity: String },

    #[error("fields of {entity} were never assigned")]
    FieldsNotSet { entity: String },

    #[error("{entity} declares field {field} twice")]
    DuplicateField { entity: String, field: String },

    #[error("field {field} of {entity} refers to {nested}, whose fields are not assigned")]
    UnfinalizedNested {
        entity: String,
        field: String,
        nested: String,
    },

    #[error("{entity} refers to {nested}, which is not registered")]
    UnregisteredNested { entity: String, nested: String },

    #[error("{entity} hashes to the reserved null id")]
    NullFingerprint { entity: String },

    #[error("{entity} has a name or field list too large to encode")]
    TooLarge { entity: String },
}

pub type SchemaResult<T> = core::result::Result<T, SchemaError>;

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Binary object contract.
//!
//! A binary object is a value of a registered type: it knows its [`Entity`]
//! and how to write and read its own fields. The [`Codec`] registered for
//! its fingerprint creates blank instances when a polymorphic envelope is
//! decoded.

use crate::codec::{CodecError, CodecResult, Decoder, Encoder};
use crate::dynamic::DynamicObject;
use crate::schema::Entity;
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// Upcast helper so trait objects can be downcast to their concrete type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// A value that can be carried through the encoder and decoder.
///
/// `encode` writes the fields in schema order and `decode` reads them back
/// into `self`; neither touches the fingerprint, which belongs to the
/// envelope written by [`Encoder::object`].
pub trait BinaryObject: AsAny + fmt::Debug + Send + Sync {
    /// Schema of this value.
    fn entity(&self) -> &Arc<Entity>;

    fn encode(&self, e: &mut Encoder<'_>) -> CodecResult<()>;

    fn decode(&mut self, d: &mut Decoder<'_>) -> CodecResult<()>;
}

/// A statically typed binary object with a per-type entity.
pub trait Class: BinaryObject + Default {
    fn class_entity() -> &'static Arc<Entity>;
}

impl dyn BinaryObject {
    /// True if the concrete type is `T`.
    pub fn is<T: BinaryObject>(&self) -> bool {
        AsAny::as_any(self).is::<T>()
    }

    pub fn downcast_ref<T: BinaryObject>(&self) -> Option<&T> {
        AsAny::as_any(self).downcast_ref::<T>()
    }

    pub fn downcast_mut<T: BinaryObject>(&mut self) -> Option<&mut T> {
        AsAny::as_any_mut(self).downcast_mut::<T>()
    }

    /// Take ownership of the concrete value, handing the box back on mismatch.
    pub fn downcast<T: BinaryObject>(self: Box<Self>) -> Result<Box<T>, Box<Self>> {
        if !self.is::<T>() {
            return Err(self);
        }
        #[allow(clippy::expect_used)] // type checked just above
        let value = AsAny::into_any(self)
            .downcast::<T>()
            .expect("concrete type was checked");
        Ok(value)
    }
}

/// Creates a blank instance of a registered type.
pub type CreateFn = Arc<dyn Fn() -> Box<dyn BinaryObject> + Send + Sync>;

/// Writes the fields of an object.
pub type EncodeFn = fn(&dyn BinaryObject, &mut Encoder<'_>) -> CodecResult<()>;

/// Reads the fields of an object into a blank instance.
pub type DecodeFn = fn(&mut dyn BinaryObject, &mut Decoder<'_>) -> CodecResult<()>;

/// Per-type record stored in the registry.
#[derive(Clone)]
pub struct Codec {
    entity: Arc<Entity>,
    create: CreateFn,
    encode: EncodeFn,
    decode: DecodeFn,
    type_id: TypeId,
}

impl Codec {
    /// Codec from explicit callables.
    ///
    /// `create` is invoked once here to learn the concrete type it produces;
    /// the registry uses that type to tell idempotent re-registration from a
    /// conflict.
    pub fn new<F>(entity: Arc<Entity>, create: F, encode: EncodeFn, decode: DecodeFn) -> Self
    where
        F: Fn() -> Box<dyn BinaryObject> + Send + Sync + 'static,
    {
        let type_id = concrete_type(create().as_ref());
        Self {
            entity,
            create: Arc::new(create),
            encode,
            decode,
            type_id,
        }
    }

    /// Codec of a static type.
    pub fn of<T: Class>() -> Self {
        Self {
            entity: Arc::clone(T::class_entity()),
            create: Arc::new(|| Box::new(T::default()) as Box<dyn BinaryObject>),
            encode: encode_as::<T>,
            decode: decode_as::<T>,
            type_id: TypeId::of::<T>(),
        }
    }

    /// Codec decoding into [`DynamicObject`]s of `entity`.
    pub fn dynamic(entity: Arc<Entity>) -> Self {
        let blank = Arc::clone(&entity);
        Self {
            entity,
            create: Arc::new(move || {
                Box::new(DynamicObject::new(Arc::clone(&blank))) as Box<dyn BinaryObject>
            }),
            encode: |obj, e| obj.encode(e),
            decode: |obj, d| obj.decode(d),
            type_id: TypeId::of::<DynamicObject>(),
        }
    }

    pub fn entity(&self) -> &Arc<Entity> {
        &self.entity
    }

    /// `TypeId` of the instances produced by [`Codec::create`].
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// True if `obj` has the concrete type this codec creates.
    pub fn accepts(&self, obj: &dyn BinaryObject) -> bool {
        concrete_type(obj) == self.type_id
    }

    pub fn create(&self) -> Box<dyn BinaryObject> {
        (self.create)()
    }

    pub fn encode(&self, obj: &dyn BinaryObject, e: &mut Encoder<'_>) -> CodecResult<()> {
        (self.encode)(obj, e)
    }

    pub fn decode(&self, obj: &mut dyn BinaryObject, d: &mut Decoder<'_>) -> CodecResult<()> {
        (self.decode)(obj, d)
    }
}

impl fmt::Debug for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Codec")
            .field("entity", &self.entity.name())
            .field("type_id", &self.type_id)
            .finish_non_exhaustive()
    }
}

fn concrete_type(obj: &dyn BinaryObject) -> TypeId {
    Any::type_id(AsAny::as_any(obj))
}

fn encode_as<T: Class>(obj: &dyn BinaryObject, e: &mut Encoder<'_>) -> CodecResult<()> {
    let value = obj
        .downcast_ref::<T>()
        .ok_or_else(|| CodecError::TypeMismatch {
            expected: T::class_entity().name(),
        })?;
    value.encode(e)
}

fn decode_as<T: Class>(obj: &mut dyn BinaryObject, d: &mut Decoder<'_>) -> CodecResult<()> {
    let value = obj
        .downcast_mut::<T>()
        .ok_or_else(|| CodecError::TypeMismatch {
            expected: T::class_entity().name(),
        })?;
    value.decode(d)
}

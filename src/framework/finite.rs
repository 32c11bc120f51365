//! # Non-finite Floats
//!
//! `serde_json` has no representation for `NaN` or the infinities and silently
//! turns them into `null`. Mapped through the value model, that `null` either
//! fails to deserialize into an `f64` member or quietly becomes `None` in an
//! `Option<f64>`. [`to_value`] walks the instance with a serializer that only
//! looks at floats first, so such values are refused with the path that holds
//! them instead.

use crate::framework::error::MapperError;
use crate::framework::key::MappingKey;
use serde::ser::{self, Serialize};
use serde_json::Value;
use std::fmt;

/// Serializes `value` into the engine's value model, refusing non-finite floats.
///
/// `member` prefixes the reported path when the value belongs to one
/// destination member.
pub(crate) fn to_value<T: Serialize + ?Sized>(
    value: &T,
    key: MappingKey,
    member: Option<&str>,
) -> Result<Value, MapperError> {
    // Other failures are reported by serde_json itself below.
    if let Err(FloatCheck::NonFinite(mut path)) = value.serialize(FiniteFloats) {
        path.extend(member.map(str::to_string));
        return Err(MapperError::NonFiniteFloat {
            key,
            path: render(&path),
        });
    }
    serde_json::to_value(value).map_err(|source| MapperError::Conversion { key, source })
}

/// Segments are innermost first.
fn render(path: &[String]) -> String {
    let mut rendered = String::new();
    for segment in path.iter().rev() {
        if !rendered.is_empty() && !segment.starts_with('[') {
            rendered.push('.');
        }
        rendered.push_str(segment);
    }
    if rendered.is_empty() {
        rendered.push_str("<root>");
    }
    rendered
}

#[derive(Debug, thiserror::Error)]
enum FloatCheck {
    #[error("non-finite float")]
    NonFinite(Vec<String>),
    #[error("{0}")]
    Custom(String),
}

impl FloatCheck {
    fn within(self, segment: impl fmt::Display) -> Self {
        match self {
            FloatCheck::NonFinite(mut path) => {
                path.push(segment.to_string());
                FloatCheck::NonFinite(path)
            }
            other => other,
        }
    }
}

impl ser::Error for FloatCheck {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        FloatCheck::Custom(msg.to_string())
    }
}

struct FiniteFloats;

fn float(v: f64) -> Result<(), FloatCheck> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(FloatCheck::NonFinite(Vec::new()))
    }
}

impl ser::Serializer for FiniteFloats {
    type Ok = ();
    type Error = FloatCheck;
    type SerializeSeq = Compound;
    type SerializeTuple = Compound;
    type SerializeTupleStruct = Compound;
    type SerializeTupleVariant = Compound;
    type SerializeMap = Compound;
    type SerializeStruct = Compound;
    type SerializeStructVariant = Compound;

    fn serialize_bool(self, _: bool) -> Result<(), FloatCheck> {
        Ok(())
    }
    fn serialize_i8(self, _: i8) -> Result<(), FloatCheck> {
        Ok(())
    }
    fn serialize_i16(self, _: i16) -> Result<(), FloatCheck> {
        Ok(())
    }
    fn serialize_i32(self, _: i32) -> Result<(), FloatCheck> {
        Ok(())
    }
    fn serialize_i64(self, _: i64) -> Result<(), FloatCheck> {
        Ok(())
    }
    fn serialize_i128(self, _: i128) -> Result<(), FloatCheck> {
        Ok(())
    }
    fn serialize_u8(self, _: u8) -> Result<(), FloatCheck> {
        Ok(())
    }
    fn serialize_u16(self, _: u16) -> Result<(), FloatCheck> {
        Ok(())
    }
    fn serialize_u32(self, _: u32) -> Result<(), FloatCheck> {
        Ok(())
    }
    fn serialize_u64(self, _: u64) -> Result<(), FloatCheck> {
        Ok(())
    }
    fn serialize_u128(self, _: u128) -> Result<(), FloatCheck> {
        Ok(())
    }
    fn serialize_f32(self, v: f32) -> Result<(), FloatCheck> {
        float(f64::from(v))
    }
    fn serialize_f64(self, v: f64) -> Result<(), FloatCheck> {
        float(v)
    }
    fn serialize_char(self, _: char) -> Result<(), FloatCheck> {
        Ok(())
    }
    fn serialize_str(self, _: &str) -> Result<(), FloatCheck> {
        Ok(())
    }
    fn serialize_bytes(self, _: &[u8]) -> Result<(), FloatCheck> {
        Ok(())
    }
    fn serialize_none(self) -> Result<(), FloatCheck> {
        Ok(())
    }
    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<(), FloatCheck> {
        value.serialize(self)
    }
    fn serialize_unit(self) -> Result<(), FloatCheck> {
        Ok(())
    }
    fn serialize_unit_struct(self, _: &'static str) -> Result<(), FloatCheck> {
        Ok(())
    }
    fn serialize_unit_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
    ) -> Result<(), FloatCheck> {
        Ok(())
    }
    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _: &'static str,
        value: &T,
    ) -> Result<(), FloatCheck> {
        value.serialize(self)
    }
    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _: &'static str,
        _: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<(), FloatCheck> {
        value.serialize(self).map_err(|e| e.within(variant))
    }
    fn serialize_seq(self, _: Option<usize>) -> Result<Compound, FloatCheck> {
        Ok(Compound::default())
    }
    fn serialize_tuple(self, _: usize) -> Result<Compound, FloatCheck> {
        Ok(Compound::default())
    }
    fn serialize_tuple_struct(self, _: &'static str, _: usize) -> Result<Compound, FloatCheck> {
        Ok(Compound::default())
    }
    fn serialize_tuple_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: usize,
    ) -> Result<Compound, FloatCheck> {
        Ok(Compound::default())
    }
    fn serialize_map(self, _: Option<usize>) -> Result<Compound, FloatCheck> {
        Ok(Compound::default())
    }
    fn serialize_struct(self, _: &'static str, _: usize) -> Result<Compound, FloatCheck> {
        Ok(Compound::default())
    }
    fn serialize_struct_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: usize,
    ) -> Result<Compound, FloatCheck> {
        Ok(Compound::default())
    }
}

/// Tracks the position inside a sequence, or the last key of a map.
#[derive(Default)]
struct Compound {
    index: usize,
    key: Option<String>,
}

impl Compound {
    fn element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), FloatCheck> {
        let index = self.index;
        self.index += 1;
        value
            .serialize(FiniteFloats)
            .map_err(|e| e.within(format!("[{index}]")))
    }

    fn field<T: Serialize + ?Sized>(&mut self, name: &str, value: &T) -> Result<(), FloatCheck> {
        value.serialize(FiniteFloats).map_err(|e| e.within(name))
    }
}

impl ser::SerializeSeq for Compound {
    type Ok = ();
    type Error = FloatCheck;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), FloatCheck> {
        self.element(value)
    }
    fn end(self) -> Result<(), FloatCheck> {
        Ok(())
    }
}

impl ser::SerializeTuple for Compound {
    type Ok = ();
    type Error = FloatCheck;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), FloatCheck> {
        self.element(value)
    }
    fn end(self) -> Result<(), FloatCheck> {
        Ok(())
    }
}

impl ser::SerializeTupleStruct for Compound {
    type Ok = ();
    type Error = FloatCheck;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), FloatCheck> {
        self.element(value)
    }
    fn end(self) -> Result<(), FloatCheck> {
        Ok(())
    }
}

impl ser::SerializeTupleVariant for Compound {
    type Ok = ();
    type Error = FloatCheck;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), FloatCheck> {
        self.element(value)
    }
    fn end(self) -> Result<(), FloatCheck> {
        Ok(())
    }
}

impl ser::SerializeMap for Compound {
    type Ok = ();
    type Error = FloatCheck;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<(), FloatCheck> {
        key.serialize(FiniteFloats)?;
        self.key = match serde_json::to_value(key) {
            Ok(Value::String(name)) => Some(name),
            Ok(other) => Some(other.to_string()),
            Err(_) => None,
        };
        Ok(())
    }
    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), FloatCheck> {
        let name = self.key.take().unwrap_or_else(|| "<key>".to_string());
        self.field(&name, value)
    }
    fn end(self) -> Result<(), FloatCheck> {
        Ok(())
    }
}

impl ser::SerializeStruct for Compound {
    type Ok = ();
    type Error = FloatCheck;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), FloatCheck> {
        self.field(key, value)
    }
    fn end(self) -> Result<(), FloatCheck> {
        Ok(())
    }
}

impl ser::SerializeStructVariant for Compound {
    type Ok = ();
    type Error = FloatCheck;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), FloatCheck> {
        self.field(key, value)
    }
    fn end(self) -> Result<(), FloatCheck> {
        Ok(())
    }
}

//! The per-kind parse and format rules shared by [`Decoder`](crate::Decoder)
//! and [`Encoder`](crate::Encoder).
//!
//! Every protobuf field kind collapses into one [`FieldKind`] variant. Signed
//! kinds with different wire encodings (`int32`, `sint32`, `sfixed32`) share a
//! textual form, as do the unsigned ones, so they share a variant.

use std::num::{ParseFloatError, ParseIntError};
use std::str::FromStr;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE;
use prost_reflect::{EnumDescriptor, FieldDescriptor, Kind, MessageDescriptor, Value};

use crate::error::{Error, Result};
use crate::logging::debug;
use crate::well_known;

/// How many values a field holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cardinality {
    Singular,
    List,
    Map,
}

impl Cardinality {
    pub fn of(field: &FieldDescriptor) -> Self {
        if field.is_map() {
            Cardinality::Map
        } else if field.is_list() {
            Cardinality::List
        } else {
            Cardinality::Singular
        }
    }
}

/// The textual kind of a single field value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Bool,
    Double,
    Float,
    Bytes,
    String,
    /// `int32`, `sint32` and `sfixed32`.
    Int32,
    /// `int64`, `sint64` and `sfixed64`.
    Int64,
    /// `uint32` and `fixed32`.
    Uint32,
    /// `uint64` and `fixed64`.
    Uint64,
    Enum(EnumDescriptor),
    Message(MessageDescriptor),
}

impl FieldKind {
    /// The kind of a field, or of its elements for a list field.
    pub fn of(field: &FieldDescriptor) -> Self {
        Self::from(field.kind())
    }

    /// Parses one parameter value.
    ///
    /// `Ok(None)` means the input is well-formed but names nothing this field
    /// can hold: an unknown enum literal, or a nested message type without a
    /// registered textual form. Callers leave the field untouched in that case.
    pub fn parse(&self, input: &str) -> Result<Option<Value>> {
        let value = match self {
            FieldKind::Bool => Value::Bool(parse_bool(input)?),
            FieldKind::Double => Value::F64(parse_float(input)?),
            FieldKind::Float => Value::F32(parse_float(input)?),
            FieldKind::Bytes => Value::Bytes(URL_SAFE.decode(input)?.into()),
            FieldKind::String => Value::String(input.to_owned()),
            FieldKind::Int32 => Value::I32(input.parse()?),
            FieldKind::Int64 => Value::I64(input.parse()?),
            FieldKind::Uint32 => Value::U32(parse_unsigned(input)?),
            FieldKind::Uint64 => Value::U64(parse_unsigned(input)?),
            FieldKind::Enum(descriptor) => match descriptor.get_value_by_name(input) {
                Some(value) => Value::EnumNumber(value.number()),
                None => {
                    debug!(
                        enum_name = descriptor.full_name(),
                        literal = input,
                        "unknown enum literal"
                    );
                    return Ok(None);
                }
            },
            FieldKind::Message(descriptor) => match well_known::lookup(descriptor.full_name()) {
                Some(well_known) => Value::Message(well_known.parse(input, descriptor)?),
                None => {
                    debug!(
                        message_name = descriptor.full_name(),
                        "nested message type has no query form"
                    );
                    return Ok(None);
                }
            },
        };
        Ok(Some(value))
    }

    /// Formats one field value.
    ///
    /// Returns `None` when the value has no textual form: an enum number
    /// without a symbolic name, a nested message type without a registered
    /// textual form, or a value that does not belong to this kind.
    pub fn format(&self, value: &Value) -> Option<String> {
        let formatted = match (self, value) {
            (FieldKind::Bool, Value::Bool(v)) => v.to_string(),
            (FieldKind::Double, Value::F64(v)) => format!("{v:.6}"),
            (FieldKind::Float, Value::F32(v)) => format!("{:.6}", f64::from(*v)),
            (FieldKind::Bytes, Value::Bytes(v)) => URL_SAFE.encode(v),
            (FieldKind::String, Value::String(v)) => v.clone(),
            (FieldKind::Int32, Value::I32(v)) => itoa::Buffer::new().format(*v).to_owned(),
            (FieldKind::Int64, Value::I64(v)) => itoa::Buffer::new().format(*v).to_owned(),
            (FieldKind::Uint32, Value::U32(v)) => itoa::Buffer::new().format(*v).to_owned(),
            (FieldKind::Uint64, Value::U64(v)) => itoa::Buffer::new().format(*v).to_owned(),
            (FieldKind::Enum(descriptor), Value::EnumNumber(number)) => {
                match descriptor.get_value(*number) {
                    Some(value) => value.name().to_owned(),
                    None => {
                        debug!(
                            enum_name = descriptor.full_name(),
                            number, "enum number has no symbolic name"
                        );
                        return None;
                    }
                }
            }
            (FieldKind::Message(descriptor), Value::Message(message)) => {
                well_known::lookup(descriptor.full_name())?.format(message)
            }
            _ => return None,
        };
        Some(formatted)
    }
}

impl From<Kind> for FieldKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Bool => FieldKind::Bool,
            Kind::Double => FieldKind::Double,
            Kind::Float => FieldKind::Float,
            Kind::Bytes => FieldKind::Bytes,
            Kind::String => FieldKind::String,
            Kind::Int32 | Kind::Sint32 | Kind::Sfixed32 => FieldKind::Int32,
            Kind::Int64 | Kind::Sint64 | Kind::Sfixed64 => FieldKind::Int64,
            Kind::Uint32 | Kind::Fixed32 => FieldKind::Uint32,
            Kind::Uint64 | Kind::Fixed64 => FieldKind::Uint64,
            Kind::Enum(descriptor) => FieldKind::Enum(descriptor),
            Kind::Message(descriptor) => FieldKind::Message(descriptor),
        }
    }
}

/// Accepts the usual literal family: `1 t T TRUE true True` and
/// `0 f F FALSE false False`.
fn parse_bool(input: &str) -> Result<bool> {
    match input {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(Error::ParseBool(input.to_owned())),
    }
}

/// Parses a float, rejecting finite literals that overflow to infinity.
/// `inf` and `infinity` (any case, optionally signed) stay accepted.
fn parse_float<F>(input: &str) -> Result<F>
where
    F: FromStr<Err = ParseFloatError> + Into<f64> + Copy,
{
    let value: F = input.parse()?;
    if value.into().is_infinite() {
        let unsigned = input.strip_prefix(['+', '-']).unwrap_or(input);
        if !unsigned.eq_ignore_ascii_case("inf") && !unsigned.eq_ignore_ascii_case("infinity") {
            return Err(Error::FloatRange(input.to_owned()));
        }
    }
    Ok(value)
}

/// Unsigned values take plain digits only; `-` is already refused by the
/// integer parser.
fn parse_unsigned<U>(input: &str) -> Result<U>
where
    U: FromStr<Err = ParseIntError>,
{
    if input.starts_with('+') {
        return Err(Error::SignedUnsigned(input.to_owned()));
    }
    Ok(input.parse()?)
}

//! Encoding protobuf messages into query parameters.

use prost_reflect::{DynamicMessage, FieldDescriptor, Kind, ReflectMessage, Value};

use crate::kind::{Cardinality, FieldKind};
use crate::logging::debug;
use crate::params::Params;

/// Reads the fields of a [`DynamicMessage`] into query parameters.
///
/// Only fields that are present are written: non-default scalars, non-empty
/// lists and set messages. Lists are joined with `,`. A field whose value has
/// no textual form (map fields, nested messages other than the
/// [well-known types](crate::well_known), enum numbers without a name, empty
/// strings) is left out.
///
/// ```
/// use prost_reflect::ReflectMessage;
/// use protoquery::Encoder;
///
/// let duration = prost_types::Duration { seconds: 90, nanos: 0 };
/// let params = Encoder::new().encode(&duration.transcode_to_dynamic());
/// assert_eq!(params.get("seconds"), Some("90"));
/// assert!(!params.contains_key("nanos"));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Encoder;

impl Encoder {
    pub const fn new() -> Self {
        Encoder
    }

    pub fn encode(&self, message: &DynamicMessage) -> Params {
        let mut params = Params::new();
        for field in message.descriptor().fields() {
            if !message.has_field(&field) {
                continue;
            }
            let value = message.get_field(&field);
            let encoded = match Cardinality::of(&field) {
                Cardinality::Map => self.encode_map(&field),
                Cardinality::List => self.encode_list(&field, &value),
                Cardinality::Singular => self.encode_singular(&field, &value),
            };
            if !encoded.is_empty() {
                params.set(text_name(&field), encoded);
            }
        }
        params
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn encode_map(&self, field: &FieldDescriptor) -> String {
        debug!(field = field.name(), "map fields cannot be encoded into a query");
        String::new()
    }

    fn encode_list(&self, field: &FieldDescriptor, value: &Value) -> String {
        let kind = FieldKind::of(field);
        let Some(items) = value.as_list() else {
            return String::new();
        };
        items
            .iter()
            .filter_map(|item| kind.format(item))
            .filter(|item| !item.is_empty())
            .collect::<Vec<_>>()
            .join(",")
    }

    fn encode_singular(&self, field: &FieldDescriptor, value: &Value) -> String {
        FieldKind::of(field).format(value).unwrap_or_default()
    }
}

/// The name a field is written under: its proto name, or the message name
/// for a group.
fn text_name(field: &FieldDescriptor) -> String {
    match field.kind() {
        Kind::Message(message) if field.is_group() => message.name().to_owned(),
        _ => field.name().to_owned(),
    }
}

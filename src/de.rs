//! Decoding query parameters into protobuf messages.

use prost_reflect::{DynamicMessage, FieldDescriptor, ReflectMessage};

use crate::error::{Error, Result};
use crate::kind::{Cardinality, FieldKind};
use crate::logging::{debug, trace};
use crate::params::{Params, join_values};

/// Writes query parameters into a [`DynamicMessage`].
///
/// Each parameter key is matched against the proto names of the message's
/// fields, exactly and case-sensitively. Keys without a matching field are
/// ignored.
///
/// * Singular fields take the first value of their key.
/// * List fields take every value of their key joined with `,`, then split
///   on `,`. Items with no value (unknown enum literals) are skipped.
/// * Map fields are not supported and are left untouched.
/// * Nested messages are only decoded for registered
///   [well-known types](crate::well_known); others are left untouched.
///
/// Parsing stops at the first malformed value. Fields decoded before that
/// keep their new values.
///
/// ```
/// use prost_reflect::ReflectMessage;
/// use protoquery::{Decoder, Params};
///
/// let mut message = prost_types::Duration::default().transcode_to_dynamic();
/// let params = Params::parse("seconds=90&unknown=1").unwrap();
/// Decoder::new().decode(&params, &mut message).unwrap();
///
/// let duration: prost_types::Duration = message.transcode_to().unwrap();
/// assert_eq!(duration.seconds, 90);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Decoder;

impl Decoder {
    pub const fn new() -> Self {
        Decoder
    }

    /// Decodes `params` into `message`.
    ///
    /// Errors are [`Error::InvalidField`] wrapping the parse failure.
    pub fn decode(&self, params: &Params, message: &mut DynamicMessage) -> Result<()> {
        let descriptor = message.descriptor();
        for (key, values) in params.iter() {
            let Some(field) = descriptor.get_field_by_name(key) else {
                debug!(key, message_type = descriptor.full_name(), "skipping unknown query parameter");
                continue;
            };
            let Some(first) = values.first() else {
                continue;
            };

            let decoded = match Cardinality::of(&field) {
                Cardinality::Map => {
                    self.decode_map(&field);
                    Ok(())
                }
                Cardinality::List => self.decode_list(&field, &join_values(values), message),
                Cardinality::Singular => self.decode_singular(&field, first, message),
            };
            decoded.map_err(|err| Error::field(key, err))?;
        }
        Ok(())
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn decode_map(&self, field: &FieldDescriptor) {
        debug!(field = field.name(), "map fields cannot be decoded from a query");
    }

    fn decode_list(&self, field: &FieldDescriptor, param: &str, message: &mut DynamicMessage) -> Result<()> {
        let kind = FieldKind::of(field);
        let mut decoded = Vec::new();
        for item in param.split(',') {
            if let Some(value) = kind.parse(item)? {
                decoded.push(value);
            }
        }
        trace!(field = field.name(), items = decoded.len(), "decoded list");
        if let Some(list) = message.get_field_mut(field).as_list_mut() {
            list.extend(decoded);
        }
        Ok(())
    }

    fn decode_singular(&self, field: &FieldDescriptor, param: &str, message: &mut DynamicMessage) -> Result<()> {
        if let Some(value) = FieldKind::of(field).parse(param)? {
            message.set_field(field, value);
        }
        Ok(())
    }
}

use std::io::Write;

use prost_reflect::{DynamicMessage, ReflectMessage};

use crate::error::Result;
use crate::{Decoder, Encoder, Params};

/// Configuration for reading and writing raw query strings.
///
/// Decoding accepts both percent-encoding styles, so the setting only
/// affects the strings this crate produces.
///
/// ## Encoding
///
/// By default values are written with the WHATWG query percent-encode set,
/// which leaves most punctuation (including the `,` list separator) readable
/// and writes spaces as `+`. With `use_form_encoding(true)` the stricter
/// `application/x-www-form-urlencoded` set is used and spaces become `%20`.
///
/// ```
/// use protoquery::Config;
///
/// let message = prost_types::Any {
///     type_url: "type.example/a b".to_owned(),
///     value: vec![],
/// };
///
/// let query = Config::new().use_form_encoding(false).to_string(&message);
/// assert_eq!(query, "type_url=type.example/a+b");
///
/// let form = Config::new().use_form_encoding(true).to_string(&message);
/// assert_eq!(form, "type_url=type.example%2Fa%20b");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Config {
    use_form_encoding: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub const fn new() -> Self {
        Self {
            use_form_encoding: cfg!(feature = "default_to_form_encoding"),
        }
    }

    /// Selects the percent-encode set used when writing query strings.
    ///
    /// The default is `false`, or `true` with the `default_to_form_encoding`
    /// Cargo feature.
    pub const fn use_form_encoding(mut self, use_form_encoding: bool) -> Self {
        self.use_form_encoding = use_form_encoding;
        self
    }

    /// Parses a raw query string and decodes it into `message`.
    pub fn decode_str(self, input: &str, message: &mut DynamicMessage) -> Result<()> {
        let params = Params::parse(input)?;
        self.decode_params(&params, message)
    }

    pub fn decode_params(self, params: &Params, message: &mut DynamicMessage) -> Result<()> {
        Decoder::new().decode(params, message)
    }

    /// Decodes a raw query string into a new message of type `T`.
    pub fn from_str<T: ReflectMessage + Default>(self, input: &str) -> Result<T> {
        let params = Params::parse(input)?;
        self.from_params(&params)
    }

    /// Decodes `params` into a new message of type `T`.
    pub fn from_params<T: ReflectMessage + Default>(self, params: &Params) -> Result<T> {
        let mut message = T::default().transcode_to_dynamic();
        self.decode_params(params, &mut message)?;
        Ok(message.transcode_to()?)
    }

    pub fn encode_params(self, message: &DynamicMessage) -> Params {
        Encoder::new().encode(message)
    }

    /// Encodes `message` into a raw query string.
    pub fn encode_string(self, message: &DynamicMessage) -> String {
        self.encode_params(message)
            .to_query_string(self.use_form_encoding)
    }

    /// Encodes `message` into a raw query string written to `writer`.
    pub fn encode_to_writer<W: Write>(self, message: &DynamicMessage, writer: &mut W) -> Result<()> {
        self.encode_params(message)
            .write_query_string(writer, self.use_form_encoding)
    }

    /// Encodes any reflectable message into a raw query string.
    pub fn to_string<T: ReflectMessage>(self, message: &T) -> String {
        self.encode_string(&message.transcode_to_dynamic())
    }
}

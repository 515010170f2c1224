use std::io;
use std::num::{ParseFloatError, ParseIntError};
use std::str::Utf8Error;

use thiserror::Error;

/// Errors produced while converting between query parameters and messages.
#[derive(Error, Debug)]
pub enum Error {
    /// A boolean parameter was not one of the accepted literals.
    #[error("invalid boolean literal: {0:?}")]
    ParseBool(String),

    #[error(transparent)]
    ParseInt(#[from] ParseIntError),

    #[error(transparent)]
    ParseFloat(#[from] ParseFloatError),

    /// A finite float literal does not fit the field's precision.
    #[error("float literal out of range: {0:?}")]
    FloatRange(String),

    /// An unsigned parameter carried a `+` sign.
    #[error("unsigned integer must not be signed: {0:?}")]
    SignedUnsigned(String),

    /// A bytes parameter was not valid URL-safe base64.
    #[error(transparent)]
    Base64(#[from] base64::DecodeError),

    /// The fractional part of a timestamp or duration had more than nine
    /// digits, or contained something other than digits.
    #[error("invalid sub-second format: {0:?}")]
    InvalidSubSecond(String),

    /// Decoding the parameter for `field` failed.
    #[error("invalid value for field `{field}`: {source}")]
    InvalidField {
        field: String,
        #[source]
        source: Box<Error>,
    },

    #[error(transparent)]
    Utf8(#[from] Utf8Error),

    /// The populated dynamic message could not be converted back into the
    /// requested message type.
    #[error(transparent)]
    Transcode(#[from] prost::DecodeError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    /// Attach the name of the field being decoded to an error.
    pub fn field(field: impl Into<String>, source: Error) -> Self {
        Error::InvalidField {
            field: field.into(),
            source: Box::new(source),
        }
    }

    /// The innermost error, skipping any field context.
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::InvalidField { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

pub type Result<T, E = Error> = core::result::Result<T, E>;

//! Query parameters to and from protobuf messages
//!
//! `protoquery` fills a protobuf message from URL query parameters and turns
//! a message back into query parameters, driven entirely by the message's
//! descriptor. It works on [`prost_reflect::DynamicMessage`], and on any
//! generated message implementing [`prost_reflect::ReflectMessage`].
//!
//! ## Format
//!
//! Each field is one parameter keyed by its proto field name:
//!
//! | field kind | query value |
//! |---|---|
//! | `bool` | `true` / `false` (decoding also accepts `1`, `t`, `F`, ...) |
//! | `double`, `float` | fixed-point with six decimals, `1.100000` |
//! | integer kinds | decimal |
//! | `string` | as is |
//! | `bytes` | URL-safe base64 with padding |
//! | enum | the value's name |
//! | `google.protobuf.Timestamp`, `google.protobuf.Duration` | `<seconds>.<nanos>`, e.g. `123.000000123` |
//! | repeated | items joined with `,` |
//!
//! Map fields and other nested messages are skipped in both directions.
//! Unknown parameters are ignored when decoding, and fields holding their
//! default value are not written when encoding.
//!
//! ## Usage
//!
//! ```
//! let duration = prost_types::Duration { seconds: 90, nanos: 5 };
//!
//! let query = protoquery::to_string(&duration);
//! assert_eq!(query, "nanos=5&seconds=90");
//!
//! let decoded: prost_types::Duration = protoquery::from_str(&query).unwrap();
//! assert_eq!(decoded, duration);
//! ```
//!
//! For messages only known at runtime, use [`Decoder`] and [`Encoder`] with
//! a [`DynamicMessage`](prost_reflect::DynamicMessage) and a [`Params`]
//! collection directly.

mod config;
mod de;
mod error;
pub mod kind;
mod logging;
mod params;
mod ser;
pub mod well_known;

pub use config::Config;
pub use de::Decoder;
pub use error::{Error, Result};
pub use params::Params;
pub use ser::Encoder;

use prost_reflect::ReflectMessage;

/// Decodes a raw query string into a new message of type `T`.
pub fn from_str<T: ReflectMessage + Default>(input: &str) -> Result<T> {
    Config::default().from_str(input)
}

/// Decodes `params` into a new message of type `T`.
pub fn from_params<T: ReflectMessage + Default>(params: &Params) -> Result<T> {
    Config::default().from_params(params)
}

/// Encodes `message` into query parameters.
pub fn to_params<T: ReflectMessage>(message: &T) -> Params {
    Encoder::new().encode(&message.transcode_to_dynamic())
}

/// Encodes `message` into a raw query string.
pub fn to_string<T: ReflectMessage>(message: &T) -> String {
    Config::default().to_string(message)
}

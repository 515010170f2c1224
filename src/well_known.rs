//! Well-known message types that travel as a single `seconds.nanos` value.
//!
//! `google.protobuf.Timestamp` and `google.protobuf.Duration` are both a
//! signed `seconds` count plus a `nanos` remainder. In a query they are
//! written as `<seconds>.<nanos>` with the nanoseconds zero-padded to nine
//! digits, e.g. `123.000000123`.
//!
//! Types are looked up by fully-qualified name in a static registry, so a new
//! well-known type only needs a new [`WellKnownType`] entry.

use std::fmt;

use prost_reflect::{DynamicMessage, MessageDescriptor, Value};

use crate::error::{Error, Result};

pub const TIMESTAMP_FULL_NAME: &str = "google.protobuf.Timestamp";
pub const DURATION_FULL_NAME: &str = "google.protobuf.Duration";

/// Field number of `seconds` in both `Timestamp` and `Duration`.
pub const SECONDS_FIELD_NUMBER: u32 = 1;
/// Field number of `nanos` in both `Timestamp` and `Duration`.
pub const NANOS_FIELD_NUMBER: u32 = 2;

const NANOS_DIGITS: usize = 9;
const NANOS_PER_SECOND: i32 = 1_000_000_000;

/// A nested message type with its own textual form.
pub struct WellKnownType {
    full_name: &'static str,
    parse: fn(&str, &MessageDescriptor) -> Result<DynamicMessage>,
    format: fn(&DynamicMessage) -> String,
}

impl WellKnownType {
    pub fn full_name(&self) -> &'static str {
        self.full_name
    }

    /// Builds a message of type `descriptor` from its textual form.
    pub fn parse(&self, input: &str, descriptor: &MessageDescriptor) -> Result<DynamicMessage> {
        (self.parse)(input, descriptor)
    }

    pub fn format(&self, message: &DynamicMessage) -> String {
        (self.format)(message)
    }
}

impl fmt::Debug for WellKnownType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WellKnownType")
            .field("full_name", &self.full_name)
            .finish_non_exhaustive()
    }
}

static REGISTRY: [WellKnownType; 2] = [
    WellKnownType {
        full_name: TIMESTAMP_FULL_NAME,
        parse: parse_timestamp,
        format: format_seconds_nanos,
    },
    WellKnownType {
        full_name: DURATION_FULL_NAME,
        parse: parse_duration,
        format: format_seconds_nanos,
    },
];

/// Every registered well-known type.
pub fn registry() -> &'static [WellKnownType] {
    &REGISTRY
}

/// Finds the registered type with the given fully-qualified name.
pub fn lookup(full_name: &str) -> Option<&'static WellKnownType> {
    REGISTRY.iter().find(|entry| entry.full_name == full_name)
}

/// Splits `<seconds>.<fraction>` into a seconds count and a nanosecond
/// remainder.
///
/// Either side may be empty and then counts as zero. The fraction holds at
/// most nine digits and is right-padded, so `.1` is 100ms. The sign belongs
/// to the seconds only: `-12.678` yields `(-12, 678_000_000)`, which callers
/// normalize as `-12s + 678ms`.
pub fn parse_unix(input: &str) -> Result<(i64, i32)> {
    let (whole, fraction) = input.split_once('.').unwrap_or((input, ""));

    let seconds = if whole.is_empty() { 0 } else { whole.parse()? };

    let nanos = if fraction.is_empty() {
        0
    } else {
        if fraction.len() > NANOS_DIGITS || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidSubSecond(fraction.to_owned()));
        }
        format!("{fraction:0<9}").parse()?
    };

    Ok((seconds, nanos))
}

/// Writes `seconds` and `nanos` as `<seconds>.<nanos>`.
///
/// The pair is first floored so that `0 <= nanos < 1e9`, which keeps the
/// output parseable by [`parse_unix`] for negative durations: `-11s - 322ms`
/// is written as `-12.678000000`.
pub fn format_unix(seconds: i64, nanos: i32) -> String {
    let mut seconds = seconds.saturating_add(i64::from(nanos / NANOS_PER_SECOND));
    let mut nanos = nanos % NANOS_PER_SECOND;
    if nanos < 0 {
        seconds = seconds.saturating_sub(1);
        nanos += NANOS_PER_SECOND;
    }
    format!("{seconds}.{nanos:09}")
}

fn parse_timestamp(input: &str, descriptor: &MessageDescriptor) -> Result<DynamicMessage> {
    let (seconds, nanos) = parse_unix(input)?;
    let mut timestamp = prost_types::Timestamp { seconds, nanos };
    timestamp.normalize();
    Ok(seconds_nanos_message(
        descriptor,
        timestamp.seconds,
        timestamp.nanos,
    ))
}

fn parse_duration(input: &str, descriptor: &MessageDescriptor) -> Result<DynamicMessage> {
    let (seconds, nanos) = parse_unix(input)?;
    let mut duration = prost_types::Duration { seconds, nanos };
    duration.normalize();
    Ok(seconds_nanos_message(
        descriptor,
        duration.seconds,
        duration.nanos,
    ))
}

fn seconds_nanos_message(descriptor: &MessageDescriptor, seconds: i64, nanos: i32) -> DynamicMessage {
    let mut message = DynamicMessage::new(descriptor.clone());
    message.set_field_by_number(SECONDS_FIELD_NUMBER, Value::I64(seconds));
    message.set_field_by_number(NANOS_FIELD_NUMBER, Value::I32(nanos));
    message
}

fn format_seconds_nanos(message: &DynamicMessage) -> String {
    let seconds = message
        .get_field_by_number(SECONDS_FIELD_NUMBER)
        .and_then(|value| value.as_i64())
        .unwrap_or_default();
    let nanos = message
        .get_field_by_number(NANOS_FIELD_NUMBER)
        .and_then(|value| value.as_i32())
        .unwrap_or_default();
    format_unix(seconds, nanos)
}

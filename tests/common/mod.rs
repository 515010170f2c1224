#![allow(dead_code)]

use std::sync::LazyLock;

use prost_reflect::{DescriptorPool, DynamicMessage, MessageDescriptor, Value};
use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{
    DescriptorProto, EnumDescriptorProto, EnumValueDescriptorProto, FieldDescriptorProto,
    FileDescriptorProto, FileDescriptorSet, MessageOptions,
};

/// Holds `test.Request`, a proto3 message with a field of every kind, and
/// the two well-known types it refers to.
static POOL: LazyLock<DescriptorPool> = LazyLock::new(|| {
    DescriptorPool::from_file_descriptor_set(FileDescriptorSet {
        file: vec![
            seconds_nanos_file("google/protobuf/timestamp.proto", "Timestamp"),
            seconds_nanos_file("google/protobuf/duration.proto", "Duration"),
            request_file(),
        ],
    })
    .expect("valid test schema")
});

fn field(name: &str, number: i32, ty: Type) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_owned()),
        number: Some(number),
        label: Some(Label::Optional as i32),
        r#type: Some(ty as i32),
        ..Default::default()
    }
}

fn typed_field(name: &str, number: i32, ty: Type, type_name: &str) -> FieldDescriptorProto {
    FieldDescriptorProto {
        type_name: Some(type_name.to_owned()),
        ..field(name, number, ty)
    }
}

fn repeated(field: FieldDescriptorProto) -> FieldDescriptorProto {
    FieldDescriptorProto {
        label: Some(Label::Repeated as i32),
        ..field
    }
}

fn seconds_nanos_file(file: &str, message: &str) -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some(file.to_owned()),
        package: Some("google.protobuf".to_owned()),
        syntax: Some("proto3".to_owned()),
        message_type: vec![DescriptorProto {
            name: Some(message.to_owned()),
            field: vec![
                field("seconds", 1, Type::Int64),
                field("nanos", 2, Type::Int32),
            ],
            ..Default::default()
        }],
        ..Default::default()
    }
}

fn request_file() -> FileDescriptorProto {
    let enum_type = EnumDescriptorProto {
        name: Some("Enum".to_owned()),
        value: ["ENUM0", "ENUM1", "ENUM2"]
            .into_iter()
            .zip(0..)
            .map(|(name, number)| EnumValueDescriptorProto {
                name: Some(name.to_owned()),
                number: Some(number),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    };

    let labels_entry = DescriptorProto {
        name: Some("LabelsEntry".to_owned()),
        field: vec![
            field("key", 1, Type::String),
            field("value", 2, Type::String),
        ],
        options: Some(MessageOptions {
            map_entry: Some(true),
            ..Default::default()
        }),
        ..Default::default()
    };

    let nested = DescriptorProto {
        name: Some("Nested".to_owned()),
        field: vec![field("value", 1, Type::String)],
        ..Default::default()
    };

    let request = DescriptorProto {
        name: Some("Request".to_owned()),
        field: vec![
            field("double", 1, Type::Double),
            field("float", 2, Type::Float),
            field("int32", 3, Type::Int32),
            field("int64", 4, Type::Int64),
            field("uint32", 5, Type::Uint32),
            field("uint64", 6, Type::Uint64),
            field("sint32", 7, Type::Sint32),
            field("sint64", 8, Type::Sint64),
            field("fixed32", 9, Type::Fixed32),
            field("fixed64", 10, Type::Fixed64),
            field("sfixed32", 11, Type::Sfixed32),
            field("sfixed64", 12, Type::Sfixed64),
            field("bool", 13, Type::Bool),
            field("string", 14, Type::String),
            field("bytes", 15, Type::Bytes),
            typed_field("enum", 16, Type::Enum, ".test.Request.Enum"),
            repeated(field("repeatedString", 17, Type::String)),
            repeated(typed_field("repeatedEnum", 18, Type::Enum, ".test.Request.Enum")),
            repeated(field("repeatedInt64", 19, Type::Int64)),
            typed_field("timestamp", 20, Type::Message, ".google.protobuf.Timestamp"),
            typed_field("duration", 21, Type::Message, ".google.protobuf.Duration"),
            repeated(typed_field(
                "repeatedTimestamp",
                22,
                Type::Message,
                ".google.protobuf.Timestamp",
            )),
            repeated(typed_field("labels", 23, Type::Message, ".test.Request.LabelsEntry")),
            typed_field("nested", 24, Type::Message, ".test.Request.Nested"),
            repeated(field("repeatedBytes", 25, Type::Bytes)),
            repeated(field("repeatedDouble", 26, Type::Double)),
        ],
        nested_type: vec![labels_entry, nested],
        enum_type: vec![enum_type],
        ..Default::default()
    };

    FileDescriptorProto {
        name: Some("test.proto".to_owned()),
        package: Some("test".to_owned()),
        dependency: vec![
            "google/protobuf/timestamp.proto".to_owned(),
            "google/protobuf/duration.proto".to_owned(),
        ],
        syntax: Some("proto3".to_owned()),
        message_type: vec![request],
        ..Default::default()
    }
}

pub fn request_descriptor() -> MessageDescriptor {
    POOL.get_message_by_name("test.Request")
        .expect("test.Request is defined")
}

pub fn request() -> DynamicMessage {
    DynamicMessage::new(request_descriptor())
}

/// A request with the given fields set.
pub fn request_with(fields: impl IntoIterator<Item = (&'static str, Value)>) -> DynamicMessage {
    let mut message = request();
    for (name, value) in fields {
        message.set_field_by_name(name, value);
    }
    message
}

fn seconds_nanos(full_name: &str, seconds: i64, nanos: i32) -> Value {
    let descriptor = POOL
        .get_message_by_name(full_name)
        .expect("well-known type is defined");
    let mut message = DynamicMessage::new(descriptor);
    message.set_field_by_name("seconds", Value::I64(seconds));
    message.set_field_by_name("nanos", Value::I32(nanos));
    Value::Message(message)
}

pub fn timestamp(seconds: i64, nanos: i32) -> Value {
    seconds_nanos("google.protobuf.Timestamp", seconds, nanos)
}

pub fn duration(seconds: i64, nanos: i32) -> Value {
    seconds_nanos("google.protobuf.Duration", seconds, nanos)
}

pub fn nested(value: &str) -> Value {
    let descriptor = POOL
        .get_message_by_name("test.Request.Nested")
        .expect("test.Request.Nested is defined");
    let mut message = DynamicMessage::new(descriptor);
    message.set_field_by_name("value", Value::String(value.to_owned()));
    Value::Message(message)
}

/// `(seconds, nanos)` held by a singular timestamp or duration field.
pub fn seconds_nanos_of(message: &DynamicMessage, field: &str) -> (i64, i32) {
    let value = message.get_field_by_name(field).expect("field exists");
    let nested = value.as_message().expect("message field");
    let seconds = nested
        .get_field_by_name("seconds")
        .and_then(|v| v.as_i64())
        .unwrap_or_default();
    let nanos = nested
        .get_field_by_name("nanos")
        .and_then(|v| v.as_i32())
        .unwrap_or_default();
    (seconds, nanos)
}

pub fn enum_number(name: &str) -> Value {
    let number = request_descriptor()
        .parent_pool()
        .get_enum_by_name("test.Request.Enum")
        .and_then(|e| e.get_value_by_name(name))
        .expect("enum value exists")
        .number();
    Value::EnumNumber(number)
}

/// Every value of a list field.
pub fn list_of(message: &DynamicMessage, field: &str) -> Vec<Value> {
    message
        .get_field_by_name(field)
        .expect("field exists")
        .as_list()
        .expect("list field")
        .to_vec()
}

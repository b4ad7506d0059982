use std::fmt;

use attrib_serde::{check_string_length, ByteReader, ByteWrite, Serde, SerdeErr};

/// The kind of value a descriptor reads and writes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Integer,
    Long,
    Float,
    Double,
    Boolean,
    String,
    ListString,
}

impl ValueKind {
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Integer => "INTEGER",
            ValueKind::Long => "LONG",
            ValueKind::Float => "FLOAT",
            ValueKind::Double => "DOUBLE",
            ValueKind::Boolean => "BOOLEAN",
            ValueKind::String => "STRING",
            ValueKind::ListString => "LIST_STRING",
        }
    }

    /// Reads a value of this kind off the wire
    pub fn read(&self, reader: &mut ByteReader) -> Result<Value, SerdeErr> {
        Ok(match self {
            ValueKind::Integer => Value::Integer(i32::de(reader)?),
            ValueKind::Long => Value::Long(i64::de(reader)?),
            ValueKind::Float => Value::Float(f32::de(reader)?),
            ValueKind::Double => Value::Double(f64::de(reader)?),
            ValueKind::Boolean => Value::Boolean(bool::de(reader)?),
            ValueKind::String => Value::String(String::de(reader)?),
            ValueKind::ListString => Value::ListString(Vec::<String>::de(reader)?),
        })
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A dynamically typed field value
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Boolean(bool),
    String(String),
    ListString(Vec<String>),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Integer(_) => ValueKind::Integer,
            Value::Long(_) => ValueKind::Long,
            Value::Float(_) => ValueKind::Float,
            Value::Double(_) => ValueKind::Double,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::String(_) => ValueKind::String,
            Value::ListString(_) => ValueKind::ListString,
        }
    }

    /// Writes the value without any kind tag; the reader already knows the kind
    /// from the descriptor. Strings a reader would refuse are not written.
    pub fn write(&self, writer: &mut dyn ByteWrite) -> Result<(), SerdeErr> {
        self.check_wire()?;
        match self {
            Value::Integer(value) => value.ser(writer),
            Value::Long(value) => value.ser(writer),
            Value::Float(value) => value.ser(writer),
            Value::Double(value) => value.ser(writer),
            Value::Boolean(value) => value.ser(writer),
            Value::String(value) => value.ser(writer),
            Value::ListString(value) => value.ser(writer),
        }
        Ok(())
    }

    /// Fails when a string, or any string of a list, is too long for the wire
    pub fn check_wire(&self) -> Result<(), SerdeErr> {
        match self {
            Value::String(value) => check_string_length(value),
            Value::ListString(values) => values
                .iter()
                .map(String::as_str)
                .try_for_each(check_string_length),
            _ => Ok(()),
        }
    }
}

/// Rust types that can back a descriptor. The kind is fixed by the type, so
/// an accessor for an unsupported kind cannot be built.
pub trait FieldValue: Sized {
    const KIND: ValueKind;

    fn into_value(self) -> Value;

    fn from_value(value: Value) -> Option<Self>;
}

macro_rules! impl_field_value {
    ($ty:ty, $variant:ident) => {
        impl FieldValue for $ty {
            const KIND: ValueKind = ValueKind::$variant;

            fn into_value(self) -> Value {
                Value::$variant(self)
            }

            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }

        impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Value::$variant(value)
            }
        }
    };
}

impl_field_value!(i32, Integer);
impl_field_value!(i64, Long);
impl_field_value!(f32, Float);
impl_field_value!(f64, Double);
impl_field_value!(bool, Boolean);
impl_field_value!(String, String);
impl_field_value!(Vec<String>, ListString);

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

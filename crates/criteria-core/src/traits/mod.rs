
use crate::value::{Float64, Value, ValueKind};
use chrono::{DateTime, NaiveDate, Utc};

///
/// FieldValue
///
/// Lifts a Rust value into the literal payload of an expression node.
/// `KIND` is the semantic type of every value this type produces, so an
/// attribute declared over `V` and a literal of `V` always agree.
///

pub trait FieldValue {
    const KIND: ValueKind;

    fn to_value(&self) -> Value;
}

impl FieldValue for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl FieldValue for String {
    const KIND: ValueKind = ValueKind::Text;

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl FieldValue for &str {
    const KIND: ValueKind = ValueKind::Text;

    fn to_value(&self) -> Value {
        Value::Text((*self).to_string())
    }
}

impl FieldValue for Float64 {
    const KIND: ValueKind = ValueKind::Float;

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl FieldValue for NaiveDate {
    const KIND: ValueKind = ValueKind::Date;

    fn to_value(&self) -> Value {
        Value::Date(*self)
    }
}

impl FieldValue for DateTime<Utc> {
    const KIND: ValueKind = ValueKind::Timestamp;

    fn to_value(&self) -> Value {
        Value::Timestamp(*self)
    }
}

/// An absent optional lifts to `Value::Null`, which the literal boundary
/// rejects. The kind is that of the wrapped type.
impl<T: FieldValue> FieldValue for Option<T> {
    const KIND: ValueKind = T::KIND;

    fn to_value(&self) -> Value {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: FieldValue> FieldValue for Box<T> {
    const KIND: ValueKind = T::KIND;

    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

// Local helpers to expand integer families into FieldValue impls.
macro_rules! impl_field_value_int {
    ( $( $ty:ty ),* $(,)? ) => {
        $(
            impl FieldValue for $ty {
                const KIND: ValueKind = ValueKind::Int;

                fn to_value(&self) -> Value {
                    Value::Int(i64::from(*self))
                }
            }
        )*
    };
}

macro_rules! impl_field_value_uint {
    ( $( $ty:ty ),* $(,)? ) => {
        $(
            impl FieldValue for $ty {
                const KIND: ValueKind = ValueKind::Uint;

                fn to_value(&self) -> Value {
                    Value::Uint(u64::from(*self))
                }
            }
        )*
    };
}

impl_field_value_int!(i8, i16, i32, i64);
impl_field_value_uint!(u8, u16, u32, u64);

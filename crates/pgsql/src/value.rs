//! Bound parameter values.
//!
//! [`Value`] is the closed set of parameter shapes a statement can carry. Keeping
//! the set closed is what gives interning a well-defined notion of equality:
//! scalar variants are compared by value, while sequence/document variants
//! (`Bytes`, `Json`) are never considered equal to anything and always get a
//! placeholder of their own.

use bytes::BytesMut;
use chrono::{DateTime, Utc};
use std::error::Error as StdError;
use tokio_postgres::types::{IsNull, ToSql, Type, WrongType};
use uuid::Uuid;

/// A runtime SQL parameter value.
///
/// `PartialEq` is structural equality (two `Bytes` with the same content are
/// equal); placeholder interning uses its own, stricter rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// NULL
    Null,

    /// Boolean
    Bool(bool),

    /// Integer. Encoded as INT2/INT4/INT8 depending on the target column.
    Int(i64),

    /// Floating point. Encoded as FLOAT4/FLOAT8 depending on the target column.
    Float(f64),

    /// Text (TEXT, VARCHAR, etc.)
    Text(String),

    /// Binary data (BYTEA). Never deduplicated.
    Bytes(Vec<u8>),

    /// UUID
    Uuid(Uuid),

    /// Timestamp with time zone
    Timestamp(DateTime<Utc>),

    /// JSON/JSONB document. Never deduplicated.
    Json(serde_json::Value),
}

/// Hashable identity of a comparable [`Value`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum InternKey {
    Null,
    Bool(bool),
    Int(i64),
    Float(u64),
    Text(String),
    Uuid(Uuid),
    Timestamp(DateTime<Utc>),
}

impl Value {
    /// Returns true if this is a NULL value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether two uses of this value may share one placeholder.
    pub fn is_comparable(&self) -> bool {
        !matches!(self, Value::Bytes(_) | Value::Json(_))
    }

    /// Interning equality: like `==` for comparable variants (floats by bit
    /// pattern), always false when either side is not comparable.
    pub(crate) fn interns_as(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Uuid(a), Value::Uuid(b)) => a == b,
            (Value::Timestamp(a), Value::Timestamp(b)) => a == b,
            _ => false,
        }
    }

    pub(crate) fn intern_key(&self) -> Option<InternKey> {
        Some(match self {
            Value::Null => InternKey::Null,
            Value::Bool(v) => InternKey::Bool(*v),
            Value::Int(v) => InternKey::Int(*v),
            Value::Float(v) => InternKey::Float(v.to_bits()),
            Value::Text(v) => InternKey::Text(v.clone()),
            Value::Uuid(v) => InternKey::Uuid(*v),
            Value::Timestamp(v) => InternKey::Timestamp(*v),
            Value::Bytes(_) | Value::Json(_) => return None,
        })
    }

    fn accepts_type(&self, ty: &Type) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(_) => <bool as ToSql>::accepts(ty),
            Value::Int(_) => matches!(*ty, Type::INT2 | Type::INT4 | Type::INT8),
            Value::Float(_) => matches!(*ty, Type::FLOAT4 | Type::FLOAT8),
            Value::Text(_) => <String as ToSql>::accepts(ty),
            Value::Bytes(_) => <Vec<u8> as ToSql>::accepts(ty),
            Value::Uuid(_) => <Uuid as ToSql>::accepts(ty),
            Value::Timestamp(_) => <DateTime<Utc> as ToSql>::accepts(ty),
            Value::Json(_) => <serde_json::Value as ToSql>::accepts(ty),
        }
    }
}

impl ToSql for Value {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn StdError + Sync + Send>> {
        match self {
            Value::Null => Ok(IsNull::Yes),
            Value::Bool(v) => v.to_sql(ty, out),
            Value::Int(v) => match *ty {
                Type::INT2 => i16::try_from(*v)?.to_sql(ty, out),
                Type::INT4 => i32::try_from(*v)?.to_sql(ty, out),
                _ => v.to_sql(ty, out),
            },
            Value::Float(v) => match *ty {
                Type::FLOAT4 => (*v as f32).to_sql(ty, out),
                _ => v.to_sql(ty, out),
            },
            Value::Text(v) => v.to_sql(ty, out),
            Value::Bytes(v) => v.to_sql(ty, out),
            Value::Uuid(v) => v.to_sql(ty, out),
            Value::Timestamp(v) => v.to_sql(ty, out),
            Value::Json(v) => v.to_sql(ty, out),
        }
    }

    // The variant decides; see `to_sql_checked`.
    fn accepts(_ty: &Type) -> bool {
        true
    }

    fn to_sql_checked(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn StdError + Sync + Send>> {
        if !self.accepts_type(ty) {
            return Err(Box::new(WrongType::new::<Value>(ty.clone())));
        }
        self.to_sql(ty, out)
    }
}

// Convenient From impls
impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::Int(v.into())
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u16> for Value {
    fn from(v: u16) -> Self {
        Value::Int(v.into())
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v.into())
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Uuid(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

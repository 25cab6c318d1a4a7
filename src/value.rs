//! The intermediate representation every serialization strategy produces.
//!
//! This module provides the [`Value`] enum, the single output type of
//! [`serialize`](crate::serialize). It has three shapes only:
//!
//! - [`Value::Null`]: the absence of a value
//! - [`Value::Scalar`]: the canonical printable form of a bool, number or string
//! - [`Value::Sequence`]: an ordered list of already-built values
//!
//! Consumers should not depend on which variant a particular Rust type maps
//! to beyond that: collections, pairs and maps all come out as sequences.
//!
//! ## Creating Values
//!
//! ```rust
//! use shape_ir::{value, Value};
//!
//! let null = Value::Null;
//! let flag = Value::from(true);
//! let answer = Value::from(42);
//! let text = Value::from("forty two");
//! let list = value!([1, 2, 3]);
//!
//! assert!(list.is_sequence());
//! ```
//!
//! ## Extracting Values
//!
//! ```rust
//! use shape_ir::Value;
//!
//! let value = Value::from(42);
//! let n: i64 = i64::try_from(value).unwrap();
//! assert_eq!(n, 42);
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A serialized value.
///
/// Once built a `Value` is never modified in place: sequences are assembled
/// by appending finished children, see [`SequenceBuilder`].
///
/// # Examples
///
/// ```rust
/// use shape_ir::{serialize, Value};
///
/// let value = serialize(&vec![42, 24, 54]).unwrap();
/// assert_eq!(value, Value::from(vec![Value::from(42), Value::from(24), Value::from(54)]));
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Scalar(Scalar),
    Sequence(Vec<Value>),
}

/// The printable form of a boolean, number or string.
///
/// # Examples
///
/// ```rust
/// use shape_ir::{Number, Scalar};
///
/// assert_eq!(Scalar::Bool(true).as_text(), "true");
/// assert_eq!(Scalar::Number(Number::from(2.5)).as_text(), "2.5");
/// assert_eq!(Scalar::String("hi".to_string()).as_text(), "hi");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Number(Number),
    String(String),
}

/// A number held as its canonical decimal text.
///
/// Every integral and floating-point width maps onto the same representation,
/// so `42u8`, `42i128` and `42.0f32` all become `"42"`. Non-finite floats
/// are spelled `NaN`, `Infinity` and `-Infinity`.
///
/// # Examples
///
/// ```rust
/// use shape_ir::Number;
///
/// let integer = Number::from(42);
/// let float = Number::from(3.5);
/// let infinity = Number::from(f64::INFINITY);
///
/// assert!(integer.is_integer());
/// assert_eq!(integer.as_i64(), Some(42));
/// assert_eq!(float.as_f64(), Some(3.5));
/// assert!(infinity.is_special());
/// assert_eq!(infinity.as_str(), "Infinity");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Number(String);

const NAN: &str = "NaN";
const INFINITY: &str = "Infinity";
const NEG_INFINITY: &str = "-Infinity";

impl Number {
    /// Builds a number from a float, spelling non-finite values canonically.
    fn from_float(value: f64) -> Self {
        if value.is_nan() {
            Number(NAN.to_string())
        } else if value.is_infinite() {
            let text = if value.is_sign_positive() {
                INFINITY
            } else {
                NEG_INFINITY
            };
            Number(text.to_string())
        } else {
            Number(value.to_string())
        }
    }

    /// Builds a number from the text of an integer type.
    fn from_integer<T: fmt::Display>(value: T) -> Self {
        Number(value.to_string())
    }

    /// Returns the canonical text.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the text is an integer (optional sign, digits only).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use shape_ir::Number;
    ///
    /// assert!(Number::from(-7).is_integer());
    /// assert!(!Number::from(0.5).is_integer());
    /// ```
    #[must_use]
    pub fn is_integer(&self) -> bool {
        let digits = self.0.strip_prefix('-').unwrap_or(&self.0);
        !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
    }

    /// Returns `true` for NaN and the two infinities.
    #[inline]
    #[must_use]
    pub fn is_special(&self) -> bool {
        matches!(self.0.as_str(), NAN | INFINITY | NEG_INFINITY)
    }

    /// Converts this number to an `i64` if it is whole and in range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use shape_ir::Number;
    ///
    /// assert_eq!(Number::from(42).as_i64(), Some(42));
    /// assert_eq!(Number::from(42.0).as_i64(), Some(42));
    /// assert_eq!(Number::from(42.5).as_i64(), None);
    /// assert_eq!(Number::from(u64::MAX).as_i64(), None);
    /// ```
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        if self.is_integer() {
            return self.0.parse().ok();
        }
        match self.as_f64() {
            Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 => {
                Some(f as i64)
            }
            _ => None,
        }
    }

    /// Converts this number to a `u64` if it is a non-negative integer in range.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        if self.is_integer() {
            self.0.parse().ok()
        } else {
            None
        }
    }

    /// Converts this number to an `f64`.
    ///
    /// Integers too large for `f64` lose precision; special values map to
    /// their `f64` counterparts.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use shape_ir::Number;
    ///
    /// assert_eq!(Number::from(42).as_f64(), Some(42.0));
    /// assert_eq!(Number::from(f32::NEG_INFINITY).as_f64(), Some(f64::NEG_INFINITY));
    /// ```
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self.0.as_str() {
            NAN => Some(f64::NAN),
            INFINITY => Some(f64::INFINITY),
            NEG_INFINITY => Some(f64::NEG_INFINITY),
            text => text.parse().ok(),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

macro_rules! number_from_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Number::from_integer(value)
                }
            }
        )*
    };
}

number_from_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        // Display on f32 keeps the shortest round-tripping text ("0.1", not "0.10000000149011612").
        if value.is_finite() {
            Number(value.to_string())
        } else {
            Number::from_float(value as f64)
        }
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::from_float(value)
    }
}

impl From<&num_bigint::BigInt> for Number {
    fn from(value: &num_bigint::BigInt) -> Self {
        Number::from_integer(value)
    }
}

impl From<&num_bigint::BigUint> for Number {
    fn from(value: &num_bigint::BigUint) -> Self {
        Number::from_integer(value)
    }
}

impl Scalar {
    /// Returns the canonical textual form of this scalar.
    #[inline]
    #[must_use]
    pub fn as_text(&self) -> &str {
        match self {
            Scalar::Bool(true) => "true",
            Scalar::Bool(false) => "false",
            Scalar::Number(n) => n.as_str(),
            Scalar::String(s) => s,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_text())
    }
}

impl Value {
    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if the value is a scalar.
    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Value::Scalar(_))
    }

    /// Returns `true` if the value is a sequence.
    #[inline]
    #[must_use]
    pub const fn is_sequence(&self) -> bool {
        matches!(self, Value::Sequence(_))
    }

    /// Short lower-case name of the value's shape, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Scalar(Scalar::Bool(_)) => "bool",
            Value::Scalar(Scalar::Number(_)) => "number",
            Value::Scalar(Scalar::String(_)) => "string",
            Value::Sequence(_) => "sequence",
        }
    }

    #[inline]
    #[must_use]
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// If the value is a boolean scalar, returns it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use shape_ir::Value;
    ///
    /// assert_eq!(Value::from(true).as_bool(), Some(true));
    /// assert_eq!(Value::from("true").as_bool(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Scalar(Scalar::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a string scalar, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Scalar(Scalar::Number(n)) => Some(n),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(Number::as_i64)
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().and_then(Number::as_f64)
    }

    /// Returns the element at `index` if this is a sequence.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use shape_ir::{serialize, Value};
    ///
    /// let pair = serialize(&("key", 7)).unwrap();
    /// assert_eq!(pair.get(0).and_then(Value::as_str), Some("key"));
    /// assert_eq!(pair.get(1).and_then(Value::as_i64), Some(7));
    /// assert_eq!(pair.get(2), None);
    /// ```
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.as_sequence().and_then(|items| items.get(index))
    }
}

/// Append-only builder for [`Value::Sequence`].
///
/// Children are finished values; once pushed they cannot be reached
/// mutably again.
///
/// # Examples
///
/// ```rust
/// use shape_ir::{SequenceBuilder, Value};
///
/// let pair = SequenceBuilder::with_capacity(2)
///     .add(Value::from("today"))
///     .add(Value::from("2021-10-29"))
///     .build();
/// assert_eq!(pair.as_sequence().map(<[Value]>::len), Some(2));
/// ```
#[derive(Debug, Default)]
pub struct SequenceBuilder {
    items: Vec<Value>,
}

impl SequenceBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        SequenceBuilder {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Appends a finished value.
    pub fn push(&mut self, value: Value) {
        self.items.push(value);
    }

    /// Appends a finished value, returning the builder for chaining.
    #[must_use]
    pub fn add(mut self, value: Value) -> Self {
        self.items.push(value);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn build(self) -> Value {
        Value::Sequence(self.items)
    }
}

impl From<SequenceBuilder> for Value {
    fn from(builder: SequenceBuilder) -> Self {
        builder.build()
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Sequence(iter.into_iter().collect())
    }
}

impl Serialize for Number {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.is_integer() {
            if let Ok(i) = self.0.parse::<i64>() {
                return serializer.serialize_i64(i);
            }
            if let Ok(u) = self.0.parse::<u64>() {
                return serializer.serialize_u64(u);
            }
            if let Ok(i) = self.0.parse::<i128>() {
                return serializer.serialize_i128(i);
            }
            if let Ok(u) = self.0.parse::<u128>() {
                return serializer.serialize_u128(u);
            }
            // Floats print without an exponent, so 1e300 lands here too.
            if let Some(f) = self.as_f64().filter(|f| f.to_string() == self.0) {
                return serializer.serialize_f64(f);
            }
            // Wider than any primitive (big integers): keep every digit.
            return serializer.serialize_str(&self.0);
        }
        match self.as_f64() {
            Some(f) => serializer.serialize_f64(f),
            None => serializer.serialize_str(&self.0),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Scalar(Scalar::Bool(b)) => serializer.serialize_bool(*b),
            Value::Scalar(Scalar::Number(n)) => n.serialize(serializer),
            Value::Scalar(Scalar::String(s)) => serializer.serialize_str(s),
            Value::Sequence(items) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for element in items {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Value::from(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Value::from(value))
            }

            fn visit_i128<E>(self, value: i128) -> Result<Self::Value, E> {
                Ok(Value::from(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                Ok(Value::from(value))
            }

            fn visit_u128<E>(self, value: u128) -> Result<Self::Value, E> {
                Ok(Value::from(value))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Value::from(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Value::from(value))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Value::from(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(elem) = seq.next_element()? {
                    items.push(elem);
                }
                Ok(Value::Sequence(items))
            }

            // Maps come back the way the engine writes them: a sequence of [key, value] pairs.
            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut entries = Vec::new();
                while let Some((key, value)) = map.next_entry::<Value, Value>()? {
                    entries.push(Value::Sequence(vec![key, value]));
                }
                Ok(Value::Sequence(entries))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl TryFrom<Value> for bool {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Scalar(Scalar::Bool(b)) => Ok(b),
            other => Err(crate::Error::type_mismatch("bool", other.kind())),
        }
    }
}

impl TryFrom<Value> for i64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match &value {
            Value::Scalar(Scalar::Number(n)) => n.as_i64().ok_or_else(|| {
                crate::Error::custom(format!("cannot convert number {} to i64", n))
            }),
            other => Err(crate::Error::type_mismatch("integer", other.kind())),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match &value {
            Value::Scalar(Scalar::Number(n)) => n.as_f64().ok_or_else(|| {
                crate::Error::custom(format!("cannot convert number {} to f64", n))
            }),
            other => Err(crate::Error::type_mismatch("number", other.kind())),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Scalar(Scalar::String(s)) => Ok(s),
            other => Err(crate::Error::type_mismatch("string", other.kind())),
        }
    }
}

impl TryFrom<Value> for Vec<Value> {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Sequence(items) => Ok(items),
            other => Err(crate::Error::type_mismatch("sequence", other.kind())),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Scalar(Scalar::Bool(value))
    }
}

macro_rules! value_from_number {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Scalar(Scalar::Number(Number::from(value)))
                }
            }
        )*
    };
}

value_from_number!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Scalar(Scalar::Number(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Scalar(Scalar::String(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Scalar(Scalar::String(value.to_string()))
    }
}

impl From<Scalar> for Value {
    fn from(value: Scalar) -> Self {
        Value::Scalar(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Sequence(value)
    }
}

//! One conversion strategy per [`Category`](crate::Category).
//!
//! These are the building blocks the built-in [`Serializable`] impls forward
//! to. They are public so that hand-written impls can reuse them: a custom
//! numeric type can route through [`number`], a custom container through
//! [`collection`].
//!
//! | Category | Strategy | Result |
//! |---|---|---|
//! | `Null` | [`null`] | `Value::Null` |
//! | `Boolean` | [`boolean`] | `Scalar::Bool` |
//! | `Number` | [`number`] | `Scalar::Number` |
//! | `StringLike` | [`string`] | `Scalar::String` |
//! | `Collection` | [`collection`] | `Sequence` in iteration order |
//! | `Pair` | [`pair`] | two-element `Sequence` |
//! | `UserSerializable` | [`custom`] | whatever the conversion returns |

use crate::{
    Error, NonFinitePolicy, Number, Result, Scalar, SequenceBuilder, Serializable, Serializer,
    Value,
};

/// A value the [`number`] strategy can serialize.
///
/// Integers and floats implement it alike; the strategy never asks which
/// one it was given.
pub trait Numeric {
    fn to_number(&self) -> Number;
}

#[inline]
#[must_use]
pub fn null() -> Value {
    Value::Null
}

#[inline]
#[must_use]
pub fn boolean(value: bool) -> Value {
    Value::Scalar(Scalar::Bool(value))
}

/// Serializes any [`Numeric`] value as its canonical number text.
///
/// NaN and the infinities are subject to the serializer's
/// [`NonFinitePolicy`].
///
/// # Errors
///
/// Fails with [`Error::NonFiniteNumber`] under [`NonFinitePolicy::Error`].
///
/// # Examples
///
/// ```rust
/// use shape_ir::{strategy, Serializer, Value};
///
/// let serializer = Serializer::default();
/// assert_eq!(strategy::number(&serializer, &42u8).unwrap(), Value::from(42));
/// assert_eq!(strategy::number(&serializer, &42.0f32).unwrap(), Value::from(42));
/// ```
pub fn number<N>(serializer: &Serializer, value: &N) -> Result<Value>
where
    N: ?Sized + Numeric,
{
    let number = value.to_number();
    if number.is_special() {
        match serializer.options().non_finite {
            NonFinitePolicy::Text => {}
            NonFinitePolicy::Null => return Ok(Value::Null),
            NonFinitePolicy::Error => {
                tracing::debug!(number = number.as_str(), "non-finite number rejected");
                return Err(Error::non_finite(number.as_str()));
            }
        }
    }
    Ok(Value::Scalar(Scalar::Number(number)))
}

/// Serializes text as a single scalar; it is never split into characters.
#[inline]
#[must_use]
pub fn string(value: &str) -> Value {
    Value::Scalar(Scalar::String(value.to_owned()))
}

/// Serializes every item of `items`, in iteration order, into a sequence.
///
/// Iterates once. The first element that fails aborts the whole collection
/// and its error is returned as is.
///
/// # Examples
///
/// ```rust
/// use shape_ir::{strategy, value, Serializer};
///
/// let serializer = Serializer::default();
/// let value = strategy::collection(&serializer, ["a", "b"].iter()).unwrap();
/// assert_eq!(value, value!(["a", "b"]));
/// ```
pub fn collection<I>(serializer: &Serializer, items: I) -> Result<Value>
where
    I: IntoIterator,
    I::Item: Serializable,
{
    let items = items.into_iter();
    let mut sequence = SequenceBuilder::with_capacity(items.size_hint().0);
    for item in items {
        sequence.push(serializer.serialize(&item)?);
    }
    Ok(sequence.build())
}

/// Serializes `first` then `second` into a two-element sequence.
pub fn pair<A, B>(serializer: &Serializer, first: &A, second: &B) -> Result<Value>
where
    A: ?Sized + Serializable,
    B: ?Sized + Serializable,
{
    Ok(SequenceBuilder::with_capacity(2)
        .add(serializer.serialize(first)?)
        .add(serializer.serialize(second)?)
        .build())
}

/// Runs a registered conversion and hands back its result untouched.
pub fn custom<T, F>(value: &T, serializer: &Serializer, convert: F) -> Result<Value>
where
    T: ?Sized,
    F: FnOnce(&T, &Serializer) -> Result<Value>,
{
    convert(value, serializer)
}

//! # shape_ir
//!
//! Type-directed serialization of Rust values into a small, uniform
//! intermediate representation.
//!
//! ## What is it?
//!
//! Every serializable type is classified, at compile time, into one
//! [`Category`]: null, boolean, number, string-like, pair, user-serializable
//! or collection. The category picks the conversion strategy, and every
//! strategy produces the same three-shaped [`Value`]:
//!
//! - `Value::Null`
//! - `Value::Scalar`: a bool, a number (as canonical decimal text) or a string
//! - `Value::Sequence`: an ordered list of values
//!
//! A downstream encoder only has to understand those three shapes.
//!
//! ## Key Features
//!
//! - **Compile-time dispatch**: one [`Serializable`] impl per type, no runtime registry
//! - **Open extension**: bind your own types with [`serializer!`]
//! - **Strings stay whole**: text is never treated as a collection of characters
//! - **serde bridge**: anything implementing `serde::Serialize` goes in through [`from_serde`]
//! - **serde out**: [`Value`] itself implements `Serialize`, so any serde format can write it
//!
//! ## Quick Start
//!
//! ```rust
//! use shape_ir::{serialize, value};
//!
//! let value = serialize(&vec![42, 24, 54]).unwrap();
//! assert_eq!(value, value!([42, 24, 54]));
//!
//! let value = serialize(&("status", true)).unwrap();
//! assert_eq!(value, value!(["status", true]));
//! ```
//!
//! ### Custom Types
//!
//! ```rust
//! use shape_ir::{serialize, serializer, Value};
//!
//! struct MyDate { year: i32, month: u32, day: u32 }
//!
//! serializer! {
//!     MyDate => |d| Ok(Value::from(format!("{:04}-{:02}-{:02}", d.year, d.month, d.day)));
//! }
//!
//! let date = MyDate { year: 2021, month: 10, day: 29 };
//! assert_eq!(serialize(&date).unwrap(), Value::from("2021-10-29"));
//! ```
//!
//! ### Options
//!
//! ```rust
//! use shape_ir::{serialize_with_options, Error, SerializeOptions};
//!
//! let err = serialize_with_options(&vec![1.0, f64::NAN], SerializeOptions::strict()).unwrap_err();
//! assert_eq!(err, Error::non_finite("NaN"));
//! ```
//!
//! ## Logging
//!
//! The engine emits `tracing` events (`trace` per dispatch, `debug` on
//! rejected values). It never installs a subscriber.

#[macro_use]
pub mod macros;

pub mod category;
pub mod datetime;
pub mod error;
mod impls;
pub mod options;
pub mod ser;
pub mod strategy;
pub mod value;

pub use category::{category_of, Category};
pub use error::{Error, Result};
pub use options::{NonFinitePolicy, SerializeOptions};
pub use ser::{Serde, Serializable, Serializer, ValueSerializer};
pub use value::{Number, Scalar, SequenceBuilder, Value};

/// Serialize any `T: Serializable` to a [`Value`].
///
/// # Examples
///
/// ```rust
/// use shape_ir::{serialize, Value};
///
/// assert_eq!(serialize(&()).unwrap(), Value::Null);
/// assert_eq!(serialize("ab").unwrap(), Value::from("ab"));
/// ```
///
/// # Errors
///
/// Returns the first error raised by a custom conversion anywhere in the
/// value. No partial result is produced.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn serialize<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serializable,
{
    serialize_with_options(value, SerializeOptions::default())
}

/// Serialize any `T: Serializable` to a [`Value`] with custom options.
///
/// # Examples
///
/// ```rust
/// use shape_ir::{serialize_with_options, Error, SerializeOptions};
///
/// let nested = vec![vec![vec![1]]];
/// let options = SerializeOptions::new().with_max_depth(2);
/// assert_eq!(
///     serialize_with_options(&nested, options).unwrap_err(),
///     Error::depth_limit(2)
/// );
/// ```
///
/// # Errors
///
/// Returns an error if a conversion fails or the options reject the value.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn serialize_with_options<T>(value: &T, options: SerializeOptions) -> Result<Value>
where
    T: ?Sized + Serializable,
{
    Serializer::new(options).serialize(value)
}

/// Convert any `T: serde::Serialize` to a [`Value`].
///
/// Structs and maps become sequences of `[key, value]` pairs.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use shape_ir::{from_serde, value};
///
/// #[derive(Serialize)]
/// struct User { id: u32, tags: Vec<&'static str> }
///
/// let user = User { id: 7, tags: vec!["admin"] };
/// assert_eq!(from_serde(&user).unwrap(), value!([["id", 7], ["tags", ["admin"]]]));
/// ```
///
/// # Errors
///
/// Returns an error if the type's `Serialize` impl fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_serde<T>(value: &T) -> Result<Value>
where
    T: ?Sized + serde::Serialize,
{
    from_serde_with_options(value, SerializeOptions::default())
}

/// Convert any `T: serde::Serialize` to a [`Value`] with custom options.
///
/// # Errors
///
/// Returns an error if the type's `Serialize` impl fails or the options
/// reject the value.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_serde_with_options<T>(value: &T, options: SerializeOptions) -> Result<Value>
where
    T: ?Sized + serde::Serialize,
{
    Serializer::new(options).serialize(&Serde(value))
}

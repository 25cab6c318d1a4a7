//! Dispatch: the [`Serializable`] trait and the [`Serializer`] that drives it.
//!
//! ## Overview
//!
//! Each serializable type has exactly one `Serializable` impl, chosen by the
//! compiler. The impl names the type's [`Category`] and forwards to that
//! category's strategy. Strategies that hold elements call back into
//! [`Serializer::serialize`] for each of them, which is where options and
//! nesting depth are enforced.
//!
//! ```rust
//! use shape_ir::{Serializer, SerializeOptions, Value};
//!
//! let serializer = Serializer::new(SerializeOptions::new());
//! let value = serializer.serialize(&[1.5, 2.5]).unwrap();
//! assert_eq!(value, Value::from(vec![Value::from(1.5), Value::from(2.5)]));
//! ```
//!
//! ## serde Bridge
//!
//! Types that already describe themselves through `serde::Serialize` can be
//! fed in through [`Serde`] (or [`from_serde`](crate::from_serde)). Their
//! serde data model is mapped onto the same three IR shapes:
//!
//! - unit, unit structs and `None` become `Null`
//! - bools, numbers, chars and strings become scalars
//! - sequences, tuples, tuple structs and byte strings become sequences
//! - maps and structs become sequences of `[key, value]` pairs, in emission order
//! - enum variants with data become `[variant, payload]` pairs
//!
//! ```rust
//! use serde::Serialize;
//! use shape_ir::{from_serde, value, Value};
//!
//! #[derive(Serialize)]
//! struct Point { x: i32, y: i32 }
//!
//! let value = from_serde(&Point { x: 1, y: 2 }).unwrap();
//! assert_eq!(value, value!([["x", 1], ["y", 2]]));
//! ```

use crate::{strategy, Category, Error, Result, SerializeOptions, Value};
use serde::ser;
use std::cell::Cell;

/// A type that knows its serialization category and strategy.
///
/// Implemented for the standard scalar, text, pair, collection and wrapper
/// types, and by callers for their own types, usually through
/// [`serializer!`](crate::serializer) or [`impl_collection!`](crate::impl_collection).
///
/// Types without an impl are unclassified and cannot be serialized; the
/// mistake is reported by the compiler:
///
/// ```rust,compile_fail
/// struct Opaque;
///
/// let _ = shape_ir::serialize(&Opaque);
/// ```
#[diagnostic::on_unimplemented(
    message = "did not find any serializer for `{Self}`",
    label = "`{Self}` has no serialization category",
    note = "register a conversion with `shape_ir::serializer!` or implement `Serializable`"
)]
pub trait Serializable {
    /// The category this type is classified as.
    const CATEGORY: Category;

    /// Converts `self` to a [`Value`].
    ///
    /// Implementations that need to serialize nested values should go through
    /// `serializer.serialize(..)` so that options and depth limits apply.
    fn to_value(&self, serializer: &Serializer) -> Result<Value>;
}

/// Drives one serialization call.
///
/// Holds the options for the call and the current nesting depth. A fresh
/// serializer is created per call to [`serialize`](crate::serialize) and it
/// is not `Sync`.
#[derive(Debug, Default)]
pub struct Serializer {
    options: SerializeOptions,
    depth: Cell<usize>,
}

impl Serializer {
    pub fn new(options: SerializeOptions) -> Self {
        Serializer {
            options,
            depth: Cell::new(0),
        }
    }

    #[must_use]
    pub fn options(&self) -> &SerializeOptions {
        &self.options
    }

    /// Nesting depth of the value currently being serialized (0 when idle).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth.get()
    }

    /// Serializes `value` with the strategy of its type's category.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DepthLimitExceeded`] when the value sits deeper than
    /// `max_depth`, and otherwise whatever the strategy returns.
    pub fn serialize<T>(&self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serializable,
    {
        self.descend(std::any::type_name::<T>(), T::CATEGORY, || value.to_value(self))
    }

    /// Runs `f` one nesting level deeper, enforcing `max_depth`.
    ///
    /// The depth is restored whether `f` succeeds or fails.
    fn descend<F>(&self, type_name: &str, category: Category, f: F) -> Result<Value>
    where
        F: FnOnce() -> Result<Value>,
    {
        let depth = self.depth.get() + 1;
        if let Some(limit) = self.options.max_depth {
            if depth > limit {
                tracing::debug!(limit, type_name, "depth limit exceeded");
                return Err(Error::depth_limit(limit));
            }
        }

        tracing::trace!(type_name, category = %category, depth, "dispatch");

        self.depth.set(depth);
        let result = f();
        self.depth.set(depth - 1);
        result
    }
}

/// Routes a `serde::Serialize` type through the engine.
///
/// The wrapper is a user-serializable binding whose conversion walks the
/// serde data model; see the [module docs](self) for the mapping.
///
/// ```rust
/// use shape_ir::{serialize, Serde, Value};
///
/// let value = serialize(&Serde(Some("x"))).unwrap();
/// assert_eq!(value, Value::from("x"));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Serde<T>(pub T);

impl<T: ser::Serialize> Serializable for Serde<T> {
    const CATEGORY: Category = Category::UserSerializable;

    fn to_value(&self, serializer: &Serializer) -> Result<Value> {
        self.0.serialize(ValueSerializer::new(serializer))
    }
}

/// `serde::Serializer` that produces a [`Value`].
pub struct ValueSerializer<'a> {
    ser: &'a Serializer,
}

impl<'a> ValueSerializer<'a> {
    pub fn new(ser: &'a Serializer) -> Self {
        ValueSerializer { ser }
    }
}

pub struct SerializeVec<'a> {
    ser: &'a Serializer,
    items: Vec<Value>,
    variant: Option<&'static str>,
}

/// Label used in tracing events for a bridged map entry.
const ENTRY: &str = "map entry";

pub struct SerializeEntries<'a> {
    ser: &'a Serializer,
    entries: Vec<Value>,
    current_key: Option<Value>,
    variant: Option<&'static str>,
}

/// Serializes one element of a collector. Elements of an enum variant's
/// payload sit one level below the `[variant, payload]` pair.
fn element<T>(ser: &Serializer, variant: Option<&'static str>, value: &T) -> Result<Value>
where
    T: ?Sized + ser::Serialize,
{
    match variant {
        Some(name) => ser.descend(name, Category::Collection, || ser.serialize(&Serde(value))),
        None => ser.serialize(&Serde(value)),
    }
}

/// Wraps a variant payload as `[variant, payload]`.
fn tag_variant(variant: Option<&'static str>, payload: Value) -> Value {
    match variant {
        Some(name) => Value::Sequence(vec![strategy::string(name), payload]),
        None => payload,
    }
}

impl<'a> ser::Serializer for ValueSerializer<'a> {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec<'a>;
    type SerializeTuple = SerializeVec<'a>;
    type SerializeTupleStruct = SerializeVec<'a>;
    type SerializeTupleVariant = SerializeVec<'a>;
    type SerializeMap = SerializeEntries<'a>;
    type SerializeStruct = SerializeEntries<'a>;
    type SerializeStructVariant = SerializeEntries<'a>;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(strategy::boolean(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        strategy::number(self.ser, &v)
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        strategy::number(self.ser, &v)
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        strategy::number(self.ser, &v)
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        strategy::number(self.ser, &v)
    }

    fn serialize_i128(self, v: i128) -> Result<Value> {
        strategy::number(self.ser, &v)
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        strategy::number(self.ser, &v)
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        strategy::number(self.ser, &v)
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        strategy::number(self.ser, &v)
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        strategy::number(self.ser, &v)
    }

    fn serialize_u128(self, v: u128) -> Result<Value> {
        strategy::number(self.ser, &v)
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        strategy::number(self.ser, &v)
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        strategy::number(self.ser, &v)
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(strategy::string(v.encode_utf8(&mut [0; 4])))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(strategy::string(v))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        strategy::collection(self.ser, v)
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(strategy::null())
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + ser::Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(strategy::null())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(strategy::null())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(strategy::string(variant))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + ser::Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + ser::Serialize,
    {
        strategy::pair(self.ser, variant, &Serde(value))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec<'a>> {
        Ok(SerializeVec::new(self.ser, len.unwrap_or(0), None))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec<'a>> {
        Ok(SerializeVec::new(self.ser, len, None))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec<'a>> {
        Ok(SerializeVec::new(self.ser, len, None))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeVec<'a>> {
        Ok(SerializeVec::new(self.ser, len, Some(variant)))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeEntries<'a>> {
        Ok(SerializeEntries::new(self.ser, len.unwrap_or(0), None))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeEntries<'a>> {
        Ok(SerializeEntries::new(self.ser, len, None))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeEntries<'a>> {
        Ok(SerializeEntries::new(self.ser, len, Some(variant)))
    }
}

impl<'a> SerializeVec<'a> {
    fn new(ser: &'a Serializer, capacity: usize, variant: Option<&'static str>) -> Self {
        SerializeVec {
            ser,
            items: Vec::with_capacity(capacity),
            variant,
        }
    }

    fn push<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + ser::Serialize,
    {
        self.items.push(element(self.ser, self.variant, value)?);
        Ok(())
    }

    fn finish(self) -> Value {
        tag_variant(self.variant, Value::Sequence(self.items))
    }
}

impl<'a> SerializeEntries<'a> {
    fn new(ser: &'a Serializer, capacity: usize, variant: Option<&'static str>) -> Self {
        SerializeEntries {
            ser,
            entries: Vec::with_capacity(capacity),
            current_key: None,
            variant,
        }
    }

    fn push_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + ser::Serialize,
    {
        let ser = self.ser;
        let entry = match self.variant {
            Some(name) => {
                ser.descend(name, Category::Collection, || ser.serialize(&(key, Serde(value))))?
            }
            None => ser.serialize(&(key, Serde(value)))?,
        };
        self.entries.push(entry);
        Ok(())
    }

    fn finish(self) -> Value {
        tag_variant(self.variant, Value::Sequence(self.entries))
    }
}

impl ser::SerializeSeq for SerializeVec<'_> {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + ser::Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SerializeVec<'_> {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + ser::Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SerializeVec<'_> {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + ser::Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for SerializeVec<'_> {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + ser::Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeMap for SerializeEntries<'_> {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + ser::Serialize,
    {
        // The key is built inside the entry's pair level, like a native map entry.
        let ser = self.ser;
        self.current_key = Some(ser.descend(ENTRY, Category::Pair, || {
            ser.serialize(&Serde(key))
        })?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + ser::Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        let ser = self.ser;
        let value = ser.descend(ENTRY, Category::Pair, || ser.serialize(&Serde(value)))?;
        self.entries.push(Value::Sequence(vec![key, value]));
        Ok(())
    }

    fn serialize_entry<K, V>(&mut self, key: &K, value: &V) -> Result<()>
    where
        K: ?Sized + ser::Serialize,
        V: ?Sized + ser::Serialize,
    {
        self.entries.push(self.ser.serialize(&(Serde(key), Serde(value)))?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeStruct for SerializeEntries<'_> {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + ser::Serialize,
    {
        self.push_field(key, value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for SerializeEntries<'_> {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + ser::Serialize,
    {
        self.push_field(key, value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{value, NonFinitePolicy};
    use serde::Serialize;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    enum Shape {
        Empty,
        Circle(f64),
        Line(i32, i32),
        Rect { w: u32, h: u32 },
    }

    #[derive(Serialize)]
    struct Wrapper(u8);

    #[derive(Serialize)]
    struct Unit;

    fn bridge<T: Serialize>(value: &T) -> Result<Value> {
        Serializer::default().serialize(&Serde(value))
    }

    #[test]
    fn test_depth_resets_after_call() {
        let serializer = Serializer::default();
        serializer.serialize(&vec![vec![1], vec![2]]).unwrap();
        assert_eq!(serializer.depth(), 0);
    }

    #[test]
    fn test_depth_resets_after_error() {
        let serializer = Serializer::new(SerializeOptions::new().with_max_depth(2));
        assert!(serializer.serialize(&vec![vec![1]]).is_err());
        assert_eq!(serializer.depth(), 0);
        assert!(serializer.serialize(&vec![1]).is_ok());
    }

    #[test]
    fn test_bridge_scalars() {
        assert_eq!(bridge(&()).unwrap(), Value::Null);
        assert_eq!(bridge(&Unit).unwrap(), Value::Null);
        assert_eq!(bridge(&None::<u8>).unwrap(), Value::Null);
        assert_eq!(bridge(&true).unwrap(), Value::from(true));
        assert_eq!(bridge(&7u64).unwrap(), Value::from(7));
        assert_eq!(bridge(&'x').unwrap(), Value::from("x"));
        assert_eq!(bridge(&Wrapper(3)).unwrap(), Value::from(3));
    }

    #[test]
    fn test_bridge_enum_variants() {
        assert_eq!(bridge(&Shape::Empty).unwrap(), Value::from("Empty"));
        assert_eq!(bridge(&Shape::Circle(1.5)).unwrap(), value!(["Circle", 1.5]));
        assert_eq!(bridge(&Shape::Line(1, 2)).unwrap(), value!(["Line", [1, 2]]));
        assert_eq!(
            bridge(&Shape::Rect { w: 3, h: 4 }).unwrap(),
            value!(["Rect", [["w", 3], ["h", 4]]])
        );
    }

    #[test]
    fn test_bridge_map_keeps_emission_order() {
        let mut map = BTreeMap::new();
        map.insert("b", 2);
        map.insert("a", 1);
        assert_eq!(bridge(&map).unwrap(), value!([["a", 1], ["b", 2]]));
    }

    #[test]
    fn test_bridge_bytes() {
        assert_eq!(bridge(&BytesLike(&[1, 2])).unwrap(), value!([1, 2]));
    }

    #[test]
    fn test_bridge_honours_options() {
        let serializer = Serializer::new(
            SerializeOptions::new().with_non_finite(NonFinitePolicy::Error),
        );
        let err = serializer.serialize(&Serde(vec![1.0, f64::NAN])).unwrap_err();
        assert_eq!(err, Error::non_finite("NaN"));

        let serializer = Serializer::new(SerializeOptions::new().with_max_depth(2));
        assert!(serializer.serialize(&Serde(vec![1])).is_ok());
        assert_eq!(
            serializer.serialize(&Serde(vec![vec![1]])).unwrap_err(),
            Error::depth_limit(2)
        );
    }

    #[derive(Serialize)]
    struct Point {
        x: i32,
    }

    #[test]
    fn test_bridged_entries_count_like_native_pairs() {
        let mut map = BTreeMap::new();
        map.insert("x", 1);

        for limit in 1..=4 {
            let serializer = Serializer::new(SerializeOptions::new().with_max_depth(limit));
            let native = serializer.serialize(&map);
            let bridged = serializer.serialize(&Serde(&map));
            let fields = serializer.serialize(&Serde(Point { x: 1 }));
            assert_eq!(native, bridged, "map at max_depth {limit}");
            assert_eq!(native, fields, "struct at max_depth {limit}");
        }

        let serializer = Serializer::new(SerializeOptions::new().with_max_depth(2));
        assert_eq!(
            serializer.serialize(&Serde(&map)).unwrap_err(),
            Error::depth_limit(2)
        );
        assert_eq!(serializer.depth(), 0);
    }

    #[test]
    fn test_bridged_map_with_split_key_and_value_calls() {
        let serializer = Serializer::new(SerializeOptions::new().with_max_depth(2));
        assert_eq!(
            serializer.serialize(&Serde(SplitMap)).unwrap_err(),
            Error::depth_limit(2)
        );

        let serializer = Serializer::new(SerializeOptions::new().with_max_depth(3));
        assert_eq!(
            serializer.serialize(&Serde(SplitMap)).unwrap(),
            value!([["k", true]])
        );
    }

    #[test]
    fn test_variant_payload_is_one_level_down() {
        let shallow = Serializer::new(SerializeOptions::new().with_max_depth(2));
        assert_eq!(
            shallow.serialize(&Serde(Shape::Line(1, 2))).unwrap_err(),
            Error::depth_limit(2)
        );
        // Native equivalent: ("Line", vec![1, 2]) needs three levels too.
        assert_eq!(
            shallow.serialize(&("Line", vec![1, 2])).unwrap_err(),
            Error::depth_limit(2)
        );

        let enough = Serializer::new(SerializeOptions::new().with_max_depth(3));
        assert_eq!(
            enough.serialize(&Serde(Shape::Line(1, 2))).unwrap(),
            value!(["Line", [1, 2]])
        );
    }

    /// Emits its entry through separate `serialize_key`/`serialize_value` calls.
    struct SplitMap;

    impl Serialize for SplitMap {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            use serde::ser::SerializeMap;
            let mut map = serializer.serialize_map(Some(1))?;
            map.serialize_key("k")?;
            map.serialize_value(&true)?;
            map.end()
        }
    }

    /// Serializes through `serialize_bytes` rather than as a sequence of u8.
    struct BytesLike<'a>(&'a [u8]);

    impl Serialize for BytesLike<'_> {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            serializer.serialize_bytes(self.0)
        }
    }
}

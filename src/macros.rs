//! Macros for building values and registering conversions.
//!
//! - [`value!`](crate::value): literal IR construction
//! - [`serializer!`](crate::serializer): bind a type to its own conversion
//! - [`impl_collection!`](crate::impl_collection): opt an iterable type into
//!   the collection strategy

/// Builds a [`Value`](crate::Value) from a literal-like description.
///
/// `null`, `true` and `false` map to themselves, `[...]` builds a sequence,
/// and any other expression is serialized with [`serialize`](crate::serialize).
/// Negative number literals may appear inside `[...]`; other multi-token
/// expressions there need parentheses.
///
/// ```rust
/// use shape_ir::{value, Value};
///
/// let pairs = value!([["today", "2021-10-29"], ["offset", -2], null]);
/// assert_eq!(pairs.get(2), Some(&Value::Null));
/// assert_eq!(pairs.get(1).and_then(|p| p.get(1)), Some(&Value::from(-2)));
/// ```
///
/// # Panics
///
/// Panics if an expression fails to serialize. Use
/// [`serialize`](crate::serialize) directly to handle the error.
#[macro_export]
macro_rules! value {
    // Handle null
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::from(true)
    };

    (false) => {
        $crate::Value::from(false)
    };

    ([]) => {
        $crate::Value::Sequence(::std::vec::Vec::new())
    };

    ([ $($elems:tt)+ ]) => {
        $crate::value!(@seq [] $($elems)+)
    };

    // Sequence elements, accumulated one at a time
    (@seq [$($out:expr),*]) => {
        $crate::Value::Sequence(::std::vec![$($out),*])
    };

    (@seq [$($out:expr),*] - $num:literal $(, $($rest:tt)*)?) => {
        $crate::value!(@seq [$($out,)* $crate::value!(-$num)] $($($rest)*)?)
    };

    (@seq [$($out:expr),*] $elem:tt $(, $($rest:tt)*)?) => {
        $crate::value!(@seq [$($out,)* $crate::value!($elem)] $($($rest)*)?)
    };

    // Anything else goes through the engine
    ($other:expr) => {
        match $crate::serialize(&$other) {
            ::std::result::Result::Ok(value) => value,
            ::std::result::Result::Err(err) => {
                ::std::panic!("value!: cannot serialize `{}`: {}", ::std::stringify!($other), err)
            }
        }
    };
}

/// Registers custom conversions for one or more types.
///
/// Each entry binds a type to a closure-like conversion. The one-argument
/// form receives `&Type`; the two-argument form also receives the
/// [`Serializer`](crate::Serializer), for conversions that serialize nested
/// values themselves. The body returns `Result<Value>`.
///
/// ```rust
/// use shape_ir::{serialize, serializer, Value};
///
/// struct Celsius(f64);
/// struct Reading { place: String, temp: Celsius }
///
/// serializer! {
///     Celsius => |c| Ok(Value::from(format!("{}°C", c.0)));
///     Reading => |r, ser| ser.serialize(&(&r.place, &r.temp));
/// }
///
/// let reading = Reading { place: "Oslo".into(), temp: Celsius(-3.5) };
/// assert_eq!(
///     serialize(&reading).unwrap(),
///     Value::from(vec![Value::from("Oslo"), Value::from("-3.5°C")])
/// );
/// ```
///
/// A type can be registered only once:
///
/// ```rust,compile_fail
/// use shape_ir::{serializer, Value};
///
/// struct Date;
///
/// serializer!(Date => |_d| Ok(Value::from("one")));
/// serializer!(Date => |_d| Ok(Value::from("two")));
/// ```
///
/// and not on top of another category:
///
/// ```rust,compile_fail
/// use shape_ir::{impl_collection, serializer, Value};
///
/// struct Bag(Vec<u8>);
///
/// impl<'a> IntoIterator for &'a Bag {
///     type Item = &'a u8;
///     type IntoIter = std::slice::Iter<'a, u8>;
///     fn into_iter(self) -> Self::IntoIter { self.0.iter() }
/// }
///
/// impl_collection!(Bag);
/// serializer!(Bag => |_b| Ok(Value::Null));
/// ```
#[macro_export]
macro_rules! serializer {
    (@bind $ty:ty, $value:ident, [$ser:ident], $body:expr) => {
        impl $crate::Serializable for $ty {
            const CATEGORY: $crate::Category = $crate::Category::UserSerializable;

            fn to_value(
                &self,
                serializer: &$crate::Serializer,
            ) -> $crate::Result<$crate::Value> {
                $crate::strategy::custom(
                    self,
                    serializer,
                    |$value: &$ty, $ser: &$crate::Serializer| -> $crate::Result<$crate::Value> {
                        $body
                    },
                )
            }
        }
    };

    (@bind $ty:ty, $value:ident, [], $body:expr) => {
        impl $crate::Serializable for $ty {
            const CATEGORY: $crate::Category = $crate::Category::UserSerializable;

            fn to_value(
                &self,
                serializer: &$crate::Serializer,
            ) -> $crate::Result<$crate::Value> {
                $crate::strategy::custom(
                    self,
                    serializer,
                    |$value: &$ty, _: &$crate::Serializer| -> $crate::Result<$crate::Value> {
                        $body
                    },
                )
            }
        }
    };

    ($($ty:ty => |$value:ident $(, $ser:ident)?| $body:expr);+ $(;)?) => {
        $(
            $crate::serializer!(@bind $ty, $value, [$($ser)?], $body);
        )+
    };
}

/// Binds iterable types to the collection strategy.
///
/// The type's `&T` must implement `IntoIterator` with serializable items.
/// Like [`serializer!`](crate::serializer), this is the type's one and only
/// binding.
///
/// ```rust
/// use shape_ir::{impl_collection, serialize, value};
///
/// struct Readings(Vec<u16>);
///
/// impl<'a> IntoIterator for &'a Readings {
///     type Item = &'a u16;
///     type IntoIter = std::slice::Iter<'a, u16>;
///
///     fn into_iter(self) -> Self::IntoIter {
///         self.0.iter()
///     }
/// }
///
/// impl_collection!(Readings);
///
/// assert_eq!(serialize(&Readings(vec![4, 2])).unwrap(), value!([4, 2]));
/// ```
#[macro_export]
macro_rules! impl_collection {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Serializable for $ty {
                const CATEGORY: $crate::Category = $crate::Category::Collection;

                fn to_value(
                    &self,
                    serializer: &$crate::Serializer,
                ) -> $crate::Result<$crate::Value> {
                    $crate::strategy::collection(serializer, self)
                }
            }
        )+
    };
}

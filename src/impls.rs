//! Built-in [`Serializable`] impls for standard and third-party types.
//!
//! Grouped by category in precedence order. A type appears in exactly one
//! group; the compiler rejects a second impl, so no two rules can claim the
//! same type.

use crate::strategy::{self, Numeric};
use crate::{Category, Number, Result, Serializable, Serializer, Value};
use indexmap::{IndexMap, IndexSet};
use num_bigint::{BigInt, BigUint};
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet, LinkedList, VecDeque};
use std::marker::PhantomData;
use std::num::{
    NonZeroI128, NonZeroI16, NonZeroI32, NonZeroI64, NonZeroI8, NonZeroIsize, NonZeroU128,
    NonZeroU16, NonZeroU32, NonZeroU64, NonZeroU8, NonZeroUsize,
};
use std::rc::Rc;
use std::sync::Arc;

// Null

impl Serializable for () {
    const CATEGORY: Category = Category::Null;

    fn to_value(&self, _serializer: &Serializer) -> Result<Value> {
        Ok(strategy::null())
    }
}

impl<T: ?Sized> Serializable for PhantomData<T> {
    const CATEGORY: Category = Category::Null;

    fn to_value(&self, _serializer: &Serializer) -> Result<Value> {
        Ok(strategy::null())
    }
}

// Boolean

impl Serializable for bool {
    const CATEGORY: Category = Category::Boolean;

    fn to_value(&self, _serializer: &Serializer) -> Result<Value> {
        Ok(strategy::boolean(*self))
    }
}

// Number

macro_rules! impl_number {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Numeric for $ty {
                fn to_number(&self) -> Number {
                    Number::from(*self)
                }
            }

            impl Serializable for $ty {
                const CATEGORY: Category = Category::Number;

                fn to_value(&self, serializer: &Serializer) -> Result<Value> {
                    strategy::number(serializer, self)
                }
            }
        )*
    };
}

impl_number!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

macro_rules! impl_nonzero {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Numeric for $ty {
                fn to_number(&self) -> Number {
                    Number::from(self.get())
                }
            }

            impl Serializable for $ty {
                const CATEGORY: Category = Category::Number;

                fn to_value(&self, serializer: &Serializer) -> Result<Value> {
                    strategy::number(serializer, self)
                }
            }
        )*
    };
}

impl_nonzero!(
    NonZeroI8,
    NonZeroI16,
    NonZeroI32,
    NonZeroI64,
    NonZeroI128,
    NonZeroIsize,
    NonZeroU8,
    NonZeroU16,
    NonZeroU32,
    NonZeroU64,
    NonZeroU128,
    NonZeroUsize,
);

macro_rules! impl_big_number {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Numeric for $ty {
                fn to_number(&self) -> Number {
                    Number::from(self)
                }
            }

            impl Serializable for $ty {
                const CATEGORY: Category = Category::Number;

                fn to_value(&self, serializer: &Serializer) -> Result<Value> {
                    strategy::number(serializer, self)
                }
            }
        )*
    };
}

impl_big_number!(BigInt, BigUint);

// StringLike

impl Serializable for str {
    const CATEGORY: Category = Category::StringLike;

    fn to_value(&self, _serializer: &Serializer) -> Result<Value> {
        Ok(strategy::string(self))
    }
}

impl Serializable for String {
    const CATEGORY: Category = Category::StringLike;

    fn to_value(&self, _serializer: &Serializer) -> Result<Value> {
        Ok(strategy::string(self))
    }
}

impl Serializable for char {
    const CATEGORY: Category = Category::StringLike;

    fn to_value(&self, _serializer: &Serializer) -> Result<Value> {
        Ok(strategy::string(self.encode_utf8(&mut [0; 4])))
    }
}

// Pair

impl<A: Serializable, B: Serializable> Serializable for (A, B) {
    const CATEGORY: Category = Category::Pair;

    fn to_value(&self, serializer: &Serializer) -> Result<Value> {
        strategy::pair(serializer, &self.0, &self.1)
    }
}

// UserSerializable: an already-built value passes through as itself.

impl Serializable for Value {
    const CATEGORY: Category = Category::UserSerializable;

    fn to_value(&self, serializer: &Serializer) -> Result<Value> {
        strategy::custom(self, serializer, |value, _| Ok(value.clone()))
    }
}

// Collection

impl<T: Serializable> Serializable for [T] {
    const CATEGORY: Category = Category::Collection;

    fn to_value(&self, serializer: &Serializer) -> Result<Value> {
        strategy::collection(serializer, self)
    }
}

impl<T: Serializable, const N: usize> Serializable for [T; N] {
    const CATEGORY: Category = Category::Collection;

    fn to_value(&self, serializer: &Serializer) -> Result<Value> {
        strategy::collection(serializer, self)
    }
}

macro_rules! impl_sequence {
    ($($ty:ident),* $(,)?) => {
        $(
            impl<T: Serializable> Serializable for $ty<T> {
                const CATEGORY: Category = Category::Collection;

                fn to_value(&self, serializer: &Serializer) -> Result<Value> {
                    strategy::collection(serializer, self)
                }
            }
        )*
    };
}

impl_sequence!(Vec, VecDeque, LinkedList, BTreeSet);

// Heap order is the heap's internal layout, the same order `iter()` gives.
impl<T: Serializable> Serializable for BinaryHeap<T> {
    const CATEGORY: Category = Category::Collection;

    fn to_value(&self, serializer: &Serializer) -> Result<Value> {
        strategy::collection(serializer, self)
    }
}

impl<T: Serializable, S> Serializable for HashSet<T, S> {
    const CATEGORY: Category = Category::Collection;

    fn to_value(&self, serializer: &Serializer) -> Result<Value> {
        strategy::collection(serializer, self)
    }
}

impl<T: Serializable, S> Serializable for IndexSet<T, S> {
    const CATEGORY: Category = Category::Collection;

    fn to_value(&self, serializer: &Serializer) -> Result<Value> {
        strategy::collection(serializer, self)
    }
}

// Maps iterate as (key, value) pairs, so every entry is serialized as a pair.

impl<K: Serializable, V: Serializable> Serializable for BTreeMap<K, V> {
    const CATEGORY: Category = Category::Collection;

    fn to_value(&self, serializer: &Serializer) -> Result<Value> {
        strategy::collection(serializer, self)
    }
}

impl<K: Serializable, V: Serializable, S> Serializable for HashMap<K, V, S> {
    const CATEGORY: Category = Category::Collection;

    fn to_value(&self, serializer: &Serializer) -> Result<Value> {
        strategy::collection(serializer, self)
    }
}

impl<K: Serializable, V: Serializable, S> Serializable for IndexMap<K, V, S> {
    const CATEGORY: Category = Category::Collection;

    fn to_value(&self, serializer: &Serializer) -> Result<Value> {
        strategy::collection(serializer, self)
    }
}

// Transparent wrappers take the category of what they hold and do not add
// a nesting level.

impl<T: ?Sized + Serializable> Serializable for &T {
    const CATEGORY: Category = T::CATEGORY;

    fn to_value(&self, serializer: &Serializer) -> Result<Value> {
        (**self).to_value(serializer)
    }
}

impl<T: ?Sized + Serializable> Serializable for &mut T {
    const CATEGORY: Category = T::CATEGORY;

    fn to_value(&self, serializer: &Serializer) -> Result<Value> {
        (**self).to_value(serializer)
    }
}

macro_rules! impl_smart_pointer {
    ($($ptr:ident),* $(,)?) => {
        $(
            impl<T: ?Sized + Serializable> Serializable for $ptr<T> {
                const CATEGORY: Category = T::CATEGORY;

                fn to_value(&self, serializer: &Serializer) -> Result<Value> {
                    (**self).to_value(serializer)
                }
            }
        )*
    };
}

impl_smart_pointer!(Box, Rc, Arc);

impl<T> Serializable for Cow<'_, T>
where
    T: ?Sized + ToOwned + Serializable,
{
    const CATEGORY: Category = T::CATEGORY;

    fn to_value(&self, serializer: &Serializer) -> Result<Value> {
        (**self).to_value(serializer)
    }
}

impl<T: Serializable> Serializable for Option<T> {
    const CATEGORY: Category = T::CATEGORY;

    fn to_value(&self, serializer: &Serializer) -> Result<Value> {
        match self {
            Some(value) => value.to_value(serializer),
            None => Ok(strategy::null()),
        }
    }
}

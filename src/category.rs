//! Type categories and the classifier that assigns them.
//!
//! Every serializable type belongs to exactly one [`Category`], recorded as
//! the associated const [`Serializable::CATEGORY`] of its single impl. The
//! category decides which strategy in [`strategy`](crate::strategy) produces
//! its [`Value`](crate::Value).
//!
//! ## Precedence
//!
//! Several shapes can describe the same type at once. The first rule that
//! matches wins:
//!
//! 1. absence of a value (`()`, `PhantomData`, `None`) → [`Category::Null`]
//! 2. `bool` → [`Category::Boolean`]
//! 3. integers, floats and big integers → [`Category::Number`]
//! 4. text (`str`, `String`, `char`, `Cow<str>`, ...) → [`Category::StringLike`]
//! 5. two-component tuples → [`Category::Pair`]
//! 6. a registered custom conversion → [`Category::UserSerializable`]
//! 7. anything else iterable → [`Category::Collection`]
//!
//! A type that matches none of them has no `Serializable` impl and is
//! rejected at compile time.
//!
//! ```rust
//! use shape_ir::{category_of, Category};
//!
//! assert_eq!(category_of::<String>(), Category::StringLike);
//! assert_eq!(category_of::<Vec<String>>(), Category::Collection);
//! assert_eq!(category_of::<(u8, f32)>(), Category::Pair);
//! ```

use crate::Serializable;
use std::fmt;

/// The shape a type is serialized as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Null,
    Boolean,
    Number,
    StringLike,
    Pair,
    UserSerializable,
    Collection,
}

impl Category {
    /// All categories, highest precedence first.
    pub const ALL: [Category; 7] = [
        Category::Null,
        Category::Boolean,
        Category::Number,
        Category::StringLike,
        Category::Pair,
        Category::UserSerializable,
        Category::Collection,
    ];

    /// Rank of this category's classification rule, starting at 1.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use shape_ir::Category;
    ///
    /// assert!(Category::StringLike.precedence() < Category::Collection.precedence());
    /// assert!(Category::UserSerializable.precedence() < Category::Collection.precedence());
    /// ```
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Category::Null => 1,
            Category::Boolean => 2,
            Category::Number => 3,
            Category::StringLike => 4,
            Category::Pair => 5,
            Category::UserSerializable => 6,
            Category::Collection => 7,
        }
    }

    /// Returns `true` for the categories whose strategy recurses into elements.
    #[must_use]
    pub const fn is_structural(self) -> bool {
        matches!(self, Category::Pair | Category::Collection)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Null => "null",
            Category::Boolean => "boolean",
            Category::Number => "number",
            Category::StringLike => "string-like",
            Category::Pair => "pair",
            Category::UserSerializable => "user-serializable",
            Category::Collection => "collection",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the category `T` is serialized as.
///
/// The answer is a compile-time constant; no value of `T` is needed.
#[must_use]
pub const fn category_of<T: ?Sized + Serializable>() -> Category {
    T::CATEGORY
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use std::collections::{BTreeMap, HashSet};
    use std::marker::PhantomData;
    use std::rc::Rc;

    #[test]
    fn test_precedence_matches_declaration_order() {
        let ranks: Vec<u8> = Category::ALL.iter().map(|c| c.precedence()).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5, 6, 7]);

        let mut sorted = Category::ALL;
        sorted.sort();
        assert_eq!(sorted, Category::ALL);
    }

    #[test]
    fn test_scalar_categories() {
        assert_eq!(category_of::<()>(), Category::Null);
        assert_eq!(category_of::<PhantomData<String>>(), Category::Null);
        assert_eq!(category_of::<bool>(), Category::Boolean);
        assert_eq!(category_of::<u8>(), Category::Number);
        assert_eq!(category_of::<i128>(), Category::Number);
        assert_eq!(category_of::<f32>(), Category::Number);
        assert_eq!(category_of::<num_bigint::BigInt>(), Category::Number);
    }

    #[test]
    fn test_text_is_never_a_collection() {
        assert_eq!(category_of::<str>(), Category::StringLike);
        assert_eq!(category_of::<&str>(), Category::StringLike);
        assert_eq!(category_of::<String>(), Category::StringLike);
        assert_eq!(category_of::<char>(), Category::StringLike);
        assert_eq!(category_of::<Cow<'static, str>>(), Category::StringLike);
        assert_eq!(category_of::<Box<str>>(), Category::StringLike);
        assert_eq!(category_of::<Rc<str>>(), Category::StringLike);
    }

    #[test]
    fn test_structural_categories() {
        assert_eq!(category_of::<(i32, String)>(), Category::Pair);
        assert_eq!(category_of::<[u8]>(), Category::Collection);
        assert_eq!(category_of::<[char; 3]>(), Category::Collection);
        assert_eq!(category_of::<HashSet<u8>>(), Category::Collection);
        assert_eq!(category_of::<BTreeMap<String, bool>>(), Category::Collection);
        assert!(Category::Pair.is_structural());
        assert!(!Category::UserSerializable.is_structural());
    }

    #[test]
    fn test_wrappers_take_inner_category() {
        assert_eq!(category_of::<Option<bool>>(), Category::Boolean);
        assert_eq!(category_of::<Box<Vec<u8>>>(), Category::Collection);
        assert_eq!(category_of::<&(u8, u8)>(), Category::Pair);
    }

    #[test]
    fn test_display() {
        assert_eq!(Category::StringLike.to_string(), "string-like");
        assert_eq!(Category::UserSerializable.to_string(), "user-serializable");
    }
}

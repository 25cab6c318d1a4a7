//! Configuration options for serialization.
//!
//! This module provides types to tune how the engine behaves at run time:
//!
//! - [`SerializeOptions`]: Main configuration struct
//! - [`NonFinitePolicy`]: What to do with NaN and infinite floats
//!
//! Options never change which strategy a type is serialized with; that is
//! decided by the type alone.
//!
//! ## Examples
//!
//! ```rust
//! use shape_ir::{serialize_with_options, NonFinitePolicy, SerializeOptions, Value};
//!
//! let options = SerializeOptions::new().with_non_finite(NonFinitePolicy::Null);
//! let value = serialize_with_options(&f64::NAN, options).unwrap();
//! assert_eq!(value, Value::Null);
//! ```

/// Policy for NaN and infinite floating-point numbers.
///
/// # Examples
///
/// ```rust
/// use shape_ir::NonFinitePolicy;
///
/// assert_eq!(NonFinitePolicy::default(), NonFinitePolicy::Text);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum NonFinitePolicy {
    /// Keep the value as number text: `NaN`, `Infinity` or `-Infinity`
    #[default]
    Text,
    /// Replace the value with `Value::Null`
    Null,
    /// Fail with [`Error::NonFiniteNumber`](crate::Error::NonFiniteNumber)
    Error,
}

/// Configuration options for serialization.
///
/// # Examples
///
/// ```rust
/// use shape_ir::{NonFinitePolicy, SerializeOptions};
///
/// // Defaults: unbounded depth, non-finite numbers kept as text
/// let options = SerializeOptions::new();
/// assert_eq!(options.max_depth, None);
///
/// // Custom configuration
/// let options = SerializeOptions::new()
///     .with_max_depth(16)
///     .with_non_finite(NonFinitePolicy::Error);
/// assert_eq!(options.max_depth, Some(16));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SerializeOptions {
    /// Deepest nesting allowed; `None` leaves recursion bounded only by the stack.
    pub max_depth: Option<usize>,
    pub non_finite: NonFinitePolicy,
}

impl SerializeOptions {
    /// Creates default options.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use shape_ir::{NonFinitePolicy, SerializeOptions};
    ///
    /// let options = SerializeOptions::new();
    /// assert_eq!(options.non_finite, NonFinitePolicy::Text);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that reject NaN and infinity and cap nesting at 128 levels.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use shape_ir::{NonFinitePolicy, SerializeOptions};
    ///
    /// let options = SerializeOptions::strict();
    /// assert_eq!(options.max_depth, Some(128));
    /// assert_eq!(options.non_finite, NonFinitePolicy::Error);
    /// ```
    #[must_use]
    pub fn strict() -> Self {
        SerializeOptions {
            max_depth: Some(128),
            non_finite: NonFinitePolicy::Error,
        }
    }

    /// Sets the deepest nesting level a value may reach.
    ///
    /// A top-level scalar is depth 1; every collection or pair adds one level
    /// for its elements.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Sets the policy for NaN and infinite floats.
    #[must_use]
    pub fn with_non_finite(mut self, policy: NonFinitePolicy) -> Self {
        self.non_finite = policy;
        self
    }
}

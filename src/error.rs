//! Error types for value serialization.
//!
//! Most classification failures never reach this module: a type with no
//! [`Serializable`](crate::Serializable) impl, or with two of them, is rejected
//! by the compiler. What remains are failures that only a running conversion
//! can detect.
//!
//! ## Error Categories
//!
//! - **Custom**: a registered conversion refused its input
//! - **Depth**: nesting exceeded [`SerializeOptions::max_depth`](crate::SerializeOptions)
//! - **Non-finite numbers**: NaN or infinity under [`NonFinitePolicy::Error`](crate::NonFinitePolicy)
//! - **Type mismatches**: extracting a Rust value out of a [`Value`](crate::Value) failed
//!
//! Errors raised while serializing an element of a collection or pair are
//! returned to the caller exactly as the element produced them.
//!
//! ## Examples
//!
//! ```rust
//! use shape_ir::Error;
//!
//! let err = Error::custom("month out of range");
//! assert_eq!(err.to_string(), "Error: month out of range");
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all runtime failures of the serialization engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A custom conversion rejected its input
    #[error("Error: {0}")]
    Custom(String),

    /// Nesting went deeper than the configured limit
    #[error("Depth limit exceeded: values nest deeper than {limit} levels")]
    DepthLimitExceeded { limit: usize },

    /// A NaN or infinite float was rejected by the non-finite policy
    #[error("Non-finite number rejected: {0}")]
    NonFiniteNumber(String),

    /// Extracting a Rust value from a `Value` found the wrong variant
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },
}

impl Error {
    /// Creates a custom error with a display message.
    ///
    /// This is the error custom conversions should return when they cannot
    /// represent their input.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use shape_ir::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates a depth limit error.
    pub fn depth_limit(limit: usize) -> Self {
        Error::DepthLimitExceeded { limit }
    }

    /// Creates a non-finite number error from the number's canonical text.
    pub fn non_finite(text: &str) -> Self {
        Error::NonFiniteNumber(text.to_string())
    }

    /// Creates a type mismatch error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use shape_ir::Error;
    ///
    /// let err = Error::type_mismatch("bool", "sequence");
    /// assert!(err.to_string().contains("expected bool"));
    /// ```
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

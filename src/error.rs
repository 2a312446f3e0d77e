/* -------------------------------------------------------------------------- */
/*                                   Errors                                   */
/* -------------------------------------------------------------------------- */

use thiserror::Error;

/// Errors produced by [`crate::SamplableSet`] operations. Every structural
/// failure is surfaced as a typed variant here; nothing is retried or
/// silently recovered, and a failed operation never leaves the set in a
/// partially updated state.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum SamplableSetError {
    /// Raised at construction time when `w_min`/`w_max` don't describe a
    /// valid, finite, positive weight range.
    #[error(
        "invalid weight range: w_min={w_min}, w_max={w_max} \
         (require 0 < w_min <= w_max, both finite)"
    )]
    InvalidRange {
        /// The lower bound that was rejected.
        w_min: f64,
        /// The upper bound that was rejected.
        w_max: f64,
    },

    /// Raised by `insert`/`set_weight` when the weight falls outside
    /// `[w_min, w_max]`.
    #[error("weight {weight} is outside the range [{w_min}, {w_max}]")]
    OutOfRange {
        /// The weight that was rejected.
        weight: f64,
        /// The set's lower bound.
        w_min: f64,
        /// The set's upper bound.
        w_max: f64,
    },

    /// Raised by `get_weight`, `erase`, and strict `set_weight` when the
    /// element isn't a member of the set.
    #[error("element not found in the set")]
    NotFound,

    /// Raised by `sample`/`sample_n` when the set has no elements left to
    /// draw from.
    #[error("cannot sample from an empty set")]
    Empty,

    /// Raised by an iterator cursor's `current`/`advance` once past the
    /// last entry.
    #[error("iterator exhausted")]
    IteratorExhausted,
}

/// Convenience alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, SamplableSetError>;

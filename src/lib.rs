//! A weighted samplable set: an associative container of distinct
//! elements, each tagged with a strictly positive weight in a known
//! range `[w_min, w_max]`, supporting O(1) expected-time weighted random
//! sampling alongside O(1) expected-time insert, update, erase, and
//! membership test.
//!
//! The core algorithm is two-level composition–rejection sampling: elements
//! are grouped by weight into factor-of-two bands ([`group`]), a binary
//! tree of per-group weight totals ([`propensity_tree`]) selects a group
//! in `O(log G)`, and rejection sampling within the chosen group
//! ([`group::Group::sample`]) selects an element in O(1) expected time
//! with acceptance probability at least 1/2. See
//! <https://doi.org/10.1103/PhysRevE.100.013301> for the originating
//! algorithm description.
//!
//! ```
//! use samplable_set::SamplableSet;
//!
//! let mut set = SamplableSet::new(1.0, 100.0, Some(42)).unwrap();
//! set.insert("a", 33.3).unwrap();
//! let (element, weight) = set.sample().unwrap();
//! assert_eq!((element, weight), ("a", 33.3));
//! ```

mod error;
mod group;
mod group_index;
mod iter;
mod propensity_tree;
mod rng;
pub mod samples;
mod set;

#[cfg(test)]
mod quickcheck_tests;

pub use error::{Result, SamplableSetError};
pub use iter::{Iter, SampleN};
pub use set::{SamplableSet, SamplableSetBuilder};

/* -------------------------------------------------------------------------- */
/*                                SamplableSet                                */
/* -------------------------------------------------------------------------- */

// Owns the groups, the propensity tree, the element locator, and the RNG,
// and orchestrates insert/erase/update/sample/iterate while enforcing the
// set's invariants.

use std::collections::HashMap;
use std::hash::Hash;

use crate::error::{Result, SamplableSetError};
use crate::group::Group;
use crate::group_index;
use crate::iter::{Iter, SampleN};
use crate::propensity_tree::PropensityTree;
use crate::rng::Rng;

/// A weighted associative container supporting O(1) expected-time insert,
/// erase, update, membership test, and weight-proportional sampling.
///
/// See the crate-level docs for the composition-rejection algorithm this
/// type implements.
#[derive(Clone, Debug)]
pub struct SamplableSet<E: Hash + Eq + Clone> {
    w_min: f64,
    w_max: f64,
    groups: Vec<Group<E>>,
    tree: PropensityTree,
    locator: HashMap<E, usize>,
    rng: Rng,
}

impl<E: Hash + Eq + Clone> SamplableSet<E> {
    /// Builds an empty set over `[w_min, w_max]`. Fails with
    /// [`SamplableSetError::InvalidRange`] unless `0 < w_min <= w_max` and
    /// both bounds are finite.
    pub fn new(w_min: f64, w_max: f64, seed: Option<u64>) -> Result<Self> {
        if !(w_min.is_finite() && w_max.is_finite() && w_min > 0.0 && w_max >= w_min)
        {
            return Err(SamplableSetError::InvalidRange { w_min, w_max });
        }
        let num_groups = group_index::num_groups(w_min, w_max);
        let groups = (0..num_groups)
            .map(|g| Group::new(group_index::group_upper_bound(g, w_min)))
            .collect();
        Ok(SamplableSet {
            w_min,
            w_max,
            groups,
            tree: PropensityTree::new(num_groups),
            locator: HashMap::new(),
            rng: Rng::new(seed),
        })
    }

    /// Builds a set from `new` followed by `set_weight` for each pair in
    /// order; duplicate elements collapse, last write wins.
    pub fn from_pairs<I>(w_min: f64, w_max: f64, pairs: I, seed: Option<u64>) -> Result<Self>
    where
        I: IntoIterator<Item = (E, f64)>,
    {
        let mut set = Self::new(w_min, w_max, seed)?;
        for (e, w) in pairs {
            set.set_weight(e, w)?;
        }
        Ok(set)
    }

    /// The set's lower weight bound.
    pub fn w_min(&self) -> f64 {
        self.w_min
    }

    /// The set's upper weight bound.
    pub fn w_max(&self) -> f64 {
        self.w_max
    }

    /// Number of weight-class groups backing this set.
    pub fn num_groups(&self) -> usize {
        self.groups.len()
    }

    /// Number of elements currently held.
    pub fn size(&self) -> usize {
        self.locator.len()
    }

    /// True when the set holds no elements.
    pub fn is_empty(&self) -> bool {
        self.locator.is_empty()
    }

    /// Sum of every entry's weight. Equals the propensity tree's root.
    pub fn total_weight(&self) -> f64 {
        self.tree.total()
    }

    /// True if `e` is a member of the set.
    pub fn contains(&self, e: &E) -> bool {
        self.locator.contains_key(e)
    }

    /// Inserts `(e, w)`. Returns `Ok(false)` without modifying the set if
    /// `e` is already present. Fails with
    /// [`SamplableSetError::OutOfRange`] if `w` isn't in
    /// `[w_min, w_max]`.
    pub fn insert(&mut self, e: E, w: f64) -> Result<bool> {
        if self.locator.contains_key(&e) {
            return Ok(false);
        }
        self.check_weight(w)?;
        let g = group_index::group_index(w, self.w_min, self.groups.len());
        self.groups[g].push(e.clone(), w);
        self.locator.insert(e, g);
        self.tree.update_leaf(g, w);
        #[cfg(feature = "log")]
        log::trace!("inserted into group {g} (weight {w})");
        Ok(true)
    }

    /// Returns `e`'s current weight. Fails with
    /// [`SamplableSetError::NotFound`] if `e` isn't a member.
    pub fn get_weight(&self, e: &E) -> Result<f64> {
        let g = *self.locator.get(e).ok_or(SamplableSetError::NotFound)?;
        let pos = self.groups[g]
            .position_of(e)
            .expect("locator/group desync");
        Ok(self.groups[g].weight_at(pos))
    }

    /// Sets `e`'s weight, inserting `e` if absent (ergonomic parity with
    /// subscript assignment; see [`Self::set_weight_strict`] for the
    /// fail-on-absent variant). Fails with
    /// [`SamplableSetError::OutOfRange`] if `w` isn't in
    /// `[w_min, w_max]`.
    pub fn set_weight(&mut self, e: E, w: f64) -> Result<()> {
        self.check_weight(w)?;
        match self.locator.get(&e).copied() {
            None => {
                self.insert(e, w)?;
            }
            Some(g_old) => self.set_weight_existing(e, g_old, w),
        }
        Ok(())
    }

    /// As [`Self::set_weight`], but fails with
    /// [`SamplableSetError::NotFound`] instead of inserting when `e` is
    /// absent.
    pub fn set_weight_strict(&mut self, e: &E, w: f64) -> Result<()> {
        self.check_weight(w)?;
        let g_old = *self.locator.get(e).ok_or(SamplableSetError::NotFound)?;
        self.set_weight_existing(e.clone(), g_old, w);
        Ok(())
    }

    fn set_weight_existing(&mut self, e: E, g_old: usize, w: f64) {
        let pos_old = self.groups[g_old]
            .position_of(&e)
            .expect("locator/group desync");
        let g_new = group_index::group_index(w, self.w_min, self.groups.len());
        if g_new == g_old {
            let delta = w - self.groups[g_old].weight_at(pos_old);
            self.groups[g_old].set_weight(pos_old, w);
            self.tree.update_leaf(g_old, delta);
        } else {
            // Single-threaded: the erase-then-insert below never exposes a
            // stale locator entry to another caller mid-update.
            let (moved_e, moved_w) = self.groups[g_old].swap_remove(pos_old);
            self.tree.update_leaf(g_old, -moved_w);
            self.groups[g_new].push(moved_e.clone(), w);
            self.locator.insert(moved_e, g_new);
            self.tree.update_leaf(g_new, w);
            #[cfg(feature = "log")]
            log::debug!("moved element from group {g_old} to group {g_new}");
        }
    }

    /// Removes `e`, returning its weight. Fails with
    /// [`SamplableSetError::NotFound`] if `e` isn't a member.
    pub fn erase(&mut self, e: &E) -> Result<f64> {
        let g = self
            .locator
            .remove(e)
            .ok_or(SamplableSetError::NotFound)?;
        let pos = self.groups[g]
            .position_of(e)
            .expect("locator/group desync");
        let (_, w) = self.groups[g].swap_remove(pos);
        self.tree.update_leaf(g, -w);
        Ok(w)
    }

    /// Draws one element with probability proportional to its weight.
    /// Fails with [`SamplableSetError::Empty`] when the set has no
    /// elements.
    pub fn sample(&mut self) -> Result<(E, f64)> {
        if self.is_empty() {
            return Err(SamplableSetError::Empty);
        }
        let g = self.tree.sample_leaf(&mut self.rng);
        let pos = self.groups[g].sample(&mut self.rng);
        let e = self.groups[g].element_at(pos).clone();
        let w = self.groups[g].weight_at(pos);
        Ok((e, w))
    }

    /// As [`Self::sample`], but returns `None` instead of an error on an
    /// empty set — a thin adapter matching the original Python wrapper's
    /// sentinel-on-empty behavior.
    pub fn sample_opt(&mut self) -> Option<(E, f64)> {
        self.sample().ok()
    }

    /// Produces a lazy sequence of up to `n` samples. With replacement,
    /// each draw is independent; without replacement, each sampled
    /// element is erased before the next draw, and the sequence ends
    /// early (yielding [`SamplableSetError::Empty`]) if the set empties
    /// first.
    pub fn sample_n(&mut self, n: usize, with_replacement: bool) -> SampleN<'_, E> {
        SampleN::new(self, n, with_replacement)
    }

    /// Empties the set: clears every group, zeroes the tree, clears the
    /// locator.
    pub fn clear(&mut self) {
        for g in &mut self.groups {
            *g = Group::new(g.upper_bound());
        }
        self.tree = PropensityTree::new(self.groups.len());
        self.locator.clear();
    }

    /// Iterates every current `(element, weight)` pair exactly once, in
    /// an unspecified but deterministic group-major, position-major
    /// order. Not restartable from a cursor position; mutating the set
    /// while an iterator is live is forbidden and invalidates it.
    pub fn iter(&self) -> Iter<'_, E> {
        Iter::new(&self.groups)
    }

    fn check_weight(&self, w: f64) -> Result<()> {
        if w.is_finite() && self.w_min <= w && w <= self.w_max {
            Ok(())
        } else {
            Err(SamplableSetError::OutOfRange {
                weight: w,
                w_min: self.w_min,
                w_max: self.w_max,
            })
        }
    }

    pub(crate) fn groups(&self) -> &[Group<E>] {
        &self.groups
    }
}

/// Builder for a set pre-configured before any elements are inserted,
/// covering the constructor's `w_min`, `w_max`, and `seed` options.
#[derive(Debug, Clone, Default)]
pub struct SamplableSetBuilder {
    w_min: Option<f64>,
    w_max: Option<f64>,
    seed: Option<u64>,
}

impl SamplableSetBuilder {
    /// Starts a fresh builder with no bounds or seed set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the lower weight bound.
    pub fn w_min(mut self, w_min: f64) -> Self {
        self.w_min = Some(w_min);
        self
    }

    /// Sets the upper weight bound.
    pub fn w_max(mut self, w_max: f64) -> Self {
        self.w_max = Some(w_max);
        self
    }

    /// Sets the RNG seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds the set. Fails with [`SamplableSetError::InvalidRange`] if
    /// `w_min`/`w_max` weren't set or don't describe a valid range.
    pub fn build<E: Hash + Eq + Clone>(self) -> Result<SamplableSet<E>> {
        let w_min = self.w_min.ok_or(SamplableSetError::InvalidRange {
            w_min: f64::NAN,
            w_max: self.w_max.unwrap_or(f64::NAN),
        })?;
        let w_max = self.w_max.ok_or(SamplableSetError::InvalidRange {
            w_min,
            w_max: f64::NAN,
        })?;
        SamplableSet::new(w_min, w_max, self.seed)
    }
}

/* -------------------------------------------------------------------------- */
/*                                  Iteration                                 */
/* -------------------------------------------------------------------------- */

// Iteration and lazy `sample_n` sequences, modeled as explicit cursor
// objects that advance on demand rather than coroutines.

use std::hash::Hash;

use crate::error::{Result, SamplableSetError};
use crate::group::Group;
use crate::set::SamplableSet;

/// Cursor states for [`Iter`]'s underlying primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CursorState {
    Uninitialized,
    Positioned(usize, usize),
    End,
}

/// A restartable-from-scratch (but not resumable mid-iteration) cursor
/// over every `(element, weight)` pair currently in a set, visited in
/// group-major, position-major order. Mutating the parent set while an
/// `Iter` is live is undefined behavior: nothing here detects it.
pub struct Iter<'a, E: Hash + Eq + Clone> {
    groups: &'a [Group<E>],
    state: CursorState,
}

impl<'a, E: Hash + Eq + Clone> Iter<'a, E> {
    pub(crate) fn new(groups: &'a [Group<E>]) -> Self {
        let mut it = Iter {
            groups,
            state: CursorState::Uninitialized,
        };
        it.init_iterator();
        it
    }

    /// Positions the cursor at the first entry of the first non-empty
    /// group, or `End` if the set is empty.
    fn init_iterator(&mut self) {
        self.state = self
            .first_nonempty_group_from(0)
            .map_or(CursorState::End, |g| CursorState::Positioned(g, 0));
    }

    fn first_nonempty_group_from(&self, start: usize) -> Option<usize> {
        (start..self.groups.len()).find(|&g| !self.groups[g].is_empty())
    }

    /// The entry at the cursor, if positioned. Fails with
    /// [`SamplableSetError::IteratorExhausted`] once `End` is reached.
    pub fn current(&self) -> Result<(&'a E, f64)> {
        match self.state {
            CursorState::Positioned(g, i) => {
                Ok((self.groups[g].element_at(i), self.groups[g].weight_at(i)))
            }
            _ => Err(SamplableSetError::IteratorExhausted),
        }
    }

    /// Steps within the current group, then to the next non-empty group,
    /// or to `End` after the last entry.
    fn advance(&mut self) {
        self.state = match self.state {
            CursorState::Positioned(g, i) => {
                if i + 1 < self.groups[g].len() {
                    CursorState::Positioned(g, i + 1)
                } else {
                    self.first_nonempty_group_from(g + 1)
                        .map_or(CursorState::End, |next| CursorState::Positioned(next, 0))
                }
            }
            other => other,
        };
    }
}

impl<'a, E: Hash + Eq + Clone> Iterator for Iter<'a, E> {
    type Item = (&'a E, f64);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.current().ok()?;
        self.advance();
        Some(item)
    }
}

/// Lazy generator for `sample_n`: with replacement each draw is
/// independent, without replacement each draw erases the sampled element
/// first. Ends early with [`SamplableSetError::Empty`] if the set runs
/// out before `n` draws.
pub struct SampleN<'a, E: Hash + Eq + Clone> {
    set: &'a mut SamplableSet<E>,
    remaining: usize,
    with_replacement: bool,
    exhausted: bool,
}

impl<'a, E: Hash + Eq + Clone> SampleN<'a, E> {
    pub(crate) fn new(set: &'a mut SamplableSet<E>, n: usize, with_replacement: bool) -> Self {
        SampleN {
            set,
            remaining: n,
            with_replacement,
            exhausted: false,
        }
    }
}

impl<'a, E: Hash + Eq + Clone> Iterator for SampleN<'a, E> {
    type Item = Result<(E, f64)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 || self.exhausted {
            return None;
        }
        self.remaining -= 1;
        match self.set.sample() {
            Ok((e, w)) => {
                if !self.with_replacement {
                    // `e` was just drawn from the live set, so erase
                    // cannot fail with NotFound.
                    self.set.erase(&e).expect("sampled element must be present");
                }
                Some(Ok((e, w)))
            }
            Err(err) => {
                self.exhausted = true;
                Some(Err(err))
            }
        }
    }
}

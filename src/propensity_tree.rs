/* -------------------------------------------------------------------------- */
/*                               Propensity tree                              */
/* -------------------------------------------------------------------------- */

use crate::rng::Rng;

/// A static tree of group-weight partial sums, supporting O(log G) point
/// update and weighted leaf selection.
///
/// Stored as a dense 1-indexed array: node 1 is the root, node `i`'s
/// children are `2*i` and `2*i+1`, and leaves occupy `[cap, 2*cap)` where
/// `cap` is the smallest power of two `>= num_groups` (extra leaves are
/// permanently zero-padding). All operations are iterative.
#[derive(Debug, Clone)]
pub struct PropensityTree {
    cap: usize,
    nodes: Vec<f64>,
}

impl PropensityTree {
    /// Builds a tree with `num_groups` zero-weighted leaves.
    pub fn new(num_groups: usize) -> Self {
        let cap = num_groups.max(1).next_power_of_two();
        PropensityTree {
            cap,
            nodes: vec![0.0; 2 * cap],
        }
    }

    /// The root's value: the sum of every leaf.
    pub fn total(&self) -> f64 {
        self.nodes[1]
    }

    /// Adds `delta` (possibly negative) to leaf `g`, then recomputes every
    /// internal node on the path to the root as `left + right`, rather
    /// than incrementally adding `delta`, to bound floating-point drift.
    pub fn update_leaf(&mut self, g: usize, delta: f64) {
        let mut i = self.cap + g;
        self.nodes[i] += delta;
        i /= 2;
        while i >= 1 {
            self.nodes[i] = self.nodes[2 * i] + self.nodes[2 * i + 1];
            if i == 1 {
                break;
            }
            i /= 2;
        }
    }

    /// Draws `u` uniformly in `[0, total())` and descends to the leaf it
    /// falls in. Undefined (panics) when `total() == 0` — callers must
    /// check emptiness first.
    pub fn sample_leaf(&self, rng: &mut Rng) -> usize {
        let total = self.total();
        assert!(total > 0.0, "sample_leaf on an empty tree");
        let mut u = rng.uniform01() * total;
        let mut i = 1usize;
        while i < self.cap {
            let left = 2 * i;
            let l = self.nodes[left];
            if u < l {
                i = left;
            } else {
                u -= l;
                i = left + 1;
            }
        }
        i - self.cap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_sum_of_leaves() {
        let mut t = PropensityTree::new(5);
        t.update_leaf(0, 2.0);
        t.update_leaf(1, 3.0);
        t.update_leaf(4, 7.0);
        assert_eq!(t.total(), 12.0);
    }

    #[test]
    fn negative_delta_removes_weight() {
        let mut t = PropensityTree::new(4);
        t.update_leaf(2, 5.0);
        assert_eq!(t.total(), 5.0);
        t.update_leaf(2, -5.0);
        assert_eq!(t.total(), 0.0);
    }

    #[test]
    fn sample_leaf_only_hits_nonzero_leaves() {
        let mut t = PropensityTree::new(3);
        t.update_leaf(1, 10.0);
        let mut rng = Rng::from_seed(7);
        for _ in 0..200 {
            assert_eq!(t.sample_leaf(&mut rng), 1);
        }
    }

    #[test]
    fn sample_leaf_distribution_matches_weights() {
        let mut t = PropensityTree::new(2);
        t.update_leaf(0, 1.0);
        t.update_leaf(1, 3.0);
        let mut rng = Rng::from_seed(99);
        let mut counts = [0u32; 2];
        for _ in 0..20_000 {
            counts[t.sample_leaf(&mut rng)] += 1;
        }
        let frac0 = f64::from(counts[0]) / 20_000.0;
        // true ratio is 1/4; allow generous tolerance for a deterministic
        // but not exhaustively tuned seed.
        assert!((frac0 - 0.25).abs() < 0.03, "frac0 = {frac0}");
    }

    #[test]
    #[should_panic(expected = "empty tree")]
    fn sample_leaf_panics_when_empty() {
        let t = PropensityTree::new(4);
        let mut rng = Rng::from_seed(1);
        t.sample_leaf(&mut rng);
    }
}

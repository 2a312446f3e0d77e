/* -------------------------------------------------------------------------- */
/*                             Property-based tests                           */
/* -------------------------------------------------------------------------- */

// Generates random insert/erase/set_weight sequences over a small `u8`
// alphabet and checks that the set's core invariants hold after every
// prefix.

use quickcheck::{Arbitrary, Gen};

use crate::SamplableSet;

const W_MIN: f64 = 1.0;
const W_MAX: f64 = 1000.0;

/// One step of a random operation sequence exercised against a set built
/// fresh over `[W_MIN, W_MAX]`.
#[derive(Debug, Clone)]
enum Op {
    Insert(u8, f64),
    Erase(u8),
    SetWeight(u8, f64),
}

/// Maps an arbitrary `u8` onto a weight inside `[W_MIN, W_MAX]`.
fn clamp_weight(raw: u8) -> f64 {
    W_MIN + (f64::from(raw) / 255.0) * (W_MAX - W_MIN)
}

impl Arbitrary for Op {
    fn arbitrary(g: &mut Gen) -> Self {
        let variant = u8::arbitrary(g) % 3;
        let elem = u8::arbitrary(g) % 10;
        let weight = clamp_weight(u8::arbitrary(g));
        match variant {
            0 => Op::Insert(elem, weight),
            1 => Op::Erase(elem),
            _ => Op::SetWeight(elem, weight),
        }
    }
}

fn apply(set: &mut SamplableSet<u8>, op: &Op) {
    match *op {
        Op::Insert(e, w) => {
            let _ = set.insert(e, w);
        }
        Op::Erase(e) => {
            let _ = set.erase(&e);
        }
        Op::SetWeight(e, w) => {
            let _ = set.set_weight(e, w);
        }
    }
}

fn fresh_set() -> SamplableSet<u8> {
    SamplableSet::new(W_MIN, W_MAX, Some(7)).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    // `size()` always matches the sum of each group's count and
    // therefore the locator.
    #[quickcheck]
    fn size_matches_group_counts(ops: Vec<Op>) -> bool {
        let mut set = fresh_set();
        for op in &ops {
            apply(&mut set, op);
        }
        let sum_groups: usize = set.groups().iter().map(|g| g.len()).sum();
        set.size() == sum_groups
    }

    // `total_weight()` tracks the sum of current entry weights within a
    // tolerance that allows for float drift.
    #[quickcheck]
    fn total_weight_matches_sum_of_entries(ops: Vec<Op>) -> bool {
        let mut set = fresh_set();
        for op in &ops {
            apply(&mut set, op);
        }
        let sum: f64 = set.iter().map(|(_, w)| w).sum();
        let n = set.size() as f64;
        (set.total_weight() - sum).abs() <= n * W_MAX * f64::EPSILON + f64::EPSILON
    }

    // Every element a full iteration yields is a current member with a
    // matching weight, and the iteration's length equals `size()`.
    #[quickcheck]
    fn iteration_yields_every_member_with_matching_weight(ops: Vec<Op>) -> bool {
        let mut set = fresh_set();
        for op in &ops {
            apply(&mut set, op);
        }
        let collected: Vec<(u8, f64)> = set.iter().map(|(e, w)| (*e, w)).collect();
        collected.len() == set.size()
            && collected
                .iter()
                .all(|&(e, w)| set.contains(&e) && set.get_weight(&e) == Ok(w))
    }

    // Round-trip: insert then get_weight returns what was inserted.
    #[quickcheck]
    fn insert_then_get_weight_round_trips(e: u8, raw_w: u8) -> bool {
        let w = clamp_weight(raw_w);
        let mut set = fresh_set();
        set.insert(e, w).unwrap();
        set.get_weight(&e) == Ok(w)
    }

    // Round-trip: insert then erase leaves the element absent.
    #[quickcheck]
    fn insert_then_erase_removes_membership(e: u8, raw_w: u8) -> bool {
        let w = clamp_weight(raw_w);
        let mut set = fresh_set();
        set.insert(e, w).unwrap();
        set.erase(&e).unwrap();
        !set.contains(&e)
    }

    // Repeating the same `set_weight` call is a no-op past the first
    // application.
    #[quickcheck]
    fn repeated_set_weight_is_idempotent(e: u8, raw_w1: u8, raw_w2: u8) -> bool {
        let w1 = clamp_weight(raw_w1);
        let w2 = clamp_weight(raw_w2);

        let mut once = fresh_set();
        once.insert(e, w1).unwrap();
        once.set_weight(e, w2).unwrap();

        let mut twice = fresh_set();
        twice.insert(e, w1).unwrap();
        twice.set_weight(e, w2).unwrap();
        twice.set_weight(e, w2).unwrap();

        once.size() == twice.size() && once.total_weight() == twice.total_weight()
    }

    // `clear` reduces size, total weight, and every group's count to
    // zero.
    #[quickcheck]
    fn clear_empties_every_group(ops: Vec<Op>) -> bool {
        let mut set = fresh_set();
        for op in &ops {
            apply(&mut set, op);
        }
        set.clear();
        set.size() == 0
            && set.total_weight() == 0.0
            && set.groups().iter().all(|g| g.is_empty())
    }
}

use fxhash::FxBuildHasher;
/// This module implements a variant of
/// [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html)
/// with two additions needed by the grid front-end: fully deterministic
/// tie-breaking (min f, then min h, then earliest insertion) and an optional
/// cap on the number of node expansions.
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use num_traits::Zero;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use std::hash::Hash;

/// Outcome of one search. All node bookkeeping is dropped before this is
/// returned; nothing search-internal outlives the call.
pub(crate) enum SearchOutcome<N, C> {
    /// Path in start-to-goal order, with its total cost.
    Found(Vec<N>, C),
    /// The open set emptied without reaching the goal.
    Exhausted,
    /// The expansion cap was hit after this many expansions.
    Aborted(usize),
}

struct OpenSetEntry<K> {
    estimated_cost: K,
    cost: K,
    index: usize,
}

impl<K: PartialEq> Eq for OpenSetEntry<K> {}

impl<K: PartialEq> PartialEq for OpenSetEntry<K> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost) && self.cost.eq(&other.cost)
    }
}

impl<K: Ord> PartialOrd for OpenSetEntry<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for OpenSetEntry<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Orders by estimated cost f = g + h first. Among equal-f entries the
        // larger g wins, which for a consistent heuristic is the smaller h.
        // Remaining ties go to the earliest-inserted entry so that identical
        // inputs always pop in the same order.
        match other.estimated_cost.cmp(&self.estimated_cost) {
            Ordering::Equal => match self.cost.cmp(&other.cost) {
                Ordering::Equal => other.index.cmp(&self.index),
                s => s,
            },
            s => s,
        }
    }
}

fn reverse_path<N, V, F>(parents: &FxIndexMap<N, V>, mut parent: F, start: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
    F: FnMut(&V) -> usize,
{
    let mut path: Vec<N> = itertools::unfold(start, |i| {
        parents.get_index(*i).map(|(node, value)| {
            *i = parent(value);
            node.clone()
        })
    })
    .collect();
    path.reverse();
    path
}

/// A* over an implicit graph. `successors` yields `(neighbor, edge_cost)`
/// pairs; `heuristic` must never overestimate the remaining cost for the
/// result to be optimal. `max_expansions`, if set, bounds how many nodes may
/// be finalized before the search gives up.
///
/// The `parents` map doubles as the node arena: each entry records the
/// insertion index of its parent, so path reconstruction is a walk over
/// indices rather than over references between nodes.
pub(crate) fn astar_search<N, C, FN, IN, FH, FS>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
    max_expansions: Option<usize>,
) -> SearchOutcome<N, C>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    let mut to_see = BinaryHeap::new();
    to_see.push(OpenSetEntry {
        estimated_cost: heuristic(start),
        cost: Zero::zero(),
        index: 0,
    });
    let mut parents: FxIndexMap<N, (usize, C)> = FxIndexMap::default();
    parents.insert(start.clone(), (usize::MAX, Zero::zero()));
    let mut expanded: usize = 0;
    while let Some(OpenSetEntry { cost, index, .. }) = to_see.pop() {
        let successors = {
            let (node, &(_, c)) = parents.get_index(index).unwrap();
            if success(node) {
                let path = reverse_path(&parents, |&(p, _)| p, index);
                return SearchOutcome::Found(path, cost);
            }
            // We may have inserted a node several times into the binary heap
            // if we found a better way to access it. Ensure that we are
            // currently dealing with the best path and discard the others.
            if cost > c {
                continue;
            }
            expanded += 1;
            if let Some(cap) = max_expansions {
                if expanded > cap {
                    return SearchOutcome::Aborted(expanded);
                }
            }
            successors(node)
        };
        for (successor, move_cost) in successors {
            let new_cost = cost + move_cost;
            let h; // heuristic(&successor)
            let n; // index for successor
            match parents.entry(successor) {
                Vacant(e) => {
                    h = heuristic(e.key());
                    n = e.index();
                    e.insert((index, new_cost));
                }
                Occupied(mut e) => {
                    if e.get().1 > new_cost {
                        h = heuristic(e.key());
                        n = e.index();
                        e.insert((index, new_cost));
                    } else {
                        continue;
                    }
                }
            }

            to_see.push(OpenSetEntry {
                estimated_cost: new_cost + h,
                cost: new_cost,
                index: n,
            });
        }
    }
    SearchOutcome::Exhausted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_successors(n: &i32) -> Vec<(i32, i32)> {
        vec![(n - 1, 1), (n + 1, 1)]
    }

    #[test]
    fn finds_trivial_path_on_a_line() {
        let outcome = astar_search(&0, line_successors, |n| (5 - n).abs(), |n| *n == 5, None);
        match outcome {
            SearchOutcome::Found(path, cost) => {
                assert_eq!(path, vec![0, 1, 2, 3, 4, 5]);
                assert_eq!(cost, 5);
            }
            _ => panic!("expected a path"),
        }
    }

    #[test]
    fn start_satisfying_goal_is_a_single_node_path() {
        let outcome = astar_search(&7, line_successors, |n| (7 - n).abs(), |n| *n == 7, None);
        match outcome {
            SearchOutcome::Found(path, cost) => {
                assert_eq!(path, vec![7]);
                assert_eq!(cost, 0);
            }
            _ => panic!("expected a path"),
        }
    }

    #[test]
    fn expansion_cap_aborts() {
        // Goal sits 1000 steps away; a cap of 10 must trip first.
        let outcome = astar_search(&0, line_successors, |_| 0, |n| *n == 1000, Some(10));
        assert!(matches!(outcome, SearchOutcome::Aborted(_)));
    }

    #[test]
    fn exhausts_on_unreachable_goal() {
        // No successors at all: the open set drains after the start node.
        let outcome = astar_search(
            &0,
            |_: &i32| Vec::<(i32, i32)>::new(),
            |_| 0,
            |n| *n == 3,
            None,
        );
        assert!(matches!(outcome, SearchOutcome::Exhausted));
    }
}

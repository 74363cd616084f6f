/*!
This module provides access to the GreedySetCover, which selects a low cost collection of weighted sets that covers every element.
It uses the classic greedy approximation: repeatedly take the set with the lowest weight per still-uncovered element.

# Example usage
```rust
use greedy_cover::set_cover::GreedySetCover;

let sets = [
    vec!['a', 'b'], // ratio 2.0 / 2 = 1.0
    vec!['b', 'c']  // ratio 1.0 / 2 = 0.5, selected first
];
let weights = [2.0, 1.0];

let mut solver: GreedySetCover<char> = Default::default();
for (s, &w) in sets.iter().zip(weights.iter()) {
    solver.add_set(s, w).unwrap();
}

// set 1 goes first, then set 0 is left with only 'a'
let solution = solver.solve().unwrap();
assert_eq!(solution.order(), &[1, 0]);
assert_eq!(solution.newly_covered(), &[2, 1]);
assert_eq!(solution.total_weight(), 3.0);

// convert the order into a disjoint assignment
let partition = solver.assign_in_order(solution.order()).unwrap();
assert_eq!(partition, vec![vec![&'a'], vec![&'b', &'c']]);
```
*/

use itertools::Itertools;
use log::{debug, trace};
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use simple_error::{bail, SimpleError};
use std::hash::Hash;

use crate::assign::claim_in_order;
use crate::cover_config::SetCoverConfig;
use crate::mutable_pqueue::MutablePriorityQueue;

/// Contains a final set cover result
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SetCoverSolution {
    /// The selected set indices, in the order they were selected
    order: Vec<usize>,
    /// For each selection, the number of elements it covered that were not covered before
    newly_covered: Vec<usize>,
    /// Sum of the weights of the selected sets
    total_weight: f64,
    /// Number of distinct elements across all input sets
    num_elements: usize
}

impl SetCoverSolution {
    /// Constructor
    pub fn new(order: Vec<usize>, newly_covered: Vec<usize>, total_weight: f64, num_elements: usize) -> SetCoverSolution {
        assert_eq!(order.len(), newly_covered.len());
        SetCoverSolution {
            order,
            newly_covered,
            total_weight,
            num_elements
        }
    }

    // Getters
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn newly_covered(&self) -> &[usize] {
        &self.newly_covered
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    pub fn num_elements(&self) -> usize {
        self.num_elements
    }

    /// Number of distinct elements covered by the selected sets
    pub fn num_covered(&self) -> usize {
        self.newly_covered.iter().sum()
    }

    /// Returns true if every element in the input is covered, only false when a selection cap was hit
    pub fn is_complete(&self) -> bool {
        self.num_covered() == self.num_elements
    }
}

/// Core utility that solves weighted set cover with the greedy heuristic.
/// Sets are borrowed for the lifetime of the solver, and duplicate members within a set are only counted once.
#[derive(Debug)]
pub struct GreedySetCover<'a, T> {
    /// The unique members of each added set, in first-seen order
    sets: Vec<Vec<&'a T>>,
    /// The weight of each added set
    weights: Vec<f64>,
    /// The config for this solver
    config: SetCoverConfig
}

impl<'a, T> Default for GreedySetCover<'a, T> {
    fn default() -> Self {
        GreedySetCover {
            sets: vec![],
            weights: vec![],
            config: Default::default()
        }
    }
}

impl<'a, T> GreedySetCover<'a, T>
where
    T: Eq + Hash
{
    /// Creates a new instance of GreedySetCover.
    /// # Arguments
    /// * `config` - the solver configuration
    /// # Errors
    /// * if `max_selections` is set to 0
    pub fn with_config(config: SetCoverConfig) -> Result<GreedySetCover<'a, T>, SimpleError> {
        if config.max_selections == Some(0) {
            bail!("max_selections must be at least 1 if provided");
        }
        Ok(GreedySetCover {
            sets: vec![],
            weights: vec![],
            config
        })
    }

    /// Adds a new set and returns the index it was assigned.
    /// # Arguments
    /// * `members` - the elements in the set, duplicates are ignored
    /// * `weight` - the cost of selecting this set
    /// # Errors
    /// * if the weight is negative, NaN, or infinite
    /// * if the weight is 0.0 and the config does not allow zero weights
    pub fn add_set(&mut self, members: &'a [T], weight: f64) -> Result<usize, SimpleError> {
        let set_index = self.sets.len();
        if !weight.is_finite() {
            bail!("Set {set_index} has non-finite weight {weight}");
        }
        if weight < 0.0 {
            bail!("Set {set_index} has negative weight {weight}");
        }
        if weight == 0.0 && !self.config.allow_zero_weight {
            bail!("Set {set_index} has zero weight, which is disabled in the config");
        }

        // this also folds -0.0 into 0.0 so it does not sort ahead of other zeroes
        let weight = if weight == 0.0 { 0.0 } else { weight };
        self.sets.push(members.iter().unique().collect());
        self.weights.push(weight);
        Ok(set_index)
    }

    /// The core function that gets called after adding all the sets we care about.
    /// Ties in the weight per uncovered element are broken by the configured `TieBreak`.
    /// # Errors
    /// * None so far, invariant violations will panic
    pub fn solve(&self) -> Result<SetCoverSolution, SimpleError> {
        let num_sets = self.sets.len();

        // index each element back to the sets that contain it
        let mut element_sets: HashMap<&'a T, Vec<usize>> = Default::default();
        let mut remaining_size: Vec<usize> = Vec::with_capacity(num_sets);
        for (set_index, members) in self.sets.iter().enumerate() {
            remaining_size.push(members.len());
            for &element in members.iter() {
                element_sets.entry(element).or_default().push(set_index);
            }
        }
        let num_elements = element_sets.len();

        // empty sets never enter the queue
        let mut pqueue = MutablePriorityQueue::with_tie_break(num_sets, self.config.tie_break);
        for (set_index, (&size, &weight)) in remaining_size.iter().zip(self.weights.iter()).enumerate() {
            if size > 0 {
                pqueue.push(set_index, set_ratio(weight, size));
            }
        }
        debug!("Solving set cover with {num_sets} sets ({} non-empty) over {num_elements} elements", pqueue.len());

        let mut order: Vec<usize> = vec![];
        let mut newly_covered: Vec<usize> = vec![];
        let mut total_weight = 0.0;
        let mut assigned: HashSet<&'a T> = HashSet::with_capacity_and_hasher(num_elements, Default::default());
        let mut touched: Vec<usize> = vec![];
        let mut is_touched: Vec<bool> = vec![false; num_sets];

        while let Some(set_index) = pqueue.min_id() {
            if self.config.max_selections.map_or(false, |m| order.len() >= m) {
                debug!("Reached max_selections with {} sets still in the queue", pqueue.len());
                break;
            }

            // claim everything this set can, and track which sets lost an element
            let mut claimed = 0;
            for &element in self.sets[set_index].iter() {
                if assigned.insert(element) {
                    claimed += 1;
                    for &other in element_sets[&element].iter() {
                        assert!(remaining_size[other] > 0, "set {other} has no remaining elements to lose");
                        remaining_size[other] -= 1;
                        if !is_touched[other] {
                            is_touched[other] = true;
                            touched.push(other);
                        }
                    }
                }
            }
            assert!(claimed > 0, "set {set_index} was selected without covering anything new");
            debug_assert_eq!(remaining_size[set_index], 0);

            let key = pqueue.remove(set_index);
            trace!("Selected set {set_index} with ratio {key}, claimed {claimed}, touched [{}]", touched.iter().join(", "));
            order.push(set_index);
            newly_covered.push(claimed);
            total_weight += self.weights[set_index];

            // everything touched is either the selected set or still waiting in the queue
            for other in touched.drain(..) {
                is_touched[other] = false;
                if other == set_index {
                    continue;
                }

                if remaining_size[other] == 0 {
                    pqueue.remove(other);
                } else {
                    pqueue.increase_key(other, set_ratio(self.weights[other], remaining_size[other]));
                }
            }
        }

        let solution = SetCoverSolution::new(order, newly_covered, total_weight, num_elements);
        debug!("Selected {} sets covering {} / {} elements with total weight {}",
            solution.order().len(), solution.num_covered(), num_elements, solution.total_weight());
        Ok(solution)
    }

    /// Converts a selection order into a disjoint assignment of elements to the added sets.
    /// See `crate::assign::assign_in_order` for the semantics.
    /// # Arguments
    /// * `order` - set indices in the order they get to claim elements, typically `SetCoverSolution::order()`
    /// # Errors
    /// * if any index in `order` does not correspond to an added set
    pub fn assign_in_order(&self, order: &[usize]) -> Result<Vec<Vec<&'a T>>, SimpleError> {
        if let Some(&bad_index) = order.iter().find(|&&set_index| set_index >= self.sets.len()) {
            bail!("Order references set {bad_index}, but only {} sets were added", self.sets.len());
        }
        Ok(claim_in_order(&self.sets, order))
    }

    // Getters
    pub fn num_sets(&self) -> usize {
        self.sets.len()
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn config(&self) -> &SetCoverConfig {
        &self.config
    }
}

/// Weight per remaining element used as the queue key.
/// A positive weight never maps to 0.0, even if the division underflows, so zero-weight sets always go first.
fn set_ratio(weight: f64, remaining: usize) -> f64 {
    let ratio = weight / remaining as f64;
    if ratio == 0.0 && weight > 0.0 {
        // smallest positive subnormal
        f64::from_bits(1)
    } else {
        ratio
    }
}

/// Convenience wrapper that solves set cover on parallel slices of sets and weights, returning the selection order.
/// # Arguments
/// * `sets` - the input sets
/// * `weights` - the cost of each set, must be the same length as `sets`
/// # Errors
/// * if `sets` and `weights` have different lengths
/// * if any weight is rejected by `GreedySetCover::add_set(...)`
/// # Examples
/// ```rust
/// use greedy_cover::set_cover::greedy_set_cover;
/// let sets = [vec![1, 2, 3]];
/// assert_eq!(greedy_set_cover(&sets, &[3.0]).unwrap(), vec![0]);
/// assert!(greedy_set_cover(&sets, &[3.0, 1.0]).is_err());
/// ```
pub fn greedy_set_cover<S, T>(sets: &[S], weights: &[f64]) -> Result<Vec<usize>, SimpleError>
where
    S: AsRef<[T]>,
    T: Eq + Hash
{
    if sets.len() != weights.len() {
        bail!("Expected {} weights to match the sets, but got {}", sets.len(), weights.len());
    }

    let mut solver: GreedySetCover<T> = Default::default();
    for (set, &weight) in sets.iter().zip(weights.iter()) {
        solver.add_set(set.as_ref(), weight)?;
    }
    let solution = solver.solve()?;
    Ok(solution.order)
}

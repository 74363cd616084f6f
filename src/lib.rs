/*!
# greedy_cover
This library provides a weighted set cover solver based on the classic greedy approximation, along with the mutable priority queue that drives it.
A typical use is assigning reads or alignment fragments to a small, low cost collection of candidate clusters such that every read is covered.

Key benefits:
* Works on any element type that implements `Eq + Hash`
* Near O(E log N) runtime, where E is the total number of set memberships and N is the number of sets
* Deterministic output, with a configurable rule for tie-breaking equal ratios
* Utility for converting a selection order into a disjoint partition of the elements

# Example usage
```rust
use greedy_cover::set_cover::GreedySetCover;

let sets = [
    vec!["read_1", "read_2"],
    vec!["read_2", "read_3"]
];
let weights = [2.0, 1.0];

// add all the sets
let mut solver: GreedySetCover<&str> = Default::default();
for (s, &w) in sets.iter().zip(weights.iter()) {
    solver.add_set(s, w).unwrap();
}

// run the cover and check the results
let solution = solver.solve().unwrap();
assert_eq!(solution.order(), &[1, 0]);
assert!(solution.is_complete());

// each read is assigned to exactly one selected set
let partition = solver.assign_in_order(solution.order()).unwrap();
assert_eq!(partition[0], vec![&"read_1"]);
assert_eq!(partition[1], vec![&"read_2", &"read_3"]);
```
*/

/// Utility for deriving a disjoint partition from a selection order
pub mod assign;
/// Configuration for GreedySetCover
pub mod cover_config;
/// Utility for generating examples
pub mod example_gen;
/// Min priority queue over dense identifiers that supports arbitrary removal and key changes
pub mod mutable_pqueue;
/// Main functionality for the greedy weighted set cover
pub mod set_cover;

/*!
Converts a selection order into a disjoint partition of elements.
Each set, in the given order, claims every element that an earlier set in the order has not already claimed.

# Example usage
```rust
use greedy_cover::assign::assign_in_order;

let sets = [
    vec!['a', 'b'],
    vec!['b', 'c']
];
let partition = assign_in_order(&sets, &[1, 0]).unwrap();
assert_eq!(partition, vec![vec!['a'], vec!['b', 'c']]);
```
*/

use log::trace;
use rustc_hash::FxHashSet as HashSet;
use simple_error::{bail, SimpleError};
use std::hash::Hash;

/// Builds one output collection per input set such that every element reachable through `order` lands in exactly one of them.
/// Sets that are not in `order` get an empty collection, and a repeated index claims nothing the second time.
/// Elements keep the member order of the set that claimed them.
/// # Arguments
/// * `sets` - the input sets
/// * `order` - set indices in the order they get to claim elements
/// # Errors
/// * if any index in `order` is out of range for `sets`
pub fn assign_in_order<S, T>(sets: &[S], order: &[usize]) -> Result<Vec<Vec<T>>, SimpleError>
where
    S: AsRef<[T]>,
    T: Eq + Hash + Clone
{
    if let Some(&bad_index) = order.iter().find(|&&set_index| set_index >= sets.len()) {
        bail!("Order references set {bad_index}, but only {} sets were provided", sets.len());
    }

    let members: Vec<Vec<&T>> = sets.iter()
        .map(|s| s.as_ref().iter().collect())
        .collect();
    let claimed = claim_in_order(&members, order);
    Ok(claimed.into_iter()
        .map(|members| members.into_iter().cloned().collect())
        .collect())
}

/// Shared core for assignment that works on borrowed elements, indices must already be checked.
pub(crate) fn claim_in_order<'a, T>(sets: &[Vec<&'a T>], order: &[usize]) -> Vec<Vec<&'a T>>
where
    T: Eq + Hash
{
    let mut result: Vec<Vec<&'a T>> = vec![vec![]; sets.len()];
    let mut assigned: HashSet<&'a T> = Default::default();
    for &set_index in order.iter() {
        for &element in sets[set_index].iter() {
            if !assigned.contains(element) {
                result[set_index].push(element);
                let fresh = assigned.insert(element);
                assert!(fresh, "element claimed twice, last by set {set_index}");
            }
        }
        trace!("set {set_index} claimed {} elements", result[set_index].len());
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_set() {
        let sets = [vec!['a', 'b', 'c']];
        let partition = assign_in_order(&sets, &[0]).unwrap();
        assert_eq!(partition, vec![vec!['a', 'b', 'c']]);
    }

    #[test]
    fn test_order_matters() {
        let sets = [
            vec![1, 2, 3],
            vec![3, 4],
            vec![4, 5, 1]
        ];
        let forward = assign_in_order(&sets, &[0, 1, 2]).unwrap();
        assert_eq!(forward, vec![vec![1, 2, 3], vec![4], vec![5]]);

        let backward = assign_in_order(&sets, &[2, 1, 0]).unwrap();
        assert_eq!(backward, vec![vec![2], vec![3], vec![4, 5, 1]]);
    }

    #[test]
    fn test_unordered_and_repeated() {
        let sets = [
            vec!["x", "y"],
            vec!["y", "z"],
            vec!["w"]
        ];

        // set 2 is never mentioned, set 0 is mentioned twice
        let partition = assign_in_order(&sets, &[0, 0, 1]).unwrap();
        assert_eq!(partition, vec![vec!["x", "y"], vec!["z"], vec![]]);

        // nothing at all
        let empty = assign_in_order(&sets, &[]).unwrap();
        assert_eq!(empty, vec![Vec::<&str>::new(); 3]);
    }

    #[test]
    fn test_duplicate_members() {
        // a repeated member is only claimed once
        let sets = [vec![7, 7, 8]];
        let partition = assign_in_order(&sets, &[0]).unwrap();
        assert_eq!(partition, vec![vec![7, 8]]);
    }

    #[test]
    fn test_large_single_set() {
        let sets = [(0..60000).collect::<Vec<u32>>(), (30000..90000).collect::<Vec<u32>>()];
        let partition = assign_in_order(&sets, &[0, 1]).unwrap();
        assert_eq!(partition[0].len(), 60000);
        assert_eq!(partition[1], (60000..90000).collect::<Vec<u32>>());
    }

    #[test]
    fn test_out_of_range() {
        let sets = [vec![0u8]];
        let result = assign_in_order(&sets, &[0, 1]);
        assert!(result.is_err());
    }
}

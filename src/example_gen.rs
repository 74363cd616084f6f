use rand::distributions::Uniform;
use rand::{Rng, SeedableRng};

/// Identifier for one end of a sequenced fragment, a typical element for read-to-cluster covers.
/// This is an explicit pair of fields with derived equality and hashing instead of a bit-packed integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReadEndId {
    /// The fragment (read pair) identifier
    pub fragment_id: u32,
    /// Which end of the fragment, 0 or 1
    pub read_end: u8
}

impl ReadEndId {
    /// Constructor
    pub fn new(fragment_id: u32, read_end: u8) -> ReadEndId {
        assert!(read_end < 2);
        ReadEndId {
            fragment_id,
            read_end
        }
    }

    /// Maps a dense element index onto a fragment end, two ends per fragment
    pub fn from_index(index: usize) -> ReadEndId {
        ReadEndId::new((index / 2) as u32, (index % 2) as u8)
    }

    /// Inverse of `from_index`
    pub fn to_index(&self) -> usize {
        2 * self.fragment_id as usize + self.read_end as usize
    }

    /// Returns the identifier for the other end of the same fragment
    pub fn mate(&self) -> ReadEndId {
        ReadEndId::new(self.fragment_id, 1 - self.read_end)
    }
}

/// Creates a random weighted set cover instance we can verify is working.
/// Every element in `0..num_elements` is guaranteed to be in at least one set.
/// # Arguments
/// * `num_elements` - the number of distinct elements, mapped onto `ReadEndId`s
/// * `num_sets` - the number of sets to generate, must be > 0 if there are elements
/// * `set_size` - the number of random draws added to each set; each draw also adds its mate if the mate is in range, and draws can repeat
/// * `seed` - the seed for the random generator, the output is fixed for a given seed
pub fn generate_test(num_elements: usize, num_sets: usize, set_size: usize, seed: u64) -> (Vec<Vec<ReadEndId>>, Vec<f64>) {
    assert!(num_sets > 0 || num_elements == 0);

    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let weight_distribution = Uniform::new(1.0, 10.0);

    // seed every set with a round-robin element so nothing is left uncovered
    let mut sets: Vec<Vec<ReadEndId>> = vec![vec![]; num_sets];
    for element_index in 0..num_elements {
        sets[element_index % num_sets].push(ReadEndId::from_index(element_index));
    }

    if num_elements > 0 {
        let element_distribution = Uniform::new(0, num_elements);
        for set in sets.iter_mut() {
            for _i in 0..set_size {
                let read_end = ReadEndId::from_index(rng.sample(element_distribution));
                set.push(read_end);

                // both ends of a fragment tend to land in the same cluster
                let mate = read_end.mate();
                if mate.to_index() < num_elements {
                    set.push(mate);
                }
            }
        }
    }

    let weights: Vec<f64> = (0..num_sets)
        .map(|_i| rng.sample(weight_distribution))
        .collect();

    (sets, weights)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rustc_hash::FxHashSet as HashSet;

    #[test]
    fn test_read_end_id() {
        let r = ReadEndId::from_index(7);
        assert_eq!(r, ReadEndId::new(3, 1));
        assert_eq!(r.mate(), ReadEndId::new(3, 0));
        assert_eq!(r.mate().mate(), r);
        assert_eq!(r.to_index(), 7);
        assert_eq!(r.mate().to_index(), 6);
    }

    #[test]
    fn test_generate_covers_all() {
        let (sets, weights) = generate_test(50, 7, 5, 0);
        assert_eq!(sets.len(), 7);
        assert_eq!(weights.len(), 7);
        assert!(weights.iter().all(|&w| (1.0..10.0).contains(&w)));

        let union: HashSet<ReadEndId> = sets.iter().flatten().cloned().collect();
        assert_eq!(union.len(), 50);

        // every random draw brings its mate along, so each set holds whole fragments beyond the round-robin seed
        let (paired, _weights) = generate_test(10, 1, 3, 1);
        let members: HashSet<ReadEndId> = paired[0][10..].iter().cloned().collect();
        assert!(members.iter().all(|r| members.contains(&r.mate())));

        // odd element counts never produce an out of range mate
        let (odd, _weights) = generate_test(9, 2, 20, 3);
        assert!(odd.iter().flatten().all(|r| r.to_index() < 9));

        // same seed, same output
        assert_eq!(generate_test(50, 7, 5, 0), (sets, weights));
    }
}

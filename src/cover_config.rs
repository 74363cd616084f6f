/*!
Contains configuration information for the greedy set cover solver.
Typical usage is to the use the builder to construct the config, e.g.
```
use greedy_cover::cover_config::{SetCoverConfig, SetCoverConfigBuilder, TieBreak};
let config: SetCoverConfig = SetCoverConfigBuilder::default()
    .tie_break(TieBreak::HighestIndex)
    .max_selections(Some(10))
    .build()
    .unwrap();
```
*/

/// Enumeration of how equal keys are ordered in the priority queue.
/// Keys are compared with `f64::total_cmp`, so only truly identical ratios will reach the tie-break.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// The lowest set index is selected first
    #[default]
    LowestIndex,
    /// The highest set index is selected first
    HighestIndex
}

/**
Contains configuration information for the greedy set cover solver.
Typical usage is to the use the builder to construct the config, e.g.
```
use greedy_cover::cover_config::{SetCoverConfig, SetCoverConfigBuilder};
let config: SetCoverConfig = SetCoverConfigBuilder::default()
    .allow_zero_weight(false)
    .build()
    .unwrap();
```
*/
#[derive(derive_builder::Builder, Clone, Debug)]
#[builder(default)]
pub struct SetCoverConfig {
    /// Rule for choosing between sets with identical ratios
    pub tie_break: TieBreak,
    /// If false, a set weight of exactly 0.0 is rejected when the set is added
    pub allow_zero_weight: bool,
    /// Optional cap on the number of selected sets; if reached, the returned solution is partial
    pub max_selections: Option<usize>
}

impl Default for SetCoverConfig {
    fn default() -> Self {
        Self {
            // lowest index keeps outputs reproducible and matches input order
            tie_break: TieBreak::LowestIndex,
            // zero-cost sets are valid, they just always go first
            allow_zero_weight: true,
            // by default, we always run to full coverage
            max_selections: None
        }
    }
}

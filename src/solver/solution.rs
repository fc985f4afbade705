use super::score::Scorer;
use crate::layout::Layout;
use crate::Score;
use std::cmp::Ordering;

/// one member of the population: a layout, the inventory left over
/// after filling the free sites, its cached scores, and its age.
#[derive(Debug, Clone)]
pub struct Solution {
    layout: Layout,
    unused_probes: Vec<usize>,
    score: Score,
    tiebreaker: Score,
    age: u32,
}

impl Solution {
    pub fn new(layout: Layout, unused_probes: Vec<usize>, scorer: &Scorer) -> Self {
        let score = scorer.score(layout.resource_yield());
        let tiebreaker = scorer.tiebreak(layout.resource_yield());
        Self {
            layout,
            unused_probes,
            score,
            tiebreaker,
            age: 0,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn unused_probes(&self) -> &[usize] {
        &self.unused_probes
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn tiebreaker(&self) -> Score {
        self.tiebreaker
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub(crate) fn age_mut(&mut self) -> &mut u32 {
        &mut self.age
    }
}

impl PartialEq for Solution {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score && self.tiebreaker == other.tiebreaker
    }
}

/// ordering is partial on purpose: two distinct layouts with equal
/// scores (or a NaN score) compare as neither greater, which the
/// evolutionary loop reads as "no improvement".
impl PartialOrd for Solution {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.score.partial_cmp(&other.score) {
            Some(Ordering::Equal) => self.tiebreaker.partial_cmp(&other.tiebreaker),
            ordering => ordering,
        }
    }
}

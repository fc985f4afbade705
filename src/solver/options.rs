use super::score::Constraints;
use super::score::ScoreFunction;
use crate::layout::Placement;

/// everything the solver needs beyond the catalog itself. sites and
/// probes are referenced by catalog index; `probe_quantities` is the
/// inventory multiset indexed by probe id.
#[derive(Debug, Clone)]
pub struct Options {
    pub score_function: ScoreFunction,
    pub tiebreaker: Option<ScoreFunction>,
    pub constraints: Constraints,

    pub probe_quantities: Vec<u32>,
    pub locked_sites: Vec<usize>,
    pub seed: Vec<Placement>,
    pub force_seed: bool,

    pub iterations: u32,
    pub bonus_iterations: u32,
    pub population_size: u32,
    pub num_offspring: u32,
    pub mutation_rate: f64,
    pub max_age: u32,
    pub num_threads: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            score_function: ScoreFunction::MaxMining,
            tiebreaker: None,
            constraints: Constraints::default(),
            probe_quantities: Vec::new(),
            locked_sites: Vec::new(),
            seed: Vec::new(),
            force_seed: false,
            iterations: 1000,
            bonus_iterations: 0,
            population_size: 100,
            num_offspring: 200,
            mutation_rate: 0.04,
            max_age: 50,
            num_threads: num_cpus::get(),
        }
    }
}

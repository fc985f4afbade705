use super::error::SolverError;
use super::options::Options;
use super::score::Scorer;
use super::solution::Solution;
use crate::data::Catalog;
use crate::data::Kind;
use crate::layout::Layout;
use crate::layout::Placement;
use crate::Score;
use rand::distr::Bernoulli;
use rand::distr::Distribution;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::Rng;
use rand::SeedableRng;
use std::mem::discriminant;
use std::sync::Arc;

/// snapshot handed to the progress callback once per completed
/// iteration, on the calling thread, in iteration order.
#[derive(Debug)]
pub struct IterationStatus<'a> {
    pub iteration: u32,
    pub best_score: Score,
    pub num_killed: usize,
    pub last_improvement: u32,
    pub best_layout: &'a Layout,
}

/// age-based (µ,λ) evolutionary search over probe assignments.
/// construction validates the configuration and preprocesses the
/// inventory; `run` owns the whole population lifecycle.
pub struct Solver {
    catalog: Arc<Catalog>,
    options: Options,
    scorer: Scorer,
    merged_seed: Vec<Placement>,
    seeded: Vec<bool>,
    inventory: Vec<usize>,
}

impl Solver {
    pub fn new(catalog: Arc<Catalog>, options: Options) -> Result<Self, SolverError> {
        options.score_function.validate()?;
        if let Some(tiebreaker) = &options.tiebreaker {
            tiebreaker.validate()?;
            if discriminant(tiebreaker) == discriminant(&options.score_function) {
                return Err(SolverError::TiebreakerSameAsScore);
            }
        }
        if options.force_seed && options.seed.is_empty() {
            return Err(SolverError::ForceSeedWithoutSeed);
        }
        let merged_seed = Self::merge_locked_and_seed(&catalog, &options)?;
        let seeded = {
            let mut seeded = vec![false; catalog.sites().len()];
            for placement in &merged_seed {
                seeded[placement.site] = true;
            }
            seeded
        };
        let inventory = Self::corrected_inventory(&catalog, &options, merged_seed.len())?;
        let scorer = Scorer {
            function: options.score_function,
            tiebreaker: options.tiebreaker,
            constraints: options.constraints.clone(),
        };
        Ok(Self {
            catalog,
            options,
            scorer,
            merged_seed,
            seeded,
            inventory,
        })
    }

    /// locked sites become placements of the locked probe, merged with
    /// the seed in site order; any site claimed twice is a conflict.
    fn merge_locked_and_seed(
        catalog: &Catalog,
        options: &Options,
    ) -> Result<Vec<Placement>, SolverError> {
        let locked = catalog
            .locked_probe()
            .expect("catalog carries a locked probe");
        let mut merged = options
            .locked_sites
            .iter()
            .map(|&site| Placement::new(site, locked))
            .chain(options.seed.iter().copied())
            .collect::<Vec<_>>();
        merged.sort_by_key(|placement| placement.site);
        match merged.windows(2).find(|pair| pair[0].site == pair[1].site) {
            Some(pair) => Err(SolverError::SeedConflict {
                site_id: catalog.site(pair[0].site).id,
            }),
            None => Ok(merged),
        }
    }

    /// subtract seeded non-basic probes from the inventory, then pad
    /// the basic slot until the free sites can all be filled.
    fn corrected_inventory(
        catalog: &Catalog,
        options: &Options,
        num_seeded: usize,
    ) -> Result<Vec<usize>, SolverError> {
        let mut quantities = options.probe_quantities.clone();
        quantities.resize(catalog.probes().len(), 0);
        for placement in &options.seed {
            let probe = catalog.probe(placement.probe);
            if matches!(probe.kind, Kind::None | Kind::Basic) {
                continue;
            }
            if quantities[placement.probe] == 0 {
                return Err(SolverError::InventoryInsufficient {
                    probe_code: probe.code.to_string(),
                    required: options
                        .seed
                        .iter()
                        .filter(|p| p.probe == placement.probe)
                        .count() as u32,
                });
            }
            quantities[placement.probe] -= 1;
        }
        let free = catalog.sites().len() - num_seeded;
        let held = quantities.iter().sum::<u32>() as usize;
        if held < free {
            let basic = catalog.basic_probe().expect("catalog carries a basic probe");
            quantities[basic] += (free - held) as u32;
        }
        Ok(quantities
            .iter()
            .enumerate()
            .flat_map(|(probe, &quantity)| std::iter::repeat_n(probe, quantity as usize))
            .collect())
    }

    /// run the evolutionary loop to completion. the progress callback
    /// fires exactly once per iteration from the calling thread and
    /// must not panic; the stop predicate is polled between
    /// iterations, and the iteration in flight always completes.
    pub fn run(
        &self,
        mut progress: impl FnMut(IterationStatus),
        stop: impl Fn() -> bool,
    ) -> Solution {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.options.num_threads)
            .build()
            .expect("construct worker pool");
        let mut rng = SmallRng::from_os_rng();
        let mut population = (0..self.options.population_size)
            .map(|_| self.random_solution(&mut rng))
            .collect::<Vec<_>>();
        // overtaken by the end of the first iteration, so any member works
        let mut best = population[0].clone();
        let mut last_improvement = 0;
        let mut iteration = 0;
        log::info!(
            "evolving {} solutions with {} offspring across {} threads",
            self.options.population_size,
            self.options.num_offspring,
            self.options.num_threads,
        );
        loop {
            iteration += 1;
            let slice = population.len().div_ceil(self.options.num_threads.max(1));
            let slices = partition(population, slice);
            let results = pool.install(|| {
                use rayon::iter::IntoParallelIterator;
                use rayon::iter::ParallelIterator;
                slices
                    .into_par_iter()
                    .map(|parents| self.evolve(parents, &best))
                    .collect::<Vec<_>>()
            });
            let mut num_killed = 0;
            population = Vec::with_capacity(self.options.population_size as usize);
            for (survivors, killed) in results {
                population.extend(survivors);
                num_killed += killed;
            }
            for solution in &population {
                if solution > &best {
                    best = solution.clone();
                    last_improvement = iteration;
                }
            }
            log::debug!(
                "iteration {:<6} best {:<12} killed {:<4} stale {}",
                iteration,
                best.score(),
                num_killed,
                iteration - last_improvement,
            );
            progress(IterationStatus {
                iteration,
                best_score: best.score(),
                num_killed,
                last_improvement,
                best_layout: best.layout(),
            });
            if stop()
                || (iteration >= self.options.iterations
                    && iteration - last_improvement >= self.options.bonus_iterations)
            {
                return best;
            }
        }
    }

    /// advance one contiguous slice of the population, worker-locally
    fn evolve(&self, parents: Vec<Solution>, best: &Solution) -> (Vec<Solution>, usize) {
        let mut rng = SmallRng::from_os_rng();
        let mut survivors = Vec::with_capacity(parents.len());
        let mut killed = 0;
        for parent in parents {
            let (survivor, was_killed) = self.step(parent, best, &mut rng);
            survivors.push(survivor);
            killed += usize::from(was_killed);
        }
        (survivors, killed)
    }

    /// λ offspring by mutation, best-of selection against the parent,
    /// then the age rules: constraint failures age fast, stale
    /// non-best solutions age slowly, and anything reaching max age is
    /// replaced by a fresh random solution.
    fn step(&self, parent: Solution, best: &Solution, rng: &mut SmallRng) -> (Solution, bool) {
        let mut best_child = self.mutate(&parent, rng);
        for _ in 1..self.options.num_offspring {
            let child = self.mutate(&parent, rng);
            if child > best_child {
                best_child = child;
            }
        }
        let improved = best_child > parent;
        let mut carried = if improved { best_child } else { parent };
        if carried.score() == 0.0 {
            *carried.age_mut() += crate::CONSTRAINT_AGE_PENALTY;
        } else if !improved && &carried < best {
            *carried.age_mut() += 1;
        }
        if carried.age() >= self.options.max_age {
            (self.random_solution(rng), true)
        } else {
            (carried, false)
        }
    }

    /// shuffle the inventory and deal it across the free sites in site
    /// order; seeded sites take their seeded probe, leftovers are held
    /// out as unused.
    fn random_solution(&self, rng: &mut SmallRng) -> Solution {
        let mut pool = self.inventory.clone();
        pool.shuffle(rng);
        let mut placements = Vec::with_capacity(self.catalog.sites().len());
        let mut next_probe = 0;
        let mut next_seed = 0;
        for site in 0..self.catalog.sites().len() {
            if self.seeded[site] {
                placements.push(self.merged_seed[next_seed]);
                next_seed += 1;
            } else {
                placements.push(Placement::new(site, pool[next_probe]));
                next_probe += 1;
            }
        }
        let unused = pool.split_off(next_probe);
        Solution::new(
            Layout::from_placements(&self.catalog, placements),
            unused,
            &self.scorer,
        )
    }

    /// per-index Bernoulli swap over the flat space of placements plus
    /// unused probes. pinned indices (locked sites, and seeded sites
    /// under force_seed) never move; swapping two identical probes is
    /// a no-op and skipped. only an actual swap pays for re-resolution.
    fn mutate(&self, parent: &Solution, rng: &mut SmallRng) -> Solution {
        let coin = Bernoulli::new(self.options.mutation_rate).expect("mutation rate in [0, 1]");
        let mut placements = parent.layout().placements().to_vec();
        let mut unused = parent.unused_probes().to_vec();
        let sites = placements.len();
        let total = sites + unused.len();
        let mut mutated = false;
        for i in 0..total {
            if self.pinned(i, &placements) {
                continue;
            }
            if !coin.sample(rng) {
                continue;
            }
            let j = rng.random_range(0..total);
            if self.pinned(j, &placements) {
                continue;
            }
            let probe_i = if i < sites { placements[i].probe } else { unused[i - sites] };
            let probe_j = if j < sites { placements[j].probe } else { unused[j - sites] };
            if probe_i == probe_j {
                continue;
            }
            match i < sites {
                true => placements[i].probe = probe_j,
                false => unused[i - sites] = probe_j,
            }
            match j < sites {
                true => placements[j].probe = probe_i,
                false => unused[j - sites] = probe_i,
            }
            mutated = true;
        }
        if mutated {
            Solution::new(
                Layout::from_placements(&self.catalog, placements),
                unused,
                &self.scorer,
            )
        } else {
            parent.clone()
        }
    }

    fn pinned(&self, index: usize, placements: &[Placement]) -> bool {
        index < placements.len()
            && self.seeded[index]
            && (self.options.force_seed
                || self.catalog.probe(placements[index].probe).kind == Kind::None)
    }
}

/// contiguous slices of at most `size` members, preserving order
fn partition(mut population: Vec<Solution>, size: usize) -> Vec<Vec<Solution>> {
    let mut slices = Vec::with_capacity(population.len().div_ceil(size.max(1)));
    while population.len() > size {
        let tail = population.split_off(size);
        slices.push(population);
        population = tail;
    }
    slices.push(population);
    slices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::catalog::fixtures::line3;
    use crate::data::Resource;
    use crate::solver::score::Constraints;
    use crate::solver::score::ScoreFunction;

    fn quantities(catalog: &Catalog, counts: &[(&str, u32)]) -> Vec<u32> {
        let mut quantities = vec![0; catalog.probes().len()];
        for (code, count) in counts {
            quantities[catalog.probe_index_of(code).unwrap()] = *count;
        }
        quantities
    }

    fn fixture_options(catalog: &Catalog) -> Options {
        Options {
            probe_quantities: quantities(catalog, &[("M1", 3)]),
            iterations: 10,
            population_size: 4,
            num_offspring: 8,
            mutation_rate: 0.2,
            max_age: 10,
            num_threads: 2,
            ..Options::default()
        }
    }

    #[test]
    fn rejects_duplicate_tiebreaker() {
        let catalog = Arc::new(line3());
        let options = Options {
            score_function: ScoreFunction::MaxMining,
            tiebreaker: Some(ScoreFunction::MaxMining),
            ..fixture_options(&catalog)
        };
        assert_eq!(
            Solver::new(catalog, options).err(),
            Some(SolverError::TiebreakerSameAsScore)
        );
    }

    #[test]
    fn rejects_force_seed_without_seed() {
        let catalog = Arc::new(line3());
        let options = Options {
            force_seed: true,
            ..fixture_options(&catalog)
        };
        assert_eq!(
            Solver::new(catalog, options).err(),
            Some(SolverError::ForceSeedWithoutSeed)
        );
    }

    #[test]
    fn rejects_seed_on_locked_site() {
        let catalog = Arc::new(line3());
        let mining = catalog.probe_index_of("M1").unwrap();
        let options = Options {
            locked_sites: vec![1],
            seed: vec![Placement::new(1, mining)],
            ..fixture_options(&catalog)
        };
        assert_eq!(
            Solver::new(catalog, options).err(),
            Some(SolverError::SeedConflict { site_id: 2 })
        );
    }

    #[test]
    fn rejects_seed_exceeding_inventory() {
        let catalog = Arc::new(line3());
        let mining = catalog.probe_index_of("M1").unwrap();
        let options = Options {
            probe_quantities: quantities(&catalog, &[("M1", 1)]),
            seed: vec![Placement::new(0, mining), Placement::new(1, mining)],
            ..fixture_options(&catalog)
        };
        assert_eq!(
            Solver::new(catalog, options).err(),
            Some(SolverError::InventoryInsufficient {
                probe_code: "M1".to_string(),
                required: 2,
            })
        );
    }

    #[test]
    fn invalid_score_arguments_are_rejected() {
        let catalog = Arc::new(line3());
        let options = Options {
            score_function: ScoreFunction::Weights {
                mining: -1.0,
                revenue: 0.0,
                storage: 0.0,
            },
            ..fixture_options(&catalog)
        };
        assert_eq!(
            Solver::new(catalog, options).err(),
            Some(SolverError::InvalidScoreFunctionArgument)
        );
    }

    #[test]
    fn inventory_pads_with_basics() {
        let catalog = Arc::new(line3());
        let solver = Solver::new(catalog.clone(), fixture_options(&catalog)).unwrap();
        // three mining probes already cover the three free sites
        assert_eq!(solver.inventory.len(), 3);
        let solver = Solver::new(
            catalog.clone(),
            Options {
                probe_quantities: quantities(&catalog, &[("M1", 1)]),
                ..fixture_options(&catalog)
            },
        )
        .unwrap();
        let basic = catalog.basic_probe().unwrap();
        assert_eq!(solver.inventory.len(), 3);
        assert_eq!(
            solver.inventory.iter().filter(|&&p| p == basic).count(),
            2
        );
    }

    #[test]
    fn seed_consumes_inventory() {
        let catalog = Arc::new(line3());
        let mining = catalog.probe_index_of("M1").unwrap();
        let solver = Solver::new(
            catalog.clone(),
            Options {
                probe_quantities: quantities(&catalog, &[("M1", 2)]),
                seed: vec![Placement::new(1, mining)],
                ..fixture_options(&catalog)
            },
        )
        .unwrap();
        // one of the two mining probes is spoken for by the seed, and
        // only two sites remain free
        assert_eq!(
            solver.inventory.iter().filter(|&&p| p == mining).count(),
            1
        );
        assert_eq!(solver.inventory.len(), 2);
    }

    #[test]
    fn zero_mutation_rate_reproduces_the_parent() {
        let catalog = Arc::new(line3());
        let solver = Solver::new(
            catalog.clone(),
            Options {
                mutation_rate: 0.0,
                ..fixture_options(&catalog)
            },
        )
        .unwrap();
        let mut rng = SmallRng::seed_from_u64(7);
        let parent = solver.random_solution(&mut rng);
        let child = solver.mutate(&parent, &mut rng);
        assert_eq!(child.score(), parent.score());
        assert_eq!(child.layout().placements(), parent.layout().placements());
        assert_eq!(child.unused_probes(), parent.unused_probes());
    }

    #[test]
    fn mutation_preserves_the_probe_multiset() {
        let catalog = Arc::new(line3());
        let solver = Solver::new(
            catalog.clone(),
            Options {
                mutation_rate: 0.9,
                probe_quantities: quantities(&catalog, &[("M1", 2), ("B1", 2)]),
                ..fixture_options(&catalog)
            },
        )
        .unwrap();
        let mut rng = SmallRng::seed_from_u64(11);
        let parent = solver.random_solution(&mut rng);
        let multiset = |solution: &Solution| {
            let mut probes = solution
                .layout()
                .placements()
                .iter()
                .map(|p| p.probe)
                .chain(solution.unused_probes().iter().copied())
                .collect::<Vec<_>>();
            probes.sort();
            probes
        };
        for _ in 0..64 {
            let child = solver.mutate(&parent, &mut rng);
            assert_eq!(multiset(&child), multiset(&parent));
        }
    }

    #[test]
    fn unsatisfiable_constraints_age_out_quickly() {
        let catalog = Arc::new(line3());
        // the fixture sites carry no precious resources at all
        let mut constraints = Constraints::default();
        constraints.resource_minimums[Resource::Bonjelium as usize] = 1;
        let options = Options {
            constraints,
            iterations: 2,
            max_age: 10,
            ..fixture_options(&catalog)
        };
        let solver = Solver::new(catalog, options).unwrap();
        let mut kills = Vec::new();
        let best = solver.run(|status| kills.push(status.num_killed), || false);
        assert_eq!(best.score(), 0.0);
        // every slot ages by five per iteration, so the whole
        // population dies on the second
        assert_eq!(kills, vec![0, 4]);
    }

    #[test]
    fn progress_fires_once_per_iteration() {
        let catalog = Arc::new(line3());
        let options = Options {
            iterations: 1,
            bonus_iterations: 0,
            ..fixture_options(&catalog)
        };
        let solver = Solver::new(catalog, options).unwrap();
        let mut iterations = Vec::new();
        solver.run(|status| iterations.push(status.iteration), || false);
        assert_eq!(iterations, vec![1]);
    }

    #[test]
    fn stop_predicate_finishes_the_iteration_in_flight() {
        let catalog = Arc::new(line3());
        let options = Options {
            iterations: 1000,
            ..fixture_options(&catalog)
        };
        let solver = Solver::new(catalog, options).unwrap();
        let mut count = 0;
        solver.run(|_| count += 1, || true);
        assert_eq!(count, 1);
    }

    #[test]
    fn locked_sites_never_move() {
        let catalog = Arc::new(line3());
        let locked = catalog.locked_probe().unwrap();
        let options = Options {
            locked_sites: vec![0],
            iterations: 5,
            mutation_rate: 0.5,
            ..fixture_options(&catalog)
        };
        let solver = Solver::new(catalog, options).unwrap();
        let best = solver.run(
            |status| assert_eq!(status.best_layout.placements()[0].probe, locked),
            || false,
        );
        assert_eq!(best.layout().placements()[0].probe, locked);
    }

    #[test]
    fn forced_seed_is_retained() {
        let catalog = Arc::new(line3());
        let storage = catalog.probe_index_of("S").unwrap();
        let options = Options {
            probe_quantities: quantities(&catalog, &[("M1", 2), ("S", 1)]),
            seed: vec![Placement::new(1, storage)],
            force_seed: true,
            iterations: 5,
            mutation_rate: 0.5,
            ..fixture_options(&catalog)
        };
        let solver = Solver::new(catalog, options).unwrap();
        let best = solver.run(|_| (), || false);
        assert_eq!(best.layout().placements()[1].probe, storage);
    }
}

use fnsolver::data::Catalog;
use fnsolver::data::Kind;
use fnsolver::data::Probe;
use fnsolver::data::SiteDef;
use fnsolver::layout::Placement;
use fnsolver::solver::Options;
use fnsolver::solver::ScoreFunction;
use fnsolver::solver::Solver;
use std::sync::Arc;

/// three sites in a line, production 500, revenue 1000, no territories
/// or precious resources
fn line3() -> Catalog {
    let defs = [(1, vec![2]), (2, vec![1, 3]), (3, vec![2])]
        .into_iter()
        .map(|(id, neighbor_ids)| SiteDef {
            id,
            production: 500,
            revenue: 1000,
            territories: 0,
            neighbor_ids,
            resources: vec![],
        })
        .collect();
    let probes = vec![
        Probe::new(0, 0, 0, 0, 0, Kind::None, 0, "X", "Locked"),
        Probe::new(1, 50, 50, 0, 0, Kind::Basic, 0, "-", "Basic"),
        Probe::new(2, 100, 30, 0, 0, Kind::Mining, 1, "M1", "Mining G1"),
        Probe::new(3, 10, 10, 50, 0, Kind::Booster, 1, "B1", "Booster G1"),
        Probe::new(4, 0, 0, 0, 0, Kind::Duplicator, 0, "D", "Duplicator"),
        Probe::new(5, 10, 10, 0, 3000, Kind::Storage, 0, "S", "Storage"),
    ];
    Catalog::new(defs, probes, 2)
}

fn quantities(catalog: &Catalog, counts: &[(&str, u32)]) -> Vec<u32> {
    let mut quantities = vec![0; catalog.probes().len()];
    for (code, count) in counts {
        quantities[catalog.probe_index_of(code).unwrap()] = *count;
    }
    quantities
}

#[test]
fn finds_the_full_mining_chain() {
    let catalog = Arc::new(line3());
    let options = Options {
        score_function: ScoreFunction::MaxMining,
        probe_quantities: quantities(&catalog, &[("M1", 3)]),
        iterations: 50,
        population_size: 4,
        num_offspring: 8,
        mutation_rate: 0.2,
        max_age: 10,
        num_threads: 2,
        ..Options::default()
    };
    let solver = Solver::new(catalog, options).unwrap();
    let best = solver.run(|_| (), || false);
    // the all-mining chain scores 1950 and is reachable
    assert!(best.score() >= 1950.0);
}

#[test]
fn best_score_is_monotonic() {
    let catalog = Arc::new(line3());
    let options = Options {
        score_function: ScoreFunction::MaxMining,
        probe_quantities: quantities(&catalog, &[("M1", 1), ("B1", 1), ("S", 1)]),
        iterations: 20,
        population_size: 6,
        num_offspring: 4,
        mutation_rate: 0.3,
        max_age: 5,
        num_threads: 3,
        ..Options::default()
    };
    let solver = Solver::new(catalog, options).unwrap();
    let mut scores = Vec::new();
    solver.run(|status| scores.push(status.best_score), || false);
    assert_eq!(scores.len(), 20);
    assert!(scores.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn layouts_keep_one_placement_per_site_in_order() {
    let catalog = Arc::new(line3());
    let options = Options {
        probe_quantities: quantities(&catalog, &[("M1", 2), ("B1", 1)]),
        iterations: 10,
        population_size: 4,
        num_offspring: 4,
        mutation_rate: 0.5,
        max_age: 5,
        num_threads: 2,
        ..Options::default()
    };
    let solver = Solver::new(catalog.clone(), options).unwrap();
    let best = solver.run(
        |status| {
            assert_eq!(status.best_layout.placements().len(), catalog.sites().len());
            for (site, placement) in status.best_layout.placements().iter().enumerate() {
                assert_eq!(placement.site, site);
            }
        },
        || false,
    );
    assert_eq!(best.layout().placements().len(), catalog.sites().len());
}

#[test]
fn inventory_multiset_is_conserved() {
    let catalog = Arc::new(line3());
    let mining = catalog.probe_index_of("M1").unwrap();
    let booster = catalog.probe_index_of("B1").unwrap();
    let storage = catalog.probe_index_of("S").unwrap();
    let options = Options {
        // five probes for three sites: two stay unused at all times
        probe_quantities: quantities(&catalog, &[("M1", 3), ("B1", 1), ("S", 1)]),
        iterations: 15,
        population_size: 4,
        num_offspring: 6,
        mutation_rate: 0.4,
        max_age: 5,
        num_threads: 2,
        ..Options::default()
    };
    let solver = Solver::new(catalog, options).unwrap();
    let best = solver.run(|_| (), || false);
    let mut probes = best
        .layout()
        .placements()
        .iter()
        .map(|p| p.probe)
        .chain(best.unused_probes().iter().copied())
        .collect::<Vec<_>>();
    probes.sort();
    let mut expected = vec![mining, mining, mining, booster, storage];
    expected.sort();
    assert_eq!(probes, expected);
    assert_eq!(best.unused_probes().len(), 2);
}

#[test]
fn stops_without_bonus_iterations() {
    let catalog = Arc::new(line3());
    let options = Options {
        probe_quantities: quantities(&catalog, &[("M1", 3)]),
        iterations: 5,
        bonus_iterations: 0,
        population_size: 2,
        num_offspring: 2,
        mutation_rate: 0.1,
        max_age: 10,
        num_threads: 1,
        ..Options::default()
    };
    let solver = Solver::new(catalog, options).unwrap();
    let mut events = 0;
    solver.run(|_| events += 1, || false);
    assert_eq!(events, 5);
}

#[test]
fn bonus_iterations_extend_stale_runs() {
    let catalog = Arc::new(line3());
    // a single-probe inventory admits exactly one layout, so no
    // iteration ever improves on the initial best
    let options = Options {
        probe_quantities: quantities(&catalog, &[("M1", 3)]),
        iterations: 1,
        bonus_iterations: 3,
        population_size: 2,
        num_offspring: 2,
        mutation_rate: 0.1,
        max_age: 10,
        num_threads: 1,
        ..Options::default()
    };
    let solver = Solver::new(catalog, options).unwrap();
    let mut events = 0;
    solver.run(|_| events += 1, || false);
    assert_eq!(events, 3);
}

#[test]
fn solves_the_standard_catalog() {
    let catalog = Arc::new(Catalog::standard());
    let options = Options {
        score_function: ScoreFunction::MaxMining,
        tiebreaker: Some(ScoreFunction::MaxStorage),
        probe_quantities: quantities(
            &catalog,
            &[("M1", 10), ("M2", 5), ("R1", 5), ("B1", 2), ("S", 2)],
        ),
        iterations: 5,
        population_size: 8,
        num_offspring: 6,
        mutation_rate: 0.05,
        max_age: 10,
        num_threads: 4,
        ..Options::default()
    };
    let solver = Solver::new(catalog.clone(), options).unwrap();
    let best = solver.run(|_| (), || false);
    assert!(best.score() > 0.0);
    assert_eq!(best.layout().placements().len(), 104);
    // padded basics plus the configured probes fill every site
    assert!(best.unused_probes().is_empty());
    assert!(best.layout().total_storage() >= 6000);
}

#[test]
fn seeded_sites_survive_a_standard_run() {
    let catalog = Arc::new(Catalog::standard());
    let duplicator = catalog.probe_index_of("D").unwrap();
    let site = catalog.site_index_of(315).unwrap();
    let options = Options {
        probe_quantities: quantities(&catalog, &[("M1", 6), ("D", 1)]),
        seed: vec![Placement::new(site, duplicator)],
        force_seed: true,
        iterations: 3,
        population_size: 4,
        num_offspring: 4,
        mutation_rate: 0.2,
        max_age: 10,
        num_threads: 2,
        ..Options::default()
    };
    let solver = Solver::new(catalog, options).unwrap();
    let best = solver.run(
        |status| assert_eq!(status.best_layout.placements()[site].probe, duplicator),
        || false,
    );
    assert_eq!(best.layout().placements()[site].probe, duplicator);
}

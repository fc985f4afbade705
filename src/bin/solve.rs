//! Solve Binary
//!
//! Runs the evolutionary solver over the standard FrontierNav catalog
//! and prints the best layout found.

use clap::Parser;
use colored::Colorize;
use fnsolver::data::Catalog;
use fnsolver::data::Resource;
use fnsolver::layout::Placement;
use fnsolver::solver::Constraints;
use fnsolver::solver::Options;
use fnsolver::solver::ScoreFunction;
use fnsolver::solver::Solver;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "solve",
    about = "Generates tailored solutions to FrontierNav probe layouts"
)]
struct Args {
    /// score function: max_mining, max_revenue, max_storage,
    /// max_effective_mining:F, ratio:M,R,S or weights:M,R,S
    #[arg(long, default_value = "max_mining")]
    score: String,

    /// tiebreaker: max_mining, max_revenue or max_storage
    #[arg(long)]
    tiebreaker: Option<String>,

    /// inventory entry as CODE:COUNT, repeatable (e.g. M1:8)
    #[arg(long = "probe", value_name = "CODE:COUNT")]
    probes: Vec<String>,

    /// seeded placement as SITE:CODE, repeatable (e.g. 315:D)
    #[arg(long = "seed", value_name = "SITE:CODE")]
    seed: Vec<String>,

    /// locked (undiscovered) site, repeatable
    #[arg(long = "lock", value_name = "SITE")]
    locked: Vec<u32>,

    /// never swap seeded placements away
    #[arg(long)]
    force_seed: bool,

    /// unexplored territories found, as SITE:COUNT
    #[arg(long = "territories", value_name = "SITE:COUNT")]
    territories: Vec<String>,

    /// precious resource minimum as NAME:QUANTITY in deci-percent
    #[arg(long = "min-resource", value_name = "NAME:QUANTITY")]
    resource_minimums: Vec<String>,

    /// minimum Mining yield
    #[arg(long, default_value_t = 0)]
    min_mining: u32,

    /// minimum Revenue yield
    #[arg(long, default_value_t = 0)]
    min_revenue: u32,

    /// minimum Storage yield
    #[arg(long, default_value_t = 0)]
    min_storage: u32,

    /// iterations to run
    #[arg(short, long, default_value_t = 1000)]
    iterations: u32,

    /// keep running while an improvement happened this recently
    #[arg(long, default_value_t = 0)]
    bonus_iterations: u32,

    /// population size
    #[arg(short, long, default_value_t = 100)]
    population: u32,

    /// offspring per solution per iteration
    #[arg(short, long, default_value_t = 200)]
    offspring: u32,

    /// per-placement mutation probability
    #[arg(short, long, default_value_t = 0.04)]
    mutation_rate: f64,

    /// iterations without improvement before a solution is replaced
    #[arg(short = 'a', long, default_value_t = 50)]
    max_age: u32,

    /// worker threads (defaults to the number of logical processors)
    #[arg(short, long)]
    threads: Option<usize>,
}

fn main() {
    fnsolver::init();
    let args = Args::parse();
    if let Err(reason) = run(args) {
        log::error!("{}", reason);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), String> {
    let mut catalog = Catalog::standard();
    for (site, count) in pairs::<u32, u32>(&args.territories, "--territories")? {
        catalog.override_territories(site, count);
    }
    let catalog = Arc::new(catalog);

    let mut probe_quantities = vec![0; catalog.probes().len()];
    for (code, count) in pairs::<String, u32>(&args.probes, "--probe")? {
        let probe = catalog
            .probe_index_of(&code)
            .ok_or(format!("--probe: unknown probe \"{}\"", code))?;
        probe_quantities[probe] += count;
    }

    let mut seed = Vec::new();
    for (site_id, code) in pairs::<u32, String>(&args.seed, "--seed")? {
        let site = catalog
            .site_index_of(site_id)
            .ok_or(format!("--seed: unknown site {}", site_id))?;
        let probe = catalog
            .probe_index_of(&code)
            .ok_or(format!("--seed: unknown probe \"{}\"", code))?;
        seed.push(Placement::new(site, probe));
    }

    let mut locked_sites = Vec::new();
    for site_id in &args.locked {
        locked_sites.push(
            catalog
                .site_index_of(*site_id)
                .ok_or(format!("--lock: unknown site {}", site_id))?,
        );
    }

    let mut constraints = Constraints {
        production_minimum: args.min_mining,
        revenue_minimum: args.min_revenue,
        storage_minimum: args.min_storage,
        ..Constraints::default()
    };
    for (name, quantity) in pairs::<String, u32>(&args.resource_minimums, "--min-resource")? {
        let resource = name.parse::<Resource>().map_err(|e| format!("--min-resource: {}", e))?;
        constraints.resource_minimums[resource as usize] = quantity;
    }

    let options = Options {
        score_function: score_function(&args.score)?,
        tiebreaker: args.tiebreaker.as_deref().map(tiebreaker).transpose()?,
        constraints,
        probe_quantities,
        locked_sites,
        seed,
        force_seed: args.force_seed,
        iterations: args.iterations,
        bonus_iterations: args.bonus_iterations,
        population_size: args.population,
        num_offspring: args.offspring,
        mutation_rate: args.mutation_rate,
        max_age: args.max_age,
        num_threads: args.threads.unwrap_or_else(num_cpus::get),
    };
    log::info!("objective {}", options.score_function);
    let solver = Solver::new(catalog.clone(), options).map_err(|e| e.to_string())?;

    let bar = fnsolver::progress(args.iterations as usize);
    let solution = solver.run(
        |status| bar.set_position(status.iteration as u64),
        || false,
    );
    bar.finish_and_clear();

    println!();
    println!("{}", "Best layout".bold());
    println!(
        "  {} {}",
        "Mining:".bold(),
        solution.layout().total_mining().to_string().green()
    );
    println!(
        "  {} {}",
        "Revenue:".bold(),
        solution.layout().total_revenue().to_string().green()
    );
    println!(
        "  {} {}",
        "Storage:".bold(),
        solution.layout().total_storage().to_string().green()
    );
    for resource in Resource::all() {
        let quantity = solution.layout().resource_yield().resources[*resource as usize];
        if quantity > 0 {
            println!("  {}: {:.2}", resource, quantity as f64 / 100.0);
        }
    }
    println!();
    for placement in solution.layout().placements() {
        let site = catalog.site(placement.site);
        let probe = catalog.probe(placement.probe);
        println!("  {} {}", site.id, probe.code);
    }
    Ok(())
}

/// split "A:B" option values into typed pairs
fn pairs<A, B>(values: &[String], flag: &str) -> Result<Vec<(A, B)>, String>
where
    A: std::str::FromStr,
    B: std::str::FromStr,
{
    values
        .iter()
        .map(|value| {
            let (a, b) = value
                .split_once(':')
                .ok_or(format!("{}: expected \"{}\" to look like A:B", flag, value))?;
            let a = a
                .parse::<A>()
                .map_err(|_| format!("{}: cannot parse \"{}\"", flag, a))?;
            let b = b
                .parse::<B>()
                .map_err(|_| format!("{}: cannot parse \"{}\"", flag, b))?;
            Ok((a, b))
        })
        .collect()
}

fn score_function(expr: &str) -> Result<ScoreFunction, String> {
    let (name, args) = match expr.split_once(':') {
        Some((name, args)) => (name, args),
        None => (expr, ""),
    };
    let args = args
        .split(',')
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .map_err(|_| format!("--score: cannot parse argument \"{}\"", s))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let wrong_arity = |n: usize| format!("--score: {} takes {} arguments", name, n);
    match name {
        "max_mining" => Ok(ScoreFunction::max_mining()),
        "max_revenue" => Ok(ScoreFunction::max_revenue()),
        "max_storage" => Ok(ScoreFunction::max_storage()),
        "max_effective_mining" => match args.as_slice() {
            [factor] => ScoreFunction::max_effective_mining(*factor).map_err(|e| e.to_string()),
            _ => Err(wrong_arity(1)),
        },
        "ratio" => match args.as_slice() {
            [m, r, s] => ScoreFunction::ratio(*m, *r, *s).map_err(|e| e.to_string()),
            _ => Err(wrong_arity(3)),
        },
        "weights" => match args.as_slice() {
            [m, r, s] => ScoreFunction::weights(*m, *r, *s).map_err(|e| e.to_string()),
            _ => Err(wrong_arity(3)),
        },
        _ => Err(format!("--score: unknown score function \"{}\"", name)),
    }
}

fn tiebreaker(name: &str) -> Result<ScoreFunction, String> {
    match name {
        "max_mining" => Ok(ScoreFunction::max_mining()),
        "max_revenue" => Ok(ScoreFunction::max_revenue()),
        "max_storage" => Ok(ScoreFunction::max_storage()),
        _ => Err(format!("--tiebreaker: unsupported function \"{}\"", name)),
    }
}

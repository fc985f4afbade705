use super::placement::Placement;
use super::resolved::ResolvedPlacement;
use crate::data::Catalog;
use crate::data::Kind;
use crate::data::ResourceYield;

/// a full probe assignment, one placement per site in site-id order.
/// resolution and yield evaluation happen eagerly at construction, so
/// a layout is immutable and always self-consistent.
#[derive(Debug, Clone)]
pub struct Layout {
    placements: Vec<Placement>,
    resolved: Vec<ResolvedPlacement>,
    totals: ResourceYield,
}

impl Layout {
    pub fn from_placements(catalog: &Catalog, placements: Vec<Placement>) -> Self {
        debug_assert!(placements.len() == catalog.sites().len());
        debug_assert!(placements.iter().enumerate().all(|(i, p)| p.site == i));
        let resolved = resolve(catalog, &placements);
        let totals = aggregate(&resolved);
        Self {
            placements,
            resolved,
            totals,
        }
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn resolved_placements(&self) -> &[ResolvedPlacement] {
        &self.resolved
    }

    pub fn resource_yield(&self) -> &ResourceYield {
        &self.totals
    }

    pub fn total_mining(&self) -> u32 {
        self.totals.production
    }

    pub fn total_revenue(&self) -> u32 {
        self.totals.revenue
    }

    pub fn total_storage(&self) -> u32 {
        self.totals.storage
    }
}

fn resolve(catalog: &Catalog, placements: &[Placement]) -> Vec<ResolvedPlacement> {
    let (probes, outgoing) = resolve_probes_and_boosts(catalog, placements);
    let chain_bonuses = resolve_chain_bonuses(catalog, placements);
    let incoming = resolve_incoming_boosts(catalog, placements, &outgoing, &chain_bonuses);
    probes
        .into_iter()
        .zip(outgoing)
        .zip(chain_bonuses)
        .zip(incoming)
        .enumerate()
        .map(|(site, (((probes, outgoing), chain_bonus), incoming))| {
            ResolvedPlacement::new(catalog, site, probes, chain_bonus, outgoing, incoming)
        })
        .collect()
}

/// effective probe sets and emitted boost factors in one pass. a
/// duplicator picks up every direct neighbor's probe and re-emits the
/// factors of neighboring boosters; a booster emits its own factor.
fn resolve_probes_and_boosts(
    catalog: &Catalog,
    placements: &[Placement],
) -> (Vec<Vec<usize>>, Vec<Vec<u32>>) {
    let mut resolved_probes = Vec::with_capacity(placements.len());
    let mut resolved_boosts = Vec::with_capacity(placements.len());
    for placement in placements {
        let probe = catalog.probe(placement.probe);
        let mut probes = vec![placement.probe];
        let mut boosts = Vec::new();
        match probe.kind {
            Kind::Duplicator => {
                for &neighbor in &catalog.site(placement.site).neighbors {
                    let neighbor_probe = catalog.probe(placements[neighbor].probe);
                    probes.push(placements[neighbor].probe);
                    if neighbor_probe.kind == Kind::Booster {
                        boosts.push(100 + neighbor_probe.boost_bonus);
                    }
                }
            }
            Kind::Booster => boosts.push(100 + probe.boost_bonus),
            _ => {}
        }
        resolved_probes.push(probes);
        resolved_boosts.push(boosts);
    }
    (resolved_probes, resolved_boosts)
}

/// partition the sites into chains: maximal connected subgraphs whose
/// members carry the same probe. the walk keeps an explicit stack of
/// (site, previous site, previous chain) records; each site joins a
/// chain on first visit, and any site the root's component cannot
/// reach seeds a fresh walk in index order.
fn resolve_chain_bonuses(catalog: &Catalog, placements: &[Placement]) -> Vec<u32> {
    let none = placements.len();
    let mut chains: Vec<Vec<usize>> = Vec::new();
    let mut chain_of: Vec<Option<usize>> = vec![None; placements.len()];
    let mut stack: Vec<(usize, usize, usize)> = Vec::new();
    for root in std::iter::once(catalog.chain_root()).chain(0..placements.len()) {
        if chain_of[root].is_some() {
            continue;
        }
        stack.push((root, none, none));
        while let Some((site, prev, prev_chain)) = stack.pop() {
            if chain_of[site].is_some() {
                continue;
            }
            let chain = if prev == none || placements[site].probe != placements[prev].probe {
                chains.push(Vec::new());
                chains.len() - 1
            } else {
                prev_chain
            };
            chains[chain].push(site);
            chain_of[site] = Some(chain);
            for &neighbor in &catalog.site(site).neighbors {
                if neighbor != prev {
                    stack.push((neighbor, site, chain));
                }
            }
        }
    }
    let mut bonuses = vec![0; placements.len()];
    for chain in &chains {
        let probe = catalog.probe(placements[chain[0]].probe);
        let bonus = match probe.kind {
            Kind::None | Kind::Basic => 0,
            _ => match chain.len() {
                8.. => 80,
                5..=7 => 50,
                3..=4 => 30,
                _ => 0,
            },
        };
        for &site in chain {
            bonuses[site] = bonus;
        }
    }
    bonuses
}

fn resolve_incoming_boosts(
    catalog: &Catalog,
    placements: &[Placement],
    outgoing: &[Vec<u32>],
    chain_bonuses: &[u32],
) -> Vec<Vec<(Vec<u32>, u32)>> {
    placements
        .iter()
        .map(|placement| {
            catalog
                .site(placement.site)
                .neighbors
                .iter()
                .filter(|&&neighbor| !outgoing[neighbor].is_empty())
                .map(|&neighbor| (outgoing[neighbor].clone(), chain_bonuses[neighbor]))
                .collect()
        })
        .collect()
}

fn aggregate(resolved: &[ResolvedPlacement]) -> ResourceYield {
    let mut totals = ResourceYield::default();
    for placement in resolved {
        totals.absorb(placement.resource_yield());
    }
    totals.revenue /= crate::REVENUE_RATE_DIVISOR;
    totals.storage += crate::STORAGE_BASE;
    totals
}

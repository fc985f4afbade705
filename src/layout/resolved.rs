use crate::data::Catalog;
use crate::data::Kind;
use crate::data::Resource;
use crate::data::ResourceYield;

/// per-site derived state: the effective probe set (own probe first,
/// then duplicated neighbors), the chain bonus, the boost factors the
/// site emits, and the (factors, neighbor chain bonus) pairs it
/// receives. a pure function of the layout.
#[derive(Debug, Clone)]
pub struct ResolvedPlacement {
    site: usize,
    probes: Vec<usize>,
    chain_bonus: u32,
    outgoing_boost_factors: Vec<u32>,
    incoming_boost_factors: Vec<(Vec<u32>, u32)>,
    resource_yield: ResourceYield,
}

impl ResolvedPlacement {
    pub(super) fn new(
        catalog: &Catalog,
        site: usize,
        probes: Vec<usize>,
        chain_bonus: u32,
        outgoing_boost_factors: Vec<u32>,
        incoming_boost_factors: Vec<(Vec<u32>, u32)>,
    ) -> Self {
        let resource_yield = evaluate(
            catalog,
            site,
            &probes,
            chain_bonus,
            &incoming_boost_factors,
        );
        Self {
            site,
            probes,
            chain_bonus,
            outgoing_boost_factors,
            incoming_boost_factors,
            resource_yield,
        }
    }

    pub fn site(&self) -> usize {
        self.site
    }

    pub fn probes(&self) -> &[usize] {
        &self.probes
    }

    pub fn chain_bonus(&self) -> u32 {
        self.chain_bonus
    }

    pub fn outgoing_boost_factors(&self) -> &[u32] {
        &self.outgoing_boost_factors
    }

    pub fn incoming_boost_factors(&self) -> &[(Vec<u32>, u32)] {
        &self.incoming_boost_factors
    }

    pub fn resource_yield(&self) -> &ResourceYield {
        &self.resource_yield
    }
}

/// boosts apply multiplicatively per neighbor; the neighbor's chain
/// bonus multiplies its contribution once, not once per factor.
fn boosted(mut value: u32, incoming: &[(Vec<u32>, u32)]) -> u32 {
    for (factors, neighbor_chain_bonus) in incoming {
        for factor in factors {
            value = value * factor / 100;
        }
        value = value * (100 + neighbor_chain_bonus) / 100;
    }
    value
}

/// integer arithmetic throughout, truncating at every division; the
/// rounding is observable and matches the source game.
fn evaluate(
    catalog: &Catalog,
    site_idx: usize,
    probes: &[usize],
    chain_bonus: u32,
    incoming: &[(Vec<u32>, u32)],
) -> ResourceYield {
    let site = catalog.site(site_idx);
    let mut production = 0;
    let mut revenue = 0;
    let mut storage = 0;
    for &probe_idx in probes {
        let probe = catalog.probe(probe_idx);
        match probe.kind {
            Kind::Duplicator => continue,
            Kind::None | Kind::Basic | Kind::Booster | Kind::Battle => {
                // chain and boost do not apply
                production += site.production * probe.production_factor / 100;
                revenue += site.revenue * probe.revenue_factor / 100;
            }
            Kind::Mining => {
                production += boosted(
                    site.production * probe.production_factor / 100 * (100 + chain_bonus) / 100,
                    incoming,
                );
                revenue += site.revenue * probe.revenue_factor / 100;
            }
            Kind::Research => {
                production += site.production * probe.production_factor / 100;
                revenue += boosted(
                    (site.revenue + crate::TERRITORY_REVENUE * site.territories)
                        * probe.revenue_factor
                        / 100
                        * (100 + chain_bonus)
                        / 100,
                    incoming,
                );
            }
            Kind::Storage => {
                production += site.production * probe.production_factor / 100;
                revenue += site.revenue * probe.revenue_factor / 100;
                storage += boosted(probe.storage * (100 + chain_bonus) / 100, incoming);
            }
        }
    }
    // sites only surface precious resources under their own basic or
    // mining probe, duplicates notwithstanding
    let resources = match catalog.probe(probes[0]).kind {
        Kind::Basic | Kind::Mining => site.resources,
        _ => [0; Resource::COUNT],
    };
    ResourceYield::new(production, revenue, storage, resources)
}

use super::probe;
use super::probe::Kind;
use super::probe::Probe;
use super::resource::Resource;
use super::site::Site;
use std::collections::HashMap;

/// one row of a site table before neighbor ids are resolved to indices.
#[derive(Debug, Clone)]
pub struct SiteDef {
    pub id: u32,
    pub production: u32,
    pub revenue: u32,
    pub territories: u32,
    pub neighbor_ids: Vec<u32>,
    pub resources: Vec<(Resource, u32)>,
}

/// the immutable game tables: sites, probes, and their lookup maps.
/// constructed once at startup; the only later mutation is the
/// territory override hook, applied before the solver starts.
#[derive(Debug, Clone)]
pub struct Catalog {
    sites: Vec<Site>,
    probes: Vec<Probe>,
    site_index: HashMap<u32, usize>,
    probe_index: HashMap<&'static str, usize>,
    chain_root: usize,
}

impl Catalog {
    /// resolve a site table against a probe table. neighbor ids must
    /// reference sites in the table, and the adjacency must already be
    /// symmetric; the chain root names the traversal start site.
    pub fn new(defs: Vec<SiteDef>, probes: Vec<Probe>, chain_root_id: u32) -> Self {
        let site_index = defs
            .iter()
            .enumerate()
            .map(|(i, def)| (def.id, i))
            .collect::<HashMap<_, _>>();
        let probe_index = probes
            .iter()
            .enumerate()
            .map(|(i, p)| (p.code, i))
            .collect::<HashMap<_, _>>();
        let sites = defs
            .into_iter()
            .map(|def| Site {
                id: def.id,
                production: def.production,
                revenue: def.revenue,
                territories: def.territories,
                max_territories: def.territories,
                neighbors: def
                    .neighbor_ids
                    .iter()
                    .map(|id| *site_index.get(id).expect("neighbor id in site table"))
                    .collect(),
                resources: {
                    let mut quantities = [0; Resource::COUNT];
                    for (resource, quantity) in def.resources {
                        quantities[resource as usize] = quantity;
                    }
                    quantities
                },
            })
            .collect::<Vec<_>>();
        let chain_root = *site_index
            .get(&chain_root_id)
            .expect("chain root id in site table");
        let catalog = Self {
            sites,
            probes,
            site_index,
            probe_index,
            chain_root,
        };
        debug_assert!(catalog.symmetric());
        catalog
    }

    /// the exact 104-site / 23-probe tables from the source game.
    pub fn standard() -> Self {
        Self::new(standard_sites(), probe::standard(), CHAIN_ROOT_SITE)
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn probes(&self) -> &[Probe] {
        &self.probes
    }

    pub fn site(&self, idx: usize) -> &Site {
        &self.sites[idx]
    }

    pub fn probe(&self, idx: usize) -> &Probe {
        &self.probes[idx]
    }

    pub fn site_index_of(&self, id: u32) -> Option<usize> {
        self.site_index.get(&id).copied()
    }

    pub fn probe_index_of(&self, code: &str) -> Option<usize> {
        self.probe_index.get(code).copied()
    }

    /// index of the filler probe used to pad short inventories
    pub fn basic_probe(&self) -> Option<usize> {
        self.probes.iter().position(|p| p.kind == Kind::Basic)
    }

    /// index of the probe marking locked / undiscovered sites
    pub fn locked_probe(&self) -> Option<usize> {
        self.probes.iter().position(|p| p.kind == Kind::None)
    }

    /// where the chain traversal starts
    pub fn chain_root(&self) -> usize {
        self.chain_root
    }

    /// record how many of a site's unexplored territories have been
    /// found, clamped to the site's maximum. affects subsequent yield
    /// evaluations.
    pub fn override_territories(&mut self, site_id: u32, territories: u32) {
        match self.site_index_of(site_id) {
            Some(idx) => {
                let site = &mut self.sites[idx];
                site.territories = territories.min(site.max_territories);
            }
            None => log::warn!("territory override for unknown site {}", site_id),
        }
    }

    fn symmetric(&self) -> bool {
        self.sites.iter().enumerate().all(|(i, site)| {
            site.neighbors
                .iter()
                .all(|&j| self.sites[j].neighbors.contains(&i))
        })
    }
}

const CHAIN_ROOT_SITE: u32 = 111; // well-connected interior node

const fn production(grade: char) -> u32 {
    match grade {
        'A' => 500,
        'B' => 350,
        'C' => 250,
        _ => panic!("invalid production grade"),
    }
}

// internal values are double the displayed rate
const fn revenue(grade: char) -> u32 {
    match grade {
        'S' => 1700, // displayed as 'A' in-game
        'A' => 1500,
        'B' => 1300,
        'C' => 1100,
        'D' => 900,
        'E' => 600,
        'F' => 400,
        _ => panic!("invalid revenue grade"),
    }
}

fn standard_sites() -> Vec<SiteDef> {
    type Row = (
        u32,
        char,
        char,
        u32,
        &'static [u32],
        &'static [(Resource, u32)],
    );
    const ROWS: &[Row] = &[
        // Primordia
        (101, 'C', 'S', 1, &[105], &[]),
        (102, 'C', 'F', 0, &[104], &[]),
        (103, 'C', 'E', 1, &[105, 106, 222], &[]),
        (104, 'C', 'S', 1, &[102, 106], &[]),
        (105, 'A', 'F', 0, &[101, 103, 109], &[]),
        (106, 'B', 'E', 1, &[103, 104, 107], &[(Resource::ArcSandOre, 16)]),
        (107, 'A', 'F', 0, &[106, 110], &[]),
        (108, 'C', 'F', 0, &[109], &[
            (Resource::Aurorite, 16),
            (Resource::ArcSandOre, 32),
            (Resource::Foucaultium, 20),
        ]),
        (109, 'C', 'D', 0, &[105, 108], &[
            (Resource::LionboneBort, 72),
            (Resource::Foucaultium, 84),
            (Resource::Dawnstone, 84),
        ]),
        (110, 'C', 'E', 1, &[107, 111, 112], &[
            (Resource::Aurorite, 32),
            (Resource::ArcSandOre, 64),
            (Resource::WhiteCometite, 76),
            (Resource::Dawnstone, 112),
        ]),
        (111, 'C', 'F', 0, &[110, 113], &[(Resource::Foucaultium, 20)]),
        (112, 'A', 'F', 0, &[110, 114, 115], &[]),
        (113, 'C', 'C', 0, &[111, 409], &[]),
        (114, 'C', 'E', 0, &[112, 116], &[]),
        (115, 'C', 'D', 0, &[112], &[
            (Resource::ArcSandOre, 48),
            (Resource::WhiteCometite, 84),
            (Resource::LionboneBort, 72),
        ]),
        (116, 'A', 'D', 0, &[114, 117], &[]),
        (117, 'A', 'D', 1, &[116, 118, 120], &[]),
        (118, 'C', 'E', 0, &[117, 121], &[
            (Resource::Aurorite, 48),
            (Resource::WhiteCometite, 84),
            (Resource::Dawnstone, 57),
        ]),
        (119, 'C', 'E', 0, &[120], &[]),
        (120, 'B', 'B', 0, &[117, 119], &[]),
        (121, 'A', 'E', 0, &[118, 301], &[]),
        // Noctilum
        (201, 'C', 'B', 0, &[206], &[]),
        (202, 'C', 'C', 0, &[203, 207, 208], &[
            (Resource::CimmerianCinnabar, 38),
            (Resource::EverfreezeOre, 38),
        ]),
        (203, 'C', 'A', 0, &[202, 204], &[(Resource::CimmerianCinnabar, 19)]),
        (204, 'A', 'C', 0, &[203, 205, 211, 212], &[]),
        (205, 'A', 'F', 0, &[204, 209], &[]),
        (206, 'B', 'A', 0, &[201, 207, 213], &[]),
        (207, 'C', 'C', 0, &[202, 206], &[
            (Resource::Infernium, 112),
            (Resource::WhiteCometite, 36),
            (Resource::CimmerianCinnabar, 76),
            (Resource::Foucaultium, 36),
        ]),
        (208, 'B', 'D', 0, &[202], &[(Resource::Foucaultium, 38)]),
        (209, 'C', 'F', 0, &[205], &[]),
        (210, 'B', 'D', 0, &[211], &[]),
        (211, 'A', 'D', 0, &[204, 210], &[]),
        (212, 'B', 'E', 0, &[204, 216], &[
            (Resource::Aurorite, 48),
            (Resource::EnduronLead, 27),
            (Resource::WhiteCometite, 27),
        ]),
        (213, 'C', 'S', 1, &[206], &[]),
        (214, 'C', 'D', 2, &[215], &[]),
        (215, 'C', 'D', 0, &[214, 218], &[
            (Resource::Aurorite, 64),
            (Resource::EnduronLead, 36),
            (Resource::EverfreezeOre, 112),
            (Resource::Foucaultium, 36),
        ]),
        (216, 'C', 'A', 1, &[212, 218, 225], &[]),
        (217, 'C', 'C', 0, &[222], &[
            (Resource::Aurorite, 48),
            (Resource::Infernium, 57),
            (Resource::CimmerianCinnabar, 57),
        ]),
        (218, 'C', 'E', 0, &[215, 216, 224], &[
            (Resource::Aurorite, 48),
            (Resource::EnduronLead, 27),
            (Resource::WhiteCometite, 27),
        ]),
        (219, 'C', 'E', 0, &[220], &[
            (Resource::EnduronLead, 18),
            (Resource::WhiteCometite, 18),
        ]),
        (220, 'C', 'C', 1, &[219, 221, 225], &[
            (Resource::Infernium, 56),
            (Resource::EverfreezeOre, 56),
        ]),
        (221, 'C', 'E', 2, &[220, 222], &[]),
        (222, 'C', 'D', 1, &[217, 221, 103], &[]),
        (223, 'C', 'F', 1, &[224], &[]),
        (224, 'C', 'A', 0, &[218, 223], &[]),
        (225, 'C', 'A', 1, &[216, 220], &[]),
        // Oblivia
        (301, 'B', 'D', 0, &[121, 302, 303], &[
            (Resource::Infernium, 27),
            (Resource::ArcSandOre, 96),
            (Resource::LionboneBort, 48),
        ]),
        (302, 'C', 'E', 0, &[301], &[]),
        (303, 'C', 'E', 0, &[301, 306], &[
            (Resource::Aurorite, 32),
            (Resource::WhiteCometite, 38),
        ]),
        (304, 'B', 'A', 0, &[305, 306, 309], &[]),
        (305, 'C', 'E', 0, &[304, 308], &[
            (Resource::Aurorite, 72),
            (Resource::ArcSandOre, 48),
            (Resource::EnduronLead, 114),
        ]),
        (306, 'C', 'D', 1, &[303, 304, 307], &[]),
        (307, 'C', 'B', 0, &[306, 313], &[
            (Resource::Infernium, 36),
            (Resource::ArcSandOre, 64),
            (Resource::EnduronLead, 76),
            (Resource::WhiteCometite, 36),
        ]),
        (308, 'B', 'C', 0, &[305], &[(Resource::OuroborosCrystal, 28)]),
        (309, 'C', 'C', 0, &[304, 311], &[
            (Resource::EnduronLead, 38),
            (Resource::OuroborosCrystal, 38),
        ]),
        (310, 'C', 'A', 0, &[311], &[]),
        (311, 'C', 'B', 0, &[309, 310], &[]),
        (312, 'C', 'D', 0, &[313, 315], &[
            (Resource::Infernium, 27),
            (Resource::BoiledEggOre, 57),
            (Resource::LionboneBort, 24),
        ]),
        (313, 'C', 'E', 2, &[307, 312, 314], &[]),
        (314, 'C', 'B', 0, &[313], &[]),
        (315, 'A', 'S', 2, &[312, 316, 318, 321], &[]),
        (316, 'C', 'D', 0, &[315], &[]),
        (317, 'C', 'A', 1, &[318, 319], &[]),
        (318, 'C', 'B', 2, &[315, 317], &[
            (Resource::BoiledEggOre, 114),
            (Resource::WhiteCometite, 27),
            (Resource::LionboneBort, 48),
        ]),
        (319, 'C', 'D', 1, &[317], &[
            (Resource::Infernium, 18),
            (Resource::BoiledEggOre, 38),
        ]),
        (320, 'C', 'B', 0, &[321], &[
            (Resource::Aurorite, 32),
            (Resource::OuroborosCrystal, 18),
        ]),
        (321, 'A', 'D', 0, &[315, 320, 322], &[]),
        (322, 'A', 'A', 0, &[321], &[]),
        // Sylvalum
        (401, 'C', 'B', 0, &[402, 404], &[
            (Resource::ParhelionPlatinum, 76),
            (Resource::MarineRutile, 60),
        ]),
        (402, 'A', 'B', 0, &[401, 408], &[]),
        (403, 'A', 'C', 0, &[405], &[]),
        (404, 'B', 'S', 1, &[401, 407], &[]),
        (405, 'A', 'E', 0, &[403, 408, 409], &[(Resource::ArcSandOre, 16)]),
        (406, 'C', 'B', 0, &[408], &[]),
        (407, 'A', 'B', 0, &[404, 412], &[]),
        (408, 'B', 'D', 1, &[402, 405, 406, 413], &[
            (Resource::Aurorite, 72),
            (Resource::ArcSandOre, 24),
            (Resource::EverfreezeOre, 57),
        ]),
        (409, 'B', 'S', 0, &[113, 405, 411], &[]),
        (410, 'C', 'S', 1, &[412], &[]),
        (411, 'A', 'A', 0, &[409, 414], &[]),
        (412, 'A', 'B', 0, &[407, 410, 415], &[]),
        (413, 'C', 'A', 1, &[408, 416], &[]),
        (414, 'C', 'B', 2, &[411], &[
            (Resource::ParhelionPlatinum, 38),
            (Resource::MarineRutile, 60),
        ]),
        (415, 'C', 'S', 0, &[412, 502], &[]),
        (416, 'C', 'B', 0, &[413, 418, 419], &[]),
        (417, 'B', 'D', 0, &[419], &[
            (Resource::EverfreezeOre, 38),
            (Resource::BoiledEggOre, 38),
        ]),
        (418, 'C', 'C', 0, &[416], &[
            (Resource::ParhelionPlatinum, 95),
            (Resource::ArcSandOre, 40),
            (Resource::EverfreezeOre, 95),
            (Resource::BoiledEggOre, 95),
            (Resource::MarineRutile, 95),
        ]),
        (419, 'C', 'S', 1, &[416, 417, 420], &[]),
        (420, 'B', 'C', 0, &[419], &[(Resource::EverfreezeOre, 19)]),
        // Cauldros
        (501, 'B', 'F', 0, &[502], &[(Resource::ArcSandOre, 16)]),
        (502, 'A', 'C', 1, &[415, 501, 503], &[(Resource::Bonjelium, 40)]),
        (503, 'C', 'D', 1, &[502, 504], &[(Resource::EnduronLead, 19)]),
        (504, 'C', 'C', 0, &[503, 508], &[
            (Resource::Bonjelium, 80),
            (Resource::ArcSandOre, 32),
            (Resource::EnduronLead, 40),
            (Resource::MarineRutile, 76),
        ]),
        (505, 'C', 'B', 2, &[506, 509], &[]),
        (506, 'C', 'B', 1, &[505], &[
            (Resource::Bonjelium, 40),
            (Resource::ArcSandOre, 16),
        ]),
        (507, 'C', 'A', 1, &[508], &[(Resource::Bonjelium, 20)]),
        (508, 'A', 'B', 1, &[504, 507, 509, 511], &[
            (Resource::EnduronLead, 20),
            (Resource::MarineRutile, 38),
        ]),
        (509, 'A', 'A', 0, &[505, 508, 510, 513], &[]),
        (510, 'C', 'B', 0, &[509], &[(Resource::Bonjelium, 40)]),
        (511, 'A', 'C', 0, &[508, 512, 514], &[(Resource::Bonjelium, 40)]),
        (512, 'C', 'A', 0, &[511], &[]),
        (513, 'C', 'A', 2, &[509, 516], &[]),
        (514, 'C', 'A', 1, &[511, 515], &[]),
        (515, 'C', 'B', 0, &[514], &[]),
        (516, 'B', 'E', 0, &[513], &[]),
    ];
    ROWS.iter()
        .map(|&(id, prod, rev, territories, neighbors, resources)| SiteDef {
            id,
            production: production(prod),
            revenue: revenue(rev),
            territories,
            neighbor_ids: neighbors.to_vec(),
            resources: resources.to_vec(),
        })
        .collect()
}

/// probe behavior class. a single struct with a kind discriminator
/// covers all probes; the yield evaluator dispatches on kind.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Kind {
    None,
    Basic,
    Mining,
    Research,
    Booster,
    Storage,
    Duplicator,
    Battle,
}

/// one entry of the probe catalog. factors are percentages,
/// storage is a flat capacity contribution.
#[derive(Debug, Clone)]
pub struct Probe {
    pub id: u32,
    pub production_factor: u32,
    pub revenue_factor: u32,
    pub boost_bonus: u32,
    pub storage: u32,
    pub kind: Kind,
    pub level: u32,
    pub code: &'static str,
    pub name: &'static str,
}

impl Probe {
    pub fn new(
        id: u32,
        production_factor: u32,
        revenue_factor: u32,
        boost_bonus: u32,
        storage: u32,
        kind: Kind,
        level: u32,
        code: &'static str,
        name: &'static str,
    ) -> Self {
        Self {
            id,
            production_factor,
            revenue_factor,
            boost_bonus,
            storage,
            kind,
            level,
            code,
            name,
        }
    }
}

impl std::fmt::Display for Probe {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.code)
    }
}

// probe ids align with frontiernav.net ids for convenience
pub fn standard() -> Vec<Probe> {
    vec![
        Probe::new(0, 0, 0, 0, 0, Kind::None, 0, "X", "Locked"),
        Probe::new(1, 50, 50, 0, 0, Kind::Basic, 0, "-", "Basic"),
        Probe::new(2, 100, 30, 0, 0, Kind::Mining, 1, "M1", "Mining G1"),
        Probe::new(3, 120, 30, 0, 0, Kind::Mining, 2, "M2", "Mining G2"),
        Probe::new(4, 140, 30, 0, 0, Kind::Mining, 3, "M3", "Mining G3"),
        Probe::new(5, 160, 30, 0, 0, Kind::Mining, 4, "M4", "Mining G4"),
        Probe::new(6, 180, 30, 0, 0, Kind::Mining, 5, "M5", "Mining G5"),
        Probe::new(7, 200, 30, 0, 0, Kind::Mining, 6, "M6", "Mining G6"),
        Probe::new(8, 220, 30, 0, 0, Kind::Mining, 7, "M7", "Mining G7"),
        Probe::new(9, 240, 30, 0, 0, Kind::Mining, 8, "M8", "Mining G8"),
        Probe::new(10, 270, 30, 0, 0, Kind::Mining, 9, "M9", "Mining G9"),
        Probe::new(11, 300, 30, 0, 0, Kind::Mining, 10, "M10", "Mining G10"),
        Probe::new(12, 30, 200, 0, 0, Kind::Research, 1, "R1", "Research G1"),
        Probe::new(13, 30, 250, 0, 0, Kind::Research, 2, "R2", "Research G2"),
        Probe::new(14, 30, 300, 0, 0, Kind::Research, 3, "R3", "Research G3"),
        Probe::new(15, 30, 350, 0, 0, Kind::Research, 4, "R4", "Research G4"),
        Probe::new(16, 30, 400, 0, 0, Kind::Research, 5, "R5", "Research G5"),
        Probe::new(17, 30, 450, 0, 0, Kind::Research, 6, "R6", "Research G6"),
        Probe::new(18, 10, 10, 50, 0, Kind::Booster, 1, "B1", "Booster G1"),
        Probe::new(19, 10, 10, 100, 0, Kind::Booster, 2, "B2", "Booster G2"),
        Probe::new(20, 0, 0, 0, 0, Kind::Duplicator, 0, "D", "Duplicator"),
        Probe::new(21, 10, 10, 0, 3000, Kind::Storage, 0, "S", "Storage"),
        Probe::new(22, 10, 10, 0, 0, Kind::Battle, 0, "C", "Combat"),
    ]
}

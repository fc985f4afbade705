#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Resource {
    ArcSandOre = 0,
    Aurorite = 1,
    WhiteCometite = 2,
    EnduronLead = 3,
    EverfreezeOre = 4,
    Foucaultium = 5,
    LionboneBort = 6,
    Infernium = 7,
    BoiledEggOre = 8,
    MarineRutile = 9,
    Dawnstone = 10,
    CimmerianCinnabar = 11,
    OuroborosCrystal = 12,
    ParhelionPlatinum = 13,
    Bonjelium = 14,
}

impl Resource {
    pub const COUNT: usize = 15;

    pub const fn all() -> &'static [Self] {
        &[
            Self::ArcSandOre,
            Self::Aurorite,
            Self::WhiteCometite,
            Self::EnduronLead,
            Self::EverfreezeOre,
            Self::Foucaultium,
            Self::LionboneBort,
            Self::Infernium,
            Self::BoiledEggOre,
            Self::MarineRutile,
            Self::Dawnstone,
            Self::CimmerianCinnabar,
            Self::OuroborosCrystal,
            Self::ParhelionPlatinum,
            Self::Bonjelium,
        ]
    }
}

impl std::str::FromStr for Resource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "arc_sand_ore" => Ok(Resource::ArcSandOre),
            "aurorite" => Ok(Resource::Aurorite),
            "white_cometite" => Ok(Resource::WhiteCometite),
            "enduron_lead" => Ok(Resource::EnduronLead),
            "everfreeze_ore" => Ok(Resource::EverfreezeOre),
            "foucaultium" => Ok(Resource::Foucaultium),
            "lionbone_bort" => Ok(Resource::LionboneBort),
            "infernium" => Ok(Resource::Infernium),
            "boiled_egg_ore" => Ok(Resource::BoiledEggOre),
            "marine_rutile" => Ok(Resource::MarineRutile),
            "dawnstone" => Ok(Resource::Dawnstone),
            "cimmerian_cinnabar" => Ok(Resource::CimmerianCinnabar),
            "ouroboros_crystal" => Ok(Resource::OuroborosCrystal),
            "parhelion_platinum" => Ok(Resource::ParhelionPlatinum),
            "bonjelium" => Ok(Resource::Bonjelium),
            _ => Err(format!("unknown precious resource \"{}\"", s)),
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Resource::ArcSandOre => "Arc Sand Ore",
                Resource::Aurorite => "Aurorite",
                Resource::WhiteCometite => "White Cometite",
                Resource::EnduronLead => "Enduron Lead",
                Resource::EverfreezeOre => "Everfreeze Ore",
                Resource::Foucaultium => "Foucaultium",
                Resource::LionboneBort => "Lionbone Bort",
                Resource::Infernium => "Infernium",
                Resource::BoiledEggOre => "Boiled-Egg Ore",
                Resource::MarineRutile => "Marine Rutile",
                Resource::Dawnstone => "Dawnstone",
                Resource::CimmerianCinnabar => "Cimmerian Cinnabar",
                Resource::OuroborosCrystal => "Ouroboros Crystal",
                Resource::ParhelionPlatinum => "Parhelion Platinum",
                Resource::Bonjelium => "Bonjelium",
            }
        )
    }
}

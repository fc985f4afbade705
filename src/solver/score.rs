use super::error::SolverError;
use crate::data::Resource;
use crate::data::ResourceYield;
use crate::Score;

/// the user-selected objective. an inspectable sum type rather than a
/// boxed closure so that the tiebreaker-differs-from-score check and
/// the CLI's reporting can look at the variant and its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreFunction {
    MaxMining,
    MaxEffectiveMining { storage_factor: f64 },
    MaxRevenue,
    MaxStorage,
    Ratio { mining: f64, revenue: f64, storage: f64 },
    Weights { mining: f64, revenue: f64, storage: f64 },
}

impl ScoreFunction {
    pub fn max_mining() -> Self {
        Self::MaxMining
    }

    pub fn max_effective_mining(storage_factor: f64) -> Result<Self, SolverError> {
        let function = Self::MaxEffectiveMining { storage_factor };
        function.validate().map(|_| function)
    }

    pub fn max_revenue() -> Self {
        Self::MaxRevenue
    }

    pub fn max_storage() -> Self {
        Self::MaxStorage
    }

    pub fn ratio(mining: f64, revenue: f64, storage: f64) -> Result<Self, SolverError> {
        let function = Self::Ratio {
            mining,
            revenue,
            storage,
        };
        function.validate().map(|_| function)
    }

    pub fn weights(mining: f64, revenue: f64, storage: f64) -> Result<Self, SolverError> {
        let function = Self::Weights {
            mining,
            revenue,
            storage,
        };
        function.validate().map(|_| function)
    }

    /// every parameter must be a finite non-negative number
    pub fn validate(&self) -> Result<(), SolverError> {
        let ok = |x: f64| x.is_finite() && x >= 0.0;
        let valid = match *self {
            Self::MaxMining | Self::MaxRevenue | Self::MaxStorage => true,
            Self::MaxEffectiveMining { storage_factor } => ok(storage_factor),
            Self::Ratio {
                mining,
                revenue,
                storage,
            }
            | Self::Weights {
                mining,
                revenue,
                storage,
            } => ok(mining) && ok(revenue) && ok(storage),
        };
        match valid {
            true => Ok(()),
            false => Err(SolverError::InvalidScoreFunctionArgument),
        }
    }

    pub fn score(&self, yields: &ResourceYield) -> Score {
        let production = yields.production as f64;
        let revenue = yields.revenue as f64;
        let storage = yields.storage as f64;
        match *self {
            Self::MaxMining => production,
            Self::MaxEffectiveMining { storage_factor } => {
                (storage_factor * production).min(storage)
            }
            Self::MaxRevenue => revenue,
            Self::MaxStorage => storage,
            Self::Ratio {
                mining: m,
                revenue: r,
                storage: s,
            } => {
                if m <= 0.0 && r <= 0.0 && s <= 0.0 {
                    return 0.0;
                }
                [(production, m), (revenue, r), (storage, s)]
                    .iter()
                    .filter(|(_, factor)| *factor > 0.0)
                    .map(|(value, factor)| value / factor)
                    .fold(f64::MAX, f64::min)
                    * m.max(r).max(s)
            }
            Self::Weights {
                mining: m,
                revenue: r,
                storage: s,
            } => m * production + r * revenue + s * storage,
        }
    }
}

impl std::fmt::Display for ScoreFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Self::MaxMining => write!(f, "max_mining()"),
            Self::MaxEffectiveMining { storage_factor } => {
                write!(f, "max_effective_mining(storage_factor = {})", storage_factor)
            }
            Self::MaxRevenue => write!(f, "max_revenue()"),
            Self::MaxStorage => write!(f, "max_storage()"),
            Self::Ratio {
                mining,
                revenue,
                storage,
            } => write!(
                f,
                "ratio(mining = {}, revenue = {}, storage = {})",
                mining, revenue, storage
            ),
            Self::Weights {
                mining,
                revenue,
                storage,
            } => write!(
                f,
                "weights(mining = {}, revenue = {}, storage = {})",
                mining, revenue, storage
            ),
        }
    }
}

/// hard minimums a layout must meet before its score counts. resource
/// minimums are in deci-percent, matching the catalog quantities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Constraints {
    pub resource_minimums: [u32; Resource::COUNT],
    pub production_minimum: u32,
    pub revenue_minimum: u32,
    pub storage_minimum: u32,
}

impl Constraints {
    pub fn satisfied_by(&self, yields: &ResourceYield) -> bool {
        self.resource_minimums
            .iter()
            .zip(yields.resources.iter())
            .all(|(minimum, quantity)| *minimum == 0 || quantity >= minimum)
            && yields.production >= self.production_minimum
            && yields.revenue >= self.revenue_minimum
            && yields.storage >= self.storage_minimum
    }
}

/// the constrained score plus the optional tiebreaker, bundled so that
/// solutions can be evaluated with a single borrow.
#[derive(Debug, Clone, PartialEq)]
pub struct Scorer {
    pub function: ScoreFunction,
    pub tiebreaker: Option<ScoreFunction>,
    pub constraints: Constraints,
}

impl Scorer {
    /// zero when any configured minimum is unmet, the base score otherwise
    pub fn score(&self, yields: &ResourceYield) -> Score {
        if self.constraints.satisfied_by(yields) {
            self.function.score(yields)
        } else {
            0.0
        }
    }

    pub fn tiebreak(&self, yields: &ResourceYield) -> Score {
        match &self.tiebreaker {
            Some(function) => function.score(yields),
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yields(production: u32, revenue: u32, storage: u32) -> ResourceYield {
        ResourceYield::new(production, revenue, storage, [0; Resource::COUNT])
    }

    #[test]
    fn simple_maximands() {
        let y = yields(100, 200, 300);
        assert_eq!(ScoreFunction::max_mining().score(&y), 100.0);
        assert_eq!(ScoreFunction::max_revenue().score(&y), 200.0);
        assert_eq!(ScoreFunction::max_storage().score(&y), 300.0);
    }

    #[test]
    fn effective_mining_caps_at_storage() {
        let function = ScoreFunction::max_effective_mining(2.0).unwrap();
        assert_eq!(function.score(&yields(100, 0, 300)), 200.0);
        assert_eq!(function.score(&yields(400, 0, 300)), 300.0);
    }

    #[test]
    fn ratio_of_all_zeros_is_zero() {
        let function = ScoreFunction::ratio(0.0, 0.0, 0.0).unwrap();
        assert_eq!(function.score(&yields(100, 200, 300)), 0.0);
        assert_eq!(function.score(&yields(0, 0, 0)), 0.0);
    }

    #[test]
    fn ratio_tracks_scarcest_dimension() {
        // two parts mining to one part storage, revenue free
        let function = ScoreFunction::ratio(2.0, 0.0, 1.0).unwrap();
        assert_eq!(function.score(&yields(100, 999, 100)), 100.0);
        assert_eq!(function.score(&yields(400, 0, 100)), 200.0);
    }

    #[test]
    fn weights_are_linear() {
        let function = ScoreFunction::weights(1.0, 2.0, 0.5).unwrap();
        assert_eq!(function.score(&yields(100, 200, 300)), 100.0 + 400.0 + 150.0);
    }

    #[test]
    fn arguments_must_be_finite_and_non_negative() {
        assert_eq!(
            ScoreFunction::max_effective_mining(-1.0),
            Err(SolverError::InvalidScoreFunctionArgument)
        );
        assert_eq!(
            ScoreFunction::ratio(1.0, f64::NAN, 0.0),
            Err(SolverError::InvalidScoreFunctionArgument)
        );
        assert_eq!(
            ScoreFunction::weights(1.0, f64::INFINITY, 0.0),
            Err(SolverError::InvalidScoreFunctionArgument)
        );
        assert!(ScoreFunction::ratio(1.0, 0.0, 0.0).is_ok());
    }

    #[test]
    fn constraints_zero_the_score() {
        let mut constraints = Constraints::default();
        constraints.production_minimum = 500;
        let scorer = Scorer {
            function: ScoreFunction::max_mining(),
            tiebreaker: None,
            constraints,
        };
        assert_eq!(scorer.score(&yields(499, 0, 0)), 0.0);
        assert_eq!(scorer.score(&yields(500, 0, 0)), 500.0);
    }

    #[test]
    fn resource_minimums_only_bind_when_nonzero() {
        let mut constraints = Constraints::default();
        constraints.resource_minimums[Resource::Bonjelium as usize] = 10;
        let mut unmet = yields(100, 0, 0);
        assert!(!constraints.satisfied_by(&unmet));
        unmet.resources[Resource::Bonjelium as usize] = 10;
        assert!(constraints.satisfied_by(&unmet));
    }

    #[test]
    fn detail_strings() {
        assert_eq!(ScoreFunction::max_mining().to_string(), "max_mining()");
        assert_eq!(
            ScoreFunction::ratio(1.0, 2.0, 0.0).unwrap().to_string(),
            "ratio(mining = 1, revenue = 2, storage = 0)"
        );
    }
}

/// configuration-time failures. all of these are reported before the
/// first iteration runs; the solver itself has no runtime errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolverError {
    #[error("seed consumed more {probe_code} probes than the inventory held (required {required})")]
    InventoryInsufficient { probe_code: String, required: u32 },

    #[error("site {site_id} appears in both the seed and the locked sites")]
    SeedConflict { site_id: u32 },

    #[error("force_seed is set but the seed is empty")]
    ForceSeedWithoutSeed,

    #[error("tiebreaker function must differ from the score function")]
    TiebreakerSameAsScore,

    #[error("score function argument must be a finite non-negative number")]
    InvalidScoreFunctionArgument,
}

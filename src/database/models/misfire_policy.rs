use sea_orm::DeriveActiveEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Upper bound on the runs replayed at once when a job resumes.
pub const MAX_CATCH_UP_RUNS: u32 = 10;

/// What to do with firings that fell due while a job was paused.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    Display,
)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MisfirePolicy {
    /// Same as `FireAndProceed`
    #[sea_orm(num_value = 0)]
    #[default]
    Default,
    /// Replay every missed firing on resume, up to `MAX_CATCH_UP_RUNS`
    #[sea_orm(num_value = 1)]
    IgnoreMisfires,
    /// Fire once on resume, then continue on schedule
    #[sea_orm(num_value = 2)]
    FireAndProceed,
    /// Drop missed firings
    #[sea_orm(num_value = 3)]
    DoNothing,
}

impl MisfirePolicy {
    /// Number of catch-up runs owed after `missed` firings were skipped.
    #[must_use]
    pub const fn catch_up_runs(&self, missed: u32) -> u32 {
        if missed == 0 {
            return 0;
        }
        match self {
            Self::Default | Self::FireAndProceed => 1,
            Self::IgnoreMisfires => {
                if missed > MAX_CATCH_UP_RUNS {
                    MAX_CATCH_UP_RUNS
                } else {
                    missed
                }
            }
            Self::DoNothing => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catch_up_runs_per_policy() {
        assert_eq!(MisfirePolicy::Default.catch_up_runs(3), 1);
        assert_eq!(MisfirePolicy::FireAndProceed.catch_up_runs(3), 1);
        assert_eq!(MisfirePolicy::IgnoreMisfires.catch_up_runs(3), 3);
        assert_eq!(MisfirePolicy::DoNothing.catch_up_runs(3), 0);
    }

    #[test]
    fn test_replayed_runs_are_capped() {
        assert_eq!(
            MisfirePolicy::IgnoreMisfires.catch_up_runs(3600),
            MAX_CATCH_UP_RUNS
        );
        assert_eq!(MisfirePolicy::FireAndProceed.catch_up_runs(3600), 1);
    }

    #[test]
    fn test_no_catch_up_without_misfires() {
        assert_eq!(MisfirePolicy::IgnoreMisfires.catch_up_runs(0), 0);
        assert_eq!(MisfirePolicy::Default.catch_up_runs(0), 0);
    }
}

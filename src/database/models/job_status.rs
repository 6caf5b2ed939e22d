use sea_orm::DeriveActiveEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Administrative run state of a scheduled job definition.
///
/// The status is the source of truth for the live scheduler: on every
/// registration a `Pause` job is created suspended, a `Normal` job is created
/// firing on its cron schedule.
///
/// # State Transitions
///
/// - `Normal` → `Pause` when an administrator pauses the job
/// - `Pause` → `Normal` when it is resumed (missed firings are handled by the
///   job's misfire policy)
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
pub enum JobStatus {
    /// Job fires on its cron schedule. Default for newly saved jobs.
    #[sea_orm(num_value = 1)]
    #[default]
    Normal,

    /// Job stays registered but does not fire until resumed.
    #[sea_orm(num_value = 0)]
    Pause,
}

impl JobStatus {
    pub const fn is_normal(&self) -> bool {
        matches!(self, Self::Normal)
    }

    pub const fn is_paused(&self) -> bool {
        matches!(self, Self::Pause)
    }
}

use sea_orm::DeriveActiveEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
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
pub enum JobResult {
    #[sea_orm(num_value = 0)]
    Completed,
    #[sea_orm(num_value = 1)]
    Failed,
    #[sea_orm(num_value = 2)]
    TimedOut,
}

impl JobResult {
    pub const fn is_successful(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

//! `SeaORM` Entity for scheduled job definitions

use crate::database::models::{job_status::JobStatus, misfire_policy::MisfirePolicy};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "sched_job")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub job_name: String,
    pub job_group: String,
    pub job_type: String,
    /// JSON encoded arguments handed to the job on every run
    #[sea_orm(column_type = "Text", nullable)]
    pub arguments: Option<String>,
    pub cron_expression: String,
    pub misfire_policy: MisfirePolicy,
    pub concurrent: bool,
    pub status: JobStatus,
    pub remark: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::job_log::Entity")]
    JobLog,
}

impl Related<super::job_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JobLog.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Whether the job should currently be firing on its schedule
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.status.is_normal()
    }
}

//! `SeaORM` Entity for job execution logs

use crate::database::models::job_result::JobResult;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "sched_job_log")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub job_id: i32,
    pub job_name: String,
    pub job_group: String,
    pub job_type: String,
    pub result: JobResult,
    pub failure_reason: Option<String>,
    pub started_at: DateTime,
    pub finished_at: DateTime,
    pub execution_time_ms: i64,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::job::Entity",
        from = "Column::JobId",
        to = "super::job::Column::Id"
    )]
    Job,
}

impl Related<super::job::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Job.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub const fn was_successful(&self) -> bool {
        self.result.is_successful()
    }
}

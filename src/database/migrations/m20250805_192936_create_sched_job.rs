use sea_orm_migration::{
    prelude::*,
    schema::{big_integer, boolean, integer, pk_auto, string, string_null, text_null, timestamp, uuid},
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SchedJob::Table)
                    .if_not_exists()
                    .col(pk_auto(SchedJob::Id))
                    .col(string(SchedJob::JobName))
                    .col(string(SchedJob::JobGroup))
                    .col(string(SchedJob::JobType))
                    .col(text_null(SchedJob::Arguments))
                    .col(string(SchedJob::CronExpression))
                    // MisfirePolicy::Default
                    .col(integer(SchedJob::MisfirePolicy).default(0))
                    .col(boolean(SchedJob::Concurrent).default(false))
                    // JobStatus::Normal
                    .col(integer(SchedJob::Status).default(1))
                    .col(string_null(SchedJob::Remark))
                    .col(
                        timestamp(SchedJob::CreatedAt)
                            .not_null()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    .col(
                        timestamp(SchedJob::UpdatedAt)
                            .not_null()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-sched_job-job_group")
                    .table(SchedJob::Table)
                    .col(SchedJob::JobGroup)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SchedJobLog::Table)
                    .if_not_exists()
                    .col(uuid(SchedJobLog::Id).primary_key())
                    .col(integer(SchedJobLog::JobId))
                    .col(string(SchedJobLog::JobName))
                    .col(string(SchedJobLog::JobGroup))
                    .col(string(SchedJobLog::JobType))
                    .col(integer(SchedJobLog::Result))
                    .col(string_null(SchedJobLog::FailureReason))
                    .col(timestamp(SchedJobLog::StartedAt).not_null())
                    .col(timestamp(SchedJobLog::FinishedAt).not_null())
                    .col(big_integer(SchedJobLog::ExecutionTimeMs))
                    .col(
                        timestamp(SchedJobLog::CreatedAt)
                            .not_null()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-sched_job_log-job_id")
                            .from(SchedJobLog::Table, SchedJobLog::JobId)
                            .to(SchedJob::Table, SchedJob::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-sched_job_log-job_id")
                    .table(SchedJobLog::Table)
                    .col(SchedJobLog::JobId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-sched_job_log-created_at")
                    .table(SchedJobLog::Table)
                    .col(SchedJobLog::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SchedJobLog::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(SchedJob::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SchedJob {
    Table,
    Id,
    JobName,
    JobGroup,
    JobType,
    Arguments,
    CronExpression,
    MisfirePolicy,
    Concurrent,
    Status,
    Remark,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SchedJobLog {
    Table,
    Id,
    JobId,
    JobName,
    JobGroup,
    JobType,
    Result,
    FailureReason,
    StartedAt,
    FinishedAt,
    ExecutionTimeMs,
    CreatedAt,
}

pub use sea_orm_migration::prelude::*;

mod m20250805_192936_create_sched_job;
mod m20250806_101500_create_tag;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250805_192936_create_sched_job::Migration),
            Box::new(m20250806_101500_create_tag::Migration),
        ]
    }
}

pub struct Migrator;

use std::{cmp, error::Error, process};

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;

use crate::{
    cli::MigrateAction,
    config::Config,
    database::{migrations::Migrator, setup_database_connection},
};

pub async fn handle_migrate_command(config: &Config, action: MigrateAction) {
    let result = match setup_database_connection(&config.database).await {
        Ok(db) => handle_migration_command(&db, action).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        eprintln!("❌ Migration failed: {e}");
        process::exit(1);
    }
}

pub async fn handle_migration_command(
    db: &DatabaseConnection,
    action: MigrateAction,
) -> Result<(), Box<dyn Error>> {
    match action {
        MigrateAction::Up { steps } => {
            let pending = Migrator::get_pending_migrations(db).await?;

            if pending.is_empty() {
                println!("✅ All migrations are already up to date");
                return Ok(());
            }

            let count = steps.map_or(pending.len(), |steps| cmp::min(steps as usize, pending.len()));
            println!("Running {count} migration(s) up:");
            for migration in &pending[..count] {
                println!("  📄 {}", migration.name());
            }
            println!();

            Migrator::up(db, steps).await?;
            println!("✅ Migrations completed successfully");
        }
        MigrateAction::Down { steps } => {
            let applied = Migrator::get_applied_migrations(db).await?;

            if applied.is_empty() {
                println!("❌ No migrations to roll back");
                return Ok(());
            }

            let count = cmp::min(steps as usize, applied.len());
            println!("Rolling back {count} migration(s):");
            for migration in applied[applied.len() - count..].iter().rev() {
                println!("  📄 {}", migration.name());
            }
            println!();

            Migrator::down(db, Some(steps)).await?;
            println!("✅ Rollback completed successfully");
        }
        MigrateAction::Status => {
            let applied = Migrator::get_applied_migrations(db).await?;
            let pending = Migrator::get_pending_migrations(db).await?;

            println!("📋 Applied migrations:");
            for migration in &applied {
                println!("  ✓ {}", migration.name());
            }

            if pending.is_empty() {
                println!("✅ All migrations are up to date");
            } else {
                println!("📋 Pending migrations:");
                for migration in &pending {
                    println!("  - {}", migration.name());
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::setup_test::setup_db;

    #[tokio::test]
    async fn test_down_then_up_restores_schema() {
        let db = setup_db().await;

        handle_migration_command(&db, MigrateAction::Down { steps: 1 })
            .await
            .unwrap();
        assert_eq!(Migrator::get_pending_migrations(&db).await.unwrap().len(), 1);

        handle_migration_command(&db, MigrateAction::Up { steps: None })
            .await
            .unwrap();
        assert!(Migrator::get_pending_migrations(&db).await.unwrap().is_empty());
    }
}

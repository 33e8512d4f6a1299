//! Migrate command - manages the accounts schema.

use sea_orm::DbErr;

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Execute the migrate command.
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    // Migrations run only when asked for here, so connect without the
    // automatic migration pass the server uses.
    let db = Database::connect_without_migrations(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    match args.action {
        MigrateAction::Up => {
            tracing::info!("Applying pending migrations");
            db.run_migrations().await.map_err(migration_error)?;
        }
        MigrateAction::Down => {
            tracing::info!("Rolling back the last migration");
            db.rollback_migration().await.map_err(migration_error)?;
        }
        MigrateAction::Status => {
            let status = db.migration_status().await.map_err(migration_error)?;
            for (name, applied) in status {
                println!("{}: {}", name, if applied { "applied" } else { "pending" });
            }
            return Ok(());
        }
        MigrateAction::Fresh => {
            tracing::warn!("Dropping all tables and reapplying every migration");
            db.fresh_migrations().await.map_err(migration_error)?;
        }
    }

    tracing::info!("Migration command finished");
    Ok(())
}

fn migration_error(e: DbErr) -> AppError {
    AppError::internal(format!("Migration failed: {}", e))
}

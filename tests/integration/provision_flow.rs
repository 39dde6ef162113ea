use crate::helpers::cli::shipped_script;
use crate::helpers::harness::with_fresh_database_name;
use anyhow::Result;
use dbprovision::config::Config;
use dbprovision::db::DatabaseStatus;
use dbprovision::{ProvisionStep, Provisioner};
use tempfile::TempDir;

fn config_for(settings: dbprovision::config::ConnectionSettings, backup_dir: &TempDir) -> Config {
    let mut config = Config {
        database: settings,
        ..Default::default()
    };
    config.files.schema = shipped_script("database-schema.sql");
    config.files.seed = shipped_script("seed-data.sql");
    config.backup.directory = backup_dir.path().to_path_buf();
    config.backup.pg_dump = "/nonexistent/bin/pg_dump".to_string();
    config
}

#[tokio::test]
async fn test_full_run_succeeds_without_dump_program() -> Result<()> {
    with_fresh_database_name(async |pg, db_name| {
        let backup_dir = TempDir::new()?;
        let provisioner = Provisioner::new(config_for(pg.settings_for(db_name), &backup_dir));

        let report = provisioner.run().await?;

        assert_eq!(report.database, DatabaseStatus::Created);
        assert!(report.verification.passed());
        assert!(report.backup_file.is_none());
        Ok(())
    })
    .await
}

#[tokio::test]
async fn test_second_run_is_tolerated() -> Result<()> {
    with_fresh_database_name(async |pg, db_name| {
        let backup_dir = TempDir::new()?;
        let provisioner = Provisioner::new(config_for(pg.settings_for(db_name), &backup_dir));

        provisioner.run().await?;
        let report = provisioner.run().await?;

        assert_eq!(report.database, DatabaseStatus::AlreadyExists);
        let counts = report.verification.counts.unwrap();
        assert_eq!(counts.users, 1);
        assert_eq!(counts.system_categories, 5);
        assert_eq!(counts.transactions, 3);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn test_missing_schema_file_stops_before_seed() -> Result<()> {
    with_fresh_database_name(async |pg, db_name| {
        let backup_dir = TempDir::new()?;
        let mut config = config_for(pg.settings_for(db_name), &backup_dir);
        config.files.schema = backup_dir.path().join("missing-schema.sql");

        let failure = Provisioner::new(config).run().await.unwrap_err();
        assert_eq!(failure.step, ProvisionStep::Schema);

        // Database was created, but nothing ran against it
        let pool = sqlx::PgPool::connect(&pg.url_for(db_name)).await?;
        let tables: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = 'public'",
        )
        .fetch_one(&pool)
        .await?;
        pool.close().await;
        assert_eq!(tables, 0);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn test_empty_seed_fails_verification() -> Result<()> {
    with_fresh_database_name(async |pg, db_name| {
        let backup_dir = TempDir::new()?;
        let seed = backup_dir.path().join("empty-seed.sql");
        std::fs::write(&seed, "\n")?;
        let mut config = config_for(pg.settings_for(db_name), &backup_dir);
        config.files.seed = seed;

        let failure = Provisioner::new(config).run().await.unwrap_err();
        assert_eq!(failure.step, ProvisionStep::Verify);
        Ok(())
    })
    .await
}

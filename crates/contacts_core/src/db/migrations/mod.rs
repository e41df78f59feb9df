//! Schema migrations for the contacts store.
//!
//! Each entry upgrades the schema by exactly one version. The applied
//! version lives in `PRAGMA user_version`; a run either reaches
//! [`latest_version`] or leaves the database untouched.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::{Connection, Transaction};

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "init",
        sql: include_str!("0001_init.sql"),
    },
    Migration {
        version: 2,
        name: "name_search_keys",
        sql: include_str!("0002_name_search_keys.sql"),
    },
];

/// Outcome of one [`apply_migrations`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationReport {
    pub from_version: u32,
    pub to_version: u32,
}

impl MigrationReport {
    /// Number of schema versions applied by the run.
    pub fn applied(&self) -> u32 {
        self.to_version - self.from_version
    }
}

/// Schema version a freshly opened database ends up at.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Reads the schema version recorded in the database.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?)
}

/// Brings the schema up to [`latest_version`].
///
/// Databases written by a newer build are rejected before anything runs.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<MigrationReport> {
    let from_version = schema_version(conn)?;
    let latest = latest_version();
    if from_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from_version,
            latest_supported: latest,
        });
    }

    let report = MigrationReport {
        from_version,
        to_version: latest,
    };
    if report.applied() == 0 {
        debug!("event=db_migrate module=db status=skip version={latest}");
        return Ok(report);
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS.iter().filter(|m| m.version > from_version) {
        run_step(&tx, migration)?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={from_version} to_version={latest} applied={}",
        report.applied()
    );
    Ok(report)
}

fn run_step(tx: &Transaction<'_>, migration: &Migration) -> DbResult<()> {
    let wrap = |source| DbError::Migration {
        version: migration.version,
        source,
    };
    tx.execute_batch(migration.sql).map_err(wrap)?;
    tx.pragma_update(None, "user_version", migration.version)
        .map_err(wrap)?;
    debug!(
        "event=db_migrate_step module=db status=ok version={} name={}",
        migration.version, migration.name
    );
    Ok(())
}

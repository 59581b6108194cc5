//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas and busy timeout.
//! - Trigger schema migrations before returning a usable connection.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - Returned connections have migrations fully applied.

use super::migrations::apply_migrations;
use super::DbResult;
use log::{error, log, warn, Level};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens a SQLite database file and applies all pending migrations.
///
/// The file is created when missing; a fresh file receives the seed rows
/// through the migration chain.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_with("file", Level::Info, || Connection::open(path))
}

/// Opens an already bootstrapped database file for one request.
///
/// Same pragmas, busy timeout and migration check as [`open_db`], but the
/// `db_open` start/ok events are emitted at `debug` so serving traffic does
/// not repeat them at `info`. Failures are still logged at `error`.
pub fn open_db_for_request(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_with("request", Level::Debug, || Connection::open(path))
}

/// Opens an in-memory SQLite database and applies all pending migrations.
///
/// Every call yields an independent, freshly seeded database.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with("memory", Level::Info, Connection::open_in_memory)
}

/// Deletes the database file at `path` and re-creates it from migrations.
///
/// Development-only switch: all stored products are discarded and the seed
/// rows are written again. Missing files are not an error.
pub fn reset_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    warn!(
        "event=db_reset module=db status=start path={}",
        path.display()
    );

    for suffix in ["", "-wal", "-shm", "-journal"] {
        let mut target = path.as_os_str().to_owned();
        target.push(suffix);
        match std::fs::remove_file(&target) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                error!(
                    "event=db_reset module=db status=error error_code=db_remove_failed error={}",
                    err
                );
                return Err(err.into());
            }
        }
    }

    open_db(path)
}

fn open_with(
    mode: &str,
    level: Level,
    open: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    log!(level, "event=db_open module=db status=start mode={mode}");

    let mut conn = match open() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_open_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&mut conn) {
        Ok(()) => {
            log!(
                level,
                "event=db_open module=db status=ok mode={} duration_ms={}",
                mode,
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(conn)?;
    Ok(())
}

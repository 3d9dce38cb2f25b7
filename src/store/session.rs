//! Store handle and per-request sessions
//!
//! [`ClimateStore`] is built once at startup and shared by every request.
//! Each request calls [`ClimateStore::session`] to get its own read-only
//! connection, which is closed when the session is dropped.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags};

use super::errors::{StoreError, StoreResult};
use super::schema;

/// Handle to the measurement database
#[derive(Debug, Clone)]
pub struct ClimateStore {
    path: PathBuf,
}

impl ClimateStore {
    /// Open an existing database. Fails if the file is missing.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        if !path.is_file() {
            return Err(StoreError::DatabaseMissing(path));
        }
        Ok(Self { path })
    }

    /// Create the database file if needed and apply the schema.
    pub fn create(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let conn = Connection::open(&path)?;
        schema::migrate(&conn)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Start a read-only session for one request
    pub fn session(&self) -> StoreResult<ClimateSession> {
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(ClimateSession { conn })
    }

    /// Writable connection for migrations and seed loading
    pub(super) fn writer(&self) -> StoreResult<Connection> {
        let conn = Connection::open(&self.path)?;
        schema::migrate(&conn)?;
        Ok(conn)
    }
}

/// One read-only connection, scoped to a single request
#[derive(Debug)]
pub struct ClimateSession {
    pub(super) conn: Connection,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_missing_database() {
        let tmp = TempDir::new().unwrap();
        let err = ClimateStore::open(tmp.path().join("missing.sqlite")).unwrap_err();
        assert!(matches!(err, StoreError::DatabaseMissing(_)));
    }

    #[test]
    fn test_create_then_open() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("climate.sqlite");

        ClimateStore::create(&path).unwrap();
        let store = ClimateStore::open(&path).unwrap();
        assert_eq!(store.path(), path.as_path());
        assert!(store.session().is_ok());
    }

    #[test]
    fn test_session_is_read_only() {
        let tmp = TempDir::new().unwrap();
        let store = ClimateStore::create(tmp.path().join("climate.sqlite")).unwrap();

        let session = store.session().unwrap();
        let result = session.conn.execute(
            "INSERT INTO station (station, name) VALUES ('X', 'Y')",
            [],
        );
        assert!(result.is_err());
    }
}

//! Static schema for the measurement store
//!
//! Both tables are declared here and created by [`migrate`]. Nothing in the
//! service inspects the database catalogue at runtime.
//!
//! Tables:
//! - station: one row per reporting site, keyed by its station code
//! - measurement: one daily reading per station

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use super::errors::StoreResult;

/// SQLite column affinities used by the schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Text,
    Real,
}

impl ColumnType {
    pub fn sql(&self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Text => "TEXT",
            ColumnType::Real => "REAL",
        }
    }
}

/// Column definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub column_type: ColumnType,
    pub nullable: bool,
    pub unique: bool,
    pub primary_key: bool,
}

impl ColumnDef {
    /// Integer rowid alias
    pub const fn primary_key(name: &'static str) -> Self {
        Self {
            name,
            column_type: ColumnType::Integer,
            nullable: false,
            unique: false,
            primary_key: true,
        }
    }

    pub const fn required(name: &'static str, column_type: ColumnType) -> Self {
        Self {
            name,
            column_type,
            nullable: false,
            unique: false,
            primary_key: false,
        }
    }

    pub const fn optional(name: &'static str, column_type: ColumnType) -> Self {
        Self {
            name,
            column_type,
            nullable: true,
            unique: false,
            primary_key: false,
        }
    }

    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    fn sql(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.column_type.sql());
        if self.primary_key {
            sql.push_str(" PRIMARY KEY");
        } else if !self.nullable {
            sql.push_str(" NOT NULL");
        }
        if self.unique {
            sql.push_str(" UNIQUE");
        }
        sql
    }
}

/// Table definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableDef {
    pub name: &'static str,
    pub columns: &'static [ColumnDef],
}

impl TableDef {
    /// `CREATE TABLE IF NOT EXISTS` statement for this table
    pub fn create_sql(&self) -> String {
        let columns: Vec<String> = self.columns.iter().map(ColumnDef::sql).collect();
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            self.name,
            columns.join(", ")
        )
    }
}

/// Secondary index definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexDef {
    pub name: &'static str,
    pub table: &'static str,
    pub column: &'static str,
}

impl IndexDef {
    pub fn create_sql(&self) -> String {
        format!(
            "CREATE INDEX IF NOT EXISTS {} ON {}({})",
            self.name, self.table, self.column
        )
    }
}

pub const STATION_TABLE: TableDef = TableDef {
    name: "station",
    columns: &[
        ColumnDef::primary_key("id"),
        ColumnDef::required("station", ColumnType::Text).unique(),
        ColumnDef::required("name", ColumnType::Text),
        ColumnDef::optional("latitude", ColumnType::Real),
        ColumnDef::optional("longitude", ColumnType::Real),
        ColumnDef::optional("elevation", ColumnType::Real),
    ],
};

pub const MEASUREMENT_TABLE: TableDef = TableDef {
    name: "measurement",
    columns: &[
        ColumnDef::primary_key("id"),
        ColumnDef::required("station", ColumnType::Text),
        ColumnDef::required("date", ColumnType::Text),
        ColumnDef::optional("prcp", ColumnType::Real),
        ColumnDef::optional("tobs", ColumnType::Real),
    ],
};

pub const TABLES: &[TableDef] = &[STATION_TABLE, MEASUREMENT_TABLE];

pub const INDEXES: &[IndexDef] = &[
    IndexDef {
        name: "idx_measurement_date",
        table: "measurement",
        column: "date",
    },
    IndexDef {
        name: "idx_measurement_station",
        table: "measurement",
        column: "station",
    },
];

/// Apply the schema to a writable connection. Idempotent.
pub fn migrate(conn: &Connection) -> StoreResult<()> {
    let mut batch = String::new();
    for table in TABLES {
        batch.push_str(&table.create_sql());
        batch.push_str(";\n");
    }
    for index in INDEXES {
        batch.push_str(&index.create_sql());
        batch.push_str(";\n");
    }
    conn.execute_batch(&batch)?;
    Ok(())
}

/// A weather-reporting site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub station: String,
    pub name: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub elevation: Option<f64>,
}

/// One daily reading from a station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub station: String,
    pub date: String,
    #[serde(default)]
    pub prcp: Option<f64>,
    #[serde(default)]
    pub tobs: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_create_sql() {
        assert_eq!(
            STATION_TABLE.create_sql(),
            "CREATE TABLE IF NOT EXISTS station (id INTEGER PRIMARY KEY, \
             station TEXT NOT NULL UNIQUE, name TEXT NOT NULL, latitude REAL, \
             longitude REAL, elevation REAL)"
        );
    }

    fn column(table: &TableDef, name: &str) -> Option<ColumnDef> {
        table.columns.iter().find(|c| c.name == name).copied()
    }

    #[test]
    fn test_measurement_columns() {
        let date = column(&MEASUREMENT_TABLE, "date").unwrap();
        assert_eq!(date.column_type, ColumnType::Text);
        assert!(!date.nullable);

        let tobs = column(&MEASUREMENT_TABLE, "tobs").unwrap();
        assert!(tobs.nullable);

        assert!(column(&MEASUREMENT_TABLE, "name").is_none());
    }

    #[test]
    fn test_migrate_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        migrate(&conn).unwrap();

        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' \
                 AND name IN ('station', 'measurement')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 2);
    }

    #[test]
    fn test_measurement_deserialize_nullable() {
        let m: Measurement =
            serde_json::from_str(r#"{"station": "USC00519397", "date": "2010-01-01"}"#).unwrap();
        assert_eq!(m.prcp, None);
        assert_eq!(m.tobs, None);
    }
}

//! Canonical driver identities and transport tags.
//!
//! A [`Driver`] names the client library a DSN is generated for; it is what
//! scheme aliases resolve to and what keys the connector registry.
//! A [`Transport`] records how the generated DSN expects to reach the
//! database process.

use std::fmt;

use serde::Serialize;

/// A supported database driver.
///
/// Each variant is the canonical identity behind one or more URL scheme
/// aliases (`pg://…` and `postgresql://…` both resolve to
/// [`Driver::Postgres`]).
///
/// # Examples
///
/// ```
/// use connstr::Driver;
///
/// assert_eq!(Driver::Postgres.as_str(), "postgres");
/// assert_eq!(Driver::Postgres.default_port(), Some(5432));
/// assert_eq!(Driver::Sqlite3.default_port(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Driver {
    // Network servers with URL-shaped DSNs
    /// PostgreSQL (libpq keyword/URL connection strings).
    Postgres,
    /// Microsoft SQL Server (`sqlserver://` DSNs).
    MsSql,
    /// Oracle Database (ODPI/OCI drivers).
    Oracle,
    /// ClickHouse native protocol.
    ClickHouse,
    /// SAP HANA (`hdb://` DSNs).
    SapHana,
    /// Apache Ignite thin client.
    Ignite,
    /// PrestoDB / Trino HTTP coordinator.
    Presto,

    // Network servers with compact or positional DSNs
    /// MySQL and compatibles (go-sql-driver `tcp(…)` DSNs).
    MySql,
    /// MySQL via the alternative mymysql positional format.
    MyMysql,
    /// Apache Cassandra / ScyllaDB (gocql-style `host?opts`).
    Cassandra,
    /// Exasol (`exa:` semicolon DSNs).
    Exasol,
    /// Firebird (remote `host:port/dbpath` databases).
    Firebird,
    /// Snowflake (`account/db/schema` DSNs).
    Snowflake,
    /// VoltDB (`host:port` only).
    VoltDb,

    // Key=value families
    /// Generic ODBC (`Driver={…};…` connection strings).
    Odbc,
    /// Windows ADO / OLE DB (`Provider=…;Data Source=…`).
    Adodb,

    // Embedded files
    /// SQLite version 3 database files.
    Sqlite3,
    /// DuckDB database files.
    DuckDb,
}

impl Driver {
    /// Returns the canonical scheme name for this driver.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::MsSql => "mssql",
            Self::Oracle => "oracle",
            Self::ClickHouse => "clickhouse",
            Self::SapHana => "saphana",
            Self::Ignite => "ignite",
            Self::Presto => "presto",
            Self::MySql => "mysql",
            Self::MyMysql => "mymysql",
            Self::Cassandra => "cassandra",
            Self::Exasol => "exasol",
            Self::Firebird => "firebird",
            Self::Snowflake => "snowflake",
            Self::VoltDb => "voltdb",
            Self::Odbc => "odbc",
            Self::Adodb => "adodb",
            Self::Sqlite3 => "sqlite3",
            Self::DuckDb => "duckdb",
        }
    }

    /// Returns the port the driver's server listens on by default, or `None`
    /// for drivers without a network port (embedded files, ODBC bridges,
    /// account-addressed services).
    pub fn default_port(self) -> Option<u16> {
        match self {
            Self::Postgres => Some(5432),
            Self::MsSql => Some(1433),
            Self::Oracle => Some(1521),
            Self::ClickHouse => Some(9000),
            Self::SapHana => Some(30015),
            Self::Ignite => Some(10800),
            Self::Presto => Some(8080),
            Self::MySql | Self::MyMysql => Some(3306),
            Self::Cassandra => Some(9042),
            Self::Exasol => Some(8563),
            Self::Firebird => Some(3050),
            Self::VoltDb => Some(21212),
            Self::Snowflake | Self::Odbc | Self::Adodb | Self::Sqlite3 | Self::DuckDb => None,
        }
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Driver {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// How a generated DSN expects to reach the database.
///
/// Most DSNs address a TCP endpoint; some drivers can instead target a Unix
/// domain socket or a Windows named pipe, and embedded databases run inside
/// the calling process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Transport {
    Tcp,
    UnixSocket,
    NamedPipe,
    InProcess,
}

impl Transport {
    /// Returns the transport tag as a string slice.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tcp => "tcp",
            Self::UnixSocket => "unix-socket",
            Self::NamedPipe => "named-pipe",
            Self::InProcess => "in-process",
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_names() {
        assert_eq!(Driver::Postgres.as_str(), "postgres");
        assert_eq!(Driver::MsSql.as_str(), "mssql");
        assert_eq!(Driver::Sqlite3.as_str(), "sqlite3");
        assert_eq!(Driver::SapHana.to_string(), "saphana");
    }

    #[test]
    fn default_ports() {
        assert_eq!(Driver::Postgres.default_port(), Some(5432));
        assert_eq!(Driver::MySql.default_port(), Some(3306));
        assert_eq!(Driver::VoltDb.default_port(), Some(21212));
        assert_eq!(Driver::DuckDb.default_port(), None);
        assert_eq!(Driver::Snowflake.default_port(), None);
    }

    #[test]
    fn transport_tags() {
        assert_eq!(Transport::Tcp.as_str(), "tcp");
        assert_eq!(Transport::UnixSocket.as_str(), "unix-socket");
        assert_eq!(Transport::InProcess.to_string(), "in-process");
    }
}

//! Generators for embedded file databases.
//!
//! The DSN is the file path itself, so anything that implies a server
//! (credentials, host, port) is rejected rather than dropped. The special
//! `:memory:` path passes through untouched.

use crate::driver::{Driver, Transport};
use crate::dsn::ConnectionSpec;
use crate::error::{Error, Result};
use crate::location::Location;
use crate::parse::{Params, ParsedUrl};

/// SQLite: `sqlite:relative.sqlite3`, `sqlite:/abs/path.db`,
/// `sqlite::memory:`. Query options are re-appended verbatim in form
/// encoding.
pub fn sqlite3(url: &ParsedUrl, location: &Location, params: Params) -> Result<ConnectionSpec> {
    file_path(Driver::Sqlite3, url, location, &params)
}

/// DuckDB: same shape as SQLite, including `:memory:`.
pub fn duckdb(url: &ParsedUrl, location: &Location, params: Params) -> Result<ConnectionSpec> {
    file_path(Driver::DuckDb, url, location, &params)
}

fn file_path(
    driver: Driver,
    url: &ParsedUrl,
    location: &Location,
    params: &Params,
) -> Result<ConnectionSpec> {
    if url.user().is_some() {
        return Err(Error::UnsupportedComponent {
            driver,
            component: "username",
        });
    }
    if url.password().is_some() {
        return Err(Error::UnsupportedComponent {
            driver,
            component: "password",
        });
    }
    if url.host().is_some() {
        return Err(Error::UnsupportedComponent {
            driver,
            component: "host",
        });
    }

    let path = match location {
        Location::Path(path) if !path.is_empty() => path,
        _ => return Err(Error::InvalidPathShape { driver, got: 0 }),
    };

    let mut dsn = path.clone();
    if !params.is_empty() {
        dsn.push('?');
        dsn.push_str(&params.to_query_string());
    }
    Ok(ConnectionSpec::new(driver, Transport::InProcess, dsn))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Registry;

    fn translate(raw: &str) -> Result<ConnectionSpec> {
        Registry::new().translate(raw)
    }

    fn dsn(raw: &str) -> String {
        translate(raw).unwrap().into_dsn()
    }

    #[test]
    fn sqlite_relative_path_with_options() {
        assert_eq!(
            dsn("sqlite:mydatabase.sqlite3?loc=auto"),
            "mydatabase.sqlite3?loc=auto"
        );
    }

    #[test]
    fn sqlite_absolute_path() {
        assert_eq!(dsn("sq:/var/data/app.db"), "/var/data/app.db");
        assert_eq!(dsn("file:/var/data/app.db"), "/var/data/app.db");
        assert_eq!(dsn("sqlite:///var/data/app.db"), "/var/data/app.db");
    }

    #[test]
    fn sqlite_memory() {
        let spec = translate("sqlite::memory:").unwrap();
        assert_eq!(spec.dsn(), ":memory:");
        assert_eq!(spec.transport(), Transport::InProcess);
    }

    #[test]
    fn sqlite_rejects_host() {
        // `sqlite://./x` puts `.` in the host slot; the supported
        // spellings are `sqlite:./x` and `sqlite:///x`.
        assert!(matches!(
            translate("sqlite://./x.db"),
            Err(Error::UnsupportedComponent { driver: Driver::Sqlite3, component: "host" })
        ));
    }

    #[test]
    fn sqlite_rejects_credentials() {
        assert!(matches!(
            translate("sqlite://user@localhost/x.db"),
            Err(Error::UnsupportedComponent { driver: Driver::Sqlite3, component: "username" })
        ));
    }

    #[test]
    fn sqlite_requires_a_path() {
        assert!(matches!(
            translate("sqlite:"),
            Err(Error::InvalidPathShape { driver: Driver::Sqlite3, got: 0 })
        ));
    }

    #[test]
    fn duckdb_paths() {
        assert_eq!(dsn("duckdb:analytics.duckdb"), "analytics.duckdb");
        assert_eq!(dsn("dk:/data/analytics.duckdb"), "/data/analytics.duckdb");
        assert_eq!(dsn("ddb::memory:"), ":memory:");
    }
}

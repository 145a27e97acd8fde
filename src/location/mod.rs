//! Path normalization: from URL path segments to a driver location.
//!
//! Drivers disagree about what the URL path means. The same `/a/b` names a
//! database and schema on Snowflake, an instance and database on SQL Server,
//! and a file on SQLite. Each driver descriptor declares a [`Shape`]; this
//! module folds the parsed segments into the matching [`Location`].
//!
//! | shape              | `/a`            | `/a/b`                  |
//! |--------------------|-----------------|-------------------------|
//! | `Path`             | path `/a`       | path `/a/b`             |
//! | `Database`         | database `a`    | error                   |
//! | `InstanceDatabase` | database `a`    | instance `a`, db `b`    |
//! | `DatabaseSchema`   | database `a`    | db `a`, schema `b`      |
//! | `Empty`            | error           | error                   |

use serde::Serialize;

use crate::driver::Driver;
use crate::error::{Error, Result};
use crate::parse::ParsedUrl;

/// How a driver reads the URL path. Declared per driver in its descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// The whole path is an opaque location (files, Firebird remote paths).
    Path,
    /// At most one segment, naming a database.
    Database,
    /// Up to two segments: `[instance/]database`.
    InstanceDatabase,
    /// Up to two segments: `database[/schema]`.
    DatabaseSchema,
    /// No path at all.
    Empty,
}

/// The normalized meaning of a URL path for one driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// No location given; the driver connects to its default database.
    Empty,
    /// A literal path, leading slash preserved when the URL had one.
    Path(String),
    /// A single database name.
    Database(String),
    /// SQL Server style: optional named instance, then the database.
    InstanceDatabase {
        instance: Option<String>,
        database: String,
    },
    /// Warehouse style: database, then an optional schema.
    DatabaseSchema {
        database: String,
        schema: Option<String>,
    },
}

/// Folds the parsed path into the location the driver expects.
///
/// Opaque URLs (`scheme:path`) bypass the shape table entirely: the whole
/// decoded path is the location. Whether a driver accepts the opaque form at
/// all is checked by the generator dispatch before this is called.
///
/// # Errors
///
/// [`Error::InvalidPathShape`] when the path has more segments than the
/// shape admits; the error reports the segment count it saw.
pub fn normalize(driver: Driver, shape: Shape, url: &ParsedUrl) -> Result<Location> {
    if url.is_opaque() {
        return Ok(Location::Path(url.path().to_owned()));
    }

    let segments = url.segments();
    let got = segments.len();
    let too_many = || Error::InvalidPathShape { driver, got };

    let location = match shape {
        Shape::Path => {
            if got == 0 {
                Location::Empty
            } else {
                Location::Path(url.path().to_owned())
            }
        }
        Shape::Database => match segments {
            [] => Location::Empty,
            [db] => Location::Database(db.clone()),
            _ => return Err(too_many()),
        },
        Shape::InstanceDatabase => match segments {
            [] => Location::Empty,
            [db] => Location::InstanceDatabase {
                instance: None,
                database: db.clone(),
            },
            [instance, db] => Location::InstanceDatabase {
                instance: Some(instance.clone()),
                database: db.clone(),
            },
            _ => return Err(too_many()),
        },
        Shape::DatabaseSchema => match segments {
            [] => Location::Empty,
            [db] => Location::DatabaseSchema {
                database: db.clone(),
                schema: None,
            },
            [db, schema] => Location::DatabaseSchema {
                database: db.clone(),
                schema: Some(schema.clone()),
            },
            _ => return Err(too_many()),
        },
        Shape::Empty => {
            if got == 0 {
                Location::Empty
            } else {
                return Err(too_many());
            }
        }
    };
    Ok(location)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Registry;

    fn parsed(raw: &str) -> ParsedUrl {
        Registry::new().parse(raw).unwrap()
    }

    #[test]
    fn database_shape() {
        let u = parsed("pg://h/orders");
        assert_eq!(
            normalize(Driver::Postgres, Shape::Database, &u).unwrap(),
            Location::Database("orders".to_owned())
        );
    }

    #[test]
    fn database_shape_rejects_two_segments() {
        let u = parsed("oracle://h/a/b");
        let err = normalize(Driver::Oracle, Shape::Database, &u).unwrap_err();
        match err {
            Error::InvalidPathShape { driver, got } => {
                assert_eq!(driver, Driver::Oracle);
                assert_eq!(got, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn instance_database_split() {
        let u = parsed("mssql://h/SQLEXPRESS/mydb");
        assert_eq!(
            normalize(Driver::MsSql, Shape::InstanceDatabase, &u).unwrap(),
            Location::InstanceDatabase {
                instance: Some("SQLEXPRESS".to_owned()),
                database: "mydb".to_owned(),
            }
        );
        let u = parsed("mssql://h/mydb");
        assert_eq!(
            normalize(Driver::MsSql, Shape::InstanceDatabase, &u).unwrap(),
            Location::InstanceDatabase {
                instance: None,
                database: "mydb".to_owned(),
            }
        );
    }

    #[test]
    fn database_schema_split() {
        let u = parsed("snowflake://acct/db/public");
        assert_eq!(
            normalize(Driver::Snowflake, Shape::DatabaseSchema, &u).unwrap(),
            Location::DatabaseSchema {
                database: "db".to_owned(),
                schema: Some("public".to_owned()),
            }
        );
    }

    #[test]
    fn empty_shape_rejects_any_path() {
        let u = parsed("voltdb://h/extra");
        assert!(matches!(
            normalize(Driver::VoltDb, Shape::Empty, &u),
            Err(Error::InvalidPathShape { got: 1, .. })
        ));
    }

    #[test]
    fn opaque_bypasses_shape() {
        let u = parsed("mysql:/var/run/mysqld/mysqld.sock");
        assert_eq!(
            normalize(Driver::MySql, Shape::Database, &u).unwrap(),
            Location::Path("/var/run/mysqld/mysqld.sock".to_owned())
        );
    }

    #[test]
    fn no_path_is_empty() {
        let u = parsed("pg://localhost");
        assert_eq!(
            normalize(Driver::Postgres, Shape::Database, &u).unwrap(),
            Location::Empty
        );
    }
}

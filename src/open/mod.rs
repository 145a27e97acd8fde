//! The open façade: translate a URL, then hand the DSN to a registered
//! constructor.
//!
//! This crate never opens sockets or files itself. [`Connectors`] pairs the
//! translation pipeline with per-driver constructor callbacks supplied by
//! the embedding application; `open` makes a single translate-then-construct
//! attempt and never retries.

use std::collections::HashMap;

use tracing::debug;

use crate::driver::Driver;
use crate::dsn::ConnectionSpec;
use crate::error::{Error, Result};
use crate::registry::Registry;

/// A driver constructor: builds a live connection value from a generated
/// [`ConnectionSpec`]. Failures are boxed and come back wrapped in
/// [`Error::Connect`] with the source preserved.
pub type Connector<C> = Box<
    dyn Fn(&ConnectionSpec) -> std::result::Result<C, Box<dyn std::error::Error + Send + Sync>>
        + Send
        + Sync,
>;

/// A registry plus per-driver constructors.
///
/// `C` is whatever the embedding application considers a connection, such
/// as a pool handle or an enum over backend clients.
///
/// # Examples
///
/// ```
/// use connstr::{Connectors, Driver};
///
/// let mut connectors: Connectors<String> = Connectors::new();
/// connectors.register(Driver::Postgres, |spec| {
///     Ok(format!("connected to {}", spec.dsn()))
/// });
///
/// let conn = connectors.open("pg://localhost/app")?;
/// assert_eq!(conn, "connected to postgres://localhost/app");
/// # Ok::<(), connstr::Error>(())
/// ```
pub struct Connectors<C> {
    registry: Registry,
    constructors: HashMap<Driver, Connector<C>>,
}

impl<C> Connectors<C> {
    /// Creates an opener over the built-in registry, with no constructors
    /// registered yet.
    pub fn new() -> Self {
        Self::with_registry(Registry::new())
    }

    /// Creates an opener over a custom registry.
    pub fn with_registry(registry: Registry) -> Self {
        Self {
            registry,
            constructors: HashMap::new(),
        }
    }

    /// Registers the constructor for a driver, replacing any previous one.
    pub fn register<F>(&mut self, driver: Driver, constructor: F)
    where
        F: Fn(&ConnectionSpec) -> std::result::Result<C, Box<dyn std::error::Error + Send + Sync>>
            + Send
            + Sync
            + 'static,
    {
        self.constructors.insert(driver, Box::new(constructor));
    }

    /// Returns `true` if a constructor is registered for the driver.
    pub fn is_registered(&self, driver: Driver) -> bool {
        self.constructors.contains_key(&driver)
    }

    /// Returns the registry this opener translates with.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Translates the URL and invokes the matching constructor once.
    ///
    /// # Errors
    ///
    /// Everything [`Registry::translate`] reports, plus
    /// [`Error::NotRegistered`] when the resolved driver has no
    /// constructor, and [`Error::Connect`] wrapping a constructor failure.
    pub fn open(&self, raw: &str) -> Result<C> {
        let spec = self.registry.translate(raw)?;
        let driver = spec.driver();
        let constructor = self
            .constructors
            .get(&driver)
            .ok_or(Error::NotRegistered { driver })?;
        debug!(driver = %driver, transport = %spec.transport(), "opening connection");
        constructor(&spec).map_err(|source| Error::Connect { driver, source })
    }
}

impl<C> Default for Connectors<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::DriverInfo;
    use crate::location::Shape;

    #[test]
    fn open_routes_to_the_registered_constructor() {
        let mut connectors: Connectors<(Driver, String)> = Connectors::new();
        connectors.register(Driver::Sqlite3, |spec| {
            Ok((spec.driver(), spec.dsn().to_owned()))
        });
        connectors.register(Driver::Postgres, |spec| {
            Ok((spec.driver(), spec.dsn().to_owned()))
        });

        let (driver, dsn) = connectors.open("sqlite:app.db").unwrap();
        assert_eq!(driver, Driver::Sqlite3);
        assert_eq!(dsn, "app.db");

        let (driver, _) = connectors.open("pg://h/db").unwrap();
        assert_eq!(driver, Driver::Postgres);
    }

    #[test]
    fn unregistered_driver_is_an_error() {
        let connectors: Connectors<()> = Connectors::new();
        assert!(matches!(
            connectors.open("pg://h/db"),
            Err(Error::NotRegistered {
                driver: Driver::Postgres
            })
        ));
    }

    #[test]
    fn constructor_failures_keep_their_source() {
        let mut connectors: Connectors<()> = Connectors::new();
        connectors.register(Driver::VoltDb, |_spec| Err("connection refused".into()));

        match connectors.open("voltdb://volt1").unwrap_err() {
            Error::Connect { driver, source } => {
                assert_eq!(driver, Driver::VoltDb);
                assert_eq!(source.to_string(), "connection refused");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn translation_errors_pass_through_unwrapped() {
        let mut connectors: Connectors<()> = Connectors::new();
        connectors.register(Driver::Oracle, |_spec| Ok(()));
        assert!(matches!(
            connectors.open("oracle://h/a/b"),
            Err(Error::InvalidPathShape { .. })
        ));
    }

    #[test]
    fn custom_registry_drives_translation() {
        let registry = crate::Registry::from_drivers(vec![
            DriverInfo::new(Driver::DuckDb, Shape::Path, crate::dsn::file::duckdb)
                .aliases(&["warehouse"])
                .opaque(),
        ]);
        let mut connectors: Connectors<String> = Connectors::with_registry(registry);
        connectors.register(Driver::DuckDb, |spec| Ok(spec.dsn().to_owned()));

        assert_eq!(connectors.open("warehouse:w.duckdb").unwrap(), "w.duckdb");
        assert!(matches!(
            connectors.open("pg://h/db"),
            Err(Error::UnknownScheme { .. })
        ));
    }
}

//! Driver descriptors and the scheme-alias registry.
//!
//! The registry maps scheme tokens to [`DriverInfo`] descriptors and is the
//! entry point for parsing and translation. Alias lookup is exact and
//! case-sensitive. Built-in aliases:
//!
//! | canonical    | aliases                              |
//! |--------------|--------------------------------------|
//! | `postgres`   | `pg`, `postgresql`, `pgsql`          |
//! | `mysql`      | `my`, `mariadb`, `maria`, `percona`, `aurora` |
//! | `mymysql`    | `mymy`                               |
//! | `mssql`      | `ms`, `sqlserver`, `azuresql`        |
//! | `oracle`     | `or`, `ora`, `oci`, `oci8`, `odpi`   |
//! | `sqlite3`    | `sq`, `sqlite`, `file`               |
//! | `duckdb`     | `dk`, `ddb`                          |
//! | `clickhouse` | `ch`                                 |
//! | `cassandra`  | `ca`, `scy`, `scylla`, `cql`         |
//! | `saphana`    | `sa`, `hana`, `hdb`                  |
//! | `exasol`     | `ex`, `exa`                          |
//! | `firebird`   | `fb`, `firebirdsql`                  |
//! | `snowflake`  | `sf`                                 |
//! | `odbc`       | —                                    |
//! | `adodb`      | `ado`, `oledb`                       |
//! | `presto`     | `pr`, `prestodb`                     |
//! | `voltdb`     | `vo`, `volt`, `vdb`                  |
//! | `ignite`     | `ig`, `gridgain`                     |

use std::collections::HashMap;

use tracing::debug;

use crate::driver::Driver;
use crate::dsn::{self, ConnectionSpec, Generator};
use crate::error::{Error, Result};
use crate::location::Shape;
use crate::parse::{self, ParsedUrl};

/// Whether a scheme token may carry a `+hint` suffix, and what the hint may
/// say.
#[derive(Debug, Clone, Copy)]
pub enum HintPolicy {
    /// No `+hint` accepted (the default).
    None,
    /// Only the listed hint tokens are accepted (`mysql+unix`,
    /// `presto+https`).
    OneOf(&'static [&'static str]),
    /// Any hint text is accepted; ODBC embeds a driver name there
    /// (`odbc+SQL+Server`).
    Any,
}

/// Everything the registry knows about one driver: its aliases, how to read
/// the URL path, which URL forms it accepts, its default options, and the
/// generator that produces its DSN.
///
/// Built with a chain of setters:
///
/// ```
/// use connstr::{Driver, DriverInfo, Shape};
///
/// let info = DriverInfo::new(Driver::Postgres, Shape::Database, connstr::generators::postgres)
///     .aliases(&["corp-pg"])
///     .opaque()
///     .default_option("sslmode", "verify-full");
/// assert_eq!(info.driver(), Driver::Postgres);
/// ```
#[derive(Debug, Clone)]
pub struct DriverInfo {
    driver: Driver,
    aliases: Vec<String>,
    shape: Shape,
    opaque: bool,
    hints: HintPolicy,
    defaults: Vec<(String, String)>,
    generator: Generator,
}

impl DriverInfo {
    /// Creates a descriptor with no aliases, no hints, no defaults, and the
    /// opaque form disallowed.
    pub fn new(driver: Driver, shape: Shape, generator: Generator) -> Self {
        Self {
            driver,
            aliases: Vec::new(),
            shape,
            opaque: false,
            hints: HintPolicy::None,
            defaults: Vec::new(),
            generator,
        }
    }

    /// Sets the alias tokens. The canonical name resolves regardless.
    #[must_use]
    pub fn aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|s| (*s).to_owned()).collect();
        self
    }

    /// Allows the authority-less forms `scheme:path` and `scheme:/path`.
    #[must_use]
    pub fn opaque(mut self) -> Self {
        self.opaque = true;
        self
    }

    /// Sets the `+hint` policy for this driver's schemes.
    #[must_use]
    pub fn hints(mut self, policy: HintPolicy) -> Self {
        self.hints = policy;
        self
    }

    /// Adds a default query option, merged under the caller's options at
    /// generation time. The caller always wins on collision.
    #[must_use]
    pub fn default_option(mut self, key: &str, value: &str) -> Self {
        self.defaults.push((key.to_owned(), value.to_owned()));
        self
    }

    /// Returns the canonical driver.
    pub fn driver(&self) -> Driver {
        self.driver
    }

    /// Returns the path shape the driver expects.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Returns the driver's default port, when it has one.
    pub fn default_port(&self) -> Option<u16> {
        self.driver.default_port()
    }

    /// Returns `true` if the driver accepts the opaque URL forms.
    pub fn allows_opaque(&self) -> bool {
        self.opaque
    }

    /// Returns the hint policy.
    pub fn hint_policy(&self) -> HintPolicy {
        self.hints
    }

    /// Returns the alias tokens (without the canonical name).
    pub fn alias_names(&self) -> impl Iterator<Item = &str> {
        self.aliases.iter().map(String::as_str)
    }

    /// Returns the default options in declaration order.
    pub fn default_options(&self) -> impl Iterator<Item = (&str, &str)> {
        self.defaults.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub(crate) fn generator(&self) -> Generator {
        self.generator
    }
}

/// The scheme registry: resolves aliases and runs the
/// parse → normalize → generate pipeline.
///
/// [`Registry::new`] loads the built-in driver table; immutable afterwards,
/// so a shared reference is freely usable across threads.
/// [`Registry::from_drivers`] builds a custom table for embedders and
/// tests.
///
/// # Examples
///
/// ```
/// use connstr::{Driver, Registry};
///
/// let registry = Registry::new();
/// assert_eq!(registry.resolve("pg")?, Driver::Postgres);
/// assert_eq!(registry.resolve("postgres")?, Driver::Postgres);
///
/// let spec = registry.translate("ms://sa:pw@db1/westus/app")?;
/// assert_eq!(spec.dsn(), "sqlserver://sa:pw@db1/westus?database=app");
/// # Ok::<(), connstr::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Registry {
    drivers: Vec<DriverInfo>,
    by_alias: HashMap<String, usize>,
}

impl Registry {
    /// Creates a registry with the built-in driver table.
    pub fn new() -> Self {
        Self::from_drivers(builtin())
    }

    /// Creates a registry from an explicit driver table. When two
    /// descriptors claim the same token, the later one wins.
    pub fn from_drivers(drivers: Vec<DriverInfo>) -> Self {
        let mut by_alias = HashMap::new();
        for (idx, info) in drivers.iter().enumerate() {
            by_alias.insert(info.driver().as_str().to_owned(), idx);
            for alias in info.alias_names() {
                by_alias.insert(alias.to_owned(), idx);
            }
        }
        Self { drivers, by_alias }
    }

    /// Resolves a scheme token (alias, canonical name, or either with a
    /// permitted `+hint`) to its driver.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownScheme`] for unregistered tokens and for hints the
    /// driver's policy does not permit; the error carries the full token.
    pub fn resolve(&self, scheme: &str) -> Result<Driver> {
        self.lookup(scheme).map(|(info, _)| info.driver())
    }

    /// Parses a connection URL without generating a DSN.
    ///
    /// # Errors
    ///
    /// [`Error::MissingScheme`], [`Error::UnknownScheme`],
    /// [`Error::InvalidUrl`], or [`Error::InvalidEncoding`].
    pub fn parse(&self, raw: &str) -> Result<ParsedUrl> {
        let (token, rest) = parse::split_scheme(raw)?;
        let (info, hint) = self.lookup(token)?;
        parse::build(info.driver(), token, hint, rest)
    }

    /// Translates a connection URL all the way to a driver-native DSN.
    pub fn translate(&self, raw: &str) -> Result<ConnectionSpec> {
        let url = self.parse(raw)?;
        self.generate(&url)
    }

    /// Generates a DSN from an already-parsed URL.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownScheme`] if the URL's driver has no descriptor in
    /// this registry (it was parsed by a different one), plus whatever the
    /// driver's generator reports.
    pub fn generate(&self, url: &ParsedUrl) -> Result<ConnectionSpec> {
        let info = self.info(url.driver()).ok_or_else(|| Error::UnknownScheme {
            scheme: url.driver().to_string(),
        })?;
        dsn::generate(info, url)
    }

    /// Returns the descriptor for a driver, if registered.
    pub fn info(&self, driver: Driver) -> Option<&DriverInfo> {
        self.drivers.iter().find(|info| info.driver() == driver)
    }

    /// Returns all registered descriptors in registration order.
    pub fn drivers(&self) -> impl Iterator<Item = &DriverInfo> {
        self.drivers.iter()
    }

    fn lookup(&self, token: &str) -> Result<(&DriverInfo, Option<String>)> {
        let (base, hint) = match token.split_once('+') {
            Some((base, hint)) => (base, Some(hint)),
            None => (token, None),
        };
        let unknown = || {
            debug!(scheme = token, "scheme not in registry");
            Error::UnknownScheme {
                scheme: token.to_owned(),
            }
        };
        let Some(&idx) = self.by_alias.get(base) else {
            return Err(unknown());
        };
        let info = &self.drivers[idx];
        let hint = match (hint, info.hint_policy()) {
            (None, _) => None,
            (Some(h), HintPolicy::Any) => Some(h.to_owned()),
            (Some(h), HintPolicy::OneOf(allowed)) if allowed.contains(&h) => Some(h.to_owned()),
            (Some(_), _) => return Err(unknown()),
        };
        Ok((info, hint))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

fn builtin() -> Vec<DriverInfo> {
    use crate::dsn::{compact, file, keyval, url_like};

    vec![
        DriverInfo::new(Driver::Postgres, Shape::Database, url_like::postgres)
            .aliases(&["pg", "postgresql", "pgsql"])
            .opaque(),
        DriverInfo::new(Driver::MySql, Shape::Path, compact::mysql)
            .aliases(&["my", "mariadb", "maria", "percona", "aurora"])
            .opaque()
            .hints(HintPolicy::OneOf(&["tcp", "unix"])),
        DriverInfo::new(Driver::MyMysql, Shape::Database, compact::mymysql)
            .aliases(&["mymy"])
            .opaque(),
        DriverInfo::new(Driver::MsSql, Shape::InstanceDatabase, url_like::mssql)
            .aliases(&["ms", "sqlserver", "azuresql"]),
        DriverInfo::new(Driver::Oracle, Shape::Database, url_like::oracle)
            .aliases(&["or", "ora", "oci", "oci8", "odpi"]),
        DriverInfo::new(Driver::Sqlite3, Shape::Path, file::sqlite3)
            .aliases(&["sq", "sqlite", "file"])
            .opaque(),
        DriverInfo::new(Driver::DuckDb, Shape::Path, file::duckdb)
            .aliases(&["dk", "ddb"])
            .opaque(),
        DriverInfo::new(Driver::ClickHouse, Shape::Database, url_like::clickhouse)
            .aliases(&["ch"]),
        DriverInfo::new(Driver::Cassandra, Shape::Database, compact::cassandra)
            .aliases(&["ca", "scy", "scylla", "cql"]),
        DriverInfo::new(Driver::SapHana, Shape::Database, url_like::saphana)
            .aliases(&["sa", "hana", "hdb"]),
        DriverInfo::new(Driver::Exasol, Shape::Database, compact::exasol)
            .aliases(&["ex", "exa"]),
        DriverInfo::new(Driver::Firebird, Shape::Path, compact::firebird)
            .aliases(&["fb", "firebirdsql"]),
        DriverInfo::new(Driver::Snowflake, Shape::DatabaseSchema, compact::snowflake)
            .aliases(&["sf"]),
        DriverInfo::new(Driver::Odbc, Shape::Database, keyval::odbc).hints(HintPolicy::Any),
        DriverInfo::new(Driver::Adodb, Shape::Path, keyval::adodb)
            .aliases(&["ado", "oledb"])
            .opaque()
            .default_option("Provider", "MSDASQL.1"),
        DriverInfo::new(Driver::Presto, Shape::DatabaseSchema, url_like::presto)
            .aliases(&["pr", "prestodb"])
            .hints(HintPolicy::OneOf(&["http", "https"])),
        DriverInfo::new(Driver::VoltDb, Shape::Empty, compact::voltdb)
            .aliases(&["vo", "volt", "vdb"]),
        DriverInfo::new(Driver::Ignite, Shape::Database, url_like::ignite)
            .aliases(&["ig", "gridgain"]),
    ]
}

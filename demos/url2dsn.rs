//! Translate database URLs from the command line.
//!
//! ```text
//! cargo run --example url2dsn -- "pg://user:pass@localhost/mydb?sslmode=disable"
//! ```
//!
//! Prints the parsed model as JSON followed by the generated DSN for each
//! URL given. Set `RUST_LOG=connstr=debug` to watch the pipeline.

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let urls: Vec<String> = std::env::args().skip(1).collect();
    if urls.is_empty() {
        eprintln!("usage: url2dsn <url> [<url> ...]");
        eprintln!("example: url2dsn \"mysql:/var/run/mysqld/mysqld.sock/mydb\"");
        return ExitCode::from(2);
    }

    let mut failed = false;
    for raw in &urls {
        println!("{raw}");
        match connstr::parse(raw) {
            Ok(url) => match serde_json::to_string_pretty(&url) {
                Ok(json) => println!("{json}"),
                Err(err) => {
                    eprintln!("  cannot serialize: {err}");
                    failed = true;
                }
            },
            Err(err) => {
                eprintln!("  parse error: {err}");
                failed = true;
                continue;
            }
        }
        match connstr::translate(raw) {
            Ok(spec) => {
                println!("  driver:    {}", spec.driver());
                println!("  transport: {}", spec.transport());
                println!("  dsn:       {}", spec.dsn());
            }
            Err(err) => {
                eprintln!("  translate error: {err}");
                failed = true;
            }
        }
        println!();
    }

    if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}

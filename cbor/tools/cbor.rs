/*!
CBOR Tools - A CLI for working with CBOR data

# Commands

- `inspect`: Decode CBOR data and display it (Python literal, JSON, hex)
- `compose`: Convert JSON to CBOR binary

# Examples

```bash
# Inspect a CBOR file
cbor inspect data.cbor

# Inspect as JSON (lossy)
cbor inspect --format json data.cbor

# Convert JSON to CBOR
echo '{"name": "Alice", "age": 30}' | cbor compose -o data.cbor -

# Round-trip
cbor inspect --format json data.cbor | cbor compose - | cbor inspect -
```
*/

use clap::{Parser, Subcommand, ValueEnum};

mod compose;
mod inspect;
mod io;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Verbosity {
    /// Designates very low priority, often extremely verbose, information.
    #[value(name = "trace")]
    Trace,

    /// Designates lower priority information.
    #[value(name = "debug")]
    Debug,

    /// Designates useful information.
    #[value(name = "info")]
    Info,

    /// Designates hazardous situations.
    #[value(name = "warn")]
    Warn,

    /// Designates very serious errors.
    #[value(name = "error")]
    Error,
}

impl From<Verbosity> for tracing::Level {
    fn from(value: Verbosity) -> Self {
        match value {
            Verbosity::Trace => tracing::Level::TRACE,
            Verbosity::Debug => tracing::Level::DEBUG,
            Verbosity::Info => tracing::Level::INFO,
            Verbosity::Warn => tracing::Level::WARN,
            Verbosity::Error => tracing::Level::ERROR,
        }
    }
}

/// A CLI tool for working with CBOR data
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "A CLI tool for inspecting and composing CBOR data",
    long_about = "CBOR Tools provides utilities for working with CBOR (Concise Binary Object Representation) data.\n\n\
                  Supported items: integers up to 32-bit magnitudes, floats, text and byte strings,\n\
                  definite-length arrays and maps, and null. Tags are accepted and discarded."
)]
struct Cli {
    /// Output additional information on stderr, default 'info'.
    #[arg(short, long, global = true, num_args = 0..=1, require_equals = true, default_missing_value = "info")]
    verbose: Option<Verbosity>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode and display CBOR data in various formats
    Inspect(inspect::Command),

    /// Convert JSON to CBOR binary
    Compose(compose::Command),
}

fn init_logger(verbose: Option<Verbosity>) -> anyhow::Result<()> {
    if let Some(level) = verbose.map(tracing::Level::from) {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(level > tracing::Level::INFO)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| anyhow::anyhow!("Failed to set global default subscriber: {e}"))?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose)?;

    match cli.command {
        Commands::Inspect(args) => args.exec(),
        Commands::Compose(args) => args.exec(),
    }
}

//! STIX bundle CLI
//!
//! Builds the reference threat-intelligence scenario and prints it as JSON.

mod scenario;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use stix_core::{serialize, BundleConfig, SerializerConfig, DEFAULT_INDENT, DEFAULT_SPEC_VERSION};

#[derive(Parser)]
#[command(name = "stix-bundle")]
#[command(author, version, about = "Build and serialize STIX threat-intelligence bundles", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level (0-3)
    #[arg(short, long, default_value = "1")]
    verbose: u8,

    /// Value of the bundle's spec_version property
    #[arg(long, env = "STIX_SPEC_VERSION", default_value = DEFAULT_SPEC_VERSION)]
    spec_version: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the reference scenario and print it as JSON
    Demo {
        /// Print without whitespace
        #[arg(long)]
        compact: bool,

        /// Spaces per nesting level in pretty output
        #[arg(long, env = "STIX_INDENT", default_value_t = DEFAULT_INDENT)]
        indent: usize,

        /// Refuse to print a bundle with dangling or malformed references
        #[arg(long)]
        validate: bool,
    },

    /// Validate the reference scenario and show object counts
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = BundleConfig {
        spec_version: cli.spec_version,
    };

    match cli.command {
        Commands::Demo {
            compact,
            indent,
            validate,
        } => {
            run_demo(config, compact, indent, validate)?;
        }
        Commands::Check => {
            run_check(config)?;
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout carries only JSON; `RUST_LOG` overrides `-v`
fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => LevelFilter::ERROR,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();
}

fn run_demo(config: BundleConfig, compact: bool, indent: usize, validate: bool) -> Result<()> {
    let bundle = scenario::build(config);

    let serializer = if compact {
        SerializerConfig::compact()
    } else {
        SerializerConfig::pretty().with_indent(indent)
    };

    let json = if validate {
        serialize::to_string_checked(&bundle, &serializer)?
    } else {
        serialize::to_string(&bundle, &serializer)?
    };

    println!("{}", json);
    Ok(())
}

fn run_check(config: BundleConfig) -> Result<()> {
    let bundle = scenario::build(config);

    bundle.validate()?;
    info!("Bundle {} passed validation", bundle.id());

    let stats = bundle.stats();
    println!("Bundle:      {}", bundle.id());
    println!("Spec:        {}", bundle.spec_version());
    println!("Objects:     {}", stats.total_objects);
    for (kind, count) in &stats.by_type {
        println!("  {:<16} {}", kind, count);
    }
    println!("References:  {}", stats.total_references);
    println!("Fingerprint: {}", bundle.fingerprint()?);

    Ok(())
}

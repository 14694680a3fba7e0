//! CAN Codec CLI Application
//!
//! Command-line front end for the can-codec library:
//! - Lists the compiled-in catalogs
//! - Packs signal values into hex payloads
//! - Unpacks hex payloads into raw and physical values
//! - Validates catalog invariants

use anyhow::{bail, Context, Result};
use can_codec::codec;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod config;
mod frame;
mod report;

use config::{AppConfig, OutputFormat};
use report::FrameReport;

/// CAN Codec - Pack and unpack CAN frames from compiled-in catalogs
#[derive(Parser, Debug)]
#[command(name = "can-codec")]
#[command(about = "Pack and unpack CAN frames from compiled-in catalogs", long_about = None)]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List catalogs with their frames and signals
    List {
        /// Only list this catalog
        #[arg(long)]
        catalog: Option<String>,
    },

    /// Pack signal values into a payload, starting from catalog defaults
    Pack {
        #[arg(long)]
        catalog: String,

        /// Frame name or id (decimal or 0x-prefixed)
        #[arg(long)]
        frame: String,

        /// Raw bus value (can be repeated)
        #[arg(long = "raw", value_name = "SIGNAL=INT")]
        raw: Vec<String>,

        /// Physical value or choice label (can be repeated)
        #[arg(long = "set", value_name = "SIGNAL=VALUE")]
        set: Vec<String>,
    },

    /// Unpack a hex payload
    Unpack {
        #[arg(long)]
        catalog: String,

        /// Frame name or id (decimal or 0x-prefixed)
        #[arg(long)]
        frame: String,

        /// Payload bytes in hex
        payload: String,
    },

    /// Validate every compiled-in catalog
    Validate,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    log::debug!("CAN Codec CLI v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using codec library v{}", can_codec::VERSION);

    let mut config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };
    if args.json {
        config.output.format = OutputFormat::Json;
    }

    match &args.command {
        Command::List { catalog } => list_mode(catalog.as_deref(), &config),
        Command::Pack {
            catalog,
            frame,
            raw,
            set,
        } => pack_mode(catalog, frame, raw, set, &config),
        Command::Unpack {
            catalog,
            frame,
            payload,
        } => unpack_mode(catalog, frame, payload, &config),
        Command::Validate => validate_mode(),
    }
}

fn list_mode(catalog: Option<&str>, config: &AppConfig) -> Result<()> {
    let catalogs = match catalog {
        Some(name) => vec![frame::resolve_catalog(name)?],
        None => can_codec::catalog::all().to_vec(),
    };

    for catalog in catalogs {
        println!("{}", report::render_catalog(catalog, &config.output)?);
    }
    Ok(())
}

fn pack_mode(
    catalog: &str,
    selector: &str,
    raw: &[String],
    set: &[String],
    config: &AppConfig,
) -> Result<()> {
    let catalog = frame::resolve_catalog(catalog)?;
    let frame = frame::resolve_frame(catalog, selector)?;
    let values = frame::build_values(frame, raw, set)?;

    let mut payload = vec![0u8; frame.length];
    codec::pack(frame, &mut payload, values.as_slice())
        .with_context(|| format!("Failed to pack frame '{}'", frame.name))?;

    if config.pack.check_range && !codec::is_in_range(frame, values.as_slice()) {
        for (signal, raw) in frame.signals.iter().zip(&values) {
            if !signal.is_in_range(*raw) {
                log::warn!(
                    "{}.{} = {} is outside [{}, {}]",
                    frame.name,
                    signal.name,
                    signal.decode(*raw),
                    signal.minimum,
                    signal.maximum
                );
            }
        }
        if config.pack.strict {
            bail!("frame '{}' has out-of-range signals", frame.name);
        }
    }

    // Values as masked to each signal's width
    let mut packed = vec![0u64; frame.signals.len()];
    codec::unpack(frame, packed.as_mut_slice(), &payload)
        .with_context(|| format!("Failed to unpack frame '{}'", frame.name))?;
    for ((signal, requested), actual) in frame.signals.iter().zip(&values).zip(&packed) {
        if requested != actual {
            log::warn!(
                "{}.{} raw {} does not fit {} bits, packed as {}",
                frame.name,
                signal.name,
                report::RawValue::new(signal, *requested),
                signal.bit_length,
                report::RawValue::new(signal, *actual)
            );
        }
    }

    let report = FrameReport::new(frame, &payload, &packed, config.output.uppercase_hex);
    match config.output.format {
        OutputFormat::Json => println!("{}", report::render_frame(&report, &config.output)?),
        OutputFormat::Text => println!("{}", report.payload),
    }
    Ok(())
}

fn unpack_mode(catalog: &str, selector: &str, payload: &str, config: &AppConfig) -> Result<()> {
    let catalog = frame::resolve_catalog(catalog)?;
    let frame = frame::resolve_frame(catalog, selector)?;
    let bytes = report::parse_payload(payload)
        .with_context(|| format!("Invalid hex payload: {:?}", payload))?;

    let mut values = vec![0u64; frame.signals.len()];
    codec::unpack(frame, values.as_mut_slice(), &bytes)
        .with_context(|| format!("Failed to unpack frame '{}'", frame.name))?;

    if bytes.len() > frame.length {
        log::info!(
            "Ignoring {} trailing bytes past {} bytes of '{}'",
            bytes.len() - frame.length,
            frame.length,
            frame.name
        );
    }

    let report = FrameReport::new(
        frame,
        &bytes[..frame.length],
        &values,
        config.output.uppercase_hex,
    );
    println!("{}", report::render_frame(&report, &config.output)?);
    Ok(())
}

fn validate_mode() -> Result<()> {
    let mut failures = 0;
    for catalog in can_codec::catalog::all() {
        match catalog.validate() {
            Ok(()) => println!(
                "✓ {} ({} frames, {} signals)",
                catalog.name,
                catalog.frames.len(),
                catalog.num_signals()
            ),
            Err(e) => {
                println!("✗ {}", catalog.name);
                eprintln!("Error validating catalog: {}", e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{} catalog(s) failed validation", failures);
    }
    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

//! STREC CLI - seismotectonic regime classification.
//!
//! Classifies one hypocenter or a batch of events against a data bundle and
//! prints the assessments as JSON on stdout. Logs go to stderr and are
//! filtered with `RUST_LOG`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing::info;
use tracing_subscriber::EnvFilter;

use strec::regime::{EventInput, Hypocenter, RegimeEngine, StrecConfig};
use strec::remote::ComcatClient;
use strec::store::load_bundle_cached;
use strec::tensor::{MomentTensor, TensorComponents};

/// Seismotectonic regime classification of earthquake hypocenters.
#[derive(Parser)]
#[command(name = "strec")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON data bundle with region layers, slab grids, trenches and catalog.
    #[arg(short, long, global = true, default_value = "strec-bundle.json")]
    data: PathBuf,

    /// Optional JSON configuration overriding the defaults.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a single hypocenter.
    Classify {
        /// Latitude in degrees.
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in degrees.
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Depth in km (negative values are treated as 0).
        #[arg(long, allow_hyphen_values = true)]
        depth: f64,

        /// Magnitude.
        #[arg(short, long, default_value = "5.0")]
        magnitude: f64,

        /// Moment tensor components: mrr mtt mpp mrt mrp mtp (N-m).
        #[arg(long, num_args = 6, value_names = ["MRR", "MTT", "MPP", "MRT", "MRP", "MTP"], allow_hyphen_values = true)]
        tensor: Option<Vec<f64>>,

        /// ComCat event ID used to fetch a moment tensor.
        #[arg(long)]
        event_id: Option<String>,
    },

    /// Fetch an event by ID and classify it at its catalog location.
    Event {
        /// ComCat event ID.
        event_id: String,

        /// Magnitude.
        #[arg(short, long, default_value = "5.0")]
        magnitude: f64,
    },

    /// Classify every event in a JSON array.
    Batch {
        /// JSON file holding an array of events.
        #[arg(short, long)]
        input: PathBuf,

        /// Allow tensor lookup for events that carry an event ID.
        #[arg(long)]
        remote: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    let output = match cli.command {
        Commands::Classify {
            lat,
            lon,
            depth,
            magnitude,
            tensor,
            event_id,
        } => {
            let engine = build_engine(&cli.data, config, event_id.is_some())?;
            let tensor = match tensor.as_deref() {
                Some(&[mrr, mtt, mpp, mrt, mrp, mtp]) => Some(MomentTensor::from_components(TensorComponents::new(
                    mrr, mtt, mpp, mrt, mrp, mtp,
                ))),
                Some(other) => bail!("expected 6 tensor components, got {}", other.len()),
                None => None,
            };
            let hypo = Hypocenter::new(lat, lon, depth, magnitude);
            let assessment = engine
                .classify_with_event_id(&hypo, tensor, event_id.as_deref())
                .with_context(|| format!("failed to classify ({lat}, {lon}, {depth})"))?;
            serde_json::to_value(&assessment)?
        }
        Commands::Event { event_id, magnitude } => {
            let engine = build_engine(&cli.data, config, true)?;
            let assessment = engine
                .classify_event(&event_id, magnitude)
                .with_context(|| format!("failed to classify event {event_id}"))?;
            serde_json::to_value(&assessment)?
        }
        Commands::Batch { input, remote } => {
            let engine = build_engine(&cli.data, config, remote)?;
            let text = fs::read_to_string(&input).with_context(|| format!("failed to read {}", input.display()))?;
            let events: Vec<EventInput> =
                serde_json::from_str(&text).with_context(|| format!("malformed events in {}", input.display()))?;

            let start = Instant::now();
            let results = engine.classify_batch(&events);
            let failed = results.iter().filter(|r| r.is_err()).count();
            info!(
                events = events.len(),
                failed,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "batch classified"
            );

            let rows = results
                .into_iter()
                .map(|r| match r {
                    Ok(a) => serde_json::to_value(&a),
                    Err(e) => Ok(json!({ "error": e.to_string() })),
                })
                .collect::<Result<Vec<Value>, _>>()?;
            Value::Array(rows)
        }
    };

    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<StrecConfig> {
    let Some(path) = path else {
        return Ok(StrecConfig::default());
    };
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    StrecConfig::from_json_str(&text).with_context(|| format!("malformed config in {}", path.display()))
}

fn build_engine(data: &Path, config: StrecConfig, remote: bool) -> Result<RegimeEngine> {
    let bundle = load_bundle_cached(data).with_context(|| format!("failed to load bundle {}", data.display()))?;
    let client = if remote {
        Some(ComcatClient::new(config.remote.clone()).context("failed to build remote client")?)
    } else {
        None
    };
    let mut engine = bundle.build_engine(config)?;
    if let Some(client) = client {
        engine = engine.with_remote(client);
    }
    Ok(engine)
}

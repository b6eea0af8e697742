//! `diskhealth` -- compact and annotate exported device health records.
//!
//! # Environment variables
//!
//! | Variable              | Required | Default          | Description                              |
//! |-----------------------|----------|------------------|------------------------------------------|
//! | `DISKHEALTH_METADATA` | no       | built-in table   | YAML threshold table replacing the built-in one |
//! | `DISKHEALTH_WORKERS`  | no       | `4`              | Devices processed concurrently           |
//! | `RUST_LOG`            | no       | `diskhealth=info`| Log filter                               |

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use diskhealth_cli::{process_devices, read_collector_payloads, read_devices, render_devices};
use diskhealth_metadata::{ata_metadata, AtaMetadataTable};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "diskhealth")]
#[command(about = "Compact SMART history and annotate attribute status")]
struct Args {
    /// JSON array of devices, each with snapshots ordered newest first
    input: PathBuf,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON object of collector payloads keyed by device WWN
    #[arg(short, long)]
    collector: Option<PathBuf>,

    /// YAML threshold table replacing the built-in ATA metadata
    #[arg(short, long, env = "DISKHEALTH_METADATA")]
    metadata: Option<PathBuf>,

    /// Maximum number of devices processed at once
    #[arg(short, long, env = "DISKHEALTH_WORKERS", default_value = "4")]
    workers: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "diskhealth=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let table = match &args.metadata {
        Some(path) => Arc::new(AtaMetadataTable::from_path(path)?),
        None => Arc::new(ata_metadata().clone()),
    };

    let devices = read_devices(&args.input)?;
    let payloads = match &args.collector {
        Some(path) => read_collector_payloads(path)?,
        None => Default::default(),
    };

    tracing::info!(
        devices = devices.len(),
        payloads = payloads.len(),
        thresholds = table.len(),
        workers = args.workers,
        "processing devices"
    );

    let processed = process_devices(devices, payloads, table, args.workers).await?;
    let rendered = render_devices(&processed)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote processed devices");
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

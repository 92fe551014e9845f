//! # Friend Management Node
//!
//! Main entry point: loads configuration, installs logging, wires the
//! subsystems and serves HTTP until Ctrl+C.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults → TOML file → environment → flags)
//! 2. Initialize logging
//! 3. Open the graph store and build the subsystems (Level 0 → Level 2)
//! 4. Start the API Gateway
//! 5. Wait for Ctrl+C, then drain in-flight requests

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use node_runtime::{NodeConfig, StorageBackend, SubsystemContainer};

/// How long in-flight requests get to finish after Ctrl+C.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

#[derive(Parser, Debug)]
#[command(name = "node-runtime")]
#[command(about = "Friend management service", long_about = None)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// HTTP port (overrides config and FM_HTTP_PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Storage backend: memory or rocksdb
    #[arg(long)]
    storage: Option<StorageBackend>,

    /// Data directory for the rocksdb backend
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Default log filter when RUST_LOG is unset, e.g. "debug"
    #[arg(long)]
    log: Option<String>,
}

/// The node runtime owning the subsystems and the shutdown signal.
struct NodeRuntime {
    container: Arc<SubsystemContainer>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl NodeRuntime {
    fn new(container: SubsystemContainer) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            container: Arc::new(container),
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// Spawn the API Gateway. The task ends once shutdown is signalled and
    /// open requests have drained, or when binding fails.
    fn start(&self) -> JoinHandle<Result<()>> {
        info!("===========================================");
        info!("  Friend Management Node v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");
        info!("Storage: {}", self.container.config.storage.backend);
        if self.container.config.storage.backend == StorageBackend::RocksDb {
            info!("Data Dir: {:?}", self.container.config.storage.data_dir);
        }

        let gateway = Arc::clone(&self.container.api_gateway);
        let mut shutdown = self.shutdown_rx.clone();
        tokio::spawn(async move {
            gateway
                .start(async move {
                    // a dropped sender also counts as shutdown
                    let _ = shutdown.changed().await;
                })
                .await
                .context("API Gateway failed")
        })
    }

    /// Signal shutdown and wait for the gateway to drain.
    async fn shutdown(&self, server: JoinHandle<Result<()>>) {
        info!("Initiating graceful shutdown...");

        if let Err(e) = self.shutdown_tx.send(true) {
            error!("Failed to send shutdown signal: {}", e);
        }

        match tokio::time::timeout(SHUTDOWN_GRACE, server).await {
            Ok(Ok(Ok(()))) => info!("Shutdown complete"),
            Ok(Ok(Err(e))) => error!("API Gateway stopped with error: {:#}", e),
            Ok(Err(e)) => error!("API Gateway task panicked: {}", e),
            Err(_) => warn!(
                grace_secs = SHUTDOWN_GRACE.as_secs(),
                "In-flight requests did not drain in time"
            ),
        }
    }
}

/// Load configuration from file, environment and flags, in that order.
fn load_config(args: &Args) -> Result<NodeConfig> {
    let mut config = match &args.config {
        Some(path) => NodeConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => NodeConfig::default(),
    };

    config
        .apply_env()
        .context("Invalid environment override")?;

    if let Some(port) = args.port {
        config.gateway.http.port = port;
    }
    if let Some(backend) = args.storage {
        config.storage.backend = backend;
    }
    if let Some(dir) = &args.data_dir {
        config.storage.data_dir = dir.clone();
    }
    if let Some(level) = &args.log {
        config.log_level = level.clone();
    }

    Ok(config)
}

fn init_logging(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .with_context(|| format!("Invalid log filter {:?}", default_level))?;

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args)?;
    init_logging(&config.log_level)?;

    let container =
        SubsystemContainer::new(config).context("Failed to initialize subsystems")?;
    let runtime = NodeRuntime::new(container);
    let mut server = runtime.start();

    info!("Node is running. Press Ctrl+C to stop.");
    tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for Ctrl+C")?;
        }
        finished = &mut server => {
            // the gateway only stops on its own when it could not start
            return finished.context("API Gateway task panicked")?;
        }
    }

    runtime.shutdown(server).await;
    Ok(())
}

use clap::{Parser, Subcommand};
use rfp_procure_rust::AppConfig;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;

mod cli;
mod display;

#[derive(Parser)]
#[command(name = "rfp-procure", about = "Create RFPs, send them to vendors and evaluate the responses")]
pub struct Cli {
    /// Backend base URL (overrides rfp-procure.toml and RFP__BACKEND__BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Seconds between response polls while an RFP is SENT
    #[arg(long)]
    poll_interval: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Vendor and RFP totals
    Dashboard,
    /// Manage vendors
    Vendors {
        #[command(subcommand)]
        action: VendorAction,
    },
    /// Manage RFPs
    Rfps {
        #[command(subcommand)]
        action: RfpCommand,
    },
}

#[derive(Subcommand)]
pub enum VendorAction {
    /// List all vendors
    List,
    /// Show one vendor
    Show { id: i64 },
    /// Add a vendor
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Rating between 0 and 5
        #[arg(long)]
        rating: Option<f64>,
    },
    /// Change a vendor's name, email or rating
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        rating: Option<f64>,
    },
    /// Remove a vendor
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum RfpCommand {
    /// List all RFPs
    List,
    /// Show an RFP with its responses
    Show { id: i64 },
    /// Create an RFP from a plain-English description
    Create {
        #[arg(long)]
        title: String,
        /// Description text (at least 50 characters)
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        text: Option<String>,
        /// Read the description from a file
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Delete an RFP
    Delete { id: i64 },
    /// Send a DRAFT RFP to vendors
    Send {
        id: i64,
        /// Vendor id, repeat for several vendors
        #[arg(long = "vendor")]
        vendors: Vec<i64>,
    },
    /// Fetch the current vendor responses once
    Responses { id: i64 },
    /// Evaluate the responses of a SENT RFP
    Evaluate { id: i64 },
    /// Follow a SENT RFP, printing responses as they arrive (Ctrl-C to stop)
    Watch { id: i64 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 日志输出到 stderr, 不干扰命令结果
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // 加载配置, 命令行参数优先
    let mut config = AppConfig::load()?;
    if let Some(base_url) = cli.base_url {
        config.backend.base_url = base_url;
    }
    if let Some(secs) = cli.poll_interval {
        config.poller.interval_secs = secs;
    }
    info!("Using backend {}", config.backend.base_url);

    cli::run(cli.command, &config).await
}

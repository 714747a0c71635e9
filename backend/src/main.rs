//! DevPay CLI - Send payment proofs to the seller
//!
//! # Main Commands
//!
//! ```bash
//! devpay wizard                     # Interactive checkout (select → detail → proof)
//! devpay submit --method dana ...   # One-shot checkout
//! devpay serve                      # Start the proof relay (port 8787)
//! ```
//!
//! # Helper Commands
//!
//! ```bash
//! devpay methods --reveal           # Show payment methods and accounts
//! devpay qr                         # Download the QRIS image
//! ```

use clap::{Parser, Subcommand};
use devpay::{
    render_instructions, render_methods, run_checkout, run_wizard, server, BackendConfig,
    CheckoutError, CheckoutRequest, HttpSubmissionClient, DEFAULT_PORT,
};
use devpay_core::{FormError, PaymentMethod, QR_DOWNLOAD_NAME};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "devpay")]
#[command(about = "Submit proof of payment for a DevPay order", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the available payment methods and receiving accounts
    Methods {
        /// Show the full wallet number instead of the masked one
        #[arg(long)]
        reveal: bool,
    },

    /// Submit a payment proof in one go
    Submit {
        /// Payment method (dana, qris, @wallet/dana, @scan/qris)
        #[arg(short, long, value_parser = parse_method)]
        method: PaymentMethod,

        /// Product name
        #[arg(short, long)]
        product: String,

        /// Amount transferred (digits, '.' or ',')
        #[arg(short, long)]
        amount: String,

        /// Optional note (buyer name, order reference...)
        #[arg(short, long)]
        note: Option<String>,

        /// Proof of payment image
        #[arg(long)]
        attachment: PathBuf,

        /// Relay URL, overrides DEVPAY_* endpoint variables
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// Interactive checkout wizard
    Wizard {
        /// Relay URL, overrides DEVPAY_* endpoint variables
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// Download the QRIS image
    Qr {
        /// Output file
        #[arg(short, long, default_value = QR_DOWNLOAD_NAME)]
        output: PathBuf,
    },

    /// Start the proof relay server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
}

fn parse_method(raw: &str) -> Result<PaymentMethod, String> {
    raw.parse()
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match BackendConfig::from_env() {
        Ok(config) => run(cli.command, config).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(command: Commands, config: BackendConfig) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Methods { reveal } => cmd_methods(&config, reveal),

        Commands::Submit {
            method,
            product,
            amount,
            note,
            attachment,
            endpoint,
        } => {
            let request = CheckoutRequest {
                method,
                product_name: product,
                amount,
                note,
                attachment,
            };
            cmd_submit(with_endpoint(config, endpoint), request).await
        }

        Commands::Wizard { endpoint } => cmd_wizard(with_endpoint(config, endpoint)).await,

        Commands::Qr { output } => cmd_qr(&config, &output).await,

        Commands::Serve { port } => cmd_serve(&config, port).await,
    }
}

fn with_endpoint(config: BackendConfig, endpoint: Option<String>) -> BackendConfig {
    match endpoint {
        Some(url) => config.with_relay_url(url),
        None => config,
    }
}

fn cmd_methods(config: &BackendConfig, reveal: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut out = std::io::stdout().lock();
    render_methods(&mut out)?;
    for method in PaymentMethod::ALL {
        writeln!(out)?;
        render_instructions(&mut out, &config.directory, method, reveal)?;
    }
    Ok(())
}

async fn cmd_submit(config: BackendConfig, request: CheckoutRequest) -> Result<(), Box<dyn std::error::Error>> {
    let client = HttpSubmissionClient::from_config(&config)?;
    eprintln!("📤 Sending proof to {}", client.target().describe());

    let mut out = std::io::stdout();
    match run_checkout(&mut out, &config.directory, &client, request).await {
        Ok(_) => Ok(()),
        Err(CheckoutError::Form(FormError::Transport(e))) => {
            Err(format!("{} (nothing was recorded, run the command again)", e).into())
        }
        Err(e) => Err(e.into()),
    }
}

async fn cmd_wizard(config: BackendConfig) -> Result<(), Box<dyn std::error::Error>> {
    let client = HttpSubmissionClient::from_config(&config)?;
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut out = std::io::stdout();

    match run_wizard(&mut input, &mut out, &config.directory, &client).await {
        Ok(done) => {
            eprintln!("✨ {} transaction(s) completed", done.len());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

async fn cmd_qr(config: &BackendConfig, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let url = &config.directory.qris.image_url;
    eprintln!("📥 Downloading QRIS image: {}", url);

    let http = reqwest::Client::builder().timeout(config.timeout).build()?;
    let response = http.get(url).send().await?.error_for_status()?;
    let bytes = response.bytes().await?;

    tokio::fs::write(output, &bytes).await?;
    eprintln!("💾 Saved to: {} ({} bytes)", output.display(), bytes.len());
    Ok(())
}

async fn cmd_serve(config: &BackendConfig, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let client = HttpSubmissionClient::from_config(config)?;
    server::start_server(port, client).await
}

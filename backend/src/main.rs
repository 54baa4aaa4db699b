//! Platescan CLI - serve the upload API or use it from the terminal
//!
//! ```bash
//! platescan serve                  # Start HTTP server (port 5000)
//! platescan upload car.jpg         # Upload an image, print its plate
//! platescan ocr car.jpg            # Run OCR on a local image, no server
//! ```

use clap::{Parser, Subcommand};
use platescan::config::DEFAULT_PORT;
use platescan::{load_file, recognized, HttpTransport, OcrClient, ServerConfig, TerminalView};
use platescan_core::UploadTrigger;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "platescan")]
#[command(about = "Upload vehicle photos and read their license plates", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },

    /// Upload an image to a running server and print the plate
    Upload {
        /// Image file (omit to send an empty upload)
        file: Option<PathBuf>,

        /// Server base URL
        #[arg(short, long, default_value = "http://localhost:5000")]
        server: String,
    },

    /// Run OCR on a local image using OCR_API_KEY
    Ocr {
        /// Image file
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { port } => cmd_serve(port).await,
        Commands::Upload { file, server } => cmd_upload(file.as_deref(), &server).await,
        Commands::Ocr { file } => cmd_ocr(&file).await,
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn cmd_serve(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;
    platescan::server::start_server(config, port).await
}

async fn cmd_upload(file: Option<&Path>, server: &str) -> Result<(), Box<dyn std::error::Error>> {
    let file = match file {
        Some(path) => {
            eprintln!("📤 Uploading {} to {}", path.display(), server);
            Some(load_file(path).await?)
        }
        None => {
            eprintln!("⚠️  No file given, sending an empty upload to {}", server);
            None
        }
    };

    let trigger = UploadTrigger::new(TerminalView::new(file), HttpTransport::new(server));

    // The view has already printed a recognized plate
    recognized(trigger.trigger().await)?;

    Ok(())
}

async fn cmd_ocr(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;
    let client = OcrClient::from_config(&config);

    let file = load_file(path).await?;
    eprintln!("🔍 Reading plate: {} ({} bytes)", file.name, file.bytes.len());

    let plate = client.read_plate(&file.name, &file.bytes).await?;
    println!("{}", plate);

    Ok(())
}

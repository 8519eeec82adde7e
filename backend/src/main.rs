//! upload-sink CLI
//!
//! ```bash
//! upload-sink serve                       # listen on port 3000
//! upload-sink serve --max-bytes 1048576   # answer 413 above 1 MB
//! upload-sink serve --field attachment    # expect the file under another field
//! ```

use clap::{Parser, Subcommand};
use upload_sink::config::{DEFAULT_FIELD, DEFAULT_MAX_BYTES};
use upload_sink::SinkConfig;

#[derive(Parser)]
#[command(name = "upload-sink")]
#[command(about = "Development upload target for the uploadkit widgets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Largest accepted file in bytes
        #[arg(long, default_value_t = DEFAULT_MAX_BYTES)]
        max_bytes: u64,

        /// Multipart field carrying the file
        #[arg(long, default_value = DEFAULT_FIELD)]
        field: String,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve {
            port,
            max_bytes,
            field,
        } => upload_sink::server::start_server(port, SinkConfig { max_bytes, field }).await,
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

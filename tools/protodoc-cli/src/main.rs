mod commands;
mod format;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{encode::EncodeArgs, schema::SchemaArgs, update::UpdateArgs};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "protodoc", about = "Preview protobuf messages as tag-keyed documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the document schema derived from a protobuf message type
    Schema(SchemaArgs),
    /// Encode a JSON-formatted message into a document
    Encode(EncodeArgs),
    /// Build the update directive for a partial message and field mask
    Update(UpdateArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Schema(args) => args.run(),
        Commands::Encode(args) => args.run(),
        Commands::Update(args) => args.run(),
    }
}

use std::{fs, path::PathBuf};

use anyhow::Result;
use clap::Args;
use protodoc::model::format_schema;

use super::SchemaSource;

#[derive(Args)]
pub struct SchemaArgs {
    #[command(flatten)]
    source: SchemaSource,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl SchemaArgs {
    pub fn run(self) -> Result<()> {
        let desc = self.source.descriptor()?;
        let schema = self.source.schema(&desc)?;
        let text = format_schema(&schema)?;

        match self.output {
            Some(path) => fs::write(path, text)?,
            None => print!("{text}"),
        }
        Ok(())
    }
}

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;
use protodoc::model::FieldMask;

use super::{SchemaSource, read_message};
use crate::format::directive_to_json;

#[derive(Args)]
pub struct UpdateArgs {
    #[command(flatten)]
    source: SchemaSource,

    /// JSON message holding the new values (stdin if not specified)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Comma-separated update mask
    #[arg(long, value_delimiter = ',')]
    mask: Vec<String>,
}

impl UpdateArgs {
    pub fn run(self) -> Result<()> {
        if self.mask.is_empty() {
            bail!("--mask is required for update");
        }
        let desc = self.source.descriptor()?;
        let schema = self.source.schema(&desc)?;
        let codec = self.source.codec()?;
        let message = read_message(self.input.as_ref(), &desc, &schema)?;
        let mask = FieldMask::parse(&self.mask)?;

        let directive = codec.build_update(&message, &mask)?;
        println!("{}", serde_json::to_string_pretty(&directive_to_json(&directive))?);
        Ok(())
    }
}

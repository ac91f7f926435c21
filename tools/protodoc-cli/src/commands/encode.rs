use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use protodoc::{codec::IndexPolicy, model::FieldMask};

use super::{SchemaSource, read_message};
use crate::format::document_to_json;

#[derive(Args)]
pub struct EncodeArgs {
    #[command(flatten)]
    source: SchemaSource,

    /// JSON message file (stdin if not specified)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Comma-separated field mask, e.g. description,attributes.1.value
    #[arg(long, value_delimiter = ',')]
    mask: Vec<String>,

    /// Keep masked-out repeated elements as null placeholders
    #[arg(long)]
    preserve_index: bool,
}

impl EncodeArgs {
    pub fn run(self) -> Result<()> {
        let desc = self.source.descriptor()?;
        let schema = self.source.schema(&desc)?;
        let codec = self.source.codec()?;
        let message = read_message(self.input.as_ref(), &desc, &schema)?;

        let mask = if self.mask.is_empty() {
            None
        } else {
            Some(FieldMask::parse(&self.mask)?)
        };
        let policy = if self.preserve_index {
            IndexPolicy::PreserveHoles
        } else {
            IndexPolicy::Compact
        };

        let document = codec.encode(&message, mask.as_ref(), policy);
        println!("{}", serde_json::to_string_pretty(&document_to_json(&document))?);
        Ok(())
    }
}

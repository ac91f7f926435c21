pub mod encode;
pub mod schema;
pub mod update;

use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Args;
use prost_reflect::{DynamicMessage, MessageDescriptor};
use protodoc::{
    codec::{Codec, KeyLayout},
    model::{Message, SchemaRef},
    protobuf::{
        message_from_dynamic, parse_message_descriptor, schema_from_descriptor_with_identity,
    },
};

/// Where the message type comes from and how documents are keyed.
#[derive(Args)]
pub struct SchemaSource {
    /// Serialized FileDescriptorSet (protoc --descriptor_set_out)
    #[arg(short, long)]
    descriptor_set: PathBuf,

    /// Fully-qualified message name
    #[arg(short, long)]
    message: String,

    /// Top-level string field stored under the identity key
    #[arg(long)]
    identity: Option<String>,

    /// Prefix of tag keys
    #[arg(long, default_value = "_")]
    tag_prefix: String,

    /// Document key holding the identity
    #[arg(long, default_value = "_id")]
    identity_key: String,
}

impl SchemaSource {
    pub fn descriptor(&self) -> Result<MessageDescriptor> {
        let data = fs::read(&self.descriptor_set)
            .with_context(|| format!("reading {}", self.descriptor_set.display()))?;
        Ok(parse_message_descriptor(&self.message, &data)?)
    }

    pub fn schema(&self, desc: &MessageDescriptor) -> Result<SchemaRef> {
        Ok(schema_from_descriptor_with_identity(
            desc,
            self.identity.as_deref(),
        )?)
    }

    pub fn codec(&self) -> Result<Codec> {
        let layout = KeyLayout::new(self.tag_prefix.as_str(), self.identity_key.as_str())?;
        Ok(Codec::new(layout))
    }
}

/// Read a JSON-formatted protobuf message from `input`, or stdin when absent.
pub fn read_message(
    input: Option<&PathBuf>,
    desc: &MessageDescriptor,
    schema: &SchemaRef,
) -> Result<Message> {
    let text = match input {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
        }
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let mut de = serde_json::Deserializer::from_str(&text);
    let dynamic = DynamicMessage::deserialize(desc.clone(), &mut de)?;
    de.end()?;
    Ok(message_from_dynamic(&dynamic, schema)?)
}

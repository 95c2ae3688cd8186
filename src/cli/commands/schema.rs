//! Implementation of the `appconf schema` command.

use anyhow::Result;
use clap::Args;
use console::style;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{FieldKind, FieldSpec};
use crate::infrastructure::config::ConfigLoader;

#[derive(Args, Debug, Default)]
pub struct SchemaArgs {
    /// Only list required variables
    #[arg(long)]
    pub required: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct SchemaOutput {
    pub variables: Vec<FieldSpec>,
}

impl CommandOutput for SchemaOutput {
    fn to_human(&self) -> String {
        self.variables
            .iter()
            .map(|field| {
                let kind = match field.kind {
                    FieldKind::String => "string",
                    FieldKind::Number => "number",
                    FieldKind::Integer { .. } => "integer",
                };
                let mut line = format!("{:<32} {kind:<8}", style(field.key).bold());
                if field.required {
                    line.push_str(" required");
                }
                if let Some(default) = &field.default {
                    line.push_str(&format!(" default={default}"));
                }
                if !field.allowed.is_empty() {
                    line.push_str(&format!(" one of [{}]", field.allowed.join(", ")));
                }
                line.push_str(&format!("\n    {}", field.description));
                line
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn execute(args: &SchemaArgs, loader: &ConfigLoader, json_mode: bool) -> Result<()> {
    let variables = loader
        .schema()
        .fields()
        .iter()
        .filter(|field| !args.required || field.required)
        .cloned()
        .collect();
    output(&SchemaOutput { variables }, json_mode);
    Ok(())
}

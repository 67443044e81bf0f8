//! Check command: build a node type from a definition and apply values

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use paramgraph_core::BoundingMethod;

use crate::definition::{parse_assignment, NodeTypeDefinition};
use crate::output::{format_values, ValueRow};
use crate::AppContext;

#[derive(Args)]
pub struct CheckArgs {
    /// Node type definition file (TOML)
    pub definition: PathBuf,

    /// Assign a parameter value; repeat to apply several in order
    #[arg(short, long = "set", value_name = "NAME=VALUE")]
    pub set: Vec<String>,

    /// Pull values into hard ranges instead of rejecting them
    #[arg(long)]
    pub clamp: bool,

    /// Change a bounding method after all assignments (none, soft or hard)
    #[arg(short, long = "bound", value_name = "NAME=METHOD")]
    pub bound: Vec<String>,
}

fn parse_bounding(raw: &str) -> anyhow::Result<(String, BoundingMethod)> {
    let (name, method) = raw
        .split_once('=')
        .with_context(|| format!("Expected name=method, got '{}'", raw))?;
    let method = match method.trim().to_lowercase().as_str() {
        "none" => BoundingMethod::None,
        "soft" => BoundingMethod::Soft,
        "hard" => BoundingMethod::Hard,
        other => anyhow::bail!("Unknown bounding method '{}' (none, soft, hard)", other),
    };
    Ok((name.trim().to_string(), method))
}

pub fn run(args: &CheckArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let definition = NodeTypeDefinition::from_file(&args.definition)?;
    let node_type = definition.build()?;
    let node = node_type.create_node();
    tracing::info!(node_type = %node_type.name(), "checking {} assignments", args.set.len());

    for raw in &args.set {
        let (name, value) = parse_assignment(raw)?;
        let result = if args.clamp {
            node.set_value_clamped(&name, value)
        } else {
            node.set_value(&name, value)
        };
        result.with_context(|| format!("Failed to apply '{}'", raw))?;
    }

    for raw in &args.bound {
        let (name, method) = parse_bounding(raw)?;
        let parameter = node_type
            .parameter_type(&name)
            .with_context(|| format!("Unknown parameter '{}'", name))?;
        parameter.set_bounding_method(method);
    }

    let rows: Vec<ValueRow> = node_type
        .parameter_types()
        .iter()
        .zip(node.values())
        .map(|(pt, (parameter, value))| ValueRow {
            parameter,
            kind: pt.declared_kind().to_string(),
            value,
        })
        .collect();
    println!("{}", format_values(&rows, ctx.format));
    Ok(())
}

//! Node type definitions read from TOML

use std::path::Path;

use anyhow::Context;
use paramgraph_core::{BoundingMethod, Color, DeclaredKind, NodeType, Value};
use serde::Deserialize;

/// A node type as written in a definition file
#[derive(Debug, Clone, Deserialize)]
pub struct NodeTypeDefinition {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<ParameterDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParameterDefinition {
    pub name: String,
    pub kind: DeclaredKind,
    #[serde(default)]
    pub bounding: BoundingMethod,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub label: Option<String>,
    pub description: Option<String>,
}

impl NodeTypeDefinition {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("Invalid definition in {}", path.display()))
    }

    pub fn parse(contents: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Register every parameter on a fresh node type
    pub fn build(&self) -> paramgraph_core::Result<NodeType> {
        let node_type = NodeType::new(&self.name)?;
        for param in &self.parameters {
            let pt = node_type.add_parameter_type(&param.name, param.kind)?;
            if let Some(min) = param.min {
                pt.set_minimum_value(min)?;
            }
            if let Some(max) = param.max {
                pt.set_maximum_value(max)?;
            }
            if let Some(label) = &param.label {
                pt.set_label(label.clone());
            }
            if let Some(description) = &param.description {
                pt.set_description(description.clone());
            }
            pt.set_bounding_method(param.bounding);
        }
        tracing::debug!(
            node_type = %self.name,
            parameters = self.parameters.len(),
            "built node type from definition"
        );
        Ok(node_type)
    }
}

/// Parse a `name=value` assignment
pub fn parse_assignment(raw: &str) -> anyhow::Result<(String, Value)> {
    let (name, value) = raw
        .split_once('=')
        .with_context(|| format!("Expected name=value, got '{}'", raw))?;
    Ok((name.trim().to_string(), parse_value(value.trim())))
}

/// Interpret a command-line value: integers, floats, `#rrggbb[aa]` colors,
/// otherwise a string. Whether it fits the parameter is left to the node.
pub fn parse_value(raw: &str) -> Value {
    if let Ok(v) = raw.parse::<i64>() {
        return Value::Int(v);
    }
    // `nan` and `inf` read as text
    if let Some(v) = raw.parse::<f64>().ok().filter(|v| v.is_finite()) {
        return Value::Float(v);
    }
    if let Some(color) = parse_hex_color(raw) {
        return Value::Color(color);
    }
    Value::String(raw.trim_matches('"').to_string())
}

fn parse_hex_color(raw: &str) -> Option<Color> {
    let hex = raw.strip_prefix('#')?;
    if !matches!(hex.len(), 6 | 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .ok()
            .map(|v| f64::from(v) / 255.0)
    };
    let alpha = if hex.len() == 8 { channel(6)? } else { 1.0 };
    Some(Color::new(channel(0)?, channel(2)?, channel(4)?, alpha))
}

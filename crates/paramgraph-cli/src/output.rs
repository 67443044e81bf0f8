//! Output formatting utilities

use paramgraph_core::Value;
use serde::Serialize;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Table,
        }
    }
}

/// One parameter value of a node, as printed by `check`
#[derive(Debug, Clone, Serialize)]
pub struct ValueRow {
    pub parameter: String,
    pub kind: String,
    pub value: Value,
}

/// Format rows based on format type
pub fn format_values(rows: &[ValueRow], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(rows).unwrap_or_else(|_| "[]".to_string())
        }
        OutputFormat::Table => {
            let name_width = rows
                .iter()
                .map(|row| row.parameter.len())
                .max()
                .unwrap_or(0)
                .max("PARAMETER".len());
            let kind_width = rows
                .iter()
                .map(|row| row.kind.len())
                .max()
                .unwrap_or(0)
                .max("KIND".len());

            let mut out = format!(
                "{:<name_width$}  {:<kind_width$}  VALUE",
                "PARAMETER", "KIND"
            );
            for row in rows {
                out.push('\n');
                out.push_str(&format!(
                    "{:<name_width$}  {:<kind_width$}  {}",
                    row.parameter, row.kind, row.value
                ));
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<ValueRow> {
        vec![
            ValueRow {
                parameter: "angle".into(),
                kind: "angle".into(),
                value: Value::Float(100.0),
            },
            ValueRow {
                parameter: "visible".into(),
                kind: "toggle".into(),
                value: Value::Int(1),
            },
        ]
    }

    #[test]
    fn test_table_output() {
        let table = format_values(&rows(), OutputFormat::Table);
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("PARAMETER"));
        assert!(lines[1].starts_with("angle"));
        assert!(lines[1].ends_with("100.0"));
        assert!(lines[2].ends_with('1'));
    }

    #[test]
    fn test_json_output() {
        let json = format_values(&rows(), OutputFormat::Json);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["parameter"], "angle");
        assert_eq!(parsed[0]["value"]["type"], "float");
        assert_eq!(parsed[1]["value"]["value"], 1);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!(OutputFormat::from("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::from("anything"), OutputFormat::Table);
    }
}

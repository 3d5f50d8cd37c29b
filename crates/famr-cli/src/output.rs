//! Output formatting utilities

use colored::*;
use serde::Serialize;
use tabled::{Table, Tabled};

use crate::error::CliResult;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// One `field | value` row of a key/value table.
#[derive(Debug, Clone, Tabled)]
pub struct FieldRow {
    #[tabled(rename = "Field")]
    pub field: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl FieldRow {
    pub fn new(field: &str, value: impl ToString) -> Self {
        Self {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

/// Render a list of rows in the given format.
pub fn render_rows<T: Serialize + Tabled>(rows: &[T], format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Table => {
            if rows.is_empty() {
                Ok("No results".dimmed().to_string())
            } else {
                Ok(Table::new(rows).to_string())
            }
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(rows)?),
    }
}

/// Render a single record; tables show it as field/value pairs.
pub fn render_record<T: Serialize>(
    record: &T,
    fields: Vec<FieldRow>,
    format: OutputFormat,
) -> CliResult<String> {
    match format {
        OutputFormat::Table => Ok(Table::new(fields).to_string()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(record)?),
    }
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Tabled)]
    struct Row {
        name: String,
        score: f64,
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }

    #[test]
    fn rows_render_in_every_format() {
        let rows = vec![Row {
            name: "a".into(),
            score: 0.5,
        }];
        let table = render_rows(&rows, OutputFormat::Table).unwrap();
        assert!(table.contains("name") && table.contains("0.5"));

        let json: serde_json::Value =
            serde_json::from_str(&render_rows(&rows, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json[0]["name"], "a");

        let yaml = render_rows(&rows, OutputFormat::Yaml).unwrap();
        assert!(yaml.contains("score: 0.5"));
    }

    #[test]
    fn empty_table_says_so() {
        let rows: Vec<Row> = Vec::new();
        assert!(render_rows(&rows, OutputFormat::Table)
            .unwrap()
            .contains("No results"));
    }

    #[test]
    fn record_table_uses_field_rows() {
        let text = render_record(
            &serde_json::json!({"categories": 3}),
            vec![FieldRow::new("Categories", 3)],
            OutputFormat::Table,
        )
        .unwrap();
        assert!(text.contains("Categories") && text.contains('3'));
    }
}

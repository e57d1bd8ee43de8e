//! Terminal rendering and output files

use fieldkit::{FieldCatalog, FieldTypeSpec, OutputFormat, Schema, normalize};
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::client::{GenerationOutput, Record};

/// Widest cell shown in a preview table
const MAX_CELL_WIDTH: usize = 40;

/// Default file name for a download in `format`
pub fn default_output_path(dir: &Path, format: OutputFormat) -> PathBuf {
    dir.join(format!("dummygen.{}", format.extension()))
}

/// Write a download to `path`, creating parent directories
///
/// JSON records are written as a pretty-printed array; CSV as received.
pub fn write_output(output: &GenerationOutput, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let content = match output {
        GenerationOutput::Records(records) => serde_json::to_string_pretty(records)?,
        GenerationOutput::Csv(text) => text.clone(),
    };
    debug!(?path, bytes = content.len(), "write_output: writing");
    fs::write(path, content)
}

fn describe_type(spec: &FieldTypeSpec) -> String {
    if spec.constraints.is_empty() {
        return spec.label.clone();
    }
    let constraints: Vec<String> = spec
        .constraints
        .iter()
        .map(|c| {
            let mut s = format!("{}: {}", c.name, c.kind);
            if let Some(default) = &c.default {
                s.push_str(&format!(" = {}", default));
            }
            if c.required {
                s.push_str(" (required)");
            }
            s
        })
        .collect();
    format!("{} [{}]", spec.label, constraints.join(", "))
}

/// Catalog listing grouped by category, optionally limited to one category
pub fn format_catalog(catalog: &FieldCatalog, category: Option<&str>) -> String {
    let mut out = String::new();
    for (name, members) in catalog.by_category() {
        if category.is_some_and(|wanted| !wanted.eq_ignore_ascii_case(name)) {
            continue;
        }
        let heading = if name.is_empty() { "Uncategorized" } else { name };
        out.push_str(heading);
        out.push('\n');

        let width = members.iter().map(|(key, _)| key.chars().count()).max().unwrap_or(0);
        for (key, spec) in members {
            out.push_str(&format!("  {:width$}  {}\n", key, describe_type(spec), width = width));
        }
    }
    out
}

/// Numbered field listing
pub fn format_schema(schema: &Schema) -> String {
    if schema.is_empty() {
        return "No fields defined\n".to_string();
    }
    let width = schema.iter().map(|f| f.name.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for (index, field) in schema.iter().enumerate() {
        out.push_str(&format!("[{}] {:width$}  {}", index, field.name, field.field_type, width = width));
        if !field.constraints.is_empty() {
            let constraints: Vec<String> = field.constraints.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            out.push_str(&format!("  {{{}}}", constraints.join(", ")));
        }
        out.push('\n');
    }
    out
}

/// The request `schema` object as pretty JSON
pub fn format_schema_json(schema: &Schema) -> String {
    serde_json::to_string_pretty(&normalize::serialize(schema)).unwrap_or_default()
}

fn cell(value: &Value) -> String {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    };
    if text.chars().count() > MAX_CELL_WIDTH {
        let truncated: String = text.chars().take(MAX_CELL_WIDTH - 1).collect();
        format!("{}…", truncated)
    } else {
        text
    }
}

fn render_row(cells: impl Iterator<Item = String>, widths: &[usize]) -> String {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(text, width)| {
            let pad = width.saturating_sub(text.chars().count());
            format!("{}{}", text, " ".repeat(pad))
        })
        .collect();
    line.join(" | ").trim_end().to_string()
}

/// Plain-text table of records
///
/// Columns follow `columns` (the schema's field order); keys a record lacks
/// render as empty cells.
pub fn format_table(records: &[Record], columns: &[&str]) -> String {
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|c| record.get(*c).map(cell).unwrap_or_default())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            rows.iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(c.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    out.push_str(&render_row(columns.iter().map(|c| c.to_string()), &widths));
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("-+-"));
    out.push('\n');
    for row in rows {
        out.push_str(&render_row(row.into_iter(), &widths));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldkit::{ConstraintSpec, FieldDescriptor};
    use serde_json::json;
    use tempfile::TempDir;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    fn catalog() -> FieldCatalog {
        FieldCatalog::from_specs([
            ("first_name", FieldTypeSpec::new("First Name", "Identity")),
            (
                "age",
                FieldTypeSpec::new("Age", "Dates & Time")
                    .with_constraint(ConstraintSpec::number("min", "Minimum").with_default(18)),
            ),
            (
                "enum",
                FieldTypeSpec::new("Enum", "IDs & System")
                    .with_constraint(ConstraintSpec::string("values", "Values").required()),
            ),
        ])
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("out"), OutputFormat::Csv),
            PathBuf::from("out/dummygen.csv")
        );
    }

    #[test]
    fn test_write_output_json_and_csv() {
        let temp = TempDir::new().unwrap();

        let json_path = temp.path().join("nested").join("data.json");
        let records = GenerationOutput::Records(vec![record(json!({"b": 1, "a": "x"}))]);
        write_output(&records, &json_path).unwrap();
        let written: Value = serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(written, json!([{"b": 1, "a": "x"}]));
        let text = fs::read_to_string(&json_path).unwrap();
        assert!(text.find("\"b\"").unwrap() < text.find("\"a\"").unwrap());

        let csv_path = temp.path().join("data.csv");
        write_output(&GenerationOutput::Csv("b,a\r\n1,x\r\n".to_string()), &csv_path).unwrap();
        assert_eq!(fs::read_to_string(&csv_path).unwrap(), "b,a\r\n1,x\r\n");
    }

    #[test]
    fn test_format_catalog() {
        let listing = format_catalog(&catalog(), None);
        assert!(listing.starts_with("Identity\n"));
        assert!(listing.contains("age  Age [min: number = 18]"));
        assert!(listing.contains("Enum [values: string (required)]"));

        let filtered = format_catalog(&catalog(), Some("identity"));
        assert!(filtered.contains("first_name"));
        assert!(!filtered.contains("age"));
    }

    #[test]
    fn test_format_schema() {
        assert_eq!(format_schema(&Schema::new()), "No fields defined\n");

        let mut schema = Schema::new();
        schema.add_field(FieldDescriptor::new("name", "first_name"), &catalog()).unwrap();
        schema
            .add_field(FieldDescriptor::new("age", "age").with_constraint("min", 21), &catalog())
            .unwrap();
        let listing = format_schema(&schema);
        assert!(listing.contains("[0] name  first_name"));
        assert!(listing.contains("[1] age   age  {min=21}"));
    }

    #[test]
    fn test_format_schema_aligns_non_ascii_names() {
        let mut schema = Schema::new();
        schema.add_field(FieldDescriptor::new("名前", "first_name"), &catalog()).unwrap();
        schema.add_field(FieldDescriptor::new("age", "age"), &catalog()).unwrap();
        let listing = format_schema(&schema);
        assert_eq!(listing, "[0] 名前   first_name\n[1] age  age\n");
    }

    #[test]
    fn test_format_table() {
        let records = vec![
            record(json!({"name": "Ada", "age": 36})),
            record(json!({"name": "Grace Brewster Murray Hopper, Rear Admiral, USN", "age": null})),
        ];
        let table = format_table(&records, &["name", "age", "missing"]);
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("name"));
        assert!(lines[0].contains("| age"));
        assert!(lines[2].starts_with("Ada"));
        assert!(lines[2].contains("| 36"));
        assert!(lines[3].contains('…'));
        assert!(lines[3].chars().count() < 60);
    }
}

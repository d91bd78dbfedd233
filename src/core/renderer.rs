use crate::domain::model::{GenerationModel, LookupTableSpec, RecordTypeSpec};
use crate::utils::error::{GenError, Result};
use std::fmt::{self, Write};

pub const SOURCE_EXTENSION: &str = "go";

const GENERATED_MARKER: &str = "// Code generated by tsv2go. DO NOT EDIT.";

fn expand(fragment: &'static str, body: impl FnOnce(&mut String) -> fmt::Result) -> Result<String> {
    let mut out = String::new();
    body(&mut out).map_err(|_| GenError::RenderError { fragment })?;
    Ok(out)
}

/// Quotes `value` as a Go interpreted string literal.
pub fn quote_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

pub fn render_header(package: &str) -> Result<String> {
    expand("header", |out| {
        writeln!(out, "{}", GENERATED_MARKER)?;
        writeln!(out)?;
        writeln!(out, "package {}", package)
    })
}

pub fn render_record_type(record: &RecordTypeSpec) -> Result<String> {
    let width = record
        .fields
        .iter()
        .map(|f| f.name.chars().count())
        .max()
        .unwrap_or(0);

    expand("record type", |out| {
        writeln!(out)?;
        writeln!(out, "type {} struct {{", record.name)?;
        for field in &record.fields {
            writeln!(out, "\t{:<width$} {}", field.name, field.r#type, width = width)?;
        }
        writeln!(out, "}}")
    })
}

/// Values are emitted as back-quoted raw literals without any escaping.
pub fn render_lookup_table(table: &LookupTableSpec) -> Result<String> {
    expand("lookup table", |out| {
        writeln!(out)?;
        writeln!(
            out,
            "var {} = map[{}]{}{{",
            table.name, table.key_type, table.value_type
        )?;
        for entry in &table.entries {
            write!(out, "\t{}: {}{{", quote_string(&entry.key), table.value_type)?;
            for (i, value) in entry.values.iter().enumerate() {
                if value.raw.contains('`') {
                    tracing::warn!(
                        "Value for key '{}' contains a back-quote and will break the raw literal",
                        entry.key
                    );
                }
                if i > 0 {
                    out.push_str(", ");
                }
                write!(out, "`{}`", value.raw)?;
            }
            writeln!(out, "}},")?;
        }
        writeln!(out, "}}")
    })
}

/// Header, record type and lookup table, concatenated in that order.
pub fn render_source(model: &GenerationModel) -> Result<String> {
    let header = render_header(&model.package)?;
    let record = render_record_type(&model.record)?;
    let table = render_lookup_table(&model.table)?;

    let mut source = String::with_capacity(header.len() + record.len() + table.len());
    source.push_str(&header);
    source.push_str(&record);
    source.push_str(&table);
    Ok(source)
}

pub fn output_file_name(package: &str) -> String {
    format!("{}.{}", package, SOURCE_EXTENSION)
}

use crate::domain::model::{
    FieldSpec, FieldValue, GenerationModel, LookupTableSpec, RecordTypeSpec, Row, TableEntry,
    TypeTag,
};
use crate::utils::error::{GenError, Result};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static WORD_RUNS: LazyLock<std::result::Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9_]+"));

/// Keeps the runs of ASCII word characters and joins them:
/// `"ISO 3 Code!"` becomes `"ISO3Code"`.
pub fn normalize_name(raw: &str) -> Result<String> {
    let word_runs = WORD_RUNS.as_ref().map_err(|e| GenError::ConfigError {
        message: format!("word-run pattern: {}", e),
    })?;
    Ok(word_runs.find_iter(raw).map(|m| m.as_str()).collect())
}

/// A letter or `_` followed by letters, digits or `_`.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

// 名稱只是字串轉換，不合法時僅警告，由下游編譯器報錯
fn warn_unless_identifier(role: &str, name: &str) {
    if !is_identifier(name) {
        tracing::warn!(
            "{} '{}' is not a valid Go identifier; the generated file will not compile",
            role,
            name
        );
    }
}

/// First character upper case, the rest lower case.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

pub fn package_name(table_name: &str) -> String {
    table_name.to_lowercase()
}

/// Builds the generation model from a header and its data rows.
///
/// The header is scanned once in [`ModelBuilder::from_header`]; rows are
/// then appended in input order with [`ModelBuilder::push_row`].
#[derive(Debug)]
pub struct ModelBuilder {
    package: String,
    record: RecordTypeSpec,
    table: LookupTableSpec,
    key_index: usize,
    width: usize,
    seen_keys: HashMap<String, u64>,
}

impl ModelBuilder {
    pub fn from_header(
        header: &[String],
        key_column: &str,
        key_type: &str,
        record_name: &str,
        table_name: &str,
    ) -> Result<Self> {
        let record_name = capitalize(record_name);
        let mut fields: Vec<FieldSpec> = Vec::with_capacity(header.len().saturating_sub(1));
        let mut field_columns: HashMap<String, usize> = HashMap::new();
        let mut key_index = None;

        for (column, cell) in header.iter().enumerate() {
            if cell == key_column {
                if let Some(first) = key_index {
                    return Err(GenError::ConfigError {
                        message: format!(
                            "key column '{}' appears twice in header (columns {} and {})",
                            key_column, first, column
                        ),
                    });
                }
                key_index = Some(column);
                continue;
            }

            let name = normalize_name(cell)?;
            if name.is_empty() {
                return Err(GenError::EmptyFieldName {
                    header: cell.clone(),
                    column,
                });
            }
            if let Some(&first_column) = field_columns.get(&name) {
                return Err(GenError::DuplicateFieldName {
                    name,
                    first_column,
                    second_column: column,
                });
            }
            field_columns.insert(name.clone(), column);
            fields.push(FieldSpec {
                name,
                r#type: TypeTag::string(),
            });
        }

        let key_index = key_index.ok_or_else(|| GenError::KeyColumnNotFound {
            column: key_column.to_string(),
        })?;

        tracing::debug!(
            "Key column '{}' at index {}, {} record fields",
            key_column,
            key_index,
            fields.len()
        );

        let package = package_name(table_name);
        warn_unless_identifier("Package name", &package);
        warn_unless_identifier("Record type name", &record_name);
        warn_unless_identifier("Table name", &capitalize(table_name));

        Ok(Self {
            package,
            table: LookupTableSpec {
                name: capitalize(table_name),
                key_type: TypeTag::new(key_type),
                value_type: record_name.clone(),
                entries: Vec::new(),
            },
            record: RecordTypeSpec {
                name: record_name,
                fields,
            },
            key_index,
            width: header.len(),
            seen_keys: HashMap::new(),
        })
    }

    pub fn record(&self) -> &RecordTypeSpec {
        &self.record
    }

    pub fn key_index(&self) -> usize {
        self.key_index
    }

    pub fn push_row(&mut self, row: &Row) -> Result<()> {
        if row.cells.len() != self.width {
            return Err(GenError::RowLengthMismatch {
                line: row.line,
                expected: self.width,
                found: row.cells.len(),
            });
        }

        let mut key = String::new();
        let mut values = Vec::with_capacity(self.width - 1);
        for (column, cell) in row.cells.iter().enumerate() {
            if column == self.key_index {
                key = cell.clone();
            } else {
                values.push(FieldValue {
                    kind: TypeTag::string(),
                    raw: cell.clone(),
                });
            }
        }

        if let Some(first_line) = self.seen_keys.insert(key.clone(), row.line) {
            tracing::warn!(
                "Key '{}' at line {} repeats line {}; the generated map literal will not compile",
                key,
                row.line,
                first_line
            );
        }

        self.table.entries.push(TableEntry { key, values });
        Ok(())
    }

    pub fn push_rows<'a>(&mut self, rows: impl IntoIterator<Item = &'a Row>) -> Result<()> {
        for row in rows {
            self.push_row(row)?;
        }
        Ok(())
    }

    pub fn finish(self) -> GenerationModel {
        GenerationModel {
            package: self.package,
            record: self.record,
            table: self.table,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reader::parse_table;
    use crate::utils::logger::capture_warnings;

    fn header(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn row(line: u64, cells: &[&str]) -> Row {
        Row {
            line,
            cells: cells.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("ISO 3 Code!").unwrap(), "ISO3Code");
        assert_eq!(normalize_name("Country_Name").unwrap(), "Country_Name");
        assert_eq!(normalize_name("(km²) area").unwrap(), "kmarea");
        assert_eq!(normalize_name("!!!").unwrap(), "");
    }

    #[test]
    fn test_normalize_name_is_idempotent() {
        for name in ["ISO3Code", "Name", "snake_case_1"] {
            let once = normalize_name(name).unwrap();
            assert_eq!(once, name);
            assert_eq!(normalize_name(&once).unwrap(), once);
        }
    }

    #[test]
    fn test_capitalize_and_package_name() {
        assert_eq!(capitalize("countrie"), "Countrie");
        assert_eq!(capitalize("countriesList"), "Countrieslist");
        assert_eq!(capitalize(""), "");
        assert_eq!(package_name("countriesList"), "countrieslist");
    }

    #[test]
    fn test_country_scenario() {
        let mut builder = ModelBuilder::from_header(
            &header(&["ISO3", "Name", "Region"]),
            "ISO3",
            "string",
            "country",
            "countries",
        )
        .unwrap();
        builder
            .push_row(&row(2, &["USA", "United States", "Americas"]))
            .unwrap();
        let model = builder.finish();

        let names: Vec<&str> = model.record.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Name", "Region"]);
        assert_eq!(model.record.name, "Country");
        assert_eq!(model.package, "countries");
        assert_eq!(model.table.name, "Countries");
        assert_eq!(model.table.value_type, "Country");
        assert_eq!(model.table.entries.len(), 1);

        let entry = &model.table.entries[0];
        assert_eq!(entry.key, "USA");
        let values: Vec<&str> = entry.values.iter().map(|v| v.raw.as_str()).collect();
        assert_eq!(values, vec!["United States", "Americas"]);
    }

    #[test]
    fn test_key_column_in_the_middle() {
        let mut builder = ModelBuilder::from_header(
            &header(&["Name", "Code", "Capital"]),
            "Code",
            "string",
            "country",
            "countries",
        )
        .unwrap();
        assert_eq!(builder.key_index(), 1);
        builder.push_row(&row(2, &["France", "FRA", "Paris"])).unwrap();
        let model = builder.finish();

        assert_eq!(model.table.entries[0].key, "FRA");
        let values: Vec<&str> = model.table.entries[0]
            .values
            .iter()
            .map(|v| v.raw.as_str())
            .collect();
        assert_eq!(values, vec!["France", "Paris"]);
    }

    #[test]
    fn test_key_column_is_never_a_field() {
        let builder = ModelBuilder::from_header(
            &header(&["Alpha", "Key", "Beta", "Gamma"]),
            "Key",
            "string",
            "rec",
            "tbl",
        )
        .unwrap();
        assert!(builder.record().fields.iter().all(|f| f.name != "Key"));
        assert_eq!(builder.record().fields.len(), 3);
    }

    #[test]
    fn test_value_count_matches_header_minus_key() {
        let cols = header(&["K", "A", "B", "C", "D"]);
        let mut builder =
            ModelBuilder::from_header(&cols, "K", "string", "rec", "tbl").unwrap();
        for line in 2..6 {
            builder
                .push_row(&row(line, &["k", "a", "b", "c", "d"]))
                .unwrap();
        }
        let model = builder.finish();
        for entry in &model.table.entries {
            assert_eq!(entry.values.len(), cols.len() - 1);
            assert_eq!(entry.values.len(), model.record.fields.len());
        }
    }

    #[test]
    fn test_missing_key_column_fails() {
        let err = ModelBuilder::from_header(
            &header(&["Name", "Region"]),
            "ISO3",
            "string",
            "country",
            "countries",
        )
        .unwrap_err();
        assert!(matches!(err, GenError::KeyColumnNotFound { ref column } if column == "ISO3"));
    }

    #[test]
    fn test_empty_key_name_fails_lookup() {
        let err =
            ModelBuilder::from_header(&header(&["A", "B"]), "", "string", "r", "t").unwrap_err();
        assert!(matches!(err, GenError::KeyColumnNotFound { .. }));
    }

    #[test]
    fn test_duplicate_normalized_names_fail() {
        let err = ModelBuilder::from_header(
            &header(&["Key", "Area km", "Area-km"]),
            "Key",
            "string",
            "r",
            "t",
        )
        .unwrap_err();
        match err {
            GenError::DuplicateFieldName {
                name,
                first_column,
                second_column,
            } => {
                assert_eq!(name, "Areakm");
                assert_eq!(first_column, 1);
                assert_eq!(second_column, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_repeated_key_column_fails() {
        let err = ModelBuilder::from_header(&header(&["K", "A", "K"]), "K", "string", "r", "t")
            .unwrap_err();
        assert!(matches!(err, GenError::ConfigError { .. }));
    }

    #[test]
    fn test_header_without_word_characters_fails() {
        let err = ModelBuilder::from_header(&header(&["Key", "%%"]), "Key", "string", "r", "t")
            .unwrap_err();
        assert!(matches!(err, GenError::EmptyFieldName { column: 1, .. }));
    }

    #[test]
    fn test_short_and_long_rows_fail_fast() {
        let mut builder =
            ModelBuilder::from_header(&header(&["K", "A", "B"]), "K", "string", "r", "t").unwrap();

        let err = builder.push_row(&row(4, &["k", "a"])).unwrap_err();
        assert!(matches!(
            err,
            GenError::RowLengthMismatch {
                line: 4,
                expected: 3,
                found: 2
            }
        ));

        let err = builder.push_row(&row(5, &["k", "a", "b", "c"])).unwrap_err();
        assert!(matches!(err, GenError::RowLengthMismatch { found: 4, .. }));
    }

    #[test]
    fn test_rows_keep_input_order_and_duplicates() {
        let mut builder =
            ModelBuilder::from_header(&header(&["K", "V"]), "K", "int", "r", "t").unwrap();
        builder
            .push_rows(&[row(2, &["b", "1"]), row(3, &["a", "2"]), row(4, &["b", "3"])])
            .unwrap();
        let model = builder.finish();

        let keys: Vec<&str> = model.table.entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["b", "a", "b"]);
        assert_eq!(model.table.key_type.as_str(), "int");
    }

    #[test]
    fn test_duplicate_key_is_logged() {
        let logs = capture_warnings(|| {
            let mut builder =
                ModelBuilder::from_header(&header(&["K", "V"]), "K", "string", "r", "t").unwrap();
            builder
                .push_rows(&[row(2, &["b", "1"]), row(3, &["a", "2"]), row(5, &["b", "3"])])
                .unwrap();
        });

        assert!(logs.contains("Key 'b' at line 5 repeats line 2"), "{logs}");
        assert!(!logs.contains("Key 'a'"));
    }

    #[test]
    fn test_unique_keys_log_nothing() {
        let logs = capture_warnings(|| {
            let mut builder = ModelBuilder::from_header(
                &header(&["K", "V"]),
                "K",
                "string",
                "country",
                "countriesList",
            )
            .unwrap();
            builder
                .push_rows(&[row(2, &["a", "1"]), row(3, &["b", "2"])])
                .unwrap();
        });
        assert!(logs.is_empty(), "{logs}");
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("countrieslist"));
        assert!(is_identifier("_codes2"));
        assert!(!is_identifier("countries-list"));
        assert!(!is_identifier("2codes"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn test_invalid_package_name_is_logged() {
        let logs = capture_warnings(|| {
            let builder = ModelBuilder::from_header(
                &header(&["K", "V"]),
                "K",
                "string",
                "country",
                "countries-list",
            )
            .unwrap();
            assert_eq!(builder.finish().package, "countries-list");
        });

        assert!(
            logs.contains("Package name 'countries-list' is not a valid Go identifier"),
            "{logs}"
        );
        assert!(logs.contains("Table name 'Countries-list'"), "{logs}");
    }

    #[test]
    fn test_row_error_names_physical_line() {
        for data in [&b"K\tV\r\nk1\tv1\r\nk2\r\n"[..], &b"K\tV\nk1\tv1\nk2\n"[..]] {
            let table = parse_table(data, b'\t').unwrap();
            let mut builder =
                ModelBuilder::from_header(&table.header, "K", "string", "r", "t").unwrap();
            let err = builder.push_rows(&table.rows).unwrap_err();
            assert!(matches!(
                err,
                GenError::RowLengthMismatch {
                    line: 3,
                    expected: 2,
                    found: 1
                }
            ));
        }

        let table = parse_table(b"K\tV\nk1\tv1\n\nk2\n", b'\t').unwrap();
        let mut builder =
            ModelBuilder::from_header(&table.header, "K", "string", "r", "t").unwrap();
        let err = builder.push_rows(&table.rows).unwrap_err();
        assert!(matches!(err, GenError::RowLengthMismatch { line: 4, .. }));
    }
}

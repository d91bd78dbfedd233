use crate::domain::model::{Row, Table};
use crate::utils::error::{GenError, Result};

/// Parses delimited text into a header and data rows.
///
/// Cells are split on the delimiter only: quotes are kept verbatim and a
/// cell can contain neither the delimiter nor a line break. Lines end in
/// `\n` or `\r\n`; blank lines are skipped but still counted, so every
/// row carries its physical 1-based line number. Row widths are not
/// checked here; the model builder rejects rows that do not match the
/// header.
pub fn parse_table(data: &[u8], delimiter: u8) -> Result<Table> {
    // 只以 \n 斷行，\r 由下方自行去除，避免 csv 的行號計算偏移
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_reader(data);

    // csv 會略過零長度的行，其餘每一行對應一筆記錄
    let mut line_numbers = data
        .split(|&b| b == b'\n')
        .enumerate()
        .filter(|(_, line)| !line.is_empty())
        .map(|(index, _)| index as u64 + 1);

    let mut header: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = line_numbers.next().unwrap_or_default();

        let mut cells: Vec<String> = record.iter().map(str::to_string).collect();
        if let Some(last) = cells.last_mut() {
            if last.ends_with('\r') {
                last.pop();
            }
        }
        if cells.len() == 1 && cells[0].is_empty() {
            continue;
        }

        match header {
            None => header = Some(cells),
            Some(_) => rows.push(Row { line, cells }),
        }
    }

    let header = header.ok_or_else(|| GenError::ParseError {
        message: "input has no header row".to_string(),
    })?;

    tracing::debug!(
        "Parsed {} columns and {} data rows",
        header.len(),
        rows.len()
    );

    Ok(Table { header, rows })
}

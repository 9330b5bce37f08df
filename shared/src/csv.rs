use std::collections::HashMap;

/// A single table row, keyed by header name.
pub type Row = HashMap<String, String>;

/// Parses a spreadsheet CSV export into rows keyed by the header line.
///
/// Blank lines are dropped wherever they appear. Rows shorter than the header
/// are padded with empty strings, longer rows are truncated. Quoting is a
/// plain toggle: a `""` pair inside a quoted field does not produce a literal
/// quote.
pub fn parse_table(text: &str) -> Vec<Row> {
    let mut lines = text.split('\n').filter(|line| !line.trim().is_empty());

    let headers: Vec<String> = match lines.next() {
        Some(header) => split_line(header.trim_start_matches('\u{feff}'))
            .into_iter()
            .map(|h| h.trim().to_string())
            .collect(),
        None => return vec![],
    };

    lines
        .map(|line| {
            let mut values = split_line(line).into_iter();
            let mut row = Row::with_capacity(headers.len());
            // Same-named headers overwrite earlier columns.
            for header in &headers {
                let value = values
                    .next()
                    .map(|v| v.trim().to_string())
                    .unwrap_or_default();
                row.insert(header.clone(), value);
            }
            row
        })
        .collect()
}

/// Splits a line on commas that are not inside double quotes.
///
/// Quote characters are consumed and never emitted. The last field is always
/// emitted, even when empty, so `"a,"` yields two fields.
pub fn split_line(line: &str) -> Vec<String> {
    let mut result = vec![];
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => result.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    result.push(current);
    result
}

/// Looks up a column value, treating a missing column as empty.
pub fn field<'a>(row: &'a Row, column: &str) -> &'a str {
    row.get(column).map(String::as_str).unwrap_or_default()
}

use crate::domain::model::{Row, PRODUCT_ID_COLUMN, VARIANT_ID_COLUMN};
use crate::utils::error::{Result, SyncError};
use std::collections::HashSet;

/// 已解析的資料檔：標題列與所有記錄
///
/// The header is kept so serialization preserves column order and can emit a
/// header-only file when there are no rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvDocument {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl CsvDocument {
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self { headers, rows }
    }

    /// Appends `column` to the header when it is not already present.
    pub fn ensure_column(&mut self, column: &str) {
        if !self.headers.iter().any(|h| h == column) {
            self.headers.push(column.to_string());
        }
    }
}

pub fn parse(bytes: &[u8], delimiter: u8) -> Result<CsvDocument> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(bytes);

    let header_record = reader.headers().map_err(map_csv_error)?;
    let header_line = header_record.position().map_or(1, |p| p.line());
    let headers: Vec<String> = header_record.iter().map(str::to_string).collect();
    ensure_unique_headers(&headers, header_line)?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(map_csv_error)?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let mut row = Row::new();
        for (header, value) in headers.iter().zip(record.iter()) {
            match header.as_str() {
                PRODUCT_ID_COLUMN => row.product_id = parse_id(header, value, line)?,
                VARIANT_ID_COLUMN => row.variant_id = parse_id(header, value, line)?,
                _ => row.set(header.as_str(), value),
            }
        }
        rows.push(row);
    }

    tracing::debug!("📄 Parsed {} rows with {} columns", rows.len(), headers.len());
    Ok(CsvDocument { headers, rows })
}

pub fn serialize(doc: &CsvDocument, delimiter: u8) -> Result<Vec<u8>> {
    if doc.headers.is_empty() {
        return Ok(Vec::new());
    }

    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(&doc.headers)?;
    for row in &doc.rows {
        writer.write_record(doc.headers.iter().map(|h| row.value(h).unwrap_or_default()))?;
    }

    writer
        .into_inner()
        .map_err(|e| SyncError::IoError(e.into_error()))
}

/// 重複欄位名稱會讓寫回時覆蓋其中一欄，直接拒絕
fn ensure_unique_headers(headers: &[String], line: u64) -> Result<()> {
    let mut seen = HashSet::with_capacity(headers.len());
    match headers.iter().find(|h| !seen.insert(h.as_str())) {
        Some(duplicate) => Err(SyncError::MalformedInputError {
            line,
            message: format!("duplicate column '{}' in header", duplicate),
        }),
        None => Ok(()),
    }
}

fn parse_id(column: &str, value: &str, line: u64) -> Result<Option<u64>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<u64>()
        .map(Some)
        .map_err(|_| SyncError::MalformedInputError {
            line,
            message: format!("column '{}' is not a valid identifier: '{}'", column, value),
        })
}

fn map_csv_error(err: csv::Error) -> SyncError {
    if let csv::ErrorKind::UnequalLengths {
        pos,
        expected_len,
        len,
    } = err.kind()
    {
        return SyncError::MalformedInputError {
            line: pos.as_ref().map(|p| p.line()).unwrap_or(0),
            message: format!("expected {} fields, found {}", expected_len, len),
        };
    }
    SyncError::CsvError(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_parse_header_and_rows() {
        let input = b"name,size,vendor\nShirt,S,Acme\nShirt,M,Acme\n";
        let doc = parse(input, b',').unwrap();

        assert_eq!(doc.headers, headers(&["name", "size", "vendor"]));
        assert_eq!(doc.rows.len(), 2);
        assert_eq!(doc.rows[1].get("size"), Some("M"));
        assert_eq!(doc.rows[0].vendor, "Acme");
    }

    #[test]
    fn test_parse_skips_empty_lines() {
        let input = b"\nname;size\n\nShirt;S\n\n";
        let doc = parse(input, b';').unwrap();

        assert_eq!(doc.headers, headers(&["name", "size"]));
        assert_eq!(doc.rows.len(), 1);
        assert_eq!(doc.rows[0].get("name"), Some("Shirt"));
    }

    #[test]
    fn test_parse_identifiers() {
        let input = b"product_id,variant_id,name\n10,20,Shirt\n,,Pants\n";
        let doc = parse(input, b',').unwrap();

        assert_eq!(doc.rows[0].product_id, Some(10));
        assert_eq!(doc.rows[0].variant_id, Some(20));
        assert_eq!(doc.rows[1].product_id, None);
    }

    #[test]
    fn test_parse_rejects_field_count_mismatch() {
        let input = b"name,size\nShirt,S\nPants\n";
        let err = parse(input, b',').unwrap_err();

        match err {
            SyncError::MalformedInputError { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_duplicate_header() {
        let err = parse(b"name,size,name\nShirt,M,Tee\n", b',').unwrap_err();
        match err {
            SyncError::MalformedInputError { line, message } => {
                assert_eq!(line, 1);
                assert!(message.contains("'name'"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_non_numeric_identifier() {
        let input = b"product_id,name\nabc,Shirt\n";
        assert!(matches!(
            parse(input, b','),
            Err(SyncError::MalformedInputError { .. })
        ));
    }

    #[test]
    fn test_round_trip_uniform_rows() {
        let mut first = Row::new().with("name", "Shirt, long").with("size", "S");
        first.product_id = Some(7);
        first.variant_id = Some(70);
        let second = Row::new().with("name", "Pants \"slim\"").with("size", "M");
        let doc = CsvDocument::new(
            headers(&["product_id", "variant_id", "name", "size", "vendor"]),
            vec![first, second],
        );

        let bytes = serialize(&doc, b',').unwrap();
        assert_eq!(parse(&bytes, b',').unwrap(), doc);
    }

    #[test]
    fn test_serialize_empty_emits_header() {
        let doc = CsvDocument::new(headers(&["name", "size"]), vec![]);
        let bytes = serialize(&doc, b',').unwrap();

        assert_eq!(String::from_utf8(bytes).unwrap(), "name,size\n");
    }

    #[test]
    fn test_ensure_column_appends_once() {
        let mut doc = CsvDocument::new(headers(&["name"]), vec![]);
        doc.ensure_column("product_id");
        doc.ensure_column("product_id");
        doc.ensure_column("name");

        assert_eq!(doc.headers, headers(&["name", "product_id"]));
    }
}

//! CSV reading with encoding and delimiter auto-detection.
//!
//! Turns raw bytes into [`Record`]s keyed by header name. No knowledge of
//! products or pages lives here.

use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::models::Record;

/// Parsed rows plus what was detected along the way.
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub records: Vec<Record>,
    /// Detected source encoding (normalized label)
    pub encoding: String,
    pub delimiter: char,
    pub headers: Vec<String>,
}

/// Detect the encoding of raw bytes using chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let charset = chardet::detect(bytes).0;

    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes to UTF-8 text. A leading byte-order mark is dropped.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    let text = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => match std::str::from_utf8(bytes) {
            Ok(s) => s.to_string(),
            Err(_) => String::from_utf8_lossy(bytes).into_owned(),
        },
        // encoding_rs treats the ISO-8859-1 label as windows-1252 (WHATWG)
        "iso-8859-1" | "latin-1" | "latin1" | "windows-1252" | "cp1252" => {
            encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned()
        }
        "iso-8859-15" => encoding_rs::ISO_8859_15.decode(bytes).0.into_owned(),
        _ => String::from_utf8_lossy(bytes).into_owned(),
    };

    match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    }
}

/// Pick the separator that occurs most often in the header line.
///
/// Falls back to `,` when the header has a single column.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse CSV text with an explicit delimiter.
///
/// Returns the headers and one [`Record`] per data row. Blank lines are
/// skipped; short rows simply lack the trailing columns. Text without a
/// header row yields no headers and no records.
pub fn parse_str(content: &str, delimiter: char) -> CsvResult<(Vec<String>, Vec<Record>)> {
    let delimiter = u8::try_from(delimiter).map_err(|_| CsvError::Parse {
        line: 0,
        message: format!("delimiter '{}' is not a single byte", delimiter),
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Ok((Vec::new(), Vec::new()));
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        if row.len() == 1 && row[0].is_empty() {
            continue;
        }

        let line = row.position().map_or(0, |p| source_line(content, p.byte()));
        let mut record = Record::new(line);
        for (header, value) in headers.iter().zip(row.iter()) {
            record.insert(header.as_str(), value);
        }
        records.push(record);
    }

    Ok((headers, records))
}

/// 1-based line of the record whose read started at `byte`.
///
/// The reader's own line counter misses the blank lines it skips before a
/// record, so count newlines in the text instead. Quoted cells spanning
/// several lines are counted too.
fn source_line(content: &str, byte: u64) -> usize {
    let bytes = content.as_bytes();
    let mut start = usize::try_from(byte).map_or(bytes.len(), |b| b.min(bytes.len()));
    while start < bytes.len() && matches!(bytes[start], b'\r' | b'\n') {
        start += 1;
    }
    bytes[..start].iter().filter(|&&b| b == b'\n').count() + 1
}

/// Parse CSV bytes, detecting encoding and delimiter.
///
/// Bytes that are valid UTF-8 are always read as UTF-8; detection only
/// decides between the legacy single-byte encodings.
pub fn parse_bytes_auto(bytes: &[u8]) -> CsvResult<ParseResult> {
    let encoding = match std::str::from_utf8(bytes) {
        Ok(_) => "utf-8".to_string(),
        Err(_) => detect_encoding(bytes),
    };
    let content = decode_content(bytes, &encoding);
    let delimiter = detect_delimiter(&content);
    let (headers, records) = parse_str(&content, delimiter)?;

    Ok(ParseResult {
        records,
        encoding,
        delimiter,
        headers,
    })
}

/// Read and parse a CSV file, detecting encoding and delimiter.
pub fn parse_file_auto<P: AsRef<Path>>(path: P) -> CsvResult<ParseResult> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_bytes_auto(&bytes)
}

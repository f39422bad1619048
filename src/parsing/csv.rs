use regex::Regex;
use std::sync::LazyLock;

/// Headers like `1st`, `2nd`, `23rd`, `64th` carry leaderboard placements.
static PLACEMENT_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(st|nd|rd|th)$").expect("placement header pattern is valid"));

const OVERFLOW_HEADER: &str = "...";

/// A single CSV cell after opportunistic numeric coercion
#[derive(Debug, Clone, PartialEq)]
pub enum CsvValue {
    Text(String),
    Number(f64),
}

impl CsvValue {
    /// Coerce a trimmed field. Anything that is not a finite float stays text,
    /// and the empty string stays empty rather than becoming zero.
    pub fn from_field(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CsvValue::Text(String::new());
        }

        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => CsvValue::Number(value),
            _ => CsvValue::Text(trimmed.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CsvValue::Number(value) => Some(*value),
            CsvValue::Text(_) => None,
        }
    }

    /// String form of the cell; whole numbers print without a fractional part.
    pub fn as_text(&self) -> String {
        match self {
            CsvValue::Text(text) => text.clone(),
            CsvValue::Number(value) => value.to_string(),
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            CsvValue::Text(text) => text.trim().is_empty(),
            CsvValue::Number(_) => false,
        }
    }
}

/// One data line keyed by header, in header order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRow {
    fields: Vec<(String, CsvValue)>,
    placements: Vec<String>,
}

impl RawRow {
    pub fn get(&self, header: &str) -> Option<&CsvValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == header)
            .map(|(_, value)| value)
    }

    /// Trimmed text of a non-blank cell
    pub fn text(&self, header: &str) -> Option<String> {
        self.get(header)
            .filter(|value| !value.is_blank())
            .map(|value| value.as_text().trim().to_string())
    }

    pub fn number(&self, header: &str) -> Option<f64> {
        self.get(header).and_then(CsvValue::as_number)
    }

    pub fn fields(&self) -> &[(String, CsvValue)] {
        &self.fields
    }

    pub fn placements(&self) -> &[String] {
        &self.placements
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedCsv {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl ParsedCsv {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Parse delimited text into ordered rows.
///
/// Fails closed: input with fewer than two non-blank lines yields an empty
/// result. The header line is split on bare commas; data lines honour
/// double-quoted regions, whose quote characters are dropped.
pub fn parse_csv(text: &str) -> ParsedCsv {
    let lines: Vec<&str> = text
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .collect();

    if lines.len() < 2 {
        return ParsedCsv::default();
    }

    let headers = split_header(lines[0]);
    let rows = lines[1..]
        .iter()
        .map(|line| build_row(&headers, split_quoted(line)))
        .collect();

    ParsedCsv { headers, rows }
}

fn split_header(line: &str) -> Vec<String> {
    line.trim_start_matches('\u{feff}')
        .split(',')
        .map(|header| header.trim().to_string())
        .collect()
}

fn split_quoted(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);

    fields
}

fn build_row(headers: &[String], values: Vec<String>) -> RawRow {
    let fields: Vec<(String, CsvValue)> = headers
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            let value = values
                .get(idx)
                .map(|raw| CsvValue::from_field(raw))
                .unwrap_or_else(|| CsvValue::Text(String::new()));
            (header.clone(), value)
        })
        .collect();

    let placements = extract_placements(&fields, values.get(headers.len()..).unwrap_or(&[]));

    RawRow { fields, placements }
}

fn extract_placements(fields: &[(String, CsvValue)], overflow: &[String]) -> Vec<String> {
    let declared = fields
        .iter()
        .filter(|(header, _)| is_placement_header(header))
        .map(|(_, value)| value.as_text());

    let extra = overflow.iter().map(|raw| raw.to_string());

    declared
        .chain(extra)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}

fn is_placement_header(header: &str) -> bool {
    header == OVERFLOW_HEADER || PLACEMENT_HEADER.is_match(header)
}

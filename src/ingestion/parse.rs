//! CSV decoding of upload bodies.
//!
//! Both upload formats start with a header row, which is skipped. Rows may
//! carry extra trailing columns but never fewer than the format needs; the
//! first bad row rejects the whole body.

use super::types::SuggestionRow;
use crate::catalog::types::{Category, Locale};
use crate::error::{Result, SuggestError};

/// `category,id,name_ru,name_uk,importance,locale`
pub const SUGGESTION_COLUMNS: usize = 6;
/// `id,count`
pub const POPULARITY_COLUMNS: usize = 2;

fn records(body: &[u8]) -> csv::StringRecordsIntoIter<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(body)
        .into_records()
}

fn check_width(record: &csv::StringRecord, line: usize, want: usize) -> Result<()> {
    if record.len() < want {
        return Err(SuggestError::invalid(format!(
            "invalid csv: line {}: got {}, want {}",
            line,
            record.len(),
            want
        )));
    }
    Ok(())
}

fn parse_int(value: &str, column: &str, line: usize) -> Result<i64> {
    value.parse::<i64>().map_err(|_| {
        SuggestError::invalid(format!("invalid csv: line {}: {} is not an integer: {:?}", line, column, value))
    })
}

fn csv_error(e: csv::Error) -> SuggestError {
    SuggestError::invalid(format!("invalid csv: {}", e))
}

pub fn parse_suggestion_rows(body: &[u8]) -> Result<Vec<SuggestionRow>> {
    let mut rows = Vec::new();

    for (i, record) in records(body).enumerate() {
        let record = record.map_err(csv_error)?;
        let line = i + 2;
        check_width(&record, line, SUGGESTION_COLUMNS)?;

        let category = record[0]
            .parse::<Category>()
            .map_err(|e| SuggestError::invalid(format!("invalid csv: line {}: {}", line, e)))?;
        let id = parse_int(&record[1], "id", line)?;
        let importance = match &record[4] {
            "" => 0,
            value => parse_int(value, "importance", line)?,
        };
        let locale = Locale::from_row_tag(&record[5])
            .map_err(|e| SuggestError::invalid(format!("invalid csv: line {}: {}", line, e)))?;

        rows.push(SuggestionRow {
            category,
            id,
            name_ru: record[2].to_string(),
            name_uk: record[3].to_string(),
            importance,
            locale,
        });
    }

    Ok(rows)
}

pub fn parse_popularity_rows(body: &[u8]) -> Result<Vec<(i64, i64)>> {
    let mut rows = Vec::new();

    for (i, record) in records(body).enumerate() {
        let record = record.map_err(csv_error)?;
        let line = i + 2;
        check_width(&record, line, POPULARITY_COLUMNS)?;

        let id = parse_int(&record[0], "id", line)?;
        let count = parse_int(&record[1], "count", line)?;
        rows.push((id, count));
    }

    Ok(rows)
}

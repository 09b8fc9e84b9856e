//! Line protocol record parsing
//!
//! One newline-terminated UTF-8 record per read, fields separated by commas,
//! each field a floating-point number. The field count is not fixed by the
//! protocol; the cache checks it against the channel width downstream.

use contracts::AcquisitionError;

/// Field separator
pub const FIELD_SEPARATOR: char = ',';

/// Parse one record into a numeric row
///
/// Surrounding whitespace and the line terminator are ignored, as is
/// whitespace around each field.
///
/// # Errors
/// `Parse` for an empty record or any field that is not a number.
pub fn parse_record(line: &str) -> Result<Vec<f64>, AcquisitionError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(AcquisitionError::parse("empty record"));
    }

    trimmed
        .split(FIELD_SEPARATOR)
        .enumerate()
        .map(|(idx, field)| {
            let field = field.trim();
            field.parse::<f64>().map_err(|e| {
                AcquisitionError::parse(format!("field {idx} ('{field}') is not a number: {e}"))
            })
        })
        .collect()
}

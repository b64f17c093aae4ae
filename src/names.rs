//! Selection of qualifying attendees and reformatting of their names.

use crate::model::Worksheet;

/// Column holding attendee names.
const NAME_COLUMN: usize = 0;

/// Returns the raw names of every qualifying attendee on `worksheet`.
///
/// A name qualifies when its column-1 cell below the header row is non-empty
/// and bold. The worksheet titled `skip_sheet` never yields names.
pub fn extract_names(worksheet: &Worksheet, skip_sheet: &str) -> Vec<String> {
    if worksheet.title == skip_sheet {
        return Vec::new();
    }

    worksheet
        .rows
        .iter()
        .skip(1)
        .filter_map(|row| row.get(NAME_COLUMN))
        .filter(|cell| cell.bold)
        .filter_map(|cell| cell.text())
        .map(str::to_string)
        .collect()
}

/// Converts `"Last, First"` into `"First Last"`.
///
/// Input that does not contain exactly one comma is returned unchanged.
pub fn parse_name(raw_name: &str) -> String {
    let parts: Vec<&str> = raw_name.split(',').collect();
    match parts.as_slice() {
        [last, first] => format!("{} {}", first.trim(), last.trim()),
        _ => raw_name.to_string(),
    }
}

use std::collections::HashSet;
use std::path::Path;

use calamine::{DataType, Range, Reader, Xlsx, open_workbook};

use crate::error::{Result, ToolError};
use crate::io::xlsx_styles::{CellPosition, read_bold_cells};
use crate::model::{Cell, Workbook, Worksheet};

/// Reads every worksheet of the workbook at `path`, in workbook order.
///
/// Cell values come from the spreadsheet reader; bold flags are resolved
/// from the package styles by [`read_bold_cells`].
pub fn read_workbook(path: &Path) -> Result<Workbook> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let bold_cells = read_bold_cells(path)?;
    let no_bold_cells = HashSet::new();

    let sheet_names = workbook.sheet_names().to_vec();
    let mut worksheets = Vec::with_capacity(sheet_names.len());
    for name in sheet_names {
        let range = read_sheet_range(&mut workbook, &name)?;
        let bold = bold_cells.get(&name).unwrap_or(&no_bold_cells);
        worksheets.push(build_worksheet(name, &range, bold));
    }

    Ok(Workbook { worksheets })
}

fn read_sheet_range<R: std::io::Read + std::io::Seek>(
    workbook: &mut Xlsx<R>,
    name: &str,
) -> Result<Range<DataType>> {
    let range_result = workbook
        .worksheet_range(name)
        .ok_or_else(|| ToolError::InvalidWorkbook(format!("missing sheet '{name}'")))?;
    let range = range_result.map_err(ToolError::from)?;
    Ok(range)
}

/// Lays values and bold flags out on a grid anchored at `A1`.
fn build_worksheet(
    title: String,
    range: &Range<DataType>,
    bold: &HashSet<CellPosition>,
) -> Worksheet {
    let value_extent = range.end().map_or((0, 0), |(row, col)| (row + 1, col + 1));
    let (height, width) = bold
        .iter()
        .fold(value_extent, |(height, width), &(row, col)| {
            (height.max(row + 1), width.max(col + 1))
        });

    let rows = (0..height)
        .map(|row| {
            (0..width)
                .map(|col| {
                    let value = cell_to_string(range.get_value((row, col)));
                    Cell {
                        value: (!value.is_empty()).then_some(value),
                        bold: bold.contains(&(row, col)),
                    }
                })
                .collect()
        })
        .collect();

    Worksheet::new(title, rows)
}

fn cell_to_string(cell: Option<&DataType>) -> String {
    match cell {
        Some(DataType::String(value)) => value.clone(),
        Some(DataType::Float(value)) => value.to_string(),
        Some(DataType::Int(value)) => value.to_string(),
        Some(DataType::Bool(value)) => value.to_string(),
        Some(DataType::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_covers_values_and_bold_cells() {
        let mut range = Range::new((0, 0), (1, 0));
        range.set_value((0, 0), DataType::String("Name".into()));
        range.set_value((1, 0), DataType::String("Doe, John".into()));
        let bold: HashSet<CellPosition> = [(1, 0), (3, 0)].into_iter().collect();

        let worksheet = build_worksheet("Level1".into(), &range, &bold);

        assert_eq!(worksheet.rows.len(), 4);
        assert_eq!(worksheet.cell(1, 0), Some(&Cell::new("Doe, John", true)));
        assert_eq!(worksheet.cell(2, 0), Some(&Cell::empty(false)));
        assert_eq!(worksheet.cell(3, 0), Some(&Cell::empty(true)));
    }

    #[test]
    fn numbers_render_as_text() {
        assert_eq!(cell_to_string(Some(&DataType::Float(2.5))), "2.5");
        assert_eq!(cell_to_string(Some(&DataType::Empty)), "");
        assert_eq!(cell_to_string(None), "");
    }
}

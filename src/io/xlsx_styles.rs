//! Bold cell discovery for `.xlsx` packages.
//!
//! The cell reader only exposes values, so the font weight of each cell is
//! resolved from the package XML: `xl/workbook.xml` and its relationships map
//! sheet names to worksheet parts, `xl/styles.xml` maps style indices to
//! fonts, and every worksheet part assigns a style index to each cell.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use zip::ZipArchive;

use crate::error::{Result, ToolError};
use crate::io::package::{attribute, read_part, relationship_id, relationship_targets};

const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";
const STYLES_PART: &str = "xl/styles.xml";
const WORKSHEET_REL_TYPE: &str = "/worksheet";

/// Zero-based `(row, column)` position of a cell.
pub type CellPosition = (u32, u32);

/// Returns, per sheet name, the positions of every cell rendered in bold.
pub fn read_bold_cells(path: &Path) -> Result<HashMap<String, HashSet<CellPosition>>> {
    let file = BufReader::new(File::open(path)?);
    let mut archive = ZipArchive::new(file)?;

    let workbook_xml = read_part(&mut archive, WORKBOOK_PART)?
        .ok_or_else(|| ToolError::InvalidWorkbook(format!("missing part '{WORKBOOK_PART}'")))?;
    let rels_xml = read_part(&mut archive, WORKBOOK_RELS_PART)?.ok_or_else(|| {
        ToolError::InvalidWorkbook(format!("missing part '{WORKBOOK_RELS_PART}'"))
    })?;

    let sheets = parse_sheet_entries(&workbook_xml)?;
    let targets = relationship_targets(&rels_xml, "xl", WORKSHEET_REL_TYPE)?;
    let bold_styles = match read_part(&mut archive, STYLES_PART)? {
        Some(styles_xml) => parse_bold_styles(&styles_xml)?,
        None => Vec::new(),
    };

    let mut bold_cells = HashMap::new();
    for (name, rel_id) in sheets {
        let Some(part) = targets.get(&rel_id) else {
            continue;
        };
        let Some(sheet_xml) = read_part(&mut archive, part)? else {
            return Err(ToolError::InvalidWorkbook(format!(
                "sheet '{name}' points at missing part '{part}'"
            )));
        };
        let cells = parse_styled_cells(&sheet_xml)?
            .into_iter()
            .filter(|(_, style)| bold_styles.get(*style as usize).copied().unwrap_or(false))
            .map(|(position, _)| position)
            .collect();
        bold_cells.insert(name, cells);
    }

    Ok(bold_cells)
}

/// Reads `(sheet name, relationship id)` pairs from `xl/workbook.xml`.
fn parse_sheet_entries(xml: &[u8]) -> Result<Vec<(String, String)>> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut sheets = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Empty(e) | Event::Start(e) if e.local_name().as_ref() == b"sheet" => {
                if let (Some(name), Some(rel_id)) = (attribute(&e, b"name")?, relationship_id(&e)?) {
                    sheets.push((name, rel_id));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(sheets)
}

/// Returns, for each cell style index (`<cellXfs>` entry), whether its font is bold.
fn parse_bold_styles(xml: &[u8]) -> Result<Vec<bool>> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut fonts = Vec::new();
    let mut xf_fonts = Vec::new();
    let mut in_fonts = false;
    let mut in_cell_xfs = false;
    let mut current_font: Option<bool> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"fonts" => in_fonts = true,
                b"font" if in_fonts => current_font = Some(false),
                b"b" if current_font.is_some() => current_font = Some(is_enabled(&e)?),
                b"cellXfs" => in_cell_xfs = true,
                b"xf" if in_cell_xfs => xf_fonts.push(font_id(&e)?),
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"font" if in_fonts => fonts.push(false),
                b"b" if current_font.is_some() => current_font = Some(is_enabled(&e)?),
                b"xf" if in_cell_xfs => xf_fonts.push(font_id(&e)?),
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"fonts" => in_fonts = false,
                b"font" if in_fonts => fonts.push(current_font.take().unwrap_or(false)),
                b"cellXfs" => in_cell_xfs = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(xf_fonts
        .into_iter()
        .map(|id| fonts.get(id).copied().unwrap_or(false))
        .collect())
}

/// Collects the explicit style index of every cell in a worksheet part.
/// Cells without an `s` attribute use style 0.
fn parse_styled_cells(xml: &[u8]) -> Result<Vec<(CellPosition, u32)>> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut cells = Vec::new();
    let mut current_row: Option<u32> = None;
    let mut next_column = 0u32;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) => match e.local_name().as_ref() {
                b"row" => {
                    let row = match attribute(&e, b"r")? {
                        Some(r) => parse_index(&r, "row")?,
                        None => current_row.map_or(0, |row| row + 1),
                    };
                    current_row = Some(row);
                    next_column = 0;
                }
                b"c" => {
                    let position = match attribute(&e, b"r")? {
                        Some(reference) => parse_cell_ref(&reference).ok_or_else(|| {
                            ToolError::InvalidWorkbook(format!("invalid cell reference '{reference}'"))
                        })?,
                        None => (current_row.unwrap_or(0), next_column),
                    };
                    let style = match attribute(&e, b"s")? {
                        Some(s) => s.parse().map_err(|_| {
                            ToolError::InvalidWorkbook(format!("invalid style index '{s}'"))
                        })?,
                        None => 0,
                    };
                    next_column = position.1 + 1;
                    cells.push((position, style));
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(cells)
}

/// Reads a boolean toggle such as `<b/>` or `<b val="0"/>`.
fn is_enabled(element: &BytesStart<'_>) -> Result<bool> {
    Ok(match attribute(element, b"val")? {
        Some(value) => !matches!(value.as_str(), "0" | "false"),
        None => true,
    })
}

fn font_id(element: &BytesStart<'_>) -> Result<usize> {
    match attribute(element, b"fontId")? {
        Some(id) => id
            .parse()
            .map_err(|_| ToolError::InvalidWorkbook(format!("invalid font id '{id}'"))),
        None => Ok(0),
    }
}

/// Parses a one-based row number into a zero-based index.
fn parse_index(value: &str, what: &str) -> Result<u32> {
    value
        .parse::<u32>()
        .ok()
        .and_then(|index| index.checked_sub(1))
        .ok_or_else(|| ToolError::InvalidWorkbook(format!("invalid {what} number '{value}'")))
}

/// Converts an A1-style reference into a zero-based `(row, column)` pair.
fn parse_cell_ref(reference: &str) -> Option<CellPosition> {
    let split = reference.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = reference.split_at(split);
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let column = letters.chars().try_fold(0u32, |acc, c| {
        let digit = c.to_ascii_uppercase() as u32 - 'A' as u32 + 1;
        acc.checked_mul(26)?.checked_add(digit)
    })?;
    let row = digits.parse::<u32>().ok()?;

    Some((row.checked_sub(1)?, column - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    const STYLES: &[u8] = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <fonts count="3">
    <font><sz val="11"/><name val="Calibri"/></font>
    <font><b/><sz val="11"/><name val="Calibri"/></font>
    <font><b val="0"/><sz val="11"/></font>
  </fonts>
  <cellStyleXfs count="1"><xf numFmtId="0" fontId="1"/></cellStyleXfs>
  <cellXfs count="4">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>
    <xf numFmtId="0" fontId="1" fillId="0" borderId="0" xfId="0" applyFont="1"/>
    <xf numFmtId="0" fontId="2" fillId="0" borderId="0" xfId="0"><alignment horizontal="left"/></xf>
    <xf numFmtId="0" fillId="0" borderId="0" xfId="0"/>
  </cellXfs>
  <dxfs count="1"><dxf><font><b/></font></dxf></dxfs>
</styleSheet>"#;

    #[test]
    fn bold_styles_follow_cell_xf_fonts() {
        let styles = parse_bold_styles(STYLES).expect("styles parsed");
        assert_eq!(styles, vec![false, true, false, false]);
    }

    #[test]
    fn sheet_entries_keep_workbook_order() {
        let workbook = br#"<workbook xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <sheets>
    <sheet name="Level2" sheetId="2" r:id="rId2"/>
    <sheet name="Level1" sheetId="1" r:id="rId1"/>
  </sheets>
</workbook>"#;

        let sheets = parse_sheet_entries(workbook).expect("workbook parsed");
        assert_eq!(
            sheets,
            vec![
                ("Level2".to_string(), "rId2".to_string()),
                ("Level1".to_string(), "rId1".to_string())
            ]
        );
    }

    #[test]
    fn styled_cells_use_references_and_positions() {
        let sheet = br#"<worksheet><sheetData>
  <row r="1"><c r="A1" t="s"><v>0</v></c></row>
  <row r="2"><c r="A2" s="1" t="s"><v>1</v></c><c s="2"><v>3</v></c></row>
  <row><c r="AB3" s="1"/></row>
</sheetData></worksheet>"#;

        let cells = parse_styled_cells(sheet).expect("sheet parsed");
        assert_eq!(
            cells,
            vec![((0, 0), 0), ((1, 0), 1), ((1, 1), 2), ((2, 27), 1)]
        );
    }

    #[test]
    fn cell_references_convert_to_zero_based() {
        assert_eq!(parse_cell_ref("A1"), Some((0, 0)));
        assert_eq!(parse_cell_ref("Z10"), Some((9, 25)));
        assert_eq!(parse_cell_ref("AA2"), Some((1, 26)));
        assert_eq!(parse_cell_ref("12"), None);
        assert_eq!(parse_cell_ref("A0"), None);
    }
}

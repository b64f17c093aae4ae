//! Fixture builders shared by the integration tests.
//!
//! Attendance workbooks are written with `rust_xlsxwriter` so bold cells carry
//! real font styles; templates are minimal `.pptx` packages whose slide holds
//! five shapes with the name text box at index 4.

#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook};
use tempfile::TempDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

pub const SENTINEL: &str = "Finished Level 3";
pub const NAME_SHAPE: &str = "Recipient";

/// One column-1 cell below the header: `(value, bold)`.
pub type Row<'a> = (Option<&'a str>, bool);

/// Creates a temporary run root with `attendance/` and `templates/`.
pub fn run_root() -> TempDir {
    let root = TempDir::new().expect("temporary directory");
    fs::create_dir(root.path().join("attendance")).expect("attendance directory");
    fs::create_dir(root.path().join("templates")).expect("templates directory");
    root
}

/// Writes an attendance workbook with a `Name` header on every sheet.
pub fn write_attendance(path: &Path, sheets: &[(&str, &[Row<'_>])]) {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    for (title, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*title).expect("sheet named");
        worksheet
            .write_string_with_format(0, 0, "Name", &bold)
            .expect("header written");
        worksheet.write_string(0, 1, "Sessions").expect("header written");

        for (index, (value, is_bold)) in rows.iter().enumerate() {
            let row = (index + 1) as u32;
            match (value, is_bold) {
                (Some(value), true) => worksheet
                    .write_string_with_format(row, 0, *value, &bold)
                    .map(|_| ()),
                (Some(value), false) => worksheet.write_string(row, 0, *value).map(|_| ()),
                (None, true) => worksheet.write_blank(row, 0, &bold).map(|_| ()),
                (None, false) => Ok(()),
            }
            .expect("cell written");
            worksheet
                .write_number(row, 1, 12.0)
                .expect("sessions written");
        }
    }

    workbook.save(path).expect("workbook saved");
}

/// Writes the default attendance workbook into `root/attendance`.
pub fn write_default_attendance(root: &Path, sheets: &[(&str, &[Row<'_>])]) -> PathBuf {
    let path = root.join("attendance").join("roll.xlsx");
    write_attendance(&path, sheets);
    path
}

/// Writes `root/templates/<level>.pptx`.
pub fn write_template(root: &Path, level: &str) -> PathBuf {
    let path = root.join("templates").join(format!("{level}.pptx"));
    fs::write(&path, template_bytes(level)).expect("template written");
    path
}

/// Builds a one-slide presentation package.
pub fn template_bytes(level: &str) -> Vec<u8> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let parts = [
        ("[Content_Types].xml", CONTENT_TYPES.to_string()),
        ("_rels/.rels", ROOT_RELS.to_string()),
        ("ppt/presentation.xml", PRESENTATION.to_string()),
        ("ppt/_rels/presentation.xml.rels", PRESENTATION_RELS.to_string()),
        ("ppt/slides/slide1.xml", slide_xml(level)),
        ("ppt/slides/_rels/slide1.xml.rels", SLIDE_RELS.to_string()),
    ];
    for (name, content) in parts {
        zip.start_file(name, SimpleFileOptions::default())
            .expect("part started");
        zip.write_all(content.as_bytes()).expect("part written");
    }
    zip.finish().expect("package finished").into_inner()
}

/// Part names of a package, in archive order.
pub fn package_parts(path: &Path) -> Vec<String> {
    let file = fs::File::open(path).expect("package opened");
    let archive = zip::ZipArchive::new(file).expect("package read");
    archive.file_names().map(str::to_string).collect()
}

/// Names of the entries of a directory, sorted.
pub fn dir_entries(path: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(path)
        .expect("directory listed")
        .map(|entry| {
            entry
                .expect("entry read")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    names
}

fn text_shape(id: u32, name: &str, text: &str) -> String {
    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="{name}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr><a:xfrm><a:off x="0" y="{y}"/><a:ext cx="9144000" cy="914400"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr><p:txBody><a:bodyPr wrap="square" rtlCol="0"/><a:lstStyle/><a:p><a:pPr algn="l"/><a:r><a:rPr lang="en-US" sz="1800" dirty="0"/><a:t>{text}</a:t></a:r><a:endParaRPr lang="en-US" sz="1800"/></a:p></p:txBody></p:sp>"#,
        y = id * 914400
    )
}

fn slide_xml(level: &str) -> String {
    let shapes = [
        text_shape(2, "Title", "Certificate of Attendance"),
        r#"<p:pic><p:nvPicPr><p:cNvPr id="3" name="Seal"/><p:cNvPicPr/><p:nvPr/></p:nvPicPr><p:blipFill/><p:spPr/></p:pic>"#.to_string(),
        text_shape(4, "Presented", "is presented to"),
        text_shape(5, "Level", level),
        text_shape(6, NAME_SHAPE, "Student Name"),
    ]
    .concat();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>{shapes}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"#
    )
}

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/><Override PartName="/ppt/slides/slide1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/></Relationships>"#;

const PRESENTATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:sldIdLst><p:sldId id="256" r:id="rId2"/></p:sldIdLst><p:sldSz cx="9144000" cy="6858000"/><p:notesSz cx="6858000" cy="9144000"/></p:presentation>"#;

const PRESENTATION_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide1.xml"/></Relationships>"#;

const SLIDE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"></Relationships>"#;

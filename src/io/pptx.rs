//! Certificate templates stored as `.pptx` packages.
//!
//! A template is loaded into memory once and rendered any number of times.
//! Rendering copies every package part unchanged except the first slide, in
//! which the text body of the placeholder shape is replaced by a single
//! centred paragraph holding the recipient's name.

use std::fmt;
use std::fs::{self, File};
use std::io::{BufReader, Cursor, ErrorKind, Read, Seek, Write};
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::name::QName;
use quick_xml::{Reader, Writer};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::config::{CERTIFICATE_FONT_NAME, CERTIFICATE_FONT_SIZE, NAME_SHAPE_INDEX};
use crate::error::{Result, ToolError};
use crate::io::package::{attribute, relationship_id, relationship_targets};

const ROOT_RELS_PART: &str = "_rels/.rels";
const DEFAULT_PRESENTATION_PART: &str = "ppt/presentation.xml";
const OFFICE_DOCUMENT_REL_TYPE: &str = "/officeDocument";
const SLIDE_REL_TYPE: &str = "/slide";
const DRAWING_PREFIX: &str = "a";

/// Direct children of `<p:spTree>` that count as shapes.
const SHAPE_ELEMENTS: [&[u8]; 6] = [
    b"sp",
    b"grpSp",
    b"graphicFrame",
    b"cxnSp",
    b"pic",
    b"contentPart",
];

/// Font applied to the name run.
#[derive(Debug, Clone, PartialEq)]
pub struct CertificateStyle {
    pub font_name: String,
    /// Size in points.
    pub font_size: f64,
    pub bold: bool,
}

impl Default for CertificateStyle {
    fn default() -> Self {
        Self {
            font_name: CERTIFICATE_FONT_NAME.to_string(),
            font_size: CERTIFICATE_FONT_SIZE,
            bold: true,
        }
    }
}

impl CertificateStyle {
    /// Checks that the style can be written to a run.
    pub fn validate(&self) -> Result<()> {
        if self.font_name.trim().is_empty() {
            return Err(ToolError::InvalidStyle("font name is empty".into()));
        }
        // DrawingML sizes are hundredths of a point in 1..=4000 pt.
        if !(1.0..=4000.0).contains(&self.font_size) {
            return Err(ToolError::InvalidStyle(format!(
                "font size {} is outside 1-4000 pt",
                self.font_size
            )));
        }
        Ok(())
    }

    fn size_attribute(&self) -> String {
        ((self.font_size * 100.0).round() as u32).to_string()
    }
}

/// Strategy used to find the name placeholder on the template slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceholderLocator {
    /// Position among the slide's top-level shapes.
    ByIndex(usize),
    /// Shape whose non-visual name (`cNvPr@name`) matches.
    ByName(String),
}

impl Default for PlaceholderLocator {
    fn default() -> Self {
        Self::ByIndex(NAME_SHAPE_INDEX)
    }
}

impl fmt::Display for PlaceholderLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByIndex(index) => write!(f, "at index {index}"),
            Self::ByName(name) => write!(f, "named '{name}'"),
        }
    }
}

impl PlaceholderLocator {
    /// Picks the placeholder out of a slide outline.
    pub fn locate<'s>(&self, shapes: &'s [ShapeInfo]) -> Result<&'s ShapeInfo> {
        let found = match self {
            Self::ByIndex(index) => shapes.get(*index),
            Self::ByName(name) => shapes
                .iter()
                .find(|shape| shape.name.as_deref() == Some(name.as_str())),
        };
        found.ok_or_else(|| ToolError::MissingPlaceholder {
            locator: self.to_string(),
            shape_count: shapes.len(),
        })
    }
}

/// Summary of one top-level shape on a slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeInfo {
    pub position: usize,
    /// Local element name, e.g. `sp` or `pic`.
    pub kind: String,
    pub name: Option<String>,
    /// Paragraph texts joined with `\n`; `None` when the shape has no text body.
    pub text: Option<String>,
}

struct PackageEntry {
    name: String,
    data: Vec<u8>,
    is_dir: bool,
}

/// An in-memory certificate template.
pub struct Template {
    path: PathBuf,
    entries: Vec<PackageEntry>,
    slide_entry: usize,
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("path", &self.path)
            .field("slide", &self.slide_part())
            .field("parts", &self.entries.len())
            .finish()
    }
}

impl Template {
    /// Loads the template at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                return Err(ToolError::MissingTemplate(path.to_path_buf()));
            }
            Err(error) => return Err(error.into()),
        };
        Self::from_reader(BufReader::new(file), path)
    }

    /// Loads a template from any seekable reader; `path` is only used for reporting.
    pub fn from_reader<R: Read + Seek>(reader: R, path: &Path) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;
        let mut entries = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let mut file = archive.by_index(index)?;
            let mut data = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut data)?;
            entries.push(PackageEntry {
                name: file.name().to_string(),
                is_dir: file.is_dir(),
                data,
            });
        }

        let mut template = Self {
            path: path.to_path_buf(),
            entries,
            slide_entry: 0,
        };
        let slide_part = template.first_slide_part()?;
        template.slide_entry = template
            .entries
            .iter()
            .position(|entry| entry.name == slide_part)
            .ok_or_else(|| {
                ToolError::InvalidTemplate(format!("slide part '{slide_part}' is missing"))
            })?;
        Ok(template)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name of the package part holding the certificate slide.
    pub fn slide_part(&self) -> &str {
        &self.entries[self.slide_entry].name
    }

    /// Lists the top-level shapes of the certificate slide.
    pub fn shapes(&self) -> Result<Vec<ShapeInfo>> {
        outline_slide(&self.entries[self.slide_entry].data)
    }

    /// Returns the current text of the placeholder shape.
    pub fn placeholder_text(&self, locator: &PlaceholderLocator) -> Result<String> {
        let shapes = self.shapes()?;
        let shape = locator.locate(&shapes)?;
        Ok(shape.text.clone().unwrap_or_default())
    }

    /// Produces the bytes of a certificate for `name`.
    pub fn render(
        &self,
        name: &str,
        style: &CertificateStyle,
        locator: &PlaceholderLocator,
    ) -> Result<Vec<u8>> {
        let slide = &self.entries[self.slide_entry].data;
        let shapes = outline_slide(slide)?;
        let placeholder = locator.locate(&shapes)?;
        if placeholder.kind != "sp" {
            return Err(ToolError::UnsupportedShape {
                position: placeholder.position,
                kind: placeholder.kind.clone(),
            });
        }
        let slide = rewrite_slide(slide, placeholder.position, name, style)?;

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (index, entry) in self.entries.iter().enumerate() {
            if entry.is_dir {
                writer.add_directory(entry.name.as_str(), entry_options())?;
                continue;
            }
            writer.start_file(entry.name.as_str(), entry_options())?;
            let data = if index == self.slide_entry {
                &slide
            } else {
                &entry.data
            };
            writer.write_all(data)?;
        }
        Ok(writer.finish()?.into_inner())
    }

    /// Renders a certificate for `name` and writes it to `output`.
    pub fn save_certificate(
        &self,
        name: &str,
        style: &CertificateStyle,
        locator: &PlaceholderLocator,
        output: &Path,
    ) -> Result<()> {
        let bytes = self.render(name, style, locator)?;
        fs::write(output, bytes)?;
        Ok(())
    }

    fn part(&self, name: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.data.as_slice())
    }

    /// Follows the package relationships to the first slide in presentation order.
    fn first_slide_part(&self) -> Result<String> {
        let presentation_part = match self.part(ROOT_RELS_PART) {
            Some(rels) => relationship_targets(rels, "", OFFICE_DOCUMENT_REL_TYPE)?
                .into_values()
                .next()
                .unwrap_or_else(|| DEFAULT_PRESENTATION_PART.to_string()),
            None => DEFAULT_PRESENTATION_PART.to_string(),
        };
        let presentation = self.part(&presentation_part).ok_or_else(|| {
            ToolError::InvalidTemplate(format!("missing part '{presentation_part}'"))
        })?;

        let (base_dir, file_name) = presentation_part
            .rsplit_once('/')
            .unwrap_or(("", presentation_part.as_str()));
        let rels_part = if base_dir.is_empty() {
            format!("_rels/{file_name}.rels")
        } else {
            format!("{base_dir}/_rels/{file_name}.rels")
        };
        let rels = self
            .part(&rels_part)
            .ok_or_else(|| ToolError::InvalidTemplate(format!("missing part '{rels_part}'")))?;
        let slides = relationship_targets(rels, base_dir, SLIDE_REL_TYPE)?;

        let first_id = first_slide_id(presentation)?
            .ok_or_else(|| ToolError::InvalidTemplate("presentation has no slides".into()))?;
        slides.get(&first_id).cloned().ok_or_else(|| {
            ToolError::InvalidTemplate(format!("slide relationship '{first_id}' is missing"))
        })
    }
}

fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
}

/// Reads the placeholder text of a rendered certificate.
pub fn read_placeholder_text(path: &Path, locator: &PlaceholderLocator) -> Result<String> {
    Template::open(path)?.placeholder_text(locator)
}

/// Relationship id of the first `<p:sldId>` in the presentation.
fn first_slide_id(presentation_xml: &[u8]) -> Result<Option<String>> {
    let mut reader = Reader::from_reader(presentation_xml);
    reader.trim_text(true);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Empty(e) | Event::Start(e) if e.local_name().as_ref() == b"sldId" => {
                return relationship_id(&e);
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
        buf.clear();
    }
}

fn is_shape(local_name: &[u8]) -> bool {
    SHAPE_ELEMENTS.contains(&local_name)
}

fn local_name_string(element: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(element.local_name().as_ref()).into_owned()
}

fn prefix_of(name: QName<'_>) -> Option<String> {
    name.prefix()
        .map(|prefix| String::from_utf8_lossy(prefix.as_ref()).into_owned())
}

fn qualified(prefix: Option<&str>, local: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}:{local}"),
        None => local.to_string(),
    }
}

/// Lists the direct shape children of the slide's shape tree.
pub fn outline_slide(xml: &[u8]) -> Result<Vec<ShapeInfo>> {
    let mut reader = Reader::from_reader(xml);

    let mut shapes: Vec<ShapeInfo> = Vec::new();
    let mut depth = 0usize;
    let mut tree_level: Option<usize> = None;
    let mut shape_level: Option<usize> = None;
    let mut body_level: Option<usize> = None;
    let mut paragraphs: Vec<String> = Vec::new();
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let level = depth + 1;
                let local = e.local_name();
                if tree_level.is_none() {
                    if local.as_ref() == b"spTree" {
                        tree_level = Some(level);
                    }
                } else if shape_level.is_none() && tree_level == Some(level - 1) {
                    if is_shape(local.as_ref()) {
                        shapes.push(ShapeInfo {
                            position: shapes.len(),
                            kind: local_name_string(&e),
                            name: None,
                            text: None,
                        });
                        shape_level = Some(level);
                    }
                } else if let Some(level_of_shape) = shape_level {
                    match local.as_ref() {
                        b"cNvPr" => record_shape_name(&mut shapes, &e)?,
                        b"txBody" if level == level_of_shape + 1 => {
                            body_level = Some(level);
                            paragraphs.clear();
                        }
                        b"p" if body_level == Some(level - 1) => paragraphs.push(String::new()),
                        b"t" if body_level.is_some() => in_text = true,
                        _ => {}
                    }
                }
                depth += 1;
            }
            Event::Empty(e) => {
                let level = depth + 1;
                let local = e.local_name();
                if tree_level.is_some() && shape_level.is_none() && tree_level == Some(level - 1) {
                    if is_shape(local.as_ref()) {
                        shapes.push(ShapeInfo {
                            position: shapes.len(),
                            kind: local_name_string(&e),
                            name: None,
                            text: None,
                        });
                    }
                } else if let Some(level_of_shape) = shape_level {
                    match local.as_ref() {
                        b"cNvPr" => record_shape_name(&mut shapes, &e)?,
                        b"txBody" if level == level_of_shape + 1 => {
                            if let Some(shape) = shapes.last_mut() {
                                shape.text = Some(String::new());
                            }
                        }
                        b"p" if body_level == Some(level - 1) => paragraphs.push(String::new()),
                        _ => {}
                    }
                }
            }
            Event::Text(e) if in_text => {
                if let Some(paragraph) = paragraphs.last_mut() {
                    paragraph.push_str(&e.unescape()?);
                }
            }
            Event::End(e) => {
                if e.local_name().as_ref() == b"t" {
                    in_text = false;
                }
                if body_level == Some(depth) {
                    if let Some(shape) = shapes.last_mut() {
                        shape.text = Some(paragraphs.join("\n"));
                    }
                    body_level = None;
                }
                if shape_level == Some(depth) {
                    shape_level = None;
                }
                if tree_level == Some(depth) {
                    break;
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if tree_level.is_none() {
        return Err(ToolError::InvalidTemplate("slide has no shape tree".into()));
    }
    Ok(shapes)
}

fn record_shape_name(shapes: &mut [ShapeInfo], element: &BytesStart<'_>) -> Result<()> {
    if let Some(shape) = shapes.last_mut() {
        if shape.name.is_none() {
            shape.name = attribute(element, b"name")?;
        }
    }
    Ok(())
}

/// Rewrites the text body of the shape at `position` to hold `name`.
fn rewrite_slide(
    xml: &[u8],
    position: usize,
    name: &str,
    style: &CertificateStyle,
) -> Result<Vec<u8>> {
    style.validate()?;

    let mut reader = Reader::from_reader(xml);
    let mut writer = Writer::new(Vec::with_capacity(xml.len() + 512));

    let mut depth = 0usize;
    let mut tree_level: Option<usize> = None;
    let mut seen = 0usize;
    let mut target_level: Option<usize> = None;
    let mut body_written = false;
    let mut rewritten = false;

    loop {
        let event = reader.read_event()?;
        match &event {
            Event::Start(e) => {
                let level = depth + 1;
                let local = e.local_name();
                if tree_level.is_none() {
                    if local.as_ref() == b"spTree" {
                        tree_level = Some(level);
                    }
                } else if !rewritten
                    && target_level.is_none()
                    && tree_level == Some(level - 1)
                    && is_shape(local.as_ref())
                {
                    if seen == position {
                        target_level = Some(level);
                    }
                    seen += 1;
                } else if target_level == Some(level - 1) && !body_written {
                    match local.as_ref() {
                        b"txBody" => {
                            let inner = collect_element(&mut reader)?;
                            write_text_body(&mut writer, e, Some(inner), name, style)?;
                            body_written = true;
                            continue;
                        }
                        b"extLst" => {
                            write_fresh_text_body(&mut writer, e.name(), name, style)?;
                            body_written = true;
                        }
                        _ => {}
                    }
                }
                depth += 1;
            }
            Event::Empty(e) => {
                let level = depth + 1;
                let local = e.local_name();
                if !rewritten
                    && tree_level.is_some()
                    && target_level.is_none()
                    && tree_level == Some(level - 1)
                    && is_shape(local.as_ref())
                {
                    if seen == position {
                        return Err(ToolError::InvalidTemplate(format!(
                            "shape {position} is an empty element"
                        )));
                    }
                    seen += 1;
                } else if target_level == Some(level - 1) && !body_written {
                    match local.as_ref() {
                        b"txBody" => {
                            write_text_body(&mut writer, e, None, name, style)?;
                            body_written = true;
                            continue;
                        }
                        b"extLst" => {
                            write_fresh_text_body(&mut writer, e.name(), name, style)?;
                            body_written = true;
                        }
                        _ => {}
                    }
                }
            }
            Event::End(e) => {
                if target_level == Some(depth) {
                    if !body_written {
                        write_fresh_text_body(&mut writer, e.name(), name, style)?;
                        body_written = true;
                    }
                    target_level = None;
                    rewritten = true;
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
        writer.write_event(event)?;
    }

    if !rewritten {
        return Err(ToolError::MissingPlaceholder {
            locator: PlaceholderLocator::ByIndex(position).to_string(),
            shape_count: seen,
        });
    }
    Ok(writer.into_inner())
}

/// Consumes events up to the end of the element whose start was just read,
/// returning everything in between.
fn collect_element<'a>(reader: &mut Reader<&'a [u8]>) -> Result<Vec<Event<'a>>> {
    let mut events = Vec::new();
    let mut nesting = 0usize;
    loop {
        let event = reader.read_event()?;
        match &event {
            Event::Start(_) => nesting += 1,
            Event::End(_) if nesting == 0 => return Ok(events),
            Event::End(_) => nesting -= 1,
            Event::Eof => {
                return Err(ToolError::InvalidTemplate(
                    "slide ends inside a text body".into(),
                ));
            }
            _ => {}
        }
        events.push(event);
    }
}

/// Splits a flat event list into its top-level elements, dropping loose text.
fn top_level_elements<'a>(events: Vec<Event<'a>>) -> Vec<Vec<Event<'a>>> {
    let mut elements = Vec::new();
    let mut current = Vec::new();
    let mut nesting = 0usize;

    for event in events {
        match &event {
            Event::Start(_) => {
                nesting += 1;
                current.push(event);
            }
            Event::End(_) => {
                nesting = nesting.saturating_sub(1);
                current.push(event);
                if nesting == 0 {
                    elements.push(std::mem::take(&mut current));
                }
            }
            Event::Empty(_) if nesting == 0 => elements.push(vec![event]),
            _ if nesting > 0 => current.push(event),
            _ => {}
        }
    }

    elements
}

fn element_start<'e, 'a>(element: &'e [Event<'a>]) -> Option<&'e BytesStart<'a>> {
    match element.first() {
        Some(Event::Start(e)) | Some(Event::Empty(e)) => Some(e),
        _ => None,
    }
}

fn is_element(element: &[Event<'_>], local: &[u8]) -> bool {
    element_start(element).is_some_and(|e| e.local_name().as_ref() == local)
}

fn write_all(writer: &mut Writer<Vec<u8>>, events: &[Event<'_>]) -> Result<()> {
    for event in events {
        writer.write_event(event)?;
    }
    Ok(())
}

/// Writes `<p:txBody>` keeping its body and list properties, followed by the
/// name paragraph built from the first existing paragraph.
fn write_text_body(
    writer: &mut Writer<Vec<u8>>,
    body: &BytesStart<'_>,
    inner: Option<Vec<Event<'_>>>,
    name: &str,
    style: &CertificateStyle,
) -> Result<()> {
    let elements = top_level_elements(inner.unwrap_or_default());
    let prefix = elements
        .iter()
        .find_map(|element| element_start(element))
        .and_then(|start| prefix_of(start.name()));
    let prefix = prefix.as_deref().unwrap_or(DRAWING_PREFIX);

    writer.write_event(Event::Start(body.clone()))?;
    let mut first_paragraph = None;
    let mut has_body_properties = false;
    for element in elements {
        if is_element(&element, b"p") {
            if first_paragraph.is_none() {
                first_paragraph = Some(element);
            }
            continue;
        }
        has_body_properties |= is_element(&element, b"bodyPr");
        write_all(writer, &element)?;
    }
    if !has_body_properties {
        writer.write_event(Event::Empty(BytesStart::new(qualified(
            Some(prefix),
            "bodyPr",
        ))))?;
    }
    write_name_paragraph(writer, first_paragraph, prefix, name, style)?;
    writer.write_event(Event::End(body.to_end().into_owned()))?;
    Ok(())
}

/// Writes a complete text body for a shape that had none. `sibling` is any
/// element name in the shape's namespace.
fn write_fresh_text_body(
    writer: &mut Writer<Vec<u8>>,
    sibling: QName<'_>,
    name: &str,
    style: &CertificateStyle,
) -> Result<()> {
    let shape_prefix = prefix_of(sibling);
    let body = BytesStart::new(qualified(shape_prefix.as_deref(), "txBody"));
    writer.write_event(Event::Start(body.clone()))?;
    writer.write_event(Event::Empty(BytesStart::new(qualified(
        Some(DRAWING_PREFIX),
        "bodyPr",
    ))))?;
    writer.write_event(Event::Empty(BytesStart::new(qualified(
        Some(DRAWING_PREFIX),
        "lstStyle",
    ))))?;
    write_name_paragraph(writer, None, DRAWING_PREFIX, name, style)?;
    writer.write_event(Event::End(body.to_end().into_owned()))?;
    Ok(())
}

/// Writes `<a:p>` holding a single run with `name`. Paragraph properties and
/// end-of-paragraph run properties of `template` survive; its runs do not.
fn write_name_paragraph(
    writer: &mut Writer<Vec<u8>>,
    template: Option<Vec<Event<'_>>>,
    prefix: &str,
    name: &str,
    style: &CertificateStyle,
) -> Result<()> {
    let fallback = BytesStart::new(qualified(Some(prefix), "p"));
    let (paragraph, children) = match template {
        Some(events) => {
            let start = element_start(&events)
                .map(|start| start.clone().into_owned())
                .unwrap_or(fallback);
            let inner: Vec<Event<'_>> = match events.first() {
                Some(Event::Start(_)) if events.len() >= 2 => {
                    events[1..events.len() - 1].to_vec()
                }
                _ => Vec::new(),
            };
            (start, top_level_elements(inner))
        }
        None => (fallback, Vec::new()),
    };

    writer.write_event(Event::Start(paragraph.clone()))?;

    match children.iter().find(|element| is_element(element, b"pPr")) {
        Some(properties) => {
            for (index, event) in properties.iter().enumerate() {
                match event {
                    Event::Start(e) if index == 0 => {
                        writer.write_event(Event::Start(centered(e)?))?
                    }
                    Event::Empty(e) if index == 0 => {
                        writer.write_event(Event::Empty(centered(e)?))?
                    }
                    other => writer.write_event(other)?,
                }
            }
        }
        None => {
            let mut properties = BytesStart::new(qualified(Some(prefix), "pPr"));
            properties.push_attribute(("algn", "ctr"));
            writer.write_event(Event::Empty(properties))?;
        }
    }

    let run = BytesStart::new(qualified(Some(prefix), "r"));
    let mut run_properties = BytesStart::new(qualified(Some(prefix), "rPr"));
    run_properties.push_attribute(("lang", "en-US"));
    run_properties.push_attribute(("sz", style.size_attribute().as_str()));
    run_properties.push_attribute(("b", if style.bold { "1" } else { "0" }));
    run_properties.push_attribute(("dirty", "0"));
    let mut latin = BytesStart::new(qualified(Some(prefix), "latin"));
    latin.push_attribute(("typeface", style.font_name.as_str()));
    let text = BytesStart::new(qualified(Some(prefix), "t"));

    writer.write_event(Event::Start(run.clone()))?;
    writer.write_event(Event::Start(run_properties.clone()))?;
    writer.write_event(Event::Empty(latin))?;
    writer.write_event(Event::End(run_properties.to_end().into_owned()))?;
    writer.write_event(Event::Start(text.clone()))?;
    writer.write_event(Event::Text(BytesText::new(name)))?;
    writer.write_event(Event::End(text.to_end().into_owned()))?;
    writer.write_event(Event::End(run.to_end().into_owned()))?;

    if let Some(end_properties) = children
        .iter()
        .find(|element| is_element(element, b"endParaRPr"))
    {
        write_all(writer, end_properties)?;
    }

    writer.write_event(Event::End(paragraph.to_end().into_owned()))?;
    Ok(())
}

/// Copies paragraph properties with the alignment forced to centre.
fn centered(properties: &BytesStart<'_>) -> Result<BytesStart<'static>> {
    let mut centered = properties.clone().into_owned();
    centered.clear_attributes();
    for attr in properties.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.as_ref() != b"algn" {
            centered.push_attribute((attr.key.as_ref(), attr.value.as_ref()));
        }
    }
    centered.push_attribute(("algn", "ctr"));
    Ok(centered)
}

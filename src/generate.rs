use std::fs;
use std::path::Path;

use tracing::{debug, error, info, instrument, warn};

use crate::config::RunConfig;
use crate::error::Result;
use crate::io::excel_read::read_workbook;
use crate::io::locate::locate_spreadsheet;
use crate::io::pptx::{ShapeInfo, Template};
use crate::model::{CertificateFailure, RunSummary, SkippedWorksheet, Worksheet};
use crate::names::{extract_names, parse_name};

/// Generates one certificate per qualifying attendee of every worksheet.
///
/// Only a missing or ambiguous spreadsheet, an unreadable workbook or an
/// unusable style abort the run. Template and certificate failures are
/// logged, recorded in the summary and skipped.
#[instrument(
    level = "info",
    skip_all,
    fields(attendance = %config.attendance_dir.display())
)]
pub fn generate_certificates(config: &RunConfig) -> Result<RunSummary> {
    config.style.validate()?;

    let spreadsheet = locate_spreadsheet(&config.attendance_dir, &config.spreadsheet_extension)?;
    let workbook = read_workbook(&spreadsheet)?;
    info!(
        path = %spreadsheet.display(),
        sheet_count = workbook.worksheets.len(),
        "opened attendance workbook"
    );

    let mut summary = RunSummary {
        spreadsheet,
        ..RunSummary::default()
    };
    for worksheet in &workbook.worksheets {
        process_worksheet(config, worksheet, &mut summary);
    }

    info!(
        created = summary.created.len(),
        failed = summary.failed.len(),
        skipped = summary.skipped.len(),
        "certificate generation finished"
    );
    Ok(summary)
}

#[instrument(level = "info", skip_all, fields(worksheet = %worksheet.title))]
fn process_worksheet(config: &RunConfig, worksheet: &Worksheet, summary: &mut RunSummary) {
    if worksheet.title == config.skip_sheet {
        debug!("worksheet is excluded from certificate generation");
        summary.skipped.push(SkippedWorksheet {
            worksheet: worksheet.title.clone(),
            reason: "excluded worksheet".into(),
        });
        return;
    }

    let directory = config.worksheet_output_dir(&worksheet.title);
    if let Err(err) = fs::create_dir_all(&directory) {
        error!(directory = %directory.display(), error = %err, "cannot create output directory");
        summary.skipped.push(SkippedWorksheet {
            worksheet: worksheet.title.clone(),
            reason: err.to_string(),
        });
        return;
    }

    let template_path = config.template_path(&worksheet.title);
    let template = match Template::open(&template_path) {
        Ok(template) => template,
        Err(err) => {
            error!(
                template = %template_path.display(),
                error = %err,
                "cannot load certificate template, skipping worksheet"
            );
            summary.skipped.push(SkippedWorksheet {
                worksheet: worksheet.title.clone(),
                reason: err.to_string(),
            });
            return;
        }
    };
    debug!(slide = template.slide_part(), "template loaded");

    let names = extract_names(worksheet, &config.skip_sheet);
    if names.is_empty() {
        warn!("no bold names found");
    }

    for raw_name in names {
        let name = parse_name(&raw_name);
        let output = config.certificate_path(&directory, &name);
        match template.save_certificate(&name, &config.style, &config.placeholder, &output) {
            Ok(()) => {
                info!(name = %name, path = %output.display(), "created certificate");
                summary.created.push(output);
            }
            Err(err) => {
                error!(name = %name, error = %err, "failed to create certificate");
                summary.failed.push(CertificateFailure {
                    worksheet: worksheet.title.clone(),
                    name,
                    reason: err.to_string(),
                });
            }
        }
    }
}

/// Writes the run summary as pretty-printed JSON.
#[instrument(level = "debug", skip_all, fields(output = %output.display()))]
pub fn write_summary(output: &Path, summary: &RunSummary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    fs::write(output, json)?;
    Ok(())
}

/// Lists the shapes of a template's certificate slide.
#[instrument(level = "info", skip_all, fields(template = %template.display()))]
pub fn inspect_template(template: &Path) -> Result<Vec<ShapeInfo>> {
    let template = Template::open(template)?;
    let shapes = template.shapes()?;
    debug!(shape_count = shapes.len(), slide = template.slide_part(), "template outlined");
    Ok(shapes)
}

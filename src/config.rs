use std::path::{Path, PathBuf};

use crate::io::pptx::{CertificateStyle, PlaceholderLocator};

/// Directory, relative to the run root, that holds the attendance workbook.
pub const ATTENDANCE_DIR: &str = "attendance";
/// Directory, relative to the run root, that holds one template per level.
pub const TEMPLATES_DIR: &str = "templates";
/// Worksheet listing attendees that already received their certificate.
pub const SKIP_SHEET_NAME: &str = "Finished Level 3";
pub const EXCEL_EXTENSION: &str = ".xlsx";
pub const POWERPOINT_EXTENSION: &str = ".pptx";
pub const CERTIFICATE_FONT_NAME: &str = "Century Schoolbook";
pub const CERTIFICATE_FONT_SIZE: f64 = 40.0;
/// Position of the name text box among the template slide's shapes.
pub const NAME_SHAPE_INDEX: usize = 4;

/// Everything a generation run needs to know about its environment.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub attendance_dir: PathBuf,
    pub templates_dir: PathBuf,
    /// Parent of the per-worksheet output directories.
    pub output_dir: PathBuf,
    pub skip_sheet: String,
    pub spreadsheet_extension: String,
    pub presentation_extension: String,
    pub style: CertificateStyle,
    pub placeholder: PlaceholderLocator,
}

impl RunConfig {
    /// Default layout for a run rooted at `root`.
    pub fn rooted_at(root: &Path) -> Self {
        Self {
            attendance_dir: root.join(ATTENDANCE_DIR),
            templates_dir: root.join(TEMPLATES_DIR),
            output_dir: root.to_path_buf(),
            skip_sheet: SKIP_SHEET_NAME.to_string(),
            spreadsheet_extension: EXCEL_EXTENSION.to_string(),
            presentation_extension: POWERPOINT_EXTENSION.to_string(),
            style: CertificateStyle::default(),
            placeholder: PlaceholderLocator::default(),
        }
    }

    /// Template used for every certificate of `worksheet`.
    pub fn template_path(&self, worksheet: &str) -> PathBuf {
        self.templates_dir
            .join(format!("{worksheet}{}", self.presentation_extension))
    }

    /// Directory receiving the certificates of `worksheet`.
    pub fn worksheet_output_dir(&self, worksheet: &str) -> PathBuf {
        self.output_dir.join(worksheet)
    }

    /// Certificate file for `name` inside `directory`.
    pub fn certificate_path(&self, directory: &Path, name: &str) -> PathBuf {
        directory.join(format!("{name}{}", self.presentation_extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_follows_root() {
        let config = RunConfig::rooted_at(Path::new("/srv/classes"));

        assert_eq!(config.attendance_dir, Path::new("/srv/classes/attendance"));
        assert_eq!(
            config.template_path("Level1"),
            Path::new("/srv/classes/templates/Level1.pptx")
        );
        let dir = config.worksheet_output_dir("Level1");
        assert_eq!(dir, Path::new("/srv/classes/Level1"));
        assert_eq!(
            config.certificate_path(&dir, "John Doe"),
            Path::new("/srv/classes/Level1/John Doe.pptx")
        );
        assert_eq!(config.skip_sheet, "Finished Level 3");
    }
}

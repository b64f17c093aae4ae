pub mod excel_read;
pub mod locate;
pub(crate) mod package;
pub mod pptx;
pub mod xlsx_styles;

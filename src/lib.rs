//! Core library for the certificate-tools command line application.
//!
//! The library turns an attendance workbook into one certificate per
//! qualifying attendee. IO adapters live under [`io`] (spreadsheet discovery,
//! workbook reading, presentation templates), the in-memory representation in
//! [`model`], name selection and formatting in [`names`], and the run
//! orchestration in [`generate`].

pub mod config;
pub mod error;
pub mod generate;
pub mod io;
pub mod model;
pub mod names;

pub use config::RunConfig;
pub use error::{Result, ToolError};

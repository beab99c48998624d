//! Fill, stamp and concatenate PDF documents by driving the external `pdftk` tool.
//!
//! All PDF processing is delegated to `pdftk`. This crate generates the FDF
//! data file for form filling, runs the tool in a private scratch directory and
//! hands the produced document back to the caller.

pub mod config;
pub mod error;
pub mod fdf;
pub mod pdftk;
pub mod pipeline;

use std::path::Path;

pub use error::{PdfFillError, Result};
pub use fdf::{CheckboxLabels, FieldMap, FieldValue};
pub use pdftk::Pdftk;

/// Fill `source`'s form fields from `fields`, flatten, and write the result to `dest`.
///
/// Fails with [`PdfFillError::DestinationExists`] when `dest` exists and
/// `overwrite` is false.
pub fn fill(
    fields: &FieldMap,
    labels: &CheckboxLabels,
    source: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    overwrite: bool,
) -> Result<()> {
    Pdftk::locate()?.fill(fields, labels, source.as_ref(), dest.as_ref(), overwrite)
}

/// Like [`fill`], but returns the flattened document instead of writing it.
///
/// The FDF data file is staged in the caller-owned `scratch_dir`.
pub fn fill_to_bytes(
    fields: &FieldMap,
    labels: &CheckboxLabels,
    source: impl AsRef<Path>,
    scratch_dir: impl AsRef<Path>,
) -> Result<Vec<u8>> {
    Pdftk::locate()?.fill_to_bytes(fields, labels, source.as_ref(), scratch_dir.as_ref())
}

/// Stamp each page of `stamp` onto the matching page of `base`.
pub fn stamp(base: impl AsRef<Path>, stamp: impl AsRef<Path>) -> Result<Vec<u8>> {
    Pdftk::locate()?.stamp(base.as_ref(), stamp.as_ref())
}

/// Concatenate `documents` in order into one PDF.
pub fn merge<P: AsRef<Path>>(documents: &[P]) -> Result<Vec<u8>> {
    Pdftk::locate()?.merge(documents)
}
